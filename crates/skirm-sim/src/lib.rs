//! **skirm-sim** — squad-level tactical simulation.
//!
//! Builds on `skirm-paths` to run a small top-down skirmish: a tile
//! [`Level`](level::Level) answers walkability, a [`Squad`](squad::Squad)
//! owns players and projectiles, and [`Motion`](motion::Motion) drains
//! each player's waypoint queue tick by tick. Rendering, input mapping and
//! asset loading live elsewhere; this crate is pure simulation state.

pub mod level;
pub mod motion;
pub mod projectile;
pub mod squad;

pub use level::{Level, LevelError, TILE_SIZE, TileKind, tile_to_world, world_to_tile};
pub use motion::Motion;
pub use projectile::Bullet;
pub use squad::{Player, PlayerId, Squad, Team};
