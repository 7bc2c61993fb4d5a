//! Grid pathfinding for the skirm tactical simulation.
//!
//! This crate implements best-first shortest-path search over the
//! 8-connected integer grid:
//!
//! - **A\*** waypoint search ([`Pathfinder::find_path`]) with a uniform
//!   step cost (diagonals cost the same as cardinals) and a Manhattan
//!   heuristic.
//! - Distance helpers ([`manhattan`], [`chebyshev`]).
//!
//! [`Pathfinder`] owns and reuses its internal caches (node arena, open
//! heap, visited set) so that repeated queries incur few allocations after
//! warm-up. The world is queried through the [`Walkable`] trait, which is
//! also implemented for plain `Fn(Point) -> bool` closures.

mod astar;
mod distance;
mod traits;

pub use astar::{Pathfinder, STEP_COST};
pub use distance::{chebyshev, manhattan};
pub use traits::Walkable;
