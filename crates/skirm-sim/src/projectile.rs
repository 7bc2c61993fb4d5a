//! Projectiles fired by players.

use glam::Vec2;

use crate::squad::PlayerId;

/// World units a bullet covers per second.
pub const BULLET_SPEED: f32 = 400.0;

/// Health removed by one hit.
pub const BULLET_DAMAGE: f32 = 0.2;

/// A bullet in flight. Spent bullets are flagged `deleted` and recycled
/// by the next shot instead of being dropped from the pool.
#[derive(Debug, Clone)]
pub struct Bullet {
    /// Player that fired; never hit by their own bullet.
    pub shooter: PlayerId,
    pub pos: Vec2,
    pub dir: Vec2,
    pub deleted: bool,
}

impl Bullet {
    /// A fresh bullet leaving `pos` along `dir`.
    pub fn new(shooter: PlayerId, pos: Vec2, dir: Vec2) -> Self {
        Self {
            shooter,
            pos,
            dir,
            deleted: false,
        }
    }

    /// Reuse a spent bullet for a new shot.
    pub fn revive(&mut self, shooter: PlayerId, pos: Vec2, dir: Vec2) {
        self.shooter = shooter;
        self.pos = pos;
        self.dir = dir;
        self.deleted = false;
    }
}
