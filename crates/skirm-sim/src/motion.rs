//! Per-agent waypoint consumption.

use std::collections::VecDeque;

use glam::Vec2;
use skirm_core::Point;

use crate::level::tile_to_world;

/// Below this length a direction vector is treated as zero.
const EPSILON: f32 = 0.001;

/// Movement state for one agent, advanced once per simulation tick.
///
/// The agent walks toward `target`; when it arrives, the next waypoint is
/// popped off `path` and becomes the new target. Assigning a new path
/// discards the old queue outright.
#[derive(Debug, Clone)]
pub struct Motion {
    /// Current world-space position.
    pub pos: Vec2,
    /// World-space point currently walked toward.
    pub target: Vec2,
    /// Unit vector from position toward target; retained while standing.
    pub facing: Vec2,
    /// Remaining waypoints, in tile coordinates.
    pub path: VecDeque<Point>,
}

impl Motion {
    /// A stationary agent at `pos`, facing down the map.
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            target: pos,
            facing: Vec2::new(0.0, 1.0),
            path: VecDeque::new(),
        }
    }

    /// Replace any in-flight route with `path`. The first waypoint (if
    /// any) immediately becomes the current target.
    pub fn set_path(&mut self, path: Vec<Point>) {
        self.path = path.into();
        if let Some(first) = self.path.pop_front() {
            self.target = tile_to_world(first);
        }
    }

    /// Advance toward the current target by `speed * elapsed` world units.
    ///
    /// When the remaining distance is shorter than this tick's travel, the
    /// position snaps to the target and the next waypoint (at most one per
    /// tick) is popped as the new target.
    pub fn advance(&mut self, elapsed: f32, speed: f32) {
        let step = speed * elapsed;
        let todo = self.target - self.pos;
        if todo.length() < step {
            self.pos = self.target;
            if let Some(next) = self.path.pop_front() {
                self.target = tile_to_world(next);
            }
        } else if todo.length() > EPSILON {
            self.pos += todo.normalize() * step;
        }

        let ahead = self.target - self.pos;
        if ahead.length() > EPSILON {
            self.facing = ahead.normalize();
        }
    }
}
