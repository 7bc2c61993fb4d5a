//! Tile grid and world-coordinate mapping.
//!
//! A [`Level`] is an in-memory grid of [`TileKind`] cells. It owns the
//! walkability answer the pathfinder queries; everything outside its
//! bounds counts as blocked. Levels are built either from an RGBA pixel
//! buffer (the map-editor format) or from an ASCII template (used by
//! tests and prefab tooling).

use std::fmt;

use glam::Vec2;
use skirm_core::Point;
use skirm_paths::Walkable;

/// World-space size of one tile.
pub const TILE_SIZE: f32 = 8.0;

/// Convert a tile position to its world-space location.
#[inline]
pub fn tile_to_world(p: Point) -> Vec2 {
    Vec2::new(p.x as f32 * TILE_SIZE, p.y as f32 * TILE_SIZE)
}

/// Convert a world-space location to the tile containing it.
#[inline]
pub fn world_to_tile(v: Vec2) -> Point {
    Point::new((v.x / TILE_SIZE) as i32, (v.y / TILE_SIZE) as i32)
}

/// What occupies a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    /// Solid: blocks movement and fire.
    Blocked,
    /// Open ground.
    Open,
    /// Blocks movement but lets projectiles through.
    SeeThrough,
    /// Open ground where blue-team players spawn.
    BlueSpawn,
    /// Open ground where red-team players spawn.
    RedSpawn,
}

impl TileKind {
    /// Whether a player may stand here.
    #[inline]
    pub fn walkable(self) -> bool {
        matches!(self, TileKind::Open | TileKind::BlueSpawn | TileKind::RedSpawn)
    }
}

/// An in-memory tile grid.
#[derive(Debug)]
pub struct Level {
    tiles: Vec<TileKind>,
    width: i32,
    height: i32,
}

impl Level {
    /// Create a level of the given size with every tile set to `fill`.
    pub fn new(width: i32, height: i32, fill: TileKind) -> Self {
        let n = (width.max(0) as usize) * (height.max(0) as usize);
        Self {
            tiles: vec![fill; n],
            width,
            height,
        }
    }

    /// Build a level from a `width * height * 4` RGBA byte buffer.
    ///
    /// Pixel classification: zero alpha is [`TileKind::Blocked`], pure
    /// green is [`TileKind::BlueSpawn`], pure red is
    /// [`TileKind::RedSpawn`], yellow is [`TileKind::SeeThrough`], and
    /// anything else is [`TileKind::Open`].
    pub fn from_rgba(width: i32, height: i32, rgba: &[u8]) -> Result<Self, LevelError> {
        let expected = (width.max(0) as usize) * (height.max(0) as usize) * 4;
        if rgba.len() != expected {
            return Err(LevelError::BufferSize {
                expected,
                got: rgba.len(),
            });
        }
        let tiles = rgba
            .chunks_exact(4)
            .map(|px| match (px[0], px[1], px[2], px[3]) {
                (_, _, _, 0) => TileKind::Blocked,
                (0, 255, 0, _) => TileKind::BlueSpawn,
                (255, 0, 0, _) => TileKind::RedSpawn,
                (255, 255, 0, _) => TileKind::SeeThrough,
                _ => TileKind::Open,
            })
            .collect();
        Ok(Self {
            tiles,
            width,
            height,
        })
    }

    /// Parse a level from an ASCII template.
    ///
    /// Lines separated by `'\n'` must all have the same width. Recognized
    /// characters: `#` blocked, `.` open, `+` see-through, `b` blue
    /// spawn, `r` red spawn.
    pub fn parse(s: &str) -> Result<Self, LevelError> {
        let mut tiles = Vec::new();
        let mut width = -1i32;
        let mut height = 0i32;
        for line in s.trim_matches('\n').split('\n') {
            let mut w = 0i32;
            for (x, ch) in line.chars().enumerate() {
                let tile = match ch {
                    '#' => TileKind::Blocked,
                    '.' => TileKind::Open,
                    '+' => TileKind::SeeThrough,
                    'b' => TileKind::BlueSpawn,
                    'r' => TileKind::RedSpawn,
                    _ => {
                        return Err(LevelError::InvalidTile {
                            ch,
                            pos: Point::new(x as i32, height),
                        });
                    }
                };
                tiles.push(tile);
                w += 1;
            }
            if width >= 0 && w != width {
                return Err(LevelError::InconsistentWidth(s.to_string()));
            }
            width = w;
            height += 1;
        }
        Ok(Self {
            tiles,
            width: width.max(0),
            height,
        })
    }

    /// Width in tiles.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in tiles.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The tile at `p`. Out-of-bounds positions are [`TileKind::Blocked`].
    pub fn tile(&self, p: Point) -> TileKind {
        if p.x < 0 || p.x >= self.width || p.y < 0 || p.y >= self.height {
            return TileKind::Blocked;
        }
        self.tiles[(p.y * self.width + p.x) as usize]
    }

    /// Overwrite the tile at `p`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, p: Point, tile: TileKind) {
        if p.x < 0 || p.x >= self.width || p.y < 0 || p.y >= self.height {
            return;
        }
        self.tiles[(p.y * self.width + p.x) as usize] = tile;
    }

    /// Whether a player may stand at `p`.
    #[inline]
    pub fn walkable(&self, p: Point) -> bool {
        self.tile(p).walkable()
    }

    /// All positions of the given tile kind, in row-major order.
    pub fn positions_of(&self, kind: TileKind) -> Vec<Point> {
        let mut out = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let p = Point::new(x, y);
                if self.tile(p) == kind {
                    out.push(p);
                }
            }
        }
        out
    }
}

impl Walkable for Level {
    fn walkable(&self, p: Point) -> bool {
        self.tile(p).walkable()
    }
}

/// Errors that can occur when building a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// The RGBA buffer does not match `width * height * 4`.
    BufferSize { expected: usize, got: usize },
    /// Template lines have differing widths.
    InconsistentWidth(String),
    /// Template contains a character with no tile meaning.
    InvalidTile { ch: char, pos: Point },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::BufferSize { expected, got } => {
                write!(f, "rgba buffer holds {got} bytes, expected {expected}")
            }
            LevelError::InconsistentWidth(s) => {
                write!(f, "level template lines differ in width:\n{s}")
            }
            LevelError::InvalidTile { ch, pos } => {
                write!(f, "invalid tile character {ch:?} at {pos}")
            }
        }
    }
}

impl std::error::Error for LevelError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_classifies_tiles() {
        let level = Level::parse(
            "\
#....
.b.r.
..+..",
        )
        .unwrap();
        assert_eq!(level.width(), 5);
        assert_eq!(level.height(), 3);
        assert_eq!(level.tile(Point::new(0, 0)), TileKind::Blocked);
        assert_eq!(level.tile(Point::new(1, 1)), TileKind::BlueSpawn);
        assert_eq!(level.tile(Point::new(3, 1)), TileKind::RedSpawn);
        assert_eq!(level.tile(Point::new(2, 2)), TileKind::SeeThrough);
        assert_eq!(level.tile(Point::new(4, 0)), TileKind::Open);
    }

    #[test]
    fn parse_rejects_ragged_lines() {
        let err = Level::parse("..\n...").unwrap_err();
        assert!(matches!(err, LevelError::InconsistentWidth(_)));
    }

    #[test]
    fn parse_rejects_unknown_characters() {
        let err = Level::parse("..\n.x").unwrap_err();
        assert_eq!(
            err,
            LevelError::InvalidTile {
                ch: 'x',
                pos: Point::new(1, 1)
            }
        );
    }

    #[test]
    fn out_of_bounds_is_blocked() {
        let level = Level::new(4, 4, TileKind::Open);
        assert_eq!(level.tile(Point::new(-1, 0)), TileKind::Blocked);
        assert_eq!(level.tile(Point::new(0, 4)), TileKind::Blocked);
        assert_eq!(level.tile(Point::new(4, 0)), TileKind::Blocked);
        assert!(!level.walkable(Point::new(4, 0)));
    }

    #[test]
    fn spawns_are_walkable_walls_are_not() {
        assert!(TileKind::Open.walkable());
        assert!(TileKind::BlueSpawn.walkable());
        assert!(TileKind::RedSpawn.walkable());
        assert!(!TileKind::Blocked.walkable());
        assert!(!TileKind::SeeThrough.walkable());
    }

    #[test]
    fn from_rgba_classifies_pixels() {
        #[rustfmt::skip]
        let rgba: &[u8] = &[
            10, 20, 30, 0,      // transparent -> blocked
            0, 255, 0, 255,     // green -> blue spawn
            255, 0, 0, 255,     // red -> red spawn
            255, 255, 0, 255,   // yellow -> see-through
            80, 80, 80, 255,    // anything else -> open
            0, 0, 255, 255,     // blue pixel is still open ground
        ];
        let level = Level::from_rgba(3, 2, rgba).unwrap();
        assert_eq!(level.tile(Point::new(0, 0)), TileKind::Blocked);
        assert_eq!(level.tile(Point::new(1, 0)), TileKind::BlueSpawn);
        assert_eq!(level.tile(Point::new(2, 0)), TileKind::RedSpawn);
        assert_eq!(level.tile(Point::new(0, 1)), TileKind::SeeThrough);
        assert_eq!(level.tile(Point::new(1, 1)), TileKind::Open);
        assert_eq!(level.tile(Point::new(2, 1)), TileKind::Open);
    }

    #[test]
    fn from_rgba_rejects_short_buffer() {
        let err = Level::from_rgba(2, 2, &[0u8; 12]).unwrap_err();
        assert_eq!(
            err,
            LevelError::BufferSize {
                expected: 16,
                got: 12
            }
        );
    }

    #[test]
    fn positions_of_runs_row_major() {
        let level = Level::parse("b.b\n.b.").unwrap();
        assert_eq!(
            level.positions_of(TileKind::BlueSpawn),
            vec![Point::new(0, 0), Point::new(2, 0), Point::new(1, 1)]
        );
    }

    #[test]
    fn world_mapping_round_trips_tile_origins() {
        let p = Point::new(3, 7);
        assert_eq!(tile_to_world(p), Vec2::new(24.0, 56.0));
        assert_eq!(world_to_tile(tile_to_world(p)), p);
        // Anywhere inside the tile maps back to it.
        assert_eq!(world_to_tile(Vec2::new(31.9, 63.9)), p);
    }
}
