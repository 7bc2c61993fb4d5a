//! Players and the squad context object.
//!
//! A [`Squad`] owns the level, the player roster, the bullet pool, the
//! selection cursor and a reusable pathfinder. All orders arrive as world
//! coordinates ([`Squad::click_at`]) or as direct calls; how they were
//! produced (mouse, script, replay) is not this crate's concern.

use glam::Vec2;
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::RngExt;

use skirm_core::Point;
use skirm_paths::Pathfinder;

use crate::level::{Level, TILE_SIZE, TileKind, tile_to_world, world_to_tile};
use crate::motion::Motion;
use crate::projectile::{BULLET_DAMAGE, BULLET_SPEED, Bullet};

/// Index into the squad's player roster.
pub type PlayerId = usize;

/// World units a player covers per second.
pub const MOVE_SPEED: f32 = 50.0;

/// Radius used for click selection and bullet hits.
pub const PLAYER_RADIUS: f32 = TILE_SIZE;

/// Which side a player fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    Unaligned,
    Blue,
    Red,
}

/// Names handed out to new players, in no particular order.
const PLAYER_NAMES: [&str; 32] = [
    "Albert", "Allen", "Bert", "Bob", "Cecil", "Clarence", "Elliot", "Elmer", "Ernie", "Eugene",
    "Fergus", "Ferris", "Frank", "Frasier", "Fred", "George", "Graham", "Harvey", "Irwin", "Larry",
    "Lester", "Marvin", "Neil", "Niles", "Oliver", "Opie", "Ryan", "Toby", "Ulric", "Ulysses",
    "Uri", "Waldo",
];

/// One soldier in the skirmish.
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub team: Team,
    /// 1.0 at spawn; at or below zero the player is down.
    pub health: f32,
    pub motion: Motion,
}

impl Player {
    /// Whether the player is still in the fight.
    #[inline]
    pub fn alive(&self) -> bool {
        self.health > 0.0
    }
}

/// The squad simulation state.
///
/// Everything a tick needs is owned here and passed around explicitly;
/// there is no process-wide state.
pub struct Squad {
    pub level: Level,
    pub players: Vec<Player>,
    pub bullets: Vec<Bullet>,
    pub selected: Option<PlayerId>,
    finder: Pathfinder,
    rng: SmallRng,
}

impl Squad {
    /// Create an empty squad on the given level.
    pub fn new(level: Level) -> Self {
        Self {
            level,
            players: Vec::new(),
            bullets: Vec::new(),
            selected: None,
            finder: Pathfinder::new(),
            rng: rand::make_rng(),
        }
    }

    /// Add a player standing on the given tile, with a randomly drawn
    /// name.
    pub fn add_player(&mut self, tile: Point, team: Team) -> PlayerId {
        let name = PLAYER_NAMES[self.rng.random_range(0..PLAYER_NAMES.len())];
        let id = self.players.len();
        self.players.push(Player {
            name: name.to_string(),
            team,
            health: 1.0,
            motion: Motion::at(tile_to_world(tile)),
        });
        debug!("{name} joins at {tile}");
        id
    }

    /// Spawn one player on every spawn tile of the level.
    pub fn populate(&mut self) {
        for p in self.level.positions_of(TileKind::BlueSpawn) {
            self.add_player(p, Team::Blue);
        }
        for p in self.level.positions_of(TileKind::RedSpawn) {
            self.add_player(p, Team::Red);
        }
    }

    /// Remove every player and clear the selection.
    pub fn reset_players(&mut self) {
        self.players.clear();
        self.selected = None;
    }

    /// Make `id` the selected player.
    pub fn select(&mut self, id: PlayerId) {
        self.selected = Some(id);
    }

    /// Handle a click at a world-space position.
    ///
    /// Players within [`PLAYER_RADIUS`] of the click form a selection
    /// circle: the click selects the member after the currently selected
    /// one, wrapping, so repeated clicks cycle through stacked players.
    /// A click on open ground instead orders the selected player to walk
    /// there; an unreachable destination leaves the player put.
    pub fn click_at(&mut self, at: Vec2) {
        let circle: Vec<PlayerId> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.motion.pos.distance(at) < PLAYER_RADIUS)
            .map(|(id, _)| id)
            .collect();

        if !circle.is_empty() {
            let next = match self
                .selected
                .and_then(|cur| circle.iter().position(|&id| id == cur))
            {
                Some(i) => circle[(i + 1) % circle.len()],
                None => circle[0],
            };
            self.selected = Some(next);
            debug!("selected {}", self.players[next].name);
        } else if let Some(id) = self.selected {
            let goal = world_to_tile(at);
            if self.level.tile(goal) == TileKind::Open {
                let from = world_to_tile(self.players[id].motion.pos);
                let path = self.finder.find_path(from, goal, &self.level);
                debug!(
                    "{} ordered to {goal}: {} waypoints",
                    self.players[id].name,
                    path.len()
                );
                self.players[id].motion.set_path(path);
            }
        }
    }

    /// Fire a bullet from the selected player along their facing,
    /// recycling a spent bullet when one is available.
    pub fn shoot(&mut self) {
        let Some(id) = self.selected else {
            return;
        };
        let pos = self.players[id].motion.pos;
        let dir = self.players[id].motion.facing;
        if let Some(bullet) = self.bullets.iter_mut().find(|b| b.deleted) {
            bullet.revive(id, pos, dir);
        } else {
            self.bullets.push(Bullet::new(id, pos, dir));
        }
    }

    /// Run one simulation tick: walk living players along their paths,
    /// then fly bullets, stopping them on solid walls (see-through tiles
    /// let them pass) or on the first living player they hit.
    pub fn update(&mut self, elapsed: f32) {
        for player in &mut self.players {
            if !player.alive() {
                continue;
            }
            player.motion.advance(elapsed, MOVE_SPEED);
        }

        for i in 0..self.bullets.len() {
            if self.bullets[i].deleted {
                continue;
            }
            let pos = self.bullets[i].pos + self.bullets[i].dir * BULLET_SPEED * elapsed;
            self.bullets[i].pos = pos;
            if self.level.tile(world_to_tile(pos)) == TileKind::Blocked {
                self.bullets[i].deleted = true;
                continue;
            }
            let shooter = self.bullets[i].shooter;
            for (id, player) in self.players.iter_mut().enumerate() {
                if id == shooter || !player.alive() {
                    continue;
                }
                if player.motion.pos.distance(pos) < PLAYER_RADIUS {
                    player.health -= BULLET_DAMAGE;
                    self.bullets[i].deleted = true;
                    if !player.alive() {
                        info!("{} is down", player.name);
                    }
                    break;
                }
            }
        }
    }
}
