//! Decorative snowfall
//!
//! Flakes spawn near the top of the world, drift straight down and settle on
//! the first solid tile they touch. They never interact with the player.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::tiles::TileLookup;
use crate::cell_of;
use crate::consts::*;

/// Atlas cells holding the four flake shapes
pub const FLAKE_PATTERNS: [(u16, u16); 4] = [(24, 24), (24, 32), (32, 24), (32, 32)];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snowflake {
    pub pos: Vec2,
    /// Atlas cell for this flake's shape
    pub pattern: (u16, u16),
    pub active: bool,
}

impl Snowflake {
    /// New flake somewhere across the whole map width, 16-32 px down
    pub fn spawn<R: Rng>(rng: &mut R) -> Self {
        let x = rng.random_range(0..=WORLD_WIDTH as i32) as f32;
        let y = rng.random_range(16..=32) as f32;
        let pattern = FLAKE_PATTERNS[rng.random_range(0..FLAKE_PATTERNS.len())];
        Self {
            pos: Vec2::new(x, y),
            pattern,
            active: true,
        }
    }

    pub fn update<T: TileLookup + ?Sized>(&mut self, tiles: &T) {
        if !self.active {
            return;
        }
        self.pos.y += SNOW_FALL_SPEED;
        if tiles.is_solid(cell_of(self.pos.x), cell_of(self.pos.y + 1.0)) {
            self.active = false;
        }
    }

    /// Still worth keeping around
    pub fn is_live(&self) -> bool {
        self.active && self.pos.y <= WORLD_HEIGHT
    }
}

/// Spawn timer plus the live flakes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snowfall {
    pub flakes: Vec<Snowflake>,
    timer: u32,
}

impl Snowfall {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one tick: maybe spawn, move every flake, drop settled ones
    pub fn update<R: Rng, T: TileLookup + ?Sized>(&mut self, rng: &mut R, tiles: &T) {
        self.timer += 1;
        if self.timer >= SNOW_SPAWN_INTERVAL {
            self.flakes.push(Snowflake::spawn(rng));
            self.timer = 0;
        }

        for flake in &mut self.flakes {
            flake.update(tiles);
        }
        self.flakes.retain(Snowflake::is_live);
    }

    pub fn len(&self) -> usize {
        self.flakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flakes.is_empty()
    }
}
