//! Patrolling enemies
//!
//! Enemies ignore terrain and gravity: each one walks right from its spawn
//! point, turns around after `ENEMY_PATROL_RANGE` pixels, walks back to the
//! spawn point, and repeats.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Facing;
use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Top-left corner
    pub pos: Vec2,
    /// Signed horizontal speed in pixels per tick
    pub dx: f32,
    pub facing: Facing,
    /// Spawn x; the patrol covers `[origin_x, origin_x + range]`
    pub origin_x: f32,
    pub range: f32,
    /// Enemies are never removed; kept for the render layer
    pub alive: bool,
}

impl Enemy {
    pub fn spawn(pos: Vec2) -> Self {
        Self {
            pos,
            dx: ENEMY_SPEED,
            facing: Facing::Right,
            origin_x: pos.x,
            range: ENEMY_PATROL_RANGE,
            alive: true,
        }
    }

    /// Spawn on a marker cell
    pub fn from_cell(cell_x: i32, cell_y: i32) -> Self {
        Self::spawn(Vec2::new(cell_x as f32, cell_y as f32) * TILE_SIZE)
    }

    pub fn update(&mut self) {
        self.pos.x += self.dx;

        let far_end = self.origin_x + self.range;
        if self.pos.x >= far_end {
            self.pos.x = far_end;
            self.turn();
        } else if self.pos.x <= self.origin_x {
            self.pos.x = self.origin_x;
            self.turn();
        }
    }

    fn turn(&mut self) {
        self.dx = -self.dx;
        self.facing = self.facing.flipped();
    }
}
