//! Axis-aligned body vs tile grid resolution
//!
//! Motion is resolved one axis at a time: horizontal first against the current
//! row span, then vertical against the (possibly updated) column span. Each pass
//! samples the four corners of the 8x8 box at the candidate position and only
//! commits the move when none of them is solid.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tiles::TileLookup;
use crate::cell_of;
use crate::consts::*;

/// Horizontal facing, used for dashes and sprite flipping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// What the body touched during one `move_and_collide`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contact {
    /// Resting on a solid tile after the step
    pub grounded: bool,
    /// Horizontal move was rejected
    pub hit_wall: bool,
}

/// Offsets of the four sampled corners: top-left, top-right, bottom-left, bottom-right
const CORNERS: [(f32, f32); 4] = [
    (0.0, 0.0),
    (BODY_SIZE - 1.0, 0.0),
    (0.0, BODY_SIZE - 1.0),
    (BODY_SIZE - 1.0, BODY_SIZE - 1.0),
];

/// Row of the first solid corner of an 8x8 box at `pos`, if any
pub fn probe<T: TileLookup + ?Sized>(tiles: &T, pos: Vec2) -> Option<i32> {
    CORNERS.iter().find_map(|&(ox, oy)| {
        let cell_y = cell_of(pos.y + oy);
        tiles
            .is_solid(cell_of(pos.x + ox), cell_y)
            .then_some(cell_y)
    })
}

/// Axis-aligned 8x8 body with velocity in pixels per tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing: Facing,
    pub grounded: bool,
    pub falling: bool,
}

impl KinematicBody {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            facing: Facing::Right,
            grounded: false,
            falling: false,
        }
    }

    /// True when any corner of the box currently sits in a solid tile
    #[cfg(test)]
    pub fn is_embedded<T: TileLookup + ?Sized>(&self, tiles: &T) -> bool {
        probe(tiles, self.pos).is_some()
    }

    /// Put the bottom edge on top of tile row `row`
    fn land_on(&mut self, row: i32) {
        self.pos.y = row as f32 * TILE_SIZE - BODY_SIZE;
        self.vel.y = 0.0;
        self.grounded = true;
        self.falling = false;
    }

    /// Apply `vel` for one tick, resolving against solid tiles
    pub fn move_and_collide<T: TileLookup + ?Sized>(&mut self, tiles: &T) -> Contact {
        let mut contact = Contact::default();

        // Horizontal pass
        let next_x = self.pos.x + self.vel.x;
        if probe(tiles, Vec2::new(next_x, self.pos.y)).is_none() {
            self.pos.x = next_x;
        } else {
            self.vel.x = 0.0;
            contact.hit_wall = true;
        }

        // Vertical pass
        let next_y = self.pos.y + self.vel.y;
        match probe(tiles, Vec2::new(self.pos.x, next_y)) {
            None => {
                self.pos.y = next_y;
                // Falling bodies look one pixel ahead so they settle this tick
                // instead of hovering a frame above the ground; resting bodies
                // use the same probe to stay supported.
                let check_support = self.vel.y > 0.0 || (self.vel.y == 0.0 && self.grounded);
                let support = if check_support {
                    probe(tiles, Vec2::new(self.pos.x, next_y + 1.0))
                } else {
                    None
                };
                match support {
                    Some(row) => self.land_on(row),
                    None => {
                        self.grounded = false;
                        self.falling = true;
                    }
                }
            }
            Some(row) if self.vel.y > 0.0 => self.land_on(row),
            Some(row) => {
                self.pos.y = row as f32 * TILE_SIZE + TILE_SIZE;
                self.vel.y = 0.0;
            }
        }

        self.pos.x = self.pos.x.clamp(0.0, WORLD_WIDTH - BODY_SIZE);
        contact.grounded = self.grounded;
        contact
    }
}
