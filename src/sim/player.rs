//! Player controller
//!
//! Input-driven kinematic body with multi-jump, variable jump height and an
//! optional dash. Both gameplay variants run through the same update; the
//! differences live entirely in `PlayerTuning`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Contact, Facing, KinematicBody};
use super::enemy::Enemy;
use super::tiles::TileLookup;
use crate::consts::*;

/// How held direction keys turn into horizontal velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MoveModel {
    /// Constant speed while a key is held, zero otherwise
    Direct { speed: f32 },
    /// Accelerate toward `max_speed`, decay by `friction` when released
    Inertial {
        acceleration: f32,
        max_speed: f32,
        friction: f32,
    },
}

impl MoveModel {
    /// Top running speed, used to size the dash burst
    pub fn max_speed(&self) -> f32 {
        match *self {
            MoveModel::Direct { speed } => speed,
            MoveModel::Inertial { max_speed, .. } => max_speed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashTuning {
    /// Ticks the dash lasts
    pub duration: u32,
    /// Ticks before another dash is allowed
    pub cooldown: u32,
    /// Dash speed as a multiple of the running max speed
    pub speed_multiplier: f32,
}

/// Movement parameters (pixels and ticks)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerTuning {
    /// Jump impulses allowed between ground contacts (the ground jump included)
    pub max_jumps: u32,
    /// Vertical velocity applied by a jump (negative is up)
    pub jump_strength: f32,
    /// Releasing jump while rising faster than this clamps dy to it
    pub jump_cut_off: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub movement: MoveModel,
    pub dash: Option<DashTuning>,
}

impl PlayerTuning {
    /// Triple jump, inertial running and dash
    pub fn classic() -> Self {
        Self {
            max_jumps: 3,
            jump_strength: -4.5,
            jump_cut_off: -2.0,
            gravity: 0.35,
            max_fall_speed: 6.0,
            movement: MoveModel::Inertial {
                acceleration: 0.5,
                max_speed: 3.0,
                friction: 0.85,
            },
            dash: Some(DashTuning {
                duration: 10,
                cooldown: 30,
                speed_multiplier: 2.0,
            }),
        }
    }

    /// Single jump, constant walking speed, no dash
    pub fn holiday() -> Self {
        Self {
            max_jumps: 1,
            movement: MoveModel::Direct { speed: 1.5 },
            dash: None,
            ..Self::classic()
        }
    }
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self::classic()
    }
}

/// Held keys and this-frame presses the player reacts to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump_held: bool,
    pub jump_pressed: bool,
    pub dash_pressed: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashState {
    pub active: bool,
    /// Ticks of dash remaining
    pub duration: u32,
    /// Ticks until the next dash is allowed
    pub cooldown: u32,
}

/// The player entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: KinematicBody,
    /// Jump impulses used since the last ground contact
    pub jump_count: u32,
    pub dash: DashState,
    pub alive: bool,
    /// What the last `update` ran into
    #[serde(skip)]
    pub last_contact: Contact,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: KinematicBody::new(pos),
            jump_count: 0,
            dash: DashState::default(),
            alive: true,
            last_contact: Contact::default(),
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    #[inline]
    pub fn facing(&self) -> Facing {
        self.body.facing
    }

    /// Advance one tick
    pub fn update<T: TileLookup + ?Sized>(
        &mut self,
        controls: &Controls,
        tuning: &PlayerTuning,
        tiles: &T,
    ) -> Contact {
        self.tick_dash_timers();
        self.apply_run_input(controls, tuning);

        if controls.dash_pressed {
            self.try_dash(tuning);
        }
        if controls.jump_pressed {
            self.try_jump(tuning);
        }

        // Early release shortens the arc
        if !controls.jump_held && self.body.vel.y < tuning.jump_cut_off {
            self.body.vel.y = tuning.jump_cut_off;
        }

        if !self.body.grounded {
            self.body.vel.y = (self.body.vel.y + tuning.gravity).min(tuning.max_fall_speed);
        }

        let contact = self.body.move_and_collide(tiles);
        if contact.grounded {
            self.jump_count = 0;
        }
        self.last_contact = contact;
        contact
    }

    fn tick_dash_timers(&mut self) {
        self.dash.cooldown = self.dash.cooldown.saturating_sub(1);
        self.dash.duration = self.dash.duration.saturating_sub(1);
        if self.dash.duration == 0 {
            self.dash.active = false;
        }
    }

    fn apply_run_input(&mut self, controls: &Controls, tuning: &PlayerTuning) {
        let direction = if controls.left {
            Some(Facing::Left)
        } else if controls.right {
            Some(Facing::Right)
        } else {
            None
        };
        if let Some(facing) = direction {
            self.body.facing = facing;
        }

        let vel = &mut self.body.vel;
        match tuning.movement {
            MoveModel::Direct { speed } => {
                vel.x = direction.map_or(0.0, |f| f.sign() * speed);
            }
            MoveModel::Inertial {
                acceleration,
                max_speed,
                friction,
            } => {
                match direction {
                    Some(f) => vel.x += f.sign() * acceleration,
                    None => vel.x *= friction,
                }
                let limit = match (self.dash.active, tuning.dash) {
                    (true, Some(dash)) => max_speed * dash.speed_multiplier,
                    _ => max_speed,
                };
                vel.x = vel.x.clamp(-limit, limit);
            }
        }
    }

    /// Apply a jump impulse if a charge is left. Returns whether it fired.
    pub fn try_jump(&mut self, tuning: &PlayerTuning) -> bool {
        if self.body.grounded {
            self.body.vel.y = tuning.jump_strength;
            self.body.grounded = false;
            self.body.falling = true;
            self.jump_count = 1;
            true
        } else if self.jump_count < tuning.max_jumps {
            self.body.vel.y = tuning.jump_strength;
            self.jump_count += 1;
            true
        } else {
            false
        }
    }

    /// Start a dash in the facing direction if off cooldown. Returns whether it fired.
    pub fn try_dash(&mut self, tuning: &PlayerTuning) -> bool {
        let Some(dash) = tuning.dash else {
            return false;
        };
        if self.dash.cooldown > 0 {
            return false;
        }
        self.dash = DashState {
            active: true,
            duration: dash.duration,
            cooldown: dash.cooldown,
        };
        self.body.vel.x =
            self.body.facing.sign() * tuning.movement.max_speed() * dash.speed_multiplier;
        true
    }

    /// Box overlap against an enemy (origins closer than one body on both axes)
    pub fn overlaps(&self, enemy: &Enemy) -> bool {
        let d = self.body.pos - enemy.pos;
        d.x.abs() < BODY_SIZE && d.y.abs() < BODY_SIZE
    }

    /// Kill the player on contact. Returns whether the enemy hit.
    pub fn check_enemy_hit(&mut self, enemy: &Enemy) -> bool {
        if self.overlaps(enemy) {
            self.alive = false;
            true
        } else {
            false
        }
    }
}
