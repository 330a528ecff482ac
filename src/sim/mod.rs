//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order for enemies)
//! - No rendering or platform dependencies

pub mod body;
pub mod enemy;
pub mod player;
pub mod snow;
pub mod state;
pub mod tick;
pub mod tiles;

pub use body::{Contact, Facing, KinematicBody, probe};
pub use enemy::Enemy;
pub use player::{Controls, DashState, DashTuning, MoveModel, Player, PlayerTuning};
pub use snow::{Snowfall, Snowflake};
pub use state::{GamePhase, GameState, PLAYER_SPAWN, Rules};
pub use tick::{TickInput, tick};
pub use tiles::{Tile, TileGrid, TileLookup};
