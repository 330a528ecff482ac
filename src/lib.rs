//! Tile Runner - A small side-scrolling tile platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile collision, player, enemies, game state)
//! - `level`: Level data (text tile format, built-in course, JSON files)
//! - `view`: Render boundary (screen-space sprites and overlay text per frame)
//! - `settings`: Runtime configuration and gameplay variants

pub mod level;
pub mod settings;
pub mod sim;
pub mod view;

pub use level::Level;
pub use settings::{Settings, Variant};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (30 Hz, one tick per displayed frame)
    pub const SIM_DT: f32 = 1.0 / 30.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Tile edge length in pixels
    pub const TILE_SIZE: f32 = 8.0;
    /// Map dimensions in tiles
    pub const MAP_COLS: usize = 45;
    pub const MAP_ROWS: usize = 16;
    /// World dimensions in pixels
    pub const WORLD_WIDTH: f32 = MAP_COLS as f32 * TILE_SIZE;
    pub const WORLD_HEIGHT: f32 = MAP_ROWS as f32 * TILE_SIZE;

    /// Visible window
    pub const VIEWPORT_WIDTH: f32 = 160.0;
    pub const VIEWPORT_HEIGHT: f32 = 128.0;

    /// Player and enemy bounding box edge
    pub const BODY_SIZE: f32 = 8.0;

    /// Reaching this x clears the level (column 39)
    pub const GOAL_X: f32 = 312.0;

    /// Enemy patrol: 3 tiles to the right of the spawn cell and back
    pub const ENEMY_PATROL_RANGE: f32 = 24.0;
    pub const ENEMY_SPEED: f32 = 1.0;
    /// Enemies this far outside the viewport still update
    pub const ENEMY_UPDATE_MARGIN: f32 = 64.0;
    /// Enemies this far outside the viewport still draw
    pub const ENEMY_DRAW_MARGIN: f32 = 8.0;

    /// Snowfall (holiday variant)
    pub const SNOW_SPAWN_INTERVAL: u32 = 7;
    pub const SNOW_FALL_SPEED: f32 = 0.5;
}

/// Tile cell index containing a pixel coordinate.
///
/// Truncates toward zero, so anything in (-8, 8) maps to cell 0.
#[inline]
pub fn cell_of(px: f32) -> i32 {
    (px / consts::TILE_SIZE) as i32
}

/// Camera offset that centers `player_x`, clamped to the world edges
#[inline]
pub fn camera_for(player_x: f32) -> f32 {
    use consts::*;
    (player_x - VIEWPORT_WIDTH / 2.0).clamp(0.0, WORLD_WIDTH - VIEWPORT_WIDTH)
}
