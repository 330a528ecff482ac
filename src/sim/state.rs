//! Game state and session lifecycle
//!
//! Everything a run owns lives here and is rebuilt wholesale on restart.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::player::{Player, PlayerTuning};
use super::snow::Snowfall;
use super::tiles::TileGrid;
use crate::level::Level;

/// Where the player appears at the start of every run
pub const PLAYER_SPAWN: Vec2 = Vec2::ZERO;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Player touched an enemy, or fell below the world. Enemy contact is the
    /// game's loss rule; the fall-out loss is added on top so a pit cannot
    /// leave the run stuck.
    GameOver,
    /// Player reached the goal
    GameClear,
}

impl GamePhase {
    /// Terminal phases only accept a restart
    pub fn is_terminal(self) -> bool {
        self != GamePhase::Playing
    }
}

/// Gameplay rules that differ between variants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    pub player: PlayerTuning,
    /// Decorative snow particles
    pub snowfall: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            player: PlayerTuning::classic(),
            snowfall: false,
        }
    }
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Level as authored; restart copies from here
    pub level: Level,
    /// Working copy of the grid with spawn markers cleared
    pub tiles: TileGrid,
    pub rules: Rules,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub snow: Snowfall,
    /// Horizontal scroll of the viewport
    pub camera_x: f32,
    pub phase: GamePhase,
    /// Played ticks since the run started
    pub time_ticks: u64,
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl GameState {
    /// Start a run on `level`
    pub fn new(level: Level, rules: Rules, seed: u64) -> Self {
        let mut tiles = level.grid.clone();
        let enemies: Vec<Enemy> = tiles
            .take_spawn_markers()
            .into_iter()
            .map(|(x, y)| {
                log::debug!("Enemy spawned at cell ({x}, {y})");
                Enemy::from_cell(x, y)
            })
            .collect();

        log::info!(
            "Run started on level '{}' with {} enemies (seed {})",
            level.name,
            enemies.len(),
            seed
        );

        Self {
            level,
            tiles,
            rules,
            player: Player::new(PLAYER_SPAWN),
            enemies,
            snow: Snowfall::new(),
            camera_x: 0.0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Throw the run away and start over from the pristine level
    pub fn restart(&mut self) {
        log::info!("Restarting after {:?} at tick {}", self.phase, self.time_ticks);
        let level = std::mem::take(&mut self.level);
        *self = Self::new(level, self.rules, self.seed);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_game_clear(&self) -> bool {
        self.phase == GamePhase::GameClear
    }
}
