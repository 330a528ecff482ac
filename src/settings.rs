//! Game settings and gameplay variants
//!
//! Loaded from an optional, read-only JSON file; anything missing falls back to
//! defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::sim::{PlayerTuning, Rules};

/// Gameplay variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Triple jump, inertial running, dash
    #[default]
    Classic,
    /// Single jump, constant walking speed, falling snow
    Holiday,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Holiday => "holiday",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "b" => Some(Variant::Classic),
            "holiday" | "snow" | "a" => Some(Variant::Holiday),
            _ => None,
        }
    }

    /// Simulation rules for this variant
    pub fn rules(&self) -> Rules {
        match self {
            Variant::Classic => Rules {
                player: PlayerTuning::classic(),
                snowfall: false,
            },
            Variant::Holiday => Rules {
                player: PlayerTuning::holiday(),
                snowfall: true,
            },
        }
    }
}

/// Runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub variant: Variant,
    /// Seed for the run's RNG (snowfall)
    pub seed: u64,
    /// JSON level file; the built-in course when unset
    pub level_path: Option<PathBuf>,
    /// Ticks the headless runner simulates
    pub demo_ticks: u32,
    /// Let the autopilot drive the player
    pub idle_mode: bool,
    /// Print an ASCII snapshot of the final frame
    pub print_frame: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::Classic,
            seed: 0xC0FFEE,
            level_path: None,
            demo_ticks: 900,
            idle_mode: true,
            print_frame: true,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::warn!("Settings file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("parsing settings file {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
