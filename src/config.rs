//! Session configuration
//!
//! Arena geometry and level selection for a run. Loaded from a JSON file
//! when one is present; defaults otherwise.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Configuration for one game session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Arena width in pixels
    pub screen_width: f32,
    /// Arena height in pixels
    pub screen_height: f32,
    /// Level selection; plumbed to the spawner for future schedules
    pub level: u32,
    /// Player glide distance per tick
    pub player_speed: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: ARENA_WIDTH,
            screen_height: ARENA_HEIGHT,
            level: 1,
            player_speed: PLAYER_SPEED,
        }
    }
}

impl Config {
    /// Load from a JSON file, falling back to defaults on any failure
    pub fn load(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {path}");
                    config
                }
                Err(err) => {
                    log::warn!("Malformed config {path}: {err}; using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
