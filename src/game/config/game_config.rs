//! Game Configuration
//!
//! Centralized configuration for the garden session. `Default` returns the
//! values the game has always shipped with; a JSON file may override any
//! subset of them.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::world::{DEFAULT_WORLD_SEED, HillParams};

/// Errors from reading or writing a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A value parsed but is outside its usable range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Central configuration for a garden session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid width in cells
    pub world_width: usize,
    /// Grid height (depth) in cells
    pub world_height: usize,
    /// Player eye position at the start of the session
    pub player_start: Vec3,
    /// Degrees of rotation per unit of mouse motion
    pub mouse_sensitivity: f32,
    /// Distance ahead of the player at which tools act
    pub tool_reach: f32,
    /// Pickups closer than this are collected
    pub pickup_radius: f32,
    /// Longest frame step the simulation accepts (seconds)
    pub max_delta_time: f32,
    /// Rolling hills; flat terrain when `None`
    pub hills: Option<HillParams>,
    /// Random flowers planted at startup
    pub flower_count: usize,
    /// Seed for random decoration
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: 50,
            world_height: 50,
            player_start: Vec3::new(25.0, 1.7, 25.0),
            mouse_sensitivity: 0.1,
            tool_reach: 3.0,
            pickup_radius: 2.0,
            max_delta_time: 0.1,
            hills: None,
            flower_count: 0,
            seed: DEFAULT_WORLD_SEED,
        }
    }
}

impl GameConfig {
    /// Read a config from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write this config to `path` as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Reject values the session cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world_width == 0 || self.world_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "world must be at least 1x1, got {}x{}",
                self.world_width, self.world_height
            )));
        }
        if !(self.max_delta_time > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_delta_time must be positive, got {}",
                self.max_delta_time
            )));
        }
        if self.tool_reach < 0.0 || self.pickup_radius < 0.0 {
            return Err(ConfigError::Invalid("reach and pickup radius must be non-negative".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.world_width, 50);
        assert_eq!(config.player_start, Vec3::new(25.0, 1.7, 25.0));
        assert_eq!(config.hills, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "world_width": 12, "hills": { "amplitude": 3.0, "frequency": 0.2 } }"#)
                .expect("parse");
        assert_eq!(config.world_width, 12);
        assert_eq!(config.world_height, 50);
        assert_eq!(config.hills, Some(HillParams { amplitude: 3.0, frequency: 0.2 }));
    }

    #[test]
    fn test_validate_rejects_empty_world() {
        let config = GameConfig {
            world_height: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("flower_config_{}.json", std::process::id()));
        let config = GameConfig {
            flower_count: 7,
            ..Default::default()
        };
        config.save(&path).expect("save");
        let loaded = GameConfig::load(&path).expect("load");
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }
}
