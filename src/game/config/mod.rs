//! Config Module
//!
//! Centralized configuration for world layout and gameplay parameters.

pub mod game_config;

pub use game_config::{ConfigError, GameConfig};
