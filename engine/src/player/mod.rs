//! Player Module
//!
//! First-person player orientation, movement and statistics.
//!
//! # Components
//!
//! - [`Player`] - Yaw/pitch camera basis with flat and slope-relative movement
//! - [`PlayerStats`] - Flowers planted/watered and photographs taken

pub mod first_person;
pub mod stats;

pub use first_person::{
    Player,
    EYE_HEIGHT, MIN_HEIGHT, MAX_HEIGHT, PITCH_LIMIT,
    DEFAULT_MOVEMENT_SPEED, MIN_MOVEMENT_SPEED, MAX_MOVEMENT_SPEED,
};
pub use stats::PlayerStats;
