//! Player Statistics
//!
//! Counters shown on the HUD and checked for milestones.

use serde::{Deserialize, Serialize};

/// Accumulated gardening statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub flowers_planted: u32,
    pub flowers_watered: u32,
    pub photographs_taken: u32,
}

impl PlayerStats {
    pub fn increment_flowers_planted(&mut self) {
        self.flowers_planted = self.flowers_planted.saturating_add(1);
    }

    pub fn increment_flowers_watered(&mut self) {
        self.flowers_watered = self.flowers_watered.saturating_add(1);
    }

    pub fn increment_photographs_taken(&mut self) {
        self.photographs_taken = self.photographs_taken.saturating_add(1);
    }
}
