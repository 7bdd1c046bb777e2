//! Objectives
//!
//! Flower density queries and one-shot milestone announcements.

use std::collections::HashSet;
use std::fmt;

use crate::player::PlayerStats;
use crate::world::{CellType, World};

pub const PLANTED_MILESTONES: [u32; 4] = [10, 25, 50, 100];
pub const WATERED_MILESTONES: [u32; 3] = [10, 25, 50];
pub const PHOTOGRAPH_MILESTONES: [u32; 3] = [5, 10, 25];

/// Fraction of valid cells in the `(2r+1)²` square around `(x, z)` that hold flowers.
///
/// Cells outside the grid are not counted; 0 when none are valid.
pub fn flower_density(world: &World, x: i32, z: i32, radius: i32) -> f32 {
    let radius = radius.max(0);
    let mut total = 0u32;
    let mut flowers = 0u32;

    for cx in x - radius..=x + radius {
        for cz in z - radius..=z + radius {
            if world.is_valid_position(cx, cz) {
                total += 1;
                if world.get_cell_type(cx, cz) == CellType::Flower {
                    flowers += 1;
                }
            }
        }
    }

    if total == 0 {
        0.0
    } else {
        flowers as f32 / total as f32
    }
}

/// A statistic threshold that has been reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Milestone {
    Planted(u32),
    Watered(u32),
    Photographs(u32),
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Milestone::Planted(n) => write!(f, "Milestone! You've planted {n} flowers!"),
            Milestone::Watered(n) => write!(f, "Milestone! You've watered {n} flowers!"),
            Milestone::Photographs(n) => write!(f, "Milestone! You've taken {n} photographs!"),
        }
    }
}

/// Remembers which milestones were already announced.
#[derive(Clone, Debug, Default)]
pub struct MilestoneTracker {
    announced: HashSet<Milestone>,
}

impl MilestoneTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milestones reached by `stats` that have not been announced before.
    pub fn check(&mut self, stats: &PlayerStats) -> Vec<Milestone> {
        let reached = PLANTED_MILESTONES
            .iter()
            .filter(|&&n| stats.flowers_planted >= n)
            .map(|&n| Milestone::Planted(n))
            .chain(
                WATERED_MILESTONES
                    .iter()
                    .filter(|&&n| stats.flowers_watered >= n)
                    .map(|&n| Milestone::Watered(n)),
            )
            .chain(
                PHOTOGRAPH_MILESTONES
                    .iter()
                    .filter(|&&n| stats.photographs_taken >= n)
                    .map(|&n| Milestone::Photographs(n)),
            );

        reached.filter(|m| self.announced.insert(*m)).collect()
    }

    pub fn announced_count(&self) -> usize {
        self.announced.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_counts_only_valid_cells() {
        let mut world = World::new(4, 4);
        world.set_cell(0, 0, CellType::Flower);
        world.set_cell(1, 1, CellType::Flower);
        // Corner neighbourhood of radius 1 covers 4 valid cells
        assert_eq!(flower_density(&world, 0, 0, 1), 0.5);
        assert_eq!(flower_density(&world, 3, 3, 0), 0.0);
        assert_eq!(flower_density(&world, -10, -10, 1), 0.0);
    }

    #[test]
    fn test_milestones_announced_once() {
        let mut tracker = MilestoneTracker::new();
        let mut stats = PlayerStats::default();
        for _ in 0..10 {
            stats.increment_flowers_planted();
        }
        assert_eq!(tracker.check(&stats), vec![Milestone::Planted(10)]);
        assert!(tracker.check(&stats).is_empty());

        for _ in 0..5 {
            stats.increment_photographs_taken();
        }
        assert_eq!(tracker.check(&stats), vec![Milestone::Photographs(5)]);
        assert_eq!(tracker.announced_count(), 2);
    }

    #[test]
    fn test_milestone_message() {
        assert_eq!(Milestone::Watered(25).to_string(), "Milestone! You've watered 25 flowers!");
    }
}
