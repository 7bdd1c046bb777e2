//! Pickups
//!
//! Collectible seed packets and water buckets scattered around the garden.

use glam::Vec3;

use crate::math::Color;

/// Vertical bob amplitude in world units
pub const BOB_AMPLITUDE: f32 = 0.1;

/// Bob period divisor (milliseconds per radian)
const BOB_PERIOD_MS: f32 = 300.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PickupKind {
    SunflowerSeeds,
    RoseSeeds,
    TulipSeeds,
    DaisySeeds,
    LavenderSeeds,
    WaterBucket,
}

impl PickupKind {
    pub const fn color(self) -> Color {
        match self {
            PickupKind::SunflowerSeeds => Color::rgb(1.0, 0.8, 0.0),
            PickupKind::RoseSeeds => Color::rgb(1.0, 0.2, 0.3),
            PickupKind::TulipSeeds => Color::rgb(1.0, 0.4, 0.6),
            PickupKind::DaisySeeds => Color::rgb(0.9, 0.9, 1.0),
            PickupKind::LavenderSeeds => Color::rgb(0.6, 0.3, 0.9),
            PickupKind::WaterBucket => Color::rgb(0.4, 0.6, 0.9),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PickupKind::SunflowerSeeds => "Sunflower Seeds",
            PickupKind::RoseSeeds => "Rose Seeds",
            PickupKind::TulipSeeds => "Tulip Seeds",
            PickupKind::DaisySeeds => "Daisy Seeds",
            PickupKind::LavenderSeeds => "Lavender Seeds",
            PickupKind::WaterBucket => "Water Bucket",
        }
    }

    pub const fn is_seed(self) -> bool {
        !matches!(self, PickupKind::WaterBucket)
    }
}

/// A collectible item resting in the world.
#[derive(Clone, Debug, PartialEq)]
pub struct Pickup {
    pub position: Vec3,
    pub kind: PickupKind,
}

impl Pickup {
    pub fn new(position: Vec3, kind: PickupKind) -> Self {
        Self { position, kind }
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Render position at `time` seconds, bobbing around the resting position.
    pub fn render_position(&self, time: f32) -> Vec3 {
        self.position + Vec3::Y * bob_offset(time)
    }
}

/// Vertical bob offset at `time` seconds.
#[inline]
pub fn bob_offset(time: f32) -> f32 {
    (time * 1000.0 / BOB_PERIOD_MS).sin() * BOB_AMPLITUDE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bob_offset_bounded() {
        assert_eq!(bob_offset(0.0), 0.0);
        for i in 0..100 {
            assert!(bob_offset(i as f32 * 0.037).abs() <= BOB_AMPLITUDE + 1e-6);
        }
    }

    #[test]
    fn test_names_and_seeds() {
        let pickup = Pickup::new(Vec3::ZERO, PickupKind::LavenderSeeds);
        assert_eq!(pickup.name(), "Lavender Seeds");
        assert!(pickup.kind.is_seed());
        assert!(!PickupKind::WaterBucket.is_seed());
    }
}
