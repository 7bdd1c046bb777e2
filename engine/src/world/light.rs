//! Point Lights
//!
//! Lights whose contribution attenuates linearly to zero at `radius`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::math::Color;

/// A point light.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,
    pub color: Color,
    /// Non-negative brightness multiplier
    pub intensity: f32,
    /// Distance at which the contribution reaches zero
    pub radius: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            color: Color::WHITE,
            intensity: 1.0,
            radius: 10.0,
        }
    }
}

impl Light {
    /// Create a light; negative intensity is clamped to zero.
    pub fn new(position: Vec3, color: Color, intensity: f32, radius: f32) -> Self {
        Self {
            position,
            color,
            intensity: intensity.max(0.0),
            radius,
        }
    }

    /// Attenuation factor in [0, 1] at `distance` from the light.
    ///
    /// Zero at or beyond the radius, and for lights with a non-positive radius.
    pub fn attenuation(&self, distance: f32) -> f32 {
        if self.radius <= 0.0 || distance >= self.radius {
            return 0.0;
        }
        (1.0 - distance / self.radius).clamp(0.0, 1.0)
    }

    /// Color contributed by this light at `position` (unclamped RGB).
    pub fn contribution_at(&self, position: Vec3) -> Color {
        let attenuation = self.attenuation(self.position.distance(position));
        self.color * (self.intensity * attenuation)
    }
}

/// Sum the contributions of `lights` at `position`, clamping each channel to 1.0.
pub fn accumulate_lighting<'a>(lights: impl IntoIterator<Item = &'a Light>, position: Vec3) -> Color {
    lights
        .into_iter()
        .filter(|light| light.attenuation(light.position.distance(position)) > 0.0)
        .fold(Color::BLACK, |acc, light| acc + light.contribution_at(position))
        .clamped()
}
