//! Flower Limbs
//!
//! Animated flower parts (petals, stems, leaves) that sway in a constant
//! breeze and jolt when their flower is watered.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::math::Color;

/// Largest rotation a limb may sway to, in degrees per axis
pub const MAX_ROTATION: f32 = 45.0;

/// Length of one animation cycle in seconds
pub const ANIMATION_CYCLE: f32 = 2.0;

/// Petals per spawned flower
pub const PETAL_COUNT: usize = 8;

/// Distance of petals from the flower center
pub const PETAL_RADIUS: f32 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LimbKind {
    Petal,
    Stem,
    Leaf,
}

impl LimbKind {
    pub const fn color(self) -> Color {
        match self {
            LimbKind::Petal => Color::rgb(1.0, 0.5, 0.7),
            LimbKind::Stem => Color::rgb(0.2, 0.6, 0.2),
            LimbKind::Leaf => Color::rgb(0.3, 0.7, 0.3),
        }
    }

    pub const fn size(self) -> f32 {
        match self {
            LimbKind::Petal => 0.15,
            LimbKind::Stem => 0.05,
            LimbKind::Leaf => 0.1,
        }
    }
}

/// One animated flower part attached to a parent point.
#[derive(Clone, Debug, PartialEq)]
pub struct Limb {
    position: Vec3,
    parent_position: Vec3,
    /// Euler rotation in degrees
    rotation: Vec3,
    kind: LimbKind,
    animation_time: f32,
}

impl Limb {
    pub fn new(position: Vec3, kind: LimbKind, parent_position: Vec3) -> Self {
        Self {
            position,
            parent_position,
            rotation: Vec3::ZERO,
            kind,
            animation_time: 0.0,
        }
    }

    /// Advance the wind sway by `delta_time`.
    pub fn update(&mut self, delta_time: f32) {
        self.animation_time += delta_time;
        let t = self.animation_time;

        let sway = (t * 2.0).sin() * 0.1
            + (t * 5.0).sin() * 0.02
            + (self.position.x * 0.5 + self.position.z * 0.3).sin() * 0.05;

        match self.kind {
            LimbKind::Petal => {
                self.rotation.y = sway * 10.0;
                self.rotation.x = (t * 1.5).cos() * 3.0;
            }
            LimbKind::Stem => {
                // Sways harder towards the top
                let height_factor = 1.0 + (self.position.y - self.parent_position.y) * 2.0;
                self.rotation.x = sway * 5.0 * height_factor;
                self.rotation.z = (t * 1.8).cos() * 3.0 * height_factor;
            }
            LimbKind::Leaf => {
                self.rotation.z = sway * 15.0;
                self.rotation.y = (t * 3.0).cos() * 8.0;
                self.rotation.x = (t * 4.0).sin() * 5.0;
            }
        }

        self.rotation = self.rotation.clamp(Vec3::splat(-MAX_ROTATION), Vec3::splat(MAX_ROTATION));
    }

    /// Excite the limb: jump the animation ahead and kick its rotation.
    pub fn animate(&mut self, amount: f32) {
        self.animation_time += amount * 5.0;
        match self.kind {
            LimbKind::Petal => self.rotation.y += amount * 20.0,
            LimbKind::Stem => self.rotation.x += amount * 15.0,
            LimbKind::Leaf => self.rotation.z += amount * 25.0,
        }
    }

    /// Base color pulsing by ±10%.
    pub fn animated_color(&self) -> Color {
        self.kind.color() * (1.0 + (self.animation_time * 3.0).sin() * 0.1)
    }

    /// Position within the current cycle, in [0, 1).
    pub fn animation_progress(&self) -> f32 {
        self.animation_time.rem_euclid(ANIMATION_CYCLE) / ANIMATION_CYCLE
    }

    pub fn reset_animation(&mut self) {
        self.animation_time = 0.0;
        self.rotation = Vec3::ZERO;
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn parent_position(&self) -> Vec3 {
        self.parent_position
    }

    #[inline]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    #[inline]
    pub fn kind(&self) -> LimbKind {
        self.kind
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.kind.size()
    }
}

/// Build the parts of a freshly planted flower centered at `flower`:
/// one stem, a ring of petals and a pair of leaves.
pub fn spawn_flower_limbs(flower: Vec3) -> Vec<Limb> {
    let mut limbs = Vec::with_capacity(PETAL_COUNT + 3);

    limbs.push(Limb::new(
        flower - Vec3::Y * 0.3,
        LimbKind::Stem,
        flower - Vec3::Y * 0.5,
    ));

    limbs.extend((0..PETAL_COUNT).map(|i| {
        let angle = i as f32 / PETAL_COUNT as f32 * TAU;
        let offset = Vec3::new(angle.cos(), 0.0, angle.sin()) * PETAL_RADIUS;
        Limb::new(flower + offset, LimbKind::Petal, flower)
    }));

    for side in [-0.15, 0.15] {
        limbs.push(Limb::new(flower + Vec3::new(side, -0.2, 0.0), LimbKind::Leaf, flower));
    }

    limbs
}
