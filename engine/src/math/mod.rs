//! Math Module
//!
//! Value types shared by the world, player and render export:
//! [`Color`], [`GridPos`], and a few scalar/vector helpers.
//!
//! Vectors are `glam::Vec3` throughout. Any normalisation of a zero-length
//! vector yields the zero vector (use `normalize_or_zero`), and [`safe_div`]
//! returns zero instead of propagating infinities, so continuous simulation
//! never picks up NaNs.

use std::ops::{Add, Mul};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// World up axis (+Y)
pub const WORLD_UP: Vec3 = Vec3::Y;

/// World down axis (-Y)
pub const WORLD_DOWN: Vec3 = Vec3::NEG_Y;

/// Divide a vector by a scalar, yielding the zero vector when `scalar` is zero.
#[inline]
pub fn safe_div(v: Vec3, scalar: f32) -> Vec3 {
    if scalar != 0.0 { v / scalar } else { Vec3::ZERO }
}

/// Linear interpolation with `t` clamped to [0, 1].
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Smooth step function for natural transitions
pub fn smooth_step(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 == edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Wrap an angle in degrees into [0, 360).
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

// ============================================================================
// COLOR
// ============================================================================

/// RGBA color with f32 channels in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);

    /// Opaque color from RGB channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Interpolate between two colors, `t` clamped to [0, 1].
    pub fn lerp(a: Color, b: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
            a: a.a + (b.a - a.a) * t,
        }
    }

    /// Component-wise multiply of the RGB channels (alpha kept from `self`).
    pub fn modulate(self, light: Color) -> Color {
        Color {
            r: self.r * light.r,
            g: self.g * light.g,
            b: self.b * light.b,
            a: self.a,
        }
    }

    /// Clamp the RGB channels to at most 1.0.
    pub fn clamped(self) -> Color {
        Color {
            r: self.r.min(1.0),
            g: self.g.min(1.0),
            b: self.b.min(1.0),
            a: self.a,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Scales RGB, keeps alpha.
impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, scalar: f32) -> Color {
        Color {
            r: self.r * scalar,
            g: self.g * scalar,
            b: self.b * scalar,
            a: self.a,
        }
    }
}

/// Saturating add: every channel is capped at 1.0.
impl Add for Color {
    type Output = Color;

    fn add(self, other: Color) -> Color {
        Color {
            r: (self.r + other.r).min(1.0),
            g: (self.g + other.g).min(1.0),
            b: (self.b + other.b).min(1.0),
            a: (self.a + other.a).min(1.0),
        }
    }
}

// ============================================================================
// GRID POSITION
// ============================================================================

/// Integer cell coordinate on the terrain grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub z: i32,
}

impl GridPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Cell containing a world-space position (floor of x and z).
    pub fn from_world(pos: Vec3) -> Self {
        Self {
            x: pos.x.floor() as i32,
            z: pos.z.floor() as i32,
        }
    }

    pub fn manhattan_distance(&self, other: GridPos) -> i32 {
        (self.x - other.x).abs() + (self.z - other.z).abs()
    }

    /// Corner of the cell in world space at height `y`.
    pub fn to_vec3(&self, y: f32) -> Vec3 {
        Vec3::new(self.x as f32, y, self.z as f32)
    }
}

impl Add for GridPos {
    type Output = GridPos;

    fn add(self, other: GridPos) -> GridPos {
        GridPos::new(self.x + other.x, self.z + other.z)
    }
}
