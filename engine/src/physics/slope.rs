//! Slope-Relative Motion
//!
//! Constrains movement to the plane of the surface a mover stands on.
//! Both the world (dynamic entities) and the player use these helpers so
//! that walking across a hill follows the slope instead of the flat XZ plane.
//!
//! Normals are expected to be unit length. They are re-normalised here anyway,
//! and a zero normal is treated as "no surface": the projection returns the
//! input unchanged and the slope angle reads as flat ground.

use glam::Vec3;

use crate::math::{WORLD_DOWN, WORLD_UP};

/// Squared length below which a normal counts as degenerate.
const DEGENERATE_NORMAL_EPSILON: f32 = 1e-8;

/// Remove the component of `velocity` along `surface_normal`.
///
/// The result lies in the surface plane: `result.dot(n) ≈ 0` for any unit `n`.
#[inline]
pub fn project_velocity_onto_surface(velocity: Vec3, surface_normal: Vec3) -> Vec3 {
    let n = surface_normal.normalize_or_zero();
    velocity - n * velocity.dot(n)
}

/// Direction of steepest descent on a surface.
///
/// Returns the zero vector on flat ground (and on vertical normals in general),
/// where projecting "down" onto the surface plane has no length. Callers must
/// tolerate that.
#[inline]
pub fn slope_direction(surface_normal: Vec3) -> Vec3 {
    project_velocity_onto_surface(WORLD_DOWN, surface_normal).normalize_or_zero()
}

/// Angle between the surface and the horizontal, in degrees within [0, 180].
///
/// Flat ground reads 0°, a vertical wall 90°.
pub fn slope_angle(surface_normal: Vec3) -> f32 {
    if surface_normal.length_squared() < DEGENERATE_NORMAL_EPSILON {
        return 0.0;
    }
    let n = surface_normal.normalize();
    n.dot(WORLD_UP).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Move direction constrained to a surface, normalised.
///
/// Zero when `direction` is parallel to the normal.
#[inline]
pub fn surface_direction(direction: Vec3, surface_normal: Vec3) -> Vec3 {
    project_velocity_onto_surface(direction, surface_normal).normalize_or_zero()
}
