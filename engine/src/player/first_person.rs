//! First-Person Player
//!
//! Camera-style player with a yaw/pitch orientation and discrete movement
//! commands.
//!
//! # Orientation
//!
//! Angles are degrees. Yaw wraps to [0, 360); pitch clamps to [-89, 89] so the
//! basis never flips at the poles. Every orientation change rebuilds the basis:
//!
//! - `forward = (cos(yaw)cos(pitch), sin(pitch), sin(yaw)cos(pitch))`
//! - `right = normalize(forward × up)`
//! - `up = normalize(right × forward)`
//!
//! The default yaw of -90° looks down -Z.
//!
//! # Movement
//!
//! Flat movement walks along the horizontal projection of the basis. The
//! `*_on_surface` variants constrain the same directions to the plane of a
//! tilted surface instead.

use glam::Vec3;

use super::stats::PlayerStats;
use crate::input::MovementKeys;
use crate::math::{GridPos, WORLD_UP, wrap_degrees};
use crate::physics::{slope_angle, surface_direction};

/// Eye height above the ground plane
pub const EYE_HEIGHT: f32 = 1.7;

/// Lowest y the player may fly down to
pub const MIN_HEIGHT: f32 = 0.5;

/// Highest y the player may fly up to
pub const MAX_HEIGHT: f32 = 50.0;

/// Pitch limit in degrees (both directions)
pub const PITCH_LIMIT: f32 = 89.0;

/// Default movement speed in units per second
pub const DEFAULT_MOVEMENT_SPEED: f32 = 5.0;

/// Movement speed limits in units per second
pub const MIN_MOVEMENT_SPEED: f32 = 0.1;
pub const MAX_MOVEMENT_SPEED: f32 = 20.0;

/// Slope (degrees) below which the standing surface counts as flat.
const FLAT_SLOPE_EPSILON: f32 = 0.01;

/// First-person player state.
#[derive(Debug, Clone)]
pub struct Player {
    position: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    /// Horizontal rotation in degrees, [0, 360) after any rotation
    yaw: f32,
    /// Vertical rotation in degrees, [-89, 89]
    pitch: f32,
    movement_speed: f32,
    standing_surface_normal: Vec3,
    stats: PlayerStats,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// Player at eye height above the origin, looking down -Z.
    pub fn new() -> Self {
        let mut player = Self {
            position: Vec3::new(0.0, EYE_HEIGHT, 0.0),
            forward: Vec3::NEG_Z,
            right: Vec3::X,
            up: WORLD_UP,
            yaw: -90.0,
            pitch: 0.0,
            movement_speed: DEFAULT_MOVEMENT_SPEED,
            standing_surface_normal: WORLD_UP,
            stats: PlayerStats::default(),
        };
        player.update_vectors();
        player
    }

    /// Apply held movement keys for one frame at `movement_speed * delta_time`.
    ///
    /// Uses surface-relative movement whenever the standing surface is tilted.
    pub fn update(&mut self, keys: &MovementKeys, delta_time: f32) {
        let step = self.movement_speed * delta_time;
        let forward = keys.forward_axis() as f32 * step;
        let right = keys.right_axis() as f32 * step;
        let vertical = keys.up_axis() as f32 * step;

        if self.standing_slope_angle() > FLAT_SLOPE_EPSILON {
            let normal = self.standing_surface_normal;
            if forward != 0.0 {
                self.move_forward_on_surface(forward, normal);
            }
            if right != 0.0 {
                self.move_right_on_surface(right, normal);
            }
        } else {
            if forward != 0.0 {
                self.move_forward(forward);
            }
            if right != 0.0 {
                self.move_right(right);
            }
        }

        if vertical != 0.0 {
            self.move_up(vertical);
        }
    }

    // ========================================================================
    // MOVEMENT
    // ========================================================================

    /// Walk along the horizontal projection of `forward`; pitch is ignored.
    pub fn move_forward(&mut self, amount: f32) {
        self.position += self.horizontal_forward() * amount;
        self.keep_eye_height();
    }

    /// Strafe along `right`, which is always horizontal.
    pub fn move_right(&mut self, amount: f32) {
        self.position += self.right * amount;
        self.keep_eye_height();
    }

    /// Fly vertically, clamped to [0.5, 50].
    pub fn move_up(&mut self, amount: f32) {
        self.position.y = (self.position.y + amount).clamp(MIN_HEIGHT, MAX_HEIGHT);
    }

    /// Walk forward along the plane of a surface with normal `surface_normal`.
    ///
    /// Height is left to the caller; no eye-height clamp is applied.
    pub fn move_forward_on_surface(&mut self, amount: f32, surface_normal: Vec3) {
        self.position += surface_direction(self.horizontal_forward(), surface_normal) * amount;
    }

    /// Strafe along the plane of a surface with normal `surface_normal`.
    pub fn move_right_on_surface(&mut self, amount: f32, surface_normal: Vec3) {
        self.position += surface_direction(self.right, surface_normal) * amount;
    }

    #[inline]
    fn horizontal_forward(&self) -> Vec3 {
        Vec3::new(self.forward.x, 0.0, self.forward.z).normalize_or_zero()
    }

    #[inline]
    fn keep_eye_height(&mut self) {
        self.position.y = self.position.y.max(EYE_HEIGHT);
    }

    // ========================================================================
    // ORIENTATION
    // ========================================================================

    /// Add yaw/pitch deltas (degrees) and rebuild the basis.
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw = wrap_degrees(self.yaw + delta_yaw);
        self.pitch = (self.pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    /// Turn to face `target`. Does nothing when `target` is the current position.
    pub fn look_at(&mut self, target: Vec3) {
        let direction = (target - self.position).normalize_or_zero();
        if direction == Vec3::ZERO {
            return;
        }

        self.yaw = wrap_degrees(direction.z.atan2(direction.x).to_degrees());
        let horizontal = (direction.x * direction.x + direction.z * direction.z).sqrt();
        self.pitch = direction.y.atan2(horizontal).to_degrees().clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    /// True when `target` lies within `max_angle` degrees of the view direction.
    pub fn is_looking_at(&self, target: Vec3, max_angle: f32) -> bool {
        let to_target = (target - self.position).normalize_or_zero();
        self.forward.dot(to_target) >= max_angle.to_radians().cos()
    }

    fn update_vectors(&mut self) {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();

        self.forward = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize_or_zero();
        self.right = self.forward.cross(WORLD_UP).normalize_or_zero();
        self.up = self.right.cross(self.forward).normalize_or_zero();
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Teleport; y is kept at or above 0.5.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.position.y = self.position.y.max(MIN_HEIGHT);
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.right
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Direction the player is looking (same as `forward`).
    #[inline]
    pub fn view_direction(&self) -> Vec3 {
        self.forward
    }

    /// Point `distance` units along the view direction.
    pub fn target_position(&self, distance: f32) -> Vec3 {
        self.position + self.forward * distance
    }

    pub fn distance_to(&self, position: Vec3) -> f32 {
        self.position.distance(position)
    }

    /// Grid cell under the player.
    pub fn grid_position(&self) -> GridPos {
        GridPos::from_world(self.position)
    }

    #[inline]
    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    /// Set movement speed, clamped to [0.1, 20].
    pub fn set_movement_speed(&mut self, speed: f32) {
        self.movement_speed = speed.clamp(MIN_MOVEMENT_SPEED, MAX_MOVEMENT_SPEED);
    }

    #[inline]
    pub fn standing_surface_normal(&self) -> Vec3 {
        self.standing_surface_normal
    }

    /// Record the surface underfoot; degenerate normals fall back to up.
    pub fn set_standing_surface_normal(&mut self, normal: Vec3) {
        let n = normal.normalize_or_zero();
        self.standing_surface_normal = if n.length() < 0.01 { WORLD_UP } else { n };
    }

    /// Slope of the surface underfoot in degrees.
    pub fn standing_slope_angle(&self) -> f32 {
        slope_angle(self.standing_surface_normal)
    }

    #[inline]
    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    #[inline]
    pub fn stats_mut(&mut self) -> &mut PlayerStats {
        &mut self.stats
    }
}
