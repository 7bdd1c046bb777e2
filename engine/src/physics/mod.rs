//! Physics Module
//!
//! Surface-relative motion math shared by the world and the player.
//!
//! # Unit System
//!
//! **1 unit = 1 grid cell = 1 meter**. Angles exposed to callers are in degrees.

pub mod slope;

pub use slope::{project_velocity_onto_surface, slope_angle, slope_direction, surface_direction};
