//! World Module
//!
//! The garden terrain grid and everything that lives on it.
//!
//! ## Layout
//! A [`World`] is a `width x height` grid of [`TerrainCell`]s addressed by
//! integer `(x, z)`, plus an [`EntityArena`] of game objects, a list of point
//! [`Light`]s and a [`MapRegistry`] of named terrain snapshots.

pub mod cell;
pub mod entity;
pub mod generation;
pub mod grid;
pub mod light;
pub mod maps;

pub use cell::{CellType, TerrainCell, flower_head_color};
pub use entity::{BoundingBox, Entity, EntityArena, EntityHandle, EntityKind};
pub use generation::{HillParams, hill_height};
pub use grid::{DEFAULT_WORLD_SEED, World};
pub use light::{Light, accumulate_lighting};
pub use maps::{MapData, MapError, MapRegistry};
