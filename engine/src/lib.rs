//! Flower Engine Library
//!
//! Core of a small first-person gardening game: a bounded terrain grid with
//! slope-aware movement and point-light accumulation, a first-person player,
//! and GPU-ready instance export. Windowing and drawing are left to the front
//! end.
//!
//! # Modules
//!
//! - [`world`] - Terrain grid, entities, lights, map snapshots and generation
//! - [`physics`] - Slope-relative motion math
//! - [`player`] - First-person orientation, movement and statistics
//! - [`input`] - Platform-agnostic held-key state
//! - [`render`] - Per-instance data for cells, flowers, lights and entities
//! - [`math`] - Color, grid positions and scalar helpers
//! - [`game`] - Tools, pickups, limbs, objectives and the frame session
//!
//! # Example
//!
//! ```rust
//! use flower_engine::world::{CellType, World};
//! use flower_engine::player::Player;
//!
//! let mut world = World::new(10, 10);
//! world.generate_hilly_terrain(2.0, 0.1);
//! world.set_cell(5, 5, CellType::Water);
//! assert_eq!(world.get_cell_type(5, 5), CellType::Water);
//!
//! let mut player = Player::new();
//! let normal = world.get_terrain_normal_at(player.position());
//! player.set_standing_surface_normal(normal);
//! player.move_forward_on_surface(1.0, normal);
//! ```

pub mod input;
pub mod math;
pub mod physics;
pub mod player;
pub mod render;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export commonly used types at crate level for convenience
pub use input::{KeyCode, MovementKeys};
pub use math::{Color, GridPos};
pub use player::{Player, PlayerStats};
pub use world::{CellType, Entity, EntityHandle, EntityKind, Light, MapData, MapError, World};
