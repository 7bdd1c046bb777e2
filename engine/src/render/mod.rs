//! Render Module
//!
//! GPU-ready instance data for the garden. The engine core stays free of any
//! graphics API; a front end uploads these buffers and draws them.
//!
//! # Example
//!
//! ```rust
//! use flower_engine::render::{build_cell_instances, instance_bytes};
//! use flower_engine::world::World;
//!
//! let world = World::new(8, 8);
//! let cells = build_cell_instances(&world);
//! assert_eq!(instance_bytes(&cells).len(), 8 * 8 * 48);
//! ```

pub mod instances;

pub use instances::{
    CellInstance, EntityInstance, FlowerInstance, LightInstance,
    FLOWER_HEAD_HEIGHT, FLOWER_HEAD_SCALE,
    build_cell_instances, build_entity_instances, build_flower_instances, build_light_instances,
    instance_bytes,
};
