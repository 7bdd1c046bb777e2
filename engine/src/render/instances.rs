//! GPU Instance Export
//!
//! Builds tightly packed per-instance data from a [`World`] so a front end can
//! upload it straight into vertex/storage buffers. Only data is produced here;
//! no graphics API is touched.
//!
//! Every visible cell is shaded once per frame from the three terrain queries
//! a renderer needs: the cell itself, its surface normal and the accumulated
//! lighting at its world-space center.

use bytemuck::{Pod, Zeroable};
use static_assertions::assert_eq_size;

use crate::world::{CellType, World, flower_head_color};

/// Height of a flower head above its cell's surface
pub const FLOWER_HEAD_HEIGHT: f32 = 0.3;

/// Flower head render scale
pub const FLOWER_HEAD_SCALE: f32 = 0.2;

/// GPU instance data for one terrain cell.
///
/// Layout (48 bytes total, 16-byte aligned for GPU compatibility):
/// - position: vec3<f32> (12 bytes) - Cell center at terrain height
/// - _pad0:    f32 (4 bytes)
/// - normal:   vec3<f32> (12 bytes) - Surface normal
/// - _pad1:    f32 (4 bytes)
/// - color:    vec4<f32> (16 bytes) - Palette color modulated by lighting
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct CellInstance {
    pub position: [f32; 3],
    pub _pad0: f32,
    pub normal: [f32; 3],
    pub _pad1: f32,
    pub color: [f32; 4],
}

assert_eq_size!(CellInstance, [u8; 48]);

/// GPU instance data for one flower head.
///
/// Layout (32 bytes total):
/// - position: vec3<f32> (12 bytes) - Head center
/// - scale:    f32 (4 bytes) - Uniform scale
/// - color:    vec4<f32> (16 bytes) - Lit head color
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct FlowerInstance {
    pub position: [f32; 3],
    pub scale: f32,
    pub color: [f32; 4],
}

assert_eq_size!(FlowerInstance, [u8; 32]);

/// GPU-compatible point light.
///
/// Layout (32 bytes total):
/// - position:  vec3<f32> (12 bytes)
/// - radius:    f32 (4 bytes)
/// - color:     vec3<f32> (12 bytes)
/// - intensity: f32 (4 bytes)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct LightInstance {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [f32; 3],
    pub intensity: f32,
}

assert_eq_size!(LightInstance, [u8; 32]);

/// GPU instance data for one visible entity.
///
/// Layout (48 bytes total):
/// - position: vec3<f32> (12 bytes)
/// - _pad0:    f32 (4 bytes)
/// - scale:    vec3<f32> (12 bytes)
/// - _pad1:    f32 (4 bytes)
/// - color:    vec4<f32> (16 bytes) - Entity color modulated by lighting
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct EntityInstance {
    pub position: [f32; 3],
    pub _pad0: f32,
    pub scale: [f32; 3],
    pub _pad1: f32,
    pub color: [f32; 4],
}

assert_eq_size!(EntityInstance, [u8; 48]);

/// One instance per cell, row-major.
pub fn build_cell_instances(world: &World) -> Vec<CellInstance> {
    world
        .iter_cells()
        .map(|(pos, cell)| {
            let center = world.grid_to_world(pos.x, pos.z);
            let light = world.calculate_lighting_at(center);
            CellInstance {
                position: center.to_array(),
                normal: cell.normal.to_array(),
                color: cell.color.modulate(light).to_array(),
                ..Default::default()
            }
        })
        .collect()
}

/// One head per FLOWER cell, colored per cell.
pub fn build_flower_instances(world: &World) -> Vec<FlowerInstance> {
    world
        .iter_cells()
        .filter(|(_, cell)| cell.cell_type == CellType::Flower)
        .map(|(pos, cell)| {
            let head = world.grid_to_world(pos.x, pos.z) + cell.normal * FLOWER_HEAD_HEIGHT;
            let light = world.calculate_lighting_at(head);
            FlowerInstance {
                position: head.to_array(),
                scale: FLOWER_HEAD_SCALE,
                color: flower_head_color(pos.x, pos.z).modulate(light).to_array(),
            }
        })
        .collect()
}

pub fn build_light_instances(world: &World) -> Vec<LightInstance> {
    world
        .lights()
        .iter()
        .map(|light| LightInstance {
            position: light.position.to_array(),
            radius: light.radius,
            color: [light.color.r, light.color.g, light.color.b],
            intensity: light.intensity,
        })
        .collect()
}

/// Active, visible entities in insertion order.
pub fn build_entity_instances(world: &World) -> Vec<EntityInstance> {
    world
        .entities()
        .filter(|(_, e)| e.is_active() && e.is_visible())
        .map(|(_, e)| EntityInstance {
            position: e.position().to_array(),
            scale: e.scale().to_array(),
            color: e.color().modulate(world.calculate_lighting_at(e.position())).to_array(),
            ..Default::default()
        })
        .collect()
}

/// View an instance slice as raw bytes for upload.
#[inline]
pub fn instance_bytes<T: Pod>(instances: &[T]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
