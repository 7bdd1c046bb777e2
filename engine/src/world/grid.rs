//! World Grid
//!
//! The terrain grid plus the entities, lights and map snapshots that live on it.
//!
//! ## Coordinates
//! Cell `(x, z)` is valid iff `0 <= x < width` and `0 <= z < height`; cells are
//! stored row-major. Cell centers map to world space as
//! `(x + 0.5, height(x, z), z + 0.5)`, and world positions map back by flooring x/z.
//!
//! ## Out-of-range access
//! Reads outside the grid return defaults (GRASS, height 0, up normal, `None`)
//! and writes are ignored. Callers rely on this and do not bounds-check first.

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::cell::{CellType, TerrainCell};
use super::entity::{Entity, EntityArena, EntityHandle, EntityKind};
use super::light::{Light, accumulate_lighting};
use super::maps::{MapData, MapError, MapRegistry};
use crate::math::{Color, GridPos, WORLD_UP};
use crate::physics::{project_velocity_onto_surface, slope_angle};

/// Seed used by [`World::new`] for flower placement.
pub const DEFAULT_WORLD_SEED: u64 = 0x5eed_f10e_7000_0001;

/// Height of the default overhead light.
const DEFAULT_LIGHT_HEIGHT: f32 = 20.0;
/// Radius of the default overhead light.
const DEFAULT_LIGHT_RADIUS: f32 = 100.0;

/// Terrain, entities, lights and named map snapshots.
#[derive(Debug)]
pub struct World {
    width: usize,
    height: usize,
    cells: Vec<TerrainCell>,
    entities: EntityArena,
    lights: Vec<Light>,
    maps: MapRegistry,
    pub(super) rng: ChaCha8Rng,
}

impl World {
    /// Create a flat grass world with one overhead light.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_seed(width, height, DEFAULT_WORLD_SEED)
    }

    /// Like [`World::new`] with an explicit seed for random decoration.
    pub fn with_seed(width: usize, height: usize, seed: u64) -> Self {
        let default_light = Light::new(
            Vec3::new(width as f32 / 2.0, DEFAULT_LIGHT_HEIGHT, height as f32 / 2.0),
            Color::WHITE,
            1.0,
            DEFAULT_LIGHT_RADIUS,
        );

        Self {
            width,
            height,
            cells: vec![TerrainCell::default(); width * height],
            entities: EntityArena::new(),
            lights: vec![default_light],
            maps: MapRegistry::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Advance every active entity by `delta_time`.
    ///
    /// Dynamic entities first pick up the terrain normal under them and have
    /// their velocity constrained to that surface.
    pub fn update(&mut self, delta_time: f32) {
        let surface_normals: Vec<(EntityHandle, Vec3)> = self
            .entities
            .iter()
            .filter(|(_, e)| e.is_active() && e.kind() == EntityKind::Dynamic)
            .map(|(handle, e)| (handle, self.get_terrain_normal_at(e.position())))
            .collect();

        for (handle, normal) in surface_normals {
            if let Some(entity) = self.entities.get_mut(handle) {
                entity.set_surface_normal(normal);
                let velocity = project_velocity_onto_surface(entity.velocity(), entity.surface_normal());
                entity.set_velocity(velocity);
            }
        }

        for (_, entity) in self.entities.iter_mut() {
            entity.update(delta_time);
        }
    }

    // ========================================================================
    // CELLS
    // ========================================================================

    #[inline]
    pub fn is_valid_position(&self, x: i32, z: i32) -> bool {
        x >= 0 && z >= 0 && (x as usize) < self.width && (z as usize) < self.height
    }

    #[inline]
    fn cell_index(&self, x: i32, z: i32) -> Option<usize> {
        self.is_valid_position(x, z)
            .then(|| z as usize * self.width + x as usize)
    }

    /// Set a cell's type and palette color. Ignored out of bounds.
    pub fn set_cell(&mut self, x: i32, z: i32, cell_type: CellType) {
        if let Some(index) = self.cell_index(x, z) {
            self.cells[index].set_type(cell_type);
        }
    }

    /// Cell type at `(x, z)`; GRASS out of bounds.
    pub fn get_cell_type(&self, x: i32, z: i32) -> CellType {
        self.get_cell(x, z).map_or(CellType::Grass, |cell| cell.cell_type)
    }

    pub fn get_cell(&self, x: i32, z: i32) -> Option<&TerrainCell> {
        self.cell_index(x, z).map(|index| &self.cells[index])
    }

    pub fn get_cell_mut(&mut self, x: i32, z: i32) -> Option<&mut TerrainCell> {
        let index = self.cell_index(x, z)?;
        self.cells.get_mut(index)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[TerrainCell] {
        &self.cells
    }

    /// Iterate `(GridPos, &TerrainCell)` over the whole grid, row-major.
    pub fn iter_cells(&self) -> impl Iterator<Item = (GridPos, &TerrainCell)> + '_ {
        let width = self.width.max(1);
        self.cells.iter().enumerate().map(move |(index, cell)| {
            (GridPos::new((index % width) as i32, (index / width) as i32), cell)
        })
    }

    /// Record which entity stands on a cell. Ignored out of bounds.
    pub fn set_cell_occupant(&mut self, x: i32, z: i32, occupant: Option<EntityHandle>) {
        if let Some(cell) = self.get_cell_mut(x, z) {
            cell.occupant = occupant;
        }
    }

    // ========================================================================
    // HEIGHTS & NORMALS
    // ========================================================================

    /// Terrain height at `(x, z)`; 0 out of bounds.
    pub fn get_terrain_height(&self, x: i32, z: i32) -> f32 {
        self.get_cell(x, z).map_or(0.0, |cell| cell.height)
    }

    /// Terrain height of the cell containing `world_pos`.
    pub fn get_terrain_height_at(&self, world_pos: Vec3) -> f32 {
        let grid = self.world_to_grid(world_pos);
        self.get_terrain_height(grid.x, grid.z)
    }

    /// Set a cell's height. Ignored out of bounds.
    ///
    /// Normals are not refreshed; call [`calculate_terrain_normals`](Self::calculate_terrain_normals)
    /// after a batch of edits.
    pub fn set_terrain_height(&mut self, x: i32, z: i32, height: f32) {
        if let Some(cell) = self.get_cell_mut(x, z) {
            cell.height = height;
        }
    }

    /// Surface normal at `(x, z)`; up out of bounds.
    pub fn get_terrain_normal(&self, x: i32, z: i32) -> Vec3 {
        self.get_cell(x, z).map_or(WORLD_UP, |cell| cell.normal)
    }

    /// Surface normal of the cell containing `world_pos`.
    pub fn get_terrain_normal_at(&self, world_pos: Vec3) -> Vec3 {
        let grid = self.world_to_grid(world_pos);
        self.get_terrain_normal(grid.x, grid.z)
    }

    /// Slope angle in degrees of the cell at `(x, z)`.
    pub fn slope_angle_at(&self, x: i32, z: i32) -> f32 {
        slope_angle(self.get_terrain_normal(x, z))
    }

    /// Recompute every cell's normal from the current heights.
    pub fn calculate_terrain_normals(&mut self) {
        for z in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                self.calculate_cell_normal(x, z);
            }
        }
    }

    /// Recompute one cell's normal from its four neighbours' heights.
    ///
    /// Neighbours outside the grid count as the cell's own height.
    pub fn calculate_cell_normal(&mut self, x: i32, z: i32) {
        let Some(index) = self.cell_index(x, z) else {
            return;
        };
        let h = self.cells[index].height;
        let neighbour = |nx: i32, nz: i32| self.get_cell(nx, nz).map_or(h, |cell| cell.height);

        let tangent_x = Vec3::new(2.0, neighbour(x + 1, z) - neighbour(x - 1, z), 0.0);
        let tangent_z = Vec3::new(0.0, neighbour(x, z + 1) - neighbour(x, z - 1), 2.0);

        let mut normal = tangent_z.cross(tangent_x).normalize_or_zero();
        if normal.y < 0.0 {
            normal = -normal;
        }
        self.cells[index].normal = normal;
    }

    // ========================================================================
    // ENTITIES
    // ========================================================================

    /// Take ownership of `entity`.
    pub fn add_entity(&mut self, entity: Entity) -> EntityHandle {
        self.entities.insert(entity)
    }

    /// Remove an entity, returning it; `None` if it is not in this world.
    ///
    /// Cells that recorded the entity as their occupant are cleared.
    pub fn remove_entity(&mut self, handle: EntityHandle) -> Option<Entity> {
        let entity = self.entities.remove(handle)?;
        for cell in self.cells.iter_mut().filter(|c| c.occupant == Some(handle)) {
            cell.occupant = None;
        }
        Some(entity)
    }

    pub fn entity(&self, handle: EntityHandle) -> Option<&Entity> {
        self.entities.get(handle)
    }

    pub fn entity_mut(&mut self, handle: EntityHandle) -> Option<&mut Entity> {
        self.entities.get_mut(handle)
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityHandle, &Entity)> + '_ {
        self.entities.iter()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// First active entity whose center is within `radius` (inclusive) of `position`.
    pub fn get_entity_at(&self, position: Vec3, radius: f32) -> Option<EntityHandle> {
        self.entities
            .iter()
            .find(|(_, e)| e.is_active() && e.position().distance(position) <= radius)
            .map(|(handle, _)| handle)
    }

    // ========================================================================
    // LIGHTS
    // ========================================================================

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Remove the light at `index`; no-op when out of range.
    pub fn remove_light(&mut self, index: usize) -> Option<Light> {
        if index < self.lights.len() {
            Some(self.lights.remove(index))
        } else {
            None
        }
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn clear_lights(&mut self) {
        self.lights.clear();
    }

    /// Accumulated light color at `position`, each channel clamped to 1.0.
    pub fn calculate_lighting_at(&self, position: Vec3) -> Color {
        accumulate_lighting(&self.lights, position)
    }

    // ========================================================================
    // MAPS
    // ========================================================================

    pub fn maps(&self) -> &MapRegistry {
        &self.maps
    }

    pub fn maps_mut(&mut self) -> &mut MapRegistry {
        &mut self.maps
    }

    pub fn map_names(&self) -> Vec<String> {
        self.maps.names().map(str::to_string).collect()
    }

    /// Overwrite every cell's type and height from the named snapshot.
    ///
    /// Fails when the name is unknown or the snapshot's dimensions differ from
    /// this world; the world is left untouched in both cases.
    pub fn load_prefabricated_map(&mut self, name: &str) -> Result<(), MapError> {
        let result = self.apply_map(name);
        match &result {
            Ok(()) => log::info!("Loaded prefabricated map: {name}"),
            Err(e) => log::error!("Failed to load prefabricated map: {e}"),
        }
        result
    }

    fn apply_map(&mut self, name: &str) -> Result<(), MapError> {
        let map = self
            .maps
            .get(name)
            .ok_or_else(|| MapError::NotFound(name.to_string()))?;

        if map.width != self.width || map.height != self.height {
            return Err(MapError::DimensionMismatch {
                name: name.to_string(),
                map_width: map.width,
                map_height: map.height,
                world_width: self.width,
                world_height: self.height,
            });
        }

        // Short snapshots only overwrite the cells they cover.
        for (cell, &cell_type) in self.cells.iter_mut().zip(&map.cells) {
            cell.set_type(cell_type);
        }
        for (cell, &height) in self.cells.iter_mut().zip(&map.heights) {
            cell.height = height;
        }

        self.calculate_terrain_normals();
        Ok(())
    }

    /// Capture the current terrain and entities under `name`, replacing any
    /// previous snapshot with that name.
    pub fn save_prefabricated_map(&mut self, name: &str) {
        let mut map = self.capture_terrain(name, "Custom saved map");
        for (_, entity) in self.entities.iter() {
            map.entity_positions.push(entity.position());
            map.entity_types.push(entity.name().to_string());
        }
        self.maps.insert(map);
        log::info!("Saved prefabricated map: {name}");
    }

    /// Register a terrain-only snapshot with a description and return it for editing.
    pub fn create_custom_map(&mut self, name: &str, description: &str) -> &mut MapData {
        let map = self.capture_terrain(name, description);
        self.maps.insert(map)
    }

    fn capture_terrain(&self, name: &str, description: &str) -> MapData {
        let mut map = MapData::new(name, description, self.width, self.height);
        map.cells = self.cells.iter().map(|c| c.cell_type).collect();
        map.heights = self.cells.iter().map(|c| c.height).collect();
        map
    }

    // ========================================================================
    // COORDINATES
    // ========================================================================

    /// World-space center of cell `(x, z)` at its terrain height.
    pub fn grid_to_world(&self, x: i32, z: i32) -> Vec3 {
        Vec3::new(x as f32 + 0.5, self.get_terrain_height(x, z), z as f32 + 0.5)
    }

    /// Cell containing `world_pos`.
    pub fn world_to_grid(&self, world_pos: Vec3) -> GridPos {
        GridPos::from_world(world_pos)
    }

    pub(super) fn cells_mut(&mut self) -> &mut [TerrainCell] {
        &mut self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_is_flat_grass_with_light() {
        let world = World::new(4, 3);
        assert_eq!(world.cells().len(), 12);
        for (_, cell) in world.iter_cells() {
            assert_eq!(cell.cell_type, CellType::Grass);
            assert_eq!(cell.height, 0.0);
            assert_eq!(cell.normal, Vec3::Y);
            assert_eq!(cell.color, CellType::Grass.color());
        }
        assert_eq!(world.lights().len(), 1);
        assert_eq!(world.lights()[0].position, Vec3::new(2.0, 20.0, 1.5));
    }

    #[test]
    fn test_iter_cells_row_major() {
        let mut world = World::new(3, 2);
        world.set_cell(2, 1, CellType::Sand);
        let (pos, cell) = world.iter_cells().nth(5).expect("six cells");
        assert_eq!(pos, GridPos::new(2, 1));
        assert_eq!(cell.cell_type, CellType::Sand);
    }

    #[test]
    fn test_cell_normal_on_ramp() {
        let mut world = World::new(3, 1);
        for x in 0..3 {
            world.set_terrain_height(x, 0, x as f32);
        }
        world.calculate_cell_normal(1, 0);
        // tangents (2, 2, 0) and (0, 0, 2): normal ∝ (-4, 4, 0)
        let expected = Vec3::new(-1.0, 1.0, 0.0).normalize();
        assert!((world.get_terrain_normal(1, 0) - expected).length() < 1e-6);
        assert!((world.slope_angle_at(1, 0) - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_edge_cells_clamp_to_own_height() {
        let mut world = World::new(2, 1);
        world.set_terrain_height(0, 0, 0.0);
        world.set_terrain_height(1, 0, 2.0);
        world.calculate_terrain_normals();
        // Left edge: right - self = 2, so the tangent is (2, 2, 0)
        let expected = Vec3::new(-1.0, 1.0, 0.0).normalize();
        assert!((world.get_terrain_normal(0, 0) - expected).length() < 1e-6);
        assert!((world.get_terrain_normal(1, 0) - expected).length() < 1e-6);
    }

    #[test]
    fn test_remove_entity_clears_occupant() {
        let mut world = World::new(2, 2);
        let handle = world.add_entity(Entity::new(Vec3::new(0.5, 0.0, 0.5)));
        world.set_cell_occupant(0, 0, Some(handle));
        assert!(world.remove_entity(handle).is_some());
        assert_eq!(world.get_cell(0, 0).and_then(|c| c.occupant), None);
        assert!(world.remove_entity(handle).is_none());
    }

    #[test]
    fn test_dynamic_entity_follows_slope() {
        let mut world = World::new(3, 3);
        for z in 0..3 {
            for x in 0..3 {
                world.set_terrain_height(x, z, x as f32);
            }
        }
        world.calculate_terrain_normals();

        let mut mover = Entity::new(Vec3::new(1.5, 1.0, 1.5)).with_kind(EntityKind::Dynamic);
        mover.set_velocity(Vec3::new(1.0, 0.0, 0.0));
        let handle = world.add_entity(mover);
        world.update(1.0);

        let entity = world.entity(handle).expect("still present");
        let normal = world.get_terrain_normal(1, 1);
        assert!((entity.surface_normal() - normal).length() < 1e-6);
        assert!(entity.velocity().dot(normal).abs() < 1e-5);
        // Walking up the ramp gains height
        assert!(entity.position().y > 1.0);
    }

    #[test]
    fn test_entity_lookup_and_snapshot_keep_insertion_order() {
        let mut world = World::new(4, 4);
        let a = world.add_entity(Entity::new(Vec3::ZERO).with_name("a"));
        let b = world.add_entity(Entity::new(Vec3::ZERO).with_name("b"));
        world.remove_entity(a);
        world.add_entity(Entity::new(Vec3::ZERO).with_name("c"));

        assert_eq!(world.get_entity_at(Vec3::ZERO, 1.0), Some(b));
        world.save_prefabricated_map("order");
        let saved = world.maps().get("order").map(|m| m.entity_types.clone());
        assert_eq!(saved, Some(vec!["b".to_string(), "c".to_string()]));
    }

    #[test]
    fn test_remove_light_out_of_range_is_noop() {
        let mut world = World::new(2, 2);
        assert!(world.remove_light(5).is_none());
        assert_eq!(world.lights().len(), 1);
        assert!(world.remove_light(0).is_some());
        assert!(world.lights().is_empty());
    }
}
