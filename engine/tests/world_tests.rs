//! World Tests - Cells, Normals, Lighting, Entities and Map Snapshots
//!
//! Exercises the public `World` surface the way a front end uses it: cell
//! edits and out-of-range reads, terrain normals, light accumulation,
//! entity lookup and named map snapshots.

use glam::Vec3;
use flower_engine::math::{Color, GridPos};
use flower_engine::physics::slope_angle;
use flower_engine::world::{CellType, Entity, EntityKind, Light, MapError, World};

const EPS: f32 = 1e-5;

fn unlit_world(width: usize, height: usize) -> World {
    let mut world = World::new(width, height);
    world.clear_lights();
    world
}

// ============================================================================
// Cells
// ============================================================================

#[test]
fn test_set_cell_then_read_back_with_palette_color() {
    let mut world = World::new(6, 4);
    for (i, &cell_type) in CellType::ALL.iter().enumerate() {
        let x = i as i32 % 6;
        world.set_cell(x, 1, cell_type);
        assert_eq!(world.get_cell_type(x, 1), cell_type);
        assert_eq!(world.get_cell(x, 1).map(|c| c.color), Some(cell_type.color()));
    }
}

#[test]
fn test_out_of_bounds_reads_default_and_writes_ignored() {
    let mut world = World::new(10, 10);
    for (x, z) in [(-1, 0), (0, -1), (10, 0), (0, 10), (50, 50), (i32::MIN, i32::MAX)] {
        world.set_cell(x, z, CellType::Stone);
        world.set_terrain_height(x, z, 9.0);
        assert_eq!(world.get_cell_type(x, z), CellType::Grass);
        assert!(world.get_cell(x, z).is_none());
        assert_eq!(world.get_terrain_height(x, z), 0.0);
        assert_eq!(world.get_terrain_normal(x, z), Vec3::Y);
        assert!(!world.is_valid_position(x, z));
    }
}

#[test]
fn test_scenario_water_cell_in_ten_by_ten() {
    let mut world = World::new(10, 10);
    world.set_cell(5, 5, CellType::Water);
    assert!(world.is_valid_position(5, 5));
    assert_eq!(world.get_cell_type(5, 5), CellType::Water);
    assert_eq!(world.get_cell_type(50, 50), CellType::Grass);
}

#[test]
fn test_grid_world_round_trip() {
    let mut world = World::new(7, 5);
    world.generate_hilly_terrain(2.0, 0.5);
    for z in 0..5 {
        for x in 0..7 {
            let center = world.grid_to_world(x, z);
            assert_eq!(world.world_to_grid(center), GridPos::new(x, z));
            assert_eq!(center.y, world.get_terrain_height(x, z));
        }
    }
}

#[test]
fn test_height_lookup_by_world_position() {
    let mut world = World::new(4, 4);
    world.set_terrain_height(2, 3, 1.25);
    assert_eq!(world.get_terrain_height_at(Vec3::new(2.9, 100.0, 3.1)), 1.25);
    assert_eq!(world.get_terrain_height_at(Vec3::new(-0.1, 0.0, 0.0)), 0.0);
}

// ============================================================================
// Normals
// ============================================================================

#[test]
fn test_normals_are_idempotent_unit_and_upward() {
    let mut world = World::new(16, 12);
    world.generate_hilly_terrain(3.0, 0.35);
    let first: Vec<Vec3> = world.cells().iter().map(|c| c.normal).collect();
    world.calculate_terrain_normals();
    let second: Vec<Vec3> = world.cells().iter().map(|c| c.normal).collect();
    assert_eq!(first, second);

    for normal in second {
        assert!((normal.length() - 1.0).abs() < EPS);
        assert!(normal.y >= 0.0);
    }
}

#[test]
fn test_flat_terrain_normals_up_and_zero_slope() {
    let mut world = World::new(5, 5);
    world.generate_hilly_terrain(1.0, 1.0);
    world.generate_flat_terrain();
    for z in 0..5 {
        for x in 0..5 {
            assert_eq!(world.get_terrain_normal(x, z), Vec3::Y);
            assert_eq!(slope_angle(world.get_terrain_normal(x, z)), 0.0);
        }
    }
}

#[test]
fn test_ramp_along_z_tilts_normal_backwards() {
    let mut world = World::new(3, 3);
    for z in 0..3 {
        for x in 0..3 {
            world.set_terrain_height(x, z, z as f32 * 0.5);
        }
    }
    world.calculate_terrain_normals();
    let n = world.get_terrain_normal(1, 1);
    // Height rises with +Z, so the surface faces -Z
    assert!(n.z < 0.0);
    assert!(n.x.abs() < EPS);
    assert!((world.slope_angle_at(1, 1) - 0.5_f32.atan().to_degrees()).abs() < 1e-3);
}

// ============================================================================
// Lighting
// ============================================================================

#[test]
fn test_light_at_its_own_position_returns_its_color() {
    let mut world = unlit_world(10, 10);
    let color = Color::rgb(0.8, 0.4, 0.2);
    world.add_light(Light::new(Vec3::new(5.0, 5.0, 5.0), color, 1.0, 10.0));

    let lit = world.calculate_lighting_at(Vec3::new(5.0, 5.0, 5.0));
    assert!((lit.r - 0.8).abs() < EPS);
    assert!((lit.g - 0.4).abs() < EPS);
    assert!((lit.b - 0.2).abs() < EPS);

    let far = world.calculate_lighting_at(Vec3::new(15.0, 5.0, 5.0));
    assert_eq!((far.r, far.g, far.b), (0.0, 0.0, 0.0));
    let beyond = world.calculate_lighting_at(Vec3::new(5.0, 20.0, 5.0));
    assert_eq!((beyond.r, beyond.g, beyond.b), (0.0, 0.0, 0.0));
}

#[test]
fn test_overlapping_lights_clamp_to_one() {
    let mut world = unlit_world(4, 4);
    for _ in 0..3 {
        world.add_light(Light::new(Vec3::ZERO, Color::rgb(0.6, 0.6, 0.6), 1.0, 10.0));
    }
    let lit = world.calculate_lighting_at(Vec3::ZERO);
    assert_eq!((lit.r, lit.g, lit.b), (1.0, 1.0, 1.0));
}

#[test]
fn test_default_light_reaches_the_whole_grid() {
    let world = World::new(50, 50);
    let corner = world.calculate_lighting_at(world.grid_to_world(0, 0));
    assert!(corner.r > 0.0);
    assert!(corner.r < 1.0);
}

// ============================================================================
// Entities
// ============================================================================

#[test]
fn test_get_entity_at_is_inclusive_and_skips_inactive() {
    let mut world = World::new(10, 10);
    let mut sleeping = Entity::new(Vec3::new(2.0, 0.0, 2.0));
    sleeping.set_active(false);
    world.add_entity(sleeping);
    let awake = world.add_entity(Entity::new(Vec3::new(3.0, 0.0, 2.0)).with_name("Rock"));

    assert_eq!(world.get_entity_at(Vec3::new(2.0, 0.0, 2.0), 1.0), Some(awake));
    assert_eq!(world.get_entity_at(Vec3::new(2.0, 0.0, 2.0), 0.5), None);
}

#[test]
fn test_removed_entity_handle_goes_stale() {
    let mut world = World::new(4, 4);
    let first = world.add_entity(Entity::new(Vec3::ZERO));
    let removed = world.remove_entity(first).expect("present");
    assert_eq!(removed.position(), Vec3::ZERO);

    let second = world.add_entity(Entity::new(Vec3::ONE));
    assert_ne!(first, second);
    assert!(world.entity(first).is_none());
    assert!(world.remove_entity(first).is_none());
    assert_eq!(world.entity_count(), 1);
}

#[test]
fn test_update_only_moves_dynamic_entities() {
    let mut world = World::new(10, 10);
    let mut rock = Entity::new(Vec3::new(1.0, 0.0, 1.0));
    rock.set_velocity(Vec3::X);
    let rock = world.add_entity(rock);

    let mut ball = Entity::new(Vec3::new(1.0, 0.0, 1.0)).with_kind(EntityKind::Dynamic);
    ball.set_velocity(Vec3::new(1.0, 0.0, 0.0));
    let ball = world.add_entity(ball);

    world.update(0.5);
    assert_eq!(world.entity(rock).map(|e| e.position()), Some(Vec3::new(1.0, 0.0, 1.0)));
    assert_eq!(world.entity(ball).map(|e| e.position()), Some(Vec3::new(1.5, 0.0, 1.0)));
}

// ============================================================================
// Map snapshots
// ============================================================================

#[test]
fn test_load_missing_map_fails_and_leaves_world_unchanged() {
    let mut world = World::new(6, 6);
    world.generate_hilly_terrain(2.0, 0.4);
    let before = world.cells().to_vec();

    let result = world.load_prefabricated_map("missing");
    assert!(matches!(result, Err(MapError::NotFound(ref name)) if name == "missing"));
    assert_eq!(world.cells(), before.as_slice());
}

#[test]
fn test_load_map_with_wrong_dimensions_fails() {
    let mut small = World::new(3, 3);
    small.save_prefabricated_map("tiny");
    let tiny = small.maps().get("tiny").cloned().expect("saved");

    let mut world = World::new(4, 4);
    world.maps_mut().insert(tiny);
    assert!(matches!(
        world.load_prefabricated_map("tiny"),
        Err(MapError::DimensionMismatch { map_width: 3, world_width: 4, .. })
    ));
}

#[test]
fn test_save_then_load_restores_terrain() {
    let mut world = World::new(8, 8);
    world.generate_hilly_terrain(2.5, 0.3);
    world.set_cell(4, 4, CellType::Sand);
    world.add_entity(Entity::new(Vec3::new(1.0, 0.0, 1.0)).with_name("Bench"));
    world.save_prefabricated_map("hills");

    let saved = world.maps().get("hills").expect("saved");
    assert_eq!(saved.description, "Custom saved map");
    assert_eq!(saved.entity_types, vec!["Bench".to_string()]);
    let expected = world.cells().to_vec();

    world.generate_flat_terrain();
    world.load_prefabricated_map("hills").expect("load");
    for (cell, want) in world.cells().iter().zip(&expected) {
        assert_eq!(cell.cell_type, want.cell_type);
        assert_eq!(cell.height, want.height);
        assert_eq!(cell.color, want.color);
        assert!((cell.normal - want.normal).length() < EPS);
    }
}

#[test]
fn test_create_custom_map_overwrites_and_skips_entities() {
    let mut world = World::new(3, 3);
    world.add_entity(Entity::new(Vec3::ZERO));
    world.save_prefabricated_map("plot");
    let map = world.create_custom_map("plot", "A small plot");
    map.cells[0] = CellType::Water;

    let stored = world.maps().get("plot").expect("stored");
    assert_eq!(stored.description, "A small plot");
    assert_eq!(stored.entity_count(), 0);
    assert_eq!(world.map_names(), vec!["plot".to_string()]);

    world.load_prefabricated_map("plot").expect("load");
    assert_eq!(world.get_cell_type(0, 0), CellType::Water);
}
