//! Terrain Generation
//!
//! Procedural terrain shapes and decoration for a [`World`].
//!
//! Hills are a sum of two sine/cosine products so the surface stays smooth and
//! periodic without a noise dependency. Cell types are bucketed from the
//! resulting heights via [`CellType::from_height`].

use rand::Rng;

use super::cell::CellType;
use super::grid::World;
use crate::math::WORLD_UP;

/// Parameters for [`World::generate_hilly_terrain`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HillParams {
    /// Peak height scale in world units
    pub amplitude: f32,
    /// Spatial frequency in radians per cell
    pub frequency: f32,
}

impl Default for HillParams {
    fn default() -> Self {
        Self {
            amplitude: 2.0,
            frequency: 0.1,
        }
    }
}

/// Height of the hill field at cell `(x, z)`.
#[inline]
pub fn hill_height(x: i32, z: i32, params: HillParams) -> f32 {
    let (x, z) = (x as f32, z as f32);
    let f = params.frequency;
    params.amplitude * ((x * f).sin() * (z * f).cos() + 0.5 * (x * f * 0.7).sin() * (z * f * 1.3).cos())
}

impl World {
    /// Reset every cell to flat GRASS with an up normal.
    pub fn generate_flat_terrain(&mut self) {
        for cell in self.cells_mut() {
            cell.set_type(CellType::Grass);
            cell.height = 0.0;
            cell.normal = WORLD_UP;
        }
        log::debug!("Generated flat terrain {}x{}", self.width(), self.height());
    }

    /// Fill the grid with rolling hills, bucket cell types by height, then
    /// recompute normals.
    pub fn generate_hilly_terrain(&mut self, amplitude: f32, frequency: f32) {
        let params = HillParams { amplitude, frequency };
        let width = self.width().max(1);

        for (index, cell) in self.cells_mut().iter_mut().enumerate() {
            let x = (index % width) as i32;
            let z = (index / width) as i32;
            let height = hill_height(x, z, params);
            cell.height = height;
            cell.set_type(CellType::from_height(height));
        }

        self.calculate_terrain_normals();
        log::debug!(
            "Generated hilly terrain {}x{} (amplitude {amplitude}, frequency {frequency})",
            self.width(),
            self.height()
        );
    }

    /// Make `count` uniformly random draws and turn each GRASS cell hit into a FLOWER.
    ///
    /// Draws that land on any other type (including an existing flower) are
    /// skipped, so fewer than `count` flowers may appear. Returns the number planted.
    pub fn generate_random_flowers(&mut self, count: usize) -> usize {
        let (width, height) = (self.width(), self.height());
        if width == 0 || height == 0 {
            return 0;
        }

        let mut planted = 0;
        for _ in 0..count {
            let x = self.rng.gen_range(0..width) as i32;
            let z = self.rng.gen_range(0..height) as i32;
            if self.get_cell_type(x, z) == CellType::Grass {
                self.set_cell(x, z, CellType::Flower);
                planted += 1;
            }
        }

        log::debug!("Planted {planted} of {count} random flowers");
        planted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::slope_angle;
    use glam::Vec3;

    #[test]
    fn test_flat_terrain_resets_everything() {
        let mut world = World::new(5, 5);
        world.generate_hilly_terrain(3.0, 0.4);
        world.generate_flat_terrain();
        for (_, cell) in world.iter_cells() {
            assert_eq!(cell.cell_type, CellType::Grass);
            assert_eq!(cell.height, 0.0);
            assert_eq!(cell.normal, Vec3::Y);
            assert_eq!(slope_angle(cell.normal), 0.0);
        }
    }

    #[test]
    fn test_hilly_terrain_matches_formula_and_buckets() {
        let mut world = World::new(20, 20);
        world.generate_hilly_terrain(2.0, 0.3);
        let params = HillParams { amplitude: 2.0, frequency: 0.3 };
        for (pos, cell) in world.iter_cells() {
            let expected = hill_height(pos.x, pos.z, params);
            assert!((cell.height - expected).abs() < 1e-6);
            assert_eq!(cell.cell_type, CellType::from_height(expected));
            assert!(cell.normal.y >= 0.0);
            assert!((cell.normal.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_hill_origin_is_zero() {
        assert_eq!(hill_height(0, 0, HillParams::default()), 0.0);
    }

    #[test]
    fn test_random_flowers_only_on_grass() {
        let mut world = World::with_seed(8, 8, 42);
        for x in 0..8 {
            world.set_cell(x, 0, CellType::Water);
        }
        let planted = world.generate_random_flowers(30);
        assert!(planted <= 30);
        let flowers = world
            .iter_cells()
            .filter(|(_, c)| c.cell_type == CellType::Flower)
            .count();
        assert_eq!(flowers, planted);
        for x in 0..8 {
            assert_eq!(world.get_cell_type(x, 0), CellType::Water);
        }
    }

    #[test]
    fn test_random_flowers_deterministic_per_seed() {
        let mut a = World::with_seed(10, 10, 7);
        let mut b = World::with_seed(10, 10, 7);
        a.generate_random_flowers(15);
        b.generate_random_flowers(15);
        let types = |w: &World| w.cells().iter().map(|c| c.cell_type).collect::<Vec<_>>();
        assert_eq!(types(&a), types(&b));
    }

    #[test]
    fn test_random_flowers_on_empty_world() {
        let mut world = World::new(0, 0);
        assert_eq!(world.generate_random_flowers(10), 0);
    }
}
