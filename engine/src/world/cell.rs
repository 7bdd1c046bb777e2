//! Terrain Cells
//!
//! Per-cell terrain state and the fixed type → color palette.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::entity::EntityHandle;
use crate::math::Color;

/// Surface type of a terrain cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    #[default]
    Grass,
    Dirt,
    /// Flower planted on a grass base
    Flower,
    Water,
    Stone,
    Sand,
}

impl CellType {
    pub const ALL: [CellType; 6] = [
        CellType::Grass,
        CellType::Dirt,
        CellType::Flower,
        CellType::Water,
        CellType::Stone,
        CellType::Sand,
    ];

    /// Display color for this cell type.
    pub const fn color(self) -> Color {
        match self {
            CellType::Grass => Color::rgb(0.3, 0.7, 0.3),
            CellType::Dirt => Color::rgb(0.5, 0.3, 0.2),
            CellType::Flower => Color::rgb(0.3, 0.7, 0.3),
            CellType::Water => Color::rgb(0.2, 0.4, 0.8),
            CellType::Stone => Color::rgb(0.5, 0.5, 0.5),
            CellType::Sand => Color::rgb(0.9, 0.8, 0.6),
        }
    }

    /// Bucket a terrain height into a cell type (used by hill generation).
    pub fn from_height(height: f32) -> Self {
        if height < -0.5 {
            CellType::Water
        } else if height > 1.5 {
            CellType::Stone
        } else if height > 1.0 {
            CellType::Dirt
        } else {
            CellType::Grass
        }
    }
}

/// Flower head color, varied by cell so a meadow is not a single hue.
pub fn flower_head_color(x: i32, z: i32) -> Color {
    match (x * 7 + z * 13).rem_euclid(6) {
        0 => Color::rgb(1.0, 0.8, 0.0),  // Yellow
        1 => Color::rgb(1.0, 0.2, 0.3),  // Red
        2 => Color::rgb(1.0, 0.4, 0.6),  // Pink
        3 => Color::rgb(0.9, 0.9, 1.0),  // White
        4 => Color::rgb(0.6, 0.3, 0.9),  // Purple
        _ => Color::rgb(1.0, 0.6, 0.2),  // Orange
    }
}

/// One grid square of terrain.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainCell {
    pub cell_type: CellType,
    pub height: f32,
    /// Unit surface normal, always upward-facing (y >= 0)
    pub normal: Vec3,
    pub color: Color,
    /// Entity standing on this cell; may be stale once the entity is gone
    pub occupant: Option<EntityHandle>,
}

impl Default for TerrainCell {
    fn default() -> Self {
        Self {
            cell_type: CellType::Grass,
            height: 0.0,
            normal: Vec3::Y,
            color: CellType::Grass.color(),
            occupant: None,
        }
    }
}

impl TerrainCell {
    /// Change the cell type and refresh its color from the palette.
    pub fn set_type(&mut self, cell_type: CellType) {
        self.cell_type = cell_type;
        self.color = cell_type.color();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_buckets() {
        assert_eq!(CellType::from_height(-0.6), CellType::Water);
        assert_eq!(CellType::from_height(-0.5), CellType::Grass);
        assert_eq!(CellType::from_height(1.0), CellType::Grass);
        assert_eq!(CellType::from_height(1.2), CellType::Dirt);
        assert_eq!(CellType::from_height(1.5), CellType::Dirt);
        assert_eq!(CellType::from_height(1.51), CellType::Stone);
    }

    #[test]
    fn test_flower_shares_grass_base_color() {
        assert_eq!(CellType::Flower.color(), CellType::Grass.color());
    }

    #[test]
    fn test_flower_head_color_handles_negative_coords() {
        // Never panics and always yields an opaque palette entry.
        for x in -3..3 {
            for z in -3..3 {
                assert_eq!(flower_head_color(x, z).a, 1.0);
            }
        }
    }
}
