//! Prefabricated Maps
//!
//! Named snapshots of a world's terrain and entity layout, kept in a registry
//! owned by the [`World`](super::World). Snapshots are created by saving the
//! live world and consumed by loading them back into a world of matching size.
//!
//! The registry can optionally be persisted as JSON.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cell::CellType;

/// Errors from loading or persisting map snapshots.
#[derive(Debug, Error)]
pub enum MapError {
    /// No snapshot is registered under the requested name.
    #[error("map not found: {0}")]
    NotFound(String),
    /// Snapshot dimensions differ from the live world.
    #[error("map '{name}' is {map_width}x{map_height} but the world is {world_width}x{world_height}")]
    DimensionMismatch {
        name: String,
        map_width: usize,
        map_height: usize,
        world_width: usize,
        world_height: usize,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Saved copy of a terrain and entity layout.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    pub name: String,
    pub description: String,
    pub width: usize,
    pub height: usize,
    /// Row-major cell types
    pub cells: Vec<CellType>,
    /// Row-major terrain heights
    pub heights: Vec<f32>,
    pub entity_positions: Vec<Vec3>,
    /// Entity names, parallel to `entity_positions`
    pub entity_types: Vec<String>,
}

impl MapData {
    pub fn new(name: impl Into<String>, description: impl Into<String>, width: usize, height: usize) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            width,
            height,
            ..Default::default()
        }
    }

    pub fn entity_count(&self) -> usize {
        self.entity_positions.len().min(self.entity_types.len())
    }
}

/// Name-keyed collection of map snapshots.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MapRegistry {
    maps: BTreeMap<String, MapData>,
}

impl MapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `map` under its own name, replacing any previous entry.
    pub fn insert(&mut self, map: MapData) -> &mut MapData {
        match self.maps.entry(map.name.clone()) {
            Entry::Occupied(mut entry) => {
                entry.insert(map);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(map),
        }
    }

    pub fn get(&self, name: &str) -> Option<&MapData> {
        self.maps.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut MapData> {
        self.maps.get_mut(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<MapData> {
        self.maps.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.maps.contains_key(name)
    }

    /// Registered map names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.maps.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// Write the whole registry to `path` as pretty JSON.
    pub fn save_to_path(&self, path: &Path) -> Result<(), MapError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Saved {} map(s) to {}", self.len(), path.display());
        Ok(())
    }

    /// Read a registry previously written by [`save_to_path`](Self::save_to_path).
    pub fn load_from_path(path: &Path) -> Result<Self, MapError> {
        let json = std::fs::read_to_string(path)?;
        let registry: MapRegistry = serde_json::from_str(&json)?;
        log::info!("Loaded {} map(s) from {}", registry.len(), path.display());
        Ok(registry)
    }

    /// Merge another registry into this one; entries in `other` win on name clashes.
    pub fn merge(&mut self, other: MapRegistry) {
        self.maps.extend(other.maps);
    }
}
