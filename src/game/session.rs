//! Game Session
//!
//! Owns one garden: the world, the player, and the tools, pickups and flower
//! limbs around them. A front end (window or scripted driver) feeds it frame
//! deltas, held keys, mouse motion and "use" clicks.

use std::collections::BTreeMap;

use glam::Vec3;

use super::config::GameConfig;
use super::limbs::{Limb, spawn_flower_limbs};
use super::objectives::{Milestone, MilestoneTracker, flower_density};
use super::pickups::{Pickup, PickupKind};
use super::tools::{Tool, ToolKind};
use crate::input::{KeyCode, MovementKeys};
use crate::math::GridPos;
use crate::player::{EYE_HEIGHT, Player};
use crate::world::{CellType, World};

/// Height of a planted flower's head above its cell
pub const FLOWER_HEIGHT: f32 = 0.5;

/// Number of water spots laid out diagonally at startup
const WATER_SPOT_COUNT: i32 = 5;

/// Inclusive cell range of the starting dirt patch on both axes
const DIRT_PATCH: std::ops::RangeInclusive<i32> = 23..=27;

/// What a tool use did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolOutcome {
    Planted(GridPos),
    Watered(GridPos),
    Photographed,
    /// The equipped tool has not cooled down yet
    CoolingDown,
    /// Target cell is off the grid or not plantable
    Nothing,
}

/// Something picked up by [`GameSession::pick_up_nearby`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collected {
    Item(PickupKind),
    Tool(ToolKind),
}

/// A running garden.
pub struct GameSession {
    config: GameConfig,
    world: World,
    player: Player,
    /// Tools lying in the world
    tools: Vec<Tool>,
    /// Tools carried by the player
    held_tools: Vec<Tool>,
    equipped: Option<usize>,
    pickups: Vec<Pickup>,
    inventory: BTreeMap<PickupKind, u32>,
    limbs: Vec<Limb>,
    milestones: MilestoneTracker,
    elapsed: f32,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        let mut world = World::with_seed(config.world_width, config.world_height, config.seed);

        if let Some(hills) = config.hills {
            world.generate_hilly_terrain(hills.amplitude, hills.frequency);
        }

        for i in 0..WATER_SPOT_COUNT {
            world.set_cell(10 + i * 8, 10 + i * 7, CellType::Water);
        }
        for x in DIRT_PATCH {
            for z in DIRT_PATCH {
                world.set_cell(x, z, CellType::Dirt);
            }
        }
        if config.flower_count > 0 {
            world.generate_random_flowers(config.flower_count);
        }

        let pickups: Vec<Pickup> = (0..5)
            .flat_map(|i| {
                let x = 20.0 + i as f32 * 2.0;
                [
                    Pickup::new(Vec3::new(x, 0.5, 20.0), PickupKind::SunflowerSeeds),
                    Pickup::new(Vec3::new(x, 0.5, 22.0), PickupKind::RoseSeeds),
                ]
            })
            .collect();

        let tools = vec![
            Tool::new(Vec3::new(25.0, 1.5, 20.0), ToolKind::WateringCan),
            Tool::new(Vec3::new(27.0, 1.5, 20.0), ToolKind::Camera),
        ];

        let mut player = Player::new();
        player.set_position(config.player_start);

        log::info!(
            "Flower garden initialized: {}x{} world, {} pickups, {} tools",
            world.width(),
            world.height(),
            pickups.len(),
            tools.len()
        );

        let mut session = Self {
            config,
            world,
            player,
            tools,
            held_tools: Vec::new(),
            equipped: None,
            pickups,
            inventory: BTreeMap::new(),
            limbs: Vec::new(),
            milestones: MilestoneTracker::new(),
            elapsed: 0.0,
        };
        session.follow_terrain();
        session
    }

    /// Advance one frame. `delta_time` is capped at the configured maximum.
    ///
    /// Returns milestones reached this frame.
    pub fn update(&mut self, delta_time: f32, keys: &MovementKeys) -> Vec<Milestone> {
        let dt = delta_time.clamp(0.0, self.config.max_delta_time);

        self.player.update(keys, dt);
        self.follow_terrain();
        self.world.update(dt);

        for tool in self.tools.iter_mut().chain(self.held_tools.iter_mut()) {
            tool.update(dt);
        }
        for limb in &mut self.limbs {
            limb.update(dt);
        }
        self.elapsed += dt;

        let reached = self.milestones.check(self.player.stats());
        for milestone in &reached {
            log::info!("{milestone}");
        }
        reached
    }

    /// Keep the eye above the terrain and record the surface underfoot.
    fn follow_terrain(&mut self) {
        let position = self.player.position();
        self.player
            .set_standing_surface_normal(self.world.get_terrain_normal_at(position));

        let min_eye = self.world.get_terrain_height_at(position) + EYE_HEIGHT;
        if position.y < min_eye {
            self.player.set_position(Vec3::new(position.x, min_eye, position.z));
        }
    }

    /// Turn the view by raw mouse motion; screen-down motion pitches down.
    pub fn mouse_look(&mut self, dx: f32, dy: f32) {
        let sensitivity = self.config.mouse_sensitivity;
        self.player.rotate(dx * sensitivity, -dy * sensitivity);
    }

    /// Collect every pickup and world tool strictly within the pickup radius.
    pub fn pick_up_nearby(&mut self) -> Vec<Collected> {
        let position = self.player.position();
        let radius = self.config.pickup_radius;
        let mut collected = Vec::new();

        let (near, far): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pickups)
            .into_iter()
            .partition(|p| p.position.distance(position) < radius);
        self.pickups = far;
        for pickup in near {
            *self.inventory.entry(pickup.kind).or_insert(0) += 1;
            log::info!("Picked up {}", pickup.name());
            collected.push(Collected::Item(pickup.kind));
        }

        let (near, far): (Vec<_>, Vec<_>) = std::mem::take(&mut self.tools)
            .into_iter()
            .partition(|t| t.position().distance(position) < radius);
        self.tools = far;
        for tool in near {
            log::info!("Picked up {}: {}", tool.name(), tool.description());
            collected.push(Collected::Tool(tool.kind()));
            self.held_tools.push(tool);
            if self.equipped.is_none() {
                self.equipped = Some(self.held_tools.len() - 1);
            }
        }

        collected
    }

    /// Act on the cell `tool_reach` ahead of the player.
    ///
    /// A camera takes a photograph. Anything else (including bare hands)
    /// plants a flower on grass or waters an existing flower.
    pub fn use_tool(&mut self) -> ToolOutcome {
        let equipped_kind = match self.equipped.and_then(|i| self.held_tools.get_mut(i)) {
            Some(tool) => {
                if !tool.use_tool() {
                    return ToolOutcome::CoolingDown;
                }
                Some(tool.kind())
            }
            None => None,
        };

        if equipped_kind == Some(ToolKind::Camera) {
            self.player.stats_mut().increment_photographs_taken();
            log::info!("Took a photograph! Total: {}", self.player.stats().photographs_taken);
            return ToolOutcome::Photographed;
        }

        let target = self.world.world_to_grid(self.player.target_position(self.config.tool_reach));
        if !self.world.is_valid_position(target.x, target.z) {
            return ToolOutcome::Nothing;
        }
        match self.world.get_cell_type(target.x, target.z) {
            CellType::Grass => {
                self.world.set_cell(target.x, target.z, CellType::Flower);
                let flower = self.world.grid_to_world(target.x, target.z) + Vec3::Y * FLOWER_HEIGHT;
                self.limbs.extend(spawn_flower_limbs(flower));
                self.player.stats_mut().increment_flowers_planted();
                log::info!("Planted a flower! Total: {}", self.player.stats().flowers_planted);
                ToolOutcome::Planted(target)
            }
            CellType::Flower => {
                for limb in self.limbs.iter_mut().filter(|l| GridPos::from_world(l.position()) == target) {
                    limb.animate(1.0);
                }
                self.player.stats_mut().increment_flowers_watered();
                log::info!("Watered a flower! Total: {}", self.player.stats().flowers_watered);
                ToolOutcome::Watered(target)
            }
            _ => ToolOutcome::Nothing,
        }
    }

    /// Equip the next held tool. Returns the newly equipped tool.
    pub fn cycle_tool(&mut self) -> Option<&Tool> {
        if self.held_tools.is_empty() {
            return None;
        }
        let next = self.equipped.map_or(0, |i| (i + 1) % self.held_tools.len());
        self.equipped = Some(next);
        let tool = self.held_tools.get(next)?;
        log::debug!("Equipped {}", tool.name());
        Some(tool)
    }

    /// React to a key press that is not movement. Tab cycles the equipped
    /// tool. Returns true if the key was consumed.
    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Tab => {
                self.cycle_tool();
                true
            }
            _ => false,
        }
    }

    /// Flower density around the player's cell.
    pub fn flower_density_around_player(&self, radius: i32) -> f32 {
        let cell = self.player.grid_position();
        flower_density(&self.world, cell.x, cell.z, radius)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn world_tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn held_tools(&self) -> &[Tool] {
        &self.held_tools
    }

    pub fn equipped_tool(&self) -> Option<&Tool> {
        self.equipped.and_then(|i| self.held_tools.get(i))
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    /// Number of collected items of `kind`.
    pub fn inventory_count(&self, kind: PickupKind) -> u32 {
        self.inventory.get(&kind).copied().unwrap_or(0)
    }

    pub fn limbs(&self) -> &[Limb] {
        &self.limbs
    }

    /// Simulated seconds since the session started.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
