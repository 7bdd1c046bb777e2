//! Game Module
//!
//! Gameplay systems that build on top of the engine core: tools, pickups,
//! animated flower limbs, objectives, configuration and the frame session.

pub mod config;
pub mod limbs;
pub mod objectives;
pub mod pickups;
pub mod session;
pub mod tools;

pub use config::{ConfigError, GameConfig};
pub use limbs::{Limb, LimbKind, spawn_flower_limbs};
pub use objectives::{Milestone, MilestoneTracker, flower_density};
pub use pickups::{Pickup, PickupKind, bob_offset};
pub use session::{Collected, GameSession, ToolOutcome};
pub use tools::{Tool, ToolKind};
