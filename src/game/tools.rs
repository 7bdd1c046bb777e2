//! Gardening Tools
//!
//! Hand tools with per-use cooldowns. A tool flashes "active" for a short
//! moment after each use; that timer belongs to the individual tool.

use glam::Vec3;

use crate::math::Color;

/// Seconds a tool stays active after a use
pub const ACTIVE_DURATION: f32 = 0.2;

/// Upper bound for [`Tool::upgrade_efficiency`]
pub const MAX_EFFICIENCY: f32 = 3.0;

/// Lower bound for [`Tool::upgrade_efficiency`]; cooldowns divide by efficiency
pub const MIN_EFFICIENCY: f32 = 0.1;

/// Kind of gardening tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToolKind {
    WateringCan,
    SeedPlanter,
    Camera,
    Trowel,
    FertilizerSpreader,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::WateringCan,
        ToolKind::SeedPlanter,
        ToolKind::Camera,
        ToolKind::Trowel,
        ToolKind::FertilizerSpreader,
    ];

    /// Base seconds between uses.
    pub const fn max_cooldown(self) -> f32 {
        match self {
            ToolKind::WateringCan => 0.3,
            ToolKind::SeedPlanter => 0.5,
            ToolKind::Camera => 1.0,
            ToolKind::Trowel => 0.4,
            ToolKind::FertilizerSpreader => 0.6,
        }
    }

    pub const fn color(self) -> Color {
        match self {
            ToolKind::WateringCan => Color::rgb(0.4, 0.6, 0.9),
            ToolKind::SeedPlanter => Color::rgb(0.6, 0.4, 0.2),
            ToolKind::Camera => Color::rgb(0.2, 0.2, 0.2),
            ToolKind::Trowel => Color::rgb(0.7, 0.7, 0.7),
            ToolKind::FertilizerSpreader => Color::rgb(0.8, 0.6, 0.3),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ToolKind::WateringCan => "Watering Can",
            ToolKind::SeedPlanter => "Seed Planter",
            ToolKind::Camera => "Camera",
            ToolKind::Trowel => "Trowel",
            ToolKind::FertilizerSpreader => "Fertilizer Spreader",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            ToolKind::WateringCan => "Waters flowers to help them grow and flourish",
            ToolKind::SeedPlanter => "Plants seeds to create beautiful flowers",
            ToolKind::Camera => "Captures the beauty of your garden for eternity",
            ToolKind::Trowel => "Prepares the soil for planting new flowers",
            ToolKind::FertilizerSpreader => "Enriches the soil to boost flower growth",
        }
    }
}

/// A tool lying in the world or carried by the player.
#[derive(Clone, Debug)]
pub struct Tool {
    position: Vec3,
    kind: ToolKind,
    active: bool,
    active_time: f32,
    cooldown: f32,
    use_count: u32,
    efficiency: f32,
}

impl Tool {
    pub fn new(position: Vec3, kind: ToolKind) -> Self {
        Self {
            position,
            kind,
            active: false,
            active_time: 0.0,
            cooldown: 0.0,
            use_count: 0,
            efficiency: 1.0,
        }
    }

    /// Decay the cooldown and expire the active flash.
    pub fn update(&mut self, delta_time: f32) {
        if self.cooldown > 0.0 {
            self.cooldown = (self.cooldown - delta_time).max(0.0);
        }

        if self.active {
            self.active_time += delta_time;
            if self.active_time > ACTIVE_DURATION {
                self.active = false;
                self.active_time = 0.0;
            }
        }
    }

    /// Use the tool if it is off cooldown. Returns whether it fired.
    pub fn use_tool(&mut self) -> bool {
        if !self.can_use() {
            return false;
        }
        self.active = true;
        self.active_time = 0.0;
        self.cooldown = self.kind.max_cooldown() / self.efficiency;
        self.use_count += 1;
        true
    }

    pub fn reset(&mut self) {
        self.active = false;
        self.active_time = 0.0;
        self.cooldown = 0.0;
        self.use_count = 0;
    }

    #[inline]
    pub fn can_use(&self) -> bool {
        self.cooldown <= 0.0
    }

    /// 1.0 when ready, falling towards 0 right after a use.
    pub fn cooldown_progress(&self) -> f32 {
        let max = self.kind.max_cooldown() / self.efficiency;
        if max <= 0.0 {
            return 1.0;
        }
        (1.0 - self.cooldown / max).clamp(0.0, 1.0)
    }

    /// Shorten future cooldowns; efficiency stays within 0.1x..=3x.
    pub fn upgrade_efficiency(&mut self, amount: f32) {
        self.efficiency = (self.efficiency + amount).clamp(MIN_EFFICIENCY, MAX_EFFICIENCY);
    }

    #[inline]
    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    #[inline]
    pub fn use_count(&self) -> u32 {
        self.use_count
    }

    #[inline]
    pub fn efficiency(&self) -> f32 {
        self.efficiency
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn description(&self) -> &'static str {
        self.kind.description()
    }
}
