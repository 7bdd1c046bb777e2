//! Flower Sim - headless garden driver
//!
//! Plays a scripted walk through the garden without a window: the player
//! strolls forward, turns now and then, picks things up and uses the
//! equipped tool. HUD statistics are logged as it goes.
//!
//! Run with:
//!   cargo run --bin flower-sim -- --frames 600 --hills --flowers 40
//!   RUST_LOG=debug cargo run --bin flower-sim -- --save-map meadow --maps-out maps.json

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use flower_engine::game::{GameConfig, GameSession, ToolOutcome};
use flower_engine::input::{KeyCode, MovementKeys};
use flower_engine::render::{build_cell_instances, build_flower_instances, instance_bytes};
use flower_engine::world::{HillParams, MapRegistry};

#[derive(Parser, Debug)]
#[command(version, about = "Headless flower garden simulation")]
struct Args {
    /// JSON config file; command-line options override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// World width in cells
    #[arg(long)]
    width: Option<usize>,

    /// World depth in cells
    #[arg(long)]
    height: Option<usize>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 300)]
    frames: u32,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Generate rolling hills instead of flat ground
    #[arg(long)]
    hills: bool,

    /// Hill amplitude (with --hills)
    #[arg(long, default_value_t = 2.0)]
    amplitude: f32,

    /// Hill frequency (with --hills)
    #[arg(long, default_value_t = 0.1)]
    frequency: f32,

    /// Random flowers planted at startup
    #[arg(long)]
    flowers: Option<usize>,

    /// RNG seed for random decoration
    #[arg(long)]
    seed: Option<u64>,

    /// Registry file to load maps from before the walk
    #[arg(long)]
    maps_in: Option<PathBuf>,

    /// Map from the loaded registry to apply before the walk
    #[arg(long, requires = "maps_in")]
    load_map: Option<String>,

    /// Save the final terrain under this name
    #[arg(long)]
    save_map: Option<String>,

    /// Write the map registry to this JSON file at the end
    #[arg(long)]
    maps_out: Option<PathBuf>,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.world_width = width;
        }
        if let Some(height) = self.height {
            config.world_height = height;
        }
        if self.hills {
            config.hills = Some(HillParams {
                amplitude: self.amplitude,
                frequency: self.frequency,
            });
        }
        if let Some(flowers) = self.flowers {
            config.flower_count = flowers;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.game_config()?;
    let mut session = GameSession::new(config);

    if let Some(path) = &args.maps_in {
        let registry = MapRegistry::load_from_path(path)
            .with_context(|| format!("failed to read maps from {}", path.display()))?;
        session.world_mut().maps_mut().merge(registry);
    }
    if let Some(name) = &args.load_map {
        session
            .world_mut()
            .load_prefabricated_map(name)
            .with_context(|| format!("failed to apply map '{name}'"))?;
    }

    run_script(&mut session, &args);
    log_hud(&session);

    let cells = build_cell_instances(session.world());
    let flowers = build_flower_instances(session.world());
    log::info!(
        "Render export: {} cells ({} bytes), {} flower heads",
        cells.len(),
        instance_bytes(&cells).len(),
        flowers.len()
    );

    if let Some(name) = &args.save_map {
        session.world_mut().save_prefabricated_map(name);
    }
    if let Some(path) = &args.maps_out {
        session
            .world()
            .maps()
            .save_to_path(path)
            .with_context(|| format!("failed to write maps to {}", path.display()))?;
    }

    Ok(())
}

/// Walk forward, turning every second, grabbing nearby items, and using the
/// equipped tool a few times per second.
fn run_script(session: &mut GameSession, args: &Args) {
    let mut keys = MovementKeys::new();
    keys.handle_key(KeyCode::W, true);

    for frame in 0..args.frames {
        if frame % 60 == 30 {
            session.mouse_look(300.0, 0.0);
        }
        if frame % 10 == 0 {
            session.pick_up_nearby();
        }
        if frame % 15 == 0 {
            match session.use_tool() {
                ToolOutcome::Nothing | ToolOutcome::CoolingDown => {}
                outcome => log::debug!("Frame {frame}: {outcome:?}"),
            }
        }
        if frame % 120 == 119 {
            session.handle_key_press(KeyCode::Tab);
        }

        session.update(args.dt, &keys);

        if frame % 60 == 59 {
            log_hud(session);
        }
    }
}

fn log_hud(session: &GameSession) {
    let player = session.player();
    let stats = player.stats();
    let cell = player.grid_position();
    log::info!(
        "t={:.1}s pos=({:.1}, {:.1}, {:.1}) cell={:?} slope={:.1}° planted={} watered={} photos={} tool={} density={:.2}",
        session.elapsed(),
        player.position().x,
        player.position().y,
        player.position().z,
        session.world().get_cell_type(cell.x, cell.z),
        player.standing_slope_angle(),
        stats.flowers_planted,
        stats.flowers_watered,
        stats.photographs_taken,
        session.equipped_tool().map_or("hands", |t| t.name()),
        session.flower_density_around_player(3),
    );
}
