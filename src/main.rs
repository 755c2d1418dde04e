use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use torus_snake::driver::Pacing;
use torus_snake::game::GameConfig;
use torus_snake::modes::{LiveMode, ReplayMode, Script, load_game_config};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "torus_snake")]
#[command(version, about = "Snake on a wrapping grid, driven headlessly")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "live")]
    mode: Mode,

    /// JSON file with game settings (map_size, start_x, start_y, initial_length)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON script to replay (replay mode only)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Seed for apple placement; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Grid width and height, overriding the config file
    #[arg(long)]
    map_size: Option<usize>,

    /// Frames per second of the driving loop
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Frames between two snake moves
    #[arg(long, default_value = "25")]
    frames_per_tick: u32,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play in real time, reading commands from stdin
    Live,
    /// Run a scripted game without timers and print its summary
    Replay,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_game_config(path)?,
        None => GameConfig::default(),
    };
    if let Some(map_size) = cli.map_size {
        config = match cli.config {
            Some(_) => GameConfig { map_size, ..config },
            None => GameConfig::new(map_size),
        };
    }

    match cli.mode {
        Mode::Live => {
            let pacing = Pacing {
                frames_per_second: cli.fps,
                frames_per_tick: cli.frames_per_tick,
            };
            let mut live_mode = LiveMode::new(config, pacing, cli.seed)?;
            let report = live_mode.run().await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Mode::Replay => {
            let Some(path) = &cli.script else {
                bail!("--script is required in replay mode");
            };
            let mut script = Script::load(path)?;
            if cli.config.is_some() || cli.map_size.is_some() {
                script.config = config;
            }
            if let Some(seed) = cli.seed {
                script.seed = seed;
            }
            let summary = ReplayMode::new(script)
                .run()
                .context("Replay failed")?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
