//! Ringworld headless runner
//!
//! Builds a seeded scenario, steps it for a fixed number of frames and
//! reports what happened. Useful for profiling and for checking that a
//! change keeps runs reproducible (compare the `--json` output).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ringworld::SimSettings;
use ringworld::sim::{World, populate, tick};

#[derive(Debug, Parser)]
#[command(name = "ringworld", about = "Run the ring simulation headless")]
struct Args {
    /// Frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Scenario seed
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Walkers to spawn
    #[arg(long, default_value_t = 16)]
    walkers: usize,

    /// Lag factor applied to every frame
    #[arg(long, default_value_t = 1.0)]
    lag: f32,

    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Print the final world snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => SimSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => SimSettings::default(),
    };

    let mut world = World::new(settings);
    populate(&mut world, args.seed, args.walkers);

    let mut contacts = 0;
    let mut removed = 0;
    for _ in 0..args.frames {
        let summary = tick(&mut world, args.lag);
        contacts += summary.contacts;
        removed += summary.removed;
    }

    log::info!(
        "ran {} frames: {} live objects, {} contacts, {} removed",
        world.frame(),
        world.len(),
        contacts,
        removed
    );

    if args.json {
        let json = serde_json::to_string_pretty(&world.snapshot())
            .context("serializing world snapshot")?;
        println!("{json}");
    }

    Ok(())
}
