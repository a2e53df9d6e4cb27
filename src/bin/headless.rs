use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use feeders::simulation::arena::Arena;
use feeders::simulation::control::{Command, Controller};
use feeders::simulation::params::Params;
use tracing_subscriber::EnvFilter;

/// Runs generations without a window, with a fixed simulated time step.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON parameter file (defaults apply to missing fields)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed overriding the one in the parameter file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Generation file to start from
    #[arg(short, long)]
    load: Option<PathBuf>,

    /// Number of generations to run
    #[arg(short, long, default_value_t = 20)]
    generations: usize,

    /// Simulated seconds per tick
    #[arg(long, default_value_t = 0.05)]
    dt: f32,

    /// Save the last generation to this file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Write the best/mean score history as JSON to this file
    #[arg(long)]
    history: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let mut params = match &args.config {
        Some(path) => Params::load_from_file(path)?,
        None => Params::default(),
    };
    if let Some(seed) = args.seed {
        params.seed = seed;
    }

    let mut controller = Controller::new(Arena::new(params)?);
    if let Some(path) = args.load {
        controller.apply(Command::NewRun { from: Some(path) })?;
    }

    if args.generations > 1 {
        controller.run_generations(args.dt, args.generations - 1);
    }
    if args.generations > 0 {
        if let Some(path) = args.save {
            controller.apply(Command::RequestSave(Some(path)))?;
        }
        for summary in controller.run_generations(args.dt, 1) {
            if let Some(saved) = summary.saved {
                saved?;
            }
        }
    }

    if let Some(path) = args.history {
        let json = controller.arena().history().to_json()?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write history to {}", path.display()))?;
    }

    if let Some(latest) = controller.arena().history().latest() {
        println!(
            "generation {}: best {:.2}, mean {:.2}",
            latest.generation, latest.best, latest.mean
        );
    }
    Ok(())
}
