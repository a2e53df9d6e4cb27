use std::path::PathBuf;

use clap::Parser;
use feeders::simulation::arena::{Arena, TickOutcome};
use feeders::simulation::control::{Command, Controller};
use feeders::simulation::params::Params;
use macroquad::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod graphics;
mod ui;

/// Longest frame time fed to the simulation, so a stalled window does not
/// turn into one huge tick.
const MAX_FRAME_TIME: f32 = 0.1;

/// Watch a population of feeders evolve in a window.
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
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Feeders".to_owned(),
        window_width: 1200,
        window_height: 800,
        ..Default::default()
    }
}

fn build_controller(args: &Args) -> anyhow::Result<Controller> {
    let mut params = match &args.config {
        Some(path) => Params::load_from_file(path)?,
        None => Params::default(),
    };
    if let Some(seed) = args.seed {
        params.seed = seed;
    }
    let mut controller = Controller::new(Arena::new(params)?);
    if let Some(path) = &args.load {
        controller.apply(Command::NewRun {
            from: Some(path.clone()),
        })?;
    }
    Ok(controller)
}

fn read_keys(state: &mut ui::UIState) {
    state.apply_hotkeys(
        is_key_pressed(KeyCode::N),
        is_key_pressed(KeyCode::S),
        is_key_pressed(KeyCode::Escape),
    );
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let mut controller = match build_controller(&args) {
        Ok(controller) => controller,
        Err(err) => {
            error!(error = %err, "could not start simulation");
            return;
        }
    };
    let mut ui_state = ui::UIState::new();

    loop {
        read_keys(&mut ui_state);
        for command in ui_state.take_commands() {
            let label = match &command {
                Command::NewRun { from: Some(path) } => Some(format!("Loaded {}", path.display())),
                Command::NewRun { from: None } => Some("Started a new run".to_string()),
                Command::RequestSave(_) => Some("Save requested".to_string()),
                Command::Quit => None,
            };
            match controller.apply(command) {
                Ok(()) => {
                    if label.is_some() {
                        ui_state.status_message = label;
                    }
                }
                Err(err) => ui_state.status_message = Some(format!("Load failed: {err}")),
            }
        }

        let dt = get_frame_time().min(MAX_FRAME_TIME) * ui_state.simulation_speed;
        match controller.advance(dt) {
            Some(TickOutcome::GenerationEnded(summary)) => match summary.saved {
                Some(Ok(path)) => {
                    ui_state.status_message = Some(format!("Saved {}", path.display()));
                }
                Some(Err(err)) => {
                    ui_state.status_message = Some(format!("Save failed: {err}"));
                }
                None => {}
            },
            Some(TickOutcome::Running { .. }) => {}
            None => break,
        }

        clear_background(WHITE);
        if ui_state.rendering_enabled {
            graphics::draw_arena(controller.arena());
        }
        ui::draw_ui(&mut ui_state, controller.arena());
        ui::process_egui();

        next_frame().await;
    }

    info!(generation = controller.arena().generation(), "quitting");
}
