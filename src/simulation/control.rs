//! Command surface for driving a run.
//!
//! Frontends (the window or the headless runner) never touch the arena
//! directly. They send [`Command`]s and advance time through a
//! [`Controller`]; commands take effect between ticks, so no tick is ever
//! partially applied.

use std::path::PathBuf;

use tracing::{info, warn};

use super::arena::{Arena, GenerationSummary, TickOutcome};
use super::error::PersistenceError;

/// Requests a frontend can make of a running simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start over, either with random feeders or from a saved generation file.
    NewRun {
        /// Generation file to seed the run from.
        from: Option<PathBuf>,
    },
    /// Save the running generation when it ends.
    RequestSave(Option<PathBuf>),
    /// Stop after the current tick.
    Quit,
}

/// Owns the arena and applies commands to it.
pub struct Controller {
    arena: Arena,
    quit_requested: bool,
}

impl Controller {
    /// Wraps an arena.
    pub fn new(arena: Arena) -> Self {
        Self {
            arena,
            quit_requested: false,
        }
    }

    /// Read-only view of the simulation for observers.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Whether [`Command::Quit`] has been received.
    pub fn is_quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Applies a command.
    ///
    /// Only a [`Command::NewRun`] from a file can fail, and a failed load leaves
    /// the current run as it was.
    pub fn apply(&mut self, command: Command) -> Result<(), PersistenceError> {
        match command {
            Command::NewRun { from: None } => self.arena.new_run(),
            Command::NewRun { from: Some(path) } => self.arena.load_generation(path)?,
            Command::RequestSave(path) => {
                info!(generation = self.arena.generation(), "save requested");
                self.arena.request_save(path);
            }
            Command::Quit => self.quit_requested = true,
        }
        Ok(())
    }

    /// Advances one tick, unless a quit has been requested.
    pub fn advance(&mut self, dt: f32) -> Option<TickOutcome> {
        if self.quit_requested {
            return None;
        }
        Some(self.arena.step(dt))
    }

    /// Runs fixed-size ticks until `generations` generations have finished or a quit is requested.
    ///
    /// Returns the summaries of the finished generations.
    pub fn run_generations(&mut self, dt: f32, generations: usize) -> Vec<GenerationSummary> {
        let mut finished = Vec::with_capacity(generations);
        if !(dt > 0.0 && dt.is_finite()) {
            warn!(dt, "time step must be positive, not running");
            return finished;
        }
        while finished.len() < generations {
            match self.advance(dt) {
                Some(TickOutcome::GenerationEnded(summary)) => finished.push(summary),
                Some(TickOutcome::Running { .. }) => {}
                None => break,
            }
        }
        finished
    }
}
