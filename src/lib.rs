//! # Feeders - Evolving Foragers in a Hazardous Arena
//!
//! A population of "feeders" roams a bounded 2-D arena, senses food and
//! hazards through a ring of directional sensors and turns those readings into
//! speed and turn commands with an evolvable linear controller. Each generation
//! ends when every feeder is dead or the cycle time limit is reached; the
//! population is then scored, ranked and bred into the next generation.
//!
//! ## Features
//!
//! - Radial sensor array with separate food and hazard banks
//! - Linear gene-weighted sensor-to-motor controller with momentum
//! - Moving hazards with elastic wall bounces and static boundary walls
//! - Seeded, reproducible selection / crossover / mutation policy
//! - Tab-separated generation files for saving and reloading populations
//! - Real-time visualization with egui/macroquad, plus a headless runner
//!
//! ## Core Modules
//!
//! - [`simulation::feeder`] - Feeder sensory-motor model
//! - [`simulation::arena`] - Tick loop, consumption and collision rules
//! - [`simulation::evolution`] - Scoring, ranking and reproduction
//! - [`simulation::persistence`] - Generation file format
//! - [`simulation::control`] - Command surface driving a run

/// Core simulation logic and data structures.
pub mod simulation {
    /// Arena engine owning hazards, food and feeders.
    pub mod arena;
    /// Commands and the controller that applies them between ticks.
    pub mod control;
    /// Error types for configuration and persistence.
    pub mod error;
    /// Generation lifecycle: scoring, ranking and breeding.
    pub mod evolution;
    /// Feeder state, sensors and motor update.
    pub mod feeder;
    /// Food items that feeders consume.
    pub mod food;
    /// Gene vector helpers: random genes, crossover and mutation.
    pub mod genes;
    /// Geometric utility functions for distances and angles.
    pub mod geometric_utils;
    /// Lethal hazards, moving or static.
    pub mod hazard;
    /// Append-only best/mean score history.
    pub mod history;
    /// Trait for entities with a position and contact radius.
    ///
    /// The [`locatable::Locatable`] trait is implemented by all entities that have
    /// a position in 2D space (Feeder, Food, Hazard).
    pub mod locatable;
    /// Cosmetic feeder name generation.
    pub mod naming;
    /// Simulation parameters.
    pub mod params;
    /// Generation file save/load.
    pub mod persistence;
    /// Spatial indexing for detection candidates.
    pub mod spatial;
}
