use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Simulation parameters that control arena, feeder and evolution behavior.
///
/// Passed by reference into every constructor so that several simulations
/// (for instance in tests) never share mutable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Arena width.
    pub box_width: f32,
    /// Arena height.
    pub box_height: f32,
    /// Number of feeders in every generation.
    pub population_size: usize,
    /// Number of directional sensor channels per feeder.
    pub sensor_count: usize,
    /// Feeder contact radius.
    pub feeder_radius: f32,
    /// Maximum distance at which food is sensed.
    pub food_sensor_radius: f32,
    /// Maximum distance at which hazards are sensed.
    pub hazard_sensor_radius: f32,
    /// Speed clamp (applies to both directions).
    pub max_speed: f32,
    /// Turn rate clamp in radians per second (applies to both directions).
    pub max_turn: f32,
    /// Energy consumed per second of simulated time.
    pub consumption_rate: f32,
    /// Energy a feeder starts each generation with.
    pub initial_energy: f32,
    /// Energy cap.
    pub max_energy: f32,
    /// Speed a feeder starts each generation with.
    pub initial_speed: f32,
    /// Energy gained per food item eaten.
    pub food_energy: f32,
    /// Food contact radius.
    pub food_radius: f32,
    /// Number of food items kept in the arena.
    pub food_count: usize,
    /// Hazard contact radius.
    pub hazard_radius: f32,
    /// Number of moving hazards.
    pub moving_hazard_count: usize,
    /// Minimum speed of a moving hazard.
    pub hazard_min_speed: f32,
    /// Speed range added on top of `hazard_min_speed`.
    pub hazard_speed_range: f32,
    /// Whether static hazard walls line the arena edges.
    pub boundary_walls: bool,
    /// Simulated seconds after which every surviving feeder is retired.
    pub cycle_time_limit: f32,
    /// Seed for the run's random number generator.
    pub seed: u64,
    /// Reproduction policy settings.
    pub evolution: EvolutionParams,
}

/// Mixture of carry-over, breeding, mutation and fresh genes in each new generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionParams {
    /// Top-ranked feeders carried over unchanged.
    pub elite_count: usize,
    /// Children produced by two-parent crossover.
    pub offspring_count: usize,
    /// Children produced by single-parent mutation.
    pub mutant_count: usize,
    /// How many top-ranked feeders are eligible as parents.
    pub breeding_pool: usize,
    /// Per-gene probability of being perturbed in a mutant.
    pub mutation_probability: f32,
    /// Maximum absolute perturbation applied to a mutated gene.
    pub mutation_magnitude: f32,
    /// Fresh random genes are drawn from `[-gene_bound, gene_bound)`.
    pub gene_bound: f32,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            elite_count: 5,
            offspring_count: 10,
            mutant_count: 7,
            breeding_pool: 8,
            mutation_probability: 0.1,
            mutation_magnitude: 0.25,
            gene_bound: 1.0,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            box_width: 800.0,
            box_height: 800.0,
            population_size: 25,
            sensor_count: 16,
            feeder_radius: 5.0,
            food_sensor_radius: 40.0,
            hazard_sensor_radius: 100.0,
            max_speed: 30.0,
            max_turn: 0.2,
            consumption_rate: 4.0,
            initial_energy: 50.0,
            max_energy: 100.0,
            initial_speed: 15.0,
            food_energy: 10.0,
            food_radius: 4.0,
            food_count: 200,
            hazard_radius: 10.0,
            moving_hazard_count: 30,
            hazard_min_speed: 10.0,
            hazard_speed_range: 10.0,
            boundary_walls: true,
            cycle_time_limit: 60.0,
            seed: 0,
            evolution: EvolutionParams::default(),
        }
    }
}

impl Params {
    /// Length of every gene vector: one weight per {food, hazard} x {speed, turn} per channel.
    pub fn gene_len(&self) -> usize {
        4 * self.sensor_count
    }

    /// Checks that all values are inside their valid domains.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.population_size == 0 {
            return Err(invalid("population_size", "must be at least 1"));
        }
        if self.sensor_count == 0 {
            return Err(invalid("sensor_count", "must be at least 1"));
        }
        let positive = [
            ("box_width", self.box_width),
            ("box_height", self.box_height),
            ("feeder_radius", self.feeder_radius),
            ("food_sensor_radius", self.food_sensor_radius),
            ("hazard_sensor_radius", self.hazard_sensor_radius),
            ("food_radius", self.food_radius),
            ("hazard_radius", self.hazard_radius),
            ("max_energy", self.max_energy),
            ("cycle_time_limit", self.cycle_time_limit),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }
        if self.hazard_sensor_radius <= self.food_sensor_radius {
            return Err(invalid(
                "hazard_sensor_radius",
                "must be larger than food_sensor_radius",
            ));
        }
        if !(0.0..=self.max_energy).contains(&self.initial_energy) {
            return Err(invalid(
                "initial_energy",
                format!("must lie in [0, {}]", self.max_energy),
            ));
        }
        if self.max_speed < 0.0 || self.max_turn < 0.0 || self.consumption_rate < 0.0 {
            return Err(invalid(
                "max_speed",
                "speed, turn and consumption limits must be non-negative",
            ));
        }

        let evo = &self.evolution;
        let produced = evo.elite_count + evo.offspring_count + evo.mutant_count;
        if produced > self.population_size {
            return Err(invalid(
                "evolution",
                format!(
                    "elite + offspring + mutant counts ({produced}) exceed population_size ({})",
                    self.population_size
                ),
            ));
        }
        if evo.breeding_pool == 0 || evo.breeding_pool > self.population_size {
            return Err(invalid(
                "evolution.breeding_pool",
                format!("must lie in [1, {}]", self.population_size),
            ));
        }
        if !(0.0..=1.0).contains(&evo.mutation_probability) {
            return Err(invalid("evolution.mutation_probability", "must lie in [0, 1]"));
        }
        if !(evo.gene_bound > 0.0 && evo.mutation_magnitude >= 0.0) {
            return Err(invalid(
                "evolution.gene_bound",
                "gene bound must be positive and mutation magnitude non-negative",
            ));
        }
        Ok(())
    }

    /// Loads and validates parameters from a JSON file. Missing fields take their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let params: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        params.validate()?;
        Ok(params)
    }

    /// Saves the parameters to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
