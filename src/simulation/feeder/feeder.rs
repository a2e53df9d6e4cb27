//! Feeder state, sensing and motor update.
//!
//! Feeders carry a ring of directional sensors, one food and one hazard reading
//! per channel, and a gene vector that maps those readings onto speed and turn
//! rate. Genes are fixed for a feeder's whole life; variation happens only when
//! the next generation is bred.

use std::f32::consts::PI;

use ndarray::{Array1, s};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::super::genes::Genes;
use super::super::geometric_utils::{distance, distance_squared, heading, random_coord, wrap_angle};
use super::super::locatable::Locatable;
use super::super::params::Params;
use super::sense::{SensorBank, channel_for_bearing};

/// Why a feeder stopped taking part in the current generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    /// Still alive.
    None,
    /// Energy ran out.
    Starved,
    /// Touched a hazard.
    HazardCollision,
    /// Survived until the cycle time limit.
    TimeExpired,
}

impl DeathCause {
    /// One-letter code shown next to dead feeders.
    pub fn code(self) -> &'static str {
        match self {
            DeathCause::None => "",
            DeathCause::Starved => "E",
            DeathCause::HazardCollision => "O",
            DeathCause::TimeExpired => "T",
        }
    }
}

/// A simulated forager driven by a linear, gene-weighted sensor-to-motor controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feeder {
    /// Display label, inherited loosely from parents.
    pub name: String,
    /// Display color (RGB, each channel in `[0, 0.8)`).
    pub color: [f32; 3],
    /// Position in 2D space.
    pub pos: Array1<f32>,
    /// Heading in radians, kept in `(-PI, PI]`.
    pub orientation: f32,
    /// Forward speed, carried over between ticks.
    pub speed: f32,
    /// Angular velocity, carried over between ticks.
    pub turn_rate: f32,
    /// Remaining energy in `[0, max_energy]`.
    pub energy: f32,
    /// Controller weights, `4 * sensor_count` long.
    genes: Genes,
    /// Food proximity per sensor channel, in `[0, 1]`.
    pub food_sensors: Array1<f32>,
    /// Hazard proximity per sensor channel, in `[0, 1]`.
    pub hazard_sensors: Array1<f32>,
    /// Whether the feeder still takes part in the current generation.
    pub alive: bool,
    /// Simulated time lived in the current generation.
    pub age: f32,
    /// Why the feeder died, or [`DeathCause::None`].
    pub death_cause: DeathCause,
    /// Contact radius.
    pub radius: f32,
}

impl Feeder {
    /// Creates a feeder at an explicit position and orientation, in its initial state.
    ///
    /// # Panics
    ///
    /// Panics if `genes` does not hold exactly `4 * sensor_count` weights.
    pub fn new(
        name: String,
        genes: Genes,
        pos: Array1<f32>,
        orientation: f32,
        params: &Params,
    ) -> Self {
        assert_eq!(
            genes.len(),
            params.gene_len(),
            "gene vector must hold 4 * sensor_count weights"
        );
        Self {
            name,
            color: [0.4, 0.4, 0.4],
            pos,
            orientation: wrap_angle(orientation),
            speed: params.initial_speed,
            turn_rate: 0.0,
            energy: params.initial_energy,
            genes,
            food_sensors: Array1::zeros(params.sensor_count),
            hazard_sensors: Array1::zeros(params.sensor_count),
            alive: true,
            age: 0.0,
            death_cause: DeathCause::None,
            radius: params.feeder_radius,
        }
    }

    /// Creates a feeder with the given genes at a random position, heading and color.
    pub fn new_random(name: String, genes: Genes, params: &Params, rng: &mut impl Rng) -> Self {
        let mut feeder = Self::new(name, genes, Array1::zeros(2), 0.0, params);
        feeder.color = [
            rng.random::<f32>() * 0.8,
            rng.random::<f32>() * 0.8,
            rng.random::<f32>() * 0.8,
        ];
        feeder.rejuvenate(params, rng);
        feeder
    }

    /// Returns the controller weights.
    pub fn genes(&self) -> &Genes {
        &self.genes
    }

    /// Reactivates the feeder for a new generation at a random position and heading.
    pub fn rejuvenate(&mut self, params: &Params, rng: &mut impl Rng) {
        let x = random_coord(rng, 0.0, params.box_width);
        let y = random_coord(rng, 0.0, params.box_height);
        self.pos = Array1::from_vec(vec![x, y]);
        self.orientation = wrap_angle(rng.random::<f32>() * 2.0 * PI - PI);
        self.speed = params.initial_speed;
        self.turn_rate = 0.0;
        self.energy = params.initial_energy;
        self.age = 0.0;
        self.alive = true;
        self.death_cause = DeathCause::None;
        self.clear_sensors();
    }

    /// Deactivates the feeder for the rest of this generation.
    pub fn die(&mut self, cause: DeathCause) {
        self.alive = false;
        self.death_cause = cause;
    }

    /// Resets every sensor reading to zero before a new round of detection.
    pub fn clear_sensors(&mut self) {
        self.food_sensors.fill(0.0);
        self.hazard_sensors.fill(0.0);
    }

    /// Records a food item or hazard at `point` on the matching sensor bank.
    ///
    /// Points beyond the bank's radius are ignored. Otherwise the channel facing
    /// the point keeps the larger of its current value and `1 - distance / radius`,
    /// so only the nearest object per channel counts.
    pub fn detect(&mut self, point: &Array1<f32>, bank: SensorBank, params: &Params) {
        let radius = bank.radius(params);
        if distance_squared(&self.pos, point) > radius * radius {
            return;
        }

        let proximity = (1.0 - distance(&self.pos, point) / radius).max(0.0);
        let bearing = (point[1] - self.pos[1]).atan2(point[0] - self.pos[0]) - self.orientation;
        let channel = channel_for_bearing(bearing, params.sensor_count);

        let sensors = match bank {
            SensorBank::Food => &mut self.food_sensors,
            SensorBank::Hazard => &mut self.hazard_sensors,
        };
        sensors[channel] = sensors[channel].max(proximity);
    }

    /// Simulates one step of the feeder's life.
    ///
    /// Energy drains first; a feeder whose energy drops below zero starves and
    /// does not move this tick. Otherwise the controller updates speed and turn
    /// rate, and the feeder moves along the heading reached after half of this
    /// tick's turn before completing the other half.
    pub fn step(&mut self, dt: f32, params: &Params) {
        self.energy -= params.consumption_rate * dt;
        if self.energy < 0.0 {
            self.energy = 0.0;
            self.die(DeathCause::Starved);
            return;
        }

        self.age += dt;
        self.update_motion_from_sensors(params);

        let half_turn = self.turn_rate * dt / 2.0;
        self.orientation += half_turn;
        self.pos.scaled_add(self.speed * dt, &heading(self.orientation));
        self.orientation = wrap_angle(self.orientation + half_turn);
    }

    /// Adds the gene-weighted sensor readings onto the previous speed and turn rate, then clamps them.
    pub fn update_motion_from_sensors(&mut self, params: &Params) {
        let n = params.sensor_count;
        let genes = &self.genes;

        self.speed += genes.slice(s![..n]).dot(&self.food_sensors)
            + genes.slice(s![n..2 * n]).dot(&self.hazard_sensors);
        self.turn_rate += genes.slice(s![2 * n..3 * n]).dot(&self.food_sensors)
            + genes.slice(s![3 * n..]).dot(&self.hazard_sensors);

        self.speed = self.speed.clamp(-params.max_speed, params.max_speed);
        self.turn_rate = self.turn_rate.clamp(-params.max_turn, params.max_turn);
    }

    /// Gains energy from food, capped at `max_energy`.
    pub fn gain_energy(&mut self, amount: f32, max_energy: f32) {
        self.energy = (self.energy + amount).min(max_energy);
    }

    /// Terminal score for ranking.
    ///
    /// Feeders still alive at the time limit score `100 + energy`; every other
    /// feeder gets partial credit `100 * age / cycle_time_limit`.
    pub fn fitness(&self, cycle_time_limit: f32) -> f32 {
        match self.death_cause {
            DeathCause::TimeExpired => 100.0 + self.energy,
            _ => 100.0 * self.age / cycle_time_limit,
        }
    }
}

impl Locatable for Feeder {
    fn pos(&self) -> &Array1<f32> {
        &self.pos
    }

    fn pos_mut(&mut self) -> &mut Array1<f32> {
        &mut self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}
