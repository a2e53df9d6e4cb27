//! Arena engine: owns hazards, food and feeders and runs the tick loop.
//!
//! Every tick runs the same phases in a fixed order, each one completing for
//! every entity before the next begins:
//!
//! 1. clear the sensors of every live feeder
//! 2. move hazards (bouncing off the arena edges)
//! 3. hazard detection, then food detection
//! 4. feeder motor update
//! 5. food consumption
//! 6. hazard collisions
//! 7. time limit check
//!
//! When no feeder is left alive the generation is scored, optionally saved and
//! replaced by the next one before `step` returns.

use std::path::{Path, PathBuf};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::error::{ConfigError, PersistenceError};
use super::evolution::{self, Origin};
use super::feeder::{DeathCause, Feeder, SensorBank};
use super::food::Food;
use super::hazard::Hazard;
use super::history::{GenerationRecord, ScoreHistory};
use super::locatable::{Locatable, touches};
use super::params::Params;
use super::persistence::{GenerationFile, default_save_path};
use super::spatial::SpatialIndex;

/// Stage of the generation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CyclePhase {
    /// Ticks are being simulated.
    Running,
    /// The finished population is being scored and ranked.
    Scoring,
    /// The next population is being bred.
    NextGeneration,
}

/// How the feeders of a finished generation died.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathTally {
    /// Feeders that ran out of energy.
    pub starved: usize,
    /// Feeders that touched a hazard.
    pub hazard: usize,
    /// Feeders alive at the time limit.
    pub time_expired: usize,
}

impl DeathTally {
    fn count(feeders: &[Feeder]) -> Self {
        let mut tally = Self::default();
        for feeder in feeders {
            match feeder.death_cause {
                DeathCause::Starved => tally.starved += 1,
                DeathCause::HazardCollision => tally.hazard += 1,
                DeathCause::TimeExpired => tally.time_expired += 1,
                DeathCause::None => {}
            }
        }
        tally
    }
}

/// Report produced when a generation ends.
#[derive(Debug)]
pub struct GenerationSummary {
    /// Best and mean fitness of the finished generation.
    pub record: GenerationRecord,
    /// Death causes in the finished generation.
    pub deaths: DeathTally,
    /// Outcome of a requested save, if one was pending.
    pub saved: Option<Result<PathBuf, PersistenceError>>,
}

/// Result of a single tick.
#[derive(Debug)]
pub enum TickOutcome {
    /// The generation continues.
    Running {
        /// Feeders alive after the tick.
        live: usize,
    },
    /// The generation ended during this tick; the next one is installed.
    GenerationEnded(GenerationSummary),
}

/// The simulation state: all entities plus the generation bookkeeping.
pub struct Arena {
    params: Params,
    rng: ChaCha8Rng,
    run_id: u64,
    generation: u32,
    cycle_time: f32,
    phase: CyclePhase,
    feeders: Vec<Feeder>,
    food: Vec<Food>,
    hazards: Vec<Hazard>,
    history: ScoreHistory,
    last_ranked: Vec<Feeder>,
    save_requested: bool,
    save_path: Option<PathBuf>,
}

impl Arena {
    /// Creates a new arena with a random population, food and hazards.
    pub fn new(params: Params) -> Result<Self, ConfigError> {
        params.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);

        let feeders = evolution::random_population(&params, &mut rng);
        let food = (0..params.food_count)
            .map(|_| Food::new_random(&mut rng, &params))
            .collect();
        let mut hazards: Vec<Hazard> = (0..params.moving_hazard_count)
            .map(|_| Hazard::new_random(&mut rng, &params))
            .collect();
        if params.boundary_walls {
            hazards.extend(Hazard::boundary_walls(&params));
        }

        let mut arena = Self::assemble(params, rng, feeders, food, hazards);
        arena.run_id = new_run_id(&mut arena.rng);
        info!(
            run_id = arena.run_id,
            seed = arena.params.seed,
            feeders = arena.feeders.len(),
            food = arena.food.len(),
            hazards = arena.hazards.len(),
            "starting new run"
        );
        Ok(arena)
    }

    /// Creates an arena from explicit entities, for scripted scenarios.
    ///
    /// The RNG is still seeded from `params.seed`; it is used for food
    /// replacement and for breeding later generations.
    pub fn from_parts(
        params: Params,
        feeders: Vec<Feeder>,
        food: Vec<Food>,
        hazards: Vec<Hazard>,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(params.seed);
        Ok(Self::assemble(params, rng, feeders, food, hazards))
    }

    fn assemble(
        params: Params,
        rng: ChaCha8Rng,
        feeders: Vec<Feeder>,
        food: Vec<Food>,
        hazards: Vec<Hazard>,
    ) -> Self {
        Self {
            params,
            rng,
            run_id: 0,
            generation: 0,
            cycle_time: 0.0,
            phase: CyclePhase::Running,
            feeders,
            food,
            hazards,
            history: ScoreHistory::new(),
            last_ranked: Vec::new(),
            save_requested: false,
            save_path: None,
        }
    }

    /// Starts a new run with a fresh random population.
    ///
    /// Food and hazards are kept; the generation counter and score history restart.
    pub fn new_run(&mut self) {
        self.feeders = evolution::random_population(&self.params, &mut self.rng);
        self.run_id = new_run_id(&mut self.rng);
        self.restart_run(0);
        info!(run_id = self.run_id, "starting new run");
    }

    /// Replaces the population with one read from a generation file.
    ///
    /// The file is fully parsed and validated first; on error the arena is left
    /// untouched.
    pub fn load_generation(&mut self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        match GenerationFile::load(path, &self.params).and_then(|file| self.install(file)) {
            Ok(()) => {
                info!(
                    path = %path.display(),
                    run_id = self.run_id,
                    generation = self.generation,
                    "loaded generation"
                );
                Ok(())
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to load generation");
                Err(err)
            }
        }
    }

    /// Installs a generation file built in memory.
    ///
    /// The file is validated against the arena's parameters first; on error
    /// the arena is left untouched.
    pub fn install(&mut self, file: GenerationFile) -> Result<(), PersistenceError> {
        file.validate(&self.params)?;
        let params = &self.params;
        let rng = &mut self.rng;
        self.feeders = file
            .entries
            .into_iter()
            .map(|entry| Feeder::new_random(entry.name, entry.genes, params, rng))
            .collect();
        self.run_id = file.run_id;
        self.restart_run(file.generation);
        Ok(())
    }

    fn restart_run(&mut self, generation: u32) {
        self.generation = generation;
        self.cycle_time = 0.0;
        self.phase = CyclePhase::Running;
        self.history = ScoreHistory::new();
        self.last_ranked.clear();
    }

    /// Asks for the generation currently running to be saved once it ends.
    ///
    /// Without a path, a timestamped file name is chosen at save time.
    pub fn request_save(&mut self, path: Option<PathBuf>) {
        self.save_requested = true;
        self.save_path = path;
    }

    /// Advances the simulation by `dt` seconds of simulated time.
    pub fn step(&mut self, dt: f32) -> TickOutcome {
        self.cycle_time += dt;

        self.clear_sensors();
        self.move_hazards(dt);
        Self::broadcast(&self.hazards, &mut self.feeders, SensorBank::Hazard, &self.params);
        Self::broadcast(&self.food, &mut self.feeders, SensorBank::Food, &self.params);
        self.move_feeders(dt);
        self.consume_food();
        self.resolve_hazard_collisions();
        self.enforce_time_limit();

        let live = self.live_count();
        if live == 0 {
            TickOutcome::GenerationEnded(self.finish_generation())
        } else {
            TickOutcome::Running { live }
        }
    }

    fn clear_sensors(&mut self) {
        for feeder in self.feeders.iter_mut().filter(|f| f.alive) {
            feeder.clear_sensors();
        }
    }

    fn move_hazards(&mut self, dt: f32) {
        let (width, height) = (self.params.box_width, self.params.box_height);
        for hazard in &mut self.hazards {
            hazard.update(dt, width, height);
        }
    }

    /// Lets every live feeder sense every source within range of `bank`.
    fn broadcast<T: Locatable>(
        sources: &[T],
        feeders: &mut [Feeder],
        bank: SensorBank,
        params: &Params,
    ) {
        let radius = bank.radius(params);
        match SpatialIndex::build(sources) {
            Ok(index) => {
                for feeder in feeders.iter_mut().filter(|f| f.alive) {
                    for idx in index.query(&feeder.pos, radius) {
                        feeder.detect(sources[idx].pos(), bank, params);
                    }
                }
            }
            Err(err) => {
                warn!(bank = bank.name(), error = ?err, "spatial index unavailable, scanning all pairs");
                for feeder in feeders.iter_mut().filter(|f| f.alive) {
                    for source in sources {
                        feeder.detect(source.pos(), bank, params);
                    }
                }
            }
        }
    }

    fn move_feeders(&mut self, dt: f32) {
        let params = &self.params;
        for feeder in self.feeders.iter_mut().filter(|f| f.alive) {
            feeder.step(dt, params);
        }
    }

    /// Feeds every live feeder touching a food item, then replaces the eaten items.
    ///
    /// A food item touched by several feeders in the same tick feeds all of them.
    fn consume_food(&mut self) {
        let (gain, cap) = (self.params.food_energy, self.params.max_energy);
        let mut eaten = Vec::new();

        for (i, food) in self.food.iter().enumerate() {
            let mut consumed = false;
            for feeder in self.feeders.iter_mut().filter(|f| f.alive) {
                if touches(food, &*feeder) {
                    feeder.gain_energy(gain, cap);
                    consumed = true;
                }
            }
            if consumed {
                eaten.push(i);
            }
        }

        for i in eaten {
            self.food[i] = Food::new_random(&mut self.rng, &self.params);
        }
    }

    /// Kills every live feeder touching a hazard, draining its energy.
    fn resolve_hazard_collisions(&mut self) {
        for hazard in &self.hazards {
            for feeder in self.feeders.iter_mut().filter(|f| f.alive) {
                if touches(hazard, &*feeder) {
                    feeder.energy = 0.0;
                    feeder.die(DeathCause::HazardCollision);
                }
            }
        }
    }

    /// Retires every survivor once the cycle time limit is reached, keeping its energy.
    fn enforce_time_limit(&mut self) {
        if self.cycle_time < self.params.cycle_time_limit {
            return;
        }
        for feeder in self.feeders.iter_mut().filter(|f| f.alive) {
            feeder.die(DeathCause::TimeExpired);
        }
    }

    fn finish_generation(&mut self) -> GenerationSummary {
        self.phase = CyclePhase::Scoring;
        let record = evolution::score_population(
            &mut self.feeders,
            self.generation,
            self.params.cycle_time_limit,
        );
        self.history.push(record);
        let deaths = DeathTally::count(&self.feeders);
        info!(
            generation = record.generation,
            best = record.best,
            mean = record.mean,
            starved = deaths.starved,
            hazard = deaths.hazard,
            survived = deaths.time_expired,
            "generation finished"
        );

        let saved = if self.save_requested {
            self.save_requested = false;
            Some(self.save_finished())
        } else {
            None
        };

        self.phase = CyclePhase::NextGeneration;
        self.last_ranked = std::mem::take(&mut self.feeders);
        let next = evolution::next_generation(&self.last_ranked, &self.params, &mut self.rng);
        let count = |origin| next.iter().filter(|(_, o)| *o == origin).count();
        debug!(
            elites = count(Origin::Elite),
            offspring = count(Origin::Offspring),
            mutants = count(Origin::Mutant),
            newcomers = count(Origin::Newcomer),
            "bred next generation"
        );
        self.feeders = next.into_iter().map(|(feeder, _)| feeder).collect();

        self.generation += 1;
        self.cycle_time = 0.0;
        self.phase = CyclePhase::Running;

        GenerationSummary {
            record,
            deaths,
            saved,
        }
    }

    fn save_finished(&mut self) -> Result<PathBuf, PersistenceError> {
        let path = self
            .save_path
            .take()
            .unwrap_or_else(|| default_save_path(self.run_id, self.generation));
        let file = GenerationFile::from_feeders(self.run_id, self.generation, &self.feeders);
        match file.save(&path) {
            Ok(()) => {
                info!(path = %path.display(), generation = self.generation, "saved generation");
                Ok(path)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to save generation");
                Err(err)
            }
        }
    }

    /// Simulation parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Current population, in the order of the last ranking.
    pub fn feeders(&self) -> &[Feeder] {
        &self.feeders
    }

    /// Food items.
    pub fn food(&self) -> &[Food] {
        &self.food
    }

    /// Hazards, moving ones first, then walls.
    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    /// Best/mean fitness of every finished generation of this run.
    pub fn history(&self) -> &ScoreHistory {
        &self.history
    }

    /// The previous generation, ranked best first, as it was when it ended.
    pub fn last_ranked(&self) -> &[Feeder] {
        &self.last_ranked
    }

    /// Identifier of the current run.
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Index of the generation currently running.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Simulated seconds since the current generation started.
    pub fn cycle_time(&self) -> f32 {
        self.cycle_time
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// Number of feeders still alive.
    pub fn live_count(&self) -> usize {
        self.feeders.iter().filter(|f| f.alive).count()
    }

    /// Whether a save is pending for the end of the current generation.
    pub fn save_pending(&self) -> bool {
        self.save_requested
    }
}

fn new_run_id(rng: &mut impl Rng) -> u64 {
    u64::from(rng.random::<u32>())
}
