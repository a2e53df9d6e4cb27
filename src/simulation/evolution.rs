//! Generation lifecycle: scoring, ranking and reproduction.
//!
//! At the end of a cycle the population is scored and sorted with
//! [`rank_order`]. The next generation is then assembled, in order, from:
//!
//! 1. elites: the top `elite_count` feeders, genes and name unchanged;
//! 2. offspring: uniform crossover of two distinct parents from the top
//!    `breeding_pool`;
//! 3. mutants: a mutated copy of one parent from the top `breeding_pool`;
//! 4. newcomers: fresh random genes, filling up to `population_size`.
//!
//! Every child is rejuvenated (random position, full initial energy, zero age).
//! All draws come from the caller's RNG, so a seeded run is reproducible.

use std::cmp::Ordering;

use rand::Rng;

use super::feeder::Feeder;
use super::genes;
use super::history::GenerationRecord;
use super::naming;
use super::params::Params;

/// Total order used to rank a finished generation, best first.
///
/// Compares fitness (higher first), then remaining energy (higher first), then
/// name (alphabetical).
pub fn rank_order(a: &Feeder, b: &Feeder, cycle_time_limit: f32) -> Ordering {
    b.fitness(cycle_time_limit)
        .total_cmp(&a.fitness(cycle_time_limit))
        .then_with(|| b.energy.total_cmp(&a.energy))
        .then_with(|| a.name.cmp(&b.name))
}

/// Sorts the population best first and summarizes it.
///
/// The sort is stable, so feeders equal under [`rank_order`] keep their
/// relative order.
pub fn score_population(
    feeders: &mut [Feeder],
    generation: u32,
    cycle_time_limit: f32,
) -> GenerationRecord {
    feeders.sort_by(|a, b| rank_order(a, b, cycle_time_limit));

    let scores: Vec<f32> = feeders
        .iter()
        .map(|f| f.fitness(cycle_time_limit))
        .collect();
    let best = scores.first().copied().unwrap_or(0.0);
    let mean = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f32>() / scores.len() as f32
    };

    GenerationRecord {
        generation,
        best,
        mean,
    }
}

/// Where a member of the new generation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Carried over unchanged.
    Elite,
    /// Crossover of two parents.
    Offspring,
    /// Mutated copy of one parent.
    Mutant,
    /// Fresh random genes.
    Newcomer,
}

/// Builds the next generation from a population sorted by [`score_population`].
///
/// Always returns exactly `population_size` live feeders in their initial
/// state, tagged with how each one was produced. Counts that exceed the
/// available parents are trimmed and the remainder is filled with newcomers.
pub fn next_generation(
    ranked: &[Feeder],
    params: &Params,
    rng: &mut impl Rng,
) -> Vec<(Feeder, Origin)> {
    let evo = &params.evolution;
    let target = params.population_size;
    let pool = evo.breeding_pool.min(ranked.len());
    let mut next = Vec::with_capacity(target);

    for elite in ranked.iter().take(evo.elite_count.min(target)) {
        let mut carried = elite.clone();
        carried.rejuvenate(params, rng);
        next.push((carried, Origin::Elite));
    }

    if pool >= 2 {
        for _ in 0..evo.offspring_count {
            if next.len() >= target {
                break;
            }
            let first = rng.random_range(0..pool);
            let mut second = rng.random_range(0..pool - 1);
            if second >= first {
                second += 1;
            }
            let (parent_1, parent_2) = (&ranked[first], &ranked[second]);

            let child_genes = genes::crossover(parent_1.genes(), parent_2.genes(), rng);
            let name = naming::baby_name(&parent_1.name, &parent_2.name, rng);
            let mut child = Feeder::new_random(name, child_genes, params, rng);
            child.color = blend(parent_1.color, parent_2.color);
            next.push((child, Origin::Offspring));
        }
    }

    if pool >= 1 {
        for _ in 0..evo.mutant_count {
            if next.len() >= target {
                break;
            }
            let parent = &ranked[rng.random_range(0..pool)];
            let child_genes = genes::mutate(
                parent.genes(),
                evo.mutation_probability,
                evo.mutation_magnitude,
                rng,
            );
            let name = naming::mutate_name(&parent.name, rng);
            let mut child = Feeder::new_random(name, child_genes, params, rng);
            child.color = parent.color;
            next.push((child, Origin::Mutant));
        }
    }

    while next.len() < target {
        next.push((random_feeder(params, rng), Origin::Newcomer));
    }

    next
}

/// Creates a feeder with fresh random genes and name.
pub fn random_feeder(params: &Params, rng: &mut impl Rng) -> Feeder {
    let genes = genes::random(params.gene_len(), params.evolution.gene_bound, rng);
    let name = naming::pick_name(rng);
    Feeder::new_random(name, genes, params, rng)
}

/// Creates a whole population of random feeders.
pub fn random_population(params: &Params, rng: &mut impl Rng) -> Vec<Feeder> {
    (0..params.population_size)
        .map(|_| random_feeder(params, rng))
        .collect()
}

fn blend(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0, (a[2] + b[2]) / 2.0]
}
