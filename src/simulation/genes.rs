//! Gene vector utilities for breeding and mutation.
//!
//! A gene vector holds `4 * sensor_count` controller weights laid out as four
//! consecutive blocks: food->speed, hazard->speed, food->turn, hazard->turn.

use ndarray::Array1;
use rand::Rng;

/// Controller weights of one feeder.
pub type Genes = Array1<f32>;

/// Draws a fresh gene vector uniformly from `[-bound, bound)`.
pub fn random(len: usize, bound: f32, rng: &mut impl Rng) -> Genes {
    Array1::from_shape_fn(len, |_| rng.random_range(-bound..bound))
}

/// Performs uniform crossover between two parents.
///
/// Every position of the child is copied from one parent or the other with
/// equal probability; values are never averaged.
///
/// # Panics
///
/// Panics if the parents differ in length.
pub fn crossover(parent_1: &Genes, parent_2: &Genes, rng: &mut impl Rng) -> Genes {
    assert_eq!(
        parent_1.len(),
        parent_2.len(),
        "parents must carry gene vectors of equal length"
    );
    Array1::from_shape_fn(parent_1.len(), |i| {
        if rng.random::<bool>() {
            parent_1[i]
        } else {
            parent_2[i]
        }
    })
}

/// Returns a mutated copy of `parent`.
///
/// Each gene is independently perturbed with probability `probability` by a
/// value drawn from `[-magnitude, magnitude)`; all other genes are copied as is.
pub fn mutate(parent: &Genes, probability: f32, magnitude: f32, rng: &mut impl Rng) -> Genes {
    parent.mapv(|gene| {
        if magnitude > 0.0 && rng.random::<f32>() < probability {
            gene + rng.random_range(-magnitude..magnitude)
        } else {
            gene
        }
    })
}
