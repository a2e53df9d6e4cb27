//! Food items that feeders consume for energy.
//!
//! The food count is fixed for a run: an eaten item is replaced by a fresh one
//! at a new random position.

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometric_utils::random_coord;
use super::locatable::Locatable;
use super::params::Params;

/// A food item that feeders can consume for energy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    /// Position in 2D space.
    pub pos: Array1<f32>,
    /// Contact radius.
    pub radius: f32,
}

impl Food {
    /// Creates a food item at an explicit position.
    pub fn new(pos: Array1<f32>, radius: f32) -> Self {
        Self { pos, radius }
    }

    /// Creates a new food item at a random position fully inside the arena.
    pub fn new_random(rng: &mut impl Rng, params: &Params) -> Self {
        let r = params.food_radius;
        let x = random_coord(rng, r, params.box_width - r);
        let y = random_coord(rng, r, params.box_height - r);
        Self::new(Array1::from_vec(vec![x, y]), r)
    }
}

impl Locatable for Food {
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
