//! Lethal hazards: moving balls that bounce around the arena and static wall segments.

use std::f32::consts::TAU;

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometric_utils::random_coord;
use super::locatable::Locatable;
use super::params::Params;

/// A point hazard that kills any feeder it touches.
///
/// Hazards with zero velocity never move; they are used for the boundary walls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    /// Position in 2D space.
    pub pos: Array1<f32>,
    /// Velocity in units per second.
    pub vel: Array1<f32>,
    /// Contact radius.
    pub radius: f32,
}

impl Hazard {
    /// Creates a hazard with explicit position and velocity.
    pub fn new(pos: Array1<f32>, vel: Array1<f32>, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Creates a static hazard.
    pub fn new_static(pos: Array1<f32>, radius: f32) -> Self {
        Self::new(pos, Array1::zeros(2), radius)
    }

    /// Creates a moving hazard with a random position, heading and speed.
    pub fn new_random(rng: &mut impl Rng, params: &Params) -> Self {
        let x = random_coord(rng, 0.0, params.box_width);
        let y = random_coord(rng, 0.0, params.box_height);
        let speed = params.hazard_min_speed + rng.random::<f32>() * params.hazard_speed_range;
        let angle = rng.random::<f32>() * TAU;
        Self::new(
            Array1::from_vec(vec![x, y]),
            Array1::from_vec(vec![speed * angle.cos(), speed * angle.sin()]),
            params.hazard_radius,
        )
    }

    /// Builds the static walls that line the four arena edges.
    ///
    /// Wall hazards sit half a radius outside the arena so that their contact
    /// radius still reaches a feeder at the literal edge.
    pub fn boundary_walls(params: &Params) -> Vec<Self> {
        let r = params.hazard_radius;
        let spacing = 2.0 * r;
        let outer = -r / 2.0;
        let mut walls = Vec::new();

        let along_x = (params.box_width / spacing).floor() as usize + 1;
        for i in 0..along_x {
            let x = outer + i as f32 * spacing;
            walls.push(Self::new_static(Array1::from_vec(vec![x, outer]), r));
            walls.push(Self::new_static(
                Array1::from_vec(vec![x, params.box_height + r / 2.0]),
                r,
            ));
        }

        let along_y = (params.box_height / spacing).floor() as usize + 1;
        for i in 0..along_y {
            let y = outer + i as f32 * spacing;
            walls.push(Self::new_static(Array1::from_vec(vec![outer, y]), r));
            walls.push(Self::new_static(
                Array1::from_vec(vec![params.box_width + r / 2.0, y]),
                r,
            ));
        }

        walls
    }

    /// Whether this hazard never moves.
    pub fn is_static(&self) -> bool {
        self.vel[0] == 0.0 && self.vel[1] == 0.0
    }

    /// Advances the hazard and reflects it elastically off the arena edges.
    pub fn update(&mut self, dt: f32, box_width: f32, box_height: f32) {
        if self.is_static() {
            return;
        }
        self.pos.scaled_add(dt, &self.vel);

        for (axis, extent) in [(0, box_width), (1, box_height)] {
            if self.pos[axis] < 0.0 {
                self.pos[axis] = -self.pos[axis];
                self.vel[axis] = self.vel[axis].abs();
            }
            if self.pos[axis] > extent {
                self.pos[axis] = 2.0 * extent - self.pos[axis];
                self.vel[axis] = -self.vel[axis].abs();
            }
        }
    }
}

impl Locatable for Hazard {
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
