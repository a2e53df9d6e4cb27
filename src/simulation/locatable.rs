//! Trait for entities that have a position and a contact radius.
//!
//! Food consumption and hazard collisions share one contact rule, expressed
//! here once for every pair of locatable entities.

use ndarray::Array1;

use super::geometric_utils::distance_squared;

/// Trait for entities with a position and a circular body.
///
/// Any type that implements this trait:
/// - Has a position in 2D space
/// - Has a contact radius used for consumption and collision checks
pub trait Locatable {
    /// Returns a reference to the entity's position.
    fn pos(&self) -> &Array1<f32>;

    /// Returns a mutable reference to the entity's position.
    fn pos_mut(&mut self) -> &mut Array1<f32>;

    /// Returns the contact radius of the entity.
    fn radius(&self) -> f32;
}

/// Whether two bodies are in contact: squared center distance below `(ra + rb)^2`.
pub fn touches(a: &impl Locatable, b: &impl Locatable) -> bool {
    let reach = a.radius() + b.radius();
    distance_squared(a.pos(), b.pos()) < reach * reach
}
