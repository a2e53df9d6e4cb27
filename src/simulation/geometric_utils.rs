//! Geometric utility functions for distance calculations and angle handling.

use std::f32::consts::{PI, TAU};

use geo::{Distance, Euclidean, Point};
use ndarray::Array1;
use rand::Rng;

/// Squared Euclidean distance between two 2D positions.
///
/// Contact and range checks compare against squared radii to avoid a square root.
#[inline]
pub fn distance_squared(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}

/// Euclidean distance between two 2D positions.
pub fn distance(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    Euclidean.distance(Point::new(a[0], a[1]), Point::new(b[0], b[1]))
}

/// Wraps an angle into `(-PI, PI]`.
pub fn wrap_angle(angle: f32) -> f32 {
    PI - (PI - angle).rem_euclid(TAU)
}

/// Normalizes a bearing into `[0, 2*PI)`.
pub fn normalize_bearing(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Unit vector pointing along `angle`.
pub fn heading(angle: f32) -> Array1<f32> {
    Array1::from_vec(vec![angle.cos(), angle.sin()])
}

/// Uniform coordinate in `[lo, hi)`, collapsing to `lo` when the range is empty.
pub fn random_coord(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}
