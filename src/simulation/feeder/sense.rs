//! Sensor banks and the canonical bearing-to-channel mapping.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use super::super::geometric_utils::normalize_bearing;
use super::super::params::Params;

/// Which bank of sensors a detection event feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorBank {
    /// Food sensors, short range.
    Food,
    /// Hazard sensors, long range.
    Hazard,
}

impl SensorBank {
    /// Detection radius for this bank.
    pub fn radius(self, params: &Params) -> f32 {
        match self {
            SensorBank::Food => params.food_sensor_radius,
            SensorBank::Hazard => params.hazard_sensor_radius,
        }
    }

    /// Returns a human-readable name for this bank.
    pub fn name(self) -> &'static str {
        match self {
            SensorBank::Food => "Food",
            SensorBank::Hazard => "Hazard",
        }
    }
}

/// Maps a bearing relative to the feeder's orientation onto a sensor channel.
///
/// Channel `i` points at `i * 2*PI / sensor_count`. The bearing is normalized
/// into `[0, 2*PI)`, scaled by `sensor_count / 2*PI` and rounded to the nearest
/// integer with halves rounded up, then taken modulo `sensor_count`. A bearing
/// exactly between two channels therefore lands on the higher-indexed one.
pub fn channel_for_bearing(relative_bearing: f32, sensor_count: usize) -> usize {
    let scaled = normalize_bearing(relative_bearing) * sensor_count as f32 / TAU;
    (scaled + 0.5).floor() as usize % sensor_count
}
