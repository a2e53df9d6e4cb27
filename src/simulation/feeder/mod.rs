//! Feeder module containing feeder state and the sensor model.

mod feeder;
mod sense;

// Re-export everything from the feeder module
pub use feeder::*;

// Re-export sensor components
pub use sense::{SensorBank, channel_for_bearing};
