// UI module - side panel with run controls, score plot and rankings

mod stats;
mod ui;

pub use ui::{UIState, draw_ui, process_egui};
