use egui_macroquad::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use feeders::simulation::arena::Arena;
use feeders::simulation::history::ScoreHistory;

use super::ui::UIState;

const RANKED_ROWS: usize = 10;

pub(super) fn draw_stats_panel(egui_ctx: &egui::Context, state: &mut UIState, arena: &Arena) {
    let params = arena.params();

    egui::SidePanel::right("stats_panel")
        .default_width(state.stats_panel_width)
        .resizable(true)
        .show(egui_ctx, |ui| {
            ui.heading("Feeders");
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("💾 Save").clicked() {
                    state.save_requested = true;
                }
                if ui.button("🔄 New run").clicked() {
                    state.new_run_requested = true;
                }
                if ui.button("⏹ Quit").clicked() {
                    state.quit_requested = true;
                }
            });

            ui.horizontal(|ui| {
                ui.add(egui::TextEdit::singleline(&mut state.load_path).hint_text("generation file"));
                if ui.button("📂 Load").clicked() {
                    state.load_requested = true;
                }
            });

            ui.horizontal(|ui| {
                let button_text = if state.rendering_enabled {
                    "🎨 Rendering: ON"
                } else {
                    "🎨 Rendering: OFF"
                };
                if ui.button(button_text).clicked() {
                    state.rendering_enabled = !state.rendering_enabled;
                }
            });

            if arena.save_pending() {
                ui.label("Save pending, written when the generation ends");
            }
            if let Some(ref msg) = state.status_message {
                ui.label(msg);
            }

            ui.separator();

            ui.label("Simulation Speed");
            ui.add(egui::Slider::new(&mut state.simulation_speed, 0.1..=20.0).text("x"));

            ui.separator();

            ui.label(format!("Run: {}", arena.run_id()));
            ui.label(format!("Generation: {}", arena.generation()));
            ui.label(format!(
                "Time: {:.1}s / {:.0}s",
                arena.cycle_time(),
                params.cycle_time_limit
            ));
            ui.label(format!(
                "Alive: {}/{}",
                arena.live_count(),
                params.population_size
            ));
            if let Some(latest) = arena.history().latest() {
                ui.label(format!(
                    "Last generation: best {:.1}, mean {:.1}",
                    latest.best, latest.mean
                ));
            }

            ui.separator();

            ui.heading("Fitness Per Generation");
            draw_history_plot(ui, arena.history());

            ui.separator();

            ui.heading("Last Generation");
            draw_ranked_list(ui, arena);
        });
}

fn draw_history_plot(ui: &mut egui::Ui, history: &ScoreHistory) {
    if history.is_empty() {
        ui.label("Waiting for the first generation...");
        return;
    }

    let best: PlotPoints = history
        .records()
        .iter()
        .map(|r| [r.generation as f64, r.best as f64])
        .collect();
    let mean: PlotPoints = history
        .records()
        .iter()
        .map(|r| [r.generation as f64, r.mean as f64])
        .collect();

    Plot::new("fitness_plot")
        .height(180.0)
        .show_axes([true, true])
        .legend(Legend::default())
        .label_formatter(|name, value| {
            format!("{}\nGeneration: {:.0}\nFitness: {:.1}", name, value.x, value.y)
        })
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(best)
                    .color(egui::Color32::from_rgb(255, 100, 100))
                    .name("Best"),
            );
            plot_ui.line(
                Line::new(mean)
                    .color(egui::Color32::from_rgb(100, 150, 255))
                    .name("Mean"),
            );
        });
}

fn draw_ranked_list(ui: &mut egui::Ui, arena: &Arena) {
    let ranked = arena.last_ranked();
    if ranked.is_empty() {
        ui.label("No finished generation yet");
        return;
    }

    let limit = arena.params().cycle_time_limit;
    egui::Grid::new("ranked_grid").striped(true).show(ui, |ui| {
        ui.label("Name");
        ui.label("Fitness");
        ui.label("Energy");
        ui.label("Death");
        ui.end_row();
        for feeder in ranked.iter().take(RANKED_ROWS) {
            let [r, g, b] = feeder.color.map(|c| (c * 255.0) as u8);
            ui.colored_label(egui::Color32::from_rgb(r, g, b), feeder.name.as_str());
            ui.label(format!("{:.1}", feeder.fitness(limit)));
            ui.label(format!("{:.1}", feeder.energy));
            ui.label(feeder.death_cause.code());
            ui.end_row();
        }
    });
}
