use egui_macroquad::egui;
use feeders::simulation::arena::Arena;
use feeders::simulation::control::Command;
use std::path::PathBuf;

pub struct UIState {
    pub stats_panel_width: f32,
    pub save_requested: bool,
    pub load_requested: bool,
    pub new_run_requested: bool,
    pub quit_requested: bool,
    pub load_path: String,
    pub status_message: Option<String>,
    pub simulation_speed: f32,
    pub rendering_enabled: bool,
    /// Set while an egui widget (the load path field) holds keyboard focus.
    pub keyboard_captured: bool,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            stats_panel_width: 300.0,
            save_requested: false,
            load_requested: false,
            new_run_requested: false,
            quit_requested: false,
            load_path: String::new(),
            status_message: None,
            simulation_speed: 1.0,
            rendering_enabled: true,
            keyboard_captured: false,
        }
    }

    /// Records the N / S / Escape shortcuts, unless egui is taking text input.
    pub fn apply_hotkeys(&mut self, new_run: bool, save: bool, quit: bool) {
        if self.keyboard_captured {
            return;
        }
        self.new_run_requested |= new_run;
        self.save_requested |= save;
        self.quit_requested |= quit;
    }

    /// Drains the pending button and key requests into commands.
    pub fn take_commands(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        if std::mem::take(&mut self.quit_requested) {
            commands.push(Command::Quit);
        }
        if std::mem::take(&mut self.new_run_requested) {
            commands.push(Command::NewRun { from: None });
        }
        if std::mem::take(&mut self.load_requested) {
            let path = self.load_path.trim();
            if path.is_empty() {
                self.status_message = Some("Enter a generation file to load".to_string());
            } else {
                commands.push(Command::NewRun {
                    from: Some(PathBuf::from(path)),
                });
            }
        }
        if std::mem::take(&mut self.save_requested) {
            commands.push(Command::RequestSave(None));
        }
        commands
    }
}

pub fn draw_ui(state: &mut UIState, arena: &Arena) {
    egui_macroquad::ui(|egui_ctx| {
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(egui::Color32::from_rgb(240, 240, 240));
        visuals.widgets.noninteractive.fg_stroke.color = egui::Color32::from_rgb(220, 220, 220);
        visuals.widgets.inactive.fg_stroke.color = egui::Color32::from_rgb(200, 200, 200);
        visuals.widgets.hovered.fg_stroke.color = egui::Color32::WHITE;
        visuals.widgets.active.fg_stroke.color = egui::Color32::WHITE;
        egui_ctx.set_visuals(visuals);

        super::stats::draw_stats_panel(egui_ctx, state, arena);
        state.keyboard_captured = egui_ctx.wants_keyboard_input();
    });
}

pub fn process_egui() {
    egui_macroquad::draw();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotkeys_set_requests() {
        let mut state = UIState::new();
        state.apply_hotkeys(true, true, false);

        let commands = state.take_commands();
        assert!(matches!(commands[0], Command::NewRun { from: None }));
        assert!(matches!(commands[1], Command::RequestSave(None)));
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn test_typing_in_load_field_does_not_trigger_hotkeys() {
        let mut state = UIState::new();
        state.keyboard_captured = true;
        state.load_path.push_str("runs/saved.txt");

        state.apply_hotkeys(true, true, true);

        assert!(state.take_commands().is_empty());
        assert!(state.status_message.is_none());
    }
}
