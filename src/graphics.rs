use std::f32::consts::TAU;

use feeders::simulation::arena::Arena;
use feeders::simulation::feeder::Feeder;
use feeders::simulation::params::Params;
use macroquad::prelude::*;
use ndarray::Array1;

trait ToScreen {
    type Output;
    fn to_screen(&self, params: &Params) -> Self::Output;
}

impl ToScreen for Array1<f32> {
    type Output = Array1<f32>;
    fn to_screen(&self, params: &Params) -> Array1<f32> {
        let scale_x = screen_width() / params.box_width;
        let scale_y = screen_height() / params.box_height;
        Array1::from_vec(vec![self[0] * scale_x, self[1] * scale_y])
    }
}

impl ToScreen for f32 {
    type Output = f32;
    fn to_screen(&self, params: &Params) -> f32 {
        let scale_x = screen_width() / params.box_width;
        let scale_y = screen_height() / params.box_height;
        self * scale_x.min(scale_y)
    }
}

pub fn draw_arena(arena: &Arena) {
    let params = arena.params();
    draw_hazards(arena, params);
    draw_food(arena, params);
    draw_feeders(arena, params);
}

fn draw_hazards(arena: &Arena, params: &Params) {
    arena.hazards().iter().for_each(|hazard| {
        let screen_pos = hazard.pos.to_screen(params);
        let color = if hazard.is_static() { DARKGRAY } else { BLACK };
        draw_circle(
            screen_pos[0],
            screen_pos[1],
            hazard.radius.to_screen(params),
            color,
        );
    });
}

fn draw_food(arena: &Arena, params: &Params) {
    arena.food().iter().for_each(|food| {
        let screen_pos = food.pos.to_screen(params);
        draw_circle(
            screen_pos[0],
            screen_pos[1],
            food.radius.to_screen(params),
            Color::from_rgba(40, 170, 60, 255),
        );
    });
}

fn draw_feeders(arena: &Arena, params: &Params) {
    arena
        .feeders()
        .iter()
        .filter(|feeder| feeder.alive)
        .for_each(|feeder| draw_feeder(feeder, params));
}

fn draw_feeder(feeder: &Feeder, params: &Params) {
    let screen_pos = feeder.pos.to_screen(params);
    let screen_radius = feeder.radius.to_screen(params);
    let color = Color::new(feeder.color[0], feeder.color[1], feeder.color[2], 1.0);

    // sensor readings, drawn as rays whose length is the proximity
    let channels = params.sensor_count;
    for (readings, range, ray_color) in [
        (&feeder.food_sensors, params.food_sensor_radius, GREEN),
        (&feeder.hazard_sensors, params.hazard_sensor_radius, RED),
    ] {
        for (i, &value) in readings.iter().enumerate() {
            if value <= 0.0 {
                continue;
            }
            let angle = feeder.orientation + i as f32 * TAU / channels as f32;
            let length = (value * range).to_screen(params);
            draw_line(
                screen_pos[0],
                screen_pos[1],
                screen_pos[0] + angle.cos() * length,
                screen_pos[1] + angle.sin() * length,
                1.0,
                ray_color,
            );
        }
    }

    draw_circle(screen_pos[0], screen_pos[1], screen_radius, color);
    draw_line(
        screen_pos[0],
        screen_pos[1],
        screen_pos[0] + feeder.orientation.cos() * screen_radius * 2.0,
        screen_pos[1] + feeder.orientation.sin() * screen_radius * 2.0,
        1.5,
        BLACK,
    );

    // energy bar
    let bar_width = 20.0;
    let bar_height = 2.0;
    let bar_x = screen_pos[0] - bar_width / 2.0;
    let bar_y = screen_pos[1] - screen_radius - bar_height - 2.0;
    draw_rectangle(
        bar_x,
        bar_y,
        bar_width,
        bar_height,
        Color::from_rgba(100, 100, 100, 200),
    );
    draw_rectangle(
        bar_x,
        bar_y,
        bar_width * (feeder.energy / params.max_energy).clamp(0.0, 1.0),
        bar_height,
        Color::from_rgba(255, 0, 0, 255),
    );

    let font_size = 9.0;
    let name_size = measure_text(&feeder.name, None, font_size as u16, 1.0);
    draw_text(
        &feeder.name,
        screen_pos[0] - name_size.width / 2.0,
        bar_y - 4.0,
        font_size,
        BLACK,
    );
}
