#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::f32::consts::{PI, TAU};

use feeders::simulation::feeder::{DeathCause, Feeder, SensorBank, channel_for_bearing};
use feeders::simulation::params::Params;
use ndarray::Array1;

fn create_test_params() -> Params {
    Params {
        sensor_count: 16,
        food_sensor_radius: 40.0,
        hazard_sensor_radius: 100.0,
        ..Params::default()
    }
}

fn feeder_at(x: f32, y: f32, orientation: f32, params: &Params) -> Feeder {
    Feeder::new(
        "Bajoxeq".to_string(),
        Array1::zeros(params.gene_len()),
        Array1::from_vec(vec![x, y]),
        orientation,
        params,
    )
}

fn point(x: f32, y: f32) -> Array1<f32> {
    Array1::from_vec(vec![x, y])
}

#[test]
fn test_new_feeder_initial_state() {
    let params = create_test_params();
    let feeder = feeder_at(100.0, 100.0, 0.0, &params);

    assert!(feeder.alive);
    assert_eq!(feeder.energy, params.initial_energy);
    assert_eq!(feeder.speed, params.initial_speed);
    assert_eq!(feeder.turn_rate, 0.0);
    assert_eq!(feeder.age, 0.0);
    assert_eq!(feeder.death_cause, DeathCause::None);
    assert_eq!(feeder.food_sensors.len(), params.sensor_count);
    assert_eq!(feeder.hazard_sensors.len(), params.sensor_count);
    assert_eq!(feeder.genes().len(), 4 * params.sensor_count);
}

#[test]
#[should_panic(expected = "gene vector")]
fn test_wrong_gene_length_is_rejected() {
    let params = create_test_params();
    let _ = Feeder::new(
        "Bajoxeq".to_string(),
        Array1::zeros(3),
        point(0.0, 0.0),
        0.0,
        &params,
    );
}

#[test]
fn test_detect_at_zero_distance_gives_full_proximity() {
    let params = create_test_params();
    let mut feeder = feeder_at(50.0, 50.0, 0.0, &params);

    feeder.detect(&point(50.0, 50.0), SensorBank::Food, &params);

    assert_eq!(feeder.food_sensors[0], 1.0);
    assert_eq!(feeder.hazard_sensors.sum(), 0.0);
}

#[test]
fn test_detect_at_exact_radius_reads_zero() {
    let params = create_test_params();
    let mut feeder = feeder_at(0.0, 0.0, 0.0, &params);

    feeder.detect(&point(40.0, 0.0), SensorBank::Food, &params);
    assert_eq!(feeder.food_sensors.sum(), 0.0);

    feeder.detect(&point(40.5, 0.0), SensorBank::Food, &params);
    assert_eq!(feeder.food_sensors.sum(), 0.0);
}

#[test]
fn test_hazard_bank_has_longer_range() {
    let params = create_test_params();
    let mut feeder = feeder_at(0.0, 0.0, 0.0, &params);

    feeder.detect(&point(50.0, 0.0), SensorBank::Food, &params);
    feeder.detect(&point(50.0, 0.0), SensorBank::Hazard, &params);

    assert_eq!(feeder.food_sensors.sum(), 0.0);
    assert!((feeder.hazard_sensors[0] - 0.5).abs() < 1e-6);
}

#[test]
fn test_detect_keeps_nearest_per_channel() {
    let params = create_test_params();
    let mut feeder = feeder_at(0.0, 0.0, 0.0, &params);

    feeder.detect(&point(30.0, 0.0), SensorBank::Food, &params);
    feeder.detect(&point(10.0, 0.0), SensorBank::Food, &params);
    feeder.detect(&point(20.0, 0.0), SensorBank::Food, &params);

    assert!((feeder.food_sensors[0] - 0.75).abs() < 1e-6);
    assert_eq!(feeder.food_sensors.sum(), feeder.food_sensors[0]);
}

#[test]
fn test_detect_uses_bearing_relative_to_orientation() {
    let params = create_test_params();

    // straight ahead of a feeder facing +y
    let mut facing_up = feeder_at(0.0, 0.0, PI / 2.0, &params);
    facing_up.detect(&point(0.0, 10.0), SensorBank::Food, &params);
    assert!(facing_up.food_sensors[0] > 0.0);

    // a quarter turn to the left of a feeder facing +x
    let mut facing_right = feeder_at(0.0, 0.0, 0.0, &params);
    facing_right.detect(&point(0.0, 10.0), SensorBank::Food, &params);
    assert!(facing_right.food_sensors[4] > 0.0);
    assert_eq!(facing_right.food_sensors[0], 0.0);
}

#[test]
fn test_channel_mapping() {
    assert_eq!(channel_for_bearing(0.0, 16), 0);
    assert_eq!(channel_for_bearing(PI / 2.0, 16), 4);
    assert_eq!(channel_for_bearing(PI, 16), 8);
    assert_eq!(channel_for_bearing(-PI / 2.0, 16), 12);
    assert_eq!(channel_for_bearing(TAU - 0.01, 16), 0);
    assert_eq!(channel_for_bearing(3.0 * TAU + PI / 2.0, 16), 4);
}

#[test]
fn test_channel_mapping_rounds_halfway_up() {
    assert_eq!(channel_for_bearing(PI / 16.0, 16), 1);
    assert_eq!(channel_for_bearing(PI / 4.0, 4), 1);
}

#[test]
fn test_channel_mapping_is_deterministic() {
    for i in 0..1000 {
        let bearing = i as f32 * 0.0137 - 7.0;
        let first = channel_for_bearing(bearing, 16);
        assert_eq!(first, channel_for_bearing(bearing, 16));
        assert!(first < 16);
    }
}

#[test]
fn test_clear_sensors() {
    let params = create_test_params();
    let mut feeder = feeder_at(0.0, 0.0, 0.0, &params);
    feeder.detect(&point(5.0, 0.0), SensorBank::Food, &params);
    feeder.detect(&point(5.0, 0.0), SensorBank::Hazard, &params);

    feeder.clear_sensors();

    assert_eq!(feeder.food_sensors.sum(), 0.0);
    assert_eq!(feeder.hazard_sensors.sum(), 0.0);
}

#[test]
fn test_motion_update_adds_weighted_readings() {
    let params = create_test_params();
    let n = params.sensor_count;
    let mut genes = Array1::zeros(params.gene_len());
    genes[0] = 2.0; // food -> speed, channel 0
    genes[n + 3] = -1.0; // hazard -> speed, channel 3
    genes[2 * n] = 0.05; // food -> turn, channel 0
    let mut feeder = Feeder::new(
        "Bajoxeq".to_string(),
        genes,
        point(0.0, 0.0),
        0.0,
        &params,
    );
    feeder.food_sensors[0] = 1.0;
    feeder.hazard_sensors[3] = 0.5;

    feeder.update_motion_from_sensors(&params);

    assert!((feeder.speed - (params.initial_speed + 2.0 - 0.5)).abs() < 1e-5);
    assert!((feeder.turn_rate - 0.05).abs() < 1e-6);
}

#[test]
fn test_motion_update_clamps() {
    let params = create_test_params();
    let mut feeder = Feeder::new(
        "Bajoxeq".to_string(),
        Array1::from_elem(params.gene_len(), 100.0),
        point(0.0, 0.0),
        0.0,
        &params,
    );
    feeder.food_sensors.fill(1.0);

    feeder.update_motion_from_sensors(&params);
    assert_eq!(feeder.speed, params.max_speed);
    assert_eq!(feeder.turn_rate, params.max_turn);

    let mut reverse = Feeder::new(
        "Bajoxeq".to_string(),
        Array1::from_elem(params.gene_len(), -100.0),
        point(0.0, 0.0),
        0.0,
        &params,
    );
    reverse.hazard_sensors.fill(1.0);

    reverse.update_motion_from_sensors(&params);
    assert_eq!(reverse.speed, -params.max_speed);
    assert_eq!(reverse.turn_rate, -params.max_turn);
}

#[test]
fn test_step_moves_along_heading_and_drains_energy() {
    let params = create_test_params();
    let mut feeder = feeder_at(100.0, 100.0, 0.0, &params);

    feeder.step(1.0, &params);

    assert!((feeder.pos[0] - (100.0 + params.initial_speed)).abs() < 1e-4);
    assert!((feeder.pos[1] - 100.0).abs() < 1e-4);
    assert_eq!(feeder.energy, params.initial_energy - params.consumption_rate);
    assert_eq!(feeder.age, 1.0);
}

#[test]
fn test_step_keeps_orientation_wrapped() {
    let params = create_test_params();
    let mut feeder = feeder_at(0.0, 0.0, 3.1, &params);
    feeder.turn_rate = params.max_turn;

    feeder.step(1.0, &params);

    assert!(feeder.orientation > -PI && feeder.orientation <= PI);
    assert!((feeder.orientation - (3.1 + params.max_turn - TAU)).abs() < 1e-5);
}

#[test]
fn test_starvation_stops_the_feeder() {
    let params = create_test_params();
    let mut feeder = feeder_at(10.0, 10.0, 0.0, &params);
    feeder.energy = 1.0;

    feeder.step(0.5, &params);

    assert!(!feeder.alive);
    assert_eq!(feeder.death_cause, DeathCause::Starved);
    assert_eq!(feeder.energy, 0.0);
    assert_eq!(feeder.age, 0.0);
    assert_eq!(feeder.pos[0], 10.0);
}

#[test]
fn test_energy_reaching_exactly_zero_is_not_starvation() {
    let params = create_test_params();
    let mut feeder = feeder_at(10.0, 10.0, 0.0, &params);
    feeder.energy = 2.0;

    feeder.step(0.5, &params);

    assert!(feeder.alive);
    assert_eq!(feeder.energy, 0.0);
}

#[test]
fn test_gain_energy_is_capped() {
    let params = create_test_params();
    let mut feeder = feeder_at(0.0, 0.0, 0.0, &params);
    feeder.energy = 95.0;

    feeder.gain_energy(params.food_energy, params.max_energy);

    assert_eq!(feeder.energy, params.max_energy);
}

#[test]
fn test_fitness() {
    let params = create_test_params();
    let mut survivor = feeder_at(0.0, 0.0, 0.0, &params);
    survivor.energy = 20.0;
    survivor.age = 60.0;
    survivor.die(DeathCause::TimeExpired);
    assert_eq!(survivor.fitness(60.0), 120.0);

    let mut starved = feeder_at(0.0, 0.0, 0.0, &params);
    starved.age = 15.0;
    starved.energy = 0.0;
    starved.die(DeathCause::Starved);
    assert_eq!(starved.fitness(60.0), 25.0);

    let mut crashed = feeder_at(0.0, 0.0, 0.0, &params);
    crashed.age = 30.0;
    crashed.die(DeathCause::HazardCollision);
    assert_eq!(crashed.fitness(60.0), 50.0);
}

#[test]
fn test_death_codes() {
    assert_eq!(DeathCause::Starved.code(), "E");
    assert_eq!(DeathCause::HazardCollision.code(), "O");
    assert_eq!(DeathCause::TimeExpired.code(), "T");
    assert_eq!(DeathCause::None.code(), "");
}
