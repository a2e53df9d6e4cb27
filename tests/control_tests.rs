#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use feeders::simulation::arena::{Arena, TickOutcome};
use feeders::simulation::control::{Command, Controller};
use feeders::simulation::params::{EvolutionParams, Params};

fn create_test_params() -> Params {
    Params {
        population_size: 6,
        food_count: 40,
        moving_hazard_count: 4,
        consumption_rate: 8.0,
        seed: 21,
        evolution: EvolutionParams {
            elite_count: 2,
            offspring_count: 2,
            mutant_count: 1,
            breeding_pool: 4,
            ..EvolutionParams::default()
        },
        ..Params::default()
    }
}

fn controller() -> Controller {
    Controller::new(Arena::new(create_test_params()).expect("valid params"))
}

#[test]
fn test_run_generations() {
    let mut controller = controller();

    let summaries = controller.run_generations(0.25, 3);

    assert_eq!(summaries.len(), 3);
    for (i, summary) in summaries.iter().enumerate() {
        assert_eq!(summary.record.generation as usize, i);
        assert!(summary.record.best >= summary.record.mean);
        let deaths = summary.deaths;
        assert_eq!(deaths.starved + deaths.hazard + deaths.time_expired, 6);
    }
    assert_eq!(controller.arena().generation(), 3);
    assert_eq!(controller.arena().history().len(), 3);
}

#[test]
fn test_non_positive_time_step_does_nothing() {
    let mut controller = controller();

    assert!(controller.run_generations(0.0, 2).is_empty());
    assert!(controller.run_generations(-1.0, 2).is_empty());
    assert_eq!(controller.arena().cycle_time(), 0.0);
}

#[test]
fn test_quit_stops_advancing() {
    let mut controller = controller();
    assert!(matches!(
        controller.advance(0.1),
        Some(TickOutcome::Running { .. })
    ));

    controller.apply(Command::Quit).expect("quit never fails");

    assert!(controller.is_quit_requested());
    assert!(controller.advance(0.1).is_none());
    assert!(controller.run_generations(0.1, 1).is_empty());
}

#[test]
fn test_new_run_command() {
    let mut controller = controller();
    controller.run_generations(0.25, 2);

    controller
        .apply(Command::NewRun { from: None })
        .expect("new run never fails");

    assert_eq!(controller.arena().generation(), 0);
    assert!(controller.arena().history().is_empty());
    assert_eq!(controller.arena().live_count(), 6);
}

#[test]
fn test_save_command_writes_at_generation_end() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("gen.txt");
    let mut controller = controller();

    controller
        .apply(Command::RequestSave(Some(path.clone())))
        .expect("requesting a save never fails");
    assert!(controller.arena().save_pending());
    assert!(!path.exists());

    let summaries = controller.run_generations(0.25, 1);

    assert!(path.exists());
    assert!(matches!(&summaries[0].saved, Some(Ok(saved)) if *saved == path));

    let later = controller.run_generations(0.25, 1);
    assert!(later[0].saved.is_none());
}

#[test]
fn test_failed_load_keeps_running() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut controller = controller();
    controller.run_generations(0.25, 1);
    let generation = controller.arena().generation();

    let result = controller.apply(Command::NewRun {
        from: Some(dir.path().join("missing.txt")),
    });

    assert!(result.is_err());
    assert_eq!(controller.arena().generation(), generation);
    assert!(controller.advance(0.25).is_some());
}
