#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use feeders::simulation::feeder::Feeder;
use feeders::simulation::food::Food;
use feeders::simulation::hazard::Hazard;
use feeders::simulation::locatable::{Locatable, touches};
use feeders::simulation::params::Params;
use feeders::simulation::spatial::SpatialIndex;
use ndarray::Array1;

fn point(x: f32, y: f32) -> Array1<f32> {
    Array1::from_vec(vec![x, y])
}

#[test]
fn test_food_locatable() {
    let mut food = Food::new(point(10.0, 20.0), 4.0);

    assert_eq!(food.pos()[0], 10.0);
    assert_eq!(food.pos()[1], 20.0);
    assert_eq!(food.radius(), 4.0);

    food.pos_mut()[0] = 15.0;
    assert_eq!(food.pos()[0], 15.0);
}

#[test]
fn test_feeder_and_hazard_locatable() {
    let params = Params::default();
    let mut feeder = Feeder::new(
        "Bajoxeq".to_string(),
        Array1::zeros(params.gene_len()),
        point(1.0, 2.0),
        0.0,
        &params,
    );
    assert_eq!(feeder.radius(), params.feeder_radius);
    feeder.pos_mut()[1] = 7.0;
    assert_eq!(feeder.pos, point(1.0, 7.0));

    let hazard = Hazard::new_static(point(3.0, 3.0), params.hazard_radius);
    assert_eq!(hazard.radius(), params.hazard_radius);
    assert_eq!(hazard.pos(), &point(3.0, 3.0));
}

#[test]
fn test_contact_is_strict() {
    let a = Food::new(point(0.0, 0.0), 4.0);
    let inside = Food::new(point(8.9, 0.0), 5.0);
    let exact = Food::new(point(9.0, 0.0), 5.0);

    assert!(touches(&a, &inside));
    assert!(touches(&inside, &a));
    assert!(!touches(&a, &exact));
}

#[test]
fn test_spatial_index_query_matches_brute_force() {
    let food: Vec<Food> = (0..100)
        .map(|i| Food::new(point((i % 10) as f32 * 10.0, (i / 10) as f32 * 10.0), 4.0))
        .collect();
    let index = SpatialIndex::build(&food).expect("Failed to build index");
    assert_eq!(index.len(), 100);

    let center = point(45.0, 45.0);
    let mut found = index.query(&center, 15.0);
    found.sort_unstable();

    let expected: Vec<usize> = food
        .iter()
        .enumerate()
        .filter(|(_, f)| {
            let dx = f.pos[0] - center[0];
            let dy = f.pos[1] - center[1];
            dx * dx + dy * dy <= 15.0 * 15.0
        })
        .map(|(i, _)| i)
        .collect();
    assert_eq!(found, expected);
}

#[test]
fn test_spatial_index_empty() {
    let food: Vec<Food> = Vec::new();
    let index = SpatialIndex::build(&food).expect("Failed to build index");

    assert!(index.is_empty());
    assert!(index.query(&point(0.0, 0.0), 50.0).is_empty());
}
