use std::sync::{Arc, Mutex};

use evotour::{
    EngineOptions, GenerationObserver, GeneticEngine, Location, TourError,
};

/// Four waypoints spaced one degree apart along the equator. The optimal
/// open path visits them in longitude order (in either direction).
fn equator_line(count: usize) -> Vec<Location> {
    (0..count)
        .map(|i| Location::new(format!("wp-{i}"), 0.0, i as f64))
        .collect()
}

fn small_options() -> EngineOptions {
    EngineOptions::builder()
        .population_size(200)
        .tournament_size(5)
        .generations(60)
        .mutation_rate(0.05)
        .crossover_rate(0.9)
        .elitism_count(4)
        .build()
        .unwrap()
}

fn is_permutation(genome: &[usize]) -> bool {
    let mut seen = vec![false; genome.len()];
    for &gene in genome {
        if gene >= genome.len() || seen[gene] {
            return false;
        }
        seen[gene] = true;
    }
    true
}

#[test]
fn test_run_returns_a_valid_tour() {
    let locations = equator_line(6);
    let mut engine = GeneticEngine::new(locations.clone(), small_options())
        .unwrap()
        .with_seed(1);
    let result = engine.run().unwrap();

    assert!(is_permutation(result.best.genome()));
    assert_eq!(result.tour.len(), locations.len());
    assert_eq!(result.total_distance_km, -result.best.fitness());

    // The tour lists the input locations in genome order.
    for (position, &index) in result.best.genome().iter().enumerate() {
        assert_eq!(result.tour[position], locations[index]);
    }
}

#[test]
fn test_run_finds_the_collinear_optimum() {
    let locations = equator_line(4);
    let mut engine = GeneticEngine::new(locations, small_options())
        .unwrap()
        .with_seed(99);
    let result = engine.run().unwrap();

    // Three one-degree hops along the equator.
    let degree_km = evotour::EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
    let optimal = 3.0 * degree_km;
    assert!(
        (result.total_distance_km - optimal).abs() < 1e-6,
        "expected {optimal} km, found {} km via {:?}",
        result.total_distance_km,
        result.best.genome()
    );
}

#[test]
fn test_identical_seeds_reproduce_the_run() {
    let locations = equator_line(7);

    let mut first = GeneticEngine::new(locations.clone(), small_options())
        .unwrap()
        .with_seed(1234);
    let mut second = GeneticEngine::new(locations, small_options())
        .unwrap()
        .with_seed(1234);

    let result_a = first.run().unwrap();
    let result_b = second.run().unwrap();

    assert_eq!(result_a.best.genome(), result_b.best.genome());
    assert_eq!(result_a.total_distance_km, result_b.total_distance_km);
}

#[test]
fn test_observer_sees_every_generation_with_elitist_monotonicity() {
    #[derive(Clone, Default)]
    struct Recording {
        calls: Arc<Mutex<Vec<(usize, f64)>>>,
    }

    impl GenerationObserver for Recording {
        fn on_generation(&mut self, generation: usize, best_fitness: f64) {
            self.calls.lock().unwrap().push((generation, best_fitness));
        }
    }

    let observer = Recording::default();
    let calls = Arc::clone(&observer.calls);

    let options = EngineOptions::builder()
        .population_size(60)
        .tournament_size(4)
        .generations(25)
        .mutation_rate(0.1)
        .crossover_rate(0.8)
        .elitism_count(2)
        .build()
        .unwrap();

    let mut engine = GeneticEngine::new(equator_line(5), options)
        .unwrap()
        .with_seed(5)
        .with_observer(Box::new(observer));
    engine.run().unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 25);
    for (expected, &(generation, _)) in calls.iter().enumerate() {
        assert_eq!(generation, expected);
    }
    // With elites carried over, the best fitness never degrades.
    for window in calls.windows(2) {
        assert!(window[1].1 >= window[0].1);
    }
}

#[test]
fn test_cache_stays_within_pair_bound() {
    let locations = equator_line(8);
    let mut engine = GeneticEngine::new(locations, small_options())
        .unwrap()
        .with_seed(3);
    engine.run().unwrap();

    assert!(engine.cached_pairs() > 0);
    assert!(engine.cached_pairs() <= 8 * 7 / 2);
}

#[test]
fn test_rejects_too_few_locations() {
    let result = GeneticEngine::new(vec![Location::new("only", 0.0, 0.0)], small_options());
    assert!(matches!(result, Err(TourError::Configuration(_))));

    let result = GeneticEngine::new(Vec::new(), small_options());
    assert!(matches!(result, Err(TourError::Configuration(_))));
}

#[test]
fn test_metric_error_aborts_the_run() {
    let mut engine = GeneticEngine::with_metric(
        equator_line(4),
        small_options(),
        Arc::new(|_: &Location, _: &Location| {
            Err(TourError::Distance("unreachable waypoint".to_string()))
        }),
    )
    .unwrap()
    .with_seed(2);

    let result = engine.run();
    match result {
        Err(TourError::Distance(message)) => assert_eq!(message, "unreachable waypoint"),
        other => panic!("expected Distance error, got {other:?}"),
    }
}

#[test]
fn test_non_finite_metric_is_a_fitness_error() {
    let mut engine = GeneticEngine::with_metric(
        equator_line(4),
        small_options(),
        Arc::new(|_: &Location, _: &Location| Ok(f64::NAN)),
    )
    .unwrap()
    .with_seed(2);

    let result = engine.run();
    assert!(matches!(result, Err(TourError::FitnessCalculation(_))));
}

#[test]
fn test_custom_metric_drives_the_result() {
    // A metric that makes the input order maximally expensive forces the
    // engine away from it.
    let mut engine = GeneticEngine::with_metric(
        equator_line(5),
        small_options(),
        Arc::new(|a: &Location, b: &Location| {
            let gap = (a.longitude - b.longitude).abs();
            // Adjacent-by-longitude hops cost the most.
            Ok(if gap <= 1.0 { 1000.0 } else { gap })
        }),
    )
    .unwrap()
    .with_seed(11);

    let result = engine.run().unwrap();
    assert!(
        result.total_distance_km < 1000.0,
        "engine kept an expensive hop: {:?} at {} km",
        result.best.genome(),
        result.total_distance_km
    );
}

#[test]
fn test_full_elitism_still_completes() {
    // elitism_count == population_size: every generation is a straight copy.
    let options = EngineOptions::builder()
        .population_size(30)
        .tournament_size(3)
        .generations(5)
        .mutation_rate(0.0)
        .crossover_rate(0.0)
        .elitism_count(30)
        .build()
        .unwrap();

    let mut engine = GeneticEngine::new(equator_line(4), options)
        .unwrap()
        .with_seed(8);
    let result = engine.run().unwrap();
    assert!(is_permutation(result.best.genome()));
}

#[test]
fn test_zero_rates_pass_selection_through() {
    let options = EngineOptions::builder()
        .population_size(40)
        .tournament_size(40)
        .generations(10)
        .mutation_rate(0.0)
        .crossover_rate(0.0)
        .elitism_count(0)
        .build()
        .unwrap();

    let mut engine = GeneticEngine::new(equator_line(5), options)
        .unwrap()
        .with_seed(13);
    let result = engine.run().unwrap();
    assert!(is_permutation(result.best.genome()));
}
