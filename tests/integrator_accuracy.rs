//! Accuracy and reproducibility tests for the N-body integrator
//!
//! Exercises the public library API only: scenarios are built the same way
//! the binary builds them and stepped directly, without a bevy app.

use orrery::NBodySystem;
use orrery::config::{PhysicsConfig, ScenarioConfig, ScenarioKind};
use orrery::physics::math::{HISTORY_CAPACITY, Scalar, Vector};
use orrery::scenario;

fn circular_orbit() -> NBodySystem {
    scenario::circular_orbit(1.0).into_system().unwrap()
}

fn three_body() -> NBodySystem {
    scenario::three_body().into_system().unwrap()
}

fn relative_drift(initial: Scalar, current: Scalar) -> Scalar {
    ((current - initial) / initial).abs()
}

#[test]
fn test_circular_orbit_energy_stays_bounded() {
    let mut system = circular_orbit();
    let initial_energy = system.total_energy();
    assert!(initial_energy < 0.0, "orbit should be bound");

    let mut max_drift = 0.0_f64;
    for step in 1..=10_000 {
        system.step();
        if step % 100 == 0 {
            max_drift = max_drift.max(relative_drift(initial_energy, system.total_energy()));
        }
    }

    assert!(
        max_drift < 0.05,
        "Energy drift too large: {:.3}%",
        max_drift * 100.0
    );
    assert!((system.sim_time() - 100.0).abs() < 1e-9);
}

#[test]
fn test_momentum_is_conserved() {
    let mut system = three_body();
    let initial_momentum = system.total_momentum();

    for _ in 0..5_000 {
        system.step();
    }

    assert!(
        (system.total_momentum() - initial_momentum).length() < 1e-9,
        "momentum changed from {initial_momentum} to {}",
        system.total_momentum()
    );
}

#[test]
fn test_history_window_tracks_last_fifty_states() {
    let mut system = three_body();
    let mut reference = three_body();
    let steps = 120;

    for _ in 0..steps {
        system.step();
    }
    // Oldest retained snapshot is the state after `steps - capacity + 1` steps
    for _ in 0..(steps - HISTORY_CAPACITY + 1) {
        reference.step();
    }

    assert_eq!(system.history().len(), HISTORY_CAPACITY);
    assert_eq!(system.history().oldest(), reference.positions());
    assert_eq!(system.history().latest(), system.positions());
}

#[test]
fn test_trail_is_bounded_per_body() {
    let mut system = three_body();
    for _ in 0..75 {
        system.step();
    }

    for body in 0..system.body_count() {
        let trail: Vec<Vector> = system.trail(body).collect();
        assert_eq!(trail.len(), HISTORY_CAPACITY);
        assert_eq!(trail.last(), Some(&system.positions()[body]));
    }
}

#[test]
fn test_reset_reproduces_the_trajectory() {
    let mut system = three_body();
    for _ in 0..200 {
        system.step();
    }
    let first_run = system.positions().to_vec();

    system.reset();
    assert_eq!(system.step_count(), 0);
    assert_eq!(system.sim_time(), 0.0);
    assert_eq!(system.history().len(), 1);

    for _ in 0..200 {
        system.step();
    }

    assert_eq!(system.positions(), first_run.as_slice());
}

#[test]
fn test_seeded_random_scenario_is_reproducible() {
    let scenario = ScenarioConfig {
        kind: ScenarioKind::Random,
        body_count: 25,
        seed: Some(2024),
        ..Default::default()
    };
    let physics = PhysicsConfig::default();

    let mut first = scenario::build(&scenario, &physics).unwrap();
    let mut second = scenario::build(&scenario, &physics).unwrap();

    for _ in 0..100 {
        first.step();
        second.step();
    }

    assert_eq!(first.positions(), second.positions());
    assert_eq!(first.velocities(), second.velocities());
    assert_eq!(first.total_energy(), second.total_energy());
}

#[test]
fn test_time_scale_zero_freezes_motion() {
    let mut system = three_body().with_time_scale(0.0);
    let start = system.positions().to_vec();

    for _ in 0..10 {
        system.step();
    }

    assert_eq!(system.positions(), start.as_slice());
    assert_eq!(system.step_count(), 10);
    assert_eq!(system.sim_time(), 0.0);
}

#[test]
fn test_stronger_gravity_pulls_harder() {
    let weak = three_body();
    let strong = three_body().with_gravitational_constant(2.0);

    let weak_acc = weak.compute_acceleration(weak.positions());
    let strong_acc = strong.compute_acceleration(strong.positions());

    for (w, s) in weak_acc.iter().zip(&strong_acc) {
        assert!((*s - *w * 2.0).length() < 1e-12);
    }
}
