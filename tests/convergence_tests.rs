//! End-to-end convergence tests over synthetic datasets.

use fcm_core::engine::{FcmConfig, FcmEngine};
use fcm_core::error::FcmError;
use fcm_core::point::Point;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Two tight blobs around (0.2, 0.2) and (0.8, 0.8), 12 points each.
fn two_blobs() -> Vec<Point> {
    let offsets = [
        (-0.03, -0.02),
        (-0.02, 0.03),
        (-0.01, -0.01),
        (0.00, 0.02),
        (0.01, -0.03),
        (0.01, 0.01),
        (0.02, -0.02),
        (0.02, 0.03),
        (0.03, 0.00),
        (-0.03, 0.01),
        (0.00, -0.02),
        (0.03, -0.01),
    ];
    let mut points = Vec::with_capacity(24);
    for &(dx, dy) in &offsets {
        points.push(Point::new(0.2 + dx, 0.2 + dy));
    }
    for &(dx, dy) in &offsets {
        points.push(Point::new(0.8 + dx, 0.8 + dy));
    }
    points
}

/// Cluster index ordering is seed-dependent, so find the center closest to a
/// blob mean instead of assuming which index it got.
fn closest_center(centers: &[Point], target: Point) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (j, c) in centers.iter().enumerate() {
        let d = c.distance(&target);
        if d < best_distance {
            best_distance = d;
            best = j;
        }
    }
    best
}

#[test]
fn test_two_blobs_recover_their_means() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let config = FcmConfig::new(2).with_epsilon(1e-5).with_max_iterations(1000);
    let mut engine = FcmEngine::random(two_blobs(), config, &mut rng).unwrap();

    let result = engine.run().unwrap();
    assert!(result.max_delta < 1e-5);

    let low = closest_center(&result.centers, Point::new(0.2, 0.2));
    let high = closest_center(&result.centers, Point::new(0.8, 0.8));
    assert_ne!(low, high, "both centers converged to the same blob");

    assert!(result.centers[low].distance(&Point::new(0.2, 0.2)) < 0.05);
    assert!(result.centers[high].distance(&Point::new(0.8, 0.8)) < 0.05);

    // Every point in a blob should belong to that blob's cluster with a
    // dominant degree.
    for i in 0..12 {
        assert!(
            result.memberships.get(i, low) > 0.9,
            "low-blob point {} has membership {}",
            i,
            result.memberships.get(i, low)
        );
    }
    for i in 12..24 {
        assert!(
            result.memberships.get(i, high) > 0.9,
            "high-blob point {} has membership {}",
            i,
            result.memberships.get(i, high)
        );
    }
}

#[test]
fn test_rows_stay_stochastic_at_every_iteration_boundary() {
    let mut rng = ChaCha8Rng::seed_from_u64(21);
    let config = FcmConfig::new(3).with_epsilon(1e-6).with_max_iterations(200);
    let mut engine = FcmEngine::random(two_blobs(), config, &mut rng).unwrap();

    // Drive the loop by hand so the constraint is checked after every pass,
    // not just at the end.
    for _ in 0..50 {
        let max_delta = engine.step().unwrap();
        for i in 0..engine.points().len() {
            let sum = engine.memberships().row_sum(i);
            assert!(
                (sum - 1.0).abs() < 1e-9,
                "iteration {}: row {} sums to {}",
                engine.iterations(),
                i,
                sum
            );
            for &value in engine.memberships().row(i) {
                assert!(
                    (0.0..=1.0).contains(&value),
                    "iteration {}: row {} holds out-of-range membership {}",
                    engine.iterations(),
                    i,
                    value
                );
            }
        }
        if max_delta < 1e-6 {
            break;
        }
    }
}

#[test]
fn test_deltas_shrink_toward_convergence() {
    let mut rng = ChaCha8Rng::seed_from_u64(33);
    let config = FcmConfig::new(2).with_epsilon(1e-8).with_max_iterations(1000);
    let mut engine = FcmEngine::random(two_blobs(), config, &mut rng).unwrap();

    let first = engine.step().unwrap();
    let result = engine.run().unwrap();
    assert!(
        result.max_delta < first,
        "final delta {} not below first-pass delta {}",
        result.max_delta,
        first
    );
}

#[test]
fn test_same_seed_reproduces_the_full_run() {
    let config = FcmConfig::new(2).with_epsilon(1e-4).with_max_iterations(1000);

    let mut rng_a = ChaCha8Rng::seed_from_u64(99);
    let mut rng_b = ChaCha8Rng::seed_from_u64(99);
    let result_a = FcmEngine::random(two_blobs(), config, &mut rng_a)
        .unwrap()
        .run()
        .unwrap();
    let result_b = FcmEngine::random(two_blobs(), config, &mut rng_b)
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(result_a.iterations, result_b.iterations);
    assert_eq!(result_a.centers, result_b.centers);
    assert_eq!(result_a.memberships, result_b.memberships);
    assert_eq!(result_a.max_delta, result_b.max_delta);
}

#[test]
fn test_tiny_budget_reports_not_converged_with_progress() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let config = FcmConfig::new(2).with_epsilon(1e-12).with_max_iterations(2);
    let mut engine = FcmEngine::random(two_blobs(), config, &mut rng).unwrap();

    match engine.run() {
        Err(FcmError::NotConverged { iterations, max_delta }) => {
            assert_eq!(iterations, 2);
            assert!(max_delta.is_finite());
            assert!(max_delta >= 1e-12);
        }
        other => panic!("expected NotConverged, got {:?}", other),
    }
    // The engine keeps its state after the failed run and can continue.
    assert_eq!(engine.iterations(), 2);
    assert!(engine.step().is_ok());
}

#[test]
fn test_cancellation_leaves_engine_resumable() {
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let config = FcmConfig::new(2).with_epsilon(1e-9).with_max_iterations(1000);
    let mut engine = FcmEngine::random(two_blobs(), config, &mut rng).unwrap();

    let mut polls = 0;
    match engine.run_until(|| {
        polls += 1;
        polls > 3
    }) {
        Err(FcmError::Cancelled { iterations }) => assert_eq!(iterations, 3),
        other => panic!("expected Cancelled, got {:?}", other),
    }

    // Resuming from where the cancellation left off still converges.
    let result = engine.run_until(|| false).unwrap();
    assert!(result.iterations > 3);
    assert!(result.max_delta < 1e-9);
}

#[test]
fn test_reinitialize_gives_an_independent_second_run() {
    let mut rng = ChaCha8Rng::seed_from_u64(41);
    let config = FcmConfig::new(2).with_epsilon(1e-5).with_max_iterations(1000);
    let mut engine = FcmEngine::random(two_blobs(), config, &mut rng).unwrap();

    let first = engine.run().unwrap();
    engine.reinitialize(&mut rng).unwrap();
    assert_eq!(engine.iterations(), 0);
    let second = engine.run().unwrap();

    // Both runs on well-separated blobs land on the same pair of centers
    // regardless of which random matrix they started from.
    let first_low = closest_center(&first.centers, Point::new(0.2, 0.2));
    let second_low = closest_center(&second.centers, Point::new(0.2, 0.2));
    assert!(
        first.centers[first_low].distance(&second.centers[second_low]) < 0.01,
        "runs disagree on the low-blob center"
    );
}
