// stabilizer_core/tests/stabilizer_properties.rs

use approx::assert_abs_diff_eq;
use stabilizer_core::prelude::*;

const DEFAULT_Q: f64 = 0.0001;
const DEFAULT_R: f64 = 0.1;

fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

#[test]
fn predict_from_zero_state_is_zero_in_every_mode() {
    for mode in [StabilizerMode::Scalar, StabilizerMode::Point2D] {
        let mut stabilizer = PointStabilizer::new(mode, DEFAULT_Q, DEFAULT_R).unwrap();
        let measurement = vec![1.0; mode.measure_dim()];
        let out = stabilizer.update(&measurement).unwrap();
        assert!(out.prediction.as_slice().iter().all(|v| *v == 0.0));
    }

    let mut kf = LinearKalmanCore::new(
        ConstantVelocity1D.transition_matrix(),
        PositionSensor1D.measurement_matrix(),
        CovarianceMatrix::<2>::identity() * DEFAULT_Q,
        CovarianceMatrix::<1>::identity() * DEFAULT_R,
    )
    .unwrap();
    assert_eq!(kf.predict(), StateVector::<2>::zeros());
}

#[test]
fn constant_measurement_is_approached_monotonically_then_reached() {
    let target = [5.0, -3.0];
    let mut stabilizer = PointStabilizer::new(StabilizerMode::Point2D, DEFAULT_Q, DEFAULT_R).unwrap();

    let mut previous = distance(&[0.0, 0.0], &target);
    for _ in 0..10 {
        let out = stabilizer.update(&target).unwrap();
        let current = distance(out.state.position(), &target);
        assert!(
            current < previous,
            "distance grew from {previous} to {current} during the initial approach"
        );
        previous = current;
    }

    for _ in 0..290 {
        stabilizer.update(&target).unwrap();
    }
    let state = stabilizer.state();
    assert_abs_diff_eq!(state.position()[0], 5.0, epsilon = 1e-6);
    assert_abs_diff_eq!(state.position()[1], -3.0, epsilon = 1e-6);
    assert_abs_diff_eq!(state.velocity()[0], 0.0, epsilon = 1e-6);
}

#[test]
fn constant_measurement_converges_for_other_tunings() {
    for (q, r) in [(0.01, 0.1), (0.1, 0.001), (1.0, 1.0)] {
        let mut stabilizer = ScalarStabilizer::new(NoiseConfig::new(q, r).unwrap()).unwrap();
        for _ in 0..500 {
            stabilizer.update_slice(&[5.0]).unwrap();
        }
        assert_abs_diff_eq!(stabilizer.position()[0], 5.0, epsilon = 1e-6);
    }
}

#[test]
fn retune_with_current_noise_changes_nothing() {
    let measurements = [[1.0, 2.0], [1.5, 2.5], [3.0, 2.0], [4.0, 1.0], [4.5, 0.0]];

    let mut plain = PointStabilizer::new(StabilizerMode::Point2D, DEFAULT_Q, DEFAULT_R).unwrap();
    let mut retuned = PointStabilizer::new(StabilizerMode::Point2D, DEFAULT_Q, DEFAULT_R).unwrap();

    for (i, z) in measurements.iter().enumerate() {
        if i == 2 {
            retuned.retune(DEFAULT_Q, DEFAULT_R).unwrap();
        }
        assert_eq!(plain.update(z).unwrap(), retuned.update(z).unwrap());
    }
}

#[test]
fn retune_takes_effect_on_following_cycles_only() {
    let mut a = ScalarStabilizer::new(NoiseConfig::default()).unwrap();
    let mut b = ScalarStabilizer::new(NoiseConfig::default()).unwrap();
    a.update_slice(&[1.0]).unwrap();
    b.update_slice(&[1.0]).unwrap();

    b.retune(0.1, 0.001).unwrap();
    assert_eq!(a.state(), b.state());

    let out_a = a.update_slice(&[2.0]).unwrap();
    let out_b = b.update_slice(&[2.0]).unwrap();
    // Much lower measurement noise pulls the estimate much closer to the measurement.
    assert!((2.0 - out_b.state[0]).abs() < (2.0 - out_a.state[0]).abs());
}

#[test]
fn output_dimensions_follow_the_mode() {
    let mut scalar = PointStabilizer::from_state_dim(2, DEFAULT_Q, DEFAULT_R).unwrap();
    let out = scalar.update(&[3.0]).unwrap();
    assert_eq!(out.prediction.dim(), 2);
    assert_eq!(out.state.dim(), 2);

    let mut point = PointStabilizer::from_state_dim(4, DEFAULT_Q, DEFAULT_R).unwrap();
    let out = point.update(&[3.0, 4.0]).unwrap();
    assert_eq!(out.prediction.dim(), 4);
    assert_eq!(out.state.dim(), 4);
}

#[test]
fn wrong_measurement_arity_is_rejected() {
    let mut scalar = PointStabilizer::new(StabilizerMode::Scalar, DEFAULT_Q, DEFAULT_R).unwrap();
    assert!(matches!(
        scalar.update(&[1.0, 2.0]),
        Err(StabilizerError::InvalidArgument(_))
    ));

    let mut point = PointStabilizer::new(StabilizerMode::Point2D, DEFAULT_Q, DEFAULT_R).unwrap();
    assert!(matches!(
        point.update(&[1.0]),
        Err(StabilizerError::InvalidArgument(_))
    ));
    assert_eq!(point.phase(), Phase::Constructed);
}

#[test]
fn only_two_and_four_states_are_supported() {
    for state_dim in [0, 1, 3, 5, 6, 8] {
        assert!(matches!(
            PointStabilizer::from_state_dim(state_dim, DEFAULT_Q, DEFAULT_R),
            Err(StabilizerError::UnsupportedMode { .. })
        ));
    }
}

#[test]
fn scenario_scalar_prediction_stays_between_first_estimate_and_target() {
    let mut stabilizer = PointStabilizer::new(StabilizerMode::Scalar, 0.0001, 0.1).unwrap();

    let first = stabilizer.update(&[5.0]).unwrap();
    stabilizer.update(&[5.0]).unwrap();
    let third = stabilizer.update(&[5.0]).unwrap();

    let first_position = first.state.position()[0];
    let predicted = third.prediction.position()[0];
    assert!(first_position < predicted && predicted < 5.0);
}

#[test]
fn scenario_point_correction_is_closer_than_prediction() {
    let config = StabilizerConfig::default();
    let mut stabilizer = PointStabilizer::from_config(&config).unwrap();
    let z = [10.0, 20.0];

    let out = stabilizer.update(&z).unwrap();

    assert!(distance(out.state.position(), &z) < distance(out.prediction.position(), &z));
}

#[test]
fn scenario_point_infers_motion() {
    let mut stabilizer = PointStabilizer::from_config(&StabilizerConfig::default()).unwrap();

    stabilizer.update(&[0.0, 0.0]).unwrap();
    stabilizer.update(&[10.0, 0.0]).unwrap();
    let out = stabilizer.update(&[20.0, 0.0]).unwrap();

    assert!(out.state.get(StateVariable::Vx).unwrap() > 0.0);
}

#[test]
fn ramp_velocity_is_recovered() {
    let mut stabilizer = Point2DStabilizer::new(NoiseConfig::default()).unwrap();
    for i in 0..200 {
        let t = i as f64;
        stabilizer.update_slice(&[t, 0.5 * t]).unwrap();
    }
    assert_abs_diff_eq!(stabilizer.velocity()[0], 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(stabilizer.velocity()[1], 0.5, epsilon = 1e-6);
}

#[test]
fn independent_instances_can_run_on_separate_threads() {
    fn run(offset: f64) -> Estimate {
        let mut stabilizer =
            PointStabilizer::new(StabilizerMode::Point2D, DEFAULT_Q, DEFAULT_R).unwrap();
        for i in 0..50 {
            stabilizer.update(&[offset + i as f64, offset]).unwrap();
        }
        stabilizer.state()
    }

    let (a, b) = std::thread::scope(|scope| {
        let a = scope.spawn(|| run(0.0));
        let b = scope.spawn(|| run(100.0));
        (a.join().unwrap(), b.join().unwrap())
    });

    assert_eq!(a, run(0.0));
    assert_eq!(b, run(100.0));
}
