// stabilizer_sim/tests/scenario_runs.rs

use std::path::Path;

use stabilizer_sim::prelude::*;

fn linear_scenario(seed: u64) -> ScenarioConfig {
    load_scenario_str(&format!(
        r#"
        [simulation]
        name = "linear"
        seed = {seed}
        steps = 300
        settle_steps = 20

        [trajectory]
        kind = "linear"
        start = [0.0, 0.0]
        velocity = [1.0, 0.5]

        [sensor]
        noise_stddev = 2.0
        "#
    ))
    .unwrap()
}

#[test]
fn filtering_beats_raw_measurements_on_straight_line() {
    for seed in [0, 1, 2] {
        let config = linear_scenario(seed);
        let settle = config.simulation.settle_steps;
        let records = ScenarioRunner::new(config).unwrap().run().unwrap();
        let summary = summarize(&records, settle);

        assert_eq!(summary.cycles, 300);
        assert!(
            summary.filtered_rmse < 0.75 * summary.raw_rmse,
            "seed {seed}: filtered {} vs raw {}",
            summary.filtered_rmse,
            summary.raw_rmse
        );
    }
}

#[test]
fn same_seed_same_run() {
    let a = ScenarioRunner::new(linear_scenario(9)).unwrap().run().unwrap();
    let b = ScenarioRunner::new(linear_scenario(9)).unwrap().run().unwrap();
    assert_eq!(a, b);

    let c = ScenarioRunner::new(linear_scenario(10)).unwrap().run().unwrap();
    assert_ne!(a, c);
}

#[test]
fn retune_is_applied_mid_run() {
    let mut config = linear_scenario(3);
    config.simulation.steps = 20;
    config.simulation.settle_steps = 0;
    config.retune = Some(RetuneConfig {
        at_step: 10,
        cov_process: 0.1,
        cov_measure: 0.001,
    });

    let mut runner = ScenarioRunner::new(config).unwrap();
    for _ in 0..10 {
        runner.step().unwrap();
    }
    assert_eq!(runner.stabilizer().noise(), NoiseConfig::default());

    runner.step().unwrap();
    assert_eq!(runner.stabilizer().noise(), NoiseConfig::new(0.1, 0.001).unwrap());
    assert_eq!(runner.run().unwrap().len(), 9);
}

#[test]
fn records_carry_mode_shaped_vectors() {
    let config = load_scenario_str(
        r#"
        [simulation]
        steps = 5
        settle_steps = 0

        [stabilizer]
        mode = "scalar"

        [trajectory]
        kind = "constant"
        value = [5.0]
        "#,
    )
    .unwrap();

    let records = ScenarioRunner::new(config).unwrap().run().unwrap();
    assert_eq!(records.len(), 5);
    for record in &records {
        assert_eq!(record.measurement.len(), 1);
        assert_eq!(record.prediction.dim(), 2);
        assert_eq!(record.state.dim(), 2);
    }
}

#[test]
fn bundled_scenarios_load() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/scenarios");
    for name in ["point_circle.toml", "point_line.toml", "scalar_constant.toml"] {
        let config = load_scenario(&dir.join(name)).unwrap();
        assert!(ScenarioRunner::new(config).is_ok(), "{name}");
    }
}
