// stabilizer_sim/src/simulation/config/mod.rs

//! This module handles loading and validating scenario configuration from disk.

pub mod structs;

use std::path::Path;

use anyhow::{Context, Result};
use figment::{
    providers::{Format, Toml},
    Figment,
};
use tracing::info;

pub use structs::{RetuneConfig, ScenarioConfig, SensorConfig, Simulation, TrajectoryConfig};

/// Loads a scenario file. Sections missing from the file fall back to their defaults.
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig> {
    info!("Loading scenario from: {}", path.display());
    ensure_exists(path)?;

    let config: ScenarioConfig = Figment::new()
        .merge(Toml::file(path))
        .extract()
        .with_context(|| format!("Failed to load or parse scenario file at {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("Invalid scenario in {}", path.display()))?;
    info!("Successfully loaded scenario: '{}'", config.simulation.name);
    Ok(config)
}

/// Parses a scenario from an in-memory TOML string.
pub fn load_scenario_str(toml: &str) -> Result<ScenarioConfig> {
    let config: ScenarioConfig = Figment::new()
        .merge(Toml::string(toml))
        .extract()
        .context("Failed to parse scenario")?;
    config.validate()?;
    Ok(config)
}

// `Toml::file` silently yields nothing for a missing file; a typo should not run defaults.
fn ensure_exists(path: &Path) -> Result<()> {
    anyhow::ensure!(
        path.is_file(),
        "Could not find scenario file at '{}'",
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stabilizer_core::prelude::StabilizerMode;

    #[test]
    fn test_empty_scenario_uses_defaults() {
        let config = load_scenario_str("").unwrap();
        assert_eq!(config, ScenarioConfig::default());
        assert_eq!(config.stabilizer.mode, StabilizerMode::Point2D);
        assert_eq!(config.stabilizer.noise.cov_process, 0.0001);
    }

    #[test]
    fn test_full_scalar_scenario() {
        let config = load_scenario_str(
            r#"
            [simulation]
            name = "scalar"
            seed = 7
            steps = 50
            settle_steps = 5

            [stabilizer]
            mode = "scalar"
            initial_covariance = 1.0

            [stabilizer.noise]
            cov_process = 0.001
            cov_measure = 0.5

            [trajectory]
            kind = "linear"
            start = [0.0]
            velocity = [0.25]

            [sensor]
            noise_stddev = 0.5

            [retune]
            at_step = 25
            cov_process = 0.1
            cov_measure = 0.001
            "#,
        )
        .unwrap();

        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.stabilizer.mode, StabilizerMode::Scalar);
        assert_eq!(config.stabilizer.initial_covariance, Some(1.0));
        assert_eq!(config.stabilizer.noise.cov_measure, 0.5);
        assert_eq!(
            config.trajectory,
            TrajectoryConfig::Linear {
                start: vec![0.0],
                velocity: vec![0.25]
            }
        );
        assert_eq!(config.retune.unwrap().at_step, 25);
    }

    #[test]
    fn test_trajectory_must_match_mode() {
        let err = load_scenario_str(
            r#"
            [stabilizer]
            mode = "scalar"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("trajectory produces 2"));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(load_scenario_str("[simulation]\nduration = 3\n").is_err());
    }

    #[test]
    fn test_misspelled_noise_keys_are_rejected() {
        // Typos must not quietly fall back to the default noise.
        assert!(load_scenario_str("[stabilizer]\nmode = \"point2d\"\ncov_proces = 5.0\n").is_err());
        assert!(load_scenario_str("[stabilizer.noise]\ncov_mesure = 9.0\n").is_err());

        let config = load_scenario_str("[stabilizer.noise]\ncov_measure = 9.0\n").unwrap();
        assert_eq!(config.stabilizer.noise.cov_measure, 9.0);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_scenario(Path::new("does/not/exist.toml")).is_err());
    }
}
