// stabilizer_sim/src/simulation/config/structs.rs

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use stabilizer_core::prelude::{StabilizerConfig, StabilizerMode};

// =========================================================================
// == Top-Level Configuration ==
// =========================================================================

/// # ScenarioConfig
/// The root of the data parsed from a `scenario.toml` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    #[serde(default)] // Use default if the [simulation] section is missing
    pub simulation: Simulation,

    #[serde(default)]
    pub stabilizer: StabilizerConfig,

    #[serde(default)]
    pub trajectory: TrajectoryConfig,

    #[serde(default)]
    pub sensor: SensorConfig,

    /// Optional mid-run change of the noise covariances.
    #[serde(default)]
    pub retune: Option<RetuneConfig>,
}

// =========================================================================
// == Configuration Sub-Structs ==
// These map directly to the sections in a scenario file.
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Simulation {
    #[serde(default = "default_name")]
    pub name: String,
    /// Seed for the sensor noise generator.
    #[serde(default)]
    pub seed: u64,
    /// Number of measurement cycles to run.
    #[serde(default = "default_steps")]
    pub steps: usize,
    /// Leading cycles left out of the error summary while the filter settles.
    #[serde(default = "default_settle_steps")]
    pub settle_steps: usize,
}

fn default_name() -> String {
    "unnamed".to_string()
}

fn default_steps() -> usize {
    300
}

fn default_settle_steps() -> usize {
    20
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            name: default_name(),
            seed: 0,
            steps: default_steps(),
            settle_steps: default_settle_steps(),
        }
    }
}

/// Ground-truth motion the simulated sensor observes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum TrajectoryConfig {
    /// Holds still at `value`.
    Constant { value: Vec<f64> },
    /// Moves from `start` by `velocity` every cycle.
    Linear { start: Vec<f64>, velocity: Vec<f64> },
    /// Orbits `center`, advancing `angular_rate` radians per cycle. Point mode only.
    Circle {
        center: [f64; 2],
        radius: f64,
        angular_rate: f64,
    },
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        // Roughly a pointer circling the middle of a 640x480 window.
        TrajectoryConfig::Circle {
            center: [320.0, 240.0],
            radius: 100.0,
            angular_rate: 0.05,
        }
    }
}

impl TrajectoryConfig {
    /// Number of components this trajectory produces per cycle.
    pub fn dim(&self) -> usize {
        match self {
            TrajectoryConfig::Constant { value } => value.len(),
            TrajectoryConfig::Linear { start, .. } => start.len(),
            TrajectoryConfig::Circle { .. } => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorConfig {
    /// Standard deviation of the zero-mean Gaussian noise added to every axis.
    pub noise_stddev: f64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self { noise_stddev: 2.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetuneConfig {
    /// The cycle before which the new noise scales are applied.
    pub at_step: usize,
    pub cov_process: f64,
    pub cov_measure: f64,
}

impl ScenarioConfig {
    /// Cross-section checks that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        self.stabilizer.validate()?;

        let measure_dim = self.stabilizer.mode.measure_dim();
        ensure!(
            self.trajectory.dim() == measure_dim,
            "trajectory produces {} component(s) but {} mode measures {}",
            self.trajectory.dim(),
            self.stabilizer.mode,
            measure_dim
        );
        if let TrajectoryConfig::Linear { start, velocity } = &self.trajectory {
            ensure!(
                start.len() == velocity.len(),
                "linear trajectory start and velocity lengths differ"
            );
        }
        if let TrajectoryConfig::Circle { .. } = self.trajectory {
            ensure!(
                self.stabilizer.mode == StabilizerMode::Point2D,
                "circle trajectories need point2d mode"
            );
        }
        ensure!(
            self.sensor.noise_stddev.is_finite() && self.sensor.noise_stddev >= 0.0,
            "sensor noise_stddev must be finite and non-negative"
        );
        ensure!(self.simulation.steps > 0, "simulation steps must be positive");
        ensure!(
            self.simulation.settle_steps < self.simulation.steps,
            "settle_steps must leave at least one cycle to summarize"
        );
        if let Some(retune) = &self.retune {
            ensure!(
                retune.at_step < self.simulation.steps,
                "retune at_step {} is past the last cycle",
                retune.at_step
            );
        }
        Ok(())
    }
}
