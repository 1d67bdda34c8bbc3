// stabilizer_core/src/stabilizer/mod.rs

//! Measurement-in / state-out smoothing on top of `LinearKalmanCore`.
//!
//! [`Stabilizer`] is the statically shaped version. [`PointStabilizer`] picks
//! its shape from a [`StabilizerMode`] at runtime, for callers driven by
//! configuration.

pub mod config;
pub mod typed;

use tracing::debug;

use crate::error::Result;
use crate::models::dynamics::constant_velocity::{ConstantVelocity1D, ConstantVelocity2D};
use crate::models::measurement::position::{PositionSensor1D, PositionSensor2D};
use crate::state::{find_idx, StateVariable};
use crate::types::StateVector;

pub use config::{NoiseConfig, StabilizerConfig, StabilizerMode};
pub use typed::{Phase, Point2DStabilizer, ScalarStabilizer, Stabilizer, StabilizerOutput};

/// A state vector tagged with the mode that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Estimate {
    Scalar(StateVector<2>),
    Point2D(StateVector<4>),
}

impl Estimate {
    pub fn mode(&self) -> StabilizerMode {
        match self {
            Estimate::Scalar(_) => StabilizerMode::Scalar,
            Estimate::Point2D(_) => StabilizerMode::Point2D,
        }
    }

    /// All components: positions first, then velocities.
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Estimate::Scalar(v) => v.as_slice(),
            Estimate::Point2D(v) => v.as_slice(),
        }
    }

    /// Length of the state vector (2 or 4).
    pub fn dim(&self) -> usize {
        self.as_slice().len()
    }

    pub fn position(&self) -> &[f64] {
        &self.as_slice()[..self.mode().measure_dim()]
    }

    pub fn velocity(&self) -> &[f64] {
        &self.as_slice()[self.mode().measure_dim()..]
    }

    pub fn get(&self, var: StateVariable) -> Option<f64> {
        find_idx(self.mode().layout(), var).map(|idx| self.as_slice()[idx])
    }
}

/// Prediction and corrected state of one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimates {
    pub prediction: Estimate,
    pub state: Estimate,
}

#[derive(Debug, Clone)]
enum Engine {
    Scalar(ScalarStabilizer),
    Point2D(Point2DStabilizer),
}

/// A Kalman point stabilizer whose mode is chosen at construction.
///
/// ```
/// use stabilizer_core::prelude::*;
///
/// let mut stabilizer = PointStabilizer::new(StabilizerMode::Point2D, 0.0001, 0.1).unwrap();
/// let out = stabilizer.update(&[10.0, 20.0]).unwrap();
/// assert_eq!(out.state.dim(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PointStabilizer {
    engine: Engine,
}

impl PointStabilizer {
    pub fn new(mode: StabilizerMode, cov_process: f64, cov_measure: f64) -> Result<Self> {
        Self::from_config(&StabilizerConfig::new(mode, cov_process, cov_measure))
    }

    /// Builds from a bare state count (2 or 4); anything else is `UnsupportedMode`.
    pub fn from_state_dim(state_dim: usize, cov_process: f64, cov_measure: f64) -> Result<Self> {
        Self::new(StabilizerMode::try_from(state_dim)?, cov_process, cov_measure)
    }

    pub fn from_config(config: &StabilizerConfig) -> Result<Self> {
        config.validate()?;

        let engine = match config.mode {
            StabilizerMode::Scalar => Engine::Scalar(Stabilizer::from_models(
                &ConstantVelocity1D,
                &PositionSensor1D,
                config.noise,
                config.initial_covariance,
            )?),
            StabilizerMode::Point2D => Engine::Point2D(Stabilizer::from_models(
                &ConstantVelocity2D,
                &PositionSensor2D,
                config.noise,
                config.initial_covariance,
            )?),
        };

        debug!(
            mode = %config.mode,
            cov_process = config.noise.cov_process,
            cov_measure = config.noise.cov_measure,
            "Built point stabilizer."
        );
        Ok(Self { engine })
    }

    pub fn mode(&self) -> StabilizerMode {
        match &self.engine {
            Engine::Scalar(_) => StabilizerMode::Scalar,
            Engine::Point2D(_) => StabilizerMode::Point2D,
        }
    }

    /// Runs one predict/correct cycle. `measurement` must have one component
    /// in scalar mode and two in point mode.
    pub fn update(&mut self, measurement: &[f64]) -> Result<Estimates> {
        match &mut self.engine {
            Engine::Scalar(s) => s.update_slice(measurement).map(|out| Estimates {
                prediction: Estimate::Scalar(out.prediction),
                state: Estimate::Scalar(out.state),
            }),
            Engine::Point2D(s) => s.update_slice(measurement).map(|out| Estimates {
                prediction: Estimate::Point2D(out.prediction),
                state: Estimate::Point2D(out.state),
            }),
        }
    }

    pub fn retune(&mut self, cov_process: f64, cov_measure: f64) -> Result<()> {
        match &mut self.engine {
            Engine::Scalar(s) => s.retune(cov_process, cov_measure),
            Engine::Point2D(s) => s.retune(cov_process, cov_measure),
        }
    }

    pub fn reset(&mut self) {
        match &mut self.engine {
            Engine::Scalar(s) => s.reset(),
            Engine::Point2D(s) => s.reset(),
        }
    }

    pub fn prediction(&self) -> Estimate {
        match &self.engine {
            Engine::Scalar(s) => Estimate::Scalar(*s.prediction()),
            Engine::Point2D(s) => Estimate::Point2D(*s.prediction()),
        }
    }

    pub fn state(&self) -> Estimate {
        match &self.engine {
            Engine::Scalar(s) => Estimate::Scalar(*s.state()),
            Engine::Point2D(s) => Estimate::Point2D(*s.state()),
        }
    }

    /// What each measurement component observes, in the order `update` expects.
    pub fn measurement_layout(&self) -> &'static [StateVariable] {
        match &self.engine {
            Engine::Scalar(s) => s.measurement_layout(),
            Engine::Point2D(s) => s.measurement_layout(),
        }
    }

    pub fn noise(&self) -> NoiseConfig {
        match &self.engine {
            Engine::Scalar(s) => s.noise(),
            Engine::Point2D(s) => s.noise(),
        }
    }

    pub fn phase(&self) -> Phase {
        match &self.engine {
            Engine::Scalar(s) => s.phase(),
            Engine::Point2D(s) => s.phase(),
        }
    }

    pub fn cycles(&self) -> u64 {
        match &self.engine {
            Engine::Scalar(s) => s.cycles(),
            Engine::Point2D(s) => s.cycles(),
        }
    }
}
