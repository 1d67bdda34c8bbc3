// stabilizer_core/src/stabilizer/typed.rs

use tracing::debug;

use crate::error::{Result, StabilizerError};
use crate::estimation::filters::LinearKalmanCore;
use crate::models::dynamics::constant_velocity::{ConstantVelocity1D, ConstantVelocity2D};
use crate::models::dynamics::LinearDynamics;
use crate::models::measurement::position::{PositionSensor1D, PositionSensor2D};
use crate::models::measurement::LinearMeasurement;
use crate::stabilizer::config::NoiseConfig;
use crate::state::StateVariable;
use crate::types::{CovarianceMatrix, MeasurementVector, StateVector};

/// The two operational states of a stabilizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Matrices fixed, state still zero.
    Constructed,
    /// At least one update has been fused.
    Running,
}

/// Result of one `update` cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilizerOutput<const N: usize> {
    /// The one-step-ahead prediction made before the measurement was seen.
    pub prediction: StateVector<N>,
    /// The estimate after fusing the measurement.
    pub state: StateVector<N>,
}

/// A Kalman stabilizer whose shape is fixed at compile time.
///
/// Feed it one measurement per frame with [`Stabilizer::update`]; read back
/// the prediction and the corrected state.
#[derive(Debug, Clone)]
pub struct Stabilizer<const N: usize, const M: usize> {
    filter: LinearKalmanCore<N, M>,
    layout: &'static [StateVariable],
    measurement_layout: &'static [StateVariable],
    noise: NoiseConfig,
    prediction: StateVector<N>,
    measurement: MeasurementVector<M>,
    cycles: u64,
}

/// Smooths a single value: state `[p, v]`, measurement `[p]`.
pub type ScalarStabilizer = Stabilizer<2, 1>;
/// Smooths a 2-D point: state `[x, y, vx, vy]`, measurement `[x, y]`.
pub type Point2DStabilizer = Stabilizer<4, 2>;

impl<const N: usize, const M: usize> Stabilizer<N, M> {
    /// Builds a stabilizer from a motion model and a sensor model.
    pub fn from_models<D, S>(
        dynamics: &D,
        sensor: &S,
        noise: NoiseConfig,
        initial_covariance: Option<f64>,
    ) -> Result<Self>
    where
        D: LinearDynamics<N>,
        S: LinearMeasurement<N, M>,
    {
        noise.validate()?;

        let mut filter = LinearKalmanCore::new(
            dynamics.transition_matrix(),
            sensor.measurement_matrix(),
            CovarianceMatrix::<N>::identity() * noise.cov_process,
            CovarianceMatrix::<M>::identity() * noise.cov_measure,
        )?;
        if let Some(p0) = initial_covariance {
            filter = filter.with_initial_covariance(CovarianceMatrix::<N>::identity() * p0)?;
        }

        Ok(Self {
            filter,
            layout: dynamics.get_state_layout(),
            measurement_layout: sensor.get_measurement_layout(),
            noise,
            prediction: StateVector::<N>::zeros(),
            measurement: MeasurementVector::<M>::zeros(),
            cycles: 0,
        })
    }

    /// Runs one predict/correct cycle against a new measurement.
    pub fn update(&mut self, measurement: &MeasurementVector<M>) -> Result<StabilizerOutput<N>> {
        if measurement.iter().any(|v| !v.is_finite()) {
            return Err(StabilizerError::InvalidArgument(format!(
                "measurement must be finite, got {:?}",
                measurement.as_slice()
            )));
        }

        self.prediction = self.filter.predict();
        self.measurement = *measurement;
        let state = self.filter.correct(&self.measurement)?;
        self.cycles += 1;

        Ok(StabilizerOutput {
            prediction: self.prediction,
            state,
        })
    }

    /// Same as [`Stabilizer::update`], for measurements arriving as a plain slice.
    pub fn update_slice(&mut self, measurement: &[f64]) -> Result<StabilizerOutput<N>> {
        if measurement.len() != M {
            return Err(StabilizerError::InvalidArgument(format!(
                "expected a measurement with {M} component(s), got {}",
                measurement.len()
            )));
        }
        self.update(&MeasurementVector::<M>::from_column_slice(measurement))
    }

    /// Swaps in new noise scales. Applies to all later cycles.
    pub fn retune(&mut self, cov_process: f64, cov_measure: f64) -> Result<()> {
        self.filter.set_noise(cov_process, cov_measure)?;
        self.noise = NoiseConfig {
            cov_process,
            cov_measure,
        };
        Ok(())
    }

    /// Returns to the constructed phase. Noise settings survive.
    pub fn reset(&mut self) {
        debug!(cycles = self.cycles, "Resetting stabilizer.");
        self.filter.reset();
        self.prediction = StateVector::<N>::zeros();
        self.measurement = MeasurementVector::<M>::zeros();
        self.cycles = 0;
    }

    pub fn prediction(&self) -> &StateVector<N> {
        &self.prediction
    }

    pub fn state(&self) -> &StateVector<N> {
        self.filter.state()
    }

    /// The last measurement handed to the filter.
    pub fn measurement(&self) -> &MeasurementVector<M> {
        &self.measurement
    }

    /// Position part of the current state.
    pub fn position(&self) -> &[f64] {
        &self.filter.state().as_slice()[..M]
    }

    /// Velocity part of the current state.
    pub fn velocity(&self) -> &[f64] {
        &self.filter.state().as_slice()[M..]
    }

    /// Looks up one component of the current state by meaning.
    pub fn get(&self, var: StateVariable) -> Option<f64> {
        crate::state::find_idx(self.layout, var).map(|idx| self.filter.state()[idx])
    }

    pub fn layout(&self) -> &'static [StateVariable] {
        self.layout
    }

    /// What each measurement component observes.
    pub fn measurement_layout(&self) -> &'static [StateVariable] {
        self.measurement_layout
    }

    pub fn noise(&self) -> NoiseConfig {
        self.noise
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn phase(&self) -> Phase {
        if self.cycles == 0 {
            Phase::Constructed
        } else {
            Phase::Running
        }
    }

    pub fn filter(&self) -> &LinearKalmanCore<N, M> {
        &self.filter
    }
}

impl ScalarStabilizer {
    pub fn new(noise: NoiseConfig) -> Result<Self> {
        Self::from_models(&ConstantVelocity1D, &PositionSensor1D, noise, None)
    }
}

impl Point2DStabilizer {
    pub fn new(noise: NoiseConfig) -> Result<Self> {
        Self::from_models(&ConstantVelocity2D, &PositionSensor2D, noise, None)
    }
}
