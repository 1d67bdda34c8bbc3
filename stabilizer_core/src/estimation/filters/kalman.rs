// stabilizer_core/src/estimation/filters/kalman.rs

use nalgebra::SMatrix;
use tracing::{debug, warn};

use crate::error::{Result, StabilizerError};
use crate::estimation::kalman::{kf_correct, kf_predict, KfCorrectParams, KfPredictParams};
use crate::state::GaussianState;
use crate::types::{
    CovarianceMatrix, MeasurementVector, ObservationMatrix, StateVector, TransitionMatrix,
};

/// A fixed-size discrete linear Kalman filter.
///
/// `N` is the state dimension and `M` the measurement dimension. All matrices
/// live on the stack and keep their shape for the lifetime of the filter, so a
/// predict/correct cycle never allocates.
///
/// The error covariance starts out equal to the process noise covariance `Q`:
/// the filter initially trusts its zero state about as much as one step of
/// model drift. Use [`LinearKalmanCore::with_initial_covariance`] to pick a
/// different starting uncertainty.
#[derive(Debug, Clone)]
pub struct LinearKalmanCore<const N: usize, const M: usize> {
    /// The current estimate (x, P). A priori after `predict`, a posteriori after `correct`.
    state: GaussianState<N>,
    /// Covariance restored by `reset`.
    initial_covariance: CovarianceMatrix<N>,
    /// State transition matrix (F). Fixed after construction.
    transition: TransitionMatrix<N>,
    /// Measurement matrix (H). Fixed after construction.
    observation: ObservationMatrix<M, N>,
    /// The process noise covariance matrix (Q), modeling uncertainty in the dynamics.
    process_noise_q: CovarianceMatrix<N>,
    /// The measurement noise covariance matrix (R).
    measurement_noise_r: CovarianceMatrix<M>,
    /// Innovation `z - H x` of the most recent successful correction.
    last_innovation: Option<MeasurementVector<M>>,
}

impl<const N: usize, const M: usize> LinearKalmanCore<N, M> {
    /// Creates a new filter from its four model matrices.
    ///
    /// `Q` and `R` must be diagonal with strictly positive, finite entries.
    pub fn new(
        transition: TransitionMatrix<N>,
        observation: ObservationMatrix<M, N>,
        process_noise_q: CovarianceMatrix<N>,
        measurement_noise_r: CovarianceMatrix<M>,
    ) -> Result<Self> {
        if M == 0 || N == 0 {
            return Err(StabilizerError::Configuration(format!(
                "state and measurement dimensions must be positive, got n={N}, m={M}"
            )));
        }
        if !all_finite(&transition) || !all_finite(&observation) {
            return Err(StabilizerError::Configuration(
                "transition and measurement matrices must be finite".to_string(),
            ));
        }
        validate_noise_matrix(&process_noise_q, "process noise covariance Q")?;
        validate_noise_matrix(&measurement_noise_r, "measurement noise covariance R")?;

        debug!(
            state_dim = N,
            measure_dim = M,
            "Created linear Kalman filter with zero initial state."
        );

        Ok(Self {
            state: GaussianState::with_covariance(process_noise_q),
            initial_covariance: process_noise_q,
            transition,
            observation,
            process_noise_q,
            measurement_noise_r,
            last_innovation: None,
        })
    }

    /// Builds a filter from row-major slices, checking every shape against `N`/`M`.
    pub fn from_row_slices(
        transition: &[f64],
        observation: &[f64],
        process_noise_q: &[f64],
        measurement_noise_r: &[f64],
    ) -> Result<Self> {
        Self::new(
            matrix_from_row_slice::<N, N>(transition, "transition matrix F")?,
            matrix_from_row_slice::<M, N>(observation, "measurement matrix H")?,
            matrix_from_row_slice::<N, N>(process_noise_q, "process noise covariance Q")?,
            matrix_from_row_slice::<M, M>(measurement_noise_r, "measurement noise covariance R")?,
        )
    }

    /// Replaces the starting covariance, both now and for later `reset` calls.
    /// The matrix must be symmetric positive-definite.
    pub fn with_initial_covariance(mut self, covariance: CovarianceMatrix<N>) -> Result<Self> {
        if !all_finite(&covariance) || covariance != covariance.transpose() {
            return Err(StabilizerError::InvalidArgument(
                "initial covariance must be finite and symmetric".to_string(),
            ));
        }
        if covariance.cholesky().is_none() {
            return Err(StabilizerError::InvalidArgument(
                "initial covariance must be positive-definite".to_string(),
            ));
        }
        self.initial_covariance = covariance;
        self.state.covariance = covariance;
        Ok(self)
    }

    /// Advances the estimate one step with the motion model and returns the a priori state.
    pub fn predict(&mut self) -> StateVector<N> {
        self.state = kf_predict(
            &self.state,
            &KfPredictParams {
                transition: &self.transition,
                process_noise_q: &self.process_noise_q,
            },
        );
        self.state.vector
    }

    /// Fuses a measurement into the current estimate and returns the a posteriori state.
    ///
    /// On failure the estimate is left exactly as it was.
    pub fn correct(&mut self, z: &MeasurementVector<M>) -> Result<StateVector<N>> {
        let correction = kf_correct(
            &self.state,
            &KfCorrectParams {
                observation: &self.observation,
                measurement_noise_r: &self.measurement_noise_r,
                z,
            },
        )
        .inspect_err(|_| warn!("Innovation covariance is singular, skipping correction."))?;

        self.state = correction.state;
        self.last_innovation = Some(correction.innovation);
        Ok(self.state.vector)
    }

    /// Replaces `Q` with `cov_process * I` and `R` with `cov_measure * I`.
    ///
    /// Both scalars are checked before anything is written, so the pair is
    /// always swapped together or not at all.
    pub fn set_noise(&mut self, cov_process: f64, cov_measure: f64) -> Result<()> {
        validate_noise_scale(cov_process, "cov_process")?;
        validate_noise_scale(cov_measure, "cov_measure")?;

        self.process_noise_q = CovarianceMatrix::<N>::identity() * cov_process;
        self.measurement_noise_r = CovarianceMatrix::<M>::identity() * cov_measure;

        debug!(cov_process, cov_measure, "Retuned noise covariances.");
        Ok(())
    }

    /// Puts the estimate back to the zero vector and the initial covariance.
    /// Model and noise matrices are kept.
    pub fn reset(&mut self) {
        self.state = GaussianState::with_covariance(self.initial_covariance);
        self.last_innovation = None;
    }

    // --- Accessors ---

    pub fn state(&self) -> &StateVector<N> {
        &self.state.vector
    }

    pub fn covariance(&self) -> &CovarianceMatrix<N> {
        &self.state.covariance
    }

    pub fn gaussian_state(&self) -> &GaussianState<N> {
        &self.state
    }

    pub fn transition(&self) -> &TransitionMatrix<N> {
        &self.transition
    }

    pub fn observation(&self) -> &ObservationMatrix<M, N> {
        &self.observation
    }

    pub fn process_noise(&self) -> &CovarianceMatrix<N> {
        &self.process_noise_q
    }

    pub fn measurement_noise(&self) -> &CovarianceMatrix<M> {
        &self.measurement_noise_r
    }

    pub fn last_innovation(&self) -> Option<&MeasurementVector<M>> {
        self.last_innovation.as_ref()
    }
}

fn all_finite<const R: usize, const C: usize>(matrix: &SMatrix<f64, R, C>) -> bool {
    matrix.iter().all(|v| v.is_finite())
}

/// Checks that a noise scale is a usable variance.
pub(crate) fn validate_noise_scale(value: f64, name: &str) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(StabilizerError::InvalidArgument(format!(
            "{name} must be finite and strictly positive, got {value}"
        )))
    }
}

/// Noise covariances must be positive diagonal.
fn validate_noise_matrix<const D: usize>(matrix: &CovarianceMatrix<D>, name: &str) -> Result<()> {
    for row in 0..D {
        for col in 0..D {
            let value = matrix[(row, col)];
            if row == col {
                validate_noise_scale(value, name)?;
            } else if value != 0.0 {
                return Err(StabilizerError::Configuration(format!(
                    "{name} must be diagonal, found {value} at ({row}, {col})"
                )));
            }
        }
    }
    Ok(())
}

fn matrix_from_row_slice<const R: usize, const C: usize>(
    data: &[f64],
    name: &str,
) -> Result<SMatrix<f64, R, C>> {
    if data.len() != R * C {
        return Err(StabilizerError::Configuration(format!(
            "{name} needs {R}x{C} = {} entries, got {}",
            R * C,
            data.len()
        )));
    }
    Ok(SMatrix::<f64, R, C>::from_row_slice(data))
}
