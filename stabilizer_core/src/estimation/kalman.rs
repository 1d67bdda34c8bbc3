// stabilizer_core/src/estimation/kalman.rs

use crate::error::{Result, StabilizerError};
use crate::state::GaussianState;
use crate::types::{
    CovarianceMatrix, GainMatrix, MeasurementVector, ObservationMatrix, TransitionMatrix,
};

/// A container for parameters needed by the prediction step.
pub struct KfPredictParams<'a, const N: usize> {
    pub transition: &'a TransitionMatrix<N>,
    pub process_noise_q: &'a CovarianceMatrix<N>,
}

/// A container for parameters needed by the correction step.
pub struct KfCorrectParams<'a, const N: usize, const M: usize> {
    pub observation: &'a ObservationMatrix<M, N>,
    pub measurement_noise_r: &'a CovarianceMatrix<M>,
    pub z: &'a MeasurementVector<M>,
}

/// Everything produced by one correction step.
#[derive(Debug, Clone, Copy)]
pub struct Correction<const N: usize, const M: usize> {
    /// The a posteriori state.
    pub state: GaussianState<N>,
    /// `y = z - H x`, evaluated against the a priori state.
    pub innovation: MeasurementVector<M>,
    /// The Kalman gain `K` that was applied.
    pub gain: GainMatrix<N, M>,
}

/// PURE FUNCTION: Performs one prediction step.
/// Takes a state and returns the a priori state. It has no side effects.
pub fn kf_predict<const N: usize>(
    current_state: &GaussianState<N>,
    params: &KfPredictParams<N>,
) -> GaussianState<N> {
    let f = params.transition;

    GaussianState {
        vector: f * current_state.vector,
        covariance: f * current_state.covariance * f.transpose() + params.process_noise_q,
    }
}

/// PURE FUNCTION: Performs one measurement correction step.
/// Takes the a priori state and returns the corrected state. It has no side effects.
pub fn kf_correct<const N: usize, const M: usize>(
    predicted_state: &GaussianState<N>,
    params: &KfCorrectParams<N, M>,
) -> Result<Correction<N, M>> {
    let h = params.observation;
    let p_priori = &predicted_state.covariance;
    let x_priori = &predicted_state.vector;

    // Innovation and its covariance.
    let y = params.z - h * x_priori;
    let s = h * p_priori * h.transpose() + params.measurement_noise_r;

    let s_inv = s
        .try_inverse()
        .ok_or(StabilizerError::SingularCovariance)?;
    let k_gain = p_priori * h.transpose() * s_inv;

    let new_x = x_priori + k_gain * y;
    let i_kh = CovarianceMatrix::<N>::identity() - k_gain * h;
    let new_p = i_kh * p_priori;

    Ok(Correction {
        state: GaussianState {
            vector: new_x,
            covariance: new_p,
        },
        innovation: y,
        gain: k_gain,
    })
}
