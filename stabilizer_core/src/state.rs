// stabilizer_core/src/state.rs

use crate::types::{CovarianceMatrix, StateVector};
use serde::{Deserialize, Serialize};

/// An enum that names every variable that can exist in a stabilizer state vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateVariable {
    // --- Position ---
    Px,
    Py,
    // --- Velocity (per unit time step) ---
    Vx,
    Vy,
}

impl StateVariable {
    pub fn is_position(&self) -> bool {
        matches!(self, StateVariable::Px | StateVariable::Py)
    }
}

/// Layout of the 1-D state vector: `[position, velocity]`.
pub const SCALAR_LAYOUT: [StateVariable; 2] = [StateVariable::Px, StateVariable::Vx];

/// Layout of the 2-D state vector: `[x, y, vx, vy]`.
pub const POINT_LAYOUT: [StateVariable; 4] = [
    StateVariable::Px,
    StateVariable::Py,
    StateVariable::Vx,
    StateVariable::Vy,
];

/// Finds the index of a specific `StateVariable` in a layout.
pub fn find_idx(layout: &[StateVariable], var: StateVariable) -> Option<usize> {
    layout.iter().position(|v| *v == var)
}

/// The state object used by the filters. It bundles the estimate `x` with its
/// error covariance `P`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianState<const N: usize> {
    /// The actual numerical data vector `x`.
    pub vector: StateVector<N>,
    /// The covariance matrix `P`.
    pub covariance: CovarianceMatrix<N>,
}

impl<const N: usize> GaussianState<N> {
    /// Creates a state at the origin with the covariance set to a scaled identity.
    pub fn new(initial_covariance_val: f64) -> Self {
        Self::with_covariance(CovarianceMatrix::<N>::identity() * initial_covariance_val)
    }

    /// Creates a state at the origin with an explicit covariance.
    pub fn with_covariance(covariance: CovarianceMatrix<N>) -> Self {
        Self {
            vector: StateVector::<N>::zeros(),
            covariance,
        }
    }

    /// Returns the dimension of the state vector.
    pub fn dim(&self) -> usize {
        N
    }
}
