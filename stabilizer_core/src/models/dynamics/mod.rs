// stabilizer_core/src/models/dynamics/mod.rs

use crate::state::StateVariable;
use crate::types::TransitionMatrix;
use std::fmt::Debug;

// --- LINEAR DYNAMICS MODEL TRAIT ---
// Represents a linear motion model with a fixed time step. `x_k+1 = F x_k + w`
pub trait LinearDynamics<const N: usize>: Debug + Send + Sync {
    /// Returns the layout of the state vector for this model.
    /// The order defines the indices for the state vector `x`.
    fn get_state_layout(&self) -> &'static [StateVariable];

    /// Returns the state transition matrix `F`.
    fn transition_matrix(&self) -> TransitionMatrix<N>;
}

pub mod constant_velocity;
