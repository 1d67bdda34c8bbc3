// stabilizer_core/src/models/measurement/mod.rs

use crate::state::StateVariable;
use crate::types::ObservationMatrix;
use std::fmt::Debug;

// --- LINEAR MEASUREMENT MODEL TRAIT ---
// Represents a sensor that observes a linear slice of the state. `z = H x + v`
pub trait LinearMeasurement<const N: usize, const M: usize>: Debug + Send + Sync {
    /// Describes what each entry of the measurement vector `z` observes.
    fn get_measurement_layout(&self) -> &'static [StateVariable];

    /// Returns the measurement matrix `H`.
    fn measurement_matrix(&self) -> ObservationMatrix<M, N>;
}

pub mod position;
