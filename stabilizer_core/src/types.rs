// stabilizer_core/src/types.rs

use nalgebra::{SMatrix, SVector};

// --- Core Type Aliases ---
// Everything is stack allocated; the dimensions are fixed by the mode at compile time.
pub type StateVector<const N: usize> = SVector<f64, N>;
pub type MeasurementVector<const M: usize> = SVector<f64, M>;
pub type CovarianceMatrix<const N: usize> = SMatrix<f64, N, N>;
pub type TransitionMatrix<const N: usize> = SMatrix<f64, N, N>;
pub type ObservationMatrix<const M: usize, const N: usize> = SMatrix<f64, M, N>;
pub type GainMatrix<const N: usize, const M: usize> = SMatrix<f64, N, M>;

/// State dimension of the 1-D scalar-with-velocity configuration.
pub const SCALAR_STATE_DIM: usize = 2;
/// Measurement dimension of the 1-D scalar-with-velocity configuration.
pub const SCALAR_MEASURE_DIM: usize = 1;
/// State dimension of the 2-D point-with-velocity configuration.
pub const POINT_STATE_DIM: usize = 4;
/// Measurement dimension of the 2-D point-with-velocity configuration.
pub const POINT_MEASURE_DIM: usize = 2;
