// stabilizer_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::models::dynamics::LinearDynamics;
pub use crate::models::measurement::LinearMeasurement;

// --- Core Data Structures ---
pub use crate::error::StabilizerError;
pub use crate::state::{GaussianState, StateVariable};
pub use crate::types::{CovarianceMatrix, MeasurementVector, StateVector};

// --- Estimation Algorithms ---
pub use crate::estimation::filters::LinearKalmanCore;
pub use crate::estimation::kalman::{kf_correct, kf_predict, KfCorrectParams, KfPredictParams};

// --- Stabilizers ---
pub use crate::stabilizer::{
    Estimate, Estimates, NoiseConfig, Phase, Point2DStabilizer, PointStabilizer,
    ScalarStabilizer, Stabilizer, StabilizerConfig, StabilizerMode, StabilizerOutput,
};

// --- Concrete Model Implementations ---
pub use crate::models::dynamics::constant_velocity::{ConstantVelocity1D, ConstantVelocity2D};
pub use crate::models::measurement::position::{PositionSensor1D, PositionSensor2D};
