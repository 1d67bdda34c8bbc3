// stabilizer_core/src/error.rs

use thiserror::Error;

/// Everything that can go wrong while building, running or retuning a filter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StabilizerError {
    /// Only the 2-state scalar and 4-state point configurations exist.
    #[error("unsupported mode: {state_dim} states requested, only 2 (scalar) or 4 (point) are supported")]
    UnsupportedMode { state_dim: usize },

    /// A model matrix does not fit the filter it was handed to.
    #[error("filter configuration error: {0}")]
    Configuration(String),

    /// The innovation covariance `S = H P H^T + R` could not be inverted.
    #[error("innovation covariance is singular, measurement cannot be fused")]
    SingularCovariance,

    /// A caller-supplied value was rejected (noise scale, measurement arity, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, StabilizerError>;
