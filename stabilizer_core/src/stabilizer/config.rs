// stabilizer_core/src/stabilizer/config.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StabilizerError};
use crate::estimation::filters::kalman::validate_noise_scale;
use crate::state::{StateVariable, POINT_LAYOUT, SCALAR_LAYOUT};
use crate::types::{POINT_MEASURE_DIM, POINT_STATE_DIM, SCALAR_MEASURE_DIM, SCALAR_STATE_DIM};

/// The physical model a stabilizer is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StabilizerMode {
    /// 1-D value with velocity. State `[p, v]`, measurement `[p]`.
    #[serde(rename = "scalar")]
    Scalar,
    /// 2-D point with velocity. State `[x, y, vx, vy]`, measurement `[x, y]`.
    #[default]
    #[serde(rename = "point2d", alias = "point")]
    Point2D,
}

impl StabilizerMode {
    /// Picks the mode from a state vector length, the way callers used to
    /// select it with a bare `state_num`.
    pub fn from_state_dim(state_dim: usize) -> Result<Self> {
        match state_dim {
            SCALAR_STATE_DIM => Ok(StabilizerMode::Scalar),
            POINT_STATE_DIM => Ok(StabilizerMode::Point2D),
            _ => Err(StabilizerError::UnsupportedMode { state_dim }),
        }
    }

    pub fn state_dim(self) -> usize {
        match self {
            StabilizerMode::Scalar => SCALAR_STATE_DIM,
            StabilizerMode::Point2D => POINT_STATE_DIM,
        }
    }

    pub fn measure_dim(self) -> usize {
        match self {
            StabilizerMode::Scalar => SCALAR_MEASURE_DIM,
            StabilizerMode::Point2D => POINT_MEASURE_DIM,
        }
    }

    pub fn layout(self) -> &'static [StateVariable] {
        match self {
            StabilizerMode::Scalar => &SCALAR_LAYOUT,
            StabilizerMode::Point2D => &POINT_LAYOUT,
        }
    }
}

impl TryFrom<usize> for StabilizerMode {
    type Error = StabilizerError;

    fn try_from(state_dim: usize) -> Result<Self> {
        Self::from_state_dim(state_dim)
    }
}

impl fmt::Display for StabilizerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StabilizerMode::Scalar => write!(f, "scalar"),
            StabilizerMode::Point2D => write!(f, "point2d"),
        }
    }
}

/// Scales of the process (`Q = cov_process * I`) and measurement
/// (`R = cov_measure * I`) noise covariances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoiseConfig {
    pub cov_process: f64,
    pub cov_measure: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            cov_process: 0.0001,
            cov_measure: 0.1,
        }
    }
}

impl NoiseConfig {
    pub fn new(cov_process: f64, cov_measure: f64) -> Result<Self> {
        let noise = Self {
            cov_process,
            cov_measure,
        };
        noise.validate()?;
        Ok(noise)
    }

    /// Both scales must be finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        validate_noise_scale(self.cov_process, "cov_process")?;
        validate_noise_scale(self.cov_measure, "cov_measure")
    }
}

/// Everything needed to build a stabilizer. Deserializable from scenario files.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StabilizerConfig {
    pub mode: StabilizerMode,
    pub noise: NoiseConfig,
    /// Diagonal of the starting error covariance. Defaults to `cov_process`.
    pub initial_covariance: Option<f64>,
}

impl StabilizerConfig {
    pub fn new(mode: StabilizerMode, cov_process: f64, cov_measure: f64) -> Self {
        Self {
            mode,
            noise: NoiseConfig {
                cov_process,
                cov_measure,
            },
            initial_covariance: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.noise.validate()?;
        if let Some(p0) = self.initial_covariance {
            validate_noise_scale(p0, "initial_covariance")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_state_dim() {
        assert_eq!(StabilizerMode::try_from(2), Ok(StabilizerMode::Scalar));
        assert_eq!(StabilizerMode::try_from(4), Ok(StabilizerMode::Point2D));
        for state_dim in [0, 1, 3, 6] {
            assert_eq!(
                StabilizerMode::try_from(state_dim),
                Err(StabilizerError::UnsupportedMode { state_dim })
            );
        }
    }

    #[test]
    fn test_measure_dim_is_half_state_dim() {
        for mode in [StabilizerMode::Scalar, StabilizerMode::Point2D] {
            assert_eq!(mode.measure_dim() * 2, mode.state_dim());
            assert_eq!(mode.layout().len(), mode.state_dim());
        }
    }

    #[test]
    fn test_defaults() {
        let config = StabilizerConfig::default();
        assert_eq!(config.mode, StabilizerMode::Point2D);
        assert_eq!(config.noise.cov_process, 0.0001);
        assert_eq!(config.noise.cov_measure, 0.1);
        assert!(config.initial_covariance.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_noise_validation() {
        assert!(NoiseConfig::new(0.1, 0.001).is_ok());
        assert!(NoiseConfig::new(0.0, 0.1).is_err());
        assert!(NoiseConfig::new(0.1, -0.1).is_err());
        assert!(NoiseConfig::new(f64::NAN, 0.1).is_err());

        let config = StabilizerConfig {
            initial_covariance: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(StabilizerError::InvalidArgument(_))
        ));
    }
}
