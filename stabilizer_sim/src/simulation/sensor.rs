// stabilizer_sim/src/simulation/sensor.rs

use anyhow::{Context, Result};
use rand_distr::{Distribution, Normal};

use crate::simulation::{config::SensorConfig, prng::SimulationRng};

/// A position sensor that reports the truth plus zero-mean Gaussian noise on every axis.
#[derive(Debug, Clone)]
pub struct NoisySensor {
    // Store the noise distribution for efficiency
    noise_dist: Normal<f64>,
}

impl NoisySensor {
    pub fn new(config: &SensorConfig) -> Result<Self> {
        let noise_dist = Normal::new(0.0, config.noise_stddev)
            .with_context(|| format!("invalid sensor noise stddev {}", config.noise_stddev))?;
        Ok(Self { noise_dist })
    }

    pub fn measure(&self, truth: &[f64], rng: &mut SimulationRng) -> Vec<f64> {
        truth
            .iter()
            .map(|p| p + self.noise_dist.sample(&mut rng.0))
            .collect()
    }
}
