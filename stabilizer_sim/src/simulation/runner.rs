// stabilizer_sim/src/simulation/runner.rs

use anyhow::{Context, Result};
use stabilizer_core::prelude::{Estimate, PointStabilizer};
use tracing::{debug, info};

use crate::simulation::{config::ScenarioConfig, prng::SimulationRng, sensor::NoisySensor};

/// Everything observed and produced during one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleRecord {
    pub step: usize,
    pub truth: Vec<f64>,
    pub measurement: Vec<f64>,
    pub prediction: Estimate,
    pub state: Estimate,
}

/// Position errors over the summarized part of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub cycles: usize,
    pub summarized: usize,
    /// RMSE of the raw measurements against the truth.
    pub raw_rmse: f64,
    /// RMSE of the corrected state positions against the truth.
    pub filtered_rmse: f64,
    /// RMSE of the one-step-ahead predictions against the truth.
    pub prediction_rmse: f64,
}

/// Drives a stabilizer with a simulated sensor, one measurement per cycle.
pub struct ScenarioRunner {
    config: ScenarioConfig,
    stabilizer: PointStabilizer,
    sensor: NoisySensor,
    rng: SimulationRng,
    step: usize,
}

impl ScenarioRunner {
    pub fn new(config: ScenarioConfig) -> Result<Self> {
        config.validate()?;

        let stabilizer = PointStabilizer::from_config(&config.stabilizer)
            .context("Failed to build stabilizer")?;
        let sensor = NoisySensor::new(&config.sensor)?;
        let rng = SimulationRng::from_seed(config.simulation.seed);

        info!(
            "Running scenario '{}': {} mode, {} cycles, seed {}",
            config.simulation.name,
            stabilizer.mode(),
            config.simulation.steps,
            config.simulation.seed
        );

        Ok(Self {
            config,
            stabilizer,
            sensor,
            rng,
            step: 0,
        })
    }

    /// Runs a single cycle: optional retune, sample truth, measure, update.
    pub fn step(&mut self) -> Result<CycleRecord> {
        let step = self.step;

        if let Some(retune) = self.config.retune.filter(|r| r.at_step == step) {
            self.stabilizer
                .retune(retune.cov_process, retune.cov_measure)
                .with_context(|| format!("Retune at step {step} failed"))?;
            info!(
                "  -> Retuned at step {}: cov_process={}, cov_measure={}",
                step, retune.cov_process, retune.cov_measure
            );
        }

        let truth = self.config.trajectory.sample(step);
        let measurement = self.sensor.measure(&truth, &mut self.rng);
        let out = self
            .stabilizer
            .update(&measurement)
            .with_context(|| format!("Update at step {step} failed"))?;

        debug!(step, ?measurement, state = ?out.state.as_slice(), "Cycle complete.");
        self.step += 1;

        Ok(CycleRecord {
            step,
            truth,
            measurement,
            prediction: out.prediction,
            state: out.state,
        })
    }

    /// Runs every configured cycle from the current position.
    pub fn run(&mut self) -> Result<Vec<CycleRecord>> {
        let remaining = self.config.simulation.steps.saturating_sub(self.step);
        (0..remaining).map(|_| self.step()).collect()
    }

    pub fn stabilizer(&self) -> &PointStabilizer {
        &self.stabilizer
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }
}

fn squared_error(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Computes position RMSEs, skipping the first `settle_steps` records.
pub fn summarize(records: &[CycleRecord], settle_steps: usize) -> RunSummary {
    let settled = records.get(settle_steps..).unwrap_or_default();
    let n = settled.len();

    let rmse = |error: &dyn Fn(&CycleRecord) -> f64| -> f64 {
        if n == 0 {
            return f64::NAN;
        }
        (settled.iter().map(error).sum::<f64>() / n as f64).sqrt()
    };

    RunSummary {
        cycles: records.len(),
        summarized: n,
        raw_rmse: rmse(&|r: &CycleRecord| squared_error(&r.measurement, &r.truth)),
        filtered_rmse: rmse(&|r: &CycleRecord| squared_error(r.state.position(), &r.truth)),
        prediction_rmse: rmse(&|r: &CycleRecord| {
            squared_error(r.prediction.position(), &r.truth)
        }),
    }
}
