// stabilizer_sim/src/prelude.rs

// Re-export the core prelude so callers can reach the filter types directly.
pub use stabilizer_core::prelude::*;

// Re-export common simulation-specific types.
pub use crate::simulation::config::structs::*;
pub use crate::simulation::config::{load_scenario, load_scenario_str};
pub use crate::simulation::prng::SimulationRng;
pub use crate::simulation::runner::{summarize, CycleRecord, RunSummary, ScenarioRunner};
pub use crate::simulation::sensor::NoisySensor;
