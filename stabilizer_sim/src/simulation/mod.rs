// stabilizer_sim/src/simulation/mod.rs

pub mod config;
pub mod prng;
pub mod report;
pub mod runner;
pub mod sensor;
pub mod trajectory;
