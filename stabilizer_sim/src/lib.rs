// stabilizer_sim/src/lib.rs

//! A headless driver for `stabilizer_core`: it plays a simulated sensor
//! against a stabilizer and reports how much of the noise was removed.

// This prelude is for convenience for other files WITHIN the stabilizer_sim crate.
pub mod prelude;

pub mod cli;
pub mod simulation;
