// stabilizer_core/src/estimation/mod.rs

//! The linear Kalman recursion, both as pure functions over a `GaussianState`
//! (`kalman`) and as a stateful filter that owns its model (`filters`).

pub mod filters;
pub mod kalman;
