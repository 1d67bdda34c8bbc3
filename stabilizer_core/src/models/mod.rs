// stabilizer_core/src/models/mod.rs

//! Fixed linear model templates: how the state evolves between cycles (`F`)
//! and which parts of it a sensor observes (`H`).

pub mod dynamics;
pub mod measurement;
