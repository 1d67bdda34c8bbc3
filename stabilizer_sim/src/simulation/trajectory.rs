// stabilizer_sim/src/simulation/trajectory.rs

use crate::simulation::config::TrajectoryConfig;

impl TrajectoryConfig {
    /// The true position at cycle `step`.
    pub fn sample(&self, step: usize) -> Vec<f64> {
        let t = step as f64;
        match self {
            TrajectoryConfig::Constant { value } => value.clone(),
            TrajectoryConfig::Linear { start, velocity } => start
                .iter()
                .zip(velocity)
                .map(|(p0, v)| p0 + v * t)
                .collect(),
            TrajectoryConfig::Circle {
                center,
                radius,
                angular_rate,
            } => {
                let angle = angular_rate * t;
                vec![
                    center[0] + radius * angle.cos(),
                    center[1] + radius * angle.sin(),
                ]
            }
        }
    }
}
