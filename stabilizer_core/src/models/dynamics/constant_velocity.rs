// stabilizer_core/src/models/dynamics/constant_velocity.rs

use crate::{
    models::dynamics::LinearDynamics,
    state::{StateVariable, POINT_LAYOUT, SCALAR_LAYOUT},
    types::TransitionMatrix,
};

// --- Constant Velocity Models ---
// Assume the tracked value keeps moving with its current velocity for one step.
// Changes in velocity are left to the process noise Q.

/// 1-D constant velocity over `[p, v]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConstantVelocity1D;

impl LinearDynamics<2> for ConstantVelocity1D {
    fn get_state_layout(&self) -> &'static [StateVariable] {
        &SCALAR_LAYOUT
    }

    fn transition_matrix(&self) -> TransitionMatrix<2> {
        // [[1, 1],
        //  [0, 1]]
        TransitionMatrix::<2>::new(1.0, 1.0, 0.0, 1.0)
    }
}

/// 2-D constant velocity over `[x, y, vx, vy]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConstantVelocity2D;

impl LinearDynamics<4> for ConstantVelocity2D {
    fn get_state_layout(&self) -> &'static [StateVariable] {
        &POINT_LAYOUT
    }

    fn transition_matrix(&self) -> TransitionMatrix<4> {
        let mut f = TransitionMatrix::<4>::identity();

        // d(Px)/d(Vx) = 1, d(Py)/d(Vy) = 1
        f[(0, 2)] = 1.0;
        f[(1, 3)] = 1.0;

        f
    }
}
