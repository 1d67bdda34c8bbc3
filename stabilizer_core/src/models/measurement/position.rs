// stabilizer_core/src/models/measurement/position.rs

use crate::models::measurement::LinearMeasurement;
use crate::state::StateVariable;
use crate::types::ObservationMatrix;

/// Observes the position of a `[p, v]` state.
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionSensor1D;

impl LinearMeasurement<2, 1> for PositionSensor1D {
    fn get_measurement_layout(&self) -> &'static [StateVariable] {
        &[StateVariable::Px]
    }

    fn measurement_matrix(&self) -> ObservationMatrix<1, 2> {
        ObservationMatrix::<1, 2>::new(1.0, 0.0)
    }
}

/// Observes the `(x, y)` position of an `[x, y, vx, vy]` state.
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionSensor2D;

impl LinearMeasurement<4, 2> for PositionSensor2D {
    fn get_measurement_layout(&self) -> &'static [StateVariable] {
        &[StateVariable::Px, StateVariable::Py]
    }

    fn measurement_matrix(&self) -> ObservationMatrix<2, 4> {
        // The Jacobian H must be size (measurement_dims x state_dims) -> 2x4
        let mut h = ObservationMatrix::<2, 4>::zeros();
        h[(0, 0)] = 1.0;
        h[(1, 1)] = 1.0;
        h
    }
}
