use chrono::{DateTime, Utc};

use crate::elements::OrbitalElementSet;
use crate::propagation::error::ModelBuildError;

/// Status code of a successful propagation. Anything else means "no position".
pub const STATUS_OK: i32 = 0;

/// Raw propagator output: position in km and velocity in km/s, inertial frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub status: i32,
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
}

impl StateVector {
    pub fn ok(position_km: [f64; 3], velocity_km_s: [f64; 3]) -> Self {
        Self {
            status: STATUS_OK,
            position_km,
            velocity_km_s,
        }
    }

    pub fn failed(status: i32) -> Self {
        Self {
            status,
            position_km: [f64::NAN; 3],
            velocity_km_s: [f64::NAN; 3],
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Opaque per-object propagator state. Must be a pure function of the instant.
pub trait PropagationModel: Send + Sync {
    fn propagate(&self, at: DateTime<Utc>) -> StateVector;
}

pub trait ModelBuilder: Send + Sync {
    fn build(
        &self,
        elements: &OrbitalElementSet,
    ) -> Result<Box<dyn PropagationModel>, ModelBuildError>;
}
