use chrono::{DateTime, Utc};
use sgp4::{Constants, MinutesSinceEpoch, Orbit};

use crate::elements::OrbitalElementSet;
use crate::propagation::error::ModelBuildError;
use crate::propagation::types::{ModelBuilder, PropagationModel, StateVector};

/// Status reported when the SGP4 integrator fails at the requested instant
/// (diverging eccentricity, negative semi-latus rectum, ...).
pub const STATUS_SGP4_ERROR: i32 = 1;

/// Builds SGP4 models on the WGS72 geopotential, the convention the feed's
/// element sets are fitted with.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sgp4Builder;

impl ModelBuilder for Sgp4Builder {
    fn build(
        &self,
        elements: &OrbitalElementSet,
    ) -> Result<Box<dyn PropagationModel>, ModelBuildError> {
        let orbit = Orbit::from_kozai_elements(
            &sgp4::WGS72,
            elements.inclination,
            elements.raan,
            elements.eccentricity,
            elements.arg_of_perigee,
            elements.mean_anomaly,
            elements.mean_motion,
        )
        .map_err(rejected)?;

        let constants = Constants::new(
            sgp4::WGS72,
            sgp4::iau_epoch_to_sidereal_time,
            sgp4::julian_years_since_j2000(&elements.epoch.naive_utc()),
            elements.drag_term,
            orbit,
        )
        .map_err(rejected)?;

        Ok(Box::new(Sgp4Model {
            epoch: elements.epoch,
            constants,
        }))
    }
}

fn rejected(err: impl std::fmt::Display) -> ModelBuildError {
    ModelBuildError::Rejected(err.to_string())
}

pub struct Sgp4Model {
    epoch: DateTime<Utc>,
    constants: Constants,
}

impl PropagationModel for Sgp4Model {
    fn propagate(&self, at: DateTime<Utc>) -> StateVector {
        match self.constants.propagate(minutes_since(self.epoch, at)) {
            Ok(prediction) => StateVector::ok(prediction.position, prediction.velocity),
            Err(e) => {
                log::debug!("SGP4 failed at {}: {}", at, e);
                StateVector::failed(STATUS_SGP4_ERROR)
            }
        }
    }
}

fn minutes_since(epoch: DateTime<Utc>, at: DateTime<Utc>) -> MinutesSinceEpoch {
    let delta = at - epoch;
    let minutes = match delta.num_microseconds() {
        Some(us) => us as f64 / 60_000_000.0,
        None => delta.num_milliseconds() as f64 / 60_000.0,
    };
    MinutesSinceEpoch(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::fixtures::leo_record;
    use crate::elements::normalize;
    use chrono::Duration;

    fn norm(v: [f64; 3]) -> f64 {
        (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
    }

    #[test]
    fn propagates_low_orbit() {
        let elements = normalize(&leo_record(25544, "ISS (ZARYA)")).unwrap();
        let model = Sgp4Builder.build(&elements).unwrap();

        let at_epoch = model.propagate(elements.epoch);
        assert!(at_epoch.is_ok());
        let radius = norm(at_epoch.position_km);
        assert!(radius > 6700.0 && radius < 6900.0, "radius {radius}");
        let speed = norm(at_epoch.velocity_km_s);
        assert!(speed > 7.4 && speed < 7.9, "speed {speed}");

        let later = model.propagate(elements.epoch + Duration::minutes(45));
        assert!(later.is_ok());
        assert_ne!(later.position_km, at_epoch.position_km);
    }

    #[test]
    fn propagation_is_pure() {
        let elements = normalize(&leo_record(1, "PURE")).unwrap();
        let model = Sgp4Builder.build(&elements).unwrap();
        let at = elements.epoch + Duration::hours(6);
        assert_eq!(model.propagate(at), model.propagate(at));
    }

    #[test]
    fn minutes_are_signed() {
        let epoch = elements_epoch();
        assert_eq!(minutes_since(epoch, epoch + Duration::seconds(90)).0, 1.5);
        assert_eq!(minutes_since(epoch, epoch - Duration::minutes(30)).0, -30.0);
    }

    fn elements_epoch() -> DateTime<Utc> {
        normalize(&leo_record(1, "EPOCH")).unwrap().epoch
    }
}
