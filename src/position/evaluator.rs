use std::thread;

use chrono::{DateTime, Utc};

use crate::catalog::{Catalog, CatalogEntry};
use crate::position::types::{FailureReason, Frame, Geodetic, PositionSample};

/// Mean equatorial radius of the spherical Earth model, km.
pub const EARTH_RADIUS_KM: f64 = 6378.137;

/// Turns propagator output into geodetic samples.
///
/// The conversion treats the Earth as a sphere of radius [`EARTH_RADIUS_KM`];
/// it is not a WGS84 ellipsoid inversion, so latitudes and altitudes differ
/// from true geodetic values by up to ~0.2° and ~21 km.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    frame: Frame,
    workers: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(Frame::Inertial, 1)
    }
}

impl Evaluator {
    pub fn new(frame: Frame, workers: usize) -> Self {
        Self {
            frame,
            workers: workers.max(1),
        }
    }

    pub fn evaluate(&self, entry: &CatalogEntry, at: DateTime<Utc>) -> PositionSample {
        let state = entry.model.propagate(at);
        if !state.is_ok() {
            return PositionSample::failed(
                entry.catalog_id,
                at,
                FailureReason::Propagator { code: state.status },
            );
        }

        let position = match self.frame {
            Frame::Inertial => state.position_km,
            Frame::EarthFixed => rotate_to_earth_fixed(state.position_km, sidereal_angle(at)),
        };
        let geo = spherical_geodetic(position);
        if !geo.is_finite() {
            return PositionSample::failed(entry.catalog_id, at, FailureReason::NonFiniteCoordinates);
        }

        PositionSample::ok(entry.catalog_id, at, geo, norm(state.velocity_km_s))
    }

    /// Evaluate every catalog entry at one instant, in catalog order.
    pub fn evaluate_all<'a>(
        &self,
        catalog: &'a Catalog,
        at: DateTime<Utc>,
    ) -> Vec<(&'a CatalogEntry, PositionSample)> {
        let entries: Vec<&CatalogEntry> = catalog.all_entries().iter().collect();
        self.evaluate_selected(&entries, at)
    }

    /// Evaluate a subset of entries at one instant, keeping their order.
    pub fn evaluate_selected<'a>(
        &self,
        entries: &[&'a CatalogEntry],
        at: DateTime<Utc>,
    ) -> Vec<(&'a CatalogEntry, PositionSample)> {
        if self.workers <= 1 || entries.len() < 2 {
            return entries.iter().map(|&e| (e, self.evaluate(e, at))).collect();
        }

        let chunk = entries.len().div_ceil(self.workers);
        thread::scope(|scope| {
            let handles: Vec<_> = entries
                .chunks(chunk)
                .map(|part| {
                    scope.spawn(move || {
                        part.iter()
                            .map(|&e| (e, self.evaluate(e, at)))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap_or_else(|p| std::panic::resume_unwind(p)))
                .collect()
        })
    }
}

/// Spherical-Earth conversion of a Cartesian position in km.
pub fn spherical_geodetic(position: [f64; 3]) -> Geodetic {
    let [x, y, z] = position;
    let r = norm(position);
    Geodetic {
        longitude_deg: y.atan2(x).to_degrees(),
        latitude_deg: z.atan2(x.hypot(y)).to_degrees(),
        altitude_km: r - EARTH_RADIUS_KM,
    }
}

fn sidereal_angle(at: DateTime<Utc>) -> f64 {
    sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&at.naive_utc()))
}

fn rotate_to_earth_fixed(position: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        position[0] * cos_gmst + position[1] * sin_gmst,
        -position[0] * sin_gmst + position[1] * cos_gmst,
        position[2],
    ]
}

fn norm(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}
