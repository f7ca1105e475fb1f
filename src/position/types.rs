use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Frame the propagator's Cartesian vector is read in before the spherical
/// conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frame {
    /// Use the inertial vector as-is; longitude is measured from the
    /// inertial x axis.
    #[default]
    Inertial,
    /// Rotate by Greenwich sidereal time first, giving ground-track longitude.
    EarthFixed,
}

/// Longitude/latitude in degrees and height above a spherical Earth in km.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodetic {
    pub longitude_deg: f64,
    pub latitude_deg: f64,
    pub altitude_km: f64,
}

impl Geodetic {
    pub fn is_finite(&self) -> bool {
        self.longitude_deg.is_finite() && self.latitude_deg.is_finite() && self.altitude_km.is_finite()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// Non-zero status from the propagator.
    Propagator { code: i32 },
    NonFiniteCoordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SampleStatus {
    Ok,
    PropagationFailed { reason: FailureReason },
}

/// One catalog entry evaluated at one instant. Coordinates are present
/// exactly when the status is `Ok`, and are then finite.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PositionSample {
    pub catalog_id: u32,
    pub timestamp: DateTime<Utc>,
    pub longitude_deg: Option<f64>,
    pub latitude_deg: Option<f64>,
    pub altitude_km: Option<f64>,
    pub speed_km_s: Option<f64>,
    #[serde(flatten)]
    pub status: SampleStatus,
}

impl PositionSample {
    pub fn ok(catalog_id: u32, timestamp: DateTime<Utc>, geo: Geodetic, speed_km_s: f64) -> Self {
        Self {
            catalog_id,
            timestamp,
            longitude_deg: Some(geo.longitude_deg),
            latitude_deg: Some(geo.latitude_deg),
            altitude_km: Some(geo.altitude_km),
            speed_km_s: Some(speed_km_s).filter(|s| s.is_finite()),
            status: SampleStatus::Ok,
        }
    }

    pub fn failed(catalog_id: u32, timestamp: DateTime<Utc>, reason: FailureReason) -> Self {
        Self {
            catalog_id,
            timestamp,
            longitude_deg: None,
            latitude_deg: None,
            altitude_km: None,
            speed_km_s: None,
            status: SampleStatus::PropagationFailed { reason },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == SampleStatus::Ok
    }

    /// `(lon, lat)` when both are present and finite.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.longitude_deg, self.latitude_deg) {
            (Some(lon), Some(lat)) if lon.is_finite() && lat.is_finite() => Some((lon, lat)),
            _ => None,
        }
    }
}
