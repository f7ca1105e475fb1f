use std::ops::RangeInclusive;

use serde::Serialize;
use strum_macros::Display;

const LEO_CEILING_KM: f64 = 2_000.0;
const MEO_CEILING_KM: f64 = 35_786.0;
const GEO_BAND_KM: RangeInclusive<f64> = 35_700.0..=36_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum OrbitClass {
    #[strum(to_string = "LEO")]
    #[serde(rename = "LEO")]
    Leo,
    #[strum(to_string = "MEO")]
    #[serde(rename = "MEO")]
    Meo,
    #[strum(to_string = "GEO")]
    #[serde(rename = "GEO")]
    Geo,
    #[strum(to_string = "HEO")]
    #[serde(rename = "HEO")]
    Heo,
    Unknown,
}

/// Orbit class from altitude above the spherical Earth, in km.
///
/// The geostationary band overlaps the top of MEO and the bottom of HEO, so it
/// is tested first.
pub fn classify(altitude_km: Option<f64>) -> OrbitClass {
    match altitude_km {
        Some(alt) if alt.is_finite() => {
            if GEO_BAND_KM.contains(&alt) {
                OrbitClass::Geo
            } else if alt < LEO_CEILING_KM {
                OrbitClass::Leo
            } else if alt < MEO_CEILING_KM {
                OrbitClass::Meo
            } else {
                OrbitClass::Heo
            }
        }
        _ => OrbitClass::Unknown,
    }
}
