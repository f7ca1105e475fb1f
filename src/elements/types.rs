use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// One upstream element record, exactly as decoded from the feed.
pub type RawRecord = Map<String, Value>;

/// Scalar upstream fields kept verbatim for pass-through into output properties.
pub type Metadata = Map<String, Value>;

/// Canonical, propagation-ready elements for one object.
///
/// Angles are radians, rates are radians per minute (and per minute² / minute³
/// for the derivatives), which is the unit contract of the propagation model.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalElementSet {
    pub catalog_id: u32,
    pub object_name: String,
    pub epoch: DateTime<Utc>,
    /// `[0, π]`
    pub inclination: f64,
    /// `[0, 2π)`
    pub raan: f64,
    /// `[0, 2π)`
    pub arg_of_perigee: f64,
    /// `[0, 2π)`
    pub mean_anomaly: f64,
    pub mean_motion: f64,
    pub mean_motion_first_derivative: f64,
    pub mean_motion_second_derivative: f64,
    /// `[0, 1)`
    pub eccentricity: f64,
    pub drag_term: f64,
}

/// A normalized element set together with the upstream fields it came from.
#[derive(Debug, Clone)]
pub struct ElementRecord {
    pub elements: OrbitalElementSet,
    pub metadata: Metadata,
}

/// Keep only scalar upstream values; nested arrays and objects are dropped.
pub fn scalar_metadata(record: RawRecord) -> Metadata {
    record
        .into_iter()
        .filter(|(_, v)| !v.is_array() && !v.is_object())
        .collect()
}
