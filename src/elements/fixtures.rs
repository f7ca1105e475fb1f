use serde_json::json;

use crate::elements::RawRecord;

/// A near-circular low orbit in the feed's JSON shape.
pub fn leo_record(catalog_id: u32, name: &str) -> RawRecord {
    let value = json!({
        "OBJECT_NAME": name,
        "OBJECT_ID": "1998-067A",
        "EPOCH": "2024-01-01T12:00:00.000000",
        "MEAN_MOTION": 15.5,
        "ECCENTRICITY": 0.0005,
        "INCLINATION": 51.64,
        "RA_OF_ASC_NODE": 120.0,
        "ARG_OF_PERICENTER": 90.0,
        "MEAN_ANOMALY": 270.0,
        "EPHEMERIS_TYPE": 0,
        "CLASSIFICATION_TYPE": "U",
        "NORAD_CAT_ID": catalog_id,
        "ELEMENT_SET_NO": 999,
        "REV_AT_EPOCH": 43000,
        "BSTAR": 0.0002,
        "MEAN_MOTION_DOT": 0.0001,
        "MEAN_MOTION_DDOT": 0,
    });
    value.as_object().cloned().unwrap_or_default()
}
