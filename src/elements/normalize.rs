use std::f64::consts::TAU;

use serde_json::Value;

use crate::elements::epoch::parse_epoch;
use crate::elements::error::ElementError;
use crate::elements::types::{scalar_metadata, ElementRecord, OrbitalElementSet, RawRecord};

const MINUTES_PER_DAY: f64 = 1440.0;

const CATALOG_ID: &str = "NORAD_CAT_ID";
const OBJECT_NAME: &str = "OBJECT_NAME";
const INCLINATION: &str = "INCLINATION";
const RAAN: &str = "RA_OF_ASC_NODE";
const ARG_OF_PERIGEE: &str = "ARG_OF_PERICENTER";
const MEAN_ANOMALY: &str = "MEAN_ANOMALY";
const MEAN_MOTION: &str = "MEAN_MOTION";
const MEAN_MOTION_DOT: &str = "MEAN_MOTION_DOT";
const MEAN_MOTION_DDOT: &str = "MEAN_MOTION_DDOT";
const ECCENTRICITY: &str = "ECCENTRICITY";
const DRAG_TERM: &str = "BSTAR";

/// Validate one upstream record and convert it to canonical units.
///
/// Angles go from degrees to radians; mean motion goes from rev/day to rad/min,
/// its first derivative from rev/day² to rad/min² and its second derivative
/// from rev/day³ to rad/min³.
pub fn normalize(record: &RawRecord) -> Result<OrbitalElementSet, ElementError> {
    let catalog_id = catalog_id(record)?;
    let object_name = text(record, OBJECT_NAME)?.trim().to_string();
    let epoch = parse_epoch(record)?;

    let eccentricity = number(record, ECCENTRICITY)?;
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(ElementError::OutOfRange {
            field: ECCENTRICITY,
            value: eccentricity,
        });
    }

    let inclination = number(record, INCLINATION)?;
    if !(0.0..=180.0).contains(&inclination) {
        return Err(ElementError::OutOfRange {
            field: INCLINATION,
            value: inclination,
        });
    }

    let mean_motion = number(record, MEAN_MOTION)?;
    if mean_motion <= 0.0 {
        return Err(ElementError::OutOfRange {
            field: MEAN_MOTION,
            value: mean_motion,
        });
    }

    let rate = TAU / MINUTES_PER_DAY;

    Ok(OrbitalElementSet {
        catalog_id,
        object_name,
        epoch,
        inclination: inclination.to_radians(),
        raan: wrap_angle(number(record, RAAN)?.to_radians()),
        arg_of_perigee: wrap_angle(number(record, ARG_OF_PERIGEE)?.to_radians()),
        mean_anomaly: wrap_angle(number(record, MEAN_ANOMALY)?.to_radians()),
        mean_motion: mean_motion * rate,
        mean_motion_first_derivative: number(record, MEAN_MOTION_DOT)? * rate / MINUTES_PER_DAY,
        mean_motion_second_derivative: number(record, MEAN_MOTION_DDOT)? * rate
            / (MINUTES_PER_DAY * MINUTES_PER_DAY),
        eccentricity,
        drag_term: number(record, DRAG_TERM)?,
    })
}

/// Normalize a group's records, skipping (and logging) the ones that fail.
pub fn normalize_records(group: &str, records: Vec<RawRecord>) -> Vec<ElementRecord> {
    let total = records.len();
    let normalized: Vec<ElementRecord> = records
        .into_iter()
        .filter_map(|record| match normalize(&record) {
            Ok(elements) => Some(ElementRecord {
                elements,
                metadata: scalar_metadata(record),
            }),
            Err(e) => {
                log::warn!(
                    "{}: skipping record {}: {}",
                    group,
                    record
                        .get(CATALOG_ID)
                        .map(Value::to_string)
                        .unwrap_or_else(|| "<no id>".to_string()),
                    e
                );
                None
            }
        })
        .collect();

    if normalized.len() < total {
        log::info!(
            "{}: {} of {} records rejected",
            group,
            total - normalized.len(),
            total
        );
    }
    normalized
}

fn field<'a>(record: &'a RawRecord, key: &'static str) -> Result<&'a Value, ElementError> {
    record
        .get(key)
        .filter(|v| !v.is_null())
        .ok_or(ElementError::MissingField(key))
}

fn text<'a>(record: &'a RawRecord, key: &'static str) -> Result<&'a str, ElementError> {
    let value = field(record, key)?;
    value.as_str().ok_or_else(|| ElementError::NotText {
        field: key,
        value: value.to_string(),
    })
}

/// Numeric fields arrive as JSON numbers or numeric strings.
fn number(record: &RawRecord, key: &'static str) -> Result<f64, ElementError> {
    let value = field(record, key)?;
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| ElementError::NotNumeric {
            field: key,
            value: value.to_string(),
        })
}

fn catalog_id(record: &RawRecord) -> Result<u32, ElementError> {
    let id = number(record, CATALOG_ID)?;
    if id < 0.0 || id.fract() != 0.0 || id > u32::MAX as f64 {
        return Err(ElementError::OutOfRange {
            field: CATALOG_ID,
            value: id,
        });
    }
    Ok(id as u32)
}

fn wrap_angle(radians: f64) -> f64 {
    let wrapped = radians.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::fixtures::leo_record;
    use approx::assert_relative_eq;
    use serde_json::json;
    use std::f64::consts::PI;

    #[test]
    fn converts_units() {
        let set = normalize(&leo_record(25544, " ISS (ZARYA) ")).unwrap();

        assert_eq!(set.catalog_id, 25544);
        assert_eq!(set.object_name, "ISS (ZARYA)");
        assert_relative_eq!(set.inclination, 51.64_f64.to_radians());
        assert_relative_eq!(set.raan, 120.0_f64.to_radians());
        assert_relative_eq!(set.mean_anomaly, 1.5 * PI, epsilon = 1e-12);
        assert_relative_eq!(set.mean_motion, 15.5 * 2.0 * PI / 1440.0);
        assert_relative_eq!(
            set.mean_motion_first_derivative,
            0.0001 * 2.0 * PI / (1440.0 * 1440.0)
        );
        assert_eq!(set.mean_motion_second_derivative, 0.0);
        assert_eq!(set.eccentricity, 0.0005);
        assert_eq!(set.drag_term, 0.0002);
    }

    #[test]
    fn wraps_angles_into_one_turn() {
        let mut record = leo_record(1, "WRAP");
        record.insert(RAAN.into(), json!(-90.0));
        record.insert(ARG_OF_PERIGEE.into(), json!(720.0));
        record.insert(MEAN_ANOMALY.into(), json!(360.0));
        let set = normalize(&record).unwrap();

        assert_relative_eq!(set.raan, 1.5 * PI, epsilon = 1e-12);
        assert!(set.arg_of_perigee >= 0.0 && set.arg_of_perigee < TAU);
        assert!(set.mean_anomaly >= 0.0 && set.mean_anomaly < TAU);
        assert!((0.0..=PI).contains(&set.inclination));
    }

    #[test]
    fn accepts_numeric_strings() {
        let mut record = leo_record(1, "STRINGS");
        record.insert(MEAN_MOTION.into(), json!(" 14.2 "));
        record.insert(CATALOG_ID.into(), json!("43013"));
        let set = normalize(&record).unwrap();
        assert_eq!(set.catalog_id, 43013);
        assert_relative_eq!(set.mean_motion, 14.2 * TAU / 1440.0);
    }

    #[test]
    fn rejects_non_text_name() {
        let mut record = leo_record(1, "NUMBERED");
        record.insert(OBJECT_NAME.into(), json!(42));
        assert_eq!(
            normalize(&record),
            Err(ElementError::NotText {
                field: OBJECT_NAME,
                value: "42".to_string(),
            })
        );
    }

    #[test]
    fn rejects_missing_mean_motion() {
        let mut record = leo_record(1, "NO MM");
        record.remove(MEAN_MOTION);
        assert_eq!(
            normalize(&record),
            Err(ElementError::MissingField(MEAN_MOTION))
        );
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut parabolic = leo_record(1, "E1");
        parabolic.insert(ECCENTRICITY.into(), json!(1.0));
        assert!(matches!(
            normalize(&parabolic),
            Err(ElementError::OutOfRange { field: ECCENTRICITY, .. })
        ));

        let mut negative = leo_record(1, "E-");
        negative.insert(ECCENTRICITY.into(), json!(-0.1));
        assert!(normalize(&negative).is_err());

        let mut stalled = leo_record(1, "N0");
        stalled.insert(MEAN_MOTION.into(), json!(0.0));
        assert!(normalize(&stalled).is_err());

        let mut fractional_id = leo_record(1, "ID");
        fractional_id.insert(CATALOG_ID.into(), json!(12.5));
        assert!(normalize(&fractional_id).is_err());
    }

    #[test]
    fn rejects_non_numeric_values() {
        let mut record = leo_record(1, "BAD");
        record.insert(DRAG_TERM.into(), json!("n/a"));
        assert!(matches!(
            normalize(&record),
            Err(ElementError::NotNumeric { field: DRAG_TERM, .. })
        ));

        let mut nan = leo_record(1, "NAN");
        nan.insert(INCLINATION.into(), json!("NaN"));
        assert!(matches!(
            normalize(&nan),
            Err(ElementError::NotNumeric { field: INCLINATION, .. })
        ));
    }

    #[test]
    fn batch_skips_bad_records_and_keeps_metadata() {
        let mut broken = leo_record(2, "BROKEN");
        broken.remove(MEAN_MOTION);
        let mut nested = leo_record(3, "NESTED");
        nested.insert("EXTRA".into(), json!({"nested": true}));

        let out = normalize_records("test", vec![leo_record(1, "OK"), broken, nested]);

        let ids: Vec<u32> = out.iter().map(|r| r.elements.catalog_id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(out[0].metadata["OBJECT_ID"], json!("1998-067A"));
        assert!(!out[1].metadata.contains_key("EXTRA"));
    }
}
