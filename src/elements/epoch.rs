use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use crate::elements::error::ElementError;
use crate::elements::types::RawRecord;

const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const MICROS_PER_DAY: i64 = 86_400_000_000;

const EPOCH_JD_FIELD: &str = "EPOCHJD";
const EPOCH_FIELD: &str = "EPOCH";

/// A Julian date split into the day number at the preceding midnight
/// (always ending in `.5`) and the fraction of that day elapsed.
///
/// Every epoch and query instant goes through this split, so a day fraction
/// is carried in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JulianDate {
    pub day: f64,
    pub fraction: f64,
}

impl JulianDate {
    pub fn from_jd(jd: f64) -> Option<Self> {
        if !jd.is_finite() {
            return None;
        }
        let since_midnight = jd - 0.5;
        let whole = since_midnight.floor();
        Some(Self {
            day: whole + 0.5,
            fraction: since_midnight - whole,
        })
    }

    pub fn from_datetime(at: &DateTime<Utc>) -> Self {
        let micros = at.timestamp_micros();
        let days = micros.div_euclid(MICROS_PER_DAY);
        let rest = micros.rem_euclid(MICROS_PER_DAY);
        Self {
            day: UNIX_EPOCH_JD + days as f64,
            fraction: rest as f64 / MICROS_PER_DAY as f64,
        }
    }

    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let days = self.day - UNIX_EPOCH_JD;
        let micros =
            days * MICROS_PER_DAY as f64 + (self.fraction * MICROS_PER_DAY as f64).round();
        if !micros.is_finite() {
            return None;
        }
        DateTime::from_timestamp_micros(micros as i64)
    }

    pub fn value(self) -> f64 {
        self.day + self.fraction
    }
}

/// Resolve a record's epoch. `EPOCHJD` takes precedence over `EPOCH` when both
/// are present.
pub fn parse_epoch(record: &RawRecord) -> Result<DateTime<Utc>, ElementError> {
    let julian = match present(record, EPOCH_JD_FIELD) {
        Some(value) => {
            let jd = julian_day(value)?;
            JulianDate::from_jd(jd)
                .ok_or_else(|| ElementError::InvalidEpoch(format!("{EPOCH_JD_FIELD}={jd}")))?
        }
        None => {
            let value = present(record, EPOCH_FIELD).ok_or(ElementError::MissingField(EPOCH_FIELD))?;
            let text = value
                .as_str()
                .ok_or_else(|| ElementError::InvalidEpoch(value.to_string()))?;
            JulianDate::from_datetime(&parse_iso8601(text)?)
        }
    };

    julian
        .to_datetime()
        .ok_or_else(|| ElementError::InvalidEpoch(format!("JD {}", julian.value())))
}

fn present<'a>(record: &'a RawRecord, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|v| !v.is_null())
}

fn julian_day(value: &Value) -> Result<f64, ElementError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ElementError::InvalidEpoch(value.to_string()))
}

/// Feed timestamps come with or without a zone designator; a missing one means UTC.
fn parse_iso8601(text: &str) -> Result<DateTime<Utc>, ElementError> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| ElementError::InvalidEpoch(format!("{text}: {e}")))
}
