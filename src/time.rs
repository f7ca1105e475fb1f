use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// An instant given on the command line or in a query string.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeExpr {
    Now,
    Relative(Duration),
    Absolute(DateTime<Utc>),
}

impl TimeExpr {
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, String> {
        match self {
            TimeExpr::Now => Ok(now),
            TimeExpr::Relative(d) => shift(now, *d),
            TimeExpr::Absolute(dt) => Ok(*dt),
        }
    }
}

/// Resolve an optional expression against the current instant.
pub fn resolve_or_now(expr: Option<&TimeExpr>) -> Result<DateTime<Utc>, String> {
    let now = Utc::now();
    expr.map_or(Ok(now), |e| e.resolve(now))
}

fn shift(base: DateTime<Utc>, offset: Duration) -> Result<DateTime<Utc>, String> {
    base.checked_add_signed(offset)
        .ok_or_else(|| format!("{base} shifted by {offset} is out of range"))
}

pub fn parse_time(s: &str) -> Result<TimeExpr, String> {
    let s = s.trim();

    if s.eq_ignore_ascii_case("now") {
        return Ok(TimeExpr::Now);
    }

    // Relative: T+10m, T-2h
    if s.starts_with(['t', 'T']) {
        let rest = &s[1..];
        let (neg, rest) = match rest.strip_prefix('-') {
            Some(r) => (true, r),
            None => (false, rest.strip_prefix('+').unwrap_or(rest)),
        };
        let dur = parse_duration(rest)?;
        return Ok(TimeExpr::Relative(if neg { -dur } else { dur }));
    }

    // Absolute with offset: 2026-01-12T10:00:00Z + 10m
    if let Some(idx) = s.rfind(['+', '-']) {
        if idx > 10 {
            if let Ok(base) = DateTime::parse_from_rfc3339(s[..idx].trim()) {
                let offset = &s[idx..];
                let (neg, rest) = match offset.strip_prefix('-') {
                    Some(r) => (true, r),
                    None => (false, offset.strip_prefix('+').unwrap_or(offset)),
                };
                let dur = parse_duration(rest)?;
                let base = base.with_timezone(&Utc);
                return shift(base, if neg { -dur } else { dur }).map(TimeExpr::Absolute);
            }
        }
    }

    DateTime::parse_from_rfc3339(s)
        .map(|dt| TimeExpr::Absolute(dt.with_timezone(&Utc)))
        .map_err(|e| format!("{s}: {e}"))
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s.trim())
        .map_err(|e| e.to_string())
        .and_then(|d| Duration::from_std(d).map_err(|e| e.to_string()))
}

/// serde helper for humantime strings such as `20s` or `1m 30s`.
pub fn deserialize_duration<'de, D>(deserializer: D) -> Result<std::time::Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 12, h, m, 0).unwrap()
    }

    #[test]
    fn parses_now_and_relative() {
        assert_eq!(parse_time("now").unwrap(), TimeExpr::Now);
        assert_eq!(
            parse_time("T+30m").unwrap(),
            TimeExpr::Relative(Duration::minutes(30))
        );
        assert_eq!(
            parse_time("t-2h").unwrap(),
            TimeExpr::Relative(Duration::hours(-2))
        );
        assert_eq!(
            parse_time("T+30m").unwrap().resolve(at(10, 0)),
            Ok(at(10, 30))
        );
    }

    #[test]
    fn parses_absolute() {
        assert_eq!(
            parse_time("2026-01-12T10:00:00Z").unwrap(),
            TimeExpr::Absolute(at(10, 0))
        );
        assert_eq!(
            parse_time("2026-01-12T12:00:00+02:00").unwrap(),
            TimeExpr::Absolute(at(10, 0))
        );
        assert_eq!(
            parse_time("2026-01-12T10:00:00Z + 10m").unwrap(),
            TimeExpr::Absolute(at(10, 10))
        );
        assert_eq!(
            parse_time("2026-01-12T10:00:00Z - 1h").unwrap(),
            TimeExpr::Absolute(at(9, 0))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_time("tomorrow-ish").is_err());
        assert!(parse_time("2026-13-45").is_err());
    }

    #[test]
    fn far_offsets_are_errors() {
        let far_future = parse_time("T+300000y").unwrap();
        assert!(far_future.resolve(at(10, 0)).is_err());
        assert!(parse_time("T-300000y").unwrap().resolve(at(10, 0)).is_err());
        assert!(parse_time("2026-01-12T10:00:00Z + 300000y").is_err());
        assert!(resolve_or_now(Some(&far_future)).is_err());
    }

    #[test]
    fn resolves_missing_expression_to_now() {
        let before = Utc::now();
        let resolved = resolve_or_now(None).unwrap();
        assert!(resolved >= before);
    }
}
