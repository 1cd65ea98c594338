//! Time utilities: payload timestamp parsing and wall-clock "now".
//!
//! Every timestamp in a schedule shares one implicit zone, so records are kept
//! as naive wall-clock values. Offsets present in the payload are dropped
//! after parsing; the wall-clock reading is what the day grid renders.

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// Wall-clock instant in the schedule's implicit zone.
pub type Timestamp = NaiveDateTime;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unparsable timestamp '{raw}'")]
pub struct TimestampError {
    pub raw: String,
}

/// Parse a payload timestamp such as `2024-01-01T22:00:00+02:00`.
///
/// RFC 3339 values keep their local wall-clock reading; naive ISO-8601 values
/// (with `T` or a space, with or without seconds) are taken as-is.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp, TimestampError> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| TimestampError { raw: s.to_string() })
}

/// Current wall-clock time in an IANA zone like "Africa/Johannesburg".
pub fn local_now(tz: &str) -> Result<Timestamp> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(Utc::now().with_timezone(&tz).naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn rfc3339_keeps_wall_clock() {
        assert_eq!(parse_timestamp("2024-01-01T22:00:00+02:00").unwrap(), at(22, 0));
    }

    #[test]
    fn naive_variants_parse() {
        assert_eq!(parse_timestamp("2024-01-01T22:00").unwrap(), at(22, 0));
        assert_eq!(parse_timestamp("2024-01-01 22:30:00").unwrap(), at(22, 30));
        assert_eq!(parse_timestamp(" 2024-01-01 08:15 ").unwrap(), at(8, 15));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = parse_timestamp("tomorrow-ish").unwrap_err();
        assert_eq!(err.raw, "tomorrow-ish");
    }

    #[test]
    fn unknown_timezone_errors() {
        assert!(local_now("Mars/Olympus_Mons").is_err());
        assert!(local_now("Africa/Johannesburg").is_ok());
    }
}
