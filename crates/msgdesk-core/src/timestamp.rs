// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Timestamp parsing and serde helpers.
//!
//! Record stores hand timestamps back as strings. Hosted Postgres emits
//! RFC 3339 with a numeric offset, SQLite emits whatever was written, and
//! hand-edited rows sometimes lack an offset entirely. Everything is
//! normalized to UTC.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// A point in time as stored in a record.
pub type Timestamp = DateTime<Utc>;

/// Returns the current instant.
pub fn now() -> Timestamp {
    Utc::now()
}

/// Parses a stored timestamp string.
///
/// Accepts RFC 3339 with any offset, and offset-less date-times which are
/// taken as UTC. Returns `None` for anything else.
pub fn parse(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // Postgres `timestamp` without zone, with either separator.
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    None
}

/// Formats a timestamp the way it is written to a store.
pub fn format(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter for a required timestamp column.
pub mod required {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Timestamp;

    pub fn serialize<S: Serializer>(ts: &Timestamp, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp `{raw}`")))
    }
}

/// Serde adapter for an optional timestamp column.
///
/// `null` and the empty string both decode as `None`.
pub mod optional {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Timestamp;

    pub fn serialize<S: Serializer>(ts: &Option<Timestamp>, s: S) -> Result<S::Ok, S::Error> {
        match ts {
            Some(ts) => s.serialize_str(&super::format(ts)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Timestamp>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => super::parse(s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp `{s}`"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_postgres_offset_format() {
        let ts = parse("2026-03-01T10:15:30.123456+00:00").unwrap();
        assert_eq!(
            ts,
            Utc.with_ymd_and_hms(2026, 3, 1, 10, 15, 30).unwrap()
                + chrono::Duration::microseconds(123456)
        );
    }

    #[test]
    fn converts_non_utc_offsets() {
        let ts = parse("2026-03-01T12:00:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn offsetless_timestamps_are_utc() {
        let a = parse("2026-03-01T10:00:00").unwrap();
        let b = parse("2026-03-01 10:00:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse("yesterday").is_none());
        assert!(parse("").is_none());
    }

    #[test]
    fn format_is_rfc3339_millis_zulu() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format(&ts), "2026-01-02T03:04:05.000Z");
    }
}
