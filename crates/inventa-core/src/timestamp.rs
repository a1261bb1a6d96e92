//! # Timestamps
//!
//! Sale dates live in the data files as ISO-8601 strings written by several
//! generations of clients. Some carry an offset, some do not:
//!
//! ```text
//! "2026-01-05T14:30:00"              ← naive (server default, UTC wall clock)
//! "2026-01-05T14:30:00.250000"       ← naive with microseconds
//! "2026-01-05T11:30:00-03:00"        ← offset-aware (client supplied)
//! "2026-01-05T14:30:00.000Z"         ← browser `toISOString()`
//! ```
//!
//! [`Timestamp`] keeps that distinction instead of coercing everything to
//! UTC, because the two consumers treat it differently:
//!
//! - sale listing compares raw values and refuses naive-vs-aware comparisons
//! - the cash-flow report strips offsets when awareness differs
//!
//! See [`Timestamp::compare`] and [`Timestamp::naive_local`].

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Accepted layouts for offset-aware input (`%z` takes `+03:00` and `+0300`).
const AWARE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

/// Accepted layouts for naive input.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

// =============================================================================
// Timestamp
// =============================================================================

/// A point in time that may or may not carry a UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// Wall-clock time without offset information.
    Naive(NaiveDateTime),
    /// Time with an explicit UTC offset.
    Aware(DateTime<FixedOffset>),
}

impl Timestamp {
    /// Parses an ISO-8601 string.
    ///
    /// A trailing `Z` is read as `+00:00`. Date-only input means midnight.
    ///
    /// ## Example
    /// ```rust
    /// use inventa_core::timestamp::Timestamp;
    ///
    /// let ts = Timestamp::parse("2026-01-01T03:00:00.000Z").unwrap();
    /// assert!(ts.is_aware());
    /// assert_eq!(ts.to_string(), "2026-01-01T03:00:00+00:00");
    ///
    /// let ts = Timestamp::parse("2026-01-31").unwrap();
    /// assert_eq!(ts.to_string(), "2026-01-31T00:00:00");
    /// ```
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(ValidationError::Required {
                field: "date".to_string(),
            });
        }

        let normalized = match raw.strip_suffix('Z').or_else(|| raw.strip_suffix('z')) {
            Some(rest) => format!("{}+00:00", rest),
            None => raw.to_string(),
        };

        for format in AWARE_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(&normalized, format) {
                return Ok(Timestamp::Aware(dt));
            }
        }

        for format in NAIVE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, format) {
                return Ok(Timestamp::Naive(dt));
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d") {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Ok(Timestamp::Naive(midnight));
            }
        }

        Err(ValidationError::InvalidFormat {
            field: "date".to_string(),
            reason: format!("'{}' is not an ISO-8601 date-time", raw),
        })
    }

    /// Wraps a UTC instant as a naive wall-clock value.
    ///
    /// Server-assigned sale dates have always been written without an offset;
    /// keeping that shape lets naive report ranges keep matching them.
    pub fn naive_utc(instant: DateTime<Utc>) -> Self {
        Timestamp::Naive(instant.naive_utc())
    }

    /// Returns true when the value carries an offset.
    #[inline]
    pub fn is_aware(&self) -> bool {
        matches!(self, Timestamp::Aware(_))
    }

    /// Drops the offset, keeping the local wall-clock reading.
    ///
    /// `2026-01-01T10:00:00-03:00` becomes `2026-01-01T10:00:00`, not 13:00.
    pub fn naive_local(&self) -> NaiveDateTime {
        match self {
            Timestamp::Naive(dt) => *dt,
            Timestamp::Aware(dt) => dt.naive_local(),
        }
    }

    /// Orders two timestamps of the same awareness.
    ///
    /// Returns `None` when one side is naive and the other aware; there is no
    /// meaningful ordering between them without choosing a zone.
    pub fn compare(&self, other: &Timestamp) -> Option<Ordering> {
        match (self, other) {
            (Timestamp::Naive(a), Timestamp::Naive(b)) => Some(a.cmp(b)),
            (Timestamp::Aware(a), Timestamp::Aware(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Timestamp {
    /// ISO rendering: microseconds only when non-zero, offset as `+HH:MM`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let naive = self.naive_local();
        let base = if naive.nanosecond() == 0 {
            naive.format("%Y-%m-%dT%H:%M:%S").to_string()
        } else {
            naive.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
        };
        match self {
            Timestamp::Naive(_) => write!(f, "{}", base),
            Timestamp::Aware(dt) => write!(f, "{}{}", base, dt.format("%:z")),
        }
    }
}

impl FromStr for Timestamp {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timestamp::parse(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_naive_variants() {
        for input in [
            "2026-01-05T14:30:00",
            "2026-01-05 14:30:00",
            "2026-01-05T14:30",
            "  2026-01-05T14:30:00  ",
        ] {
            let ts = Timestamp::parse(input).unwrap();
            assert!(!ts.is_aware(), "{input} should be naive");
            assert_eq!(ts.to_string(), "2026-01-05T14:30:00");
        }
    }

    #[test]
    fn test_parse_keeps_microseconds() {
        let ts = Timestamp::parse("2026-01-05T14:30:00.250000").unwrap();
        assert_eq!(ts.to_string(), "2026-01-05T14:30:00.250000");
    }

    #[test]
    fn test_parse_z_suffix_as_utc() {
        let ts = Timestamp::parse("2026-01-01T03:00:00.000Z").unwrap();
        assert!(ts.is_aware());
        assert_eq!(ts.to_string(), "2026-01-01T03:00:00+00:00");
    }

    #[test]
    fn test_parse_offsets() {
        let with_colon = Timestamp::parse("2026-01-05T11:30:00-03:00").unwrap();
        let without_colon = Timestamp::parse("2026-01-05T11:30:00-0300").unwrap();
        assert_eq!(with_colon, without_colon);
        assert_eq!(with_colon.to_string(), "2026-01-05T11:30:00-03:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Timestamp::parse("").is_err());
        assert!(Timestamp::parse("   ").is_err());
        assert!(Timestamp::parse("ayer").is_err());
        assert!(Timestamp::parse("2026-13-01T00:00:00").is_err());
    }

    #[test]
    fn test_compare_same_awareness() {
        let a = Timestamp::parse("2026-01-05T11:30:00-03:00").unwrap();
        let b = Timestamp::parse("2026-01-05T14:30:00Z").unwrap();
        assert_eq!(a.compare(&b), Some(Ordering::Equal));

        let c = Timestamp::parse("2026-01-05T10:00:00").unwrap();
        let d = Timestamp::parse("2026-01-05T11:00:00").unwrap();
        assert_eq!(c.compare(&d), Some(Ordering::Less));
    }

    #[test]
    fn test_compare_mixed_awareness_is_undefined() {
        let naive = Timestamp::parse("2026-01-05T10:00:00").unwrap();
        let aware = Timestamp::parse("2026-01-05T10:00:00Z").unwrap();
        assert_eq!(naive.compare(&aware), None);
    }

    #[test]
    fn test_naive_local_keeps_wall_clock() {
        let aware = Timestamp::parse("2026-01-01T10:00:00-03:00").unwrap();
        assert_eq!(
            aware.naive_local().to_string(),
            "2026-01-01 10:00:00"
        );
    }

    #[test]
    fn test_naive_utc_is_utc_wall_clock() {
        let instant = DateTime::parse_from_rfc3339("2026-01-05T11:30:00-03:00")
            .unwrap()
            .with_timezone(&Utc);
        let ts = Timestamp::naive_utc(instant);
        assert!(!ts.is_aware());
        assert_eq!(ts.to_string(), "2026-01-05T14:30:00");
    }

    #[test]
    fn test_serde_round_trip_preserves_shape() {
        let ts: Timestamp = serde_json::from_str("\"2026-02-01T08:00:00Z\"").unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2026-02-01T08:00:00+00:00\"");
    }
}
