//! Civil date type
//!
//! Strict `YYYY-MM-DD` parsing and pure Gregorian day arithmetic.

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest day span accepted from arguments or data files (100 years).
///
/// Chrono date arithmetic panics once a date leaves its representable
/// range, so day counts are bounded before any `add_days` loop.
pub const MAX_DAY_SPAN: i64 = 36_500;

/// Validate a day count: strictly positive and at most [`MAX_DAY_SPAN`].
pub fn check_day_span(days: i64) -> Result<i64> {
    if days <= 0 {
        return Err(Error::Range(format!("day count must be > 0, got {days}")));
    }
    if days > MAX_DAY_SPAN {
        return Err(Error::Range(format!(
            "day count must be <= {MAX_DAY_SPAN}, got {days}"
        )));
    }
    Ok(days)
}

/// A calendar date, totally ordered by (year, month, day)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CivilDate(NaiveDate);

impl CivilDate {
    /// Parse the fixed-width `YYYY-MM-DD` pattern.
    ///
    /// Exactly 10 bytes, hyphens at offsets 4 and 7, digits everywhere else.
    /// Semantically invalid calendar dates (2026-02-30) are rejected as well.
    pub fn parse(s: &str) -> Result<Self> {
        let b = s.as_bytes();
        if b.len() != 10 || b[4] != b'-' || b[7] != b'-' {
            return Err(Error::Format(format!(
                "bad date {s:?}, expected YYYY-MM-DD"
            )));
        }
        for (i, c) in b.iter().enumerate() {
            if i != 4 && i != 7 && !c.is_ascii_digit() {
                return Err(Error::Format(format!(
                    "bad date {s:?}, expected YYYY-MM-DD"
                )));
            }
        }

        let bad = || Error::Format(format!("bad date {s:?}, expected YYYY-MM-DD"));
        let y: i32 = s[0..4].parse().map_err(|_| bad())?;
        let m: u32 = s[5..7].parse().map_err(|_| bad())?;
        let d: u32 = s[8..10].parse().map_err(|_| bad())?;

        NaiveDate::from_ymd_opt(y, m, d)
            .map(Self)
            .ok_or_else(|| Error::Format(format!("invalid calendar date {s:?}")))
    }

    /// Construct from components; returns `None` for invalid calendar dates
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Signed day offset, month/year rollover handled by the calendar
    pub fn add_days(self, delta: i64) -> Self {
        Self(self.0 + Duration::days(delta))
    }

    /// The next calendar day
    pub fn succ(self) -> Self {
        self.add_days(1)
    }

    /// Count of days in the closed interval `[start, end]`
    pub fn days_between_inclusive(start: Self, end: Self) -> Result<i64> {
        if start > end {
            return Err(Error::Range(format!(
                "inverted date range: {start} > {end}"
            )));
        }
        Ok((end.0 - start.0).num_days() + 1)
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CivilDate {
        CivilDate::parse(s).unwrap()
    }

    #[test]
    fn test_parse_format_round_trip() {
        for s in ["2026-01-03", "0099-12-31", "2024-02-29"] {
            assert_eq!(date(s).to_string(), s);
        }
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert!(CivilDate::parse("2026-1-03").is_err());
        assert!(CivilDate::parse("2026/01/03").is_err());
        assert!(CivilDate::parse("2026-01-03 ").is_err());
        assert!(CivilDate::parse("26-01-03").is_err());
        assert!(CivilDate::parse("2026-0a-03").is_err());
        assert!(CivilDate::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_invalid_calendar_dates() {
        assert!(CivilDate::parse("2026-02-30").is_err());
        assert!(CivilDate::parse("2026-13-01").is_err());
        assert!(CivilDate::parse("2026-00-10").is_err());
        assert!(CivilDate::parse("2025-02-29").is_err()); // not a leap year
    }

    #[test]
    fn test_add_days_rollover() {
        assert_eq!(date("2026-01-31").add_days(1), date("2026-02-01"));
        assert_eq!(date("2025-12-31").add_days(1), date("2026-01-01"));
        assert_eq!(date("2024-02-28").add_days(2), date("2024-03-01")); // leap
        assert_eq!(date("2026-03-01").add_days(-1), date("2026-02-28"));
    }

    #[test]
    fn test_add_days_round_trip() {
        let d = date("2026-01-17");
        for n in [-400, -1, 0, 1, 30, 365, 10_000] {
            assert_eq!(d.add_days(n).add_days(-n), d);
        }
    }

    #[test]
    fn test_days_between_inclusive() {
        let d = date("2026-01-01");
        assert_eq!(CivilDate::days_between_inclusive(d, d).unwrap(), 1);
        assert_eq!(
            CivilDate::days_between_inclusive(d, d.add_days(6)).unwrap(),
            7
        );
    }

    #[test]
    fn test_days_between_inverted_is_error() {
        let d = date("2026-01-10");
        assert!(CivilDate::days_between_inclusive(d, d.add_days(-1)).is_err());
    }

    #[test]
    fn test_check_day_span_bounds() {
        assert_eq!(check_day_span(1).unwrap(), 1);
        assert_eq!(check_day_span(7).unwrap(), 7);
        assert_eq!(check_day_span(MAX_DAY_SPAN).unwrap(), MAX_DAY_SPAN);

        assert!(check_day_span(0).is_err());
        assert!(check_day_span(-3).is_err());
        assert!(check_day_span(MAX_DAY_SPAN + 1).is_err());
        // a huge but parseable count must be an error, not an overflow
        assert!(check_day_span(i64::MAX).is_err());
        assert!(check_day_span(100_000_000).is_err());
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        assert!(date("2025-12-31") < date("2026-01-01"));
        assert!(date("2026-01-02") < date("2026-02-01"));
        assert!(date("2026-02-01") < date("2026-02-02"));
    }
}
