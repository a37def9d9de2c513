//! The committed period a movement list is loaded for.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::DateRangeError;

/// Placeholder for a missing bound in cache keys.
const NO_DATE: &str = "sem_data";

/// A possibly open-ended period. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day, if bounded.
    pub start: Option<NaiveDate>,
    /// Last day, if bounded.
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// A closed range. The bounds are swapped if given in reverse.
    #[must_use]
    pub fn between(a: NaiveDate, b: NaiveDate) -> Self {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// No bounds at all.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Reads `YYYY-MM-DD` bounds. Blank text means unbounded on that side.
    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeError> {
        let range = Self {
            start: parse_bound(start)?,
            end: parse_bound(end)?,
        };
        if let (Some(s), Some(e)) = (range.start, range.end) {
            if s > e {
                return Err(DateRangeError::Inverted {
                    start: start.trim().to_string(),
                    end: end.trim().to_string(),
                });
            }
        }
        Ok(range)
    }

    /// True when neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether `day` lies inside the range.
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start.is_none_or(|s| s <= day) && self.end.is_none_or(|e| day <= e)
    }

    /// `"{start}_{end}"` with ISO dates, `sem_data` for a missing bound.
    #[must_use]
    pub fn cache_key(&self) -> String {
        let start = self.start.map_or_else(|| NO_DATE.to_string(), iso);
        let end = self.end.map_or_else(|| NO_DATE.to_string(), iso);
        format!("{start}_{end}")
    }

    /// ISO start, or an empty string.
    #[must_use]
    pub fn start_iso(&self) -> String {
        self.start.map(iso).unwrap_or_default()
    }

    /// ISO end, or an empty string.
    #[must_use]
    pub fn end_iso(&self) -> String {
        self.end.map(iso).unwrap_or_default()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cache_key())
    }
}

fn iso(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

fn parse_bound(raw: &str) -> Result<Option<NaiveDate>, DateRangeError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| DateRangeError::InvalidDate(raw.to_string()))
}
