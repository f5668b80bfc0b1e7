//! Time-window filtering of transaction logs.
//!
//! History queries look back a number of days and/or hours from "now". This module
//! turns that lookback into a cutoff instant and keeps the log entries at or after it.

use crate::{
    errors::{Error, Result},
    models::TransactionRecord,
};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// Naive formats accepted in addition to RFC 3339; interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
];

/// Largest `days` value the history command offers.
pub const MAX_DAYS: u32 = 36_500;
/// Largest `hours` value the history command offers.
pub const MAX_HOURS: u32 = 876_000;

/// How far back a history query reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookback {
    days: u32,
    hours: u32,
}

impl Default for Lookback {
    fn default() -> Self {
        Self { days: 1, hours: 0 }
    }
}

impl Lookback {
    /// Builds a lookback from optional command arguments.
    ///
    /// Neither given means one day. Both given are summed.
    ///
    /// # Errors
    /// Returns [`Error::InvalidLookback`] if a value is given but is zero.
    pub fn from_parts(days: Option<u32>, hours: Option<u32>) -> Result<Self> {
        if days == Some(0) || hours == Some(0) {
            return Err(Error::InvalidLookback {
                message: "Days and hours must be positive whole numbers.".to_string(),
            });
        }
        match (days, hours) {
            (None, None) => Ok(Self::default()),
            (days, hours) => Ok(Self {
                days: days.unwrap_or(0),
                hours: hours.unwrap_or(0),
            }),
        }
    }

    /// Total length of the window.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::days(i64::from(self.days)) + Duration::hours(i64::from(self.hours))
    }

    /// The earliest instant still inside the window ending at `now`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidLookback`] if the window reaches past the earliest
    /// representable date.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        now.checked_sub_signed(self.duration())
            .ok_or_else(|| Error::InvalidLookback {
                message: format!("A lookback of {} is too long.", self.label()),
            })
    }

    /// Short label like `3 days`, `12 hours` or `1 day 6 hours`.
    #[must_use]
    pub fn label(&self) -> String {
        let unit = |n: u32, singular: &str| {
            if n == 1 {
                format!("1 {singular}")
            } else {
                format!("{n} {singular}s")
            }
        };
        match (self.days, self.hours) {
            (d, 0) => unit(d, "day"),
            (0, h) => unit(h, "hour"),
            (d, h) => format!("{} {}", unit(d, "day"), unit(h, "hour")),
        }
    }
}

/// Parses a timestamp sent by the API.
///
/// Accepts RFC 3339 and a few naive `YYYY-MM-DD HH:MM:SS` layouts (taken as UTC).
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Returns the entries of `log` traded at or after `since`, in their original order.
///
/// Entries whose timestamp cannot be parsed are dropped.
pub fn filter_since(log: &[TransactionRecord], since: DateTime<Utc>) -> Vec<&TransactionRecord> {
    log.iter()
        .filter(|entry| match parse_timestamp(&entry.traded_at) {
            Some(traded_at) => traded_at >= since,
            None => {
                tracing::debug!(
                    "Dropping history entry with unparseable timestamp {:?}",
                    entry.traded_at
                );
                false
            }
        })
        .collect()
}
