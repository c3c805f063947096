//! Temporal partition and sort utility for dated records.
//!
//! Pipeline used by the list screens:
//!
//! ```text
//! records → search filter → DateWindow filter → partition (optional) → sort → rendered list
//! ```
//!
//! Every stage is a pure function over a borrowed slice and returns a new
//! `Vec`; no stage mutates its input.

mod clock;
mod partition;
mod query;
mod sort;
mod window;

pub use clock::*;
pub use partition::*;
pub use query::*;
pub use sort::*;
pub use window::*;

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use thiserror::Error;

/// Temporal utility errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type TemporalResult<T> = Result<T, TemporalError>;

/// Naive date-time layouts accepted after RFC 3339 fails.
///
/// `%.f` also accepts a missing fractional part.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A record carrying at least one date field.
pub trait TemporalRecord {
    /// Opaque identifier.
    fn record_id(&self) -> &str;

    /// ISO-8601 source-of-truth timestamp (creation or event date).
    fn timestamp(&self) -> &str;

    /// Composed name used for name ordering and search.
    fn display_name(&self) -> Option<Cow<'_, str>> {
        None
    }

    /// Date compared against "now" when partitioning.
    fn event_date(&self) -> &str {
        self.timestamp()
    }
}

/// Parse an ISO-8601 string into an instant.
///
/// Naive values (no offset) are read as UTC. A bare date is midnight UTC.
pub fn parse_instant(raw: &str) -> TemporalResult<DateTime<Utc>> {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(TemporalError::InvalidDate(raw.to_string()))
}

/// Parse a record's timestamp, logging and discarding failures.
pub(crate) fn record_instant<T: TemporalRecord>(record: &T) -> Option<DateTime<Utc>> {
    parse_field(record.record_id(), record.timestamp())
}

pub(crate) fn parse_field(id: &str, raw: &str) -> Option<DateTime<Utc>> {
    match parse_instant(raw) {
        Ok(instant) => Some(instant),
        Err(e) => {
            tracing::debug!(record_id = id, "{e}");
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Minimal record for exercising the utility in unit tests.
    #[derive(Debug, Clone, PartialEq)]
    pub struct TestRecord {
        pub id: String,
        pub timestamp: String,
        pub name: Option<String>,
    }

    impl TestRecord {
        pub fn new(id: &str, timestamp: &str) -> Self {
            Self {
                id: id.into(),
                timestamp: timestamp.into(),
                name: None,
            }
        }

        pub fn named(id: &str, timestamp: &str, name: &str) -> Self {
            Self {
                name: Some(name.into()),
                ..Self::new(id, timestamp)
            }
        }
    }

    impl TemporalRecord for TestRecord {
        fn record_id(&self) -> &str {
            &self.id
        }

        fn timestamp(&self) -> &str {
            &self.timestamp
        }

        fn display_name(&self) -> Option<Cow<'_, str>> {
            self.name.as_deref().map(Cow::Borrowed)
        }
    }

    pub fn ids<T: TemporalRecord>(records: &[T]) -> Vec<&str> {
        records.iter().map(|r| r.record_id()).collect()
    }
}
