//! Past/upcoming split of dated records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{parse_field, TemporalRecord};

/// Disjoint past and future subsets of a record list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partitioned<T> {
    /// Event date strictly before the reference instant
    pub past: Vec<T>,
    /// Event date at or after the reference instant, or unparseable
    pub future: Vec<T>,
}

impl<T> Partitioned<T> {
    pub fn len(&self) -> usize {
        self.past.len() + self.future.len()
    }

    pub fn is_empty(&self) -> bool {
        self.past.is_empty() && self.future.is_empty()
    }
}

impl<T> Default for Partitioned<T> {
    fn default() -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
        }
    }
}

/// Split records into past and future relative to `now`.
///
/// The boundary belongs to the future: an appointment happening right now is
/// still upcoming. Records whose event date does not parse go to `future`, so
/// a malformed booking stays visible in the upcoming list. Input order is
/// kept within each side.
pub fn partition<T>(records: &[T], now: DateTime<Utc>) -> Partitioned<T>
where
    T: TemporalRecord + Clone,
{
    let mut split = Partitioned::default();

    for record in records {
        match parse_field(record.record_id(), record.event_date()) {
            Some(instant) if instant < now => split.past.push(record.clone()),
            _ => split.future.push(record.clone()),
        }
    }

    tracing::debug!(
        past = split.past.len(),
        future = split.future.len(),
        "Partitioned records"
    );

    split
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::testing::{ids, TestRecord};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_split_past_and_future() {
        let records = vec![
            TestRecord::new("old", "2024-07-01"),
            TestRecord::new("soon", "2024-07-20"),
            TestRecord::new("earlier-today", "2024-07-15T09:00:00Z"),
            TestRecord::new("later-today", "2024-07-15T11:00:00Z"),
        ];

        let split = partition(&records, now());
        assert_eq!(ids(&split.past), ["old", "earlier-today"]);
        assert_eq!(ids(&split.future), ["soon", "later-today"]);
    }

    #[test]
    fn test_boundary_is_future() {
        let records = vec![TestRecord::new("now", "2024-07-15T10:00:00Z")];
        let split = partition(&records, now());
        assert!(split.past.is_empty());
        assert_eq!(ids(&split.future), ["now"]);
    }

    #[test]
    fn test_bare_date_today_is_past_after_midnight() {
        // A bare date is midnight UTC, which is before 10:00
        let records = vec![TestRecord::new("today", "2024-07-15")];
        let split = partition(&records, now());
        assert_eq!(ids(&split.past), ["today"]);
    }

    #[test]
    fn test_invalid_date_goes_to_future() {
        let records = vec![
            TestRecord::new("bad", "not-a-date"),
            TestRecord::new("old", "2020-01-01"),
        ];
        let split = partition(&records, now());
        assert_eq!(ids(&split.past), ["old"]);
        assert_eq!(ids(&split.future), ["bad"]);
        assert_eq!(split.len(), records.len());
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<TestRecord> = Vec::new();
        let split = partition(&records, now());
        assert!(split.is_empty());
    }
}
