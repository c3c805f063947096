//! Date and name ordering for record lists.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::{record_instant, TemporalError, TemporalRecord};

/// Ordering selected by the list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Most recent first
    #[default]
    Date,
    /// Display name, A to Z
    Name,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Date => "date",
            SortMode::Name => "name",
        }
    }

    /// Apply this ordering to a record list.
    pub fn sort<T: TemporalRecord + Clone>(&self, records: &[T]) -> Vec<T> {
        match self {
            SortMode::Date => sort_by_date(records),
            SortMode::Name => sort_by_name(records),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(SortMode::Date),
            "name" => Ok(SortMode::Name),
            other => Err(TemporalError::InvalidArgument(format!(
                "unknown sort mode '{other}'"
            ))),
        }
    }
}

/// Sort by timestamp, most recent first.
///
/// Stable. Records with unparseable timestamps go last in input order.
pub fn sort_by_date<T>(records: &[T]) -> Vec<T>
where
    T: TemporalRecord + Clone,
{
    let mut keyed: Vec<(Option<DateTime<Utc>>, &T)> = records
        .iter()
        .map(|record| (record_instant(record), record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| most_recent_first(a, b));

    keyed.into_iter().map(|(_, record)| record.clone()).collect()
}

/// Sort by display name, ascending, ignoring case and accents.
///
/// `Émile` sorts between `Ana` and `Zoe`. Names differing only in accents
/// keep the unaccented form first. Stable. Records without a display name go
/// last in input order.
pub fn sort_by_name<T>(records: &[T]) -> Vec<T>
where
    T: TemporalRecord + Clone,
{
    let mut keyed: Vec<(Option<CollationKey>, &T)> = records
        .iter()
        .map(|record| (record.display_name().map(|name| collation_key(&name)), record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    keyed.into_iter().map(|(_, record)| record.clone()).collect()
}

/// Name comparison key: accent-stripped lowercase, then plain lowercase.
pub type CollationKey = (String, String);

/// Build the key [`sort_by_name`] orders by.
pub fn collation_key(name: &str) -> CollationKey {
    let lower = name.to_lowercase();
    let base = lower.nfd().filter(|c| !is_combining_mark(*c)).collect();
    (base, lower)
}

/// Lowercased display name used for search.
pub(crate) fn fold_name<T: TemporalRecord>(record: &T) -> Option<String> {
    record.display_name().map(|name| name.to_lowercase())
}

fn most_recent_first(a: &Option<DateTime<Utc>>, b: &Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
