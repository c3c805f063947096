//! Search + window + sort pipeline behind the patient list screen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{filter_by_window, fold_name, DateWindow, SortMode, TemporalRecord, TemporalResult};

/// User-selected list options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring matched against the display name
    pub search: String,
    pub window: DateWindow,
    pub sort: SortMode,
}

impl ListQuery {
    pub fn new(search: impl Into<String>, window: DateWindow, sort: SortMode) -> Self {
        Self {
            search: search.into(),
            window,
            sort,
        }
    }

    /// Build from the raw picker values.
    pub fn from_ui(search: &str, window: &str, sort: &str) -> TemporalResult<Self> {
        Ok(Self::new(search, window.parse()?, sort.parse()?))
    }

    /// Check a record against the search text.
    ///
    /// An empty search matches everything, including unnamed records.
    pub fn matches_search<T: TemporalRecord>(&self, record: &T) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        fold_name(record).is_some_and(|name| name.contains(&needle))
    }

    /// Run search, window filter and sort, in that order.
    pub fn apply<T>(&self, records: &[T], now: DateTime<Utc>) -> Vec<T>
    where
        T: TemporalRecord + Clone,
    {
        let searched: Vec<T> = records
            .iter()
            .filter(|record| self.matches_search(*record))
            .cloned()
            .collect();

        let windowed = filter_by_window(&searched, self.window, now);
        let sorted = self.sort.sort(&windowed);

        tracing::debug!(
            total = records.len(),
            matched = sorted.len(),
            window = %self.window,
            sort = %self.sort,
            "Applied list query"
        );

        sorted
    }
}
