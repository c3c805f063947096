//! Recency windows for record lists.
//!
//! Windows use fixed day counts (7/30/365), not calendar months or years.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{record_instant, TemporalError, TemporalRecord};

/// Relative time range used to filter records by recency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateWindow {
    /// No filtering
    #[default]
    All,
    /// Last 7 days
    OneWeek,
    /// Last 30 days
    OneMonth,
    /// Last 365 days
    OneYear,
}

impl DateWindow {
    pub const ALL: [DateWindow; 4] = [
        DateWindow::All,
        DateWindow::OneWeek,
        DateWindow::OneMonth,
        DateWindow::OneYear,
    ];

    /// Length of the window in days, `None` for [`DateWindow::All`].
    pub fn span_days(&self) -> Option<i64> {
        match self {
            DateWindow::All => None,
            DateWindow::OneWeek => Some(7),
            DateWindow::OneMonth => Some(30),
            DateWindow::OneYear => Some(365),
        }
    }

    /// Earliest instant still inside the window.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.span_days().map(|days| now - Duration::days(days))
    }

    /// Check whether a parsed timestamp falls inside the window.
    ///
    /// Unparseable timestamps only match [`DateWindow::All`].
    pub fn contains(&self, instant: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match (self.cutoff(now), instant) {
            (None, _) => true,
            (Some(cutoff), Some(instant)) => instant >= cutoff,
            (Some(_), None) => false,
        }
    }

    /// Identifier used by the UI picker.
    pub fn as_str(&self) -> &'static str {
        match self {
            DateWindow::All => "all",
            DateWindow::OneWeek => "oneWeek",
            DateWindow::OneMonth => "oneMonth",
            DateWindow::OneYear => "oneYear",
        }
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateWindow {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateWindow::ALL
            .into_iter()
            .find(|w| w.as_str() == s)
            .ok_or_else(|| TemporalError::InvalidArgument(format!("unknown date window '{s}'")))
    }
}

/// Keep the records whose timestamp falls inside `window`.
pub fn filter_by_window<T>(records: &[T], window: DateWindow, now: DateTime<Utc>) -> Vec<T>
where
    T: TemporalRecord + Clone,
{
    if window == DateWindow::All {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| window.contains(record_instant(*record), now))
        .cloned()
        .collect()
}
