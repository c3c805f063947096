//! Therapy session models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::ModelError;
use crate::temporal::TemporalRecord;

/// Wire format for therapy dates.
pub const THERAPY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for therapy start/end times.
pub const THERAPY_TIME_FORMAT: &str = "%H:%M";

/// A scheduled or completed therapy session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TherapySession {
    /// Server-assigned document ID
    pub id: String,
    pub patient_id: String,
    /// Clinic-facing therapy number
    pub therapy_id: String,
    pub therapy_type: String,
    pub remarks: String,
    /// Video session link
    pub link: String,
    /// Session date (`YYYY-MM-DD` or full ISO-8601)
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub cost: Option<String>,
}

impl TherapySession {
    /// "start - end" label, if both times are known.
    pub fn time_range(&self) -> Option<String> {
        match (&self.start_time, &self.end_time) {
            (Some(start), Some(end)) => Some(format!("{start} - {end}")),
            _ => None,
        }
    }
}

impl TemporalRecord for TherapySession {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn timestamp(&self) -> &str {
        &self.date
    }
}

/// Replace the session with a matching ID, keeping list order.
pub fn apply_update(sessions: &[TherapySession], updated: &TherapySession) -> Vec<TherapySession> {
    sessions
        .iter()
        .map(|session| {
            if session.id == updated.id {
                updated.clone()
            } else {
                session.clone()
            }
        })
        .collect()
}

/// Request to schedule a new therapy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTherapy {
    pub therapy_type: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    pub duration: Option<String>,
    pub remarks: String,
    pub cost: Option<String>,
}

impl NewTherapy {
    /// Create a request with wire-formatted date and times.
    pub fn new(therapy_type: String, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            therapy_type,
            date: date.format(THERAPY_DATE_FORMAT).to_string(),
            start_time: start.format(THERAPY_TIME_FORMAT).to_string(),
            end_time: end.format(THERAPY_TIME_FORMAT).to_string(),
            duration: None,
            remarks: String::new(),
            cost: None,
        }
    }
}

/// Clinical area a patient's therapy course belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TherapyCategory {
    Musculoskeletal,
    Neurological,
    Cardiorespiratory,
    Paediatrics,
    WomensHealth,
    Geriatrics,
    PostSurgicalRehabilitation,
}

impl TherapyCategory {
    pub const ALL: [TherapyCategory; 7] = [
        TherapyCategory::Musculoskeletal,
        TherapyCategory::Neurological,
        TherapyCategory::Cardiorespiratory,
        TherapyCategory::Paediatrics,
        TherapyCategory::WomensHealth,
        TherapyCategory::Geriatrics,
        TherapyCategory::PostSurgicalRehabilitation,
    ];

    /// Label shown in the category picker and sent to the server.
    pub fn label(&self) -> &'static str {
        match self {
            TherapyCategory::Musculoskeletal => "Musculoskeletal",
            TherapyCategory::Neurological => "Neurological",
            TherapyCategory::Cardiorespiratory => "Cardiorespiratory",
            TherapyCategory::Paediatrics => "Paediatrics",
            TherapyCategory::WomensHealth => "Women's Health",
            TherapyCategory::Geriatrics => "Geriatrics",
            TherapyCategory::PostSurgicalRehabilitation => "Post surgical rehabilitation",
        }
    }
}

impl fmt::Display for TherapyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TherapyCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TherapyCategory::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| ModelError::UnknownValue {
                kind: "therapy category",
                value: s.to_string(),
            })
    }
}

const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// Length of a therapy course in days, rounded up.
///
/// Order of the endpoints does not matter; any part of a day counts as a
/// whole day.
pub fn course_duration_days(start: DateTime<Utc>, end: DateTime<Utc>) -> u64 {
    let millis = end
        .signed_duration_since(start)
        .num_milliseconds()
        .unsigned_abs();
    millis.div_ceil(MILLIS_PER_DAY)
}

/// Course length label, e.g. `12 days`.
pub fn course_duration_label(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    format!("{} days", course_duration_days(start, end))
}
