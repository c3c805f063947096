//! Appointment booking models.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{ModelError, ModelResult};

/// Bookable slots, identical every day.
pub const TIME_SLOTS: [&str; 12] = [
    "9:00 AM", "9:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM", "2:00 PM", "2:30 PM",
    "3:00 PM", "3:30 PM", "4:00 PM", "4:30 PM",
];

/// Where the appointment takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AppointmentType {
    Online,
    #[default]
    InClinic,
    InHome,
}

impl AppointmentType {
    pub const ALL: [AppointmentType; 3] = [
        AppointmentType::Online,
        AppointmentType::InClinic,
        AppointmentType::InHome,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AppointmentType::Online => "Online",
            AppointmentType::InClinic => "In Clinic",
            AppointmentType::InHome => "In Home",
        }
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AppointmentType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentType::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| ModelError::UnknownValue {
                kind: "appointment type",
                value: s.to_string(),
            })
    }
}

/// A confirmed booking request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentRequest {
    /// Local request ID
    pub request_id: String,
    pub date: NaiveDate,
    /// One of [`TIME_SLOTS`]
    pub time: String,
    pub appointment_type: AppointmentType,
}

impl AppointmentRequest {
    pub fn new(date: NaiveDate, time: String, appointment_type: AppointmentType) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            date,
            time,
            appointment_type,
        }
    }

    /// Date label in the confirmation popup, e.g. `Mon, Jul 15, 2024`.
    pub fn formatted_date(&self) -> String {
        format_booking_date(self.date)
    }
}

pub fn format_booking_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

/// Move a date by whole days (arrow buttons on the booking screen).
pub fn shift_date(date: NaiveDate, days: i64) -> ModelResult<NaiveDate> {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| ModelError::DateOutOfRange(format!("{date} shifted by {days} days")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots() {
        assert_eq!(TIME_SLOTS.len(), 12);
        assert_eq!(TIME_SLOTS[0], "9:00 AM");
        assert_eq!(TIME_SLOTS[11], "4:30 PM");
    }

    #[test]
    fn test_type_labels_round_trip() {
        for t in AppointmentType::ALL {
            assert_eq!(t.label().parse::<AppointmentType>().unwrap(), t);
        }
        assert!(matches!(
            "Phone".parse::<AppointmentType>(),
            Err(ModelError::UnknownValue { .. })
        ));
        assert_eq!(AppointmentType::default(), AppointmentType::InClinic);
    }

    #[test]
    fn test_formatted_date() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        let request = AppointmentRequest::new(date, "9:00 AM".into(), AppointmentType::Online);
        assert_eq!(request.formatted_date(), "Mon, Jul 15, 2024");
        assert_eq!(request.request_id.len(), 36);
    }

    #[test]
    fn test_shift_date_crosses_month() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        assert_eq!(shift_date(date, 1), Ok(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert_eq!(shift_date(date, 2), Ok(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert_eq!(shift_date(date, -28), Ok(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
    }

    #[test]
    fn test_shift_date_out_of_range() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        for days in [1_000_000_000, -1_000_000_000, i64::MAX, i64::MIN] {
            assert!(matches!(
                shift_date(date, days),
                Err(ModelError::DateOutOfRange(_))
            ));
        }
    }
}
