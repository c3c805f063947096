//! Appointment booking form.

use chrono::NaiveDate;

use super::{FormError, FormResult};
use crate::models::{shift_date, AppointmentRequest, AppointmentType, TIME_SLOTS};

/// Selections on the booking screen.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentBooking {
    date: NaiveDate,
    slot: Option<usize>,
    appointment_type: AppointmentType,
}

impl AppointmentBooking {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            slot: None,
            appointment_type: AppointmentType::default(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn slot(&self) -> Option<&'static str> {
        self.slot.map(|i| TIME_SLOTS[i])
    }

    pub fn appointment_type(&self) -> AppointmentType {
        self.appointment_type
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    /// Step the selected date forwards or backwards.
    ///
    /// A step past the supported calendar range leaves the date unchanged.
    pub fn change_date(&mut self, days: i64) -> FormResult<()> {
        self.date = shift_date(self.date, days)?;
        Ok(())
    }

    pub fn select_slot(&mut self, index: usize) -> FormResult<()> {
        if index >= TIME_SLOTS.len() {
            return Err(FormError::Validation(format!("No time slot at index {index}")));
        }
        self.slot = Some(index);
        Ok(())
    }

    pub fn set_type(&mut self, appointment_type: AppointmentType) {
        self.appointment_type = appointment_type;
    }

    /// Build the booking request. A slot must be selected.
    pub fn book(&self) -> FormResult<AppointmentRequest> {
        let slot = self
            .slot()
            .ok_or_else(|| FormError::Validation("Please select a time slot".into()))?;

        let request = AppointmentRequest::new(self.date, slot.to_string(), self.appointment_type);
        tracing::info!(
            date = %request.formatted_date(),
            time = %request.time,
            kind = %request.appointment_type,
            "Appointment booked"
        );
        Ok(request)
    }
}
