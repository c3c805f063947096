//! Patient profile update form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::registration::{checked_email, normalize_phone, required};
use super::{FormError, FormResult};
use crate::models::{course_duration_label, Patient, PatientUpdateRequest, TherapyCategory};

/// Raw input on the update screen.
///
/// Everything beyond the names is optional. The therapy course dates come
/// from the start/end pickers and only feed the duration label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub address1: String,
    pub address2: String,
    pub age: String,
    pub blood_group: String,
    pub symptoms: String,
    pub diagnosis: String,
    pub therapy_type: String,
    /// Category label, empty when none is picked
    pub therapy_category: String,
    pub course_start: DateTime<Utc>,
    pub course_end: DateTime<Utc>,
}

impl PatientUpdate {
    /// Prefill from a patient record. Both course dates start at `now`.
    pub fn from_patient(patient: &Patient, now: DateTime<Utc>) -> Self {
        Self {
            first_name: patient.first_name.clone(),
            last_name: patient.last_name.clone(),
            email: patient.email.clone(),
            phone: patient.phone.clone(),
            gender: String::new(),
            address1: String::new(),
            address2: String::new(),
            age: String::new(),
            blood_group: String::new(),
            symptoms: String::new(),
            diagnosis: String::new(),
            therapy_type: String::new(),
            therapy_category: String::new(),
            course_start: now,
            course_end: now,
        }
    }

    /// Duration label shown under the date pickers.
    pub fn duration_label(&self) -> String {
        course_duration_label(self.course_start, self.course_end)
    }

    /// Validate and normalize into a request.
    pub fn validate(&self) -> FormResult<PatientUpdateRequest> {
        let first_name = required(&self.first_name, "First name")?;
        let last_name = required(&self.last_name, "Last name")?;

        let email = match self.email.trim() {
            "" => String::new(),
            raw => checked_email(raw)?,
        };
        let phone = match self.phone.trim() {
            "" => String::new(),
            raw => normalize_phone(raw)?,
        };

        let age = match self.age.trim() {
            "" => None,
            raw => match raw.parse::<u8>() {
                Ok(age) if age <= 130 => Some(age),
                _ => {
                    return Err(FormError::Validation(
                        "Age must be a whole number from 0 to 130".into(),
                    ))
                }
            },
        };

        let therapy_category = match self.therapy_category.trim() {
            "" => None,
            raw => Some(raw.parse::<TherapyCategory>()?),
        };

        Ok(PatientUpdateRequest {
            first_name,
            last_name,
            email,
            phone,
            gender: self.gender.trim().to_string(),
            address1: self.address1.trim().to_string(),
            address2: self.address2.trim().to_string(),
            age,
            blood_group: self.blood_group.trim().to_string(),
            symptoms: self.symptoms.trim().to_string(),
            diagnosis: self.diagnosis.trim().to_string(),
            therapy_type: self.therapy_type.trim().to_string(),
            therapy_category,
            therapy_duration: self.duration_label(),
        })
    }
}
