//! Patient models.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::TherapyCategory;
use crate::temporal::TemporalRecord;

/// A registered clinic patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Server-assigned ID
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Phone number including country prefix
    pub phone: String,
    pub email: String,
    /// Registration timestamp (ISO-8601)
    pub created_at: String,
}

impl Patient {
    /// Create a patient with a fresh local ID, registered now.
    pub fn new(first_name: String, last_name: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            first_name,
            last_name,
            phone: String::new(),
            email: String::new(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// First and last name joined by a space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl TemporalRecord for Patient {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn timestamp(&self) -> &str {
        &self.created_at
    }

    fn display_name(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Owned(self.full_name()))
    }
}

/// Validated registration data, ready to post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Phone number with country prefix
    pub phone: String,
}

/// Validated profile and clinical details for an existing patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientUpdateRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Phone number with country prefix, empty if not given
    pub phone: String,
    pub gender: String,
    pub address1: String,
    pub address2: String,
    pub age: Option<u8>,
    pub blood_group: String,
    pub symptoms: String,
    pub diagnosis: String,
    pub therapy_type: String,
    pub therapy_category: Option<TherapyCategory>,
    /// Course length label, e.g. `12 days`
    pub therapy_duration: String,
}
