//! Patient documents.

use physio_core::models::{Patient, PatientUpdateRequest, RegistrationRequest};
use serde::{Deserialize, Serialize};

use crate::{PayloadError, PayloadResult};

/// Patient document as stored by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPatient {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub patient_first_name: String,
    #[serde(default)]
    pub patient_last_name: String,
    #[serde(default)]
    pub patient_phone: String,
    #[serde(default)]
    pub patient_email: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

impl From<RawPatient> for Patient {
    fn from(raw: RawPatient) -> Self {
        Patient {
            id: raw.id,
            first_name: raw.patient_first_name,
            last_name: raw.patient_last_name,
            phone: raw.patient_phone,
            email: raw.patient_email,
            created_at: raw.created_at,
        }
    }
}

#[derive(Deserialize)]
struct PatientEnvelope {
    #[serde(rename = "patientData")]
    patient_data: Option<RawPatient>,
}

#[derive(Serialize)]
struct RegistrationBody<'a> {
    patient_first_name: &'a str,
    patient_last_name: &'a str,
    patient_email: &'a str,
    patient_phone: &'a str,
}

#[derive(Serialize)]
struct PatientUpdateBody<'a> {
    patient_first_name: &'a str,
    patient_last_name: &'a str,
    patient_email: &'a str,
    patient_phone: &'a str,
    patient_gender: &'a str,
    patient_address1: &'a str,
    patient_address2: &'a str,
    patient_age: String,
    #[serde(rename = "patient_bloodGroup")]
    patient_blood_group: &'a str,
    patient_symptoms: &'a str,
    patient_diagnosis: &'a str,
    patient_therapy_type: &'a str,
    patient_therapy_category: &'a str,
    therapy_duration: &'a str,
}

/// Parse the patient list (a bare JSON array).
pub fn parse_patient_list(json: &str) -> PayloadResult<Vec<Patient>> {
    let raw: Vec<RawPatient> = serde_json::from_str(json)?;
    tracing::debug!(count = raw.len(), "Decoded patient list");
    Ok(raw.into_iter().map(Into::into).collect())
}

/// Parse a single patient wrapped in `patientData`.
pub fn parse_patient(json: &str) -> PayloadResult<Patient> {
    let envelope: PatientEnvelope = serde_json::from_str(json)?;
    envelope
        .patient_data
        .map(Into::into)
        .ok_or_else(|| PayloadError::UnexpectedShape("missing patientData".into()))
}

/// Registration request body.
pub fn encode_registration(request: &RegistrationRequest) -> PayloadResult<String> {
    Ok(serde_json::to_string(&RegistrationBody {
        patient_first_name: &request.first_name,
        patient_last_name: &request.last_name,
        patient_email: &request.email,
        patient_phone: &request.phone,
    })?)
}

/// Patient update request body. Unset age and category go out as empty strings.
pub fn encode_patient_update(request: &PatientUpdateRequest) -> PayloadResult<String> {
    Ok(serde_json::to_string(&PatientUpdateBody {
        patient_first_name: &request.first_name,
        patient_last_name: &request.last_name,
        patient_email: &request.email,
        patient_phone: &request.phone,
        patient_gender: &request.gender,
        patient_address1: &request.address1,
        patient_address2: &request.address2,
        patient_age: request.age.map(|age| age.to_string()).unwrap_or_default(),
        patient_blood_group: &request.blood_group,
        patient_symptoms: &request.symptoms,
        patient_diagnosis: &request.diagnosis,
        patient_therapy_type: &request.therapy_type,
        patient_therapy_category: request.therapy_category.map_or("", |c| c.label()),
        therapy_duration: &request.therapy_duration,
    })?)
}
