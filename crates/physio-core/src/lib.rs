//! Physio Core Library
//!
//! Native core for the physiotherapy clinic mobile app. The UI layer (patient
//! list, therapy sessions, booking, payments, profile screens) links this
//! library and keeps only layout and navigation.
//!
//! # Architecture
//!
//! ```text
//!   clinic REST API ──▶ physio-payloads ──▶ models
//!                                             │
//!                       ┌─────────────────────┼──────────────────────┐
//!                       ▼                     ▼                      ▼
//!               temporal (filter,       forms (edit modal,     settings (theme,
//!               partition, sort)        registration, booking)  SQLite-backed)
//!                       │                     │                      │
//!                       └──────────── UniFFI surface (this file) ────┘
//! ```
//!
//! # Modules
//!
//! - [`temporal`]: date windows, past/upcoming partition, date and name ordering
//! - [`models`]: Patient, TherapySession, Payment, AppointmentRequest
//! - [`forms`]: therapy edit state machine, registration and booking validation
//! - [`settings`]: theme service with background persistence
//! - [`db`]: SQLite preference storage
//! - [`config`]: constants and logging setup

pub mod config;
pub mod db;
pub mod forms;
pub mod models;
pub mod settings;
pub mod temporal;

// Re-export commonly used types
pub use db::Database;
pub use forms::{
    AppointmentBooking, FormPhase, PatientRegistration, PatientUpdate, PickerField, TherapyEditForm,
};
pub use models::{
    AppointmentRequest, AppointmentType, NewTherapy, Patient, Payment, PaymentDirection,
    PaymentFilter, TherapySession,
};
pub use settings::{Theme, ThemeService};
pub use temporal::{
    filter_by_window, partition, sort_by_date, sort_by_name, Clock, DateWindow, ListQuery,
    Partitioned, SortMode, SystemClock, TemporalRecord,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveTime};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PhysioError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Settings error: {0}")]
    SettingsError(String),
}

impl From<temporal::TemporalError> for PhysioError {
    fn from(e: temporal::TemporalError) -> Self {
        PhysioError::InvalidArgument(e.to_string())
    }
}

impl From<models::ModelError> for PhysioError {
    fn from(e: models::ModelError) -> Self {
        PhysioError::InvalidArgument(e.to_string())
    }
}

impl From<forms::FormError> for PhysioError {
    fn from(e: forms::FormError) -> Self {
        match e {
            forms::FormError::Validation(msg) => PhysioError::ValidationError(msg),
            other => PhysioError::InvalidState(other.to_string()),
        }
    }
}

impl From<settings::SettingsError> for PhysioError {
    fn from(e: settings::SettingsError) -> Self {
        PhysioError::SettingsError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for PhysioError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        PhysioError::InvalidState(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// List Functions (exported to FFI)
// =========================================================================

/// Install the log subscriber. Safe to call more than once.
#[uniffi::export]
pub fn init_logging() {
    config::init_logging();
}

/// Search, window-filter and sort the patient list.
///
/// `window` is one of `all`, `oneWeek`, `oneMonth`, `oneYear`; `sort` is
/// `date` or `name`. Unknown values are rejected.
#[uniffi::export]
pub fn filter_patients(
    patients: Vec<FfiPatient>,
    search: String,
    window: String,
    sort: String,
) -> Result<Vec<FfiPatient>, PhysioError> {
    let query = ListQuery::from_ui(&search, &window, &sort)?;
    let patients: Vec<Patient> = patients.into_iter().map(Into::into).collect();
    let result = query.apply(&patients, SystemClock.now());
    Ok(result.into_iter().map(Into::into).collect())
}

/// Split therapy sessions into past and upcoming.
#[uniffi::export]
pub fn partition_therapies(sessions: Vec<FfiTherapySession>) -> FfiTherapyPartition {
    let sessions: Vec<TherapySession> = sessions.into_iter().map(Into::into).collect();
    let split = partition(&sessions, SystemClock.now());
    FfiTherapyPartition {
        past: split.past.into_iter().map(Into::into).collect(),
        upcoming: split.future.into_iter().map(Into::into).collect(),
    }
}

/// Filter payment history by tab (`All`, `Received`, `Sent`).
#[uniffi::export]
pub fn filter_payment_history(
    payments: Vec<FfiPayment>,
    filter: String,
) -> Result<Vec<FfiPayment>, PhysioError> {
    let filter: PaymentFilter = filter.parse()?;
    let payments = payments
        .into_iter()
        .map(Payment::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(models::filter_payments(&payments, filter)
        .into_iter()
        .map(Into::into)
        .collect())
}

/// Bookable appointment slots.
#[uniffi::export]
pub fn appointment_time_slots() -> Vec<String> {
    models::TIME_SLOTS.iter().map(|s| s.to_string()).collect()
}

/// Validate registration input, returning the normalized values.
#[uniffi::export]
pub fn validate_registration(input: FfiRegistration) -> Result<FfiRegistration, PhysioError> {
    let registration = PatientRegistration {
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        phone: input.phone,
    };
    let request = registration.validate()?;
    Ok(FfiRegistration {
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        phone: request.phone,
    })
}

/// Therapy category labels for the patient update picker.
#[uniffi::export]
pub fn therapy_categories() -> Vec<String> {
    models::TherapyCategory::ALL
        .iter()
        .map(|c| c.label().to_string())
        .collect()
}

/// Course length label (`N days`) for two ISO-8601 picker values.
#[uniffi::export]
pub fn therapy_duration_label(start: String, end: String) -> Result<String, PhysioError> {
    Ok(models::course_duration_label(
        temporal::parse_instant(&start)?,
        temporal::parse_instant(&end)?,
    ))
}

/// Validate the patient update screen, returning the normalized values.
#[uniffi::export]
pub fn validate_patient_update(
    input: FfiPatientUpdate,
) -> Result<FfiPatientUpdateRequest, PhysioError> {
    let form = forms::PatientUpdate {
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        phone: input.phone,
        gender: input.gender,
        address1: input.address1,
        address2: input.address2,
        age: input.age,
        blood_group: input.blood_group,
        symptoms: input.symptoms,
        diagnosis: input.diagnosis,
        therapy_type: input.therapy_type,
        therapy_category: input.therapy_category,
        course_start: temporal::parse_instant(&input.course_start)?,
        course_end: temporal::parse_instant(&input.course_end)?,
    };
    Ok(form.validate()?.into())
}

// =========================================================================
// Settings
// =========================================================================

/// Open settings backed by a database file.
#[uniffi::export]
pub fn open_settings(path: String) -> Result<Arc<PhysioSettings>, PhysioError> {
    let store = settings::SqlitePreferenceStore::open(&path)?;
    Ok(Arc::new(PhysioSettings {
        service: ThemeService::open(store)?,
    }))
}

/// Open settings backed by an in-memory database (for testing).
#[uniffi::export]
pub fn open_settings_in_memory() -> Result<Arc<PhysioSettings>, PhysioError> {
    let store = settings::SqlitePreferenceStore::open_in_memory()?;
    Ok(Arc::new(PhysioSettings {
        service: ThemeService::open(store)?,
    }))
}

/// Theme preference handle for the UI.
#[derive(uniffi::Object)]
pub struct PhysioSettings {
    service: ThemeService,
}

#[uniffi::export]
impl PhysioSettings {
    /// Active theme name.
    pub fn theme(&self) -> String {
        self.service.theme().to_string()
    }

    /// Switch theme by name.
    pub fn set_theme(&self, theme: String) -> Result<(), PhysioError> {
        Ok(self.service.set_theme(theme.parse()?)?)
    }

    /// Return to the default theme.
    pub fn reset_theme(&self) -> Result<(), PhysioError> {
        Ok(self.service.reset()?)
    }

    /// All selectable theme names.
    pub fn available_themes(&self) -> Vec<String> {
        Theme::ALL.iter().map(|t| t.to_string()).collect()
    }

    /// Wait for pending writes (call before the app is suspended).
    pub fn flush(&self) -> Result<(), PhysioError> {
        Ok(self.service.flush()?)
    }
}

// =========================================================================
// Therapy Edit Form
// =========================================================================

/// Create an empty (closed) therapy edit form.
#[uniffi::export]
pub fn new_therapy_editor() -> Arc<TherapyEditor> {
    Arc::new(TherapyEditor {
        form: Mutex::new(TherapyEditForm::new()),
    })
}

/// Thread-safe therapy edit form for FFI.
#[derive(uniffi::Object)]
pub struct TherapyEditor {
    form: Mutex<TherapyEditForm>,
}

#[uniffi::export]
impl TherapyEditor {
    /// Current phase: `closed`, `editing`, `picking <field>` (`date`, `startTime`, `endTime`) or `submitting`.
    pub fn phase(&self) -> Result<String, PhysioError> {
        Ok(self.form.lock()?.phase().to_string())
    }

    /// Current field values, if open.
    pub fn fields(&self) -> Result<Option<FfiTherapyFields>, PhysioError> {
        Ok(self.form.lock()?.fields().map(Into::into))
    }

    /// Last validation or submit error.
    pub fn error(&self) -> Result<Option<String>, PhysioError> {
        Ok(self.form.lock()?.error().map(str::to_string))
    }

    pub fn open(&self, session: FfiTherapySession) -> Result<(), PhysioError> {
        let session: TherapySession = session.into();
        Ok(self.form.lock()?.open(&session, SystemClock.now())?)
    }

    pub fn set_therapy_type(&self, value: String) -> Result<(), PhysioError> {
        Ok(self.form.lock()?.set_therapy_type(value)?)
    }

    pub fn set_remarks(&self, value: String) -> Result<(), PhysioError> {
        Ok(self.form.lock()?.set_remarks(value)?)
    }

    pub fn set_cost(&self, value: String) -> Result<(), PhysioError> {
        Ok(self.form.lock()?.set_cost(value)?)
    }

    /// Open a picker: `date`, `startTime` or `endTime`.
    pub fn open_picker(&self, field: String) -> Result<(), PhysioError> {
        let field = parse_picker_field(&field)?;
        Ok(self.form.lock()?.open_picker(field)?)
    }

    /// Commit a `YYYY-MM-DD` date from the date picker.
    pub fn pick_date(&self, date: String) -> Result<(), PhysioError> {
        let date = NaiveDate::parse_from_str(&date, models::THERAPY_DATE_FORMAT)
            .map_err(|e| PhysioError::InvalidArgument(format!("date '{date}': {e}")))?;
        Ok(self.form.lock()?.pick_date(date)?)
    }

    /// Commit an `HH:MM` time from a time picker.
    pub fn pick_time(&self, time: String) -> Result<(), PhysioError> {
        let time = NaiveTime::parse_from_str(&time, models::THERAPY_TIME_FORMAT)
            .map_err(|e| PhysioError::InvalidArgument(format!("time '{time}': {e}")))?;
        Ok(self.form.lock()?.pick_time(time)?)
    }

    pub fn dismiss_picker(&self) -> Result<(), PhysioError> {
        Ok(self.form.lock()?.dismiss_picker()?)
    }

    /// Validate and return the session to send to the server.
    pub fn begin_submit(&self) -> Result<FfiTherapySession, PhysioError> {
        Ok(self.form.lock()?.begin_submit()?.into())
    }

    pub fn submit_succeeded(&self) -> Result<FfiTherapySession, PhysioError> {
        Ok(self.form.lock()?.submit_succeeded()?.into())
    }

    pub fn submit_failed(&self, message: String) -> Result<(), PhysioError> {
        Ok(self.form.lock()?.submit_failed(message)?)
    }

    pub fn close(&self) -> Result<(), PhysioError> {
        Ok(self.form.lock()?.close()?)
    }
}

fn parse_picker_field(raw: &str) -> Result<PickerField, PhysioError> {
    PickerField::from_name(raw)
        .ok_or_else(|| PhysioError::InvalidArgument(format!("unknown picker field '{raw}'")))
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub created_at: String,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            first_name: patient.first_name,
            last_name: patient.last_name,
            phone: patient.phone,
            email: patient.email,
            created_at: patient.created_at,
        }
    }
}

impl From<FfiPatient> for Patient {
    fn from(patient: FfiPatient) -> Self {
        Patient {
            id: patient.id,
            first_name: patient.first_name,
            last_name: patient.last_name,
            phone: patient.phone,
            email: patient.email,
            created_at: patient.created_at,
        }
    }
}

/// FFI-safe therapy session.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTherapySession {
    pub id: String,
    pub patient_id: String,
    pub therapy_id: String,
    pub therapy_type: String,
    pub remarks: String,
    pub link: String,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub cost: Option<String>,
}

impl From<TherapySession> for FfiTherapySession {
    fn from(session: TherapySession) -> Self {
        Self {
            id: session.id,
            patient_id: session.patient_id,
            therapy_id: session.therapy_id,
            therapy_type: session.therapy_type,
            remarks: session.remarks,
            link: session.link,
            date: session.date,
            start_time: session.start_time,
            end_time: session.end_time,
            cost: session.cost,
        }
    }
}

impl From<FfiTherapySession> for TherapySession {
    fn from(session: FfiTherapySession) -> Self {
        TherapySession {
            id: session.id,
            patient_id: session.patient_id,
            therapy_id: session.therapy_id,
            therapy_type: session.therapy_type,
            remarks: session.remarks,
            link: session.link,
            date: session.date,
            start_time: session.start_time,
            end_time: session.end_time,
            cost: session.cost,
        }
    }
}

/// FFI-safe past/upcoming split.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTherapyPartition {
    pub past: Vec<FfiTherapySession>,
    pub upcoming: Vec<FfiTherapySession>,
}

/// FFI-safe edit form values. Times are `HH:MM`, date is `YYYY-MM-DD`.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTherapyFields {
    pub therapy_type: String,
    pub remarks: String,
    pub cost: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

impl From<&forms::TherapyFields> for FfiTherapyFields {
    fn from(fields: &forms::TherapyFields) -> Self {
        Self {
            therapy_type: fields.therapy_type.clone(),
            remarks: fields.remarks.clone(),
            cost: fields.cost.clone(),
            date: fields.date.format(models::THERAPY_DATE_FORMAT).to_string(),
            start_time: fields.start_time.format(models::THERAPY_TIME_FORMAT).to_string(),
            end_time: fields.end_time.format(models::THERAPY_TIME_FORMAT).to_string(),
        }
    }
}

/// FFI-safe payment. `direction` is `received` or `sent`.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPayment {
    pub id: String,
    pub counterparty: String,
    pub date: String,
    pub amount: f64,
    pub direction: String,
    pub signed_label: String,
}

impl From<Payment> for FfiPayment {
    fn from(payment: Payment) -> Self {
        let direction = match payment.direction {
            PaymentDirection::Received => "received",
            PaymentDirection::Sent => "sent",
        };
        Self {
            signed_label: payment.signed_label(),
            id: payment.id,
            counterparty: payment.counterparty,
            date: payment.date,
            amount: payment.amount,
            direction: direction.to_string(),
        }
    }
}

impl TryFrom<FfiPayment> for Payment {
    type Error = PhysioError;

    fn try_from(payment: FfiPayment) -> Result<Self, Self::Error> {
        let direction = match payment.direction.as_str() {
            "received" => PaymentDirection::Received,
            "sent" => PaymentDirection::Sent,
            other => {
                return Err(PhysioError::InvalidArgument(format!(
                    "unknown payment direction '{other}'"
                )))
            }
        };
        Ok(Payment {
            id: payment.id,
            counterparty: payment.counterparty,
            date: payment.date,
            amount: payment.amount,
            direction,
        })
    }
}

/// FFI-safe registration input/output.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// FFI-safe patient update input. Course dates are ISO-8601.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientUpdate {
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
    pub therapy_category: String,
    pub course_start: String,
    pub course_end: String,
}

/// FFI-safe validated patient update.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientUpdateRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub address1: String,
    pub address2: String,
    pub age: Option<u8>,
    pub blood_group: String,
    pub symptoms: String,
    pub diagnosis: String,
    pub therapy_type: String,
    pub therapy_category: Option<String>,
    pub therapy_duration: String,
}

impl From<models::PatientUpdateRequest> for FfiPatientUpdateRequest {
    fn from(request: models::PatientUpdateRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            gender: request.gender,
            address1: request.address1,
            address2: request.address2,
            age: request.age,
            blood_group: request.blood_group,
            symptoms: request.symptoms,
            diagnosis: request.diagnosis,
            therapy_type: request.therapy_type,
            therapy_category: request.therapy_category.map(|c| c.label().to_string()),
            therapy_duration: request.therapy_duration,
        }
    }
}
