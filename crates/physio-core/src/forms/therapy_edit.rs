//! Therapy edit modal as an explicit state machine.
//!
//! ```text
//!            open                 open_picker(f)
//!  Closed ─────────▶ Editing ─────────────────────▶ PickingField(f)
//!    ▲                │  ▲  ◀── pick_* / dismiss ──────┘
//!    │   close        │  │
//!    ├────────────────┘  │ submit_failed
//!    │                   │
//!    │ submit_succeeded  │
//!    └──────────── Submitting ◀── begin_submit (valid) ── Editing
//! ```
//!
//! Field data lives inside the state variants, so at most one picker can be
//! open and a closed form holds no stale values.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::{FormError, FormResult};
use crate::models::{TherapySession, THERAPY_DATE_FORMAT, THERAPY_TIME_FORMAT};
use crate::temporal::parse_instant;

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Which picker is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PickerField {
    Date,
    StartTime,
    EndTime,
}

impl PickerField {
    pub const ALL: [PickerField; 3] = [PickerField::Date, PickerField::StartTime, PickerField::EndTime];

    /// Identifier used by the UI (`date`, `startTime`, `endTime`).
    pub fn as_str(&self) -> &'static str {
        match self {
            PickerField::Date => "date",
            PickerField::StartTime => "startTime",
            PickerField::EndTime => "endTime",
        }
    }

    /// Inverse of [`PickerField::as_str`].
    pub fn from_name(name: &str) -> Option<Self> {
        PickerField::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for PickerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observable form phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Closed,
    Editing,
    PickingField(PickerField),
    Submitting,
}

impl fmt::Display for FormPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormPhase::Closed => f.write_str("closed"),
            FormPhase::Editing => f.write_str("editing"),
            FormPhase::PickingField(field) => write!(f, "picking {field}"),
            FormPhase::Submitting => f.write_str("submitting"),
        }
    }
}

/// Editable values bound to the modal inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct TherapyFields {
    pub therapy_type: String,
    pub remarks: String,
    pub cost: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl TherapyFields {
    /// Load fields from a session, falling back to `now` for unreadable dates.
    pub fn from_session(session: &TherapySession, now: DateTime<Utc>) -> Self {
        let fallback_time = NaiveTime::from_hms_opt(now.hour(), now.minute(), 0)
            .unwrap_or(NaiveTime::MIN);

        Self {
            therapy_type: session.therapy_type.clone(),
            remarks: session.remarks.clone(),
            cost: session.cost.clone().unwrap_or_default(),
            date: parse_instant(&session.date)
                .map(|instant| instant.date_naive())
                .unwrap_or_else(|_| now.date_naive()),
            start_time: parse_time(session.start_time.as_deref()).unwrap_or(fallback_time),
            end_time: parse_time(session.end_time.as_deref()).unwrap_or(fallback_time),
        }
    }

    /// Check the fields, returning the first problem found.
    pub fn validate(&self) -> FormResult<()> {
        if self.therapy_type.trim().is_empty() {
            return Err(FormError::Validation("Therapy type is required".into()));
        }
        if self.end_time <= self.start_time {
            return Err(FormError::Validation(
                "End time must be after start time".into(),
            ));
        }
        let cost = self.cost.trim();
        if !cost.is_empty() {
            match cost.parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 0.0 => {}
                Ok(value) if value < 0.0 => {
                    return Err(FormError::Validation("Cost cannot be negative".into()))
                }
                _ => return Err(FormError::Validation("Cost must be a number".into())),
            }
        }
        Ok(())
    }

    /// Write the fields over a copy of `original`.
    pub fn apply_to(&self, original: &TherapySession) -> TherapySession {
        let cost = self.cost.trim();
        TherapySession {
            therapy_type: self.therapy_type.trim().to_string(),
            remarks: self.remarks.clone(),
            cost: (!cost.is_empty()).then(|| cost.to_string()),
            date: self.date.format(THERAPY_DATE_FORMAT).to_string(),
            start_time: Some(self.start_time.format(THERAPY_TIME_FORMAT).to_string()),
            end_time: Some(self.end_time.format(THERAPY_TIME_FORMAT).to_string()),
            ..original.clone()
        }
    }
}

/// Accepts `HH:MM`, `HH:MM:SS` or a full ISO-8601 timestamp.
fn parse_time(raw: Option<&str>) -> Option<NaiveTime> {
    let raw = raw?.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
        .or_else(|| parse_instant(raw).ok().map(|instant| instant.time()))
}

#[derive(Debug, Clone)]
struct Draft {
    original: TherapySession,
    fields: TherapyFields,
    error: Option<String>,
}

#[derive(Debug, Clone, Default)]
enum State {
    #[default]
    Closed,
    Editing(Draft),
    Picking(Draft, PickerField),
    Submitting(Draft),
}

impl State {
    fn phase(&self) -> FormPhase {
        match self {
            State::Closed => FormPhase::Closed,
            State::Editing(_) => FormPhase::Editing,
            State::Picking(_, field) => FormPhase::PickingField(*field),
            State::Submitting(_) => FormPhase::Submitting,
        }
    }

    fn draft(&self) -> Option<&Draft> {
        match self {
            State::Closed => None,
            State::Editing(d) | State::Picking(d, _) | State::Submitting(d) => Some(d),
        }
    }
}

/// Edit form for an existing therapy session.
#[derive(Debug, Clone, Default)]
pub struct TherapyEditForm {
    state: State,
}

impl TherapyEditForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.state.phase()
    }

    /// Current field values, `None` when closed.
    pub fn fields(&self) -> Option<&TherapyFields> {
        self.state.draft().map(|d| &d.fields)
    }

    /// The session being edited, `None` when closed.
    pub fn original(&self) -> Option<&TherapySession> {
        self.state.draft().map(|d| &d.original)
    }

    /// Last validation or submit error.
    pub fn error(&self) -> Option<&str> {
        self.state.draft().and_then(|d| d.error.as_deref())
    }

    /// Open the modal for `session`.
    pub fn open(&mut self, session: &TherapySession, now: DateTime<Utc>) -> FormResult<()> {
        self.expect_phase(FormPhase::Closed, "open")?;
        tracing::debug!(therapy = %session.id, "Opening therapy edit form");
        self.state = State::Editing(Draft {
            original: session.clone(),
            fields: TherapyFields::from_session(session, now),
            error: None,
        });
        Ok(())
    }

    pub fn set_therapy_type(&mut self, value: impl Into<String>) -> FormResult<()> {
        self.editing_fields("edit therapy type")?.therapy_type = value.into();
        Ok(())
    }

    pub fn set_remarks(&mut self, value: impl Into<String>) -> FormResult<()> {
        self.editing_fields("edit remarks")?.remarks = value.into();
        Ok(())
    }

    pub fn set_cost(&mut self, value: impl Into<String>) -> FormResult<()> {
        self.editing_fields("edit cost")?.cost = value.into();
        Ok(())
    }

    /// Show a picker. Only one picker can be open at a time.
    pub fn open_picker(&mut self, field: PickerField) -> FormResult<()> {
        match std::mem::take(&mut self.state) {
            State::Editing(draft) => {
                self.state = State::Picking(draft, field);
                Ok(())
            }
            other => self.reject(other, "open a picker"),
        }
    }

    /// Commit a date from the date picker.
    pub fn pick_date(&mut self, date: NaiveDate) -> FormResult<()> {
        match std::mem::take(&mut self.state) {
            State::Picking(mut draft, PickerField::Date) => {
                draft.fields.date = date;
                self.state = State::Editing(draft);
                Ok(())
            }
            other => self.reject(other, "pick a date"),
        }
    }

    /// Commit a time from the start or end time picker.
    pub fn pick_time(&mut self, time: NaiveTime) -> FormResult<()> {
        match std::mem::take(&mut self.state) {
            State::Picking(mut draft, PickerField::StartTime) => {
                draft.fields.start_time = time;
                self.state = State::Editing(draft);
                Ok(())
            }
            State::Picking(mut draft, PickerField::EndTime) => {
                draft.fields.end_time = time;
                self.state = State::Editing(draft);
                Ok(())
            }
            other => self.reject(other, "pick a time"),
        }
    }

    /// Close the picker without changing anything.
    pub fn dismiss_picker(&mut self) -> FormResult<()> {
        match std::mem::take(&mut self.state) {
            State::Picking(draft, _) => {
                self.state = State::Editing(draft);
                Ok(())
            }
            other => self.reject(other, "dismiss a picker"),
        }
    }

    /// Validate and move to submitting, returning the session to send.
    ///
    /// On validation failure the form stays in editing with the error set.
    pub fn begin_submit(&mut self) -> FormResult<TherapySession> {
        match std::mem::take(&mut self.state) {
            State::Editing(mut draft) => match draft.fields.validate() {
                Ok(()) => {
                    let updated = draft.fields.apply_to(&draft.original);
                    draft.error = None;
                    self.state = State::Submitting(draft);
                    Ok(updated)
                }
                Err(e) => {
                    draft.error = Some(e.to_string());
                    self.state = State::Editing(draft);
                    Err(e)
                }
            },
            other => self.reject(other, "submit"),
        }
    }

    /// The update was accepted; close and return the saved session.
    pub fn submit_succeeded(&mut self) -> FormResult<TherapySession> {
        match std::mem::take(&mut self.state) {
            State::Submitting(draft) => {
                tracing::debug!(therapy = %draft.original.id, "Therapy update saved");
                Ok(draft.fields.apply_to(&draft.original))
            }
            other => self.reject(other, "complete a submit"),
        }
    }

    /// The update was rejected; return to editing with `message`.
    pub fn submit_failed(&mut self, message: impl Into<String>) -> FormResult<()> {
        match std::mem::take(&mut self.state) {
            State::Submitting(mut draft) => {
                let message = message.into();
                tracing::warn!(therapy = %draft.original.id, "Therapy update failed: {message}");
                draft.error = Some(message);
                self.state = State::Editing(draft);
                Ok(())
            }
            other => self.reject(other, "fail a submit"),
        }
    }

    /// Discard the draft. Not allowed while a submit is in flight.
    pub fn close(&mut self) -> FormResult<()> {
        if let State::Submitting(_) = self.state {
            return Err(FormError::InvalidTransition {
                action: "close",
                phase: FormPhase::Submitting,
            });
        }
        self.state = State::Closed;
        Ok(())
    }

    fn editing_fields(&mut self, action: &'static str) -> FormResult<&mut TherapyFields> {
        match &mut self.state {
            State::Editing(draft) => Ok(&mut draft.fields),
            other => Err(FormError::InvalidTransition {
                action,
                phase: other.phase(),
            }),
        }
    }

    fn expect_phase(&self, phase: FormPhase, action: &'static str) -> FormResult<()> {
        if self.phase() == phase {
            Ok(())
        } else {
            Err(FormError::InvalidTransition {
                action,
                phase: self.phase(),
            })
        }
    }

    /// Restore `previous` and report the rejected action.
    fn reject<T>(&mut self, previous: State, action: &'static str) -> FormResult<T> {
        let phase = previous.phase();
        self.state = previous;
        Err(FormError::InvalidTransition { action, phase })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 15, 8, 45, 30).unwrap()
    }

    fn session() -> TherapySession {
        TherapySession {
            id: "t-1".into(),
            patient_id: "p-1".into(),
            therapy_id: "T-001".into(),
            therapy_type: "Manual therapy".into(),
            remarks: "Lower back".into(),
            link: "https://meet.example/abc".into(),
            date: "2024-07-20".into(),
            start_time: Some("10:00".into()),
            end_time: Some("11:00".into()),
            cost: Some("800".into()),
        }
    }

    fn open_form() -> TherapyEditForm {
        let mut form = TherapyEditForm::new();
        form.open(&session(), now()).unwrap();
        form
    }

    #[test]
    fn test_open_loads_fields() {
        let form = open_form();
        assert_eq!(form.phase(), FormPhase::Editing);

        let fields = form.fields().unwrap();
        assert_eq!(fields.therapy_type, "Manual therapy");
        assert_eq!(fields.cost, "800");
        assert_eq!(fields.date, NaiveDate::from_ymd_opt(2024, 7, 20).unwrap());
        assert_eq!(fields.start_time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        assert_eq!(fields.end_time, NaiveTime::from_hms_opt(11, 0, 0).unwrap());
    }

    #[test]
    fn test_open_reads_iso_times_and_falls_back() {
        let mut s = session();
        s.start_time = Some("2024-07-20T09:15:00.000Z".into());
        s.end_time = None;
        s.date = "bogus".into();

        let fields = TherapyFields::from_session(&s, now());
        assert_eq!(fields.start_time, NaiveTime::from_hms_opt(9, 15, 0).unwrap());
        assert_eq!(fields.end_time, NaiveTime::from_hms_opt(8, 45, 0).unwrap());
        assert_eq!(fields.date, now().date_naive());
    }

    #[test]
    fn test_closed_form_has_no_fields() {
        let form = TherapyEditForm::new();
        assert_eq!(form.phase(), FormPhase::Closed);
        assert!(form.fields().is_none());
        assert!(form.original().is_none());
    }

    #[test]
    fn test_cannot_open_twice() {
        let mut form = open_form();
        let err = form.open(&session(), now()).unwrap_err();
        assert_eq!(
            err,
            FormError::InvalidTransition {
                action: "open",
                phase: FormPhase::Editing
            }
        );
    }

    #[test]
    fn test_only_one_picker_at_a_time() {
        let mut form = open_form();
        form.open_picker(PickerField::StartTime).unwrap();
        assert_eq!(form.phase(), FormPhase::PickingField(PickerField::StartTime));

        let err = form.open_picker(PickerField::EndTime).unwrap_err();
        assert!(matches!(err, FormError::InvalidTransition { .. }));
        // Rejected transition leaves the first picker open
        assert_eq!(form.phase(), FormPhase::PickingField(PickerField::StartTime));
    }

    #[test]
    fn test_pick_values() {
        let mut form = open_form();

        form.open_picker(PickerField::Date).unwrap();
        let new_date = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        form.pick_date(new_date).unwrap();
        assert_eq!(form.phase(), FormPhase::Editing);

        form.open_picker(PickerField::EndTime).unwrap();
        let end = NaiveTime::from_hms_opt(12, 30, 0).unwrap();
        form.pick_time(end).unwrap();

        let fields = form.fields().unwrap();
        assert_eq!(fields.date, new_date);
        assert_eq!(fields.end_time, end);
    }

    #[test]
    fn test_pick_wrong_kind_rejected() {
        let mut form = open_form();
        form.open_picker(PickerField::Date).unwrap();
        assert!(form.pick_time(NaiveTime::MIN).is_err());
        assert_eq!(form.phase(), FormPhase::PickingField(PickerField::Date));

        form.dismiss_picker().unwrap();
        assert_eq!(form.phase(), FormPhase::Editing);
        assert!(form.dismiss_picker().is_err());
    }

    #[test]
    fn test_text_edits_only_while_editing() {
        let mut form = open_form();
        form.set_remarks("Neck stiffness").unwrap();
        form.open_picker(PickerField::Date).unwrap();
        assert!(form.set_cost("100").is_err());
        assert_eq!(form.fields().unwrap().remarks, "Neck stiffness");
    }

    #[test]
    fn test_submit_success_round() {
        let mut form = open_form();
        form.set_therapy_type("  Hydrotherapy ").unwrap();
        form.set_cost("").unwrap();

        let pending = form.begin_submit().unwrap();
        assert_eq!(form.phase(), FormPhase::Submitting);
        assert_eq!(pending.therapy_type, "Hydrotherapy");
        assert_eq!(pending.cost, None);
        assert_eq!(pending.link, "https://meet.example/abc");
        assert_eq!(pending.start_time.as_deref(), Some("10:00"));

        // No edits or closing while in flight
        assert!(form.set_remarks("x").is_err());
        assert!(form.close().is_err());

        let saved = form.submit_succeeded().unwrap();
        assert_eq!(saved, pending);
        assert_eq!(form.phase(), FormPhase::Closed);
    }

    #[test]
    fn test_submit_failure_returns_to_editing() {
        let mut form = open_form();
        form.begin_submit().unwrap();
        form.submit_failed("Failed to update therapy.").unwrap();

        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.error(), Some("Failed to update therapy."));

        // Error clears on the next successful validation
        form.begin_submit().unwrap();
        assert_eq!(form.error(), None);
    }

    #[test]
    fn test_validation_errors() {
        let mut form = open_form();
        form.open_picker(PickerField::EndTime).unwrap();
        form.pick_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap()).unwrap();

        let err = form.begin_submit().unwrap_err();
        assert_eq!(err, FormError::Validation("End time must be after start time".into()));
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.error(), Some("End time must be after start time"));

        let mut form = open_form();
        form.set_cost("eight hundred").unwrap();
        assert_eq!(
            form.begin_submit().unwrap_err(),
            FormError::Validation("Cost must be a number".into())
        );

        let mut form = open_form();
        form.set_therapy_type("   ").unwrap();
        assert!(form.begin_submit().is_err());
    }

    #[test]
    fn test_cost_must_be_finite_and_non_negative() {
        for raw in ["NaN", "inf", "infinity"] {
            let mut form = open_form();
            form.set_cost(raw).unwrap();
            assert_eq!(
                form.begin_submit().unwrap_err(),
                FormError::Validation("Cost must be a number".into()),
                "{raw}"
            );
        }

        let mut form = open_form();
        form.set_cost("-5").unwrap();
        assert_eq!(
            form.begin_submit().unwrap_err(),
            FormError::Validation("Cost cannot be negative".into())
        );

        let mut form = open_form();
        form.set_cost("0").unwrap();
        assert_eq!(form.begin_submit().unwrap().cost.as_deref(), Some("0"));
    }

    #[test]
    fn test_close_discards_draft() {
        let mut form = open_form();
        form.open_picker(PickerField::Date).unwrap();
        form.close().unwrap();
        assert_eq!(form.phase(), FormPhase::Closed);
        assert!(form.fields().is_none());

        // Reopen after close
        form.open(&session(), now()).unwrap();
        assert_eq!(form.phase(), FormPhase::Editing);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(FormPhase::Closed.to_string(), "closed");
        assert_eq!(
            FormPhase::PickingField(PickerField::StartTime).to_string(),
            "picking startTime"
        );
    }

    #[test]
    fn test_picker_field_names_match_phase_display() {
        for field in PickerField::ALL {
            assert_eq!(PickerField::from_name(field.as_str()), Some(field));
            assert_eq!(
                FormPhase::PickingField(field).to_string(),
                format!("picking {}", field.as_str())
            );
        }
        assert_eq!(PickerField::from_name("StartTime"), None);
    }
}
