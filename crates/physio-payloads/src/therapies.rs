//! Therapy documents.
//!
//! The server spells therapy fields `therepy_*` on read and update, but
//! expects `therapy_*` keys when creating a session.

use physio_core::models::{NewTherapy, TherapySession};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{PayloadError, PayloadResult};

/// Therapy document as stored by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTherapy {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub patient_id: String,
    #[serde(default)]
    pub therepy_id: String,
    #[serde(default)]
    pub therepy_type: String,
    #[serde(default)]
    pub therepy_remarks: String,
    #[serde(default)]
    pub therepy_link: String,
    #[serde(default)]
    pub therepy_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub therepy_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub therepy_end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub therepy_cost: Option<String>,
}

impl From<RawTherapy> for TherapySession {
    fn from(raw: RawTherapy) -> Self {
        TherapySession {
            id: raw.id,
            patient_id: raw.patient_id,
            therapy_id: raw.therepy_id,
            therapy_type: raw.therepy_type,
            remarks: raw.therepy_remarks,
            link: raw.therepy_link,
            date: raw.therepy_date,
            start_time: raw.therepy_start_time,
            end_time: raw.therepy_end_time,
            cost: raw.therepy_cost,
        }
    }
}

impl From<&TherapySession> for RawTherapy {
    fn from(session: &TherapySession) -> Self {
        RawTherapy {
            id: session.id.clone(),
            patient_id: session.patient_id.clone(),
            therepy_id: session.therapy_id.clone(),
            therepy_type: session.therapy_type.clone(),
            therepy_remarks: session.remarks.clone(),
            therepy_link: session.link.clone(),
            therepy_date: session.date.clone(),
            therepy_start_time: session.start_time.clone(),
            therepy_end_time: session.end_time.clone(),
            therepy_cost: session.cost.clone(),
        }
    }
}

#[derive(Serialize)]
struct NewTherapyBody<'a> {
    therapy_type: &'a str,
    therapy_date: &'a str,
    therapy_start_time: &'a str,
    therapy_end_time: &'a str,
    therapy_duration: &'a str,
    therapy_remarks: &'a str,
    therapy_cost: &'a str,
}

/// Parse a patient's therapy list. The body must carry a `therepys` array.
pub fn parse_therapy_list(json: &str) -> PayloadResult<Vec<TherapySession>> {
    let mut body: Value = serde_json::from_str(json)?;
    let list = match body.get_mut("therepys").map(Value::take) {
        Some(list @ Value::Array(_)) => list,
        Some(other) => {
            return Err(PayloadError::UnexpectedShape(format!(
                "therepys is not an array: {other}"
            )))
        }
        None => return Err(PayloadError::UnexpectedShape("missing therepys".into())),
    };

    let raw: Vec<RawTherapy> = serde_json::from_value(list)?;
    tracing::debug!(count = raw.len(), "Decoded therapy list");
    Ok(raw.into_iter().map(Into::into).collect())
}

/// Host meeting link from a session-start response, if present.
pub fn parse_host_join_url(json: &str) -> PayloadResult<Option<String>> {
    let body: Value = serde_json::from_str(json)?;
    Ok(body
        .pointer("/responseData/HostJoinUrl")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(str::to_string))
}

/// Create-therapy request body.
pub fn encode_new_therapy(therapy: &NewTherapy) -> PayloadResult<String> {
    Ok(serde_json::to_string(&NewTherapyBody {
        therapy_type: &therapy.therapy_type,
        therapy_date: &therapy.date,
        therapy_start_time: &therapy.start_time,
        therapy_end_time: &therapy.end_time,
        therapy_duration: therapy.duration.as_deref().unwrap_or_default(),
        therapy_remarks: &therapy.remarks,
        therapy_cost: therapy.cost.as_deref().unwrap_or_default(),
    })?)
}

/// Update request body: the full document with edited fields.
pub fn encode_therapy_update(session: &TherapySession) -> PayloadResult<String> {
    Ok(serde_json::to_string(&RawTherapy::from(session))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    const LIST: &str = r#"{
        "therepys": [
            {
                "_id": "t1",
                "patient_id": "66a1",
                "therepy_id": "TH-001",
                "therepy_type": "Physiotherapy",
                "therepy_remarks": "Knee",
                "therepy_link": "https://meet.example.com/t1",
                "therepy_date": "2024-07-20",
                "therepy_start_time": "10:00",
                "therepy_end_time": "11:00",
                "therepy_cost": "500"
            },
            {
                "_id": "t2",
                "therepy_type": "Massage",
                "therepy_date": "2024-08-01T00:00:00.000Z"
            }
        ],
        "responseData": {"HostJoinUrl": "https://meet.example.com/host"}
    }"#;

    #[test]
    fn test_parse_therapy_list() {
        let sessions = parse_therapy_list(LIST).unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].therapy_id, "TH-001");
        assert_eq!(sessions[0].time_range().as_deref(), Some("10:00 - 11:00"));
        assert_eq!(sessions[0].cost.as_deref(), Some("500"));
        assert_eq!(sessions[1].start_time, None);
        assert_eq!(sessions[1].remarks, "");
    }

    #[test]
    fn test_missing_therepys() {
        assert!(matches!(
            parse_therapy_list(r#"{"message": "no data"}"#),
            Err(PayloadError::UnexpectedShape(_))
        ));
        assert!(matches!(
            parse_therapy_list(r#"{"therepys": "none"}"#),
            Err(PayloadError::UnexpectedShape(_))
        ));
        assert!(matches!(
            parse_therapy_list("[]"),
            Err(PayloadError::UnexpectedShape(_))
        ));
    }

    #[test]
    fn test_empty_therepys() {
        assert!(parse_therapy_list(r#"{"therepys": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse_therapy_list("{\"therepys\": ["),
            Err(PayloadError::Json(_))
        ));
    }

    #[test]
    fn test_host_join_url() {
        assert_eq!(
            parse_host_join_url(LIST).unwrap().as_deref(),
            Some("https://meet.example.com/host")
        );
        assert_eq!(parse_host_join_url(r#"{"therepys": []}"#).unwrap(), None);
        assert_eq!(
            parse_host_join_url(r#"{"responseData": {"HostJoinUrl": ""}}"#).unwrap(),
            None
        );
    }

    #[test]
    fn test_encode_new_therapy() {
        let mut therapy = NewTherapy::new(
            "Physiotherapy".into(),
            NaiveDate::from_ymd_opt(2024, 7, 20).unwrap(),
            NaiveTime::from_hms_opt(9, 5, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        );
        therapy.cost = Some("750".into());

        let body: Value = serde_json::from_str(&encode_new_therapy(&therapy).unwrap()).unwrap();
        assert_eq!(body["therapy_type"], "Physiotherapy");
        assert_eq!(body["therapy_date"], "2024-07-20");
        assert_eq!(body["therapy_start_time"], "09:05");
        assert_eq!(body["therapy_end_time"], "10:00");
        assert_eq!(body["therapy_duration"], "");
        assert_eq!(body["therapy_cost"], "750");
    }

    #[test]
    fn test_encode_therapy_update_uses_server_spelling() {
        let sessions = parse_therapy_list(LIST).unwrap();
        let mut edited = sessions[0].clone();
        edited.remarks = "Left knee".into();

        let body: Value =
            serde_json::from_str(&encode_therapy_update(&edited).unwrap()).unwrap();
        assert_eq!(body["_id"], "t1");
        assert_eq!(body["therepy_remarks"], "Left knee");
        assert_eq!(body["therepy_cost"], "500");
        assert!(body.get("therapy_cost").is_none());
    }
}
