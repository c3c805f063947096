//! Patient registration form.

use serde::{Deserialize, Serialize};

use super::{FormError, FormResult};
use crate::config::PHONE_COUNTRY_PREFIX;
use crate::models::RegistrationRequest;

/// Raw registration input as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Local number; the country prefix is optional
    pub phone: String,
}

impl PatientRegistration {
    /// Validate and normalize into a request.
    pub fn validate(&self) -> FormResult<RegistrationRequest> {
        let first_name = required(&self.first_name, "First name")?;
        let last_name = required(&self.last_name, "Last name")?;
        let email = checked_email(&self.email)?;

        Ok(RegistrationRequest {
            first_name,
            last_name,
            email,
            phone: normalize_phone(&self.phone)?,
        })
    }
}

pub(super) fn checked_email(raw: &str) -> FormResult<String> {
    let email = raw.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email.to_string()),
        _ => Err(FormError::Validation("Email address is invalid".into())),
    }
}

pub(super) fn required(value: &str, label: &str) -> FormResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::Validation(format!("{label} is required")))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Strip separators and apply the country prefix exactly once.
pub fn normalize_phone(raw: &str) -> FormResult<String> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    let local = compact.strip_prefix(PHONE_COUNTRY_PREFIX).unwrap_or(&compact);

    if local.is_empty() || !local.chars().all(|c| c.is_ascii_digit()) {
        return Err(FormError::Validation(
            "Phone number must contain digits only".into(),
        ));
    }

    Ok(format!("{PHONE_COUNTRY_PREFIX}{local}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> PatientRegistration {
        PatientRegistration {
            first_name: " Amy ".into(),
            last_name: "Zeta".into(),
            email: "amy@example.com".into(),
            phone: "98765 43210".into(),
        }
    }

    #[test]
    fn test_valid_registration() {
        let request = registration().validate().unwrap();
        assert_eq!(request.first_name, "Amy");
        assert_eq!(request.last_name, "Zeta");
        assert_eq!(request.phone, "+919876543210");
    }

    #[test]
    fn test_prefix_applied_once() {
        assert_eq!(normalize_phone("+91 98765-43210").unwrap(), "+919876543210");
        assert_eq!(normalize_phone("9876543210").unwrap(), "+919876543210");
    }

    #[test]
    fn test_invalid_phone() {
        assert!(normalize_phone("").is_err());
        assert!(normalize_phone("+91").is_err());
        assert!(normalize_phone("98765abc").is_err());
    }

    #[test]
    fn test_required_names() {
        let mut input = registration();
        input.last_name = "  ".into();
        assert_eq!(
            input.validate().unwrap_err(),
            FormError::Validation("Last name is required".into())
        );
    }

    #[test]
    fn test_invalid_email() {
        for email in ["", "amy", "@example.com", "amy@"] {
            let mut input = registration();
            input.email = email.into();
            assert!(input.validate().is_err(), "accepted {email:?}");
        }
    }
}
