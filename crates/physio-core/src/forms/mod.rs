//! Form state and validation for the editing screens.

mod booking;
mod patient_update;
mod registration;
mod therapy_edit;

pub use booking::*;
pub use patient_update::*;
pub use registration::*;
pub use therapy_edit::*;

use thiserror::Error;

use crate::models::ModelError;

/// Form errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Cannot {action} while form is {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: FormPhase,
    },

    #[error("{0}")]
    Validation(String),
}

impl From<ModelError> for FormError {
    fn from(e: ModelError) -> Self {
        FormError::Validation(e.to_string())
    }
}

pub type FormResult<T> = Result<T, FormError>;
