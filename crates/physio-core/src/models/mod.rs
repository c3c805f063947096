//! Domain models for the physio clinic app.

mod appointment;
mod patient;
mod payment;
mod therapy;

pub use appointment::*;
pub use patient::*;
pub use payment::*;
pub use therapy::*;

use thiserror::Error;

/// Model errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown {kind} '{value}'")]
    UnknownValue { kind: &'static str, value: String },

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
