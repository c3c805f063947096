//! JSON payloads for the clinic REST service.
//!
//! The server speaks Mongo-style documents (`_id`, `createdAt`) with its own
//! field spellings (`patient_first_name`, `therepy_date`, a `therepys` list).
//! This crate maps those documents onto `physio_core` models and builds the
//! request bodies the server expects. Transport is left to the host app.

pub mod patients;
pub mod therapies;

pub use patients::*;
pub use therapies::*;

use thiserror::Error;

/// Payload errors.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),
}

pub type PayloadResult<T> = Result<T, PayloadError>;
