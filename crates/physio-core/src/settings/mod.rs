//! User preferences.
//!
//! [`ThemeService`] is created once at startup and handed to whatever needs
//! the theme. Reads come from memory; writes are persisted in the background
//! through a [`PreferenceStore`].

mod service;
mod store;
mod theme;

pub use service::*;
pub use store::*;
pub use theme::*;

use thiserror::Error;

use crate::db::DbError;

/// Settings errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Storage error: {0}")]
    Storage(#[from] DbError),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Preference writer has stopped")]
    WriterStopped,

    #[error("Failed to start preference writer: {0}")]
    Spawn(#[from] std::io::Error),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Persistent key-value storage for preferences.
pub trait PreferenceStore: Send + 'static {
    fn get(&self, key: &str) -> SettingsResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> SettingsResult<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> SettingsResult<()>;
}
