//! Application-level constants and logging setup.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

pub const APP_NAME: &str = "PhysioCare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Preference key holding the selected theme.
pub const THEME_PREFERENCE_KEY: &str = "theme";

/// Country prefix applied to registration phone numbers.
pub const PHONE_COUNTRY_PREFIX: &str = "+91";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "physio_core=info,physio_payloads=info"
}

static LOGGING: Once = Once::new();

/// Install the global tracing subscriber. Later calls are no-ops.
pub fn init_logging() {
    LOGGING.call_once(|| {
        let result = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(default_log_filter())),
            )
            .try_init();

        match result {
            Ok(()) => tracing::info!("{} core v{} starting", APP_NAME, APP_VERSION),
            // Host process already installed a subscriber
            Err(e) => eprintln!("tracing subscriber not installed: {e}"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(default_log_filter()).is_ok());
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        init_logging();
    }
}
