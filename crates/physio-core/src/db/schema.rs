//! SQLite schema definition.

/// Local schema. Patient and therapy data stay on the server.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- User Preferences (theme and other UI settings)
-- ============================================================================

CREATE TABLE IF NOT EXISTS preferences (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
