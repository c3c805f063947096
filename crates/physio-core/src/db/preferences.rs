//! Key-value preference operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};

impl Database {
    /// Get a preference value.
    pub fn get_preference(&self, key: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Insert or replace a preference value.
    pub fn set_preference(&self, key: &str, value: &str) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO preferences (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// Delete a preference. Errors if it does not exist.
    pub fn delete_preference(&self, key: &str) -> DbResult<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM preferences WHERE key = ?", [key])?;
        if rows_affected == 0 {
            return Err(DbError::NotFound(key.to_string()));
        }
        Ok(())
    }
}
