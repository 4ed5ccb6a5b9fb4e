//! Collection (table) management.

use rusqlite::Connection;

use crate::error::AnalyticsError;

/// Check that `name` can be used as a table name: an ASCII identifier that
/// does not collide with SQLite's internal tables.
pub fn validate_collection_name(name: &str) -> Result<(), AnalyticsError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid_start || !valid_rest || name.to_ascii_lowercase().starts_with("sqlite_") {
        return Err(AnalyticsError::InvalidCollection(name.to_string()));
    }
    Ok(())
}

/// Create the collection and its timestamp index if missing.
pub fn ensure_collection(conn: &Connection, name: &str) -> Result<(), AnalyticsError> {
    validate_collection_name(name)?;
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS \"{name}\" (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             document TEXT NOT NULL
         );
         CREATE INDEX IF NOT EXISTS \"idx_{name}_timestamp\"
             ON \"{name}\"(json_extract(document, '$.timestamp'));"
    ))?;
    Ok(())
}

pub fn collection_exists(conn: &Connection, name: &str) -> Result<bool, AnalyticsError> {
    validate_collection_name(name)?;
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
        [name],
        |row| row.get(0),
    )?;
    Ok(exists)
}
