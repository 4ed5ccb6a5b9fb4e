/// Errors from the analytics collection.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid collection name '{0}': use letters, digits and underscores")]
    InvalidCollection(String),
}
