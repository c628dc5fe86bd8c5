use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Value for '{key}' is {size} bytes, limit is {limit}")]
    QuotaExceeded { key: String, size: usize, limit: usize },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Internal(String),
}

/// Error type for start-up failures (locating and opening the store)
#[derive(Debug, Error)]
pub enum InitError {
    #[error("Could not determine project directories")]
    NoProjectDirs,

    #[error("Could not create data directory: {0}")]
    DataDirCreation(std::io::Error),

    #[error("Failed to open database: {0}")]
    DatabaseOpen(rusqlite::Error),

    #[error("Failed to run database migrations: {0}")]
    Migration(rusqlite::Error),
}
