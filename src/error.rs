//! Error types for cvrank.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Error, Debug)]
pub enum CvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// The upstream extraction produced no usable text or spans.
    #[error("Extraction unavailable: {0}")]
    ExtractionUnavailable(String),

    /// A search was requested against a record that has no span data.
    #[error("No span data available to search")]
    EmptySearchTarget,

    /// Row 0 refers to the header line; data rows are numbered from 1.
    #[error("Corrupt record store at row {row}: {reason}")]
    PersistenceCorruption { row: usize, reason: String },

    #[error("Failed to persist record collection: {0}")]
    PersistenceWrite(String),

    #[error("Record not found: {0}")]
    RecordNotFound(u64),

    #[error("Timed out waiting for store lock: {0}")]
    LockTimeout(String),
}

impl CvError {
    /// Stable machine-readable code used in robot output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io_error",
            Self::Config(_) => "config_error",
            Self::MissingConfig(_) => "missing_config",
            Self::Serialization(_) => "serialization_error",
            Self::ValidationFailed(_) => "validation_failed",
            Self::ExtractionUnavailable(_) => "extraction_unavailable",
            Self::EmptySearchTarget => "empty_search_target",
            Self::PersistenceCorruption { .. } => "persistence_corruption",
            Self::PersistenceWrite(_) => "persistence_write_failure",
            Self::RecordNotFound(_) => "record_not_found",
            Self::LockTimeout(_) => "lock_timeout",
        }
    }
}

impl From<serde_json::Error> for CvError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CvError>;
