//! Error types shared across morphcurves crates.

use std::path::PathBuf;

/// Top-level error type for morphcurves operations.
#[derive(Debug, thiserror::Error)]
pub enum MorphcurvesError {
    /// Timecode text did not match `HH:MM:SS:FF.mmm`.
    #[error("Format error: {message}")]
    Format { message: String },

    #[error("Table error: {message}")]
    Table { message: String },

    #[error("Missing column: {name}")]
    MissingColumn { name: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("I/O error at {path}: {source}")]
    IoAt {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using MorphcurvesError.
pub type MorphcurvesResult<T> = Result<T, MorphcurvesError>;

impl MorphcurvesError {
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format {
            message: msg.into(),
        }
    }

    pub fn table(msg: impl Into<String>) -> Self {
        Self::Table {
            message: msg.into(),
        }
    }

    pub fn missing_column(name: impl Into<String>) -> Self {
        Self::MissingColumn { name: name.into() }
    }

    /// Attach a path to an I/O error, promoting `NotFound` to `FileNotFound`.
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::IoAt { path, source }
        }
    }

    /// Whether this error came from a malformed timecode.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}
