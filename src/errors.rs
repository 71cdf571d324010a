//! Shared error types for censusmap.
//!
//! The indicator and scoring core never fails; it folds absent columns and
//! unparsable cells into informational [`crate::notice::Notice`]s. Errors here
//! cover the edges: reading the survey file, parsing configuration, validating
//! command arguments and writing reports.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for censusmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system errors with the path that caused them
    #[error("File system error on {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The survey file could not be decoded as CSV
    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid command arguments (unknown codes, inverted ranges)
    #[error("Invalid argument `{arg}`: {message}")]
    InvalidArgument { arg: String, message: String },

    /// Table construction errors
    #[error("Malformed table: {0}")]
    MalformedTable(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Create a CSV decoding error with path context
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(arg: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg: arg.into(),
            message: message.into(),
        }
    }

    /// True when the underlying cause is a missing file.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::FileSystem { source, .. } | Self::Io(source) => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            Self::Csv { source, .. } => matches!(
                source.kind(),
                csv::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::NotFound
            ),
            _ => false,
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
