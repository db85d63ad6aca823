//! Error types for shape construction and persistence.

use crate::tool::Tool;
use thiserror::Error;

/// Errors raised by the shape factory, the persistence codec and settings I/O.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading or writing a drawing file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream is not valid JSON or does not match the record layout
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings could not be written as TOML
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// A record decoded but its contents cannot describe a shape
    #[error("Malformed drawing data: {message}")]
    MalformedData {
        /// What was wrong with the record
        message: String,
    },

    /// The file was written by an incompatible format version
    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    /// The factory was asked for a tool that has no shape
    #[error("Tool '{0}' has no shape kind")]
    UnsupportedShapeKind(Tool),
}

impl Error {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedData {
            message: message.into(),
        }
    }

    /// True for every failure caused by the contents of a stream rather than
    /// by the environment or the caller.
    pub fn is_malformed_data(&self) -> bool {
        matches!(
            self,
            Self::Json(_) | Self::MalformedData { .. } | Self::VersionMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
