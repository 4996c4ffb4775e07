//! Error types for the pagetoc library.

use thiserror::Error;

use crate::numbering::PageFormat;

/// Result type alias for pagetoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating a table of contents.
#[derive(Error, Debug)]
pub enum Error {
    /// The host has no open document.
    #[error("No active document")]
    NoActiveDocument,

    /// No output frame was given and nothing is selected in the host.
    #[error("No output frame selected")]
    NoOutputTargetSelected,

    /// The output object is not a text frame.
    #[error("Output object is not a text frame: {0}")]
    InvalidOutputTargetType(String),

    /// A page number below 1 cannot be written with this format.
    #[error("Page number {value} cannot be formatted as {format}")]
    InvalidPageNumber {
        /// The computed page number
        value: i64,
        /// The format that was requested
        format: PageFormat,
    },

    /// A configured style does not exist and could not be created.
    #[error("Style cannot be resolved: {0}")]
    UnresolvableStyle(String),

    /// The section table is empty or out of order.
    #[error("Invalid section table: {0}")]
    InvalidSections(String),

    /// The configuration is inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A heading level beyond the configured number of levels.
    #[error("Heading level {level} exceeds the {levels} configured levels")]
    InvalidHeadingLevel {
        /// The offending level (0-based)
        level: usize,
        /// Number of configured levels
        levels: usize,
    },

    /// Error reported by the document host.
    #[error("Host error: {0}")]
    Host(String),

    /// Error reading or writing JSON snapshots and configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoActiveDocument;
        assert_eq!(err.to_string(), "No active document");

        let err = Error::InvalidOutputTargetType("image frame".to_string());
        assert_eq!(err.to_string(), "Output object is not a text frame: image frame");

        let err = Error::InvalidPageNumber {
            value: 0,
            format: PageFormat::RomanLower,
        };
        assert_eq!(err.to_string(), "Page number 0 cannot be formatted as i");

        let err = Error::InvalidHeadingLevel { level: 3, levels: 3 };
        assert_eq!(
            err.to_string(),
            "Heading level 3 exceeds the 3 configured levels"
        );
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
