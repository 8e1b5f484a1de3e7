//! Error types for csvfieldlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting or assembling CSV display data
#[derive(Error, Debug)]
pub enum CsvFieldError {
    /// The bytes behind a file reference could not be loaded
    #[error("source unavailable '{uri}': {source}")]
    SourceUnavailable {
        uri: String,
        source: std::io::Error,
    },

    /// The configured column has no match in the header (strict policy only)
    #[error("column '{column}' not found in header [{}]", .available.join(", "))]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    /// The CSV reader failed while reading a record.
    ///
    /// Malformed quoting is recovered by the reader rather than reported here.
    #[error("failed to parse CSV record {position}: {message}")]
    Parse { position: u64, message: String },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),
}

impl CsvFieldError {
    /// Build a `SourceUnavailable` for the given URI.
    pub fn unavailable(uri: impl Into<String>, source: std::io::Error) -> Self {
        CsvFieldError::SourceUnavailable {
            uri: uri.into(),
            source,
        }
    }

    /// Whether this error means the file could not be read at all.
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, CsvFieldError::SourceUnavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_not_found_lists_header() {
        let err = CsvFieldError::ColumnNotFound {
            column: "email".to_string(),
            available: vec!["first_name".to_string(), "last_name".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "column 'email' not found in header [first_name, last_name]"
        );
    }

    #[test]
    fn test_unavailable_helper() {
        let err = CsvFieldError::unavailable(
            "public://people.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_source_unavailable());
        assert!(err.to_string().starts_with("source unavailable 'public://people.csv'"));
    }
}
