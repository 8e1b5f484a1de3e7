//! Column extraction: from raw CSV bytes to the values of one column.

use crate::data::document::CsvDocument;
use crate::error::CsvFieldError;
use crate::options::ColumnPolicy;
use crate::source::{FileReference, FileSource};
use crate::Result;

/// Extract the values of `column` from raw CSV, one per data row.
///
/// A column missing from the header yields an empty list. Use
/// [`extract_column_with_policy`] with [`ColumnPolicy::Strict`] to get a
/// `ColumnNotFound` error instead.
///
/// # Example
///
/// ```rust
/// use csvfieldlib::extract_column;
///
/// let raw = "first_name,last_name\nAda,Lovelace\nAlan,Turing\n";
/// assert_eq!(extract_column(raw, "first_name").unwrap(), vec!["Ada", "Alan"]);
/// assert!(extract_column(raw, "email").unwrap().is_empty());
/// ```
pub fn extract_column(raw: impl AsRef<[u8]>, column: &str) -> Result<Vec<String>> {
    extract_column_with_policy(raw, column, ColumnPolicy::Lenient)
}

/// Extract the values of `column`, applying `policy` when it is missing.
///
/// An empty input never resolves a column and returns an empty list under
/// either policy.
pub fn extract_column_with_policy(
    raw: impl AsRef<[u8]>,
    column: &str,
    policy: ColumnPolicy,
) -> Result<Vec<String>> {
    let document = CsvDocument::parse(raw)?;
    if document.is_empty() {
        return Ok(Vec::new());
    }

    match document.column_index(column) {
        Some(index) => {
            tracing::debug!(column, index, rows = document.rows.len(), "resolved csv column");
            Ok(document.project(index))
        }
        None => match policy {
            ColumnPolicy::Lenient => {
                tracing::warn!(column, header = ?document.header, "csv column not in header");
                Ok(Vec::new())
            }
            ColumnPolicy::Strict => Err(CsvFieldError::ColumnNotFound {
                column: column.to_string(),
                available: document.header,
            }),
        },
    }
}

/// Load `file` through `source` and extract `column` from it.
pub fn extract_from_source<S: FileSource + ?Sized>(
    source: &S,
    file: &FileReference,
    column: &str,
    policy: ColumnPolicy,
) -> Result<Vec<String>> {
    let raw = source.load(file)?;
    let values = extract_column_with_policy(&raw, column, policy)?;
    tracing::debug!(uri = %file.uri, values = values.len(), "extracted csv column");
    Ok(values)
}
