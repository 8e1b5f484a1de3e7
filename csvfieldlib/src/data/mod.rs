//! Data extraction: parse CSV and project one column.
//!
//! This module handles the second stage of the pipeline - turning the raw
//! bytes of a file into the values to display. It provides:
//!
//! - **Parsing**: `CsvDocument`, the header and rows of a file
//! - **Extraction**: `extract_column` and friends, which resolve the
//!   configured column by header name and project it over every data row
//!
//! ## Example
//!
//! ```rust,ignore
//! use csvfieldlib::data::{extract_column, CsvDocument};
//!
//! let doc = CsvDocument::parse(bytes)?;
//! let values = extract_column(bytes, "first_name")?;
//! ```

pub mod document;
pub mod extract;

pub use document::CsvDocument;
pub use extract::{extract_column, extract_column_with_policy, extract_from_source};
