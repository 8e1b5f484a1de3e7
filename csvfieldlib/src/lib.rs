//! # csvfieldlib
//!
//! Display one column of uploaded CSV files, the way a CSV display field
//! formatter renders them in a content-management page.
//!
//! ## Overview
//!
//! A field references one or more CSV attachments. For each of them the
//! library reads the header, finds the configured column by exact name, and
//! returns that column's value for every data row. The values become a list
//! entry for the host's template layer; optionally, a link to each file is
//! appended after all the lists.
//!
//! The pipeline has three stages:
//!
//! - **source**: file references, loading bytes, finding CSV files on disk
//! - **data**: parsing CSV and projecting a column
//! - **output**: assembling the ordered display entries
//!
//! Nothing is cached and nothing is kept between calls; every function is a
//! transform over its inputs.
//!
//! ## Example
//!
//! ```rust
//! use csvfieldlib::{assemble, DisplayEntry, FileReference, FormatterSettings, MemorySource};
//!
//! let source = MemorySource::new().with_file(
//!     "public://people.csv",
//!     "first_name,last_name\nAda,Lovelace\nAlan,Turing\n",
//! );
//! let mut files = vec![FileReference::new("public://people.csv").description("Staff")];
//! let settings = FormatterSettings::new().show_file(true);
//!
//! let assembly = assemble(&mut files, &source, &settings);
//! assert_eq!(assembly.entries.len(), 2);
//! match &assembly.entries[0] {
//!     DisplayEntry::ListDisplay(list) => assert_eq!(list.items, vec!["Ada", "Alan"]),
//!     _ => unreachable!(),
//! }
//! assert!(assembly.entries[1].is_file_link());
//! ```

pub mod data;
pub mod error;
pub mod options;
pub mod output;
pub mod source;

pub use data::{extract_column, extract_column_with_policy, extract_from_source, CsvDocument};
pub use error::CsvFieldError;
pub use options::{ColumnPolicy, FormatterSettings, DEFAULT_CSV_COLUMN};
pub use output::{assemble, Assembly, DisplayEntry, FileFailure, FileLink, ListDisplay};
pub use source::{
    discover_all, discover_files, Attributes, FileReference, FileSource, FilterConfig,
    LocalFileSource, MemorySource,
};

/// Result type for csvfieldlib operations
pub type Result<T> = std::result::Result<T, CsvFieldError>;
