//! Display entries and the assembler that builds them.
//!
//! The data flow is:
//! 1. File references (from the host)
//! 2. Projected values (one list per file)
//! 3. Display entries: every value list first, then, when enabled, one
//!    file link per file
//!
//! Entries are plain data. A host template walks them in order and decides
//! the markup; the class names travel with each list so that styling stays
//! consistent across hosts.

use serde::Serialize;

use crate::data::extract_from_source;
use crate::error::CsvFieldError;
use crate::options::FormatterSettings;
use crate::source::{Attributes, FileReference, FileSource};

/// Class on the element wrapping each value list.
pub const WRAPPER_CLASS: &str = "wrapper";
/// Class on the value list itself.
pub const ITEM_LIST_CLASS: &str = "wrapper__links";
/// Lists are rendered unordered.
pub const LIST_TYPE: &str = "ul";

/// The values of the configured column for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListDisplay {
    pub items: Vec<String>,
    pub list_type: String,
    pub wrapper_class: String,
    pub item_class: String,
    /// Host attributes moved off the file reference
    pub attributes: Attributes,
}

impl ListDisplay {
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items,
            list_type: LIST_TYPE.to_string(),
            wrapper_class: WRAPPER_CLASS.to_string(),
            item_class: ITEM_LIST_CLASS.to_string(),
            attributes: Attributes::new(),
        }
    }
}

/// A generic link to the uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileLink {
    pub file: FileReference,
    pub description: String,
    pub cache_tags: Vec<String>,
    pub attributes: Attributes,
}

/// One renderable unit of output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayEntry {
    ListDisplay(ListDisplay),
    FileLink(FileLink),
}

impl DisplayEntry {
    pub fn is_list(&self) -> bool {
        matches!(self, DisplayEntry::ListDisplay(_))
    }

    pub fn is_file_link(&self) -> bool {
        matches!(self, DisplayEntry::FileLink(_))
    }
}

/// A file whose values could not be displayed.
#[derive(Debug)]
pub struct FileFailure {
    /// Position of the file in the input
    pub delta: usize,
    pub uri: String,
    pub error: CsvFieldError,
}

/// Output of [`assemble`]: the entries, plus the files that failed.
#[derive(Debug, Default)]
pub struct Assembly {
    pub entries: Vec<DisplayEntry>,
    pub failures: Vec<FileFailure>,
}

impl Assembly {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn into_entries(self) -> Vec<DisplayEntry> {
        self.entries
    }
}

/// Build the display entries for `files`.
///
/// Each file is loaded through `source` and its configured column becomes
/// one [`ListDisplay`], in input order. With `show_file` set, a
/// [`FileLink`] per file follows, again in input order, after every list.
///
/// Attributes are moved off each file reference into the first entry
/// produced for it, so they cannot be rendered twice. A file that fails to
/// load or parse is recorded in [`Assembly::failures`] and skipped; the
/// remaining files are still displayed.
pub fn assemble<S: FileSource + ?Sized>(
    files: &mut [FileReference],
    source: &S,
    settings: &FormatterSettings,
) -> Assembly {
    let mut assembly = Assembly::default();

    for (delta, file) in files.iter_mut().enumerate() {
        match extract_from_source(source, file, &settings.csv_column, settings.column_policy) {
            Ok(items) => {
                let mut list = ListDisplay::new(items);
                if let Some(attributes) = file.take_attributes() {
                    list.attributes = attributes;
                }
                assembly.entries.push(DisplayEntry::ListDisplay(list));
            }
            Err(error) => {
                tracing::warn!(uri = %file.uri, delta, %error, "skipping csv file");
                assembly.failures.push(FileFailure {
                    delta,
                    uri: file.uri.clone(),
                    error,
                });
            }
        }
    }

    if settings.show_file {
        for file in files.iter_mut() {
            let attributes = file.take_attributes().unwrap_or_default();
            assembly.entries.push(DisplayEntry::FileLink(FileLink {
                description: file.description.clone(),
                cache_tags: file.cache_tags.clone(),
                file: file.clone(),
                attributes,
            }));
        }
    }

    assembly
}
