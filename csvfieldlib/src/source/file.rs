//! File references and the sources that load their bytes.
//!
//! A [`FileReference`] is what the host hands over: a URI plus the metadata
//! the display needs. Loading is delegated to a [`FileSource`], so the core
//! never touches storage directly.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CsvFieldError;
use crate::Result;

/// Per-item display attributes passed through from the host untouched.
pub type Attributes = BTreeMap<String, String>;

/// A host-owned handle to one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileReference {
    /// Stable identifier of the file (path or URI)
    pub uri: String,
    /// User-supplied description shown with the file link
    #[serde(default)]
    pub description: String,
    /// Cache tags to propagate with the file link
    #[serde(default)]
    pub cache_tags: Vec<String>,
    /// Display attributes, moved into the first entry that renders this file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

impl FileReference {
    /// Create a reference with no description, tags or attributes.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    /// Create a reference for a file on disk, tagged `file:<path>`.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let uri = path.as_ref().to_string_lossy().to_string();
        let tag = format!("file:{}", uri);
        Self::new(uri).cache_tag(tag)
    }

    /// Builder: set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder: add one cache tag
    pub fn cache_tag(mut self, tag: impl Into<String>) -> Self {
        self.cache_tags.push(tag.into());
        self
    }

    /// Builder: set one display attribute
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .get_or_insert_with(Attributes::new)
            .insert(name.into(), value.into());
        self
    }

    /// Move the attributes out, leaving none behind.
    pub fn take_attributes(&mut self) -> Option<Attributes> {
        self.attributes.take()
    }
}

/// Loads the bytes behind a file reference.
///
/// Implementations report anything that keeps the bytes from being read as
/// [`CsvFieldError::SourceUnavailable`].
pub trait FileSource {
    fn load(&self, file: &FileReference) -> Result<Vec<u8>>;
}

impl<S: FileSource + ?Sized> FileSource for &S {
    fn load(&self, file: &FileReference) -> Result<Vec<u8>> {
        (**self).load(file)
    }
}

/// Reads file references as paths on the local filesystem.
///
/// A `file://` prefix is accepted and stripped. Relative URIs resolve
/// against the configured base directory, if any.
#[derive(Debug, Clone, Default)]
pub struct LocalFileSource {
    base: Option<PathBuf>,
}

impl LocalFileSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative URIs against `base`.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }

    fn resolve(&self, uri: &str) -> PathBuf {
        let path = Path::new(uri.strip_prefix("file://").unwrap_or(uri));
        match &self.base {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl FileSource for LocalFileSource {
    fn load(&self, file: &FileReference) -> Result<Vec<u8>> {
        let path = self.resolve(&file.uri);
        std::fs::read(&path).map_err(|e| CsvFieldError::unavailable(&file.uri, e))
    }
}

/// In-memory file store keyed by URI.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: register the content for a URI
    pub fn with_file(mut self, uri: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(uri, content);
        self
    }

    pub fn insert(&mut self, uri: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.files.insert(uri.into(), content.into());
    }
}

impl FileSource for MemorySource {
    fn load(&self, file: &FileReference) -> Result<Vec<u8>> {
        self.files.get(&file.uri).cloned().ok_or_else(|| {
            CsvFieldError::unavailable(
                &file.uri,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file in memory"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_reference_builder() {
        let file = FileReference::new("public://people.csv")
            .description("Staff list")
            .cache_tag("file:7")
            .attribute("class", "csv-item")
            .attribute("data-delta", "0");

        assert_eq!(file.uri, "public://people.csv");
        assert_eq!(file.description, "Staff list");
        assert_eq!(file.cache_tags, vec!["file:7"]);
        let attrs = file.attributes.as_ref().unwrap();
        assert_eq!(attrs.get("class").map(String::as_str), Some("csv-item"));
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn test_take_attributes_is_one_shot() {
        let mut file = FileReference::new("a.csv").attribute("class", "x");
        assert!(file.take_attributes().is_some());
        assert!(file.take_attributes().is_none());
        assert!(file.attributes.is_none());
    }

    #[test]
    fn test_from_path_tags_file() {
        let file = FileReference::from_path("/data/people.csv");
        assert_eq!(file.uri, "/data/people.csv");
        assert_eq!(file.cache_tags, vec!["file:/data/people.csv"]);
    }

    #[test]
    fn test_local_source_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("people.csv");
        fs::write(&path, "first_name\nAda\n").unwrap();

        let source = LocalFileSource::new();
        let bytes = source.load(&FileReference::from_path(&path)).unwrap();
        assert_eq!(bytes, b"first_name\nAda\n");

        let uri = format!("file://{}", path.display());
        let bytes = source.load(&FileReference::new(uri)).unwrap();
        assert_eq!(bytes, b"first_name\nAda\n");
    }

    #[test]
    fn test_local_source_with_base() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("people.csv"), "a\n1\n").unwrap();

        let source = LocalFileSource::with_base(dir.path());
        let bytes = source.load(&FileReference::new("people.csv")).unwrap();
        assert_eq!(bytes, b"a\n1\n");
    }

    #[test]
    fn test_local_source_missing_file() {
        let dir = tempdir().unwrap();
        let file = FileReference::from_path(dir.path().join("missing.csv"));

        let err = LocalFileSource::new().load(&file).unwrap_err();
        assert!(err.is_source_unavailable());
    }

    #[test]
    fn test_memory_source() {
        let source = MemorySource::new().with_file("mem://a.csv", "x\n1\n");
        assert_eq!(source.load(&FileReference::new("mem://a.csv")).unwrap(), b"x\n1\n");

        let err = source.load(&FileReference::new("mem://b.csv")).unwrap_err();
        assert!(matches!(
            err,
            CsvFieldError::SourceUnavailable { ref uri, .. } if uri == "mem://b.csv"
        ));
    }
}
