//! Discovery of CSV files on disk, with include/exclude globs.

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::error::CsvFieldError;
use crate::Result;

/// Glob-based selection of CSV files.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Patterns a path must match one of (empty = every .csv file)
    pub include: Vec<Pattern>,
    /// Patterns that reject a path
    pub exclude: Vec<Pattern>,
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| CsvFieldError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.include.push(compile(pattern)?);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude.push(compile(pattern)?);
        Ok(self)
    }

    /// Whether `path` is a CSV file selected by this filter.
    ///
    /// Excludes win over includes. The extension check ignores case, so
    /// `EXPORT.CSV` is picked up too.
    pub fn matches(&self, path: &Path) -> bool {
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv {
            return false;
        }

        let path_str = path.to_string_lossy();
        if self.exclude.iter().any(|p| p.matches(&path_str)) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|p| p.matches(&path_str))
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Find CSV files under `root`, sorted by path.
///
/// A file given as `root` is returned on its own when it passes the filter.
/// Hidden directories are not entered.
pub fn discover_files(root: impl AsRef<Path>, filter: &FilterConfig) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(CsvFieldError::PathNotFound(root.to_path_buf()));
    }

    if root.is_file() {
        return Ok(if filter.matches(root) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let walker = WalkDir::new(root).follow_links(true).into_iter();
    let mut files: Vec<PathBuf> = walker
        .filter_entry(|e| {
            e.depth() == 0
                || !e.file_type().is_dir()
                || !is_hidden(e.file_name().to_str().unwrap_or(""))
        })
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && filter.matches(path))
        .collect();

    files.sort();
    tracing::debug!(root = %root.display(), count = files.len(), "discovered csv files");
    Ok(files)
}

/// Find CSV files under several roots, keeping the order of the roots.
///
/// Duplicates (the same file reached from two roots) are kept only once, at
/// their first position.
pub fn discover_all<P: AsRef<Path>>(roots: &[P], filter: &FilterConfig) -> Result<Vec<PathBuf>> {
    let mut all_files: Vec<PathBuf> = Vec::new();
    for root in roots {
        for file in discover_files(root, filter)? {
            if !all_files.contains(&file) {
                all_files.push(file);
            }
        }
    }
    Ok(all_files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn create_uploads(dir: &Path) {
        fs::create_dir_all(dir.join("2024/01")).unwrap();
        fs::create_dir_all(dir.join("archive")).unwrap();
        fs::create_dir_all(dir.join(".cache")).unwrap();

        fs::write(dir.join("people.csv"), "first_name\nAda\n").unwrap();
        fs::write(dir.join("2024/01/staff.csv"), "first_name\nAlan\n").unwrap();
        fs::write(dir.join("2024/01/EXPORT.CSV"), "first_name\nGrace\n").unwrap();
        fs::write(dir.join("archive/old.csv"), "first_name\nCharles\n").unwrap();
        fs::write(dir.join(".cache/tmp.csv"), "first_name\nx\n").unwrap();
        fs::write(dir.join("notes.txt"), "not a csv").unwrap();
    }

    #[test]
    fn test_filter_matches_csv_only() {
        let filter = FilterConfig::new();
        assert!(filter.matches(Path::new("people.csv")));
        assert!(filter.matches(Path::new("uploads/EXPORT.CSV")));
        assert!(!filter.matches(Path::new("people.tsv")));
        assert!(!filter.matches(Path::new("csv")));
    }

    #[test]
    fn test_filter_include_and_exclude() {
        let filter = FilterConfig::new()
            .include("**/2024/**")
            .unwrap()
            .exclude("**/EXPORT.CSV")
            .unwrap();

        assert!(filter.matches(Path::new("up/2024/01/staff.csv")));
        assert!(!filter.matches(Path::new("up/2024/01/EXPORT.CSV")));
        assert!(!filter.matches(Path::new("up/archive/old.csv")));
    }

    #[test]
    fn test_discover_files_skips_hidden() {
        let temp = tempdir().unwrap();
        create_uploads(temp.path());

        let files = discover_files(temp.path(), &FilterConfig::new()).unwrap();

        assert_eq!(files.len(), 4);
        assert!(files.iter().any(|p| p.ends_with("people.csv")));
        assert!(files.iter().any(|p| p.ends_with("2024/01/EXPORT.CSV")));
        assert!(!files.iter().any(|p| p.to_string_lossy().contains(".cache")));
        assert!(!files.iter().any(|p| p.ends_with("notes.txt")));

        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }

    #[test]
    fn test_discover_files_with_exclude() {
        let temp = tempdir().unwrap();
        create_uploads(temp.path());

        let filter = FilterConfig::new().exclude("**/archive/**").unwrap();
        let files = discover_files(temp.path(), &filter).unwrap();

        assert!(!files.iter().any(|p| p.ends_with("archive/old.csv")));
        assert!(files.iter().any(|p| p.ends_with("people.csv")));
    }

    #[test]
    fn test_discover_single_file() {
        let temp = tempdir().unwrap();
        let file_path = temp.path().join("one.csv");
        fs::write(&file_path, "a\n1\n").unwrap();

        let files = discover_files(&file_path, &FilterConfig::new()).unwrap();
        assert_eq!(files, vec![file_path]);
    }

    #[test]
    fn test_discover_all_keeps_root_order() {
        let temp = tempdir().unwrap();
        create_uploads(temp.path());

        let roots = [temp.path().join("people.csv"), temp.path().to_path_buf()];
        let files = discover_all(&roots, &FilterConfig::new()).unwrap();

        assert!(files[0].ends_with("people.csv"));
        assert_eq!(files.len(), 4);
    }

    #[test]
    fn test_discover_missing_root() {
        let result = discover_files("/nonexistent/uploads", &FilterConfig::new());
        assert!(matches!(result, Err(CsvFieldError::PathNotFound(_))));
    }

    #[test]
    fn test_invalid_glob_pattern() {
        match FilterConfig::new().include("[invalid") {
            Err(CsvFieldError::InvalidGlob { pattern, .. }) => assert_eq!(pattern, "[invalid"),
            other => panic!("Expected InvalidGlob error, got {:?}", other.map(|_| ())),
        }
    }
}
