//! View data handed to the outstanding templates.

use csvfieldlib::{Assembly, DisplayEntry, FormatterSettings};
use serde::Serialize;

/// A file that could not be displayed, flattened for the template
#[derive(Debug, Serialize)]
pub struct FailureRow {
    pub delta: usize,
    pub uri: String,
    pub message: String,
}

/// Data context for the display template
#[derive(Debug, Serialize)]
pub struct DisplayContext {
    /// Number of files discovered
    pub file_count: usize,
    /// Settings lines shown above the entries
    pub summary: Vec<String>,
    pub entries: Vec<DisplayEntry>,
    pub failures: Vec<FailureRow>,
}

impl DisplayContext {
    pub fn new(file_count: usize, settings: &FormatterSettings, assembly: Assembly) -> Self {
        let failures = assembly
            .failures
            .iter()
            .map(|f| FailureRow {
                delta: f.delta,
                uri: f.uri.clone(),
                message: f.error.to_string(),
            })
            .collect();

        Self {
            file_count,
            summary: settings.summary(),
            entries: assembly.entries,
            failures,
        }
    }
}

/// Data context for the settings template
#[derive(Debug, Serialize)]
pub struct SettingsContext {
    pub summary: Vec<String>,
    pub settings: FormatterSettings,
}

impl SettingsContext {
    pub fn new(settings: FormatterSettings) -> Self {
        Self {
            summary: settings.summary(),
            settings,
        }
    }
}
