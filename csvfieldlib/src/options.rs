//! Formatter settings for CSV column display.
//!
//! These are the values a host persists per formatter instance. Every field
//! carries a serde default so a partially filled settings document still
//! deserializes.

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Column shown when nothing else is configured.
pub const DEFAULT_CSV_COLUMN: &str = "first_name";

/// What to do when the configured column is missing from a file's header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnPolicy {
    /// Produce an empty value list
    #[default]
    Lenient,
    /// Fail with `ColumnNotFound`
    Strict,
}

impl FromStr for ColumnPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(ColumnPolicy::Lenient),
            "strict" => Ok(ColumnPolicy::Strict),
            _ => Err(format!("Unknown column policy: {}", s)),
        }
    }
}

/// Settings for one CSV display formatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatterSettings {
    /// Header name of the column to display
    #[serde(default = "default_csv_column", deserialize_with = "scalar_string")]
    pub csv_column: String,
    /// Also emit a file link per file, after the value lists
    #[serde(default)]
    pub show_file: bool,
    /// Behaviour for a column name absent from the header
    #[serde(default)]
    pub column_policy: ColumnPolicy,
}

fn default_csv_column() -> String {
    DEFAULT_CSV_COLUMN.to_string()
}

/// Accept any scalar as a column name; headers like `2024` or `true` are text.
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Str(String),
        UInt(u64),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Str(s) => s,
        Scalar::UInt(n) => n.to_string(),
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    })
}

impl Default for FormatterSettings {
    fn default() -> Self {
        Self {
            csv_column: default_csv_column(),
            show_file: false,
            column_policy: ColumnPolicy::Lenient,
        }
    }
}

impl FormatterSettings {
    /// Create settings with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the column to display
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.csv_column = name.into();
        self
    }

    /// Builder: set whether file links are appended
    pub fn show_file(mut self, show: bool) -> Self {
        self.show_file = show;
        self
    }

    /// Builder: set the missing-column policy
    pub fn policy(mut self, policy: ColumnPolicy) -> Self {
        self.column_policy = policy;
        self
    }

    /// One line per setting, for display next to the field configuration.
    pub fn summary(&self) -> Vec<String> {
        vec![
            format!("Column to display: {}", self.csv_column),
            format!(
                "Display file : {}",
                if self.show_file { "Yes" } else { "No" }
            ),
        ]
    }
}
