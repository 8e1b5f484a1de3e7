//! Layered formatter settings.
//!
//! Precedence, lowest first: built-in defaults, the TOML file passed with
//! `--config`, `CSVFIELD_*` environment variables, command-line flags.

use std::path::Path;

use anyhow::{bail, Context};
use clap::ArgMatches;
use csvfieldlib::{ColumnPolicy, FormatterSettings};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;

/// Prefix for settings taken from the environment
pub const ENV_PREFIX: &str = "CSVFIELD_";

/// Merge defaults, an optional TOML file and prefixed environment variables.
///
/// The column name is read from the environment verbatim, so values such as
/// `2024`, `007` or `true` stay text instead of being parsed as numbers or
/// booleans.
pub fn layered(config: Option<&Path>, env_prefix: &str) -> anyhow::Result<FormatterSettings> {
    let mut figment = Figment::from(Serialized::defaults(FormatterSettings::default()));

    if let Some(path) = config {
        if !path.is_file() {
            bail!("config file not found: {}", path.display());
        }
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed(env_prefix).ignore(&["csv_column"]));
    if let Ok(column) = std::env::var(format!("{env_prefix}CSV_COLUMN")) {
        figment = figment.merge(("csv_column", column));
    }

    figment
        .extract()
        .context("failed to load formatter settings")
}

/// Settings for a command: layered sources, then flags from `matches`.
pub fn from_matches(matches: &ArgMatches) -> anyhow::Result<FormatterSettings> {
    let config = matches.get_one::<String>("config").map(Path::new);
    let mut settings = layered(config, ENV_PREFIX)?;

    if let Ok(Some(column)) = matches.try_get_one::<String>("column") {
        settings.csv_column = column.clone();
    }
    if matches!(matches.try_get_one::<bool>("show-file"), Ok(Some(true))) {
        settings.show_file = true;
    }
    if matches!(matches.try_get_one::<bool>("strict"), Ok(Some(true))) {
        settings.column_policy = ColumnPolicy::Strict;
    }

    tracing::debug!(?settings, "formatter settings");
    Ok(settings)
}
