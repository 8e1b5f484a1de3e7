//! # csvfield
//!
//! A CLI that shows one column of CSV files the way a CSV display field
//! renders it on a page.
//!
//! ## Overview
//!
//! csvfield plays the host for csvfieldlib: it finds CSV files on disk,
//! loads the formatter settings, and prints the assembled display entries,
//! one value list per file, followed by file links when `--show-file` is
//! set.
//!
//! ## Usage
//!
//! ```bash
//! # Show the first_name column of every CSV under uploads/
//! csvfield render uploads
//!
//! # render is the default command
//! csvfield uploads -c last_name
//!
//! # Pick another column, and list the files after the values
//! csvfield render uploads --column email --show-file
//!
//! # Fail files whose header lacks the column instead of showing nothing
//! csvfield render uploads --column email --strict
//!
//! # Output as JSON
//! csvfield render uploads --output json
//!
//! # Settings from a file; CSVFIELD_CSV_COLUMN etc. override it
//! csvfield settings --config csvfield.toml
//! ```

mod render;
mod settings;

use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use console::Style;
use csvfieldlib::{assemble, discover_all, FileReference, FilterConfig, LocalFileSource};
use outstanding::cli::{App, CommandContext, HandlerResult, Output, RunResult};
use outstanding::Theme;
use tracing_subscriber::EnvFilter;

use crate::render::{DisplayContext, SettingsContext};

const DISPLAY_TEMPLATE: &str = include_str!("../templates/display.jinja");
const SETTINGS_TEMPLATE: &str = include_str!("../templates/settings.jinja");

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .value_name("FILE")
        .help("TOML file with csv_column / show_file / column_policy")
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("csvfield")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Show one column of CSV files as display lists")
        .subcommand(
            Command::new("render")
                .about("Render the configured column of each CSV file (default command)")
                .arg(
                    Arg::new("path")
                        .action(ArgAction::Append)
                        .default_value(".")
                        .help("CSV files or directories to search"),
                )
                .arg(
                    Arg::new("column")
                        .short('c')
                        .long("column")
                        .help("Header name of the column to display"),
                )
                .arg(
                    Arg::new("show-file")
                        .short('s')
                        .long("show-file")
                        .action(ArgAction::SetTrue)
                        .help("Append a link to each file after the value lists"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Treat a column missing from a header as an error"),
                )
                .arg(
                    Arg::new("include")
                        .short('i')
                        .long("include")
                        .action(ArgAction::Append)
                        .help("Include files matching glob pattern"),
                )
                .arg(
                    Arg::new("exclude")
                        .short('e')
                        .long("exclude")
                        .action(ArgAction::Append)
                        .help("Exclude files matching glob pattern"),
                )
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("settings")
                .about("Show the effective formatter settings")
                .arg(config_arg()),
        )
}

/// Build filter config from matches
fn build_filter(matches: &ArgMatches) -> Result<FilterConfig, anyhow::Error> {
    let mut filter = FilterConfig::new();

    if let Some(includes) = matches.get_many::<String>("include") {
        for pattern in includes {
            filter = filter.include(pattern)?;
        }
    }

    if let Some(excludes) = matches.get_many::<String>("exclude") {
        for pattern in excludes {
            filter = filter.exclude(pattern)?;
        }
    }

    Ok(filter)
}

/// Handler for render command
fn render_handler(matches: &ArgMatches, _ctx: &CommandContext) -> HandlerResult<DisplayContext> {
    let settings = settings::from_matches(matches)?;
    let filter = build_filter(matches)?;
    let paths: Vec<&String> = matches
        .get_many::<String>("path")
        .map(|v| v.collect())
        .unwrap_or_default();

    let mut files: Vec<FileReference> = discover_all(&paths, &filter)?
        .iter()
        .map(FileReference::from_path)
        .collect();

    let assembly = assemble(&mut files, &LocalFileSource::new(), &settings);
    for failure in &assembly.failures {
        eprintln!("Error: {}: {}", failure.uri, failure.error);
    }

    Ok(Output::Render(DisplayContext::new(
        files.len(),
        &settings,
        assembly,
    )))
}

/// Handler for settings command
fn settings_handler(matches: &ArgMatches, _ctx: &CommandContext) -> HandlerResult<SettingsContext> {
    let settings = settings::from_matches(matches)?;
    Ok(Output::Render(SettingsContext::new(settings)))
}

/// Create the theme with styles
fn create_theme() -> Theme {
    Theme::new()
        .add("header", Style::new().bold())
        .add("item", Style::new())
        .add("link", Style::new().cyan().underlined())
        .add("muted", Style::new().dim())
        .add("error", Style::new().red().bold())
}

fn run<I, T>(args: I) -> RunResult
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    App::builder()
        .theme(create_theme())
        .command("render", render_handler, DISPLAY_TEMPLATE)
        .command("settings", settings_handler, SETTINGS_TEMPLATE)
        .run_to_string(build_command(), args)
}

/// Insert `render` after the program name unless a subcommand or a
/// root-level flag comes first, so `csvfield uploads -c email` works.
fn with_default_command(mut args: Vec<String>) -> Vec<String> {
    const ROOT_ARGS: &[&str] = &["render", "settings", "help", "-h", "--help", "-V", "--version"];

    let explicit = args
        .get(1)
        .is_some_and(|first| ROOT_ARGS.contains(&first.as_str()));
    if !explicit {
        args.insert(1.min(args.len()), "render".to_string());
    }
    args
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    init_tracing();

    let args = with_default_command(std::env::args().collect());

    match run(args) {
        RunResult::Handled(output) => {
            if output.starts_with("Error:") {
                eprintln!("{}", output);
                return ExitCode::FAILURE;
            }
            print!("{}", output);
            ExitCode::SUCCESS
        }
        RunResult::Binary(_, _) => {
            // Not used in csvfield
            ExitCode::SUCCESS
        }
        RunResult::NoMatch(_) => {
            let _ = build_command().print_help();
            ExitCode::FAILURE
        }
    }
}
