use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
    process::ExitCode,
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use visadesk_engine::{MIN_QUERY_CHARS, lookup_locations, validate_file};
use visadesk_registry::{DEFAULT_RESULT_LIMIT, LocationRegistry};
use visadesk_util::{UserPreferences, file_meta_from_path, format_size};

/// H1B visa dashboard: work site search and weekly timesheets.
#[derive(Debug, Parser)]
#[command(name = "visadesk", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search the US city reference table
    Locations {
        /// City name fragment (at least two characters)
        query: String,
        /// Maximum number of results
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },
    /// Check files against the upload size and type rules
    CheckFiles {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let preferences = Arc::new(UserPreferences::load_or_ephemeral());

    // No subcommands => TUI
    let Some(command) = cli.command else {
        init_tracing(true);
        visadesk_tui::run(preferences).await?;
        return Ok(ExitCode::SUCCESS);
    };

    init_tracing(false);
    match command {
        Command::Locations { query, limit } => {
            let limit = limit.or_else(|| preferences.location_result_limit()).unwrap_or(DEFAULT_RESULT_LIMIT);
            run_locations(&query, limit)
        }
        Command::CheckFiles { paths } => {
            let all_accepted = check_files(&paths);
            Ok(if all_accepted { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
    }
}

/// Installs the subscriber. While the TUI owns the terminal, logs go to a
/// file; otherwise to stderr.
fn init_tracing(to_file: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if to_file {
        // Without a log file the TUI runs silently.
        if let Ok(file) = open_log_file() {
            let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
        }
        return;
    }
    let _ = builder.with_writer(std::io::stderr).try_init();
}

fn open_log_file() -> Result<fs::File> {
    let dir = dirs_next::data_local_dir()
        .context("no local data directory")?
        .join("visadesk");
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join("visadesk.log");
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))
}

fn run_locations(query: &str, limit: usize) -> Result<ExitCode> {
    let registry = LocationRegistry::from_embedded().context("loading location reference table")?;
    match location_labels(&registry, query, limit) {
        Ok(labels) => {
            debug!(query, limit, found = labels.len(), "location search");
            for label in labels {
                println!("{label}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(message) => {
            eprintln!("{message}");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Labels printed by `locations`, or the message explaining why there are none.
fn location_labels(registry: &LocationRegistry, query: &str, limit: usize) -> Result<Vec<String>, String> {
    match lookup_locations(registry, query, limit) {
        None => Err(format!("Type at least {MIN_QUERY_CHARS} characters to search")),
        Some(matches) if matches.is_empty() => Err("No matching cities".to_string()),
        Some(matches) => Ok(matches.iter().map(|location| location.label()).collect()),
    }
}

/// Prints one verdict per file. Returns `true` when every file passes.
fn check_files(paths: &[PathBuf]) -> bool {
    let mut all_accepted = true;
    for path in paths {
        let verdict = match file_meta_from_path(path) {
            Ok(meta) => match validate_file(&meta) {
                Ok(()) => format!("ok       {} ({}, {})", meta.name, meta.mime_type, format_size(meta.size_bytes)),
                Err(rejection) => {
                    all_accepted = false;
                    format!("rejected {rejection}")
                }
            },
            Err(error) => {
                all_accepted = false;
                format!("error    {}: {error}", path.display())
            }
        };
        println!("{verdict}");
    }
    all_accepted
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_locations_with_limit() {
        let cli = Cli::try_parse_from(["visadesk", "locations", "san", "--limit", "3"]).expect("valid args");
        assert!(matches!(cli.command, Some(Command::Locations { ref query, limit: Some(3) }) if query == "san"));
    }

    #[test]
    fn short_location_queries_ask_for_more() {
        let registry = LocationRegistry::from_embedded().expect("embedded table");
        let message = location_labels(&registry, "a", 8).expect_err("too short");
        assert!(message.starts_with("Type at least 2"));
        assert!(location_labels(&registry, " a , TX", 8).is_err());
        assert_eq!(location_labels(&registry, "zzqq", 8), Err("No matching cities".to_string()));
    }

    #[test]
    fn committed_label_finds_its_own_city() {
        let registry = LocationRegistry::from_embedded().expect("embedded table");
        let labels = location_labels(&registry, "Austin, TX", 8).expect("matches");
        assert_eq!(labels.first().map(String::as_str), Some("Austin, TX"));
    }

    #[test]
    fn check_files_requires_paths() {
        assert!(Cli::try_parse_from(["visadesk", "check-files"]).is_err());
    }

    #[test]
    fn check_files_flags_rejections() {
        let dir = tempfile::tempdir().expect("tempdir");
        let good = dir.path().join("hours.pdf");
        let bad = dir.path().join("archive.zip");
        fs::write(&good, b"%PDF").expect("write");
        fs::write(&bad, b"PK").expect("write");
        assert!(check_files(&[good.clone()]));
        assert!(!check_files(&[good, bad]));
        assert!(!check_files(&[dir.path().join("missing.pdf")]));
    }
}
