// wordcast-cli: shared utilities for CLI tools.

use std::path::PathBuf;
use std::process;

use tracing_subscriber::EnvFilter;
use wordcast_engine::PredictorOptions;
use wordcast_engine::handle::{CorpusFiles, PredictorHandle};

/// Environment variable naming the corpus directory.
const DATA_PATH_ENV: &str = "WORDCAST_DATA_PATH";

/// Environment variable holding the log filter.
const LOG_ENV: &str = "WORDCAST_LOG";

/// Corpus directory name inside the home directory.
const HOME_SUBDIR: &str = ".wordcast";

/// Search for a corpus directory and load a PredictorHandle from it.
///
/// Search order:
/// 1. `data_path` argument (if provided)
/// 2. `WORDCAST_DATA_PATH` environment variable
/// 3. `~/.wordcast`
/// 4. Current working directory
///
/// The first directory holding all three corpus files wins.
pub fn load_handle(
    data_path: Option<&str>,
    options: PredictorOptions,
) -> Result<PredictorHandle, String> {
    load_from_paths(&build_search_paths(data_path), options)
}

/// Load from the first of `search_paths` holding all three corpus files.
fn load_from_paths(
    search_paths: &[PathBuf],
    options: PredictorOptions,
) -> Result<PredictorHandle, String> {
    for dir in search_paths {
        let files = CorpusFiles::in_dir(dir);
        if files.exist() {
            tracing::debug!(dir = %dir.display(), "using corpus directory");
            return PredictorHandle::open(&files, options)
                .map_err(|e| format!("failed to load {}: {e}", dir.display()));
        }
    }

    Err(format!(
        "could not find {}, {} and {} in any of the search paths:\n{}",
        CorpusFiles::UNIGRAMS,
        CorpusFiles::BIGRAMS,
        CorpusFiles::TRIGRAMS,
        search_paths
            .iter()
            .map(|p| format!("  - {}", p.display()))
            .collect::<Vec<_>>()
            .join("\n")
    ))
}

/// Build the list of directories to search for corpus files.
fn build_search_paths(data_path: Option<&str>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(p) = data_path {
        paths.push(PathBuf::from(p));
    }

    if let Ok(env_path) = std::env::var(DATA_PATH_ENV) {
        paths.push(PathBuf::from(env_path));
    }

    if let Some(home) = home_dir() {
        paths.push(home.join(HOME_SUBDIR));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd);
    }

    paths
}

/// Get the user's home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Parse a `--data-path=PATH` or `-d PATH` argument from command line args.
///
/// Returns `(data_path, remaining_args)`.
pub fn parse_data_path(args: &[String]) -> (Option<String>, Vec<String>) {
    let mut data_path = None;
    let mut remaining = Vec::new();
    let mut skip_next = false;

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        if let Some(val) = arg.strip_prefix("--data-path=") {
            data_path = Some(val.to_string());
        } else if arg == "--data-path" || arg == "-d" {
            match args.get(i + 1) {
                Some(val) => {
                    data_path = Some(val.clone());
                    skip_next = true;
                }
                None => fatal(&format!("{arg} requires a value")),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    (data_path, remaining)
}

/// Remove `-v` / `--verbose` from the args.
///
/// Returns `(verbose, remaining_args)`.
pub fn parse_verbose(args: &[String]) -> (bool, Vec<String>) {
    let verbose = args.iter().any(|a| a == "-v" || a == "--verbose");
    let remaining = args
        .iter()
        .filter(|a| *a != "-v" && *a != "--verbose")
        .cloned()
        .collect();
    (verbose, remaining)
}

/// Install the stderr log subscriber.
///
/// The filter comes from `WORDCAST_LOG` (default `warn`); `verbose` forces
/// `debug`.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}
