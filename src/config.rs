//! Runtime configuration: where the task file lives and how much to log.
//!
//! The task file is resolved once at startup, in order of precedence:
//! the `--db` flag, the `TASK_CLI_DB` environment variable, then `tasks.json`
//! beside the running executable.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

/// File name used when no explicit task file is configured.
pub const DEFAULT_FILE_NAME: &str = "tasks.json";
/// Environment variable naming the task file.
pub const DB_ENV: &str = "TASK_CLI_DB";
/// Environment variable holding a tracing filter directive, e.g. `debug`.
pub const LOG_ENV: &str = "TASK_CLI_LOG";

/// Resolve the task file path from the CLI flag, the environment and the executable location.
pub fn resolve_store_path(cli_db: Option<PathBuf>) -> PathBuf {
    resolve_with(cli_db, std::env::var_os(DB_ENV), std::env::current_exe().ok())
}

fn resolve_with(cli_db: Option<PathBuf>, env_db: Option<OsString>, exe: Option<PathBuf>) -> PathBuf {
    if let Some(path) = cli_db {
        return path;
    }
    if let Some(path) = env_db.filter(|v| !v.is_empty()) {
        return PathBuf::from(path);
    }
    exe.as_deref()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new("."))
        .join(DEFAULT_FILE_NAME)
}

/// Install the stderr log subscriber. Defaults to `warn` so stdout stays clean.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
