use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Simple, file-backed task tracker CLI.
/// Storage defaults to tasks.json beside the executable, or a path passed via --db.
#[derive(Parser, Debug)]
#[command(
    name = "task-cli",
    version,
    about = "Track short tasks from the terminal",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Path to the JSON task file (overrides TASK_CLI_DB).
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
