//! Command implementations for the CLI interface.
//!
//! `dispatch` maps one parsed command onto exactly one `Store` operation and
//! turns the result into text for the user. Operand problems are caught here
//! as `UsageError`s before the store is touched; store failures come back as
//! `Outcome::Failure` with a generic message.

use std::num::IntErrorKind;

use clap::Subcommand;
use clap_complete::{generate, Shell};
use thiserror::Error;
use tracing::{debug, warn};

use crate::fields::Status;
use crate::store::{self, Store, StoreError};
use crate::table::render_grid;
use crate::task::TaskId;
use crate::tui::run::run_board;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Add a new task.
    Add {
        /// Task description. Words are joined with single spaces.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },

    /// Replace the description of a task.
    Update {
        /// Task ID.
        #[arg(allow_negative_numbers = true)]
        id: Option<String>,
        /// New description. Words are joined with single spaces.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },

    /// Delete a task. Later tasks move up one id.
    Delete {
        /// Task ID.
        #[arg(allow_negative_numbers = true)]
        id: Option<String>,
    },

    /// List tasks, optionally only those with one status.
    List {
        /// Status filter: todo | in-progress | done.
        status: Option<String>,
    },

    /// Mark a task in progress.
    MarkInProgress {
        /// Task ID.
        #[arg(allow_negative_numbers = true)]
        id: Option<String>,
    },

    /// Mark a task done.
    MarkDone {
        /// Task ID.
        #[arg(allow_negative_numbers = true)]
        id: Option<String>,
    },

    /// Mark a task todo again.
    MarkTodo {
        /// Task ID.
        #[arg(allow_negative_numbers = true)]
        id: Option<String>,
    },

    /// Show the available commands.
    Help,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Launch the interactive task board.
    Ui,

    #[command(external_subcommand)]
    External(Vec<String>),
}

/// Operand problems found before any store call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("Please enter a command. Use 'task-cli help' to see the available commands.")]
    NoCommand,

    #[error("Unknown command '{0}'. Use 'task-cli help' to see the available commands.")]
    UnknownCommand(String),

    #[error("Please enter the task description!")]
    MissingDescription,

    #[error("Please enter the task id!")]
    MissingId,

    #[error("Task id must be an integer, got '{0}'.")]
    InvalidId(String),

    #[error("Unknown status '{0}'. Use one of: todo, in-progress, done.")]
    InvalidStatus(String),
}

/// Result of a command that got past operand validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text for stdout.
    Success(String),
    /// Generic failure text for stderr.
    Failure(String),
}

pub const USAGE: &str = "\
task-cli - track short tasks from the terminal

Usage: task-cli [--db <path>] <command> [operands...]

Commands:
  add <text...>            Add a new task
  update <id> <text...>    Replace the description of a task
  delete <id>              Delete a task (later ids shift down by one)
  list [status]            List tasks, optionally only todo | in-progress | done
  mark-in-progress <id>    Mark a task in progress
  mark-done <id>           Mark a task done
  mark-todo <id>           Mark a task todo
  ui                       Open the interactive task board
  completions <shell>      Print a shell completion script
  help                     Show this message";

/// Run one command against the store.
pub fn dispatch(store: &mut Store, command: Option<Commands>) -> Result<Outcome, UsageError> {
    let Some(command) = command else {
        return Err(UsageError::NoCommand);
    };

    match command {
        Commands::Add { words } => cmd_add(store, words),
        Commands::Update { id, words } => cmd_update(store, id, words),
        Commands::Delete { id } => cmd_delete(store, id),
        Commands::List { status } => cmd_list(store, status),
        Commands::MarkInProgress { id } => cmd_mark(store, id, Status::InProgress),
        Commands::MarkDone { id } => cmd_mark(store, id, Status::Done),
        Commands::MarkTodo { id } => cmd_mark(store, id, Status::Todo),
        Commands::Help => Ok(Outcome::Success(USAGE.to_string())),
        Commands::Completions { shell } => Ok(Outcome::Success(completions_script(shell))),
        Commands::Ui => Ok(cmd_ui(store)),
        Commands::External(args) => {
            let name = args.into_iter().next().unwrap_or_default();
            Err(UsageError::UnknownCommand(name))
        }
    }
}

/// Add a new task from the joined words.
pub fn cmd_add(store: &mut Store, words: Vec<String>) -> Result<Outcome, UsageError> {
    let description = join_description(words)?;
    Ok(report(
        store.add(description),
        |id| format!("Task added successfully (ID: {id})"),
        "Task was not added!",
    ))
}

/// Replace a task's description.
pub fn cmd_update(store: &mut Store, id: Option<String>, words: Vec<String>) -> Result<Outcome, UsageError> {
    let id = parse_id(id)?;
    let description = join_description(words)?;
    Ok(report(
        id.and_then(|id| store.update_description(id, description)),
        |_| "Task updated successfully!".to_string(),
        "Task was not updated!",
    ))
}

/// Delete a task and renumber the rest.
pub fn cmd_delete(store: &mut Store, id: Option<String>) -> Result<Outcome, UsageError> {
    let id = parse_id(id)?;
    Ok(report(
        id.and_then(|id| store.delete(id)),
        |_| "Task deleted successfully!".to_string(),
        "Task was not deleted!",
    ))
}

/// Render the task table, optionally filtered by status.
pub fn cmd_list(store: &Store, status: Option<String>) -> Result<Outcome, UsageError> {
    let filter = status
        .map(|s| s.parse::<Status>().map_err(|_| UsageError::InvalidStatus(s)))
        .transpose()?;
    Ok(Outcome::Success(render_grid(store.list(filter))))
}

/// Set a task's status.
pub fn cmd_mark(store: &mut Store, id: Option<String>, status: Status) -> Result<Outcome, UsageError> {
    let id = parse_id(id)?;
    Ok(report(
        id.and_then(|id| store.update_status(id, status)),
        |_| "Status updated successfully!".to_string(),
        "Status was not updated!",
    ))
}

/// Launch the interactive board over the same store.
pub fn cmd_ui(store: &mut Store) -> Outcome {
    match run_board(store) {
        Ok(()) => Outcome::Success(String::new()),
        Err(e) => Outcome::Failure(format!("UI error: {e}")),
    }
}

/// Generate a shell completion script for `task-cli`.
pub fn completions_script(shell: Shell) -> String {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    let mut buf = Vec::new();
    generate(shell, &mut app, app_name, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

fn join_description(words: Vec<String>) -> Result<String, UsageError> {
    let description = words.join(" ");
    if description.trim().is_empty() {
        return Err(UsageError::MissingDescription);
    }
    Ok(description)
}

/// Only non-integers are usage errors. An integer of any size gets through as
/// an id lookup, which fails for anything outside `1..=len`.
fn parse_id(raw: Option<String>) -> Result<store::Result<TaskId>, UsageError> {
    let raw = raw.ok_or(UsageError::MissingId)?;
    let text = raw.trim();
    match text.parse::<i64>() {
        Ok(id) => Ok(positional(id)),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Ok(Err(StoreError::NotFound(text.to_string())))
        }
        Err(_) => Err(UsageError::InvalidId(raw)),
    }
}

/// Negative ids are valid integers but never name a task.
fn positional(id: i64) -> store::Result<TaskId> {
    TaskId::try_from(id).map_err(|_| StoreError::NotFound(id.to_string()))
}

fn report<T>(result: store::Result<T>, success: impl FnOnce(T) -> String, failure: &str) -> Outcome {
    match result {
        Ok(value) => Outcome::Success(success(value)),
        Err(StoreError::NotFound(id)) => {
            debug!(%id, "no task with this id");
            Outcome::Failure(failure.to_string())
        }
        Err(e) => {
            warn!(error = %e, "store operation failed");
            Outcome::Failure(failure.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    use crate::cli::Cli;

    fn create_test_store() -> (Store, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::load(temp_dir.path().join("tasks.json")).unwrap();
        (store, temp_dir)
    }

    fn run(store: &mut Store, argv: &[&str]) -> Result<Outcome, UsageError> {
        let cli = Cli::try_parse_from(std::iter::once("task-cli").chain(argv.iter().copied())).unwrap();
        dispatch(store, cli.command)
    }

    #[test]
    fn add_joins_words_with_single_spaces() {
        let (mut store, _temp) = create_test_store();

        let outcome = run(&mut store, &["add", "buy", "oat", "milk"]).unwrap();

        assert_eq!(outcome, Outcome::Success("Task added successfully (ID: 1)".into()));
        assert_eq!(store.get(1).unwrap().description, "buy oat milk");
    }

    #[test]
    fn add_accepts_words_that_look_like_flags() {
        let (mut store, _temp) = create_test_store();

        run(&mut store, &["add", "set", "-5", "degrees"]).unwrap();

        assert_eq!(store.get(1).unwrap().description, "set -5 degrees");
    }

    #[test]
    fn add_without_description_is_a_usage_error() {
        let (mut store, _temp) = create_test_store();

        assert_eq!(run(&mut store, &["add"]), Err(UsageError::MissingDescription));
        assert!(store.is_empty());
    }

    #[test]
    fn id_operands_are_validated_before_the_store() {
        let (mut store, _temp) = create_test_store();
        store.add("x").unwrap();

        assert_eq!(run(&mut store, &["delete"]), Err(UsageError::MissingId));
        assert_eq!(run(&mut store, &["mark-done", "one"]), Err(UsageError::InvalidId("one".into())));
        assert_eq!(run(&mut store, &["update", "1"]), Err(UsageError::MissingDescription));
        assert_eq!(store.get(1).unwrap().status, Status::Todo);
    }

    #[test]
    fn out_of_range_ids_report_generic_failures() {
        let (mut store, _temp) = create_test_store();
        store.add("x").unwrap();

        assert_eq!(run(&mut store, &["delete", "0"]), Ok(Outcome::Failure("Task was not deleted!".into())));
        assert_eq!(run(&mut store, &["delete", "-1"]), Ok(Outcome::Failure("Task was not deleted!".into())));
        assert_eq!(
            run(&mut store, &["update", "7", "nope"]),
            Ok(Outcome::Failure("Task was not updated!".into()))
        );
        assert_eq!(run(&mut store, &["mark-done", "2"]), Ok(Outcome::Failure("Status was not updated!".into())));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn ids_beyond_i64_report_generic_failures() {
        let (mut store, _temp) = create_test_store();
        store.add("x").unwrap();

        assert_eq!(
            run(&mut store, &["delete", "99999999999999999999"]),
            Ok(Outcome::Failure("Task was not deleted!".into()))
        );
        assert_eq!(
            run(&mut store, &["mark-done", "-99999999999999999999"]),
            Ok(Outcome::Failure("Status was not updated!".into()))
        );
        assert_eq!(
            run(&mut store, &["update", "18446744073709551617", "nope"]),
            Ok(Outcome::Failure("Task was not updated!".into()))
        );
        assert_eq!(run(&mut store, &["delete", "12x"]), Err(UsageError::InvalidId("12x".into())));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().status, Status::Todo);
    }

    #[test]
    fn mark_commands_set_fixed_statuses() {
        let (mut store, _temp) = create_test_store();
        store.add("x").unwrap();

        for (cmd, expected) in [
            ("mark-in-progress", Status::InProgress),
            ("mark-done", Status::Done),
            ("mark-todo", Status::Todo),
        ] {
            let outcome = run(&mut store, &[cmd, "1"]).unwrap();
            assert_eq!(outcome, Outcome::Success("Status updated successfully!".into()));
            assert_eq!(store.get(1).unwrap().status, expected);
        }
    }

    #[test]
    fn scenario_from_empty_store() {
        let (mut store, _temp) = create_test_store();

        run(&mut store, &["add", "buy milk"]).unwrap();
        assert!(store.get(1).unwrap().updated_at.is_none());

        run(&mut store, &["mark-done", "1"]).unwrap();
        assert_eq!(store.get(1).unwrap().status, Status::Done);
        assert!(store.get(1).unwrap().updated_at.is_some());

        run(&mut store, &["add", "walk dog"]).unwrap();
        assert_eq!(store.len(), 2);

        assert_eq!(run(&mut store, &["delete", "1"]), Ok(Outcome::Success("Task deleted successfully!".into())));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().description, "walk dog");

        run(&mut store, &["update", "1", "walk the dog twice"]).unwrap();
        let t = store.get(1).unwrap();
        assert_eq!(t.id, 1);
        assert_eq!(t.description, "walk the dog twice");
    }

    #[test]
    fn list_filters_and_rejects_unknown_statuses() {
        let (mut store, _temp) = create_test_store();
        store.add("first").unwrap();
        store.add("second").unwrap();
        store.update_status(2, Status::Done).unwrap();

        let Ok(Outcome::Success(table)) = run(&mut store, &["list", "done"]) else {
            panic!("list should succeed");
        };
        assert!(table.contains("second"));
        assert!(!table.contains("first"));

        assert_eq!(run(&mut store, &["list", "later"]), Err(UsageError::InvalidStatus("later".into())));
    }

    #[test]
    fn missing_and_unknown_commands() {
        let (mut store, _temp) = create_test_store();

        assert_eq!(run(&mut store, &[]), Err(UsageError::NoCommand));
        assert_eq!(run(&mut store, &["frobnicate", "1"]), Err(UsageError::UnknownCommand("frobnicate".into())));
    }

    #[test]
    fn help_lists_every_command() {
        let (mut store, _temp) = create_test_store();

        let Ok(Outcome::Success(text)) = run(&mut store, &["help"]) else {
            panic!("help should succeed");
        };
        for cmd in ["add", "update", "delete", "list", "mark-in-progress", "mark-done", "mark-todo"] {
            assert!(text.contains(cmd), "help is missing {cmd}");
        }
    }

    #[test]
    fn completions_mention_subcommands() {
        let script = completions_script(Shell::Bash);
        assert!(script.contains("mark-in-progress"));
    }

    #[test]
    fn completions_dispatch_prints_script_without_touching_tasks() {
        let (mut store, _temp) = create_test_store();

        let Ok(Outcome::Success(script)) = run(&mut store, &["completions", "zsh"]) else {
            panic!("completions should succeed");
        };

        assert!(script.contains("task-cli"));
        assert!(store.is_empty());
    }
}
