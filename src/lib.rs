//! # task-cli
//!
//! A personal task tracker for the terminal. Tasks live in a single JSON file
//! and are addressed by their position: ids always run `1..=N`, and deleting a
//! task moves every later task up by one.
//!
//! ## Quick Start
//!
//! ```bash
//! task-cli add Buy groceries
//! task-cli mark-in-progress 1
//! task-cli list in-progress
//! task-cli update 1 Buy groceries and cook dinner
//! task-cli delete 1
//! ```
//!
//! ## Layout
//!
//! - [`store`] owns the task list and its file, including id renumbering.
//! - [`cmd`] is the dispatcher: one command in, one store call, one message out.
//! - [`table`] renders the grid printed by `list`.
//! - [`tui`] is the interactive board behind `task-cli ui`.
//! - [`config`] resolves the task file path and installs logging.

pub mod cli;
pub mod cmd;
pub mod config;
pub mod fields;
pub mod store;
pub mod table;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
}
