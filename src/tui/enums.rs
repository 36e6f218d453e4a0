//! Enumerations for TUI state management.

use crate::fields::Status;
use crate::task::TaskId;

/// What the board is currently doing with key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving around the table and changing statuses.
    Browse,
    /// Typing the description of a new task.
    Adding,
    /// Typing a replacement description for the given task.
    Editing(TaskId),
    /// Waiting for `y`/`n` before deleting the given task.
    ConfirmDelete(TaskId),
}

/// Status filter applied to the board, cycled with `f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Only(Status),
}

impl Filter {
    /// All → todo → in-progress → done → All.
    pub fn next(self) -> Self {
        match self {
            Filter::All => Filter::Only(Status::Todo),
            Filter::Only(Status::Todo) => Filter::Only(Status::InProgress),
            Filter::Only(Status::InProgress) => Filter::Only(Status::Done),
            Filter::Only(Status::Done) => Filter::All,
        }
    }

    pub fn status(self) -> Option<Status> {
        match self {
            Filter::All => None,
            Filter::Only(s) => Some(s),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Only(s) => s.as_str(),
        }
    }
}
