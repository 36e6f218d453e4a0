//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Status;

/// Used for tasks in progress and for the status bar.
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Used for the delete confirmation prompt.
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// Header row background.
pub const DARK_GREEN: Color = Color::Rgb(0, 80, 0);

/// Foreground color for a task row.
pub fn status_color(status: Status) -> Color {
    match status {
        Status::Todo => Color::White,
        Status::InProgress => GOLD,
        Status::Done => Color::DarkGray,
    }
}
