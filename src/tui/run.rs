//! Task board entry point and terminal setup.

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};

use crate::store::Store;
use crate::tui::app::Board;

/// Puts the terminal in raw mode on the alternate screen and undoes both when
/// dropped, so every exit path out of `run_board` restores the shell.
struct RawTerminal;

impl RawTerminal {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = RawTerminal;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        // Errors here have nowhere to go.
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Initialise the terminal, run the board until the user quits, then restore the terminal.
pub fn run_board(store: &mut Store) -> io::Result<()> {
    let _raw = RawTerminal::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut board = Board::new(store);
    let result = board.run(&mut terminal);

    terminal.show_cursor()?;
    result
}
