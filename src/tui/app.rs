//! Interactive task board.
//!
//! The board is a thin view over a borrowed `Store`: every key that changes
//! something calls the same store operation the CLI would, then re-reads the
//! visible rows. Ids shown are therefore always the ids `task-cli` accepts.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};

use crate::fields::Status;
use crate::store::Store;
use crate::table::HEADERS;
use crate::task::{format_timestamp, TaskId};
use crate::tui::colors::{status_color, DARK_GREEN, DARK_RED, GOLD};
use crate::tui::enums::{Filter, Mode};
use crate::tui::input::InputField;

const HELP_LINE: &str = "j/k move  a add  e edit  t/p/d todo/in-progress/done  x delete  f filter  q quit";

/// State for the interactive board.
pub struct Board<'a> {
    store: &'a mut Store,
    filter: Filter,
    visible: Vec<TaskId>,
    table_state: TableState,
    mode: Mode,
    input: InputField,
    status_message: String,
}

impl<'a> Board<'a> {
    pub fn new(store: &'a mut Store) -> Self {
        let mut board = Board {
            store,
            filter: Filter::All,
            visible: Vec::new(),
            table_state: TableState::default(),
            mode: Mode::Browse,
            input: InputField::new(),
            status_message: String::new(),
        };
        board.refresh();
        board
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Id of the highlighted row, if any.
    pub fn selected_id(&self) -> Option<TaskId> {
        self.table_state
            .selected()
            .and_then(|i| self.visible.get(i).copied())
    }

    /// Re-read visible rows from the store and keep the selection in range.
    fn refresh(&mut self) {
        self.visible = self.store.list(self.filter.status()).map(|t| t.id).collect();
        let selected = match (self.visible.len(), self.table_state.selected()) {
            (0, _) => None,
            (n, Some(i)) => Some(i.min(n - 1)),
            (_, None) => Some(0),
        };
        self.table_state.select(selected);
    }

    fn select_next(&mut self) {
        if let Some(i) = self.table_state.selected() {
            if i + 1 < self.visible.len() {
                self.table_state.select(Some(i + 1));
            }
        }
    }

    fn select_previous(&mut self) {
        if let Some(i) = self.table_state.selected() {
            self.table_state.select(Some(i.saturating_sub(1)));
        }
    }

    fn set_status(&mut self, status: Status) {
        let Some(id) = self.selected_id() else { return };
        self.status_message = match self.store.update_status(id, status) {
            Ok(()) => format!("Task {id} marked {status}"),
            Err(e) => format!("Status was not updated: {e}"),
        };
        self.refresh();
    }

    fn submit_input(&mut self) {
        let text = self.input.value.trim().to_string();
        if text.is_empty() {
            self.status_message = "Description cannot be empty".into();
            return;
        }
        self.status_message = match self.mode {
            Mode::Adding => match self.store.add(text) {
                Ok(id) => format!("Task added successfully (ID: {id})"),
                Err(e) => format!("Task was not added: {e}"),
            },
            Mode::Editing(id) => match self.store.update_description(id, text) {
                Ok(()) => format!("Task {id} updated"),
                Err(e) => format!("Task was not updated: {e}"),
            },
            Mode::Browse | Mode::ConfirmDelete(_) => return,
        };
        self.mode = Mode::Browse;
        self.refresh();
    }

    fn confirm_delete(&mut self, id: TaskId) {
        self.status_message = match self.store.delete(id) {
            Ok(()) => format!("Task {id} deleted; later ids moved up"),
            Err(e) => format!("Task was not deleted: {e}"),
        };
        self.mode = Mode::Browse;
        self.refresh();
    }

    /// Handle one key press. Returns true if the board should close.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.mode {
            Mode::Browse => return self.handle_browse_key(key),
            Mode::Adding | Mode::Editing(_) => match key {
                KeyCode::Enter => self.submit_input(),
                KeyCode::Esc => {
                    self.mode = Mode::Browse;
                    self.status_message = "Cancelled".into();
                }
                KeyCode::Char(c) => self.input.handle_char(c),
                KeyCode::Backspace => self.input.handle_backspace(),
                KeyCode::Delete => self.input.handle_delete(),
                KeyCode::Left => self.input.move_cursor_left(),
                KeyCode::Right => self.input.move_cursor_right(),
                _ => {}
            },
            Mode::ConfirmDelete(id) => match key {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.confirm_delete(id),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.mode = Mode::Browse;
                    self.status_message = "Delete cancelled".into();
                }
                _ => {}
            },
        }
        false
    }

    fn handle_browse_key(&mut self, key: KeyCode) -> bool {
        self.status_message.clear();
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_previous(),
            KeyCode::Char('t') => self.set_status(Status::Todo),
            KeyCode::Char('p') => self.set_status(Status::InProgress),
            KeyCode::Char('d') => self.set_status(Status::Done),
            KeyCode::Char('f') => {
                self.filter = self.filter.next();
                self.refresh();
            }
            KeyCode::Char('a') => {
                self.input = InputField::new();
                self.mode = Mode::Adding;
            }
            KeyCode::Char('e') => {
                if let Some(task) = self.selected_id().and_then(|id| self.store.get(id)) {
                    self.input = InputField::with_value(&task.description);
                    self.mode = Mode::Editing(task.id);
                }
            }
            KeyCode::Char('x') => {
                if let Some(id) = self.selected_id() {
                    self.mode = Mode::ConfirmDelete(id);
                }
            }
            _ => {}
        }
        false
    }

    /// Render the task table.
    fn render_table(&mut self, f: &mut Frame, area: Rect) {
        let header = Row::new(
            HEADERS
                .iter()
                .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD))),
        )
        .style(Style::default().bg(DARK_GREEN).fg(Color::White))
        .height(1);

        let rows: Vec<Row> = self
            .visible
            .iter()
            .filter_map(|&id| self.store.get(id))
            .map(|task| {
                let style = match task.status {
                    Status::InProgress => Style::default().fg(status_color(task.status)).add_modifier(Modifier::BOLD),
                    _ => Style::default().fg(status_color(task.status)),
                };
                Row::new(vec![
                    Cell::from(task.id.to_string()),
                    Cell::from(task.description.clone()),
                    Cell::from(task.status.as_str()),
                    Cell::from(format_timestamp(&task.created_at)),
                    Cell::from(task.updated_at.as_ref().map(format_timestamp).unwrap_or_else(|| "-".into())),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(4),  // ID
            Constraint::Min(20),    // Description
            Constraint::Length(12), // Status
            Constraint::Length(21), // Created At
            Constraint::Length(21), // Updated At
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Tasks ({}/{}) - filter: {}",
                self.visible.len(),
                self.store.len(),
                self.filter.label()
            )))
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    /// Render the bottom line: input prompt, confirmation, last message or key help.
    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let (prompt, style) = match self.mode {
            Mode::Adding => ("New task: ".to_string(), Style::default().bg(GOLD).fg(Color::Black)),
            Mode::Editing(id) => (format!("Edit task {id}: "), Style::default().bg(GOLD).fg(Color::Black)),
            Mode::ConfirmDelete(id) => (
                format!("Delete task {id}? Later ids move up. (y/n)"),
                Style::default().bg(DARK_RED).fg(Color::White),
            ),
            Mode::Browse => (String::new(), Style::default().bg(DARK_GREEN).fg(Color::White)),
        };

        let text = match self.mode {
            Mode::Adding | Mode::Editing(_) => format!("{prompt}{}", self.input.value),
            Mode::ConfirmDelete(_) => prompt.clone(),
            Mode::Browse if !self.status_message.is_empty() => self.status_message.clone(),
            Mode::Browse => HELP_LINE.to_string(),
        };

        f.render_widget(Paragraph::new(text).style(style), area);

        if matches!(self.mode, Mode::Adding | Mode::Editing(_)) {
            let x = area.x + (prompt.chars().count() + self.input.cursor) as u16;
            f.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
        }
    }

    /// Main render function.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        self.render_table(f, chunks[0]);
        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop. Runs until `q` or `Esc` in browse mode.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key.code) {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}
