//! Bordered grid rendering for `task-cli list`.

use ratatui::text::Span;

use crate::task::{format_timestamp, Task};

/// Column headers, in display order.
pub const HEADERS: [&str; 5] = ["ID", "Description", "Status", "Created At", "Updated At"];

/// Render tasks as a grid table:
///
/// ```text
/// +----+-------------+--------+-----------------------+------------+
/// | ID | Description | Status | Created At            | Updated At |
/// +====+=============+========+=======================+============+
/// |  1 | buy milk    | todo   | 07/03/2024 - 09:05:30 |            |
/// +----+-------------+--------+-----------------------+------------+
/// ```
pub fn render_grid<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> String {
    let rows: Vec<[String; 5]> = tasks.into_iter().map(task_cells).collect();

    let mut widths = HEADERS.map(display_width);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell_width(cell));
        }
    }

    let mut out = String::new();
    push_rule(&mut out, &widths, '-');
    push_row(&mut out, &widths, &HEADERS);
    push_rule(&mut out, &widths, '=');
    for row in &rows {
        push_row(&mut out, &widths, row);
        push_rule(&mut out, &widths, '-');
    }
    // Drop the final newline so callers can println! the result.
    out.pop();
    out
}

fn task_cells(t: &Task) -> [String; 5] {
    [
        t.id.to_string(),
        t.description.clone(),
        t.status.to_string(),
        format_timestamp(&t.created_at),
        t.updated_at.as_ref().map(format_timestamp).unwrap_or_default(),
    ]
}

fn display_width(s: impl AsRef<str>) -> usize {
    Span::raw(s.as_ref()).width()
}

/// Width of the widest line in a multi-line cell.
fn cell_width(cell: &str) -> usize {
    cell.lines().map(display_width).max().unwrap_or(0)
}

fn push_rule(out: &mut String, widths: &[usize; 5], fill: char) {
    out.push('+');
    for &w in widths {
        out.extend(std::iter::repeat(fill).take(w + 2));
        out.push('+');
    }
    out.push('\n');
}

/// Emit one grid row. Cells containing newlines span several text lines, with
/// shorter cells padded out by blanks.
fn push_row(out: &mut String, widths: &[usize; 5], cells: &[impl AsRef<str>; 5]) {
    let lines: Vec<Vec<&str>> = cells.iter().map(|c| c.as_ref().lines().collect()).collect();
    let height = lines.iter().map(Vec::len).max().unwrap_or(0).max(1);

    for line in 0..height {
        out.push('|');
        for (col, (cell_lines, &w)) in lines.iter().zip(widths).enumerate() {
            let cell = cell_lines.get(line).copied().unwrap_or("");
            let pad = " ".repeat(w - display_width(cell));
            // The id column is numeric and right-aligned.
            if col == 0 {
                out.push_str(&format!(" {pad}{cell} |"));
            } else {
                out.push_str(&format!(" {cell}{pad} |"));
            }
        }
        out.push('\n');
    }
}
