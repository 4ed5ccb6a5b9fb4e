//! Bordered text tables.
//!
//! ```text
//! +-----------+------+
//! | Title     | Year |
//! +-----------+------+
//! | Inception | 2010 |
//! +-----------+------+
//! ```

use owo_colors::Stream::Stdout;
use owo_colors::{OwoColorize, Style};
use unicode_width::UnicodeWidthStr;

/// Color applied to a single cell's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum CellColor {
    #[default]
    Plain,
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Clone)]
pub(crate) struct Cell {
    text: String,
    color: CellColor,
}

impl Cell {
    pub(crate) fn colored(text: impl Into<String>, color: CellColor) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self::colored(text, CellColor::Plain)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::colored(text, CellColor::Plain)
    }
}

/// A left-aligned table with a header row.
#[derive(Debug, Clone)]
pub(crate) struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub(crate) fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Missing cells render empty; extra cells are dropped.
    pub(crate) fn add_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.text.width());
            }
        }
        widths
    }

    pub(crate) fn render(&self) -> String {
        let widths = self.column_widths();

        let mut border = String::from("+");
        for w in &widths {
            border.push_str(&"-".repeat(w + 2));
            border.push('+');
        }
        let border = border.if_supports_color(Stdout, |t| t.green()).to_string();
        let bar = "|".if_supports_color(Stdout, |t| t.green()).to_string();

        let header_style = Style::new().cyan().bold();
        let header_cells: Vec<String> = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| {
                let styled = h.if_supports_color(Stdout, |t| t.style(header_style));
                format!("{}{}", styled, pad(h, *w))
            })
            .collect();

        let mut lines = vec![border.clone(), join_cells(&bar, &header_cells), border.clone()];
        for row in &self.rows {
            let cells: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, w)| match row.get(i) {
                    Some(cell) => format!("{}{}", paint(cell), pad(&cell.text, *w)),
                    None => " ".repeat(*w),
                })
                .collect();
            lines.push(join_cells(&bar, &cells));
        }
        lines.push(border);
        lines.join("\n")
    }
}

/// Spaces needed to bring `text` up to `width` columns.
fn pad(text: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(text.width()))
}

fn paint(cell: &Cell) -> String {
    let text = cell.text.as_str();
    match cell.color {
        CellColor::Plain => text.to_string(),
        CellColor::Green => text.if_supports_color(Stdout, |t| t.bright_green()).to_string(),
        CellColor::Yellow => text.if_supports_color(Stdout, |t| t.bright_yellow()).to_string(),
        CellColor::Red => text.if_supports_color(Stdout, |t| t.bright_red()).to_string(),
    }
}

fn join_cells(bar: &str, cells: &[String]) -> String {
    let mut line = bar.to_string();
    for cell in cells {
        line.push(' ');
        line.push_str(cell);
        line.push(' ');
        line.push_str(bar);
    }
    line
}
