// Column-aligned table writer
use crate::iostreams::ColorScheme;
use crossterm::style::Color;
use std::io::{self, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Gap between columns on a terminal
const COLUMN_SEPARATOR: &str = "  ";

/// How the table should be laid out
///
/// Terminals get padded, truncated, colored columns. Everything else gets
/// tab-separated plain text that's friendly to `cut` and `awk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub is_tty: bool,
    /// Max display columns per line. 0 disables truncation.
    pub max_width: usize,
}

impl TableLayout {
    pub fn plain() -> Self {
        Self {
            is_tty: false,
            max_width: 0,
        }
    }

    pub fn terminal(max_width: usize) -> Self {
        Self {
            is_tty: true,
            max_width,
        }
    }
}

#[derive(Debug, Clone)]
struct Field {
    text: String,
    color: Option<Color>,
}

/// Collects rows of fields and writes them out aligned in one go
///
/// Rows don't need the same number of fields.
pub struct TablePrinter {
    layout: TableLayout,
    colors: ColorScheme,
    rows: Vec<Vec<Field>>,
    current: Vec<Field>,
}

impl TablePrinter {
    pub fn new(layout: TableLayout, colors: ColorScheme) -> Self {
        Self {
            layout,
            colors,
            rows: Vec::new(),
            current: Vec::new(),
        }
    }

    pub fn add_field(&mut self, text: impl Into<String>, color: Option<Color>) {
        self.current.push(Field {
            text: text.into(),
            color,
        });
    }

    pub fn end_row(&mut self) {
        self.rows.push(std::mem::take(&mut self.current));
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Write every finished row. A half-built row is closed first.
    pub fn render(&mut self, out: &mut dyn Write) -> io::Result<()> {
        if !self.current.is_empty() {
            self.end_row();
        }

        if self.layout.is_tty {
            self.render_terminal(out)
        } else {
            self.render_plain(out)
        }
    }

    fn render_plain(&self, out: &mut dyn Write) -> io::Result<()> {
        for row in &self.rows {
            let line: Vec<&str> = row.iter().map(|f| f.text.as_str()).collect();
            writeln!(out, "{}", line.join("\t"))?;
        }
        Ok(())
    }

    fn render_terminal(&self, out: &mut dyn Write) -> io::Result<()> {
        let widths = self.column_widths();
        let max_width = self.layout.max_width;

        for row in &self.rows {
            let mut line = String::new();
            let mut used = 0;

            for (i, field) in row.iter().enumerate() {
                let last = i + 1 == row.len();
                let mut text = if last {
                    field.text.clone()
                } else {
                    pad_to_width(&field.text, widths[i])
                };

                if i > 0 {
                    if max_width > 0 && used + COLUMN_SEPARATOR.len() >= max_width {
                        break;
                    }
                    line.push_str(COLUMN_SEPARATOR);
                    used += COLUMN_SEPARATOR.len();
                }

                if max_width > 0 {
                    let available = max_width.saturating_sub(used);
                    if available == 0 {
                        break;
                    }
                    text = truncate_to_width(&text, available);
                }

                used += text.width();
                line.push_str(&self.paint(&text, field.color));
            }

            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    fn paint(&self, text: &str, color: Option<Color>) -> String {
        match color {
            Some(color) if !text.is_empty() => self.colors.paint(text, color),
            _ => text.to_string(),
        }
    }

    fn column_widths(&self) -> Vec<usize> {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0; columns];

        for row in &self.rows {
            for (i, field) in row.iter().enumerate() {
                widths[i] = widths[i].max(field.text.width());
            }
        }
        widths
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let current = s.width();
    if current >= width {
        return s.to_string();
    }
    format!("{}{}", s, " ".repeat(width - current))
}

/// Cut `s` down to `max_width` terminal columns, ending in `…` when shortened
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    // Reserve 1 column for the ellipsis
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }

    result.push('…');
    result
}
