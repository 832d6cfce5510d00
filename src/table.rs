//! Table Module — tabular data rendered by `Gui::table`.
//!
//! A `Table` is plain data: headers, rows of cells with alignment and a
//! marker that picks the cell's style, and the border glyphs to draw with.

use crate::text_utils::display_len;
use crate::types::{Align, Style};

/// Colour marker for a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Marker {
    #[default]
    None,
    Negative,
    Positive,
    Muted,
}

impl Marker {
    pub fn style(self) -> Style {
        match self {
            Marker::None => Style::None,
            Marker::Negative => Style::Negative,
            Marker::Positive => Style::Positive,
            Marker::Muted => Style::Muted,
        }
    }

    /// Negative for values below zero, positive above, none at zero.
    pub fn from_sign(value: f64) -> Self {
        if value < 0.0 {
            Marker::Negative
        } else if value > 0.0 {
            Marker::Positive
        } else {
            Marker::None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableCell {
    pub text: String,
    pub align: Align,
    pub marker: Marker,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

impl TableRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&mut self, text: impl Into<String>, align: Align, marker: Marker) -> &mut Self {
        self.cells.push(TableCell {
            text: text.into(),
            align,
            marker,
        });
        self
    }

    /// Left-aligned, unmarked text.
    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.cell(text, Align::Left, Marker::None)
    }

    /// Right-aligned float with two decimals.
    pub fn number(&mut self, value: f64, marker: Marker) -> &mut Self {
        self.cell(format!("{value:.2}"), Align::Right, marker)
    }

    pub fn int(&mut self, value: i64, marker: Marker) -> &mut Self {
        self.cell(value.to_string(), Align::Right, marker)
    }

    /// A centred block glyph, positive when set and negative otherwise.
    pub fn flag(&mut self, on: bool) -> &mut Self {
        let marker = if on { Marker::Positive } else { Marker::Negative };
        self.cell("■", Align::Center, marker)
    }
}

/// Glyphs used for the table's frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableBorder {
    pub vertical: &'static str,
    pub horizontal: &'static str,
    pub left: &'static str,
    pub cross: &'static str,
    pub right: &'static str,
}

impl TableBorder {
    pub const SINGLE: TableBorder = TableBorder {
        vertical: "│",
        horizontal: "─",
        left: "├",
        cross: "┼",
        right: "┤",
    };

    pub const ASCII: TableBorder = TableBorder {
        vertical: "|",
        horizontal: "-",
        left: "|",
        cross: "+",
        right: "|",
    };
}

impl Default for TableBorder {
    fn default() -> Self {
        Self::SINGLE
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
    pub padding: usize,
    pub border: TableBorder,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            rows: Vec::new(),
            padding: 1,
            border: TableBorder::default(),
        }
    }
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_border(mut self, border: TableBorder) -> Self {
        self.border = border;
        self
    }

    /// Append an empty row and return it for filling.
    pub fn add_row(&mut self) -> &mut TableRow {
        self.rows.push(TableRow::new());
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    /// Number of columns: the header count or the longest row, whichever is larger.
    pub fn columns(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.cells.len())
            .max()
            .unwrap_or(0)
            .max(self.headers.len())
    }

    /// Display width of each column's widest entry, headers included.
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths = vec![0; self.columns()];
        for (i, header) in self.headers.iter().enumerate() {
            widths[i] = display_len(header);
        }
        for row in &self.rows {
            for (i, cell) in row.cells.iter().enumerate() {
                widths[i] = widths[i].max(display_len(&cell.text));
            }
        }
        widths
    }
}
