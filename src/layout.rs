//! Layout Module — draw-command log and row/cell auto-layout.
//!
//! Responsibilities:
//! - Record positioned text runs against the cursor or at absolute coordinates
//! - Open and close rows, cells and groups; move the cursor between them
//! - Measure cells from their recorded commands once they close
//! - Provide hit-test geometry for the latched pointer event

use tracing::warn;

use crate::identity::Identity;
use crate::text_utils::display_len;
use crate::types::{DrawCommand, LayoutCell, Rect, Row, Style};

/// How the cursor moves after a cursor-relative write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Advance horizontally by the text's display width.
    Inline,
    /// Drop to the next line at the cell's left edge (horizontal advance while grouping).
    Block,
}

#[derive(Debug, Clone)]
pub struct Layout {
    commands: Vec<DrawCommand>,
    cells: Vec<LayoutCell>,
    rows: Vec<Row>,
    cursor_x: i32,
    cursor_y: i32,
    current_cell: Option<usize>,
    cell_open: bool,
    row_open: bool,
    grouping: bool,
    group_margin: i32,
    left_margin: i32,
    menu_bar: bool,
}

impl Layout {
    pub fn new(group_margin: i32, left_margin: i32) -> Self {
        Self {
            commands: Vec::new(),
            cells: Vec::new(),
            rows: Vec::new(),
            cursor_x: 0,
            cursor_y: 0,
            current_cell: None,
            cell_open: false,
            row_open: false,
            grouping: false,
            group_margin,
            left_margin,
            menu_bar: false,
        }
    }

    /// Drop all frame-scoped state.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.cells.clear();
        self.rows.clear();
        self.cursor_x = 0;
        self.cursor_y = 0;
        self.current_cell = None;
        self.cell_open = false;
        self.row_open = false;
        self.grouping = false;
        self.menu_bar = false;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn cells(&self) -> &[LayoutCell] {
        &self.cells
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn cursor(&self) -> (i32, i32) {
        (self.cursor_x, self.cursor_y)
    }

    pub fn is_grouping(&self) -> bool {
        self.grouping
    }

    pub fn is_cell_open(&self) -> bool {
        self.cell_open
    }

    pub fn is_row_open(&self) -> bool {
        self.row_open
    }

    fn cell_left(&self) -> i32 {
        self.current_cell
            .and_then(|idx| self.cells.get(idx))
            .map_or(self.left_margin, |cell| cell.x)
    }

    /// True when the current cell is open and nothing has been recorded in it yet.
    pub fn current_cell_is_empty(&self) -> bool {
        match self.current_cell {
            Some(idx) if self.cell_open => !self.commands.iter().any(|c| c.cell == Some(idx)),
            _ => false,
        }
    }

    pub(crate) fn set_current_title(&mut self, title: &str) {
        if let Some(cell) = self.current_cell.and_then(|idx| self.cells.get_mut(idx)) {
            cell.title = title.to_string();
        }
    }

    // ------------------------------------------------------------------------
    // Draw-command log
    // ------------------------------------------------------------------------

    /// Record `text` at the cursor inside the current cell.
    pub fn write(&mut self, identity: Identity, text: &str, style: Style, mode: WriteMode) {
        let Some(cell) = self.current_cell else {
            warn!(text, "write outside of any cell ignored");
            return;
        };
        let len = display_len(text) as i32;
        self.commands.push(DrawCommand {
            identity,
            text: text.to_string(),
            style,
            x: self.cursor_x,
            y: self.cursor_y,
            len,
            cell: Some(cell),
            active: false,
        });
        match mode {
            WriteMode::Inline => self.cursor_x += len,
            WriteMode::Block if self.grouping => self.cursor_x += len,
            WriteMode::Block => {
                self.cursor_x = self.cell_left();
                self.cursor_y += 1;
            }
        }
    }

    /// Record an always-on-top overlay at absolute coordinates. The cursor does not move.
    pub fn write_at(&mut self, identity: Identity, x: i32, y: i32, text: &str, style: Style) {
        self.commands.push(DrawCommand {
            identity,
            text: text.to_string(),
            style,
            x,
            y,
            len: display_len(text) as i32,
            cell: None,
            active: true,
        });
    }

    /// Cursor repositioning after a widget scope closes.
    pub(crate) fn after_pop(&mut self) {
        if self.grouping {
            self.cursor_x += self.group_margin;
            return;
        }
        let left = self.cell_left();
        if self.cursor_x != left {
            self.cursor_y += 1;
        }
        self.cursor_x = left;
    }

    // ------------------------------------------------------------------------
    // Rows, cells, groups
    // ------------------------------------------------------------------------

    pub fn start_row(&mut self) {
        self.rows.push(Row::default());
        self.row_open = true;
    }

    pub fn start_cell(&mut self, title: &str) {
        if self.rows.is_empty() {
            warn!("start_cell without start_row; opening a row");
            self.start_row();
        }
        let row_is_fresh = self.rows.last().map_or(true, |row| row.cells.is_empty());
        let (x, y) = match self.cells.last() {
            None => (self.left_margin, if self.menu_bar { 2 } else { 1 }),
            Some(_) if row_is_fresh => {
                let bottom = self.cells.iter().map(LayoutCell::bottom).max().unwrap_or(0);
                (self.left_margin, bottom + 2)
            }
            Some(prev) => (prev.right() + 2, prev.y),
        };

        self.cells.push(LayoutCell::at(x, y, title));
        let idx = self.cells.len() - 1;
        if let Some(row) = self.rows.last_mut() {
            row.cells.push(idx);
        }
        self.current_cell = Some(idx);
        self.cell_open = true;
        self.cursor_x = x;
        self.cursor_y = y;
    }

    /// Size the current cell from the commands recorded inside it.
    pub fn end_cell(&mut self) {
        let Some(idx) = self.current_cell.filter(|_| self.cell_open) else {
            warn!("end_cell without an open cell ignored");
            return;
        };
        self.cell_open = false;

        let cell = &self.cells[idx];
        let (x0, y0) = (cell.x, cell.y);
        let mut width = cell.width;
        let mut height = cell.height;
        for cmd in self.commands.iter().filter(|c| c.cell == Some(idx)) {
            width = width.max(cmd.x + cmd.len - x0 + 1);
            height = height.max(cmd.y - y0 + 1);
        }
        let title_len = display_len(&cell.title) as i32;
        if title_len > 0 {
            width = width.max(title_len + 1);
        }

        let cell = &mut self.cells[idx];
        cell.width = width;
        cell.height = height;
    }

    /// Give every cell in the current row the height of its tallest member.
    pub fn end_row(&mut self) {
        if !self.row_open {
            warn!("end_row without an open row ignored");
            return;
        }
        self.row_open = false;
        let Some(row) = self.rows.last() else {
            return;
        };
        let max_height = row
            .cells
            .iter()
            .filter_map(|&idx| self.cells.get(idx))
            .map(|cell| cell.height)
            .max()
            .unwrap_or(0);
        for &idx in &row.cells {
            if let Some(cell) = self.cells.get_mut(idx) {
                cell.height = max_height;
            }
        }
    }

    pub fn start_group(&mut self) {
        self.grouping = true;
    }

    pub fn end_group(&mut self) {
        if !self.grouping {
            return;
        }
        self.grouping = false;
        self.cursor_y += 1;
        self.cursor_x = self.cell_left();
    }

    /// Reserve the top line for a menu bar. Moves the first cell down when
    /// nothing has been written into it yet.
    pub fn enable_menu_bar(&mut self) {
        if self.menu_bar {
            return;
        }
        self.menu_bar = true;
        if self.cells.len() == 1 && self.current_cell_is_empty() {
            let cell = &mut self.cells[0];
            if cell.y < 2 {
                cell.y = 2;
                self.cursor_y = 2;
                self.cursor_x = cell.x;
            }
        }
    }

    // ------------------------------------------------------------------------
    // Hit testing
    // ------------------------------------------------------------------------

    /// Whether `(px, py)` touches the most recently recorded command.
    pub fn has_focus(&self, px: i32, py: i32) -> bool {
        self.commands
            .last()
            .is_some_and(|cmd| cmd.bounds().inside(px, py))
    }

    /// Whether `(px, py)` lies in a `w × h` rectangle anchored at the cursor.
    pub fn is_inside(&self, px: i32, py: i32, w: i32, h: i32) -> bool {
        Rect::new(self.cursor_x, self.cursor_y, w, h).inside(px, py)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        Layout::new(1, 1)
    }

    fn id() -> Identity {
        Identity::derive(Identity::EMPTY, "t")
    }

    #[test]
    fn test_cells_in_first_row_flow_right() {
        let mut l = layout();
        l.start_row();
        l.start_cell("");
        l.write(id(), "Test1", Style::None, WriteMode::Block);
        l.end_cell();
        l.start_cell("");
        l.write(id(), "Test2", Style::None, WriteMode::Block);
        l.write(id(), "Test3", Style::None, WriteMode::Block);
        l.end_cell();
        l.end_row();

        assert_eq!(l.cells().len(), 2);
        let (a, b) = (&l.cells()[0], &l.cells()[1]);
        assert_eq!((a.x, a.y, a.width, a.height), (1, 1, 6, 2));
        assert_eq!((b.x, b.y, b.width, b.height), (9, 1, 6, 2));
    }

    #[test]
    fn test_new_row_starts_below_previous() {
        let mut l = layout();
        l.start_row();
        l.start_cell("");
        l.write(id(), "a", Style::None, WriteMode::Block);
        l.write(id(), "b", Style::None, WriteMode::Block);
        l.end_cell();
        l.end_row();
        l.start_row();
        l.start_cell("");
        l.end_cell();
        l.start_cell("");
        l.end_row();

        let cells = l.cells();
        assert_eq!((cells[1].x, cells[1].y), (1, 1 + 2 + 2));
        // second cell of the new row flows right of the first one
        assert_eq!((cells[2].x, cells[2].y), (cells[1].right() + 2, cells[1].y));
    }

    #[test]
    fn test_end_cell_measures_relative_extent() {
        let mut l = layout();
        l.start_row();
        l.start_cell("");
        l.write(id(), "abc", Style::None, WriteMode::Inline);
        l.write(id(), "de", Style::None, WriteMode::Block);
        l.write(id(), "x", Style::None, WriteMode::Block);
        l.write(id(), "y", Style::None, WriteMode::Block);
        l.end_cell();
        let cell = &l.cells()[0];
        assert_eq!(cell.width, 6);
        assert_eq!(cell.height, 3);
    }

    #[test]
    fn test_title_contributes_to_width() {
        let mut l = layout();
        l.start_row();
        l.start_cell("Testing");
        l.write(id(), "Hi", Style::None, WriteMode::Block);
        l.end_cell();
        assert_eq!(l.cells()[0].width, 8);
    }

    #[test]
    fn test_end_row_propagates_max_height() {
        let mut l = layout();
        l.start_row();
        l.start_cell("");
        l.write(id(), "one", Style::None, WriteMode::Block);
        l.end_cell();
        l.start_cell("");
        for line in ["a", "b", "c", "d"] {
            l.write(id(), line, Style::None, WriteMode::Block);
        }
        l.end_cell();
        l.end_row();
        assert!(l.cells().iter().all(|c| c.height == 4));
    }

    #[test]
    fn test_unbalanced_end_calls_are_ignored() {
        let mut l = layout();
        l.end_cell();
        l.end_row();
        assert!(l.cells().is_empty());

        l.start_row();
        l.start_cell("");
        l.write(id(), "x", Style::None, WriteMode::Block);
        l.end_cell();
        let before = l.cells()[0].clone();
        l.end_cell();
        assert_eq!(l.cells()[0], before);
    }

    #[test]
    fn test_write_without_cell_is_dropped() {
        let mut l = layout();
        l.write(id(), "lost", Style::None, WriteMode::Block);
        assert!(l.commands().is_empty());
    }

    #[test]
    fn test_grouped_block_writes_stay_on_line() {
        let mut l = layout();
        l.start_row();
        l.start_cell("");
        l.start_group();
        l.write(id(), "ab", Style::None, WriteMode::Block);
        l.after_pop();
        assert_eq!(l.cursor(), (1 + 2 + 1, 1));
        l.end_group();
        assert_eq!(l.cursor(), (1, 2));
    }

    #[test]
    fn test_pop_after_inline_write_starts_new_line() {
        let mut l = layout();
        l.start_row();
        l.start_cell("");
        l.write(id(), "[x]", Style::None, WriteMode::Inline);
        l.after_pop();
        assert_eq!(l.cursor(), (1, 2));
        l.write(id(), "text", Style::None, WriteMode::Block);
        l.after_pop();
        assert_eq!(l.cursor(), (1, 3));
    }

    #[test]
    fn test_has_focus_uses_last_command_only() {
        let mut l = layout();
        l.start_row();
        l.start_cell("");
        l.write(id(), "first", Style::None, WriteMode::Block);
        l.write(id(), "second", Style::None, WriteMode::Block);
        assert!(!l.has_focus(1, 1));
        assert!(l.has_focus(1, 2));
        assert!(l.has_focus(7, 2));
        assert!(!l.has_focus(8, 2));
    }

    #[test]
    fn test_overlay_does_not_move_cursor() {
        let mut l = layout();
        l.start_row();
        l.start_cell("");
        l.write_at(id(), 10, 0, " File ", Style::Header);
        assert_eq!(l.cursor(), (1, 1));
        let cmd = l.commands().last().unwrap();
        assert!(cmd.active);
        assert_eq!(cmd.cell, None);
    }

    #[test]
    fn test_menu_bar_shifts_empty_first_cell() {
        let mut l = layout();
        l.start_row();
        l.start_cell("");
        l.enable_menu_bar();
        assert_eq!(l.cells()[0].y, 2);
        assert_eq!(l.cursor(), (1, 2));
    }
}
