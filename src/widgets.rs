//! Widget primitives.
//!
//! Each widget pushes `KIND_label` as its identity, records its glyphs, tests
//! the latched press against what it just recorded, and pops. Called outside
//! a frame, a widget records nothing and hands back the caller's value.

use tracing::debug;

use crate::context::{Gui, MenuCursor};
use crate::identity::Identity;
use crate::layout::WriteMode::{Block, Inline};
use crate::table::Table;
use crate::text_utils::{align, display_len, max_display_len};
use crate::types::{Align, Rect, Style};

const ARROW_LEFT: &str = "⯇";
const ARROW_RIGHT: &str = "⯈";
const ARROW_DOWN: &str = "⯆";
const CHECKED: &str = "■";
const UNCHECKED: &str = "▢";

/// Result of an `input` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputResponse {
    /// The field's value: the live edit buffer while editing.
    pub text: String,
    pub editing: bool,
}

impl Gui {
    // ========================================================================
    // Simple widgets
    // ========================================================================

    pub fn text(&mut self, text: &str) {
        if !self.in_frame() {
            return;
        }
        self.scoped(&format!("TEXT_{text}"), |g, _| {
            g.write(text, Style::None, Block);
        });
    }

    /// Returns true on the frame the button is pressed.
    pub fn button(&mut self, label: &str) -> bool {
        if !self.in_frame() {
            return false;
        }
        self.scoped(&format!("BUTTON_{label}"), |g, _| {
            g.write(&format!(" {label} "), Style::Button, Block);
            g.pressed_last()
        })
    }

    pub fn checkbox(&mut self, label: &str, checked: bool) -> bool {
        if !self.in_frame() {
            return checked;
        }
        self.scoped(&format!("CHECKBOX_{label}"), |g, _| {
            let marker = if checked { CHECKED } else { UNCHECKED };
            g.write(marker, Style::Arrow, Inline);
            let toggled = g.pressed_last();
            g.write(&format!(" {label}"), Style::None, Inline);
            checked ^ toggled
        })
    }

    /// One marker per entry; a press on a marker selects that entry.
    pub fn radio<S: AsRef<str>>(&mut self, label: &str, entries: &[S], selected: usize) -> usize {
        if !self.in_frame() {
            return selected;
        }
        self.scoped(&format!("RADIO_{label}"), |g, _| {
            g.write(&format!("{label} "), Style::None, Inline);

            // hit zones are known up front so the markers reflect this frame's choice
            let (mut x, y) = g.layout.cursor();
            let mut chosen = selected;
            for (i, entry) in entries.iter().enumerate() {
                if g.pressed_in(Rect::point(x, y)) {
                    chosen = i;
                }
                x += display_len(entry.as_ref()) as i32 + 3;
            }

            for (i, entry) in entries.iter().enumerate() {
                let marker = if i == chosen { CHECKED } else { UNCHECKED };
                g.write(marker, Style::Arrow, Inline);
                g.write(&format!(" {} ", entry.as_ref()), Style::None, Inline);
            }
            chosen
        })
    }

    /// `label ⯇ value ⯈`. The arrows step through `entries` with wraparound.
    pub fn selection<S: AsRef<str>>(
        &mut self,
        label: &str,
        entries: &[S],
        selected: usize,
    ) -> usize {
        if !self.in_frame() || entries.is_empty() {
            return selected;
        }
        let n = entries.len();
        self.scoped(&format!("SELECTION_{label}"), |g, _| {
            let (x, y) = g.layout.cursor();
            let slot = max_display_len(entries) + 2;
            let left = x + display_len(label) as i32 + 1;
            let right = left + 1 + slot as i32;

            let mut index = selected.min(n - 1);
            if g.pressed_in(Rect::point(left, y)) {
                index = (index + n - 1) % n;
            } else if g.pressed_in(Rect::point(right, y)) {
                index = (index + 1) % n;
            }

            g.write(&format!("{label} "), Style::None, Inline);
            g.write(ARROW_LEFT, Style::Arrow, Inline);
            let value = format!(" {} ", entries[index].as_ref());
            g.write(&align(&value, slot, Align::Center), Style::Input, Inline);
            g.write(ARROW_RIGHT, Style::Arrow, Inline);
            index
        })
    }

    /// `label ⯇ value ⯈`, stepping by `step` and clamped to `[min, max]`.
    pub fn int_slider(&mut self, label: &str, min: i64, max: i64, value: i64, step: i64) -> i64 {
        if !self.in_frame() {
            return value;
        }
        self.scoped(&format!("INT_SLIDER_{label}"), |g, _| {
            let (x, y) = g.layout.cursor();
            let slot = max.to_string().len().max(min.to_string().len()) + 2;
            let left = x + display_len(label) as i32 + 1;
            let right = left + 1 + slot as i32;

            // arrow hit boxes match a one-glyph command's edge-inclusive bounds
            let mut value = value.min(max).max(min);
            if g.pressed_in(Rect::new(left, y, 1, 0)) {
                value = value.saturating_sub(step).max(min);
            } else if g.pressed_in(Rect::new(right, y, 1, 0)) {
                value = value.saturating_add(step).min(max);
            }

            g.write(&format!("{label} "), Style::None, Inline);
            g.write(ARROW_LEFT, Style::Arrow, Inline);
            g.write(
                &align(&format!(" {value} "), slot, Align::Center),
                Style::Input,
                Inline,
            );
            g.write(ARROW_RIGHT, Style::Arrow, Inline);
            value
        })
    }

    // ========================================================================
    // Dropdown
    // ========================================================================

    /// A header that toggles a list of `entries`. Only one dropdown or menu is
    /// open at a time; pressing an entry selects it and closes the list.
    pub fn dropdown<S: AsRef<str>>(&mut self, label: &str, entries: &[S], selected: usize) -> usize {
        if !self.in_frame() || entries.is_empty() {
            return selected;
        }
        self.scoped(&format!("DROPDOWN_{label}"), |g, id| {
            let mut open = g.interaction.active_menu == Some(id);
            let mut chosen = selected.min(entries.len() - 1);

            g.write(&format!("{label} "), Style::None, Inline);
            g.write(if open { ARROW_DOWN } else { ARROW_RIGHT }, Style::Arrow, Inline);
            if g.pressed_last() {
                open = !open;
                g.interaction.active_menu = open.then_some(id);
                debug!(dropdown = label, open, "dropdown toggled");
            }
            g.write(&format!(" {}", entries[chosen].as_ref()), Style::None, Block);

            if !open {
                return chosen;
            }
            let width = max_display_len(entries) + 1;
            let (px, py) = g.interaction.pointer;
            for (i, entry) in entries.iter().enumerate() {
                let (x, y) = g.layout.cursor();
                let mut style = if g.layout.is_inside(px, py, width as i32, 0) {
                    Style::Highlight
                } else {
                    Style::None
                };
                if g.pressed_in(Rect::new(x, y, width as i32, 0)) {
                    chosen = i;
                    style = Style::Highlight;
                    g.interaction.active_menu = None;
                }
                let line = align(&format!(" {}", entry.as_ref()), width, Align::Left);
                g.write(&line, style, Block);
            }
            chosen
        })
    }

    // ========================================================================
    // Text input
    // ========================================================================

    /// `label` followed by a field of `size` columns. A press starts editing
    /// with a copy of `text`; a second press or `enter` ends it. A value
    /// committed with `enter` is returned on the next frame.
    pub fn input(&mut self, label: &str, text: &str, size: usize) -> InputResponse {
        if !self.in_frame() {
            return InputResponse {
                text: text.to_string(),
                editing: false,
            };
        }
        self.scoped(&format!("INPUT_{label}"), |g, id| {
            let mut value = g
                .interaction
                .take_committed(id)
                .unwrap_or_else(|| text.to_string());
            let mut editing = g.interaction.is_editing_field(id);

            g.write(&format!("{label} "), Style::None, Inline);
            let (shown, style) = match g.interaction.edit_buffer(id) {
                Some(buffer) => (buffer.to_string(), Style::InputActive),
                None => (value.clone(), Style::Input),
            };
            g.write(&align(&shown, size, Align::Left), style, Inline);

            if g.pressed_last() {
                if editing {
                    if let Some(buffer) = g.interaction.finish_edit() {
                        value = buffer;
                    }
                    editing = false;
                } else {
                    g.interaction.begin_edit(id, &value, size);
                    editing = true;
                }
                debug!(field = label, editing, "input toggled");
            }

            let text = match g.interaction.edit() {
                Some(edit) if editing => edit.buffer.clone(),
                _ => value,
            };
            InputResponse { text, editing }
        })
    }

    // ========================================================================
    // Menu bar
    // ========================================================================

    /// Reserve the top line for menus. Call before anything is written.
    pub fn begin_menu_bar(&mut self) {
        if !self.in_frame() {
            return;
        }
        self.layout.enable_menu_bar();
        self.menu = MenuCursor::default();
    }

    pub fn end_menu_bar(&mut self) {
        self.menu.current = Identity::EMPTY;
    }

    /// Draw a menu title on the bar. Returns whether the menu is open.
    /// Every `begin_menu` must be followed by `end_menu`.
    pub fn begin_menu(&mut self, label: &str) -> bool {
        if !self.in_frame() {
            return false;
        }
        let id = self.ids.push(&format!("MENU_{label}"));
        self.menu.current = id;
        self.menu.item_y = 1;
        self.menu.size = display_len(label) as i32 + 3;

        self.layout
            .write_at(id, self.menu.x, 0, &format!(" {label} "), Style::Header);
        let mut open = self.interaction.active_menu == Some(id);
        if self.pressed_last() {
            open = !open;
            self.interaction.active_menu = open.then_some(id);
            debug!(menu = label, open, "menu toggled");
        }
        open
    }

    /// An entry below the current menu. Draws nothing unless the menu is open.
    pub fn menu_item(&mut self, label: &str) -> bool {
        let current = self.menu.current;
        if !self.in_frame() || current.is_empty() || self.interaction.active_menu != Some(current)
        {
            return false;
        }
        let id = self.ids.derive(&format!("MENU_ITEM_{label}"));
        let width = self.config.menu_item_width;
        let (x, y) = (self.menu.x, self.menu.item_y);
        let (px, py) = self.interaction.pointer;
        let style = if Rect::new(x, y, width as i32, 0).inside(px, py) {
            Style::Highlight
        } else {
            Style::Header
        };

        let entry = align(&format!(" {label} "), width, Align::Left);
        self.layout.write_at(id, x, y, &entry, style);
        self.menu.item_y += 1;

        let hit = self.pressed_last();
        if hit {
            self.interaction.active_menu = None;
            debug!(item = label, "menu item chosen");
        }
        hit
    }

    pub fn end_menu(&mut self) {
        if !self.in_frame() {
            return;
        }
        self.ids.pop();
        self.menu.x += self.menu.size;
        self.menu.size = 0;
    }

    // ========================================================================
    // Table
    // ========================================================================

    /// Header row, separator, then one line per data row. Columns are as wide
    /// as their widest entry plus padding on both sides.
    pub fn table(&mut self, table: &Table) {
        if !self.in_frame() {
            return;
        }
        let widths = table.column_widths();
        if widths.is_empty() {
            return;
        }
        let pad = " ".repeat(table.padding);
        let border = table.border;

        self.scoped("TABLE", |g, _| {
            for (i, &width) in widths.iter().enumerate() {
                let header = table.headers.get(i).map_or("", String::as_str);
                let text = align(header, width, Align::Center);
                g.table_cell(border.vertical, &pad, &text, Style::Header);
            }
            g.write(border.vertical, Style::Border, Block);

            g.write(border.left, Style::Border, Inline);
            for (i, &width) in widths.iter().enumerate() {
                let rule = border.horizontal.repeat(width + 2 * table.padding);
                g.write(&rule, Style::Border, Inline);
                if i + 1 < widths.len() {
                    g.write(border.cross, Style::Border, Inline);
                }
            }
            g.write(border.right, Style::Border, Block);

            for row in &table.rows {
                for (i, &width) in widths.iter().enumerate() {
                    let (text, style) = match row.cells.get(i) {
                        Some(cell) => (align(&cell.text, width, cell.align), cell.marker.style()),
                        None => (" ".repeat(width), Style::None),
                    };
                    g.table_cell(border.vertical, &pad, &text, style);
                }
                g.write(border.vertical, Style::Border, Block);
            }
        });
    }

    fn table_cell(&mut self, vertical: &str, pad: &str, text: &str, style: Style) {
        self.write(vertical, Style::Border, Inline);
        if !pad.is_empty() {
            self.write(pad, Style::None, Inline);
        }
        self.write(text, style, Inline);
        if !pad.is_empty() {
            self.write(pad, Style::None, Inline);
        }
    }
}
