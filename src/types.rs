//! Shared types, enums, and constants.
//!
//! Everything that crosses module boundaries (grid, draw commands, cells,
//! pointer events) lives here.

use bitflags::bitflags;
use serde::Serialize;

use crate::identity::Identity;

// ============================================================================
// Style Identifiers
// ============================================================================

/// Closed set of style codes. `None` (id 0) means "no decoration".
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Style {
    #[default]
    None = 0,
    Header = 1,
    Border = 2,
    Button = 3,
    Arrow = 4,
    Input = 5,
    InputActive = 6,
    Highlight = 7,
    Negative = 8,
    Positive = 9,
    Muted = 10,
}

impl Style {
    pub const COUNT: usize = 11;

    pub const ALL: [Style; Self::COUNT] = [
        Self::None,
        Self::Header,
        Self::Border,
        Self::Button,
        Self::Arrow,
        Self::Input,
        Self::InputActive,
        Self::Highlight,
        Self::Negative,
        Self::Positive,
        Self::Muted,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    /// Unknown ids are a programmer error: they trip a debug assertion and
    /// resolve to `None` in release builds.
    pub fn from_id(id: u8) -> Option<Self> {
        let style = Self::ALL.get(id as usize).copied();
        debug_assert!(style.is_some(), "unknown style id {id}");
        style
    }
}

// ============================================================================
// Text Attributes (bitflags)
// ============================================================================

bitflags! {
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Attrs: u8 {
        const BOLD      = 0b0000_0001;
        const ITALIC    = 0b0000_0010;
        const UNDERLINE = 0b0000_0100;
        const REVERSE   = 0b0000_1000;
    }
}

// ============================================================================
// Alignment
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

// ============================================================================
// Geometry & Hit Testing
// ============================================================================

/// Edge-inclusive rectangle: covers `[x, x+w] × [y, y+h]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Degenerate rectangle matching exactly one coordinate.
    pub fn point(x: i32, y: i32) -> Self {
        Self { x, y, w: 0, h: 0 }
    }

    pub fn inside(&self, px: i32, py: i32) -> bool {
        let corners = [
            (self.x, self.y),
            (self.x, self.y + self.h),
            (self.x + self.w, self.y),
            (self.x + self.w, self.y + self.h),
        ];
        if corners.contains(&(px, py)) {
            return true;
        }
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }
}

// ============================================================================
// Draw Commands, Cells & Rows
// ============================================================================

/// A positioned text run recorded during a frame. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawCommand {
    pub identity: Identity,
    pub text: String,
    pub style: Style,
    pub x: i32,
    pub y: i32,
    /// Display width in columns.
    pub len: i32,
    /// Owning cell; `None` for overlay writes at absolute coordinates.
    pub cell: Option<usize>,
    /// Active commands are painted after all others.
    pub active: bool,
}

impl DrawCommand {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.len, 0)
    }
}

/// Bordered layout container. Size is derived from its commands at `end_cell`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LayoutCell {
    pub title: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl LayoutCell {
    pub fn at(x: i32, y: i32, title: &str) -> Self {
        Self {
            title: title.to_string(),
            x,
            y,
            width: 0,
            height: 0,
        }
    }

    /// Bottom border row.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Right border column.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Row {
    pub cells: Vec<usize>,
}

// ============================================================================
// Styled Grid
// ============================================================================

/// Placeholder for the trailing columns of a wide glyph.
pub const WIDE_CONTINUATION: char = '\0';

/// Fixed-size character grid with a parallel style plane.
/// All point access is bounds-checked; out-of-range access never faults.
#[derive(Debug, Clone)]
pub struct Grid {
    pub width: u16,
    pub height: u16,
    chars: Vec<char>,
    styles: Vec<Style>,
}

impl Grid {
    pub fn new(width: u16, height: u16) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            chars: vec![' '; size],
            styles: vec![Style::None; size],
        }
    }

    pub fn clear(&mut self) {
        self.chars.fill(' ');
        self.styles.fill(Style::None);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn set(&mut self, x: i32, y: i32, ch: char, style: Style) {
        if let Some(idx) = self.index(x, y) {
            self.chars[idx] = ch;
            self.styles[idx] = style;
        }
    }

    /// Returns `(' ', Style::None)` outside the grid.
    pub fn at(&self, x: i32, y: i32) -> (char, Style) {
        match self.index(x, y) {
            Some(idx) => (self.chars[idx], self.styles[idx]),
            None => (' ', Style::None),
        }
    }

    pub fn row(&self, y: u16) -> impl Iterator<Item = (char, Style)> + '_ {
        let start = (y as usize) * (self.width as usize);
        let end = if y < self.height {
            start + self.width as usize
        } else {
            start
        };
        let range = start.min(self.chars.len())..end.min(self.chars.len());
        self.chars[range.clone()]
            .iter()
            .copied()
            .zip(self.styles[range].iter().copied())
    }
}

// ============================================================================
// Host Events
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    /// Updates the last-known pointer position only.
    Motion,
    /// Latches one consumable event for the next frame.
    Press,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub x: i32,
    pub y: i32,
    pub action: PointerAction,
}

impl PointerEvent {
    pub fn press(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            action: PointerAction::Press,
        }
    }

    pub fn motion(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            action: PointerAction::Motion,
        }
    }
}

/// Events delivered by the host between frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Printable characters or named tokens such as `backspace` and `enter`.
    Key(String),
    Pointer(PointerEvent),
    Resize { width: u16, height: u16 },
}

pub mod key {
    pub const BACKSPACE: &str = "backspace";
    pub const ENTER: &str = "enter";
    pub const CTRL_C: &str = "ctrl+c";
}
