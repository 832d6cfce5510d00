//! Kraken IMGUI — immediate-mode layout and interaction core for terminal grids.
//!
//! Each frame the host calls `Gui::begin`, declares its interface through
//! widget calls, and `Gui::end` returns the whole screen as one text block:
//!
//! 1. Widgets record positioned draw commands into bordered cells
//! 2. Cells are sized from their commands when they close
//! 3. A latched pointer press is delivered to at most one widget
//! 4. The grid is painted (borders, then passive text, then overlays) and serialized
//!
//! `run` drives an `App` on a `TerminalBackend` for interactive use.

mod app;
mod config;
mod context;
mod error;
mod event;
mod identity;
mod layout;
mod render;
mod style;
mod table;
mod terminal;
mod text_utils;
mod types;
mod widgets;

pub use app::{run, App, Flow, Runner};
pub use config::GuiConfig;
pub use context::Gui;
pub use error::GuiError;
pub use event::{InteractionState, PointerLatch, TextEdit};
pub use identity::{Identity, IdentityStack};
pub use layout::{Layout, WriteMode};
pub use style::{Decoration, StyleTable};
pub use table::{Marker, Table, TableBorder, TableCell, TableRow};
pub use terminal::{CrosstermBackend, HeadlessBackend, TerminalBackend};
pub use text_utils::{align, display_len, max_display_len};
pub use types::{
    key, Align, Attrs, DrawCommand, Grid, InputEvent, LayoutCell, PointerAction, PointerEvent,
    Rect, Row, Style,
};
pub use widgets::InputResponse;

/// Re-exported so hosts can build `Decoration`s without depending on crossterm.
pub use crossterm::style::Color;
