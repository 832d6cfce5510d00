//! Gui struct and frame lifecycle.
//!
//! The Gui owns all mutable state for one display surface: the grid, the
//! identity stack, the layout log and the interaction state. A frame is
//! `begin`, widget calls, then `end`, which returns the serialized grid.
//! Widget primitives live in `widgets.rs`.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::GuiConfig;
use crate::event::InteractionState;
use crate::identity::{Identity, IdentityStack};
use crate::layout::{Layout, WriteMode};
use crate::render;
use crate::style::StyleTable;
use crate::types::{
    DrawCommand, Grid, InputEvent, LayoutCell, PointerAction, PointerEvent, Rect, Style,
};

/// Position of the menu bar being declared in the current frame.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MenuCursor {
    pub x: i32,
    pub item_y: i32,
    pub size: i32,
    pub current: Identity,
}

pub struct Gui {
    pub(crate) config: GuiConfig,
    pub(crate) grid: Grid,
    pub(crate) styles: StyleTable,
    pub(crate) ids: IdentityStack,
    pub(crate) layout: Layout,
    pub(crate) interaction: InteractionState,
    pub(crate) menu: MenuCursor,
    in_frame: bool,
    /// The outer row/cell seeded by `begin` has not been claimed by the caller yet.
    scaffold: bool,
    /// Identity stack depth below the open cell's scope.
    cell_scope: Option<usize>,
    /// Identity stack depth below the open group's scope.
    group_scope: Option<usize>,
    groups: usize,
    frame_start: Option<Instant>,

    // Diagnostics
    pub frame_count: u64,
    pub perf_frame_us: u64,
}

impl Gui {
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_config(width, height, GuiConfig::default())
    }

    pub fn with_config(width: u16, height: u16, config: GuiConfig) -> Self {
        Self {
            grid: Grid::new(width, height),
            styles: StyleTable::default(),
            ids: IdentityStack::new(),
            layout: Layout::new(config.group_margin, config.left_margin),
            interaction: InteractionState::new(),
            menu: MenuCursor::default(),
            in_frame: false,
            scaffold: false,
            cell_scope: None,
            group_scope: None,
            groups: 0,
            frame_start: None,
            frame_count: 0,
            perf_frame_us: 0,
            config,
        }
    }

    /// Discard everything and start over at the new size. Nothing carries
    /// across, including an in-flight text edit.
    pub fn resize(&mut self, width: u16, height: u16) {
        info!(width, height, "surface resized; rebuilding gui state");
        let styles = self.styles.clone();
        *self = Gui::with_config(width, height, self.config.clone());
        self.styles = styles;
    }

    pub fn size(&self) -> (u16, u16) {
        (self.grid.width, self.grid.height)
    }

    pub fn config(&self) -> &GuiConfig {
        &self.config
    }

    pub fn styles_mut(&mut self) -> &mut StyleTable {
        &mut self.styles
    }

    pub fn in_frame(&self) -> bool {
        self.in_frame
    }

    pub(crate) fn debug_log(&self, msg: &str) {
        if self.config.debug {
            debug!("{msg}");
        }
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key(token) => {
                self.send_key(&token);
            }
            InputEvent::Pointer(pointer) => self.handle_pointer(pointer),
            InputEvent::Resize { width, height } => self.resize(width, height),
        }
    }

    pub fn handle_pointer(&mut self, pointer: PointerEvent) {
        match pointer.action {
            PointerAction::Motion => self.set_pointer_pos(pointer.x, pointer.y),
            PointerAction::Press => self.set_pointer_event(pointer.x, pointer.y),
            PointerAction::Release => {}
        }
    }

    /// Latch a press for the next frame. A newer press replaces an unconsumed one.
    pub fn set_pointer_event(&mut self, x: i32, y: i32) {
        debug!(x, y, "pointer press latched");
        self.interaction.latch.set(x, y);
    }

    pub fn set_pointer_pos(&mut self, x: i32, y: i32) {
        self.interaction.pointer = (x, y);
    }

    /// Route a key token to the field being edited. Returns true if consumed.
    pub fn send_key(&mut self, token: &str) -> bool {
        self.interaction.send_key(token)
    }

    pub fn is_editing(&self) -> bool {
        self.interaction.is_editing()
    }

    pub fn pointer_pending(&self) -> bool {
        self.interaction.latch.is_pending()
    }

    pub fn active_menu(&self) -> Option<Identity> {
        self.interaction.active_menu
    }

    // ------------------------------------------------------------------------
    // Frame lifecycle
    // ------------------------------------------------------------------------

    /// Clear the grid and the frame log, then seed the implicit outer row and cell.
    pub fn begin(&mut self) {
        if self.in_frame {
            warn!("begin called inside an open frame; restarting it");
        }
        self.grid.clear();
        self.layout.clear();
        self.ids.clear();
        self.cell_scope = None;
        self.group_scope = None;
        self.groups = 0;
        self.menu = MenuCursor::default();
        self.in_frame = true;
        self.frame_start = Some(Instant::now());

        self.layout.start_row();
        self.open_cell("");
        self.scaffold = true;
    }

    /// Close whatever is still open, drop the pointer latch, paint and serialize.
    pub fn end(&mut self) -> String {
        if !self.in_frame {
            warn!("end called without begin");
            return String::new();
        }
        if self.layout.is_grouping() {
            self.end_group();
        }
        if self.layout.is_cell_open() {
            self.end_cell();
        }
        if self.layout.is_row_open() {
            self.layout.end_row();
        }
        if !self.ids.is_empty() {
            warn!(depth = self.ids.depth(), "identity stack not empty at end of frame");
            self.ids.clear();
        }
        self.scaffold = false;
        self.interaction.latch.clear();
        self.in_frame = false;

        render::compose(&self.layout, &mut self.grid);
        let out = render::serialize(&self.grid, &self.styles);

        self.frame_count += 1;
        if let Some(start) = self.frame_start.take() {
            self.perf_frame_us = start.elapsed().as_micros() as u64;
        }
        self.debug_log(&format!(
            "frame {}: {}μs, {} commands, {} cells",
            self.frame_count,
            self.perf_frame_us,
            self.layout.commands().len(),
            self.layout.cells().len()
        ));
        out
    }

    /// Run one complete frame around `render`.
    pub fn frame(&mut self, render: impl FnOnce(&mut Gui)) -> String {
        self.begin();
        render(self);
        self.end()
    }

    // ------------------------------------------------------------------------
    // Layout primitives
    // ------------------------------------------------------------------------

    pub fn start_row(&mut self) {
        if !self.in_frame {
            return;
        }
        if self.scaffold {
            if self.layout.current_cell_is_empty() {
                // the seeded row is adopted as-is
                return;
            }
            self.scaffold = false;
            if self.layout.is_cell_open() {
                self.end_cell();
            }
            self.layout.end_row();
        }
        self.layout.start_row();
    }

    pub fn end_row(&mut self) {
        if self.in_frame {
            self.layout.end_row();
        }
    }

    pub fn start_cell(&mut self) {
        self.start_cell_with_header("");
    }

    pub fn start_cell_with_header(&mut self, title: &str) {
        if !self.in_frame {
            return;
        }
        if self.scaffold {
            self.scaffold = false;
            if self.layout.current_cell_is_empty() {
                self.layout.set_current_title(title);
                return;
            }
            if self.layout.is_cell_open() {
                self.end_cell();
            }
        }
        self.open_cell(title);
    }

    pub fn end_cell(&mut self) {
        if !self.in_frame {
            return;
        }
        if self.layout.is_cell_open() {
            self.close_cell_scope();
        }
        self.layout.end_cell();
    }

    /// Lay the following widgets out side by side under their own identity scope.
    pub fn start_group(&mut self) {
        if !self.in_frame {
            return;
        }
        if self.group_scope.is_none() {
            self.group_scope = Some(self.ids.depth());
            self.ids.push(&format!("GROUP_{}", self.groups));
            self.groups += 1;
        }
        self.layout.start_group();
    }

    pub fn end_group(&mut self) {
        if !self.in_frame {
            return;
        }
        if let Some(depth) = self.group_scope.take() {
            self.ids.truncate(depth);
        }
        self.layout.end_group();
    }

    /// Open a layout cell under an identity scope named by its index in the frame.
    fn open_cell(&mut self, title: &str) {
        self.close_cell_scope();
        let index = self.layout.cells().len();
        self.cell_scope = Some(self.ids.depth());
        self.ids.push(&format!("CELL_{index}"));
        self.layout.start_cell(title);
    }

    /// Pop the cell's scope along with a group still open inside it.
    fn close_cell_scope(&mut self) {
        if let Some(depth) = self.cell_scope.take() {
            if self.group_scope.is_some_and(|group| group >= depth) {
                self.group_scope = None;
            }
            self.ids.truncate(depth);
        }
    }

    // ------------------------------------------------------------------------
    // Widget plumbing
    // ------------------------------------------------------------------------

    /// Run `body` inside a pushed identity scope; the cursor is repositioned on exit.
    pub(crate) fn scoped<R>(&mut self, label: &str, body: impl FnOnce(&mut Gui, Identity) -> R) -> R {
        let id = self.ids.push(label);
        let out = body(self, id);
        self.ids.pop();
        self.layout.after_pop();
        out
    }

    pub(crate) fn write(&mut self, text: &str, style: Style, mode: WriteMode) {
        let id = self.ids.top();
        self.layout.write(id, text, style, mode);
    }

    /// Consume the latched press if it lands on the command just written.
    pub(crate) fn pressed_last(&mut self) -> bool {
        let layout = &self.layout;
        let hit = self.interaction.latch.take_if(|x, y| layout.has_focus(x, y));
        if hit {
            debug!(identity = %self.ids.top(), "press dispatched");
        }
        hit
    }

    /// Consume the latched press if it lands inside `zone`.
    pub(crate) fn pressed_in(&mut self, zone: Rect) -> bool {
        self.interaction.latch.take_if(|px, py| zone.inside(px, py))
    }

    // ------------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------------

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn at(&self, x: i32, y: i32) -> (char, Style) {
        self.grid.at(x, y)
    }

    pub fn commands(&self) -> &[DrawCommand] {
        self.layout.commands()
    }

    pub fn cells(&self) -> &[LayoutCell] {
        self.layout.cells()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Commands, cells and rows of the last frame as JSON.
    pub fn debug_snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "frame": self.frame_count,
            "commands": self.layout.commands(),
            "cells": self.layout.cells(),
            "rows": self.layout.rows(),
        })
    }

    /// Log the debug snapshot.
    pub fn debug(&self) {
        debug!(snapshot = %self.debug_snapshot(), "gui state");
    }
}
