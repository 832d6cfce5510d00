//! Event Module — pointer latch and cross-frame interaction state.
//!
//! Responsibilities:
//! - Latch at most one pointer press for the next frame
//! - Track the last known pointer position
//! - Text-edit state machine (viewing / editing) fed by raw key tokens
//! - The single active menu / dropdown identity

use tracing::debug;

use crate::identity::Identity;
use crate::text_utils::{display_len, pop_grapheme};
use crate::types::key;

// ============================================================================
// Pointer Latch
// ============================================================================

/// One consumable pointer press. The first widget whose hit test succeeds
/// takes it; everyone after that sees nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerLatch {
    pending: Option<(i32, i32)>,
}

impl PointerLatch {
    pub fn set(&mut self, x: i32, y: i32) {
        self.pending = Some((x, y));
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn position(&self) -> Option<(i32, i32)> {
        self.pending
    }

    /// Consume the press if `hit` accepts its coordinates.
    pub fn take_if(&mut self, hit: impl FnOnce(i32, i32) -> bool) -> bool {
        match self.pending {
            Some((x, y)) if hit(x, y) => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

// ============================================================================
// Text Editing
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub owner: Identity,
    pub buffer: String,
    /// Maximum display width of the buffer; 0 means unbounded.
    pub max_len: usize,
}

impl TextEdit {
    fn accepts(&self, token: &str) -> bool {
        self.max_len == 0 || display_len(&self.buffer) + display_len(token) <= self.max_len
    }
}

// ============================================================================
// Interaction State
// ============================================================================

/// Process-wide interaction state. Replaced wholesale on resize.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    pub latch: PointerLatch,
    pub pointer: (i32, i32),
    edit: Option<TextEdit>,
    committed: Option<(Identity, String)>,
    pub active_menu: Option<Identity>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    pub fn is_editing_field(&self, id: Identity) -> bool {
        self.edit.as_ref().is_some_and(|edit| edit.owner == id)
    }

    pub fn edit(&self) -> Option<&TextEdit> {
        self.edit.as_ref()
    }

    /// Start editing `id` with a snapshot of its current value.
    pub fn begin_edit(&mut self, id: Identity, value: &str, max_len: usize) {
        self.committed = None;
        self.edit = Some(TextEdit {
            owner: id,
            buffer: value.to_string(),
            max_len,
        });
    }

    /// Leave editing mode and return the buffer.
    pub fn finish_edit(&mut self) -> Option<String> {
        self.edit.take().map(|edit| edit.buffer)
    }

    /// Value committed with `enter` since the last frame, if it belongs to `id`.
    pub fn take_committed(&mut self, id: Identity) -> Option<String> {
        match &self.committed {
            Some((owner, _)) if *owner == id => self.committed.take().map(|(_, text)| text),
            _ => None,
        }
    }

    /// Current edit buffer of `id`, clipped to the edit's maximum width.
    pub fn edit_buffer(&mut self, id: Identity) -> Option<&str> {
        let edit = self.edit.as_mut().filter(|edit| edit.owner == id)?;
        if edit.max_len > 0 && display_len(&edit.buffer) > edit.max_len {
            let keep = crate::text_utils::truncate_to_width(&edit.buffer, edit.max_len).len();
            edit.buffer.truncate(keep);
        }
        Some(edit.buffer.as_str())
    }

    /// Feed a raw key token. Returns true if an active edit consumed it.
    pub fn send_key(&mut self, token: &str) -> bool {
        if token == key::ENTER {
            let Some(done) = self.edit.take() else {
                return false;
            };
            debug!(field = %done.owner, text = %done.buffer, "input committed");
            self.committed = Some((done.owner, done.buffer));
            return true;
        }
        let Some(edit) = self.edit.as_mut() else {
            return false;
        };
        if token == key::BACKSPACE {
            pop_grapheme(&mut edit.buffer);
        } else if edit.accepts(token) {
            edit.buffer.push_str(token);
        }
        true
    }
}
