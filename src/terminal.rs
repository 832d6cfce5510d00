//! TerminalBackend trait + CrosstermBackend implementation.
//!
//! The host loop only talks to this trait, so frames can be driven by a
//! headless or scripted backend in tests.

use std::collections::VecDeque;
use std::io::Write;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::error::GuiError;
use crate::types::{key, InputEvent, PointerAction, PointerEvent};

// ============================================================================
// TerminalBackend Trait
// ============================================================================

pub trait TerminalBackend {
    fn init(&mut self) -> Result<(), GuiError>;
    fn shutdown(&mut self) -> Result<(), GuiError>;
    fn size(&self) -> (u16, u16);
    /// Replace the screen contents with one serialized frame.
    fn write_frame(&mut self, frame: &str) -> Result<(), GuiError>;
    fn read_events(&mut self, timeout_ms: u32) -> Result<Vec<InputEvent>, GuiError>;
}

// ============================================================================
// CrosstermBackend
// ============================================================================

pub struct CrosstermBackend {
    width: u16,
    height: u16,
}

impl CrosstermBackend {
    pub fn new() -> Self {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        Self {
            width: w,
            height: h,
        }
    }
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalBackend for CrosstermBackend {
    fn init(&mut self) -> Result<(), GuiError> {
        use crossterm::{
            cursor,
            event::EnableMouseCapture,
            terminal::{enable_raw_mode, EnterAlternateScreen},
            ExecutableCommand,
        };

        enable_raw_mode().map_err(GuiError::terminal("raw mode"))?;
        let mut stdout = std::io::stdout();
        stdout
            .execute(EnterAlternateScreen)
            .map_err(GuiError::terminal("alternate screen"))?;
        stdout
            .execute(EnableMouseCapture)
            .map_err(GuiError::terminal("mouse capture"))?;
        stdout
            .execute(cursor::Hide)
            .map_err(GuiError::terminal("hide cursor"))?;

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        self.width = w;
        self.height = h;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), GuiError> {
        use crossterm::{
            cursor,
            event::DisableMouseCapture,
            terminal::{disable_raw_mode, LeaveAlternateScreen},
            ExecutableCommand,
        };

        let mut stdout = std::io::stdout();
        stdout
            .execute(cursor::Show)
            .map_err(GuiError::terminal("show cursor"))?;
        stdout
            .execute(DisableMouseCapture)
            .map_err(GuiError::terminal("disable mouse"))?;
        stdout
            .execute(LeaveAlternateScreen)
            .map_err(GuiError::terminal("leave alternate screen"))?;
        disable_raw_mode().map_err(GuiError::terminal("disable raw mode"))?;
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        crossterm::terminal::size().unwrap_or((self.width, self.height))
    }

    fn write_frame(&mut self, frame: &str) -> Result<(), GuiError> {
        use crossterm::{
            cursor::MoveTo,
            style::Print,
            terminal::{Clear, ClearType},
            QueueableCommand,
        };

        let mut stdout = std::io::stdout();
        stdout
            .queue(Clear(ClearType::All))
            .map_err(GuiError::terminal("clear"))?;
        for (y, line) in frame.lines().enumerate() {
            stdout
                .queue(MoveTo(0, y as u16))
                .map_err(GuiError::terminal("move"))?;
            stdout
                .queue(Print(line))
                .map_err(GuiError::terminal("print"))?;
        }
        stdout.flush().map_err(GuiError::terminal("flush"))
    }

    fn read_events(&mut self, timeout_ms: u32) -> Result<Vec<InputEvent>, GuiError> {
        let mut events = Vec::new();
        let timeout = Duration::from_millis(timeout_ms as u64);

        if !event::poll(timeout).map_err(GuiError::terminal("poll"))? {
            return Ok(events);
        }
        while event::poll(Duration::ZERO).map_err(GuiError::terminal("poll"))? {
            match event::read().map_err(GuiError::terminal("read"))? {
                Event::Key(key_event) => {
                    if let Some(token) = key_token(&key_event) {
                        events.push(InputEvent::Key(token));
                    }
                }
                Event::Mouse(mouse_event) => {
                    if let Some(pointer) = pointer_event(&mouse_event) {
                        events.push(InputEvent::Pointer(pointer));
                    }
                }
                Event::Resize(w, h) => {
                    self.width = w;
                    self.height = h;
                    events.push(InputEvent::Resize {
                        width: w,
                        height: h,
                    });
                }
                _ => {}
            }
        }
        Ok(events)
    }
}

/// Key token for a press: the typed text, or a named token. Keys without a
/// token are dropped so they never land in an edit buffer.
fn key_token(key_event: &KeyEvent) -> Option<String> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    match key_event.code {
        KeyCode::Char('c') if ctrl => Some(key::CTRL_C.to_string()),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(c.to_string()),
        KeyCode::Backspace => Some(key::BACKSPACE.to_string()),
        KeyCode::Enter => Some(key::ENTER.to_string()),
        _ => None,
    }
}

fn pointer_event(mouse_event: &MouseEvent) -> Option<PointerEvent> {
    let action = match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerAction::Press,
        MouseEventKind::Up(MouseButton::Left) => PointerAction::Release,
        MouseEventKind::Moved | MouseEventKind::Drag(_) => PointerAction::Motion,
        _ => return None,
    };
    Some(PointerEvent {
        x: mouse_event.column as i32,
        y: mouse_event.row as i32,
        action,
    })
}

// ============================================================================
// HeadlessBackend (scripted input, for CI and tests)
// ============================================================================

/// Replays scripted event batches and records every frame. Once the script
/// is exhausted it reports `ctrl+c`, so a run always terminates.
pub struct HeadlessBackend {
    pub width: u16,
    pub height: u16,
    pub frames: Vec<String>,
    pub initialized: bool,
    pub shut_down: bool,
    script: VecDeque<Vec<InputEvent>>,
}

impl HeadlessBackend {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            frames: Vec::new(),
            initialized: false,
            shut_down: false,
            script: VecDeque::new(),
        }
    }

    /// Queue one batch; each batch produces one frame.
    pub fn push_batch(&mut self, batch: Vec<InputEvent>) {
        self.script.push_back(batch);
    }

    pub fn last_frame(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }
}

impl TerminalBackend for HeadlessBackend {
    fn init(&mut self) -> Result<(), GuiError> {
        self.initialized = true;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), GuiError> {
        self.shut_down = true;
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn write_frame(&mut self, frame: &str) -> Result<(), GuiError> {
        self.frames.push(frame.to_string());
        Ok(())
    }

    fn read_events(&mut self, _timeout_ms: u32) -> Result<Vec<InputEvent>, GuiError> {
        Ok(self
            .script
            .pop_front()
            .unwrap_or_else(|| vec![InputEvent::Key(key::CTRL_C.to_string())]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_key_tokens() {
        assert_eq!(
            key_token(&press(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some("a".to_string())
        );
        assert_eq!(
            key_token(&press(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some("A".to_string())
        );
        assert_eq!(
            key_token(&press(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(key::BACKSPACE.to_string())
        );
        assert_eq!(
            key_token(&press(KeyCode::Enter, KeyModifiers::NONE)),
            Some(key::ENTER.to_string())
        );
        assert_eq!(
            key_token(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(key::CTRL_C.to_string())
        );
    }

    #[test]
    fn test_untokenized_keys_are_dropped() {
        assert_eq!(key_token(&press(KeyCode::Left, KeyModifiers::NONE)), None);
        assert_eq!(
            key_token(&press(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            None
        );
        let mut release = press(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(key_token(&release), None);
    }

    #[test]
    fn test_pointer_translation() {
        let down = pointer_event(&mouse(MouseEventKind::Down(MouseButton::Left), 4, 2));
        assert_eq!(down, Some(PointerEvent::press(4, 2)));

        let moved = pointer_event(&mouse(MouseEventKind::Moved, 7, 1));
        assert_eq!(moved, Some(PointerEvent::motion(7, 1)));

        let drag = pointer_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 1, 1));
        assert_eq!(drag.map(|p| p.action), Some(PointerAction::Motion));

        assert_eq!(
            pointer_event(&mouse(MouseEventKind::Down(MouseButton::Right), 0, 0)),
            None
        );
        assert_eq!(pointer_event(&mouse(MouseEventKind::ScrollUp, 0, 0)), None);
    }

    #[test]
    fn test_headless_backend_records_and_replays() {
        let mut backend = HeadlessBackend::new(10, 4);
        backend.push_batch(vec![InputEvent::Key("a".to_string())]);
        backend.write_frame("frame").unwrap();
        assert_eq!(backend.last_frame(), Some("frame"));
        assert_eq!(
            backend.read_events(0).unwrap(),
            vec![InputEvent::Key("a".to_string())]
        );
        assert_eq!(
            backend.read_events(0).unwrap(),
            vec![InputEvent::Key(key::CTRL_C.to_string())]
        );
    }
}
