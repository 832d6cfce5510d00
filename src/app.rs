//! Host loop: feeds backend events into the frame controller and hands each
//! rendered frame back to the backend.

use tracing::{debug, info};

use crate::config::GuiConfig;
use crate::context::Gui;
use crate::error::GuiError;
use crate::terminal::TerminalBackend;
use crate::types::{key, InputEvent};

/// The user interface, declared from scratch every frame.
pub trait App {
    fn render(&mut self, gui: &mut Gui);
}

impl<F: FnMut(&mut Gui)> App for F {
    fn render(&mut self, gui: &mut Gui) {
        self(gui)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Event routing and frame production, without any terminal I/O.
pub struct Runner {
    gui: Gui,
}

impl Runner {
    pub fn new(width: u16, height: u16, config: GuiConfig) -> Self {
        Self {
            gui: Gui::with_config(width, height, config),
        }
    }

    pub fn gui(&self) -> &Gui {
        &self.gui
    }

    pub fn gui_mut(&mut self) -> &mut Gui {
        &mut self.gui
    }

    /// `ctrl+c` always quits; the configured quit key only while no field is
    /// being edited. Every other event goes to the controller.
    pub fn handle(&mut self, event: InputEvent) -> Flow {
        match event {
            InputEvent::Key(token) => {
                if token == key::CTRL_C {
                    return Flow::Quit;
                }
                let consumed = self.gui.send_key(&token);
                if !consumed && token == self.gui.config().quit_key {
                    return Flow::Quit;
                }
                Flow::Continue
            }
            other => {
                self.gui.handle_event(other);
                Flow::Continue
            }
        }
    }

    pub fn view(&mut self, app: &mut impl App) -> String {
        self.gui.frame(|gui| app.render(gui))
    }
}

/// Drive `app` on `backend` until a quit key arrives. The backend is always
/// shut down, even when the loop fails.
pub fn run<A, B>(app: &mut A, backend: &mut B, config: GuiConfig) -> Result<(), GuiError>
where
    A: App,
    B: TerminalBackend,
{
    backend.init()?;
    info!("gui session started");
    let result = event_loop(app, backend, config);
    let shutdown = backend.shutdown();
    info!(ok = result.is_ok(), "gui session ended");
    result.and(shutdown)
}

fn event_loop<A, B>(app: &mut A, backend: &mut B, config: GuiConfig) -> Result<(), GuiError>
where
    A: App,
    B: TerminalBackend,
{
    let timeout = config.poll_timeout_ms;
    let (width, height) = backend.size();
    let mut runner = Runner::new(width, height, config);
    backend.write_frame(&runner.view(app))?;

    loop {
        let events = backend.read_events(timeout)?;
        if events.is_empty() {
            continue;
        }
        debug!(count = events.len(), "event batch");
        for event in events {
            if runner.handle(event) == Flow::Quit {
                return Ok(());
            }
        }
        backend.write_frame(&runner.view(app))?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::HeadlessBackend;
    use crate::types::PointerEvent;

    struct Counter {
        presses: u32,
    }

    impl App for Counter {
        fn render(&mut self, gui: &mut Gui) {
            if gui.button("Add") {
                self.presses += 1;
            }
            gui.text(&format!("count {}", self.presses));
        }
    }

    #[test]
    fn test_run_renders_until_quit() {
        let mut backend = HeadlessBackend::new(20, 6);
        backend.push_batch(vec![InputEvent::Pointer(PointerEvent::press(2, 1))]);
        backend.push_batch(vec![InputEvent::Key("q".to_string())]);

        let mut app = Counter { presses: 0 };
        run(&mut app, &mut backend, GuiConfig::default()).unwrap();

        assert_eq!(app.presses, 1);
        assert_eq!(backend.frames.len(), 2);
        assert!(backend.frames[1].contains("count 1"));
        assert!(backend.initialized && backend.shut_down);
    }

    #[test]
    fn test_quit_key_is_text_while_editing() {
        let mut runner = Runner::new(30, 4, GuiConfig::default());
        let mut value = String::new();
        let mut app = |gui: &mut Gui| value = gui.input("Name", &value, 10).text;

        runner.handle(InputEvent::Pointer(PointerEvent::press(6, 1)));
        runner.view(&mut app);
        assert!(runner.gui().is_editing());

        assert_eq!(runner.handle(InputEvent::Key("q".to_string())), Flow::Continue);
        runner.view(&mut app);
        assert_eq!(
            runner.handle(InputEvent::Key(key::CTRL_C.to_string())),
            Flow::Quit
        );
        drop(app);
        assert_eq!(value, "q");
    }

    #[test]
    fn test_custom_quit_key() {
        let config = GuiConfig {
            quit_key: "x".to_string(),
            ..GuiConfig::default()
        };
        let mut runner = Runner::new(10, 4, config);
        assert_eq!(runner.handle(InputEvent::Key("q".to_string())), Flow::Continue);
        assert_eq!(runner.handle(InputEvent::Key("x".to_string())), Flow::Quit);
    }

    #[test]
    fn test_resize_event_rebuilds_gui() {
        let mut runner = Runner::new(10, 4, GuiConfig::default());
        runner.handle(InputEvent::Resize {
            width: 50,
            height: 20,
        });
        assert_eq!(runner.gui().size(), (50, 20));
        let frame = runner.view(&mut |gui: &mut Gui| gui.text("hi"));
        assert_eq!(frame.lines().count(), 19);
    }
}
