#![forbid(unsafe_code)]

//! Headless program execution for testing.
//!
//! [`ProgramSimulator`] runs a [`Model`] without a terminal. Events are
//! injected directly, commands are executed and recorded, and frames are
//! rendered on demand into in-memory buffers.
//!
//! # Example
//!
//! ```
//! use formloom_tui::event::Event;
//! use formloom_tui::frame::Frame;
//! use formloom_tui::program::{Cmd, Model};
//! use formloom_tui::simulator::ProgramSimulator;
//!
//! struct Hello;
//!
//! impl Model for Hello {
//!     type Message = Event;
//!     fn update(&mut self, _msg: Event) -> Cmd {
//!         Cmd::quit()
//!     }
//!     fn view(&self, frame: &mut Frame) {
//!         frame.buffer.set_string(0, 0, "hello", Default::default(), frame.width());
//!     }
//! }
//!
//! let mut sim = ProgramSimulator::new(Hello);
//! assert_eq!(sim.capture_frame(8, 1).to_text(), "hello");
//! ```

use crate::buffer::Buffer;
use crate::event::Event;
use crate::frame::{Frame, HitData, HitId, HitRegion};
use crate::program::{Cmd, Model};

/// Headless runner for a [`Model`].
pub struct ProgramSimulator<M: Model> {
    model: M,
    running: bool,
    last_frame: Option<Frame>,
    clipboard: Vec<String>,
    command_log: Vec<Cmd>,
}

impl<M: Model> ProgramSimulator<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            running: true,
            last_frame: None,
            clipboard: Vec::new(),
            command_log: Vec::new(),
        }
    }

    /// Deliver a message directly to the model.
    ///
    /// Ignored once the program has quit.
    pub fn send(&mut self, msg: M::Message) {
        if !self.running {
            return;
        }
        let cmd = self.model.update(msg);
        self.execute_cmd(cmd);
    }

    /// Deliver a terminal event, converted through `From<Event>`.
    pub fn inject_event(&mut self, event: Event) {
        self.send(M::Message::from(event));
    }

    pub fn inject_events(&mut self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.inject_event(event);
        }
    }

    /// Render the model at the given size and keep the result.
    ///
    /// Mouse input in the real runtime always lands on a frame that was just
    /// drawn; call this before injecting clicks.
    pub fn capture_frame(&mut self, width: u16, height: u16) -> &Buffer {
        let mut frame = Frame::new(width, height);
        self.model.view(&mut frame);
        &self.last_frame.insert(frame).buffer
    }

    /// Hit-test against the last captured frame.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        self.last_frame.as_ref().and_then(|f| f.hit_test(x, y))
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Text written via `Cmd::SetClipboard`, oldest first.
    pub fn clipboard(&self) -> &[String] {
        &self.clipboard
    }

    /// Every command returned by `update`, oldest first.
    pub fn command_log(&self) -> &[Cmd] {
        &self.command_log
    }

    fn execute_cmd(&mut self, cmd: Cmd) {
        match &cmd {
            Cmd::None => {}
            Cmd::Quit => self.running = false,
            Cmd::SetClipboard(text) => self.clipboard.push(text.clone()),
        }
        self.command_log.push(cmd);
    }
}
