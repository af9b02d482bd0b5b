#![forbid(unsafe_code)]

//! Elm-style runtime for terminal applications.
//!
//! The program runtime manages the update/view loop, handling events and
//! rendering frames. It separates state (Model) from rendering (View) and
//! returns side effects as [`Cmd`] values.
//!
//! # Example
//!
//! ```
//! use formloom_tui::event::Event;
//! use formloom_tui::frame::Frame;
//! use formloom_tui::program::{Cmd, Model};
//!
//! struct Counter {
//!     count: i32,
//! }
//!
//! enum Msg {
//!     Increment,
//!     Quit,
//!     Ignore,
//! }
//!
//! impl From<Event> for Msg {
//!     fn from(event: Event) -> Self {
//!         match event {
//!             Event::Key(k) if k.is_char('q') => Msg::Quit,
//!             Event::Key(k) if k.is_char('+') => Msg::Increment,
//!             _ => Msg::Ignore,
//!         }
//!     }
//! }
//!
//! impl Model for Counter {
//!     type Message = Msg;
//!
//!     fn update(&mut self, msg: Msg) -> Cmd {
//!         match msg {
//!             Msg::Increment => {
//!                 self.count += 1;
//!                 Cmd::none()
//!             }
//!             Msg::Quit => Cmd::quit(),
//!             Msg::Ignore => Cmd::none(),
//!         }
//!     }
//!
//!     fn view(&self, frame: &mut Frame) {
//!         let text = format!("count: {}", self.count);
//!         frame.buffer.set_string(0, 0, &text, Default::default(), frame.width());
//!     }
//! }
//! ```

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;

use crate::clipboard::write_osc52;
use crate::event::Event;
use crate::frame::Frame;
use crate::presenter::Presenter;
use crate::terminal_session::{SessionOptions, TerminalSession};

/// The Model trait defines application state and behavior.
pub trait Model: Sized {
    /// Messages represent actions that update the model state.
    /// Must be convertible from terminal events.
    type Message: From<Event>;

    /// Update the model in response to a message.
    fn update(&mut self, msg: Self::Message) -> Cmd;

    /// Render the current state to a frame.
    fn view(&self, frame: &mut Frame);
}

/// Side effects returned from [`Model::update`] for the runtime to perform.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cmd {
    /// No operation.
    #[default]
    None,
    /// Quit the application.
    Quit,
    /// Place text on the system clipboard (OSC 52).
    SetClipboard(String),
}

impl Cmd {
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    #[inline]
    pub fn set_clipboard(text: impl Into<String>) -> Self {
        Self::SetClipboard(text.into())
    }
}

/// Where the UI is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenMode {
    /// Full screen on the alternate buffer.
    AltScreen,
    /// A fixed number of rows at the bottom of the normal screen, leaving
    /// scrollback intact.
    Inline { ui_height: u16 },
}

/// Configuration for the program runtime.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    pub screen_mode: ScreenMode,
    /// Input poll timeout.
    pub poll_timeout: Duration,
    pub mouse: bool,
    pub bracketed_paste: bool,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            screen_mode: ScreenMode::Inline { ui_height: 4 },
            poll_timeout: Duration::from_millis(100),
            mouse: false,
            bracketed_paste: true,
        }
    }
}

impl ProgramConfig {
    /// Config for fullscreen applications.
    pub fn fullscreen() -> Self {
        Self {
            screen_mode: ScreenMode::AltScreen,
            ..Default::default()
        }
    }

    /// Config for inline mode with the given height.
    pub fn inline(height: u16) -> Self {
        Self {
            screen_mode: ScreenMode::Inline { ui_height: height },
            ..Default::default()
        }
    }

    pub fn with_mouse(mut self) -> Self {
        self.mouse = true;
        self
    }

    pub(crate) fn session_options(&self) -> SessionOptions {
        SessionOptions {
            alternate_screen: self.screen_mode == ScreenMode::AltScreen,
            mouse_capture: self.mouse,
            bracketed_paste: self.bracketed_paste,
        }
    }
}

/// Frame size and top row for a terminal of `term` size.
pub(crate) fn ui_area(mode: ScreenMode, term: (u16, u16)) -> (u16, u16, u16) {
    let (width, height) = term;
    match mode {
        ScreenMode::AltScreen => (width, height, 0),
        ScreenMode::Inline { ui_height } => {
            let h = ui_height.clamp(1, height.max(1));
            (width, h, height.saturating_sub(h))
        }
    }
}

/// The program runtime that manages the update/view loop.
pub struct Program<M: Model> {
    model: M,
    config: ProgramConfig,
    presenter: Presenter<Stdout>,
    running: bool,
    dirty: bool,
    term_size: (u16, u16),
}

impl<M: Model> Program<M> {
    pub fn with_config(model: M, config: ProgramConfig) -> Self {
        Self {
            model,
            config,
            presenter: Presenter::new(io::stdout()),
            running: true,
            dirty: true,
            term_size: (80, 24),
        }
    }

    /// Run the main event loop until the model quits.
    ///
    /// The terminal is restored before this returns, on success or error.
    pub fn run(&mut self) -> io::Result<()> {
        let session = TerminalSession::new(self.config.session_options())?;
        self.term_size = session.size()?;
        #[cfg(feature = "tracing")]
        tracing::info!(
            width = self.term_size.0,
            height = self.term_size.1,
            mode = ?self.config.screen_mode,
            "program started"
        );

        if let ScreenMode::Inline { .. } = self.config.screen_mode {
            self.reserve_inline_rows()?;
        }

        while self.running {
            if self.dirty {
                self.render_frame()?;
            }
            if session.poll_event(self.config.poll_timeout)? {
                if let Some(event) = session.read_event()? {
                    self.handle_event(event)?;
                }
            }
        }

        if let ScreenMode::Inline { .. } = self.config.screen_mode {
            let out = self.presenter.writer_mut();
            crossterm::queue!(out, MoveTo(0, self.term_size.1.saturating_sub(1)))?;
            out.write_all(b"\r\n")?;
            out.flush()?;
        }
        drop(session);

        #[cfg(feature = "tracing")]
        tracing::info!("program stopped");
        Ok(())
    }

    fn reserve_inline_rows(&mut self) -> io::Result<()> {
        let (_, h, top) = ui_area(self.config.screen_mode, self.term_size);
        let out = self.presenter.writer_mut();
        for _ in 0..h {
            out.write_all(b"\r\n")?;
        }
        out.flush()?;
        self.presenter.set_origin(top);
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        if let Event::Resize { width, height } = event {
            self.term_size = (width.max(2), height.max(2));
            let (_, _, top) = ui_area(self.config.screen_mode, self.term_size);
            self.presenter.set_origin(top);
            self.presenter.invalidate();
            #[cfg(feature = "tracing")]
            tracing::debug!(width, height, "resize");
        }
        let cmd = self.model.update(M::Message::from(event));
        self.dirty = true;
        self.execute_cmd(cmd)
    }

    fn execute_cmd(&mut self, cmd: Cmd) -> io::Result<()> {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.running = false,
            Cmd::SetClipboard(text) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(bytes = text.len(), "clipboard write");
                write_osc52(self.presenter.writer_mut(), &text)?;
            }
        }
        Ok(())
    }

    fn render_frame(&mut self) -> io::Result<()> {
        let (width, height, _) = ui_area(self.config.screen_mode, self.term_size);
        let mut frame = Frame::new(width, height);
        self.model.view(&mut frame);
        self.presenter.present(&frame)?;
        self.dirty = false;
        Ok(())
    }

    /// Consume the program, returning the model.
    pub fn into_model(self) -> M {
        self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmd_constructors() {
        assert_eq!(Cmd::none(), Cmd::None);
        assert_eq!(Cmd::default(), Cmd::None);
        assert_eq!(Cmd::quit(), Cmd::Quit);
        assert_eq!(Cmd::set_clipboard("x"), Cmd::SetClipboard("x".into()));
    }

    #[test]
    fn program_config_defaults() {
        let config = ProgramConfig::default();
        assert!(matches!(config.screen_mode, ScreenMode::Inline { .. }));
        assert!(!config.mouse);
        assert!(config.bracketed_paste);
        assert_eq!(config.poll_timeout, Duration::from_millis(100));
    }

    #[test]
    fn fullscreen_session_uses_alt_screen() {
        let opts = ProgramConfig::fullscreen().with_mouse().session_options();
        assert!(opts.alternate_screen);
        assert!(opts.mouse_capture);
        assert!(opts.bracketed_paste);
        assert!(!ProgramConfig::inline(6).session_options().alternate_screen);
    }

    #[test]
    fn ui_area_per_mode() {
        assert_eq!(ui_area(ScreenMode::AltScreen, (80, 24)), (80, 24, 0));
        assert_eq!(
            ui_area(ScreenMode::Inline { ui_height: 10 }, (80, 24)),
            (80, 10, 14)
        );
        // Taller than the terminal clamps to the terminal.
        assert_eq!(
            ui_area(ScreenMode::Inline { ui_height: 50 }, (80, 24)),
            (80, 24, 0)
        );
    }
}
