#![forbid(unsafe_code)]

//! Terminal session lifecycle guard.
//!
//! [`TerminalSession`] enters raw mode, switches on the requested
//! [`TerminalMode`]s and undoes all of it in reverse order on drop. A panic
//! hook and, on Unix, a SIGINT/SIGTERM watcher run the same restore on exit
//! paths that skip destructors.
//!
//! | mode | enable | disable |
//! |------|--------|---------|
//! | alternate screen | `CSI ? 1049 h`, clear, home | `CSI ? 1049 l` |
//! | mouse (button tracking, SGR) | `CSI ? 1002 h CSI ? 1006 h` | `CSI ? 1002 l CSI ? 1006 l` |
//! | bracketed paste | `CSI ? 2004 h` | `CSI ? 2004 l` |

use std::env;
use std::io::{self, Write};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::event::Event;

/// Ends a synchronized update and resets the scroll region; harmless when
/// neither is active.
const RESET_PREAMBLE: &[u8] = b"\x1b[?2026l\x1b[r";
const SHOW_CURSOR: &[u8] = b"\x1b[?25h";

static SESSION_ACTIVE: AtomicBool = AtomicBool::new(false);

/// A terminal feature the session switches on and must switch off again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalMode {
    AlternateScreen,
    Mouse,
    BracketedPaste,
}

impl TerminalMode {
    /// Every mode, in the order they are enabled.
    const ALL: [Self; 3] = [Self::AlternateScreen, Self::Mouse, Self::BracketedPaste];

    fn enable_seq(self) -> &'static [u8] {
        match self {
            Self::AlternateScreen => b"\x1b[?1049h\x1b[2J\x1b[H",
            Self::Mouse => b"\x1b[?1002h\x1b[?1006h",
            Self::BracketedPaste => b"\x1b[?2004h",
        }
    }

    fn disable_seq(self) -> &'static [u8] {
        match self {
            Self::AlternateScreen => b"\x1b[?1049l",
            Self::Mouse => b"\x1b[?1002l\x1b[?1006l",
            Self::BracketedPaste => b"\x1b[?2004l",
        }
    }
}

/// Which modes a session turns on. All `false` gives an inline raw session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub alternate_screen: bool,
    pub mouse_capture: bool,
    /// Deliver pastes as one [`Event::Paste`] instead of a burst of keys.
    pub bracketed_paste: bool,
}

impl SessionOptions {
    /// Requested modes in enable order.
    pub fn modes(&self) -> Vec<TerminalMode> {
        TerminalMode::ALL
            .into_iter()
            .filter(|mode| match mode {
                TerminalMode::AlternateScreen => self.alternate_screen,
                TerminalMode::Mouse => self.mouse_capture,
                TerminalMode::BracketedPaste => self.bracketed_paste,
            })
            .collect()
    }
}

/// Write the enable sequences for `modes`, front to back.
fn write_enable(out: &mut impl Write, modes: &[TerminalMode]) -> io::Result<()> {
    for mode in modes {
        out.write_all(mode.enable_seq())?;
    }
    out.flush()
}

/// Write the restore sequence for `modes`: back to front, cursor shown
/// before the alternate screen is left.
fn write_restore(out: &mut impl Write, modes: &[TerminalMode]) -> io::Result<()> {
    out.write_all(RESET_PREAMBLE)?;
    for mode in modes.iter().rev() {
        if *mode == TerminalMode::AlternateScreen {
            out.write_all(SHOW_CURSOR)?;
        }
        out.write_all(mode.disable_seq())?;
    }
    out.write_all(SHOW_CURSOR)?;
    out.flush()
}

/// Exclusive claim on the terminal, released on drop.
#[derive(Debug)]
struct SessionClaim;

impl SessionClaim {
    fn acquire() -> io::Result<Self> {
        SESSION_ACTIVE
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| Self)
            .map_err(|_| io::Error::other("a terminal session is already active"))
    }
}

impl Drop for SessionClaim {
    fn drop(&mut self) {
        SESSION_ACTIVE.store(false, Ordering::SeqCst);
    }
}

/// Raw-mode terminal with the requested modes switched on.
///
/// Only one session may exist per process.
#[derive(Debug)]
pub struct TerminalSession {
    enabled: Vec<TerminalMode>,
    #[cfg(unix)]
    signals: Option<SignalWatcher>,
    claim: Option<SessionClaim>,
}

impl TerminalSession {
    /// # Errors
    ///
    /// Fails if another session is active or the terminal refuses raw mode.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();
        let claim = SessionClaim::acquire()?;

        // Started before raw mode so a failure leaves the terminal untouched.
        #[cfg(unix)]
        let signals = Some(SignalWatcher::spawn()?);

        crossterm::terminal::enable_raw_mode()?;
        let mut session = Self {
            enabled: Vec::new(),
            #[cfg(unix)]
            signals,
            claim: Some(claim),
        };

        let modes = options.modes();
        write_enable(&mut io::stdout(), &modes)?;
        session.enabled = modes;
        #[cfg(feature = "tracing")]
        tracing::info!(modes = ?session.enabled, "terminal session started");

        Ok(session)
    }

    /// Terminal size as (columns, rows).
    ///
    /// Some terminals report 1x1 right after startup; `COLUMNS`/`LINES` and a
    /// short retry cover that.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        let usable = |(w, h): (u16, u16)| w > 1 && h > 1;

        let first = crossterm::terminal::size()?;
        if usable(first) {
            return Ok(first);
        }
        if let Some(size) = size_from_env() {
            return Ok(size);
        }
        std::thread::sleep(Duration::from_millis(10));
        let second = crossterm::terminal::size()?;
        if usable(second) {
            return Ok(second);
        }
        Ok((first.0.max(2), first.1.max(2)))
    }

    /// `Ok(true)` when an event is ready within `timeout`.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    /// Block for the next event. `Ok(None)` for events with no canonical form.
    pub fn read_event(&self) -> io::Result<Option<Event>> {
        Ok(Event::from_crossterm(crossterm::event::read()?))
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        #[cfg(unix)]
        drop(self.signals.take());

        let _ = write_restore(&mut io::stdout(), &self.enabled);
        let _ = crossterm::terminal::disable_raw_mode();
        #[cfg(feature = "tracing")]
        tracing::info!(modes = ?self.enabled, "terminal session restored");
        self.enabled.clear();

        // The claim goes last so a new session never sees a half-restored terminal.
        drop(self.claim.take());
    }
}

fn size_from_env() -> Option<(u16, u16)> {
    let cols = env::var("COLUMNS").ok()?.parse::<u16>().ok()?;
    let rows = env::var("LINES").ok()?.parse::<u16>().ok()?;
    (cols > 1 && rows > 1).then_some((cols, rows))
}

/// Restore every mode regardless of what was enabled.
fn restore_all() {
    let _ = write_restore(&mut io::stdout(), &TerminalMode::ALL);
    let _ = crossterm::terminal::disable_raw_mode();
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_all();
            previous(info);
        }));
    });
}

#[cfg(unix)]
#[derive(Debug)]
struct SignalWatcher {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalWatcher {
    fn spawn() -> io::Result<Self> {
        use signal_hook::consts::signal::{SIGINT, SIGTERM};

        let mut signals =
            signal_hook::iterator::Signals::new([SIGINT, SIGTERM]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                #[cfg(feature = "tracing")]
                tracing::warn!(signal, "terminated by signal, restoring terminal");
                restore_all();
                std::process::exit(128 + signal);
            }
        });
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalWatcher {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_select_modes_in_enable_order() {
        assert!(SessionOptions::default().modes().is_empty());
        let all = SessionOptions {
            alternate_screen: true,
            mouse_capture: true,
            bracketed_paste: true,
        };
        assert_eq!(all.modes(), TerminalMode::ALL);
        let paste_only = SessionOptions {
            bracketed_paste: true,
            ..Default::default()
        };
        assert_eq!(paste_only.modes(), [TerminalMode::BracketedPaste]);
    }

    #[test]
    fn enable_writes_each_mode_once() {
        let mut out = Vec::new();
        write_enable(&mut out, &[TerminalMode::Mouse, TerminalMode::BracketedPaste]).unwrap();
        assert_eq!(out, b"\x1b[?1002h\x1b[?1006h\x1b[?2004h");
    }

    #[test]
    fn restore_runs_in_reverse_and_shows_cursor() {
        let mut out = Vec::new();
        write_restore(&mut out, &TerminalMode::ALL).unwrap();
        let text = String::from_utf8(out).unwrap();

        let paste = text.find("\x1b[?2004l").unwrap();
        let mouse = text.find("\x1b[?1002l").unwrap();
        let alt = text.find("\x1b[?1049l").unwrap();
        let cursor = text.find("\x1b[?25h").unwrap();
        assert!(text.starts_with("\x1b[?2026l\x1b[r"));
        assert!(paste < mouse && mouse < cursor && cursor < alt);
    }

    #[test]
    fn restore_with_nothing_enabled_only_resets() {
        let mut out = Vec::new();
        write_restore(&mut out, &[]).unwrap();
        assert_eq!(out, b"\x1b[?2026l\x1b[r\x1b[?25h");
    }

    #[test]
    fn session_claim_is_exclusive_and_released_on_drop() {
        let first = SessionClaim::acquire().expect("first claim");
        let err = SessionClaim::acquire().expect_err("second claim must fail");
        assert!(err.to_string().contains("already active"));
        drop(first);
        drop(SessionClaim::acquire().expect("claim after release"));
    }
}
