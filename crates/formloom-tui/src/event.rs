#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! The runtime converts every crossterm event into these types before the
//! model sees it, so application code and headless tests never touch
//! crossterm directly.
//!
//! - Mouse coordinates are 0-indexed
//! - `KeyEventKind` defaults to `Press` when not available from the terminal
//! - `Modifiers` use bitflags for easy combination

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A mouse event.
    Mouse(MouseEvent),

    /// Terminal was resized.
    Resize {
        /// New terminal width in columns.
        width: u16,
        /// New terminal height in rows.
        height: u16,
    },

    /// Paste event (from bracketed paste mode).
    Paste(PasteEvent),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Alt modifier is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    /// Shift+Tab (back-tab).
    BackTab,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    /// Function key (F1-F24).
    F(u8),
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// The type of mouse event.
    pub kind: MouseEventKind,

    /// X coordinate (0-indexed, leftmost column is 0).
    pub x: u16,

    /// Y coordinate (0-indexed, topmost row is 0).
    pub y: u16,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a new mouse event.
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }
}

/// The type of mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Mouse button pressed down.
    Down(MouseButton),

    /// Mouse button released.
    Up(MouseButton),

    /// Mouse dragged while button held.
    Drag(MouseButton),

    /// Mouse moved (no button pressed).
    Moved,

    /// Mouse wheel scrolled up.
    ScrollUp,

    /// Mouse wheel scrolled down.
    ScrollDown,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A paste event from bracketed paste mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteEvent {
    /// The pasted text content.
    pub text: String,
}

impl PasteEvent {
    /// Create a new paste event.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

// ─── Crossterm mapping ───────────────────────────────────────────────────────

impl Event {
    /// Map a crossterm event onto the canonical types.
    ///
    /// Returns `None` for events with no canonical representation
    /// (media keys, modifier-only presses, horizontal scroll).
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        use crossterm::event as ct;

        match event {
            ct::Event::Key(key) => {
                let code = map_key_code(key.code)?;
                let kind = match key.kind {
                    ct::KeyEventKind::Press => KeyEventKind::Press,
                    ct::KeyEventKind::Repeat => KeyEventKind::Repeat,
                    ct::KeyEventKind::Release => KeyEventKind::Release,
                };
                Some(Event::Key(KeyEvent {
                    code,
                    modifiers: map_modifiers(key.modifiers),
                    kind,
                }))
            }
            ct::Event::Mouse(mouse) => {
                let kind = match mouse.kind {
                    ct::MouseEventKind::Down(b) => MouseEventKind::Down(map_button(b)),
                    ct::MouseEventKind::Up(b) => MouseEventKind::Up(map_button(b)),
                    ct::MouseEventKind::Drag(b) => MouseEventKind::Drag(map_button(b)),
                    ct::MouseEventKind::Moved => MouseEventKind::Moved,
                    ct::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
                    ct::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
                    ct::MouseEventKind::ScrollLeft | ct::MouseEventKind::ScrollRight => {
                        return None;
                    }
                };
                Some(Event::Mouse(MouseEvent {
                    kind,
                    x: mouse.column,
                    y: mouse.row,
                    modifiers: map_modifiers(mouse.modifiers),
                }))
            }
            ct::Event::Resize(width, height) => Some(Event::Resize { width, height }),
            ct::Event::Paste(text) => Some(Event::Paste(PasteEvent::new(text))),
            // Focus reporting is never enabled.
            ct::Event::FocusGained | ct::Event::FocusLost => None,
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }
}

fn map_key_code(code: crossterm::event::KeyCode) -> Option<KeyCode> {
    use crossterm::event::KeyCode as Ct;

    Some(match code {
        Ct::Char(c) => KeyCode::Char(c),
        Ct::Enter => KeyCode::Enter,
        Ct::Esc => KeyCode::Escape,
        Ct::Backspace => KeyCode::Backspace,
        Ct::Tab => KeyCode::Tab,
        Ct::BackTab => KeyCode::BackTab,
        Ct::Delete => KeyCode::Delete,
        Ct::Insert => KeyCode::Insert,
        Ct::Home => KeyCode::Home,
        Ct::End => KeyCode::End,
        Ct::PageUp => KeyCode::PageUp,
        Ct::PageDown => KeyCode::PageDown,
        Ct::Up => KeyCode::Up,
        Ct::Down => KeyCode::Down,
        Ct::Left => KeyCode::Left,
        Ct::Right => KeyCode::Right,
        Ct::F(n) => KeyCode::F(n),
        _ => return None,
    })
}

fn map_modifiers(modifiers: crossterm::event::KeyModifiers) -> Modifiers {
    use crossterm::event::KeyModifiers as Ct;

    let mut out = Modifiers::NONE;
    if modifiers.contains(Ct::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if modifiers.contains(Ct::ALT) {
        out |= Modifiers::ALT;
    }
    if modifiers.contains(Ct::CONTROL) {
        out |= Modifiers::CTRL;
    }
    if modifiers.contains(Ct::SUPER) || modifiers.contains(Ct::META) {
        out |= Modifiers::SUPER;
    }
    out
}

fn map_button(button: crossterm::event::MouseButton) -> MouseButton {
    match button {
        crossterm::event::MouseButton::Left => MouseButton::Left,
        crossterm::event::MouseButton::Right => MouseButton::Right,
        crossterm::event::MouseButton::Middle => MouseButton::Middle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event as ct;

    #[test]
    fn key_event_modifiers() {
        let event = KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL);
        assert!(event.ctrl());
        assert!(!event.alt());
        assert!(!event.shift());
        assert!(event.is_char('c'));
    }

    #[test]
    fn key_event_kind_default() {
        assert_eq!(KeyEventKind::default(), KeyEventKind::Press);
        let release = KeyEvent::new(KeyCode::Enter).with_kind(KeyEventKind::Release);
        assert_eq!(release.kind, KeyEventKind::Release);
    }

    #[test]
    fn maps_crossterm_keys() {
        let ct_event = ct::Event::Key(ct::KeyEvent::new(
            ct::KeyCode::Char('K'),
            ct::KeyModifiers::SHIFT,
        ));
        let event = Event::from_crossterm(ct_event).expect("should map");
        assert_eq!(
            event,
            Event::Key(KeyEvent::new(KeyCode::Char('K')).with_modifiers(Modifiers::SHIFT))
        );

        let esc = Event::from_crossterm(ct::Event::Key(ct::KeyEvent::new(
            ct::KeyCode::Esc,
            ct::KeyModifiers::NONE,
        )));
        assert_eq!(esc, Some(Event::Key(KeyEvent::new(KeyCode::Escape))));
    }

    #[test]
    fn maps_crossterm_mouse() {
        let ct_event = ct::Event::Mouse(ct::MouseEvent {
            kind: ct::MouseEventKind::Drag(ct::MouseButton::Left),
            column: 7,
            row: 3,
            modifiers: ct::KeyModifiers::NONE,
        });
        let event = Event::from_crossterm(ct_event).expect("should map");
        assert_eq!(
            event,
            Event::Mouse(MouseEvent::new(
                MouseEventKind::Drag(MouseButton::Left),
                7,
                3
            ))
        );
    }

    #[test]
    fn unmappable_events_are_dropped() {
        let media = ct::Event::Key(ct::KeyEvent::new(
            ct::KeyCode::CapsLock,
            ct::KeyModifiers::NONE,
        ));
        assert_eq!(Event::from_crossterm(media), None);
    }

    #[test]
    fn maps_resize_paste_and_focus() {
        assert_eq!(
            Event::from_crossterm(ct::Event::Resize(80, 24)),
            Some(Event::Resize {
                width: 80,
                height: 24
            })
        );
        assert_eq!(
            Event::from_crossterm(ct::Event::Paste("hi".into())),
            Some(Event::Paste(PasteEvent::new("hi")))
        );
        assert_eq!(Event::from_crossterm(ct::Event::FocusLost), None);
    }
}
