#![forbid(unsafe_code)]

//! Clipboard writes through the OSC 52 escape sequence.
//!
//! OSC 52 lets a program set the terminal's selection clipboard without any
//! platform clipboard library. Support varies by terminal; the sequence is
//! ignored where unsupported.

use std::io::{self, Write};

use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Selection target for the clipboard (`c`).
const CLIPBOARD_SELECTION: &str = "c";

/// Build the OSC 52 sequence that places `text` on the system clipboard.
///
/// ```
/// use formloom_tui::clipboard::osc52_sequence;
///
/// assert_eq!(osc52_sequence("Hi"), "\x1b]52;c;SGk=\x07");
/// ```
pub fn osc52_sequence(text: &str) -> String {
    format!(
        "\x1b]52;{CLIPBOARD_SELECTION};{}\x07",
        STANDARD.encode(text.as_bytes())
    )
}

/// Write the OSC 52 sequence for `text` and flush.
pub fn write_osc52<W: Write>(writer: &mut W, text: &str) -> io::Result<()> {
    writer.write_all(osc52_sequence(text).as_bytes())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_payload_as_base64() {
        let seq = osc52_sequence("<form>");
        assert!(seq.starts_with("\x1b]52;c;"));
        assert!(seq.ends_with('\x07'));
        let payload = &seq["\x1b]52;c;".len()..seq.len() - 1];
        assert_eq!(STANDARD.decode(payload).unwrap(), b"<form>");
    }

    #[test]
    fn empty_text_is_valid() {
        assert_eq!(osc52_sequence(""), "\x1b]52;c;\x07");
    }

    #[test]
    fn write_emits_sequence() {
        let mut out = Vec::new();
        write_osc52(&mut out, "a").unwrap();
        assert_eq!(out, b"\x1b]52;c;YQ==\x07");
    }
}
