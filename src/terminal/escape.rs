//! ANSI escape sequence constants and helpers
//!
//! Centralizes the handful of control sequences the line editor emits,
//! plus the raw key bytes it recognizes on input.

// === Line Control ===

/// Erase the entire current line (EL 2)
pub const ERASE_LINE: &str = "\x1b[2K";

/// Erase from the cursor to the end of the line (EL 0)
pub const ERASE_END_LINE: &str = "\x1b[K";

// === Cursor Control ===

/// Move cursor to the first column of the current line (CHA)
pub const CURSOR_LEFT: &str = "\x1b[G";

/// Make the cursor visible (DECTCEM set)
pub const CURSOR_SHOW: &str = "\x1b[?25h";

/// Move cursor back `n` columns (CUB)
#[inline]
pub fn cursor_backward(n: u16) -> String {
    format!("\x1b[{}D", n)
}

// === Key Bytes ===

pub mod key {
    /// End of transmission (Ctrl-D)
    pub const EOT: char = '\u{4}';

    /// End of text (Ctrl-C)
    pub const ETX: char = '\u{3}';

    /// Carriage return
    pub const CR: char = '\r';

    /// Line feed
    pub const LF: char = '\n';

    /// Delete/backspace (0x7f / 127)
    pub const DEL: char = '\u{7f}';

    /// Control character for Ctrl+`c`: Ctrl+c -> 0x03
    ///
    /// Only `@` through `_` and `a` through `z` have a control code; anything
    /// else gives `None`.
    #[inline]
    pub fn ctrl(c: char) -> Option<char> {
        match c {
            '@'..='_' | 'a'..='z' => Some(((c as u8) & 0x1f) as char),
            _ => None,
        }
    }
}
