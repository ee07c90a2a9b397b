//! Rendering as data
//!
//! The line state never touches the terminal directly. It returns a list of
//! `Render` steps which the session writes to the output sink in order.

use std::fmt;
use std::io::Write;

use crate::terminal::escape;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Render {
    /// Clear whatever is on the current line
    ErasePromptLine,
    /// Move to column 0
    CursorToLineStart,
    /// Literal text: the prompt or a masked echo
    Text(String),
    /// Step back one column
    CursorBack,
    /// Clear from the cursor to the end of the line
    EraseToLineEnd,
    /// Trailing newline and cursor-show on teardown
    Finish,
}

impl fmt::Display for Render {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Render::ErasePromptLine => f.write_str(escape::ERASE_LINE),
            Render::CursorToLineStart => f.write_str(escape::CURSOR_LEFT),
            Render::Text(text) => f.write_str(text),
            Render::CursorBack => f.write_str(&escape::cursor_backward(1)),
            Render::EraseToLineEnd => f.write_str(escape::ERASE_END_LINE),
            Render::Finish => write!(f, "\n{}", escape::CURSOR_SHOW),
        }
    }
}

/// Write a batch of render steps and flush once
pub fn write_all(out: &mut dyn Write, renders: &[Render]) -> std::io::Result<()> {
    if renders.is_empty() {
        return Ok(());
    }
    for render in renders {
        write!(out, "{}", render)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_sequences() {
        assert_eq!(Render::ErasePromptLine.to_string(), "\x1b[2K");
        assert_eq!(Render::CursorToLineStart.to_string(), "\x1b[G");
        assert_eq!(Render::CursorBack.to_string(), "\x1b[1D");
        assert_eq!(Render::EraseToLineEnd.to_string(), "\x1b[K");
        assert_eq!(Render::Finish.to_string(), "\n\x1b[?25h");
    }

    #[test]
    fn test_write_all_in_order() {
        let mut out = Vec::new();
        write_all(
            &mut out,
            &[Render::Text("a".into()), Render::CursorBack, Render::EraseToLineEnd],
        )
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\x1b[1D\x1b[K");
    }
}
