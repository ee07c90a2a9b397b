//! Input sources
//!
//! The line editor pulls discrete events from an `InputSource`. Each event is
//! a chunk of text; control keys arrive as the raw bytes a terminal in raw
//! mode would send (Ctrl-C as 0x03, Enter as CR, Backspace as DEL).

use std::collections::VecDeque;
use std::io::{self, IsTerminal};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use super::escape::key;

/// Capabilities the line editor needs from its input
pub trait InputSource {
    /// Whether `set_raw_mode` can actually switch modes
    fn supports_raw_mode(&self) -> bool;

    /// Enter or leave raw (unbuffered, no local echo) mode
    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()>;

    /// Start delivering events
    fn resume(&mut self) -> io::Result<()>;

    /// Stop delivering events
    fn pause(&mut self) -> io::Result<()>;

    /// Declare that events should be decoded as UTF-8 text
    fn set_utf8(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Block until the next event; `None` once the source is exhausted
    fn next_event(&mut self) -> io::Result<Option<String>>;
}

fn paused_error() -> io::Error {
    io::Error::new(io::ErrorKind::WouldBlock, "input source is paused")
}

/// Process stdin, read through crossterm's event stream
#[derive(Debug, Default)]
pub struct TerminalInput {
    listening: bool,
    raw: bool,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputSource for TerminalInput {
    fn supports_raw_mode(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            enable_raw_mode()?;
        } else {
            disable_raw_mode()?;
        }
        self.raw = enabled;
        Ok(())
    }

    fn resume(&mut self) -> io::Result<()> {
        self.listening = true;
        Ok(())
    }

    fn pause(&mut self) -> io::Result<()> {
        self.listening = false;
        Ok(())
    }

    fn next_event(&mut self) -> io::Result<Option<String>> {
        if !self.listening {
            return Err(paused_error());
        }
        loop {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if let Some(chunk) = encode_key(key) {
                        return Ok(Some(chunk));
                    }
                }
                Event::Paste(text) => return Ok(Some(text)),
                _ => {}
            }
        }
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        if self.raw {
            let _ = disable_raw_mode();
        }
    }
}

/// Encode a key event into the text a raw-mode terminal would deliver
///
/// Keys with no meaning on a single masked line (arrows, function keys) are
/// dropped.
fn encode_key(key: KeyEvent) -> Option<String> {
    let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let has_alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        // Windows reports AltGr as Ctrl+Alt; the character is already composed
        KeyCode::Char(c) if has_ctrl && has_alt => Some(c.to_string()),
        KeyCode::Char(c) if has_ctrl => key::ctrl(c).map(String::from),
        KeyCode::Char(_) if has_alt => None,
        KeyCode::Char(c) => Some(c.to_string()),
        KeyCode::Enter => Some(key::CR.to_string()),
        KeyCode::Backspace => Some(key::DEL.to_string()),
        KeyCode::Tab => Some("\t".to_string()),
        _ => None,
    }
}

/// In-memory source that replays a fixed list of events
///
/// Records every mode switch so callers can check the session restored the
/// source the way it found it.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    events: VecDeque<String>,
    raw_capable: bool,
    raw: bool,
    listening: bool,
    utf8: bool,
    raw_enables: usize,
    raw_disables: usize,
    resumes: usize,
    pauses: usize,
}

impl ScriptedInput {
    pub fn new<I, S>(events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            events: events.into_iter().map(Into::into).collect(),
            raw_capable: true,
            raw: false,
            listening: false,
            utf8: false,
            raw_enables: 0,
            raw_disables: 0,
            resumes: 0,
            pauses: 0,
        }
    }

    /// A source that cannot enter raw mode, like a pipe
    pub fn without_raw_mode(mut self) -> Self {
        self.raw_capable = false;
        self
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }

    pub fn is_raw(&self) -> bool {
        self.raw
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_utf8(&self) -> bool {
        self.utf8
    }

    pub fn raw_enables(&self) -> usize {
        self.raw_enables
    }

    pub fn raw_disables(&self) -> usize {
        self.raw_disables
    }

    pub fn resumes(&self) -> usize {
        self.resumes
    }

    pub fn pauses(&self) -> usize {
        self.pauses
    }
}

impl InputSource for ScriptedInput {
    fn supports_raw_mode(&self) -> bool {
        self.raw_capable
    }

    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()> {
        if !self.raw_capable {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "scripted input has no raw mode",
            ));
        }
        if enabled {
            self.raw_enables += 1;
        } else {
            self.raw_disables += 1;
        }
        self.raw = enabled;
        Ok(())
    }

    fn resume(&mut self) -> io::Result<()> {
        self.resumes += 1;
        self.listening = true;
        Ok(())
    }

    fn pause(&mut self) -> io::Result<()> {
        self.pauses += 1;
        self.listening = false;
        Ok(())
    }

    fn set_utf8(&mut self) -> io::Result<()> {
        self.utf8 = true;
        Ok(())
    }

    fn next_event(&mut self) -> io::Result<Option<String>> {
        if !self.listening {
            return Err(paused_error());
        }
        Ok(self.events.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_encode_control_keys() {
        assert_eq!(
            encode_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)).as_deref(),
            Some("\u{3}")
        );
        assert_eq!(
            encode_key(press(KeyCode::Char('d'), KeyModifiers::CONTROL)).as_deref(),
            Some("\u{4}")
        );
        assert_eq!(
            encode_key(press(KeyCode::Enter, KeyModifiers::NONE)).as_deref(),
            Some("\r")
        );
        assert_eq!(
            encode_key(press(KeyCode::Backspace, KeyModifiers::NONE)).as_deref(),
            Some("\u{7f}")
        );
    }

    #[test]
    fn test_encode_plain_and_shifted_chars() {
        assert_eq!(
            encode_key(press(KeyCode::Char('x'), KeyModifiers::NONE)).as_deref(),
            Some("x")
        );
        assert_eq!(
            encode_key(press(KeyCode::Char('X'), KeyModifiers::SHIFT)).as_deref(),
            Some("X")
        );
        assert_eq!(
            encode_key(press(KeyCode::Char('ß'), KeyModifiers::NONE)).as_deref(),
            Some("ß")
        );
    }

    #[test]
    fn test_ctrl_with_non_ascii_char_is_dropped() {
        let chunk = encode_key(press(KeyCode::Char('ä'), KeyModifiers::CONTROL));
        assert_eq!(chunk, None);
        assert_eq!(
            encode_key(press(KeyCode::Char('1'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_altgr_chars_inserted_verbatim() {
        let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;
        assert_eq!(
            encode_key(press(KeyCode::Char('@'), altgr)).as_deref(),
            Some("@")
        );
        assert_eq!(
            encode_key(press(KeyCode::Char('€'), altgr)).as_deref(),
            Some("€")
        );
    }

    #[test]
    fn test_navigation_keys_dropped() {
        assert_eq!(encode_key(press(KeyCode::Left, KeyModifiers::NONE)), None);
        assert_eq!(encode_key(press(KeyCode::Up, KeyModifiers::NONE)), None);
        assert_eq!(encode_key(press(KeyCode::F(1), KeyModifiers::NONE)), None);
        assert_eq!(
            encode_key(press(KeyCode::Char('b'), KeyModifiers::ALT)),
            None
        );
    }

    #[test]
    fn test_scripted_input_requires_resume() {
        let mut input = ScriptedInput::new(["a"]);
        assert!(input.next_event().is_err());
        input.resume().unwrap();
        assert_eq!(input.next_event().unwrap().as_deref(), Some("a"));
        assert_eq!(input.next_event().unwrap(), None);
    }

    #[test]
    fn test_scripted_input_counts_mode_switches() {
        let mut input = ScriptedInput::new(Vec::<String>::new());
        input.set_raw_mode(true).unwrap();
        input.set_raw_mode(false).unwrap();
        assert_eq!(input.raw_enables(), 1);
        assert_eq!(input.raw_disables(), 1);
        assert!(!input.is_raw());
    }

    #[test]
    fn test_scripted_input_without_raw_mode() {
        let mut input = ScriptedInput::new(["a"]).without_raw_mode();
        assert!(!input.supports_raw_mode());
        assert!(input.set_raw_mode(true).is_err());
    }
}
