//! Running one prompt session against real streams

use std::io::{self, Write};

use tracing::{debug, warn};

use super::line_state::{LineState, Transition};
use super::render::{self, Render};
use crate::error::{PromptError, Result};
use crate::options::ResolvedOptions;
use crate::terminal::escape::key;
use crate::terminal::InputSource;

/// Owns raw mode and event delivery for the lifetime of a session
///
/// Teardown runs exactly once: through `release` on the normal paths, or from
/// `Drop` when an I/O error unwinds the event loop.
struct RawModeGuard<'a> {
    out: &'a mut dyn Write,
    input: &'a mut dyn InputSource,
    released: bool,
}

impl<'a> RawModeGuard<'a> {
    fn acquire(out: &'a mut dyn Write, input: &'a mut dyn InputSource) -> io::Result<Self> {
        input.resume()?;
        if let Err(e) = input.set_raw_mode(true) {
            let _ = input.pause();
            return Err(e);
        }
        Ok(Self {
            out,
            input,
            released: false,
        })
    }

    /// Newline and cursor-show, leave raw mode, stop delivery.
    ///
    /// Every step is attempted even if an earlier one fails; the first error
    /// is returned.
    fn release(&mut self) -> io::Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        let written = render::write_all(self.out, &[Render::Finish]);
        let mode = self.input.set_raw_mode(false);
        let paused = self.input.pause();
        written.and(mode).and(paused)
    }
}

impl Drop for RawModeGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!(error = %e, "failed to restore terminal after prompt");
        }
    }
}

/// Run a single line-editing session
///
/// Writes the prompt, switches `input` to raw mode, and feeds events through
/// a `LineState` until the line is submitted or interrupted. The terminal is
/// restored before this returns, on every path.
///
/// If the input runs dry the end of stream is treated as Ctrl-D, but it never
/// yields an empty line: with nothing typed and no default the result is
/// `PromptError::InputClosed`.
pub fn read_line(
    prompt: &str,
    out: &mut dyn Write,
    input: &mut dyn InputSource,
    options: &ResolvedOptions,
) -> Result<String> {
    if !input.supports_raw_mode() {
        return Err(PromptError::UnsupportedInput);
    }

    let mut state = LineState::new(options.clone());
    render::write_all(out, &state.start(prompt))?;

    let mut guard = RawModeGuard::acquire(out, input)?;
    debug!(
        mask = ?options.mask,
        required = options.required,
        has_default = options.default.is_some(),
        "prompt session started"
    );

    let outcome = loop {
        let (transition, renders) = match guard.input.next_event()? {
            Some(event) => state.apply(&event),
            None => match state.apply(&key::EOT.to_string()) {
                (Transition::Resolved(value), renders) if !value.is_empty() => {
                    (Transition::Resolved(value), renders)
                }
                _ => break Err(PromptError::InputClosed),
            },
        };
        render::write_all(guard.out, &renders)?;

        match transition {
            Transition::Continue => {}
            Transition::Resolved(value) => break Ok(value),
            Transition::Cancelled => break Err(PromptError::Interrupted),
        }
    };

    guard.release()?;

    match &outcome {
        Ok(_) => debug!("prompt session resolved"),
        Err(e) => debug!(error = %e, "prompt session ended without a value"),
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Mask, PromptOptions};
    use crate::terminal::ScriptedInput;

    fn run(events: &[&str], options: PromptOptions) -> (Result<String>, String, ScriptedInput) {
        let mut input = ScriptedInput::new(events.iter().copied());
        let mut out = Vec::new();
        let result = read_line("Password: ", &mut out, &mut input, &options.resolve());
        (result, String::from_utf8(out).unwrap(), input)
    }

    fn assert_restored(input: &ScriptedInput) {
        assert_eq!(input.raw_enables(), 1);
        assert_eq!(input.raw_disables(), 1);
        assert_eq!(input.resumes(), 1);
        assert_eq!(input.pauses(), 1);
        assert!(!input.is_raw());
        assert!(!input.is_listening());
    }

    #[test]
    fn test_full_render_protocol() {
        let (result, out, input) = run(
            &["p", "a", "s", "s", "\r"],
            PromptOptions::new().with_mask(Mask::Char('*')),
        );
        assert_eq!(result.unwrap(), "pass");
        assert_eq!(out, "\x1b[2K\x1b[GPassword: ****\n\x1b[?25h");
        assert_restored(&input);
    }

    #[test]
    fn test_hidden_mask_writes_only_prompt_and_teardown() {
        let (result, out, input) = run(&["a", "b", "\r"], PromptOptions::new().with_mask(Mask::Hidden));
        assert_eq!(result.unwrap(), "ab");
        assert_eq!(out, "\x1b[2K\x1b[GPassword: \n\x1b[?25h");
        assert_restored(&input);
    }

    #[test]
    fn test_interrupt_restores_terminal_once() {
        let (result, out, input) = run(&["a", "b", "\u{3}", "c"], PromptOptions::new());
        assert!(matches!(result, Err(PromptError::Interrupted)));
        assert!(out.ends_with("**\n\x1b[?25h"));
        assert_restored(&input);
        assert_eq!(input.remaining(), 1);
    }

    #[test]
    fn test_required_empty_submit_keeps_reading() {
        let (result, _, input) = run(&["\r", "x", "\r"], PromptOptions::new());
        assert_eq!(result.unwrap(), "x");
        assert_restored(&input);
    }

    #[test]
    fn test_extra_backspace_leaves_no_artifacts() {
        let (result, out, _) = run(
            &["a", "b", "\u{7f}", "\u{7f}", "\u{7f}", "\r"],
            PromptOptions::new().with_required(false),
        );
        assert_eq!(result.unwrap(), "");
        assert_eq!(
            out,
            "\x1b[2K\x1b[GPassword: **\x1b[1D\x1b[K\x1b[1D\x1b[K\n\x1b[?25h"
        );
    }

    #[test]
    fn test_unsupported_input_fails_before_any_output() {
        let mut input = ScriptedInput::new(["a", "\r"]).without_raw_mode();
        let mut out = Vec::new();
        let result = read_line("? ", &mut out, &mut input, &ResolvedOptions::default());
        assert!(matches!(result, Err(PromptError::UnsupportedInput)));
        assert!(out.is_empty());
        assert_eq!(input.resumes(), 0);
    }

    #[test]
    fn test_end_of_stream_submits() {
        let (result, _, input) = run(&["a", "b"], PromptOptions::new());
        assert_eq!(result.unwrap(), "ab");
        assert_restored(&input);
    }

    #[test]
    fn test_end_of_stream_with_empty_required_line() {
        let (result, out, input) = run(&[], PromptOptions::new());
        assert!(matches!(result, Err(PromptError::InputClosed)));
        assert!(out.ends_with("\n\x1b[?25h"));
        assert_restored(&input);
    }

    /// Sink that starts failing after a fixed number of writes
    struct FailingWriter {
        writes_left: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.writes_left == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.writes_left -= 1;
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_still_restores_mode() {
        let mut input = ScriptedInput::new(["a", "b", "\r"]);
        let mut out = FailingWriter { writes_left: 3 };
        let result = read_line("? ", &mut out, &mut input, &ResolvedOptions::default());
        assert!(matches!(result, Err(PromptError::Io(_))));
        assert_restored(&input);
    }
}
