//! Line state machine
//!
//! `LineState` is the pure core of a prompt session: it takes one input event
//! at a time and answers with a transition plus the render steps that event
//! produces. No I/O happens here, so the whole editor can be driven from a
//! test with plain strings.

use tracing::trace;

use super::render::Render;
use crate::options::ResolvedOptions;
use crate::terminal::escape::key;

/// What an input event means to the editor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key<'a> {
    /// Ctrl-D, CR or LF
    Submit,
    /// Ctrl-C
    Interrupt,
    /// DEL
    Backspace,
    /// Anything else, appended verbatim
    Insert(&'a str),
}

impl<'a> Key<'a> {
    /// Classify one event as delivered by the input source
    ///
    /// Events are chunks: usually a single keystroke, but a paste or a fast
    /// typist can deliver several characters at once. Only an exact control
    /// chunk counts as a control key, so `"ab\r"` is inserted as text.
    pub fn classify(event: &'a str) -> Self {
        let mut chars = event.chars();
        let first = chars.next();
        let single = first.filter(|_| chars.next().is_none());

        match single {
            Some(key::EOT) | Some(key::CR) | Some(key::LF) => Key::Submit,
            Some(key::ETX) => Key::Interrupt,
            _ if first == Some(key::DEL) => Key::Backspace,
            _ => Key::Insert(event),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Key::Submit => "submit",
            Key::Interrupt => "interrupt",
            Key::Backspace => "backspace",
            Key::Insert(_) => "insert",
        }
    }
}

/// Result of applying one event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Keep reading
    Continue,
    /// The line was submitted; this is the final value
    Resolved(String),
    /// Ctrl-C
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Pending,
    Resolved,
    Cancelled,
}

/// Buffer and completion state for one prompt session
#[derive(Debug)]
pub struct LineState {
    options: ResolvedOptions,
    line: String,
    phase: Phase,
    resolved: Option<String>,
}

impl LineState {
    pub fn new(options: ResolvedOptions) -> Self {
        Self {
            options,
            line: String::new(),
            phase: Phase::Pending,
            resolved: None,
        }
    }

    /// Render steps written before any input is accepted
    pub fn start(&self, prompt: &str) -> Vec<Render> {
        vec![
            Render::ErasePromptLine,
            Render::CursorToLineStart,
            Render::Text(prompt.to_string()),
        ]
    }

    /// Characters typed so far
    #[cfg(test)]
    fn len(&self) -> usize {
        self.line.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    /// True once the session has resolved or been cancelled
    pub fn is_finished(&self) -> bool {
        self.phase != Phase::Pending
    }

    /// Apply one input event
    ///
    /// Teardown rendering (`Render::Finish`) is not produced here; the session
    /// owns teardown so it also runs when I/O fails mid-session.
    pub fn apply(&mut self, event: &str) -> (Transition, Vec<Render>) {
        match self.phase {
            Phase::Resolved => {
                let value = self.resolved.clone().unwrap_or_default();
                return (Transition::Resolved(value), Vec::new());
            }
            Phase::Cancelled => return (Transition::Cancelled, Vec::new()),
            Phase::Pending => {}
        }

        let key = Key::classify(event);
        trace!(kind = key.kind(), "line event");

        match key {
            Key::Submit => (self.submit(), Vec::new()),
            Key::Interrupt => {
                self.phase = Phase::Cancelled;
                self.line.clear();
                (Transition::Cancelled, Vec::new())
            }
            Key::Backspace => (Transition::Continue, self.backspace()),
            Key::Insert(chunk) => (Transition::Continue, self.insert(chunk)),
        }
    }

    fn submit(&mut self) -> Transition {
        if self.options.required && self.line.is_empty() {
            return Transition::Continue;
        }

        let mut value = std::mem::take(&mut self.line);
        if value.ends_with(key::CR) {
            value.pop();
        }
        if value.is_empty() {
            if let Some(default) = self.options.default.as_ref().filter(|d| !d.is_empty()) {
                value = default.clone();
            }
        }

        self.phase = Phase::Resolved;
        self.resolved = Some(value.clone());
        Transition::Resolved(value)
    }

    fn backspace(&mut self) -> Vec<Render> {
        if self.line.pop().is_none() {
            return Vec::new();
        }
        vec![Render::CursorBack, Render::EraseToLineEnd]
    }

    fn insert(&mut self, chunk: &str) -> Vec<Render> {
        self.line.push_str(chunk);
        let echo = self.options.mask.render(chunk);
        if echo.is_empty() {
            Vec::new()
        } else {
            vec![Render::Text(echo)]
        }
    }
}
