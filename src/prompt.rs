//! Prompt coordinator
//!
//! Picks the streams, applies the re-prompt loop for required input, and
//! offers explicit option reuse through `Prompter`. The line editing itself
//! lives in `editor`.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::editor::read_line;
use crate::error::{PromptError, Result};
use crate::options::{InputTarget, OutputTarget, PromptOptions};
use crate::terminal::{InputSource, TerminalInput};

static STDIN_CLAIMED: AtomicBool = AtomicBool::new(false);

/// Exclusive use of process stdin for one prompt
struct StdinClaim;

impl StdinClaim {
    fn acquire() -> Result<Self> {
        STDIN_CLAIMED
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| StdinClaim)
            .map_err(|_| PromptError::Busy)
    }
}

impl Drop for StdinClaim {
    fn drop(&mut self) {
        STDIN_CLAIMED.store(false, Ordering::Release);
    }
}

/// Prompt on caller-supplied streams
///
/// Re-runs the line editor while the result is empty and the options call for
/// a non-empty answer.
pub fn prompt_with(
    ask: &str,
    out: &mut dyn Write,
    input: &mut dyn InputSource,
    options: &PromptOptions,
) -> Result<String> {
    if !input.supports_raw_mode() {
        return Err(PromptError::UnsupportedInput);
    }
    input.set_utf8()?;

    let resolved = options.resolve();
    let reprompt = options.reprompt_on_empty();

    loop {
        let line = read_line(ask, out, input, &resolved)?;
        if !(reprompt && line.is_empty()) {
            return Ok(line);
        }
        debug!("empty answer, prompting again");
    }
}

/// Prompt on the terminal: stdin for input, stdout or stderr for output
pub fn prompt(ask: &str, options: &PromptOptions) -> Result<String> {
    let _claim = StdinClaim::acquire()?;
    let mut input = match options.input.unwrap_or_default() {
        InputTarget::Stdin => TerminalInput::new(),
    };

    match options.output.unwrap_or_default() {
        OutputTarget::Stdout => prompt_with(ask, &mut io::stdout(), &mut input, options),
        OutputTarget::Stderr => prompt_with(ask, &mut io::stderr(), &mut input, options),
    }
}

fn join_error(e: tokio::task::JoinError) -> PromptError {
    PromptError::Io(io::Error::new(io::ErrorKind::Other, e))
}

/// `prompt` on a blocking worker thread
pub async fn prompt_async(ask: impl Into<String>, options: PromptOptions) -> Result<String> {
    let ask = ask.into();
    tokio::task::spawn_blocking(move || prompt(&ask, &options))
        .await
        .map_err(join_error)?
}

/// `prompt_with` on a blocking worker thread, taking ownership of the streams
pub async fn prompt_async_with<W, I>(
    ask: impl Into<String>,
    mut out: W,
    mut input: I,
    options: PromptOptions,
) -> Result<String>
where
    W: Write + Send + 'static,
    I: InputSource + Send + 'static,
{
    let ask = ask.into();
    tokio::task::spawn_blocking(move || prompt_with(&ask, &mut out, &mut input, &options))
        .await
        .map_err(join_error)?
}

/// Remembers options between prompts when asked to
///
/// `prompt` uses the options it is given and folds them into the remembered
/// set; `prompt_again` reuses the remembered set.
#[derive(Clone, Debug, Default)]
pub struct Prompter {
    remembered: PromptOptions,
}

impl Prompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a known set of options, e.g. a config file
    pub fn with_options(options: PromptOptions) -> Self {
        Self {
            remembered: options,
        }
    }

    pub fn options(&self) -> &PromptOptions {
        &self.remembered
    }

    pub fn prompt(&mut self, ask: &str, options: &PromptOptions) -> Result<String> {
        self.remembered.merge(options);
        prompt(ask, options)
    }

    pub fn prompt_again(&self, ask: &str) -> Result<String> {
        prompt(ask, &self.remembered)
    }

    pub fn prompt_with(
        &mut self,
        ask: &str,
        out: &mut dyn Write,
        input: &mut dyn InputSource,
        options: &PromptOptions,
    ) -> Result<String> {
        self.remembered.merge(options);
        prompt_with(ask, out, input, options)
    }

    pub fn prompt_again_with(
        &self,
        ask: &str,
        out: &mut dyn Write,
        input: &mut dyn InputSource,
    ) -> Result<String> {
        prompt_with(ask, out, input, &self.remembered)
    }
}
