//! Error types for prompt sessions

use thiserror::Error;

/// Everything a prompt can fail with
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Must be able to set input stream to raw mode")]
    UnsupportedInput,

    #[error("Interrupted")]
    Interrupted,

    #[error("Input stream closed before a line was submitted")]
    InputClosed,

    #[error("Another prompt is already reading from stdin")]
    Busy,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PromptError {
    /// True when the user pressed Ctrl-C
    pub fn is_interrupted(&self) -> bool {
        matches!(self, PromptError::Interrupted)
    }
}

pub type Result<T> = std::result::Result<T, PromptError>;
