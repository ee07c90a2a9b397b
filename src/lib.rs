//! Masked single-line terminal prompts
//!
//! Reads one line from a raw-mode terminal, echoing a substitute character
//! (or nothing) instead of what was typed. Useful for passwords and tokens.
//!
//! ```no_run
//! use maskline::{prompt, Mask, PromptOptions};
//!
//! let options = PromptOptions::new().with_mask(Mask::Char('*'));
//! let password = prompt("Password: ", &options)?;
//! # Ok::<(), maskline::PromptError>(())
//! ```
//!
//! The editor core (`editor::LineState`) is a pure state machine and can be
//! driven from any event stream; `terminal::ScriptedInput` replays a fixed
//! list of events.

pub mod config;
pub mod editor;
pub mod error;
pub mod options;
pub mod prompt;
pub mod terminal;

pub use error::{PromptError, Result};
pub use options::{InputTarget, Mask, OutputTarget, PromptOptions, ResolvedOptions};
pub use prompt::{prompt, prompt_async, prompt_async_with, prompt_with, Prompter};
