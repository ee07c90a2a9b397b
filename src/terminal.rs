//! Terminal handling module
//!
//! Groups all terminal-related functionality:
//! - ANSI escape sequences
//! - Input sources (crossterm-backed stdin and scripted replay)

pub mod escape;
pub mod input;

pub use input::{InputSource, ScriptedInput, TerminalInput};
