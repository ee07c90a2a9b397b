//! Line editor
//!
//! - `line_state`: the pure event -> transition function
//! - `render`: escape-sequence output as data
//! - `session`: drives a `LineState` against real streams with scoped raw mode

pub mod line_state;
pub mod render;
pub mod session;

pub use line_state::{Key, LineState, Transition};
pub use render::Render;
pub use session::read_line;
