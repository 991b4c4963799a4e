//! Terminal presentation of the calculator.

pub mod render;
pub mod repl;

pub use render::{render_entry, render_history, render_state};
pub use repl::{Input, parse_input, run as run_repl};
