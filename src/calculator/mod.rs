//! Calculator module for the keypad engine.
//!
//! This module provides functionality to:
//! - Evaluate a pending binary operation
//! - Step the keypad state machine on key presses
//! - Recognize and tokenize typed keypad input
//! - Copy the display to the clipboard

mod clipboard;
mod detection;
mod evaluation;
mod operator;
mod state;

pub use clipboard::{clipboard_text, copy_to_clipboard};
pub use detection::{looks_like_keys, tokenize};
pub use evaluation::{format_display, format_number, parse_number};
pub use operator::{Operator, ParseOperatorError, evaluate};
pub use state::{Calculation, CalculatorState, Key, ParseKeyError, Pending, Step, step};
