//! Text rendering of the calculator and the history view.

use crate::calculator::{CalculatorState, format_display, parse_number};
use crate::history::{HistoryEntry, HistoryLedger};

/// Width of the display panel, in characters.
const PANEL_WIDTH: usize = 32;

/// Render the hint line and the display, right-aligned like the keypad's
/// screen. The hint line is blank when there is no pending expression.
pub fn render_state(state: &CalculatorState) -> String {
    format!(
        "{:>width$}\n{:>width$}",
        state.expression,
        state.display,
        width = PANEL_WIDTH
    )
}

/// Render one history entry as its expression followed by `= result`.
pub fn render_entry(entry: &HistoryEntry) -> String {
    format!("{}\n= {}", entry.expression, display_result(&entry.result))
}

/// Render the history view, newest first.
pub fn render_history(ledger: &HistoryLedger) -> String {
    if ledger.is_empty() {
        return "No calculations yet".to_string();
    }

    ledger
        .entries()
        .iter()
        .map(render_entry)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Grouped form of a stored result; text that is not a number is kept as is.
fn display_result(result: &str) -> String {
    let value = parse_number(result);
    if value.is_nan() {
        result.to_string()
    } else {
        format_display(value)
    }
}
