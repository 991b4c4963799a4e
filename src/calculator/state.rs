//! Keypad state machine.
//!
//! [`step`] is a pure transition from one [`CalculatorState`] to the next.
//! Completed calculations are handed back to the caller instead of being
//! recorded here, so the machine has no knowledge of the history ledger.

use super::evaluation::{format_number, parse_number};
use super::operator::{Operator, evaluate};
use std::fmt;
use std::str::FromStr;

/// A single key activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// One of `0`-`9`.
    Digit(char),
    Decimal,
    Operator(Operator),
    Equals,
    /// `AC`: reset the entry and any pending operation.
    Clear,
    /// Backspace.
    Delete,
    ToggleSign,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{}", d),
            Self::Decimal => f.write_str("."),
            Self::Operator(op) => write!(f, "{}", op),
            Self::Equals => f.write_str("="),
            Self::Clear => f.write_str("AC"),
            Self::Delete => f.write_str("DEL"),
            Self::ToggleSign => f.write_str("+/-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key: {0:?}")]
pub struct ParseKeyError(pub String);

impl FromStr for Key {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        match token.to_ascii_uppercase().as_str() {
            "." | "," => return Ok(Self::Decimal),
            "=" => return Ok(Self::Equals),
            "C" | "AC" | "CLEAR" => return Ok(Self::Clear),
            "DEL" | "BS" | "⌫" => return Ok(Self::Delete),
            "±" | "+/-" | "NEG" => return Ok(Self::ToggleSign),
            _ => {}
        }

        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_digit() => Ok(Self::Digit(c)),
            (Some(c), None) => Operator::try_from(c)
                .map(Self::Operator)
                .map_err(|_| ParseKeyError(token.to_string())),
            _ => Err(ParseKeyError(token.to_string())),
        }
    }
}

/// Left operand and operator waiting for a right operand.
#[derive(Clone, Debug, PartialEq)]
pub struct Pending {
    /// Left operand as text.
    pub operand: String,
    pub operator: Operator,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CalculatorState {
    /// Current entry, possibly partial (`"12."`).
    pub display: String,
    /// Hint line shown above the display, e.g. `"5 +"`.
    pub expression: String,
    pub pending: Option<Pending>,
    /// The next entry key replaces the display instead of appending to it.
    pub reset_on_next_digit: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            expression: String::new(),
            pending: None,
            reset_on_next_digit: false,
        }
    }
}

/// A finished `operand op operand =` evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct Calculation {
    pub expression: String,
    pub result: String,
}

/// Outcome of one transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub state: CalculatorState,
    /// Set only when `=` completed a calculation.
    pub completed: Option<Calculation>,
}

impl CalculatorState {
    /// Show a solver answer in place of the current entry.
    ///
    /// Any pending operation is dropped and the next digit starts a new entry.
    pub fn apply_answer(&mut self, query: &str, answer: &str) {
        self.display = answer.to_string();
        self.expression = query.to_string();
        self.pending = None;
        self.reset_on_next_digit = true;
    }
}

/// Compute the state that follows `state` when `key` is pressed.
pub fn step(state: &CalculatorState, key: Key) -> Step {
    let mut next = state.clone();
    let mut completed = None;

    match key {
        Key::Digit(d) => handle_number(&mut next, d),
        Key::Decimal => handle_number(&mut next, '.'),
        Key::Operator(op) => handle_operation(&mut next, op),
        Key::Equals => completed = handle_equal(&mut next),
        Key::Clear => next = CalculatorState::default(),
        Key::Delete => delete_digit(&mut next),
        Key::ToggleSign => {
            next.display = format_number(-parse_number(&next.display));
        }
    }

    Step {
        state: next,
        completed,
    }
}

fn handle_number(state: &mut CalculatorState, token: char) {
    if state.display == "0" || state.reset_on_next_digit {
        state.display = token.to_string();
        state.reset_on_next_digit = false;
    } else {
        state.display.push(token);
    }
}

fn handle_operation(state: &mut CalculatorState, op: Operator) {
    match state.pending.take() {
        None => {
            state.pending = Some(Pending {
                operand: state.display.clone(),
                operator: op,
            });
        }
        Some(pending) => {
            // Fold the waiting pair before taking the new operator
            let result = evaluate(
                parse_number(&pending.operand),
                parse_number(&state.display),
                Some(pending.operator),
            );
            let result_text = format_number(result);
            state.display = result_text.clone();
            state.pending = Some(Pending {
                operand: result_text,
                operator: op,
            });
        }
    }

    state.expression = format!("{} {}", state.display, op);
    state.reset_on_next_digit = true;
}

fn handle_equal(state: &mut CalculatorState) -> Option<Calculation> {
    let pending = state.pending.take()?;

    let prev = parse_number(&pending.operand);
    let current = parse_number(&state.display);
    let result_text = format_number(evaluate(prev, current, Some(pending.operator)));

    let calculation = Calculation {
        expression: format!(
            "{} {} {} =",
            format_number(prev),
            pending.operator,
            format_number(current)
        ),
        result: result_text.clone(),
    };

    state.display = result_text;
    state.expression.clear();
    state.reset_on_next_digit = true;

    Some(calculation)
}

fn delete_digit(state: &mut CalculatorState) {
    if state.display.chars().count() > 1 {
        state.display.pop();
    } else {
        state.display = "0".to_string();
    }
}
