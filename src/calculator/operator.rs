//! Binary operators of the keypad and their evaluation.

use std::fmt;
use std::str::FromStr;

/// A binary operator that can be pending between two operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl Operator {
    /// All operators in keypad order.
    pub const ALL: [Operator; 6] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Modulo,
        Self::Power,
    ];

    /// The symbol shown on the key and in expression text.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Modulo => '%',
            Self::Power => '^',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operator: {0:?}")]
pub struct ParseOperatorError(pub String);

impl TryFrom<char> for Operator {
    type Error = ParseOperatorError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '+' => Ok(Self::Add),
            '-' => Ok(Self::Subtract),
            '*' | '×' => Ok(Self::Multiply),
            '/' | '÷' => Ok(Self::Divide),
            '%' => Ok(Self::Modulo),
            '^' => Ok(Self::Power),
            other => Err(ParseOperatorError(other.to_string())),
        }
    }
}

impl FromStr for Operator {
    type Err = ParseOperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c),
            _ => Err(ParseOperatorError(s.to_string())),
        }
    }
}

/// Apply `op` to `a` and `b`.
///
/// Never fails. Division by zero yields `0`; the remainder by zero is left to
/// IEEE semantics (`NaN`). Without an operator the right operand is returned.
pub fn evaluate(a: f64, b: f64, op: Option<Operator>) -> f64 {
    let Some(op) = op else {
        return b;
    };

    match op {
        Operator::Add => a + b,
        Operator::Subtract => a - b,
        Operator::Multiply => a * b,
        Operator::Divide => {
            if b == 0.0 {
                0.0
            } else {
                a / b
            }
        }
        Operator::Modulo => a % b,
        Operator::Power => power(a, b),
    }
}

/// `a` raised to `b`. A `NaN` exponent, or `±1` raised to an infinite one,
/// is `NaN`; `powf` would give `1` for both.
fn power(a: f64, b: f64) -> f64 {
    if b.is_nan() || (a.abs() == 1.0 && b.is_infinite()) {
        f64::NAN
    } else {
        a.powf(b)
    }
}
