//! Keypad input detection for the interactive prompt.
//!
//! Determines whether a typed line is a sequence of keypad presses (as
//! opposed to a command or a solver query) and splits it into [`Key`]s.

use super::state::{Key, ParseKeyError};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches lines made only of keypad tokens and whitespace.
    /// Multi-character tokens come first so `+/-` is not read as `+`.
    static ref KEY_LINE: Regex = Regex::new(
        r"(?i)^(?:\s*(?:\+/-|AC|DEL|NEG|C|±|⌫|[0-9.,+\-*/%^=×÷]))+\s*$"
    ).unwrap();

    /// Matches a single keypad token.
    static ref KEY_TOKEN: Regex = Regex::new(
        r"(?i)\+/-|AC|DEL|NEG|C|±|⌫|[0-9.,+\-*/%^=×÷]"
    ).unwrap();
}

/// Check if a line consists solely of keypad tokens.
///
/// Tokens may be written with or without spaces: `12.5+3=` and `AC 5 +/-`
/// both qualify, `history` does not.
pub fn looks_like_keys(input: &str) -> bool {
    !input.trim().is_empty() && KEY_LINE.is_match(input)
}

/// Split a keypad line into keys, in order.
pub fn tokenize(input: &str) -> Result<Vec<Key>, ParseKeyError> {
    if !looks_like_keys(input) {
        return Err(ParseKeyError(input.trim().to_string()));
    }

    KEY_TOKEN
        .find_iter(input)
        .map(|m| m.as_str().parse())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::Operator;

    #[test]
    fn test_key_lines_accepted() {
        assert!(looks_like_keys("5"));
        assert!(looks_like_keys("5 + 3 ="));
        assert!(looks_like_keys("12.5+3="));
        assert!(looks_like_keys("AC 5 +/- ="));
        assert!(looks_like_keys("  del  "));
        assert!(looks_like_keys("2^8="));
    }

    #[test]
    fn test_other_input_rejected() {
        assert!(!looks_like_keys(""));
        assert!(!looks_like_keys("   "));
        assert!(!looks_like_keys("history"));
        assert!(!looks_like_keys("!ai what is 2+2"));
        assert!(!looks_like_keys("quit"));
        assert!(!looks_like_keys("sin(0)"));
    }

    #[test]
    fn test_tokenize_compact_line() {
        let keys = tokenize("12.5+3=").unwrap();
        assert_eq!(
            keys,
            vec![
                Key::Digit('1'),
                Key::Digit('2'),
                Key::Decimal,
                Key::Digit('5'),
                Key::Operator(Operator::Add),
                Key::Digit('3'),
                Key::Equals,
            ]
        );
    }

    #[test]
    fn test_tokenize_prefers_sign_toggle_over_plus() {
        let keys = tokenize("5+/-").unwrap();
        assert_eq!(keys, vec![Key::Digit('5'), Key::ToggleSign]);
    }

    #[test]
    fn test_tokenize_named_keys() {
        let keys = tokenize("ac 9 del c").unwrap();
        assert_eq!(
            keys,
            vec![Key::Clear, Key::Digit('9'), Key::Delete, Key::Clear]
        );
    }

    #[test]
    fn test_tokenize_rejects_non_key_lines() {
        assert!(tokenize("help").is_err());
    }
}
