//! Conversions between display text and numbers.
//!
//! The keypad keeps its operands as text. These helpers define how that text
//! is coerced into a number and how results are written back, so that partial
//! entries such as `"12."` still evaluate and non-finite results stay visible.

/// Coerce display text into a number.
///
/// The longest numeric prefix is parsed, so `"12."` is `12` and `"1.2.3"` is
/// `1.2`. Text without any leading digits (`""`, `"-"`, `"."`) yields `NaN`.
pub fn parse_number(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < len && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when digits follow it
    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < len && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Write a number back as display text.
///
/// Shortest round-trip form; exponent notation (with an explicit sign) for
/// magnitudes of at least `1e21` or below `1e-6`. Negative zero prints as `0`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return text.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let abs = value.abs();
    if !(1e-6..1e21).contains(&abs) {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => formatted,
        };
    }

    format!("{}", value)
}

/// Format a number for display with thousand separators.
///
/// Used by the history view. Non-finite values and values outside the
/// integer-safe range fall back to [`format_number`].
pub fn format_display(value: f64) -> String {
    if !value.is_finite() || value.abs() >= 1e15 {
        return format_number(value);
    }

    let grouped = if value.fract() == 0.0 {
        format_with_separators(value.abs() as u64)
    } else {
        let formatted = format!("{:.10}", value.abs());
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        match trimmed.split_once('.') {
            Some((int_part, dec_part)) => format!(
                "{}.{}",
                format_with_separators(int_part.parse().unwrap_or(0)),
                dec_part
            ),
            None => format_with_separators(trimmed.parse().unwrap_or(0)),
        }
    };

    if value < 0.0 && grouped != "0" {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format an unsigned integer with thousand separators.
fn format_with_separators(value: u64) -> String {
    let s = value.to_string();

    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}
