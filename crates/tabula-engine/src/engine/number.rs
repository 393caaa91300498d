//! Numeric coercion of raw cell text and display formatting of results.

/// Parse the longest numeric prefix of `text`.
///
/// Leading whitespace is skipped and trailing garbage is ignored, so `"12abc"`
/// reads as 12 while `"abc"` and `"=B1"` have no numeric value at all.
pub fn parse_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
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
        return None;
    }

    // Exponent only counts when at least one digit follows it.
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

    s[..end].parse::<f64>().ok()
}

/// Numeric value of raw text, zero when it has none.
pub fn coerce_number(text: &str) -> f64 {
    parse_number(text).unwrap_or(0.0)
}

/// Format a number for display.
///
/// Shortest round-trip decimal, switching to exponent notation outside
/// `[1e-6, 1e21)`. Negative zero displays as `0`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return n.to_string();
    }

    let s = format!("{:e}", n);
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_plain() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("-3.5"), Some(-3.5));
        assert_eq!(parse_number("+7"), Some(7.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("2."), Some(2.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("2.5E-1"), Some(0.25));
    }

    #[test]
    fn test_parse_number_prefix() {
        assert_eq!(parse_number("  12abc"), Some(12.0));
        assert_eq!(parse_number("3 apples"), Some(3.0));
        assert_eq!(parse_number("1e"), Some(1.0));
        assert_eq!(parse_number("1e+"), Some(1.0));
        assert_eq!(parse_number("4.2.1"), Some(4.2));
    }

    #[test]
    fn test_parse_number_rejects_non_numeric() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("=B1"), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("$5"), None);
    }

    #[test]
    fn test_coerce_number_defaults_to_zero() {
        assert_eq!(coerce_number("foo"), 0.0);
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("8"), 8.0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-4.0), "-4");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(123456789.0), "123456789");
    }

    #[test]
    fn test_format_number_non_finite() {
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }
}
