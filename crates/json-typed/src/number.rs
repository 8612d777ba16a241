//! Numeric edge cases.
//!
//! JSON cannot spell NaN or the infinities and cannot tell `-0` from `0`.
//! Those four states travel as `{"Number": "<text>"}` envelopes; everything
//! else is a plain JSON number. Decoding a `Number` envelope applies the
//! usual script-engine `ToNumber` coercion to the payload.

use serde_json::Value as JsonValue;

/// Textual form of a number JSON cannot carry, or `None` for ordinary numbers.
pub fn special_form(n: f64) -> Option<&'static str> {
    if n.is_nan() {
        Some("NaN")
    } else if n == f64::INFINITY {
        Some("Infinity")
    } else if n == f64::NEG_INFINITY {
        Some("-Infinity")
    } else if n == 0.0 && n.is_sign_negative() {
        Some("-0")
    } else {
        None
    }
}

/// Coerces a JSON payload to a number.
pub fn to_number(payload: &JsonValue) -> f64 {
    match payload {
        JsonValue::Null => 0.0,
        JsonValue::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        JsonValue::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        JsonValue::String(s) => string_to_number(s),
        JsonValue::Array(_) => string_to_number(&join_to_string(payload)),
        JsonValue::Object(_) => f64::NAN,
    }
}

/// String-to-number conversion with script-engine rules.
pub fn string_to_number(text: &str) -> f64 {
    let s = text.trim_matches(is_js_space);
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&s[2..], radix);
    }
    if is_decimal_literal(s) {
        s.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// WhiteSpace and LineTerminator code points trimmed by `ToNumber`.
/// Narrower than `char::is_whitespace`, which also admits U+0085.
fn is_js_space(c: char) -> bool {
    matches!(
        c,
        '\u{9}' | '\u{a}' | '\u{b}' | '\u{c}' | '\u{d}' | ' ' | '\u{a0}' | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}' | '\u{2029}' | '\u{202f}' | '\u{205f}' | '\u{3000}' | '\u{feff}'
    )
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut acc = 0.0_f64;
    for ch in digits.chars() {
        match ch.to_digit(radix) {
            Some(d) => acc = acc * f64::from(radix) + f64::from(d),
            None => return f64::NAN,
        }
    }
    acc
}

/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`
fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        mantissa_digits += i - frac_start;
    }
    if mantissa_digits == 0 {
        return false;
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}

/// Array-to-string the way a script engine joins arrays: items separated by
/// commas, `null` as the empty string.
fn join_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(items) => items
            .iter()
            .map(join_to_string)
            .collect::<Vec<_>>()
            .join(","),
        JsonValue::Object(_) => "[object Object]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn same(a: f64, b: f64) -> bool {
        (a.is_nan() && b.is_nan()) || (a == b && a.is_sign_negative() == b.is_sign_negative())
    }

    #[test]
    fn special_forms() {
        assert_eq!(special_form(f64::NAN), Some("NaN"));
        assert_eq!(special_form(f64::INFINITY), Some("Infinity"));
        assert_eq!(special_form(f64::NEG_INFINITY), Some("-Infinity"));
        assert_eq!(special_form(-0.0), Some("-0"));
        assert_eq!(special_form(0.0), None);
        assert_eq!(special_form(-1.5), None);
    }

    #[test]
    fn special_forms_coerce_back() {
        for n in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -0.0] {
            let text = special_form(n).unwrap();
            assert!(same(string_to_number(text), n), "{text}");
        }
    }

    #[test]
    fn string_coercion_table() {
        let cases: &[(&str, f64)] = &[
            ("", 0.0),
            ("   ", 0.0),
            (" 42 ", 42.0),
            ("\u{feff}7", 7.0),
            ("\u{a0}\u{2028}8\u{3000}", 8.0),
            ("\u{85}5", f64::NAN),
            ("5\u{200b}", f64::NAN),
            ("-12.5e2", -1250.0),
            (".5", 0.5),
            ("5.", 5.0),
            ("+3", 3.0),
            ("0x1F", 31.0),
            ("0b101", 5.0),
            ("0o17", 15.0),
            ("-0x10", f64::NAN),
            ("0x", f64::NAN),
            ("inf", f64::NAN),
            ("nan", f64::NAN),
            ("infinity", f64::NAN),
            ("1e", f64::NAN),
            ("1_000", f64::NAN),
            ("abc", f64::NAN),
        ];
        for (text, expected) in cases {
            assert!(same(string_to_number(text), *expected), "{text:?}");
        }
    }

    #[test]
    fn non_string_payloads() {
        assert!(same(to_number(&json!(null)), 0.0));
        assert!(same(to_number(&json!(true)), 1.0));
        assert!(same(to_number(&json!(false)), 0.0));
        assert!(same(to_number(&json!(12)), 12.0));
        assert!(same(to_number(&json!([])), 0.0));
        assert!(same(to_number(&json!(["7"])), 7.0));
        assert!(same(to_number(&json!([null])), 0.0));
        assert!(to_number(&json!([true])).is_nan());
        assert!(to_number(&json!([1, 2])).is_nan());
        assert!(to_number(&json!({"a": 1})).is_nan());
    }
}
