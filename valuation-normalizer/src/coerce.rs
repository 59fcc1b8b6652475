//! Shared numeric coercion for raw payload fields.
//!
//! The valuation service is inconsistent about number encoding: the same
//! field may arrive as `91.2`, `"91.2"` or `"91.2%"` depending on the tool
//! version. Every numeric read in this crate goes through these helpers so
//! the default/NaN policy lives in one place.

use serde_json::Value;

/// Coerces a JSON value into a finite `f64`.
///
/// - numbers pass through when finite;
/// - strings are trimmed and parsed by their longest numeric prefix;
/// - anything else (null, bool, arrays, objects) yields `None`.
///
/// # Example
/// ```
/// use serde_json::json;
/// use valuation_normalizer::coerce::coerce_f64;
///
/// assert_eq!(coerce_f64(&json!(91.2)), Some(91.2));
/// assert_eq!(coerce_f64(&json!(" 62.5% ")), Some(62.5));
/// assert_eq!(coerce_f64(&json!("n/a")), None);
/// assert_eq!(coerce_f64(&json!(true)), None);
/// ```
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|x| x.is_finite()),
        Value::String(s) => parse_numeric_prefix(s),
        _ => None,
    }
}

/// Coerces an optional value, defaulting to `0.0` when absent or invalid.
pub fn number_or_zero(value: Option<&Value>) -> f64 {
    value.and_then(coerce_f64).unwrap_or(0.0)
}

/// Coerces a value into a non-negative integer counter.
///
/// Negative numbers clamp to `0`, fractions round to the nearest integer.
pub fn coerce_count(value: &Value) -> Option<u64> {
    coerce_f64(value).map(|x| if x <= 0.0 { 0 } else { x.round() as u64 })
}

/// Reads a string field, accepting numbers as their decimal rendering.
pub fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parses the longest prefix of `s` that forms a decimal number.
///
/// Accepts an optional sign, digits with an optional fraction and an
/// optional exponent. Trailing garbage (units, percent signs) is ignored.
fn parse_numeric_prefix(s: &str) -> Option<f64> {
    let s = s.trim();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // exponent only counts when at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|x| x.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_pass_through() {
        assert_eq!(coerce_f64(&json!(0)), Some(0.0));
        assert_eq!(coerce_f64(&json!(-3.5)), Some(-3.5));
        assert_eq!(coerce_f64(&json!(3793157)), Some(3793157.0));
    }

    #[test]
    fn strings_use_numeric_prefix() {
        assert_eq!(coerce_f64(&json!("42")), Some(42.0));
        assert_eq!(coerce_f64(&json!("12abc")), Some(12.0));
        assert_eq!(coerce_f64(&json!(".5")), Some(0.5));
        assert_eq!(coerce_f64(&json!("5.")), Some(5.0));
        assert_eq!(coerce_f64(&json!("1e3 stars")), Some(1000.0));
        assert_eq!(coerce_f64(&json!("1e")), Some(1.0));
        assert_eq!(coerce_f64(&json!("-")), None);
        assert_eq!(coerce_f64(&json!("")), None);
        assert_eq!(coerce_f64(&json!("Infinity")), None);
    }

    #[test]
    fn non_scalars_are_absent() {
        assert_eq!(coerce_f64(&Value::Null), None);
        assert_eq!(coerce_f64(&json!([1])), None);
        assert_eq!(coerce_f64(&json!({"v": 1})), None);
        assert_eq!(number_or_zero(None), 0.0);
        assert_eq!(number_or_zero(Some(&json!("oops"))), 0.0);
    }

    #[test]
    fn counts_clamp_and_round() {
        assert_eq!(coerce_count(&json!(-4)), Some(0));
        assert_eq!(coerce_count(&json!(12.6)), Some(13));
        assert_eq!(coerce_count(&json!("228000")), Some(228_000));
        assert_eq!(coerce_count(&json!(null)), None);
    }

    #[test]
    fn strings_accept_numbers() {
        assert_eq!(coerce_string(&json!("18.3.1")), Some("18.3.1".to_string()));
        assert_eq!(coerce_string(&json!(2)), Some("2".to_string()));
        assert_eq!(coerce_string(&json!(false)), None);
    }
}
