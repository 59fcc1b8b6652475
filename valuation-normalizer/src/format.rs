//! Display formatting rules: currency, titles and status bands.

use serde_json::Value;

use crate::coerce::coerce_f64;

/// Formats a raw valuation field into a currency string.
///
/// - absent / `null` → `"$0"`;
/// - strings already containing `$` pass through unchanged;
/// - numeric strings and numbers follow [`format_currency`];
/// - other non-blank strings pass through unchanged;
/// - anything else → `"$0"`.
///
/// # Example
/// ```
/// use serde_json::json;
/// use valuation_normalizer::format::format_valuation;
///
/// assert_eq!(format_valuation(Some(&json!("$3.8M"))), "$3.8M");
/// assert_eq!(format_valuation(Some(&json!(3793157))), "$3.8M");
/// assert_eq!(format_valuation(None), "$0");
/// ```
pub fn format_valuation(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return ZERO_DOLLARS.to_string();
    };

    match value {
        Value::String(s) if s.contains('$') => s.clone(),
        Value::String(s) => match coerce_f64(value) {
            Some(n) => format_currency(n),
            None if s.trim().is_empty() => ZERO_DOLLARS.to_string(),
            None => s.clone(),
        },
        Value::Number(_) => coerce_f64(value)
            .map(format_currency)
            .unwrap_or_else(|| ZERO_DOLLARS.to_string()),
        _ => ZERO_DOLLARS.to_string(),
    }
}

const ZERO_DOLLARS: &str = "$0";

/// Formats a dollar amount: `$3.8M`, `$1.0K`, `$999`.
///
/// Millions and thousands are rendered with one decimal (half away from
/// zero); smaller amounts as a comma-grouped rounded integer.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return ZERO_DOLLARS.to_string();
    }
    if amount >= 1_000_000.0 {
        format!("${:.1}M", round_one_decimal(amount / 1_000_000.0))
    } else if amount >= 1_000.0 {
        format!("${:.1}K", round_one_decimal(amount / 1_000.0))
    } else {
        format!("${}", group_thousands(round_half_up(amount)))
    }
}

/// Turns a snake_case identifier into a human title.
///
/// Underscores become spaces and the first letter of every word is
/// upper-cased; the rest of each word is left untouched.
///
/// # Example
/// ```
/// use valuation_normalizer::format::title_case_key;
///
/// assert_eq!(title_case_key("community_momentum"), "Community Momentum");
/// assert_eq!(title_case_key("velocity"), "Velocity");
/// ```
pub fn title_case_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut at_boundary = true;
    for ch in key.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_ascii_alphanumeric() {
            if at_boundary {
                out.push(ch.to_ascii_uppercase());
            } else {
                out.push(ch);
            }
            at_boundary = false;
        } else {
            out.push(ch);
            at_boundary = !ch.is_alphanumeric();
        }
    }
    out
}

pub const STATUS_UNICORN: &str = "Unicorn Potential";
pub const STATUS_HIGH: &str = "High Potential";
pub const STATUS_MODERATE: &str = "Moderate Potential";
pub const STATUS_EARLY: &str = "Early Stage";
pub const STATUS_NEEDS_GROWTH: &str = "Needs Growth";

/// Derives a status label when the service omitted one.
///
/// Bands are inclusive at the lower bound and evaluated top-down.
pub fn status_from_score(score: f64) -> &'static str {
    if score >= 80.0 {
        STATUS_UNICORN
    } else if score >= 60.0 {
        STATUS_HIGH
    } else if score >= 40.0 {
        STATUS_MODERATE
    } else if score >= 20.0 {
        STATUS_EARLY
    } else {
        STATUS_NEEDS_GROWTH
    }
}

fn round_one_decimal(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Rounds like a browser `Math.round`: halves go towards +∞.
fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn currency_boundaries() {
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(1000.0), "$1.0K");
        assert_eq!(format_currency(1_000_000.0), "$1.0M");
        assert_eq!(format_currency(3_793_157.0), "$3.8M");
        assert_eq!(format_currency(1_250_000.0), "$1.3M");
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.6), "$1,000");
        assert_eq!(format_currency(-1234.4), "$-1,234");
    }

    #[test]
    fn valuation_strings() {
        assert_eq!(format_valuation(Some(&json!("$3.8M"))), "$3.8M");
        assert_eq!(format_valuation(Some(&json!("2500000"))), "$2.5M");
        assert_eq!(format_valuation(Some(&json!("750"))), "$750");
        assert_eq!(format_valuation(Some(&json!("undisclosed"))), "undisclosed");
        assert_eq!(format_valuation(Some(&json!("  "))), "$0");
    }

    #[test]
    fn valuation_non_values() {
        assert_eq!(format_valuation(None), "$0");
        assert_eq!(format_valuation(Some(&Value::Null)), "$0");
        assert_eq!(format_valuation(Some(&json!(true))), "$0");
        assert_eq!(format_valuation(Some(&json!({"min": 1}))), "$0");
    }

    #[test]
    fn valuation_is_idempotent_on_formatted_strings() {
        let once = format_valuation(Some(&json!(3_793_157)));
        let twice = format_valuation(Some(&json!(once.clone())));
        assert_eq!(once, twice);
    }


    #[test]
    fn titles() {
        assert_eq!(title_case_key("community_momentum"), "Community Momentum");
        assert_eq!(title_case_key("velocity"), "Velocity");
        assert_eq!(title_case_key("test_reliability"), "Test Reliability");
        assert_eq!(title_case_key("Community Momentum"), "Community Momentum");
        assert_eq!(title_case_key("ci_cd_2x"), "Ci Cd 2x");
    }

    #[test]
    fn status_bands() {
        assert_eq!(status_from_score(80.0), STATUS_UNICORN);
        assert_eq!(status_from_score(79.0), STATUS_HIGH);
        assert_eq!(status_from_score(79.9), STATUS_HIGH);
        assert_eq!(status_from_score(60.0), STATUS_HIGH);
        assert_eq!(status_from_score(59.0), STATUS_MODERATE);
        assert_eq!(status_from_score(40.0), STATUS_MODERATE);
        assert_eq!(status_from_score(20.0), STATUS_EARLY);
        assert_eq!(status_from_score(0.0), STATUS_NEEDS_GROWTH);
    }
}
