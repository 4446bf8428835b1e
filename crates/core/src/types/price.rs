//! Numeric coercion for upstream price and stock values.
//!
//! The inventory backend reports numbers in whatever shape its own upstream
//! produced: plain JSON numbers, numeric strings, German-locale strings with
//! thousands spaces and comma decimal separators (`"1 234,50"`), or garbage.
//! Everything non-finite or negative coerces to `0` rather than failing the
//! record.

use serde_json::Value;

/// Coerce an arbitrary JSON value into a non-negative, finite price.
///
/// Returns `0.0` for missing, malformed, negative, or non-finite input.
#[must_use]
pub fn coerce_price(value: &Value) -> f64 {
    clamp_price(parse_number(value))
}

/// Coerce an arbitrary JSON value into a non-negative stock count.
///
/// Fractional values truncate toward zero; anything malformed or negative
/// coerces to `0`.
#[must_use]
pub fn coerce_stock(value: &Value) -> u32 {
    clamp_stock(parse_number(value))
}

/// Clamp an already-parsed price to the non-negative, finite range.
///
/// Takes an `Option` so alias searches that parse first and clamp last can
/// share the exact coercion semantics of [`coerce_price`].
#[must_use]
pub fn clamp_price(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}

/// Clamp an already-parsed stock count, truncating toward zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp_stock(value: Option<f64>) -> u32 {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => {
            if v >= f64::from(u32::MAX) {
                u32::MAX
            } else {
                v.floor() as u32
            }
        }
        _ => 0,
    }
}

/// Format a price for kiosk display in German locale: comma decimal
/// separator and dot-grouped thousands (e.g. `"1.234,50 €"`).
#[must_use]
pub fn format_eur(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{},{fraction} €", group_thousands(whole))
}

/// Insert dots between three-digit groups of a formatted integer part.
fn group_thousands(whole: &str) -> String {
    let (sign, digits) = whole
        .strip_prefix('-')
        .map_or(("", whole), |rest| ("-", rest));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + sign.len());
    grouped.push_str(sign);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}

/// Parse a JSON value as a number, accepting locale-formatted strings.
///
/// Unlike [`coerce_price`], this distinguishes "no number here" from a real
/// zero, which field-alias searches need in order to keep looking.
#[must_use]
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_locale_number(s),
        _ => None,
    }
}

/// Parse a numeric string, tolerating thousands separators and a comma
/// decimal separator.
fn parse_locale_number(raw: &str) -> Option<f64> {
    // Thousands groups may be separated by regular or non-breaking spaces.
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    // "1.234,50" uses dots for thousands; "1234,50" only the comma.
    let normalized = if compact.contains(',') {
        compact.replace('.', "").replace(',', ".")
    } else {
        compact
    };

    normalized.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_price_plain_number() {
        assert!((coerce_price(&json!(1.8)) - 1.8).abs() < f64::EPSILON);
        assert!((coerce_price(&json!(0)) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_coerce_price_thousands_space_comma_decimal() {
        assert!((coerce_price(&json!("1 234,50")) - 1234.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_coerce_price_german_thousands_dot() {
        assert!((coerce_price(&json!("1.234,50")) - 1234.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_coerce_price_negative_clamps_to_zero() {
        assert!((coerce_price(&json!("-5")) - 0.0).abs() < f64::EPSILON);
        assert!((coerce_price(&json!(-2.5)) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_coerce_price_garbage_clamps_to_zero() {
        assert!((coerce_price(&json!("gratis")) - 0.0).abs() < f64::EPSILON);
        assert!((coerce_price(&Value::Null) - 0.0).abs() < f64::EPSILON);
        assert!((coerce_price(&json!({"amount": 2})) - 0.0).abs() < f64::EPSILON);
        assert!((coerce_price(&json!("")) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_coerce_stock_truncates_fractions() {
        assert_eq!(coerce_stock(&json!("6")), 6);
        assert_eq!(coerce_stock(&json!(4.9)), 4);
    }

    #[test]
    fn test_clamp_forms_match_coercion() {
        // Parse-first-clamp-last callers must land on the same values as
        // the one-shot coercions.
        for raw in [json!("1 234,50"), json!("-5"), json!(2.4), json!("gratis")] {
            assert!(
                (clamp_price(parse_number(&raw)) - coerce_price(&raw)).abs() < f64::EPSILON,
                "price mismatch for {raw}"
            );
            assert_eq!(
                clamp_stock(parse_number(&raw)),
                coerce_stock(&raw),
                "stock mismatch for {raw}"
            );
        }
    }

    #[test]
    fn test_clamp_rejects_non_finite() {
        assert!((clamp_price(Some(f64::NAN)) - 0.0).abs() < f64::EPSILON);
        assert!((clamp_price(Some(f64::INFINITY)) - 0.0).abs() < f64::EPSILON);
        assert!((clamp_price(None) - 0.0).abs() < f64::EPSILON);
        assert_eq!(clamp_stock(Some(f64::NAN)), 0);
        assert_eq!(clamp_stock(Some(1e18)), u32::MAX);
        assert_eq!(clamp_stock(None), 0);
    }

    #[test]
    fn test_coerce_stock_invalid_is_zero() {
        assert_eq!(coerce_stock(&json!("-3")), 0);
        assert_eq!(coerce_stock(&Value::Null), 0);
        assert_eq!(coerce_stock(&json!("viele")), 0);
    }

    #[test]
    fn test_format_eur() {
        assert_eq!(format_eur(1.8), "1,80 €");
        assert_eq!(format_eur(0.0), "0,00 €");
    }

    #[test]
    fn test_format_eur_groups_thousands() {
        assert_eq!(format_eur(1234.5), "1.234,50 €");
        assert_eq!(format_eur(999.99), "999,99 €");
        assert_eq!(format_eur(1_000_000.0), "1.000.000,00 €");
    }
}
