//! Amount coercion
//!
//! Stored order totals are untrusted: they may be missing, numbers, numeric
//! strings or junk. [`coerce_amount`] turns any of them into a [`Decimal`]
//! and never fails; anything that is not a finite number counts as zero.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde_json::Value;
use std::str::FromStr;

/// Stored total → `Decimal`, `0` when missing or not numeric
///
/// - JSON numbers keep their exact decimal value
/// - strings are trimmed, then parsed as plain or scientific notation
/// - null, booleans, arrays, objects and unparseable text are `0`
pub fn coerce_amount(value: Option<&Value>) -> Decimal {
    match value {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(s.trim()),
        _ => Decimal::ZERO,
    }
}

fn parse_decimal(text: &str) -> Decimal {
    // Digit separators ("1_000") are not plain notation
    if text.is_empty() || text.contains('_') {
        return Decimal::ZERO;
    }
    if let Ok(d) = Decimal::from_str(text) {
        return d;
    }
    // Scientific notation or values beyond 28 significant digits
    text.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .and_then(Decimal::from_f64)
        .unwrap_or(Decimal::ZERO)
}

/// Sum of coerced amounts; saturates at `Decimal::MAX`/`MIN` instead of overflowing
pub fn sum_amounts<'a>(values: impl IntoIterator<Item = Option<&'a Value>>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, |acc, value| {
        let amount = coerce_amount(value);
        acc.checked_add(amount).unwrap_or_else(|| {
            tracing::warn!(%acc, %amount, "Sales total overflowed, saturating");
            if amount.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        })
    })
}
