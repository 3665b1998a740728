//! Rounding and conversion between amounts and percentages.
//!
//! Every rounding in the crate is round-half-away-from-zero: `0.005` becomes
//! `0.01` and `-0.005` becomes `-0.01`. Reconciliation relies on all
//! operations agreeing on this rule.

use crate::error::SplitError;
use crate::types::{Amount, Percentage, FULL_PERCENTAGE};

const CENTS_PER_UNIT: f64 = 100.0;

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * CENTS_PER_UNIT).round() / CENTS_PER_UNIT
}

/// Integer division rounding half away from zero. A zero denominator yields 0.
pub fn div_round(numerator: i128, denominator: i128) -> i64 {
    if denominator == 0 {
        return 0;
    }

    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    let result = if 2 * remainder.abs() >= denominator.abs() {
        let away_from_zero = if (numerator < 0) == (denominator < 0) {
            1
        } else {
            -1
        };
        quotient + away_from_zero
    } else {
        quotient
    };

    clamp_to_i64(result)
}

/// Sum without overflowing. A sum out of the `i64` range saturates.
pub fn saturating_sum<I: IntoIterator<Item = i64>>(values: I) -> i64 {
    clamp_to_i64(values.into_iter().map(i128::from).sum())
}

pub(crate) fn clamp_to_i64(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

/// Convert a floating-point total (in currency units) to cents.
///
/// Negative and non-finite totals are rejected.
pub fn amount_from_f64(value: f64) -> Result<Amount, SplitError> {
    if !value.is_finite() || value < 0.0 {
        return Err(SplitError::invalid_amount(value.to_string()));
    }
    Ok((value * CENTS_PER_UNIT).round() as Amount)
}

pub fn amount_to_f64(amount: Amount) -> f64 {
    amount as f64 / CENTS_PER_UNIT
}

/// `round2(total × percentage / 100)`
pub fn amount_from_percentage(total_amount: Amount, percentage: Percentage) -> Amount {
    div_round(
        total_amount as i128 * percentage as i128,
        FULL_PERCENTAGE as i128,
    )
}

/// `round2(amount / total × 100)`, or 0 when the total is 0.
pub fn percentage_from_amount(amount: Amount, total_amount: Amount) -> Percentage {
    if total_amount == 0 {
        return 0;
    }
    div_round(
        amount as i128 * FULL_PERCENTAGE as i128,
        total_amount as i128,
    )
}
