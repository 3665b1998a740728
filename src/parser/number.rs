//! Parse the numbers typed by the user.
//!
//! Amounts and percentages are read as decimal text and converted to
//! hundredths without going through floating point. Digits after the second
//! decimal are rounded half away from zero.

use log::debug;
use nom::{
    character::complete::{digit0, multispace0, one_of},
    combinator::{all_consuming, map_opt, opt, verify},
    sequence::{delimited, preceded, tuple},
    IResult,
};

use crate::error::SplitError;

/// Ten trillion, in hundredths. Larger values are rejected.
pub const MAX_HUNDREDTHS: i64 = 1_000_000_000_000_000;

type DecimalParts<'a> = (Option<char>, &'a str, Option<&'a str>);

/// Parse a decimal number and return it in hundredths (`12,5` is `1250`).
///
/// Both '.' and ',' are accepted as decimal separator.
pub fn parse_hundredths(s: &str) -> Result<i64, SplitError> {
    all_consuming(delimited(multispace0, hundredths, multispace0))(s)
        .map(|(_, value)| value)
        .map_err(|_| SplitError::invalid_number(s.to_string()))
}

/// Like [`parse_hundredths`], but input that is not a number counts as zero.
///
/// Used while the user is still typing, where half-written values are normal.
pub fn parse_hundredths_or_zero(s: &str) -> i64 {
    parse_hundredths(s).unwrap_or_else(|e| {
        debug!("Treating input as zero: {e}");
        0
    })
}

fn hundredths(s: &str) -> IResult<&str, i64> {
    map_opt(decimal, to_hundredths)(s)
}

fn decimal(s: &str) -> IResult<&str, DecimalParts> {
    verify(
        tuple((
            opt(one_of("+-")),
            digit0,
            opt(preceded(one_of(".,"), digit0)),
        )),
        |(_, integer_part, fractional_part): &DecimalParts| {
            !integer_part.is_empty() || fractional_part.map_or(false, |f| !f.is_empty())
        },
    )(s)
}

fn to_hundredths((sign, integer_part, fractional_part): DecimalParts) -> Option<i64> {
    let integer_part: i64 = if integer_part.is_empty() {
        0
    } else {
        integer_part.parse().ok()?
    };

    let digits: Vec<i64> = fractional_part
        .unwrap_or("")
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(i64::from)
        .collect();
    let tenths = digits.first().copied().unwrap_or(0);
    let hundredths = digits.get(1).copied().unwrap_or(0);
    let round_up = digits.get(2).map_or(false, |&d| d >= 5);

    let magnitude = integer_part
        .checked_mul(100)?
        .checked_add(tenths * 10 + hundredths + i64::from(round_up))?;
    if magnitude > MAX_HUNDREDTHS {
        return None;
    }

    if sign == Some('-') {
        Some(-magnitude)
    } else {
        Some(magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hundredths() {
        assert_eq!(parse_hundredths("3.45"), Ok(345));
        assert_eq!(parse_hundredths("3,45"), Ok(345));
        assert_eq!(parse_hundredths("3"), Ok(300));
        assert_eq!(parse_hundredths("+3"), Ok(300));
        assert_eq!(parse_hundredths("-3.45"), Ok(-345));
        assert_eq!(parse_hundredths("12.5"), Ok(1250));
        assert_eq!(parse_hundredths(".5"), Ok(50));
        assert_eq!(parse_hundredths("7."), Ok(700));
        assert_eq!(parse_hundredths("  42.10 "), Ok(4210));
    }

    #[test]
    fn test_parse_hundredths_rounding() {
        assert_eq!(parse_hundredths("33.333"), Ok(3333));
        assert_eq!(parse_hundredths("33.335"), Ok(3334));
        assert_eq!(parse_hundredths("49.995"), Ok(5000));
        assert_eq!(parse_hundredths("0.00499"), Ok(0));
        assert_eq!(parse_hundredths("-0.005"), Ok(-1));
    }

    #[test]
    fn test_parse_hundredths_invalid() {
        assert_eq!(
            parse_hundredths("abc"),
            Err(SplitError::InvalidNumber("abc".to_string()))
        );
        assert!(parse_hundredths("").is_err());
        assert!(parse_hundredths("-").is_err());
        assert!(parse_hundredths(".").is_err());
        assert!(parse_hundredths("1.2.3").is_err());
        assert!(parse_hundredths("12a").is_err());
        assert!(parse_hundredths("99999999999999999999").is_err());
        assert!(parse_hundredths("90000000000000000").is_err());
        assert!(parse_hundredths("-10000000000000.01").is_err());
        assert_eq!(parse_hundredths("10000000000000"), Ok(MAX_HUNDREDTHS));
    }

    #[test]
    fn test_parse_hundredths_or_zero() {
        assert_eq!(parse_hundredths_or_zero("25"), 2500);
        assert_eq!(parse_hundredths_or_zero("2x"), 0);
        assert_eq!(parse_hundredths_or_zero(""), 0);
        assert_eq!(parse_hundredths_or_zero("90000000000000000"), 0);
    }
}
