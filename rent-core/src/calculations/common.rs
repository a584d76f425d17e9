//! Common utility functions for conversion calculations.
//!
//! This module provides rounding, clamping and display helpers shared by the
//! conversion functions and the converter view.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to whole currency units, half away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use rent_core::calculations::common::round_whole;
///
/// assert_eq!(round_whole(dec!(12.4)), dec!(12));
/// assert_eq!(round_whole(dec!(12.5)), dec!(13));
/// assert_eq!(round_whole(dec!(-12.5)), dec!(-13)); // Away from zero
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps `value` into `[min, max]`.
///
/// Unlike [`Ord::clamp`] this never panics: if the range is inverted the
/// lower bound is checked first, so values below `min` yield `min` and
/// everything else yields at most `max`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use rent_core::calculations::common::clamp;
///
/// assert_eq!(clamp(dec!(5), dec!(10), dec!(20)), dec!(10));
/// assert_eq!(clamp(dec!(25), dec!(10), dec!(20)), dec!(20));
/// assert_eq!(clamp(dec!(15), dec!(10), dec!(20)), dec!(15));
/// ```
pub fn clamp(
    value: Decimal,
    min: Decimal,
    max: Decimal,
) -> Decimal {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Divides `numerator` by `divisor`, saturating at [`Decimal::MAX`] or
/// [`Decimal::MIN`] when the quotient does not fit.
///
/// A zero divisor yields zero.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use rent_core::calculations::common::saturating_div;
///
/// assert_eq!(saturating_div(dec!(9), dec!(0.03)), dec!(300));
/// assert_eq!(saturating_div(Decimal::MAX, dec!(0.03)), Decimal::MAX);
/// assert_eq!(saturating_div(Decimal::MIN, dec!(0.03)), Decimal::MIN);
/// ```
pub fn saturating_div(
    numerator: Decimal,
    divisor: Decimal,
) -> Decimal {
    if divisor.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(divisor).unwrap_or_else(|| {
        if numerator.is_sign_negative() == divisor.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

/// Formats an amount with comma thousands separators.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use rent_core::calculations::common::format_grouped;
///
/// assert_eq!(format_grouped(dec!(12000000)), "12,000,000");
/// assert_eq!(format_grouped(dec!(-1234.5)), "-1,234.5");
/// ```
pub fn format_grouped(value: Decimal) -> String {
    let raw = value.normalize().to_string();
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_whole tests
    // =========================================================================

    #[test]
    fn round_whole_rounds_down_below_midpoint() {
        assert_eq!(round_whole(dec!(599999999.49)), dec!(599999999));
    }

    #[test]
    fn round_whole_rounds_up_at_midpoint() {
        assert_eq!(round_whole(dec!(2.5)), dec!(3));
    }

    #[test]
    fn round_whole_handles_negative_midpoint() {
        assert_eq!(round_whole(dec!(-2.5)), dec!(-3));
    }

    #[test]
    fn round_whole_drops_trailing_scale() {
        let result = round_whole(dec!(3000000.00));

        assert_eq!(result, dec!(3000000));
        assert_eq!(result.scale(), 0);
    }

    // =========================================================================
    // clamp tests
    // =========================================================================

    #[test]
    fn clamp_keeps_bounds_inclusive() {
        assert_eq!(clamp(dec!(10), dec!(10), dec!(20)), dec!(10));
        assert_eq!(clamp(dec!(20), dec!(10), dec!(20)), dec!(20));
    }

    #[test]
    fn clamp_with_inverted_range_does_not_panic() {
        assert_eq!(clamp(dec!(5), dec!(20), dec!(10)), dec!(20));
        assert_eq!(clamp(dec!(15), dec!(20), dec!(10)), dec!(20));
        assert_eq!(clamp(dec!(30), dec!(20), dec!(10)), dec!(10));
    }

    // =========================================================================
    // saturating_div tests
    // =========================================================================

    #[test]
    fn saturating_div_divides_in_range() {
        assert_eq!(saturating_div(dec!(9000000), dec!(0.03)), dec!(300000000));
    }

    #[test]
    fn saturating_div_saturates_on_overflow() {
        assert_eq!(saturating_div(dec!(3000000000000000000000000000), dec!(0.03)), Decimal::MAX);
        assert_eq!(saturating_div(dec!(-3000000000000000000000000000), dec!(0.03)), Decimal::MIN);
        assert_eq!(saturating_div(dec!(3000000000000000000000000000), dec!(-0.03)), Decimal::MIN);
    }

    #[test]
    fn saturating_div_by_zero_is_zero() {
        assert_eq!(saturating_div(dec!(5), Decimal::ZERO), Decimal::ZERO);
    }

    // =========================================================================
    // format_grouped tests
    // =========================================================================

    #[test]
    fn format_grouped_short_values_have_no_separator() {
        assert_eq!(format_grouped(dec!(0)), "0");
        assert_eq!(format_grouped(dec!(999)), "999");
    }

    #[test]
    fn format_grouped_inserts_separators() {
        assert_eq!(format_grouped(dec!(1000)), "1,000");
        assert_eq!(format_grouped(dec!(900000000)), "900,000,000");
    }

    #[test]
    fn format_grouped_strips_trailing_zeros() {
        assert_eq!(format_grouped(dec!(3000000.00)), "3,000,000");
    }
}
