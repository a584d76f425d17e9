//! Linear exchange between a refundable deposit and a monthly rent.
//!
//! A convertible listing quotes a base monthly rent for the full maximum
//! deposit. Every unit of deposit the tenant withholds below that maximum is
//! charged back as rent at a fixed rate:
//!
//! | Direction        | Formula |
//! |------------------|---------|
//! | deposit → rent   | `round(base + (max - deposit) × 0.03)` |
//! | rent → deposit   | `round(max - (rent - base) ÷ 0.03)` |
//!
//! Intermediate values are kept at full decimal precision; only the final
//! result is rounded to whole currency units (half away from zero). Amounts
//! too large for a [`Decimal`] saturate at [`Decimal::MAX`] or
//! [`Decimal::MIN`] instead of overflowing.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use rent_core::ConversionConfig;
//! use rent_core::calculations::{deposit_to_rent, rent_to_deposit};
//!
//! let config = ConversionConfig {
//!     min_deposit: dec!(500000000),
//!     max_deposit: dec!(900000000),
//!     base_monthly_rent: dec!(3000000),
//! };
//!
//! assert_eq!(deposit_to_rent(&config, dec!(600000000)), dec!(12000000));
//! assert_eq!(rent_to_deposit(&config, dec!(12000000)), dec!(600000000));
//! ```

use rust_decimal::Decimal;

use crate::ConversionConfig;
use crate::calculations::common::{round_whole, saturating_div};

/// Monthly rent charged per unit of deposit withheld (3%).
pub const CONVERSION_RATE: Decimal = Decimal::from_parts(3, 0, 0, false, 2);

/// Converts a deposit into the equivalent monthly rent.
///
/// The deposit is not clamped here; callers that need range enforcement
/// clamp before converting.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use rent_core::ConversionConfig;
/// use rent_core::calculations::deposit_to_rent;
///
/// let config = ConversionConfig {
///     min_deposit: dec!(0),
///     max_deposit: dec!(900000000),
///     base_monthly_rent: dec!(3000000),
/// };
///
/// // At the maximum deposit the rent equals the base rent
/// assert_eq!(deposit_to_rent(&config, dec!(900000000)), dec!(3000000));
/// ```
pub fn deposit_to_rent(
    config: &ConversionConfig,
    deposit: Decimal,
) -> Decimal {
    let withheld = config.max_deposit.saturating_sub(deposit);
    round_whole(
        config
            .base_monthly_rent
            .saturating_add(withheld.saturating_mul(CONVERSION_RATE)),
    )
}

/// Converts a monthly rent back into the equivalent deposit.
///
/// The result may fall outside `[min_deposit, max_deposit]` when the rent is
/// outside the range the listing can produce.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use rent_core::ConversionConfig;
/// use rent_core::calculations::rent_to_deposit;
///
/// let config = ConversionConfig {
///     min_deposit: dec!(0),
///     max_deposit: dec!(900000000),
///     base_monthly_rent: dec!(3000000),
/// };
///
/// // Rent below the base pushes the deposit above the maximum
/// assert_eq!(rent_to_deposit(&config, dec!(0)), dec!(1000000000));
/// ```
pub fn rent_to_deposit(
    config: &ConversionConfig,
    rent: Decimal,
) -> Decimal {
    let surcharge = rent.saturating_sub(config.base_monthly_rent);
    round_whole(
        config
            .max_deposit
            .saturating_sub(saturating_div(surcharge, CONVERSION_RATE)),
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn test_config() -> ConversionConfig {
        ConversionConfig {
            min_deposit: dec!(500000000),
            max_deposit: dec!(900000000),
            base_monthly_rent: dec!(3000000),
        }
    }

    #[test]
    fn conversion_rate_is_three_percent() {
        assert_eq!(CONVERSION_RATE, dec!(0.03));
    }

    // =========================================================================
    // deposit_to_rent tests
    // =========================================================================

    #[test]
    fn deposit_to_rent_at_max_deposit_is_base_rent() {
        assert_eq!(deposit_to_rent(&test_config(), dec!(900000000)), dec!(3000000));
    }

    #[test]
    fn deposit_to_rent_at_min_deposit() {
        // 3,000,000 + 400,000,000 × 0.03
        assert_eq!(deposit_to_rent(&test_config(), dec!(500000000)), dec!(15000000));
    }

    #[test]
    fn deposit_to_rent_mid_range() {
        assert_eq!(deposit_to_rent(&test_config(), dec!(600000000)), dec!(12000000));
    }

    #[test]
    fn deposit_to_rent_rounds_half_away_from_zero() {
        // (900,000,000 - 899,999,950) × 0.03 = 1.5
        assert_eq!(deposit_to_rent(&test_config(), dec!(899999950)), dec!(3000002));
    }

    #[test]
    fn deposit_to_rent_above_max_lowers_rent() {
        assert_eq!(deposit_to_rent(&test_config(), dec!(1000000000)), dec!(0));
    }

    // =========================================================================
    // rent_to_deposit tests
    // =========================================================================

    #[test]
    fn rent_to_deposit_at_base_rent_is_max_deposit() {
        assert_eq!(rent_to_deposit(&test_config(), dec!(3000000)), dec!(900000000));
    }

    #[test]
    fn rent_to_deposit_mid_range() {
        assert_eq!(rent_to_deposit(&test_config(), dec!(12000000)), dec!(600000000));
    }

    #[test]
    fn rent_to_deposit_rounds_only_the_final_result() {
        // (3,000,001 - 3,000,000) ÷ 0.03 = 33.333...
        assert_eq!(rent_to_deposit(&test_config(), dec!(3000001)), dec!(899999967));
    }

    #[test]
    fn rent_to_deposit_is_not_clamped() {
        assert_eq!(rent_to_deposit(&test_config(), dec!(18000000)), dec!(400000000));
    }

    #[test]
    fn rent_to_deposit_saturates_for_huge_rent() {
        let deposit = rent_to_deposit(&test_config(), dec!(3000000000000000000000000000));

        // Quotient saturates at Decimal::MAX, then the maximum deposit is subtracted
        assert_eq!(deposit, round_whole(dec!(900000000) - Decimal::MAX));
        assert!(deposit.is_sign_negative());
    }

    #[test]
    fn rent_to_deposit_saturates_for_huge_negative_rent() {
        let deposit = rent_to_deposit(&test_config(), Decimal::MIN);

        assert_eq!(deposit, Decimal::MAX);
    }

    #[test]
    fn deposit_to_rent_saturates_for_extreme_config() {
        let config = ConversionConfig {
            min_deposit: Decimal::MIN,
            max_deposit: Decimal::MAX,
            base_monthly_rent: Decimal::MAX,
        };

        assert_eq!(deposit_to_rent(&config, Decimal::MIN), Decimal::MAX);
        assert_eq!(deposit_to_rent(&config, Decimal::MAX), Decimal::MAX);
    }

    // =========================================================================
    // Round-trip tests
    // =========================================================================

    #[test]
    fn round_trip_recovers_rent_within_one_unit() {
        let config = test_config();
        let deposits = [
            dec!(500000000),
            dec!(512345678),
            dec!(633333333),
            dec!(777777777),
            dec!(899999999),
            dec!(900000000),
        ];

        for deposit in deposits {
            let rent = deposit_to_rent(&config, deposit);
            let recovered = deposit_to_rent(&config, rent_to_deposit(&config, rent));

            assert!(
                (recovered - rent).abs() <= dec!(1),
                "deposit {deposit}: rent {rent} recovered as {recovered}"
            );
        }
    }
}
