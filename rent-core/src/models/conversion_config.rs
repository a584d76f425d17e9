use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ListingPrice;

/// Errors reported when a convertible price range is inconsistent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionConfigError {
    /// The minimum deposit must be non-negative.
    #[error("minimum deposit must be non-negative, got {0}")]
    NegativeMinDeposit(Decimal),

    /// The maximum deposit must not be below the minimum deposit.
    #[error("maximum deposit {max} is below minimum deposit {min}")]
    MaxBelowMin { min: Decimal, max: Decimal },

    /// The base monthly rent must be non-negative.
    #[error("base monthly rent must be non-negative, got {0}")]
    NegativeMonthlyRent(Decimal),
}

/// Convertible price range of one listing.
///
/// `base_monthly_rent` is the rent charged when the tenant pays the full
/// `max_deposit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionConfig {
    pub min_deposit: Decimal,
    pub max_deposit: Decimal,
    pub base_monthly_rent: Decimal,
}

impl ConversionConfig {
    /// Builds the conversion basis from raw listing fields.
    ///
    /// Returns `None` when `max_deposit` or `monthly_rent` is missing or zero,
    /// since no conversion can be computed without both. A missing
    /// `min_deposit` defaults to zero. The `is_price_convertible` flag is not
    /// consulted here; it only decides whether the converter is shown.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use rust_decimal_macros::dec;
    /// use rent_core::{ConversionConfig, ListingPrice};
    ///
    /// let listing = ListingPrice {
    ///     min_deposit: None,
    ///     max_deposit: Some(dec!(900000000)),
    ///     monthly_rent: Some(dec!(3000000)),
    ///     initial_deposit: None,
    ///     is_price_convertible: true,
    /// };
    ///
    /// let config = ConversionConfig::from_listing_price(&listing).unwrap();
    /// assert_eq!(config.min_deposit, Decimal::ZERO);
    ///
    /// let no_rent = ListingPrice { monthly_rent: Some(Decimal::ZERO), ..listing };
    /// assert!(ConversionConfig::from_listing_price(&no_rent).is_none());
    /// ```
    pub fn from_listing_price(listing: &ListingPrice) -> Option<Self> {
        let max_deposit = listing.max_deposit.filter(|v| !v.is_zero())?;
        let base_monthly_rent = listing.monthly_rent.filter(|v| !v.is_zero())?;

        Some(Self {
            min_deposit: listing.min_deposit.unwrap_or(Decimal::ZERO),
            max_deposit,
            base_monthly_rent,
        })
    }

    /// Validates the range.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionConfigError`] if:
    /// - `min_deposit` is negative
    /// - `max_deposit` is below `min_deposit`
    /// - `base_monthly_rent` is negative
    pub fn validate(&self) -> Result<(), ConversionConfigError> {
        if self.min_deposit < Decimal::ZERO {
            return Err(ConversionConfigError::NegativeMinDeposit(self.min_deposit));
        }
        if self.max_deposit < self.min_deposit {
            return Err(ConversionConfigError::MaxBelowMin {
                min: self.min_deposit,
                max: self.max_deposit,
            });
        }
        if self.base_monthly_rent < Decimal::ZERO {
            return Err(ConversionConfigError::NegativeMonthlyRent(
                self.base_monthly_rent,
            ));
        }
        Ok(())
    }
}
