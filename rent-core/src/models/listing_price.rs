use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Convertible price fields as they arrive on a listing record.
///
/// Every amount is optional because listings that are not convertible leave
/// them empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPrice {
    pub min_deposit: Option<Decimal>,
    pub max_deposit: Option<Decimal>,
    pub monthly_rent: Option<Decimal>,
    pub initial_deposit: Option<Decimal>,
    #[serde(default)]
    pub is_price_convertible: bool,
}

impl ListingPrice {
    /// Convertible listing with the given range and base rent, no initial deposit.
    pub fn convertible(
        min_deposit: Decimal,
        max_deposit: Decimal,
        monthly_rent: Decimal,
    ) -> Self {
        Self {
            min_deposit: Some(min_deposit),
            max_deposit: Some(max_deposit),
            monthly_rent: Some(monthly_rent),
            initial_deposit: None,
            is_price_convertible: true,
        }
    }

    pub fn with_initial_deposit(
        mut self,
        initial_deposit: Decimal,
    ) -> Self {
        self.initial_deposit = Some(initial_deposit);
        self
    }
}
