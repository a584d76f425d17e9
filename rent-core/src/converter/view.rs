use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculations::common::format_grouped;

/// Everything a host needs to draw the converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConverterView {
    /// Lower bound of the deposit range control.
    pub min_deposit: Decimal,
    /// Upper bound of the deposit range control.
    pub max_deposit: Decimal,
    /// Current deposit (range control position and deposit field).
    pub deposit: Decimal,
    /// Current monthly rent (rent field).
    pub rent: Decimal,
    /// Transition progress, present only while converting.
    pub progress: Option<u8>,
}

impl ConverterView {
    /// One-line description of the current deposit/rent pair.
    pub fn summary(&self) -> String {
        format!(
            "Deposit {} with monthly rent {}",
            format_grouped(self.deposit),
            format_grouped(self.rent)
        )
    }
}

impl fmt::Display for ConverterView {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}
