use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as an amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for amount parsing: trims whitespace and removes comma
/// and underscore digit separators.
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace([',', '_'], "")
}

/// Parses a string into an amount.
///
/// Accepts `1,234,000` and `1_234_000`. Empty input is treated as 0.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| ParseAmountError {
        input: s.to_string(),
        source: e,
    })
}

/// Parses an amount typed into an edit field, falling back to 0 when the
/// text is not a number. Logs a warning on fallback.
pub fn coerce_amount(s: &str) -> Decimal {
    parse_amount(s).unwrap_or_else(|error| {
        tracing::warn!(%error, "non-numeric amount coerced to 0");
        Decimal::ZERO
    })
}
