//! Deposit/rent conversion arithmetic.
//!
//! This module provides the pure calculation layer used by the converter:
//! the linear exchange between a refundable deposit and a monthly rent, and
//! the rounding and clamping helpers it relies on.

pub mod common;
pub mod conversion;

pub use conversion::{CONVERSION_RATE, deposit_to_rent, rent_to_deposit};
