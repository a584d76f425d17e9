pub mod calculations;
pub mod converter;
pub mod models;

pub use converter::{ConverterCallbacks, ConverterState, ConverterView, DepositRentConverter};
pub use models::*;
