mod clamp_policy;
mod conversion_config;
mod listing_price;

pub use clamp_policy::ClampPolicy;
pub use conversion_config::{ConversionConfig, ConversionConfigError};
pub use listing_price::ListingPrice;
