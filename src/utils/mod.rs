//! Utility functions for the export pipeline.
//!
//! - [`conversion`] - Address normalization, fixed-point formatting, gas cost
//! - [`price`] - sqrtPriceX96 to decimal-adjusted prices
//! - [`validation`] - Price sanity bounds

mod conversion;
mod price;
mod validation;

// Conversion utilities
pub use conversion::{format_scaled, gas_cost_native, hex_encode, normalize_address};

// Price conversion utilities
pub use price::{sqrt_price_x96_str_to_adjusted_price, sqrt_price_x96_str_to_token_prices};

// Validation utilities
pub use validation::{validate_price_ratio, MAX_PRICE_RATIO, MIN_PRICE_RATIO};
