//! Price sanity bounds.
//!
//! A ratio between two tokens can be extreme (BTC/SHIB is around 7e9) but
//! ratios beyond 1e12 in either direction are decimal or encoding errors.
//! Such prices are exported as empty cells instead of misleading numbers.

/// Maximum reasonable price ratio between two tokens (token1/token0).
pub const MAX_PRICE_RATIO: f64 = 1e12;

/// Minimum reasonable price ratio. Inverse of MAX_PRICE_RATIO.
pub const MIN_PRICE_RATIO: f64 = 1e-12;

/// Validate a price ratio (token1/token0) is within reasonable bounds.
/// Returns Some(price) if valid, None if invalid.
#[inline]
pub fn validate_price_ratio(price: f64) -> Option<f64> {
    if price > 0.0 && price.is_finite() && price >= MIN_PRICE_RATIO && price <= MAX_PRICE_RATIO {
        Some(price)
    } else {
        None
    }
}
