//! Price conversion utilities for concentrated-liquidity pools.
//!
//! Converts the Q64.96 `sqrtPriceX96` encoding carried by swaps and pool
//! state into a decimal-adjusted token1-per-token0 price.

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;
use once_cell::sync::Lazy;
use std::str::FromStr;

use super::conversion::big_pow10;
use super::validation::validate_price_ratio;

// ============================================
// Constants
// ============================================

/// 2^96 (Q64.96 fixed point scaling factor), exact.
static Q96: Lazy<BigDecimal> = Lazy::new(|| BigDecimal::from(BigInt::from(1u8) << 96usize));

// ============================================
// sqrtPriceX96 to Price Conversion
// ============================================

/// Convert sqrtPriceX96 string to adjusted price with full precision.
///
/// Accepts the sqrtPriceX96 as a string to preserve the full precision of
/// the original uint160 value.
///
/// # Arguments
/// * `sqrt_price_x96_str` - The sqrtPriceX96 value as a string
/// * `token0_decimals` - Decimal places of token0
/// * `token1_decimals` - Decimal places of token1
///
/// # Returns
/// * `Some(adjusted_price)` if valid and within reasonable bounds, `None` if invalid
pub fn sqrt_price_x96_str_to_adjusted_price(
    sqrt_price_x96_str: &str,
    token0_decimals: u8,
    token1_decimals: u8,
) -> Option<f64> {
    if token0_decimals > 24 || token1_decimals > 24 {
        return None;
    }

    let sqrt_price = BigDecimal::from_str(sqrt_price_x96_str).ok()?;
    if sqrt_price.sign() != Sign::Plus {
        return None;
    }

    // raw_price = (sqrtPriceX96 / Q96)^2
    let normalized = &sqrt_price / &*Q96;
    let raw_price = &normalized * &normalized;

    // decimal adjustment: 10^(decimals0 - decimals1)
    let decimal_diff = token0_decimals as i32 - token1_decimals as i32;
    let adjusted = if decimal_diff >= 0 {
        raw_price * big_pow10(decimal_diff as u32)
    } else {
        raw_price / big_pow10((-decimal_diff) as u32)
    };

    let adjusted_f64 = adjusted.to_f64()?;
    validate_price_ratio(adjusted_f64)
}

/// Both quote directions implied by one sqrtPriceX96, following the
/// subgraph's naming: `token0_price` is token0 per token1, `token1_price`
/// is token1 per token0.
///
/// # Returns
/// * `Some((token0_price, token1_price))`, `None` when the encoding is invalid
pub fn sqrt_price_x96_str_to_token_prices(
    sqrt_price_x96_str: &str,
    token0_decimals: u8,
    token1_decimals: u8,
) -> Option<(f64, f64)> {
    let token1_price =
        sqrt_price_x96_str_to_adjusted_price(sqrt_price_x96_str, token0_decimals, token1_decimals)?;
    let token0_price = validate_price_ratio(1.0 / token1_price)?;

    Some((token0_price, token1_price))
}
