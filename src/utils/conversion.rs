//! Type conversion and formatting utilities.
//!
//! Conversions between the decimal strings the subgraph returns and the
//! values written into export tables. Arithmetic stays in BigInt/BigDecimal
//! so large integers keep their precision.

use alloy::primitives::{hex, Address};
use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::{Signed, Zero};
use once_cell::sync::Lazy;
use std::str::FromStr;

use crate::error::{ExportError, Result};

/// Decimals of the native gas currency (wei per ether).
const NATIVE_DECIMALS: u32 = 18;

// ============================================
// Hex Encoding
// ============================================

/// Encode bytes as a lowercase hex string with 0x prefix.
pub fn hex_encode(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse a user-supplied token address and return its lowercase form,
/// which is how the subgraph keys token and pool entities.
pub fn normalize_address(input: &str) -> Result<String> {
    let address = Address::from_str(input.trim())
        .map_err(|e| ExportError::Validation(format!("invalid address {:?}: {}", input, e)))?;

    Ok(hex_encode(address.as_slice()))
}

// ============================================
// Fixed-point Formatting
// ============================================

/// Format `value / 10^decimals` as a plain decimal string without any
/// rounding, trimming trailing fractional zeros.
///
/// ```ignore
/// assert_eq!(format_scaled(&BigInt::from(1_500_000), 6), "1.5");
/// ```
pub fn format_scaled(value: &BigInt, decimals: u32) -> String {
    let divisor = BigInt::from(10u32).pow(decimals);
    let magnitude = value.abs();
    let int_part = &magnitude / &divisor;
    let frac_part = &magnitude % &divisor;

    let sign = if value.sign() == Sign::Minus { "-" } else { "" };

    if frac_part.is_zero() {
        return format!("{}{}", sign, int_part);
    }

    let frac = format!("{:0>width$}", frac_part.to_string(), width = decimals as usize);
    format!("{}{}.{}", sign, int_part, frac.trim_end_matches('0'))
}

/// Transaction cost in native currency units: `gas_used * gas_price / 1e18`.
///
/// Both inputs are integer strings in the smallest unit. Returns `None` when
/// either is missing or not an integer.
pub fn gas_cost_native(gas_used: &str, gas_price: &str) -> Option<String> {
    let used = BigInt::from_str(gas_used).ok()?;
    let price = BigInt::from_str(gas_price).ok()?;

    Some(format_scaled(&(used * price), NATIVE_DECIMALS))
}

// ============================================
// Internal Helpers
// ============================================

static POW10_CACHE: Lazy<[BigDecimal; 37]> =
    Lazy::new(|| std::array::from_fn(|i| BigDecimal::from(BigInt::from(10u32).pow(i as u32))));

/// Compute 10^exp as BigDecimal.
pub(crate) fn big_pow10(exp: u32) -> BigDecimal {
    if (exp as usize) < POW10_CACHE.len() {
        POW10_CACHE[exp as usize].clone()
    } else {
        BigDecimal::from(BigInt::from(10u32).pow(exp))
    }
}
