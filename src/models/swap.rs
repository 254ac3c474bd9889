use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use super::Timestamped;

/// Transaction fields shared by every event entity.
///
/// Gas fields are only requested by the streams that export them and
/// default to empty otherwise.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRef {
    pub id: String,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub block_number: u64,
    #[serde(default)]
    pub gas_used: String,
    #[serde(default)]
    pub gas_price: String,
}

/// A single swap against the pool.
///
/// `amount0`/`amount1` are signed from the pool's perspective: positive
/// flowed into the pool, negative flowed out.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRecord {
    // Identifiers
    pub id: String,
    pub transaction: TransactionRef,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub timestamp: u64,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub log_index: u64,

    // Actors
    pub sender: String,
    pub recipient: String,
    pub origin: String,

    // Amounts
    pub amount0: String,
    pub amount1: String,
    #[serde(rename = "amountUSD")]
    pub amount_usd: String,

    // Price state after the swap
    #[serde(rename = "sqrtPriceX96")]
    pub sqrt_price_x96: String,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub tick: i64,
}

impl Timestamped for SwapRecord {
    fn timestamp(&self) -> u64 {
        self.timestamp
    }
}
