use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use super::Keyed;

/// Current state of one initialized tick.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickRecord {
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub tick_idx: i64,
    pub liquidity_gross: String,
    /// Signed: crossing the tick left-to-right adds this to active liquidity.
    pub liquidity_net: String,
    pub price0: String,
    pub price1: String,

    // Cumulative volume and fees
    pub volume_token0: String,
    pub volume_token1: String,
    #[serde(rename = "volumeUSD")]
    pub volume_usd: String,
    #[serde(rename = "feesUSD")]
    pub fees_usd: String,
    pub collected_fees_token0: String,
    pub collected_fees_token1: String,
    #[serde(rename = "collectedFeesUSD")]
    pub collected_fees_usd: String,

    // Fee growth outside checkpoints (Q128.128)
    #[serde(rename = "feeGrowthOutside0X128")]
    pub fee_growth_outside0_x128: String,
    #[serde(rename = "feeGrowthOutside1X128")]
    pub fee_growth_outside1_x128: String,
}

impl Keyed for TickRecord {
    fn key(&self) -> String {
        self.tick_idx.to_string()
    }
}
