use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use super::Keyed;

/// A liquidity position as it currently stands.
///
/// Positions are fetched as the pool's full current set, not as deltas
/// within the export window.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "PositionWire")]
pub struct PositionRecord {
    pub id: String,
    pub owner: String,
    pub tick_lower: i64,
    pub tick_upper: i64,
    pub liquidity: String,

    // Lifetime flows
    pub deposited_token0: String,
    pub deposited_token1: String,
    pub withdrawn_token0: String,
    pub withdrawn_token1: String,
    pub collected_fees_token0: String,
    pub collected_fees_token1: String,

    // Fee growth checkpoints (Q128.128)
    pub fee_growth_inside0_last_x128: String,
    pub fee_growth_inside1_last_x128: String,

    pub created_at: u64,
}

impl Keyed for PositionRecord {
    fn key(&self) -> String {
        self.id.clone()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PositionWire {
    id: String,
    owner: String,
    tick_lower: TickRef,
    tick_upper: TickRef,
    liquidity: String,
    deposited_token0: String,
    deposited_token1: String,
    withdrawn_token0: String,
    withdrawn_token1: String,
    collected_fees_token0: String,
    collected_fees_token1: String,
    #[serde(rename = "feeGrowthInside0LastX128")]
    fee_growth_inside0_last_x128: String,
    #[serde(rename = "feeGrowthInside1LastX128")]
    fee_growth_inside1_last_x128: String,
    transaction: CreatedIn,
}

#[serde_as]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TickRef {
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    tick_idx: i64,
}

#[serde_as]
#[derive(Deserialize)]
struct CreatedIn {
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    timestamp: u64,
}

impl From<PositionWire> for PositionRecord {
    fn from(wire: PositionWire) -> Self {
        Self {
            id: wire.id,
            owner: wire.owner,
            tick_lower: wire.tick_lower.tick_idx,
            tick_upper: wire.tick_upper.tick_idx,
            liquidity: wire.liquidity,
            deposited_token0: wire.deposited_token0,
            deposited_token1: wire.deposited_token1,
            withdrawn_token0: wire.withdrawn_token0,
            withdrawn_token1: wire.withdrawn_token1,
            collected_fees_token0: wire.collected_fees_token0,
            collected_fees_token1: wire.collected_fees_token1,
            fee_growth_inside0_last_x128: wire.fee_growth_inside0_last_x128,
            fee_growth_inside1_last_x128: wire.fee_growth_inside1_last_x128,
            created_at: wire.transaction.timestamp,
        }
    }
}
