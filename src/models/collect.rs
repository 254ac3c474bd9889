use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use super::{Timestamped, TransactionRef};

/// Fees and withdrawn principal collected from a position.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectRecord {
    pub id: String,
    pub transaction: TransactionRef,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub timestamp: u64,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub log_index: u64,
    pub owner: String,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub tick_lower: i64,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub tick_upper: i64,
    pub amount0: String,
    pub amount1: String,
    #[serde(rename = "amountUSD", default)]
    pub amount_usd: Option<String>,
}

impl Timestamped for CollectRecord {
    fn timestamp(&self) -> u64 {
        self.timestamp
    }
}
