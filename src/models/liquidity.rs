use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use super::{Timestamped, TransactionRef};

/// Which event produced a liquidity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiquidityKind {
    #[default]
    Mint,
    Burn,
}

impl LiquidityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiquidityKind::Mint => "MINT",
            LiquidityKind::Burn => "BURN",
        }
    }
}

/// Liquidity added to (mint) or removed from (burn) a tick range.
///
/// Mints and burns share one wire shape; `kind` is not part of it and is
/// set by whoever fetched the stream.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityRecord {
    #[serde(skip)]
    pub kind: LiquidityKind,

    // Identifiers
    pub id: String,
    pub transaction: TransactionRef,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub timestamp: u64,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub log_index: u64,

    // Position
    pub owner: String,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub tick_lower: i64,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub tick_upper: i64,

    // Amounts
    pub amount: String,
    pub amount0: String,
    pub amount1: String,
    /// Not priced by the indexer for every event.
    #[serde(rename = "amountUSD", default)]
    pub amount_usd: Option<String>,
}

impl LiquidityRecord {
    pub fn with_kind(mut self, kind: LiquidityKind) -> Self {
        self.kind = kind;
        self
    }
}

impl Timestamped for LiquidityRecord {
    fn timestamp(&self) -> u64 {
        self.timestamp
    }
}
