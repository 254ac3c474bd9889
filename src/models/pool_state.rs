use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use super::Timestamped;

/// Pool state observed at one swap.
///
/// Snapshots are not sampled on a clock: the stream yields one per swap in
/// the window. Price state (`sqrt_price_x96`, `tick`, and the token prices
/// derived from them) is the swap's own. `liquidity`, `tvl_usd`,
/// `volume_usd` and `fees_usd` come from the pool entity and are as of the
/// fetch, identical on every snapshot of one export.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "SnapshotWire")]
pub struct PoolStateSnapshot {
    pub timestamp: u64,
    pub block_number: u64,

    // Price state
    pub liquidity: String,
    pub sqrt_price_x96: String,
    pub tick: i64,

    // Aggregates, as of the fetch
    pub tvl_usd: String,
    pub volume_usd: String,
    pub fees_usd: String,

    // Token metadata
    pub token0_symbol: String,
    pub token1_symbol: String,
    pub token0_decimals: u8,
    pub token1_decimals: u8,
}

impl Timestamped for PoolStateSnapshot {
    fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

#[serde_as]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotWire {
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    timestamp: u64,
    transaction: BlockRef,
    #[serde(rename = "sqrtPriceX96")]
    sqrt_price_x96: String,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    tick: i64,
    pool: PoolWire,
}

#[serde_as]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockRef {
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    block_number: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PoolWire {
    liquidity: String,
    #[serde(rename = "totalValueLockedUSD")]
    tvl_usd: String,
    #[serde(rename = "volumeUSD")]
    volume_usd: String,
    #[serde(rename = "feesUSD")]
    fees_usd: String,
    token0: TokenWire,
    token1: TokenWire,
}

#[serde_as]
#[derive(Deserialize)]
struct TokenWire {
    symbol: String,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    decimals: u8,
}

impl From<SnapshotWire> for PoolStateSnapshot {
    fn from(wire: SnapshotWire) -> Self {
        Self {
            timestamp: wire.timestamp,
            block_number: wire.transaction.block_number,
            liquidity: wire.pool.liquidity,
            sqrt_price_x96: wire.sqrt_price_x96,
            tick: wire.tick,
            tvl_usd: wire.pool.tvl_usd,
            volume_usd: wire.pool.volume_usd,
            fees_usd: wire.pool.fees_usd,
            token0_symbol: wire.pool.token0.symbol,
            token1_symbol: wire.pool.token1.symbol,
            token0_decimals: wire.pool.token0.decimals,
            token1_decimals: wire.pool.token1.decimals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_flattens_nested_swap_shape() {
        let snapshot: PoolStateSnapshot = serde_json::from_value(json!({
            "timestamp": "1700000000",
            "transaction": {"blockNumber": "18500000"},
            "sqrtPriceX96": "1771595571142957166518320255467520",
            "tick": "200000",
            "pool": {
                "liquidity": "25000000000000000000",
                "totalValueLockedUSD": "1000000",
                "volumeUSD": "5000000",
                "feesUSD": "15000",
                "token0": {"symbol": "USDC", "decimals": "6"},
                "token1": {"symbol": "WETH", "decimals": "18"}
            }
        }))
        .unwrap();

        assert_eq!(snapshot.timestamp(), 1_700_000_000);
        assert_eq!(snapshot.block_number, 18_500_000);
        assert_eq!(snapshot.tick, 200_000);
        assert_eq!(snapshot.token1_symbol, "WETH");
        assert_eq!(snapshot.token0_decimals, 6);
    }
}
