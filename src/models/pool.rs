use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

/// ERC-20 token metadata as indexed alongside a pool.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenDescriptor {
    #[serde(rename = "id")]
    pub address: String,
    pub symbol: String,
    pub name: String,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub decimals: u8,
}

/// The pool an export is scoped to.
///
/// Resolved fresh for every request as the highest-TVL pool holding the
/// requested token; never cached.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolDescriptor {
    pub id: String,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub fee_tier: u32,
    #[serde(rename = "totalValueLockedUSD")]
    pub tvl_usd: String,
    pub token0: TokenDescriptor,
    pub token1: TokenDescriptor,
}

impl PoolDescriptor {
    /// The side of the pool holding `address`, falling back to token0 when
    /// neither matches.
    pub fn token_for(&self, address: &str) -> &TokenDescriptor {
        if self.token1.address.eq_ignore_ascii_case(address) {
            &self.token1
        } else {
            &self.token0
        }
    }
}
