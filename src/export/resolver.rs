use log::info;
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::{ExportError, Result},
    models::{PoolDescriptor, TokenDescriptor},
    subgraph::{queries::POOLS_FOR_TOKEN, IndexedQuery},
    utils::normalize_address,
};

/// The pool an export runs against, plus which of its tokens was asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPool {
    pub pool: PoolDescriptor,
    pub requested_token: String,
}

impl ResolvedPool {
    /// Metadata of the token the caller asked about.
    pub fn token(&self) -> &TokenDescriptor {
        self.pool.token_for(&self.requested_token)
    }
}

#[derive(Deserialize)]
struct PoolsResponse {
    pools: Vec<PoolDescriptor>,
}

/// Finds the highest-TVL pool with liquidity for a token.
///
/// Nothing is cached: every call queries the index again.
pub async fn resolve(client: &dyn IndexedQuery, token_address: &str) -> Result<ResolvedPool> {
    let token = normalize_address(token_address)?;

    let data = client
        .query(POOLS_FOR_TOKEN, json!({ "token": token }))
        .await?;

    let response: PoolsResponse = serde_json::from_value(data)
        .map_err(|e| ExportError::upstream("subgraph", format!("malformed pools response: {}", e)))?;

    let pool = response
        .pools
        .into_iter()
        .next()
        .ok_or_else(|| ExportError::NotFound(format!("no pool with liquidity for token {}", token)))?;

    info!(
        "Resolved token {} to pool {} ({}/{}, fee {}, TVL ${})",
        token, pool.id, pool.token0.symbol, pool.token1.symbol, pool.fee_tier, pool.tvl_usd
    );

    Ok(ResolvedPool {
        pool,
        requested_token: token,
    })
}
