use std::{sync::Arc, time::Instant};

use chrono::Utc;
use log::info;

use super::{
    paginator::{fetch_all, fetch_keyed},
    resolver::{resolve, ResolvedPool},
};
use crate::{
    config::ExportSettings,
    error::{ExportError, Result},
    models::{
        CollectRecord, LiquidityKind, LiquidityRecord, PoolStateSnapshot, PositionRecord,
        SwapRecord, TickRecord,
    },
    subgraph::{queries, IndexedQuery, PAGE_SIZE},
};

const SECONDS_PER_DAY: u64 = 86_400;

/// Everything fetched for one pool and window, before normalization.
#[derive(Debug, Clone)]
pub struct Bundle {
    pub resolved: ResolvedPool,
    pub window_days: u32,
    pub min_timestamp: u64,
    pub swaps: Vec<SwapRecord>,
    pub mints: Vec<LiquidityRecord>,
    pub burns: Vec<LiquidityRecord>,
    pub pool_states: Vec<PoolStateSnapshot>,
    pub collects: Vec<CollectRecord>,
    pub positions: Vec<PositionRecord>,
    pub ticks: Vec<TickRecord>,
}

/// Runs every retrieval for a pool concurrently and joins them all-or-nothing.
pub struct Aggregator {
    client: Arc<dyn IndexedQuery>,
    max_days: u32,
    page_size: usize,
}

impl Aggregator {
    pub fn new(client: Arc<dyn IndexedQuery>, settings: &ExportSettings) -> Self {
        Self {
            client,
            max_days: settings.max_days,
            page_size: PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn max_days(&self) -> u32 {
        self.max_days
    }

    pub async fn aggregate(&self, token_address: &str, days: u32) -> Result<Bundle> {
        let now = Utc::now().timestamp().max(0) as u64;
        self.aggregate_at(token_address, days, now).await
    }

    /// Same as [`Aggregator::aggregate`] with the clock supplied by the caller.
    pub async fn aggregate_at(&self, token_address: &str, days: u32, now: u64) -> Result<Bundle> {
        if days == 0 || days > self.max_days {
            return Err(ExportError::Validation(format!(
                "window must be between 1 and {} days, got {}",
                self.max_days, days
            )));
        }

        let client = self.client.as_ref();
        let resolved = resolve(client, token_address).await?;
        let pool_id = resolved.pool.id.as_str();
        let min_timestamp = now.saturating_sub(days as u64 * SECONDS_PER_DAY);
        let page_size = self.page_size;

        let started = Instant::now();

        // Any failing stream drops its siblings and the whole result.
        let (swaps, mints, burns, pool_states, collects, positions, ticks) = tokio::try_join!(
            fetch_all::<SwapRecord>(client, &queries::SWAPS, pool_id, min_timestamp, page_size),
            fetch_all::<LiquidityRecord>(client, &queries::MINTS, pool_id, min_timestamp, page_size),
            fetch_all::<LiquidityRecord>(client, &queries::BURNS, pool_id, min_timestamp, page_size),
            fetch_all::<PoolStateSnapshot>(
                client,
                &queries::POOL_STATES,
                pool_id,
                min_timestamp,
                page_size
            ),
            fetch_all::<CollectRecord>(
                client,
                &queries::COLLECTS,
                pool_id,
                min_timestamp,
                page_size
            ),
            fetch_keyed::<PositionRecord>(client, &queries::POSITIONS, pool_id, page_size),
            fetch_keyed::<TickRecord>(client, &queries::TICKS, pool_id, page_size),
        )?;

        let mints: Vec<LiquidityRecord> = mints
            .into_iter()
            .map(|m| m.with_kind(LiquidityKind::Mint))
            .collect();
        let burns: Vec<LiquidityRecord> = burns
            .into_iter()
            .map(|b| b.with_kind(LiquidityKind::Burn))
            .collect();

        info!(
            "Aggregated pool {} over {}d in {:.2?}: swaps={} mints={} burns={} pool_states={} collects={} positions={} ticks={}",
            pool_id,
            days,
            started.elapsed(),
            swaps.len(),
            mints.len(),
            burns.len(),
            pool_states.len(),
            collects.len(),
            positions.len(),
            ticks.len()
        );

        Ok(Bundle {
            resolved,
            window_days: days,
            min_timestamp,
            swaps,
            mints,
            burns,
            pool_states,
            collects,
            positions,
            ticks,
        })
    }
}
