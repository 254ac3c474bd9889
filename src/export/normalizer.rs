//! Fixed-schema tables built from raw entity collections.
//!
//! Column order is part of the exported format. Derived columns: gas cost in
//! native units, range width, and the decimal-adjusted prices.

use super::table::{Cell, Table};
use crate::{
    models::{
        CollectRecord, LiquidityRecord, PoolDescriptor, PoolStateSnapshot, PositionRecord,
        SwapRecord, TickRecord, TransactionRef,
    },
    utils::{
        gas_cost_native, sqrt_price_x96_str_to_adjusted_price, sqrt_price_x96_str_to_token_prices,
    },
};

pub const SWAP_COLUMNS: &[&str] = &[
    "id",
    "block_number",
    "timestamp",
    "tx_hash",
    "log_index",
    "sender",
    "recipient",
    "origin",
    "amount0",
    "amount1",
    "amount_usd",
    "sqrt_price_x96",
    "price",
    "tick",
    "gas_used",
    "gas_price",
    "gas_cost_native",
];

pub const LIQUIDITY_COLUMNS: &[&str] = &[
    "id",
    "action",
    "block_number",
    "timestamp",
    "tx_hash",
    "log_index",
    "owner",
    "tick_lower",
    "tick_upper",
    "range_width",
    "liquidity",
    "amount0",
    "amount1",
    "amount_usd",
    "gas_used",
    "gas_price",
    "gas_cost_native",
];

pub const POOL_STATE_COLUMNS: &[&str] = &[
    "timestamp",
    "block_number",
    "liquidity",
    "sqrt_price_x96",
    "price",
    "tick",
    "token0_price",
    "token1_price",
    "tvl_usd",
    "volume_usd",
    "fees_usd",
    "token0_symbol",
    "token1_symbol",
    "token0_decimals",
    "token1_decimals",
];

pub const POSITION_COLUMNS: &[&str] = &[
    "id",
    "owner",
    "tick_lower",
    "tick_upper",
    "range_width",
    "liquidity",
    "deposited_token0",
    "deposited_token1",
    "withdrawn_token0",
    "withdrawn_token1",
    "collected_fees_token0",
    "collected_fees_token1",
    "fee_growth_inside0_last_x128",
    "fee_growth_inside1_last_x128",
    "created_at",
];

pub const COLLECT_COLUMNS: &[&str] = &[
    "id",
    "timestamp",
    "tx_hash",
    "log_index",
    "owner",
    "tick_lower",
    "tick_upper",
    "amount0",
    "amount1",
    "amount_usd",
];

pub const TICK_COLUMNS: &[&str] = &[
    "tick_idx",
    "liquidity_gross",
    "liquidity_net",
    "price0",
    "price1",
    "volume_token0",
    "volume_token1",
    "volume_usd",
    "fees_usd",
    "collected_fees_token0",
    "collected_fees_token1",
    "collected_fees_usd",
    "fee_growth_outside0_x128",
    "fee_growth_outside1_x128",
];

fn range_width(tick_lower: i64, tick_upper: i64) -> i64 {
    tick_upper - tick_lower
}

fn gas_cells(tx: &TransactionRef) -> [Cell; 3] {
    [
        Cell::decimal(tx.gas_used.as_str()),
        Cell::decimal(tx.gas_price.as_str()),
        Cell::opt_decimal(gas_cost_native(&tx.gas_used, &tx.gas_price).as_deref()),
    ]
}

pub fn swaps_table(swaps: &[SwapRecord], pool: &PoolDescriptor) -> Table {
    let mut table = Table::with_capacity("swaps", SWAP_COLUMNS, swaps.len());

    for s in swaps {
        let price = sqrt_price_x96_str_to_adjusted_price(
            &s.sqrt_price_x96,
            pool.token0.decimals,
            pool.token1.decimals,
        );

        let mut row = vec![
            Cell::text(s.id.as_str()),
            Cell::UInt(s.transaction.block_number),
            Cell::UInt(s.timestamp),
            Cell::text(s.transaction.id.as_str()),
            Cell::UInt(s.log_index),
            Cell::text(s.sender.as_str()),
            Cell::text(s.recipient.as_str()),
            Cell::text(s.origin.as_str()),
            Cell::decimal(s.amount0.as_str()),
            Cell::decimal(s.amount1.as_str()),
            Cell::decimal(s.amount_usd.as_str()),
            Cell::decimal(s.sqrt_price_x96.as_str()),
            Cell::opt_float(price),
            Cell::Int(s.tick),
        ];
        row.extend(gas_cells(&s.transaction));
        table.push(row);
    }

    table
}

/// Mints followed by burns, stably sorted by timestamp so equal timestamps
/// keep mints ahead of burns in their original order.
pub fn liquidity_table(mints: &[LiquidityRecord], burns: &[LiquidityRecord]) -> Table {
    let mut merged: Vec<&LiquidityRecord> = mints.iter().chain(burns.iter()).collect();
    merged.sort_by_key(|r| r.timestamp);

    let mut table = Table::with_capacity("liquidity_actions", LIQUIDITY_COLUMNS, merged.len());

    for r in merged {
        let mut row = vec![
            Cell::text(r.id.as_str()),
            Cell::text(r.kind.as_str()),
            Cell::UInt(r.transaction.block_number),
            Cell::UInt(r.timestamp),
            Cell::text(r.transaction.id.as_str()),
            Cell::UInt(r.log_index),
            Cell::text(r.owner.as_str()),
            Cell::Int(r.tick_lower),
            Cell::Int(r.tick_upper),
            Cell::Int(range_width(r.tick_lower, r.tick_upper)),
            Cell::decimal(r.amount.as_str()),
            Cell::decimal(r.amount0.as_str()),
            Cell::decimal(r.amount1.as_str()),
            Cell::opt_decimal(r.amount_usd.as_deref()),
        ];
        row.extend(gas_cells(&r.transaction));
        table.push(row);
    }

    table
}

pub fn pool_states_table(states: &[PoolStateSnapshot]) -> Table {
    let mut table = Table::with_capacity("pool_states", POOL_STATE_COLUMNS, states.len());

    for s in states {
        // All three price columns come from the swap's own sqrtPriceX96.
        let prices = sqrt_price_x96_str_to_token_prices(
            &s.sqrt_price_x96,
            s.token0_decimals,
            s.token1_decimals,
        );
        let token0_price = prices.map(|(p0, _)| p0);
        let token1_price = prices.map(|(_, p1)| p1);

        table.push(vec![
            Cell::UInt(s.timestamp),
            Cell::UInt(s.block_number),
            Cell::decimal(s.liquidity.as_str()),
            Cell::decimal(s.sqrt_price_x96.as_str()),
            Cell::opt_float(token1_price),
            Cell::Int(s.tick),
            Cell::opt_float(token0_price),
            Cell::opt_float(token1_price),
            Cell::decimal(s.tvl_usd.as_str()),
            Cell::decimal(s.volume_usd.as_str()),
            Cell::decimal(s.fees_usd.as_str()),
            Cell::text(s.token0_symbol.as_str()),
            Cell::text(s.token1_symbol.as_str()),
            Cell::UInt(s.token0_decimals as u64),
            Cell::UInt(s.token1_decimals as u64),
        ]);
    }

    table
}

pub fn positions_table(positions: &[PositionRecord]) -> Table {
    let mut table = Table::with_capacity("positions", POSITION_COLUMNS, positions.len());

    for p in positions {
        table.push(vec![
            Cell::text(p.id.as_str()),
            Cell::text(p.owner.as_str()),
            Cell::Int(p.tick_lower),
            Cell::Int(p.tick_upper),
            Cell::Int(range_width(p.tick_lower, p.tick_upper)),
            Cell::decimal(p.liquidity.as_str()),
            Cell::decimal(p.deposited_token0.as_str()),
            Cell::decimal(p.deposited_token1.as_str()),
            Cell::decimal(p.withdrawn_token0.as_str()),
            Cell::decimal(p.withdrawn_token1.as_str()),
            Cell::decimal(p.collected_fees_token0.as_str()),
            Cell::decimal(p.collected_fees_token1.as_str()),
            Cell::decimal(p.fee_growth_inside0_last_x128.as_str()),
            Cell::decimal(p.fee_growth_inside1_last_x128.as_str()),
            Cell::UInt(p.created_at),
        ]);
    }

    table
}

pub fn collects_table(collects: &[CollectRecord]) -> Table {
    let mut table = Table::with_capacity("collects", COLLECT_COLUMNS, collects.len());

    for c in collects {
        table.push(vec![
            Cell::text(c.id.as_str()),
            Cell::UInt(c.timestamp),
            Cell::text(c.transaction.id.as_str()),
            Cell::UInt(c.log_index),
            Cell::text(c.owner.as_str()),
            Cell::Int(c.tick_lower),
            Cell::Int(c.tick_upper),
            Cell::decimal(c.amount0.as_str()),
            Cell::decimal(c.amount1.as_str()),
            Cell::opt_decimal(c.amount_usd.as_deref()),
        ]);
    }

    table
}

pub fn ticks_table(ticks: &[TickRecord]) -> Table {
    let mut table = Table::with_capacity("ticks", TICK_COLUMNS, ticks.len());

    for t in ticks {
        table.push(vec![
            Cell::Int(t.tick_idx),
            Cell::decimal(t.liquidity_gross.as_str()),
            Cell::decimal(t.liquidity_net.as_str()),
            Cell::decimal(t.price0.as_str()),
            Cell::decimal(t.price1.as_str()),
            Cell::decimal(t.volume_token0.as_str()),
            Cell::decimal(t.volume_token1.as_str()),
            Cell::decimal(t.volume_usd.as_str()),
            Cell::decimal(t.fees_usd.as_str()),
            Cell::decimal(t.collected_fees_token0.as_str()),
            Cell::decimal(t.collected_fees_token1.as_str()),
            Cell::decimal(t.collected_fees_usd.as_str()),
            Cell::decimal(t.fee_growth_outside0_x128.as_str()),
            Cell::decimal(t.fee_growth_outside1_x128.as_str()),
        ]);
    }

    table
}
