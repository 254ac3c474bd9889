//! GraphQL documents for every entity the export reads.
//!
//! Windowed documents take `$pool`, `$cursor` (inclusive lower timestamp
//! bound) and `$first`, and order ascending by timestamp. Full-state
//! documents have no time filter; they take `$pool`, `$after` (exclusive
//! lower bound on their sort key) and `$first`.

/// Fixed page size for every paginated read.
pub const PAGE_SIZE: usize = 1000;

/// Below the smallest valid tick (-887272).
const TICK_INDEX_FLOOR: &str = "-887273";

/// A GraphQL document plus the response field holding its records.
#[derive(Debug, Clone, Copy)]
pub struct EntityQuery {
    pub collection: &'static str,
    pub document: &'static str,
}

/// A full-state document plus the key bound its first page starts after.
#[derive(Debug, Clone, Copy)]
pub struct KeyedQuery {
    pub entity: EntityQuery,
    pub start_after: &'static str,
}

pub const POOLS_FOR_TOKEN: &str = r#"
query PoolsForToken($token: String!) {
  pools(
    first: 1
    orderBy: totalValueLockedUSD
    orderDirection: desc
    where: { or: [{ token0: $token, liquidity_gt: 0 }, { token1: $token, liquidity_gt: 0 }] }
  ) {
    id
    feeTier
    totalValueLockedUSD
    token0 { id symbol name decimals }
    token1 { id symbol name decimals }
  }
}
"#;

pub const SWAPS: EntityQuery = EntityQuery {
    collection: "swaps",
    document: r#"
query Swaps($pool: String!, $cursor: BigInt!, $first: Int!) {
  swaps(
    first: $first
    orderBy: timestamp
    orderDirection: asc
    where: { pool: $pool, timestamp_gte: $cursor }
  ) {
    id
    transaction { id blockNumber gasUsed gasPrice }
    timestamp
    logIndex
    sender
    recipient
    origin
    amount0
    amount1
    amountUSD
    sqrtPriceX96
    tick
  }
}
"#,
};

pub const MINTS: EntityQuery = EntityQuery {
    collection: "mints",
    document: r#"
query Mints($pool: String!, $cursor: BigInt!, $first: Int!) {
  mints(
    first: $first
    orderBy: timestamp
    orderDirection: asc
    where: { pool: $pool, timestamp_gte: $cursor }
  ) {
    id
    transaction { id blockNumber gasUsed gasPrice }
    timestamp
    logIndex
    owner
    tickLower
    tickUpper
    amount
    amount0
    amount1
    amountUSD
  }
}
"#,
};

pub const BURNS: EntityQuery = EntityQuery {
    collection: "burns",
    document: r#"
query Burns($pool: String!, $cursor: BigInt!, $first: Int!) {
  burns(
    first: $first
    orderBy: timestamp
    orderDirection: asc
    where: { pool: $pool, timestamp_gte: $cursor }
  ) {
    id
    transaction { id blockNumber gasUsed gasPrice }
    timestamp
    logIndex
    owner
    tickLower
    tickUpper
    amount
    amount0
    amount1
    amountUSD
  }
}
"#,
};

pub const POOL_STATES: EntityQuery = EntityQuery {
    collection: "poolStates",
    document: r#"
query PoolStates($pool: String!, $cursor: BigInt!, $first: Int!) {
  poolStates: swaps(
    first: $first
    orderBy: timestamp
    orderDirection: asc
    where: { pool: $pool, timestamp_gte: $cursor }
  ) {
    timestamp
    transaction { blockNumber }
    sqrtPriceX96
    tick
    pool {
      liquidity
      totalValueLockedUSD
      volumeUSD
      feesUSD
      token0 { symbol decimals }
      token1 { symbol decimals }
    }
  }
}
"#,
};

pub const COLLECTS: EntityQuery = EntityQuery {
    collection: "collects",
    document: r#"
query Collects($pool: String!, $cursor: BigInt!, $first: Int!) {
  collects(
    first: $first
    orderBy: timestamp
    orderDirection: asc
    where: { pool: $pool, timestamp_gte: $cursor }
  ) {
    id
    transaction { id blockNumber }
    timestamp
    logIndex
    owner
    tickLower
    tickUpper
    amount0
    amount1
    amountUSD
  }
}
"#,
};

pub const POSITIONS: KeyedQuery = KeyedQuery {
    start_after: "",
    entity: EntityQuery {
        collection: "positions",
        document: r#"
query Positions($pool: String!, $after: ID!, $first: Int!) {
  positions(
    first: $first
    orderBy: id
    orderDirection: asc
    where: { pool: $pool, id_gt: $after }
  ) {
    id
    owner
    tickLower { tickIdx }
    tickUpper { tickIdx }
    liquidity
    depositedToken0
    depositedToken1
    withdrawnToken0
    withdrawnToken1
    collectedFeesToken0
    collectedFeesToken1
    feeGrowthInside0LastX128
    feeGrowthInside1LastX128
    transaction { timestamp }
  }
}
"#,
    },
};

pub const TICKS: KeyedQuery = KeyedQuery {
    start_after: TICK_INDEX_FLOOR,
    entity: EntityQuery {
        collection: "ticks",
        document: r#"
query Ticks($pool: String!, $after: BigInt!, $first: Int!) {
  ticks(
    first: $first
    orderBy: tickIdx
    orderDirection: asc
    where: { pool: $pool, tickIdx_gt: $after }
  ) {
    tickIdx
    liquidityGross
    liquidityNet
    price0
    price1
    volumeToken0
    volumeToken1
    volumeUSD
    feesUSD
    collectedFeesToken0
    collectedFeesToken1
    collectedFeesUSD
    feeGrowthOutside0X128
    feeGrowthOutside1X128
  }
}
"#,
    },
};
