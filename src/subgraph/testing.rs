//! In-memory [`IndexedQuery`] serving scripted entity sets.
//!
//! Windowed operations honor `timestamp >= $cursor` and `$first` the way the
//! hosted endpoint does; keyed datasets honor `key > $after` in key order.
//! Every request is recorded for assertions.

use std::{cmp::Ordering, collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use super::IndexedQuery;
use crate::error::{ExportError, Result};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub operation: String,
    pub variables: Value,
}

impl RecordedRequest {
    pub fn cursor(&self) -> Option<u64> {
        as_u64(self.variables.get("cursor")?)
    }
}

/// How a keyed dataset compares its sort key.
#[derive(Debug, Clone, Copy)]
pub enum KeyKind {
    Text,
    Integer,
}

struct Dataset {
    field: String,
    records: Vec<Value>,
    key: Option<(String, KeyKind)>,
}

struct Failure {
    after_successes: usize,
    message: String,
}

#[derive(Default)]
pub struct ScriptedIndex {
    datasets: HashMap<String, Dataset>,
    failures: HashMap<String, Failure>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `records` for the named operation under response field `field`.
    pub fn with_records(mut self, operation: &str, field: &str, records: Vec<Value>) -> Self {
        self.datasets.insert(
            operation.to_string(),
            Dataset {
                field: field.to_string(),
                records,
                key: None,
            },
        );
        self
    }

    /// Serve `records` as a full-state entity ordered by `key`.
    pub fn with_keyed_records(
        mut self,
        operation: &str,
        field: &str,
        key: &str,
        kind: KeyKind,
        records: Vec<Value>,
    ) -> Self {
        self.datasets.insert(
            operation.to_string(),
            Dataset {
                field: field.to_string(),
                records,
                key: Some((key.to_string(), kind)),
            },
        );
        self
    }

    /// Let `after_successes` requests for `operation` succeed, then fail.
    pub fn failing_after(mut self, operation: &str, after_successes: usize, message: &str) -> Self {
        self.failures.insert(
            operation.to_string(),
            Failure {
                after_successes,
                message: message.to_string(),
            },
        );
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_for(&self, operation: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.operation == operation)
            .collect()
    }
}

#[async_trait]
impl IndexedQuery for ScriptedIndex {
    async fn query(&self, document: &str, variables: Value) -> Result<Value> {
        let operation = operation_name(document);

        let prior = {
            let mut requests = self.requests.lock().unwrap();
            let prior = requests.iter().filter(|r| r.operation == operation).count();
            requests.push(RecordedRequest {
                operation: operation.clone(),
                variables: variables.clone(),
            });
            prior
        };

        // Yield so sibling streams interleave as they would over the network.
        tokio::task::yield_now().await;

        if let Some(failure) = self.failures.get(&operation) {
            if prior >= failure.after_successes {
                return Err(ExportError::upstream("subgraph", failure.message.clone()));
            }
        }

        let Some(dataset) = self.datasets.get(&operation) else {
            return Err(ExportError::upstream(
                "subgraph",
                format!("no dataset scripted for {}", operation),
            ));
        };

        let first = variables
            .get("first")
            .and_then(as_u64)
            .unwrap_or(u64::MAX) as usize;

        if let (Some((key, kind)), Some(after)) = (&dataset.key, variables.get("after")) {
            let mut page: Vec<&Value> = dataset
                .records
                .iter()
                .filter(|r| compare_keys(r.get(key.as_str()), after, *kind) == Ordering::Greater)
                .collect();
            page.sort_by(|a, b| {
                compare_keys(a.get(key.as_str()), b.get(key.as_str()).unwrap_or(&Value::Null), *kind)
            });

            let page: Vec<Value> = page.into_iter().take(first).cloned().collect();
            let mut data = serde_json::Map::new();
            data.insert(dataset.field.clone(), Value::Array(page));
            return Ok(Value::Object(data));
        }

        let page: Vec<Value> = match variables.get("cursor").and_then(as_u64) {
            Some(cursor) => dataset
                .records
                .iter()
                .filter(|r| r.get("timestamp").and_then(as_u64).unwrap_or(0) >= cursor)
                .take(first)
                .cloned()
                .collect(),
            None => dataset.records.iter().take(first).cloned().collect(),
        };

        let mut data = serde_json::Map::new();
        data.insert(dataset.field.clone(), Value::Array(page));
        Ok(Value::Object(data))
    }
}

fn operation_name(document: &str) -> String {
    document
        .split_whitespace()
        .skip_while(|word| *word != "query")
        .nth(1)
        .map(|name| name.split('(').next().unwrap_or(name).to_string())
        .unwrap_or_default()
}

fn compare_keys(left: Option<&Value>, right: &Value, kind: KeyKind) -> Ordering {
    let Some(left) = left else {
        return Ordering::Less;
    };
    match kind {
        KeyKind::Integer => as_i64(left).cmp(&as_i64(right)),
        KeyKind::Text => left.as_str().cmp(&right.as_str()),
    }
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

// ============================================
// Record builders
// ============================================

pub fn tx(hash: &str, block: u64) -> Value {
    json!({
        "id": hash,
        "blockNumber": block.to_string(),
        "gasUsed": "100000",
        "gasPrice": "2000000000"
    })
}

pub fn swap(id: &str, timestamp: u64) -> Value {
    json!({
        "id": id,
        "transaction": tx(&format!("0xtx{}", id), 18_000_000 + timestamp),
        "timestamp": timestamp.to_string(),
        "logIndex": "7",
        "sender": "0x1111111111111111111111111111111111111111",
        "recipient": "0x2222222222222222222222222222222222222222",
        "origin": "0x3333333333333333333333333333333333333333",
        "amount0": "-1000.5",
        "amount1": "0.5",
        "amountUSD": "1000.25",
        "sqrtPriceX96": "79228162514264337593543950336",
        "tick": "0"
    })
}

pub fn liquidity(id: &str, timestamp: u64) -> Value {
    json!({
        "id": id,
        "transaction": tx(&format!("0xtx{}", id), 18_000_000 + timestamp),
        "timestamp": timestamp.to_string(),
        "logIndex": 3,
        "owner": "0x4444444444444444444444444444444444444444",
        "tickLower": "-600",
        "tickUpper": "600",
        "amount": "1000000",
        "amount0": "10",
        "amount1": "20",
        "amountUSD": null
    })
}

pub fn pool_state(timestamp: u64) -> Value {
    json!({
        "timestamp": timestamp.to_string(),
        "transaction": {"blockNumber": (18_000_000 + timestamp).to_string()},
        "sqrtPriceX96": "79228162514264337593543950336",
        "tick": "0",
        "pool": {
            "liquidity": "1000",
            "totalValueLockedUSD": "500",
            "volumeUSD": "100",
            "feesUSD": "0.3",
            "token0": {"symbol": "AAA", "decimals": "18"},
            "token1": {"symbol": "BBB", "decimals": "18"}
        }
    })
}

pub fn collect(id: &str, timestamp: u64) -> Value {
    json!({
        "id": id,
        "transaction": {"id": format!("0xtx{}", id), "blockNumber": "18000000"},
        "timestamp": timestamp.to_string(),
        "logIndex": "2",
        "owner": "0x5555555555555555555555555555555555555555",
        "tickLower": "-60",
        "tickUpper": "60",
        "amount0": "1.5",
        "amount1": "0",
        "amountUSD": "1.5"
    })
}

pub fn position(id: &str) -> Value {
    json!({
        "id": id,
        "owner": "0x6666666666666666666666666666666666666666",
        "tickLower": {"tickIdx": "-887220"},
        "tickUpper": {"tickIdx": "887220"},
        "liquidity": "123456789",
        "depositedToken0": "10",
        "depositedToken1": "20",
        "withdrawnToken0": "0",
        "withdrawnToken1": "0",
        "collectedFeesToken0": "0.1",
        "collectedFeesToken1": "0.2",
        "feeGrowthInside0LastX128": "340282366920938463463374607431768211455",
        "feeGrowthInside1LastX128": "0",
        "transaction": {"timestamp": "1600000000"}
    })
}

pub fn tick(idx: i64) -> Value {
    json!({
        "tickIdx": idx.to_string(),
        "liquidityGross": "1000",
        "liquidityNet": "-1000",
        "price0": "1.0001",
        "price1": "0.9999",
        "volumeToken0": "0",
        "volumeToken1": "0",
        "volumeUSD": "0",
        "feesUSD": "0",
        "collectedFeesToken0": "0",
        "collectedFeesToken1": "0",
        "collectedFeesUSD": "0",
        "feeGrowthOutside0X128": "0",
        "feeGrowthOutside1X128": "0"
    })
}

pub fn pool(id: &str, token0: &str, token1: &str) -> Value {
    json!({
        "id": id,
        "feeTier": "3000",
        "totalValueLockedUSD": "1000000.5",
        "token0": {"id": token0, "symbol": "AAA", "name": "Token A", "decimals": "18"},
        "token1": {"id": token1, "symbol": "BBB", "name": "Token B", "decimals": "6"}
    })
}
