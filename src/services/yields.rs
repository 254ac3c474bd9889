use std::time::Duration;

use log::info;
use serde_json::Value;

use crate::{
    config::YieldSettings,
    error::{ExportError, Result},
};

const SOURCE: &str = "yields";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pulls yield-rate records and hands them through untouched.
pub struct YieldClient {
    client: reqwest::Client,
    url: String,
}

impl YieldClient {
    pub fn new(settings: &YieldSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ExportError::upstream(SOURCE, format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: settings.url.clone(),
        })
    }

    /// Fetch every record, or only those whose `pool` field equals `pool`.
    pub async fn fetch(&self, pool: Option<&str>) -> Result<Vec<Value>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ExportError::upstream(SOURCE, format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExportError::upstream(SOURCE, format!("HTTP {}", status)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ExportError::upstream(SOURCE, format!("malformed response: {}", e)))?;

        let records = select_records(body, pool)?;
        info!("Fetched {} yield records", records.len());

        Ok(records)
    }
}

/// Accepts either a bare array or a `{ "data": [...] }` envelope.
fn select_records(body: Value, pool: Option<&str>) -> Result<Vec<Value>> {
    let records = match body {
        Value::Array(records) => records,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(records)) => records,
            _ => return Err(ExportError::upstream(SOURCE, "response has no data array")),
        },
        _ => return Err(ExportError::upstream(SOURCE, "unexpected response shape")),
    };

    Ok(match pool {
        Some(pool) => records
            .into_iter()
            .filter(|r| r.get("pool").and_then(Value::as_str) == Some(pool))
            .collect(),
        None => records,
    })
}
