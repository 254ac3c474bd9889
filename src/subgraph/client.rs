use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    config::SubgraphSettings,
    error::{ExportError, Result},
};

const SOURCE: &str = "subgraph";

/// Structured query access to the indexed event store.
///
/// Implementations return the `data` object of a successful response and
/// turn transport failures and error payloads into
/// [`ExportError::UpstreamQuery`]. No implementation retries.
#[async_trait]
pub trait IndexedQuery: Send + Sync {
    async fn query(&self, document: &str, variables: Value) -> Result<Value>;
}

/// GraphQL-over-HTTP client for a hosted subgraph.
#[derive(Clone)]
pub struct SubgraphClient {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl SubgraphClient {
    pub fn new(settings: &SubgraphSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| ExportError::upstream(SOURCE, format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: settings.url.clone(),
            api_key: settings.api_key.clone(),
        })
    }
}

#[async_trait]
impl IndexedQuery for SubgraphClient {
    async fn query(&self, document: &str, variables: Value) -> Result<Value> {
        debug!("Subgraph query with variables {}", variables);

        let mut request = self
            .client
            .post(&self.url)
            .json(&json!({ "query": document, "variables": variables }));

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ExportError::upstream(SOURCE, format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExportError::upstream(
                SOURCE,
                format!("HTTP {}: {}", status, body),
            ));
        }

        let body: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| ExportError::upstream(SOURCE, format!("invalid response body: {}", e)))?;

        into_data(body)
    }
}

fn into_data(body: GraphQlResponse) -> Result<Value> {
    if !body.errors.is_empty() {
        let messages: Vec<String> = body.errors.into_iter().map(|e| e.message).collect();
        return Err(ExportError::upstream(SOURCE, messages.join("; ")));
    }

    body.data
        .ok_or_else(|| ExportError::upstream(SOURCE, "response carried neither data nor errors"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: Value) -> Result<Value> {
        into_data(serde_json::from_value(raw).unwrap())
    }

    #[test]
    fn test_error_payload_is_surfaced_verbatim() {
        let err = parse(json!({
            "errors": [
                {"message": "indexing_error"},
                {"message": "Store error: database unavailable"}
            ]
        }))
        .unwrap_err();

        match err {
            ExportError::UpstreamQuery { source_name, detail } => {
                assert_eq!(source_name, "subgraph");
                assert_eq!(detail, "indexing_error; Store error: database unavailable");
            },
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_errors_win_over_partial_data() {
        let result = parse(json!({
            "data": {"swaps": []},
            "errors": [{"message": "partial failure"}]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_data_is_returned() {
        let data = parse(json!({"data": {"swaps": [{"id": "a"}]}})).unwrap();
        assert_eq!(data["swaps"][0]["id"], "a");
    }

    #[test]
    fn test_missing_data_is_an_error() {
        assert!(parse(json!({})).is_err());
    }
}
