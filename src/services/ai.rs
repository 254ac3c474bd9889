use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use serde::Deserialize;
use serde_json::json;

use crate::{
    config::AiSettings,
    error::{ExportError, Result},
};

const SOURCE: &str = "ai";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const SYSTEM_PROMPT: &str = "You translate questions about a single Uniswap v3 pool into one \
ClickHouse SQL query. Always filter on the pool address you are given. Reply with the SQL \
statement only, without explanation.";

/// Turns a natural-language question about a pool into one SQL statement.
/// The statement is not checked locally.
#[async_trait]
pub trait SqlGenerator: Send + Sync {
    async fn generate_sql(&self, question: &str, pool_address: &str) -> Result<String>;
}

/// OpenAI-compatible chat-completions client.
pub struct AiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl AiClient {
    pub fn new(settings: &AiSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ExportError::upstream(SOURCE, format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", settings.url.trim_end_matches('/')),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        })
    }
}

#[async_trait]
impl SqlGenerator for AiClient {
    async fn generate_sql(&self, question: &str, pool_address: &str) -> Result<String> {
        info!("Generating SQL with {} for pool {}", self.model, pool_address);

        let body = json!({
            "model": self.model,
            "temperature": 0,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": format!("Pool address: {}\n\n{}", pool_address, question) },
            ],
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExportError::upstream(SOURCE, format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ExportError::upstream(SOURCE, format!("HTTP {}: {}", status, text)));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ExportError::upstream(SOURCE, format!("malformed completion: {}", e)))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ExportError::upstream(SOURCE, "completion has no content"))?;

        let sql = strip_code_fences(&content);
        debug!("Generated SQL: {}", sql);

        Ok(sql)
    }
}

/// Remove a surrounding markdown code fence (with or without a language
/// tag) and trim whitespace.
pub fn strip_code_fences(content: &str) -> String {
    let trimmed = content.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };

    // drop the language tag line
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    let body = body.strip_suffix("```").unwrap_or(body);

    body.trim().to_string()
}
