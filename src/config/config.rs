use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use url::Url;

/// Indexed-query (GraphQL subgraph) endpoint configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct SubgraphSettings {
    pub url: String,
    /// Sent as a bearer token when present (hosted gateways require one).
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Export limits and output location.
#[derive(Debug, Deserialize, Clone)]
pub struct ExportSettings {
    /// Largest accepted window, in days.
    #[serde(default = "default_max_days")]
    pub max_days: u32,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            max_days: default_max_days(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_max_days() -> u32 {
    30
}

fn default_output_dir() -> String {
    ".".to_string()
}

/// OpenAI-compatible chat-completions endpoint used to turn questions into SQL.
#[derive(Debug, Deserialize, Clone)]
pub struct AiSettings {
    pub url: String,
    pub api_key: String,
    #[serde(default = "default_ai_model")]
    pub model: String,
}

fn default_ai_model() -> String {
    "gpt-4o-mini".to_string()
}

/// ClickHouse connection for the analytics engine.
///
/// `max_rows` is a client-side cutoff: result consumption stops once that
/// many rows have been read, whatever the engine could still produce.
#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsSettings {
    pub url: String,
    pub user: String,
    pub password: String,
    pub database: String,
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

fn default_max_rows() -> usize {
    10_000
}

/// Yield-rate data source (pass-through).
#[derive(Debug, Deserialize, Clone)]
pub struct YieldSettings {
    pub url: String,
}

/// Root application configuration.
///
/// Loaded from `config.{yaml,toml,json}` in the working directory, then
/// overlaid by `POOL_HISTORY__SECTION__KEY` environment variables.
/// The AI, analytics and yield sections are optional; commands needing an
/// absent one fail with a configuration error before any network call.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub subgraph: SubgraphSettings,
    #[serde(default)]
    pub export: ExportSettings,
    #[serde(default)]
    pub ai: Option<AiSettings>,
    #[serde(default)]
    pub analytics: Option<AnalyticsSettings>,
    #[serde(default)]
    pub yields: Option<YieldSettings>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("POOL_HISTORY").separator("__"))
            .build()?;

        Self::from_config(s)
    }

    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_url("subgraph.url", &self.subgraph.url)?;

        if let Some(ai) = &self.ai {
            check_url("ai.url", &ai.url)?;
        }
        if let Some(analytics) = &self.analytics {
            check_url("analytics.url", &analytics.url)?;
        }
        if let Some(yields) = &self.yields {
            check_url("yields.url", &yields.url)?;
        }

        if self.export.max_days == 0 {
            return Err(ConfigError::Message(
                "export.max_days must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

fn check_url(key: &str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| ConfigError::Message(format!("{} is not a valid URL ({}): {}", key, value, e)))
}
