//! Optional collaborators: SQL generation, analytics execution and the
//! yield-rate source. Each is built once from settings and injected; an
//! unconfigured one is reported before any network call.

pub mod ai;
pub mod analytics;
pub mod pipeline;
pub mod yields;

use std::sync::Arc;

pub use ai::{AiClient, SqlGenerator};
pub use analytics::{AnalyticsEngine, ClickHouseEngine};
pub use pipeline::{ask, AskOutcome};
pub use yields::YieldClient;

use crate::{
    config::Settings,
    error::{ExportError, Result},
};

#[derive(Default, Clone)]
pub struct Services {
    pub ai: Option<Arc<dyn SqlGenerator>>,
    pub analytics: Option<Arc<dyn AnalyticsEngine>>,
    pub yields: Option<Arc<YieldClient>>,
}

impl Services {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let ai = match &settings.ai {
            Some(s) => Some(Arc::new(AiClient::new(s)?) as Arc<dyn SqlGenerator>),
            None => None,
        };
        let analytics = settings
            .analytics
            .as_ref()
            .map(|s| Arc::new(ClickHouseEngine::new(s)) as Arc<dyn AnalyticsEngine>);
        let yields = match &settings.yields {
            Some(s) => Some(Arc::new(YieldClient::new(s)?)),
            None => None,
        };

        Ok(Self {
            ai,
            analytics,
            yields,
        })
    }

    pub fn require_ai(&self) -> Result<&dyn SqlGenerator> {
        self.ai
            .as_deref()
            .ok_or(ExportError::ServiceUnavailable("ai"))
    }

    pub fn require_analytics(&self) -> Result<&dyn AnalyticsEngine> {
        self.analytics
            .as_deref()
            .ok_or(ExportError::ServiceUnavailable("analytics"))
    }

    pub fn require_yields(&self) -> Result<&YieldClient> {
        self.yields
            .as_deref()
            .ok_or(ExportError::ServiceUnavailable("yields"))
    }
}
