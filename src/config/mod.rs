#[allow(clippy::module_inception)]
mod config;

pub use self::config::{
    AiSettings, AnalyticsSettings, ExportSettings, Settings, SubgraphSettings, YieldSettings,
};
