pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod subgraph;
pub mod utils;

pub use crate::config::Settings;
pub use error::{ErrorClass, ExportError, Result};
pub use export::{Aggregator, Bundle, ExportArchive};
pub use services::Services;
pub use subgraph::{IndexedQuery, SubgraphClient};
