//! The export pipeline: resolve the pool, pull its event streams, normalize
//! them into fixed tables and package the tables as a zip archive.

pub mod aggregator;
pub mod bundle;
pub mod normalizer;
pub mod paginator;
pub mod resolver;
pub mod table;

pub use aggregator::{Aggregator, Bundle};
pub use bundle::{archive_name, ExportArchive};
pub use resolver::{resolve, ResolvedPool};
pub use table::{Cell, Table};

use chrono::Utc;

use crate::error::Result;

/// Aggregate a window of pool history for a token and render it into an
/// archive. Nothing is written until the caller asks for it.
pub async fn export(aggregator: &Aggregator, token_address: &str, days: u32) -> Result<ExportArchive> {
    let bundle = aggregator.aggregate(token_address, days).await?;
    Ok(ExportArchive::build(&bundle, Utc::now()))
}
