use log::info;
use serde_json::Value;

use super::Services;
use crate::{
    error::Result,
    export::{resolve, ResolvedPool},
    subgraph::IndexedQuery,
};

/// The generated statement and the rows it produced.
#[derive(Debug)]
pub struct AskOutcome {
    pub resolved: ResolvedPool,
    pub sql: String,
    pub rows: Vec<Value>,
}

/// Answer a question about a token's pool: resolve the pool, have the AI
/// service write SQL for it, run that SQL with the row cutoff.
///
/// Both collaborators are checked before anything goes over the network.
pub async fn ask(
    client: &dyn IndexedQuery,
    services: &Services,
    token_address: &str,
    question: &str,
) -> Result<AskOutcome> {
    let generator = services.require_ai()?;
    let engine = services.require_analytics()?;

    let resolved = resolve(client, token_address).await?;
    let sql = generator.generate_sql(question, &resolved.pool.id).await?;
    let rows = engine.execute(&sql).await?;

    info!("Question on pool {} returned {} rows", resolved.pool.id, rows.len());

    Ok(AskOutcome {
        resolved,
        sql,
        rows,
    })
}
