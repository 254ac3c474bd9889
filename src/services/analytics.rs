use async_trait::async_trait;
use clickhouse::Client;
use futures::{Stream, StreamExt};
use log::{debug, info, warn};
use serde_json::Value;

use crate::{
    config::AnalyticsSettings,
    error::{ExportError, Result},
};

const SOURCE: &str = "analytics";

/// Executes generated SQL and returns at most a bounded number of rows.
#[async_trait]
pub trait AnalyticsEngine: Send + Sync {
    async fn execute(&self, sql: &str) -> Result<Vec<Value>>;
}

/// ClickHouse over HTTP, reading results as `JSONEachRow`.
pub struct ClickHouseEngine {
    client: Client,
    max_rows: usize,
}

impl ClickHouseEngine {
    pub fn new(settings: &AnalyticsSettings) -> Self {
        info!("Configuring ClickHouse analytics at {}", settings.url);

        let client = Client::default()
            .with_url(settings.url.clone())
            .with_user(settings.user.clone())
            .with_password(settings.password.clone())
            .with_database(settings.database.clone());

        Self {
            client,
            max_rows: settings.max_rows,
        }
    }
}

#[async_trait]
impl AnalyticsEngine for ClickHouseEngine {
    async fn execute(&self, sql: &str) -> Result<Vec<Value>> {
        debug!("Executing analytics query: {}", sql);

        let cursor = self
            .client
            .query(sql)
            .fetch_bytes("JSONEachRow")
            .map_err(|e| ExportError::upstream(SOURCE, e.to_string()))?;

        let chunks = futures::stream::try_unfold(cursor, |mut cursor| async move {
            let chunk = cursor
                .next()
                .await
                .map_err(|e| ExportError::upstream(SOURCE, e.to_string()))?;
            Ok::<_, ExportError>(chunk.map(|c| (c, cursor)))
        });

        collect_rows(std::pin::pin!(chunks), self.max_rows).await
    }
}

/// Decode newline-delimited JSON rows from a stream of byte batches.
///
/// Consumption stops as soon as `max_rows` rows are held; the rest of the
/// stream is dropped unread.
pub async fn collect_rows<S, B>(mut chunks: S, max_rows: usize) -> Result<Vec<Value>>
where
    S: Stream<Item = Result<B>> + Unpin,
    B: AsRef<[u8]>,
{
    let mut rows = Vec::new();
    if max_rows == 0 {
        return Ok(rows);
    }

    let mut pending: Vec<u8> = Vec::new();
    // Bytes before `scanned` hold no newline.
    let mut scanned = 0;

    while let Some(chunk) = chunks.next().await {
        pending.extend_from_slice(chunk?.as_ref());

        let mut start = 0;
        while let Some(offset) = pending[scanned..].iter().position(|b| *b == b'\n') {
            let end = scanned + offset;
            push_row(&mut rows, &pending[start..end])?;
            start = end + 1;
            scanned = start;

            if rows.len() >= max_rows {
                warn!("Analytics result cut off at {} rows", max_rows);
                return Ok(rows);
            }
        }

        pending.drain(..start);
        scanned = pending.len();
    }

    // last row may lack a trailing newline
    push_row(&mut rows, &pending)?;

    Ok(rows)
}

fn push_row(rows: &mut Vec<Value>, line: &[u8]) -> Result<()> {
    if line.iter().all(u8::is_ascii_whitespace) {
        return Ok(());
    }

    let row = serde_json::from_slice(line)
        .map_err(|e| ExportError::upstream(SOURCE, format!("malformed row: {}", e)))?;
    rows.push(row);
    Ok(())
}
