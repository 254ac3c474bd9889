//! Cursor-driven retrieval of one entity stream.
//!
//! A stream is read in pages of `timestamp >= cursor`, ascending. After a
//! full page the cursor moves to one second past the last record's
//! timestamp. Records sharing that boundary second beyond what fit on the
//! page are therefore never returned; the advance rule is kept as is.
//!
//! Full-state entities (positions, ticks) have no time filter and are read
//! by keyset instead: each page starts strictly after the last key seen, so
//! the whole current set is returned however large it is.

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::{
    error::{ExportError, Result},
    models::{Keyed, Timestamped},
    subgraph::{EntityQuery, IndexedQuery, KeyedQuery},
};

/// Where a stream goes after a page has been appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Next(u64),
    Done,
}

/// Pure transition from one page to the next cursor.
///
/// An empty or short page ends the stream; a full page continues one
/// second past its last timestamp.
pub fn advance<T: Timestamped>(page: &[T], page_size: usize) -> Cursor {
    match page.last() {
        None => Cursor::Done,
        Some(_) if page.len() < page_size => Cursor::Done,
        Some(last) => Cursor::Next(last.timestamp() + 1),
    }
}

/// Read every record of a windowed stream from `since` onwards.
pub async fn fetch_all<T>(
    client: &dyn IndexedQuery,
    entity: &EntityQuery,
    pool_id: &str,
    since: u64,
    page_size: usize,
) -> Result<Vec<T>>
where
    T: DeserializeOwned + Timestamped,
{
    let mut records: Vec<T> = Vec::new();
    let mut cursor = since;
    let mut pages = 0usize;

    loop {
        let variables = json!({
            "pool": pool_id,
            "cursor": cursor.to_string(),
            "first": page_size,
        });

        let data = client.query(entity.document, variables).await?;
        let page: Vec<T> = decode_collection(entity, data)?;
        pages += 1;

        debug!(
            "[{}] page {} from cursor {}: {} records",
            entity.collection,
            pages,
            cursor,
            page.len()
        );

        let next = advance(&page, page_size);
        records.extend(page);

        match next {
            Cursor::Next(next_cursor) => cursor = next_cursor,
            Cursor::Done => break,
        }
    }

    debug!(
        "[{}] stream exhausted after {} pages, {} records",
        entity.collection,
        pages,
        records.len()
    );

    Ok(records)
}

/// Key to continue a full-state read after, or `None` when the page was
/// the last one.
pub fn next_key<T: Keyed>(page: &[T], page_size: usize) -> Option<String> {
    match page.last() {
        Some(last) if page.len() >= page_size => Some(last.key()),
        _ => None,
    }
}

/// Read the full current set of a non-windowed entity, page by page in key
/// order.
pub async fn fetch_keyed<T>(
    client: &dyn IndexedQuery,
    query: &KeyedQuery,
    pool_id: &str,
    page_size: usize,
) -> Result<Vec<T>>
where
    T: DeserializeOwned + Keyed,
{
    let entity = &query.entity;
    let mut records: Vec<T> = Vec::new();
    let mut after = query.start_after.to_string();
    let mut pages = 0usize;

    loop {
        let variables = json!({
            "pool": pool_id,
            "after": after,
            "first": page_size,
        });

        let data = client.query(entity.document, variables).await?;
        let page: Vec<T> = decode_collection(entity, data)?;
        pages += 1;

        debug!(
            "[{}] page {} after key {:?}: {} records",
            entity.collection,
            pages,
            after,
            page.len()
        );

        let next = next_key(&page, page_size);
        records.extend(page);

        match next {
            // An endpoint ignoring the bound would repeat the same page forever.
            Some(key) if key == after => {
                return Err(ExportError::upstream(
                    "subgraph",
                    format!("{} key cursor did not advance past {:?}", entity.collection, key),
                ));
            },
            Some(key) => after = key,
            None => break,
        }
    }

    debug!(
        "[{}] full state read in {} pages, {} records",
        entity.collection,
        pages,
        records.len()
    );

    Ok(records)
}

fn decode_collection<T: DeserializeOwned>(entity: &EntityQuery, mut data: Value) -> Result<Vec<T>> {
    let collection = data
        .get_mut(entity.collection)
        .map(Value::take)
        .ok_or_else(|| {
            ExportError::upstream(
                "subgraph",
                format!("response is missing the {} collection", entity.collection),
            )
        })?;

    serde_json::from_value(collection).map_err(|e| {
        ExportError::upstream(
            "subgraph",
            format!("malformed {} record: {}", entity.collection, e),
        )
    })
}
