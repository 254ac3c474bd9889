pub mod client;
pub mod queries;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{IndexedQuery, SubgraphClient};
pub use queries::{EntityQuery, KeyedQuery, PAGE_SIZE};
