//! Entity shapes returned by the indexed-query endpoint.
//!
//! Integer-valued fields (timestamps, blocks, ticks, log indices) are
//! accepted as JSON numbers or decimal strings. Arbitrary-precision
//! quantities stay as the decimal strings the endpoint returns.

mod collect;
mod liquidity;
mod pool;
mod pool_state;
mod position;
mod swap;
mod tick;

pub use collect::CollectRecord;
pub use liquidity::{LiquidityKind, LiquidityRecord};
pub use pool::{PoolDescriptor, TokenDescriptor};
pub use pool_state::PoolStateSnapshot;
pub use position::PositionRecord;
pub use swap::{SwapRecord, TransactionRef};
pub use tick::TickRecord;

/// Records that carry the block timestamp paginated streams are ordered by.
pub trait Timestamped {
    fn timestamp(&self) -> u64;
}

/// Records of a full-state entity, read in pages ordered by a stable key.
///
/// `key` is passed back as the exclusive lower bound of the next page.
pub trait Keyed {
    fn key(&self) -> String;
}
