//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

pub mod category;
mod entry;
mod key;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use key::{generate_key, InvalidatePattern};
pub use lru::LruTracker;
pub use stats::{CacheStats, StatsSnapshot};
pub use store::{CacheStore, Lookup};
