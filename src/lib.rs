//! RO API Cache - response cache for external game-data lookups
//!
//! Memoizes item, monster, map, wiki, market and server-status lookups per
//! category, with TTL expiration, LRU eviction and a stale-on-error fallback.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use api::{ApiCache, FetchOptions};
pub use cache::{generate_key, InvalidatePattern, StatsSnapshot};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use tasks::spawn_cleanup_task;
