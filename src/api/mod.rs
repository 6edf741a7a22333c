//! API Module
//!
//! The handle callers share to reach the cache in front of their external lookups.
//!
//! # Operations
//! - `get` / `get_stale` / `set` / `delete` - direct store access
//! - `invalidate` / `invalidate_category` / `clear` / `cleanup` - removal
//! - `stats` / `reset_stats` - counters
//! - `get_or_fetch` - memoized external lookup with stale-on-error fallback
//! - `start_cleanup` / `stop_cleanup` / `close` - background sweep lifecycle

mod cache;
mod fetch;

pub use cache::ApiCache;
pub use fetch::FetchOptions;
