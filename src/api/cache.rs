//! Shared cache handle
//!
//! `ApiCache` is the process-wide entry point callers hold. It owns the
//! store behind a mutex, the category TTL table, and the background sweep.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{category, CacheStore, InvalidatePattern, Lookup, StatsSnapshot};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::tasks::spawn_cleanup_task;

/// Cloneable, thread-safe handle to one cache instance.
///
/// Every clone shares the same entries, counters and sweep task. Each
/// operation locks the store for a single synchronous call, so reads,
/// writes and evictions never interleave.
///
/// # Example
/// ```no_run
/// use ro_api_cache::{ApiCache, CacheConfig};
/// use serde_json::json;
///
/// # async fn lookup() -> Result<Option<serde_json::Value>, std::io::Error> { Ok(None) }
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let cache: ApiCache = ApiCache::new(CacheConfig::from_env())?;
///
///     let items = cache
///         .get_or_fetch("item_search", &json!({"query": "Red Potion"}), lookup)
///         .await?;
///     println!("{items:?}");
///
///     cache.close();
///     Ok(())
/// }
/// ```
pub struct ApiCache<V = Value> {
    inner: Arc<Inner<V>>,
}

struct Inner<V> {
    store: Arc<Mutex<CacheStore<V>>>,
    category_ttls: HashMap<String, Duration>,
    default_ttl: Duration,
    cleanup_interval: Duration,
    cleanup: Mutex<Option<JoinHandle<()>>>,
}

impl<V> Drop for Inner<V> {
    fn drop(&mut self) {
        if let Some(handle) = self.cleanup.get_mut().take() {
            handle.abort();
        }
    }
}

impl<V> Clone for ApiCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> ApiCache<V>
where
    V: Clone + Send + 'static,
{
    // == Constructor ==
    /// Creates a cache from a validated configuration.
    ///
    /// When called inside a Tokio runtime the periodic sweep starts right
    /// away; otherwise call [`start_cleanup`](Self::start_cleanup) once a
    /// runtime exists.
    pub fn new(config: CacheConfig) -> Result<Self> {
        config.validate()?;

        let cache = Self {
            inner: Arc::new(Inner {
                store: Arc::new(Mutex::new(CacheStore::from_config(&config))),
                category_ttls: config.category_ttls,
                default_ttl: config.default_ttl,
                cleanup_interval: config.cleanup_interval,
                cleanup: Mutex::new(None),
            }),
        };

        info!(
            "Cache initialized: max_size={}, default_ttl={:?}, cleanup_interval={:?}",
            config.max_size, config.default_ttl, config.cleanup_interval
        );

        if Handle::try_current().is_ok() {
            cache.start_cleanup();
        } else {
            debug!("No Tokio runtime at construction, periodic cleanup deferred");
        }

        Ok(cache)
    }

    // == TTLs ==
    /// TTL used by `get_or_fetch` for `category`.
    pub fn ttl_for(&self, category: &str) -> Duration {
        category::resolve_ttl(&self.inner.category_ttls, category, self.inner.default_ttl)
    }

    // == Store Operations ==
    pub fn get(&self, key: &str) -> Option<V> {
        self.inner.store.lock().get(key)
    }

    /// See [`CacheStore::lookup`].
    pub fn lookup(&self, key: &str) -> Lookup<V> {
        self.inner.store.lock().lookup(key)
    }

    pub fn get_stale(&self, key: &str) -> Option<V> {
        self.inner.store.lock().get_stale(key)
    }

    /// Stores `value`; `None` uses the default TTL.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        self.inner.store.lock().set(key, value, ttl);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.store.lock().contains_key(key)
    }

    pub fn delete(&self, key: &str) -> bool {
        self.inner.store.lock().delete(key)
    }

    /// Removes entries by key prefix (`&str`/`String`) or `Regex`.
    pub fn invalidate(&self, pattern: impl Into<InvalidatePattern>) -> usize {
        self.inner.store.lock().invalidate(pattern)
    }

    /// Removes every entry cached under `category`.
    pub fn invalidate_category(&self, category: &str) -> usize {
        self.invalidate(format!("{}:", category))
    }

    pub fn clear(&self) -> usize {
        self.inner.store.lock().clear()
    }

    /// Runs one sweep immediately.
    pub fn cleanup(&self) -> usize {
        self.inner.store.lock().cleanup()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.inner.store.lock().stats()
    }

    pub fn reset_stats(&self) {
        self.inner.store.lock().reset_stats();
    }

    pub fn len(&self) -> usize {
        self.inner.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.store.lock().is_empty()
    }

    // == Lifecycle ==
    /// Starts the periodic sweep. Returns `false` if it was already running
    /// or no Tokio runtime is available.
    pub fn start_cleanup(&self) -> bool {
        let mut slot = self.inner.cleanup.lock();
        if slot.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return false;
        }
        if Handle::try_current().is_err() {
            warn!("Cannot start cache cleanup outside a Tokio runtime");
            return false;
        }

        *slot = Some(spawn_cleanup_task(
            Arc::clone(&self.inner.store),
            self.inner.cleanup_interval,
        ));
        true
    }

    /// Stops the periodic sweep. Returns `false` if it was not running.
    pub fn stop_cleanup(&self) -> bool {
        match self.inner.cleanup.lock().take() {
            Some(handle) => {
                handle.abort();
                debug!("Cache cleanup task stopped");
                true
            }
            None => false,
        }
    }

    pub fn is_cleanup_running(&self) -> bool {
        self.inner
            .cleanup
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Shuts the cache down for process exit. Entries stay readable.
    pub fn close(&self) {
        self.stop_cleanup();
        let stats = self.stats();
        info!(
            "Cache closed: size={}, hits={}, misses={}, hit_rate={}",
            stats.size, stats.hits, stats.misses, stats.hit_rate
        );
    }
}
