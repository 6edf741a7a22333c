//! Get-or-fetch
//!
//! Wraps an external lookup so repeated identical requests inside a
//! category's TTL are answered from memory.

use std::fmt::Display;
use std::future::Future;

use serde_json::Value;
use tracing::{debug, warn};

use super::ApiCache;
use crate::cache::{generate_key, Lookup};

/// Options for [`ApiCache::get_or_fetch_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Serve an expired entry instead of the producer's error when one is still stored
    pub use_stale_on_error: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            use_stale_on_error: true,
        }
    }
}

impl FetchOptions {
    /// Always surface producer errors.
    pub fn without_stale() -> Self {
        Self {
            use_stale_on_error: false,
        }
    }
}

impl<V> ApiCache<V>
where
    V: Clone + Send + 'static,
{
    /// [`get_or_fetch_with`](Self::get_or_fetch_with) with default options.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        category: &str,
        params: &Value,
        fetch: F,
    ) -> Result<Option<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<V>, E>>,
        E: Display,
    {
        self.get_or_fetch_with(category, params, FetchOptions::default(), fetch)
            .await
    }

    /// Returns the cached value for `category`/`params`, calling `fetch` on a miss.
    ///
    /// `Ok(Some(v))` from the producer is cached with the category's TTL.
    /// `Ok(None)` is returned but never cached, so "no result" lookups are
    /// retried every time. On `Err`, a stored (possibly expired) entry is
    /// returned when `options.use_stale_on_error` is set; otherwise the
    /// producer's error is returned as is.
    ///
    /// The lock is not held while `fetch` runs. Concurrent misses on the same
    /// key each call their own producer and the last write wins.
    pub async fn get_or_fetch_with<F, Fut, E>(
        &self,
        category: &str,
        params: &Value,
        options: FetchOptions,
        fetch: F,
    ) -> Result<Option<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<V>, E>>,
        E: Display,
    {
        let key = generate_key(category, params);
        let ttl = self.ttl_for(category);

        // An expired entry is dropped by the read but kept here as the fallback
        let expired = match self.lookup(&key) {
            Lookup::Fresh(hit) => return Ok(Some(hit)),
            Lookup::Expired(value) => Some(value),
            Lookup::Missing => None,
        };

        match fetch().await {
            Ok(Some(value)) => {
                self.set(key, value.clone(), Some(ttl));
                Ok(Some(value))
            }
            Ok(None) => {
                debug!(%key, "Producer returned no value, not caching");
                Ok(None)
            }
            Err(err) => {
                if options.use_stale_on_error {
                    if let Some(stale) = self.get_stale(&key).or(expired) {
                        warn!(%key, error = %err, "Fetch failed, serving stale cache entry");
                        return Ok(Some(stale));
                    }
                }
                Err(err)
            }
        }
    }
}
