//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

/// Expiry used when `now + ttl` does not fit in an `Instant` (about 30 years).
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion time
    pub created_at: Instant,
    /// Time after which normal reads treat the entry as stale
    pub expires_at: Instant,
    /// Time of the most recent hit (or insertion)
    pub last_access: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry that expires `ttl` from now.
    ///
    /// TTLs too large to represent are capped at about 30 years.
    pub fn new(value: V, ttl: Duration) -> Self {
        let now = Instant::now();
        let expires_at = now
            .checked_add(ttl)
            .or_else(|| now.checked_add(FAR_FUTURE))
            .unwrap_or(now);
        Self {
            value,
            created_at: now,
            expires_at,
            last_access: now,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches `expires_at`, so a
    /// zero TTL produces an entry that is already stale.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Expiry check against a caller-supplied clock reading.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    // == Touch ==
    /// Records a successful read.
    pub fn touch(&mut self) {
        self.last_access = Instant::now();
    }

    // == Time To Live ==
    /// Returns the remaining freshness, `Duration::ZERO` once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("test_value".to_string(), Duration::from_secs(60));

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.created_at, entry.last_access);
        assert_eq!(entry.expires_at - entry.created_at, Duration::from_secs(60));
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new(1u32, Duration::from_millis(10));

        assert!(!entry.is_expired());
        sleep(Duration::from_millis(20));
        assert!(entry.is_expired());
    }

    #[test]
    fn test_touch_moves_last_access_forward() {
        let mut entry = CacheEntry::new(1u32, Duration::from_secs(60));
        let before = entry.last_access;

        sleep(Duration::from_millis(2));
        entry.touch();

        assert!(entry.last_access > before);
        assert_eq!(entry.created_at, before);
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new(1u32, Duration::from_secs(10));

        let remaining = entry.ttl_remaining();
        assert!(remaining <= Duration::from_secs(10));
        assert!(remaining >= Duration::from_secs(9));
    }

    #[test]
    fn test_ttl_remaining_expired() {
        let entry = CacheEntry::new(1u32, Duration::from_millis(5));

        sleep(Duration::from_millis(15));

        assert_eq!(entry.ttl_remaining(), Duration::ZERO);
    }

    #[test]
    fn test_huge_ttl_saturates_instead_of_overflowing() {
        let entry = CacheEntry::new("forever", Duration::MAX);

        assert!(!entry.is_expired());
        assert!(entry.ttl_remaining() >= FAR_FUTURE - Duration::from_secs(1));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        // Expires exactly at creation time
        let entry = CacheEntry::new("test", Duration::ZERO);

        assert!(entry.is_expired_at(entry.expires_at), "Entry should be expired at boundary");
        assert!(entry.is_expired());
    }
}
