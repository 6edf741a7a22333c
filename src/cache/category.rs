//! Category TTL Table
//!
//! Lookup categories and how long their results stay fresh. Live data
//! (market listings, server status) expires in minutes, searches in tens of
//! minutes, near-static map metadata after an hour.

use std::collections::HashMap;
use std::time::Duration;

pub const SERVER_STATUS: &str = "server_status";
pub const MARKET_SEARCH: &str = "market_search";
pub const ITEM_SEARCH: &str = "item_search";
pub const MONSTER_SEARCH: &str = "monster_search";
pub const WIKI_SEARCH: &str = "wiki_search";
pub const ITEM_INFO: &str = "item_info";
pub const MONSTER_INFO: &str = "monster_info";
pub const MAP_INFO: &str = "map_info";

const MINUTE: u64 = 60;

/// Built-in category TTLs.
pub const CATEGORY_TTLS: &[(&str, Duration)] = &[
    (SERVER_STATUS, Duration::from_secs(MINUTE)),
    (MARKET_SEARCH, Duration::from_secs(2 * MINUTE)),
    (ITEM_SEARCH, Duration::from_secs(15 * MINUTE)),
    (MONSTER_SEARCH, Duration::from_secs(15 * MINUTE)),
    (WIKI_SEARCH, Duration::from_secs(30 * MINUTE)),
    (ITEM_INFO, Duration::from_secs(30 * MINUTE)),
    (MONSTER_INFO, Duration::from_secs(30 * MINUTE)),
    (MAP_INFO, Duration::from_secs(60 * MINUTE)),
];

/// Returns the built-in table as an owned map.
pub fn default_table() -> HashMap<String, Duration> {
    CATEGORY_TTLS
        .iter()
        .map(|(name, ttl)| (name.to_string(), *ttl))
        .collect()
}

/// Resolves the TTL for `category`, falling back to `default_ttl`.
pub fn resolve_ttl(
    table: &HashMap<String, Duration>,
    category: &str,
    default_ttl: Duration,
) -> Duration {
    table.get(category).copied().unwrap_or(default_ttl)
}
