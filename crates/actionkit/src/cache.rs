//! Pattern-searchable cache of fetched action records.

use std::time::Duration;

use moka::sync::Cache;

use crate::action::ActionRecord;
use crate::config::CacheConfig;
use crate::pattern::PathPattern;

/// In-memory cache of action records, keyed by path.
///
/// Shared by every component that resolves actions. Entries only ever come
/// from successful registry fetches (or explicit inserts); the cache is never
/// speculatively populated. Cleared as a whole on authentication-state change.
#[derive(Debug, Clone)]
pub struct ActionCache {
    cache: Cache<String, ActionRecord>,
}

impl ActionCache {
    pub fn new(config: &CacheConfig) -> Self {
        let mut builder = Cache::builder().max_capacity(config.max_entries.max(1));
        if let Some(ttl) = config.ttl_secs {
            builder = builder.time_to_live(Duration::from_secs(ttl));
        }
        Self {
            cache: builder.build(),
        }
    }

    /// Direct key lookup.
    pub fn get(&self, path: &str) -> Option<ActionRecord> {
        self.cache.get(path)
    }

    /// Idempotent insert/overwrite keyed by the record's path.
    pub fn insert(&self, record: ActionRecord) {
        self.cache.insert(record.path.clone(), record);
    }

    /// Bulk insert, typically from a fetch response. Overlapping responses
    /// merge last-write-wins, which is safe because records are path-keyed.
    pub fn insert_all(&self, records: impl IntoIterator<Item = ActionRecord>) {
        for record in records {
            self.insert(record);
        }
    }

    /// All cached records matching `pattern`, sorted by path. The sort mirrors
    /// the registry service's response ordering, so cache hits and fresh
    /// fetches yield the same sequence.
    pub fn search(&self, pattern: &PathPattern) -> Vec<ActionRecord> {
        let mut results: Vec<ActionRecord> = self
            .cache
            .iter()
            .filter(|(path, _)| pattern.matches(path.as_str()))
            .map(|(_, record)| record)
            .collect();
        results.sort_by(|a, b| a.path.cmp(&b.path));
        results
    }

    /// Drop every cached record. Called when the authentication state changes.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
