//! Action registry client: cache-first resolution of paths and patterns.

pub mod http;
pub mod memory;

use std::sync::Arc;

use crate::action::ActionRecord;
use crate::cache::ActionCache;
use crate::config::RegistryConfig;
use crate::error::{ActionError, ActionResult};
use crate::pattern::{parent_pattern, PathPattern};

/// Where action records come from.
///
/// The HTTP transport talks to the remote registry service; the in-memory
/// transport serves tests, demos, and offline operation.
#[async_trait::async_trait]
pub trait RegistryTransport: Send + Sync {
    /// Fetch every record matching `pattern` from the backing registry.
    async fn fetch(&self, pattern: &str) -> ActionResult<Vec<ActionRecord>>;
}

/// Client over an action registry with a pattern-searchable cache.
///
/// A query that the cache can already answer never touches the network, even
/// though the remote result set may have grown since. That staleness is a
/// deliberate tradeoff; `clear_cache` resets the view on auth changes, and the
/// cache TTL can bound it for long-lived sessions.
pub struct RegistryClient {
    transport: Arc<dyn RegistryTransport>,
    cache: ActionCache,
    max_retries: u32,
}

impl RegistryClient {
    pub fn new(transport: Arc<dyn RegistryTransport>, config: &RegistryConfig) -> Self {
        Self::with_cache(transport, ActionCache::new(&config.cache), config.max_retries)
    }

    /// Build a client around an existing cache, e.g. one shared with another
    /// client instance.
    pub fn with_cache(
        transport: Arc<dyn RegistryTransport>,
        cache: ActionCache,
        max_retries: u32,
    ) -> Self {
        Self {
            transport,
            cache,
            max_retries,
        }
    }

    pub fn cache(&self) -> &ActionCache {
        &self.cache
    }

    /// Drop every cached record. Call when the authentication state changes.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Resolve a wildcard pattern to all matching records.
    ///
    /// The cache is consulted first; on a miss, one fetch populates it and the
    /// same search is re-run against the fresh entries. A failed fetch surfaces
    /// as [`ActionError::Network`] with no partial data.
    pub async fn get_many(&self, pattern: &str) -> ActionResult<Vec<ActionRecord>> {
        let compiled = PathPattern::compile(pattern)?;
        let cached = self.cache.search(&compiled);
        if !cached.is_empty() {
            return Ok(cached);
        }
        let fetched = self.fetch_with_retry(pattern).await?;
        self.cache.insert_all(fetched);
        Ok(self.cache.search(&compiled))
    }

    /// Resolve an exact path to a single record.
    ///
    /// On a cache miss, the whole sibling set (the path's parent with a `*`
    /// leaf) is fetched in one request, so neighbouring lookups hit the cache
    /// afterwards. A path still absent after that fetch is
    /// [`ActionError::NotFound`].
    pub async fn get_one(&self, path: &str) -> ActionResult<ActionRecord> {
        if let Some(record) = self.cache.get(path) {
            return Ok(record);
        }
        let siblings = self.fetch_with_retry(&parent_pattern(path)).await?;
        self.cache.insert_all(siblings);
        self.cache
            .get(path)
            .ok_or_else(|| ActionError::NotFound(path.to_string()))
    }

    async fn fetch_with_retry(&self, pattern: &str) -> ActionResult<Vec<ActionRecord>> {
        let mut attempt = 0;
        loop {
            match self.transport.fetch(pattern).await {
                Ok(records) => return Ok(records),
                Err(error @ ActionError::Network(_)) if attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "registry fetch for {pattern} failed, retrying ({attempt}/{}): {error}",
                        self.max_retries
                    );
                }
                Err(error) => return Err(error),
            }
        }
    }
}
