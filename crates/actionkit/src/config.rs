//! Client configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ActionError, ActionResult};

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_RETRIES: u32 = 1;
const DEFAULT_CACHE_ENTRIES: u64 = 10_000;

/// Configuration for the registry client and its HTTP transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Base URL of the action registry endpoint.
    pub base_url: String,
    /// Per-request timeout for registry fetches.
    pub timeout_secs: u64,
    /// How many times a failed fetch is retried before the error is surfaced.
    pub max_retries: u32,
    pub cache: CacheConfig,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/resources/Action".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            cache: CacheConfig::default(),
        }
    }
}

/// Configuration for the action cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub max_entries: u64,
    /// Entry time-to-live in seconds. `None` keeps records for the whole
    /// session; the cache is still cleared explicitly on logout.
    pub ttl_secs: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_CACHE_ENTRIES,
            ttl_secs: None,
        }
    }
}

impl RegistryConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> ActionResult<Self> {
        let data = std::fs::read_to_string(path).map_err(|error| {
            ActionError::Internal(format!(
                "failed to read config {}: {error}",
                path.display()
            ))
        })?;
        serde_json::from_str(&data).map_err(|error| {
            ActionError::Internal(format!(
                "failed to parse config {}: {error}",
                path.display()
            ))
        })
    }
}
