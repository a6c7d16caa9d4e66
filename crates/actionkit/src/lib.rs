//! Async client for hierarchical action registries.
//!
//! An action registry maps dot-delimited paths (`menu.news.publish`) to
//! records that optionally reference a loadable behavior module. This crate
//! resolves paths and `*`-wildcard patterns against such a registry through a
//! pattern-searchable cache, composes the two-level menu display tree, and
//! launches the modules behind resolved records.

pub mod action;
pub mod apps;
pub mod cache;
pub mod config;
pub mod error;
pub mod menu;
pub mod pattern;
pub mod registry;

pub use crate::action::{ActionRecord, ScriptRef};
pub use crate::apps::{AppLauncher, AppModule, LaunchContext, ModuleLoader};
pub use crate::cache::ActionCache;
pub use crate::config::{CacheConfig, RegistryConfig};
pub use crate::error::{ActionError, ActionResult};
pub use crate::menu::{MenuBuilder, MenuNode, MenuTree};
pub use crate::pattern::PathPattern;
pub use crate::registry::http::{HttpTransport, TokenProvider};
pub use crate::registry::memory::InMemoryRegistry;
pub use crate::registry::{RegistryClient, RegistryTransport};
