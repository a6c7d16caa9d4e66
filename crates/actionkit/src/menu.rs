//! Menu composition over the action registry.
//!
//! The menu is a two-level display tree: top-level entries come from
//! `menu.*`, and a second query for `menu.*.*` decides which entries carry a
//! submenu. Composition always completes; a failed fetch degrades that level
//! to empty rather than leaving the caller with a stuck menu.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::action::ActionRecord;
use crate::registry::RegistryClient;

/// Registry pattern selecting top-level menu entries.
pub const TOP_LEVEL_PATTERN: &str = "menu.*";
/// Registry pattern selecting second-level menu entries.
pub const SECOND_LEVEL_PATTERN: &str = "menu.*.*";

/// A menu-tree element derived from an action record.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuNode {
    /// The action path split on `.`.
    pub path: Vec<String>,
    pub display_name: String,
    pub has_submenu: bool,
    /// Pattern resolving this node's children, when `has_submenu` is set.
    pub submenu_pattern: Option<String>,
    pub record: ActionRecord,
}

/// Render-ready menu tree. Rebuilt on every refresh, never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuTree {
    pub nodes: Vec<MenuNode>,
}

impl MenuTree {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Builds the menu display tree and tracks the latest composed result.
///
/// Refreshes are guarded by a monotonic generation token: a slow build whose
/// result arrives after a newer refresh started is discarded instead of
/// overwriting the newer tree.
pub struct MenuBuilder {
    registry: Arc<RegistryClient>,
    generation: AtomicU64,
    current: Mutex<MenuTree>,
}

impl MenuBuilder {
    pub fn new(registry: Arc<RegistryClient>) -> Self {
        Self {
            registry,
            generation: AtomicU64::new(0),
            current: Mutex::new(MenuTree::default()),
        }
    }

    /// Fetch both menu levels and compose the display tree.
    ///
    /// Either fetch failing degrades that level to an empty slice; the result
    /// is still a valid (possibly empty) tree.
    pub async fn build(&self) -> MenuTree {
        let (top, sub) = tokio::join!(
            self.registry.get_many(TOP_LEVEL_PATTERN),
            self.registry.get_many(SECOND_LEVEL_PATTERN),
        );
        let top = top.unwrap_or_else(|error| {
            tracing::warn!("top-level menu fetch failed: {error}");
            Vec::new()
        });
        let sub = sub.unwrap_or_else(|error| {
            tracing::warn!("second-level menu fetch failed: {error}");
            Vec::new()
        });
        compose(top, &sub)
    }

    /// Rebuild the menu and install the result, unless a newer refresh started
    /// while this one was in flight. Returns the latest installed tree either
    /// way.
    pub async fn refresh(&self) -> MenuTree {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let tree = self.build().await;
        self.install(token, tree)
    }

    /// The most recently installed tree.
    pub fn current(&self) -> MenuTree {
        self.lock_current().clone()
    }

    fn install(&self, token: u64, tree: MenuTree) -> MenuTree {
        let mut current = self.lock_current();
        if token == self.generation.load(Ordering::SeqCst) {
            *current = tree;
        }
        current.clone()
    }

    fn lock_current(&self) -> std::sync::MutexGuard<'_, MenuTree> {
        // The stored tree is a plain value; it stays valid even if a holder
        // of the lock panicked.
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Compose top-level records and second-level records into display nodes,
/// preserving the registry's top-level ordering.
fn compose(top: Vec<ActionRecord>, sub: &[ActionRecord]) -> MenuTree {
    let nodes = top
        .into_iter()
        .map(|record| {
            let child_prefix = format!("{}.", record.path);
            let has_submenu = sub.iter().any(|child| child.path.starts_with(&child_prefix));
            let display_name = record
                .label
                .clone()
                .unwrap_or_else(|| record.path.replace('.', "-"));
            MenuNode {
                path: record.path.split('.').map(str::to_string).collect(),
                display_name,
                has_submenu,
                submenu_pattern: has_submenu.then(|| format!("{child_prefix}*")),
                record,
            }
        })
        .collect();
    MenuTree { nodes }
}
