//! Action record types.
//!
//! An action is a registry entry mapping a dot-delimited hierarchical path
//! (e.g. `menu.news.publish`) to an optional loadable behavior module. Wire
//! field names follow the remote action service's PascalCase convention.

use serde::{Deserialize, Serialize};

/// Reference to a loadable behavior module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRef {
    pub href: String,
}

/// A registry entry mapping a hierarchical path to an optional behavior script.
///
/// Immutable once fetched; the path string is its identity for caching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    #[serde(rename = "Path")]
    pub path: String,
    /// Human-readable display label.
    #[serde(rename = "Label", default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Behavior module reference, when the action has one.
    #[serde(rename = "Script", default, skip_serializing_if = "Option::is_none")]
    pub script: Option<ScriptRef>,
    /// Number of descendant actions, computed by the registry service.
    #[serde(
        rename = "ChildrenCount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub children_count: Option<u64>,
}

impl ActionRecord {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: None,
            script: None,
            children_count: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_script(mut self, href: impl Into<String>) -> Self {
        self.script = Some(ScriptRef { href: href.into() });
        self
    }
}
