//! Local action registry with the remote service's matching rules.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::action::ActionRecord;
use crate::error::{ActionError, ActionResult};
use crate::pattern::PathPattern;
use crate::registry::RegistryTransport;

/// In-memory registry transport for tests, demos, and offline operation.
///
/// Query forms match the remote registry service:
/// - a path wrapped in double quotes matches exactly (`"menu.news"`);
/// - a path containing `*` matches with single-segment wildcards;
/// - any other path is a prefix match (a trailing `.` is trimmed first);
/// - the empty pattern selects everything.
///
/// Results come back sorted by path with `children_count` filled in.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    actions: RwLock<BTreeMap<String, ActionRecord>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action, replacing any previous record at the same path.
    pub fn add(&self, record: ActionRecord) -> ActionResult<()> {
        let mut actions = self
            .actions
            .write()
            .map_err(|error| ActionError::Internal(format!("registry lock poisoned: {error}")))?;
        actions.insert(record.path.clone(), record);
        Ok(())
    }

    /// Remove the action at `path`, returning it if present.
    pub fn remove(&self, path: &str) -> ActionResult<Option<ActionRecord>> {
        let mut actions = self
            .actions
            .write()
            .map_err(|error| ActionError::Internal(format!("registry lock poisoned: {error}")))?;
        Ok(actions.remove(path))
    }
}

#[async_trait::async_trait]
impl RegistryTransport for InMemoryRegistry {
    async fn fetch(&self, pattern: &str) -> ActionResult<Vec<ActionRecord>> {
        let actions = self
            .actions
            .read()
            .map_err(|error| ActionError::Internal(format!("registry lock poisoned: {error}")))?;

        let selected: Vec<ActionRecord> = if pattern.is_empty() {
            actions.values().cloned().collect()
        } else if pattern.len() >= 2 && pattern.starts_with('"') && pattern.ends_with('"') {
            let exact = pattern.trim_matches('"');
            actions.get(exact).cloned().into_iter().collect()
        } else if pattern.contains('*') {
            let compiled = PathPattern::compile(pattern)?;
            actions
                .values()
                .filter(|record| compiled.matches(&record.path))
                .cloned()
                .collect()
        } else {
            let prefix = pattern.trim_end_matches('.');
            actions
                .values()
                .filter(|record| record.path.starts_with(prefix))
                .cloned()
                .collect()
        };

        Ok(with_children_counts(selected))
    }
}

/// Annotate each record with the number of descendants that follow it in the
/// path-sorted result run. BTreeMap iteration already provides the ordering.
fn with_children_counts(records: Vec<ActionRecord>) -> Vec<ActionRecord> {
    let mut out = Vec::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        let prefix = format!("{}.", record.path);
        let mut count = 0u64;
        for later in &records[idx + 1..] {
            if later.path.starts_with(&prefix) {
                count += 1;
            } else {
                break;
            }
        }
        let mut annotated = record.clone();
        annotated.children_count = Some(count);
        out.push(annotated);
    }
    out
}
