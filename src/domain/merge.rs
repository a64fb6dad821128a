//! Merge applier: fold a diff forest back into a fresh target snapshot.
//!
//! Reconciliation composes depth-first, mirroring the differ's recursion:
//! Unchanged branches are copied verbatim from the target (children
//! reconciled recursively), Added branches are materialized from the
//! captured diff fields, Removed branches are dropped.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::diff::{CategoryDiff, DiffStatus, EntryDiff, EntryShape};
use crate::domain::entities::{
    CategoryNode, CompositeEntry, ConfigTree, EntryNode, LeafEntry,
};
use crate::domain::error::{DomainError, DomainResult};

/// What to do when an Unchanged node has no matching sibling in the target,
/// i.e. the target diverged from the snapshot the diff was computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingTargetPolicy {
    /// Fail with a recoverable error naming the missing identity.
    #[default]
    Error,
    /// Drop the branch silently.
    Skip,
}

/// Applies a diff forest onto a target snapshot, producing a new tree.
///
/// The target is never mutated. Nothing marked Removed survives.
#[derive(Debug, Clone, Copy, Default)]
pub struct Merger {
    policy: MissingTargetPolicy,
}

impl Merger {
    pub fn new(policy: MissingTargetPolicy) -> Self {
        Self { policy }
    }

    /// Produce a new tree from `diff` and `target`.
    ///
    /// Root fields are taken from `target`. Unchanged branches come from
    /// `target` at full fidelity; Added branches are materialized from the
    /// diff and only carry what the differ captured (see
    /// [`materialize_category`]).
    pub fn apply_to(
        &self,
        diff: &[CategoryDiff],
        target: &ConfigTree,
    ) -> DomainResult<ConfigTree> {
        debug!("apply_to: target='{}', {} diff roots", target.name, diff.len());

        let mut categories = Vec::new();
        for node in diff {
            match node.status {
                DiffStatus::Added => categories.push(materialize_category(node)),
                DiffStatus::Unchanged => {
                    let key = node.key();
                    match target.categories.iter().find(|c| c.key() == key) {
                        Some(category) => {
                            let mut category = category.clone();
                            category.entries =
                                self.apply_entries(&node.entries, &category.entries)?;
                            categories.push(category);
                        }
                        None => self.on_missing(key.to_string())?,
                    }
                }
                DiffStatus::Removed => {}
            }
        }

        Ok(ConfigTree {
            name: target.name.clone(),
            categories,
        })
    }

    /// Reconcile one entry sibling list against the target's list.
    pub fn apply_entries(
        &self,
        diff: &[EntryDiff],
        target: &[EntryNode],
    ) -> DomainResult<Vec<EntryNode>> {
        let mut result = Vec::new();
        for node in diff {
            match node.status {
                DiffStatus::Added => {
                    if let Some(entry) = materialize_entry(node) {
                        result.push(entry);
                    }
                }
                DiffStatus::Unchanged => {
                    let key = node.key();
                    match target.iter().find(|e| e.key() == key) {
                        Some(entry) => {
                            let mut entry = entry.clone();
                            if let EntryNode::Composite(group) = &mut entry {
                                group.children =
                                    self.apply_entries(&node.children, &group.children)?;
                            }
                            result.push(entry);
                        }
                        None => self.on_missing(key.to_string())?,
                    }
                }
                DiffStatus::Removed => {}
            }
        }
        Ok(result)
    }

    fn on_missing(&self, identity: String) -> DomainResult<()> {
        match self.policy {
            MissingTargetPolicy::Error => {
                Err(DomainError::MissingTargetSibling { identity })
            }
            MissingTargetPolicy::Skip => {
                debug!("apply: target diverged, skipping {}", identity);
                Ok(())
            }
        }
    }
}

/// Build a standalone category purely from captured diff fields.
///
/// Reduced fidelity by design: the description is empty, and leaf payloads
/// are default unless the diff was produced with
/// [`crate::domain::CaptureMode::FullPayload`]. Callers must not assume
/// round-trip equality on Added branches.
pub fn materialize_category(node: &CategoryDiff) -> CategoryNode {
    CategoryNode {
        def_name: node.def_name.clone(),
        label: node.label.clone(),
        description: String::new(),
        entries: materialize_entries(&node.entries),
    }
}

/// Build a standalone entry from captured diff fields.
///
/// Returns `None` for Removed nodes: under an Added branch they are
/// impossible by construction, so they are asserted away rather than
/// reproduced.
pub fn materialize_entry(node: &EntryDiff) -> Option<EntryNode> {
    if node.status == DiffStatus::Removed {
        debug_assert!(false, "removed node under materialized branch");
        return None;
    }
    Some(match node.shape {
        EntryShape::Leaf => EntryNode::Leaf(LeafEntry {
            kind: node.kind.clone(),
            label: node.label.clone(),
            aux_id: node.aux_id.clone(),
            payload: node.payload.clone().unwrap_or_default(),
        }),
        EntryShape::Composite => EntryNode::Composite(CompositeEntry {
            kind: node.kind.clone(),
            label: node.label.clone(),
            children: materialize_entries(&node.children),
        }),
    })
}

fn materialize_entries(diff: &[EntryDiff]) -> Vec<EntryNode> {
    diff.iter().filter_map(materialize_entry).collect()
}
