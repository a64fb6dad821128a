//! Tree differ: identity-based set reconciliation over two snapshots.
//!
//! The algorithm is deliberately not an edit-script diff: per sibling list it
//! seeds one Removed node per "from" sibling, flips matches to Unchanged in
//! place while scanning the "to" side, and appends "to"-only siblings as
//! Added at the end. A node that merely moved position is therefore reported
//! Unchanged at its old position; pure reordering is invisible.
//!
//! Linear identity search makes each level O(F×T), which is fine at menu
//! sizes (tens of siblings, nesting depth around three).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::entities::{ConfigTree, EntryNode, LeafPayload};
use crate::domain::identity::{CategoryKey, EntryKey};

/// Classification of one logical slot across the two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    Added,
    Removed,
    Unchanged,
}

/// How much of a node the differ captures beyond its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMode {
    /// Capture identity fields only. Materializing an Added leaf then yields
    /// a default payload, so Added branches may diverge from the "to"
    /// snapshot in secondary attributes.
    #[default]
    IdentityOnly,
    /// Also capture leaf payloads by value, so Added branches materialize
    /// with full fidelity.
    FullPayload,
}

/// Diff over one category (tab) slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDiff {
    pub status: DiffStatus,
    pub def_name: String,
    pub label: String,
    #[serde(default)]
    pub entries: Vec<EntryDiff>,
}

impl CategoryDiff {
    pub fn key(&self) -> CategoryKey {
        CategoryKey {
            def_name: self.def_name.clone(),
        }
    }

    /// True if this slot or any descendant slot was added or removed.
    pub fn changes_anything(&self) -> bool {
        self.status != DiffStatus::Unchanged
            || self.entries.iter().any(EntryDiff::changes_anything)
    }
}

/// Which entry variant a diff node was captured from. Needed to materialize
/// a standalone entry again when an Added branch is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryShape {
    Leaf,
    Composite,
}

/// Diff over one entry slot, nested to the depth of the source trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryDiff {
    pub status: DiffStatus,
    pub shape: EntryShape,
    pub kind: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aux_id: Option<String>,
    /// Present only for leaves captured under [`CaptureMode::FullPayload`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<LeafPayload>,
    #[serde(default)]
    pub children: Vec<EntryDiff>,
}

impl EntryDiff {
    pub fn key(&self) -> EntryKey {
        EntryKey {
            kind: self.kind.clone(),
            label: self.label.clone(),
            aux_id: self.aux_id.clone(),
        }
    }

    /// True if this slot or any descendant slot was added or removed.
    pub fn changes_anything(&self) -> bool {
        self.status != DiffStatus::Unchanged
            || self.children.iter().any(EntryDiff::changes_anything)
    }
}

/// Produces a classified diff forest from two snapshots.
///
/// Pure and deterministic: no shared state, safe to call repeatedly with the
/// same inputs. Inputs are never mutated.
#[derive(Debug, Clone, Copy, Default)]
pub struct Differ {
    capture: CaptureMode,
}

impl Differ {
    pub fn new(capture: CaptureMode) -> Self {
        Self { capture }
    }

    /// Diff two snapshots at the category level, recursing into entries.
    ///
    /// Total over any two well-formed trees. Duplicate identities within one
    /// sibling list are not rejected here; they pair up first-match (see
    /// [`ConfigTree::validate`] for the recommended precondition check).
    pub fn diff(&self, from: &ConfigTree, to: &ConfigTree) -> Vec<CategoryDiff> {
        debug!(
            "diff: from='{}' ({} categories), to='{}' ({} categories)",
            from.name,
            from.categories.len(),
            to.name,
            to.categories.len()
        );

        let mut result: Vec<CategoryDiff> = from
            .categories
            .iter()
            .map(|category| CategoryDiff {
                status: DiffStatus::Removed,
                def_name: category.def_name.clone(),
                label: category.label.clone(),
                entries: Vec::new(),
            })
            .collect();

        for category in &to.categories {
            let key = category.key();
            match result
                .iter_mut()
                .find(|d| d.status == DiffStatus::Removed && d.key() == key)
            {
                Some(existing) => existing.status = DiffStatus::Unchanged,
                None => result.push(CategoryDiff {
                    status: DiffStatus::Added,
                    def_name: category.def_name.clone(),
                    label: category.label.clone(),
                    entries: Vec::new(),
                }),
            }
        }

        // Children are resolved in a separate pass so that a slot present on
        // only one side captures its entire subtree with that side's status.
        for node in &mut result {
            let key = node.key();
            let from_side = from.categories.iter().find(|c| c.key() == key);
            let to_side = to.categories.iter().find(|c| c.key() == key);
            node.entries = match (from_side, to_side) {
                (Some(f), Some(t)) => self.diff_entries(&f.entries, &t.entries),
                (Some(f), None) => self.capture_all(&f.entries, DiffStatus::Removed),
                (None, Some(t)) => self.capture_all(&t.entries, DiffStatus::Added),
                (None, None) => Vec::new(),
            };
        }

        result
    }

    /// Diff two entry sibling lists; recurses through nested groups.
    pub fn diff_entries(&self, from: &[EntryNode], to: &[EntryNode]) -> Vec<EntryDiff> {
        let mut result: Vec<EntryDiff> = from
            .iter()
            .map(|entry| self.seed_entry(entry, DiffStatus::Removed))
            .collect();

        for entry in to {
            let key = entry.key();
            match result
                .iter_mut()
                .find(|d| d.status == DiffStatus::Removed && d.key() == key)
            {
                Some(existing) => existing.status = DiffStatus::Unchanged,
                None => result.push(self.seed_entry(entry, DiffStatus::Added)),
            }
        }

        for node in &mut result {
            let key = node.key();
            let from_side = from.iter().find(|e| e.key() == key);
            let to_side = to.iter().find(|e| e.key() == key);
            node.children = match (from_side, to_side) {
                (Some(f), Some(t)) => self.diff_entries(f.children(), t.children()),
                (Some(f), None) => self.capture_all(f.children(), DiffStatus::Removed),
                (None, Some(t)) => self.capture_all(t.children(), DiffStatus::Added),
                (None, None) => Vec::new(),
            };
        }

        result
    }

    /// Capture one entry as a diff node without resolving children.
    fn seed_entry(&self, entry: &EntryNode, status: DiffStatus) -> EntryDiff {
        let key = entry.key();
        let (shape, payload) = match entry {
            EntryNode::Leaf(leaf) => {
                let payload = match self.capture {
                    CaptureMode::IdentityOnly => None,
                    CaptureMode::FullPayload => Some(leaf.payload.clone()),
                };
                (EntryShape::Leaf, payload)
            }
            EntryNode::Composite(_) => (EntryShape::Composite, None),
        };
        EntryDiff {
            status,
            shape,
            kind: key.kind,
            label: key.label,
            aux_id: key.aux_id,
            payload,
            children: Vec::new(),
        }
    }

    /// Capture a whole subtree with a single status (side present only in
    /// one snapshot).
    fn capture_all(&self, entries: &[EntryNode], status: DiffStatus) -> Vec<EntryDiff> {
        entries
            .iter()
            .map(|entry| self.capture_subtree(entry, status))
            .collect()
    }

    fn capture_subtree(&self, entry: &EntryNode, status: DiffStatus) -> EntryDiff {
        let mut node = self.seed_entry(entry, status);
        node.children = self.capture_all(entry.children(), status);
        node
    }
}
