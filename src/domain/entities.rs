//! Domain entities: snapshot model of the hierarchical menu configuration

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::identity::{CategoryKey, EntryKey};

/// Immutable snapshot of the full menu configuration.
///
/// Category order is display order and is semantically meaningful.
/// Snapshots are taken on demand, diffed, merged; the engine never mutates
/// one after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigTree {
    /// Name of the saved layout (e.g. "Default", "Compact")
    pub name: String,
    #[serde(default)]
    pub categories: Vec<CategoryNode>,
}

/// A named top-level tab holding an ordered list of entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryNode {
    /// Stable identifier; the identity key for matching across snapshots
    pub def_name: String,
    /// Display label (not part of identity)
    pub label: String,
    /// Free-text description, round-tripped but never compared
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub entries: Vec<EntryNode>,
}

impl CategoryNode {
    pub fn key(&self) -> CategoryKey {
        CategoryKey {
            def_name: self.def_name.clone(),
        }
    }
}

/// One slot in a category: either a concrete leaf entry or a nested group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryNode {
    Leaf(LeafEntry),
    Composite(CompositeEntry),
}

impl EntryNode {
    pub fn key(&self) -> EntryKey {
        match self {
            EntryNode::Leaf(leaf) => EntryKey {
                kind: leaf.kind.clone(),
                label: leaf.label.clone(),
                aux_id: leaf.aux_id.clone(),
            },
            EntryNode::Composite(group) => EntryKey {
                kind: group.kind.clone(),
                label: group.label.clone(),
                aux_id: None,
            },
        }
    }

    pub fn label(&self) -> &str {
        match self {
            EntryNode::Leaf(leaf) => &leaf.label,
            EntryNode::Composite(group) => &group.label,
        }
    }

    /// Child list of this entry; empty for leaves.
    pub fn children(&self) -> &[EntryNode] {
        match self {
            EntryNode::Leaf(_) => &[],
            EntryNode::Composite(group) => &group.children,
        }
    }
}

/// A concrete menu entry. What the entry *does* is host-specific and opaque
/// here; the engine matches on (kind, label, aux_id) and round-trips the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafEntry {
    pub kind: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aux_id: Option<String>,
    #[serde(default)]
    pub payload: LeafPayload,
}

/// A nested group or dropdown of entries. Nests to arbitrary depth,
/// typically no more than three levels in practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeEntry {
    pub kind: String,
    pub label: String,
    #[serde(default)]
    pub children: Vec<EntryNode>,
}

/// Opaque leaf payload: ordering hint plus entry-specific settings.
/// Never inspected by the engine beyond copying it around.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeafPayload {
    pub order: f32,
    pub settings: BTreeMap<String, String>,
}

impl ConfigTree {
    /// Check that identities are unique within every sibling list.
    ///
    /// The diff algorithm itself tolerates duplicates (first match wins),
    /// but the pairing among duplicates is arbitrary, so callers should
    /// reject ambiguous snapshots up front.
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(dup) = self.categories.iter().duplicates_by(|c| c.key()).next() {
            return Err(DomainError::DuplicateIdentity {
                identity: dup.key().to_string(),
            });
        }
        for category in &self.categories {
            validate_entries(&category.entries)?;
        }
        Ok(())
    }
}

fn validate_entries(entries: &[EntryNode]) -> DomainResult<()> {
    if let Some(dup) = entries.iter().duplicates_by(|e| e.key()).next() {
        return Err(DomainError::DuplicateIdentity {
            identity: dup.key().to_string(),
        });
    }
    for entry in entries {
        if let EntryNode::Composite(group) = entry {
            validate_entries(&group.children)?;
        }
    }
    Ok(())
}
