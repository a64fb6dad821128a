//! Identity keys: the single source of truth for "is this the same slot".
//!
//! Two nodes occupy the same logical slot iff their keys are equal,
//! independent of payload values and of list position. This is the only
//! notion of equality the diff and merge algorithms use; it is weaker than
//! structural equality on the nodes themselves.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position-independent identity of a category (tab).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryKey {
    pub def_name: String,
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "category '{}'", self.def_name)
    }
}

/// Position-independent identity of an entry.
///
/// Leaves carry an optional `aux_id` disambiguator (entry-specific extra
/// data that participates in identity); composites never do.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryKey {
    pub kind: String,
    pub label: String,
    pub aux_id: Option<String>,
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry '{}' (kind {}", self.label, self.kind)?;
        if let Some(aux) = &self.aux_id {
            write!(f, ", aux {}", aux)?;
        }
        write!(f, ")")
    }
}
