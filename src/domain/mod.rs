//! Domain layer: the diff & merge engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod diff;
pub mod entities;
pub mod error;
pub mod identity;
pub mod merge;

pub use diff::{CaptureMode, CategoryDiff, DiffStatus, Differ, EntryDiff, EntryShape};
pub use entities::{CategoryNode, CompositeEntry, ConfigTree, EntryNode, LeafEntry, LeafPayload};
pub use error::{DomainError, DomainResult};
pub use identity::{CategoryKey, EntryKey};
pub use merge::{materialize_category, materialize_entry, Merger, MissingTargetPolicy};
