//! menumerge: diff and selectively merge hierarchical menu configuration snapshots.
//!
//! The core engine exposes exactly two operations: [`Differ::diff`] turns two
//! snapshots into a classified diff forest (Added / Removed / Unchanged per
//! logical slot, matched by identity rather than position), and
//! [`Merger::apply_to`] folds such a forest back into a fresh target
//! snapshot. Everything else here — the versioned store, settings, and the
//! CLI — is plumbing around those two calls.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{
    CaptureMode, CategoryDiff, CategoryNode, ConfigTree, DiffStatus, Differ, EntryDiff,
    EntryNode, Merger, MissingTargetPolicy,
};
