//! Reconciliation service
//!
//! Orchestrates the load → validate → diff → apply → save flow around the
//! two engine operations. Snapshots with duplicate identities are rejected
//! up front rather than fed to the (total, but then ambiguous) differ.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::error::ApplicationResult;
use crate::application::store::ConfigStore;
use crate::domain::{
    CaptureMode, CategoryDiff, ConfigTree, Differ, Merger, MissingTargetPolicy,
};
use crate::infrastructure::traits::FileSystem;

/// Service for diffing and merging persisted snapshots.
pub struct ReconcileService {
    store: ConfigStore,
    differ: Differ,
    merger: Merger,
}

impl ReconcileService {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        capture: CaptureMode,
        policy: MissingTargetPolicy,
    ) -> Self {
        Self {
            store: ConfigStore::new(fs),
            differ: Differ::new(capture),
            merger: Merger::new(policy),
        }
    }

    /// Diff two in-memory snapshots, validating both sides first.
    pub fn diff_trees(
        &self,
        from: &ConfigTree,
        to: &ConfigTree,
    ) -> ApplicationResult<Vec<CategoryDiff>> {
        from.validate()?;
        to.validate()?;
        Ok(self.differ.diff(from, to))
    }

    /// Load two snapshots and diff them.
    pub fn diff_files(&self, from: &Path, to: &Path) -> ApplicationResult<Vec<CategoryDiff>> {
        debug!(
            "diff_files: from={}, to={}",
            from.display(),
            to.display()
        );
        let from_tree = self.store.load(from)?;
        let to_tree = self.store.load(to)?;
        self.diff_trees(&from_tree, &to_tree)
    }

    /// Fold a diff forest into an in-memory target snapshot.
    pub fn apply(
        &self,
        diff: &[CategoryDiff],
        target: &ConfigTree,
    ) -> ApplicationResult<ConfigTree> {
        target.validate()?;
        Ok(self.merger.apply_to(diff, target)?)
    }

    /// Diff two snapshot files and fold the result into a target snapshot
    /// file, writing the merged tree to `output`.
    pub fn apply_files(
        &self,
        from: &Path,
        to: &Path,
        target: &Path,
        output: &Path,
    ) -> ApplicationResult<ConfigTree> {
        let diff = self.diff_files(from, to)?;
        let target_tree = self.store.load(target)?;
        let merged = self.apply(&diff, &target_tree)?;
        self.store.save(output, &merged)?;
        info!(
            "apply_files: merged '{}' written to {}",
            merged.name,
            output.display()
        );
        Ok(merged)
    }
}
