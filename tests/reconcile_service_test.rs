//! End-to-end tests for ReconcileService (diff and apply over snapshot files)

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use menumerge::application::services::ReconcileService;
use menumerge::application::{ApplicationError, ConfigStore};
use menumerge::domain::{
    CaptureMode, CategoryNode, ConfigTree, DiffStatus, DomainError, EntryNode, LeafEntry,
    LeafPayload, MissingTargetPolicy,
};
use menumerge::infrastructure::traits::RealFileSystem;
use menumerge::util::testing;

fn service(capture: CaptureMode, policy: MissingTargetPolicy) -> ReconcileService {
    ReconcileService::new(Arc::new(RealFileSystem), capture, policy)
}

fn leaf(label: &str) -> EntryNode {
    EntryNode::Leaf(LeafEntry {
        kind: "designator".to_string(),
        label: label.to_string(),
        aux_id: None,
        payload: LeafPayload::default(),
    })
}

fn snapshot(name: &str, labels: &[&str]) -> ConfigTree {
    ConfigTree {
        name: name.to_string(),
        categories: vec![CategoryNode {
            def_name: "Orders".to_string(),
            label: "Orders".to_string(),
            description: String::new(),
            entries: labels.iter().map(|l| leaf(l)).collect(),
        }],
    }
}

fn write_snapshot(temp: &TempDir, file: &str, tree: &ConfigTree) -> PathBuf {
    let path = temp.path().join(file);
    ConfigStore::new(Arc::new(RealFileSystem))
        .save(&path, tree)
        .expect("write snapshot");
    path
}

#[test]
fn given_two_snapshot_files_when_diffing_then_returns_classified_forest() {
    // Arrange
    testing::init_test_setup();
    let temp = TempDir::new().unwrap();
    let from = write_snapshot(&temp, "from.toml", &snapshot("a", &["Cut", "Mine"]));
    let to = write_snapshot(&temp, "to.toml", &snapshot("b", &["Mine", "Plant"]));

    // Act
    let diff = service(CaptureMode::IdentityOnly, MissingTargetPolicy::Error)
        .diff_files(&from, &to)
        .unwrap();

    // Assert
    assert_eq!(diff.len(), 1);
    let statuses: Vec<_> = diff[0].entries.iter().map(|e| e.status).collect();
    assert_eq!(
        statuses,
        vec![DiffStatus::Removed, DiffStatus::Unchanged, DiffStatus::Added]
    );
}

#[test]
fn given_snapshot_files_when_applying_then_writes_merged_output() {
    // Arrange
    testing::init_test_setup();
    let temp = TempDir::new().unwrap();
    let from = write_snapshot(&temp, "from.toml", &snapshot("a", &["Cut", "Mine"]));
    let to = write_snapshot(&temp, "to.toml", &snapshot("b", &["Mine", "Plant"]));
    let output = temp.path().join("merged.toml");

    // Act
    let merged = service(CaptureMode::IdentityOnly, MissingTargetPolicy::Error)
        .apply_files(&from, &to, &to, &output)
        .unwrap();

    // Assert
    assert!(output.exists());
    let labels: Vec<_> = merged.categories[0]
        .entries
        .iter()
        .map(|e| e.label().to_string())
        .collect();
    assert_eq!(labels, vec!["Mine", "Plant"]);
    // The persisted output loads back to the same tree
    let reloaded = ConfigStore::new(Arc::new(RealFileSystem))
        .load(&output)
        .unwrap();
    assert_eq!(reloaded, merged);
}

#[test]
fn given_ambiguous_snapshot_when_diffing_then_rejected_before_diff() {
    // Arrange: duplicate identity within one sibling list
    testing::init_test_setup();
    let temp = TempDir::new().unwrap();
    let from = write_snapshot(&temp, "from.toml", &snapshot("a", &["Cut", "Cut"]));
    let to = write_snapshot(&temp, "to.toml", &snapshot("b", &["Cut"]));

    // Act
    let result = service(CaptureMode::IdentityOnly, MissingTargetPolicy::Error)
        .diff_files(&from, &to);

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::DuplicateIdentity { .. }))
    ));
}

#[test]
fn given_diverged_target_file_when_applying_then_policy_decides() {
    // Arrange
    testing::init_test_setup();
    let temp = TempDir::new().unwrap();
    let from = write_snapshot(&temp, "from.toml", &snapshot("a", &["Mine"]));
    let to = write_snapshot(&temp, "to.toml", &snapshot("b", &["Mine"]));
    let target = write_snapshot(&temp, "target.toml", &snapshot("t", &["Haul"]));
    let output = temp.path().join("merged.toml");

    // Act: error policy fails, skip policy drops the branch
    let failed = service(CaptureMode::IdentityOnly, MissingTargetPolicy::Error)
        .apply_files(&from, &to, &target, &output);
    let merged = service(CaptureMode::IdentityOnly, MissingTargetPolicy::Skip)
        .apply_files(&from, &to, &target, &output)
        .unwrap();

    // Assert
    assert!(matches!(
        failed,
        Err(ApplicationError::Domain(DomainError::MissingTargetSibling { .. }))
    ));
    assert!(merged.categories[0].entries.is_empty());
}
