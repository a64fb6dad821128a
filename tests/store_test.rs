//! Tests for the versioned snapshot store

use std::collections::BTreeMap;
use std::sync::Arc;

use tempfile::TempDir;

use menumerge::application::{ApplicationError, ConfigStore, FORMAT_VERSION};
use menumerge::domain::{
    CategoryNode, CompositeEntry, ConfigTree, EntryNode, LeafEntry, LeafPayload,
};
use menumerge::infrastructure::traits::RealFileSystem;

fn store() -> ConfigStore {
    ConfigStore::new(Arc::new(RealFileSystem))
}

fn sample_tree() -> ConfigTree {
    ConfigTree {
        name: "Default".to_string(),
        categories: vec![CategoryNode {
            def_name: "Orders".to_string(),
            label: "Orders".to_string(),
            description: "work orders".to_string(),
            entries: vec![
                EntryNode::Leaf(LeafEntry {
                    kind: "designator".to_string(),
                    label: "Cut".to_string(),
                    aux_id: Some("plants".to_string()),
                    payload: LeafPayload {
                        order: 2.5,
                        settings: BTreeMap::from([("icon".to_string(), "axe".to_string())]),
                    },
                }),
                EntryNode::Composite(CompositeEntry {
                    kind: "group".to_string(),
                    label: "Misc".to_string(),
                    children: vec![EntryNode::Leaf(LeafEntry {
                        kind: "designator".to_string(),
                        label: "Cancel".to_string(),
                        aux_id: None,
                        payload: LeafPayload::default(),
                    })],
                }),
            ],
        }],
    }
}

#[test]
fn given_snapshot_when_saving_and_loading_then_round_trips_exactly() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("default.toml");
    let tree = sample_tree();

    // Act
    store().save(&path, &tree).unwrap();
    let loaded = store().load(&path).unwrap();

    // Assert
    assert_eq!(loaded, tree);
}

#[test]
fn given_saved_file_when_inspecting_then_carries_format_version() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("default.toml");
    store().save(&path, &sample_tree()).unwrap();

    // Act
    let content = std::fs::read_to_string(&path).unwrap();

    // Assert
    assert!(content.contains(&format!("version = {}", FORMAT_VERSION)));
}

#[test]
fn given_newer_format_version_when_loading_then_errors() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("future.toml");
    let content = format!(
        "version = {}\n\n[tree]\nname = \"x\"\ncategories = []\n",
        FORMAT_VERSION + 1
    );
    std::fs::write(&path, content).unwrap();

    // Act
    let result = store().load(&path);

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::UnsupportedVersion { found, .. }) if found == FORMAT_VERSION + 1
    ));
}

#[test]
fn given_missing_file_when_loading_then_read_error() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nope.toml");

    // Act & Assert
    assert!(matches!(
        store().load(&path),
        Err(ApplicationError::Read { .. })
    ));
}

#[test]
fn given_malformed_toml_when_loading_then_format_error() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.toml");
    std::fs::write(&path, "version = \"not a number").unwrap();

    // Act & Assert
    assert!(matches!(
        store().load(&path),
        Err(ApplicationError::Format { .. })
    ));
}

#[test]
fn given_nested_output_path_when_saving_then_creates_parent_dirs() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("layouts").join("default.toml");

    // Act
    store().save(&path, &sample_tree()).unwrap();

    // Assert
    assert!(path.exists());
}
