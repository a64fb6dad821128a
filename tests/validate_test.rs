//! Tests for snapshot validation (duplicate-identity detection)

use menumerge::domain::{
    CategoryNode, CompositeEntry, ConfigTree, DomainError, EntryNode, LeafEntry, LeafPayload,
};

fn leaf(kind: &str, label: &str) -> EntryNode {
    EntryNode::Leaf(LeafEntry {
        kind: kind.to_string(),
        label: label.to_string(),
        aux_id: None,
        payload: LeafPayload::default(),
    })
}

fn group(label: &str, children: Vec<EntryNode>) -> EntryNode {
    EntryNode::Composite(CompositeEntry {
        kind: "group".to_string(),
        label: label.to_string(),
        children,
    })
}

fn category(def_name: &str, entries: Vec<EntryNode>) -> CategoryNode {
    CategoryNode {
        def_name: def_name.to_string(),
        label: def_name.to_string(),
        description: String::new(),
        entries,
    }
}

fn tree(categories: Vec<CategoryNode>) -> ConfigTree {
    ConfigTree {
        name: "test".to_string(),
        categories,
    }
}

#[test]
fn given_unique_identities_when_validating_then_ok() {
    // Arrange
    let snapshot = tree(vec![
        category("Orders", vec![leaf("d", "Cut"), group("Misc", vec![leaf("d", "Cancel")])]),
        category("Zone", vec![leaf("d", "Cut")]), // same identity, different list: fine
    ]);

    // Act & Assert
    assert!(snapshot.validate().is_ok());
}

#[test]
fn given_duplicate_categories_when_validating_then_errors() {
    // Arrange
    let snapshot = tree(vec![category("Orders", vec![]), category("Orders", vec![])]);

    // Act
    let result = snapshot.validate();

    // Assert
    match result {
        Err(DomainError::DuplicateIdentity { identity }) => {
            assert!(identity.contains("Orders"), "identity was: {}", identity);
        }
        other => panic!("expected DuplicateIdentity, got {:?}", other),
    }
}

#[test]
fn given_duplicate_entries_when_validating_then_errors() {
    // Arrange
    let snapshot = tree(vec![category(
        "Orders",
        vec![leaf("d", "Cut"), leaf("d", "Cut")],
    )]);

    // Act & Assert
    assert!(matches!(
        snapshot.validate(),
        Err(DomainError::DuplicateIdentity { .. })
    ));
}

#[test]
fn given_duplicates_nested_in_group_when_validating_then_errors() {
    // Arrange
    let snapshot = tree(vec![category(
        "Orders",
        vec![group(
            "Misc",
            vec![leaf("d", "Cancel"), leaf("d", "Cancel")],
        )],
    )]);

    // Act & Assert
    assert!(matches!(
        snapshot.validate(),
        Err(DomainError::DuplicateIdentity { .. })
    ));
}

#[test]
fn given_same_label_different_aux_id_when_validating_then_ok() {
    // Arrange: aux_id disambiguates otherwise identical leaves
    let mk = |aux: &str| {
        EntryNode::Leaf(LeafEntry {
            kind: "d".to_string(),
            label: "Build".to_string(),
            aux_id: Some(aux.to_string()),
            payload: LeafPayload::default(),
        })
    };
    let snapshot = tree(vec![category("Structure", vec![mk("wall"), mk("door")])]);

    // Act & Assert
    assert!(snapshot.validate().is_ok());
}
