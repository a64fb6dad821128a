//! Integration tests for Settings config loading
//!
//! Note: these tests run without a global config (temp directories only),
//! so they effectively test local config merging with compiled defaults.

use std::fs;

use tempfile::TempDir;

use menumerge::config::Settings;
use menumerge::domain::{CaptureMode, MissingTargetPolicy};

#[test]
fn given_no_config_files_when_loading_then_uses_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings.capture, CaptureMode::IdentityOnly);
    assert_eq!(settings.on_missing_target, MissingTargetPolicy::Error);
}

#[test]
fn given_local_config_when_loading_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let local_config = r#"
capture = "full_payload"
on_missing_target = "skip"
"#;
    fs::write(dir.path().join(".menumerge.toml"), local_config).unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings.capture, CaptureMode::FullPayload);
    assert_eq!(settings.on_missing_target, MissingTargetPolicy::Skip);
}

#[test]
fn given_partial_local_config_when_loading_then_unspecified_fields_keep_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".menumerge.toml"), "capture = \"full_payload\"\n").unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings.capture, CaptureMode::FullPayload);
    assert_eq!(settings.on_missing_target, MissingTargetPolicy::Error);
}

#[test]
fn given_invalid_local_config_when_loading_then_errors() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".menumerge.toml"), "capture = \"everything\"\n").unwrap();

    // Act
    let result = Settings::load(Some(dir.path()));

    // Assert
    assert!(result.is_err());
}
