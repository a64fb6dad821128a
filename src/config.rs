//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/menumerge/menumerge.toml`
//! 3. Local config: `<dir>/.menumerge.toml`
//! 4. Environment variables: `MENUMERGE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{CaptureMode, MissingTargetPolicy};

/// Unified configuration for menumerge.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// How much the differ captures beyond node identities
    pub capture: CaptureMode,
    /// Behavior when the apply target diverged from the diffed snapshot
    pub on_missing_target: MissingTargetPolicy,
}

/// Partial settings for layered merging (fields absent in a file stay `None`
/// and inherit from the layer below).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
    capture: Option<CaptureMode>,
    on_missing_target: Option<MissingTargetPolicy>,
}

/// Get the XDG config directory for menumerge.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "menumerge").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("menumerge.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".menumerge.toml")
}

fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Merge overlay config onto self (base). Overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            capture: overlay.capture.unwrap_or(self.capture),
            on_missing_target: overlay.on_missing_target.unwrap_or(self.on_missing_target),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a local `.menumerge.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/menumerge/menumerge.toml`
    /// 3. Local config: `<local_dir>/.menumerge.toml`
    /// 4. Environment variables: `MENUMERGE_*` prefix
    pub fn load(local_dir: Option<&Path>) -> ApplicationResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply MENUMERGE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> ApplicationResult<Self> {
        let builder =
            Config::builder().add_source(Environment::with_prefix("MENUMERGE").separator("__"));
        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("capture") {
            settings.capture = parse_capture(&val)?;
        }
        if let Ok(val) = config.get_string("on_missing_target") {
            settings.on_missing_target = parse_policy(&val)?;
        }

        Ok(settings)
    }
}

fn parse_capture(value: &str) -> ApplicationResult<CaptureMode> {
    match value {
        "identity_only" => Ok(CaptureMode::IdentityOnly),
        "full_payload" => Ok(CaptureMode::FullPayload),
        other => Err(ApplicationError::Config {
            message: format!(
                "unknown capture mode '{other}' (expected identity_only or full_payload)"
            ),
        }),
    }
}

fn parse_policy(value: &str) -> ApplicationResult<MissingTargetPolicy> {
    match value {
        "error" => Ok(MissingTargetPolicy::Error),
        "skip" => Ok(MissingTargetPolicy::Skip),
        other => Err(ApplicationError::Config {
            message: format!("unknown missing-target policy '{other}' (expected error or skip)"),
        }),
    }
}
