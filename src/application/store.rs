//! Persisted-configuration store: versioned TOML snapshots
//!
//! The engine defines no wire format of its own; this store wraps snapshots
//! in a small versioned envelope so future layout changes stay loadable.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::ConfigTree;
use crate::infrastructure::traits::FileSystem;

/// Current on-disk format version.
pub const FORMAT_VERSION: u32 = 1;

/// On-disk envelope around a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedConfig {
    pub version: u32,
    pub tree: ConfigTree,
}

#[derive(Serialize)]
struct SavedConfigRef<'a> {
    version: u32,
    tree: &'a ConfigTree,
}

/// Loads and saves [`ConfigTree`] snapshots through the filesystem boundary.
pub struct ConfigStore {
    fs: Arc<dyn FileSystem>,
}

impl ConfigStore {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load a snapshot, rejecting files written by a newer format version.
    pub fn load(&self, path: &Path) -> ApplicationResult<ConfigTree> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|e| ApplicationError::Read {
                path: path.to_path_buf(),
                source: e,
            })?;
        let saved: SavedConfig =
            toml::from_str(&content).map_err(|e| ApplicationError::Format {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        if saved.version > FORMAT_VERSION {
            return Err(ApplicationError::UnsupportedVersion {
                path: path.to_path_buf(),
                found: saved.version,
                supported: FORMAT_VERSION,
            });
        }
        debug!(
            "load: '{}' from {} (version {})",
            saved.tree.name,
            path.display(),
            saved.version
        );
        Ok(saved.tree)
    }

    /// Save a snapshot under the current format version.
    pub fn save(&self, path: &Path, tree: &ConfigTree) -> ApplicationResult<()> {
        let envelope = SavedConfigRef {
            version: FORMAT_VERSION,
            tree,
        };
        let content =
            toml::to_string_pretty(&envelope).map_err(|e| ApplicationError::Format {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.fs
                    .create_dir_all(parent)
                    .map_err(|e| ApplicationError::Write {
                        path: path.to_path_buf(),
                        source: e,
                    })?;
            }
        }
        debug!("save: '{}' to {}", tree.name, path.display());
        self.fs
            .write(path, &content)
            .map_err(|e| ApplicationError::Write {
                path: path.to_path_buf(),
                source: e,
            })
    }
}
