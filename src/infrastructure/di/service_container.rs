//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::ReconcileService;
use crate::application::store::ConfigStore;
use crate::config::Settings;
use crate::domain::{CaptureMode, MissingTargetPolicy};
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding application settings and shared dependencies.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);
        Self { settings, fs }
    }

    /// Snapshot store bound to the container's filesystem.
    pub fn store(&self) -> ConfigStore {
        ConfigStore::new(self.fs.clone())
    }

    /// Reconcile service with explicit capture/policy overrides.
    pub fn reconcile(
        &self,
        capture: CaptureMode,
        policy: MissingTargetPolicy,
    ) -> ReconcileService {
        ReconcileService::new(self.fs.clone(), capture, policy)
    }
}
