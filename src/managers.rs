//! Package-manager detection
//!
//! Each supported Go package manager implements [`PackageManager`].
//! Detection walks the known managers in priority order: Godep's lock
//! manifest outranks the legacy GOPATH workspace layout, so a project
//! carrying `Godeps/Godeps.json` is always reported through Godep.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::package::Package;

pub mod go_workspace;
pub mod godep;

pub use go_workspace::GoWorkspace;
pub use godep::Godep;

#[derive(Error, Debug)]
pub enum ManagerError {
    #[error("{command} failed")]
    CommandFailed { command: String },

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    ReadManifest {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    ParseManifest {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A package manager that may govern a project's dependencies.
pub trait PackageManager {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Whether this manager applies to the project. Absence of marker
    /// files is a normal negative signal, never an error.
    fn active(&self) -> bool;

    /// The project's third-party dependencies as seen by this manager.
    fn current_packages(&self) -> Result<Vec<Package>, ManagerError>;
}

/// All supported managers for `project_path`, in detection priority order.
pub fn known_managers(project_path: &Path, full_version: bool) -> Vec<Box<dyn PackageManager>> {
    vec![
        Box::new(Godep::new(project_path, full_version)),
        Box::new(GoWorkspace::new(project_path, full_version)),
    ]
}

/// The managers that report themselves active for `project_path`.
pub fn active_managers(project_path: &Path, full_version: bool) -> Vec<Box<dyn PackageManager>> {
    known_managers(project_path, full_version)
        .into_iter()
        .filter(|manager| manager.active())
        .collect()
}
