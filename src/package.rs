//! Dependency records produced by package-manager detection

use serde::Serialize;
use std::path::PathBuf;

/// Number of revision characters reported unless the full version is requested.
const SHORT_REVISION_LEN: usize = 7;

/// A third-party dependency identified in the project.
///
/// `name` is the repository-root import path, never a subpackage path,
/// even when only a subpackage is imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    pub name: String,
    pub version: String,
    pub install_path: PathBuf,
}

impl Package {
    pub fn new(name: impl Into<String>, version: impl Into<String>, install_path: PathBuf) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            install_path,
        }
    }
}

/// Format a version-control revision for reporting.
///
/// Truncated to seven characters unless `full` is requested.
pub fn format_revision(revision: &str, full: bool) -> String {
    if full {
        revision.to_string()
    } else {
        revision.chars().take(SHORT_REVISION_LEN).collect()
    }
}
