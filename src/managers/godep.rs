//! Godep manifest support
//!
//! Godep-managed projects pin dependencies in `Godeps/Godeps.json` and
//! check the sources out under `Godeps/_workspace/src/`. The manifest is
//! authoritative; no external commands are needed.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::managers::{ManagerError, PackageManager};
use crate::package::{Package, format_revision};

pub struct Godep {
    project_path: PathBuf,
    full_version: bool,
}

/// The subset of `Godeps.json` this tool reads.
///
/// ```json
/// {
///   "Deps": [
///     { "ImportPath": "github.com/onsi/ginkgo", "Rev": "1993eaf..." }
///   ]
/// }
/// ```
#[derive(Debug, Deserialize)]
struct GodepsManifest {
    #[serde(rename = "Deps", default)]
    deps: Vec<GodepsDep>,
}

#[derive(Debug, Deserialize)]
struct GodepsDep {
    #[serde(rename = "ImportPath")]
    import_path: String,
    #[serde(rename = "Rev")]
    rev: String,
}

impl Godep {
    pub fn new(project_path: &Path, full_version: bool) -> Self {
        Self {
            project_path: project_path.to_path_buf(),
            full_version,
        }
    }

    fn manifest_path(&self) -> PathBuf {
        self.project_path.join("Godeps").join("Godeps.json")
    }

    fn load_manifest(&self) -> Result<GodepsManifest, ManagerError> {
        let path = self.manifest_path();
        let content = fs::read_to_string(&path).map_err(|source| ManagerError::ReadManifest {
            path: path.clone(),
            source,
        })?;

        serde_json::from_str(&content)
            .map_err(|source| ManagerError::ParseManifest { path, source })
    }
}

impl PackageManager for Godep {
    fn name(&self) -> &'static str {
        "godep"
    }

    fn active(&self) -> bool {
        let active = self.manifest_path().exists();
        log::info!(
            "package manager {} is {} for {}",
            self.name(),
            if active { "active" } else { "inactive" },
            self.project_path.display()
        );
        active
    }

    fn current_packages(&self) -> Result<Vec<Package>, ManagerError> {
        let manifest = self.load_manifest()?;
        let workspace_src = self
            .project_path
            .join("Godeps")
            .join("_workspace")
            .join("src");

        Ok(manifest
            .deps
            .into_iter()
            .map(|dep| {
                let install_path = workspace_src.join(&dep.import_path);
                Package::new(
                    dep.import_path,
                    format_revision(&dep.rev, self.full_version),
                    install_path,
                )
            })
            .collect())
    }
}
