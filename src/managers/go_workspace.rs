//! Legacy GOPATH workspace detection
//!
//! A "workspace" project vendors its dependencies as git submodules under
//! `src/` (or `vendor/src/`) and declares the layout through a `.envrc`
//! exporting `GOPATH` or `GO15VENDOREXPERIMENT`. Dependencies are
//! enumerated by cross-referencing two sources:
//!
//! - `go list` for the import paths the project actually uses
//! - `git submodule status` for the pinned revision and install path of
//!   each vendored repository
//!
//! A submodule is reported when its repository import path is a prefix of
//! at least one used import. The reported name is always the repository
//! root, even when only a subpackage is imported.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::managers::{ManagerError, PackageManager};
use crate::markers;
use crate::package::{Package, format_revision};
use crate::shell::{CommandRunner, DirGuard, EnvGuard, SystemRunner};

const ENVRC_FILE: &str = ".envrc";
const ENVRC_TOKENS: [&str; 2] = ["GOPATH", "GO15VENDOREXPERIMENT"];
const GO_LIST_COMMAND: &str = r#"go list -f '{{join .Deps "\n"}}' ./..."#;
const GIT_SUBMODULE_COMMAND: &str = "git submodule status";

/// A git submodule checked out at a fixed revision inside the project tree.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Submodule {
    install_path: PathBuf,
    revision: String,
}

pub struct GoWorkspace {
    project_path: PathBuf,
    full_version: bool,
    runner: Box<dyn CommandRunner>,
}

impl GoWorkspace {
    pub fn new(project_path: &Path, full_version: bool) -> Self {
        Self::with_runner(project_path, full_version, Box::new(SystemRunner))
    }

    pub fn with_runner(
        project_path: &Path,
        full_version: bool,
        runner: Box<dyn CommandRunner>,
    ) -> Self {
        Self {
            project_path: project_path.to_path_buf(),
            full_version,
            runner,
        }
    }

    fn detect_active(&self) -> bool {
        // A Godeps manifest marks the project as Godep-managed, which
        // outranks the workspace layout.
        if godep_manifest(&self.project_path).exists() {
            return false;
        }

        let Some(envrc) = markers::find_in_ancestors(&self.project_path, ENVRC_FILE) else {
            return false;
        };

        match fs::read_to_string(&envrc) {
            Ok(content) => ENVRC_TOKENS.iter().any(|token| content.contains(token)),
            Err(_) => false,
        }
    }

    /// Import paths used by the project, with the standard library
    /// filtered out.
    ///
    /// Command failure degrades to an empty list; callers must not treat
    /// non-empty output as a success signal.
    fn go_list(&self) -> Vec<String> {
        let Ok(_dir) = DirGuard::change(&self.project_path) else {
            return Vec::new();
        };
        let _gopath = markers::find_in_ancestors(&self.project_path, ENVRC_FILE)
            .map(|_| EnvGuard::set("GOPATH", &self.project_path));

        let (stdout, success) = self.runner.capture(GO_LIST_COMMAND);
        if !success {
            log::debug!("{} reported failure, assuming no dependencies", GO_LIST_COMMAND);
            return Vec::new();
        }

        stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && is_third_party(line))
            .map(String::from)
            .collect()
    }

    /// The project's git submodules with their pinned revisions.
    ///
    /// An unreadable submodule listing makes package identity unknowable,
    /// so command failure is fatal here.
    fn git_modules(&self) -> Result<Vec<Submodule>, ManagerError> {
        let _dir = DirGuard::change(&self.project_path).map_err(|source| ManagerError::Io {
            path: self.project_path.clone(),
            source,
        })?;

        let (stdout, success) = self.runner.capture(GIT_SUBMODULE_COMMAND);
        if !success {
            return Err(ManagerError::CommandFailed {
                command: GIT_SUBMODULE_COMMAND.to_string(),
            });
        }

        Ok(stdout
            .lines()
            .filter_map(|line| self.parse_submodule_line(line))
            .collect())
    }

    /// Parse one `git submodule status` line.
    ///
    /// Format: optional status marker, revision, repository-relative path,
    /// optional parenthesized description. Lines that do not fit are
    /// unparseable metadata and skipped.
    fn parse_submodule_line(&self, line: &str) -> Option<Submodule> {
        let line = line.trim_start().trim_start_matches(['+', '-', 'U']);
        let mut tokens = line.split_whitespace();
        let revision = tokens.next()?;
        let relative = tokens.next()?;

        Some(Submodule {
            install_path: self.project_path.join(relative),
            revision: revision.to_string(),
        })
    }

    /// Repository-root import path for a submodule install path.
    ///
    /// The import path is the install path relative to the workspace
    /// source root; `vendor/src` is tested before `src` so vendored
    /// submodules resolve correctly. A submodule outside both roots has
    /// no import path and can never match a dependency.
    fn repo_import_path(&self, install_path: &Path) -> Option<String> {
        let vendor_root = self.project_path.join("vendor").join("src");
        let src_root = self.project_path.join("src");

        let relative = install_path
            .strip_prefix(&vendor_root)
            .or_else(|_| install_path.strip_prefix(&src_root))
            .ok()?;

        Some(relative.to_string_lossy().into_owned())
    }
}

impl PackageManager for GoWorkspace {
    fn name(&self) -> &'static str {
        "go_workspace"
    }

    fn active(&self) -> bool {
        let active = self.detect_active();
        log::info!(
            "package manager {} is {} for {}",
            self.name(),
            if active { "active" } else { "inactive" },
            self.project_path.display()
        );
        active
    }

    fn current_packages(&self) -> Result<Vec<Package>, ManagerError> {
        let imports = self.go_list();
        let submodules = self.git_modules()?;

        let mut seen = HashSet::new();
        let mut packages = Vec::new();

        for submodule in submodules {
            let Some(repo) = self.repo_import_path(&submodule.install_path) else {
                continue;
            };
            if !imports.iter().any(|import| is_segment_prefix(&repo, import)) {
                continue;
            }
            // Nested vendor trees can derive the same repository twice;
            // first submodule in listing order wins.
            if !seen.insert(repo.clone()) {
                continue;
            }

            packages.push(Package::new(
                repo,
                format_revision(&submodule.revision, self.full_version),
                submodule.install_path,
            ));
        }

        Ok(packages)
    }
}

fn godep_manifest(project_path: &Path) -> PathBuf {
    project_path.join("Godeps").join("Godeps.json")
}

/// Whether an import path names a third-party package.
///
/// Standard-library imports have no domain-style first segment, so a dot
/// in the first segment is the discriminator.
fn is_third_party(import: &str) -> bool {
    import
        .split('/')
        .next()
        .is_some_and(|segment| segment.contains('.'))
}

/// Whether `prefix` is a path-segment prefix of `path`.
///
/// Compared segment-wise so `github.com/onsi/foo` does not match
/// `github.com/onsi/foobar`.
fn is_segment_prefix(prefix: &str, path: &str) -> bool {
    let mut path_segments = path.split('/');
    prefix
        .split('/')
        .all(|segment| path_segments.next() == Some(segment))
}
