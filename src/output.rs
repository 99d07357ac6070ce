//! Output formatting for JSON and text modes
//!
//! Provides types for structured output that can be serialized to JSON
//! for machine-readable output, or displayed as text for human consumption.

use serde::Serialize;
use std::path::Path;

use crate::package::Package;

/// Result of a report operation
#[derive(Debug, Serialize)]
pub struct ReportOutput {
    pub project_path: String,
    pub managers: Vec<String>,
    pub packages: Vec<PackageEntry>,
}

/// A single dependency in the report output
#[derive(Debug, Serialize)]
pub struct PackageEntry {
    pub manager: String,
    pub name: String,
    pub version: String,
    pub install_path: String,
}

/// Result of a detect operation
#[derive(Debug, Serialize)]
pub struct DetectOutput {
    pub project_path: String,
    pub managers: Vec<ManagerEntry>,
}

/// A single package manager's detection state
#[derive(Debug, Serialize)]
pub struct ManagerEntry {
    pub name: String,
    pub active: bool,
}

impl ReportOutput {
    pub fn new(project_path: &Path) -> Self {
        Self {
            project_path: project_path.display().to_string(),
            managers: Vec::new(),
            packages: Vec::new(),
        }
    }

    pub fn add_manager(&mut self, manager: &str, packages: &[Package]) {
        self.managers.push(manager.to_string());
        self.packages.extend(
            packages
                .iter()
                .map(|package| PackageEntry::new(manager, package)),
        );
    }
}

impl PackageEntry {
    pub fn new(manager: &str, package: &Package) -> Self {
        Self {
            manager: manager.to_string(),
            name: package.name.clone(),
            version: package.version.clone(),
            install_path: package.install_path.display().to_string(),
        }
    }
}

impl DetectOutput {
    pub fn new(project_path: &Path) -> Self {
        Self {
            project_path: project_path.display().to_string(),
            managers: Vec::new(),
        }
    }
}

impl ManagerEntry {
    pub fn new(name: &str, active: bool) -> Self {
        Self {
            name: name.to_string(),
            active,
        }
    }
}

/// Print JSON output to stdout
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    }
}
