use clap::Parser;
use std::path::{Path, PathBuf};

use depaudit::cli::{Cli, Command};
use depaudit::config::Config;
use depaudit::managers;
use depaudit::output::{self, DetectOutput, ManagerEntry, ReportOutput};
use depaudit::package::Package;

fn main() {
    let cli = Cli::parse();
    let json_output = cli.json;

    // Best-effort logging to stderr, controlled by RUST_LOG.
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")
        .and_then(|logger| logger.start())
        .ok();

    let result = match cli.command {
        Some(Command::Report {
            project_path,
            go_full_version,
        }) => run_report(project_path, go_full_version, json_output),
        Some(Command::Detect { project_path }) => run_detect(project_path, json_output),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_report(
    project_path: PathBuf,
    go_full_version: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let project_path = resolve_project_path(&project_path)?;
    let full_version = go_full_version || config.go_full_version;

    let mut report = ReportOutput::new(&project_path);
    for manager in managers::active_managers(&project_path, full_version) {
        let packages: Vec<Package> = manager
            .current_packages()?
            .into_iter()
            .filter(|package| !config.is_ignored(&package.name))
            .collect();
        report.add_manager(manager.name(), &packages);
    }

    if json_output {
        output::print_json(&report);
        return Ok(());
    }

    if report.managers.is_empty() {
        println!(
            "No supported package manager detected for {}",
            project_path.display()
        );
    } else if report.packages.is_empty() {
        println!("No third-party dependencies found");
    } else {
        for entry in &report.packages {
            println!("{}@{} ({})", entry.name, entry.version, entry.install_path);
        }
    }

    Ok(())
}

fn run_detect(project_path: PathBuf, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let project_path = resolve_project_path(&project_path)?;

    let mut detect = DetectOutput::new(&project_path);
    for manager in managers::known_managers(&project_path, false) {
        detect
            .managers
            .push(ManagerEntry::new(manager.name(), manager.active()));
    }

    if json_output {
        output::print_json(&detect);
        return Ok(());
    }

    for entry in &detect.managers {
        let state = if entry.active { "active" } else { "inactive" };
        println!("{}: {}", entry.name, state);
    }

    Ok(())
}

/// Canonicalize the project path so reported install paths are absolute.
fn resolve_project_path(path: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    path.canonicalize()
        .map_err(|e| format!("Cannot access project path {}: {}", path.display(), e).into())
}
