use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI tool that enumerates third-party dependencies for license auditing
#[derive(Parser, Debug)]
#[command(name = "depaudit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Emit machine-readable JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the project's third-party dependencies
    Report {
        /// Project directory to audit
        #[arg(long, default_value = ".")]
        project_path: PathBuf,

        /// Report full revision strings instead of the 7-character form
        #[arg(long)]
        go_full_version: bool,
    },
    /// Show which package managers apply to the project
    Detect {
        /// Project directory to inspect
        #[arg(long, default_value = ".")]
        project_path: PathBuf,
    },
}
