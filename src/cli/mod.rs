//! Command-line interface for treepeek

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

pub mod commands;

/// treepeek - export a project tree into a single Markdown document
#[derive(Parser)]
#[command(
    name = "treepeek",
    version,
    about = "Export a directory tree and its file contents into one Markdown document",
    long_about = "treepeek walks a project directory, skips everything matched by the configured patterns and the project's .gitignore, and writes the remaining structure and file contents into a single Markdown document."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable progress spinner
    #[arg(long, global = true)]
    pub no_progress: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options that shape the ignore matcher
#[derive(Args, Debug, Clone, Default)]
pub struct PatternArgs {
    /// Patterns to ignore, replacing the configured defaults (repeatable or comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub ignore: Vec<String>,

    /// Patterns to ignore in addition to the configured ones
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Configuration file (default: .treepeek.toml in the scan root, if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Do not load the ignore file from the scan root
    #[arg(long)]
    pub no_ignore_file: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export a directory tree into a Markdown document
    Scan {
        /// Directory to export
        path: PathBuf,

        /// Output file (default: project_knowledge.md)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        patterns: PatternArgs,

        /// Largest file, in bytes, whose content is included
        #[arg(long)]
        max_file_size: Option<u64>,

        /// Maximum directory depth below the root
        #[arg(long)]
        max_depth: Option<usize>,

        /// Follow symbolic links
        #[arg(long)]
        follow_links: bool,
    },

    /// Show whether paths would be ignored, and by which pattern
    Check {
        /// Paths to check, relative to the root
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Scan root whose configuration and ignore file apply
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        #[command(flatten)]
        patterns: PatternArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
