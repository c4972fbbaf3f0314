//! treepeek CLI
//!
//! Command-line interface for exporting a project tree into Markdown.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use treepeek::cli::{commands, Cli, Commands};

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG takes precedence over the flags
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Execute the command
    match cli.command {
        Commands::Scan {
            path,
            output,
            patterns,
            max_file_size,
            max_depth,
            follow_links,
        } => commands::scan::execute(
            path,
            output,
            patterns,
            max_file_size,
            max_depth,
            follow_links,
            cli.quiet,
            cli.no_progress,
        ),
        Commands::Check {
            paths,
            root,
            patterns,
            json,
        } => commands::check::execute(paths, root, patterns, json),
        Commands::Completion { shell } => commands::completion::execute(shell, cli.quiet),
    }
}
