//! Scan command implementation

use crate::cli::commands::resolve_config;
use crate::cli::PatternArgs;
use crate::scanner::{export, FilteredWalker, ScanPhase};
use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

/// Execute the scan command
#[allow(clippy::too_many_arguments)]
pub fn execute(
    path: PathBuf,
    output: Option<PathBuf>,
    patterns: PatternArgs,
    max_file_size: Option<u64>,
    max_depth: Option<usize>,
    follow_links: bool,
    quiet: bool,
    no_progress: bool,
) -> Result<()> {
    let mut config = resolve_config(&path, &patterns)?;
    if let Some(output) = output {
        config = config.with_output(output);
    }
    if let Some(max) = max_file_size {
        config.max_file_size = max;
    }
    tracing::debug!(file = %config.output.display(), "output file");

    let mut walker = FilteredWalker::new(&path, &config)
        .with_context(|| format!("Cannot scan {}", path.display()))?
        .follow_links(follow_links);
    if let Some(depth) = max_depth {
        walker = walker.max_depth(depth);
    }

    let spinner = if !quiet && !no_progress && atty::is(atty::Stream::Stderr) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message("Scanning...");
        Some(spinner)
    } else {
        None
    };

    if let Some(spinner) = &spinner {
        let spinner = spinner.clone();
        walker = walker.with_progress(move |progress| {
            let message = match progress.phase {
                ScanPhase::Walking => format!(
                    "Scanning... {} entries, {} ignored",
                    progress.entries_visited, progress.entries_ignored
                ),
                ScanPhase::Rendering => {
                    format!("Reading {} entries...", progress.entries_visited)
                },
                ScanPhase::Complete => "Done".to_string(),
            };
            spinner.set_message(message);
        });
    }

    let result = export(&walker, &config.output, config.max_file_size);
    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }
    let report = result
        .with_context(|| format!("Failed to export {}", walker.root().display()))?;

    if !quiet {
        println!(
            "{} Exported {} to {}",
            "✓".green(),
            walker.root().display().to_string().cyan(),
            report.output.display().to_string().cyan()
        );
        println!("  • Directories: {}", report.walk.directories);
        println!(
            "  • Files: {} ({} text, {} binary, {} skipped)",
            report.walk.files,
            report.render.text_files,
            report.render.binary_files,
            report.render.skipped_files
        );
        println!("  • Ignored: {}", report.walk.ignored);
        println!(
            "  • Document size: {}",
            bytesize::ByteSize::b(report.bytes_written as u64)
        );
        println!(
            "  • Scan time: {:.2}s",
            report.walk.total_time.as_secs_f64()
        );
        if report.walk.errors > 0 {
            println!(
                "  {} {} entries could not be read (run with --verbose for details)",
                "!".yellow(),
                report.walk.errors
            );
        }
    }

    Ok(())
}
