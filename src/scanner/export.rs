//! Full export: walk, render and write the document

use crate::core::error::Result;
use crate::output::{DocumentBuilder, RenderStats};
use crate::scanner::walker::{FilteredWalker, ScanPhase, ScanProgress, ScanStats};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of an export
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Where the document was written
    pub output: PathBuf,
    /// Walk statistics
    pub walk: ScanStats,
    /// Content rendering statistics
    pub render: RenderStats,
    /// Size of the written document
    pub bytes_written: usize,
}

/// Render the walk result of `walker` into a document string
pub fn render(walker: &FilteredWalker, max_file_size: u64) -> Result<(String, ScanStats, RenderStats)> {
    let walk = walker.walk()?;

    walker.report_progress(&ScanProgress {
        phase: ScanPhase::Rendering,
        entries_visited: walk.entries.len(),
        entries_ignored: walk.stats.ignored,
        current_path: None,
        elapsed: walk.stats.total_time,
    });

    let (builder, render_stats) = DocumentBuilder::from_entries(&walk.entries, max_file_size);
    Ok((builder.generate(), walk.stats, render_stats))
}

/// Walk the tree, render it and write the document to `output`
pub fn export(walker: &FilteredWalker, output: &Path, max_file_size: u64) -> Result<ExportReport> {
    let (document, walk, render_stats) = render(walker, max_file_size)?;

    tracing::info!(file = %output.display(), "writing output");
    fs::write(output, &document)?;

    walker.report_progress(&ScanProgress {
        phase: ScanPhase::Complete,
        entries_visited: walk.directories + walk.files,
        entries_ignored: walk.ignored,
        current_path: None,
        elapsed: walk.total_time,
    });

    Ok(ExportReport {
        output: output.to_path_buf(),
        walk,
        render: render_stats,
        bytes_written: document.len(),
    })
}
