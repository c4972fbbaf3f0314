//! CLI command implementations

pub mod check;
pub mod completion;
pub mod scan;

// Common utilities for commands
use crate::cli::PatternArgs;
use crate::config::ScanConfig;
use anyhow::Result;
use std::path::Path;

/// Resolve the scan configuration for `root`, then apply command-line
/// overrides: `--ignore` replaces the pattern list, `--exclude` appends.
pub fn resolve_config(root: &Path, args: &PatternArgs) -> Result<ScanConfig> {
    let mut config = ScanConfig::resolve(root, args.config.as_deref())?;

    if !args.ignore.is_empty() {
        tracing::debug!(patterns = ?args.ignore, "ignore patterns");
        config = config.with_ignore_patterns(args.ignore.clone());
    }
    config = config.with_extra_patterns(args.exclude.iter().cloned());

    if args.no_ignore_file {
        config.use_ignore_file = false;
    }

    Ok(config)
}
