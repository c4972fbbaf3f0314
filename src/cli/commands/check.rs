//! Check command implementation

use crate::cli::commands::resolve_config;
use crate::cli::PatternArgs;
use crate::core::types::to_slash;
use crate::ignore::IgnoreMatcher;
use crate::scanner::build_matcher;
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Decision for one checked path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub path: String,
    pub ignored: bool,
    /// Pattern that decided the result, if any
    pub pattern: Option<String>,
}

/// Execute the check command
pub fn execute(paths: Vec<PathBuf>, root: PathBuf, patterns: PatternArgs, json: bool) -> Result<()> {
    let root = dunce::canonicalize(&root)
        .with_context(|| format!("Scan root not found: {}", root.display()))?;
    let config = resolve_config(&root, &patterns)?;
    let matcher = build_matcher(&root, &config);

    let reports = check_paths(&matcher, &root, &paths);

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        let status = if report.ignored {
            "ignored ".red()
        } else {
            "included".green()
        };
        match &report.pattern {
            Some(pattern) => println!("{} {} ({})", status, report.path, pattern.dimmed()),
            None => println!("{} {}", status, report.path),
        }
    }

    Ok(())
}

/// Explain each path against the matcher. Absolute paths under `root` are
/// made relative first.
pub fn check_paths(matcher: &IgnoreMatcher, root: &Path, paths: &[PathBuf]) -> Vec<CheckReport> {
    paths
        .iter()
        .map(|path| {
            let relative = if path.is_absolute() {
                dunce::canonicalize(path)
                    .ok()
                    .and_then(|p| p.strip_prefix(root).ok().map(Path::to_path_buf))
                    .unwrap_or_else(|| path.clone())
            } else {
                path.clone()
            };

            let result = matcher.explain(&relative);
            CheckReport {
                path: to_slash(&relative),
                ignored: result.is_ignored(),
                pattern: result.pattern().map(str::to_string),
            }
        })
        .collect()
}
