//! Scan configuration
//!
//! Settings are resolved in three layers: built-in defaults, an optional TOML
//! file (`--config <path>` or `.treepeek.toml` in the scan root), then
//! command-line flags.

use crate::core::error::{PeekError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the per-project configuration file looked up in the scan root
pub const PROJECT_CONFIG_FILE: &str = ".treepeek.toml";

/// Default output document
pub const DEFAULT_OUTPUT: &str = "project_knowledge.md";

/// Default ignore file loaded from the scan root
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Files above this size get no content block
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Patterns registered before the ignore file
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "**/.git",
    "**/.idea",
    "**/node_modules",
    "**/vendor",
    "**/dist",
    "**/build",
    "**/target",
    "go.sum",
];

/// Configuration for one scan session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Output document path
    pub output: PathBuf,
    /// Patterns registered before the ignore file, in order
    pub ignore_patterns: Vec<String>,
    /// Ignore file name, relative to the scan root
    pub ignore_file: String,
    /// Whether to load `ignore_file` at all
    pub use_ignore_file: bool,
    /// Largest file (in bytes) whose content is exported
    pub max_file_size: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            ignore_patterns: DEFAULT_IGNORE_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            use_ignore_file: true,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl ScanConfig {
    /// Parse configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| PeekError::configuration(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            PeekError::ConfigurationError { reason } => {
                PeekError::configuration(format!("{}: {}", path.display(), reason))
            },
            other => other,
        })
    }

    /// Resolve the configuration for a scan root.
    ///
    /// An explicit file must exist; otherwise `.treepeek.toml` in the root is
    /// used when present, and the defaults when not.
    pub fn resolve(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading config file");
            return Self::from_file(path);
        }

        let project_config = root.join(PROJECT_CONFIG_FILE);
        if project_config.is_file() {
            tracing::debug!(path = %project_config.display(), "loading project config");
            return Self::from_file(&project_config);
        }

        Ok(Self::default())
    }

    /// Replace the configured pattern list
    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Append patterns after the configured ones
    pub fn with_extra_patterns(mut self, patterns: impl IntoIterator<Item = String>) -> Self {
        self.ignore_patterns.extend(patterns);
        self
    }

    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = output;
        self
    }

    /// Path of the ignore file inside `root`, if loading is enabled
    pub fn ignore_file_path(&self, root: &Path) -> Option<PathBuf> {
        if self.use_ignore_file && !self.ignore_file.trim().is_empty() {
            Some(root.join(&self.ignore_file))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.output, PathBuf::from("project_knowledge.md"));
        assert_eq!(config.ignore_file, ".gitignore");
        assert_eq!(config.max_file_size, 10 * 1024 * 1024);
        assert!(config.ignore_patterns.contains(&"**/node_modules".to_string()));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() -> anyhow::Result<()> {
        let config = ScanConfig::from_toml_str(
            r#"
output = "docs/tree.md"
ignore_patterns = ["*.lock", "!Cargo.lock"]
"#,
        )?;

        assert_eq!(config.output, PathBuf::from("docs/tree.md"));
        assert_eq!(config.ignore_patterns, vec!["*.lock", "!Cargo.lock"]);
        assert_eq!(config.ignore_file, DEFAULT_IGNORE_FILE);
        assert!(config.use_ignore_file);
        Ok(())
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let result = ScanConfig::from_toml_str("max_file_size = \"huge\"");
        assert!(matches!(result, Err(PeekError::ConfigurationError { .. })));
    }

    #[test]
    fn test_resolve_prefers_project_file() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        std::fs::write(
            temp_dir.path().join(PROJECT_CONFIG_FILE),
            "use_ignore_file = false\n",
        )?;

        let config = ScanConfig::resolve(temp_dir.path(), None)?;
        assert!(!config.use_ignore_file);
        assert_eq!(config.ignore_file_path(temp_dir.path()), None);
        Ok(())
    }

    #[test]
    fn test_resolve_missing_explicit_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        assert!(ScanConfig::resolve(temp_dir.path(), Some(&missing)).is_err());
    }

    #[test]
    fn test_pattern_overrides() {
        let config = ScanConfig::default()
            .with_ignore_patterns(vec!["a".to_string()])
            .with_extra_patterns(vec!["b".to_string()]);
        assert_eq!(config.ignore_patterns, vec!["a", "b"]);
    }
}
