//! Configuration management for treepeek
//!
//! Scan settings live in an optional `.treepeek.toml` next to the project
//! being exported, overridable from the command line.

pub mod scan_config;

// Re-export commonly used items
pub use scan_config::{
    ScanConfig, DEFAULT_IGNORE_FILE, DEFAULT_IGNORE_PATTERNS, DEFAULT_MAX_FILE_SIZE,
    DEFAULT_OUTPUT, PROJECT_CONFIG_FILE,
};
