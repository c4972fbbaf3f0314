//! treepeek - export a directory tree into a single Markdown document
//!
//! treepeek walks a project directory and writes its structure and the
//! contents of every kept file into one Markdown document. Which entries are
//! kept is decided by a gitignore-style path-exclusion engine.
//!
//! # Core Features
//!
//! - **Segment matching**: rules are split on `/` and matched one path
//!   segment at a time; `*` matches exactly one segment, `**` lets a rule
//!   align at any depth
//! - **Negation**: `!pattern` re-includes what an earlier rule excluded; the
//!   last matching rule wins
//! - **Memoization**: every decision is cached per normalized path for the
//!   lifetime of a matcher, and lookups are safe from many threads
//! - **Pruning**: ignored directories are never descended into
//!
//! # Example Usage
//!
//! ```rust
//! use treepeek::IgnoreMatcher;
//!
//! let mut matcher = IgnoreMatcher::new();
//! matcher.add_pattern("*.go");
//! matcher.add_pattern("!main.go");
//! matcher.add_pattern("**/test");
//!
//! assert!(matcher.should_ignore("util.go"));
//! assert!(!matcher.should_ignore("main.go"));
//! assert!(matcher.should_ignore("a/b/test"));
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod ignore;
pub mod output;
pub mod scanner;

// Re-export commonly used types
pub use crate::core::{
    error::{PeekError, Result},
    types::{EntryKind, WalkedEntry},
};

pub use config::ScanConfig;

pub use ignore::{IgnoreMatcher, IgnoreResult, Pattern};

pub use output::DocumentBuilder;

pub use scanner::{export, ExportReport, FilteredWalker};
