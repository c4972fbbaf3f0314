//! Project tree scanning
//!
//! [`FilteredWalker`] traverses a scan root in file-name order and consults
//! the session's ignore matcher for every entry, pruning ignored
//! directories. [`export`](export::export) turns a walk into the Markdown
//! document and writes it.

pub mod export;
pub mod walker;

// Re-export commonly used items
pub use export::{export, render, ExportReport};
pub use walker::{
    build_matcher, FilteredWalker, ScanPhase, ScanProgress, ScanStats, WalkResult,
};
