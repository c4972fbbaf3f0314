//! Core data types shared by the walker and the document builder

use std::path::{Path, PathBuf};

/// Kind of a visited filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// An entry that survived ignore filtering during a walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedEntry {
    /// Path as seen by the walker (root-joined)
    pub path: PathBuf,
    /// Path relative to the scan root
    pub relative_path: PathBuf,
    /// Number of separators in `relative_path`
    pub depth: usize,
    /// Directory or file
    pub kind: EntryKind,
}

impl WalkedEntry {
    /// Final path component, used as the display name in the structure list
    pub fn name(&self) -> String {
        self.relative_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Relative path rendered with `/` separators on every platform
    pub fn display_path(&self) -> String {
        to_slash(&self.relative_path)
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Render a path with `/` separators regardless of host convention.
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
