//! Markdown document assembly
//!
//! The document has two parts: an indented structure list with one line per
//! walked entry, followed by one fenced content block per file. Files link
//! from the structure list to their content block through an anchor derived
//! from the relative path.

use crate::core::error::{PeekError, Result};
use crate::core::types::WalkedEntry;
use crate::output::anchor::create_anchor;
use crate::output::binary::is_binary_file;
use rayon::prelude::*;
use std::fs;
use std::path::Path;

const INDENT: &str = "  ";
const DIRECTORY_ICON: &str = "📁";
const FILE_ICON: &str = "📄";

/// Content of a file as it appears in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    Binary,
}

/// Counters collected while rendering content blocks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Files rendered with their text
    pub text_files: usize,
    /// Files rendered as `[binary file]`
    pub binary_files: usize,
    /// Files left without a content block (too large or unreadable)
    pub skipped_files: usize,
}

/// Accumulates structure lines and content blocks
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    structure: Vec<String>,
    contents: Vec<String>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the structure line for an entry
    pub fn add_structure(&mut self, entry: &WalkedEntry) {
        self.structure.push(structure_line(entry));
    }

    /// Add a file's content block
    pub fn add_content(&mut self, entry: &WalkedEntry, content: &FileContent) {
        self.contents.push(content_block(entry, content));
    }

    /// Render the final document
    pub fn generate(&self) -> String {
        format!(
            "# Project Structure\n\n{}\n\n# Files Content\n{}",
            self.structure.join("\n"),
            self.contents.join("\n")
        )
    }

    /// Build a document from walked entries.
    ///
    /// File contents are read in parallel; blocks keep walk order. Files that
    /// are too large or unreadable keep their structure line, get no content
    /// block, and are logged.
    pub fn from_entries(entries: &[WalkedEntry], max_file_size: u64) -> (Self, RenderStats) {
        let mut builder = Self::new();
        for entry in entries {
            builder.add_structure(entry);
        }

        let contents: Vec<Option<FileContent>> = entries
            .par_iter()
            .filter(|entry| !entry.is_dir())
            .map(|entry| match read_file_content(&entry.path, max_file_size) {
                Ok(content) => Some(content),
                Err(e) => {
                    tracing::warn!(path = %entry.path.display(), error = %e, "error adding content");
                    None
                },
            })
            .collect();

        let mut stats = RenderStats::default();
        let files = entries.iter().filter(|entry| !entry.is_dir());
        for (entry, content) in files.zip(contents) {
            match content {
                Some(content) => {
                    match content {
                        FileContent::Text(_) => stats.text_files += 1,
                        FileContent::Binary => stats.binary_files += 1,
                    }
                    builder.add_content(entry, &content);
                },
                None => stats.skipped_files += 1,
            }
        }

        (builder, stats)
    }
}

/// Structure list line for one entry
pub fn structure_line(entry: &WalkedEntry) -> String {
    let indent = INDENT.repeat(entry.depth);
    if entry.is_dir() {
        format!("{}- {} {}", indent, DIRECTORY_ICON, entry.name())
    } else {
        format!(
            "{}- {} [{}](#{})",
            indent,
            FILE_ICON,
            entry.name(),
            create_anchor(&entry.display_path())
        )
    }
}

/// Content block for one file
pub fn content_block(entry: &WalkedEntry, content: &FileContent) -> String {
    let relative = entry.display_path();
    let anchor = create_anchor(&relative);

    match content {
        FileContent::Binary => format!(
            "\n<a id=\"{}\"></a>\n# {} {}\n```\n[binary file]\n```\n",
            anchor, FILE_ICON, relative
        ),
        FileContent::Text(text) => format!(
            "\n<a id=\"{}\"></a>\n# {} {}\n```{}\n{}\n```\n",
            anchor,
            FILE_ICON,
            relative,
            fence_language(&entry.relative_path),
            text
        ),
    }
}

/// Read a file for the document, refusing files above `max_file_size`
pub fn read_file_content(path: &Path, max_file_size: u64) -> Result<FileContent> {
    let size = fs::metadata(path)?.len();
    if size > max_file_size {
        return Err(PeekError::file_too_large(path, size, max_file_size));
    }

    if is_binary_file(path)? {
        return Ok(FileContent::Binary);
    }

    let bytes = fs::read(path)?;
    Ok(FileContent::Text(String::from_utf8_lossy(&bytes).into_owned()))
}

/// Extension without the dot, used as the fence info string
fn fence_language(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::EntryKind;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn entry(root: &Path, relative: &str, kind: EntryKind) -> WalkedEntry {
        let relative_path = PathBuf::from(relative);
        WalkedEntry {
            path: root.join(&relative_path),
            depth: relative.matches('/').count(),
            relative_path,
            kind,
        }
    }

    #[test]
    fn test_structure_lines() {
        let root = Path::new("project");
        let dir = entry(root, "src", EntryKind::Directory);
        let file = entry(root, "src/main.rs", EntryKind::File);

        assert_eq!(structure_line(&dir), "- 📁 src");
        assert_eq!(structure_line(&file), "  - 📄 [main.rs](#src-main-rs)");
    }

    #[test]
    fn test_content_blocks() {
        let root = Path::new("project");
        let file = entry(root, "src/main.rs", EntryKind::File);
        let no_ext = entry(root, "Makefile", EntryKind::File);

        assert_eq!(
            content_block(&file, &FileContent::Text("fn main() {}".to_string())),
            "\n<a id=\"src-main-rs\"></a>\n# 📄 src/main.rs\n```rs\nfn main() {}\n```\n"
        );
        assert_eq!(
            content_block(&no_ext, &FileContent::Binary),
            "\n<a id=\"makefile\"></a>\n# 📄 Makefile\n```\n[binary file]\n```\n"
        );
    }

    #[test]
    fn test_generate_layout() {
        let root = Path::new("project");
        let file = entry(root, "a.txt", EntryKind::File);

        let mut builder = DocumentBuilder::new();
        builder.add_structure(&file);
        builder.add_content(&file, &FileContent::Text("hello".to_string()));

        assert_eq!(
            builder.generate(),
            "# Project Structure\n\n- 📄 [a.txt](#a-txt)\n\n# Files Content\n\n<a id=\"a-txt\"></a>\n# 📄 a.txt\n```txt\nhello\n```\n"
        );
    }

    #[test]
    fn test_from_entries_keeps_order_and_skips_large_files() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        std::fs::create_dir(root.join("src"))?;
        std::fs::write(root.join("src/a.rs"), "// a")?;
        std::fs::write(root.join("src/b.bin"), [0xffu8, 0xfe, 0xfd])?;
        std::fs::write(root.join("src/c.rs"), "x".repeat(64))?;
        std::fs::write(root.join("z.md"), "# z")?;

        let entries = vec![
            entry(root, "src", EntryKind::Directory),
            entry(root, "src/a.rs", EntryKind::File),
            entry(root, "src/b.bin", EntryKind::File),
            entry(root, "src/c.rs", EntryKind::File),
            entry(root, "z.md", EntryKind::File),
        ];

        let (builder, stats) = DocumentBuilder::from_entries(&entries, 32);
        let document = builder.generate();

        assert_eq!(
            stats,
            RenderStats {
                text_files: 2,
                binary_files: 1,
                skipped_files: 1,
            }
        );

        let a = document.find("# 📄 src/a.rs").unwrap();
        let b = document.find("# 📄 src/b.bin").unwrap();
        let z = document.find("# 📄 z.md").unwrap();
        assert!(a < b && b < z);
        assert!(!document.contains("# 📄 src/c.rs"));
        assert!(document.contains("  - 📄 [c.rs](#src-c-rs)"));
        Ok(())
    }

    #[test]
    fn test_read_file_content_missing_file() {
        let result = read_file_content(Path::new("/no/such/file.txt"), 1024);
        assert!(matches!(result, Err(PeekError::Io(_))));
    }
}
