//! Directory walker with ignore filtering and progress reporting

use crate::config::ScanConfig;
use crate::core::error::{PeekError, Result};
use crate::core::types::{EntryKind, WalkedEntry};
use crate::ignore::IgnoreMatcher;
use std::cell::RefCell;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::{DirEntry, WalkDir};

/// Report progress every this many visited entries
const PROGRESS_INTERVAL: usize = 100;

/// Phase of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    /// Traversing the tree and filtering entries
    Walking,
    /// Reading file contents and assembling the document
    Rendering,
    /// Scan completed successfully
    Complete,
}

/// Progress information during scanning
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Current phase of scanning
    pub phase: ScanPhase,
    /// Entries kept so far
    pub entries_visited: usize,
    /// Entries (files or pruned directories) excluded so far
    pub entries_ignored: usize,
    /// Entry being processed, if any
    pub current_path: Option<PathBuf>,
    /// Elapsed time since the walk started
    pub elapsed: Duration,
}

impl ScanProgress {
    fn new() -> Self {
        Self {
            phase: ScanPhase::Walking,
            entries_visited: 0,
            entries_ignored: 0,
            current_path: None,
            elapsed: Duration::default(),
        }
    }
}

/// Statistics from a walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Directories kept
    pub directories: usize,
    /// Files kept
    pub files: usize,
    /// Entries excluded; an excluded directory counts once for its subtree
    pub ignored: usize,
    /// Entries that could not be accessed
    pub errors: usize,
    /// Total walking time
    pub total_time: Duration,
}

/// Result of a walk
#[derive(Debug)]
pub struct WalkResult {
    /// Kept entries in walk order (directories before their contents,
    /// siblings sorted by file name)
    pub entries: Vec<WalkedEntry>,
    /// Excluded entries, relative to the root
    pub ignored: Vec<PathBuf>,
    /// Final statistics
    pub stats: ScanStats,
}

type ProgressCallback = Box<dyn Fn(&ScanProgress) + Send + Sync>;

/// Walks a scan root, asking the ignore matcher about every entry
pub struct FilteredWalker {
    /// Canonical scan root
    root: PathBuf,
    /// Session matcher
    matcher: IgnoreMatcher,
    /// Output document, always excluded from the walk
    output: Option<OutputTarget>,
    /// Progress callback function
    progress_callback: Option<ProgressCallback>,
    /// Whether to follow symbolic links
    follow_links: bool,
    /// Maximum depth for directory traversal (None = unlimited)
    max_depth: Option<usize>,
}

#[derive(Debug, Clone)]
struct OutputTarget {
    file_name: OsString,
    path: PathBuf,
}

impl FilteredWalker {
    /// Create a walker for `root`, registering the configured patterns and
    /// then the root's ignore file when it exists.
    pub fn new(root: &Path, config: &ScanConfig) -> Result<Self> {
        let root = resolve_root(root)?;
        let matcher = build_matcher(&root, config);

        let mut walker = Self::with_matcher(root, matcher);
        walker.output = OutputTarget::resolve(&config.output);
        Ok(walker)
    }

    /// Create a walker with a prepared matcher
    pub fn from_matcher(root: &Path, matcher: IgnoreMatcher) -> Result<Self> {
        Ok(Self::with_matcher(resolve_root(root)?, matcher))
    }

    fn with_matcher(root: PathBuf, matcher: IgnoreMatcher) -> Self {
        Self {
            root,
            matcher,
            output: None,
            progress_callback: None,
            follow_links: false,
            max_depth: None,
        }
    }

    /// Set progress callback for real-time updates
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ScanProgress) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Box::new(callback));
        self
    }

    /// Set whether to follow symbolic links
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Set maximum depth below the root (1 = direct children only)
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn matcher(&self) -> &IgnoreMatcher {
        &self.matcher
    }

    /// Walk the tree.
    ///
    /// The root itself is never checked or returned. Ignored directories are
    /// pruned without descending; inaccessible entries are logged and
    /// skipped.
    pub fn walk(&self) -> Result<WalkResult> {
        let start_time = Instant::now();
        let mut progress = ScanProgress::new();
        let mut entries = Vec::new();
        let ignored = RefCell::new(Vec::new());
        let mut stats = ScanStats::default();

        self.report_progress(&progress);

        let mut walker = WalkDir::new(&self.root)
            .follow_links(self.follow_links)
            .sort_by_file_name();
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let iter = walker.into_iter().filter_entry(|entry| {
            if entry.depth() == 0 || !self.is_ignored(entry) {
                return true;
            }
            tracing::debug!(path = %entry.path().display(), "ignoring path");
            ignored.borrow_mut().push(self.relative_path(entry.path()));
            false
        });

        for item in iter {
            let entry = match item {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "error accessing path");
                    stats.errors += 1;
                    continue;
                },
            };

            if entry.depth() == 0 {
                continue;
            }

            tracing::debug!(path = %entry.path().display(), "processing path");

            let kind = if entry.file_type().is_dir() {
                stats.directories += 1;
                EntryKind::Directory
            } else {
                stats.files += 1;
                EntryKind::File
            };

            entries.push(WalkedEntry {
                path: entry.path().to_path_buf(),
                relative_path: self.relative_path(entry.path()),
                depth: entry.depth() - 1,
                kind,
            });

            progress.entries_visited = entries.len();
            progress.entries_ignored = ignored.borrow().len();
            if progress.entries_visited % PROGRESS_INTERVAL == 0 {
                progress.current_path = Some(entry.path().to_path_buf());
                progress.elapsed = start_time.elapsed();
                self.report_progress(&progress);
            }
        }

        let ignored = ignored.into_inner();
        stats.ignored = ignored.len();
        stats.total_time = start_time.elapsed();

        progress.entries_visited = entries.len();
        progress.entries_ignored = ignored.len();
        progress.current_path = None;
        progress.elapsed = stats.total_time;
        self.report_progress(&progress);

        Ok(WalkResult {
            entries,
            ignored,
            stats,
        })
    }

    /// Report progress to callback
    pub(crate) fn report_progress(&self, progress: &ScanProgress) {
        if let Some(callback) = &self.progress_callback {
            callback(progress);
        }
    }

    fn is_ignored(&self, entry: &DirEntry) -> bool {
        if self.is_output_file(entry) {
            return true;
        }
        self.matcher
            .should_ignore(entry.path().strip_prefix(&self.root).unwrap_or(entry.path()))
    }

    fn is_output_file(&self, entry: &DirEntry) -> bool {
        match &self.output {
            Some(output) if entry.file_name() == output.file_name.as_os_str() => {
                normalize_location(entry.path()) == output.path
            },
            _ => false,
        }
    }

    fn relative_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

impl OutputTarget {
    fn resolve(output: &Path) -> Option<Self> {
        let file_name = output.file_name()?.to_os_string();
        Some(Self {
            file_name,
            path: normalize_location(output),
        })
    }
}

/// Absolute, lexically cleaned form of a path; canonical when it exists
fn normalize_location(path: &Path) -> PathBuf {
    if let Ok(canonical) = dunce::canonicalize(path) {
        return canonical;
    }
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    path_clean::clean(absolute)
}

fn resolve_root(root: &Path) -> Result<PathBuf> {
    let canonical = dunce::canonicalize(root).map_err(|_| PeekError::root_not_found(root))?;
    if !canonical.is_dir() {
        return Err(PeekError::root_not_directory(root));
    }
    Ok(canonical)
}

/// Build the session matcher: configured patterns first, then the root's
/// ignore file in file order. A missing ignore file is not an error; one
/// that fails to load is logged and skipped.
pub fn build_matcher(root: &Path, config: &ScanConfig) -> IgnoreMatcher {
    let mut matcher = IgnoreMatcher::new();
    let added = matcher.add_patterns(&config.ignore_patterns);
    tracing::debug!(patterns = added, "registered configured ignore patterns");

    if let Some(ignore_file) = config.ignore_file_path(root) {
        if ignore_file.is_file() {
            tracing::debug!(path = %ignore_file.display(), "loading ignore file");
            if let Err(e) = matcher.load_file(&ignore_file) {
                tracing::warn!(error = %e, "error loading ignore file");
            }
        }
    }

    matcher
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    fn make_tree(root: &Path) -> Result<()> {
        fs::create_dir_all(root.join("src/nested"))?;
        fs::create_dir_all(root.join("build/output"))?;
        fs::write(root.join("README.md"), "# readme")?;
        fs::write(root.join("src/main.rs"), "fn main() {}")?;
        fs::write(root.join("src/nested/mod.rs"), "")?;
        fs::write(root.join("src/debug.log"), "log")?;
        fs::write(root.join("build/output/app"), "bin")?;
        Ok(())
    }

    fn relative_paths(result: &WalkResult) -> Vec<String> {
        result.entries.iter().map(|e| e.display_path()).collect()
    }

    #[test]
    fn test_walk_prunes_ignored_directories() -> Result<()> {
        let temp_dir = TempDir::new()?;
        make_tree(temp_dir.path())?;

        let matcher = IgnoreMatcher::with_patterns(["build", "**/*.log"]);
        let walker = FilteredWalker::from_matcher(temp_dir.path(), matcher)?;
        let result = walker.walk()?;

        assert_eq!(
            relative_paths(&result),
            vec!["README.md", "src", "src/main.rs", "src/nested", "src/nested/mod.rs"]
        );
        assert_eq!(result.stats.directories, 2);
        assert_eq!(result.stats.files, 3);
        assert_eq!(result.stats.ignored, 2);
        assert!(result.ignored.contains(&PathBuf::from("build")));

        // one lookup per visited entry; pruned subtrees are never queried
        assert_eq!(walker.matcher().cached_decisions(), 7);
        Ok(())
    }

    #[test]
    fn test_depth_follows_separators() -> Result<()> {
        let temp_dir = TempDir::new()?;
        make_tree(temp_dir.path())?;

        let walker = FilteredWalker::from_matcher(temp_dir.path(), IgnoreMatcher::new())?;
        let result = walker.walk()?;

        for entry in &result.entries {
            assert_eq!(entry.depth, entry.display_path().matches('/').count());
        }
        Ok(())
    }

    #[test]
    fn test_negated_file_inside_kept_directory() -> Result<()> {
        let temp_dir = TempDir::new()?;
        make_tree(temp_dir.path())?;

        let matcher = IgnoreMatcher::with_patterns(["src/*", "!src/main.rs"]);
        let walker = FilteredWalker::from_matcher(temp_dir.path(), matcher)?;
        let result = walker.walk()?;

        assert_eq!(
            relative_paths(&result),
            vec!["README.md", "build", "build/output", "build/output/app", "src", "src/main.rs"]
        );
        Ok(())
    }

    #[test]
    fn test_new_loads_ignore_file_after_configured_patterns() -> Result<()> {
        let temp_dir = TempDir::new()?;
        make_tree(temp_dir.path())?;
        fs::write(temp_dir.path().join(".gitignore"), "# local rules\n!build\n")?;

        let config = ScanConfig::default().with_ignore_patterns(vec!["build".to_string()]);
        let walker = FilteredWalker::new(temp_dir.path(), &config)?;

        assert_eq!(walker.matcher().len(), 2);
        assert!(!walker.matcher().should_ignore("build"));
        Ok(())
    }

    #[test]
    fn test_output_file_is_skipped() -> Result<()> {
        let temp_dir = TempDir::new()?;
        make_tree(temp_dir.path())?;
        let output = temp_dir.path().join("project_knowledge.md");
        fs::write(&output, "previous run")?;

        let config = ScanConfig::default()
            .with_ignore_patterns(Vec::new())
            .with_output(output);
        let walker = FilteredWalker::new(temp_dir.path(), &config)?;
        let result = walker.walk()?;

        assert!(!relative_paths(&result).contains(&"project_knowledge.md".to_string()));
        assert!(relative_paths(&result).contains(&"README.md".to_string()));
        Ok(())
    }

    #[test]
    fn test_max_depth() -> Result<()> {
        let temp_dir = TempDir::new()?;
        make_tree(temp_dir.path())?;

        let walker =
            FilteredWalker::from_matcher(temp_dir.path(), IgnoreMatcher::new())?.max_depth(1);
        let result = walker.walk()?;

        assert_eq!(relative_paths(&result), vec!["README.md", "build", "src"]);
        Ok(())
    }

    #[test]
    fn test_missing_root() {
        let result = FilteredWalker::new(Path::new("/no/such/root"), &ScanConfig::default());
        assert!(matches!(result, Err(PeekError::RootNotFound { .. })));
    }

    #[test]
    fn test_file_root() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "x")?;

        let result = FilteredWalker::new(&file, &ScanConfig::default());
        assert!(matches!(result, Err(PeekError::RootNotDirectory { .. })));
        Ok(())
    }

    #[test]
    fn test_progress_callback() -> Result<()> {
        let temp_dir = TempDir::new()?;
        make_tree(temp_dir.path())?;

        let phases = Arc::new(Mutex::new(Vec::new()));
        let phases_clone = Arc::clone(&phases);
        let walker = FilteredWalker::from_matcher(temp_dir.path(), IgnoreMatcher::new())?
            .with_progress(move |progress| {
                phases_clone.lock().unwrap().push(progress.phase);
            });

        walker.walk()?;

        let calls = phases.lock().unwrap();
        assert!(calls.len() >= 2);
        assert!(calls.iter().all(|phase| *phase == ScanPhase::Walking));
        Ok(())
    }
}
