//! Ordered ignore rules with last-match-wins semantics and a per-session
//! decision cache

use crate::core::error::{PeekError, Result};
use crate::ignore::pattern::{split_path, Pattern};
use dashmap::DashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

const SEPARATOR_STR: &str = "/";

/// Outcome of an explained ignore check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreResult {
    /// Path is ignored by the given pattern
    Ignored(String),
    /// No pattern ignored the path
    Included,
    /// Path was ignored by an earlier pattern, then re-included by this
    /// negated pattern
    IncludedByNegation(String),
}

impl IgnoreResult {
    pub fn is_ignored(&self) -> bool {
        matches!(self, IgnoreResult::Ignored(_))
    }

    /// Raw text of the pattern that decided the result, if any
    pub fn pattern(&self) -> Option<&str> {
        match self {
            IgnoreResult::Ignored(raw) | IgnoreResult::IncludedByNegation(raw) => Some(raw),
            IgnoreResult::Included => None,
        }
    }
}

/// Path-exclusion engine for one scan session.
///
/// Patterns are registered first and queried afterwards. Registration needs
/// `&mut self` and clears the cache; lookups take `&self` and may run from
/// any number of threads at once.
#[derive(Debug, Default)]
pub struct IgnoreMatcher {
    /// Compiled patterns in registration order
    patterns: Vec<Pattern>,
    /// Normalized path -> decision
    cache: DashMap<String, bool>,
    /// Full pattern-list evaluations performed by `should_ignore`
    evaluations: AtomicUsize,
}

impl IgnoreMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher from a list of raw rules
    pub fn with_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut matcher = Self::new();
        matcher.add_patterns(patterns);
        matcher
    }

    /// Compile and append one rule.
    ///
    /// Returns `false` when the text is blank or a comment and nothing was
    /// added. This never fails.
    pub fn add_pattern(&mut self, raw: &str) -> bool {
        match Pattern::compile(raw) {
            Some(pattern) => {
                self.patterns.push(pattern);
                self.cache.clear();
                true
            },
            None => false,
        }
    }

    /// Register several rules, returning how many compiled to a pattern
    pub fn add_patterns<I, S>(&mut self, patterns: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        patterns
            .into_iter()
            .filter(|raw| self.add_pattern(raw.as_ref()))
            .count()
    }

    /// Register every line of ignore-file content, in order
    pub fn load_str(&mut self, content: &str) -> usize {
        self.add_patterns(content.lines())
    }

    /// Load rules from an ignore file.
    ///
    /// The whole file is read before anything is registered, so a failed
    /// read adds no patterns.
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let content = fs::read_to_string(path).map_err(|e| PeekError::ignore_file(path, e))?;
        let added = self.load_str(&content);

        tracing::debug!(path = %path.display(), patterns = added, "loaded ignore file");
        Ok(added)
    }

    /// Decide whether a path is excluded. Decisions are cached per
    /// normalized path.
    pub fn should_ignore<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref().to_string_lossy();
        let segments = split_path(&path);
        let key = segments.join(SEPARATOR_STR);

        if let Some(decision) = self.cache.get(&key) {
            return *decision;
        }

        let decision = self.evaluate(&segments);
        self.evaluations.fetch_add(1, Ordering::Relaxed);

        // concurrent misses for the same key compute the same value
        self.cache.insert(key, decision);
        decision
    }

    /// Uncached evaluation that also reports which pattern decided
    pub fn explain<P: AsRef<Path>>(&self, path: P) -> IgnoreResult {
        let path = path.as_ref().to_string_lossy();
        let segments = split_path(&path);

        let mut result = IgnoreResult::Included;
        for pattern in self.patterns.iter().filter(|p| p.matches(&segments)) {
            result = if !pattern.is_negated() {
                IgnoreResult::Ignored(pattern.raw().to_string())
            } else if result == IgnoreResult::Included {
                IgnoreResult::Included
            } else {
                IgnoreResult::IncludedByNegation(pattern.raw().to_string())
            };
        }

        result
    }

    /// Last matching pattern wins; non-matching patterns are inert
    fn evaluate(&self, segments: &[&str]) -> bool {
        self.patterns.iter().fold(false, |ignored, pattern| {
            if pattern.matches(segments) {
                !pattern.is_negated()
            } else {
                ignored
            }
        })
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of cached decisions
    pub fn cached_decisions(&self) -> usize {
        self.cache.len()
    }

    /// Number of uncached evaluations `should_ignore` has performed
    pub fn evaluation_count(&self) -> usize {
        self.evaluations.load(Ordering::Relaxed)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
