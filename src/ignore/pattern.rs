//! Compilation of single ignore rules into segment patterns
//!
//! A rule line is trimmed, optionally negated with a leading `!`, normalized
//! to `/` separators and split into one token per path segment. Tokens are
//! either the bare `*` wildcard (any single segment) or a shell-style glob
//! matched against exactly one segment. Rules containing `**` may align with
//! the tail of a path at any depth.

use glob::{MatchOptions, Pattern as GlobPattern};

/// Canonical path separator used by rules and normalized paths
pub const SEPARATOR: char = '/';

const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// One token of a compiled pattern, always consuming exactly one path segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A bare `*`: exactly one segment with any content
    AnySegment,
    /// A token without glob metacharacters, or with malformed glob syntax
    Literal(String),
    /// A shell-style glob (`*`, `?`, `[...]`) within one segment
    Glob(GlobPattern),
}

impl Segment {
    /// Compile a single token. Never fails: tokens the glob engine rejects
    /// are matched literally.
    pub fn compile(token: &str) -> Self {
        let token = collapse_stars(token);

        if token == "*" {
            return Segment::AnySegment;
        }

        if !token.contains(['*', '?', '[']) {
            return Segment::Literal(token);
        }

        match GlobPattern::new(&token) {
            Ok(glob) => Segment::Glob(glob),
            Err(_) => Segment::Literal(token),
        }
    }

    /// Check whether this token accepts a single path segment
    pub fn matches(&self, segment: &str) -> bool {
        match self {
            Segment::AnySegment => true,
            Segment::Literal(literal) => literal == segment,
            Segment::Glob(glob) => glob.matches_with(segment, GLOB_OPTIONS),
        }
    }
}

/// A compiled exclusion rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// The rule text as written, after trimming
    raw: String,
    /// One token per path segment
    segments: Vec<Segment>,
    /// Rule started with `!`
    negate: bool,
    /// Rule contained `**` and may align at any depth
    match_all: bool,
}

impl Pattern {
    /// Compile one raw rule line.
    ///
    /// Returns `None` for blank lines and `#` comments. Every other input,
    /// however malformed, yields a valid pattern.
    pub fn compile(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }

        let (negate, body) = match trimmed.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let normalized = body.replace('\\', "/");
        let normalized = normalized.trim_matches(SEPARATOR);

        let match_all = normalized.contains("**");
        let collapsed = if match_all {
            normalized.replace("**/", "").replace("**", "*")
        } else {
            normalized.to_string()
        };

        let segments = collapsed
            .split(SEPARATOR)
            .filter(|token| is_path_component(token))
            .map(Segment::compile)
            .collect();

        Some(Self {
            raw: trimmed.to_string(),
            segments,
            negate,
            match_all,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_negated(&self) -> bool {
        self.negate
    }

    pub fn is_match_all(&self) -> bool {
        self.match_all
    }

    /// Check this pattern against an already split path
    pub fn matches(&self, path: &[&str]) -> bool {
        if self.match_all {
            matches_anywhere(&self.segments, path)
        } else {
            matches_exact(&self.segments, path)
        }
    }
}

/// Pairwise segment comparison from the start of both sequences.
///
/// Walks `(pattern_index, path_index)` forward instead of recursing, so deep
/// paths cannot exhaust the stack.
fn matches_exact(segments: &[Segment], path: &[&str]) -> bool {
    let (mut pattern_index, mut path_index) = (0, 0);

    loop {
        match (segments.get(pattern_index), path.get(path_index)) {
            (None, None) => return true,
            (None, Some(_)) | (Some(_), None) => return false,
            (Some(token), Some(component)) => {
                if !token.matches(component) {
                    return false;
                }
                pattern_index += 1;
                path_index += 1;
            },
        }
    }
}

/// Exact match of the pattern against `path[i..]` for some `i` in `0..=len`.
fn matches_anywhere(segments: &[Segment], path: &[&str]) -> bool {
    // every token consumes exactly one component, so only the trailing
    // window of `segments.len()` components can align
    match path.len().checked_sub(segments.len()) {
        Some(offset) => matches_exact(segments, &path[offset..]),
        None => false,
    }
}

/// Replace runs of `*` with a single `*`.
fn collapse_stars(token: &str) -> String {
    let mut collapsed = String::with_capacity(token.len());
    for ch in token.chars() {
        if ch == '*' && collapsed.ends_with('*') {
            continue;
        }
        collapsed.push(ch);
    }
    collapsed
}

/// Empty components and `.` carry no segment, in rules and paths alike
fn is_path_component(component: &str) -> bool {
    !component.is_empty() && component != "."
}

/// Normalize a path to `/` separators and split it into segments.
///
/// Empty components and `.` are dropped, so `./a//b/` becomes `["a", "b"]`
/// and the scan root (`.` or empty) has no segments at all.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split(['/', '\\'])
        .filter(|component| is_path_component(component))
        .collect()
}
