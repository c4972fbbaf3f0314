//! Path exclusion with gitignore-style rules
//!
//! Rules are compiled one line at a time into segment patterns
//! ([`pattern`]) and evaluated in registration order by an
//! [`IgnoreMatcher`](matcher::IgnoreMatcher), where the last matching rule
//! decides. Negated rules (`!pattern`) re-include paths that an earlier rule
//! excluded. Decisions are memoized per normalized path for the lifetime of
//! the matcher.

pub mod matcher;
pub mod pattern;

// Re-export commonly used items
pub use matcher::{IgnoreMatcher, IgnoreResult};
pub use pattern::{split_path, Pattern, Segment};
