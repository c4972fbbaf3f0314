//! Core types and utilities for treepeek
//!
//! This module contains the shared data types and error handling used
//! throughout the system.

pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::{PeekError, Result};
pub use types::{to_slash, EntryKind, WalkedEntry};
