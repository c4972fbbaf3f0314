//! Markdown rendering of a walked project tree

pub mod anchor;
pub mod binary;
pub mod document;

pub use anchor::create_anchor;
pub use binary::is_binary_file;
pub use document::{DocumentBuilder, FileContent, RenderStats};
