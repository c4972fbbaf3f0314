//! Markdown anchor generation for file links

/// Anchor used when a path has no usable characters
pub const FALLBACK_ANCHOR: &str = "file";

/// Turn a relative path into an HTML anchor id.
///
/// Separators, dots and spaces become `-`, ASCII letters are lowercased, and
/// every other character is dropped. Repeated dashes collapse and leading or
/// trailing dashes are trimmed.
pub fn create_anchor(path: &str) -> String {
    let mut anchor = String::with_capacity(path.len());

    for ch in path.chars() {
        let mapped = match ch {
            '/' | '\\' | '.' | ' ' | '-' => '-',
            c if c.is_ascii_alphanumeric() => c.to_ascii_lowercase(),
            _ => continue,
        };

        if mapped == '-' && anchor.ends_with('-') {
            continue;
        }
        anchor.push(mapped);
    }

    let trimmed = anchor.trim_matches('-');
    if trimmed.is_empty() {
        FALLBACK_ANCHOR.to_string()
    } else {
        trimmed.to_string()
    }
}
