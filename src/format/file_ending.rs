//! Trailing newline normalization.

/// Right-trim all trailing whitespace and blank lines, then append
/// exactly one newline. Output always ends with a single line break,
/// never zero, never multiple.
#[must_use]
pub fn ensure_file_ending(text: &str) -> String {
    let trimmed = text.trim_end();
    format!("{trimmed}\n")
}
