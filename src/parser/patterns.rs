/// Regex patterns for Python syntax
///
/// All patterns are compiled once at startup using `LazyLock`.
///
/// Python identifiers are case-sensitive, so unlike many formatter rule
/// sets these patterns are compiled without the case-insensitive flag.
use std::sync::LazyLock;

use regex::Regex;

/// Build a regex from a compile-time constant pattern.
///
/// # Panics
///
/// Panics if the pattern is invalid. This is acceptable because all patterns
/// in this module are compile-time constants that are verified by tests.
/// The panic occurs at first access of the `LazyLock` static.
fn build_re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|_| panic!("Invalid regex pattern: {pattern}"))
}

// ===== QUOTES =====

/// A double-quoted string with no embedded double quote.
///
/// The `regex` crate has no lookahead, so the original follow-set exclusion
/// (not followed by optional whitespace and `=` or `:`) is applied by the
/// caller inspecting the text after the match.
pub static DOUBLE_QUOTE_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r#""([^"]*)""#));

/// Structured / object-like string content: braces, brackets or commas.
pub static OBJECT_CONTENT_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"[{}\[\],]"));

/// Any whitespace inside string content.
pub static CONTENT_WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\s"));

// ===== IMPORTS =====

/// `import <modules>` with the module text captured up to a comment or EOL.
pub static IMPORT_LINE_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^import\s+([^#\n]+)"));

/// `from <module> ...` with the tail captured up to a comment or EOL.
pub static FROM_LINE_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^from\s+([^#\n]+)"));

/// A single-line `from X import a, b, c` split into prefix and item list.
pub static FROM_IMPORT_ITEMS_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"^(from\s+\S+\s+import\s+)(.+)$"));

// ===== DECLARATIONS =====

/// A function or method declaration (on a trimmed line).
pub static DEF_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^def\s+\w+\s*\("));

/// A function or method declaration with leading whitespace allowed.
pub static DEF_ANY_INDENT_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^\s*def\s+\w+\s*\("));

/// A declaration header split into `def name(` and the parameter remainder.
pub static DEF_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^(def\s+\w+\s*\()(.+)$"));

/// Concatenated parameter text split at the last closing paren; the second
/// capture is the suffix (return annotation, colon).
pub static PARAMS_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^(.+)\)(.*)$"));

// ===== WHITESPACE =====

/// Leading indentation of a line.
pub static INDENT_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^(\s*)"));

/// A run of whitespace, collapsed to a single space when joining
/// continuation lines.
pub static WHITESPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\s+"));

/// Get the leading whitespace of a line.
#[must_use]
pub fn indentation(line: &str) -> &str {
    INDENT_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map_or("", |m| m.as_str())
}
