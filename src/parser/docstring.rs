//! Docstring-span detection and quote-content classification.
//!
//! Both the linter and the quote-fixing pass need to know whether a line
//! may be rewritten. The detector here is a cumulative scan: once any
//! triple-quote marker has appeared, every later line is treated as part
//! of a docstring span and exempted from quote rewriting. Downstream
//! rules are tuned against this over-approximation, so it is kept as-is
//! rather than replaced by a parity-tracking state machine.

use crate::parser::patterns::{CONTENT_WHITESPACE_RE, OBJECT_CONTENT_RE};

/// Check whether a line lies in a docstring span.
///
/// Scans all lines from the start of the file up to and including
/// `line_index` and returns true if any of them contains a `"""` or `'''`
/// marker, regardless of whether an odd or even number of markers have
/// been seen.
#[must_use]
pub fn is_inside_docstring(line_index: usize, lines: &[String]) -> bool {
    for line in lines.iter().take(line_index + 1) {
        if line.contains("\"\"\"") || line.contains("'''") {
            return true;
        }
    }
    false
}

/// How a double-quoted string's content should be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteDisposition {
    /// Safe to rewrite to single quotes.
    Rewrite,
    /// Leave untouched.
    Skip,
}

/// Classify the content of a double-quoted string.
///
/// Content is left untouched when it looks object-like (braces, brackets,
/// commas, or any whitespace) or when it contains an apostrophe, which
/// would change the meaning of the rewritten literal. Everything else is
/// a simple literal and safe to rewrite.
#[must_use]
pub fn classify_quote_content(content: &str) -> QuoteDisposition {
    if OBJECT_CONTENT_RE.is_match(content) || CONTENT_WHITESPACE_RE.is_match(content) {
        return QuoteDisposition::Skip;
    }
    if content.contains('\'') {
        return QuoteDisposition::Skip;
    }
    QuoteDisposition::Rewrite
}
