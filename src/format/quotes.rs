//! Quote style rewriting.
//!
//! Rewrites `"..."` literals to `'...'` on every line that is not part of
//! a docstring span, leaving dictionary-like `"key": value` constructs and
//! content that needs double quotes untouched.

use crate::parser::docstring::{classify_quote_content, is_inside_docstring, QuoteDisposition};
use crate::parser::patterns::DOUBLE_QUOTE_RE;

/// One double-quoted literal found on a line.
#[derive(Debug, Clone, Copy)]
pub struct QuoteMatch {
    /// Byte offset of the opening quote
    pub start: usize,
    /// Byte offset just past the closing quote
    pub end: usize,
    /// Whether the literal is safe to rewrite to single quotes
    pub rewrite: bool,
}

/// Scan one line for double-quoted literals.
///
/// A match immediately followed by optional whitespace and `=` or `:` is
/// a key position; it is not reported and scanning resumes one character
/// past its opening quote, so a `"key": "value"` pair yields the
/// mis-paired `": "` span (whitespace content, never rewritten) instead
/// of the value literal. This mirrors how a lookahead-failing regex
/// engine retries without consuming the match.
#[must_use]
pub fn scan_line_quotes(line: &str) -> Vec<QuoteMatch> {
    let mut matches = Vec::new();
    let mut pos = 0;

    while let Some(m) = DOUBLE_QUOTE_RE.find(&line[pos..]) {
        let start = pos + m.start();
        let end = pos + m.end();

        // Follow-set exclusion: `"..."` before `=` or `:` stays put, and
        // only the opening quote is consumed before retrying.
        let followed_by_key_marker = matches!(
            line[end..].trim_start().chars().next(),
            Some('=' | ':')
        );
        if followed_by_key_marker {
            pos = start + 1;
            continue;
        }

        let content = &line[start + 1..end - 1];
        matches.push(QuoteMatch {
            start,
            end,
            rewrite: classify_quote_content(content) == QuoteDisposition::Rewrite,
        });
        pos = end;
    }

    matches
}

/// Rewrite the double-quoted literals of a single line.
fn fix_line_quotes(line: &str) -> String {
    let matches = scan_line_quotes(line);
    if matches.iter().all(|m| !m.rewrite) {
        return line.to_string();
    }

    let mut fixed = String::with_capacity(line.len());
    let mut pos = 0;
    for m in &matches {
        fixed.push_str(&line[pos..m.start]);
        if m.rewrite {
            fixed.push('\'');
            fixed.push_str(&line[m.start + 1..m.end - 1]);
            fixed.push('\'');
        } else {
            fixed.push_str(&line[m.start..m.end]);
        }
        pos = m.end;
    }
    fixed.push_str(&line[pos..]);
    fixed
}

/// Apply quote fixing to all lines outside docstring spans.
#[must_use]
pub fn fix_quotes(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if is_inside_docstring(i, lines) {
                line.clone()
            } else {
                fix_line_quotes(line)
            }
        })
        .collect()
}
