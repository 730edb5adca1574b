//! Import-statement parsing.
//!
//! Walks raw lines and extracts logical import statements, greedily
//! absorbing the physical continuation lines of parenthesized or
//! backslash-continued imports. Everything that is not part of an import
//! statement is returned, in original order, as non-import content.

use crate::parser::patterns::{FROM_LINE_RE, IMPORT_LINE_RE};

/// Which import form a record was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// `import module`
    Import,
    /// `from module import names`
    From,
}

/// One logical import statement, possibly spanning multiple physical lines.
#[derive(Debug, Clone)]
pub struct ImportRecord {
    /// 0-based index of the first physical line
    pub start_line: usize,
    /// The raw statement text, embedded newlines for multi-line imports
    pub raw_text: String,
    /// Statement form
    pub kind: ImportKind,
    /// Leading module path segment (empty when the text does not parse)
    pub module_name: String,
    /// Whether continuation lines were absorbed
    pub is_multi_line: bool,
}

/// Extract the module name from an import statement's raw text.
///
/// The name is the text captured after `import `/`from ` up to a comment
/// or end of line, cut at the first `.`. A record that matches neither
/// pattern (for example an indented import) yields an empty name and is
/// classified as project content by the grouper.
#[must_use]
pub fn extract_module_name(raw_text: &str) -> String {
    if let Some(caps) = IMPORT_LINE_RE.captures(raw_text) {
        return caps[1].split('.').next().unwrap_or_default().to_string();
    }
    if let Some(caps) = FROM_LINE_RE.captures(raw_text) {
        return caps[1].split('.').next().unwrap_or_default().to_string();
    }
    String::new()
}

/// Check whether a physical line continues the import statement above it.
///
/// Continuations are lines whose trimmed form starts with `(` or `)`,
/// ends with a backslash, or whose raw form begins with at least four
/// spaces or a tab.
fn is_continuation_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('(')
        || trimmed.starts_with(')')
        || trimmed.ends_with('\\')
        || line.starts_with("    ")
        || line.starts_with('\t')
}

/// Parse all import statements out of a file's lines.
///
/// Returns the parsed records and the remaining non-import lines in
/// their original relative order.
#[must_use]
pub fn parse_imports(lines: &[String]) -> (Vec<ImportRecord>, Vec<String>) {
    let mut records = Vec::new();
    let mut non_import_lines = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = &lines[i];
        let trimmed = line.trim();

        if trimmed.starts_with("import ") || trimmed.starts_with("from ") {
            let mut raw_text = line.clone();
            let mut is_multi_line = false;
            let mut j = i + 1;

            while j < lines.len() && is_continuation_line(&lines[j]) {
                raw_text.push('\n');
                raw_text.push_str(&lines[j]);
                is_multi_line = true;
                j += 1;
            }

            let kind = if trimmed.starts_with("import ") {
                ImportKind::Import
            } else {
                ImportKind::From
            };
            let module_name = extract_module_name(&raw_text);

            records.push(ImportRecord {
                start_line: i,
                raw_text,
                kind,
                module_name,
                is_multi_line,
            });
            i = j;
        } else {
            non_import_lines.push(line.clone());
            i += 1;
        }
    }

    (records, non_import_lines)
}
