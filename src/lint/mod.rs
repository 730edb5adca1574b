//! Style linting for Python source text.
//!
//! Produces positioned warnings from a text snapshot without mutating
//! it. The checks share their detectors with the formatter so that
//! every reported issue corresponds to a rewrite the formatter would
//! perform (or a spacing/file-ending rule it would enforce).

use crate::config::Config;
use crate::format::quotes::scan_line_quotes;
use crate::parser::docstring::is_inside_docstring;
use crate::parser::patterns::{DEF_RE, IMPORT_LINE_RE};

/// Issue severity. The rule set only emits warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
}

/// A single positioned lint issue.
///
/// Line numbers are 1-based; column offsets are 0-based character
/// positions forming the half-open range `[col_start, col_end)` within
/// the reported line.
#[derive(Debug, Clone)]
pub struct Issue {
    pub line: usize,
    pub col_start: usize,
    pub col_end: usize,
    pub message: String,
    pub severity: Severity,
    pub code: &'static str,
}

impl Issue {
    fn full_line(line_number: usize, line: &str, code: &'static str, message: String) -> Self {
        Issue {
            line: line_number,
            col_start: 0,
            col_end: line.chars().count(),
            message,
            severity: Severity::Warning,
            code,
        }
    }

    fn at_line_start(line_number: usize, code: &'static str, message: String) -> Self {
        Issue {
            line: line_number,
            col_start: 0,
            col_end: 0,
            message,
            severity: Severity::Warning,
            code,
        }
    }
}

/// Lint a text snapshot, returning all issues found.
///
/// Never mutates the input and never fails; malformed constructs simply
/// produce no issues.
#[must_use]
pub fn lint_text(text: &str, config: &Config) -> Vec<Issue> {
    let lines: Vec<String> = text.split('\n').map(String::from).collect();
    let mut issues = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let line_number = i + 1;
        check_line_length(line, line_number, config.line_length, &mut issues);
        check_quotes(line, i, &lines, &mut issues);
        check_import_format(line, line_number, &mut issues);
        check_class_spacing(line, line_number, &lines, &mut issues);
        check_method_spacing(line, line_number, &lines, &mut issues);
    }

    check_file_ending(&lines, &mut issues);
    check_import_grouping(&lines, &mut issues);

    issues
}

fn check_line_length(line: &str, line_number: usize, max_length: usize, issues: &mut Vec<Issue>) {
    let length = line.chars().count();
    if length > max_length {
        issues.push(Issue::full_line(
            line_number,
            line,
            "line-length",
            format!("Line exceeds {max_length} characters ({length})"),
        ));
    }
}

fn check_quotes(line: &str, line_index: usize, lines: &[String], issues: &mut Vec<Issue>) {
    // Docstring spans are exempt from quote style
    if is_inside_docstring(line_index, lines) {
        return;
    }

    for m in scan_line_quotes(line) {
        if !m.rewrite {
            continue;
        }
        // Convert byte offsets to character offsets for reporting
        let col_start = line[..m.start].chars().count();
        let col_end = line[..m.end].chars().count();
        issues.push(Issue {
            line: line_index + 1,
            col_start,
            col_end,
            message: "Use single quotes instead of double quotes".to_string(),
            severity: Severity::Warning,
            code: "quote-style",
        });
    }
}

fn check_import_format(line: &str, line_number: usize, issues: &mut Vec<Issue>) {
    if !line.trim().starts_with("import ") {
        return;
    }
    if let Some(caps) = IMPORT_LINE_RE.captures(line.trim_start()) {
        let modules: Vec<&str> = caps[1].split(',').map(str::trim).collect();
        if modules.len() > 1 {
            issues.push(Issue::full_line(
                line_number,
                line,
                "import-style",
                "Multiple imports should be on separate lines".to_string(),
            ));
        }
    }
}

fn check_class_spacing(line: &str, line_number: usize, lines: &[String], issues: &mut Vec<Issue>) {
    if !line.trim().starts_with("class ") {
        return;
    }
    // Two blank lines must precede a class (unless it sits near the top)
    if line_number > 2 {
        let prev1 = &lines[line_number - 2];
        let prev2 = &lines[line_number - 3];
        if !prev1.trim().is_empty() || !prev2.trim().is_empty() {
            issues.push(Issue::at_line_start(
                line_number,
                "class-spacing",
                "Classes should be preceded by 2 blank lines".to_string(),
            ));
        }
    }
}

fn check_method_spacing(line: &str, line_number: usize, lines: &[String], issues: &mut Vec<Issue>) {
    if !DEF_RE.is_match(line.trim()) {
        return;
    }
    if line_number <= 1 {
        return;
    }
    let prev = &lines[line_number - 2];

    // The first method in a class needs no separator; scan backward until
    // a class (first method), another def, or a blank line
    let mut is_first_method_in_class = false;
    for k in (0..=line_number.saturating_sub(2)).rev() {
        let earlier = lines[k].trim();
        if earlier.starts_with("class ") {
            is_first_method_in_class = true;
            break;
        } else if earlier.starts_with("def ") || earlier.is_empty() {
            break;
        }
    }

    if !is_first_method_in_class && !prev.trim().is_empty() {
        issues.push(Issue::at_line_start(
            line_number,
            "method-spacing",
            "Methods should be preceded by 1 blank line".to_string(),
        ));
    }
}

fn check_file_ending(lines: &[String], issues: &mut Vec<Issue>) {
    if let Some(last) = lines.last() {
        if !last.trim().is_empty() {
            issues.push(Issue::at_line_start(
                lines.len(),
                "file-ending",
                "File should end with a blank line".to_string(),
            ));
        }
    }
}

fn check_import_grouping(lines: &[String], issues: &mut Vec<Issue>) {
    let import_lines: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            trimmed.starts_with("import ") || trimmed.starts_with("from ")
        })
        .map(|(i, _)| i + 1)
        .collect();

    if import_lines.len() < 2 {
        return;
    }

    for pair in import_lines.windows(2) {
        let lines_between = pair[1] - pair[0] - 1;
        if lines_between < 1 {
            issues.push(Issue::at_line_start(
                pair[1],
                "import-grouping",
                "Import groups should be separated by at least 1 blank line".to_string(),
            ));
        }
    }
}
