//! Line splitting for respecting line length limits.
//!
//! Implements automatic wrapping for long Python lines: parenthesized
//! rewriting of long import lists, re-flowing of open function parameter
//! lists, and break-point search for generic long lines.

use crate::parser::patterns::{
    indentation, DEF_HEADER_RE, FROM_IMPORT_ITEMS_RE, PARAMS_CLOSE_RE, WHITESPACE_RUN_RE,
};

/// Break points tried inside an assignment's right-hand side.
const VALUE_BREAK_POINTS: &[&str] = &[
    ".", "(", "[", "{", ", ", " and ", " or ", " + ", " - ", " * ", " / ",
];

/// Break points tried on generic long lines, in preference order.
const BREAK_POINTS: &[&str] = &[
    " = ", " += ", " -= ", " *= ", " /= ", " == ", " != ", " > ", " < ", " >= ", " <= ", " in ",
    " not in ", " is ", " is not ", " and ", " or ", " + ", " - ", " * ", " / ", ", ", " (", " [",
    " {",
];

/// Largest char-boundary index not exceeding `index`.
fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Find the last occurrence of `needle` starting at or before `from`.
///
/// Mirrors a backward substring search bounded by a start position, so a
/// break token may begin at the edge of the width budget but not after it.
fn last_index_of(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let end = floor_char_boundary(haystack, from.saturating_add(needle.len()).min(haystack.len()));
    haystack[..end].rfind(needle)
}

/// Rewrite a long single-line `from X import a, b, c` to parenthesized
/// multi-line form with one item per line at `indent_size` extra spaces.
///
/// Lines that do not match the expected shape, or whose item list has at
/// most one entry, are returned unchanged.
#[must_use]
pub fn wrap_import_line(line: &str, indent_size: usize) -> Vec<String> {
    let original_indent = indentation(line);
    let content = &line[original_indent.len()..];

    let Some(caps) = FROM_IMPORT_ITEMS_RE.captures(content) else {
        return vec![line.to_string()];
    };
    let import_part = &caps[1];
    let items = &caps[2];

    let item_list: Vec<&str> = items
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect();
    if item_list.len() <= 1 {
        return vec![line.to_string()];
    }

    let item_indent = " ".repeat(indent_size);
    let mut result = Vec::with_capacity(item_list.len() + 2);
    result.push(format!("{original_indent}{import_part}("));
    for (i, item) in item_list.iter().enumerate() {
        let comma = if i == item_list.len() - 1 { "" } else { "," };
        result.push(format!("{original_indent}{item_indent}{item}{comma}"));
    }
    result.push(format!("{original_indent})"));
    result
}

/// Re-flow a function declaration whose parameter list is still open at
/// the end of its first line.
///
/// Continuation lines are concatenated (whitespace runs collapsed) until
/// a line containing `)` is found, then the parameter text is re-split on
/// commas and emitted one per line at `indent_size` extra spaces, followed
/// by the closing paren and any suffix (return annotation, colon). The
/// declaration line's own parameter remainder is included in the re-split
/// so no parameter text is dropped.
///
/// Returns the replacement lines and the index of the first unconsumed
/// input line. Declarations that never close are passed through unchanged.
#[must_use]
pub fn wrap_function_def(
    lines: &[String],
    start_index: usize,
    indent_size: usize,
) -> (Vec<String>, usize) {
    let first_line = &lines[start_index];
    let original_indent = indentation(first_line);
    let content = &first_line[original_indent.len()..];

    let Some(caps) = DEF_HEADER_RE.captures(content) else {
        return (vec![first_line.clone()], start_index + 1);
    };
    let func_start = &caps[1];
    let params = &caps[2];

    // Parameters already close on this line: nothing to re-flow
    if params.contains(')') {
        return (vec![first_line.clone()], start_index + 1);
    }

    // Collect continuation lines until the closing paren
    let mut param_lines: Vec<String> = vec![params.to_string()];
    let mut i = start_index + 1;
    let mut found_closing = false;
    while i < lines.len() {
        param_lines.push(lines[i].clone());
        if lines[i].trim().contains(')') {
            found_closing = true;
            break;
        }
        i += 1;
    }
    if !found_closing {
        // Malformed declaration, pass the line through unchanged
        return (vec![first_line.clone()], start_index + 1);
    }

    let joined = param_lines.join(" ");
    let all_params = WHITESPACE_RUN_RE.replace_all(&joined, " ");
    let all_params = all_params.trim();

    let Some(caps) = PARAMS_CLOSE_RE.captures(all_params) else {
        return (vec![first_line.clone()], start_index + 1);
    };
    let params = &caps[1];
    let suffix = &caps[2];

    let param_list: Vec<&str> = params
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let param_indent = " ".repeat(indent_size);
    let mut result = Vec::with_capacity(param_list.len() + 2);
    result.push(format!("{original_indent}{func_start}"));
    for (j, param) in param_list.iter().enumerate() {
        let comma = if j == param_list.len() - 1 { "" } else { "," };
        result.push(format!("{original_indent}{param_indent}{param}{comma}"));
    }
    result.push(format!("{original_indent}){suffix}"));

    (result, i + 1)
}

/// Wrap a generic long line at a natural break point.
///
/// Assignment statements without parentheses first try to break inside
/// the right-hand side; otherwise an ordered candidate list is searched
/// backward from the width budget, then the last plain space. Lines with
/// no usable break point are returned unmodified.
#[must_use]
pub fn wrap_line(line: &str, max_line_length: usize, indent_size: usize) -> Vec<String> {
    if line.len() <= max_line_length {
        return vec![line.to_string()];
    }

    let original_indent = indentation(line);
    let content = &line[original_indent.len()..];
    let continuation_indent = " ".repeat(indent_size);

    // Assignment statements: keep the target and `=` together and break
    // inside the value expression
    if let Some(equal_index) = content.find(" = ").filter(|_| !content.contains('(')) {
        let before_equal = &content[..equal_index + 3];
        let after_equal = &content[equal_index + 3..];

        let value_budget = max_line_length
            .saturating_sub(original_indent.len())
            .saturating_sub(before_equal.len());
        if after_equal.len() > value_budget {
            for break_point in VALUE_BREAK_POINTS {
                if let Some(index) = last_index_of(after_equal, break_point, value_budget) {
                    if index > 0 {
                        let first_part = &after_equal[..index];
                        let second_part = &after_equal[index + break_point.len()..];
                        return vec![
                            format!("{original_indent}{before_equal}{first_part}{break_point}"),
                            format!("{original_indent}{continuation_indent}{second_part}"),
                        ];
                    }
                }
            }
        }
    }

    // Generic break-point search from the right edge of the budget
    let budget = max_line_length.saturating_sub(original_indent.len());
    for break_point in BREAK_POINTS {
        if let Some(index) = last_index_of(content, break_point, budget) {
            if index > 0 {
                let first_part = &content[..index];
                let second_part = &content[index + break_point.len()..];
                return vec![
                    format!("{original_indent}{first_part}{break_point}"),
                    format!("{original_indent}{continuation_indent}{second_part}"),
                ];
            }
        }
    }

    // Fall back to the last plain space within the budget
    if let Some(space_index) = last_index_of(content, " ", budget) {
        if space_index > 0 {
            let first_part = &content[..space_index];
            let second_part = &content[space_index + 1..];
            return vec![
                format!("{original_indent}{first_part}"),
                format!("{original_indent}{continuation_indent}{second_part}"),
            ];
        }
    }

    // No usable break point, never truncate
    vec![line.to_string()]
}

/// Apply line wrapping to all lines exceeding `max_line_length`.
///
/// Wrapping is single-pass: continuation lines produced here are not
/// re-checked against the limit within the same invocation.
#[must_use]
pub fn fix_line_length(lines: &[String], max_line_length: usize, indent_size: usize) -> Vec<String> {
    let mut fixed = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];
        if line.len() <= max_line_length {
            fixed.push(line.clone());
            i += 1;
            continue;
        }

        let trimmed = line.trim();

        // Long import lists become parenthesized multi-line imports
        if trimmed.starts_with("from ") && line.contains("import ") && line.contains(',') {
            fixed.extend(wrap_import_line(line, indent_size));
            i += 1;
            continue;
        }

        // Function declarations with an open parameter list
        if trimmed.starts_with("def ") && line.contains('(') && !line.contains(')') {
            let (wrapped, next_index) = wrap_function_def(lines, i, indent_size);
            fixed.extend(wrapped);
            i = next_index;
            continue;
        }

        fixed.extend(wrap_line(line, max_line_length, indent_size));
        i += 1;
    }

    fixed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_lines(text: &str) -> Vec<String> {
        text.split('\n').map(String::from).collect()
    }

    #[test]
    fn test_wrap_import_line() {
        let line = "from mymodule import alpha, beta, gamma";
        let result = wrap_import_line(line, 4);
        assert_eq!(
            result,
            vec![
                "from mymodule import (",
                "    alpha,",
                "    beta,",
                "    gamma",
                ")",
            ]
        );
    }

    #[test]
    fn test_wrap_import_line_preserves_indent() {
        let line = "    from mymodule import alpha, beta";
        let result = wrap_import_line(line, 4);
        assert_eq!(
            result,
            vec![
                "    from mymodule import (",
                "        alpha,",
                "        beta",
                "    )",
            ]
        );
    }

    #[test]
    fn test_wrap_import_line_single_item_unchanged() {
        let line = "from mymodule import alpha";
        assert_eq!(wrap_import_line(line, 4), vec![line]);
    }

    #[test]
    fn test_wrap_function_def() {
        let lines = to_lines("def process(alpha, beta,\n        gamma, delta):\n    pass");
        let (wrapped, next_index) = wrap_function_def(&lines, 0, 4);
        assert_eq!(
            wrapped,
            vec![
                "def process(",
                "    alpha,",
                "    beta,",
                "    gamma,",
                "    delta",
                "):",
            ]
        );
        assert_eq!(next_index, 2);
    }

    #[test]
    fn test_wrap_function_def_keeps_first_line_params() {
        // Parameters on the declaration line itself must not be dropped
        let lines = to_lines("def f(first_param,\n        second_param):\n    pass");
        let (wrapped, _) = wrap_function_def(&lines, 0, 4);
        assert!(wrapped.iter().any(|l| l.contains("first_param")));
        assert!(wrapped.iter().any(|l| l.contains("second_param")));
    }

    #[test]
    fn test_wrap_function_def_with_return_annotation() {
        let lines = to_lines("def f(a,\n      b) -> int:\n    pass");
        let (wrapped, _) = wrap_function_def(&lines, 0, 4);
        assert_eq!(wrapped.last().unwrap(), ") -> int:");
    }

    #[test]
    fn test_wrap_function_def_never_closes() {
        let lines = to_lines("def f(a,\n      b,\n      c,");
        let (wrapped, next_index) = wrap_function_def(&lines, 0, 4);
        assert_eq!(wrapped, vec!["def f(a,"]);
        assert_eq!(next_index, 1);
    }

    #[test]
    fn test_wrap_line_at_operator() {
        let line = format!("result = value_one + value_two + {}", "x".repeat(60));
        let result = wrap_line(&line, 40, 4);
        assert_eq!(result.len(), 2);
        assert!(result[0].len() <= 42);
        assert!(result[1].starts_with("    "));
    }

    #[test]
    fn test_wrap_line_assignment_content_preserved() {
        let value = "x".repeat(60);
        let line = format!("variable_name = \"{value}\" + suffix_name");
        let result = wrap_line(&line, 50, 4);
        let rejoined: String = result
            .iter()
            .map(|l| l.trim())
            .collect::<Vec<_>>()
            .join(" ");
        assert!(rejoined.contains(&value));
        assert!(rejoined.contains("variable_name"));
        assert!(rejoined.contains("suffix_name"));
    }

    #[test]
    fn test_wrap_line_no_break_point_unchanged() {
        let line = "x".repeat(100);
        assert_eq!(wrap_line(&line, 85, 4), vec![line]);
    }

    #[test]
    fn test_wrap_line_short_line_unchanged() {
        let line = "x = 1";
        assert_eq!(wrap_line(line, 85, 4), vec![line]);
    }

    #[test]
    fn test_wrap_line_indented_continuation() {
        let line = format!("        value = alpha and beta and {}", "y".repeat(60));
        let result = wrap_line(&line, 50, 4);
        assert_eq!(result.len(), 2);
        assert!(result[1].starts_with("            "));
    }

    #[test]
    fn test_fix_line_length_short_lines_untouched() {
        let lines = to_lines("x = 1\ny = 2");
        assert_eq!(fix_line_length(&lines, 85, 4), lines);
    }

    #[test]
    fn test_fix_line_length_long_import() {
        let names: Vec<String> = (0..8).map(|i| format!("name_number_{i}")).collect();
        let line = format!("from mymodule import {}", names.join(", "));
        assert!(line.len() > 85);
        let result = fix_line_length(&to_lines(&line), 85, 4);
        assert_eq!(result[0], "from mymodule import (");
        assert_eq!(result.last().unwrap(), ")");
        assert_eq!(result.len(), 10);
    }

    #[test]
    fn test_last_index_of() {
        assert_eq!(last_index_of("a + b + c", " + ", 8), Some(5));
        assert_eq!(last_index_of("a + b + c", " + ", 4), Some(1));
        assert_eq!(last_index_of("abc", "x", 2), None);
    }
}
