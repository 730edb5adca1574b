//! Integration tests for pyprettier
//!
//! These tests verify the lint and format engines end-to-end against the
//! rule set's observable properties: idempotence, content preservation,
//! trailing-newline exactness, import relocation and quote safety.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use pyprettier::{format_text, lint_text, Config};

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

#[test]
fn test_import_grouping_scenario() {
    let input = "import sys\nimport os\n\ndef f(a,b):\n    pass\n";
    let result = format_text(input, &Config::default());
    // System imports reorder alphabetically, imports precede the def
    assert_eq!(result, "import os\nimport sys\n\n\n\ndef f(a,b):\n    pass\n");
}

#[test]
fn test_import_relocation_and_dedup() {
    let input = "x = 1\nimport zebra.core\nimport os\ny = 2\nimport os\n";
    let result = format_text(input, &Config::default());
    assert_eq!(
        result,
        "import os\n\nimport zebra.core\n\nx = 1\ny = 2\n"
    );
}

#[test]
fn test_quote_safety() {
    let config = Config::default();
    // Apostrophe content is never rewritten
    assert_eq!(
        format_text("x = \"it's fine\"\n", &config),
        "x = \"it's fine\"\n"
    );
    // Simple literals are rewritten
    assert_eq!(format_text("d = \"hello\"\n", &config), "d = 'hello'\n");
    // Dictionary-like lines are left alone
    assert_eq!(
        format_text("config = {\"key\": \"value\"}\n", &config),
        "config = {\"key\": \"value\"}\n"
    );
}

#[test]
fn test_class_spacing_scenario() {
    let input = "x = 1\nclass Foo:\n    def bar(self):\n        pass\n";
    let result = format_text(input, &Config::default());
    // Two blank lines before the class, none before its first method
    assert_eq!(
        result,
        "x = 1\n\n\nclass Foo:\n    def bar(self):\n        pass\n"
    );
}

#[test]
fn test_long_assignment_wrap_scenario() {
    let value = "x".repeat(100);
    let input = format!("variable_name = \"{value}\"\n");
    let result = format_text(&input, &Config::default());
    let lines: Vec<&str> = result.trim_end().split('\n').collect();

    assert_eq!(lines.len(), 2, "long assignment should wrap to two lines");
    assert!(lines[1].starts_with("    "), "continuation indents +4");
    // Content fully preserved (the quote pass rewrites the delimiters)
    assert!(result.contains(&value));
    assert!(result.contains("variable_name"));
}

#[test]
fn test_idempotence_via_guard() {
    let names: Vec<String> = (0..8).map(|i| format!("name_number_{i}")).collect();
    let input = format!(
        "from mymodule import {}\nx = \"hello\"\n",
        names.join(", ")
    );
    let config = Config::default();

    let once = format_text(&input, &config);
    assert!(once.contains("from mymodule import ("));
    let twice = format_text(&once, &config);
    assert_eq!(once, twice, "formatting must be a fixed point");
}

#[test]
fn test_already_compliant_text_unchanged() {
    let input = "x = 1\ny = 2\n";
    assert_eq!(format_text(input, &Config::default()), input);
}

#[test]
fn test_wrapped_constructs_returned_verbatim() {
    // The guard fires and the whole pipeline is skipped
    let input = "from mypkg import (\n    alpha,\n    beta,\n)\nimport zzz\nd = \"x\"";
    assert_eq!(format_text(input, &Config::default()), input);
}

#[test]
fn test_trailing_newline_property() {
    let config = Config::default();
    for input in ["x = 1", "x = 1\n", "x = 1\n\n\n", "x = 1   \n \n"] {
        let result = format_text(input, &config);
        assert!(result.ends_with('\n'));
        assert!(!result.ends_with("\n\n"));
    }
}

#[test]
fn test_content_preservation_on_wrap() {
    // Quote fixing disabled so only whitespace may change
    let config = Config {
        fix_quotes: false,
        ..Default::default()
    };
    let input = format!(
        "result_value = first_term + second_term + third_term + {}\n",
        "fourth_term_padding".repeat(3)
    );
    let result = format_text(&input, &config);
    assert_eq!(strip_whitespace(&result), strip_whitespace(&input));
}

#[test]
fn test_generic_long_line_wraps_in_two() {
    let input = "print(\"This is a very long line that exceeds the maximum line length and should be wrapped to multiple lines\")\n";
    let result = format_text(input, &Config::default());
    let lines: Vec<&str> = result.trim_end().split('\n').collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(strip_whitespace(&result), strip_whitespace(input));
}

#[test]
fn test_unbreakable_long_line_unchanged() {
    let long_token = "z".repeat(120);
    let input = format!("{long_token}\n");
    let result = format_text(&input, &Config::default());
    assert_eq!(result, input);
}

#[test]
fn test_malformed_def_passes_through() {
    // Parameter list never closes: the line is left as-is
    let input = "def broken(a,\n";
    let result = format_text(input, &Config::default());
    assert!(result.contains("def broken(a,"));
}

#[test]
fn test_lint_and_format_agree_on_quotes() {
    let text = "d = \"hello\"\nx = \"it's fine\"\n";
    let config = Config::default();

    let issues = lint_text(text, &config);
    let quote_issues: Vec<_> = issues.iter().filter(|i| i.code == "quote-style").collect();
    assert_eq!(quote_issues.len(), 1);
    assert_eq!(quote_issues[0].line, 1);

    let formatted = format_text(text, &config);
    assert!(formatted.contains("d = 'hello'"));
    assert!(formatted.contains("x = \"it's fine\""));
}

#[test]
fn test_lint_is_non_mutating_and_total() {
    let text = "def broken(\n\"unterminated\nimport ,,,\n";
    let config = Config::default();
    // Must not panic on malformed input and must leave the text usable
    let _ = lint_text(text, &config);
    let _ = format_text(text, &config);
}

#[test]
fn test_custom_line_length() {
    let config = Config {
        line_length: 40,
        ..Default::default()
    };
    let input = "short_name = alpha_value + beta_value + gamma_value\n";
    let result = format_text(input, &config);
    let lines: Vec<&str> = result.trim_end().split('\n').collect();
    assert_eq!(lines.len(), 2);

    let issues = lint_text(input, &config);
    assert!(issues.iter().any(|i| i.code == "line-length"));
}
