//! Inline directive parsing for `# pyprettier:` comments
//!
//! Supports in-file configuration overrides via special comments:
//! `# pyprettier: --line-length 100 --no-imports`

use std::sync::LazyLock;

use regex::Regex;

/// Pattern to match pyprettier directives
static PYPRETTIER_DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*#\s*pyprettier:\s*(.*)\s*$").unwrap());

/// Parsed directive options that can override config
#[derive(Debug, Default, Clone)]
pub struct DirectiveOverrides {
    pub line_length: Option<usize>,
    pub indent: Option<usize>,
    pub fix_quotes: Option<bool>,
    pub format_imports: Option<bool>,
    pub fix_spacing: Option<bool>,
    pub wrap_lines: Option<bool>,
}

impl DirectiveOverrides {
    /// Check if any overrides are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.line_length.is_none()
            && self.indent.is_none()
            && self.fix_quotes.is_none()
            && self.format_imports.is_none()
            && self.fix_spacing.is_none()
            && self.wrap_lines.is_none()
    }
}

/// Check if a line contains a pyprettier directive
#[must_use]
pub fn is_directive_line(line: &str) -> bool {
    PYPRETTIER_DIRECTIVE_RE.is_match(line)
}

/// Parse a pyprettier directive line and return option overrides
///
/// # Arguments
/// * `line` - The line containing the directive
///
/// # Returns
/// * `Some(DirectiveOverrides)` if the line is a valid directive
/// * `None` if the line is not a directive
#[must_use]
pub fn parse_directive(line: &str) -> Option<DirectiveOverrides> {
    let caps = PYPRETTIER_DIRECTIVE_RE.captures(line)?;
    let args_str = caps.get(1)?.as_str();

    // Parse the arguments like CLI args
    parse_directive_args(args_str)
}

/// Parse directive arguments into overrides
fn parse_directive_args(args_str: &str) -> Option<DirectiveOverrides> {
    let mut overrides = DirectiveOverrides::default();
    let tokens: Vec<&str> = args_str.split_whitespace().collect();
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i];
        match token {
            "-l" | "--line-length" => {
                i += 1;
                if i < tokens.len() {
                    overrides.line_length = tokens[i].parse().ok();
                }
            }
            "-i" | "--indent" => {
                i += 1;
                if i < tokens.len() {
                    overrides.indent = tokens[i].parse().ok();
                }
            }
            "--no-quotes" | "--disable-quotes" => {
                overrides.fix_quotes = Some(false);
            }
            "--enable-quotes" => {
                overrides.fix_quotes = Some(true);
            }
            "--no-imports" | "--disable-imports" => {
                overrides.format_imports = Some(false);
            }
            "--enable-imports" => {
                overrides.format_imports = Some(true);
            }
            "--no-spacing" | "--disable-spacing" => {
                overrides.fix_spacing = Some(false);
            }
            "--enable-spacing" => {
                overrides.fix_spacing = Some(true);
            }
            "--no-wrap" | "--disable-wrap" => {
                overrides.wrap_lines = Some(false);
            }
            "--enable-wrap" => {
                overrides.wrap_lines = Some(true);
            }
            _ => {
                // Unknown option, skip
            }
        }
        i += 1;
    }

    if overrides.is_empty() {
        None
    } else {
        Some(overrides)
    }
}

/// Scan input for pyprettier directives and return the first found
///
/// This reads the file looking for `# pyprettier:` lines.
/// Only the first directive is used (subsequent ones are ignored).
pub fn find_directive<R: std::io::BufRead>(input: &mut R) -> Option<DirectiveOverrides> {
    let mut buffer = String::new();

    while input.read_line(&mut buffer).ok()? > 0 {
        if is_directive_line(&buffer) {
            return parse_directive(&buffer);
        }
        buffer.clear();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_directive_line() {
        assert!(is_directive_line("# pyprettier: --line-length 100"));
        assert!(is_directive_line("  # pyprettier: --no-imports"));
        assert!(is_directive_line("# PYPRETTIER: --indent 2"));
        assert!(!is_directive_line("# this is a regular comment"));
        assert!(!is_directive_line("x = 1"));
    }

    #[test]
    fn test_parse_directive_line_length() {
        let overrides = parse_directive("# pyprettier: --line-length 100").unwrap();
        assert_eq!(overrides.line_length, Some(100));
    }

    #[test]
    fn test_parse_directive_short_flag() {
        let overrides = parse_directive("# pyprettier: -l 79").unwrap();
        assert_eq!(overrides.line_length, Some(79));
    }

    #[test]
    fn test_parse_directive_no_imports() {
        let overrides = parse_directive("# pyprettier: --no-imports").unwrap();
        assert_eq!(overrides.format_imports, Some(false));
    }

    #[test]
    fn test_parse_directive_multiple() {
        let overrides = parse_directive("# pyprettier: --indent 2 -l 120 --no-wrap").unwrap();
        assert_eq!(overrides.indent, Some(2));
        assert_eq!(overrides.line_length, Some(120));
        assert_eq!(overrides.wrap_lines, Some(false));
    }

    #[test]
    fn test_parse_invalid_directive() {
        // Empty directive
        let overrides = parse_directive("# pyprettier:");
        assert!(overrides.is_none());
    }

    #[test]
    fn test_find_directive() {
        let text = "import os\n# pyprettier: --no-quotes\nx = 1\n";
        let mut reader = std::io::BufReader::new(text.as_bytes());
        let overrides = find_directive(&mut reader).unwrap();
        assert_eq!(overrides.fix_quotes, Some(false));
    }

    #[test]
    fn test_find_directive_none() {
        let text = "import os\nx = 1\n";
        let mut reader = std::io::BufReader::new(text.as_bytes());
        assert!(find_directive(&mut reader).is_none());
    }
}
