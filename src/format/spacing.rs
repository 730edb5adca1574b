//! Blank-line spacing around class and function declarations.
//!
//! A single forward scan inserts two blank lines before each class
//! declaration and one before each method/function declaration, except
//! for declarations immediately following a class or another declaration.
//! Pre-existing blank lines are not deduplicated here; the pipeline's
//! idempotence guard prevents repeated insertion in practice.

use crate::parser::patterns::DEF_RE;

/// Scan state threaded through the forward pass.
#[derive(Debug)]
struct SpacingState {
    /// Index of the most recent class declaration (-1 before the first)
    last_class_line: isize,
    /// Index of the most recent def declaration (-1 before the first)
    last_method_line: isize,
    /// Inside a class body; cleared on the first blank line after the
    /// last method. Bookkeeping only, no rule currently conditions on it.
    in_class: bool,
}

impl SpacingState {
    fn new() -> Self {
        SpacingState {
            last_class_line: -1,
            last_method_line: -1,
            in_class: false,
        }
    }
}

/// Apply declaration spacing rules to all lines.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn fix_spacing(lines: &[String]) -> Vec<String> {
    let mut fixed: Vec<String> = Vec::with_capacity(lines.len());
    let mut state = SpacingState::new();

    for (i, line) in lines.iter().enumerate() {
        let index = i as isize;
        let trimmed = line.trim();

        if trimmed.starts_with("class ") {
            // Two blank lines before a class that is not the first emitted line
            if i > 0 && !fixed.is_empty() {
                fixed.push(String::new());
                fixed.push(String::new());
            }
            state.in_class = true;
            state.last_class_line = index;
            fixed.push(line.clone());
            continue;
        }

        if DEF_RE.is_match(trimmed) {
            // One blank line before a def, unless it directly follows a
            // class declaration or another def
            if index > state.last_class_line + 1 && index > state.last_method_line + 1 {
                fixed.push(String::new());
            }
            state.last_method_line = index;
            fixed.push(line.clone());
            continue;
        }

        if state.in_class && trimmed.is_empty() && index > state.last_method_line {
            state.in_class = false;
        }

        fixed.push(line.clone());
    }

    fixed
}
