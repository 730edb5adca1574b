//! Heuristic line-oriented detectors for Python source.
//!
//! This module contains the shared sub-routines used by both the linter
//! and the formatter:
//! - [`patterns`]: Compiled regex patterns for Python constructs
//! - [`docstring`]: Docstring-span detection and quote-content classification
//! - [`imports`]: Import-statement parsing (including multi-line imports)
//!
//! None of these are grammar-aware parsers; they are deliberate
//! line-by-line heuristics over raw text.

pub mod docstring;
pub mod imports;
pub mod patterns;

pub use docstring::{classify_quote_content, is_inside_docstring, QuoteDisposition};
pub use imports::{extract_module_name, parse_imports, ImportKind, ImportRecord};
