//! Text processing and formatting pipeline.
//!
//! This module orchestrates the rewrite pipeline:
//!
//! **Guard:**
//! - Skip the pipeline entirely when the text already carries wrapped
//!   constructs (parenthesized multi-line imports, multi-line defs)
//!
//! **Passes (in order):**
//! - Quote style fixing
//! - Import grouping, sorting and relocation
//! - Declaration blank-line spacing
//! - Line-length wrapping
//! - Trailing newline normalization
//!
//! The main entry points are [`format_text`] for in-memory text and
//! [`format_file`] which processes a buffered reader and writes formatted
//! output to any `Write` implementation.

pub mod pipeline;

pub use pipeline::{format_file, format_text, is_already_formatted};
