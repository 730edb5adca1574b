//! Configuration management for pyprettier.
//!
//! This module provides the [`Config`] struct which controls all lint and
//! formatting behavior. Configuration can be loaded from:
//! - TOML files (`pyprettier.toml`)
//! - CLI arguments (which override file settings)
//! - In-file directives (`# pyprettier: --line-length 100`)
//!
//! Config files are auto-discovered by searching parent directories from the file
//! being formatted up to the filesystem root, plus the user's home directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["pyprettier.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    // Try HOME environment variable first (works on Unix and some Windows setups)
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Fallback for Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

// Serde default functions
fn default_line_length() -> usize {
    85
}
fn default_indent() -> usize {
    4
}
fn default_true() -> bool {
    true
}

/// Main configuration struct for pyprettier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Maximum line length (default: 85)
    #[serde(default = "default_line_length")]
    pub line_length: usize,

    /// Continuation and import-item indent in spaces (default: 4)
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Rewrite double-quoted strings to single quotes (default: true)
    #[serde(default = "default_true")]
    pub fix_quotes: bool,

    /// Group, sort and relocate imports (default: true)
    #[serde(default = "default_true")]
    pub format_imports: bool,

    /// Enforce blank-line spacing around class/def declarations (default: true)
    #[serde(default = "default_true")]
    pub fix_spacing: bool,

    /// Wrap lines exceeding the length limit (default: true)
    #[serde(default = "default_true")]
    pub wrap_lines: bool,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub line_length: Option<usize>,
    pub indent: Option<usize>,
    pub fix_quotes: Option<bool>,
    pub format_imports: Option<bool>,
    pub fix_spacing: Option<bool>,
    pub wrap_lines: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            line_length: 85,
            indent: 4,
            fix_quotes: true,
            format_imports: true,
            fix_spacing: true,
            wrap_lines: true,
        }
    }
}

impl Config {
    /// Minimum reasonable line length (must fit at least some code)
    const MIN_LINE_LENGTH: usize = 40;
    /// Maximum reasonable line length
    const MAX_LINE_LENGTH: usize = 1000;
    /// Maximum reasonable indent size
    const MAX_INDENT: usize = 20;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.indent == 0 {
            return Some("indent must be at least 1".to_string());
        }
        if self.indent > Self::MAX_INDENT {
            return Some(format!(
                "indent {} exceeds maximum of {}",
                self.indent,
                Self::MAX_INDENT
            ));
        }
        if self.line_length < Self::MIN_LINE_LENGTH {
            return Some(format!(
                "line_length {} is below minimum of {}",
                self.line_length,
                Self::MIN_LINE_LENGTH
            ));
        }
        if self.line_length > Self::MAX_LINE_LENGTH {
            return Some(format!(
                "line_length {} exceeds maximum of {}",
                self.line_length,
                Self::MAX_LINE_LENGTH
            ));
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.line_length {
            self.line_length = v;
        }
        if let Some(v) = partial.indent {
            self.indent = v;
        }
        if let Some(v) = partial.fix_quotes {
            self.fix_quotes = v;
        }
        if let Some(v) = partial.format_imports {
            self.format_imports = v;
        }
        if let Some(v) = partial.fix_spacing {
            self.fix_spacing = v;
        }
        if let Some(v) = partial.wrap_lines {
            self.wrap_lines = v;
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home directory config.
    /// Returns list of config file paths in order of priority (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        // Add home directory config first (lowest priority)
        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        // Start from the file's parent directory (or the path itself if it's a directory)
        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            // Path doesn't exist, use current directory
            std::env::current_dir().ok()
        };

        // Collect config files from parent directories (from root to current)
        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            // Reverse so we go from root to current (less specific to more specific)
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Returns default config if no files found.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let config_files = Self::discover_config_files(start_path);

        if config_files.is_empty() {
            return Self::default();
        }

        let mut config = Self::default();
        for path in &config_files {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => config.apply_partial(&partial),
                    Err(e) => eprintln!("Warning: failed to parse {}: {e}", path.display()),
                },
                Err(e) => eprintln!("Warning: failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.line_length, 85);
        assert_eq!(config.indent, 4);
        assert!(config.fix_quotes);
        assert!(config.format_imports);
        assert!(config.fix_spacing);
        assert!(config.wrap_lines);
    }

    #[test]
    fn test_config_apply_partial() {
        let mut base = Config::default();
        assert_eq!(base.line_length, 85);

        // Only set line_length and fix_quotes, leave others as None
        let partial = PartialConfig {
            line_length: Some(100),
            fix_quotes: Some(false),
            ..Default::default()
        };

        base.apply_partial(&partial);
        assert_eq!(base.line_length, 100);
        assert!(!base.fix_quotes);
        // Other fields should remain at defaults
        assert_eq!(base.indent, 4);
        assert!(base.format_imports);
    }

    #[test]
    fn test_config_apply_partial_preserves_unset() {
        let mut base = Config::default();
        base.indent = 2; // Set a non-default value

        // Partial config that only sets line_length
        let partial = PartialConfig {
            line_length: Some(79),
            ..Default::default()
        };

        base.apply_partial(&partial);
        // indent should be preserved (not reset to default)
        assert_eq!(base.indent, 2);
        assert_eq!(base.line_length, 79);
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "line_length = 99").unwrap();
        writeln!(file, "format_imports = false").unwrap();

        let config = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(config.line_length, 99);
        assert!(!config.format_imports);
        assert!(config.fix_quotes);
    }

    #[test]
    fn test_discover_config_files_nonexistent_path() {
        // Discovery from a path that doesn't exist should not panic
        let path = PathBuf::from("/nonexistent/path/file.py");
        let _files = Config::discover_config_files(&path);
    }

    #[test]
    fn test_from_discovered_files_returns_default_when_empty() {
        // When no config files exist, should return default config
        let path = PathBuf::from("/nonexistent/unique/path/file.py");
        let config = Config::from_discovered_files(&path);
        assert_eq!(config.line_length, 85);
        assert_eq!(config.indent, 4);
    }

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(
            config.validate().is_none(),
            "Default config should be valid"
        );
    }

    #[test]
    fn test_validate_indent_zero() {
        let config = Config {
            indent: 0,
            ..Default::default()
        };
        assert!(config.validate().is_some());
        assert!(config.validate().unwrap().contains("indent"));
    }

    #[test]
    fn test_validate_line_length_too_small() {
        let config = Config {
            line_length: 10,
            ..Default::default()
        };
        assert!(config.validate().is_some());
        assert!(config.validate().unwrap().contains("line_length"));
    }

    #[test]
    fn test_validate_line_length_too_large() {
        let config = Config {
            line_length: 5000,
            ..Default::default()
        };
        assert!(config.validate().is_some());
    }
}
