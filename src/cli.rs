//! Command-line interface for pyprettier.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Files or directories to process
    pub inputs: Vec<PathBuf>,

    /// Maximum line length
    pub line_length: Option<usize>,

    /// Continuation indent in spaces
    pub indent: Option<usize>,

    /// Lint instead of rewriting
    pub check: bool,

    /// Disable quote fixing
    pub no_quotes: bool,

    /// Disable import formatting
    pub no_imports: bool,

    /// Disable declaration spacing
    pub no_spacing: bool,

    /// Disable line wrapping
    pub no_wrap: bool,

    /// Output to stdout instead of in-place
    pub stdout: bool,

    /// Show diff without modifying files
    pub diff: bool,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Recursive directory processing
    pub recursive: bool,

    /// Exclude patterns for files/directories (glob patterns)
    pub exclude: Vec<String>,

    /// Custom Python file extensions (in addition to defaults)
    pub python_extensions: Vec<String>,

    /// Exclude files with more than this many lines
    pub exclude_max_lines: Option<usize>,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    pub jobs: Option<usize>,

    /// Enable debug output
    pub debug: bool,

    /// Silent mode (no output)
    pub silent: bool,
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("pyprettier")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Style linter and auto-formatter for Python source code")
        .arg(
            Arg::new("inputs")
                .help("Files or directories to process")
                .value_name("FILE")
                .num_args(1..)
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("line-length")
                .short('l')
                .long("line-length")
                .help("Maximum line length [default: 85]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("indent")
                .short('i')
                .long("indent")
                .help("Continuation indent in spaces [default: 4]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Lint files and report issues instead of rewriting")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-quotes")
                .long("no-quotes")
                .help("Disable quote style fixing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-imports")
                .long("no-imports")
                .help("Disable import grouping and relocation")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-spacing")
                .long("no-spacing")
                .help("Disable blank-line spacing around declarations")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-wrap")
                .long("no-wrap")
                .help("Disable long-line wrapping")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stdout")
                .short('s')
                .long("stdout")
                .help("Output to stdout instead of modifying files in-place")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("diff")
                .short('d')
                .long("diff")
                .help("Show formatted output without modifying files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Recursively process directories")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .help("Exclude files/directories matching pattern (glob syntax, can be repeated)")
                .value_name("PATTERN")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("ext")
                .long("ext")
                .help("Additional Python file extension (can be repeated, e.g., --ext pyx)")
                .value_name("EXT")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("exclude-max-lines")
                .short('m')
                .long("exclude-max-lines")
                .help("Exclude files with more than this many lines")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Number of parallel jobs (0=auto, 1=sequential)")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output (shows config and directive overrides)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .help("Silent mode (no output, for editor integration)")
                .action(ArgAction::SetTrue),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        line_length: matches.get_one::<usize>("line-length").copied(),
        indent: matches.get_one::<usize>("indent").copied(),
        check: matches.get_flag("check"),
        no_quotes: matches.get_flag("no-quotes"),
        no_imports: matches.get_flag("no-imports"),
        no_spacing: matches.get_flag("no-spacing"),
        no_wrap: matches.get_flag("no-wrap"),
        stdout: matches.get_flag("stdout"),
        diff: matches.get_flag("diff"),
        config: matches.get_one::<PathBuf>("config").cloned(),
        recursive: matches.get_flag("recursive"),
        exclude: matches
            .get_many::<String>("exclude")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        python_extensions: matches
            .get_many::<String>("ext")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        exclude_max_lines: matches.get_one::<usize>("exclude-max-lines").copied(),
        jobs: matches.get_one::<usize>("jobs").copied(),
        debug: matches.get_flag("debug"),
        silent: matches.get_flag("silent"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_builds() {
        let cmd = build_cli();
        // Just verify it builds without panic
        assert_eq!(cmd.get_name(), "pyprettier");
    }

    #[test]
    fn test_cli_defaults() {
        let cmd = build_cli();
        let matches = cmd.try_get_matches_from(vec!["pyprettier"]).unwrap();

        assert!(matches.get_many::<PathBuf>("inputs").is_none());
        assert!(!matches.get_flag("check"));
        assert!(!matches.get_flag("stdout"));
    }

    #[test]
    fn test_line_length_flag() {
        let args = parse_args_from(vec!["pyprettier", "-l", "100", "file.py"]);
        assert_eq!(args.line_length, Some(100));
    }

    #[test]
    fn test_pass_toggles_not_set() {
        let args = parse_args_from(vec!["pyprettier", "file.py"]);
        assert!(!args.no_quotes);
        assert!(!args.no_imports);
        assert!(!args.no_spacing);
        assert!(!args.no_wrap);
    }

    #[test]
    fn test_pass_toggles() {
        let args = parse_args_from(vec![
            "pyprettier",
            "--no-quotes",
            "--no-wrap",
            "file.py",
        ]);
        assert!(args.no_quotes);
        assert!(args.no_wrap);
        assert!(!args.no_imports);
    }

    #[test]
    fn test_check_flag() {
        let args = parse_args_from(vec!["pyprettier", "--check", "file.py"]);
        assert!(args.check);
    }

    #[test]
    fn test_exclude_multiple() {
        let args = parse_args_from(vec![
            "pyprettier",
            "-r",
            "-e",
            "*.pyc",
            "--exclude",
            "build*",
            "-e",
            "venv",
            "src/",
        ]);
        assert_eq!(args.exclude, vec!["*.pyc", "build*", "venv"]);
    }

    #[test]
    fn test_ext_multiple() {
        let args = parse_args_from(vec![
            "pyprettier",
            "-r",
            "--ext",
            "pyx",
            "--ext",
            "pxd",
            "src/",
        ]);
        assert_eq!(args.python_extensions, vec!["pyx", "pxd"]);
    }

    #[test]
    fn test_exclude_max_lines() {
        let args = parse_args_from(vec!["pyprettier", "-m", "1000", "file.py"]);
        assert_eq!(args.exclude_max_lines, Some(1000));
    }

    #[test]
    fn test_debug_flag() {
        let args = parse_args_from(vec!["pyprettier", "-D", "file.py"]);
        assert!(args.debug);
    }

    #[test]
    fn test_jobs_flag() {
        let args = parse_args_from(vec!["pyprettier", "-j", "2", "file.py"]);
        assert_eq!(args.jobs, Some(2));
    }
}
