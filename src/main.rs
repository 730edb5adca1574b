//! pyprettier - Style linter and auto-formatter for Python source code

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs::File;
use std::io::{self, BufReader, Cursor, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use glob::Pattern;
use pyprettier::{
    find_directive, format_text, lint_text, parse_args, CliArgs, Config, Issue, Result,
};
use rayon::prelude::*;
use walkdir::WalkDir;

/// Python file extensions to process
const PYTHON_EXTENSIONS: &[&str] = &["py", "pyi", "pyw"];

/// Default maximum file size in bytes (100 MB)
/// Files larger than this are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = parse_args();

    // Check if we should read from stdin
    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    // If no inputs and running interactively, print usage; otherwise read from stdin
    if args.inputs.is_empty() && io::stdin().is_terminal() {
        print_usage();
        return Ok(());
    }

    if use_stdin {
        // Process stdin - use current directory for config discovery
        let config = build_config(&args, None)?;
        let issues = process_stdin(&config, &args)?;
        if args.check && issues > 0 {
            std::process::exit(1);
        }
        return Ok(());
    }

    // Build base configuration for parallel processing
    // For explicit config files, we use one config for all files
    // For auto-discovery, each file may have its own config
    let use_per_file_config = args.config.is_none();
    let base_config = if use_per_file_config {
        None
    } else {
        Some(build_config(&args, None)?)
    };

    // Configure thread pool if --jobs specified
    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                eprintln!("Warning: failed to configure thread pool: {e}");
            }
        }
    }

    // Collect all files to process
    let files = collect_files(&args);

    if files.is_empty() {
        if !args.silent {
            eprintln!("No Python files found to process.");
        }
        return Ok(());
    }

    // Process files. Check mode and stdout output print to the terminal,
    // so keep them sequential for deterministic output ordering.
    let use_sequential = args.stdout || args.check || args.jobs == Some(1);
    let total_issues = if use_sequential {
        process_files_sequential(&files, base_config.as_ref(), &args)
    } else {
        process_files_parallel(&files, base_config.as_ref(), &args)
    };

    if args.check && total_issues > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        // Explicit config file specified
        if args.debug {
            eprintln!(
                "[DEBUG] Using explicit config file: {}",
                config_path.display()
            );
        }
        Config::from_toml_file(config_path)?
    } else if let Some(path) = for_path {
        // Auto-discover config files from parent directories
        if args.debug {
            let discovered = Config::discover_config_files(path);
            if discovered.is_empty() {
                eprintln!("[DEBUG] No config files discovered for: {}", path.display());
            } else {
                eprintln!("[DEBUG] Discovered config files for {}:", path.display());
                for f in &discovered {
                    eprintln!("[DEBUG]   - {}", f.display());
                }
            }
        }
        Config::from_discovered_files(path)
    } else {
        // No path provided, use current directory for discovery
        Config::from_discovered_files(&std::env::current_dir().unwrap_or_default())
    };

    // Override with CLI arguments
    if let Some(line_length) = args.line_length {
        config.line_length = line_length;
    }
    if let Some(indent) = args.indent {
        config.indent = indent;
    }
    if args.no_quotes {
        config.fix_quotes = false;
    }
    if args.no_imports {
        config.format_imports = false;
    }
    if args.no_spacing {
        config.fix_spacing = false;
    }
    if args.no_wrap {
        config.wrap_lines = false;
    }

    // Print final config in debug mode
    if args.debug {
        print_config_debug(&config);
    }

    // Validate configuration
    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Print configuration values in debug mode
fn print_config_debug(config: &Config) {
    eprintln!("[DEBUG] Configuration:");
    eprintln!("[DEBUG]   line_length: {}", config.line_length);
    eprintln!("[DEBUG]   indent: {}", config.indent);
    eprintln!("[DEBUG]   fix_quotes: {}", config.fix_quotes);
    eprintln!("[DEBUG]   format_imports: {}", config.format_imports);
    eprintln!("[DEBUG]   fix_spacing: {}", config.fix_spacing);
    eprintln!("[DEBUG]   wrap_lines: {}", config.wrap_lines);
}

/// Collect all files to process, handling directories and recursive flag
fn collect_files(args: &CliArgs) -> Vec<PathBuf> {
    // Compile exclude patterns
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    // Get custom Python extensions
    let custom_extensions = &args.python_extensions;

    let mut files = Vec::new();

    for input in &args.inputs {
        if input.is_file() {
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            if args.recursive {
                // Recursive directory traversal
                // Note: WalkDir detects symlink loops when follow_links(true) and
                // returns errors for them. We skip errors via filter_map(ok).
                // max_depth prevents runaway traversal in pathological directory structures.
                for entry in WalkDir::new(input)
                    .follow_links(true)
                    .max_depth(256)
                    .into_iter()
                    .filter_map(std::result::Result::ok)
                {
                    let path = entry.path();
                    if path.is_file()
                        && is_python_file(path, custom_extensions)
                        && !is_excluded(path, &exclude_patterns)
                    {
                        files.push(path.to_path_buf());
                    }
                }
            } else {
                // Non-recursive: only direct children
                if let Ok(entries) = std::fs::read_dir(input) {
                    for entry in entries.filter_map(std::result::Result::ok) {
                        let path = entry.path();
                        if path.is_file()
                            && is_python_file(&path, custom_extensions)
                            && !is_excluded(&path, &exclude_patterns)
                        {
                            files.push(path);
                        }
                    }
                }
            }
        }
    }

    files
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    for pattern in patterns {
        // Match against full path
        if pattern.matches(&path_str) {
            return true;
        }

        // Match against file name only
        if let Some(file_name) = path.file_name() {
            if pattern.matches(&file_name.to_string_lossy()) {
                return true;
            }
        }

        // Match against each path component (for directory patterns)
        for component in path.components() {
            if let std::path::Component::Normal(c) = component {
                if pattern.matches(&c.to_string_lossy()) {
                    return true;
                }
            }
        }
    }

    false
}

/// Count the number of lines in a byte buffer
#[allow(clippy::naive_bytecount)] // Simple use case, no need for bytecount crate
fn count_lines(contents: &[u8]) -> usize {
    // Count newlines; add 1 if file doesn't end with newline and has content
    let newlines = contents.iter().filter(|&&b| b == b'\n').count();
    if contents.is_empty() {
        0
    } else if contents.last() == Some(&b'\n') {
        newlines
    } else {
        newlines + 1
    }
}

/// Check if a file has a Python extension
/// Checks against both default extensions and any custom extensions provided
fn is_python_file(path: &Path, custom_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            // Check default extensions
            if PYTHON_EXTENSIONS.contains(&ext) {
                return true;
            }
            // Check custom extensions (with or without leading dot)
            for custom in custom_extensions {
                let custom_ext = custom.strip_prefix('.').unwrap_or(custom);
                if ext == custom_ext {
                    return true;
                }
            }
            false
        })
}

/// Process files sequentially (for check mode and stdout output)
///
/// Returns the total number of lint issues found.
fn process_files_sequential(
    files: &[PathBuf],
    base_config: Option<&Config>,
    args: &CliArgs,
) -> usize {
    let mut total_issues = 0;
    let mut checked_files = 0;

    for path in files {
        // Use base config if provided, otherwise discover per-file config
        let file_result = if let Some(config) = base_config {
            process_single_file(path, config, args)
        } else {
            match build_config(args, Some(path)) {
                Ok(config) => process_single_file(path, &config, args),
                Err(e) => Err(e),
            }
        };

        match file_result {
            Ok(issues) => {
                total_issues += issues;
                checked_files += 1;
            }
            Err(e) => eprintln!("Error processing {}: {}", path.display(), e),
        }
    }

    if args.check && !args.silent {
        eprintln!("Found {total_issues} warnings in {checked_files} files.");
    }

    total_issues
}

/// Process files in parallel using Rayon
///
/// Returns the total number of lint issues found.
fn process_files_parallel(files: &[PathBuf], base_config: Option<&Config>, args: &CliArgs) -> usize {
    let success_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);
    let issue_count = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        // Use base config if provided, otherwise discover per-file config
        let file_result = if let Some(config) = base_config {
            process_single_file(path, config, args)
        } else {
            match build_config(args, Some(path)) {
                Ok(config) => process_single_file(path, &config, args),
                Err(e) => Err(e),
            }
        };

        match file_result {
            Ok(issues) => {
                success_count.fetch_add(1, Ordering::Relaxed);
                issue_count.fetch_add(issues, Ordering::Relaxed);
            }
            Err(e) => {
                error_count.fetch_add(1, Ordering::Relaxed);
                eprintln!("Error processing {}: {}", path.display(), e);
            }
        }
    });

    let success = success_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);

    if !args.silent {
        if errors == 0 {
            eprintln!("Formatted {success} files successfully.");
        } else {
            eprintln!("Formatted {success} files, {errors} errors.");
        }
    }

    issue_count.load(Ordering::Relaxed)
}

/// Apply directive overrides from file contents to a configuration
fn apply_directive_overrides(config: &mut Config, contents: &[u8], debug: bool, source_name: &str) {
    let cursor = Cursor::new(contents);
    if let Some(overrides) = find_directive(&mut BufReader::new(cursor)) {
        if debug {
            eprintln!("[DEBUG] Found file directive in {source_name}");
        }
        if let Some(line_length) = overrides.line_length {
            if debug {
                eprintln!("[DEBUG]   Directive override: line_length = {line_length}");
            }
            config.line_length = line_length;
        }
        if let Some(indent) = overrides.indent {
            if debug {
                eprintln!("[DEBUG]   Directive override: indent = {indent}");
            }
            config.indent = indent;
        }
        if let Some(fix_quotes) = overrides.fix_quotes {
            if debug {
                eprintln!("[DEBUG]   Directive override: fix_quotes = {fix_quotes}");
            }
            config.fix_quotes = fix_quotes;
        }
        if let Some(format_imports) = overrides.format_imports {
            if debug {
                eprintln!("[DEBUG]   Directive override: format_imports = {format_imports}");
            }
            config.format_imports = format_imports;
        }
        if let Some(fix_spacing) = overrides.fix_spacing {
            if debug {
                eprintln!("[DEBUG]   Directive override: fix_spacing = {fix_spacing}");
            }
            config.fix_spacing = fix_spacing;
        }
        if let Some(wrap_lines) = overrides.wrap_lines {
            if debug {
                eprintln!("[DEBUG]   Directive override: wrap_lines = {wrap_lines}");
            }
            config.wrap_lines = wrap_lines;
        }
    }
}

/// Print lint issues for one file in `path:line:col: code message` form
fn print_issues(path: &Path, issues: &[Issue]) {
    for issue in issues {
        println!(
            "{}:{}:{}: {} {}",
            path.display(),
            issue.line,
            issue.col_start + 1,
            issue.code,
            issue.message
        );
    }
}

/// Process a single file
///
/// Returns the number of lint issues found (always 0 in format mode).
fn process_single_file(path: &PathBuf, config: &Config, args: &CliArgs) -> Result<usize> {
    // Check file size BEFORE reading to prevent memory exhaustion
    let metadata = std::fs::metadata(path)?;
    let file_size = metadata.len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        if !args.silent {
            let size_mb = file_size / (1024 * 1024);
            let limit_mb = DEFAULT_MAX_FILE_SIZE / (1024 * 1024);
            eprintln!(
                "Skipping {} ({} MB exceeds limit of {} MB)",
                path.display(),
                size_mb,
                limit_mb
            );
        }
        return Ok(0);
    }

    // Read input file into memory
    let mut file_contents = Vec::new();
    File::open(path)?.read_to_end(&mut file_contents)?;

    // Check line count limit if specified
    if let Some(max_lines) = args.exclude_max_lines {
        let line_count = count_lines(&file_contents);
        if line_count > max_lines {
            if !args.silent {
                eprintln!(
                    "Skipping {} ({} lines exceeds limit of {})",
                    path.display(),
                    line_count,
                    max_lines
                );
            }
            return Ok(0);
        }
    }

    // Make a per-file copy of config that can be overridden by directives
    let mut file_config = config.clone();
    apply_directive_overrides(
        &mut file_config,
        &file_contents,
        args.debug,
        path.to_str().unwrap_or("unknown"),
    );

    let text = String::from_utf8_lossy(&file_contents);

    // Check mode: lint and report
    if args.check {
        let issues = lint_text(&text, &file_config);
        print_issues(path, &issues);
        return Ok(issues.len());
    }

    if !args.silent && !args.stdout {
        eprintln!("Formatting: {}", path.display());
    }

    // Format the file
    let formatted = format_text(&text, &file_config);

    // Output results
    if args.stdout {
        io::stdout().write_all(formatted.as_bytes())?;
    } else if args.diff {
        // Show diff (basic: just show formatted output)
        if !args.silent {
            println!("=== {} ===", path.display());
        }
        io::stdout().write_all(formatted.as_bytes())?;
    } else if formatted != text {
        // Write back to file (in-place), only when something changed
        std::fs::write(path, formatted.as_bytes())?;
    }

    Ok(0)
}

/// Process input from stdin, output to stdout
///
/// Returns the number of lint issues found in check mode.
fn process_stdin(config: &Config, args: &CliArgs) -> Result<usize> {
    // Read all input from stdin
    let mut stdin_contents = Vec::new();
    io::stdin().read_to_end(&mut stdin_contents)?;

    // Check size after reading to prevent processing extremely large input
    #[allow(clippy::cast_possible_truncation)]
    let stdin_size = stdin_contents.len() as u64;
    if stdin_size > DEFAULT_MAX_FILE_SIZE {
        anyhow::bail!(
            "stdin input too large ({} MB exceeds limit of {} MB)",
            stdin_size / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
    }

    // Make a copy of config that can be overridden by directives
    let mut file_config = config.clone();
    apply_directive_overrides(&mut file_config, &stdin_contents, args.debug, "stdin");

    let text = String::from_utf8_lossy(&stdin_contents);

    if args.check {
        let issues = lint_text(&text, &file_config);
        print_issues(Path::new("stdin"), &issues);
        if !args.silent {
            eprintln!("Found {} warnings.", issues.len());
        }
        return Ok(issues.len());
    }

    // Format the input and write to stdout
    let formatted = format_text(&text, &file_config);
    io::stdout().write_all(formatted.as_bytes())?;

    Ok(0)
}

fn print_usage() {
    println!(
        "pyprettier v{} - Python style linter and formatter",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("A fast Python style fixer written in Rust.");
    println!();
    println!("Usage:");
    println!("  pyprettier [OPTIONS] <FILE>...");
    println!("  pyprettier [OPTIONS] -r <DIRECTORY>");
    println!("  pyprettier [OPTIONS] -              # Read from stdin");
    println!("  cat file.py | pyprettier            # Pipe input");
    println!();
    println!("Examples:");
    println!("  pyprettier file.py              # Format single file in-place");
    println!("  pyprettier *.py                 # Format multiple files");
    println!("  pyprettier -r src/              # Recursively format directory");
    println!("  pyprettier --check src/ -r      # Lint without rewriting");
    println!("  pyprettier --stdout file.py     # Output to stdout");
    println!("  pyprettier -l 100 file.py       # Use 100-column limit");
    println!("  pyprettier - < file.py          # Read from stdin, write to stdout");
    println!();
    println!("Options:");
    println!("  -l, --line-length <NUM>         Max line length [default: 85]");
    println!("  -i, --indent <NUM>              Continuation indent [default: 4]");
    println!("      --check                     Report issues instead of rewriting");
    println!("  -r, --recursive                 Process directories recursively");
    println!("  -e, --exclude <PATTERN>         Exclude files/dirs matching pattern (repeatable)");
    println!("      --ext <EXT>                 Additional Python extension (repeatable)");
    println!("  -m, --exclude-max-lines <NUM>   Skip files with more than NUM lines");
    println!("  -j, --jobs <NUM>                Parallel jobs (0=auto, 1=sequential)");
    println!("      --no-quotes                 Disable quote style fixing");
    println!("      --no-imports                Disable import grouping/relocation");
    println!("      --no-spacing                Disable declaration spacing");
    println!("      --no-wrap                   Disable long-line wrapping");
    println!("  -s, --stdout                    Output to stdout");
    println!("  -d, --diff                      Show formatted output without writing");
    println!("  -c, --config <FILE>             Config file path (overrides auto-discovery)");
    println!("  -D, --debug                     Enable debug output");
    println!("  -S, --silent                    Silent mode");
    println!("  -h, --help                      Print help");
    println!();
    println!("Supported extensions: .py, .pyi, .pyw");
    println!();
    println!("Config file auto-discovery:");
    println!("  Searches for pyprettier.toml in parent directories");
    println!("  starting from the file being processed up to the root directory.");
    println!("  Also checks pyprettier.toml in the home directory.");
    println!("  More specific configs (closer to file) override less specific ones.");
    println!();
    println!("In-file overrides:");
    println!("  # pyprettier: --line-length 100 --no-imports");
}
