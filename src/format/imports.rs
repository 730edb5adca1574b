//! Import grouping, sorting and relocation.
//!
//! Deduplicates import statements, classifies them as standard-library,
//! third-party or project imports, sorts each category, and reassembles
//! the file with all imports at the top in category blocks separated by
//! single blank lines.

use std::collections::{BTreeMap, HashSet};

use crate::parser::imports::{extract_module_name, parse_imports, ImportRecord};

/// Standard-library module names (prefix match).
const SYSTEM_MODULES: &[&str] = &[
    "os", "sys", "re", "json", "datetime", "time", "math", "random",
    "collections", "itertools", "functools", "pathlib", "typing",
    "urllib", "http", "socket", "threading", "multiprocessing",
    "subprocess", "logging", "traceback", "weakref", "copy",
    "pickle", "shelve", "sqlite3", "hashlib", "hmac", "base64",
    "zlib", "gzip", "bz2", "lzma", "zipfile", "tarfile",
    "shutil", "tempfile", "glob", "fnmatch", "linecache",
    "stat", "pwd", "grp", "crypt", "termios", "tty",
    "pty", "fcntl", "select", "signal",
    "atexit", "gc", "inspect", "ast", "dis", "pickletools",
    "profile", "pstats", "timeit", "trace", "tracemalloc",
    "asyncio", "concurrent", "contextlib", "abc", "enum",
    "dataclasses", "typing_extensions",
];

/// Well-known third-party module names (prefix match).
const EXTERNAL_MODULES: &[&str] = &[
    "django", "flask", "fastapi", "requests", "numpy", "pandas",
    "matplotlib", "seaborn", "scipy", "sklearn", "tensorflow",
    "torch", "pytorch", "opencv", "pillow", "selenium", "beautifulsoup",
    "lxml", "xml", "yaml", "toml", "configparser", "argparse",
    "click", "typer", "pydantic", "sqlalchemy", "psycopg2", "mysql",
    "redis", "celery", "kombu", "boto3", "azure", "google",
    "stripe", "paypal", "twilio", "sendgrid", "mailgun",
    "elasticsearch", "kafka", "rabbitmq", "pika", "aiohttp",
    "httpx", "websockets", "socketio", "jinja2", "mako",
    "markdown", "rst", "docutils", "sphinx", "pytest", "unittest",
    "mock", "factory_boy", "faker", "freezegun", "responses",
    "vcrpy", "coverage", "black", "flake8", "pylint", "mypy",
    "isort", "pre-commit", "tox", "pip", "setuptools", "wheel",
    "twine", "build", "poetry", "pipenv", "conda", "anaconda",
];

fn is_system_module(module_name: &str) -> bool {
    SYSTEM_MODULES.iter().any(|m| module_name.starts_with(m))
}

fn is_external_module(module_name: &str) -> bool {
    EXTERNAL_MODULES.iter().any(|m| module_name.starts_with(m))
}

/// Partition project imports into sub-groups keyed by the first path
/// segment of the module name, with keys and members sorted.
fn group_project_imports(project_imports: &[String]) -> Vec<Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for raw in project_imports {
        let module_name = extract_module_name(raw);
        let first_part = module_name.split('.').next().unwrap_or_default().to_string();
        groups.entry(first_part).or_default().push(raw.clone());
    }
    groups
        .into_values()
        .map(|mut members| {
            members.sort();
            members
        })
        .collect()
}

/// Group and sort import records into ordered category blocks.
///
/// Records are deduplicated by exact raw text (first occurrence wins),
/// classified by module name, and returned as the ordered blocks:
/// system, external, then one block per project sub-group. Empty
/// categories are omitted entirely.
#[must_use]
pub fn group_and_sort(records: &[ImportRecord]) -> Vec<Vec<String>> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut system_imports = Vec::new();
    let mut external_imports = Vec::new();
    let mut project_imports = Vec::new();

    for record in records {
        if !seen.insert(record.raw_text.as_str()) {
            continue;
        }
        if is_system_module(&record.module_name) {
            system_imports.push(record.raw_text.clone());
        } else if is_external_module(&record.module_name) {
            external_imports.push(record.raw_text.clone());
        } else {
            project_imports.push(record.raw_text.clone());
        }
    }

    system_imports.sort();
    external_imports.sort();
    project_imports.sort();

    let mut all_groups = Vec::new();
    if !system_imports.is_empty() {
        all_groups.push(system_imports);
    }
    if !external_imports.is_empty() {
        all_groups.push(external_imports);
    }
    all_groups.extend(group_project_imports(&project_imports));
    all_groups
}

/// Relocate all imports to the top of the file in grouped, sorted order.
///
/// Blocks are separated by exactly one blank line, with one blank line
/// after the final block; non-import lines follow in their original
/// relative order. Text with no imports is returned unchanged.
#[must_use]
pub fn format_imports(lines: &[String]) -> Vec<String> {
    let (records, non_import_lines) = parse_imports(lines);
    if records.is_empty() {
        return lines.to_vec();
    }

    let groups = group_and_sort(&records);

    let mut result = Vec::new();
    for (i, group) in groups.iter().enumerate() {
        for raw in group {
            // Multi-line imports carry embedded newlines
            for physical in raw.split('\n') {
                result.push(physical.to_string());
            }
        }
        if i < groups.len() - 1 {
            result.push(String::new());
        }
    }
    if !groups.is_empty() {
        result.push(String::new());
    }
    result.extend(non_import_lines);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_lines(text: &str) -> Vec<String> {
        text.split('\n').map(String::from).collect()
    }

    #[test]
    fn test_system_imports_sorted() {
        let lines = to_lines("import sys\nimport os\n\nx = 1");
        let result = format_imports(&lines);
        assert_eq!(result[0], "import os");
        assert_eq!(result[1], "import sys");
        assert_eq!(result[2], "");
    }

    #[test]
    fn test_categories_in_order_with_blank_separators() {
        let lines = to_lines("import myproject.utils\nimport django\nimport os");
        let result = format_imports(&lines);
        assert_eq!(
            result,
            vec![
                "import os",
                "",
                "import django",
                "",
                "import myproject.utils",
                "",
            ]
        );
    }

    #[test]
    fn test_empty_categories_omitted() {
        let lines = to_lines("import os\nimport sys");
        let result = format_imports(&lines);
        // One system block, no stray separators for missing categories
        assert_eq!(result, vec!["import os", "import sys", ""]);
    }

    #[test]
    fn test_duplicates_removed() {
        let lines = to_lines("import os\nimport os\nimport sys");
        let result = format_imports(&lines);
        assert_eq!(result, vec!["import os", "import sys", ""]);
    }

    #[test]
    fn test_project_subgroups_by_first_segment() {
        let lines = to_lines("import zebra.api\nimport alpha.core\nimport alpha.util");
        let result = format_imports(&lines);
        assert_eq!(
            result,
            vec![
                "import alpha.core",
                "import alpha.util",
                "",
                "import zebra.api",
                "",
            ]
        );
    }

    #[test]
    fn test_imports_relocated_above_code() {
        let lines = to_lines("x = 1\nimport os\ny = 2");
        let result = format_imports(&lines);
        assert_eq!(result, vec!["import os", "", "x = 1", "y = 2"]);
    }

    #[test]
    fn test_no_imports_returns_unchanged() {
        let lines = to_lines("x = 1\ny = 2");
        assert_eq!(format_imports(&lines), lines);
    }

    #[test]
    fn test_multiline_import_kept_intact() {
        let lines = to_lines("from mypkg import (\n    alpha,\n    beta,\n)\nx = 1");
        let result = format_imports(&lines);
        assert_eq!(result[0], "from mypkg import (");
        assert_eq!(result[1], "    alpha,");
        assert_eq!(result[2], "    beta,");
        assert_eq!(result[3], ")");
        assert_eq!(result[4], "");
        assert_eq!(result[5], "x = 1");
    }

    #[test]
    fn test_external_classification() {
        assert!(is_external_module("django"));
        assert!(is_external_module("numpy"));
        assert!(!is_external_module("myproject"));
    }

    #[test]
    fn test_system_classification_prefix_match() {
        assert!(is_system_module("os"));
        // Prefix matching is intentionally coarse
        assert!(is_system_module("os_custom"));
        assert!(!is_system_module("myproject"));
    }
}
