//! CI validation tests for println! usage
//!
//! Library code reports through the `log` facade; only the CLI command
//! implementations write to the terminal directly.

use std::fs;
use std::path::Path;

fn rust_files(dir: &Path, files: &mut Vec<std::path::PathBuf>) {
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                rust_files(&path, files);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            }
        }
    }
}

/// Lines outside `#[cfg(test)]` modules that print directly
fn print_lines(content: &str) -> Vec<usize> {
    content
        .lines()
        .take_while(|line| !line.contains("#[cfg(test)]"))
        .enumerate()
        .filter(|(_, line)| {
            (line.contains("println!") || line.contains("eprintln!"))
                && !line.trim_start().starts_with("//")
        })
        .map(|(n, _)| n + 1)
        .collect()
}

/// Test that library modules don't contain println! or eprintln! statements
#[test]
fn test_no_println_in_library_modules() {
    let library_dirs = [
        "src/services",
        "src/storage",
        "src/models",
        "src/config",
        "src/errors",
        "src/utils",
    ];

    for dir in &library_dirs {
        let mut files = Vec::new();
        rust_files(Path::new(dir), &mut files);

        for file_path in files {
            let content = fs::read_to_string(&file_path)
                .unwrap_or_else(|_| panic!("Failed to read {}", file_path.display()));
            let lines = print_lines(&content);
            if !lines.is_empty() {
                panic!(
                    "Found println!/eprintln! in library file {}: lines {:?}\n\
                     Use the log macros instead.",
                    file_path.display(),
                    lines
                );
            }
        }
    }
}

/// Test that the CLI entry point initializes logging
#[test]
fn test_cli_initializes_logging() {
    let file_path = "src/cli/mod.rs";
    if Path::new(file_path).exists() {
        let content = fs::read_to_string(file_path)
            .unwrap_or_else(|_| panic!("Failed to read {}", file_path));
        assert!(
            content.contains("init_cli_logging") && content.contains("init_structured_logging"),
            "File {} should initialize logging but doesn't appear to",
            file_path
        );
    }
}

/// Test that CLI args support logging configuration
#[test]
fn test_cli_logging_arguments() {
    use boardsync::cli::args::Cli;
    use clap::Parser;

    let cli = Cli::try_parse_from(["boardsync", "boards", "-v"]).expect("Should parse verbose flag");
    assert_eq!(cli.verbose, 1);

    let cli = Cli::try_parse_from(["boardsync", "--quiet", "status"]).expect("Should parse quiet flag");
    assert!(cli.quiet);

    let cli = Cli::try_parse_from(["boardsync", "-vv", "watch"])
        .expect("Should parse multiple verbose flags");
    assert_eq!(cli.verbose, 2);

    let cli = Cli::try_parse_from(["boardsync", "watch", "--log-file", "/tmp/boardsync.log"])
        .expect("Should parse log file");
    assert!(cli.log_file.is_some());
}
