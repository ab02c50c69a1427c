//! Test utilities for generated Python.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use eyre::{Result, eyre};

/// Error from compile checking.
#[derive(Debug)]
pub struct CompileError {
    pub message: String,
    pub output: String,
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n\nOutput:\n{}", self.message, self.output)
    }
}

impl std::error::Error for CompileError {}

/// Trait for verifying generated code compiles.
pub trait CompileChecker {
    /// Check that the given source files compile.
    fn check(&self, files: &[PathBuf]) -> Result<(), CompileError>;
}

/// Python compile checker using `python3 -m py_compile`.
pub struct PythonChecker;

impl PythonChecker {
    /// Whether a `python3` interpreter can be started.
    pub fn is_available() -> bool {
        Command::new("python3")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl CompileChecker for PythonChecker {
    fn check(&self, files: &[PathBuf]) -> Result<(), CompileError> {
        let output = Command::new("python3")
            .args(["-m", "py_compile"])
            .args(files)
            .output()
            .map_err(|e| CompileError {
                message: format!("Failed to run python3: {}", e),
                output: String::new(),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            Err(CompileError {
                message: "py_compile failed".to_string(),
                output: format!("stderr:\n{}\n\nstdout:\n{}", stderr, stdout),
            })
        }
    }
}

/// Assert that two strings are equal, with a nice diff on failure.
pub fn assert_content_eq(expected: &str, actual: &str) {
    if expected != actual {
        let expected_lines: Vec<&str> = expected.lines().collect();
        let actual_lines: Vec<&str> = actual.lines().collect();

        let mut diff = String::new();
        let max_lines = expected_lines.len().max(actual_lines.len());

        for i in 0..max_lines {
            let exp = expected_lines.get(i).copied().unwrap_or("<missing>");
            let act = actual_lines.get(i).copied().unwrap_or("<missing>");

            if exp != act {
                diff.push_str(&format!("Line {}:\n", i + 1));
                diff.push_str(&format!("  expected: {:?}\n", exp));
                diff.push_str(&format!("  actual:   {:?}\n", act));
            }
        }

        if diff.is_empty() {
            diff.push_str("trailing newlines differ\n");
        }

        panic!("Content mismatch:\n{}", diff);
    }
}

/// Generate files into a temporary directory and return it.
///
/// The directory will be cleaned up when the returned `TempDir` is dropped.
pub fn generate_to_temp<F>(generate: F) -> Result<tempfile::TempDir>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let temp_dir = tempfile::TempDir::new()?;
    generate(temp_dir.path())?;
    Ok(temp_dir)
}

/// Generate files into a temporary directory and check that every `.py`
/// file in it compiles.
pub fn assert_generates_valid_code<C>(
    generate: impl FnOnce(&Path) -> Result<()>,
    checker: &C,
) -> Result<()>
where
    C: CompileChecker,
{
    let temp_dir = generate_to_temp(generate)?;

    let files: Vec<PathBuf> = std::fs::read_dir(temp_dir.path())?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "py"))
        .collect();

    checker.check(&files).map_err(|e| {
        eprintln!("Generated files in {}:", temp_dir.path().display());
        for file in &files {
            eprintln!("  {}", file.display());
        }
        eyre!("Compile check failed: {}", e)
    })?;

    Ok(())
}
