//! Adapters for external source formatters.
//!
//! A formatter runs after a generated file has been flushed to disk and
//! rewrites it in place. Rendering never depends on what the formatter does.

use std::{path::Path, process::Command};

use tracing::{debug, trace};

use crate::{Error, Result};

/// Trait for tools that normalize a written source file in place.
pub trait Formatter {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    /// Rewrite the file at `path` in place.
    fn format_file(&self, path: &Path) -> Result<()>;
}

impl<T: Formatter + ?Sized> Formatter for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn format_file(&self, path: &Path) -> Result<()> {
        (**self).format_file(path)
    }
}

impl<T: Formatter + ?Sized> Formatter for Box<T> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn format_file(&self, path: &Path) -> Result<()> {
        self.as_ref().format_file(path)
    }
}

/// Formatter that leaves files untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFormatter;

impl Formatter for NoopFormatter {
    fn name(&self) -> &str {
        "noop"
    }

    fn format_file(&self, path: &Path) -> Result<()> {
        trace!(path = %path.display(), "formatter disabled, skipping");
        Ok(())
    }
}

/// Formatter backed by an external program.
///
/// Runs `<program> <args...> <path>` and expects the program to rewrite the
/// file in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `yapf --in-place <path>`
    pub fn yapf() -> Self {
        Self::new("yapf", ["--in-place"])
    }

    /// `black -q <path>`
    pub fn black() -> Self {
        Self::new("black", ["-q"])
    }

    /// `ruff format -q <path>`
    pub fn ruff() -> Self {
        Self::new("ruff", ["format", "-q"])
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Formatter for CommandFormatter {
    fn name(&self) -> &str {
        &self.program
    }

    fn format_file(&self, path: &Path) -> Result<()> {
        debug!(program = %self.program, path = %path.display(), "running formatter");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .output()
            .map_err(|e| {
                Box::new(Error::FormatterSpawn {
                    program: self.program.clone(),
                    source: e,
                })
            })?;

        if output.status.success() {
            trace!(program = %self.program, "formatter finished");
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!(program = %self.program, status = %output.status, "formatter failed");
            Err(Box::new(Error::FormatterFailed {
                program: self.program.clone(),
                path: path.to_path_buf(),
                status: output.status,
                stderr,
            }))
        }
    }
}
