//! Whole Python modules and their emission to disk.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use pypoet_core::{DEFAULT_EXTENSION, Formatter, GeneratedFile, PoetConfig, Result};
use tracing::debug;

use crate::{DocString, Renderable};

/// A generated Python file.
///
/// A module has no entry line and does not indent its children. It always
/// carries a docstring; [`Module::new`] synthesizes one from the name. Each
/// appended block is separated from what precedes it by a blank line.
///
/// Mutation requires `&mut`, so a module cannot be built from several
/// threads at once.
///
/// # Example
///
/// ```
/// use pypoet_codegen::{Block, Module, Renderable};
///
/// let module = Module::new("hello").append(Block::statement("print('Hello world!')"));
///
/// assert_eq!(module.text(), "\"\"\"hello\n\"\"\"\n\nprint('Hello world!')\n");
/// ```
#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    docstring: DocString,
    statements: Vec<String>,
}

impl Module {
    /// Create a module whose docstring summary is its own name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            docstring: DocString::new(name.clone()),
            name,
            statements: Vec::new(),
        }
    }

    /// Create a module with an explicit docstring.
    pub fn with_docstring(name: impl Into<String>, docstring: DocString) -> Self {
        Self::new(name).docstring(docstring)
    }

    /// Absorb a top-level block (mutable).
    pub fn push(&mut self, child: impl Renderable) -> &mut Self {
        self.statements.push(String::new());
        self.statements.extend(child.lines());
        self
    }

    /// Replace the module docstring (mutable).
    pub fn set_docstring(&mut self, docstring: DocString) -> &mut Self {
        self.docstring = docstring;
        self
    }

    /// Absorb a top-level block.
    pub fn append(mut self, child: impl Renderable) -> Self {
        self.push(child);
        self
    }

    /// Replace the module docstring.
    pub fn docstring(mut self, docstring: DocString) -> Self {
        self.set_docstring(docstring);
        self
    }

    /// Module name, also the output file stem.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Always empty: a module has no header line.
    pub fn entry_line(&self) -> &str {
        ""
    }

    pub fn docstring_ref(&self) -> &DocString {
        &self.docstring
    }

    /// Absorbed top-level lines, including the blank separators.
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// File name of this module for the given extension.
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.name, extension)
    }

    // =========================================================================
    // Emission
    // =========================================================================

    /// Write `<name>.py` into the current directory and run the default
    /// formatter (`yapf --in-place`) over it.
    pub fn write(&self) -> Result<PathBuf> {
        self.write_with(&PoetConfig::default())
    }

    /// Write according to `config`: its output directory, extension and
    /// formatter.
    pub fn write_with(&self, config: &PoetConfig) -> Result<PathBuf> {
        let file = ModuleFile {
            module: self,
            extension: &config.output.extension,
        };
        file.write(&config.output.directory, &config.formatter())
    }

    /// Write `<dir>/<name>.py` and run `formatter` over it.
    pub fn write_to(&self, dir: impl AsRef<Path>, formatter: &dyn Formatter) -> Result<PathBuf> {
        let file = ModuleFile {
            module: self,
            extension: DEFAULT_EXTENSION,
        };
        file.write(dir.as_ref(), formatter)
    }
}

struct ModuleFile<'a> {
    module: &'a Module,
    extension: &'a str,
}

impl GeneratedFile for ModuleFile<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.module.file_name(self.extension))
    }

    fn render(&self) -> String {
        debug!(module = %self.module.name, "rendering module");
        self.module.text()
    }
}

impl Renderable for Module {
    fn lines(&self) -> Vec<String> {
        let mut lines = self.docstring.lines();
        lines.extend(self.statements.iter().cloned());
        lines
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl PartialEq for Module {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Module {}
