//! Indentation for generated Python.

/// One level of indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent(&'static str);

impl Indent {
    /// 4-space indentation (PEP 8).
    pub const PYTHON: Self = Self("    ");

    /// The string representation for one indent level.
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Indent `line` by one level. Blank lines stay blank.
    pub fn apply(&self, line: &str) -> String {
        if line.is_empty() {
            String::new()
        } else {
            format!("{}{}", self.0, line)
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::PYTHON
    }
}
