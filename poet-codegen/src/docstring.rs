//! Python docstrings.

use std::fmt;

use crate::{Renderable, renderable::split_lines};

/// Delimiter opening and closing every docstring.
pub const QUOTES: &str = "\"\"\"";

/// A structured documentation string.
///
/// Renders in Google style:
///
/// ```text
/// """name
///
/// description
///
/// Args:
///     arg ():
///
/// Returns:
///     returns:
/// """
/// ```
///
/// Sections without content are omitted together with the blank line that
/// precedes them.
#[derive(Debug, Clone, Default)]
pub struct DocString {
    name: String,
    description: Option<String>,
    returns: Option<String>,
    args: Vec<String>,
}

impl DocString {
    /// Create a docstring with only a summary line.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = non_empty(description.into());
        self
    }

    pub fn returns(mut self, returns: impl Into<String>) -> Self {
        self.returns = non_empty(returns.into());
        self
    }

    /// Document one more argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Document several arguments, in order.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn returns_text(&self) -> Option<&str> {
        self.returns.as_deref()
    }

    pub fn arg_names(&self) -> &[String] {
        &self.args
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

impl Renderable for DocString {
    fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = split_lines(&format!("{}{}", QUOTES, self.name)).collect();

        if let Some(description) = &self.description {
            lines.push(String::new());
            lines.extend(split_lines(description));
        }

        if !self.args.is_empty() {
            lines.push(String::new());
            lines.push("Args:".to_string());
            lines.extend(self.args.iter().map(|arg| format!("    {} ():", arg)));
        }

        if let Some(returns) = &self.returns {
            lines.push(String::new());
            lines.push("Returns:".to_string());
            lines.push(format!("    {}:", returns));
        }

        lines.push(QUOTES.to_string());
        lines
    }
}

impl fmt::Display for DocString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl PartialEq for DocString {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for DocString {}
