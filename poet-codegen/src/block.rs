//! Nested scopes of generated code.

use std::fmt;

use crate::{DocString, Indent, Renderable, renderable::split_lines};

/// The construct a [`Block`] opens, with the parameters its entry line is
/// built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// A raw statement, rendered unchanged.
    Statement(String),
    /// `if <expr>:`
    If { expr: String },
    /// `elif <expr>:`
    ElIf { expr: String },
    /// `else:`
    Else,
    /// `for <index> in <iterable>:`
    ForLoop { index: String, iterable: String },
    /// `while <expr>:`
    WhileLoop { expr: String },
    /// `def <name>(<params>):`
    Define { name: String, params: Vec<String> },
    /// `class <name>(<bases>):`
    Class { name: String, bases: Vec<String> },
}

/// Base used by [`Kind::Class`] when no bases are given.
pub const DEFAULT_BASE: &str = "object";

/// An empty parameter or base list, for [`Block::define`] and [`Block::class`].
pub const NO_ARGS: [&str; 0] = [];

impl Kind {
    /// The header line introducing this construct's scope.
    pub fn entry_line(&self) -> String {
        match self {
            Self::Statement(text) => text.clone(),
            Self::If { expr } => format!("if {}:", expr),
            Self::ElIf { expr } => format!("elif {}:", expr),
            Self::Else => "else:".to_string(),
            Self::ForLoop { index, iterable } => format!("for {} in {}:", index, iterable),
            Self::WhileLoop { expr } => format!("while {}:", expr),
            Self::Define { name, params } => format!("def {}({}):", name, params.join(", ")),
            Self::Class { name, bases } => format!("class {}({}):", name, bases.join(", ")),
        }
    }
}

/// A composable unit of generated code: an entry line, an optional
/// docstring, ordered children and an optional return line.
///
/// Children are absorbed when appended: their rendered lines are copied in,
/// indented one level. A block therefore never shares a child with another
/// parent, and later changes to a child value do not affect the parent.
///
/// # Example
///
/// ```
/// use pypoet_codegen::{Block, Renderable};
///
/// let body = Block::if_("x > 0").append(Block::statement("x -= 1"));
/// let func = Block::define("step", ["x"]).append(body).returns("x");
///
/// assert_eq!(
///     func.text(),
///     "def step(x):\n    if x > 0:\n        x -= 1\n    return x\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Block {
    kind: Kind,
    docstring: Option<DocString>,
    statements: Vec<String>,
    return_line: Option<String>,
}

impl Block {
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            docstring: None,
            statements: Vec::new(),
            return_line: None,
        }
    }

    /// A raw statement such as `x = 1`.
    pub fn statement(text: impl Into<String>) -> Self {
        Self::new(Kind::Statement(text.into()))
    }

    pub fn if_(expr: impl Into<String>) -> Self {
        Self::new(Kind::If { expr: expr.into() })
    }

    pub fn elif(expr: impl Into<String>) -> Self {
        Self::new(Kind::ElIf { expr: expr.into() })
    }

    pub fn else_() -> Self {
        Self::new(Kind::Else)
    }

    pub fn for_loop(index: impl Into<String>, iterable: impl Into<String>) -> Self {
        Self::new(Kind::ForLoop {
            index: index.into(),
            iterable: iterable.into(),
        })
    }

    pub fn while_loop(expr: impl Into<String>) -> Self {
        Self::new(Kind::WhileLoop { expr: expr.into() })
    }

    /// A function or method definition.
    pub fn define(
        name: impl Into<String>,
        params: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(Kind::Define {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
        })
    }

    /// A class definition. An empty `bases` renders as `(object)`.
    pub fn class(
        name: impl Into<String>,
        bases: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut bases: Vec<String> = bases.into_iter().map(Into::into).collect();
        if bases.is_empty() {
            bases.push(DEFAULT_BASE.to_string());
        }
        Self::new(Kind::Class {
            name: name.into(),
            bases,
        })
    }

    // =========================================================================
    // Mutable API
    // =========================================================================

    /// Absorb `child`, indenting its lines one level (mutable).
    pub fn push(&mut self, child: impl Renderable) -> &mut Self {
        self.statements
            .extend(child.lines().iter().map(|line| Indent::PYTHON.apply(line)));
        self
    }

    /// Attach a docstring, replacing any previous one (mutable).
    pub fn set_docstring(&mut self, docstring: DocString) -> &mut Self {
        self.docstring = Some(docstring);
        self
    }

    /// Set the return line to `return <expr>` (mutable).
    ///
    /// Only function definitions make sense of it; other blocks render it
    /// all the same.
    pub fn set_returns(&mut self, expr: impl Into<String>) -> &mut Self {
        self.return_line = Some(format!("return {}", expr.into()));
        self
    }

    // =========================================================================
    // Consuming API
    // =========================================================================

    /// Absorb `child`, indenting its lines one level.
    pub fn append(mut self, child: impl Renderable) -> Self {
        self.push(child);
        self
    }

    /// Attach a docstring, replacing any previous one.
    pub fn docstring(mut self, docstring: DocString) -> Self {
        self.set_docstring(docstring);
        self
    }

    /// Set the return line to `return <expr>`.
    pub fn returns(mut self, expr: impl Into<String>) -> Self {
        self.set_returns(expr);
        self
    }

    // =========================================================================
    // Readers
    // =========================================================================

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn entry_line(&self) -> String {
        self.kind.entry_line()
    }

    pub fn docstring_ref(&self) -> Option<&DocString> {
        self.docstring.as_ref()
    }

    /// Absorbed child lines, already indented.
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn return_line(&self) -> Option<&str> {
        self.return_line.as_deref()
    }
}

impl Renderable for Block {
    fn lines(&self) -> Vec<String> {
        let indent = Indent::PYTHON;
        let mut lines: Vec<String> = split_lines(&self.entry_line()).collect();

        if let Some(docstring) = &self.docstring {
            lines.extend(docstring.lines().iter().map(|line| indent.apply(line)));
        }
        lines.extend(self.statements.iter().cloned());
        if let Some(ret) = &self.return_line {
            lines.push(indent.apply(ret));
        }
        lines
    }
}

impl From<Kind> for Block {
    fn from(kind: Kind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Block {}
