//! Renderable trait for composable code generation.
//!
//! Everything that ends up in a generated file (docstrings, blocks, whole
//! modules) renders to a sequence of lines with no leading indentation. The
//! enclosing construct indents a child's lines when it absorbs them.

/// Trait for types that can be rendered to lines of source code.
///
/// Only [`lines`](Renderable::lines) is required; every other reader is
/// derived from it and recomputed on each call.
pub trait Renderable {
    /// The rendered lines, without trailing newlines and without indentation
    /// beyond what nested children contributed.
    fn lines(&self) -> Vec<String>;

    /// Lines joined with `\n`, terminated by a single newline.
    fn text(&self) -> String {
        let mut text = self.lines().join("\n");
        text.push('\n');
        text
    }

    /// Number of lines in [`text`](Renderable::text).
    fn length(&self) -> usize {
        self.text().lines().count()
    }

    /// Whether any rendered line contains `needle`.
    fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }

    /// Whether both render to identical text.
    fn equals(&self, other: &dyn Renderable) -> bool {
        self.text() == other.text()
    }
}

/// Blanket implementation for references.
impl<T: Renderable + ?Sized> Renderable for &T {
    fn lines(&self) -> Vec<String> {
        (**self).lines()
    }
}

/// Blanket implementation for Box.
impl<T: Renderable + ?Sized> Renderable for Box<T> {
    fn lines(&self) -> Vec<String> {
        self.as_ref().lines()
    }
}

/// Split a possibly multi-line string into owned lines, keeping blank lines.
pub(crate) fn split_lines(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split('\n').map(str::to_string)
}
