//! Python that writes Python.
//!
//! Build a tree of statements, conditionals, loops, definitions and
//! docstrings, then render it to correctly indented source or write it out
//! as a module.
//!
//! # Module Organization
//!
//! - [`Renderable`] - Anything that renders to lines of code
//! - [`DocString`] - Google-style docstrings
//! - [`Block`], [`Kind`] - Nested scopes and the constructs that open them
//! - [`Module`] - A whole file, with emission to disk
//! - [`testing`] - Test utilities (feature-gated)
//!
//! # Example
//!
//! ```
//! use pypoet_codegen::{Block, DocString, Module, Renderable};
//!
//! let count = Block::define("count", ["cats"])
//!     .docstring(DocString::new("Count cats.").arg("cats").returns("int"))
//!     .returns("len(cats)");
//! let module = Module::new("cats").append(count);
//!
//! assert!(module.contains("def count(cats):"));
//! assert!(module.contains("    return len(cats)"));
//! ```

mod block;
mod decode;
mod docstring;
mod indent;
mod module;
mod renderable;

pub use block::{Block, DEFAULT_BASE, Kind, NO_ARGS};
pub use docstring::{DocString, QUOTES};
pub use indent::Indent;
pub use module::Module;
pub use pypoet_core::{
    CommandFormatter, Error, Formatter, NoopFormatter, PoetConfig, Result,
};
pub use renderable::Renderable;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
