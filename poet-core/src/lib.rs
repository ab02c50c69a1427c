//! Core utilities for the PyPoet code generator.
//!
//! This crate provides the error type, `poet.toml` configuration, file
//! emission and the external formatter adapters shared by `pypoet-codegen`.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod file;
mod format;

// Configuration
pub use config::{DEFAULT_EXTENSION, FormatterConfig, OutputConfig, PoetConfig};
// Errors
pub use error::{Error, Result, SourceContext};
// File operations
pub use file::{GeneratedFile, terminate, write_file};
// Formatter adapters
pub use format::{CommandFormatter, Formatter, NoopFormatter};
