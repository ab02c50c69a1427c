use std::{path::PathBuf, process::ExitStatus};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for pypoet operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
///
/// # Example
///
/// ```ignore
/// let ctx = SourceContext::new(content, "poet.toml");
/// ctx.validation_error("missing required field");
/// ```
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error prefixed with the filename.
    pub fn validation_error(&self, message: impl Into<String>) -> Box<Error> {
        Error::validation(format!("{}: {}", self.filename, message.into()))
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to access '{path}'")]
    #[diagnostic(code(pypoet::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML")]
    #[diagnostic(code(pypoet::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("'{field}' must be a docstring, found {found}")]
    #[diagnostic(
        code(pypoet::invalid_docstring_type),
        help("a docstring is a table with a string 'name' and optional 'description', 'args' and 'returns'")
    )]
    InvalidDocStringType { field: String, found: String },

    #[error("'{field}' must be a block, found {found}")]
    #[diagnostic(
        code(pypoet::invalid_child_type),
        help("every body entry is a table with a string 'kind'")
    )]
    InvalidChildType { field: String, found: String },

    #[error("block kind '{kind}' has no entry line")]
    #[diagnostic(
        code(pypoet::not_implemented),
        help("use one of: statement, if, elif, else, for, while, define, class")
    )]
    NotImplemented { kind: String },

    #[error("failed to run formatter '{program}'")]
    #[diagnostic(
        code(pypoet::formatter_spawn),
        help("install '{program}' or disable the formatter in poet.toml")
    )]
    FormatterSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("formatter '{program}' failed on '{path}' ({status})")]
    #[diagnostic(code(pypoet::formatter_failed), help("{stderr}"))]
    FormatterFailed {
        program: String,
        path: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("{message}")]
    #[diagnostic(code(pypoet::validation_error))]
    Validation { message: String },
}

impl Error {
    /// Create an I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }

    /// Create a validation error without source context.
    pub fn validation(message: impl Into<String>) -> Box<Self> {
        Box::new(Error::Validation {
            message: message.into(),
        })
    }

    /// Create a docstring contract error for the given field path.
    pub fn invalid_docstring(field: impl Into<String>, found: impl Into<String>) -> Box<Self> {
        Box::new(Error::InvalidDocStringType {
            field: field.into(),
            found: found.into(),
        })
    }

    /// Create a child contract error for the given field path.
    pub fn invalid_child(field: impl Into<String>, found: impl Into<String>) -> Box<Self> {
        Box::new(Error::InvalidChildType {
            field: field.into(),
            found: found.into(),
        })
    }

    /// Create an error for a block kind without an entry line.
    pub fn not_implemented(kind: impl Into<String>) -> Box<Self> {
        Box::new(Error::NotImplemented { kind: kind.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_carries_span() {
        let ctx = SourceContext::new("[output\n", "poet.toml");
        let toml_err = toml::from_str::<toml::Table>(ctx.src()).unwrap_err();
        let err = ctx.parse_error(toml_err);
        match *err {
            Error::Parse { span, .. } => assert!(span.is_some()),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn test_error_messages() {
        let err = Error::invalid_docstring("body[0].docstring", "string");
        assert_eq!(
            err.to_string(),
            "'body[0].docstring' must be a docstring, found string"
        );

        let err = Error::not_implemented("block");
        assert_eq!(err.to_string(), "block kind 'block' has no entry line");
    }

    #[test]
    fn test_validation_error_with_context() {
        let ctx = SourceContext::new("", "poet.toml");
        let err = ctx.validation_error("formatter command is empty");
        assert_eq!(err.to_string(), "poet.toml: formatter command is empty");
    }
}
