//! Error types for ATV parsing and object restoration.
//!
//! ## Error Categories
//!
//! - **Lexical Errors**: malformed strings, bad escapes, unterminated comments
//! - **Syntax Errors**: a token that the grammar does not allow in the current state
//! - **Semantic Errors**: an interpreter rejected an event (unknown attribute, unknown type,
//!   failed conversion or downcast)
//! - **I/O Errors**: reading the source or writing the rendered text failed
//!
//! Every error that passes through a [`Parser`](crate::Parser) is also appended to its
//! diagnostics, see [`Parser::error_text`](crate::Parser::error_text).

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while lexing, parsing or restoring ATV text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed token
    #[error("Lexical error at line {line}: {msg}{context}")]
    Lexical {
        line: usize,
        msg: String,
        context: String,
    },

    /// Token not allowed by the grammar at this point
    #[error("Syntax error at line {line}: {msg}{context}")]
    Syntax {
        line: usize,
        msg: String,
        context: String,
    },

    /// An interpreter refused an event
    #[error("Semantic error at line {line}: {msg}{context}")]
    Semantic {
        line: usize,
        msg: String,
        context: String,
    },

    /// No prototype registered under the requested type name
    #[error("Unknown type '{type_name}' at line {line}")]
    UnknownType { line: usize, type_name: String },

    /// Event kind or restored object type differs from what the target needs
    #[error("Type mismatch at line {line}: expected {expected}, found {found}")]
    TypeMismatch {
        line: usize,
        expected: String,
        found: String,
    },

    /// A VALUE could not be converted into the target primitive
    #[error("Conversion error at line {line}: cannot read '{value}' as {expected} for attribute '{attribute}'")]
    Conversion {
        line: usize,
        attribute: String,
        value: String,
        expected: String,
    },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a lexical error; `context` is the offending source line, if any.
    pub fn lexical(line: usize, msg: &str, context: &str) -> Self {
        Error::Lexical {
            line,
            msg: msg.to_string(),
            context: format_context(context),
        }
    }

    /// Creates a syntax error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use atv::Error;
    ///
    /// let err = Error::syntax(10, "unexpected '}'", "");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, msg: &str, context: &str) -> Self {
        Error::Syntax {
            line,
            msg: msg.to_string(),
            context: format_context(context),
        }
    }

    /// Creates a semantic error, typically with the rejected ATV triple as context.
    pub fn semantic(line: usize, msg: &str, context: &str) -> Self {
        Error::Semantic {
            line,
            msg: msg.to_string(),
            context: format_context(context),
        }
    }

    pub fn unknown_type(line: usize, type_name: &str) -> Self {
        Error::UnknownType {
            line,
            type_name: type_name.to_string(),
        }
    }

    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use atv::Error;
    ///
    /// let err = Error::type_mismatch(5, "value", "group");
    /// assert!(err.to_string().contains("expected value"));
    /// ```
    pub fn type_mismatch(line: usize, expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            line,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn conversion(line: usize, attribute: &str, value: &str, expected: &str) -> Self {
        Error::Conversion {
            line,
            attribute: attribute.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Source line the error was detected on, when known.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Lexical { line, .. }
            | Error::Syntax { line, .. }
            | Error::Semantic { line, .. }
            | Error::UnknownType { line, .. }
            | Error::TypeMismatch { line, .. }
            | Error::Conversion { line, .. } => Some(*line),
            Error::Io(_) | Error::Custom(_) => None,
        }
    }
}

fn format_context(context: &str) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!("\n  near: {}", context)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
