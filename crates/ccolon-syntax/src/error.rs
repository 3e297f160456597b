//! Error handling types shared by every stage of the C-colon toolchain.
//!
//! Lexing, parsing and evaluation all report failures through the same
//! [`Error`] struct. An error carries the stage that raised it
//! ([`ErrorKind`]), a message, and an optional source position. Every error
//! is fatal: the pipeline stops at the first one and no partial result is
//! delivered.
//!
//! # Examples
//!
//! ```rust
//! use ccolon_syntax::error::{Error, ErrorKind, Result, error};
//!
//! fn checked(n: i64) -> Result<i64> {
//!     if n < 0 {
//!         error("negative input")
//!     } else {
//!         Ok(n)
//!     }
//! }
//!
//! let err = checked(-1).unwrap_err();
//! assert_eq!(err.kind, ErrorKind::Evaluation);
//!
//! let located = Error::parse_at("Expected OP '='", 3, 9);
//! assert_eq!(located.to_string(), "Expected OP '=' at 3:9");
//! ```

use std::fmt;

/// The stage that raised an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unrecognised character or unterminated literal/comment.
    Lex,
    /// Token stream does not match the grammar.
    Parse,
    /// Failure while evaluating the AST.
    Evaluation,
    /// Integer division with a zero divisor.
    Division,
}

impl ErrorKind {
    /// Label used when reporting the error to a user.
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Lex => "Lex error",
            ErrorKind::Parse => "Parse error",
            ErrorKind::Evaluation | ErrorKind::Division => "Runtime error",
        }
    }
}

/// An error that occurred during C-colon processing.
///
/// # Fields
///
/// - `kind`: which stage failed
/// - `msg`: human-readable description
/// - `line`: optional 1-based line number in the source file
/// - `col`: optional 1-based column number in the source file
///
/// Errors raised by the lexer and parser always carry a position; evaluation
/// errors do not, since the AST is position-free.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// Stage that raised the error
    pub kind: ErrorKind,

    /// Human-readable error message
    pub msg: String,

    /// Optional line number in source file (1-based)
    pub line: Option<usize>,

    /// Optional column number in source file (1-based)
    pub col: Option<usize>,
}

impl Error {
    /// Creates an error of the given kind without a source location.
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            msg: msg.into(),
            line: None,
            col: None,
        }
    }

    /// Creates an error of the given kind at a 1-based line and column.
    pub fn with_span(kind: ErrorKind, msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            kind,
            msg: msg.into(),
            line: Some(line),
            col: Some(col),
        }
    }

    pub fn lex_at(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self::with_span(ErrorKind::Lex, msg, line, col)
    }

    pub fn parse_at(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self::with_span(ErrorKind::Parse, msg, line, col)
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Evaluation, msg)
    }

    /// True for every failure raised while running a program, including
    /// division by zero.
    pub fn is_evaluation(&self) -> bool {
        matches!(self.kind, ErrorKind::Evaluation | ErrorKind::Division)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(l), Some(c)) = (self.line, self.col) {
            write!(f, "{} at {}:{}", self.msg, l, c)
        } else {
            write!(f, "{}", self.msg)
        }
    }
}

impl std::error::Error for Error {}

/// A specialized `Result` type for C-colon operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Shorthand for `Err(Error::evaluation(msg))`.
pub fn error<T>(msg: impl Into<String>) -> Result<T> {
    Err(Error::evaluation(msg))
}

/// Shorthand for a lexical error at a source location.
pub fn lex_error_at<T>(line: usize, col: usize, msg: impl Into<String>) -> Result<T> {
    Err(Error::lex_at(msg, line, col))
}

/// Shorthand for a parse error at a source location.
pub fn parse_error_at<T>(line: usize, col: usize, msg: impl Into<String>) -> Result<T> {
    Err(Error::parse_at(msg, line, col))
}

/// Shorthand for the division-by-zero error.
pub fn division_error<T>() -> Result<T> {
    Err(Error::new(ErrorKind::Division, "division by zero"))
}
