//! Token definitions for the C-colon language.
//!
//! The lexer classifies every lexical unit into one of five coarse kinds and
//! keeps the exact source text alongside it. The parser matches on the pair
//! `(kind, text)` rather than on a wide enum of punctuation variants, which
//! keeps the token stream a flat, already-validated sequence.
//!
//! # Token Categories
//!
//! - **Strings**: double-quoted literals, stored without the quotes (`"hi"`)
//! - **Numbers**: runs of ASCII digits (`42`)
//! - **Identifiers**: variable, function and method names (`console`, `x_1`)
//! - **Keywords**: reserved words (`var`, `function`, `if`, ...)
//! - **Operators**: punctuation and operators (`=`, `==`, `{`, `.`)
//!
//! # Examples
//!
//! ```rust
//! use ccolon_syntax::{Token, TokenKind};
//!
//! let keyword = Token::new(TokenKind::Keyword, "var", 1, 1);
//! assert!(keyword.is_keyword("var"));
//! assert_eq!(keyword.to_string(), "KEYWORD(var)");
//! ```

use std::fmt;

/// Reserved words of the language.
pub const KEYWORDS: &[&str] = &[
    "var", "string", "int", "function", "return", "if", "else", "import",
];

/// Keywords accepted as the declared type of a `var` declaration.
pub const TYPE_KEYWORDS: &[&str] = &["int", "string"];

/// Operator and punctuation spellings recognised by the lexer.
pub const OPERATORS: &[&str] = &[
    "=", "+", "-", "*", "/", "(", ")", ";", ",", ".", "{", "}", "==",
];

/// The lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A double-quoted string literal; the text excludes the quotes.
    String,
    /// A non-negative decimal integer literal.
    Number,
    /// An identifier that is not a reserved word.
    Id,
    /// One of [`KEYWORDS`].
    Keyword,
    /// One of [`OPERATORS`].
    Op,
}

impl TokenKind {
    /// Upper-case name used in token dumps and error messages.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::Id => "ID",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Op => "OP",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified lexical unit with its source position.
///
/// # Fields
///
/// - `kind`: the lexical class
/// - `text`: the exact source text (string literals without their quotes)
/// - `line`: 1-based line of the first character
/// - `col`: 1-based column of the first character
///
/// The position is only used for error reporting; two tokens with the same
/// kind and text are interchangeable as far as the grammar is concerned.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Lexical class of this token
    pub kind: TokenKind,

    /// Source text of this token
    pub text: String,

    /// Line number in the source file (1-based)
    pub line: usize,

    /// Column number in the source file (1-based)
    pub col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            col,
        }
    }

    /// True if this token is the operator spelled `op`.
    pub fn is_op(&self, op: &str) -> bool {
        self.kind == TokenKind::Op && self.text == op
    }

    /// True if this token is the keyword spelled `kw`.
    pub fn is_keyword(&self, kw: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == kw
    }

    /// Human-readable description used in parse errors, e.g. `OP '='`.
    pub fn describe(&self) -> String {
        format!("{} '{}'", self.kind, self.text)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.text)
    }
}
