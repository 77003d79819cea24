//! Lexical errors.

use std::fmt;

use rill_ir::Span;

/// What went wrong while tokenizing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A line's leading whitespace matches no entry of the indent stack and
    /// does not extend the innermost one.
    InvalidIndent { indent: String },
    /// A string literal ran to end-of-input before its closing quote.
    UnterminatedString { quote: String },
    /// A character run matching no token rule.
    UnrecognizedToken { text: String },
    /// A digit run that does not form a number.
    InvalidNumber { text: String },
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::InvalidIndent { indent } => {
                write!(f, "Invalid indent: {indent:?}")
            }
            LexErrorKind::UnterminatedString { quote } => {
                write!(f, "Where is the matching quotes for {quote}?")
            }
            LexErrorKind::UnrecognizedToken { text } => {
                write!(f, "Unrecognized token: {text}")
            }
            LexErrorKind::InvalidNumber { text } => {
                write!(f, "Invalid number: {text}")
            }
        }
    }
}

/// A lexical error with the span of the offending text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { kind, span }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for LexError {}
