//! Parse errors.

use std::fmt;

use rill_ir::Span;

/// What went wrong while parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A specific token was required.
    Expected {
        expected: &'static str,
        found: &'static str,
    },
    /// An expression was required.
    ExpectedExpression { found: &'static str },
    /// The left-hand side of `=` cannot be assigned to.
    NotAssignable { target: &'static str },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Expected { expected, found } => {
                write!(f, "Expected {expected} but found {found}")
            }
            ParseErrorKind::ExpectedExpression { found } => {
                write!(f, "Expected expression but found {found}")
            }
            ParseErrorKind::NotAssignable { target } => {
                write!(f, "{target} is not assignable")
            }
        }
    }
}

/// A parse error with the span of the offending token or target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for ParseError {}
