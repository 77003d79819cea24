//! Runtime errors and their factory functions.
//!
//! Errors carry the span where they arose plus the call-site spans they
//! crossed while unwinding (innermost first); the CLI renders both against
//! the source. Control flow (`break`, `return`) is NOT an error — see
//! [`crate::Outcome`].

use std::fmt;

use rill_ir::Span;

/// Typed error category.
#[derive(Clone, Debug, PartialEq)]
pub enum EvalErrorKind {
    /// Lookup or assignment of a name declared nowhere in the scope chain.
    NameError { name: String },
    /// Operation applied to an incompatible value kind.
    TypeError { message: String },
    /// Out-of-bounds list or string access.
    IndexError { index: f64, len: usize },
    /// Wrong argument count to a user function.
    ArityError { expected: usize, got: usize },
    /// Explicit `Assert` failure.
    AssertionError { message: String },
    /// Attribute lookup miss.
    AttributeError {
        type_name: &'static str,
        attribute: String,
    },
    /// A recognized construct this runtime deliberately does not support.
    UnsupportedFeature { feature: String },
    /// Call of a non-function value.
    NotCallable { type_name: &'static str },
    /// `break` unwound past the nearest function or module boundary.
    BreakOutsideLoop,
    /// `return` at module level.
    ReturnOutsideFunction,
    /// `Reduce` of an empty list has no seed.
    EmptyReduce,
    /// User recursion exceeded the interpreter's call-depth budget.
    RecursionLimit { depth: usize },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameError { name } => write!(f, "Name '{name}' is not defined"),
            Self::TypeError { message } => write!(f, "{message}"),
            Self::IndexError { index, len } => {
                write!(
                    f,
                    "Tried to index at {} but the length is {len}",
                    crate::value::format_number(*index)
                )
            }
            Self::ArityError { expected, got } => {
                write!(f, "Expected {expected} arguments but got {got}")
            }
            Self::AssertionError { message } => {
                if message.is_empty() {
                    write!(f, "Assertion failed")
                } else {
                    write!(f, "Assertion failed: {message}")
                }
            }
            Self::AttributeError {
                type_name,
                attribute,
            } => {
                write!(f, "No attribute '{attribute}' on {type_name}")
            }
            Self::UnsupportedFeature { feature } => {
                write!(f, "{feature} is not supported")
            }
            Self::NotCallable { type_name } => {
                write!(f, "Tried to call a {type_name}")
            }
            Self::BreakOutsideLoop => write!(f, "'break' outside of a loop"),
            Self::ReturnOutsideFunction => write!(f, "'return' outside of a function"),
            Self::EmptyReduce => write!(f, "Tried to Reduce an empty list"),
            Self::RecursionLimit { depth } => {
                write!(f, "Recursion limit of {depth} calls exceeded")
            }
        }
    }
}

/// A runtime error with its origin and accumulated call trace.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Span,
    /// Call-site spans crossed while unwinding, innermost first.
    pub trace: Vec<Span>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind, span: Span) -> Self {
        EvalError {
            kind,
            span,
            trace: Vec::new(),
        }
    }

    /// Record a call site this error unwound through.
    #[must_use]
    pub fn with_call_site(mut self, span: Span) -> Self {
        self.trace.push(span);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for EvalError {}

pub type EvalResult = Result<crate::Value, EvalError>;

// Factory functions, one per error site shape.

pub fn undefined_variable(name: &str, span: Span) -> EvalError {
    EvalError::new(
        EvalErrorKind::NameError {
            name: name.to_string(),
        },
        span,
    )
}

/// `Tried to {op} {kind}` / `Tried to {op} {kind} and {kind}`.
pub fn op_type_error(op: &str, operands: &[&str], span: Span) -> EvalError {
    let message = match operands {
        [a] => format!("Tried to {op} {a}"),
        [a, b] => format!("Tried to {op} {a} and {b}"),
        other => format!("Tried to {op} {}", other.join(" and ")),
    };
    EvalError::new(EvalErrorKind::TypeError { message }, span)
}

pub fn type_error(message: impl Into<String>, span: Span) -> EvalError {
    EvalError::new(
        EvalErrorKind::TypeError {
            message: message.into(),
        },
        span,
    )
}

pub fn index_out_of_bounds(index: f64, len: usize, span: Span) -> EvalError {
    EvalError::new(EvalErrorKind::IndexError { index, len }, span)
}

pub fn arity_mismatch(expected: usize, got: usize, span: Span) -> EvalError {
    EvalError::new(EvalErrorKind::ArityError { expected, got }, span)
}

pub fn assertion_failed(message: impl Into<String>, span: Span) -> EvalError {
    EvalError::new(
        EvalErrorKind::AssertionError {
            message: message.into(),
        },
        span,
    )
}

pub fn attribute_error(type_name: &'static str, attribute: &str, span: Span) -> EvalError {
    EvalError::new(
        EvalErrorKind::AttributeError {
            type_name,
            attribute: attribute.to_string(),
        },
        span,
    )
}

pub fn unsupported(feature: impl Into<String>, span: Span) -> EvalError {
    EvalError::new(
        EvalErrorKind::UnsupportedFeature {
            feature: feature.into(),
        },
        span,
    )
}

pub fn not_callable(type_name: &'static str, span: Span) -> EvalError {
    EvalError::new(EvalErrorKind::NotCallable { type_name }, span)
}

pub fn break_outside_loop(span: Span) -> EvalError {
    EvalError::new(EvalErrorKind::BreakOutsideLoop, span)
}

pub fn return_outside_function(span: Span) -> EvalError {
    EvalError::new(EvalErrorKind::ReturnOutsideFunction, span)
}

pub fn empty_reduce(span: Span) -> EvalError {
    EvalError::new(EvalErrorKind::EmptyReduce, span)
}

pub fn recursion_limit(depth: usize, span: Span) -> EvalError {
    EvalError::new(EvalErrorKind::RecursionLimit { depth }, span)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            undefined_variable("x", Span::DUMMY).to_string(),
            "Name 'x' is not defined"
        );
        assert_eq!(
            op_type_error("Add", &["number", "function"], Span::DUMMY).to_string(),
            "Tried to Add number and function"
        );
        assert_eq!(
            op_type_error("Negate", &["string"], Span::DUMMY).to_string(),
            "Tried to Negate string"
        );
        assert_eq!(
            index_out_of_bounds(5.0, 3, Span::DUMMY).to_string(),
            "Tried to index at 5 but the length is 3"
        );
        assert_eq!(
            assertion_failed("", Span::DUMMY).to_string(),
            "Assertion failed"
        );
    }

    #[test]
    fn call_sites_accumulate_innermost_first() {
        let err = undefined_variable("x", Span::new(0, 1))
            .with_call_site(Span::new(10, 12))
            .with_call_site(Span::new(20, 22));
        assert_eq!(err.trace, vec![Span::new(10, 12), Span::new(20, 22)]);
    }
}
