//! Tree-walking evaluator for rill.
//!
//! Takes the parser's arena + module and evaluates it against the builtin
//! root scope. Scopes form a lexical parent chain shared with closures;
//! `break`/`return` propagate as [`Outcome`] signals while genuine failures
//! travel as [`EvalError`] with an accumulated call trace.

mod builtins;
mod errors;
mod interp;
mod methods;
mod outcome;
mod print_handler;
mod scope;
mod value;

#[cfg(test)]
mod tests;

pub use builtins::root_scope;
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interp::{Interpreter, MAX_CALL_DEPTH};
pub use outcome::Outcome;
pub use print_handler::PrintHandler;
pub use scope::ScopeRef;
pub use value::{format_number, BoundMethod, BuiltinDef, FunctionValue, Heap, NativeFn, Value};
