//! Control-flow outcomes.
//!
//! `break` and `return` are not errors and not values: they are signals that
//! unwind the evaluation call chain to the nearest loop or function boundary.
//! Each node handler inspects the outcome of its children and re-propagates
//! anything that is not a plain value; loops absorb `Break`, function calls
//! absorb `Return`. Genuine errors travel on the `Err` channel instead.

use crate::value::Value;

/// The result of evaluating one expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Ordinary completion.
    Value(Value),
    /// A `break` looking for its nearest enclosing loop.
    Break,
    /// A `return` looking for its nearest enclosing function call.
    Return(Value),
}

impl Outcome {
    /// The completed value, if this is ordinary completion.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Outcome::Value(value) => Some(value),
            Outcome::Break | Outcome::Return(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_value_filters_flow() {
        assert_eq!(
            Outcome::Value(Value::Number(1.0)).into_value(),
            Some(Value::Number(1.0))
        );
        assert_eq!(Outcome::Break.into_value(), None);
        assert_eq!(Outcome::Return(Value::None).into_value(), None);
    }
}
