//! Evaluator test suite: whole programs through lex → parse → eval with a
//! captured print buffer.

#![expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

mod builtin_tests;
mod control_tests;
mod methods_tests;

use rill_ir::StringInterner;

use crate::{EvalError, Interpreter, PrintHandler, Value};

/// Run a program, returning the module result and captured print output.
pub(crate) fn run(source: &str) -> (Result<Value, EvalError>, String) {
    let interner = StringInterner::new();
    let tokens = rill_lexer::lex(source, &interner).unwrap();
    let parsed = rill_parse::parse(&tokens, &interner).unwrap();
    let (printer, buffer) = PrintHandler::buffer();
    let mut interp = Interpreter::with_printer(&parsed.arena, &interner, printer);
    let result = interp.run_module(&parsed.module);
    let output = buffer.borrow().clone();
    (result, output)
}

pub(crate) fn eval_ok(source: &str) -> Value {
    let (result, _) = run(source);
    match result {
        Ok(value) => value,
        Err(err) => panic!("evaluation failed: {err}"),
    }
}

pub(crate) fn eval_err(source: &str) -> EvalError {
    let (result, _) = run(source);
    match result {
        Ok(value) => panic!("expected an error, got {value:?}"),
        Err(err) => err,
    }
}

pub(crate) fn output_of(source: &str) -> String {
    let (result, output) = run(source);
    if let Err(err) = result {
        panic!("evaluation failed: {err}");
    }
    output
}

pub(crate) fn number(n: f64) -> Value {
    Value::Number(n)
}
