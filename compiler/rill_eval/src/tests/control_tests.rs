//! Control flow: blocks, if/else, while, break, return, short-circuit.

use pretty_assertions::assert_eq;

use super::{eval_err, eval_ok, number, output_of};
use crate::{EvalErrorKind, Value};

#[test]
fn empty_module_is_none() {
    assert_eq!(eval_ok(""), Value::None);
}

#[test]
fn module_result_is_last_expression() {
    assert_eq!(eval_ok("1\n2\n3\n"), number(3.0));
}

#[test]
fn block_value_is_its_last_expression() {
    assert_eq!(eval_ok("if 1\n  10\n  20\n"), number(20.0));
}

#[test]
fn if_takes_the_truthy_branch() {
    assert_eq!(eval_ok("if 1\n  2\nelse\n  3\n"), number(2.0));
    assert_eq!(eval_ok("if 0\n  2\nelse\n  3\n"), number(3.0));
}

#[test]
fn if_without_else_yields_none() {
    assert_eq!(eval_ok("if 0\n  2\n"), Value::None);
}

#[test]
fn if_tests_use_truthiness() {
    assert_eq!(eval_ok("if ''\n  1\nelse\n  2\n"), number(2.0));
    assert_eq!(eval_ok("if []\n  1\nelse\n  2\n"), number(2.0));
    assert_eq!(eval_ok("if [0]\n  1\nelse\n  2\n"), number(1.0));
    assert_eq!(eval_ok("if None\n  1\nelse\n  2\n"), number(2.0));
}

#[test]
fn while_loop_counts_and_returns_last_body_value() {
    let source = "i = 0\nwhile i < 3\n  Print(i)\n  i = i + 1\n";
    assert_eq!(output_of(source), "0\n1\n2\n");
    assert_eq!(eval_ok(source), number(3.0));
}

#[test]
fn while_that_never_runs_is_none() {
    assert_eq!(eval_ok("while 0\n  1\n"), Value::None);
}

#[test]
fn break_aborts_the_nearest_loop() {
    let source = "\
i = 0
while 1
  i = i + 1
  if i == 3
    break
i
";
    assert_eq!(eval_ok(source), number(3.0));
}

#[test]
fn break_in_inner_loop_leaves_outer_running() {
    let source = "\
total = 0
i = 0
while i < 2
  while 1
    break
  total = total + 1
  i = i + 1
total
";
    assert_eq!(eval_ok(source), number(2.0));
}

#[test]
fn break_at_module_level_is_an_error() {
    assert_eq!(eval_err("break\n").kind, EvalErrorKind::BreakOutsideLoop);
}

#[test]
fn return_at_module_level_is_an_error() {
    assert_eq!(
        eval_err("return 1\n").kind,
        EvalErrorKind::ReturnOutsideFunction
    );
}

#[test]
fn return_short_circuits_a_function_body() {
    let source = "\
f = \\ x
  if x
    return 1
  2
[f(1), f(0)]
";
    assert_eq!(eval_ok(source), Value::list(vec![number(1.0), number(2.0)]));
}

#[test]
fn bare_return_yields_none() {
    let source = "f = \\ .\n  return\nf()\n";
    assert_eq!(eval_ok(source), Value::None);
}

#[test]
fn return_unwinds_out_of_loops_inside_the_function() {
    let source = "\
f = \\ .
  while 1
    return 7
f()
";
    assert_eq!(eval_ok(source), number(7.0));
}

#[test]
fn and_short_circuits_without_evaluating_the_right() {
    // Boom is undefined; short-circuit means it must never be looked up.
    assert_eq!(eval_ok("False and Boom()\n"), Value::Bool(false));
    assert_eq!(eval_ok("0 and Boom()\n"), number(0.0));
}

#[test]
fn or_short_circuits_without_evaluating_the_right() {
    assert_eq!(eval_ok("True or Boom()\n"), Value::Bool(true));
    assert_eq!(eval_ok("1 or Boom()\n"), number(1.0));
}

#[test]
fn and_or_return_operand_values_not_booleans() {
    assert_eq!(eval_ok("0 or 5\n"), number(5.0));
    assert_eq!(eval_ok("'' or 'fallback'\n"), Value::string("fallback"));
    assert_eq!(eval_ok("1 and 5\n"), number(5.0));
    assert_eq!(eval_ok("None and 5\n"), Value::None);
}

#[test]
fn while_result_none_when_broken_before_any_value() {
    assert_eq!(eval_ok("while 1\n  break\n"), Value::None);
}

#[test]
fn evaluation_order_is_left_to_right() {
    let source = "\
order = []
f = \\ x
  Push(order, x)
  x
Add(f(1), f(2))
order
";
    assert_eq!(eval_ok(source), Value::list(vec![number(1.0), number(2.0)]));
}
