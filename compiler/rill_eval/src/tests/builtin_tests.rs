//! The builtin catalog: arithmetic, comparison, lists, strings, coercions,
//! assertions, and the operator desugarings that reach them.

use pretty_assertions::assert_eq;

use super::{eval_err, eval_ok, number, output_of};
use crate::{EvalErrorKind, Value};

#[test]
fn arithmetic_operators() {
    assert_eq!(eval_ok("1 + 2\n"), number(3.0));
    assert_eq!(eval_ok("7 - 2 - 1\n"), number(4.0));
    assert_eq!(eval_ok("3 * 4\n"), number(12.0));
    assert_eq!(eval_ok("9 / 2\n"), number(4.5));
    assert_eq!(eval_ok("9 % 4\n"), number(1.0));
    assert_eq!(eval_ok("-(2 + 3)\n"), number(-5.0));
}

#[test]
fn string_concatenation() {
    assert_eq!(eval_ok("'foo' + 'bar'\n"), Value::string("foobar"));
}

#[test]
fn mixed_addition_is_a_type_error() {
    let err = eval_err("1 + 'a'\n");
    assert_eq!(
        err.kind,
        EvalErrorKind::TypeError {
            message: "Tried to Add number and string".to_string()
        }
    );
}

#[test]
fn comparison_operators() {
    assert_eq!(eval_ok("1 < 2\n"), Value::Bool(true));
    assert_eq!(eval_ok("2 <= 2\n"), Value::Bool(true));
    assert_eq!(eval_ok("3 > 4\n"), Value::Bool(false));
    assert_eq!(eval_ok("4 >= 5\n"), Value::Bool(false));
    assert_eq!(eval_ok("'a' < 'b'\n"), Value::Bool(true));
    assert_eq!(eval_ok("1 == 1\n"), Value::Bool(true));
    assert_eq!(eval_ok("1 != 2\n"), Value::Bool(true));
}

#[test]
fn list_equality_and_identity() {
    assert_eq!(eval_ok("[0, 1, 2] == [0, 1, 2]\n"), Value::Bool(true));
    assert_eq!(eval_ok("[0, 1, 2] == [0, 1]\n"), Value::Bool(false));
    assert_eq!(eval_ok("[0, 1] is [0, 1]\n"), Value::Bool(false));
    assert_eq!(eval_ok("xs = [0]\nxs is xs\n"), Value::Bool(true));
    assert_eq!(eval_ok("None is None\n"), Value::Bool(true));
}

#[test]
fn get_item_bounds() {
    assert_eq!(eval_ok("[10, 11, 12][1]\n"), number(11.0));
    let err = eval_err("GetItem([0, 1, 2], 5)\n");
    assert_eq!(err.kind, EvalErrorKind::IndexError { index: 5.0, len: 3 });
    let err = eval_err("[0, 1, 2][-1]\n");
    assert!(matches!(err.kind, EvalErrorKind::IndexError { .. }));
}

#[test]
fn set_item_mutates_in_place() {
    assert_eq!(
        eval_ok("xs = [1, 2]\nxs[0] = 9\nxs\n"),
        Value::list(vec![number(9.0), number(2.0)])
    );
    let err = eval_err("xs = [1]\nxs[4] = 0\n");
    assert!(matches!(err.kind, EvalErrorKind::IndexError { .. }));
}

#[test]
fn slice_wraps_negative_indices() {
    assert_eq!(
        eval_ok("Slice([0, 1, 2, 3], -2, None, None)\n"),
        Value::list(vec![number(2.0), number(3.0)])
    );
    assert_eq!(
        eval_ok("[0, 1, 2, 3][1:3]\n"),
        Value::list(vec![number(1.0), number(2.0)])
    );
    assert_eq!(eval_ok("[0, 1, 2][5:]\n"), Value::list(vec![]));
    assert_eq!(eval_ok("'hello'[1:-1]\n"), Value::string("ell"));
}

#[test]
fn non_unit_slice_step_is_unsupported() {
    let err = eval_err("[0, 1, 2, 3][::2]\n");
    assert_eq!(
        err.kind,
        EvalErrorKind::UnsupportedFeature {
            feature: "Slice step other than 1".to_string()
        }
    );
}

#[test]
fn push_and_size() {
    assert_eq!(
        eval_ok("xs = []\nPush(xs, 1)\nPush(xs, 2)\n[Size(xs), xs[1]]\n"),
        Value::list(vec![number(2.0), number(2.0)])
    );
    assert_eq!(eval_ok("Size('abc')\n"), number(3.0));
}

#[test]
fn map_each_fold_reduce() {
    assert_eq!(
        eval_ok("Map(\\ x . x * 2, [1, 2, 3])\n"),
        Value::list(vec![number(2.0), number(4.0), number(6.0)])
    );
    assert_eq!(
        eval_ok("seen = []\nEach(\\ x . Push(seen, x), [1, 2])\nseen\n"),
        Value::list(vec![number(1.0), number(2.0)])
    );
    assert_eq!(eval_ok("Fold(Add, 10, [1, 2, 3])\n"), number(16.0));
    assert_eq!(eval_ok("FoldLeft(Add, 0, [1, 2])\n"), number(3.0));
    assert_eq!(eval_ok("Reduce(Add, [1, 2, 3])\n"), number(6.0));
}

#[test]
fn reduce_of_empty_list_raises() {
    assert_eq!(eval_err("Reduce(Add, [])\n").kind, EvalErrorKind::EmptyReduce);
}

#[test]
fn coercions() {
    assert_eq!(eval_ok("Int(3.7)\n"), number(3.0));
    assert_eq!(eval_ok("Int('12')\n"), number(12.0));
    assert_eq!(eval_ok("Int(True)\n"), number(1.0));
    assert_eq!(eval_ok("Int(None)\n"), number(0.0));
    assert_eq!(eval_ok("Float('1.5')\n"), number(1.5));
    assert_eq!(eval_ok("Bool([])\n"), Value::Bool(false));
    assert_eq!(eval_ok("Bool('x')\n"), Value::Bool(true));
    assert_eq!(eval_ok("String(12)\n"), Value::string("12"));
    assert_eq!(eval_ok("String(None)\n"), Value::string("None"));
    assert_eq!(eval_ok("String('hello')\n"), Value::string("hello"));
    assert_eq!(eval_ok("Inspect([1, 2])\n"), Value::string("[1, 2]"));
    assert_eq!(eval_ok("Inspect('hi')\n"), Value::string("\"hi\""));
}

#[test]
fn string_builtins() {
    assert_eq!(
        eval_ok("SplitWords('  a b  c ')\n"),
        Value::list(vec![
            Value::string("a"),
            Value::string("b"),
            Value::string("c")
        ])
    );
    assert_eq!(
        eval_ok("SplitLines('a\\nb')\n"),
        Value::list(vec![Value::string("a"), Value::string("b")])
    );
    assert_eq!(eval_ok("Strip('  x  ')\n"), Value::string("x"));
}

#[test]
fn print_joins_arguments_with_spaces() {
    assert_eq!(output_of("Print(1, 'two', [3])\n"), "1 two [3]\n");
    assert_eq!(eval_ok("Print('x')\n"), Value::None);
}

#[test]
fn assert_raises_on_falsy_values() {
    assert_eq!(eval_ok("Assert(1)\n"), Value::None);
    let err = eval_err("Assert(False)\n");
    assert_eq!(
        err.kind,
        EvalErrorKind::AssertionError {
            message: String::new()
        }
    );
    let err = eval_err("Assert(0, 'zero is falsy')\n");
    assert_eq!(
        err.kind,
        EvalErrorKind::AssertionError {
            message: "zero is falsy".to_string()
        }
    );
}

#[test]
fn destructuring_assignment_binds_elementwise() {
    assert_eq!(
        eval_ok("[a, b] = [1, 2]\n[b, a]\n"),
        Value::list(vec![number(2.0), number(1.0)])
    );
}

#[test]
fn destructuring_with_rest_captures_the_remainder() {
    assert_eq!(
        eval_ok("[head, ... tail] = [1, 2, 3]\n[head, tail]\n"),
        Value::list(vec![
            number(1.0),
            Value::list(vec![number(2.0), number(3.0)])
        ])
    );
}

#[test]
fn splat_in_rvalue_lists_splices() {
    assert_eq!(
        eval_ok("xs = [2, 3]\n[1, ... xs, 4]\n"),
        Value::list(vec![number(1.0), number(2.0), number(3.0), number(4.0)])
    );
    let err = eval_err("[1, ... 2]\n");
    assert!(matches!(err.kind, EvalErrorKind::TypeError { .. }));
}

#[test]
fn set_attribute_always_raises() {
    let err = eval_err("x = [1]\nx.size = 2\n");
    assert_eq!(
        err.kind,
        EvalErrorKind::TypeError {
            message: "Tried to SetAttribute list".to_string()
        }
    );
}

#[test]
fn shadowing_a_builtin_is_allowed() {
    assert_eq!(eval_ok("Add = \\ a b . 42\nAdd(1, 2)\n"), number(42.0));
}
