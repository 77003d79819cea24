//! Attribute dispatch: per-kind tables, the universal fallback, bound
//! methods as first-class values.

use pretty_assertions::assert_eq;

use super::{eval_err, eval_ok, number, output_of};
use crate::{EvalErrorKind, Value};

#[test]
fn string_method_on_string() {
    assert_eq!(eval_ok("'hello'.String()\n"), Value::string("hello"));
}

#[test]
fn inspect_method_on_list() {
    assert_eq!(eval_ok("[1, 2].Inspect()\n"), Value::string("[1, 2]"));
}

#[test]
fn list_methods() {
    assert_eq!(
        eval_ok("xs = [1]\nxs.Push(2)\nxs\n"),
        Value::list(vec![number(1.0), number(2.0)])
    );
    assert_eq!(eval_ok("[1, 2, 3].Size()\n"), number(3.0));
    assert_eq!(
        eval_ok("[1, 2].Map(\\ x . x + 1)\n"),
        Value::list(vec![number(2.0), number(3.0)])
    );
    assert_eq!(eval_ok("[1, 2, 3].Fold(Add, 0)\n"), number(6.0));
    assert_eq!(eval_ok("[1, 2, 3].Reduce(Add)\n"), number(6.0));
    assert_eq!(
        eval_ok("[0, 1, 2, 3].Slice(-2, None, None)\n"),
        Value::list(vec![number(2.0), number(3.0)])
    );
}

#[test]
fn string_kind_methods() {
    assert_eq!(eval_ok("'  x '.Strip()\n"), Value::string("x"));
    assert_eq!(eval_ok("'a b'.SplitWords().Size()\n"), number(2.0));
    assert_eq!(eval_ok("'12'.Int()\n"), number(12.0));
}

#[test]
fn number_methods() {
    assert_eq!(eval_ok("(3.7).Int()\n"), number(3.0));
    assert_eq!(eval_ok("x = 5\nx.Negate()\n"), number(-5.0));
}

#[test]
fn universal_methods_reach_every_kind() {
    assert_eq!(eval_ok("None.String()\n"), Value::string("None"));
    assert_eq!(eval_ok("True.String()\n"), Value::string("True"));
    assert_eq!(eval_ok("(1).Equal(1)\n"), Value::Bool(true));
    assert_eq!(output_of("'hi'.Print()\n"), "hi\n");
}

#[test]
fn bound_methods_are_first_class() {
    let source = "\
push_to = [].Push
push_to(1)
";
    // The bound receiver is the literal list; pushing returns None.
    assert_eq!(eval_ok(source), Value::None);
}

#[test]
fn unknown_attribute_raises() {
    let err = eval_err("'x'.Push\n");
    assert_eq!(
        err.kind,
        EvalErrorKind::AttributeError {
            type_name: "string",
            attribute: "Push".to_string()
        }
    );
}

#[test]
fn attribute_lookup_is_by_runtime_kind() {
    let err = eval_err("x = 1\nx.Strip()\n");
    assert!(matches!(err.kind, EvalErrorKind::AttributeError { .. }));
}
