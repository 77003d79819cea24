//! The builtin primitive catalog.
//!
//! [`root_scope`] is the single initialization point: it builds and returns a
//! fully populated root scope at startup; nothing is re-registered at
//! runtime. Natives that re-enter user code (`Map`, `Each`, `Fold`,
//! `Reduce`) go through [`Interpreter::call_value`].
//!
//! Method-position variants (`xs.Map(f)`) share the same implementations
//! with the receiver moved to its free-function position.

use rill_ir::{Span, StringInterner};

use crate::errors::{self, EvalError, EvalResult};
use crate::scope::ScopeRef;
use crate::value::{format_number, BoundMethod, BuiltinDef, Heap, Value};
use crate::Interpreter;

/// Everything visible in the root scope under its user-facing name.
pub(crate) static CATALOG: &[&BuiltinDef] = &[
    &PRINT,
    &STRING,
    &INSPECT,
    &BOOL,
    &INT,
    &FLOAT,
    &SIZE,
    &GET_ITEM,
    &SET_ITEM,
    &SLICE,
    &PUSH,
    &MAP,
    &EACH,
    &FOLD,
    &FOLD_LEFT,
    &REDUCE,
    &ADD,
    &SUBTRACT,
    &MULTIPLY,
    &DIVIDE,
    &MODULO,
    &NEGATE,
    &EQUAL,
    &NOT,
    &LESS_THAN,
    &LESS_THAN_OR_EQUAL,
    &GREATER_THAN,
    &GREATER_THAN_OR_EQUAL,
    &IS,
    &SPLIT_WORDS,
    &SPLIT_LINES,
    &STRIP,
    &ASSERT,
    &GET_ATTRIBUTE,
    &SET_ATTRIBUTE,
];

/// Build the root scope: the whole catalog plus the `None`/`True`/`False`
/// bindings (those are ordinary names in this language, not keywords).
pub fn root_scope(interner: &StringInterner) -> ScopeRef {
    let scope = ScopeRef::new_root();
    for &def in CATALOG {
        scope.declare(interner.intern(def.name), Value::Builtin(def));
    }
    scope.declare(interner.intern("None"), Value::None);
    scope.declare(interner.intern("True"), Value::Bool(true));
    scope.declare(interner.intern("False"), Value::Bool(false));
    scope
}

pub(crate) static PRINT: BuiltinDef = BuiltinDef {
    name: "Print",
    f: print,
};
pub(crate) static STRING: BuiltinDef = BuiltinDef {
    name: "String",
    f: string_coerce,
};
pub(crate) static INSPECT: BuiltinDef = BuiltinDef {
    name: "Inspect",
    f: inspect,
};
pub(crate) static BOOL: BuiltinDef = BuiltinDef {
    name: "Bool",
    f: bool_coerce,
};
pub(crate) static INT: BuiltinDef = BuiltinDef {
    name: "Int",
    f: int_coerce,
};
pub(crate) static FLOAT: BuiltinDef = BuiltinDef {
    name: "Float",
    f: float_coerce,
};
pub(crate) static SIZE: BuiltinDef = BuiltinDef {
    name: "Size",
    f: size,
};
pub(crate) static GET_ITEM: BuiltinDef = BuiltinDef {
    name: "GetItem",
    f: get_item,
};
pub(crate) static SET_ITEM: BuiltinDef = BuiltinDef {
    name: "SetItem",
    f: set_item,
};
pub(crate) static SLICE: BuiltinDef = BuiltinDef {
    name: "Slice",
    f: slice_builtin,
};
pub(crate) static PUSH: BuiltinDef = BuiltinDef {
    name: "Push",
    f: push,
};
pub(crate) static MAP: BuiltinDef = BuiltinDef { name: "Map", f: map };
pub(crate) static EACH: BuiltinDef = BuiltinDef {
    name: "Each",
    f: each,
};
pub(crate) static FOLD: BuiltinDef = BuiltinDef {
    name: "Fold",
    f: fold,
};
pub(crate) static FOLD_LEFT: BuiltinDef = BuiltinDef {
    name: "FoldLeft",
    f: fold,
};
pub(crate) static REDUCE: BuiltinDef = BuiltinDef {
    name: "Reduce",
    f: reduce,
};
pub(crate) static ADD: BuiltinDef = BuiltinDef { name: "Add", f: add };
pub(crate) static SUBTRACT: BuiltinDef = BuiltinDef {
    name: "Subtract",
    f: subtract,
};
pub(crate) static MULTIPLY: BuiltinDef = BuiltinDef {
    name: "Multiply",
    f: multiply,
};
pub(crate) static DIVIDE: BuiltinDef = BuiltinDef {
    name: "Divide",
    f: divide,
};
pub(crate) static MODULO: BuiltinDef = BuiltinDef {
    name: "Modulo",
    f: modulo,
};
pub(crate) static NEGATE: BuiltinDef = BuiltinDef {
    name: "Negate",
    f: negate,
};
pub(crate) static EQUAL: BuiltinDef = BuiltinDef {
    name: "Equal",
    f: equal,
};
pub(crate) static NOT: BuiltinDef = BuiltinDef { name: "Not", f: not };
pub(crate) static LESS_THAN: BuiltinDef = BuiltinDef {
    name: "LessThan",
    f: less_than,
};
pub(crate) static LESS_THAN_OR_EQUAL: BuiltinDef = BuiltinDef {
    name: "LessThanOrEqual",
    f: less_than_or_equal,
};
pub(crate) static GREATER_THAN: BuiltinDef = BuiltinDef {
    name: "GreaterThan",
    f: greater_than,
};
pub(crate) static GREATER_THAN_OR_EQUAL: BuiltinDef = BuiltinDef {
    name: "GreaterThanOrEqual",
    f: greater_than_or_equal,
};
pub(crate) static IS: BuiltinDef = BuiltinDef { name: "Is", f: is };
pub(crate) static SPLIT_WORDS: BuiltinDef = BuiltinDef {
    name: "SplitWords",
    f: split_words,
};
pub(crate) static SPLIT_LINES: BuiltinDef = BuiltinDef {
    name: "SplitLines",
    f: split_lines,
};
pub(crate) static STRIP: BuiltinDef = BuiltinDef {
    name: "Strip",
    f: strip,
};
pub(crate) static ASSERT: BuiltinDef = BuiltinDef {
    name: "Assert",
    f: assert_builtin,
};
pub(crate) static GET_ATTRIBUTE: BuiltinDef = BuiltinDef {
    name: "GetAttribute",
    f: get_attribute,
};
pub(crate) static SET_ATTRIBUTE: BuiltinDef = BuiltinDef {
    name: "SetAttribute",
    f: set_attribute,
};

// Method-position variants: same name, receiver-first argument order.
pub(crate) static METHOD_MAP: BuiltinDef = BuiltinDef {
    name: "Map",
    f: method_map,
};
pub(crate) static METHOD_EACH: BuiltinDef = BuiltinDef {
    name: "Each",
    f: method_each,
};
pub(crate) static METHOD_FOLD: BuiltinDef = BuiltinDef {
    name: "Fold",
    f: method_fold,
};
pub(crate) static METHOD_REDUCE: BuiltinDef = BuiltinDef {
    name: "Reduce",
    f: method_reduce,
};

// ─── Helpers ────────────────────────────────────────────────────────────

fn expect_args(args: &[Value], expected: usize, span: Span) -> Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(errors::arity_mismatch(expected, args.len(), span))
    }
}

fn numeric_pair(
    op: &'static str,
    a: &Value,
    b: &Value,
    span: Span,
) -> Result<(f64, f64), EvalError> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Ok((*x, *y)),
        _ => Err(errors::op_type_error(
            op,
            &[a.type_name(), b.type_name()],
            span,
        )),
    }
}

fn integer_index(op: &'static str, n: f64, span: Span) -> Result<i64, EvalError> {
    if n.is_finite() && n.fract() == 0.0 {
        Ok(n as i64)
    } else {
        Err(errors::type_error(
            format!("Tried to {op} with non-integer index {}", format_number(n)),
            span,
        ))
    }
}

fn list_snapshot(op: &'static str, value: &Value, span: Span) -> Result<Vec<Value>, EvalError> {
    match value {
        Value::List(items) => Ok(items.borrow().clone()),
        other => Err(errors::op_type_error(op, &[other.type_name()], span)),
    }
}

// ─── Output and coercions ───────────────────────────────────────────────

/// Variadic: the space-joined `String` forms of the arguments plus a
/// newline. Returns `None`.
fn print(interp: &mut Interpreter<'_>, _span: Span, args: &[Value]) -> EvalResult {
    let line = args
        .iter()
        .map(Value::to_display_string)
        .collect::<Vec<_>>()
        .join(" ");
    interp.printer().println(&line);
    Ok(Value::None)
}

fn string_coerce(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 1, span)?;
    Ok(Value::string(args[0].to_display_string()))
}

fn inspect(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 1, span)?;
    Ok(Value::string(args[0].inspect()))
}

fn bool_coerce(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 1, span)?;
    Ok(Value::Bool(args[0].is_truthy()))
}

fn int_coerce(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 1, span)?;
    match &args[0] {
        Value::None => Ok(Value::Number(0.0)),
        Value::Bool(b) => Ok(Value::Number(f64::from(*b))),
        Value::Number(n) => Ok(Value::Number(n.floor())),
        Value::Str(s) => match s.trim().parse::<f64>() {
            Ok(n) => Ok(Value::Number(n.floor())),
            Err(_) => Err(errors::type_error(
                format!("Tried to Int {}", args[0].inspect()),
                span,
            )),
        },
        other => Err(errors::op_type_error("Int", &[other.type_name()], span)),
    }
}

fn float_coerce(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 1, span)?;
    match &args[0] {
        Value::None => Ok(Value::Number(0.0)),
        Value::Bool(b) => Ok(Value::Number(f64::from(*b))),
        Value::Number(n) => Ok(Value::Number(*n)),
        Value::Str(s) => match s.trim().parse::<f64>() {
            Ok(n) => Ok(Value::Number(n)),
            Err(_) => Err(errors::type_error(
                format!("Tried to Float {}", args[0].inspect()),
                span,
            )),
        },
        other => Err(errors::op_type_error("Float", &[other.type_name()], span)),
    }
}

// ─── Collections ────────────────────────────────────────────────────────

fn size(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 1, span)?;
    match &args[0] {
        Value::List(items) => Ok(Value::Number(items.borrow().len() as f64)),
        Value::Str(s) => Ok(Value::Number(s.chars().count() as f64)),
        other => Err(errors::op_type_error("Size", &[other.type_name()], span)),
    }
}

/// Bounds-checked indexing. Plain indexes do not wrap: negative and
/// too-large indexes both raise.
fn get_item(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 2, span)?;
    match (&args[0], &args[1]) {
        (Value::List(items), Value::Number(n)) => {
            let items = items.borrow();
            let index = integer_index("GetItem", *n, span)?;
            if index < 0 || index as usize >= items.len() {
                return Err(errors::index_out_of_bounds(*n, items.len(), span));
            }
            Ok(items[index as usize].clone())
        }
        (Value::Str(s), Value::Number(n)) => {
            let index = integer_index("GetItem", *n, span)?;
            let count = s.chars().count();
            if index < 0 || index as usize >= count {
                return Err(errors::index_out_of_bounds(*n, count, span));
            }
            match s.chars().nth(index as usize) {
                Some(c) => Ok(Value::string(c.to_string())),
                None => Err(errors::index_out_of_bounds(*n, count, span)),
            }
        }
        (a, b) => Err(errors::op_type_error(
            "GetItem",
            &[a.type_name(), b.type_name()],
            span,
        )),
    }
}

fn set_item(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 3, span)?;
    match (&args[0], &args[1]) {
        (Value::List(items), Value::Number(n)) => {
            let mut items = items.borrow_mut();
            let index = integer_index("SetItem", *n, span)?;
            if index < 0 || index as usize >= items.len() {
                return Err(errors::index_out_of_bounds(*n, items.len(), span));
            }
            items[index as usize] = args[2].clone();
            Ok(args[2].clone())
        }
        (a, b) => Err(errors::op_type_error(
            "SetItem",
            &[a.type_name(), b.type_name()],
            span,
        )),
    }
}

/// `Slice(x, lower, upper, step)` with Python-style negative-index
/// wraparound and clamping. Only unit step is supported.
fn slice_builtin(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 4, span)?;
    match &args[3] {
        Value::None => {}
        Value::Number(n) if *n == 1.0 => {}
        Value::Number(_) => {
            return Err(errors::unsupported("Slice step other than 1", span));
        }
        other => {
            return Err(errors::op_type_error(
                "Slice",
                &[args[0].type_name(), other.type_name()],
                span,
            ));
        }
    }
    match &args[0] {
        Value::List(items) => {
            let items = items.borrow();
            let (lower, upper) = resolve_bounds(&args[1], &args[2], items.len(), span)?;
            Ok(Value::list(items[lower..upper].to_vec()))
        }
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let (lower, upper) = resolve_bounds(&args[1], &args[2], chars.len(), span)?;
            Ok(Value::string(chars[lower..upper].iter().collect::<String>()))
        }
        other => Err(errors::op_type_error("Slice", &[other.type_name()], span)),
    }
}

fn resolve_bounds(
    lower: &Value,
    upper: &Value,
    len: usize,
    span: Span,
) -> Result<(usize, usize), EvalError> {
    let lower = resolve_bound(lower, len, 0, span)?;
    let upper = resolve_bound(upper, len, len, span)?;
    Ok((lower, upper.max(lower)))
}

fn resolve_bound(
    value: &Value,
    len: usize,
    default: usize,
    span: Span,
) -> Result<usize, EvalError> {
    match value {
        Value::None => Ok(default),
        Value::Number(n) => {
            let index = integer_index("Slice", *n, span)?;
            let index = if index < 0 { index + len as i64 } else { index };
            Ok(index.clamp(0, len as i64) as usize)
        }
        other => Err(errors::op_type_error("Slice", &[other.type_name()], span)),
    }
}

fn push(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 2, span)?;
    match &args[0] {
        Value::List(items) => {
            items.borrow_mut().push(args[1].clone());
            Ok(Value::None)
        }
        other => Err(errors::op_type_error(
            "Push",
            &[other.type_name(), args[1].type_name()],
            span,
        )),
    }
}

// ─── Higher-order collection builtins ───────────────────────────────────
//
// These iterate over a snapshot of the list, so a callback mutating the
// receiver does not invalidate the iteration.

fn map_values(
    interp: &mut Interpreter<'_>,
    span: Span,
    f: &Value,
    xs: &Value,
) -> EvalResult {
    let items = list_snapshot("Map", xs, span)?;
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        out.push(interp.call_value(f.clone(), vec![item], span)?);
    }
    Ok(Value::list(out))
}

fn each_values(
    interp: &mut Interpreter<'_>,
    span: Span,
    f: &Value,
    xs: &Value,
) -> EvalResult {
    let items = list_snapshot("Each", xs, span)?;
    for item in items {
        interp.call_value(f.clone(), vec![item], span)?;
    }
    Ok(Value::None)
}

fn fold_values(
    interp: &mut Interpreter<'_>,
    span: Span,
    f: &Value,
    init: Value,
    xs: &Value,
) -> EvalResult {
    let items = list_snapshot("Fold", xs, span)?;
    let mut acc = init;
    for item in items {
        acc = interp.call_value(f.clone(), vec![acc, item], span)?;
    }
    Ok(acc)
}

fn reduce_values(
    interp: &mut Interpreter<'_>,
    span: Span,
    f: &Value,
    xs: &Value,
) -> EvalResult {
    let items = list_snapshot("Reduce", xs, span)?;
    let mut iter = items.into_iter();
    let Some(mut acc) = iter.next() else {
        return Err(errors::empty_reduce(span));
    };
    for item in iter {
        acc = interp.call_value(f.clone(), vec![acc, item], span)?;
    }
    Ok(acc)
}

fn map(interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 2, span)?;
    map_values(interp, span, &args[0], &args[1])
}

fn each(interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 2, span)?;
    each_values(interp, span, &args[0], &args[1])
}

fn fold(interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 3, span)?;
    fold_values(interp, span, &args[0], args[1].clone(), &args[2])
}

fn reduce(interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 2, span)?;
    reduce_values(interp, span, &args[0], &args[1])
}

fn method_map(interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 2, span)?;
    map_values(interp, span, &args[1], &args[0])
}

fn method_each(interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 2, span)?;
    each_values(interp, span, &args[1], &args[0])
}

fn method_fold(interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 3, span)?;
    fold_values(interp, span, &args[1], args[2].clone(), &args[0])
}

fn method_reduce(interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 2, span)?;
    reduce_values(interp, span, &args[1], &args[0])
}

// ─── Arithmetic ─────────────────────────────────────────────────────────

/// Number+Number addition and String+String concatenation only.
fn add(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 2, span)?;
    match (&args[0], &args[1]) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::Str(a), Value::Str(b)) => Ok(Value::string(format!("{}{}", **a, **b))),
        (a, b) => Err(errors::op_type_error(
            "Add",
            &[a.type_name(), b.type_name()],
            span,
        )),
    }
}

fn subtract(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 2, span)?;
    let (a, b) = numeric_pair("Subtract", &args[0], &args[1], span)?;
    Ok(Value::Number(a - b))
}

fn multiply(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 2, span)?;
    let (a, b) = numeric_pair("Multiply", &args[0], &args[1], span)?;
    Ok(Value::Number(a * b))
}

fn divide(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 2, span)?;
    let (a, b) = numeric_pair("Divide", &args[0], &args[1], span)?;
    Ok(Value::Number(a / b))
}

fn modulo(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 2, span)?;
    let (a, b) = numeric_pair("Modulo", &args[0], &args[1], span)?;
    Ok(Value::Number(a % b))
}

fn negate(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 1, span)?;
    match &args[0] {
        Value::Number(n) => Ok(Value::Number(-n)),
        other => Err(errors::op_type_error("Negate", &[other.type_name()], span)),
    }
}

// ─── Comparison and identity ────────────────────────────────────────────

fn equal(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 2, span)?;
    Ok(Value::Bool(args[0].equals(&args[1])))
}

fn not(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 1, span)?;
    Ok(Value::Bool(!args[0].is_truthy()))
}

fn is(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 2, span)?;
    Ok(Value::Bool(args[0].identical(&args[1])))
}

fn less_than_impl(
    op: &'static str,
    a: &Value,
    b: &Value,
    span: Span,
) -> Result<bool, EvalError> {
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => Ok(!*a && *b),
        (Value::Number(a), Value::Number(b)) => Ok(a < b),
        (Value::Str(a), Value::Str(b)) => Ok(**a < **b),
        _ => Err(errors::op_type_error(
            op,
            &[a.type_name(), b.type_name()],
            span,
        )),
    }
}

fn less_than(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 2, span)?;
    Ok(Value::Bool(less_than_impl(
        "LessThan", &args[0], &args[1], span,
    )?))
}

/// Derived as `Equal or LessThan`.
fn less_than_or_equal(
    _interp: &mut Interpreter<'_>,
    span: Span,
    args: &[Value],
) -> EvalResult {
    expect_args(args, 2, span)?;
    let result = args[0].equals(&args[1])
        || less_than_impl("LessThanOrEqual", &args[0], &args[1], span)?;
    Ok(Value::Bool(result))
}

/// Derived as `Not(LessThanOrEqual)`.
fn greater_than(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 2, span)?;
    let le = args[0].equals(&args[1])
        || less_than_impl("GreaterThan", &args[0], &args[1], span)?;
    Ok(Value::Bool(!le))
}

/// Derived as `Not(LessThan)`.
fn greater_than_or_equal(
    _interp: &mut Interpreter<'_>,
    span: Span,
    args: &[Value],
) -> EvalResult {
    expect_args(args, 2, span)?;
    Ok(Value::Bool(!less_than_impl(
        "GreaterThanOrEqual",
        &args[0],
        &args[1],
        span,
    )?))
}

// ─── Strings ────────────────────────────────────────────────────────────

fn string_arg<'v>(
    op: &'static str,
    args: &'v [Value],
    span: Span,
) -> Result<&'v str, EvalError> {
    match &args[0] {
        Value::Str(s) => Ok(s),
        other => Err(errors::op_type_error(op, &[other.type_name()], span)),
    }
}

fn split_words(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 1, span)?;
    let s = string_arg("SplitWords", args, span)?;
    Ok(Value::list(
        s.split_whitespace().map(Value::string).collect(),
    ))
}

fn split_lines(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 1, span)?;
    let s = string_arg("SplitLines", args, span)?;
    Ok(Value::list(s.lines().map(Value::string).collect()))
}

fn strip(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 1, span)?;
    let s = string_arg("Strip", args, span)?;
    Ok(Value::string(s.trim()))
}

// ─── Assertions and attributes ──────────────────────────────────────────

/// `Assert(condition)` or `Assert(condition, message)`.
fn assert_builtin(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    if args.is_empty() || args.len() > 2 {
        return Err(errors::arity_mismatch(1, args.len(), span));
    }
    if args[0].is_truthy() {
        return Ok(Value::None);
    }
    let message = args.get(1).map(Value::to_display_string).unwrap_or_default();
    Err(errors::assertion_failed(message, span))
}

/// Attribute dispatch: per-kind method table, then the default table. A hit
/// returns the method bound to its receiver; a miss raises.
fn get_attribute(interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 2, span)?;
    let attribute = match &args[1] {
        Value::Str(s) => (**s).clone(),
        other => {
            return Err(errors::op_type_error(
                "GetAttribute",
                &[args[0].type_name(), other.type_name()],
                span,
            ));
        }
    };
    let name = interp.interner().intern(&attribute);
    match interp.methods().lookup(args[0].type_name(), name) {
        Some(method) => Ok(Value::Bound(Heap::new(BoundMethod {
            receiver: args[0].clone(),
            method,
        }))),
        None => Err(errors::attribute_error(
            args[0].type_name(),
            &attribute,
            span,
        )),
    }
}

/// No value kind has writable attributes, so an attribute-set target is
/// always a type error naming the kind.
fn set_attribute(_interp: &mut Interpreter<'_>, span: Span, args: &[Value]) -> EvalResult {
    expect_args(args, 3, span)?;
    Err(errors::op_type_error(
        "SetAttribute",
        &[args[0].type_name()],
        span,
    ))
}
