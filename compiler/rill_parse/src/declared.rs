//! Declared-variable analysis.
//!
//! After the tree is built, a bottom-up traversal computes, for the module
//! and for every function literal, the set of names assigned or
//! `var`-declared textually inside it. A nested function's assignments are
//! local to that function (they contribute nothing outward), and its own
//! parameters are excluded from its set. The evaluator pre-declares these
//! sets on scope entry, which is what gives assignment its hoisted,
//! function-scoped semantics.

use rill_ir::{ExprArena, ExprId, ExprKind, FuncId, Name};

/// Annotate every function literal's `locals` and return the module set.
pub(crate) fn annotate(arena: &mut ExprArena, body: rill_ir::ExprRange) -> Vec<Name> {
    let mut module_locals = Vec::new();
    let mut func_locals: Vec<(FuncId, Vec<Name>)> = Vec::new();
    for &expr in &arena.list(body).to_vec() {
        collect(arena, expr, &mut module_locals, &mut func_locals);
    }
    for (func, locals) in func_locals {
        arena.set_func_locals(func, locals);
    }
    module_locals
}

/// Insert preserving first-seen order.
fn add(set: &mut Vec<Name>, name: Name) {
    if !set.contains(&name) {
        set.push(name);
    }
}

fn collect(
    arena: &ExprArena,
    id: ExprId,
    out: &mut Vec<Name>,
    funcs: &mut Vec<(FuncId, Vec<Name>)>,
) {
    match arena.expr(id).kind {
        ExprKind::Number(_) | ExprKind::Str(_) | ExprKind::Ident(_) | ExprKind::Break => {}

        ExprKind::Splat(inner) => collect(arena, inner, out, funcs),

        ExprKind::Return(value) => {
            if value.is_present() {
                collect(arena, value, out, funcs);
            }
        }

        ExprKind::List(range) | ExprKind::Block(range) => {
            for &child in &arena.list(range).to_vec() {
                collect(arena, child, out, funcs);
            }
        }

        ExprKind::If {
            test,
            then_branch,
            else_branch,
        } => {
            collect(arena, test, out, funcs);
            collect(arena, then_branch, out, funcs);
            if else_branch.is_present() {
                collect(arena, else_branch, out, funcs);
            }
        }

        ExprKind::While { test, body } => {
            collect(arena, test, out, funcs);
            collect(arena, body, out, funcs);
        }

        ExprKind::And { left, right } | ExprKind::Or { left, right } => {
            collect(arena, left, out, funcs);
            collect(arena, right, out, funcs);
        }

        ExprKind::Assign { target, value } => {
            add(out, target);
            collect(arena, value, out, funcs);
        }

        ExprKind::Call { callee, args } => {
            collect(arena, callee, out, funcs);
            for &arg in &arena.list(args).to_vec() {
                collect(arena, arg, out, funcs);
            }
        }

        ExprKind::Var(range) => {
            for decl in arena.var_decls(range).to_vec() {
                add(out, decl.name);
                if decl.init.is_present() {
                    collect(arena, decl.init, out, funcs);
                }
            }
        }

        ExprKind::Func(func) => {
            // A function's assignments are its own; parameters do not leak
            // outward and are not locals of the function either.
            let data = arena.func(func);
            let params = data.params.clone();
            let body = data.body;
            let mut inner = Vec::new();
            collect(arena, body, &mut inner, funcs);
            inner.retain(|name| !params.contains(name));
            funcs.push((func, inner));
        }
    }
}
