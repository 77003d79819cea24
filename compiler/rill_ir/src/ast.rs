//! Flat arena AST.
//!
//! Expression nodes live in one contiguous array; children are referenced by
//! [`ExprId`] indices and child lists by [`ExprRange`] slices of a shared side
//! array. Function bodies and `var` declaration groups sit in their own side
//! tables so `ExprKind` stays `Copy`.
//!
//! The declared-variable sets on [`Module`] and [`FuncData`] are filled in by
//! a separate analysis pass after parsing; nodes are otherwise immutable once
//! built.

use std::fmt;

use crate::{Name, Span};

/// Index into the expression arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    /// Sentinel for an absent child (e.g. `if` without `else`).
    pub const INVALID: ExprId = ExprId(u32::MAX);

    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this ID refers to a real node (not the sentinel).
    #[inline]
    pub const fn is_present(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_present() {
            write!(f, "ExprId({})", self.0)
        } else {
            write!(f, "ExprId::INVALID")
        }
    }
}

impl Default for ExprId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Range of expression IDs in the arena's flattened child list.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ExprRange {
    pub start: u32,
    pub len: u32,
}

impl ExprRange {
    pub const EMPTY: ExprRange = ExprRange { start: 0, len: 0 };

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Index into the arena's function table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct FuncId(u32);

impl FuncId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        FuncId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Range of `var` declarations in the arena's declaration table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct VarRange {
    pub start: u32,
    pub len: u32,
}

/// One `name [= init]` entry of a `var` expression.
/// `init` is `ExprId::INVALID` when no initializer was written.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VarDecl {
    pub name: Name,
    pub init: ExprId,
}

/// Function literal data: parameters, body, and the declared-variable set
/// computed after parsing (assignment targets and `var` names in the body,
/// excluding the parameters themselves).
#[derive(Clone, Debug, PartialEq)]
pub struct FuncData {
    pub params: Vec<Name>,
    pub body: ExprId,
    pub locals: Vec<Name>,
}

/// Expression node kind. All children are arena indices.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// Number literal: `42`, `1.5`
    Number(f64),

    /// String literal (interned, already unescaped)
    Str(Name),

    /// Variable reference
    Ident(Name),

    /// List literal: `[a, b, c]`. Elements may be `Splat` nodes.
    List(ExprRange),

    /// Splat element inside a list literal: `... rest`
    Splat(ExprId),

    /// Indented block; value is the last expression's value.
    Block(ExprRange),

    /// `if test body [else elsebody]`; `else_branch` may be INVALID.
    If {
        test: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    },

    /// `while test body`
    While { test: ExprId, body: ExprId },

    /// Short-circuit `and`
    And { left: ExprId, right: ExprId },

    /// Short-circuit `or`
    Or { left: ExprId, right: ExprId },

    /// Scope-binding assignment to a bare name. Attribute, index and
    /// destructuring targets are rewritten away by the parser before this
    /// node is built.
    Assign { target: Name, value: ExprId },

    /// Call: `callee(args...)`. Operator applications and index/attribute
    /// access desugar to calls of root-scope builtins.
    Call { callee: ExprId, args: ExprRange },

    /// Function literal: `\ a b . body`
    Func(FuncId),

    /// `var x [= e], y [= e], ...`
    Var(VarRange),

    /// `return [value]`; value may be INVALID.
    Return(ExprId),

    /// `break`
    Break,
}

/// Expression node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// Arena holding every expression of one parse.
#[derive(Debug, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    lists: Vec<ExprId>,
    var_decls: Vec<VarDecl>,
    funcs: Vec<FuncData>,
}

impl ExprArena {
    pub fn new() -> Self {
        ExprArena::default()
    }

    /// Allocate a new expression node.
    pub fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        let id = u32::try_from(self.exprs.len()).unwrap_or(u32::MAX);
        self.exprs.push(Expr { kind, span });
        ExprId::new(id)
    }

    /// Get an expression by ID.
    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Number of allocated expressions.
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Flatten a child list into the shared side array.
    pub fn alloc_list(&mut self, ids: Vec<ExprId>) -> ExprRange {
        let start = u32::try_from(self.lists.len()).unwrap_or(u32::MAX);
        let len = u32::try_from(ids.len()).unwrap_or(u32::MAX);
        self.lists.extend(ids);
        ExprRange { start, len }
    }

    /// Resolve a child list.
    #[inline]
    pub fn list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.lists[start..start + range.len()]
    }

    /// Store a group of `var` declarations.
    pub fn alloc_var_decls(&mut self, decls: Vec<VarDecl>) -> VarRange {
        let start = u32::try_from(self.var_decls.len()).unwrap_or(u32::MAX);
        let len = u32::try_from(decls.len()).unwrap_or(u32::MAX);
        self.var_decls.extend(decls);
        VarRange { start, len }
    }

    /// Resolve a `var` declaration group.
    #[inline]
    pub fn var_decls(&self, range: VarRange) -> &[VarDecl] {
        let start = range.start as usize;
        &self.var_decls[start..start + range.len as usize]
    }

    /// Store function literal data.
    pub fn alloc_func(&mut self, data: FuncData) -> FuncId {
        let id = u32::try_from(self.funcs.len()).unwrap_or(u32::MAX);
        self.funcs.push(data);
        FuncId::new(id)
    }

    /// Resolve a function literal.
    #[inline]
    pub fn func(&self, id: FuncId) -> &FuncData {
        &self.funcs[id.index()]
    }

    /// Replace a function's declared-variable set (analysis pass only).
    pub fn set_func_locals(&mut self, id: FuncId, locals: Vec<Name>) {
        self.funcs[id.index()].locals = locals;
    }

    /// IDs of every function literal, in allocation order.
    pub fn func_ids(&self) -> impl Iterator<Item = FuncId> + '_ {
        (0..self.funcs.len()).map(|i| FuncId::new(i as u32))
    }
}

/// A parsed module: the top-level expression sequence plus its
/// declared-variable set.
#[derive(Debug, Default)]
pub struct Module {
    pub body: ExprRange,
    pub locals: Vec<Name>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_and_resolve() {
        let mut arena = ExprArena::new();
        let a = arena.alloc(ExprKind::Number(1.0), Span::new(0, 1));
        let b = arena.alloc(ExprKind::Break, Span::new(2, 7));
        assert_eq!(arena.expr(a).kind, ExprKind::Number(1.0));
        assert_eq!(arena.expr(b).span, Span::new(2, 7));
        assert_eq!(arena.expr_count(), 2);
    }

    #[test]
    fn child_lists_are_flattened() {
        let mut arena = ExprArena::new();
        let a = arena.alloc(ExprKind::Number(1.0), Span::DUMMY);
        let b = arena.alloc(ExprKind::Number(2.0), Span::DUMMY);
        let range = arena.alloc_list(vec![a, b]);
        assert_eq!(arena.list(range), &[a, b]);
        let empty = arena.alloc_list(vec![]);
        assert!(empty.is_empty());
        assert_eq!(arena.list(empty), &[]);
    }

    #[test]
    fn invalid_sentinel_is_absent() {
        assert!(!ExprId::INVALID.is_present());
        assert!(ExprId::new(0).is_present());
        assert_eq!(format!("{:?}", ExprId::INVALID), "ExprId::INVALID");
    }

    #[test]
    fn func_locals_can_be_set_later() {
        let mut arena = ExprArena::new();
        let body = arena.alloc(ExprKind::Break, Span::DUMMY);
        let id = arena.alloc_func(FuncData {
            params: vec![],
            body,
            locals: vec![],
        });
        arena.set_func_locals(id, vec![Name::from_raw(3)]);
        assert_eq!(arena.func(id).locals, vec![Name::from_raw(3)]);
    }
}
