//! Assignment-target rewriting.
//!
//! The left-hand side of `=` is parsed as an ordinary expression and then
//! transformed: a bare name becomes a scope-binding `Assign`, an
//! attribute-get call becomes a `SetAttribute` call, an index call becomes a
//! `SetItem` call, and a list-literal target destructures element-wise
//! through a fresh temporary, with a trailing `... rest` element capturing
//! the remainder slice. Anything else is not assignable.

use rill_ir::{ExprId, ExprKind, Span};

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    pub(crate) fn rewrite_assign(
        &mut self,
        target: ExprId,
        value: ExprId,
    ) -> Result<ExprId, ParseError> {
        let target_expr = *self.arena.expr(target);
        let value_span = self.arena.expr(value).span;
        let span = target_expr.span.merge(value_span);

        match target_expr.kind {
            ExprKind::Ident(name) => Ok(self
                .arena
                .alloc(ExprKind::Assign { target: name, value }, span)),

            ExprKind::Call { callee, args } => {
                let callee_kind = self.arena.expr(callee).kind;
                let ExprKind::Ident(callee_name) = callee_kind else {
                    return Err(self.not_assignable("call", target_expr.span));
                };
                if callee_name == self.names.get_attribute {
                    let [owner, attr] = self.two_args(args);
                    Ok(self.builtin_call(
                        self.names.set_attribute,
                        vec![owner, attr, value],
                        span,
                    ))
                } else if callee_name == self.names.get_item {
                    let [owner, index] = self.two_args(args);
                    Ok(self.builtin_call(
                        self.names.set_item,
                        vec![owner, index, value],
                        span,
                    ))
                } else if callee_name == self.names.slice {
                    Err(self.not_assignable("slice", target_expr.span))
                } else {
                    Err(self.not_assignable("call", target_expr.span))
                }
            }

            ExprKind::List(elements) => self.destructure(target_expr.span, elements, value),

            other => Err(self.not_assignable(describe(other), target_expr.span)),
        }
    }

    /// `[a, b, ... rest] = value` becomes a block binding a fresh temporary
    /// to the value and assigning each element target from `GetItem(tmp, i)`
    /// (or `Slice(tmp, i, None, None)` for the trailing splat).
    fn destructure(
        &mut self,
        target_span: Span,
        elements: rill_ir::ExprRange,
        value: ExprId,
    ) -> Result<ExprId, ParseError> {
        self.tmp_counter += 1;
        let tmp = self
            .interner
            .intern(&format!("__tmp{}", self.tmp_counter));
        let span = target_span.merge(self.arena.expr(value).span);

        let mut exprs = vec![self
            .arena
            .alloc(ExprKind::Assign { target: tmp, value }, span)];

        let elements: Vec<ExprId> = self.arena.list(elements).to_vec();
        let count = elements.len();
        for (i, element) in elements.into_iter().enumerate() {
            let element_expr = *self.arena.expr(element);
            let tmp_ref = self.arena.alloc(ExprKind::Ident(tmp), element_expr.span);
            let index = self
                .arena
                .alloc(ExprKind::Number(i as f64), element_expr.span);
            match element_expr.kind {
                ExprKind::Splat(inner) => {
                    if i + 1 != count {
                        return Err(self.not_assignable("non-trailing splat", element_expr.span));
                    }
                    let lower_none = self.none_expr(element_expr.span);
                    let upper_none = self.none_expr(element_expr.span);
                    let rest = self.builtin_call(
                        self.names.slice,
                        vec![tmp_ref, index, lower_none, upper_none],
                        element_expr.span,
                    );
                    exprs.push(self.rewrite_assign(inner, rest)?);
                }
                _ => {
                    let item = self.builtin_call(
                        self.names.get_item,
                        vec![tmp_ref, index],
                        element_expr.span,
                    );
                    exprs.push(self.rewrite_assign(element, item)?);
                }
            }
        }

        let range = self.arena.alloc_list(exprs);
        Ok(self.arena.alloc(ExprKind::Block(range), span))
    }

    fn two_args(&self, args: rill_ir::ExprRange) -> [ExprId; 2] {
        let list = self.arena.list(args);
        [list[0], list[1]]
    }

    fn not_assignable(&self, target: &'static str, span: Span) -> ParseError {
        ParseError::new(ParseErrorKind::NotAssignable { target }, span)
    }
}

/// Node-kind description used in "X is not assignable" messages.
fn describe(kind: ExprKind) -> &'static str {
    match kind {
        ExprKind::Number(_) => "number",
        ExprKind::Str(_) => "string",
        ExprKind::Ident(_) => "name",
        ExprKind::List(_) => "list",
        ExprKind::Splat(_) => "splat",
        ExprKind::Block(_) => "block",
        ExprKind::If { .. } => "if",
        ExprKind::While { .. } => "while",
        ExprKind::And { .. } => "and",
        ExprKind::Or { .. } => "or",
        ExprKind::Assign { .. } => "assignment",
        ExprKind::Call { .. } => "call",
        ExprKind::Func(_) => "function",
        ExprKind::Var(_) => "var",
        ExprKind::Return(_) => "return",
        ExprKind::Break => "break",
    }
}
