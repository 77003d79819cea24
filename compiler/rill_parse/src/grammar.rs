//! Expression grammar, lowest to highest precedence:
//! assignment → `or` → `and` → comparison → additive → multiplicative →
//! unary `-` → postfix (call, index, slice, attribute) → primary.
//!
//! Comparison takes at most one operator per level, mutually exclusive;
//! `a < b < c` is a parse error at the second operator rather than a silent
//! chain of nested calls.

use rill_ir::{ExprId, ExprKind, FuncData, Name, Span, TokenKind, VarDecl};

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// Parse the whole token stream as a module body.
    pub(crate) fn module_body(&mut self) -> Result<rill_ir::ExprRange, ParseError> {
        let mut exprs = Vec::new();
        loop {
            self.cursor.skip_newlines();
            if self.cursor.at_eof() {
                break;
            }
            exprs.push(self.expression()?);
        }
        Ok(self.arena.alloc_list(exprs))
    }

    pub(crate) fn expression(&mut self) -> Result<ExprId, ParseError> {
        self.assignment()
    }

    /// Allocate a call to a root-scope builtin: `Name(args...)`.
    pub(crate) fn builtin_call(
        &mut self,
        name: Name,
        args: Vec<ExprId>,
        span: Span,
    ) -> ExprId {
        let callee = self.arena.alloc(ExprKind::Ident(name), span);
        let args = self.arena.alloc_list(args);
        self.arena.alloc(ExprKind::Call { callee, args }, span)
    }

    /// Allocate a reference to the root-scope `None` binding.
    pub(crate) fn none_expr(&mut self, span: Span) -> ExprId {
        self.arena.alloc(ExprKind::Ident(self.names.none), span)
    }

    fn span_of(&self, id: ExprId) -> Span {
        self.arena.expr(id).span
    }

    fn assignment(&mut self) -> Result<ExprId, ParseError> {
        let expr = self.or_expression()?;
        if self.cursor.eat(TokenKind::Eq) {
            let value = self.assignment()?;
            return self.rewrite_assign(expr, value);
        }
        Ok(expr)
    }

    fn or_expression(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.and_expression()?;
        while self.cursor.eat(TokenKind::Or) {
            let right = self.and_expression()?;
            let span = self.span_of(expr).merge(self.span_of(right));
            expr = self.arena.alloc(ExprKind::Or { left: expr, right }, span);
        }
        Ok(expr)
    }

    fn and_expression(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.comparison()?;
        while self.cursor.eat(TokenKind::And) {
            let right = self.comparison()?;
            let span = self.span_of(expr).merge(self.span_of(right));
            expr = self.arena.alloc(ExprKind::And { left: expr, right }, span);
        }
        Ok(expr)
    }

    /// Comparison: `is == != < <= > >=`, left operand first, at most one
    /// operator per level. `!=` desugars to `Not(Equal(a, b))`.
    fn comparison(&mut self) -> Result<ExprId, ParseError> {
        let expr = self.additive()?;
        let op = match self.cursor.current_kind() {
            TokenKind::Is => Some(self.names.is),
            TokenKind::EqEq => Some(self.names.equal),
            TokenKind::Lt => Some(self.names.less_than),
            TokenKind::LtEq => Some(self.names.less_than_or_equal),
            TokenKind::Gt => Some(self.names.greater_than),
            TokenKind::GtEq => Some(self.names.greater_than_or_equal),
            TokenKind::NotEq => None,
            _ => return Ok(expr),
        };
        if self.cursor.eat(TokenKind::NotEq) {
            let rhs = self.additive()?;
            let span = self.span_of(expr).merge(self.span_of(rhs));
            let equal = self.builtin_call(self.names.equal, vec![expr, rhs], span);
            return Ok(self.builtin_call(self.names.not, vec![equal], span));
        }
        let Some(op) = op else { return Ok(expr) };
        self.cursor.advance();
        let rhs = self.additive()?;
        let span = self.span_of(expr).merge(self.span_of(rhs));
        Ok(self.builtin_call(op, vec![expr, rhs], span))
    }

    fn additive(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.multiplicative()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Plus => self.names.add,
                TokenKind::Minus => self.names.subtract,
                _ => break,
            };
            self.cursor.advance();
            let rhs = self.multiplicative()?;
            let span = self.span_of(expr).merge(self.span_of(rhs));
            expr = self.builtin_call(op, vec![expr, rhs], span);
        }
        Ok(expr)
    }

    fn multiplicative(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.unary()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Star => self.names.multiply,
                TokenKind::Slash => self.names.divide,
                TokenKind::Percent => self.names.modulo,
                _ => break,
            };
            self.cursor.advance();
            let rhs = self.unary()?;
            let span = self.span_of(expr).merge(self.span_of(rhs));
            expr = self.builtin_call(op, vec![expr, rhs], span);
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<ExprId, ParseError> {
        if self.cursor.check(TokenKind::Minus) {
            let op_span = self.cursor.current_span();
            self.cursor.advance();
            let operand = self.unary()?;
            let span = op_span.merge(self.span_of(operand));
            return Ok(self.builtin_call(self.names.negate, vec![operand], span));
        }
        self.postfix()
    }

    fn postfix(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.primary()?;
        loop {
            match self.cursor.current_kind() {
                TokenKind::LParen => {
                    self.cursor.advance();
                    let args = self.call_arguments()?;
                    let span = self.span_of(expr).merge(self.cursor.previous_span());
                    let args = self.arena.alloc_list(args);
                    expr = self.arena.alloc(ExprKind::Call { callee: expr, args }, span);
                }
                TokenKind::LBracket => {
                    self.cursor.advance();
                    expr = self.index_or_slice(expr)?;
                }
                TokenKind::Dot => {
                    self.cursor.advance();
                    let TokenKind::Ident(attr) = self.cursor.current_kind() else {
                        return Err(ParseError::new(
                            ParseErrorKind::Expected {
                                expected: "identifier",
                                found: self.cursor.current_kind().as_str(),
                            },
                            self.cursor.current_span(),
                        ));
                    };
                    let attr_span = self.cursor.current_span();
                    self.cursor.advance();
                    let attr_str = self.arena.alloc(ExprKind::Str(attr), attr_span);
                    let span = self.span_of(expr).merge(attr_span);
                    expr = self.builtin_call(
                        self.names.get_attribute,
                        vec![expr, attr_str],
                        span,
                    );
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn call_arguments(&mut self) -> Result<Vec<ExprId>, ParseError> {
        let mut args = Vec::new();
        loop {
            if self.cursor.eat(TokenKind::RParen) {
                break;
            }
            if self.cursor.at_eof() {
                self.cursor.expect(TokenKind::RParen)?;
            }
            args.push(self.expression()?);
            self.cursor.eat(TokenKind::Comma);
        }
        Ok(args)
    }

    /// `recv[i]` → `GetItem(recv, i)`;
    /// `recv[a:b]` / `recv[a:b:c]` → `Slice(recv, a, b, c)` with omitted
    /// bounds filled in as `None`.
    fn index_or_slice(&mut self, recv: ExprId) -> Result<ExprId, ParseError> {
        let open_span = self.cursor.previous_span();
        if !self.cursor.check(TokenKind::Colon) {
            let index = self.expression()?;
            if !self.cursor.eat(TokenKind::Colon) {
                // Plain index.
                self.cursor.expect(TokenKind::RBracket)?;
                let span = self.span_of(recv).merge(self.cursor.previous_span());
                return Ok(self.builtin_call(self.names.get_item, vec![recv, index], span));
            }
            return self.finish_slice(recv, Some(index), open_span);
        }
        self.cursor.advance();
        self.finish_slice(recv, None, open_span)
    }

    /// Parse the rest of a slice after the first `:` has been consumed.
    fn finish_slice(
        &mut self,
        recv: ExprId,
        lower: Option<ExprId>,
        open_span: Span,
    ) -> Result<ExprId, ParseError> {
        let upper = if self.cursor.check(TokenKind::Colon)
            || self.cursor.check(TokenKind::RBracket)
        {
            None
        } else {
            Some(self.expression()?)
        };
        let step = if self.cursor.eat(TokenKind::Colon) {
            if self.cursor.check(TokenKind::RBracket) {
                None
            } else {
                Some(self.expression()?)
            }
        } else {
            None
        };
        self.cursor.expect(TokenKind::RBracket)?;
        let close_span = self.cursor.previous_span();

        let lower = lower.unwrap_or_else(|| self.none_expr(open_span));
        let upper = upper.unwrap_or_else(|| self.none_expr(close_span));
        let step = step.unwrap_or_else(|| self.none_expr(close_span));
        let span = self.span_of(recv).merge(close_span);
        Ok(self.builtin_call(self.names.slice, vec![recv, lower, upper, step], span))
    }

    fn primary(&mut self) -> Result<ExprId, ParseError> {
        let start_span = self.cursor.current_span();
        match self.cursor.current_kind() {
            TokenKind::LParen => {
                self.cursor.advance();
                let expr = self.expression()?;
                self.cursor.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::LBracket => {
                self.cursor.advance();
                self.list_literal(start_span)
            }
            TokenKind::Indent => {
                self.cursor.advance();
                self.block(start_span)
            }
            TokenKind::If => {
                self.cursor.advance();
                let test = self.expression()?;
                self.cursor.skip_newlines();
                let then_branch = self.expression()?;
                self.cursor.skip_newlines();
                let else_branch = if self.cursor.eat(TokenKind::Else) {
                    self.cursor.skip_newlines();
                    self.expression()?
                } else {
                    ExprId::INVALID
                };
                let end = if else_branch.is_present() {
                    self.span_of(else_branch)
                } else {
                    self.span_of(then_branch)
                };
                let span = start_span.merge(end);
                Ok(self.arena.alloc(
                    ExprKind::If {
                        test,
                        then_branch,
                        else_branch,
                    },
                    span,
                ))
            }
            TokenKind::While => {
                self.cursor.advance();
                let test = self.expression()?;
                self.cursor.skip_newlines();
                let body = self.expression()?;
                let span = start_span.merge(self.span_of(body));
                Ok(self.arena.alloc(ExprKind::While { test, body }, span))
            }
            TokenKind::Backslash => {
                self.cursor.advance();
                self.lambda(start_span)
            }
            TokenKind::Return => {
                self.cursor.advance();
                let value = if self.return_value_follows() {
                    self.expression()?
                } else {
                    ExprId::INVALID
                };
                let span = if value.is_present() {
                    start_span.merge(self.span_of(value))
                } else {
                    start_span
                };
                Ok(self.arena.alloc(ExprKind::Return(value), span))
            }
            TokenKind::Break => {
                self.cursor.advance();
                Ok(self.arena.alloc(ExprKind::Break, start_span))
            }
            TokenKind::Var => {
                self.cursor.advance();
                self.var_declarations(start_span)
            }
            TokenKind::Ident(name) => {
                self.cursor.advance();
                Ok(self.arena.alloc(ExprKind::Ident(name), start_span))
            }
            TokenKind::Number(value) => {
                self.cursor.advance();
                Ok(self.arena.alloc(ExprKind::Number(value), start_span))
            }
            TokenKind::Str(value) => {
                self.cursor.advance();
                Ok(self.arena.alloc(ExprKind::Str(value), start_span))
            }
            other => Err(ParseError::new(
                ParseErrorKind::ExpectedExpression {
                    found: other.as_str(),
                },
                start_span,
            )),
        }
    }

    /// `[a, b, ... rest]` — a `...` element splices (rvalue) or captures the
    /// remainder (assignment target).
    fn list_literal(&mut self, start_span: Span) -> Result<ExprId, ParseError> {
        let mut elements = Vec::new();
        loop {
            if self.cursor.eat(TokenKind::RBracket) {
                break;
            }
            if self.cursor.at_eof() {
                self.cursor.expect(TokenKind::RBracket)?;
            }
            if self.cursor.check(TokenKind::Ellipsis) {
                let splat_span = self.cursor.current_span();
                self.cursor.advance();
                let inner = self.expression()?;
                let span = splat_span.merge(self.span_of(inner));
                elements.push(self.arena.alloc(ExprKind::Splat(inner), span));
            } else {
                elements.push(self.expression()?);
            }
            self.cursor.eat(TokenKind::Comma);
        }
        let span = start_span.merge(self.cursor.previous_span());
        let range = self.arena.alloc_list(elements);
        Ok(self.arena.alloc(ExprKind::List(range), span))
    }

    /// `Indent expr* Dedent` — the block's value is its last expression's.
    fn block(&mut self, start_span: Span) -> Result<ExprId, ParseError> {
        let mut exprs = Vec::new();
        loop {
            self.cursor.skip_newlines();
            if self.cursor.eat(TokenKind::Dedent) {
                break;
            }
            if self.cursor.at_eof() {
                self.cursor.expect(TokenKind::Dedent)?;
            }
            exprs.push(self.expression()?);
        }
        let span = start_span.merge(self.cursor.previous_span());
        let range = self.arena.alloc_list(exprs);
        Ok(self.arena.alloc(ExprKind::Block(range), span))
    }

    /// `\ a b . expr` or `\ a b` followed by an indented block.
    fn lambda(&mut self, start_span: Span) -> Result<ExprId, ParseError> {
        let mut params = Vec::new();
        while let TokenKind::Ident(name) = self.cursor.current_kind() {
            self.cursor.advance();
            params.push(name);
        }
        self.cursor.eat(TokenKind::Dot);
        self.cursor.skip_newlines();
        let body = self.expression()?;
        let span = start_span.merge(self.span_of(body));
        let func = self.arena.alloc_func(FuncData {
            params,
            body,
            locals: Vec::new(),
        });
        Ok(self.arena.alloc(ExprKind::Func(func), span))
    }

    fn var_declarations(&mut self, start_span: Span) -> Result<ExprId, ParseError> {
        let mut decls = Vec::new();
        loop {
            let TokenKind::Ident(name) = self.cursor.current_kind() else {
                return Err(ParseError::new(
                    ParseErrorKind::Expected {
                        expected: "identifier",
                        found: self.cursor.current_kind().as_str(),
                    },
                    self.cursor.current_span(),
                ));
            };
            self.cursor.advance();
            let init = if self.cursor.eat(TokenKind::Eq) {
                self.expression()?
            } else {
                ExprId::INVALID
            };
            decls.push(VarDecl { name, init });
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        let span = start_span.merge(self.cursor.previous_span());
        let range = self.arena.alloc_var_decls(decls);
        Ok(self.arena.alloc(ExprKind::Var(range), span))
    }

    /// Whether a `return` is followed by a value on the same line.
    fn return_value_follows(&self) -> bool {
        !matches!(
            self.cursor.current_kind(),
            TokenKind::Newline
                | TokenKind::Dedent
                | TokenKind::Eof
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::Comma
                | TokenKind::Else
        )
    }
}
