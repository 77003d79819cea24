//! Tree-walking interpreter.
//!
//! `eval` matches exhaustively on [`ExprKind`] and returns an [`Outcome`]:
//! plain values complete normally, `Break`/`Return` propagate until a loop or
//! call boundary absorbs them. Genuine errors travel on the `Err` channel and
//! pick up call-site spans as they unwind through user-function calls.

use rill_ir::{ExprArena, ExprId, ExprKind, Module, Span, StringInterner};

use crate::builtins;
use crate::errors::{self, EvalError, EvalResult};
use crate::methods::MethodTables;
use crate::outcome::Outcome;
use crate::print_handler::PrintHandler;
use crate::scope::ScopeRef;
use crate::value::{FunctionValue, Heap, Value};

/// User-call depth budget. Deep recursion in the interpreted program fails
/// with a catchable error instead of exhausting the host stack.
pub const MAX_CALL_DEPTH: usize = 200;

/// Unwrap an evaluation to its value, re-propagating `Break`/`Return`.
macro_rules! propagate {
    ($e:expr) => {
        match $e? {
            Outcome::Value(value) => value,
            flow => return Ok(flow),
        }
    };
}

/// Interpreter state for one module run.
pub struct Interpreter<'a> {
    arena: &'a ExprArena,
    interner: &'a StringInterner,
    printer: PrintHandler,
    methods: MethodTables,
    depth: usize,
}

impl<'a> Interpreter<'a> {
    pub fn new(arena: &'a ExprArena, interner: &'a StringInterner) -> Self {
        Self::with_printer(arena, interner, PrintHandler::Stdout)
    }

    pub fn with_printer(
        arena: &'a ExprArena,
        interner: &'a StringInterner,
        printer: PrintHandler,
    ) -> Self {
        Interpreter {
            arena,
            interner,
            printer,
            methods: MethodTables::new(interner),
            depth: 0,
        }
    }

    pub(crate) fn printer(&self) -> &PrintHandler {
        &self.printer
    }

    pub(crate) fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    pub(crate) fn methods(&self) -> &MethodTables {
        &self.methods
    }

    /// Evaluate a module: a fresh child of the builtin root scope, with the
    /// module's declared-variable set pre-bound to `None`, then the body in
    /// order. The result is the last expression's value.
    pub fn run_module(&mut self, module: &Module) -> EvalResult {
        let root = builtins::root_scope(self.interner);
        self.run_module_in(module, &root)
    }

    /// Evaluate a module under a given root scope (used by tests that need
    /// to pre-seed bindings).
    pub fn run_module_in(&mut self, module: &Module, root: &ScopeRef) -> EvalResult {
        let arena = self.arena;
        let scope = root.child();
        for &name in &module.locals {
            scope.declare(name, Value::None);
        }
        let mut last = Value::None;
        for &id in arena.list(module.body) {
            match self.eval(&scope, id)? {
                Outcome::Value(value) => last = value,
                Outcome::Break => {
                    return Err(errors::break_outside_loop(arena.expr(id).span));
                }
                Outcome::Return(_) => {
                    return Err(errors::return_outside_function(arena.expr(id).span));
                }
            }
        }
        Ok(last)
    }

    /// Evaluate one expression in a scope.
    pub fn eval(&mut self, scope: &ScopeRef, id: ExprId) -> Result<Outcome, EvalError> {
        let arena = self.arena;
        let expr = *arena.expr(id);
        let span = expr.span;

        match expr.kind {
            ExprKind::Number(n) => Ok(Outcome::Value(Value::Number(n))),

            ExprKind::Str(s) => Ok(Outcome::Value(Value::string(self.interner.lookup(s)))),

            ExprKind::Ident(name) => match scope.get(name) {
                Some(value) => Ok(Outcome::Value(value)),
                None => Err(errors::undefined_variable(self.interner.lookup(name), span)),
            },

            ExprKind::List(range) => {
                let mut items = Vec::with_capacity(range.len());
                for &element in arena.list(range) {
                    let element_expr = *arena.expr(element);
                    if let ExprKind::Splat(inner) = element_expr.kind {
                        match propagate!(self.eval(scope, inner)) {
                            Value::List(spliced) => {
                                items.extend(spliced.borrow().iter().cloned());
                            }
                            other => {
                                return Err(errors::op_type_error(
                                    "splat",
                                    &[other.type_name()],
                                    element_expr.span,
                                ));
                            }
                        }
                    } else {
                        items.push(propagate!(self.eval(scope, element)));
                    }
                }
                Ok(Outcome::Value(Value::list(items)))
            }

            // List literals consume their splat elements directly; a bare
            // splat node has no meaning on its own.
            ExprKind::Splat(_) => {
                Err(errors::type_error("splat outside a list literal", span))
            }

            ExprKind::Block(range) => {
                let block_scope = scope.child();
                let mut last = Value::None;
                for &child in arena.list(range) {
                    last = propagate!(self.eval(&block_scope, child));
                }
                Ok(Outcome::Value(last))
            }

            ExprKind::If {
                test,
                then_branch,
                else_branch,
            } => {
                let test_value = propagate!(self.eval(scope, test));
                if test_value.is_truthy() {
                    self.eval(scope, then_branch)
                } else if else_branch.is_present() {
                    self.eval(scope, else_branch)
                } else {
                    Ok(Outcome::Value(Value::None))
                }
            }

            ExprKind::While { test, body } => {
                let mut last = Value::None;
                loop {
                    let test_value = match self.eval(scope, test)? {
                        Outcome::Value(value) => value,
                        // A break in the test still aborts this loop.
                        Outcome::Break => break,
                        flow @ Outcome::Return(_) => return Ok(flow),
                    };
                    if !test_value.is_truthy() {
                        break;
                    }
                    match self.eval(scope, body)? {
                        Outcome::Value(value) => last = value,
                        Outcome::Break => break,
                        flow @ Outcome::Return(_) => return Ok(flow),
                    }
                }
                Ok(Outcome::Value(last))
            }

            ExprKind::And { left, right } => {
                let left_value = propagate!(self.eval(scope, left));
                if !left_value.is_truthy() {
                    return Ok(Outcome::Value(left_value));
                }
                self.eval(scope, right)
            }

            ExprKind::Or { left, right } => {
                let left_value = propagate!(self.eval(scope, left));
                if left_value.is_truthy() {
                    return Ok(Outcome::Value(left_value));
                }
                self.eval(scope, right)
            }

            ExprKind::Assign { target, value } => {
                let value = propagate!(self.eval(scope, value));
                if !scope.set(target, value.clone()) {
                    return Err(errors::undefined_variable(
                        self.interner.lookup(target),
                        span,
                    ));
                }
                Ok(Outcome::Value(value))
            }

            ExprKind::Var(range) => {
                let mut last = Value::None;
                for decl in arena.var_decls(range).iter().copied() {
                    let value = if decl.init.is_present() {
                        propagate!(self.eval(scope, decl.init))
                    } else {
                        Value::None
                    };
                    scope.declare(decl.name, value.clone());
                    last = value;
                }
                Ok(Outcome::Value(last))
            }

            ExprKind::Call { callee, args } => {
                let callee_value = propagate!(self.eval(scope, callee));
                let mut arg_values = Vec::with_capacity(args.len());
                for &arg in arena.list(args) {
                    arg_values.push(propagate!(self.eval(scope, arg)));
                }
                self.call_value(callee_value, arg_values, span)
                    .map(Outcome::Value)
            }

            ExprKind::Func(func) => Ok(Outcome::Value(Value::Function(Heap::new(
                FunctionValue {
                    func,
                    captured: scope.clone(),
                },
            )))),

            ExprKind::Return(value) => {
                let value = if value.is_present() {
                    propagate!(self.eval(scope, value))
                } else {
                    Value::None
                };
                Ok(Outcome::Return(value))
            }

            ExprKind::Break => Ok(Outcome::Break),
        }
    }

    /// Invoke a callable value with already-evaluated arguments.
    ///
    /// `span` is the call site, used for errors and the unwind trace.
    pub fn call_value(&mut self, callee: Value, args: Vec<Value>, span: Span) -> EvalResult {
        match callee {
            Value::Function(func) => self.call_function(&func, args, span),
            Value::Builtin(def) => (def.f)(self, span, &args),
            Value::Bound(bound) => {
                let mut full = Vec::with_capacity(args.len() + 1);
                full.push(bound.receiver.clone());
                full.extend(args);
                (bound.method.f)(self, span, &full)
            }
            other => Err(errors::not_callable(other.type_name(), span)),
        }
    }

    fn call_function(
        &mut self,
        func: &FunctionValue,
        args: Vec<Value>,
        span: Span,
    ) -> EvalResult {
        if self.depth >= MAX_CALL_DEPTH {
            return Err(errors::recursion_limit(MAX_CALL_DEPTH, span));
        }
        let arena = self.arena;
        let data = arena.func(func.func);
        if data.params.len() != args.len() {
            return Err(errors::arity_mismatch(data.params.len(), args.len(), span));
        }

        // One child scope per call, parented at the function's captured
        // definition scope. This is what makes closures correct.
        let call_scope = func.captured.child();
        for (&param, arg) in data.params.iter().zip(args) {
            call_scope.declare(param, arg);
        }
        for &local in &data.locals {
            call_scope.declare(local, Value::None);
        }

        self.depth += 1;
        let result = self.eval(&call_scope, data.body);
        self.depth -= 1;

        match result {
            Ok(Outcome::Value(value)) | Ok(Outcome::Return(value)) => Ok(value),
            Ok(Outcome::Break) => Err(errors::break_outside_loop(span)),
            Err(err) => Err(err.with_call_site(span)),
        }
    }
}
