//! Recursive-descent parser for rill.
//!
//! Single-token lookahead over the lexer's token stream, producing a flat
//! [`ExprArena`] plus a [`Module`]. Operator applications, indexing, slicing
//! and attribute access desugar to `Call` nodes on root-scope builtin names;
//! assignment targets are rewritten (attribute-set, set-item, destructuring)
//! rather than kept as distinct node kinds.
//!
//! After the tree is built, a separate traversal computes the
//! declared-variable set of the module and of every function literal.

mod assign;
mod cursor;
mod declared;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind};

use rill_ir::{ExprArena, Module, Name, StringInterner, TokenList};
use tracing::trace;

/// Everything one parse produces.
#[derive(Debug)]
pub struct Parsed {
    pub arena: ExprArena,
    pub module: Module,
}

/// Parse a token stream into a module.
pub fn parse(tokens: &TokenList, interner: &StringInterner) -> Result<Parsed, ParseError> {
    let mut parser = Parser::new(tokens, interner);
    let body = parser.module_body()?;
    let mut arena = parser.arena;
    let locals = declared::annotate(&mut arena, body);
    trace!(exprs = arena.expr_count(), "parsed module");
    Ok(Parsed {
        arena,
        module: Module { body, locals },
    })
}

/// Lex and parse in one step.
pub fn parse_source(
    source: &str,
    interner: &StringInterner,
) -> Result<Parsed, SourceParseError> {
    let tokens = rill_lexer::lex(source, interner).map_err(SourceParseError::Lex)?;
    parse(&tokens, interner).map_err(SourceParseError::Parse)
}

/// A failure from the combined lex+parse entry point.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceParseError {
    Lex(rill_lexer::LexError),
    Parse(ParseError),
}

impl std::fmt::Display for SourceParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceParseError::Lex(e) => write!(f, "{e}"),
            SourceParseError::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SourceParseError {}

/// Builtin names the parser references while desugaring, interned once at
/// construction so desugaring is a `Name` copy rather than a string lookup.
pub(crate) struct BuiltinNames {
    pub(crate) add: Name,
    pub(crate) subtract: Name,
    pub(crate) multiply: Name,
    pub(crate) divide: Name,
    pub(crate) modulo: Name,
    pub(crate) negate: Name,
    pub(crate) equal: Name,
    pub(crate) not: Name,
    pub(crate) less_than: Name,
    pub(crate) less_than_or_equal: Name,
    pub(crate) greater_than: Name,
    pub(crate) greater_than_or_equal: Name,
    pub(crate) is: Name,
    pub(crate) get_item: Name,
    pub(crate) set_item: Name,
    pub(crate) slice: Name,
    pub(crate) get_attribute: Name,
    pub(crate) set_attribute: Name,
    pub(crate) none: Name,
}

impl BuiltinNames {
    fn new(interner: &StringInterner) -> Self {
        BuiltinNames {
            add: interner.intern("Add"),
            subtract: interner.intern("Subtract"),
            multiply: interner.intern("Multiply"),
            divide: interner.intern("Divide"),
            modulo: interner.intern("Modulo"),
            negate: interner.intern("Negate"),
            equal: interner.intern("Equal"),
            not: interner.intern("Not"),
            less_than: interner.intern("LessThan"),
            less_than_or_equal: interner.intern("LessThanOrEqual"),
            greater_than: interner.intern("GreaterThan"),
            greater_than_or_equal: interner.intern("GreaterThanOrEqual"),
            is: interner.intern("Is"),
            get_item: interner.intern("GetItem"),
            set_item: interner.intern("SetItem"),
            slice: interner.intern("Slice"),
            get_attribute: interner.intern("GetAttribute"),
            set_attribute: interner.intern("SetAttribute"),
            none: interner.intern("None"),
        }
    }
}

/// Parser state.
pub struct Parser<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) arena: ExprArena,
    pub(crate) interner: &'a StringInterner,
    pub(crate) names: BuiltinNames,
    /// Counter for destructuring temporaries (`__tmp1`, `__tmp2`, ...).
    pub(crate) tmp_counter: u32,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            arena: ExprArena::new(),
            interner,
            names: BuiltinNames::new(interner),
            tmp_counter: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rill_ir::{ExprKind, StringInterner};

    use super::*;

    fn parse_ok(source: &str) -> (Parsed, StringInterner) {
        let interner = StringInterner::new();
        let parsed = match parse_source(source, &interner) {
            Ok(p) => p,
            Err(e) => panic!("parse failed: {e}"),
        };
        (parsed, interner)
    }

    #[test]
    fn empty_module() {
        let (parsed, _) = parse_ok("");
        assert!(parsed.module.body.is_empty());
        assert!(parsed.module.locals.is_empty());
    }

    #[test]
    fn module_collects_top_level_expressions() {
        let (parsed, _) = parse_ok("1\n2\n3\n");
        assert_eq!(parsed.module.body.len(), 3);
    }

    #[test]
    fn module_locals_from_assignments() {
        let (parsed, interner) = parse_ok("x = 1\ny = 2\nx = 3\n");
        let locals: Vec<&str> = parsed
            .module
            .locals
            .iter()
            .map(|n| interner.lookup(*n))
            .collect();
        assert_eq!(locals, vec!["x", "y"]);
    }

    #[test]
    fn operators_desugar_to_builtin_calls() {
        let (parsed, interner) = parse_ok("1 + 2\n");
        let root = parsed.arena.list(parsed.module.body)[0];
        let ExprKind::Call { callee, args } = parsed.arena.expr(root).kind else {
            panic!("expected call");
        };
        let ExprKind::Ident(name) = parsed.arena.expr(callee).kind else {
            panic!("expected ident callee");
        };
        assert_eq!(interner.lookup(name), "Add");
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn not_equal_desugars_to_not_of_equal() {
        let (parsed, interner) = parse_ok("a != b\n");
        let root = parsed.arena.list(parsed.module.body)[0];
        let ExprKind::Call { callee, args } = parsed.arena.expr(root).kind else {
            panic!("expected call");
        };
        let ExprKind::Ident(name) = parsed.arena.expr(callee).kind else {
            panic!("expected ident callee");
        };
        assert_eq!(interner.lookup(name), "Not");
        let inner = parsed.arena.list(args)[0];
        let ExprKind::Call { callee, .. } = parsed.arena.expr(inner).kind else {
            panic!("expected inner call");
        };
        let ExprKind::Ident(name) = parsed.arena.expr(callee).kind else {
            panic!("expected ident callee");
        };
        assert_eq!(interner.lookup(name), "Equal");
    }

    #[test]
    fn precedence_multiplication_binds_tighter() {
        // 1 + 2 * 3 => Add(1, Multiply(2, 3))
        let (parsed, interner) = parse_ok("1 + 2 * 3\n");
        let root = parsed.arena.list(parsed.module.body)[0];
        let ExprKind::Call { callee, args } = parsed.arena.expr(root).kind else {
            panic!("expected call");
        };
        let ExprKind::Ident(name) = parsed.arena.expr(callee).kind else {
            panic!("expected ident callee");
        };
        assert_eq!(interner.lookup(name), "Add");
        let rhs = parsed.arena.list(args)[1];
        let ExprKind::Call { callee, .. } = parsed.arena.expr(rhs).kind else {
            panic!("expected nested call");
        };
        let ExprKind::Ident(name) = parsed.arena.expr(callee).kind else {
            panic!("expected ident callee");
        };
        assert_eq!(interner.lookup(name), "Multiply");
    }

    #[test]
    fn comparison_is_single_and_non_chaining() {
        let interner = StringInterner::new();
        let err = match parse_source("a < b < c\n", &interner) {
            Err(SourceParseError::Parse(e)) => e,
            other => panic!("expected parse error, got {other:?}"),
        };
        // The second `<` has no production to attach to.
        assert!(matches!(err.kind, ParseErrorKind::ExpectedExpression { .. }));
    }

    #[test]
    fn parse_error_on_unclosed_paren() {
        let interner = StringInterner::new();
        let err = match parse_source("(1\n", &interner) {
            Err(SourceParseError::Parse(e)) => e,
            other => panic!("expected parse error, got {other:?}"),
        };
        assert_eq!(
            err.kind,
            ParseErrorKind::Expected {
                expected: ")",
                found: "end of input"
            }
        );
    }
}
