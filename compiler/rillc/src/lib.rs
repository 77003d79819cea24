//! Driver library for the rill CLI.
//!
//! One entry point per pipeline depth: [`lex_source`] stops after
//! tokenization, [`parse_source`] after parsing, [`run_source`] evaluates.
//! Failures from any phase unify into [`Problem`], rendered against a
//! [`SourceFile`] with the location-block format the language has always
//! used.

pub mod commands;

use rill_diagnostic::{Diagnostic, SourceFile};
use rill_eval::{EvalError, Interpreter, PrintHandler, Value};
use rill_ir::{StringInterner, TokenList};
use rill_lexer::LexError;
use rill_parse::{Parsed, ParseError};

/// A failure from any phase of the pipeline.
#[derive(Debug)]
pub enum Problem {
    Lex(LexError),
    Parse(ParseError),
    Eval(EvalError),
}

impl Problem {
    /// Render the failure with its location block (and, for runtime errors,
    /// the call-site trace).
    pub fn render(&self, source: &SourceFile) -> String {
        match self {
            Problem::Lex(err) => Diagnostic::error(err.to_string(), err.span).render(source),
            Problem::Parse(err) => {
                Diagnostic::error(err.to_string(), err.span).render(source)
            }
            Problem::Eval(err) => Diagnostic::error(err.to_string(), err.span)
                .with_trace(err.trace.clone())
                .render(source),
        }
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Problem::Lex(err) => write!(f, "{err}"),
            Problem::Parse(err) => write!(f, "{err}"),
            Problem::Eval(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Problem {}

/// Tokenize only.
pub fn lex_source(source: &str, interner: &StringInterner) -> Result<TokenList, Problem> {
    rill_lexer::lex(source, interner).map_err(Problem::Lex)
}

/// Tokenize and parse.
pub fn parse_source(source: &str, interner: &StringInterner) -> Result<Parsed, Problem> {
    let tokens = lex_source(source, interner)?;
    rill_parse::parse(&tokens, interner).map_err(Problem::Parse)
}

/// Run a whole program: lex, parse, evaluate. `Print` output goes to the
/// given handler; the returned value is the module's final expression.
pub fn run_source(source: &str, printer: PrintHandler) -> Result<Value, Problem> {
    let interner = StringInterner::new();
    let parsed = parse_source(source, &interner)?;
    let mut interp = Interpreter::with_printer(&parsed.arena, &interner, printer);
    interp.run_module(&parsed.module).map_err(Problem::Eval)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rill_diagnostic::SourceFile;
    use rill_eval::{PrintHandler, Value};

    use super::*;

    #[test]
    fn run_source_returns_the_final_value() {
        let result = run_source("1 + 1\n", PrintHandler::Stdout);
        match result {
            Ok(value) => assert_eq!(value, Value::Number(2.0)),
            Err(err) => panic!("{err}"),
        }
    }

    #[test]
    fn lex_problem_renders_with_location() {
        let source = "x = 'unterminated\n";
        let file = SourceFile::new("bad.rl", source);
        let Err(problem) = run_source(source, PrintHandler::Stdout) else {
            panic!("expected a lex failure");
        };
        let rendered = problem.render(&file);
        assert!(rendered.contains("Where is the matching quotes for '?"));
        assert!(rendered.contains("in bad.rl on line 1 column 5"));
    }

    #[test]
    fn parse_problem_renders_bit_exact_location_block() {
        let source = "x = )\n";
        let file = SourceFile::new("m.rl", source);
        let Err(problem) = run_source(source, PrintHandler::Stdout) else {
            panic!("expected a parse failure");
        };
        assert_eq!(
            problem.render(&file),
            "Expected expression but found )\nin m.rl on line 1 column 5\nx = )\n    *\n"
        );
    }
}
