//! CLI commands: `run`, `lex`, `parse`.
//!
//! Every command reads a file (or stdin for `-`), optionally prepends a
//! prelude written in the language itself, and on failure prints the
//! rendered diagnostic to stderr and exits non-zero.

use std::io::Read;

use rill_diagnostic::SourceFile;
use rill_eval::PrintHandler;
use rill_ir::StringInterner;

use crate::{lex_source, parse_source, run_source};

/// Read a source file, with `-` meaning stdin.
fn read_input(path: &str) -> (String, String) {
    if path == "-" {
        let mut source = String::new();
        if let Err(err) = std::io::stdin().read_to_string(&mut source) {
            eprintln!("error: failed to read stdin: {err}");
            std::process::exit(1);
        }
        (source, "<stdin>".to_string())
    } else {
        match std::fs::read_to_string(path) {
            Ok(source) => (source, path.to_string()),
            Err(err) => {
                eprintln!("error: failed to read {path}: {err}");
                std::process::exit(1);
            }
        }
    }
}

fn read_prelude(path: Option<&str>) -> String {
    let Some(path) = path else {
        return String::new();
    };
    match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: failed to read prelude {path}: {err}");
            std::process::exit(1);
        }
    }
}

/// Run a program. The prelude, if any, is concatenated in front of the
/// program text and shares its diagnostics file label.
pub fn run_file(path: &str, prelude: Option<&str>) {
    let (source, name) = read_input(path);
    let prelude = read_prelude(prelude);
    let combined = if prelude.is_empty() {
        source
    } else {
        format!("{prelude}\n{source}")
    };
    let file = SourceFile::new(name, combined.clone());
    if let Err(problem) = run_source(&combined, PrintHandler::Stdout) {
        eprint!("{}", problem.render(&file));
        std::process::exit(1);
    }
}

/// Tokenize a file and dump the token stream.
pub fn lex_file(path: &str) {
    let (source, name) = read_input(path);
    let file = SourceFile::new(name, source.clone());
    let interner = StringInterner::new();
    match lex_source(&source, &interner) {
        Ok(tokens) => {
            for token in tokens.iter() {
                println!("{:>5}..{:<5} {:?}", token.span.start, token.span.end, token.kind);
            }
        }
        Err(problem) => {
            eprint!("{}", problem.render(&file));
            std::process::exit(1);
        }
    }
}

/// Parse a file and dump the AST arena.
pub fn parse_file(path: &str) {
    let (source, name) = read_input(path);
    let file = SourceFile::new(name, source.clone());
    let interner = StringInterner::new();
    match parse_source(&source, &interner) {
        Ok(parsed) => {
            println!(
                "module: {} top-level expressions, {} locals, {} arena nodes",
                parsed.module.body.len(),
                parsed.module.locals.len(),
                parsed.arena.expr_count(),
            );
            for &id in parsed.arena.list(parsed.module.body) {
                println!("{:?}", parsed.arena.expr(id));
            }
        }
        Err(problem) => {
            eprint!("{}", problem.render(&file));
            std::process::exit(1);
        }
    }
}
