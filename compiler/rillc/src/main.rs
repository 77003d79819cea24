//! rill CLI.

use rillc::commands::{lex_file, parse_file, run_file};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: rill run <file.rl> [--prelude <file.rl>]");
                std::process::exit(1);
            }
            let mut prelude = None;
            let mut path = None;
            let mut i = 2;
            while i < args.len() {
                if args[i] == "--prelude" && i + 1 < args.len() {
                    prelude = Some(args[i + 1].as_str());
                    i += 2;
                } else if path.is_none() {
                    path = Some(args[i].as_str());
                    i += 1;
                } else {
                    eprintln!("error: unexpected argument '{}'", args[i]);
                    std::process::exit(1);
                }
            }
            let Some(path) = path else {
                eprintln!("error: missing file path");
                std::process::exit(1);
            };
            run_file(path, prelude);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: rill lex <file.rl>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: rill parse <file.rl>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("rill {}", env!("CARGO_PKG_VERSION"));
        }
        other => {
            // A file path (or "-" for stdin) runs directly.
            if other == "-" || std::path::Path::new(other).exists() {
                run_file(other, None);
            } else {
                eprintln!("Unknown command: {other}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("rill interpreter");
    println!();
    println!("Usage: rill <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.rl>    Run a rill program ('-' reads stdin)");
    println!("  lex <file.rl>    Tokenize and display tokens");
    println!("  parse <file.rl>  Parse and display AST info");
    println!("  help             Show this help message");
    println!("  version          Show version information");
    println!();
    println!("Run options:");
    println!("  --prelude <file.rl>  Prepend a prelude source file");
    println!();
    println!("Examples:");
    println!("  rill run main.rl");
    println!("  echo 'Print(1 + 2)' | rill run -");
    println!("  rill lex main.rl");
}
