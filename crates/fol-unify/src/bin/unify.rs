//! Unify two first-order terms given on the command line or on stdin

use fol_unify::json::UnifyResultJson;
use fol_unify::{unify_expressions_with, Substitution, UnifyConfig};
use std::io::{self, BufRead, Write};

fn print_usage(program: &str) {
    eprintln!("Usage: {} [<expr1> <expr2>] [options]", program);
    eprintln!("\nWith no expressions, both are read from stdin.");
    eprintln!("\nOptions:");
    eprintln!("  --json             Print the result as JSON");
    eprintln!("  --keep-partial     Keep and print the bindings of a failed unification");
    eprintln!("  --max-depth <n>    Fail when terms nest deeper than n");
}

fn prompt(lines: &mut impl BufRead, message: &str) -> io::Result<String> {
    println!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    lines.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("unify");

    let mut config = UnifyConfig::default();
    let mut json = false;
    let mut expressions: Vec<String> = Vec::new();

    // Parse command line options
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => json = true,
            "--keep-partial" => config.rollback_on_failure = false,
            "--max-depth" => {
                match args.get(i + 1).and_then(|s| s.parse::<usize>().ok()) {
                    Some(depth) => config.max_depth = Some(depth),
                    None => {
                        eprintln!("--max-depth needs a non-negative integer");
                        std::process::exit(1);
                    }
                }
                i += 1;
            }
            "-h" | "--help" => {
                print_usage(program);
                return;
            }
            other if other.starts_with("--") => {
                eprintln!("Unknown option: {}", other);
                print_usage(program);
                std::process::exit(1);
            }
            expr => expressions.push(expr.to_string()),
        }
        i += 1;
    }

    let (left, right) = match expressions.len() {
        0 => {
            let stdin = io::stdin();
            let mut lines = stdin.lock();
            let read = prompt(&mut lines, "Enter the first expression (e.g., Eats(x, Apple)): ")
                .and_then(|first| {
                    prompt(&mut lines, "Enter the second expression (e.g., Eats(Riya, y)): ")
                        .map(|second| (first, second))
                });
            match read {
                Ok(pair) => pair,
                Err(e) => {
                    eprintln!("Failed to read input: {}", e);
                    std::process::exit(1);
                }
            }
        }
        2 => (expressions[0].clone(), expressions[1].clone()),
        _ => {
            print_usage(program);
            std::process::exit(1);
        }
    };

    let mut subst = Substitution::new();
    let result = unify_expressions_with(&left, &right, &mut subst, &config)
        .map(|()| std::mem::take(&mut subst));

    if json {
        match serde_json::to_string_pretty(&UnifyResultJson::from_result(&result)) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Failed to serialize result: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        match &result {
            Ok(subst) => println!("Substitution: {}", subst.resolved()),
            Err(e) => {
                println!("{}", e);
                if !subst.is_empty() {
                    println!("Partial substitution: {}", subst.resolved());
                }
            }
        }
    }

    if result.is_err() {
        std::process::exit(1);
    }
}
