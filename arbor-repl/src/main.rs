use arbor_compute::rewrite::{derivative, expand, simplify};
use arbor_compute::{Node, Symbol};
use arbor_parser::polish;
use ariadne::Source;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::io::{self, BufRead, IsTerminal};

const USAGE: &str = "\
commands:
  simplify <expr>      simplify a prefix expression
  derive <var> <expr>  differentiate with respect to a variable
  expand <expr>        distribute products over sums
  eval <expr>          evaluate a constant expression exactly
  tree <expr>          draw the expression as a tree diagram

expressions use whitespace-separated prefix notation, e.g. `+ x 1`";

/// Parses a prefix expression, printing an ariadne report on failure.
fn parse_expr(input: &str) -> Option<Node> {
    match polish::parse(input) {
        Ok(node) => Some(node),
        Err(err) => {
            let report = err.build_report("input");
            report.eprint(("input", Source::from(input))).unwrap();
            None
        }
    }
}

/// Runs a single command line, printing the result or the error it produced.
fn run_command(line: &str) {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "simplify" | "expand" => {
            let Some(node) = parse_expr(rest) else { return };
            let pass: fn(&Node) -> Result<Node, arbor_compute::Error> =
                if command == "simplify" { simplify } else { expand };
            match pass(&node) {
                Ok(result) => println!("{}", result),
                Err(err) => eprintln!("error: {}", err),
            }
        }
        "derive" => {
            let Some((variable, expr)) = rest.split_once(char::is_whitespace) else {
                eprintln!("usage: derive <var> <expr>");
                return;
            };
            let mut letters = variable.chars();
            let symbol = match (letters.next(), letters.next()) {
                (Some(letter), None) => match Symbol::new(letter) {
                    Ok(symbol) => symbol,
                    Err(err) => {
                        eprintln!("error: {}", err);
                        return;
                    }
                },
                _ => {
                    eprintln!("error: the variable must be a single lowercase letter");
                    return;
                }
            };
            let Some(node) = parse_expr(expr.trim()) else { return };
            match derivative(&node, symbol) {
                Ok(result) => println!("{}", result),
                Err(err) => eprintln!("error: {}", err),
            }
        }
        "eval" => {
            let Some(node) = parse_expr(rest) else { return };
            match node.evaluate() {
                Ok(value) => println!("{}", value),
                Err(err) => eprintln!("error: {}", err),
            }
        }
        "tree" => {
            let Some(node) = parse_expr(rest) else { return };
            println!("{}", node.tree_diagram());
        }
        "help" => println!("{}", USAGE),
        _ => eprintln!("unknown command: `{}`\n{}", command, USAGE),
    }
}

fn main() {
    if !io::stdin().is_terminal() {
        // read commands from piped stdin, one per line
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            run_command(line.trim());
        }
        return;
    }

    // run the repl / interactive mode
    let mut rl = DefaultEditor::new().unwrap();

    fn process_line(rl: &mut DefaultEditor) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        run_command(input.trim());
        Ok(())
    }

    loop {
        if let Err(err) = process_line(&mut rl) {
            match err {
                ReadlineError::Eof | ReadlineError::Interrupted => (),
                _ => eprintln!("{}", err),
            }
            break;
        }
    }
}
