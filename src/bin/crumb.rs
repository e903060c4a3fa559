//! Command-line interface for crumb
//! This binary tokenizes a file (or stdin) with one of the built-in
//! grammars and prints the token stream.
//!
//! Usage:
//!   crumb tokenize `<path>` [--grammar `<grammar>`] [--format `<format>`]
//!   crumb list-grammars

use clap::{Arg, Command};
use crumb::linear_position;
use crumb::rule::Tokenize;
use crumb::syntaxes::{code, markdown};
use crumb::ParseError;
use std::io::Read;

fn main() {
    let matches = Command::new("crumb")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A composable tokenizer for code and markdown")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokenize")
                .about("Tokenize a file and print the token stream")
                .arg(
                    Arg::new("path")
                        .help("Path to the input file, or '-' for stdin")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("grammar")
                        .long("grammar")
                        .short('g')
                        .help("Grammar to apply ('code' or 'markdown')")
                        .default_value("code"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('json', 'debug', or 'text')")
                        .default_value("text"),
                ),
        )
        .subcommand(Command::new("list-grammars").about("List the built-in grammars"))
        .get_matches();

    match matches.subcommand() {
        Some(("tokenize", tokenize_matches)) => {
            let path = tokenize_matches.get_one::<String>("path").unwrap();
            let grammar = tokenize_matches.get_one::<String>("grammar").unwrap();
            let format = tokenize_matches.get_one::<String>("format").unwrap();
            handle_tokenize_command(path, grammar, format);
        }
        Some(("list-grammars", _)) => {
            handle_list_grammars_command();
        }
        _ => unreachable!(),
    }
}

/// Handle the tokenize command
fn handle_tokenize_command(path: &str, grammar: &str, format: &str) {
    let source = read_source(path);

    let tokenizer: Box<dyn Tokenize> = match grammar {
        "code" => Box::new(code::grammar()),
        "markdown" => Box::new(markdown::grammar()),
        other => {
            eprintln!("Unknown grammar: {}", other);
            std::process::exit(1);
        }
    };

    let tokens = tokenizer
        .tokenize(&source)
        .unwrap_or_else(|e| report_parse_error(e, &source));

    match format {
        "json" => {
            let output = serde_json::to_string_pretty(&tokens).unwrap_or_else(|e| {
                eprintln!("Serialization error: {}", e);
                std::process::exit(1);
            });
            println!("{}", output);
        }
        "debug" => {
            println!("{:#?}", tokens);
        }
        "text" => {
            for token in &tokens {
                println!("{}\t{:?}", token.component().description(), token.text());
            }
        }
        other => {
            eprintln!("Unknown format: {}", other);
            std::process::exit(1);
        }
    }
}

fn read_source(path: &str) -> String {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .unwrap_or_else(|e| {
                eprintln!("Error reading stdin: {}", e);
                std::process::exit(1);
            });
        source
    } else {
        std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        })
    }
}

fn report_parse_error(error: ParseError, source: &str) -> ! {
    match &error {
        ParseError::UnterminatedDelimiter { offset, .. } => {
            let position = linear_position(source, *offset);
            eprintln!(
                "Parse error: {} (line {}, column {})",
                error, position.line, position.column
            );
        }
        _ => {
            eprintln!("Parse error: {}", error);
        }
    }
    std::process::exit(1)
}

/// Handle the list-grammars command
fn handle_list_grammars_command() {
    println!("Built-in grammars:\n");
    println!("  code");
    println!("    Hashbang lines, keyword declarations, string literals.");
    println!("  markdown");
    println!("    Headers, fenced code blocks, links, emails, body text.");
}
