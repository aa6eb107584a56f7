use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
};

use clap::Parser as CliParser;
use log::error;
use mython::{
    lexer::{Lexer, Token},
    parser::Parser,
    run_program,
};

/// Interpreter for the Mython scripting language. Indent is 2 spaces.
#[derive(CliParser, Debug)]
#[command(version, about)]
struct Cli {
    /// Source file; standard input when omitted.
    file: Option<PathBuf>,

    /// Print the token stream as JSON instead of running the program.
    #[arg(long)]
    dump_tokens: bool,

    /// Print the parsed program as JSON instead of running it.
    #[arg(long)]
    dump_ast: bool,
}

fn main() {
    simple_logger::init_with_level(log::Level::Warn).unwrap();
    let args = Cli::parse();

    let result = match &args.file {
        Some(path) => match File::open(path) {
            Ok(file) => run(&args, BufReader::new(file)),
            Err(err) => Err(format!("could not read '{}': {err}", path.display())),
        },
        None => run(&args, io::stdin().lock()),
    };

    if let Err(message) = result {
        error!("{message}");
        std::process::exit(-1);
    }
}

fn run(args: &Cli, input: impl BufRead) -> Result<(), String> {
    if args.dump_tokens {
        return dump_tokens(input);
    }
    if args.dump_ast {
        return dump_ast(input);
    }

    run_program(input, io::stdout().lock())
        .map(|_| ())
        .map_err(|err| err.to_string())
}

fn dump_tokens(input: impl BufRead) -> Result<(), String> {
    let mut lexer = Lexer::new(input).map_err(|err| err.to_string())?;

    let mut tokens = vec![];
    while lexer.current() != &Token::Eof {
        tokens.push(lexer.current().clone());
        lexer.advance().map_err(|err| err.to_string())?;
    }
    tokens.push(Token::Eof);

    let json = serde_json::to_string_pretty(&tokens).map_err(|err| err.to_string())?;
    println!("{json}");
    Ok(())
}

fn dump_ast(input: impl BufRead) -> Result<(), String> {
    let lexer = Lexer::new(input).map_err(|err| err.to_string())?;
    let program = Parser::new(lexer)
        .parse_program()
        .map_err(|err| err.to_string())?;

    let json = serde_json::to_string_pretty(&program).map_err(|err| err.to_string())?;
    println!("{json}");
    Ok(())
}
