mod common;
mod repl;

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;

use ccolon_interpreter::Interpreter;
use ccolon_lexer::Lexer;
use ccolon_parser::Parser as CcolonParser;

use crate::common::{render_error, TermConsole};

#[derive(Parser, Debug)]
#[command(name = "ccolon", version, about = "Run C-colon programs, or start a REPL")]
struct Cli {
    /// Program to run. Starts the REPL when omitted.
    path: Option<PathBuf>,

    /// Print the token stream or the AST instead of running the program
    #[arg(long, value_enum, env = "CCOLON_DUMP", requires = "path")]
    dump: Option<Dump>,

    /// Do not report calls to unknown methods
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Dump {
    Tokens,
    Ast,
}

fn fail(msg: String) -> ! {
    eprintln!("{}: {}", "error".red().bold(), msg.red());
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    let Some(path) = cli.path else {
        repl::start_repl(cli.quiet);
        return;
    };
    if !path.exists() {
        fail(format!("File not found: {}", path.display()));
    }
    let src = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) => fail(format!("Failed to read {}: {}", path.display(), e)),
    };

    let tokens = match Lexer::new(&src).tokenize() {
        Ok(t) => t,
        Err(e) => {
            render_error(&src, &e);
            std::process::exit(1);
        }
    };
    if cli.dump == Some(Dump::Tokens) {
        for tok in &tokens {
            println!("{}", tok);
        }
        return;
    }

    let program = match CcolonParser::new(tokens).parse_program() {
        Ok(p) => p,
        Err(e) => {
            render_error(&src, &e);
            std::process::exit(1);
        }
    };
    if cli.dump == Some(Dump::Ast) {
        print!("{}", program);
        return;
    }

    let mut interp = Interpreter::with_console(TermConsole::new(cli.quiet));
    if let Err(e) = interp.run(program) {
        render_error(&src, &e);
        std::process::exit(1);
    }
}
