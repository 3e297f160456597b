use std::io::{self, Write};

use owo_colors::OwoColorize;
use ccolon_interpreter::{Env, Interpreter, Value};
use ccolon_lexer::Lexer;
use ccolon_parser::Parser;

use crate::common::{render_error, TermConsole};

pub fn start_repl(quiet: bool) {
    println!("{}", "C-colon REPL. Type :help for help, :quit to exit.".bold().green());

    let mut interpreter = Interpreter::with_console(TermConsole::new(quiet));
    let mut env = Env::new();

    let mut buffer = String::new();
    loop {
        let prompt = if buffer.is_empty() { "ccolon> ".cyan().to_string() } else { "   ...> ".cyan().to_string() };
        print!("{}", prompt);
        let _ = io::stdout().flush();

        let mut line = String::new();
        let n = match io::stdin().read_line(&mut line) {
            Ok(n) => n,
            Err(_) => { println!("<input error>"); break; }
        };
        if n == 0 { // EOF
            println!("\nGoodbye.");
            break;
        }
        let trimmed = line.trim_end();

        if buffer.is_empty() && trimmed.starts_with(':') {
            match trimmed {
                ":quit" | ":q" | ":exit" => { println!("Goodbye."); break; }
                ":help" | ":h" => {
                    println!("{}\n  {}  {}\n  {}  {}",
                        "Commands:".bold(),
                        ":help".yellow(), "Show this help",
                        ":quit".yellow(), "Exit the REPL");
                    println!("  {}  {}\n  {}  {}\n  {}  {}",
                        ":vars".yellow(), "List variables",
                        ":funcs".yellow(), "List defined functions",
                        ":reset".yellow(), "Clear all bindings");
                    println!("Type code to evaluate. Input continues until braces and parentheses balance.");
                    continue;
                }
                ":vars" => { print_vars(&env); continue; }
                ":funcs" => { print_funcs(&env); continue; }
                ":reset" => { env.clear(); println!("{}", "State reset.".yellow()); continue; }
                _ => { println!("{}", "Unknown command. Type :help.".red()); continue; }
            }
        }

        buffer.push_str(&line);

        if !is_complete(&buffer) {
            continue;
        }

        match Lexer::new(&buffer).tokenize() {
            Ok(tokens) => match Parser::new(tokens).parse_program() {
                Ok(program) => match interpreter.run_with_env(program, &mut env) {
                    Ok(Some(val)) if val != Value::Unit => println!("{}", val.to_string().bright_blue()),
                    Ok(_) => {}
                    Err(e) => render_error(&buffer, &e),
                },
                Err(e) => render_error(&buffer, &e),
            },
            Err(e) => render_error(&buffer, &e),
        }

        buffer.clear();
    }
}

fn print_vars(env: &Env) {
    let vars = env.vars_snapshot();
    if vars.is_empty() { println!("{}", "<no vars>".dimmed()); return; }
    for (name, binding) in vars {
        let declared = binding.declared.unwrap_or_else(|| binding.value.type_name().to_string());
        println!("{} {} = {}", declared.bright_black(), name.yellow(), binding.value.to_string().bright_blue());
    }
}

fn print_funcs(env: &Env) {
    let names = env.function_names();
    if names.is_empty() { println!("{}", "<no functions>".dimmed()); return; }
    for n in names { println!("{}", n.yellow()); }
}

/// True once every `{` and `(` in the buffer is closed. Input that fails to
/// lex is complete unless a string or block comment is still open.
fn is_complete(input: &str) -> bool {
    let tokens = match Lexer::new(input).tokenize() { Ok(t) => t, Err(e) => return !e.msg.starts_with("Unterminated") };
    let mut braces = 0i32;
    let mut parens = 0i32;
    for tk in tokens.iter() {
        if tk.is_op("{") { braces += 1; }
        else if tk.is_op("}") { braces -= 1; }
        else if tk.is_op("(") { parens += 1; }
        else if tk.is_op(")") { parens -= 1; }
    }
    braces <= 0 && parens <= 0
}
