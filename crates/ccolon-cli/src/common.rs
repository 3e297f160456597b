use owo_colors::OwoColorize;

use ccolon_interpreter::{Console, StdConsole};
use ccolon_syntax::error::{Error, Result};

/// Standard streams, with warnings rendered in colour on stderr.
pub struct TermConsole {
    inner: StdConsole,
    quiet: bool,
}

impl TermConsole {
    pub fn new(quiet: bool) -> Self {
        Self {
            inner: StdConsole,
            quiet,
        }
    }
}

impl Console for TermConsole {
    fn write(&mut self, text: &str) -> Result<()> {
        self.inner.write(text)
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.inner.write_line(line)
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        self.inner.read_line()
    }

    fn warn(&mut self, msg: &str) {
        if !self.quiet {
            eprintln!("{}: {}", "warning".yellow().bold(), msg.yellow());
        }
    }
}

pub fn render_error(source: &str, err: &Error) {
    eprintln!("{}: {}", err.kind.label().red().bold(), err.msg.red());
    if let (Some(line), Some(col)) = (err.line, err.col) {
        eprintln!("  --> line {}, column {}", line, col);
        if let Some(src_line) = source.lines().nth(line.saturating_sub(1)) {
            let line_num_str = format!("{:3} | ", line);
            eprintln!("     |");
            eprintln!("{}{}", line_num_str.bright_black(), src_line);

            let mut marker = String::new();
            marker.push_str(&" ".repeat(line_num_str.len()));
            if col > 1 {
                marker.push_str(&" ".repeat(col - 1));
            }
            marker.push('^');
            eprintln!("{}{}", marker.red(), " error here".red());
            eprintln!("     |");
        }
    }
    provide_error_suggestions(&err.msg);
}

pub fn provide_error_suggestions(err_msg: &str) {
    // Declaration errors
    if err_msg.contains("type keyword") {
        eprintln!("{}", "Help: Variables are declared with a type: int or string.".yellow());
        eprintln!("    {}", "Example: var int count = 3".bright_black());
    } else if err_msg.contains("Expected OP '='") {
        eprintln!("{}", "Help: A declaration needs '=' between the name and the value.".yellow());
        eprintln!("    {}", "Example: var string name = \"Ada\"".bright_black());
    }
    // Syntax errors
    else if err_msg.contains("found OP ';'") {
        eprintln!("{}", "Help: Statements need no terminator; remove the ';'.".yellow());
    } else if err_msg.contains("Expected OP '}'") {
        eprintln!("{}", "Help: Every '{' needs a matching '}'.".yellow());
    } else if err_msg.contains("Expected OP ')'") {
        eprintln!("{}", "Help: Check if parentheses are balanced.".yellow());
    } else if err_msg.contains("found KEYWORD 'function'") {
        eprintln!("{}", "Help: Functions can only be defined at the top level.".yellow());
    } else if err_msg.contains("found KEYWORD 'return'") {
        eprintln!("{}", "Help: 'return' is reserved but not supported.".yellow());
    } else if err_msg.contains("Expected expression") {
        eprintln!("{}", "Help: Expected a value, a name, a call, or a parenthesized expression.".yellow());
    } else if err_msg.contains("out of range") {
        eprintln!("{}", "Help: Integers must fit in 64 bits.".yellow());
    }
    // Lexical errors
    else if err_msg.contains("Unterminated string") {
        eprintln!("{}", "Help: String is missing closing quote.".yellow());
    } else if err_msg.contains("Unterminated block comment") {
        eprintln!("{}", "Help: Close block comments with '*/'.".yellow());
    } else if err_msg.contains("Unexpected character") {
        eprintln!("{}", "Help: Only letters, digits, quotes, comments and = + - * / ( ) ; , . { } are allowed.".yellow());
    }
    // Runtime errors
    else if err_msg.contains("division by zero") {
        eprintln!("{}", "Help: You cannot divide by zero.".yellow());
        eprintln!("    {}", "Check the divisor with an if before dividing.".bright_black());
    } else if err_msg.contains("Cannot convert") {
        eprintln!("{}", "Help: '-', '*' and '/' need integers or strings holding integers.".yellow());
        eprintln!("    {}", "'+' concatenates when either side is not an integer.".bright_black());
    } else if err_msg.contains("overflow") {
        eprintln!("{}", "Help: The result does not fit in a 64-bit integer.".yellow());
    } else if err_msg.contains("scanp() reached end of input") {
        eprintln!("{}", "Help: The program asked for more input than was provided.".yellow());
    }
}
