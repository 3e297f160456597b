use std::fs;
use std::path::PathBuf;

use clap::Parser;
use ccolon_lexer::Lexer;
use ccolon_parser::Parser as CcolonParser;
use ccolon_syntax::ast::*;

const INDENT: usize = 4;

#[derive(Parser, Debug)]
#[command(name = "ccolon-fmt", about = "Format C-colon source files")]
struct Cli {
    /// Exit with status 1 if the file is not already formatted
    #[arg(long, conflicts_with = "write")]
    check: bool,

    /// Rewrite the file in place
    #[arg(long)]
    write: bool,

    file: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    let file = cli.file;
    let src = fs::read_to_string(&file).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", file.display(), e);
        std::process::exit(1)
    });
    let tokens = Lexer::new(&src).tokenize().unwrap_or_else(|e| { eprintln!("Lex error: {}", e); std::process::exit(1) });
    let program = CcolonParser::new(tokens).parse_program().unwrap_or_else(|e| { eprintln!("Parse error: {}", e); std::process::exit(1) });

    let formatted = format_program(&program);

    if cli.check {
        if normalize_newlines(&formatted) != normalize_newlines(&src) {
            eprintln!("{}: not formatted", file.display());
            std::process::exit(1);
        } else {
            println!("{}: ok", file.display());
        }
    } else if cli.write {
        if let Err(e) = fs::write(&file, formatted) {
            eprintln!("Failed to write {}: {}", file.display(), e);
            std::process::exit(1);
        }
    } else {
        print!("{}", formatted);
    }
}

fn normalize_newlines(s: &str) -> String { s.replace("\r\n", "\n") }

fn format_program(p: &Program) -> String {
    let mut out = String::new();
    for (i, item) in p.items.iter().enumerate() {
        let is_fn = matches!(item, Item::Function(_));
        if i > 0 && (is_fn || matches!(p.items[i - 1], Item::Function(_))) {
            out.push('\n');
        }
        match item {
            Item::Import { module } => { out.push_str("import "); out.push_str(module); out.push('\n'); }
            Item::Function(f) => out.push_str(&format_function(f)),
            Item::Stmt(s) => out.push_str(&format_stmt(s, 0)),
        }
    }
    out
}

fn format_function(f: &FuncDef) -> String {
    let mut out = String::new();
    out.push_str("function ");
    out.push_str(&f.name);
    out.push_str("() {\n");
    for s in &f.body { out.push_str(&format_stmt(s, INDENT)); }
    out.push_str("}\n");
    out
}

fn format_stmt(s: &Stmt, indent: usize) -> String {
    let mut out = String::new();
    let pad = " ".repeat(indent);
    match s {
        Stmt::VarDecl { type_name, name, value } => {
            out.push_str(&pad);
            out.push_str("var "); out.push_str(type_name); out.push(' '); out.push_str(name);
            out.push_str(" = "); out.push_str(&format_expr(value)); out.push('\n');
        }
        Stmt::IfElse { cond, if_body, else_body } => {
            out.push_str(&pad); out.push_str("if ("); out.push_str(&format_expr(cond)); out.push_str(") {\n");
            for st in if_body { out.push_str(&format_stmt(st, indent + INDENT)); }
            out.push_str(&pad); out.push('}');
            if let Some(body) = else_body {
                out.push_str(" else {\n");
                for st in body { out.push_str(&format_stmt(st, indent + INDENT)); }
                out.push_str(&pad); out.push('}');
            }
            out.push('\n');
        }
        Stmt::Expr(e) => { out.push_str(&pad); out.push_str(&format_expr(e)); out.push('\n'); }
    }
    out
}

fn format_expr(e: &Expr) -> String {
    match e {
        Expr::LiteralInt(n) => n.to_string(),
        // strings have no escapes, so the text is emitted verbatim
        Expr::LiteralString(s) => format!("\"{}\"", s),
        // no boolean literal syntax; spell it as a comparison
        Expr::LiteralBool(b) => if *b { "(1 == 1)".into() } else { "(1 == 2)".into() },
        Expr::Ident(s) => s.clone(),
        Expr::Binary { left, op, right } => format!("{} {} {}", wrap(left), op.symbol(), wrap(right)),
        Expr::Call { receiver, method, args } => {
            let mut s = format_expr(receiver);
            s.push('.');
            s.push_str(method);
            s.push('(');
            for (i, a) in args.iter().enumerate() { if i > 0 { s.push_str(", "); } s.push_str(&format_expr(a)); }
            s.push(')');
            s
        }
    }
}

fn wrap(e: &Expr) -> String {
    match e {
        Expr::LiteralInt(_) | Expr::LiteralString(_) | Expr::LiteralBool(_) | Expr::Ident(_) | Expr::Call { .. } => format_expr(e),
        Expr::Binary { .. } => format!("({})", format_expr(e)),
    }
}
