//! Main interpreter engine and the `console` built-ins.

use std::fmt;
use std::rc::Rc;

use crate::console::{Console, StdConsole};
use crate::env::Env;
use crate::value::Value;
use ccolon_syntax::ast::*;
use ccolon_syntax::error::{division_error, error, Result};

/// Receiver name that routes `println` and `scanp` to the console.
pub const CONSOLE: &str = "console";

/// Function executed as soon as its definition is reached.
pub const ENTRY_POINT: &str = "main";

/// The left-hand side of `receiver.method(...)` after resolution.
enum Receiver<'a> {
    /// A bare identifier, taken by name without environment lookup.
    Name(&'a str),
    /// A chained call (or other expression) that has been evaluated.
    Evaluated(Value),
}

impl Receiver<'_> {
    fn is_console(&self) -> bool {
        match self {
            Receiver::Name(name) => *name == CONSOLE,
            Receiver::Evaluated(Value::Str(s)) => s == CONSOLE,
            Receiver::Evaluated(_) => false,
        }
    }
}

impl fmt::Display for Receiver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Receiver::Name(name) => write!(f, "{}", name),
            Receiver::Evaluated(v) => write!(f, "{}", v),
        }
    }
}

pub struct Interpreter<C: Console = StdConsole> {
    /// Sink and source for the `console` built-ins
    console: C,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Interpreter bound to the process's standard streams.
    pub fn new() -> Self {
        Self::with_console(StdConsole)
    }
}

impl<C: Console> Interpreter<C> {
    pub fn with_console(console: C) -> Self {
        Self { console }
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Runs a program against a fresh environment and returns that environment.
    pub fn run(&mut self, program: Program) -> Result<Env> {
        let mut env = Env::new();
        self.run_with_env(program, &mut env)?;
        Ok(env)
    }

    /// Runs every item in order against `env`. Returns the value of the last
    /// item if it was an expression statement.
    pub fn run_with_env(&mut self, program: Program, env: &mut Env) -> Result<Option<Value>> {
        let mut last: Option<Value> = None;
        for item in program.items {
            last = self.exec_item(env, item)?;
        }
        Ok(last)
    }

    fn exec_item(&mut self, env: &mut Env, item: Item) -> Result<Option<Value>> {
        match item {
            Item::Import { .. } => Ok(None),
            Item::Function(func) => {
                self.define_function(env, func)?;
                Ok(None)
            }
            Item::Stmt(stmt) => self.exec_stmt(env, &stmt),
        }
    }

    /// Stores the definition; the entry point also runs, once, right here.
    fn define_function(&mut self, env: &mut Env, func: FuncDef) -> Result<()> {
        let func = Rc::new(func);
        env.define(func.name.clone(), Value::Function(Rc::clone(&func)), None);
        if func.name == ENTRY_POINT {
            self.exec_block(env, &func.body)?;
        }
        Ok(())
    }

    fn exec_block(&mut self, env: &mut Env, body: &[Stmt]) -> Result<()> {
        for s in body {
            self.exec_stmt(env, s)?;
        }
        Ok(())
    }

    fn exec_stmt(&mut self, env: &mut Env, stmt: &Stmt) -> Result<Option<Value>> {
        match stmt {
            Stmt::VarDecl {
                type_name,
                name,
                value,
            } => {
                let v = self.eval_expr(env, value)?;
                env.define(name.clone(), v, Some(type_name.clone()));
                Ok(None)
            }
            Stmt::IfElse {
                cond,
                if_body,
                else_body,
            } => {
                if self.eval_expr(env, cond)?.is_truthy() {
                    self.exec_block(env, if_body)?;
                } else if let Some(body) = else_body {
                    self.exec_block(env, body)?;
                }
                Ok(None)
            }
            Stmt::Expr(e) => Ok(Some(self.eval_expr(env, e)?)),
        }
    }

    pub fn eval_expr(&mut self, env: &Env, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::LiteralInt(n) => Ok(Value::Int(*n)),
            Expr::LiteralString(s) => Ok(Value::Str(s.clone())),
            Expr::LiteralBool(b) => Ok(Value::Bool(*b)),
            Expr::Ident(name) => Ok(lookup(env, name)),
            Expr::Binary { left, op, right } => {
                let l = self.eval_expr(env, left)?;
                let r = self.eval_expr(env, right)?;
                binary(*op, l, r)
            }
            Expr::Call {
                receiver,
                method,
                args,
            } => self.eval_call(env, receiver, method, args),
        }
    }

    fn eval_call(&mut self, env: &Env, receiver: &Expr, method: &str, args: &[Expr]) -> Result<Value> {
        let target = match receiver {
            Expr::Ident(name) => Receiver::Name(name),
            other => Receiver::Evaluated(self.eval_expr(env, other)?),
        };
        if target.is_console() {
            match method {
                "println" => return self.call_println(env, args),
                "scanp" => return self.call_scanp(env, args),
                _ => {}
            }
        }
        if method == "tostring" {
            let value = match target {
                Receiver::Name(name) => lookup(env, name),
                Receiver::Evaluated(v) => v,
            };
            let value = match (value, args.first()) {
                (Value::Unit, Some(arg)) => self.eval_expr(env, arg)?,
                (v, _) => v,
            };
            return Ok(Value::Str(value.to_string()));
        }
        self.console
            .warn(&format!("unknown method '{}' on receiver '{}'", method, target));
        Ok(Value::Unit)
    }

    /// `console.println(args...)`: display forms concatenated, then a newline.
    fn call_println(&mut self, env: &Env, args: &[Expr]) -> Result<Value> {
        let mut out = String::new();
        for arg in args {
            out.push_str(&self.eval_expr(env, arg)?.to_string());
        }
        self.console.write_line(&out)?;
        Ok(Value::Unit)
    }

    /// `console.scanp([prompt])`: shows the prompt, then blocks for one line.
    fn call_scanp(&mut self, env: &Env, args: &[Expr]) -> Result<Value> {
        if let Some(arg) = args.first() {
            let prompt = self.eval_expr(env, arg)?;
            self.console.write(&prompt.to_string())?;
        }
        match self.console.read_line()? {
            Some(line) => Ok(Value::Str(line)),
            None => error("scanp() reached end of input"),
        }
    }
}

/// Bound value, or the identifier's own text when unbound.
fn lookup(env: &Env, name: &str) -> Value {
    env.value(name)
        .cloned()
        .unwrap_or_else(|| Value::Str(name.to_string()))
}

fn overflow<T>(op: BinaryOp) -> Result<T> {
    error(format!("integer overflow in '{}'", op))
}

fn binary(op: BinaryOp, l: Value, r: Value) -> Result<Value> {
    match op {
        BinaryOp::Add => match (l, r) {
            (Value::Int(x), Value::Int(y)) => x.checked_add(y).map_or_else(|| overflow(op), |n| Ok(Value::Int(n))),
            (x, y) => Ok(Value::Str(format!("{}{}", x, y))),
        },
        BinaryOp::Sub => {
            let (x, y) = (l.to_int()?, r.to_int()?);
            x.checked_sub(y).map_or_else(|| overflow(op), |n| Ok(Value::Int(n)))
        }
        BinaryOp::Mul => {
            let (x, y) = (l.to_int()?, r.to_int()?);
            x.checked_mul(y).map_or_else(|| overflow(op), |n| Ok(Value::Int(n)))
        }
        BinaryOp::Div => {
            let (x, y) = (l.to_int()?, r.to_int()?);
            if y == 0 {
                return division_error();
            }
            floor_div(x, y).map_or_else(|| overflow(op), |n| Ok(Value::Int(n)))
        }
        BinaryOp::Eq => Ok(Value::Bool(l == r)),
    }
}

/// Integer division rounding toward negative infinity.
fn floor_div(x: i64, y: i64) -> Option<i64> {
    let q = x.checked_div(y)?;
    if x % y != 0 && ((x < 0) != (y < 0)) {
        Some(q - 1)
    } else {
        Some(q)
    }
}
