//! AST (abstract syntax tree) types for the C-colon language.
//!
//! Every node owns its children; the tree produced by one parse shares
//! nothing with any other. Each node has a one-line `Display` form used by
//! AST dumps, e.g. `VarDecl(type=int, name=x, value=Int(5))`.

use std::fmt;

/// Binary operators, from weakest to tightest binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// Looks up the operator spelled `s`, if it is a binary operator.
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "==" => Some(BinaryOp::Eq),
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Sub),
            "*" => Some(BinaryOp::Mul),
            "/" => Some(BinaryOp::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Eq => "==",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }

    /// Binding strength used by precedence climbing; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Eq => 0,
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div => 2,
        }
    }
}

/// Expressions (literals, identifiers, operators, method calls).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    LiteralInt(i64),
    LiteralString(String),
    LiteralBool(bool),
    Ident(String),
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    /// `receiver.method(args...)`; the receiver may itself be a call.
    Call {
        receiver: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn call(receiver: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            receiver: Box::new(receiver),
            method: method.into(),
            args,
        }
    }
}

/// Statements allowed both at top level and inside blocks.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl {
        type_name: String,
        name: String,
        value: Expr,
    },
    IfElse {
        cond: Expr,
        if_body: Vec<Stmt>,
        /// `None` when the source has no `else` branch.
        else_body: Option<Vec<Stmt>>,
    },
    Expr(Expr),
}

/// Zero-argument function definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDef {
    pub name: String,
    pub body: Vec<Stmt>,
}

/// Top-level program items.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Import { module: String },
    Function(FuncDef),
    Stmt(Stmt),
}

/// Entire program consisting of items.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub items: Vec<Item>,
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    write!(f, "[")?;
    for (i, it) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", it)?;
    }
    write!(f, "]")
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::LiteralInt(n) => write!(f, "Int({})", n),
            Expr::LiteralString(s) => write!(f, "Str({:?})", s),
            Expr::LiteralBool(b) => write!(f, "Bool({})", b),
            Expr::Ident(name) => write!(f, "Ident({})", name),
            Expr::Binary { left, op, right } => write!(f, "Binary({} {} {})", left, op, right),
            Expr::Call {
                receiver,
                method,
                args,
            } => {
                write!(f, "FuncCall(receiver={}, method={}, args=", receiver, method)?;
                write_list(f, args)?;
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::VarDecl {
                type_name,
                name,
                value,
            } => write!(f, "VarDecl(type={}, name={}, value={})", type_name, name, value),
            Stmt::IfElse {
                cond,
                if_body,
                else_body,
            } => {
                write!(f, "IfElse(cond={}, if_body=", cond)?;
                write_list(f, if_body)?;
                write!(f, ", else_body=")?;
                match else_body {
                    Some(body) => write_list(f, body)?,
                    None => write!(f, "None")?,
                }
                write!(f, ")")
            }
            Stmt::Expr(e) => write!(f, "{}", e),
        }
    }
}

impl fmt::Display for FuncDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FuncDef(name={}, body=", self.name)?;
        write_list(f, &self.body)?;
        write!(f, ")")
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Import { module } => write!(f, "Import(module={})", module),
            Item::Function(func) => write!(f, "{}", func),
            Item::Stmt(s) => write!(f, "{}", s),
        }
    }
}

impl fmt::Display for Program {
    /// One item per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            writeln!(f, "{}", item)?;
        }
        Ok(())
    }
}
