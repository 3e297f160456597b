//! Value types for the C-colon interpreter.

use std::fmt;
use std::rc::Rc;

use ccolon_syntax::ast::FuncDef;
use ccolon_syntax::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer value
    Int(i64),
    /// A UTF-8 encoded string value
    Str(String),
    /// A boolean value, produced by `==`
    Bool(bool),
    /// A stored function definition
    Function(Rc<FuncDef>),
    /// The result of a statement or a built-in with nothing to return
    Unit,
}

impl Value {
    /// Condition semantics for `if`: zero, the empty string and unit are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Str(s) => !s.is_empty(),
            Value::Function(_) => true,
            Value::Unit => false,
        }
    }

    /// Integer coercion used by `-`, `*` and `/`.
    pub fn to_int(&self) -> Result<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Str(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| Error::evaluation(format!("Cannot convert \"{}\" to int", s))),
            other => Err(Error::evaluation(format!("Cannot convert {} to int", other))),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::Function(_) => "function",
            Value::Unit => "none",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Function(func) => write!(f, "<function {}>", func.name),
            Value::Unit => write!(f, "none"),
        }
    }
}
