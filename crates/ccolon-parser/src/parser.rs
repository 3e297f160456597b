//! Recursive-descent parser with precedence climbing for binary operators.

use std::iter::Peekable;
use std::vec::IntoIter;

use ccolon_syntax::ast::*;
use ccolon_syntax::error::{parse_error_at, Error, Result};
use ccolon_syntax::token::{Token, TokenKind, TYPE_KEYWORDS};

/// Deepest syntax tree the parser will build. Evaluation and drop recurse
/// along the same path, so this also bounds their stack use.
pub const MAX_DEPTH: usize = 256;

/// Single-pass parser over an owned token sequence. Every rule commits once
/// it starts; there is no backtracking.
pub struct Parser {
    tokens: Peekable<IntoIter<Token>>,
    /// Position just past the last consumed token, reported when input ends early.
    end: (usize, usize),
    /// Tree depth of the node under construction.
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into_iter().peekable(),
            end: (1, 1),
            depth: 0,
        }
    }

    fn mark(&mut self, tok: &Token) {
        let mut width = tok.text.chars().count();
        if tok.kind == TokenKind::String {
            // quotes are not part of the text
            width += 2;
        }
        self.end = (tok.line, tok.col + width);
    }

    /// Goes one level deeper, failing once past [`MAX_DEPTH`]. Callers reset
    /// `depth` on success; after an error the parser is not reused.
    fn descend(&mut self, what: &str) -> Result<()> {
        if self.depth >= MAX_DEPTH {
            let (line, col) = self.tokens.peek().map_or(self.end, |t| (t.line, t.col));
            return parse_error_at(line, col, format!("{} nested too deeply", what));
        }
        self.depth += 1;
        Ok(())
    }

    fn bump(&mut self) -> Option<Token> {
        let tok = self.tokens.next()?;
        self.mark(&tok);
        Some(tok)
    }

    fn at_op(&mut self, op: &str) -> bool {
        self.tokens.peek().map_or(false, |t| t.is_op(op))
    }

    fn at_keyword(&mut self, kw: &str) -> bool {
        self.tokens.peek().map_or(false, |t| t.is_keyword(kw))
    }

    /// Consumes the operator `op` if it is next.
    fn eat_op(&mut self, op: &str) -> bool {
        match self.tokens.next_if(|t| t.is_op(op)) {
            Some(tok) => {
                self.mark(&tok);
                true
            }
            None => false,
        }
    }

    /// Error naming what was expected and what was found instead.
    fn unexpected<T>(&mut self, expected: &str) -> Result<T> {
        match self.tokens.peek() {
            Some(t) => parse_error_at(
                t.line,
                t.col,
                format!("Expected {}, found {}", expected, t.describe()),
            ),
            None => parse_error_at(
                self.end.0,
                self.end.1,
                format!("Expected {}, found end of input", expected),
            ),
        }
    }

    fn expect_where(&mut self, expected: &str, pred: impl FnOnce(&Token) -> bool) -> Result<Token> {
        match self.tokens.next_if(pred) {
            Some(tok) => {
                self.mark(&tok);
                Ok(tok)
            }
            None => self.unexpected(expected),
        }
    }

    fn expect(&mut self, kind: TokenKind, text: Option<&str>) -> Result<Token> {
        let expected = match text {
            Some(t) => format!("{} '{}'", kind, t),
            None => kind.name().to_string(),
        };
        self.expect_where(&expected, |t| {
            t.kind == kind && text.map_or(true, |x| t.text == x)
        })
    }

    fn expect_op(&mut self, op: &str) -> Result<Token> {
        self.expect(TokenKind::Op, Some(op))
    }

    fn expect_keyword(&mut self, kw: &str) -> Result<Token> {
        self.expect(TokenKind::Keyword, Some(kw))
    }

    fn expect_ident(&mut self) -> Result<String> {
        Ok(self.expect(TokenKind::Id, None)?.text)
    }

    /// Parse the whole token sequence into a program.
    pub fn parse_program(&mut self) -> Result<Program> {
        let mut items = Vec::new();
        while self.tokens.peek().is_some() {
            let item = if self.at_keyword("import") {
                self.parse_import()?
            } else if self.at_keyword("function") {
                Item::Function(self.parse_function()?)
            } else {
                Item::Stmt(self.parse_stmt()?)
            };
            items.push(item);
        }
        Ok(Program { items })
    }

    fn parse_import(&mut self) -> Result<Item> {
        self.expect_keyword("import")?;
        let module = self.expect_ident()?;
        Ok(Item::Import { module })
    }

    fn parse_function(&mut self) -> Result<FuncDef> {
        self.expect_keyword("function")?;
        let name = self.expect_ident()?;
        self.expect_op("(")?;
        self.expect_op(")")?;
        let body = self.parse_block()?;
        Ok(FuncDef { name, body })
    }

    /// Statements valid inside a block: `var`, `if`, or an expression.
    fn parse_stmt(&mut self) -> Result<Stmt> {
        if self.at_keyword("var") {
            self.parse_var_decl()
        } else if self.at_keyword("if") {
            self.parse_if_else()
        } else {
            Ok(Stmt::Expr(self.parse_expr()?))
        }
    }

    fn parse_block(&mut self) -> Result<Vec<Stmt>> {
        let outer = self.depth;
        self.descend("Block")?;
        self.expect_op("{")?;
        let mut body = Vec::new();
        while self.tokens.peek().is_some() && !self.at_op("}") {
            body.push(self.parse_stmt()?);
        }
        self.expect_op("}")?;
        self.depth = outer;
        Ok(body)
    }

    fn parse_var_decl(&mut self) -> Result<Stmt> {
        self.expect_keyword("var")?;
        let type_name = self
            .expect_where("type keyword 'int' or 'string'", |t| {
                t.kind == TokenKind::Keyword && TYPE_KEYWORDS.contains(&t.text.as_str())
            })?
            .text;
        let name = self.expect_ident()?;
        self.expect_op("=")?;
        let value = self.parse_expr()?;
        Ok(Stmt::VarDecl {
            type_name,
            name,
            value,
        })
    }

    fn parse_if_else(&mut self) -> Result<Stmt> {
        self.expect_keyword("if")?;
        self.expect_op("(")?;
        let cond = self.parse_expr()?;
        self.expect_op(")")?;
        let if_body = self.parse_block()?;
        let else_body = if self.at_keyword("else") {
            self.bump();
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(Stmt::IfElse {
            cond,
            if_body,
            else_body,
        })
    }

    /// Parse a single expression starting at the cursor.
    pub fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_expr_prec(0)
    }

    /// Precedence climbing. The right operand is parsed with a threshold one
    /// above the operator's own precedence, so equal-precedence operators
    /// fold to the left. Each fold deepens the tree by one.
    fn parse_expr_prec(&mut self, min_prec: u8) -> Result<Expr> {
        let outer = self.depth;
        self.descend("Expression")?;
        let mut left = self.parse_primary()?;
        while let Some(op) = self.peek_binary_op(min_prec) {
            self.descend("Expression")?;
            self.bump();
            let right = self.parse_expr_prec(op.precedence() + 1)?;
            left = Expr::binary(left, op, right);
        }
        self.depth = outer;
        Ok(left)
    }

    fn peek_binary_op(&mut self, min_prec: u8) -> Option<BinaryOp> {
        self.tokens
            .peek()
            .filter(|t| t.kind == TokenKind::Op)
            .and_then(|t| BinaryOp::from_symbol(&t.text))
            .filter(|op| op.precedence() >= min_prec)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        if self.at_op("(") {
            self.bump();
            let inner = self.parse_expr()?;
            self.expect_op(")")?;
            return Ok(inner);
        }
        let tok = self.expect_where("expression", |t| {
            matches!(t.kind, TokenKind::Id | TokenKind::String | TokenKind::Number)
        })?;
        match tok.kind {
            TokenKind::Id => self.parse_call_chain(Expr::Ident(tok.text)),
            TokenKind::String => Ok(Expr::LiteralString(tok.text)),
            _ => tok.text.parse::<i64>().map(Expr::LiteralInt).map_err(|_| {
                Error::parse_at(
                    format!("Integer literal '{}' is out of range", tok.text),
                    tok.line,
                    tok.col,
                )
            }),
        }
    }

    /// Left-folds `.method(args)` suffixes: `a.b().c()` becomes
    /// `Call(Call(a, b, []), c, [])`.
    fn parse_call_chain(&mut self, mut expr: Expr) -> Result<Expr> {
        let outer = self.depth;
        while self.at_op(".") {
            self.descend("Expression")?;
            self.bump();
            let method = self.expect_ident()?;
            self.expect_op("(")?;
            let args = self.parse_args()?;
            expr = Expr::call(expr, method, args);
        }
        self.depth = outer;
        Ok(expr)
    }

    /// Comma-separated arguments; the opening `(` is already consumed.
    fn parse_args(&mut self) -> Result<Vec<Expr>> {
        let mut args = Vec::new();
        if self.eat_op(")") {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr()?);
            if self.eat_op(")") {
                return Ok(args);
            }
            if !self.eat_op(",") {
                return self.unexpected("OP ')' or OP ','");
            }
        }
    }
}
