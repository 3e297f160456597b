//! C-colon lexer: converts source text into a flat token sequence.
use ccolon_syntax::error::{lex_error_at, Result};
use ccolon_syntax::token::{Token, TokenKind, KEYWORDS, OPERATORS};

/// Character scanner that produces tokens with positions.
pub struct Lexer {
    src: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    /// Create a new lexer over the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            src: input.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }
    fn peek_next(&self) -> Option<char> {
        self.src.get(self.pos + 1).copied()
    }
    fn advance(&mut self) -> Option<char> {
        let ch = self.src.get(self.pos).copied();
        if let Some(c) = ch {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        ch
    }

    /// Skips whitespace, `// line` comments and `/* block */` comments.
    fn skip_trivia(&mut self) -> Result<()> {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else if c == '/' && self.peek_next() == Some('/') {
                while let Some(c2) = self.peek() {
                    if c2 == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else if c == '/' && self.peek_next() == Some('*') {
                let (line, col) = (self.line, self.col);
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        Some(_) => {}
                        None => return lex_error_at(line, col, "Unterminated block comment"),
                    }
                }
            } else {
                break;
            }
        }
        Ok(())
    }

    fn read_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if pred(c) {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        s
    }

    fn read_number(&mut self) -> Token {
        let (line, col) = (self.line, self.col);
        let text = self.read_while(|c| c.is_ascii_digit());
        Token::new(TokenKind::Number, text, line, col)
    }

    fn read_ident_or_keyword(&mut self) -> Token {
        let (line, col) = (self.line, self.col);
        let text = self.read_while(|c| c.is_alphanumeric() || c == '_');
        let kind = if KEYWORDS.contains(&text.as_str()) {
            TokenKind::Keyword
        } else {
            TokenKind::Id
        };
        Token::new(kind, text, line, col)
    }

    /// Reads a string literal; the opening quote has not been consumed yet.
    /// No escape sequences are processed.
    fn read_string(&mut self) -> Result<Token> {
        let (line, col) = (self.line, self.col);
        self.advance();
        let mut s = String::new();
        while let Some(c) = self.advance() {
            if c == '"' {
                return Ok(Token::new(TokenKind::String, s, line, col));
            }
            s.push(c);
        }
        lex_error_at(line, col, "Unterminated string")
    }

    /// Tokenize the entire input.
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia()?;
            let line = self.line;
            let col = self.col;
            let tk = match self.peek() {
                None => break,
                Some('=') => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        Token::new(TokenKind::Op, "==", line, col)
                    } else {
                        Token::new(TokenKind::Op, "=", line, col)
                    }
                }
                Some(c) if is_single_char_op(c) => {
                    self.advance();
                    Token::new(TokenKind::Op, c.to_string(), line, col)
                }
                Some('"') => self.read_string()?,
                Some(c) if c.is_ascii_digit() => self.read_number(),
                Some(c) if c.is_alphabetic() || c == '_' => self.read_ident_or_keyword(),
                Some(other) => {
                    return lex_error_at(line, col, format!("Unexpected character '{}'", other));
                }
            };
            tokens.push(tk);
        }
        Ok(tokens)
    }
}

fn is_single_char_op(c: char) -> bool {
    let mut buf = [0u8; 4];
    OPERATORS.contains(&&*c.encode_utf8(&mut buf))
}

/// Convenience wrapper around [`Lexer::tokenize`].
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).tokenize()
}
