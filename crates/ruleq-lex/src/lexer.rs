//! The lexer (spec §4.1): turns a query string into a flat token sequence.
//!
//! Lexing is the only allocating phase of the pipeline along with parsing
//! and validation (§2 control flow) — evaluation against an already-compiled
//! rule never reaches this code.

use ruleq_util::{CompileError, CompileResult, Span, Symbol};

use crate::cursor::Cursor;
use crate::token::{keyword, Token, TokenKind};

/// Scans an entire query string into a token sequence terminated by
/// [`TokenKind::Eof`].
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    source: &'a str,
    /// The most recently emitted token kind, used to decide whether a `-`
    /// starts a negative number literal or is a lexical error (§4.1: "a
    /// leading `-` ... not preceded by an operand-producing token").
    last: Option<TokenKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            source,
            last: None,
        }
    }

    /// Scans the whole source and returns its token sequence, or the first
    /// lexical error encountered.
    pub fn tokenize(source: &'a str) -> CompileResult<Vec<Token>> {
        if source.trim().is_empty() {
            return Err(CompileError::empty_query());
        }
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn span(&self, start: usize) -> Span {
        Span::new(start as u32, self.cursor.position() as u32)
    }

    fn push(&mut self, kind: TokenKind, span: Span) -> Token {
        self.last = Some(kind);
        Token::new(kind, span)
    }

    fn next_token(&mut self) -> CompileResult<Token> {
        self.skip_whitespace();

        if self.cursor.is_at_end() {
            let span = Span::point(self.cursor.position() as u32);
            return Ok(self.push(TokenKind::Eof, span));
        }

        let start = self.cursor.position();
        let c = self.cursor.current_char();

        if c == '"' {
            return self.scan_string(start);
        }
        if c.is_ascii_digit() {
            return self.scan_number(start, false);
        }
        if c == '-' && self.cursor.peek_char(1).is_ascii_digit() && !self.follows_operand() {
            self.cursor.advance(); // consume '-'
            return self.scan_number(start, true);
        }
        if is_identifier_start(c) {
            return self.scan_identifier(start);
        }

        match c {
            '(' => {
                self.cursor.advance();
                Ok(self.push(TokenKind::LParen, self.span(start)))
            }
            ')' => {
                self.cursor.advance();
                Ok(self.push(TokenKind::RParen, self.span(start)))
            }
            '[' => {
                self.cursor.advance();
                Ok(self.push(TokenKind::LBracket, self.span(start)))
            }
            ']' => {
                self.cursor.advance();
                Ok(self.push(TokenKind::RBracket, self.span(start)))
            }
            '.' => {
                self.cursor.advance();
                Ok(self.push(TokenKind::Dot, self.span(start)))
            }
            ',' => {
                self.cursor.advance();
                Ok(self.push(TokenKind::Comma, self.span(start)))
            }
            '=' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Ok(self.push(TokenKind::EqEq, self.span(start)))
                } else {
                    Err(CompileError::invalid_syntax(
                        "`=` is not an operator; did you mean `==` or `eq`?",
                        self.span(start),
                    ))
                }
            }
            '!' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Ok(self.push(TokenKind::BangEq, self.span(start)))
                } else {
                    Err(CompileError::invalid_syntax(
                        "`!` is not an operator; did you mean `!=` or `ne`?",
                        self.span(start),
                    ))
                }
            }
            other => Err(CompileError::invalid_syntax(
                format!("unexpected character `{other}`"),
                self.span(start),
            )),
        }
    }

    /// True when the previously emitted token already produced an operand
    /// value, meaning a following `-` cannot be a number's sign (there is
    /// no binary subtraction operator in this grammar).
    fn follows_operand(&self) -> bool {
        matches!(
            self.last,
            Some(
                TokenKind::Identifier(_)
                    | TokenKind::String(_)
                    | TokenKind::BigInt(_)
                    | TokenKind::Number(_)
                    | TokenKind::Boolean(_)
                    | TokenKind::RParen
                    | TokenKind::RBracket
            )
        )
    }

    fn skip_whitespace(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.current_char().is_whitespace() {
            self.cursor.advance();
        }
    }

    fn scan_string(&mut self, start: usize) -> CompileResult<Token> {
        self.cursor.advance(); // opening quote
        let mut value = String::new();
        loop {
            if self.cursor.is_at_end() {
                return Err(CompileError::unterminated_string(self.span(start)));
            }
            let c = self.cursor.current_char();
            if c == '"' {
                self.cursor.advance();
                break;
            }
            if c == '\\' {
                self.cursor.advance();
                if self.cursor.is_at_end() {
                    return Err(CompileError::unterminated_string(self.span(start)));
                }
                let escaped = self.cursor.current_char();
                match escaped {
                    '"' => value.push('"'),
                    '\\' => value.push('\\'),
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    // Unknown escapes preserve the backslash and the
                    // following character literally (§4.1).
                    other => {
                        value.push('\\');
                        value.push(other);
                    }
                }
                self.cursor.advance();
                continue;
            }
            value.push(c);
            self.cursor.advance();
        }
        let span = self.span(start);
        let symbol = Symbol::intern(&value);
        Ok(self.push(TokenKind::String(symbol), span))
    }

    fn scan_number(&mut self, start: usize, _negative: bool) -> CompileResult<Token> {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }
        let mut has_dot = false;
        if self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit() {
            has_dot = true;
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }
        let span = self.span(start);
        let lexeme = span.slice(self.source);

        if !has_dot {
            if let Ok(big) = lexeme.parse::<i64>() {
                if (big.unsigned_abs() as u64) > (1u64 << 53) {
                    let symbol = Symbol::intern(lexeme);
                    return Ok(self.push(TokenKind::BigInt(symbol), span));
                }
            } else {
                // Overflows i64 outright: still a big integer, just one
                // that needs the full digit text rather than a parsed i64.
                let symbol = Symbol::intern(lexeme);
                return Ok(self.push(TokenKind::BigInt(symbol), span));
            }
        }

        let value: f64 = lexeme
            .parse()
            .map_err(|_| CompileError::invalid_literal(format!("invalid number `{lexeme}`"), span))?;
        Ok(self.push(TokenKind::Number(value), span))
    }

    fn scan_identifier(&mut self, start: usize) -> CompileResult<Token> {
        self.cursor.advance();
        while is_identifier_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let span = self.span(start);
        let text = span.slice(self.source);

        if let Some(kind) = keyword(text) {
            if kind == TokenKind::Not {
                if let Some(merged) = self.try_merge_not_in(start)? {
                    return Ok(merged);
                }
            }
            return Ok(self.push(kind, span));
        }

        let symbol = Symbol::intern(text);
        Ok(self.push(TokenKind::Identifier(symbol), span))
    }

    /// After scanning a `not` keyword, looks ahead past whitespace for an
    /// adjacent `in` keyword and merges them into a single [`TokenKind::NotIn`]
    /// token (§4.1: "`not in` is recognised as a single compound operator
    /// when the two keyword tokens appear adjacent").
    fn try_merge_not_in(&mut self, not_start: usize) -> CompileResult<Option<Token>> {
        let snapshot = self.cursor.snapshot();
        self.skip_whitespace();
        let in_start = self.cursor.position();
        if !self.source[in_start..].starts_with("in") {
            self.cursor.restore(snapshot);
            return Ok(None);
        }
        let after = in_start + 2;
        let boundary_ok = self.source[after..]
            .chars()
            .next()
            .map(|c| !is_identifier_continue(c))
            .unwrap_or(true);
        if !boundary_ok {
            self.cursor.restore(snapshot);
            return Ok(None);
        }
        self.cursor.advance_n(2);
        let span = self.span(not_start);
        Ok(Some(self.push(TokenKind::NotIn, span)))
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
