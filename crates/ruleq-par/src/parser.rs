//! Recursive-descent parser (spec §4.2).
//!
//! ```text
//! Expr     := OrExpr
//! OrExpr   := AndExpr  ( "or"  AndExpr )*
//! AndExpr  := NotExpr  ( "and" NotExpr )*
//! NotExpr  := ( "not" )* Primary
//! Primary  := "(" Expr ")"
//!           | Compare
//! Compare  := Operand ( CompOp Operand )?
//!           | Operand "pr"
//! Operand  := Literal | Path | Array
//! Path     := Identifier ( "." Identifier )*
//! Array    := "[" ( Literal ("," Literal)* )? "]"
//! Literal  := String | Number | Boolean
//! ```
//!
//! Comparison operators do not chain: `Compare` matches at most one
//! `CompOp Operand` pair, so `a eq b eq c` leaves the second `eq` token
//! unconsumed — it surfaces as a trailing-tokens error at the top level
//! rather than needing a dedicated check here.

use ruleq_lex::{Lexer, Token, TokenKind};
use ruleq_util::{CompileError, CompileResult, Span, Symbol};

use crate::ast::{AstNode, BinaryOp, UnaryOp, Value};

/// Parses a complete query into a validated-shape (but not yet
/// semantically-validated) AST. Semantic validation is a separate pass,
/// performed by `ruleq-sem` over the tree this returns.
pub fn parse(source: &str) -> CompileResult<AstNode> {
    let tokens = Lexer::tokenize(source)?;
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_expr()?;
    parser.expect_eof()?;
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn current(&self) -> Token {
        self.tokens[self.pos]
    }

    fn current_span(&self) -> Span {
        self.current().span
    }

    fn advance(&mut self) -> Token {
        let tok = self.current();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_eof(&self) -> CompileResult<()> {
        if self.check(TokenKind::Eof) {
            Ok(())
        } else {
            Err(CompileError::trailing_tokens(self.current_span()))
        }
    }

    fn at_operand_start(&self) -> bool {
        matches!(
            self.current().kind,
            TokenKind::Identifier(_)
                | TokenKind::String(_)
                | TokenKind::Number(_)
                | TokenKind::BigInt(_)
                | TokenKind::Boolean(_)
                | TokenKind::LBracket
        )
    }

    // Expr := OrExpr
    fn parse_expr(&mut self) -> CompileResult<AstNode> {
        self.parse_or()
    }

    // OrExpr := AndExpr ( "or" AndExpr )*
    fn parse_or(&mut self) -> CompileResult<AstNode> {
        let mut left = self.parse_and()?;
        while self.eat(TokenKind::Or) {
            let right = self.parse_and()?;
            left = AstNode::Binary {
                op: BinaryOp::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    // AndExpr := NotExpr ( "and" NotExpr )*
    fn parse_and(&mut self) -> CompileResult<AstNode> {
        let mut left = self.parse_not()?;
        while self.eat(TokenKind::And) {
            let right = self.parse_not()?;
            left = AstNode::Binary {
                op: BinaryOp::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    // NotExpr := ( "not" )* Primary
    fn parse_not(&mut self) -> CompileResult<AstNode> {
        if self.eat(TokenKind::Not) {
            let child = self.parse_not()?;
            return Ok(AstNode::Unary {
                op: UnaryOp::Not,
                child: Box::new(child),
            });
        }
        self.parse_primary()
    }

    // Primary := "(" Expr ")" | Compare
    fn parse_primary(&mut self) -> CompileResult<AstNode> {
        if self.check(TokenKind::LParen) {
            let open_span = self.current_span();
            self.advance();
            if self.check(TokenKind::RParen) {
                return Err(CompileError::empty_parentheses(open_span.to(self.current_span())));
            }
            let inner = self.parse_expr()?;
            if !self.eat(TokenKind::RParen) {
                return Err(CompileError::unbalanced_parentheses(open_span));
            }
            return Ok(inner);
        }
        self.parse_compare()
    }

    // Compare := Operand ( CompOp Operand )? | Operand "pr"
    fn parse_compare(&mut self) -> CompileResult<AstNode> {
        let operand = self.parse_operand()?;

        let result = if self.check(TokenKind::Pr) {
            self.advance();
            AstNode::Unary {
                op: UnaryOp::Pr,
                child: Box::new(operand),
            }
        } else if let Some(op) = comp_op(self.current().kind) {
            self.advance();
            let right = self.parse_operand_after_operator()?;
            AstNode::Binary {
                op,
                left: Box::new(operand),
                right: Box::new(right),
            }
        } else {
            operand
        };

        // Two adjacent operands with no connecting operator (§4.2).
        if self.at_operand_start() {
            return Err(CompileError::missing_operator(self.current_span()));
        }

        Ok(result)
    }

    fn parse_operand_after_operator(&mut self) -> CompileResult<AstNode> {
        if !self.at_operand_start() {
            return Err(CompileError::invalid_syntax(
                "expected an operand after the comparison operator",
                self.current_span(),
            ));
        }
        self.parse_operand()
    }

    // Operand := Literal | Path | Array
    fn parse_operand(&mut self) -> CompileResult<AstNode> {
        match self.current().kind {
            TokenKind::Identifier(_) => self.parse_path(),
            TokenKind::LBracket => self.parse_array(),
            TokenKind::String(_) | TokenKind::Number(_) | TokenKind::BigInt(_) | TokenKind::Boolean(_) => {
                let value = self.parse_literal()?;
                Ok(AstNode::Literal(value))
            }
            _ => Err(CompileError::invalid_syntax(
                "expected a value, identifier, or array",
                self.current_span(),
            )),
        }
    }

    // Path := Identifier ( "." Identifier )*
    fn parse_path(&mut self) -> CompileResult<AstNode> {
        let mut segments = Vec::with_capacity(1);
        segments.push(self.expect_identifier()?);
        while self.check(TokenKind::Dot) {
            self.advance();
            segments.push(self.expect_identifier_after_dot()?);
        }
        if segments.len() == 1 {
            Ok(AstNode::Identifier(segments.remove(0)))
        } else {
            Ok(AstNode::PropertyPath(segments))
        }
    }

    fn expect_identifier(&mut self) -> CompileResult<Symbol> {
        match self.current().kind {
            TokenKind::Identifier(sym) => {
                self.advance();
                Ok(sym)
            }
            _ => Err(CompileError::invalid_syntax(
                "expected an identifier",
                self.current_span(),
            )),
        }
    }

    fn expect_identifier_after_dot(&mut self) -> CompileResult<Symbol> {
        match self.current().kind {
            TokenKind::Identifier(sym) => {
                self.advance();
                Ok(sym)
            }
            _ => Err(CompileError::invalid_syntax(
                "`.` must be followed by another identifier",
                self.current_span(),
            )),
        }
    }

    // Array := "[" ( Literal ("," Literal)* )? "]"
    fn parse_array(&mut self) -> CompileResult<AstNode> {
        self.advance(); // consume '['
        let mut values = Vec::new();
        if !self.check(TokenKind::RBracket) {
            values.push(self.parse_literal()?);
            while self.eat(TokenKind::Comma) {
                values.push(self.parse_literal()?);
            }
        }
        if !self.eat(TokenKind::RBracket) {
            return Err(CompileError::invalid_syntax(
                "expected `]` to close an array literal",
                self.current_span(),
            ));
        }
        Ok(AstNode::ArrayLiteral(values))
    }

    // Literal := String | Number | Boolean
    fn parse_literal(&mut self) -> CompileResult<Value> {
        let span = self.current_span();
        let value = match self.current().kind {
            TokenKind::String(sym) => Value::String(sym),
            TokenKind::Number(f) => Value::float(f),
            TokenKind::BigInt(sym) => Value::big_integer(sym.as_str()).ok_or_else(|| {
                CompileError::invalid_literal(
                    format!("integer literal `{}` exceeds 64-bit signed range", sym.as_str()),
                    span,
                )
            })?,
            TokenKind::Boolean(b) => Value::Boolean(b),
            _ => {
                return Err(CompileError::invalid_syntax(
                    "expected a string, number, or boolean literal",
                    span,
                ))
            }
        };
        self.advance();
        Ok(value)
    }
}

fn comp_op(kind: TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::Eq | TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::Ne | TokenKind::BangEq => BinaryOp::Ne,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::Le => BinaryOp::Le,
        TokenKind::Ge => BinaryOp::Ge,
        TokenKind::Co => BinaryOp::Co,
        TokenKind::Sw => BinaryOp::Sw,
        TokenKind::Ew => BinaryOp::Ew,
        TokenKind::In => BinaryOp::In,
        TokenKind::NotIn => BinaryOp::NotIn,
        TokenKind::Dq => BinaryOp::Dq,
        TokenKind::Dn => BinaryOp::Dn,
        TokenKind::Be => BinaryOp::Be,
        TokenKind::Bq => BinaryOp::Bq,
        TokenKind::Af => BinaryOp::Af,
        TokenKind::Aq => BinaryOp::Aq,
        TokenKind::Dl => BinaryOp::Dl,
        TokenKind::Dg => BinaryOp::Dg,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_comparison() {
        let ast = parse("x eq 10").unwrap();
        match ast {
            AstNode::Binary { op: BinaryOp::Eq, left, right } => {
                assert!(matches!(*left, AstNode::Identifier(_)));
                assert!(matches!(*right, AstNode::Literal(Value::Number { .. })));
            }
            other => panic!("unexpected ast: {other:?}"),
        }
    }

    #[test]
    fn collapses_single_segment_path_to_identifier() {
        let ast = parse("x pr").unwrap();
        match ast {
            AstNode::Unary { op: UnaryOp::Pr, child } => {
                assert!(matches!(*child, AstNode::Identifier(_)));
            }
            other => panic!("unexpected ast: {other:?}"),
        }
    }

    #[test]
    fn parses_multi_segment_property_path() {
        let ast = parse("user.profile.age ge 18").unwrap();
        match ast {
            AstNode::Binary { left, .. } => match *left {
                AstNode::PropertyPath(segments) => assert_eq!(segments.len(), 3),
                other => panic!("expected property path, got {other:?}"),
            },
            other => panic!("unexpected ast: {other:?}"),
        }
    }

    #[test]
    fn and_binds_tighter_than_or() {
        // a or b and c  ==  a or (b and c)
        let ast = parse("a pr or b pr and c pr").unwrap();
        match ast {
            AstNode::Binary { op: BinaryOp::Or, right, .. } => {
                assert!(matches!(*right, AstNode::Binary { op: BinaryOp::And, .. }));
            }
            other => panic!("unexpected ast: {other:?}"),
        }
    }

    #[test]
    fn not_binds_tighter_than_and() {
        // not a and b == (not a) and b
        let ast = parse("not a pr and b pr").unwrap();
        match ast {
            AstNode::Binary { op: BinaryOp::And, left, .. } => {
                assert!(matches!(*left, AstNode::Unary { op: UnaryOp::Not, .. }));
            }
            other => panic!("unexpected ast: {other:?}"),
        }
    }

    #[test]
    fn parenthesised_grouping_overrides_precedence() {
        // (a or b) and c
        let ast = parse("(a pr or b pr) and c pr").unwrap();
        assert!(matches!(ast, AstNode::Binary { op: BinaryOp::And, .. }));
    }

    #[test]
    fn empty_parentheses_is_an_error() {
        assert!(parse("()").is_err());
    }

    #[test]
    fn unbalanced_parentheses_is_an_error() {
        assert!(parse("(x eq 1").is_err());
    }

    #[test]
    fn dangling_comparison_operator_is_an_error() {
        assert!(parse("x eq").is_err());
    }

    #[test]
    fn chained_comparisons_are_a_syntax_error() {
        assert!(parse("x eq 1 eq 2").is_err());
    }

    #[test]
    fn adjacent_operands_without_operator_is_an_error() {
        assert!(parse("x 5").is_err());
    }

    #[test]
    fn trailing_tokens_after_complete_expression_is_an_error() {
        assert!(parse("x pr and").is_err());
        assert!(parse("x pr )").is_err());
    }

    #[test]
    fn array_literal_of_strings() {
        let ast = parse(r#"color in ["red","green","blue"]"#).unwrap();
        match ast {
            AstNode::Binary { op: BinaryOp::In, right, .. } => match *right {
                AstNode::ArrayLiteral(values) => assert_eq!(values.len(), 3),
                other => panic!("expected array literal, got {other:?}"),
            },
            other => panic!("unexpected ast: {other:?}"),
        }
    }

    #[test]
    fn identifiers_inside_arrays_are_forbidden() {
        assert!(parse("x in [a, b]").is_err());
    }

    #[test]
    fn not_in_parses_as_a_single_operator() {
        let ast = parse(r#"color not in ["red"]"#).unwrap();
        assert!(matches!(
            ast,
            AstNode::Binary { op: BinaryOp::NotIn, .. }
        ));
    }

    #[test]
    fn big_integer_literal_round_trips_exactly() {
        let ast = parse("x gt 9223372036854775806").unwrap();
        match ast {
            AstNode::Binary { right, .. } => match *right {
                AstNode::Literal(Value::Number { int: Some(i), .. }) => {
                    assert_eq!(i, 9223372036854775806)
                }
                other => panic!("expected big integer literal, got {other:?}"),
            },
            other => panic!("unexpected ast: {other:?}"),
        }
    }
}
