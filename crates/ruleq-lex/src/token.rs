//! The token model (spec §3 "Token", §4.1 output alphabet).
//!
//! Each [`Token`] pairs a [`TokenKind`] with the [`Span`] it was scanned
//! from. Kinds that carry an interpreted value (identifiers, literals) hold
//! it directly in the variant rather than in unused sibling fields, since a
//! tagged enum already says "at most one of these is meaningful" for free.

use ruleq_util::{Span, Symbol};

/// A lexical category, carrying its interpreted value where one exists.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    /// Sentinel terminating every token stream.
    Eof,

    Identifier(Symbol),
    String(Symbol),
    /// A digit-only lexeme whose magnitude exceeds the float-safe range
    /// (§4.1 "large-integer promotion"). Carries the raw digit text; the
    /// parser is responsible for turning it into an integer-shadowed
    /// numeric literal.
    BigInt(Symbol),
    Number(f64),
    Boolean(bool),

    LParen,
    RParen,
    LBracket,
    RBracket,
    Dot,
    Comma,

    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    EqEq,
    BangEq,

    Co,
    Sw,
    Ew,

    In,
    NotIn,
    Pr,

    Dq,
    Dn,
    Be,
    Bq,
    Af,
    Aq,
    Dl,
    Dg,

    And,
    Or,
    Not,
}

impl TokenKind {
    /// True for every `CompOp` alternative in the grammar (§4.2), including
    /// the `not in` compound.
    pub fn is_comparison_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::Ne
                | TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::Le
                | TokenKind::Ge
                | TokenKind::EqEq
                | TokenKind::BangEq
                | TokenKind::Co
                | TokenKind::Sw
                | TokenKind::Ew
                | TokenKind::In
                | TokenKind::NotIn
                | TokenKind::Dq
                | TokenKind::Dn
                | TokenKind::Be
                | TokenKind::Bq
                | TokenKind::Af
                | TokenKind::Aq
                | TokenKind::Dl
                | TokenKind::Dg
        )
    }
}

/// A single scanned token: its kind plus the byte range it came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Looks up a reserved keyword by its exact (case-sensitive) spelling,
/// per §4.1 "Identifier recognition is case-sensitive for keywords."
pub fn keyword(text: &str) -> Option<TokenKind> {
    Some(match text {
        "eq" => TokenKind::Eq,
        "ne" => TokenKind::Ne,
        "lt" => TokenKind::Lt,
        "gt" => TokenKind::Gt,
        "le" => TokenKind::Le,
        "ge" => TokenKind::Ge,
        "co" => TokenKind::Co,
        "sw" => TokenKind::Sw,
        "ew" => TokenKind::Ew,
        "in" => TokenKind::In,
        "pr" => TokenKind::Pr,
        "dq" => TokenKind::Dq,
        "dn" => TokenKind::Dn,
        "be" => TokenKind::Be,
        "bq" => TokenKind::Bq,
        "af" => TokenKind::Af,
        "aq" => TokenKind::Aq,
        "dl" => TokenKind::Dl,
        "dg" => TokenKind::Dg,
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "not" => TokenKind::Not,
        "true" => TokenKind::Boolean(true),
        "false" => TokenKind::Boolean(false),
        _ => return None,
    })
}
