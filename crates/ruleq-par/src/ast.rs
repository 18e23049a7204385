//! The typed value model and AST (spec §3 "Value", "ASTNode", "CompiledRule").

use std::hash::{Hash, Hasher};

use ahash::AHasher;
use ruleq_util::Symbol;

/// Threshold beyond which an integer loses exact float representation
/// (spec §3: `[-2^53, 2^53]`).
pub const MAX_SAFE_INTEGER: i64 = 1 << 53;

/// A dynamically-typed literal or computed value.
///
/// `Number` carries both a float representation and, when the value
/// originated from an integer, an exact `i64` shadow (spec §3 "Value",
/// I4). Keeping the shadow as `Option<i64>` rather than a separate
/// `is_integer: bool` field means there is exactly one way to ask
/// "is this integer-shaped" — `int.is_some()` — instead of two fields
/// that could disagree.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(Symbol),
    Number { float: f64, int: Option<i64> },
    Boolean(bool),
    Array(Vec<Value>),
}

impl Value {
    pub fn integer(value: i64) -> Self {
        Value::Number {
            float: value as f64,
            int: Some(value),
        }
    }

    pub fn float(value: f64) -> Self {
        Value::Number {
            float: value,
            int: None,
        }
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Symbol::intern(&s.into()))
    }

    /// Parses a big-integer lexeme (§4.1 "large-integer promotion") into an
    /// exact integer-shadowed number, never rounding through `f64` first.
    pub fn big_integer(digits: &str) -> Option<Self> {
        digits.parse::<i64>().ok().map(Value::integer)
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Number { float, int } => int.map(|i| i != 0).unwrap_or(*float != 0.0),
            Value::String(s) => !s.as_str().is_empty(),
            Value::Array(items) => !items.is_empty(),
        }
    }
}

/// Binary operators, covering every `CompOp` alternative (§4.2) plus `and`/`or`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Co,
    Sw,
    Ew,
    In,
    NotIn,
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
}

/// Unary (prefix) operators: logical `not` and the postfix-in-grammar but
/// unary-in-tree `pr` presence test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Pr,
}

/// A node of the immutable, validated expression tree (spec §3 "ASTNode").
///
/// Each node exclusively owns its children; the whole tree is immutable
/// after parsing, which is what lets [`crate::CompiledRule`] be shared
/// across concurrently-evaluating threads (§3 I2).
#[derive(Clone, Debug, PartialEq)]
pub enum AstNode {
    Literal(Value),
    Identifier(Symbol),
    /// An ordered, non-empty sequence of path segments (`a.b.c`).
    PropertyPath(Vec<Symbol>),
    Unary {
        op: UnaryOp,
        child: Box<AstNode>,
    },
    Binary {
        op: BinaryOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },
    ArrayLiteral(Vec<Value>),
}

/// The result of compiling one query: its AST root plus a content hash of
/// the original text, used only for diagnostics (spec §3 "CompiledRule").
#[derive(Clone, Debug)]
pub struct CompiledRule {
    pub root: AstNode,
    pub source_hash: u64,
}

impl CompiledRule {
    pub fn new(root: AstNode, source: &str) -> Self {
        let mut hasher = AHasher::default();
        source.hash(&mut hasher);
        Self {
            root,
            source_hash: hasher.finish(),
        }
    }
}
