//! The stable compile-error taxonomy shared by every compilation phase.
//!
//! Every failure kind a caller can observe from [`AddQuery`], [`CompileRule`],
//! or the first-use path of [`Evaluate`] is a variant of [`CompileError`].
//! Evaluation against an already-validated rule never produces one of these —
//! type mismatches and missing attributes degrade to `false` instead (see the
//! evaluator crate).
//!
//! [`AddQuery`]: https://docs.rs/ruleq
//! [`CompileRule`]: https://docs.rs/ruleq
//! [`Evaluate`]: https://docs.rs/ruleq

use crate::span::Span;
use thiserror::Error;

/// A stable tag identifying the kind of compile failure, independent of the
/// human-readable message. Callers that branch on error kind should match on
/// this rather than the `Display` text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyQuery,
    UnterminatedString,
    InvalidSyntax,
    MissingOperator,
    EmptyParentheses,
    UnbalancedParentheses,
    TrailingTokens,
    InvalidInOperand,
    InvalidStringOperator,
    InvalidPresenceOperator,
    InvalidLiteral,
    InvalidOperator,
    InvalidNode,
}

/// A compile-time failure, surfaced from the lexer, parser, or semantic
/// validator. Carries a stable [`ErrorKind`], a human-readable message, and
/// the source span the failure occurred at (zero-width if no single range
/// applies, e.g. an empty query).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message} at {span:?}")]
pub struct CompileError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Span,
}

impl CompileError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
        }
    }

    pub fn empty_query() -> Self {
        Self::new(ErrorKind::EmptyQuery, "query text is empty", Span::point(0))
    }

    pub fn unterminated_string(span: Span) -> Self {
        Self::new(ErrorKind::UnterminatedString, "unterminated string literal", span)
    }

    pub fn invalid_syntax(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::InvalidSyntax, message, span)
    }

    pub fn missing_operator(span: Span) -> Self {
        Self::new(
            ErrorKind::MissingOperator,
            "expected an operator between two operands",
            span,
        )
    }

    pub fn empty_parentheses(span: Span) -> Self {
        Self::new(ErrorKind::EmptyParentheses, "empty parentheses `()`", span)
    }

    pub fn unbalanced_parentheses(span: Span) -> Self {
        Self::new(ErrorKind::UnbalancedParentheses, "unbalanced parentheses", span)
    }

    pub fn trailing_tokens(span: Span) -> Self {
        Self::new(
            ErrorKind::TrailingTokens,
            "unexpected tokens after a complete expression",
            span,
        )
    }

    pub fn invalid_in_operand(span: Span) -> Self {
        Self::new(
            ErrorKind::InvalidInOperand,
            "right-hand side of `in`/`not in` must be an array literal",
            span,
        )
    }

    pub fn invalid_string_operator(span: Span) -> Self {
        Self::new(
            ErrorKind::InvalidStringOperator,
            "`co`/`sw`/`ew` require a string-typed literal operand",
            span,
        )
    }

    pub fn invalid_presence_operator(span: Span) -> Self {
        Self::new(
            ErrorKind::InvalidPresenceOperator,
            "`pr` requires an identifier or property path operand",
            span,
        )
    }

    pub fn invalid_literal(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::InvalidLiteral, message, span)
    }

    pub fn invalid_operator(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::InvalidOperator, message, span)
    }

    pub fn invalid_node(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::InvalidNode, message, span)
    }
}

pub type CompileResult<T> = std::result::Result<T, CompileError>;
