//! ruleq-util — shared primitives for the predicate rule engine.
//!
//! This crate sits at the bottom of the dependency graph (see the workspace
//! `ruleq-lex → ruleq-par → ruleq-sem → ruleq-eval → ruleq` chain) and
//! provides the three things every layer needs:
//!
//! - [`symbol::Symbol`] — interned identifiers and literal strings, compared
//!   in O(1) instead of byte-for-byte, which matters once comparison
//!   happens on every evaluation rather than once at parse time.
//! - [`span::Span`] — a byte range into the query text, used for error
//!   reporting only; it never leaks into the evaluator.
//! - [`error::CompileError`] / [`error::ErrorKind`] — the stable error
//!   taxonomy surfaced by every compile-time phase.

pub mod error;
pub mod span;
pub mod symbol;

pub use error::{CompileError, CompileResult, ErrorKind};
pub use span::Span;
pub use symbol::Symbol;
