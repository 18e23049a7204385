//! ruleq-lex — turns a query string into a flat token sequence (spec §4.1).
//!
//! This is the first phase of the `Lex → Parse → Validate → Cache-Insert`
//! pipeline (§2). Lexing may allocate (one [`ruleq_util::Symbol`] intern per
//! distinct identifier or string literal); nothing downstream of a cached
//! rule calls back into this crate.

pub mod cursor;
pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{keyword, Token, TokenKind};
