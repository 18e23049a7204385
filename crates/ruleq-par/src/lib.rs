//! ruleq-par — the AST model and recursive-descent parser for rule text.
//!
//! The AST types live here rather than in a separate crate: they have no
//! meaning independent of the grammar that produces them, and every
//! downstream crate (`ruleq-sem`, `ruleq-eval`) already depends on this one
//! for its parser, so folding them in removes a dependency edge for free.

pub mod ast;
pub mod parser;

pub use ast::{AstNode, BinaryOp, CompiledRule, UnaryOp, Value, MAX_SAFE_INTEGER};
pub use parser::parse;
