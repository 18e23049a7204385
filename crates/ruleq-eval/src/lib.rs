//! Zero-allocation evaluation of compiled rules against a [`Context`].
//!
//! Compiling a rule (`ruleq-par`) may allocate; evaluating it against an
//! already-built [`Context`] must not. This crate's shape follows ordinary
//! tree-walking-interpreter practice; see `DESIGN.md` for the per-piece
//! grounding.

pub mod context;
pub mod eval_result;
pub mod evaluator;

pub use context::{Context, ContextValue};
pub use eval_result::EvalResult;
pub use evaluator::Evaluator;
