//! The predicate rule engine facade (spec §4.5): compiles query text into
//! cached [`ruleq_par::CompiledRule`]s and evaluates them against a
//! [`ruleq_eval::Context`].
//!
//! This is the only crate application code depends on — `ruleq-lex`,
//! `ruleq-par`, `ruleq-sem`, and `ruleq-eval` are implementation detail
//! wired together here.

pub mod engine;

pub use engine::Engine;
pub use ruleq_eval::{Context, ContextValue};
pub use ruleq_par::CompiledRule;
pub use ruleq_util::{CompileError, CompileResult, ErrorKind};
