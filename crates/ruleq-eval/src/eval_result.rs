//! The per-node evaluation result.
//!
//! A scratch record overwritten on every AST-node visit is a pattern suited
//! to languages without Rust's ability to return small, stack-allocated sum
//! types cheaply. Here [`EvalResult`] expresses that same "exactly one live
//! value, never boxed" contract as an ordinary stack-only enum returned by
//! value from each recursive evaluation step: nothing about it is
//! heap-allocated, and there is still exactly one instance alive per call
//! frame, which is what zero-allocation evaluation actually requires.

use ruleq_par::Value;

use crate::context::ContextValue;

/// The outcome of evaluating one AST node against a [`crate::Context`].
///
/// Borrows rather than copies: string payloads point either into an
/// interned [`ruleq_util::Symbol`] (`'static`, for AST literals) or into
/// the caller's `Context` (for attribute lookups) — either way, `'a`
/// covers the shorter of the two, and no allocation happens to produce it.
#[derive(Clone, Copy, Debug)]
pub enum EvalResult<'a> {
    Bool(bool),
    Number { float: f64, int: Option<i64> },
    Str(&'a str),
    /// A `Context`-resolved array, used for membership against a
    /// runtime-resolved `in`/`not in` right-hand side.
    ContextArray(&'a [ContextValue]),
    /// An AST array literal, used for membership against a literal
    /// right-hand side.
    LiteralArray(&'a [Value]),
    /// Attribute absence or an intermediate value with no evaluable shape
    /// (spec §4.4); every operator but presence treats this as falsy.
    Absent,
}

impl<'a> EvalResult<'a> {
    pub fn from_value(value: &'a Value) -> Self {
        match value {
            Value::String(sym) => EvalResult::Str(sym.as_str()),
            Value::Number { float, int } => EvalResult::Number {
                float: *float,
                int: *int,
            },
            Value::Boolean(b) => EvalResult::Bool(*b),
            Value::Array(items) => EvalResult::LiteralArray(items),
        }
    }

    pub fn from_context_value(value: &'a ContextValue) -> Self {
        match value {
            ContextValue::Bool(b) => EvalResult::Bool(*b),
            ContextValue::I64(i) => EvalResult::Number {
                float: *i as f64,
                int: Some(*i),
            },
            ContextValue::U64(u) => {
                if *u <= i64::MAX as u64 {
                    EvalResult::Number {
                        float: *u as f64,
                        int: Some(*u as i64),
                    }
                } else {
                    // Outside i64 range: keep the float representation,
                    // drop the shadow rather than wrapping it (spec's
                    // Non-goal rules out arbitrary precision beyond i64).
                    EvalResult::Number {
                        float: *u as f64,
                        int: None,
                    }
                }
            }
            ContextValue::F32(f) => EvalResult::Number {
                float: *f as f64,
                int: None,
            },
            ContextValue::F64(f) => EvalResult::Number {
                float: *f,
                int: None,
            },
            ContextValue::Str(s) => EvalResult::Str(s.as_str()),
            ContextValue::List(items) => EvalResult::ContextArray(items),
            // A property path that bottoms out on an intermediate map
            // rather than a leaf has no scalar/array shape to compare
            // against; every operator degrades this the same way it
            // degrades a missing attribute (spec §4.4's "all other types
            // degrade to their textual rendering" is not applied here —
            // rendering a whole subtree would itself require allocation,
            // which I3 forbids on this path).
            ContextValue::Map(_) => EvalResult::Absent,
        }
    }

    /// Truthiness per §4.4 "Logical (`and or not`)".
    pub fn is_truthy(&self) -> bool {
        match self {
            EvalResult::Bool(b) => *b,
            EvalResult::Number { float, int } => int.map(|i| i != 0).unwrap_or(*float != 0.0),
            EvalResult::Str(s) => !s.is_empty(),
            EvalResult::ContextArray(items) => !items.is_empty(),
            EvalResult::LiteralArray(items) => !items.is_empty(),
            EvalResult::Absent => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruleq_util::Symbol;

    #[test]
    fn absent_is_never_truthy() {
        assert!(!EvalResult::Absent.is_truthy());
    }

    #[test]
    fn zero_and_empty_string_are_falsy() {
        assert!(!EvalResult::Number { float: 0.0, int: Some(0) }.is_truthy());
        assert!(!EvalResult::Str("").is_truthy());
    }

    #[test]
    fn literal_string_round_trips_through_value() {
        let v = Value::String(Symbol::intern("hello"));
        match EvalResult::from_value(&v) {
            EvalResult::Str(s) => assert_eq!(s, "hello"),
            _ => panic!("expected Str"),
        }
    }
}
