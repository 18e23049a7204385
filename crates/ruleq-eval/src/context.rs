//! The evaluation context (spec §3 "Context").
//!
//! A nested mapping from string keys to dynamically-typed values, borrowed
//! read-only by the evaluator. Ingress from a host collection (JSON, a
//! language-native map, ...) happens once, eagerly, when the caller builds
//! a [`Context`]; nothing in this crate parses or copies it again per call.

use rustc_hash::FxHashMap;

/// One leaf (or nested-map) value a [`Context`] may hold for a key.
///
/// Covers every permitted leaf type in spec §3: booleans, every
/// signed/unsigned integer width up to 64 bits, 32- and 64-bit floats,
/// strings, lists, and nested maps.
#[derive(Clone, Debug, PartialEq)]
pub enum ContextValue {
    Bool(bool),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Str(String),
    List(Vec<ContextValue>),
    Map(FxHashMap<String, ContextValue>),
}

impl ContextValue {
    pub fn string(s: impl Into<String>) -> Self {
        ContextValue::Str(s.into())
    }
}

impl From<bool> for ContextValue {
    fn from(v: bool) -> Self {
        ContextValue::Bool(v)
    }
}

impl From<i64> for ContextValue {
    fn from(v: i64) -> Self {
        ContextValue::I64(v)
    }
}

impl From<f64> for ContextValue {
    fn from(v: f64) -> Self {
        ContextValue::F64(v)
    }
}

impl From<String> for ContextValue {
    fn from(v: String) -> Self {
        ContextValue::Str(v)
    }
}

impl From<&str> for ContextValue {
    fn from(v: &str) -> Self {
        ContextValue::Str(v.to_owned())
    }
}

/// The top-level attribute map supplied by the caller at evaluation time.
///
/// Built once per call (or reused across calls against the same data);
/// the evaluator only ever borrows it.
#[derive(Clone, Debug, Default)]
pub struct Context {
    root: FxHashMap<String, ContextValue>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> &mut Self {
        self.root.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.root.get(key)
    }

    /// Walks a non-empty sequence of path segments through nested maps.
    /// Any absent or non-map intermediate segment yields `None` — the
    /// evaluator treats that uniformly as attribute-not-found (§4.4).
    pub fn resolve_path(&self, segments: &[&str]) -> Option<&ContextValue> {
        let (first, rest) = segments.split_first()?;
        let mut current = self.get(first)?;
        for segment in rest {
            current = match current {
                ContextValue::Map(map) => map.get(*segment)?,
                _ => return None,
            };
        }
        Some(current)
    }
}
