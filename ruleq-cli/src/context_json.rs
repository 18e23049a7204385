//! Converts a `serde_json::Value` into a [`ruleq::Context`].
//!
//! JSON is the only ingress format this example binary supports; the
//! engine itself has no notion of JSON (spec §6).

use ruleq::{Context, ContextValue};

use crate::error::{CliError, Result};

pub fn context_from_json(value: &serde_json::Value) -> Result<Context> {
    let object = value.as_object().ok_or(CliError::ContextNotAnObject)?;
    let mut ctx = Context::new();
    for (key, value) in object {
        ctx.insert(key.clone(), context_value_from_json(value));
    }
    Ok(ctx)
}

fn context_value_from_json(value: &serde_json::Value) -> ContextValue {
    match value {
        serde_json::Value::Null => ContextValue::Str(String::new()),
        serde_json::Value::Bool(b) => ContextValue::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                ContextValue::I64(i)
            } else if let Some(u) = n.as_u64() {
                ContextValue::U64(u)
            } else {
                ContextValue::F64(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_json::Value::String(s) => ContextValue::string(s.clone()),
        serde_json::Value::Array(items) => {
            ContextValue::List(items.iter().map(context_value_from_json).collect())
        }
        serde_json::Value::Object(map) => {
            let mut out = rustc_hash::FxHashMap::default();
            for (key, value) in map {
                out.insert(key.clone(), context_value_from_json(value));
            }
            ContextValue::Map(out)
        }
    }
}
