use std::collections::BTreeMap;

use mf1_i18n_core::{Args, Value};

use crate::error::{RuntimeError, RuntimeResult};

pub fn value_from_json(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(flag) => Value::Bool(*flag),
        serde_json::Value::Number(number) => number.as_f64().map(Value::Num).unwrap_or(Value::Null),
        serde_json::Value::String(text) => Value::Str(text.clone()),
        serde_json::Value::Array(items) => Value::List(items.iter().map(value_from_json).collect()),
        serde_json::Value::Object(map) => Value::Map(
            map.iter()
                .map(|(key, value)| (key.clone(), value_from_json(value)))
                .collect::<BTreeMap<_, _>>(),
        ),
    }
}

/// Objects become named records, arrays positional ones.
pub fn args_from_json(value: &serde_json::Value) -> RuntimeResult<Args> {
    match value {
        serde_json::Value::Object(map) => {
            let mut args = Args::new();
            for (key, value) in map {
                args.insert(key.clone(), value_from_json(value));
            }
            Ok(args)
        }
        serde_json::Value::Array(items) => Ok(Args::from_sequence(items.iter().map(value_from_json))),
        _ => Err(RuntimeError::InvalidArgs),
    }
}

pub fn args_from_json_str(text: &str) -> RuntimeResult<Args> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    args_from_json(&value)
}
