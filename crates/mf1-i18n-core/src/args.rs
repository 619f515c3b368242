use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// An argument value supplied to a compiled message.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Numeric view used by `#` and plural selection. Numeric strings count.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Num(number) if number.is_finite() => Some(*number),
            Value::Str(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|number| number.is_finite())
            }
            _ => None,
        }
    }

    /// Plain string form used for direct substitution and select matching.
    pub fn render(&self) -> String {
        match self {
            Value::Null | Value::Map(_) => String::new(),
            Value::Bool(value) => value.to_string(),
            Value::Num(number) => format_number(*number),
            Value::Str(text) => text.clone(),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(Value::render).collect();
                parts.join(",")
            }
        }
    }
}

pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return String::from("0");
    }
    format!("{value}")
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Num(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Num(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Num(f64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Num(value as f64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(String::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

/// The input record of a compiled message.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Args {
    values: BTreeMap<String, Value>,
}

impl Args {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Binds an ordered sequence to the positional names `0`, `1`, ...
    pub fn from_sequence(values: impl IntoIterator<Item = Value>) -> Self {
        let mut args = Self::new();
        for (idx, value) in values.into_iter().enumerate() {
            args.insert(idx.to_string(), value);
        }
        args
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<BTreeMap<String, Value>> for Args {
    fn from(values: BTreeMap<String, Value>) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;

    use super::{Args, Value};

    #[test]
    fn args_insert_and_get() {
        let mut args = Args::new();
        args.insert("name", Value::Str(String::from("Nova")));
        let value = args.get("name").expect("value should exist");
        assert_eq!(value, &Value::Str(String::from("Nova")));
    }

    #[test]
    fn sequence_binds_positional_names() {
        let args = Args::from_sequence(vec![Value::from("a"), Value::from(2)]);
        assert_eq!(args.get("0"), Some(&Value::from("a")));
        assert_eq!(args.get("1"), Some(&Value::Num(2.0)));
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn numeric_strings_are_numbers() {
        assert_eq!(Value::from(" 42 ").as_number(), Some(42.0));
        assert_eq!(Value::from("1.5").as_number(), Some(1.5));
        assert_eq!(Value::from("many").as_number(), None);
        assert_eq!(Value::from("").as_number(), None);
        assert_eq!(Value::Bool(true).as_number(), None);
        assert_eq!(Value::from("inf").as_number(), None);
        assert_eq!(Value::from("-Infinity").as_number(), None);
        assert_eq!(Value::from("1e400").as_number(), None);
        assert_eq!(Value::Num(f64::INFINITY).as_number(), None);
    }

    #[test]
    fn render_stringifies_values() {
        assert_eq!(Value::Num(5.0).render(), "5");
        assert_eq!(Value::Num(-0.0).render(), "0");
        assert_eq!(Value::Num(2.25).render(), "2.25");
        assert_eq!(Value::Null.render(), "");
        assert_eq!(Value::Bool(false).render(), "false");
        assert_eq!(
            Value::List(vec![Value::from("a"), Value::from(1)]).render(),
            "a,1"
        );
        assert_eq!(Value::Map(BTreeMap::new()).render(), "");
    }
}
