use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::{Formatter, FormatterArg, PluralKind, PluralRule};

/// One node of a compiled, locale-bound message.
#[derive(Clone, Debug)]
pub enum Node {
    Text(String),
    Argument(String),
    NumberSign(NumberSign),
    Call(Call),
    Plural(PluralNode),
    Select(SelectNode),
    /// Wraps the rendered inner node in directional isolates.
    Isolate(Box<Node>),
}

/// `#` bound at compile time to its nearest enclosing plural.
#[derive(Clone, Debug, PartialEq)]
pub struct NumberSign {
    pub arg: String,
    pub offset: f64,
    pub strict: bool,
}

#[derive(Clone, Debug)]
pub struct Call {
    pub arg: String,
    pub formatter: Formatter,
    pub locale: String,
    pub style: Option<FormatterArg>,
}

#[derive(Clone, Debug)]
pub struct PluralNode {
    pub arg: String,
    pub kind: PluralKind,
    pub offset: f64,
    pub rule: PluralRule,
    pub cases: Vec<PluralCase>,
}

#[derive(Clone, Debug)]
pub struct PluralCase {
    pub key: PluralKey,
    pub body: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PluralKey {
    Exact(i64),
    Label(String),
}

impl PluralKey {
    /// `=N` becomes an exact key, anything else a category label.
    pub fn parse(key: &str) -> Option<Self> {
        match key.strip_prefix('=') {
            Some(number) => number.parse::<i64>().ok().map(PluralKey::Exact),
            None if key.is_empty() => None,
            None => Some(PluralKey::Label(key.to_string())),
        }
    }

    pub fn is_other(&self) -> bool {
        matches!(self, PluralKey::Label(label) if label == "other")
    }
}

impl fmt::Display for PluralKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluralKey::Exact(value) => write!(f, "={value}"),
            PluralKey::Label(label) => f.write_str(label),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SelectNode {
    pub arg: String,
    pub cases: Vec<SelectCase>,
}

#[derive(Clone, Debug)]
pub struct SelectCase {
    pub key: String,
    pub body: Vec<Node>,
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};

    use super::PluralKey;

    #[test]
    fn parses_exact_and_label_keys() {
        assert_eq!(PluralKey::parse("=0"), Some(PluralKey::Exact(0)));
        assert_eq!(PluralKey::parse("=-2"), Some(PluralKey::Exact(-2)));
        assert_eq!(PluralKey::parse("few"), Some(PluralKey::Label(String::from("few"))));
        assert_eq!(PluralKey::parse("=x"), None);
        assert_eq!(PluralKey::parse(""), None);
    }

    #[test]
    fn displays_keys_as_written() {
        assert_eq!(PluralKey::Exact(3).to_string(), "=3");
        assert!(PluralKey::Label(String::from("other")).is_other());
    }
}
