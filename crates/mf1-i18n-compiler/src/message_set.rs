use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::CompileResult;

/// Collides with the host's stringification hook when serialized.
pub const RESERVED_KEY: &str = "toString";

/// A pattern or a keyed group of sources, as found in JSON message files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MessageSource {
    Pattern(String),
    Group(BTreeMap<String, MessageSource>),
}

impl MessageSource {
    pub fn from_json_str(text: &str) -> CompileResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: &Path) -> CompileResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn group<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<MessageSource>,
    {
        MessageSource::Group(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<&str> for MessageSource {
    fn from(pattern: &str) -> Self {
        MessageSource::Pattern(pattern.to_string())
    }
}

impl From<String> for MessageSource {
    fn from(pattern: String) -> Self {
        MessageSource::Pattern(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::MessageSource;

    #[test]
    fn parses_nested_json_sources() {
        let source = MessageSource::from_json_str(
            r#"{"en": {"greeting": "Hi {name}"}, "fr": {"greeting": "Salut {name}"}}"#,
        )
        .expect("json");
        let MessageSource::Group(locales) = source else {
            panic!("expected group");
        };
        assert_eq!(locales.len(), 2);
        assert_eq!(
            locales["fr"],
            MessageSource::group([("greeting", "Salut {name}")])
        );
    }

    #[test]
    fn rejects_non_string_leaves() {
        assert!(MessageSource::from_json_str(r#"{"count": 3}"#).is_err());
    }
}
