use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::{CoreError, CoreResult};

/// A locale identifier such as `en`, `en-US` or `zh_Hant_TW`.
///
/// Subtags may be separated by `-` or `_`; the original spelling is kept so
/// lookups use exactly what the caller declared.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LocaleId {
    original: String,
    subtags: Vec<String>,
}

impl LocaleId {
    pub fn parse(input: &str) -> CoreResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidInput("locale is empty"));
        }

        let subtags: Vec<&str> = trimmed.split(is_separator).collect();
        if subtags.iter().any(|part| part.is_empty()) {
            return Err(CoreError::InvalidInput("locale has empty subtag"));
        }

        for (idx, part) in subtags.iter().enumerate() {
            if idx == 0 {
                if !is_alpha(part) || !(2..=8).contains(&part.len()) {
                    return Err(CoreError::InvalidInput("invalid language subtag"));
                }
                continue;
            }
            if !is_alphanumeric(part) || part.len() > 8 {
                return Err(CoreError::InvalidInput("invalid locale subtag"));
            }
        }

        Ok(Self {
            original: trimmed.to_string(),
            subtags: subtags.into_iter().map(str::to_string).collect(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }

    pub fn language(&self) -> &str {
        self.subtags.first().map(String::as_str).unwrap_or("")
    }

    pub fn subtags(&self) -> &[String] {
        &self.subtags
    }

    /// The identifier followed by each ancestor obtained by dropping the
    /// trailing subtag: `zh-Hant-TW`, `zh-Hant`, `zh`.
    pub fn fallback_chain(&self) -> Vec<&str> {
        let mut chain = Vec::with_capacity(self.subtags.len());
        let mut current = self.original.as_str();
        chain.push(current);
        while let Some(idx) = current.rfind(is_separator) {
            current = &current[..idx];
            chain.push(current);
        }
        chain
    }
}

fn is_separator(ch: char) -> bool {
    ch == '-' || ch == '_'
}

fn is_alpha(value: &str) -> bool {
    value.chars().all(|ch| ch.is_ascii_alphabetic())
}

fn is_alphanumeric(value: &str) -> bool {
    value.chars().all(|ch| ch.is_ascii_alphanumeric())
}
