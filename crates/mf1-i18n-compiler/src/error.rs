use mf1_i18n_runtime::RuntimeError;
use thiserror::Error;

use crate::parser::ParseError;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("locale not found: {0}")]
    LocaleNotFound(String),
    #[error("invalid locale mapping: {0}")]
    InvalidLocaleMapping(String),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("invalid plural key {key:?} for {arg} in locale {locale}; valid keys are {valid:?}")]
    InvalidPluralKey {
        key: String,
        arg: String,
        locale: String,
        valid: Vec<String>,
    },
    #[error("unknown formatter {name} for argument {arg}")]
    UnknownFormatter { name: String, arg: String },
    #[error("reserved key {0} cannot be used at the top level of a message set")]
    ReservedKey(String),
    #[error("export error: {0}")]
    Runtime(#[from] RuntimeError),
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CompileResult<T> = Result<T, CompileError>;
