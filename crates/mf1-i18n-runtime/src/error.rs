use mf1_i18n_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid hash format")]
    InvalidHash,
    #[error("module digest mismatch")]
    DigestMismatch,
    #[error("unsupported runtime {name} v{version}")]
    UnsupportedRuntime { name: String, version: u32 },
    #[error("missing plural rules for locale {0}")]
    MissingLocale(String),
    #[error("missing formatter {0}")]
    MissingFormatter(String),
    #[error("invalid export: {0}")]
    InvalidExport(String),
    #[error("invalid module: {0}")]
    InvalidModule(String),
    #[error("arguments must be a JSON object or array")]
    InvalidArgs,
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
