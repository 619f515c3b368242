#![forbid(unsafe_code)]

mod backend;
mod bindings;
mod encode;
mod error;
mod json;
mod loader;
mod module;
mod plural_rules;

pub use crate::backend::BasicFormatBackend;
pub use crate::bindings::Bindings;
pub use crate::encode::{build_module, encode_module};
pub use crate::error::{RuntimeError, RuntimeResult};
pub use crate::json::{args_from_json, args_from_json_str, value_from_json};
pub use crate::loader::{body_digest, format_sha256, load_module, load_module_file, parse_sha256};
pub use crate::module::{
    ExportBody, ExportTarget, FormatterRef, LocaleImport, PortableCase, PortableEntry,
    PortableKind, PortableMessage, PortableModule, PortableNode, PortableStyle, Prelude,
    RUNTIME_NAME, RUNTIME_PRIMITIVES, RUNTIME_VERSION,
};
pub use crate::plural_rules::BasicPluralRules;
