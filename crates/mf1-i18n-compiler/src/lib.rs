#![forbid(unsafe_code)]

mod assembler;
mod compiler;
mod config;
mod error;
mod escape;
mod lexer;
mod locale;
mod message_format;
mod message_set;
mod parser;
mod registry;
mod validator;

pub use crate::assembler::{Assembled, assemble};
pub use crate::compiler::{CompileContext, CompileOptions, compile_message};
pub use crate::config::{CompilerConfig, load_config, load_config_or_default};
pub use crate::error::{CompileError, CompileResult};
pub use crate::escape::{escape, unescape};
pub use crate::lexer::Span;
pub use crate::locale::{LocaleResolver, Locales};
pub use crate::message_format::{MessageFormat, MessageFormatBuilder};
pub use crate::message_set::{MessageSource, RESERVED_KEY};
pub use crate::parser::{
    Element, FunctionCall, Message, ParseError, PluralCase, PluralStatement, SelectCase,
    SelectStatement, parse_message,
};
pub use crate::registry::FormatterRegistry;
pub use crate::validator::validate_plural_keys;
