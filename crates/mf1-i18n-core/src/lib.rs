#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod args;
mod error;
mod format_backend;
mod interpreter;
mod locale_id;
mod message;
mod node;
mod plural;

pub use args::{Args, Value, format_number};
pub use error::{CoreError, CoreResult};
pub use format_backend::{
    CustomFormatter, FormatBackend, Formatter, FormatterArg, FormatterId, format_value,
};
pub use interpreter::{FSI, PDI, execute, fmt, number, plural, select};
pub use locale_id::LocaleId;
pub use message::{Artifact, CompiledMessage, MessageSet};
pub use node::{Call, Node, NumberSign, PluralCase, PluralKey, PluralNode, SelectCase, SelectNode};
pub use plural::{PluralCategory, PluralFn, PluralKind, PluralRule, PluralRuleProvider};
