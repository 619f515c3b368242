use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::Value;

/// Built-in formatters backed by a host internationalization API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormatterId {
    Number,
    Date,
    Time,
}

impl FormatterId {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "number" => Some(FormatterId::Number),
            "date" => Some(FormatterId::Date),
            "time" => Some(FormatterId::Time),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormatterId::Number => "number",
            FormatterId::Date => "date",
            FormatterId::Time => "time",
        }
    }
}

/// The style part of `{name, fn, style}`: one string, or a comma separated list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormatterArg {
    Single(String),
    List(Vec<String>),
}

impl FormatterArg {
    pub fn first(&self) -> Option<&str> {
        match self {
            FormatterArg::Single(value) => Some(value.as_str()),
            FormatterArg::List(values) => values.first().map(String::as_str),
        }
    }
}

pub trait FormatBackend: Send + Sync {
    fn format_number(&self, value: &Value, locale: &str, style: Option<&FormatterArg>) -> String;
    fn format_date(&self, value: &Value, locale: &str, style: Option<&FormatterArg>) -> String;
    fn format_time(&self, value: &Value, locale: &str, style: Option<&FormatterArg>) -> String;
}

pub type CustomFormatter =
    Arc<dyn Fn(&Value, &str, Option<&FormatterArg>) -> String + Send + Sync>;

/// A formatter resolved at compile time. Evaluation never looks names up.
#[derive(Clone)]
pub enum Formatter {
    Builtin {
        id: FormatterId,
        backend: Arc<dyn FormatBackend>,
    },
    Custom {
        name: String,
        func: CustomFormatter,
    },
}

impl Formatter {
    pub fn builtin(id: FormatterId, backend: Arc<dyn FormatBackend>) -> Self {
        Formatter::Builtin { id, backend }
    }

    pub fn custom(
        name: impl Into<String>,
        func: impl Fn(&Value, &str, Option<&FormatterArg>) -> String + Send + Sync + 'static,
    ) -> Self {
        Formatter::Custom {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Formatter::Builtin { id, .. } => id.as_str(),
            Formatter::Custom { name, .. } => name,
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Formatter::Builtin { .. })
    }

    pub fn call(&self, value: &Value, locale: &str, style: Option<&FormatterArg>) -> String {
        match self {
            Formatter::Builtin { id, backend } => {
                format_value(backend.as_ref(), *id, value, locale, style)
            }
            Formatter::Custom { func, .. } => func(value, locale, style),
        }
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formatter::Builtin { id, .. } => f.debug_tuple("Builtin").field(id).finish(),
            Formatter::Custom { name, .. } => f.debug_tuple("Custom").field(name).finish(),
        }
    }
}

pub fn format_value(
    backend: &dyn FormatBackend,
    formatter: FormatterId,
    value: &Value,
    locale: &str,
    style: Option<&FormatterArg>,
) -> String {
    match formatter {
        FormatterId::Number => backend.format_number(value, locale, style),
        FormatterId::Date => backend.format_date(value, locale, style),
        FormatterId::Time => backend.format_time(value, locale, style),
    }
}
