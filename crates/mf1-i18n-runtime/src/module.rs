use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const RUNTIME_NAME: &str = "mf1-runtime";
pub const RUNTIME_VERSION: u32 = 1;
pub const RUNTIME_PRIMITIVES: [&str; 4] = ["number", "plural", "select", "fmt"];

/// Identifies the evaluation primitives a module was compiled against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prelude {
    pub name: String,
    pub version: u32,
    pub primitives: Vec<String>,
}

impl Prelude {
    pub fn current() -> Self {
        Self {
            name: RUNTIME_NAME.to_string(),
            version: RUNTIME_VERSION,
            primitives: RUNTIME_PRIMITIVES.iter().map(|name| name.to_string()).collect(),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.name == RUNTIME_NAME
            && self.version == RUNTIME_VERSION
            && self
                .primitives
                .iter()
                .all(|name| RUNTIME_PRIMITIVES.contains(&name.as_str()))
    }
}

/// How a serialized artifact is exposed to whoever loads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportTarget {
    /// One binding per top-level key of a message set.
    Named,
    /// A single default binding.
    Default,
    /// Assignment under a dotted path such as `i18n.messages`.
    Path { path: String },
    /// Every applicable form at once; loaders take the first they support.
    Universal {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortableModule {
    pub runtime: Prelude,
    pub export: ExportTarget,
    pub locales: BTreeMap<String, LocaleImport>,
    pub formatters: Vec<FormatterRef>,
    pub digest: String,
    pub body: ExportBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocaleImport {
    pub cardinal: Vec<String>,
    pub ordinal: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatterRef {
    Builtin(String),
    Custom(String),
}

impl FormatterRef {
    pub fn name(&self) -> &str {
        match self {
            FormatterRef::Builtin(name) | FormatterRef::Custom(name) => name,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<PortableEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exports: Option<BTreeMap<String, PortableEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assign: Option<PortableEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortableEntry {
    Message(PortableMessage),
    Set(BTreeMap<String, PortableEntry>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortableMessage {
    pub locale: String,
    pub nodes: Vec<PortableNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortableKind {
    Cardinal,
    Ordinal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortableStyle {
    Single(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PortableNode {
    Text {
        value: String,
    },
    Arg {
        name: String,
    },
    Number {
        arg: String,
        offset: f64,
        #[serde(default)]
        strict: bool,
    },
    Call {
        arg: String,
        formatter: FormatterRef,
        locale: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<PortableStyle>,
    },
    Plural {
        arg: String,
        kind: PortableKind,
        offset: f64,
        locale: String,
        cases: Vec<PortableCase>,
    },
    Select {
        arg: String,
        cases: Vec<PortableCase>,
    },
    Isolate {
        node: Box<PortableNode>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortableCase {
    pub key: String,
    pub body: Vec<PortableNode>,
}
