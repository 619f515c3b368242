use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{Args, CoreError, CoreResult, Node, execute};

/// A compiled pattern: a formatting function from a record to text.
#[derive(Clone, Debug)]
pub struct CompiledMessage {
    locale: String,
    nodes: Vec<Node>,
}

impl CompiledMessage {
    pub fn new(locale: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            locale: locale.into(),
            nodes,
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn format(&self, args: &Args) -> CoreResult<String> {
        execute(&self.nodes, args)
    }
}

/// Compiled messages keyed the same way as their source.
#[derive(Clone, Debug, Default)]
pub struct MessageSet {
    entries: BTreeMap<String, Artifact>,
}

impl MessageSet {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, artifact: Artifact) -> Option<Artifact> {
        self.entries.insert(key.into(), artifact)
    }

    pub fn get(&self, key: &str) -> Option<&Artifact> {
        self.entries.get(key)
    }

    pub fn lookup(&self, path: &[&str]) -> Option<&Artifact> {
        let (first, rest) = path.split_first()?;
        let entry = self.entries.get(*first)?;
        if rest.is_empty() {
            return Some(entry);
        }
        match entry {
            Artifact::Set(set) => set.lookup(rest),
            Artifact::Message(_) => None,
        }
    }

    pub fn format(&self, path: &[&str], args: &Args) -> CoreResult<String> {
        match self.lookup(path) {
            Some(Artifact::Message(message)) => message.format(args),
            Some(Artifact::Set(_)) => Err(CoreError::InvalidInput("path names a message set")),
            None => Err(CoreError::InvalidInput("unknown message path")),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Artifact)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Either a single compiled message or a tree of them.
#[derive(Clone, Debug)]
pub enum Artifact {
    Message(CompiledMessage),
    Set(MessageSet),
}

impl Artifact {
    pub fn as_message(&self) -> Option<&CompiledMessage> {
        match self {
            Artifact::Message(message) => Some(message),
            Artifact::Set(_) => None,
        }
    }

    pub fn as_set(&self) -> Option<&MessageSet> {
        match self {
            Artifact::Set(set) => Some(set),
            Artifact::Message(_) => None,
        }
    }

    pub fn format(&self, args: &Args) -> CoreResult<String> {
        match self {
            Artifact::Message(message) => message.format(args),
            Artifact::Set(_) => Err(CoreError::InvalidInput("artifact is a message set")),
        }
    }
}

impl From<CompiledMessage> for Artifact {
    fn from(message: CompiledMessage) -> Self {
        Artifact::Message(message)
    }
}

impl From<MessageSet> for Artifact {
    fn from(set: MessageSet) -> Self {
        Artifact::Set(set)
    }
}
