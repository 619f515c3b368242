use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use mf1_i18n_core::{
    Artifact, Call, CompiledMessage, FormatterArg, MessageSet, Node, NumberSign, PluralCase,
    PluralCategory, PluralKey, PluralKind, PluralNode, PluralRule, SelectCase, SelectNode,
};
use sha2::{Digest, Sha256};
use tracing::{debug, trace};

use crate::bindings::Bindings;
use crate::encode::split_path;
use crate::error::{RuntimeError, RuntimeResult};
use crate::module::{
    ExportBody, ExportTarget, LocaleImport, PortableCase, PortableEntry, PortableKind,
    PortableMessage, PortableModule, PortableNode, PortableStyle,
};

pub fn load_module_file(path: &Path, bindings: &Bindings) -> RuntimeResult<Artifact> {
    let contents = fs::read_to_string(path)?;
    load_module(&contents, bindings)
}

/// Parses a portable module, verifies it and links it against the host.
pub fn load_module(text: &str, bindings: &Bindings) -> RuntimeResult<Artifact> {
    let module: PortableModule = serde_json::from_str(text)?;
    if !module.runtime.is_supported() {
        return Err(RuntimeError::UnsupportedRuntime {
            name: module.runtime.name,
            version: module.runtime.version,
        });
    }
    let expected = parse_sha256(&module.digest)?;
    if body_digest(&module.body)? != expected {
        return Err(RuntimeError::DigestMismatch);
    }

    let mut linker = Linker {
        rules: BTreeMap::new(),
        bindings,
    };
    for (locale, import) in &module.locales {
        linker.link_locale(locale, import)?;
    }
    for reference in &module.formatters {
        bindings.formatter(reference)?;
    }
    debug!(
        locales = module.locales.len(),
        formatters = module.formatters.len(),
        "linked module"
    );

    let entry = select_entry(&module.export, &module.body)?;
    linker.entry(entry)
}

pub fn body_digest(body: &ExportBody) -> RuntimeResult<[u8; 32]> {
    let bytes = serde_json::to_vec(body)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hasher.finalize().into())
}

pub fn format_sha256(bytes: &[u8; 32]) -> String {
    format!("sha256:{}", hex::encode(bytes))
}

pub fn parse_sha256(value: &str) -> RuntimeResult<[u8; 32]> {
    let trimmed = value.trim();
    let hex = trimmed.strip_prefix("sha256:").unwrap_or(trimmed);
    let bytes = hex::decode(hex).map_err(|_| RuntimeError::InvalidHash)?;
    if bytes.len() != 32 {
        return Err(RuntimeError::InvalidHash);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    Ok(out)
}

fn select_entry<'a>(target: &ExportTarget, body: &'a ExportBody) -> RuntimeResult<EntryRef<'a>> {
    let missing = || RuntimeError::InvalidModule("module body has no usable export".to_string());
    match target {
        ExportTarget::Named => body.exports.as_ref().map(EntryRef::Exports).ok_or_else(missing),
        ExportTarget::Default => body.default.as_ref().map(EntryRef::Entry).ok_or_else(missing),
        ExportTarget::Path { path } => {
            let assign = body.assign.as_ref().ok_or_else(missing)?;
            unwrap_path(path, assign).map(EntryRef::Entry)
        }
        ExportTarget::Universal { path } => {
            if let Some(entry) = &body.default {
                return Ok(EntryRef::Entry(entry));
            }
            if let Some(exports) = &body.exports {
                return Ok(EntryRef::Exports(exports));
            }
            match (path, &body.assign) {
                (Some(path), Some(assign)) => unwrap_path(path, assign).map(EntryRef::Entry),
                _ => Err(missing()),
            }
        }
    }
}

fn unwrap_path<'a>(path: &str, assign: &'a PortableEntry) -> RuntimeResult<&'a PortableEntry> {
    let mut current = assign;
    for segment in split_path(path)? {
        current = match current {
            PortableEntry::Set(entries) => entries.get(segment),
            PortableEntry::Message(_) => None,
        }
        .ok_or_else(|| RuntimeError::InvalidModule(format!("nothing assigned at {path:?}")))?;
    }
    Ok(current)
}

enum EntryRef<'a> {
    Entry(&'a PortableEntry),
    Exports(&'a BTreeMap<String, PortableEntry>),
}

struct Linker<'a> {
    rules: BTreeMap<String, PluralRule>,
    bindings: &'a Bindings,
}

impl Linker<'_> {
    fn link_locale(&mut self, locale: &str, import: &LocaleImport) -> RuntimeResult<()> {
        let rule = self.bindings.plural_rule(locale)?;
        for (kind, labels) in [
            (PluralKind::Cardinal, &import.cardinal),
            (PluralKind::Ordinal, &import.ordinal),
        ] {
            let declared = rule.categories(kind);
            if declared.is_empty() {
                continue;
            }
            for label in labels {
                let known = PluralCategory::from_label(label)
                    .is_some_and(|category| declared.contains(&category));
                if !known {
                    return Err(RuntimeError::InvalidModule(format!(
                        "host plural rules for {locale} lack {} category {label}",
                        kind.as_str()
                    )));
                }
            }
        }
        trace!(locale, "linked plural rules");
        self.rules.insert(locale.to_string(), rule);
        Ok(())
    }

    fn entry(&self, entry: EntryRef<'_>) -> RuntimeResult<Artifact> {
        match entry {
            EntryRef::Entry(entry) => self.artifact(entry),
            EntryRef::Exports(entries) => self.set(entries).map(Artifact::Set),
        }
    }

    fn artifact(&self, entry: &PortableEntry) -> RuntimeResult<Artifact> {
        match entry {
            PortableEntry::Message(message) => self.message(message).map(Artifact::Message),
            PortableEntry::Set(entries) => self.set(entries).map(Artifact::Set),
        }
    }

    fn set(&self, entries: &BTreeMap<String, PortableEntry>) -> RuntimeResult<MessageSet> {
        let mut set = MessageSet::new();
        for (key, entry) in entries {
            set.insert(key.clone(), self.artifact(entry)?);
        }
        Ok(set)
    }

    fn message(&self, message: &PortableMessage) -> RuntimeResult<CompiledMessage> {
        Ok(CompiledMessage::new(
            message.locale.clone(),
            self.nodes(&message.nodes)?,
        ))
    }

    fn nodes(&self, nodes: &[PortableNode]) -> RuntimeResult<Vec<Node>> {
        nodes.iter().map(|node| self.node(node)).collect()
    }

    fn node(&self, node: &PortableNode) -> RuntimeResult<Node> {
        let node = match node {
            PortableNode::Text { value } => Node::Text(value.clone()),
            PortableNode::Arg { name } => Node::Argument(name.clone()),
            PortableNode::Number {
                arg,
                offset,
                strict,
            } => Node::NumberSign(NumberSign {
                arg: arg.clone(),
                offset: *offset,
                strict: *strict,
            }),
            PortableNode::Call {
                arg,
                formatter,
                locale,
                style,
            } => Node::Call(Call {
                arg: arg.clone(),
                formatter: self.bindings.formatter(formatter)?,
                locale: locale.clone(),
                style: style.as_ref().map(decode_style),
            }),
            PortableNode::Plural {
                arg,
                kind,
                offset,
                locale,
                cases,
            } => {
                let rule = self.rules.get(locale).cloned().ok_or_else(|| {
                    RuntimeError::InvalidModule(format!("plural uses unimported locale {locale}"))
                })?;
                Node::Plural(PluralNode {
                    arg: arg.clone(),
                    kind: match kind {
                        PortableKind::Cardinal => PluralKind::Cardinal,
                        PortableKind::Ordinal => PluralKind::Ordinal,
                    },
                    offset: *offset,
                    rule,
                    cases: self.plural_cases(arg, cases)?,
                })
            }
            PortableNode::Select { arg, cases } => {
                require_other(arg, cases)?;
                Node::Select(SelectNode {
                    arg: arg.clone(),
                    cases: cases
                        .iter()
                        .map(|case| {
                            Ok(SelectCase {
                                key: case.key.clone(),
                                body: self.nodes(&case.body)?,
                            })
                        })
                        .collect::<RuntimeResult<_>>()?,
                })
            }
            PortableNode::Isolate { node } => Node::Isolate(Box::new(self.node(node)?)),
        };
        Ok(node)
    }

    fn plural_cases(&self, arg: &str, cases: &[PortableCase]) -> RuntimeResult<Vec<PluralCase>> {
        require_other(arg, cases)?;
        cases
            .iter()
            .map(|case| {
                let key = PluralKey::parse(&case.key).ok_or_else(|| {
                    RuntimeError::InvalidModule(format!("invalid plural key {:?}", case.key))
                })?;
                Ok(PluralCase {
                    key,
                    body: self.nodes(&case.body)?,
                })
            })
            .collect()
    }
}

fn require_other(arg: &str, cases: &[PortableCase]) -> RuntimeResult<()> {
    if cases.iter().any(|case| case.key == "other") {
        Ok(())
    } else {
        Err(RuntimeError::InvalidModule(format!(
            "cases for {arg} lack an other branch"
        )))
    }
}

fn decode_style(style: &PortableStyle) -> FormatterArg {
    match style {
        PortableStyle::Single(value) => FormatterArg::Single(value.clone()),
        PortableStyle::List(values) => FormatterArg::List(values.clone()),
    }
}
