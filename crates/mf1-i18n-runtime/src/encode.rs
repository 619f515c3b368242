use std::collections::{BTreeMap, BTreeSet};

use mf1_i18n_core::{
    Artifact, CompiledMessage, Formatter, FormatterArg, MessageSet, Node, PluralKind, PluralRule,
};
use tracing::debug;

use crate::error::{RuntimeError, RuntimeResult};
use crate::loader::{body_digest, format_sha256};
use crate::module::{
    ExportBody, ExportTarget, FormatterRef, LocaleImport, PortableCase, PortableEntry,
    PortableKind, PortableMessage, PortableModule, PortableNode, PortableStyle, Prelude,
};

#[derive(Default)]
struct Imports {
    locales: BTreeMap<String, LocaleImport>,
    formatters: BTreeSet<FormatterRef>,
}

impl Imports {
    fn locale(&mut self, rule: &PluralRule) {
        self.locales
            .entry(rule.locale().to_string())
            .or_insert_with(|| LocaleImport {
                cardinal: labels(rule, PluralKind::Cardinal),
                ordinal: labels(rule, PluralKind::Ordinal),
            });
    }

    fn formatter(&mut self, formatter: &Formatter) -> FormatterRef {
        let reference = formatter_ref(formatter);
        self.formatters.insert(reference.clone());
        reference
    }
}

/// Serializes a live artifact and everything it imports into a portable module.
pub fn encode_module(artifact: &Artifact, target: &ExportTarget) -> RuntimeResult<String> {
    let module = build_module(artifact, target)?;
    debug!(
        locales = module.locales.len(),
        formatters = module.formatters.len(),
        export = ?module.export,
        "encoded module"
    );
    Ok(serde_json::to_string_pretty(&module)?)
}

pub fn build_module(artifact: &Artifact, target: &ExportTarget) -> RuntimeResult<PortableModule> {
    let mut imports = Imports::default();
    let entry = encode_artifact(artifact, &mut imports);
    let body = match target {
        ExportTarget::Named => ExportBody {
            exports: Some(named_exports(entry)?),
            ..ExportBody::default()
        },
        ExportTarget::Default => ExportBody {
            default: Some(entry),
            ..ExportBody::default()
        },
        ExportTarget::Path { path } => ExportBody {
            assign: Some(nest_under_path(path, entry)?),
            ..ExportBody::default()
        },
        ExportTarget::Universal { path } => {
            let exports = match &entry {
                PortableEntry::Set(entries) => Some(entries.clone()),
                PortableEntry::Message(_) => None,
            };
            let assign = match path {
                Some(path) => Some(nest_under_path(path, entry.clone())?),
                None => None,
            };
            ExportBody {
                default: Some(entry),
                exports,
                assign,
            }
        }
    };
    let digest = format_sha256(&body_digest(&body)?);
    Ok(PortableModule {
        runtime: Prelude::current(),
        export: target.clone(),
        locales: imports.locales,
        formatters: imports.formatters.into_iter().collect(),
        digest,
        body,
    })
}

fn named_exports(entry: PortableEntry) -> RuntimeResult<BTreeMap<String, PortableEntry>> {
    match entry {
        PortableEntry::Set(entries) => Ok(entries),
        PortableEntry::Message(_) => Err(RuntimeError::InvalidExport(
            "named exports require a message set".to_string(),
        )),
    }
}

fn nest_under_path(path: &str, entry: PortableEntry) -> RuntimeResult<PortableEntry> {
    let segments = split_path(path)?;
    let mut nested = entry;
    for segment in segments.iter().rev() {
        let mut map = BTreeMap::new();
        map.insert(segment.to_string(), nested);
        nested = PortableEntry::Set(map);
    }
    Ok(nested)
}

pub(crate) fn split_path(path: &str) -> RuntimeResult<Vec<&str>> {
    let segments: Vec<&str> = path.split('.').map(str::trim).collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(RuntimeError::InvalidExport(format!("invalid export path {path:?}")));
    }
    Ok(segments)
}

fn encode_artifact(artifact: &Artifact, imports: &mut Imports) -> PortableEntry {
    match artifact {
        Artifact::Message(message) => PortableEntry::Message(encode_message(message, imports)),
        Artifact::Set(set) => PortableEntry::Set(encode_set(set, imports)),
    }
}

fn encode_set(set: &MessageSet, imports: &mut Imports) -> BTreeMap<String, PortableEntry> {
    set.entries()
        .map(|(key, artifact)| (key.to_string(), encode_artifact(artifact, imports)))
        .collect()
}

fn encode_message(message: &CompiledMessage, imports: &mut Imports) -> PortableMessage {
    PortableMessage {
        locale: message.locale().to_string(),
        nodes: encode_nodes(message.nodes(), imports),
    }
}

fn encode_nodes(nodes: &[Node], imports: &mut Imports) -> Vec<PortableNode> {
    nodes.iter().map(|node| encode_node(node, imports)).collect()
}

fn encode_node(node: &Node, imports: &mut Imports) -> PortableNode {
    match node {
        Node::Text(value) => PortableNode::Text {
            value: value.clone(),
        },
        Node::Argument(name) => PortableNode::Arg { name: name.clone() },
        Node::NumberSign(sign) => PortableNode::Number {
            arg: sign.arg.clone(),
            offset: sign.offset,
            strict: sign.strict,
        },
        Node::Call(call) => PortableNode::Call {
            arg: call.arg.clone(),
            formatter: imports.formatter(&call.formatter),
            locale: call.locale.clone(),
            style: call.style.as_ref().map(encode_style),
        },
        Node::Plural(plural) => {
            imports.locale(&plural.rule);
            PortableNode::Plural {
                arg: plural.arg.clone(),
                kind: match plural.kind {
                    PluralKind::Cardinal => PortableKind::Cardinal,
                    PluralKind::Ordinal => PortableKind::Ordinal,
                },
                offset: plural.offset,
                locale: plural.rule.locale().to_string(),
                cases: plural
                    .cases
                    .iter()
                    .map(|case| PortableCase {
                        key: case.key.to_string(),
                        body: encode_nodes(&case.body, imports),
                    })
                    .collect(),
            }
        }
        Node::Select(select) => PortableNode::Select {
            arg: select.arg.clone(),
            cases: select
                .cases
                .iter()
                .map(|case| PortableCase {
                    key: case.key.clone(),
                    body: encode_nodes(&case.body, imports),
                })
                .collect(),
        },
        Node::Isolate(inner) => PortableNode::Isolate {
            node: Box::new(encode_node(inner, imports)),
        },
    }
}

fn encode_style(style: &FormatterArg) -> PortableStyle {
    match style {
        FormatterArg::Single(value) => PortableStyle::Single(value.clone()),
        FormatterArg::List(values) => PortableStyle::List(values.clone()),
    }
}

fn formatter_ref(formatter: &Formatter) -> FormatterRef {
    match formatter {
        Formatter::Builtin { id, .. } => FormatterRef::Builtin(id.as_str().to_string()),
        Formatter::Custom { name, .. } => FormatterRef::Custom(name.clone()),
    }
}

fn labels(rule: &PluralRule, kind: PluralKind) -> Vec<String> {
    rule.categories(kind)
        .iter()
        .map(|category| category.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use mf1_i18n_core::{
        Artifact, CompiledMessage, Formatter, MessageSet, Node, PluralCase, PluralKey, PluralKind,
        PluralNode, PluralRuleProvider,
    };

    use super::{build_module, encode_module};
    use crate::BasicPluralRules;
    use crate::error::RuntimeError;
    use crate::module::{ExportTarget, FormatterRef, PortableEntry};

    fn plural_message() -> CompiledMessage {
        let rule = BasicPluralRules.plural_rule("en").expect("rule");
        CompiledMessage::new(
            "en-US",
            vec![Node::Plural(PluralNode {
                arg: "n".to_string(),
                kind: PluralKind::Cardinal,
                offset: 0.0,
                rule,
                cases: vec![PluralCase {
                    key: PluralKey::Label("other".to_string()),
                    body: vec![Node::Text("items".to_string())],
                }],
            })],
        )
    }

    fn set() -> Artifact {
        let mut set = MessageSet::new();
        set.insert("items", plural_message().into());
        set.insert(
            "shout",
            CompiledMessage::new(
                "en",
                vec![Node::Call(mf1_i18n_core::Call {
                    arg: "x".to_string(),
                    formatter: Formatter::custom("upper", |v, _, _| v.render().to_uppercase()),
                    locale: "en".to_string(),
                    style: None,
                })],
            )
            .into(),
        );
        Artifact::Set(set)
    }

    #[test]
    fn collects_imports() {
        let module = build_module(&set(), &ExportTarget::Default).expect("module");
        assert_eq!(module.locales.len(), 1);
        assert_eq!(module.locales["en"].cardinal, vec!["one", "other"]);
        assert_eq!(module.formatters, vec![FormatterRef::Custom("upper".to_string())]);
        assert!(module.digest.starts_with("sha256:"));
    }

    #[test]
    fn named_exports_need_a_set() {
        let single = Artifact::Message(plural_message());
        assert!(matches!(
            build_module(&single, &ExportTarget::Named),
            Err(RuntimeError::InvalidExport(_))
        ));
        let module = build_module(&set(), &ExportTarget::Named).expect("module");
        let exports = module.body.exports.expect("exports");
        assert!(exports.contains_key("items"));
        assert!(module.body.default.is_none());
    }

    #[test]
    fn path_export_nests_entries() {
        let target = ExportTarget::Path {
            path: "app.i18n".to_string(),
        };
        let module = build_module(&set(), &target).expect("module");
        let Some(PortableEntry::Set(root)) = module.body.assign else {
            panic!("expected nested set");
        };
        assert!(matches!(root.get("app"), Some(PortableEntry::Set(inner)) if inner.contains_key("i18n")));
        let bad = ExportTarget::Path {
            path: "app..i18n".to_string(),
        };
        assert!(matches!(build_module(&set(), &bad), Err(RuntimeError::InvalidExport(_))));
    }

    #[test]
    fn universal_export_fills_every_form() {
        let target = ExportTarget::Universal {
            path: Some("i18n".to_string()),
        };
        let module = build_module(&set(), &target).expect("module");
        assert!(module.body.default.is_some());
        assert!(module.body.exports.is_some());
        assert!(module.body.assign.is_some());
    }

    #[test]
    fn encoding_is_deterministic() {
        let a = encode_module(&set(), &ExportTarget::Default).expect("encode");
        let b = encode_module(&set(), &ExportTarget::Default).expect("encode");
        assert_eq!(a, b);
        assert!(a.contains("\"op\": \"plural\""));
    }
}
