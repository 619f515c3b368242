use alloc::string::String;

use crate::args::format_number;
use crate::{
    Args, CoreError, CoreResult, Formatter, FormatterArg, Node, NumberSign, PluralCase,
    PluralKey, PluralKind, PluralRule, SelectCase, Value,
};

/// First strong isolate.
pub const FSI: char = '\u{2068}';
/// Pop directional isolate.
pub const PDI: char = '\u{2069}';

static NULL: Value = Value::Null;

/// The `#` value: the plural argument minus its offset.
pub fn number(value: f64, offset: f64) -> f64 {
    value - offset
}

/// Picks a plural branch: exact `=N` on `value - offset`, then the category
/// the rule assigns to `value - offset`, then `other`.
pub fn plural<'a>(
    value: &Value,
    offset: f64,
    rule: &PluralRule,
    kind: PluralKind,
    cases: &'a [PluralCase],
) -> &'a [Node] {
    let Some(raw) = value.as_number() else {
        return plural_other(cases);
    };
    let shifted = number(raw, offset);
    if let Some(case) = match_exact(cases, shifted) {
        return &case.body;
    }
    let category = rule.category(shifted, kind);
    cases
        .iter()
        .find(|case| matches!(&case.key, PluralKey::Label(label) if label == category.as_str()))
        .map(|case| case.body.as_slice())
        .unwrap_or_else(|| plural_other(cases))
}

/// Picks a select branch by exact string match, falling back to `other`.
pub fn select<'a>(value: &Value, cases: &'a [SelectCase]) -> &'a [Node] {
    let key = match value {
        Value::Null => None,
        other => Some(other.render()),
    };
    let matched = key.and_then(|key| cases.iter().find(|case| case.key == key));
    matched
        .or_else(|| cases.iter().find(|case| case.key == "other"))
        .map(|case| case.body.as_slice())
        .unwrap_or(&[])
}

pub fn fmt(
    formatter: &Formatter,
    value: &Value,
    locale: &str,
    style: Option<&FormatterArg>,
) -> String {
    formatter.call(value, locale, style)
}

/// Evaluates a compiled node list against one record.
pub fn execute(nodes: &[Node], args: &Args) -> CoreResult<String> {
    let mut output = String::new();
    render_nodes(nodes, args, &mut output)?;
    Ok(output)
}

fn render_nodes(nodes: &[Node], args: &Args, output: &mut String) -> CoreResult<()> {
    for node in nodes {
        render_node(node, args, output)?;
    }
    Ok(())
}

fn render_node(node: &Node, args: &Args, output: &mut String) -> CoreResult<()> {
    match node {
        Node::Text(text) => output.push_str(text),
        Node::Argument(name) => {
            if let Some(value) = args.get(name) {
                output.push_str(&value.render());
            }
        }
        Node::NumberSign(sign) => output.push_str(&render_number_sign(sign, args)?),
        Node::Call(call) => {
            let value = args.get(&call.arg).unwrap_or(&NULL);
            output.push_str(&fmt(&call.formatter, value, &call.locale, call.style.as_ref()));
        }
        Node::Plural(node) => {
            let value = args.get(&node.arg).unwrap_or(&NULL);
            let body = plural(value, node.offset, &node.rule, node.kind, &node.cases);
            render_nodes(body, args, output)?;
        }
        Node::Select(node) => {
            let value = args.get(&node.arg).unwrap_or(&NULL);
            render_nodes(select(value, &node.cases), args, output)?;
        }
        Node::Isolate(inner) => {
            output.push(FSI);
            render_node(inner, args, output)?;
            output.push(PDI);
        }
    }
    Ok(())
}

fn render_number_sign(sign: &NumberSign, args: &Args) -> CoreResult<String> {
    let value = args.get(&sign.arg);
    match value.and_then(Value::as_number) {
        Some(raw) => Ok(format_number(number(raw, sign.offset))),
        None if sign.strict => Err(CoreError::NonNumericNumberSign {
            arg: sign.arg.clone(),
            value: value.map(Value::render).unwrap_or_default(),
        }),
        None => Ok(value.map(Value::render).unwrap_or_default()),
    }
}

/// Largest magnitude cast to `i64` without saturating.
const EXACT_KEY_LIMIT: f64 = 9.2e18;

fn match_exact(cases: &[PluralCase], value: f64) -> Option<&PluralCase> {
    if value.is_nan() || value.abs() >= EXACT_KEY_LIMIT {
        return None;
    }
    let candidate = value as i64;
    if (candidate as f64) != value {
        return None;
    }
    cases
        .iter()
        .find(|case| matches!(case.key, PluralKey::Exact(exact) if exact == candidate))
}

fn plural_other(cases: &[PluralCase]) -> &[Node] {
    cases
        .iter()
        .find(|case| case.key.is_other())
        .map(|case| case.body.as_slice())
        .unwrap_or(&[])
}
