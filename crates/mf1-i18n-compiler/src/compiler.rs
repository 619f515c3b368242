use mf1_i18n_core::{
    Call, CompiledMessage, Node, NumberSign, PluralCase, PluralNode, PluralRule, SelectCase,
    SelectNode,
};

use crate::error::{CompileError, CompileResult};
use crate::parser::{Element, FunctionCall, Message, PluralStatement, SelectStatement};
use crate::registry::FormatterRegistry;
use crate::validator::validate_plural_keys;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    pub strict_number_sign: bool,
    pub bidi_support: bool,
}

/// Everything a compile is bound to: one locale, its rule and a frozen registry.
#[derive(Debug, Clone, Copy)]
pub struct CompileContext<'a> {
    pub locale: &'a str,
    pub rule: &'a PluralRule,
    pub registry: &'a FormatterRegistry,
    pub options: CompileOptions,
}

pub fn compile_message(message: &Message, context: &CompileContext<'_>) -> CompileResult<CompiledMessage> {
    let compiler = Compiler { context };
    let nodes = compiler.compile_elements(&message.elements, None)?;
    Ok(CompiledMessage::new(context.locale, nodes))
}

#[derive(Clone, Copy)]
struct PluralScope<'a> {
    arg: &'a str,
    offset: f64,
}

struct Compiler<'a, 'b> {
    context: &'b CompileContext<'a>,
}

impl Compiler<'_, '_> {
    fn compile_elements(
        &self,
        elements: &[Element],
        scope: Option<PluralScope<'_>>,
    ) -> CompileResult<Vec<Node>> {
        elements
            .iter()
            .map(|element| self.compile_element(element, scope))
            .collect()
    }

    fn compile_element(&self, element: &Element, scope: Option<PluralScope<'_>>) -> CompileResult<Node> {
        let node = match element {
            Element::Literal { value, .. } => return Ok(Node::Text(value.clone())),
            Element::Argument { name, .. } => Node::Argument(name.clone()),
            Element::Function(call) => self.compile_call(call)?,
            Element::Plural(plural) => self.compile_plural(plural)?,
            Element::Select(select) => self.compile_select(select, scope)?,
            Element::NumberSign { .. } => match scope {
                Some(scope) => Node::NumberSign(NumberSign {
                    arg: scope.arg.to_string(),
                    offset: scope.offset,
                    strict: self.context.options.strict_number_sign,
                }),
                None => return Ok(Node::Text("#".to_string())),
            },
        };
        Ok(self.isolate(node))
    }

    fn compile_call(&self, call: &FunctionCall) -> CompileResult<Node> {
        let formatter = self
            .context
            .registry
            .resolve(&call.name)
            .ok_or_else(|| CompileError::UnknownFormatter {
                name: call.name.clone(),
                arg: call.arg.clone(),
            })?;
        Ok(Node::Call(Call {
            arg: call.arg.clone(),
            formatter,
            locale: self.context.locale.to_string(),
            style: call.style.clone(),
        }))
    }

    fn compile_plural(&self, plural: &PluralStatement) -> CompileResult<Node> {
        validate_plural_keys(plural, self.context.rule)?;
        let scope = PluralScope {
            arg: &plural.arg,
            offset: plural.offset,
        };
        let cases = plural
            .cases
            .iter()
            .map(|case| {
                Ok(PluralCase {
                    key: case.key.clone(),
                    body: self.compile_elements(&case.body.elements, Some(scope))?,
                })
            })
            .collect::<CompileResult<Vec<_>>>()?;
        Ok(Node::Plural(PluralNode {
            arg: plural.arg.clone(),
            kind: plural.kind,
            offset: plural.offset,
            rule: self.context.rule.clone(),
            cases,
        }))
    }

    fn compile_select(
        &self,
        select: &SelectStatement,
        scope: Option<PluralScope<'_>>,
    ) -> CompileResult<Node> {
        let cases = select
            .cases
            .iter()
            .map(|case| {
                Ok(SelectCase {
                    key: case.key.clone(),
                    body: self.compile_elements(&case.body.elements, scope)?,
                })
            })
            .collect::<CompileResult<Vec<_>>>()?;
        Ok(Node::Select(SelectNode {
            arg: select.arg.clone(),
            cases,
        }))
    }

    fn isolate(&self, node: Node) -> Node {
        if self.context.options.bidi_support {
            Node::Isolate(Box::new(node))
        } else {
            node
        }
    }
}
