use std::collections::BTreeSet;

use mf1_i18n_core::{FormatterArg, PluralKey, PluralKind};

use crate::lexer::{LexError, Lexer, Span, Token, TokenKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Literal { value: String, span: Span },
    Argument { name: String, span: Span },
    Function(FunctionCall),
    Plural(PluralStatement),
    Select(SelectStatement),
    /// `#` inside a plural subtree.
    NumberSign { span: Span },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub arg: String,
    pub name: String,
    pub style: Option<FormatterArg>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PluralStatement {
    pub arg: String,
    pub kind: PluralKind,
    pub offset: f64,
    pub cases: Vec<PluralCase>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PluralCase {
    pub key: PluralKey,
    pub body: Message,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub arg: String,
    pub cases: Vec<SelectCase>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectCase {
    pub key: String,
    pub body: Message,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.message, self.span.line, self.span.column
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(error: LexError) -> Self {
        Self {
            message: error.message,
            span: error.span,
        }
    }
}

/// Parses one pattern. Locale knowledge is left to the compiler.
pub fn parse_message(input: &str) -> Result<Message, ParseError> {
    let tokens = Lexer::new(input).lex_all()?;
    let mut parser = Parser::new(tokens, input.len());
    parser.parse_message(false)
}

struct Parser {
    tokens: Vec<Token>,
    index: usize,
    plural_depth: usize,
    eof: Span,
}

impl Parser {
    fn new(tokens: Vec<Token>, len: usize) -> Self {
        let eof = tokens.last().map_or(
            Span {
                start: len,
                end: len,
                line: 1,
                column: 1,
            },
            |token| Span {
                start: token.span.end,
                end: token.span.end,
                line: token.span.line,
                column: token.span.column,
            },
        );
        Self {
            tokens,
            index: 0,
            plural_depth: 0,
            eof,
        }
    }

    fn parse_message(&mut self, stop_on_rbrace: bool) -> Result<Message, ParseError> {
        let mut elements = Vec::new();
        while let Some(token) = self.peek().cloned() {
            match token.kind {
                TokenKind::Text(value) => {
                    self.next();
                    push_literal(&mut elements, value, token.span);
                }
                TokenKind::Hash if self.plural_depth > 0 => {
                    self.next();
                    elements.push(Element::NumberSign { span: token.span });
                }
                TokenKind::Hash => {
                    self.next();
                    push_literal(&mut elements, "#".to_string(), token.span);
                }
                TokenKind::LBrace => {
                    self.next();
                    elements.push(self.parse_argument(token.span)?);
                }
                TokenKind::RBrace if stop_on_rbrace => break,
                _ => {
                    return Err(self.error("unexpected token in message", token.span));
                }
            }
        }
        Ok(Message { elements })
    }

    fn parse_argument(&mut self, start: Span) -> Result<Element, ParseError> {
        let arg = self.expect_word("expected argument name")?;
        if let Some(end) = self.eat(&TokenKind::RBrace) {
            return Ok(Element::Argument {
                name: arg,
                span: span_merge(start, end.span),
            });
        }
        self.expect(TokenKind::Comma)?;
        let name = self.expect_word("expected argument type")?;
        match name.as_str() {
            "plural" => self.parse_plural(arg, PluralKind::Cardinal, start),
            "selectordinal" => self.parse_plural(arg, PluralKind::Ordinal, start),
            "select" => self.parse_select(arg, start),
            _ => self.parse_function(arg, name, start),
        }
    }

    fn parse_function(&mut self, arg: String, name: String, start: Span) -> Result<Element, ParseError> {
        let style = if self.eat(&TokenKind::Comma).is_some() {
            Some(self.parse_style()?)
        } else {
            None
        };
        let end = self.expect(TokenKind::RBrace)?;
        Ok(Element::Function(FunctionCall {
            arg,
            name,
            style,
            span: span_merge(start, end.span),
        }))
    }

    /// Words up to the closing brace; commas split the style into a list.
    fn parse_style(&mut self) -> Result<FormatterArg, ParseError> {
        let mut parts = vec![String::new()];
        while let Some(token) = self.peek().cloned() {
            match token.kind {
                TokenKind::RBrace => break,
                TokenKind::Comma => parts.push(String::new()),
                TokenKind::Word(word) => {
                    if let Some(part) = parts.last_mut() {
                        if !part.is_empty() {
                            part.push(' ');
                        }
                        part.push_str(&word);
                    }
                }
                _ => return Err(self.error("unexpected token in style", token.span)),
            }
            self.next();
        }
        if parts.len() == 1 {
            Ok(FormatterArg::Single(parts.remove(0)))
        } else {
            Ok(FormatterArg::List(parts))
        }
    }

    fn parse_plural(&mut self, arg: String, kind: PluralKind, start: Span) -> Result<Element, ParseError> {
        self.expect(TokenKind::Comma)?;
        let offset = self.parse_offset()?;
        self.plural_depth += 1;
        let cases = self.parse_cases();
        self.plural_depth -= 1;
        let mut keys = BTreeSet::new();
        let mut plural_cases = Vec::new();
        for (key, body, span) in cases? {
            let parsed = PluralKey::parse(&key)
                .ok_or_else(|| self.error("invalid plural key", span.clone()))?;
            if !keys.insert(parsed.to_string()) {
                return Err(self.error("duplicate case key", span));
            }
            plural_cases.push(PluralCase {
                key: parsed,
                body,
                span,
            });
        }
        let end = self.expect(TokenKind::RBrace)?;
        let span = span_merge(start, end.span);
        if !plural_cases.iter().any(|case| case.key.is_other()) {
            return Err(self.error("missing other case", span));
        }
        Ok(Element::Plural(PluralStatement {
            arg,
            kind,
            offset,
            cases: plural_cases,
            span,
        }))
    }

    fn parse_offset(&mut self) -> Result<f64, ParseError> {
        let Some(token) = self.peek().cloned() else {
            return Ok(0.0);
        };
        let TokenKind::Word(word) = &token.kind else {
            return Ok(0.0);
        };
        let Some(rest) = word.strip_prefix("offset:") else {
            return Ok(0.0);
        };
        self.next();
        let value = if rest.is_empty() {
            self.expect_word("expected offset value")?
        } else {
            rest.to_string()
        };
        value
            .parse::<u32>()
            .map(f64::from)
            .map_err(|_| self.error("invalid offset", token.span))
    }

    fn parse_select(&mut self, arg: String, start: Span) -> Result<Element, ParseError> {
        self.expect(TokenKind::Comma)?;
        let mut keys = BTreeSet::new();
        let mut cases = Vec::new();
        for (key, body, span) in self.parse_cases()? {
            if !keys.insert(key.clone()) {
                return Err(self.error("duplicate case key", span));
            }
            cases.push(SelectCase { key, body, span });
        }
        let end = self.expect(TokenKind::RBrace)?;
        let span = span_merge(start, end.span);
        if !cases.iter().any(|case| case.key == "other") {
            return Err(self.error("missing other case", span));
        }
        Ok(Element::Select(SelectStatement { arg, cases, span }))
    }

    fn parse_cases(&mut self) -> Result<Vec<(String, Message, Span)>, ParseError> {
        let mut cases = Vec::new();
        while let Some(token) = self.peek().cloned() {
            if matches!(token.kind, TokenKind::RBrace) {
                break;
            }
            let key = self.expect_word("expected case key")?;
            self.expect(TokenKind::LBrace)?;
            let body = self.parse_message(true)?;
            let end = self.expect(TokenKind::RBrace)?;
            cases.push((key, body, span_merge(token.span, end.span)));
        }
        Ok(cases)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        let token = self
            .next()
            .ok_or_else(|| self.error("unexpected end of pattern", self.eof.clone()))?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(self.error("unexpected token", token.span))
        }
    }

    fn expect_word(&mut self, message: &str) -> Result<String, ParseError> {
        let token = self
            .next()
            .ok_or_else(|| self.error("unexpected end of pattern", self.eof.clone()))?;
        match token.kind {
            TokenKind::Word(value) => Ok(value),
            _ => Err(self.error(message, token.span)),
        }
    }

    fn eat(&mut self, kind: &TokenKind) -> Option<Token> {
        if self.peek().is_some_and(|token| &token.kind == kind) {
            self.next()
        } else {
            None
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    fn error(&self, message: &str, span: Span) -> ParseError {
        ParseError {
            message: message.to_string(),
            span,
        }
    }
}

fn push_literal(elements: &mut Vec<Element>, value: String, span: Span) {
    if let Some(Element::Literal {
        value: previous,
        span: previous_span,
    }) = elements.last_mut()
    {
        previous.push_str(&value);
        previous_span.end = span.end;
        return;
    }
    elements.push(Element::Literal { value, span });
}

fn span_merge(start: Span, end: Span) -> Span {
    Span {
        start: start.start,
        end: end.end,
        line: start.line,
        column: start.column,
    }
}
