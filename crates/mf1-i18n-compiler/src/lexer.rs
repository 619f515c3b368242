use crate::escape::is_escapable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Literal run with escapes already resolved.
    Text(String),
    Hash,
    LBrace,
    RBrace,
    Comma,
    Word(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub span: Span,
}

pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    offset: usize,
    line: u32,
    column: u32,
    mode_stack: Vec<Mode>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Text,
    Expr,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            offset: 0,
            line: 1,
            column: 1,
            mode_stack: vec![Mode::Text],
        }
    }

    pub fn lex_all(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while self.offset < self.bytes.len() {
            if self.is_expr_mode() {
                self.lex_expr_token(&mut tokens)?;
            } else {
                self.lex_text_token(&mut tokens)?;
            }
        }
        if self.mode_stack.len() > 1 {
            let span = self.single_span(self.offset, self.line, self.column);
            return Err(self.error("unclosed brace", span));
        }
        Ok(tokens)
    }

    fn lex_text_token(&mut self, tokens: &mut Vec<Token>) -> Result<(), LexError> {
        let start = self.offset;
        let line = self.line;
        let column = self.column;
        let mut text = String::new();
        let mut run_start = self.offset;
        while self.offset < self.bytes.len() {
            let byte = self.bytes[self.offset];
            if matches!(byte, b'{' | b'}' | b'#') {
                break;
            }
            if byte == b'\\' && self.peek_byte().is_some_and(is_escapable) {
                text.push_str(&self.input[run_start..self.offset]);
                self.advance_byte();
                run_start = self.offset;
                self.advance_byte();
                continue;
            }
            self.advance_byte();
        }
        text.push_str(&self.input[run_start..self.offset]);
        if self.offset > start {
            tokens.push(Token {
                kind: TokenKind::Text(text),
                span: Span {
                    start,
                    end: self.offset,
                    line,
                    column,
                },
            });
        }
        if self.offset >= self.bytes.len() {
            return Ok(());
        }
        let byte = self.bytes[self.offset];
        let span = self.single_span(self.offset, self.line, self.column);
        match byte {
            b'{' => {
                tokens.push(Token {
                    kind: TokenKind::LBrace,
                    span,
                });
                self.advance_byte();
                self.mode_stack.push(Mode::Expr);
            }
            b'}' => {
                if self.mode_stack.len() <= 1 {
                    return Err(self.error("unbalanced brace", span));
                }
                tokens.push(Token {
                    kind: TokenKind::RBrace,
                    span,
                });
                self.advance_byte();
                self.mode_stack.pop();
            }
            b'#' => {
                tokens.push(Token {
                    kind: TokenKind::Hash,
                    span,
                });
                self.advance_byte();
            }
            _ => {}
        }
        Ok(())
    }

    fn lex_expr_token(&mut self, tokens: &mut Vec<Token>) -> Result<(), LexError> {
        self.skip_whitespace();
        if self.offset >= self.bytes.len() {
            return Ok(());
        }
        let byte = self.bytes[self.offset];
        let span = self.single_span(self.offset, self.line, self.column);
        match byte {
            b'}' => {
                tokens.push(Token {
                    kind: TokenKind::RBrace,
                    span,
                });
                self.advance_byte();
                self.mode_stack.pop();
            }
            b'{' => {
                tokens.push(Token {
                    kind: TokenKind::LBrace,
                    span,
                });
                self.advance_byte();
                self.mode_stack.push(Mode::Text);
            }
            b',' => {
                tokens.push(Token {
                    kind: TokenKind::Comma,
                    span,
                });
                self.advance_byte();
            }
            _ => {
                let token = self.lex_word();
                tokens.push(token);
            }
        }
        Ok(())
    }

    fn lex_word(&mut self) -> Token {
        let start = self.offset;
        let line = self.line;
        let column = self.column;
        while self.offset < self.bytes.len() {
            let byte = self.bytes[self.offset];
            if is_word_boundary(byte) {
                break;
            }
            self.advance_byte();
        }
        Token {
            kind: TokenKind::Word(self.input[start..self.offset].to_string()),
            span: Span {
                start,
                end: self.offset,
                line,
                column,
            },
        }
    }

    fn skip_whitespace(&mut self) {
        while self.offset < self.bytes.len() && self.bytes[self.offset].is_ascii_whitespace() {
            self.advance_byte();
        }
    }

    fn advance_byte(&mut self) {
        let byte = self.bytes[self.offset];
        self.offset += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else if !is_continuation(byte) {
            self.column += 1;
        }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.offset + 1).copied()
    }

    fn is_expr_mode(&self) -> bool {
        matches!(self.mode_stack.last(), Some(Mode::Expr))
    }

    fn single_span(&self, start: usize, line: u32, column: u32) -> Span {
        Span {
            start,
            end: start + 1,
            line,
            column,
        }
    }

    fn error(&self, message: &str, span: Span) -> LexError {
        LexError {
            message: message.to_string(),
            span,
        }
    }
}

fn is_word_boundary(byte: u8) -> bool {
    byte.is_ascii_whitespace() || matches!(byte, b',' | b'{' | b'}')
}

// Columns count characters, not bytes.
fn is_continuation(byte: u8) -> bool {
    byte & 0b1100_0000 == 0b1000_0000
}

#[cfg(test)]
mod tests {
    use super::{Lexer, TokenKind};

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .lex_all()
            .expect("lex")
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn lexes_text_and_argument_tokens() {
        assert_eq!(
            kinds("Hello {name}"),
            vec![
                TokenKind::Text("Hello ".to_string()),
                TokenKind::LBrace,
                TokenKind::Word("name".to_string()),
                TokenKind::RBrace,
            ]
        );
    }

    #[test]
    fn lexes_plural_cases() {
        let tokens = kinds("{n, plural, offset:1 =0{none} other{# left}}");
        assert!(tokens.contains(&TokenKind::Word("offset:1".to_string())));
        assert!(tokens.contains(&TokenKind::Word("=0".to_string())));
        assert!(tokens.contains(&TokenKind::Hash));
        assert_eq!(tokens.iter().filter(|kind| **kind == TokenKind::Comma).count(), 2);
    }

    #[test]
    fn resolves_escapes_in_text() {
        assert_eq!(
            kinds(r"a \{b\} \# \\ \q"),
            vec![TokenKind::Text(r"a {b} # \ \q".to_string())]
        );
    }

    #[test]
    fn reports_brace_errors_with_position() {
        let error = Lexer::new("ab}").lex_all().expect_err("unbalanced");
        assert_eq!(error.message, "unbalanced brace");
        assert_eq!(error.span.column, 3);
        let error = Lexer::new("x\n{name").lex_all().expect_err("unclosed");
        assert_eq!(error.message, "unclosed brace");
        assert_eq!(error.span.line, 2);
    }

    #[test]
    fn counts_columns_in_characters() {
        let error = Lexer::new("héllo }").lex_all().expect_err("unbalanced");
        assert_eq!(error.span.column, 7);
        assert_eq!(error.span.start, 7);
    }
}
