//! The indentation-sensitive lexer.
//!
//! Four spaces is one indent level. At the start of every logical line the
//! lexer measures the run of leading spaces, compares it against a stack of
//! enclosing indent depths, and synthesizes `INDENT`/`DEDENT` tokens the way
//! Python's tokenizer does — blank and comment-only lines are skipped
//! entirely (they affect neither token stream nor indent pairing), and the
//! end of input closes every open block with a trailing run of `DEDENT`s
//! before `EOF`.

use crate::cursor::Cursor;
use crate::error::{LexError, Result};
use crate::token::{Keyword, Op, Token, TokenKind};
use neuro_util::Span;

const INDENT_WIDTH: usize = 4;

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    indent_stack: Vec<usize>,
    at_line_start: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            indent_stack: vec![0],
            at_line_start: true,
            tokens: Vec::new(),
        }
    }

    /// Runs the lexer to completion and returns the full token stream,
    /// terminated by a single [`TokenKind::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        loop {
            if self.at_line_start {
                if !self.handle_indentation()? {
                    // Blank or comment-only line; indentation already consumed.
                    continue;
                }
            }
            match self.cursor.current() {
                None => break,
                Some(ch) => {
                    if ch == '\n' {
                        self.emit_newline();
                        self.cursor.bump();
                        self.at_line_start = true;
                        continue;
                    }
                    if ch == ' ' || ch == '\t' {
                        self.cursor.bump();
                        continue;
                    }
                    if self.at_comment_start() {
                        self.skip_comment();
                        continue;
                    }
                    self.scan_token(ch)?;
                }
            }
        }
        self.finish();
        log::debug!("lexer produced {} tokens", self.tokens.len());
        Ok(self.tokens)
    }

    fn at_comment_start(&self) -> bool {
        matches!(self.cursor.current(), Some('#'))
            || (self.cursor.current() == Some('/') && self.cursor.peek(1) == Some('/'))
    }

    /// Consumes a `#...` or `//...` comment up to but not including the
    /// terminating newline (or EOF).
    fn skip_comment(&mut self) {
        while !matches!(self.cursor.current(), None | Some('\n')) {
            self.cursor.bump();
        }
    }

    /// Measures leading whitespace on a fresh logical line and emits
    /// INDENT/DEDENT tokens as needed. Returns `false` if the line was blank
    /// or comment-only and should be skipped without affecting indentation.
    fn handle_indentation(&mut self) -> Result<bool> {
        let line = self.cursor.line();
        let start = self.cursor.position();
        let mut spaces = 0usize;
        while matches!(self.cursor.current(), Some(' ') | Some('\t')) {
            self.cursor.bump();
            spaces += 1;
        }
        match self.cursor.current() {
            None => return Ok(false),
            Some('\n') => {
                self.cursor.bump();
                return Ok(false);
            }
            _ if self.at_comment_start() => {
                self.skip_comment();
                if self.cursor.current() == Some('\n') {
                    self.cursor.bump();
                }
                return Ok(false);
            }
            _ => {}
        }
        self.at_line_start = false;
        // `depth = len(spaces) // 4`, matching the reference exactly — a
        // leading-space count that isn't a multiple of 4 is not rejected,
        // it just integer-divides down to the nearest level.
        let depth = spaces / INDENT_WIDTH;
        let current = *self.indent_stack.last().unwrap();
        if depth > current {
            self.indent_stack.push(depth);
            self.tokens.push(Token::new(
                TokenKind::Indent,
                Span::point(self.cursor.position(), line, 1),
            ));
        } else if depth < current {
            while *self.indent_stack.last().unwrap() > depth {
                self.indent_stack.pop();
                self.tokens.push(Token::new(
                    TokenKind::Dedent,
                    Span::point(self.cursor.position(), line, 1),
                ));
            }
            if *self.indent_stack.last().unwrap() != depth {
                return Err(LexError::InconsistentDedent {
                    span: Span::new(start, self.cursor.position(), line, 1),
                });
            }
        }
        Ok(true)
    }

    fn emit_newline(&mut self) {
        if matches!(self.tokens.last().map(|t| &t.kind), Some(TokenKind::Newline) | None) {
            return;
        }
        let (line, column) = (self.cursor.line(), self.cursor.column());
        self.tokens.push(Token::new(
            TokenKind::Newline,
            Span::point(self.cursor.position(), line, column),
        ));
    }

    fn scan_token(&mut self, ch: char) -> Result<()> {
        if ch.is_ascii_digit() {
            self.scan_number();
            return Ok(());
        }
        if ch == '"' {
            return self.scan_string();
        }
        if ch.is_alphabetic() || ch == '_' {
            self.scan_word();
            return Ok(());
        }
        self.scan_operator(ch)
    }

    /// Numbers tokenize as decimal integers only; there are no floating
    /// point literals in source (floats can only arise from `INPUT`
    /// coercion or `DIV` at runtime).
    fn scan_number(&mut self) {
        let start = self.cursor.position();
        let (line, column) = (self.cursor.line(), self.cursor.column());
        let mut text = String::new();
        while matches!(self.cursor.current(), Some(c) if c.is_ascii_digit()) {
            text.push(self.cursor.bump().unwrap());
        }
        let span = Span::new(start, self.cursor.position(), line, column);
        self.tokens.push(Token::new(TokenKind::Number(text), span));
    }

    /// Strings have no escape sequences — a backslash is just a literal
    /// character, matching the reference's `"[^"\n]*"` string regex exactly.
    /// The stored value is copied verbatim between the quotes.
    fn scan_string(&mut self) -> Result<()> {
        let start = self.cursor.position();
        let (line, column) = (self.cursor.line(), self.cursor.column());
        self.cursor.bump(); // opening quote
        let mut text = String::new();
        loop {
            match self.cursor.current() {
                None | Some('\n') => {
                    return Err(LexError::UnterminatedString {
                        span: Span::new(start, self.cursor.position(), line, column),
                    });
                }
                Some('"') => {
                    self.cursor.bump();
                    break;
                }
                Some(c) => {
                    text.push(c);
                    self.cursor.bump();
                }
            }
        }
        let span = Span::new(start, self.cursor.position(), line, column);
        self.tokens.push(Token::new(TokenKind::Str(text), span));
        Ok(())
    }

    fn scan_word(&mut self) {
        let start = self.cursor.position();
        let (line, column) = (self.cursor.line(), self.cursor.column());
        let mut text = String::new();
        while matches!(self.cursor.current(), Some(c) if c.is_alphanumeric() || c == '_') {
            text.push(self.cursor.bump().unwrap());
        }
        let span = Span::new(start, self.cursor.position(), line, column);
        let kind = match Keyword::lookup(&text) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Ident(text),
        };
        self.tokens.push(Token::new(kind, span));
    }

    fn scan_operator(&mut self, ch: char) -> Result<()> {
        let start = self.cursor.position();
        let (line, column) = (self.cursor.line(), self.cursor.column());
        self.cursor.bump();
        let kind = match ch {
            '+' => TokenKind::Op(Op::Add),
            '-' => TokenKind::Op(Op::Sub),
            '*' => TokenKind::Op(Op::Mul),
            '/' => TokenKind::Op(Op::Div),
            '=' => {
                if self.cursor.current() == Some('=') {
                    self.cursor.bump();
                    TokenKind::Op(Op::Eq)
                } else {
                    TokenKind::Assign
                }
            }
            '!' if self.cursor.current() == Some('=') => {
                self.cursor.bump();
                TokenKind::Op(Op::Neq)
            }
            '<' => {
                if self.cursor.current() == Some('=') {
                    self.cursor.bump();
                    TokenKind::Op(Op::Le)
                } else {
                    TokenKind::Op(Op::Lt)
                }
            }
            '>' => {
                if self.cursor.current() == Some('=') {
                    self.cursor.bump();
                    TokenKind::Op(Op::Ge)
                } else {
                    TokenKind::Op(Op::Gt)
                }
            }
            other => {
                return Err(LexError::UnexpectedChar {
                    found: other,
                    span: Span::new(start, self.cursor.position(), line, column),
                })
            }
        };
        let span = Span::new(start, self.cursor.position(), line, column);
        self.tokens.push(Token::new(kind, span));
        Ok(())
    }

    /// Closes out every remaining open block and appends the final `EOF`.
    fn finish(&mut self) {
        self.emit_newline();
        let (line, column) = (self.cursor.line(), self.cursor.column());
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.tokens.push(Token::new(
                TokenKind::Dedent,
                Span::point(self.cursor.position(), line, column),
            ));
        }
        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::point(self.cursor.position(), line, column),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn simple_declaration() {
        let kinds = kinds("remember x = 5\n");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword(Keyword::Remember),
                TokenKind::Ident("x".into()),
                TokenKind::Assign,
                TokenKind::Number("5".into()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn indent_and_dedent_around_block() {
        let kinds = kinds("feel x == 1\n    speak x\nupdate x = 2\n");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword(Keyword::Feel),
                TokenKind::Ident("x".into()),
                TokenKind::Op(Op::Eq),
                TokenKind::Number("1".into()),
                TokenKind::Newline,
                TokenKind::Indent,
                TokenKind::Keyword(Keyword::Speak),
                TokenKind::Ident("x".into()),
                TokenKind::Newline,
                TokenKind::Dedent,
                TokenKind::Keyword(Keyword::Update),
                TokenKind::Ident("x".into()),
                TokenKind::Assign,
                TokenKind::Number("2".into()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn blank_lines_are_skipped() {
        let kinds = kinds("remember x = 1\n\n   \nremember y = 2\n");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword(Keyword::Remember),
                TokenKind::Ident("x".into()),
                TokenKind::Assign,
                TokenKind::Number("1".into()),
                TokenKind::Newline,
                TokenKind::Keyword(Keyword::Remember),
                TokenKind::Ident("y".into()),
                TokenKind::Assign,
                TokenKind::Number("2".into()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comment_only_lines_do_not_affect_indentation() {
        let with_comment = kinds("remember x = 1\n# a comment\nremember y = 2\n");
        let without_comment = kinds("remember x = 1\nremember y = 2\n");
        assert_eq!(with_comment, without_comment);
    }

    #[test]
    fn trailing_comment_is_stripped() {
        let kinds = kinds("remember x = 1 // inline note\n");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword(Keyword::Remember),
                TokenKind::Ident("x".into()),
                TokenKind::Assign,
                TokenKind::Number("1".into()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn string_literal_keeps_backslashes_literal() {
        // No escape sequences: a backslash is just a character, matching
        // the reference's `"[^"\n]*"` string regex.
        let kinds = kinds("speak \"hi\\n\"\n");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword(Keyword::Speak),
                TokenKind::Str("hi\\n".into()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn indentation_not_a_multiple_of_four_still_integer_divides() {
        // `depth = len(spaces) // 4`, matching the reference exactly — this
        // is not an error, it rounds down to the nearest enclosing level.
        let kinds = kinds("feel x == 1\n   speak x\n");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword(Keyword::Feel),
                TokenKind::Ident("x".into()),
                TokenKind::Op(Op::Eq),
                TokenKind::Number("1".into()),
                TokenKind::Newline,
                TokenKind::Keyword(Keyword::Speak),
                TokenKind::Ident("x".into()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn tabs_count_toward_indentation_depth() {
        let kinds = kinds("feel x == 1\n\t\t\t\tspeak x\n");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword(Keyword::Feel),
                TokenKind::Ident("x".into()),
                TokenKind::Op(Op::Eq),
                TokenKind::Number("1".into()),
                TokenKind::Newline,
                TokenKind::Indent,
                TokenKind::Keyword(Keyword::Speak),
                TokenKind::Ident("x".into()),
                TokenKind::Newline,
                TokenKind::Dedent,
                TokenKind::Eof,
            ]
        );
    }
}
