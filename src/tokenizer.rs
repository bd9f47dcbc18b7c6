// Copyright (c) remint contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Tokenizer for the Java top-level subset.
//!
//! Produces a flat stream of spanned tokens for the whole file. Comments and
//! whitespace are skipped, but every token carries its exact byte span into
//! the source, so verbatim regions (type bodies, annotation arguments) can be
//! recovered by slicing between token boundaries.
//!
//! The tokenizer covers all of Java at the lexical level it needs to walk
//! safely across opaque regions: string, char, and text-block literals are
//! recognized as single tokens so that brace matching in the parser cannot be
//! fooled by braces inside literals.

use memchr::{memchr, memmem};
use thiserror::Error;

use crate::nodes::Span;

// ============================================================================
// Tokens
// ============================================================================

/// The lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier or keyword. Keywords are not distinguished lexically; the
    /// parser compares token text.
    Ident,
    /// Numeric literal (integer or floating point, any radix).
    Number,
    /// String literal, including text blocks.
    Str,
    /// Character literal.
    Char,
    At,
    Dot,
    Semi,
    Comma,
    Star,
    LBrace,
    RBrace,
    LParen,
    RParen,
    /// Any other single symbol character (operators, brackets, generics).
    Punct,
}

/// A single token with its exact source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Token<'a> {
    /// True if this is an identifier with the given text.
    pub fn is_ident(&self, text: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == text
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Lexical errors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokError {
    #[error("unexpected character {ch:?} at byte {offset}")]
    UnexpectedChar { ch: char, offset: usize },
    #[error("unterminated block comment starting at byte {offset}")]
    UnterminatedComment { offset: usize },
    #[error("unterminated string literal starting at byte {offset}")]
    UnterminatedString { offset: usize },
}

// ============================================================================
// Token iterator
// ============================================================================

/// An iterator producing tokens (or a lexical error) from source text.
pub struct TokenIterator<'a> {
    source: &'a str,
    pos: usize,
    failed: bool,
}

impl<'a> TokenIterator<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            failed: false,
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.source.as_bytes()
    }

    /// Skip whitespace and comments. Returns an error for an unterminated
    /// block comment.
    fn skip_trivia(&mut self) -> Result<(), TokError> {
        let bytes = self.bytes();
        loop {
            while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.pos + 1 < bytes.len() && bytes[self.pos] == b'/' {
                match bytes[self.pos + 1] {
                    b'/' => {
                        match memchr(b'\n', &bytes[self.pos..]) {
                            Some(rel) => self.pos += rel + 1,
                            None => self.pos = bytes.len(),
                        }
                        continue;
                    }
                    b'*' => {
                        let start = self.pos;
                        match memmem::find(&bytes[self.pos + 2..], b"*/") {
                            Some(rel) => self.pos += 2 + rel + 2,
                            None => {
                                self.pos = bytes.len();
                                return Err(TokError::UnterminatedComment { offset: start });
                            }
                        }
                        continue;
                    }
                    _ => {}
                }
            }
            return Ok(());
        }
    }

    /// Consume a string literal starting at `self.pos` (which points at `"`).
    fn lex_string(&mut self) -> Result<(), TokError> {
        let bytes = self.bytes();
        let start = self.pos;
        if bytes[start..].starts_with(b"\"\"\"") {
            // Text block: scan for the closing triple quote, honoring escapes.
            let mut i = start + 3;
            while i < bytes.len() {
                if bytes[i] == b'\\' {
                    i += 2;
                    continue;
                }
                if bytes[i..].starts_with(b"\"\"\"") {
                    self.pos = i + 3;
                    return Ok(());
                }
                i += 1;
            }
        } else {
            let mut i = start + 1;
            while i < bytes.len() {
                match bytes[i] {
                    b'\\' => i += 2,
                    b'"' => {
                        self.pos = i + 1;
                        return Ok(());
                    }
                    _ => i += 1,
                }
            }
        }
        self.pos = bytes.len();
        Err(TokError::UnterminatedString { offset: start })
    }

    /// Consume a character literal starting at `self.pos` (points at `'`).
    fn lex_char(&mut self) -> Result<(), TokError> {
        let bytes = self.bytes();
        let start = self.pos;
        let mut i = start + 1;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 2,
                b'\'' => {
                    self.pos = i + 1;
                    return Ok(());
                }
                b'\n' => break,
                _ => i += 1,
            }
        }
        self.pos = bytes.len();
        Err(TokError::UnterminatedString { offset: start })
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token<'a> {
        let span = Span::new(start, self.pos);
        Token {
            kind,
            text: span.slice(self.source),
            span,
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphanumeric()
}

impl<'a> Iterator for TokenIterator<'a> {
    type Item = Result<Token<'a>, TokError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if let Err(e) = self.skip_trivia() {
            self.failed = true;
            return Some(Err(e));
        }
        let start = self.pos;
        let rest = &self.source[start..];
        let c = rest.chars().next()?;

        let kind = match c {
            '"' => {
                if let Err(e) = self.lex_string() {
                    self.failed = true;
                    return Some(Err(e));
                }
                TokenKind::Str
            }
            '\'' => {
                if let Err(e) = self.lex_char() {
                    self.failed = true;
                    return Some(Err(e));
                }
                TokenKind::Char
            }
            '@' => {
                self.pos += 1;
                TokenKind::At
            }
            '.' => {
                self.pos += 1;
                TokenKind::Dot
            }
            ';' => {
                self.pos += 1;
                TokenKind::Semi
            }
            ',' => {
                self.pos += 1;
                TokenKind::Comma
            }
            '*' => {
                self.pos += 1;
                TokenKind::Star
            }
            '{' => {
                self.pos += 1;
                TokenKind::LBrace
            }
            '}' => {
                self.pos += 1;
                TokenKind::RBrace
            }
            '(' => {
                self.pos += 1;
                TokenKind::LParen
            }
            ')' => {
                self.pos += 1;
                TokenKind::RParen
            }
            c if is_ident_start(c) => {
                for (i, ch) in rest.char_indices() {
                    if !is_ident_continue(ch) {
                        self.pos = start + i;
                        break;
                    }
                    self.pos = start + i + ch.len_utf8();
                }
                TokenKind::Ident
            }
            c if c.is_ascii_digit() => {
                // Numeric literals are opaque: consume the maximal run of
                // characters that can appear in any Java numeric literal.
                for (i, ch) in rest.char_indices() {
                    if !(ch.is_ascii_alphanumeric() || ch == '_' || ch == '.') {
                        self.pos = start + i;
                        break;
                    }
                    self.pos = start + i + 1;
                }
                TokenKind::Number
            }
            c if c.is_ascii_punctuation() => {
                self.pos += 1;
                TokenKind::Punct
            }
            c => {
                self.failed = true;
                return Some(Err(TokError::UnexpectedChar {
                    ch: c,
                    offset: start,
                }));
            }
        };
        Some(Ok(self.token(kind, start)))
    }
}

/// Tokenize a whole source file.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, TokError> {
    TokenIterator::new(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .expect("tokenize error")
            .iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn package_line() {
        let tokens = tokenize("package com.example.mock;").expect("tokenize error");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["package", "com", ".", "example", ".", "mock", ";"]);
        assert_eq!(tokens[0].span, Span::new(0, 7));
        assert_eq!(tokens[6].span, Span::new(24, 25));
    }

    #[test]
    fn comments_are_trivia() {
        assert_eq!(
            kinds("// line\npackage /* block */ a;"),
            vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Semi]
        );
    }

    #[test]
    fn unterminated_block_comment() {
        let err = tokenize("package a; /* oops").unwrap_err();
        assert_eq!(err, TokError::UnterminatedComment { offset: 11 });
    }

    #[test]
    fn string_literals_are_single_tokens() {
        assert_eq!(
            kinds(r#"x = "a { b \" }";"#),
            vec![
                TokenKind::Ident,
                TokenKind::Punct,
                TokenKind::Str,
                TokenKind::Semi
            ]
        );
    }

    #[test]
    fn text_block_is_single_token() {
        let source = "s = \"\"\"\nhello {\n}\"\"\";";
        assert_eq!(
            kinds(source),
            vec![
                TokenKind::Ident,
                TokenKind::Punct,
                TokenKind::Str,
                TokenKind::Semi
            ]
        );
    }

    #[test]
    fn char_literal_with_brace() {
        assert_eq!(
            kinds("c = '{';"),
            vec![
                TokenKind::Ident,
                TokenKind::Punct,
                TokenKind::Char,
                TokenKind::Semi
            ]
        );
    }

    #[test]
    fn wildcard_import_tokens() {
        assert_eq!(
            kinds("import java.util.*;"),
            vec![
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Dot,
                TokenKind::Ident,
                TokenKind::Dot,
                TokenKind::Star,
                TokenKind::Semi
            ]
        );
    }

    #[test]
    fn annotation_tokens() {
        assert_eq!(
            kinds("@Documented"),
            vec![TokenKind::At, TokenKind::Ident]
        );
    }

    #[test]
    fn numeric_literals_are_opaque() {
        assert_eq!(kinds("3.14f"), vec![TokenKind::Number]);
        assert_eq!(kinds("0x1F_2A"), vec![TokenKind::Number]);
    }

    #[test]
    fn empty_source_yields_no_tokens() {
        assert!(tokenize("").expect("tokenize error").is_empty());
        assert!(tokenize("  \n// only a comment\n").expect("tokenize error").is_empty());
    }
}
