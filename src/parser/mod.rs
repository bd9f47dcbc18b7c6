// Copyright (c) remint contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Recursive-descent parser for the Java compilation-unit level.
//!
//! The grammar covered here is the statically structured top of a source
//! file: the package declaration (with annotations), imports, module
//! declarations, and type declarations down to their opening brace. Type and
//! module bodies are brace-matched at the token level and carried as opaque
//! verbatim spans; the tokenizer guarantees braces inside literals and
//! comments cannot derail the match.

pub mod errors;
pub mod raw;

pub use errors::ParserError;

use crate::nodes::{Span, TypeKeyword};
use crate::tokenizer::{tokenize, Token, TokenKind};
use raw::{RawAnnotation, RawImport, RawModule, RawName, RawPackage, RawTypeDecl, RawUnit};

pub type Result<T> = std::result::Result<T, ParserError>;

/// Parse one source file into the immutable raw tree.
pub fn parse_unit(source: &str) -> Result<RawUnit> {
    let tokens = tokenize(source)?;
    Parser {
        source,
        tokens,
        pos: 0,
    }
    .unit()
}

const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "abstract",
    "static",
    "final",
    "sealed",
    "strictfp",
];

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    // ------------------------------------------------------------------
    // Token stream helpers
    // ------------------------------------------------------------------

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token<'a>> {
        self.tokens.get(self.pos + offset)
    }

    fn advance(&mut self) -> Option<Token<'a>> {
        let tok = self.tokens.get(self.pos).copied();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn at_ident(&self, text: &str) -> bool {
        self.peek().is_some_and(|t| t.is_ident(text))
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token<'a>> {
        match self.peek() {
            Some(tok) if tok.kind == kind => {
                let tok = *tok;
                self.pos += 1;
                Ok(tok)
            }
            Some(tok) => Err(ParserError::UnexpectedToken {
                expected: expected.to_string(),
                found: tok.text.to_string(),
                span: tok.span,
            }),
            None => Err(self.eof(expected)),
        }
    }

    fn eof(&self, expected: &str) -> ParserError {
        ParserError::UnexpectedEof {
            expected: expected.to_string(),
            offset: self.source.len(),
        }
    }

    fn unexpected(&self, expected: &str) -> ParserError {
        match self.peek() {
            Some(tok) => ParserError::UnexpectedToken {
                expected: expected.to_string(),
                found: tok.text.to_string(),
                span: tok.span,
            },
            None => self.eof(expected),
        }
    }

    // ------------------------------------------------------------------
    // Grammar
    // ------------------------------------------------------------------

    fn unit(&mut self) -> Result<RawUnit> {
        let header_end = self
            .peek()
            .map(|t| t.span.start)
            .unwrap_or(self.source.len());

        // Leading annotations belong either to the package declaration or to
        // the first type declaration.
        let mut pending = self.annotations()?;

        let package = if self.at_ident("package") {
            Some(self.package_decl(std::mem::take(&mut pending))?)
        } else {
            None
        };

        let mut imports = Vec::new();
        while pending.is_empty() && self.at_ident("import") {
            imports.push(self.import_decl()?);
        }

        let mut type_decls = Vec::new();
        let mut module = None;
        loop {
            let (annotations, modifiers) = self.decl_prefix(std::mem::take(&mut pending))?;
            let prefix_empty = annotations.is_empty() && modifiers.is_empty();

            match self.peek() {
                None => {
                    if !prefix_empty {
                        return Err(self.eof("a type declaration"));
                    }
                    break;
                }
                Some(tok) if tok.kind == TokenKind::Semi && prefix_empty => {
                    // Stray top-level semicolon.
                    self.advance();
                }
                Some(tok)
                    if prefix_empty
                        && module.is_none()
                        && type_decls.is_empty()
                        && (tok.is_ident("module")
                            || (tok.is_ident("open")
                                && self.peek_at(1).is_some_and(|t| t.is_ident("module")))) =>
                {
                    module = Some(self.module_decl()?);
                }
                Some(_) => {
                    type_decls.push(self.type_decl(annotations, modifiers)?);
                }
            }
        }

        Ok(RawUnit {
            package,
            imports,
            type_decls,
            module,
            header_end,
            span: Span::new(0, self.source.len()),
        })
    }

    fn package_decl(&mut self, annotations: Vec<RawAnnotation>) -> Result<RawPackage> {
        let keyword = self.expect(TokenKind::Ident, "'package'")?;
        let start = annotations
            .first()
            .map(|a| a.span.start)
            .unwrap_or(keyword.span.start);
        let name = self.qualified_name(false)?;
        let semi = self.expect(TokenKind::Semi, "';'")?;
        Ok(RawPackage {
            annotations,
            name,
            span: Span::new(start, semi.span.end),
        })
    }

    fn import_decl(&mut self) -> Result<RawImport> {
        let keyword = self.expect(TokenKind::Ident, "'import'")?;
        let static_import = if self.at_ident("static") {
            self.advance();
            true
        } else {
            false
        };
        let name = self.qualified_name(true)?;
        let semi = self.expect(TokenKind::Semi, "';'")?;
        Ok(RawImport {
            static_import,
            name,
            span: Span::new(keyword.span.start, semi.span.end),
        })
    }

    /// Annotations and modifiers, interleaved in any order. Stops at
    /// `@interface`, which is a type-declaration keyword rather than an
    /// annotation use.
    fn decl_prefix(
        &mut self,
        mut annotations: Vec<RawAnnotation>,
    ) -> Result<(Vec<RawAnnotation>, Vec<String>)> {
        let mut modifiers = Vec::new();
        loop {
            match self.peek() {
                Some(tok)
                    if tok.kind == TokenKind::At
                        && !self.peek_at(1).is_some_and(|t| t.is_ident("interface")) =>
                {
                    annotations.push(self.annotation()?);
                }
                Some(tok) if tok.kind == TokenKind::Ident && MODIFIERS.contains(&tok.text) => {
                    modifiers.push(tok.text.to_string());
                    self.advance();
                }
                Some(tok)
                    if tok.is_ident("non")
                        && self.peek_at(1).is_some_and(|t| t.text == "-")
                        && self.peek_at(2).is_some_and(|t| t.is_ident("sealed")) =>
                {
                    self.advance();
                    self.advance();
                    self.advance();
                    modifiers.push("non-sealed".to_string());
                }
                _ => return Ok((annotations, modifiers)),
            }
        }
    }

    fn annotations(&mut self) -> Result<Vec<RawAnnotation>> {
        let mut annotations = Vec::new();
        while self
            .peek()
            .is_some_and(|t| t.kind == TokenKind::At)
            && !self.peek_at(1).is_some_and(|t| t.is_ident("interface"))
        {
            annotations.push(self.annotation()?);
        }
        Ok(annotations)
    }

    fn annotation(&mut self) -> Result<RawAnnotation> {
        let at = self.expect(TokenKind::At, "'@'")?;
        let name = self.qualified_name(false)?;
        let arguments = if self.peek().is_some_and(|t| t.kind == TokenKind::LParen) {
            Some(self.match_group(TokenKind::LParen, TokenKind::RParen, "')'")?)
        } else {
            None
        };
        let end = arguments.map(|s| s.end).unwrap_or(name.span.end);
        Ok(RawAnnotation {
            name,
            arguments,
            span: Span::new(at.span.start, end),
        })
    }

    fn type_decl(
        &mut self,
        annotations: Vec<RawAnnotation>,
        modifiers: Vec<String>,
    ) -> Result<RawTypeDecl> {
        let first = self.peek().ok_or_else(|| self.eof("a type declaration"))?;
        let start = annotations
            .first()
            .map(|a| a.span.start)
            .unwrap_or(first.span.start);

        let keyword = match self.peek() {
            Some(tok) if tok.is_ident("class") => {
                self.advance();
                TypeKeyword::Class
            }
            Some(tok) if tok.is_ident("interface") => {
                self.advance();
                TypeKeyword::Interface
            }
            Some(tok) if tok.is_ident("enum") => {
                self.advance();
                TypeKeyword::Enum
            }
            Some(tok) if tok.is_ident("record") => {
                self.advance();
                TypeKeyword::Record
            }
            Some(tok) if tok.kind == TokenKind::At => {
                self.advance();
                self.expect(TokenKind::Ident, "'interface'")?;
                TypeKeyword::AnnotationType
            }
            _ => return Err(self.unexpected("a type declaration")),
        };

        let name_tok = self.expect(TokenKind::Ident, "a type name")?;
        let name = name_tok.text.to_string();

        // Everything up to the body brace (generics, record components,
        // extends/implements/permits) is verbatim header text. Braces inside
        // parenthesized groups (annotation array arguments) do not open the
        // body.
        let mut paren_depth = 0usize;
        let body_start = loop {
            match self.peek() {
                Some(tok) if tok.kind == TokenKind::LParen => {
                    paren_depth += 1;
                    self.advance();
                }
                Some(tok) if tok.kind == TokenKind::RParen => {
                    paren_depth = paren_depth.saturating_sub(1);
                    self.advance();
                }
                Some(tok) if tok.kind == TokenKind::LBrace && paren_depth == 0 => {
                    break tok.span.start;
                }
                Some(_) => {
                    self.advance();
                }
                None => return Err(self.eof("'{'")),
            }
        };
        let header = Span::new(name_tok.span.end, body_start);
        let body = self.match_group(TokenKind::LBrace, TokenKind::RBrace, "'}'")?;

        Ok(RawTypeDecl {
            annotations,
            modifiers,
            keyword,
            name,
            header,
            body,
            span: Span::new(start, body.end),
        })
    }

    fn module_decl(&mut self) -> Result<RawModule> {
        let first = self.peek().ok_or_else(|| self.eof("'module'"))?;
        let start = first.span.start;
        let open = if self.at_ident("open") {
            self.advance();
            true
        } else {
            false
        };
        self.expect(TokenKind::Ident, "'module'")?;
        let name = self.qualified_name(false)?;
        while self
            .peek()
            .is_some_and(|t| t.kind != TokenKind::LBrace)
        {
            self.advance();
        }
        let body = self.match_group(TokenKind::LBrace, TokenKind::RBrace, "'}'")?;
        Ok(RawModule {
            open,
            name,
            body,
            span: Span::new(start, body.end),
        })
    }

    /// `a.b.c`, with an optional trailing `.*` segment for imports.
    fn qualified_name(&mut self, allow_star: bool) -> Result<RawName> {
        let first = self.expect(TokenKind::Ident, "an identifier")?;
        let mut segments = vec![first.text.to_string()];
        let mut end = first.span.end;
        while self.peek().is_some_and(|t| t.kind == TokenKind::Dot) {
            self.advance();
            match self.peek() {
                Some(tok) if tok.kind == TokenKind::Ident => {
                    segments.push(tok.text.to_string());
                    end = tok.span.end;
                    self.advance();
                }
                Some(tok) if allow_star && tok.kind == TokenKind::Star => {
                    segments.push("*".to_string());
                    end = tok.span.end;
                    self.advance();
                    break;
                }
                _ => return Err(self.unexpected("an identifier")),
            }
        }
        Ok(RawName {
            segments,
            span: Span::new(first.span.start, end),
        })
    }

    /// Consume a delimiter-matched group starting at the current token and
    /// return its span, delimiters included.
    fn match_group(&mut self, open: TokenKind, close: TokenKind, expected: &str) -> Result<Span> {
        let open_tok = self.expect(open, "an opening delimiter")?;
        let mut depth = 1usize;
        loop {
            match self.advance() {
                Some(tok) if tok.kind == open => depth += 1,
                Some(tok) if tok.kind == close => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(Span::new(open_tok.span.start, tok.span.end));
                    }
                }
                Some(_) => {}
                None => return Err(self.eof(expected)),
            }
        }
    }
}
