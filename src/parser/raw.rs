// Copyright (c) remint contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The immutable parse tree.
//!
//! The parser produces these span-annotated records straight off the token
//! stream. They are never exposed to plugins: the facade layer wraps each one
//! in a mutable node and materializes children lazily, so an untouched raw
//! subtree is never expanded at all.

use crate::nodes::{Span, TypeKeyword};

/// A dotted identifier (`com.example.util`, `java.util.*`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawName {
    pub segments: Vec<String>,
    pub span: Span,
}

/// An `@Name(...)` annotation use. Arguments, if present, are carried as a
/// verbatim span covering the parenthesized list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAnnotation {
    pub name: RawName,
    pub arguments: Option<Span>,
    pub span: Span,
}

/// A `package` declaration with its preceding annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPackage {
    pub annotations: Vec<RawAnnotation>,
    pub name: RawName,
    pub span: Span,
}

/// An `import` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImport {
    pub static_import: bool,
    pub name: RawName,
    pub span: Span,
}

/// A top-level type declaration. Everything between the simple name and the
/// opening brace (generics, `extends`, `implements`, `permits`) is the
/// `header` span; the brace-matched body is the `body` span. Both print
/// verbatim when the declaration regenerates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTypeDecl {
    pub annotations: Vec<RawAnnotation>,
    pub modifiers: Vec<String>,
    pub keyword: TypeKeyword,
    pub name: String,
    pub header: Span,
    pub body: Span,
    pub span: Span,
}

/// A `module` declaration. The directive block is the brace-matched `body`
/// span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawModule {
    pub open: bool,
    pub name: RawName,
    pub body: Span,
    pub span: Span,
}

/// The root of the parse: one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUnit {
    pub package: Option<RawPackage>,
    pub imports: Vec<RawImport>,
    pub type_decls: Vec<RawTypeDecl>,
    pub module: Option<RawModule>,
    /// Byte offset where the first construct starts; the text before it is
    /// the leading comment block.
    pub header_end: usize,
    pub span: Span,
}
