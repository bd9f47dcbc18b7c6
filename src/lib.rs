// Copyright (c) remint contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! A Java source rewriting engine with minimal-diff code generation.
//!
//! This crate parses the statically structured top level of a Java source
//! file, exposes it to rewrite plugins as a tree of mutable facade nodes,
//! and re-emits source text reflecting only the edits the plugins actually
//! made. Anything untouched reaches the output byte-for-byte unchanged,
//! comments and odd spacing included.
//!
//! # Quick Start
//!
//! ```
//! use remint::{transform_str, TransformOptions};
//!
//! let source = "package com.example;\n\nclass Main {\n}\n";
//! let result = transform_str(source, "Main.java", TransformOptions::new())
//!     .expect("transform error");
//!
//! // With no plugins the output is the input, byte for byte.
//! assert_eq!(result.code(), source);
//! ```
//!
//! # Rewriting
//!
//! Plugins register hooks keyed by node kind; each hook receives a mutable
//! handle to the visited node:
//!
//! ```
//! use remint::{transform_str, NodeKind, NodeMut, Plugin, TransformOptions};
//!
//! let source = "package com.example;\n\nclass Main {\n}\n";
//! let plugin = Plugin::new().on(NodeKind::Package, |mut node: NodeMut<'_>| {
//!     let name = node.create_field_access(["org", "acme"]);
//!     node.set_package_name(name)?;
//!     Ok(())
//! });
//! let options = TransformOptions::new().with_plugin(plugin);
//! let result = transform_str(source, "Main.java", options).expect("transform error");
//!
//! assert!(result.code().contains("package org.acme;"));
//! assert!(result.code().contains("class Main {\n}"));
//! ```

use std::cmp::{max, min};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Public modules and re-exports
// ============================================================================

/// Unified error taxonomy for the transform entry points.
pub mod error;
pub use error::{Result, TransformError, ValidationError};

/// Node identity, kinds, action states, and the facade tree.
pub mod nodes;
pub use nodes::{ActionState, FacadeTree, NodeId, NodeKind, NodeMut, NodeRef, Span, TypeKeyword};

/// Tokenizer for the Java top-level subset.
pub mod tokenizer;

/// Recursive-descent parser producing the immutable raw tree.
pub mod parser;
pub use parser::ParserError;

/// Plugin hooks and the visitor dispatcher.
pub mod visitor;
pub use visitor::{Hook, Plugin};

mod codegen;

// ============================================================================
// Options
// ============================================================================

/// Configuration for one transform call: the plugin list plus printing
/// behavior.
pub struct TransformOptions {
    plugins: Vec<Plugin>,
    preserve_leading_comments: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformOptions {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
            preserve_leading_comments: true,
        }
    }

    /// Append a plugin. Plugins run in the order they were added.
    pub fn with_plugin(mut self, plugin: Plugin) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Whether a regenerated compilation unit keeps the comment block that
    /// precedes its first construct (license headers). Defaults to true.
    pub fn with_preserve_leading_comments(mut self, preserve: bool) -> Self {
        self.preserve_leading_comments = preserve;
        self
    }
}

impl fmt::Debug for TransformOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformOptions")
            .field("plugins", &self.plugins.len())
            .field("preserve_leading_comments", &self.preserve_leading_comments)
            .finish()
    }
}

// ============================================================================
// Result
// ============================================================================

/// The outcome of one transform call: the final facade tree and the printed
/// text. Converting the result to a string yields `code`.
pub struct TransformResult {
    tree: FacadeTree,
    code: String,
}

impl TransformResult {
    /// The printed output text.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Read-only handle to the final compilation unit.
    pub fn ast(&self) -> NodeRef<'_> {
        self.tree.get(self.tree.root())
    }

    /// Mutable handle to the final compilation unit, for structured
    /// inspection of properties.
    pub fn ast_mut(&mut self) -> NodeMut<'_> {
        let root = self.tree.root();
        self.tree.get_mut(root)
    }

    /// The path the source was read from, unchanged.
    pub fn source_file(&self) -> &Path {
        self.tree.source_file()
    }
}

impl fmt::Display for TransformResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl fmt::Debug for TransformResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformResult")
            .field("source_file", &self.source_file())
            .field("code_len", &self.code.len())
            .finish()
    }
}

// ============================================================================
// Transform entry points
// ============================================================================

/// Transform a source file on disk.
///
/// Reads the file, parses it, runs the plugins, and prints the result. Every
/// failure is fatal to the call: the caller receives either a complete
/// result or a single terminating error, never partial output.
pub fn transform(
    path: impl AsRef<Path>,
    options: TransformOptions,
) -> Result<TransformResult> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(TransformError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    let source = fs::read_to_string(path).map_err(|source| TransformError::SourceRead {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "read source");
    transform_source(source, path.to_path_buf(), options)
}

/// Transform in-memory source text. `source_file` is recorded on the
/// compilation unit but never read from disk.
pub fn transform_str(
    source: &str,
    source_file: impl AsRef<Path>,
    options: TransformOptions,
) -> Result<TransformResult> {
    transform_source(
        source.to_string(),
        source_file.as_ref().to_path_buf(),
        options,
    )
}

fn transform_source(
    source: String,
    source_file: PathBuf,
    options: TransformOptions,
) -> Result<TransformResult> {
    let unit = parser::parse_unit(&source)?;
    let mut tree = FacadeTree::new(
        source,
        source_file,
        unit,
        options.preserve_leading_comments,
    );
    let mut plugins = options.plugins;
    tracing::debug!(plugins = plugins.len(), "dispatching plugins");
    visitor::dispatch(&mut tree, &mut plugins)?;
    let code = tree.print();
    tracing::debug!(bytes = code.len(), "printed output");
    Ok(TransformResult { tree, code })
}

// ============================================================================
// Error formatting
// ============================================================================

/// Returns the byte offset of the beginning of line `n` (1-indexed).
fn bol_offset(source: &str, n: i32) -> usize {
    if n <= 1 {
        return 0;
    }
    source
        .match_indices('\n')
        .nth((n - 2) as usize)
        .map(|(index, _)| index + 1)
        .unwrap_or_else(|| source.len())
}

/// Returns the 1-indexed line number containing byte `offset`.
fn line_of(source: &str, offset: usize) -> usize {
    source[..min(offset, source.len())].matches('\n').count() + 1
}

/// Formats a parse error into a human-readable string with source context.
///
/// # Example
///
/// ```
/// use remint::{parser, prettify_error};
///
/// if let Err(e) = parser::parse_unit("package a.b\nclass C {}") {
///     let formatted = prettify_error("package a.b\nclass C {}", &e, "C.java");
///     assert!(formatted.contains("C.java"));
/// }
/// ```
pub fn prettify_error(source: &str, error: &ParserError, label: &str) -> String {
    use annotate_snippets::{Level, Renderer, Snippet};

    let span = error.span();
    let start = min(span.start, source.len());
    let end = min(span.end, source.len());
    let start_line = line_of(source, start);
    let end_line = line_of(source, end);

    let context = 1;
    let line_start = max(1, start_line.saturating_sub(context));
    let start_offset = bol_offset(source, start_line as i32 - context as i32);
    let end_offset = bol_offset(source, end_line as i32 + context as i32 + 1);
    let snippet_source = &source[start_offset..end_offset];

    let start = start - start_offset;
    let end = end - start_offset;
    let end = if start == end {
        min(end + 1, snippet_source.len() + 1)
    } else {
        end
    };
    let message = error.to_string();
    let rendered = Renderer::styled()
        .render(
            Level::Error.title(label).snippet(
                Snippet::source(snippet_source)
                    .line_start(line_start)
                    .fold(false)
                    .annotations(vec![Level::Error.span(start..end).label(&message)]),
            ),
        )
        .to_string();
    rendered
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bol_offset_first_line() {
        assert_eq!(0, bol_offset("hello", 1));
        assert_eq!(0, bol_offset("hello", 0));
        assert_eq!(0, bol_offset("hello\nhello", 1));
    }

    #[test]
    fn bol_offset_second_line() {
        assert_eq!(5, bol_offset("hello", 2));
        assert_eq!(6, bol_offset("hello\nhello", 2));
        assert_eq!(6, bol_offset("hello\nhello\nhello", 2));
    }

    #[test]
    fn bol_offset_last_line() {
        assert_eq!(5, bol_offset("hello", 3));
        assert_eq!(11, bol_offset("hello\nhello", 3));
        assert_eq!(12, bol_offset("hello\nhello\nhello", 3));
    }

    #[test]
    fn line_of_offsets() {
        assert_eq!(1, line_of("a\nb\nc", 0));
        assert_eq!(2, line_of("a\nb\nc", 2));
        assert_eq!(3, line_of("a\nb\nc", 4));
    }

    #[test]
    fn prettify_contains_label_and_snippet() {
        let source = "package a.b\nimport c;\n";
        let err = parser::parse_unit(source).unwrap_err();
        let formatted = prettify_error(source, &err, "Bad.java");
        assert!(formatted.contains("Bad.java"));
    }

    #[test]
    fn transform_missing_file_is_source_not_found() {
        let err = transform("/definitely/not/a/file.java", TransformOptions::new()).unwrap_err();
        assert!(matches!(err, TransformError::SourceNotFound { .. }));
    }

    #[test]
    fn parse_error_aborts_with_no_result() {
        let err = transform_str("class {", "Bad.java", TransformOptions::new()).unwrap_err();
        assert!(matches!(err, TransformError::Parse(_)));
    }
}
