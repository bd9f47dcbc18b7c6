// Copyright (c) remint contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Parser error types.

use thiserror::Error;

use crate::nodes::Span;
use crate::tokenizer::TokError;

/// Errors produced while parsing a compilation unit.
///
/// Every variant carries enough location information for
/// [`prettify_error`](crate::prettify_error) to render a source snippet.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParserError {
    #[error(transparent)]
    TokenizerError(#[from] TokError),
    #[error("expected {expected}, found {found:?} at byte {}", .span.start)]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },
    #[error("expected {expected}, found end of file")]
    UnexpectedEof { expected: String, offset: usize },
}

impl ParserError {
    /// The byte span the error points at.
    pub fn span(&self) -> Span {
        match self {
            ParserError::TokenizerError(e) => match e {
                TokError::UnexpectedChar { offset, .. }
                | TokError::UnterminatedComment { offset }
                | TokError::UnterminatedString { offset } => Span::new(*offset, *offset + 1),
            },
            ParserError::UnexpectedToken { span, .. } => *span,
            ParserError::UnexpectedEof { offset, .. } => Span::new(*offset, *offset),
        }
    }
}
