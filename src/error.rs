// Copyright (c) remint contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Unified error type for the transform entry points.
//!
//! Subsystem errors ([`ParserError`], [`ValidationError`]) are bridged into
//! [`TransformError`] with `From` impls, so hook bodies and internal code can
//! use `?` throughout. Every variant is fatal to the current transform call:
//! there are no retries and no partial results.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::nodes::NodeKind;
use crate::parser::ParserError;

/// Result alias used across the crate and by plugin hooks.
pub type Result<T> = std::result::Result<T, TransformError>;

// ============================================================================
// Validation
// ============================================================================

/// A property setter received a value of the wrong shape.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The assigned node has the wrong kind for the target property.
    #[error("expected a {expected} node, found {found}")]
    WrongKind { expected: NodeKind, found: NodeKind },
    /// The property is not defined for the node's kind.
    #[error("property `{property}` is not defined for {kind} nodes")]
    UnknownProperty {
        kind: NodeKind,
        property: &'static str,
    },
}

// ============================================================================
// Unified transform error
// ============================================================================

/// The single error type returned by [`transform`](crate::transform).
#[derive(Debug, Error)]
pub enum TransformError {
    /// The input path does not exist.
    #[error("source file not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },
    /// The input path exists but could not be read as text.
    #[error("failed to read {}: {source}", .path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The source text violates the grammar.
    #[error(transparent)]
    Parse(#[from] ParserError),
    /// A plugin hook failed; the whole transform is discarded.
    #[error("plugin error: {message}")]
    Plugin { message: String },
    /// A property setter rejected a value.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl TransformError {
    /// Construct a plugin failure from any message.
    pub fn plugin(message: impl Into<String>) -> Self {
        TransformError::Plugin {
            message: message.into(),
        }
    }
}
