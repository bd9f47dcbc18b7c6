// Copyright (c) remint contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Node identity, kinds, spans, and action tracking.
//!
//! # Node Identity
//!
//! [`NodeId`] provides stable identity for facade nodes. Ids are indices into
//! the owning [`FacadeTree`]'s arena and are assigned in materialization
//! order (parent before children, left-to-right).
//!
//! # Action States
//!
//! Every facade node carries an [`ActionState`] that decides how the printer
//! treats it:
//!
//! - `NoChange` — copy the node's original source span verbatim
//! - `Changed` — regenerate the node's text from its current properties
//! - `Ignored` — emit nothing for the node or its subtree
//!
//! [`FacadeTree`]: crate::nodes::facade::FacadeTree

pub mod facade;

pub use facade::{FacadeTree, NodeMut, NodeRef};

// ============================================================================
// Node Identity
// ============================================================================

/// A stable, unique identifier for a facade node.
///
/// Ids index into the owning tree's arena. A node keeps its id for the whole
/// transform call, even when it is detached from the tree by a property
/// replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new NodeId with the given value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

// ============================================================================
// Spans
// ============================================================================

/// A byte range into the original source text.
///
/// The start offset is inclusive and the end offset is exclusive. Spans back
/// verbatim printing; synthetic nodes have no span and can never print
/// verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Slice the spanned text out of `source`.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

// ============================================================================
// Node Kinds
// ============================================================================

/// The closed set of facade node kinds.
///
/// Visitor hooks are keyed by kind; a plugin that registers no hook for a
/// kind is a no-op at nodes of that kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The root of a source file: package, imports, type declarations.
    CompilationUnit,
    /// A `package` declaration, with optional annotations.
    Package,
    /// An `import` declaration, possibly `static`.
    Import,
    /// An `@Name(...)` annotation use.
    Annotation,
    /// A top-level type declaration (`class`, `interface`, `@interface`,
    /// `enum`, or `record`). The body is carried as an opaque verbatim
    /// region.
    ClassDecl,
    /// A dotted identifier such as `com.example.util`.
    FieldAccess,
    /// A `module` declaration. The directive block is carried as an opaque
    /// verbatim region.
    Module,
}

impl NodeKind {
    /// The kind name as plugins see it.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::CompilationUnit => "CompilationUnit",
            NodeKind::Package => "Package",
            NodeKind::Import => "Import",
            NodeKind::Annotation => "Annotation",
            NodeKind::ClassDecl => "ClassDecl",
            NodeKind::FieldAccess => "FieldAccess",
            NodeKind::Module => "Module",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Action Tracking
// ============================================================================

/// Per-node tri-state controlling how the printer treats a node.
///
/// Parsed nodes start at `NoChange`; synthetic (factory-built) nodes start at
/// `Changed`, since they have no source span to fall back to. Any property
/// setter fires `NoChange -> Changed` on the owning node; the explicit ignore
/// operation fires `* -> Ignored`.
///
/// `Ignored` is terminal: a later property write on an ignored node stores
/// the value but does not leave `Ignored`, and the node stays omitted from
/// output. There is no operation back to `NoChange`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActionState {
    #[default]
    NoChange,
    Changed,
    Ignored,
}

impl ActionState {
    pub fn is_no_change(&self) -> bool {
        matches!(self, ActionState::NoChange)
    }

    pub fn is_change(&self) -> bool {
        matches!(self, ActionState::Changed)
    }

    pub fn is_ignore(&self) -> bool {
        matches!(self, ActionState::Ignored)
    }

    /// Transition taken by every property setter. Only `NoChange` moves.
    pub(crate) fn mark_changed(&mut self) {
        if matches!(self, ActionState::NoChange) {
            *self = ActionState::Changed;
        }
    }
}

// ============================================================================
// Type declaration keywords
// ============================================================================

/// The declaring keyword of a top-level type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKeyword {
    Class,
    Interface,
    AnnotationType,
    Enum,
    Record,
}

impl TypeKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKeyword::Class => "class",
            TypeKeyword::Interface => "interface",
            TypeKeyword::AnnotationType => "@interface",
            TypeKeyword::Enum => "enum",
            TypeKeyword::Record => "record",
        }
    }
}

impl std::fmt::Display for TypeKeyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_state_starts_no_change() {
        let state = ActionState::default();
        assert!(state.is_no_change());
        assert!(!state.is_change());
        assert!(!state.is_ignore());
    }

    #[test]
    fn mark_changed_only_moves_no_change() {
        let mut state = ActionState::NoChange;
        state.mark_changed();
        assert!(state.is_change());

        let mut ignored = ActionState::Ignored;
        ignored.mark_changed();
        assert!(ignored.is_ignore());
    }

    #[test]
    fn exactly_one_predicate_true() {
        for state in [
            ActionState::NoChange,
            ActionState::Changed,
            ActionState::Ignored,
        ] {
            let trues = [state.is_no_change(), state.is_change(), state.is_ignore()]
                .iter()
                .filter(|b| **b)
                .count();
            assert_eq!(trues, 1);
        }
    }

    #[test]
    fn span_slices_source() {
        let span = Span::new(4, 9);
        assert_eq!(span.slice("abc defgh ij"), "defgh");
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
    }

    #[test]
    fn kind_names_are_stable() {
        assert_eq!(NodeKind::CompilationUnit.name(), "CompilationUnit");
        assert_eq!(NodeKind::FieldAccess.name(), "FieldAccess");
        assert_eq!(NodeKind::ClassDecl.to_string(), "ClassDecl");
    }
}
