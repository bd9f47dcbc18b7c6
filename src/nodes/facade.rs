// Copyright (c) remint contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The mutable facade over the immutable parse tree.
//!
//! # Arena
//!
//! All facade nodes of one transform call live in a [`FacadeTree`] arena and
//! are addressed by [`NodeId`]. A node holds its kind, an optional source
//! span, its action state, a non-owning parent reference, and a
//! representation that is either still *pending* (the raw parse node, not yet
//! expanded) or *built* (kind-specific properties referring to child ids).
//!
//! # Lazy materialization
//!
//! Child facades are materialized on first structured access, not eagerly:
//! accessing `imports` on a pending compilation unit expands it one level,
//! allocating each import as a pending node in turn. An untouched pending
//! subtree keeps its span and `NoChange` state, so the printer can copy it
//! verbatim without ever expanding it.
//!
//! # Mutation
//!
//! The typed setters on [`NodeMut`] are the sole mutation entry points. Each
//! setter validates the assigned node's kind, stores the value, re-parents
//! the child, and fires the `NoChange -> Changed` transition on the owner.
//! Replacing a collection property wholesale counts as one mutation of the
//! owning node. Assigning the value a property already holds is a no-op and
//! leaves the action state alone.

use std::path::{Path, PathBuf};

use crate::codegen;
use crate::error::ValidationError;
use crate::nodes::{ActionState, NodeId, NodeKind, Span, TypeKeyword};
use crate::parser::raw::{
    RawAnnotation, RawImport, RawModule, RawName, RawPackage, RawTypeDecl, RawUnit,
};

// ============================================================================
// Node storage
// ============================================================================

/// A raw parse node waiting to be materialized.
#[derive(Debug)]
pub(crate) enum RawNode {
    Unit(RawUnit),
    Package(RawPackage),
    Import(RawImport),
    Annotation(RawAnnotation),
    TypeDecl(RawTypeDecl),
    Module(RawModule),
    Name(RawName),
}

/// Kind-specific properties of a built node. Child-valued properties hold
/// [`NodeId`]s into the same arena.
#[derive(Debug)]
pub(crate) enum Payload {
    CompilationUnit {
        package: Option<NodeId>,
        imports: Vec<NodeId>,
        type_decls: Vec<NodeId>,
        module: Option<NodeId>,
    },
    Package {
        annotations: Vec<NodeId>,
        package_name: Option<NodeId>,
    },
    Import {
        qualified_identifier: Option<NodeId>,
        static_import: bool,
    },
    Annotation {
        name: NodeId,
        arguments: Option<Span>,
    },
    ClassDecl {
        annotations: Vec<NodeId>,
        modifiers: Vec<String>,
        keyword: TypeKeyword,
        simple_name: String,
        header: Span,
        body: Span,
    },
    FieldAccess {
        segments: Vec<String>,
    },
    Module {
        open: bool,
        name: NodeId,
        header: Span,
        body: Span,
    },
}

#[derive(Debug)]
pub(crate) enum Repr {
    Pending(RawNode),
    /// Transient state while `materialize` owns the raw node.
    Materializing,
    Built(Payload),
}

#[derive(Debug)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) span: Option<Span>,
    pub(crate) action: ActionState,
    pub(crate) repr: Repr,
}

// ============================================================================
// Facade tree
// ============================================================================

/// The facade tree of one transform call: the original source text plus the
/// node arena. Dropped wholesale when the call's result is dropped; no node
/// outlives it.
#[derive(Debug)]
pub struct FacadeTree {
    source: String,
    source_file: PathBuf,
    header_end: usize,
    preserve_leading_comments: bool,
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl FacadeTree {
    pub(crate) fn new(
        source: String,
        source_file: PathBuf,
        unit: RawUnit,
        preserve_leading_comments: bool,
    ) -> Self {
        let header_end = unit.header_end;
        let span = unit.span;
        let mut tree = Self {
            source,
            source_file,
            header_end,
            preserve_leading_comments,
            nodes: Vec::new(),
            root: NodeId(0),
        };
        tree.root = tree.alloc_parsed(
            NodeKind::CompilationUnit,
            None,
            span,
            RawNode::Unit(unit),
        );
        tree
    }

    /// The root compilation unit.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The original source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The path the source was read from.
    pub fn source_file(&self) -> &Path {
        &self.source_file
    }

    pub(crate) fn header_end(&self) -> usize {
        self.header_end
    }

    pub(crate) fn preserve_leading_comments(&self) -> bool {
        self.preserve_leading_comments
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A read-only handle to a node.
    pub fn get(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { tree: self, id }
    }

    /// A mutable handle to a node.
    pub fn get_mut(&mut self, id: NodeId) -> NodeMut<'_> {
        NodeMut { tree: self, id }
    }

    /// Print the whole tree: verbatim where untouched, regenerated where
    /// changed, omitted where ignored.
    pub fn print(&self) -> String {
        codegen::render(self, self.root)
    }

    // ------------------------------------------------------------------
    // Arena internals
    // ------------------------------------------------------------------

    pub(crate) fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.index()]
    }

    pub(crate) fn kind_of(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    fn alloc(
        &mut self,
        kind: NodeKind,
        parent: Option<NodeId>,
        span: Option<Span>,
        action: ActionState,
        repr: Repr,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            parent,
            span,
            action,
            repr,
        });
        id
    }

    fn alloc_parsed(
        &mut self,
        kind: NodeKind,
        parent: Option<NodeId>,
        span: Span,
        raw: RawNode,
    ) -> NodeId {
        self.alloc(
            kind,
            parent,
            Some(span),
            ActionState::NoChange,
            Repr::Pending(raw),
        )
    }

    fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        self.node_mut(child).parent = Some(parent);
    }

    fn mark_changed(&mut self, id: NodeId) {
        self.node_mut(id).action.mark_changed();
    }

    // ------------------------------------------------------------------
    // Materialization
    // ------------------------------------------------------------------

    /// Expand a pending node one level, allocating its children as pending
    /// nodes. Idempotent; the memoized builder behind every structured
    /// accessor.
    pub(crate) fn materialize(&mut self, id: NodeId) {
        if matches!(self.node(id).repr, Repr::Built(_)) {
            return;
        }
        let raw = match std::mem::replace(&mut self.node_mut(id).repr, Repr::Materializing) {
            Repr::Pending(raw) => raw,
            other => {
                self.node_mut(id).repr = other;
                return;
            }
        };
        let payload = self.build_payload(id, raw);
        self.node_mut(id).repr = Repr::Built(payload);
    }

    fn alloc_name(&mut self, parent: NodeId, name: RawName) -> NodeId {
        let span = name.span;
        self.alloc_parsed(NodeKind::FieldAccess, Some(parent), span, RawNode::Name(name))
    }

    fn alloc_annotations(&mut self, parent: NodeId, raws: Vec<RawAnnotation>) -> Vec<NodeId> {
        raws.into_iter()
            .map(|a| {
                let span = a.span;
                self.alloc_parsed(NodeKind::Annotation, Some(parent), span, RawNode::Annotation(a))
            })
            .collect()
    }

    fn build_payload(&mut self, id: NodeId, raw: RawNode) -> Payload {
        match raw {
            RawNode::Unit(unit) => {
                let package = unit.package.map(|p| {
                    let span = p.span;
                    self.alloc_parsed(NodeKind::Package, Some(id), span, RawNode::Package(p))
                });
                let imports = unit
                    .imports
                    .into_iter()
                    .map(|i| {
                        let span = i.span;
                        self.alloc_parsed(NodeKind::Import, Some(id), span, RawNode::Import(i))
                    })
                    .collect();
                let type_decls = unit
                    .type_decls
                    .into_iter()
                    .map(|t| {
                        let span = t.span;
                        self.alloc_parsed(NodeKind::ClassDecl, Some(id), span, RawNode::TypeDecl(t))
                    })
                    .collect();
                let module = unit.module.map(|m| {
                    let span = m.span;
                    self.alloc_parsed(NodeKind::Module, Some(id), span, RawNode::Module(m))
                });
                Payload::CompilationUnit {
                    package,
                    imports,
                    type_decls,
                    module,
                }
            }
            RawNode::Package(package) => {
                let annotations = self.alloc_annotations(id, package.annotations);
                let package_name = Some(self.alloc_name(id, package.name));
                Payload::Package {
                    annotations,
                    package_name,
                }
            }
            RawNode::Import(import) => Payload::Import {
                qualified_identifier: Some(self.alloc_name(id, import.name)),
                static_import: import.static_import,
            },
            RawNode::Annotation(annotation) => Payload::Annotation {
                name: self.alloc_name(id, annotation.name),
                arguments: annotation.arguments,
            },
            RawNode::TypeDecl(decl) => {
                let annotations = self.alloc_annotations(id, decl.annotations);
                Payload::ClassDecl {
                    annotations,
                    modifiers: decl.modifiers,
                    keyword: decl.keyword,
                    simple_name: decl.name,
                    header: decl.header,
                    body: decl.body,
                }
            }
            RawNode::Module(module) => {
                let header = Span::new(module.name.span.end, module.body.start);
                Payload::Module {
                    open: module.open,
                    name: self.alloc_name(id, module.name),
                    header,
                    body: module.body,
                }
            }
            RawNode::Name(name) => Payload::FieldAccess {
                segments: name.segments,
            },
        }
    }

    /// Children in syntax order, materializing the node first. This is the
    /// dispatcher's view of the tree: it reflects any replacement a hook made
    /// before the children were read.
    pub(crate) fn child_ids(&mut self, id: NodeId) -> Vec<NodeId> {
        self.materialize(id);
        self.built_children(id)
    }

    /// Children of an already-built node, in syntax order. A pending node
    /// reports no children; its subtree is untouched by construction.
    pub(crate) fn built_children(&self, id: NodeId) -> Vec<NodeId> {
        let Repr::Built(payload) = &self.node(id).repr else {
            return Vec::new();
        };
        match payload {
            Payload::CompilationUnit {
                package,
                imports,
                type_decls,
                module,
            } => {
                let mut children = Vec::new();
                children.extend(package.iter().copied());
                children.extend(imports.iter().copied());
                children.extend(type_decls.iter().copied());
                children.extend(module.iter().copied());
                children
            }
            Payload::Package {
                annotations,
                package_name,
            } => {
                let mut children = annotations.clone();
                children.extend(package_name.iter().copied());
                children
            }
            Payload::Import {
                qualified_identifier,
                ..
            } => qualified_identifier.iter().copied().collect(),
            Payload::Annotation { name, .. } => vec![*name],
            Payload::ClassDecl { annotations, .. } => annotations.clone(),
            Payload::FieldAccess { .. } => Vec::new(),
            Payload::Module { name, .. } => vec![*name],
        }
    }

    // ------------------------------------------------------------------
    // Factory helpers
    // ------------------------------------------------------------------

    /// Build a synthetic dotted-identifier node. It carries no span and is
    /// born `Changed`.
    pub fn create_field_access<I, S>(&mut self, segments: I) -> NodeId
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments = segments.into_iter().map(Into::into).collect();
        self.alloc(
            NodeKind::FieldAccess,
            None,
            None,
            ActionState::Changed,
            Repr::Built(Payload::FieldAccess { segments }),
        )
    }

    /// Build a blank synthetic import: no qualified identifier, not static.
    /// The caller fills it in before inserting it into an `imports` sequence.
    pub fn new_import(&mut self) -> NodeId {
        self.alloc(
            NodeKind::Import,
            None,
            None,
            ActionState::Changed,
            Repr::Built(Payload::Import {
                qualified_identifier: None,
                static_import: false,
            }),
        )
    }

    // ------------------------------------------------------------------
    // Property plumbing
    // ------------------------------------------------------------------

    fn expect_kind(&self, id: NodeId, expected: NodeKind) -> Result<(), ValidationError> {
        let found = self.kind_of(id);
        if found == expected {
            Ok(())
        } else {
            Err(ValidationError::WrongKind { expected, found })
        }
    }

    fn payload(&mut self, id: NodeId) -> &Payload {
        self.materialize(id);
        match &self.node(id).repr {
            Repr::Built(payload) => payload,
            // materialize() always leaves the node built
            _ => unreachable!("node not built after materialization"),
        }
    }

    fn payload_mut(&mut self, id: NodeId) -> &mut Payload {
        self.materialize(id);
        match &mut self.node_mut(id).repr {
            Repr::Built(payload) => payload,
            _ => unreachable!("node not built after materialization"),
        }
    }
}

// ============================================================================
// Read-only handle
// ============================================================================

/// A read-only handle to one facade node.
///
/// `Display` produces the node's current printed text: verbatim for an
/// untouched parsed node, regenerated otherwise.
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t FacadeTree,
    id: NodeId,
}

impl<'t> NodeRef<'t> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.tree.kind_of(self.id)
    }

    /// The node's original source span; `None` for synthetic nodes.
    pub fn span(&self) -> Option<Span> {
        self.tree.node(self.id).span
    }

    /// Non-owning parent reference.
    pub fn parent(&self) -> Option<NodeRef<'t>> {
        self.tree
            .node(self.id)
            .parent
            .map(|id| NodeRef { tree: self.tree, id })
    }

    pub fn is_action_no_change(&self) -> bool {
        self.tree.node(self.id).action.is_no_change()
    }

    pub fn is_action_change(&self) -> bool {
        self.tree.node(self.id).action.is_change()
    }

    pub fn is_action_ignore(&self) -> bool {
        self.tree.node(self.id).action.is_ignore()
    }

    /// The path of the enclosing source file. Defined on the compilation
    /// unit only.
    pub fn source_file(&self) -> Result<&'t Path, ValidationError> {
        match self.kind() {
            NodeKind::CompilationUnit => Ok(self.tree.source_file()),
            kind => Err(ValidationError::UnknownProperty {
                kind,
                property: "sourceFile",
            }),
        }
    }
}

impl std::fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&codegen::render(self.tree, self.id))
    }
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .finish()
    }
}

// ============================================================================
// Mutable handle
// ============================================================================

/// A mutable handle to one facade node: the only way plugins read or write
/// structured properties.
///
/// Getters materialize the node on first access. Setters validate the
/// assigned value's kind and fire the `NoChange -> Changed` transition on
/// this node; a setter on an ignored node stores the value but the node
/// stays `Ignored`.
pub struct NodeMut<'t> {
    tree: &'t mut FacadeTree,
    id: NodeId,
}

macro_rules! property_getter {
    ($self:ident, $pattern:pat => $value:expr, $property:literal) => {
        match $self.tree.payload($self.id) {
            $pattern => Ok($value),
            _ => Err(ValidationError::UnknownProperty {
                kind: $self.tree.kind_of($self.id),
                property: $property,
            }),
        }
    };
}

impl<'t> NodeMut<'t> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.tree.kind_of(self.id)
    }

    pub fn span(&self) -> Option<Span> {
        self.tree.node(self.id).span
    }

    /// Reborrow as a read-only handle.
    pub fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self.tree,
            id: self.id,
        }
    }

    /// A mutable handle to another node in the same tree, for navigating to
    /// children returned by the collection getters.
    pub fn at(&mut self, id: NodeId) -> NodeMut<'_> {
        NodeMut {
            tree: self.tree,
            id,
        }
    }

    // ------------------------------------------------------------------
    // Action state
    // ------------------------------------------------------------------

    pub fn is_action_no_change(&self) -> bool {
        self.tree.node(self.id).action.is_no_change()
    }

    pub fn is_action_change(&self) -> bool {
        self.tree.node(self.id).action.is_change()
    }

    pub fn is_action_ignore(&self) -> bool {
        self.tree.node(self.id).action.is_ignore()
    }

    /// Drop this node (and its subtree) from the output. Returns true on
    /// success; the operation cannot fail and is not reversible.
    pub fn set_action_ignore(&mut self) -> bool {
        self.tree.node_mut(self.id).action = ActionState::Ignored;
        true
    }

    // ------------------------------------------------------------------
    // Factory helpers
    // ------------------------------------------------------------------

    /// See [`FacadeTree::create_field_access`].
    pub fn create_field_access<I, S>(&mut self, segments: I) -> NodeId
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tree.create_field_access(segments)
    }

    /// See [`FacadeTree::new_import`].
    pub fn new_import(&mut self) -> NodeId {
        self.tree.new_import()
    }

    // ------------------------------------------------------------------
    // CompilationUnit properties
    // ------------------------------------------------------------------

    pub fn source_file(&self) -> Result<&Path, ValidationError> {
        self.as_node_ref().source_file()?;
        Ok(self.tree.source_file())
    }

    pub fn package(&mut self) -> Result<Option<NodeId>, ValidationError> {
        property_getter!(self, Payload::CompilationUnit { package, .. } => *package, "package")
    }

    pub fn set_package(&mut self, value: NodeId) -> Result<(), ValidationError> {
        self.tree.expect_kind(value, NodeKind::Package)?;
        let id = self.id;
        match self.tree.payload_mut(id) {
            Payload::CompilationUnit { package, .. } => {
                if *package == Some(value) {
                    return Ok(());
                }
                *package = Some(value);
            }
            _ => {
                return Err(ValidationError::UnknownProperty {
                    kind: self.kind(),
                    property: "package",
                })
            }
        }
        self.tree.set_parent(value, id);
        self.tree.mark_changed(id);
        Ok(())
    }

    pub fn imports(&mut self) -> Result<Vec<NodeId>, ValidationError> {
        property_getter!(self, Payload::CompilationUnit { imports, .. } => imports.clone(), "imports")
    }

    /// Replace the whole import sequence. One mutation of this node, however
    /// many imports moved.
    pub fn set_imports(&mut self, values: Vec<NodeId>) -> Result<(), ValidationError> {
        for &value in &values {
            self.tree.expect_kind(value, NodeKind::Import)?;
        }
        let id = self.id;
        match self.tree.payload_mut(id) {
            Payload::CompilationUnit { imports, .. } => {
                if *imports == values {
                    return Ok(());
                }
                *imports = values.clone();
            }
            _ => {
                return Err(ValidationError::UnknownProperty {
                    kind: self.kind(),
                    property: "imports",
                })
            }
        }
        for value in values {
            self.tree.set_parent(value, id);
        }
        self.tree.mark_changed(id);
        Ok(())
    }

    pub fn type_decls(&mut self) -> Result<Vec<NodeId>, ValidationError> {
        property_getter!(self, Payload::CompilationUnit { type_decls, .. } => type_decls.clone(), "typeDecls")
    }

    pub fn set_type_decls(&mut self, values: Vec<NodeId>) -> Result<(), ValidationError> {
        for &value in &values {
            self.tree.expect_kind(value, NodeKind::ClassDecl)?;
        }
        let id = self.id;
        match self.tree.payload_mut(id) {
            Payload::CompilationUnit { type_decls, .. } => {
                if *type_decls == values {
                    return Ok(());
                }
                *type_decls = values.clone();
            }
            _ => {
                return Err(ValidationError::UnknownProperty {
                    kind: self.kind(),
                    property: "typeDecls",
                })
            }
        }
        for value in values {
            self.tree.set_parent(value, id);
        }
        self.tree.mark_changed(id);
        Ok(())
    }

    pub fn module(&mut self) -> Result<Option<NodeId>, ValidationError> {
        property_getter!(self, Payload::CompilationUnit { module, .. } => *module, "module")
    }

    pub fn set_module(&mut self, value: NodeId) -> Result<(), ValidationError> {
        self.tree.expect_kind(value, NodeKind::Module)?;
        let id = self.id;
        match self.tree.payload_mut(id) {
            Payload::CompilationUnit { module, .. } => {
                if *module == Some(value) {
                    return Ok(());
                }
                *module = Some(value);
            }
            _ => {
                return Err(ValidationError::UnknownProperty {
                    kind: self.kind(),
                    property: "module",
                })
            }
        }
        self.tree.set_parent(value, id);
        self.tree.mark_changed(id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Package properties
    // ------------------------------------------------------------------

    /// Annotations of a package or type declaration.
    pub fn annotations(&mut self) -> Result<Vec<NodeId>, ValidationError> {
        match self.tree.payload(self.id) {
            Payload::Package { annotations, .. } | Payload::ClassDecl { annotations, .. } => {
                Ok(annotations.clone())
            }
            _ => Err(ValidationError::UnknownProperty {
                kind: self.kind(),
                property: "annotations",
            }),
        }
    }

    pub fn set_annotations(&mut self, values: Vec<NodeId>) -> Result<(), ValidationError> {
        for &value in &values {
            self.tree.expect_kind(value, NodeKind::Annotation)?;
        }
        let id = self.id;
        match self.tree.payload_mut(id) {
            Payload::Package { annotations, .. } | Payload::ClassDecl { annotations, .. } => {
                if *annotations == values {
                    return Ok(());
                }
                *annotations = values.clone();
            }
            _ => {
                return Err(ValidationError::UnknownProperty {
                    kind: self.kind(),
                    property: "annotations",
                })
            }
        }
        for value in values {
            self.tree.set_parent(value, id);
        }
        self.tree.mark_changed(id);
        Ok(())
    }

    pub fn package_name(&mut self) -> Result<Option<NodeId>, ValidationError> {
        property_getter!(self, Payload::Package { package_name, .. } => *package_name, "packageName")
    }

    pub fn set_package_name(&mut self, value: NodeId) -> Result<(), ValidationError> {
        self.tree.expect_kind(value, NodeKind::FieldAccess)?;
        let id = self.id;
        match self.tree.payload_mut(id) {
            Payload::Package { package_name, .. } => {
                if *package_name == Some(value) {
                    return Ok(());
                }
                *package_name = Some(value);
            }
            _ => {
                return Err(ValidationError::UnknownProperty {
                    kind: self.kind(),
                    property: "packageName",
                })
            }
        }
        self.tree.set_parent(value, id);
        self.tree.mark_changed(id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Import properties
    // ------------------------------------------------------------------

    pub fn qualified_identifier(&mut self) -> Result<Option<NodeId>, ValidationError> {
        property_getter!(
            self,
            Payload::Import { qualified_identifier, .. } => *qualified_identifier,
            "qualifiedIdentifier"
        )
    }

    pub fn set_qualified_identifier(&mut self, value: NodeId) -> Result<(), ValidationError> {
        self.tree.expect_kind(value, NodeKind::FieldAccess)?;
        let id = self.id;
        match self.tree.payload_mut(id) {
            Payload::Import {
                qualified_identifier,
                ..
            } => {
                if *qualified_identifier == Some(value) {
                    return Ok(());
                }
                *qualified_identifier = Some(value);
            }
            _ => {
                return Err(ValidationError::UnknownProperty {
                    kind: self.kind(),
                    property: "qualifiedIdentifier",
                })
            }
        }
        self.tree.set_parent(value, id);
        self.tree.mark_changed(id);
        Ok(())
    }

    pub fn static_import(&mut self) -> Result<bool, ValidationError> {
        property_getter!(self, Payload::Import { static_import, .. } => *static_import, "staticImport")
    }

    pub fn set_static_import(&mut self, value: bool) -> Result<(), ValidationError> {
        let id = self.id;
        match self.tree.payload_mut(id) {
            Payload::Import { static_import, .. } => {
                if *static_import == value {
                    return Ok(());
                }
                *static_import = value;
            }
            _ => {
                return Err(ValidationError::UnknownProperty {
                    kind: self.kind(),
                    property: "staticImport",
                })
            }
        }
        self.tree.mark_changed(id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Module properties
    // ------------------------------------------------------------------

    pub fn open(&mut self) -> Result<bool, ValidationError> {
        property_getter!(self, Payload::Module { open, .. } => *open, "open")
    }

    pub fn module_name(&mut self) -> Result<NodeId, ValidationError> {
        property_getter!(self, Payload::Module { name, .. } => *name, "name")
    }

    // ------------------------------------------------------------------
    // FieldAccess properties
    // ------------------------------------------------------------------

    pub fn segments(&mut self) -> Result<Vec<String>, ValidationError> {
        property_getter!(self, Payload::FieldAccess { segments } => segments.clone(), "segments")
    }

    // ------------------------------------------------------------------
    // ClassDecl properties
    // ------------------------------------------------------------------

    pub fn simple_name(&mut self) -> Result<String, ValidationError> {
        property_getter!(self, Payload::ClassDecl { simple_name, .. } => simple_name.clone(), "simpleName")
    }

    pub fn set_simple_name(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        let value = value.into();
        let id = self.id;
        match self.tree.payload_mut(id) {
            Payload::ClassDecl { simple_name, .. } => {
                if *simple_name == value {
                    return Ok(());
                }
                *simple_name = value;
            }
            _ => {
                return Err(ValidationError::UnknownProperty {
                    kind: self.kind(),
                    property: "simpleName",
                })
            }
        }
        self.tree.mark_changed(id);
        Ok(())
    }
}

impl std::fmt::Display for NodeMut<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&codegen::render(self.tree, self.id))
    }
}

impl std::fmt::Debug for NodeMut<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeMut")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .finish()
    }
}
