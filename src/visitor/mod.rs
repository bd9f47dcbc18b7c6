// Copyright (c) remint contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Plugin hooks and the visitor dispatcher.
//!
//! A [`Plugin`] is an ordered set of hooks keyed by [`NodeKind`]. The
//! dispatcher performs one pre-order traversal of the facade tree (root
//! first, then children in stored order); at each node it invokes, in
//! registration order, every plugin's hooks for that node's kind. A missing
//! hook is a no-op.
//!
//! Hooks run synchronously to completion before the next hook or the next
//! node; plugin N observes the mutations plugin N-1 made to the same node.
//! A node's children are read *after* its hooks have run, so a hook that
//! replaces a child collection is traversed in the new collection's order.
//! A hook error aborts the whole transform; the tree is discarded with it.

use crate::error::Result;
use crate::nodes::{FacadeTree, NodeId, NodeKind, NodeMut};

/// A plugin hook: receives a mutable handle to the visited node.
pub type Hook = Box<dyn for<'t> FnMut(NodeMut<'t>) -> Result<()>>;

/// One rewrite plugin: hooks keyed by node kind, run in registration order.
#[derive(Default)]
pub struct Plugin {
    hooks: Vec<(NodeKind, Hook)>,
}

impl Plugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook for a node kind. Builder-style, so a plugin reads as
    /// a declaration:
    ///
    /// ```
    /// use remint::{NodeKind, NodeMut, Plugin};
    ///
    /// let plugin = Plugin::new().on(NodeKind::Package, |mut node: NodeMut<'_>| {
    ///     node.set_action_ignore();
    ///     Ok(())
    /// });
    /// # let _ = plugin;
    /// ```
    pub fn on<F>(mut self, kind: NodeKind, hook: F) -> Self
    where
        F: for<'t> FnMut(NodeMut<'t>) -> Result<()> + 'static,
    {
        self.hooks.push((kind, Box::new(hook)));
        self
    }

    fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl std::fmt::Debug for Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<&str> = self.hooks.iter().map(|(k, _)| k.name()).collect();
        f.debug_struct("Plugin").field("hooks", &kinds).finish()
    }
}

/// Run all plugins over the tree in one pre-order pass.
pub(crate) fn dispatch(tree: &mut FacadeTree, plugins: &mut [Plugin]) -> Result<()> {
    if plugins.iter().all(Plugin::is_empty) {
        // Nothing to invoke; leave the tree unexpanded so the printer can
        // copy the root span verbatim.
        return Ok(());
    }
    let root = tree.root();
    walk(tree, root, plugins)
}

fn walk(tree: &mut FacadeTree, id: NodeId, plugins: &mut [Plugin]) -> Result<()> {
    let kind = tree.kind_of(id);
    tracing::trace!(node = %kind, id = %id, "visit");
    for plugin in plugins.iter_mut() {
        for (hook_kind, hook) in plugin.hooks.iter_mut() {
            if *hook_kind == kind {
                hook(tree.get_mut(id))?;
            }
        }
    }
    // Read children only now: hooks above may have replaced a collection,
    // and traversal must follow the new order.
    for child in tree.child_ids(id) {
        walk(tree, child, plugins)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_unit;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    const SOURCE: &str = "\
package com.example.mock;

import java.lang.annotation.Inherited;
import java.lang.annotation.Documented;

@Documented
public @interface MockAnnotation {
}
";

    fn tree() -> FacadeTree {
        let unit = parse_unit(SOURCE).expect("parse error");
        FacadeTree::new(SOURCE.to_string(), PathBuf::from("Mock.java"), unit, true)
    }

    #[test]
    fn traversal_is_pre_order() {
        let visited = Rc::new(RefCell::new(Vec::new()));
        let log = visited.clone();
        let mut plugins = vec![
            Plugin::new()
                .on(NodeKind::CompilationUnit, {
                    let log = log.clone();
                    move |_node: NodeMut<'_>| {
                        log.borrow_mut().push("CompilationUnit");
                        Ok(())
                    }
                })
                .on(NodeKind::Package, {
                    let log = log.clone();
                    move |_node: NodeMut<'_>| {
                        log.borrow_mut().push("Package");
                        Ok(())
                    }
                })
                .on(NodeKind::Import, {
                    let log = log.clone();
                    move |_node: NodeMut<'_>| {
                        log.borrow_mut().push("Import");
                        Ok(())
                    }
                })
                .on(NodeKind::ClassDecl, {
                    let log = log.clone();
                    move |_node: NodeMut<'_>| {
                        log.borrow_mut().push("ClassDecl");
                        Ok(())
                    }
                }),
        ];
        let mut tree = tree();
        dispatch(&mut tree, &mut plugins).expect("dispatch");
        assert_eq!(
            *visited.borrow(),
            vec![
                "CompilationUnit",
                "Package",
                "Import",
                "Import",
                "ClassDecl"
            ]
        );
    }

    #[test]
    fn plugins_run_in_order_on_the_same_node() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let first = seen.clone();
        let second = seen.clone();
        let mut plugins = vec![
            Plugin::new().on(NodeKind::Package, move |mut node: NodeMut<'_>| {
                first.borrow_mut().push(node.is_action_no_change());
                let name = node.create_field_access(["x", "y"]);
                node.set_package_name(name)?;
                Ok(())
            }),
            Plugin::new().on(NodeKind::Package, move |node: NodeMut<'_>| {
                // Plugin 2 observes plugin 1's mutation.
                second.borrow_mut().push(node.is_action_no_change());
                Ok(())
            }),
        ];
        let mut tree = tree();
        dispatch(&mut tree, &mut plugins).expect("dispatch");
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn hook_error_aborts_dispatch() {
        let mut plugins = vec![
            Plugin::new().on(NodeKind::Package, |_node: NodeMut<'_>| {
                Err(crate::TransformError::plugin("boom"))
            }),
            Plugin::new().on(NodeKind::Import, |_node: NodeMut<'_>| {
                panic!("must not be reached");
            }),
        ];
        let mut tree = tree();
        let err = dispatch(&mut tree, &mut plugins).unwrap_err();
        assert!(matches!(err, crate::TransformError::Plugin { .. }));
    }

    #[test]
    fn replaced_children_are_walked_in_new_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let log = order.clone();
        let mut plugins = vec![Plugin::new()
            .on(NodeKind::CompilationUnit, |mut node: NodeMut<'_>| {
                let mut imports = node.imports()?;
                imports.rotate_left(1);
                node.set_imports(imports)?;
                Ok(())
            })
            .on(NodeKind::Import, move |mut node: NodeMut<'_>| {
                let name = node.qualified_identifier()?.expect("qualified");
                log.borrow_mut().push(node.at(name).to_string());
                Ok(())
            })];
        let mut tree = tree();
        dispatch(&mut tree, &mut plugins).expect("dispatch");
        assert_eq!(
            *order.borrow(),
            vec![
                "java.lang.annotation.Documented",
                "java.lang.annotation.Inherited"
            ]
        );
    }
}
