// Copyright (c) remint contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Code generation: the verbatim / regenerate / omit printer.
//!
//! Per node the printer chooses one of three branches:
//!
//! - `Ignored` — emit nothing, subtree included
//! - verbatim-safe — copy the node's original span byte-for-byte
//! - otherwise — regenerate the node's text from its current properties,
//!   recursively printing children in syntax order
//!
//! A node is verbatim-safe when it is `NoChange`, has a span, and every
//! descendant is verbatim-safe. The safety table is derived bottom-up once
//! per print pass and never persisted: an edit anywhere inside a subtree
//! forces every ancestor to regenerate rather than copy a stale span. A
//! still-pending node has no materialized children and is safe by
//! construction, which is what lets a zero-plugin transform print the root
//! span without expanding the tree at all.

use crate::nodes::facade::{FacadeTree, Payload, Repr};
use crate::nodes::NodeId;

// ============================================================================
// Codegen state
// ============================================================================

/// Accumulator for generated source text.
#[derive(Debug, Default)]
struct CodegenState {
    out: String,
}

impl CodegenState {
    fn add_str(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn add_newline(&mut self) {
        self.out.push('\n');
    }

    fn into_string(self) -> String {
        self.out
    }
}

/// Derived verbatim-safety table, recomputed for each print pass.
type SafetyMemo = Vec<Option<bool>>;

/// Print one node (and its subtree) to a string.
pub(crate) fn render(tree: &FacadeTree, id: NodeId) -> String {
    let mut memo: SafetyMemo = vec![None; tree.len()];
    render_node(tree, id, &mut memo)
}

fn render_node(tree: &FacadeTree, id: NodeId, memo: &mut SafetyMemo) -> String {
    let mut state = CodegenState::default();
    emit(tree, id, memo, &mut state);
    state.into_string()
}

fn verbatim_safe(tree: &FacadeTree, id: NodeId, memo: &mut SafetyMemo) -> bool {
    if let Some(safe) = memo[id.index()] {
        return safe;
    }
    let node = tree.node(id);
    let safe = node.action.is_no_change()
        && node.span.is_some()
        && tree
            .built_children(id)
            .into_iter()
            .all(|child| verbatim_safe(tree, child, memo));
    memo[id.index()] = Some(safe);
    safe
}

fn emit(tree: &FacadeTree, id: NodeId, memo: &mut SafetyMemo, state: &mut CodegenState) {
    let node = tree.node(id);
    if node.action.is_ignore() {
        return;
    }
    if verbatim_safe(tree, id, memo) {
        if let Some(span) = node.span {
            state.add_str(span.slice(tree.source()));
            return;
        }
    }
    match &node.repr {
        Repr::Built(payload) => emit_payload(tree, id, payload, memo, state),
        // A pending node is always verbatim-safe; this branch is kept for
        // completeness only.
        _ => {
            if let Some(span) = node.span {
                state.add_str(span.slice(tree.source()));
            }
        }
    }
}

fn emit_payload(
    tree: &FacadeTree,
    _id: NodeId,
    payload: &Payload,
    memo: &mut SafetyMemo,
    state: &mut CodegenState,
) {
    match payload {
        Payload::CompilationUnit {
            package,
            imports,
            type_decls,
            module,
        } => {
            if tree.preserve_leading_comments() && tree.header_end() > 0 {
                state.add_str(&tree.source()[..tree.header_end()]);
            }
            // Each section ends with a newline; sections are separated by one
            // blank line.
            let mut sections: Vec<String> = Vec::new();
            if let Some(package) = package {
                let text = render_node(tree, *package, memo);
                if !text.is_empty() {
                    sections.push(text + "\n");
                }
            }
            let mut import_block = String::new();
            for &import in imports {
                let text = render_node(tree, import, memo);
                if !text.is_empty() {
                    import_block.push_str(&text);
                    import_block.push('\n');
                }
            }
            if !import_block.is_empty() {
                sections.push(import_block);
            }
            for &decl in type_decls {
                let text = render_node(tree, decl, memo);
                if !text.is_empty() {
                    sections.push(text + "\n");
                }
            }
            if let Some(module) = module {
                let text = render_node(tree, *module, memo);
                if !text.is_empty() {
                    sections.push(text + "\n");
                }
            }
            state.add_str(&sections.join("\n"));
        }

        Payload::Package {
            annotations,
            package_name,
        } => {
            for &annotation in annotations {
                let text = render_node(tree, annotation, memo);
                if !text.is_empty() {
                    state.add_str(&text);
                    state.add_newline();
                }
            }
            state.add_str("package ");
            if let Some(name) = package_name {
                state.add_str(&render_node(tree, *name, memo));
            }
            state.add_str(";");
        }

        Payload::Import {
            qualified_identifier,
            static_import,
        } => {
            // A blank import that was never given a qualified identifier
            // prints as nothing.
            let Some(name) = qualified_identifier else {
                return;
            };
            let name_text = render_node(tree, *name, memo);
            if name_text.is_empty() {
                return;
            }
            state.add_str("import ");
            if *static_import {
                state.add_str("static ");
            }
            state.add_str(&name_text);
            state.add_str(";");
        }

        Payload::Annotation { name, arguments } => {
            state.add_str("@");
            state.add_str(&render_node(tree, *name, memo));
            if let Some(arguments) = arguments {
                state.add_str(arguments.slice(tree.source()));
            }
        }

        Payload::ClassDecl {
            annotations,
            modifiers,
            keyword,
            simple_name,
            header,
            body,
        } => {
            for &annotation in annotations {
                let text = render_node(tree, annotation, memo);
                if !text.is_empty() {
                    state.add_str(&text);
                    state.add_newline();
                }
            }
            for modifier in modifiers {
                state.add_str(modifier);
                state.add_str(" ");
            }
            state.add_str(keyword.as_str());
            state.add_str(" ");
            state.add_str(simple_name);
            state.add_str(header.slice(tree.source()));
            state.add_str(body.slice(tree.source()));
        }

        Payload::FieldAccess { segments } => {
            state.add_str(&segments.join("."));
        }

        Payload::Module {
            open,
            name,
            header,
            body,
        } => {
            if *open {
                state.add_str("open ");
            }
            state.add_str("module ");
            state.add_str(&render_node(tree, *name, memo));
            state.add_str(header.slice(tree.source()));
            state.add_str(body.slice(tree.source()));
        }
    }
}
