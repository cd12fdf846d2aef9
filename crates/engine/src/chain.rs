//! Reformats a call/selector chain so every member access after the first
//! lands on its own indented line.

use tree_sitter::Node;

use crate::error::{EngineError, Result};
use crate::line_writer::LineWriter;
use crate::loader::{Contents, Loader};
use crate::pipeline::Suggestor;
use crate::tree::text_of;
use crate::types::{Range, Replacement};

pub struct SelectorChain;

impl Suggestor for SelectorChain {
    fn name(&self) -> &'static str {
        "selectorchain"
    }

    fn suggest(&self, loader: &Loader) -> Result<Replacement> {
        let view = loader.file()?;

        let Some(root) = find_chain_root(&view.path) else {
            tracing::debug!("no selector chain found at cursor");
            return Ok(Replacement::default());
        };

        let mut w = LineWriter::new();
        render_chain(&mut w, view.indent_level(), loader.contents(), root)?;

        Ok(Replacement {
            range: Range::from_node(root),
            lines: w.take_lines(),
        })
    }
}

/// Walk outward from the innermost node, following the selector/call
/// alternation. A selector continues the chain only under a selector or a
/// call; a call continues only under a selector. The first chain node whose
/// parent breaks the alternation is the canonical root, no matter which
/// link inside the chain the walk started from.
fn find_chain_root<'a>(path: &[Node<'a>]) -> Option<Node<'a>> {
    for i in (1..path.len()).rev() {
        let curr = path[i];
        let parent = path[i - 1];
        match curr.kind() {
            "selector_expression" => match parent.kind() {
                "selector_expression" | "call_expression" => continue,
                _ => return Some(curr),
            },
            "call_expression" => match parent.kind() {
                "selector_expression" => continue,
                _ => return Some(curr),
            },
            _ => continue,
        }
    }
    None
}

/// Render inner-to-outer. Argument lists go in verbatim from the source
/// bytes, so any multi-line formatting the user already had survives.
fn render_chain(w: &mut LineWriter, indent: usize, contents: &Contents, node: Node) -> Result<()> {
    match node.kind() {
        "call_expression" => {
            let callee = node.child_by_field_name("function").ok_or_else(|| {
                EngineError::unsupported_shape("call expression without a callee")
            })?;
            render_chain(w, indent, contents, callee)?;
            if let Some(args) = node.child_by_field_name("arguments") {
                w.write_str(contents.node_text(args));
            }
            Ok(())
        }
        "selector_expression" => {
            let operand = node.child_by_field_name("operand").ok_or_else(|| {
                EngineError::unsupported_shape("selector expression without an operand")
            })?;
            render_chain(w, indent, contents, operand)?;

            // One extra indent beyond the statement for every spilled line.
            w.write_str(&format!(".\n{}", "\t".repeat(indent + 1)));
            if let Some(member) = node.child_by_field_name("field") {
                w.write_str(text_of(member, &contents.text));
            }
            Ok(())
        }
        "identifier" | "field_identifier" => {
            w.write_str(text_of(node, &contents.text));
            Ok(())
        }
        other => Err(EngineError::unsupported_shape(format!(
            "unexpected node kind in chain: {other}"
        ))),
    }
}
