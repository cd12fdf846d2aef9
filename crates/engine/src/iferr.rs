//! Inserts an error check after an assignment whose left-hand side binds an
//! error-typed value.

use tree_sitter::Node;

use crate::error::Result;
use crate::line_writer::LineWriter;
use crate::loader::Loader;
use crate::pipeline::Suggestor;
use crate::semantics;
use crate::tree::{named_children, text_of};
use crate::types::{Range, Replacement};

pub struct IfErr;

impl Suggestor for IfErr {
    fn name(&self) -> &'static str {
        "iferr"
    }

    fn suggest(&self, loader: &Loader) -> Result<Replacement> {
        let view = loader.file()?;
        let src = &loader.contents().text;

        let (assignment, surrounding) = find_assignment_and_surrounding_func(&view.path);
        let (Some(assignment), Some(surrounding)) = (assignment, surrounding) else {
            tracing::info!(
                assignment_found = assignment.is_some(),
                surrounding_found = surrounding.is_some(),
                "surrounding function or assignment statement not found"
            );
            return Ok(Replacement::default());
        };

        let indent = view.indent_level();

        let sem = loader.semantics()?;
        let Some(err_name) = error_lhs_identifier(sem, assignment, src) else {
            tracing::info!("lhs did not have an error type");
            return Ok(Replacement::default());
        };

        let results = semantics::result_types(surrounding, src);
        let err_idx = results.iter().position(|r| sem.resolves_to_error(r));

        let mut w = LineWriter::new();
        w.write_str(loader.contents().node_text(assignment));
        w.flush();

        let tabs = "\t".repeat(indent);
        let inner = "\t".repeat(indent + 1);
        w.write_line(format!("{tabs}if {err_name} != nil {{"));

        match err_idx {
            // The enclosing function has no error result to satisfy; reaching
            // the guard live would be a defect, so abort with the error.
            None => {
                w.write_line(format!("{inner}panic({err_name})"));
            }
            Some(err_idx) => {
                let mut values = Vec::with_capacity(results.len());
                for (i, result) in results.iter().enumerate() {
                    if i == err_idx {
                        values.push(err_name.clone());
                    } else {
                        values.push(sem.zero_value(result)?);
                    }
                }
                w.write_line(format!("{inner}return {}", values.join(", ")));
            }
        }

        w.write_line(format!("{tabs}}}"));

        Ok(Replacement {
            range: Range::from_node(assignment),
            lines: w.take_lines(),
        })
    }
}

/// Walk outward from the cursor: the nearest enclosing assignment, then the
/// nearest function-like declaration enclosing that assignment. Both must
/// exist for the transform to apply.
fn find_assignment_and_surrounding_func<'a>(
    path: &[Node<'a>],
) -> (Option<Node<'a>>, Option<Node<'a>>) {
    let mut assignment = None;
    for node in path.iter().rev() {
        match node.kind() {
            "short_var_declaration" | "assignment_statement" => {
                if assignment.is_none() {
                    assignment = Some(*node);
                }
            }
            "function_declaration" | "method_declaration" | "func_literal" => {
                if assignment.is_some() {
                    return (assignment, Some(*node));
                }
            }
            _ => {}
        }
    }
    (assignment, None)
}

/// The first left-hand identifier whose resolved type is exactly the
/// built-in error interface.
fn error_lhs_identifier(
    sem: &semantics::Semantics,
    assignment: Node,
    src: &str,
) -> Option<String> {
    let left = assignment.child_by_field_name("left")?;
    named_children(left)
        .into_iter()
        .filter(|n| n.kind() == "identifier")
        .map(|n| text_of(n, src))
        .find(|name| sem.is_error_local(name))
        .map(str::to_string)
}
