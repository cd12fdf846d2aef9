//! Generates a constructor function for the record type declaration at the
//! cursor.

use tree_sitter::Node;

use crate::error::Result;
use crate::line_writer::LineWriter;
use crate::loader::Loader;
use crate::pipeline::Suggestor;
use crate::tree::{named_children, text_of};
use crate::types::{Range, Replacement};

pub struct Constructor;

struct FieldPlan {
    name_in_struct: String,
    name_in_func: String,
    type_text: String,
}

impl Suggestor for Constructor {
    fn name(&self) -> &'static str {
        "constructor"
    }

    fn suggest(&self, loader: &Loader) -> Result<Replacement> {
        let view = loader.file()?;
        let src = &loader.contents().text;

        let Some((decl, spec)) = find_type_spec(&view.path) else {
            return Ok(Replacement::default());
        };
        let Some(name_node) = spec.child_by_field_name("name") else {
            return Ok(Replacement::default());
        };
        let Some(struct_type) = spec
            .child_by_field_name("type")
            .filter(|t| t.kind() == "struct_type")
        else {
            return Ok(Replacement::default());
        };

        let type_name = text_of(name_node, src);
        let fn_name = constructor_name(type_name);

        let mut lw = LineWriter::new();

        // The declaration's own text goes in byte-for-byte, so re-running on
        // the generated file never rewrites it.
        lw.write_str(loader.contents().node_text(decl));
        lw.flush();
        lw.write_line("");

        let fields = plan_fields(loader, type_name, struct_type, src)?;
        let max_name_len = fields
            .iter()
            .map(|f| f.name_in_struct.len())
            .max()
            .unwrap_or(0);

        lw.write_line(format!("func {fn_name}("));
        for f in &fields {
            lw.write_line(format!("\t{} {},", f.name_in_func, f.type_text));
        }
        lw.write_line(format!(") {type_name} {{"));
        lw.write_line(format!("\treturn {type_name}{{"));
        for f in &fields {
            let padding = " ".repeat(max_name_len - f.name_in_struct.len());
            lw.write_line(format!(
                "\t\t{}: {}{},",
                f.name_in_struct, padding, f.name_in_func
            ));
        }
        lw.write_line("\t}");
        lw.write_line("}");

        Ok(Replacement {
            range: Range::from_node(decl),
            lines: lw.take_lines(),
        })
    }
}

/// The innermost type spec on the path together with its parent
/// declaration. The replacement range spans the whole declaration so the
/// generator stays idempotent when re-invoked at the same position.
fn find_type_spec<'a>(path: &[Node<'a>]) -> Option<(Node<'a>, Node<'a>)> {
    for i in (1..path.len()).rev() {
        if path[i].kind() == "type_spec" && path[i - 1].kind() == "type_declaration" {
            return Some((path[i - 1], path[i]));
        }
    }
    None
}

/// `New<Name>` for exported types, `new<TitleCasedName>` for unexported
/// ones, keeping the generated function's visibility in line with the
/// type's.
fn constructor_name(type_name: &str) -> String {
    let mut chars = type_name.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => {
            format!("new{}{}", first.to_uppercase(), chars.as_str())
        }
        _ => format!("New{type_name}"),
    }
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_lowercase(), chars.as_str()),
        None => String::new(),
    }
}

/// One parameter per field in declaration order. Named fields come straight
/// from the syntax; anonymous embedded fields have no syntactic name, so
/// their names resolve through the semantic field list (loaded lazily, only
/// when such a field exists).
fn plan_fields(
    loader: &Loader,
    type_name: &str,
    struct_type: Node,
    src: &str,
) -> Result<Vec<FieldPlan>> {
    let mut fields = Vec::new();
    let Some(list) = named_children(struct_type)
        .into_iter()
        .find(|n| n.kind() == "field_declaration_list")
    else {
        return Ok(fields);
    };

    let mut idx = 0usize;
    for field in named_children(list) {
        if field.kind() != "field_declaration" {
            continue;
        }

        let mut cursor = field.walk();
        let names: Vec<Node> = field.children_by_field_name("name", &mut cursor).collect();

        if names.is_empty() {
            let sem = loader.semantics()?;
            let resolved = sem
                .record_fields(type_name)
                .and_then(|fs| fs.get(idx))
                .ok_or_else(|| {
                    crate::error::EngineError::semantic_load(format!(
                        "no field list resolved for record type {type_name}"
                    ))
                })?;
            fields.push(FieldPlan {
                name_in_struct: resolved.name.clone(),
                name_in_func: lower_first(&resolved.name),
                type_text: resolved.type_text.clone(),
            });
            idx += 1;
        } else {
            let type_text = field
                .child_by_field_name("type")
                .map(|t| text_of(t, src).to_string())
                .unwrap_or_default();
            for name in names {
                let name = text_of(name, src).to_string();
                fields.push(FieldPlan {
                    name_in_func: lower_first(&name),
                    name_in_struct: name,
                    type_text: type_text.clone(),
                });
                idx += 1;
            }
        }
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Contents;
    use pretty_assertions::assert_eq;

    fn suggest_at(src: &str, offset: usize) -> Replacement {
        let loader = Loader::new(Contents::new("/tmp/does-not-exist/x.go", src), offset);
        Constructor.suggest(&loader).unwrap()
    }

    #[test]
    fn test_exported_struct() {
        let src = "package foo

type Exported struct {
	A string
}
";
        let repl = suggest_at(src, src.find("Exported").unwrap());

        assert_eq!(
            repl.lines,
            vec![
                "type Exported struct {",
                "\tA string",
                "}",
                "",
                "func NewExported(",
                "\ta string,",
                ") Exported {",
                "\treturn Exported{",
                "\t\tA: a,",
                "\t}",
                "}",
            ]
        );
        assert_eq!(repl.range.start.line, 3);
        assert_eq!(repl.range.stop.line, 5);
    }

    #[test]
    fn test_unexported_struct_gets_unexported_constructor() {
        let src = "package foo

type point struct {
	x int
	y int
}
";
        let repl = suggest_at(src, src.find("point").unwrap());

        assert_eq!(
            repl.lines,
            vec![
                "type point struct {",
                "\tx int",
                "\ty int",
                "}",
                "",
                "func newPoint(",
                "\tx int,",
                "\ty int,",
                ") point {",
                "\treturn point{",
                "\t\tx: x,",
                "\t\ty: y,",
                "\t}",
                "}",
            ]
        );
    }

    #[test]
    fn test_field_values_are_column_aligned() {
        let src = "package foo

type Config struct {
	A string
	BBBB int
	CC bool
}
";
        let repl = suggest_at(src, src.find("Config").unwrap());

        // The final line is the function's closing brace; the literal block
        // sits just before it.
        assert_eq!(
            repl.lines[repl.lines.len() - 6..repl.lines.len() - 1],
            [
                "\treturn Config{".to_string(),
                "\t\tA:    a,".to_string(),
                "\t\tBBBB: bBBB,".to_string(),
                "\t\tCC:   cC,".to_string(),
                "\t}".to_string(),
            ]
        );
    }

    #[test]
    fn test_zero_field_struct() {
        let src = "package foo

type Empty struct{}
";
        let repl = suggest_at(src, src.find("Empty").unwrap());

        assert_eq!(
            repl.lines,
            vec![
                "type Empty struct{}",
                "",
                "func NewEmpty(",
                ") Empty {",
                "\treturn Empty{",
                "\t}",
                "}",
            ]
        );
    }

    #[test]
    fn test_multi_name_field_group() {
        let src = "package foo

type Pair struct {
	Left, Right string
}
";
        let repl = suggest_at(src, src.find("Pair").unwrap());

        assert!(repl.lines.contains(&"\tleft string,".to_string()));
        assert!(repl.lines.contains(&"\tright string,".to_string()));
        assert!(repl.lines.contains(&"\t\tLeft:  left,".to_string()));
        assert!(repl.lines.contains(&"\t\tRight: right,".to_string()));
    }

    #[test]
    fn test_qualified_type_spelling_is_preserved() {
        let src = "package foo

type Wrapper struct {
	Buf bytes.Buffer
}
";
        let repl = suggest_at(src, src.find("Wrapper").unwrap());
        assert!(repl.lines.contains(&"\tbuf bytes.Buffer,".to_string()));
    }

    #[test]
    fn test_embedded_field_name_comes_from_semantics() {
        let dir = tempfile::tempdir().unwrap();
        let src = "package foo

type Inner struct{}

type Outer struct {
	Inner `json:\"inner\"`
	Count int
}
";
        let path = dir.path().join("main.go");
        std::fs::write(&path, src).unwrap();

        let loader = Loader::new(Contents::new(path, src), src.find("Outer").unwrap());
        let repl = Constructor.suggest(&loader).unwrap();

        assert!(repl.lines.contains(&"\tinner Inner,".to_string()));
        assert!(repl.lines.contains(&"\t\tInner: inner,".to_string()));
        assert!(repl.lines.contains(&"\t\tCount: count,".to_string()));
    }

    #[test]
    fn test_cursor_away_from_type_is_not_applicable() {
        let src = "package foo

func bar() {}
";
        let repl = suggest_at(src, src.find("bar").unwrap());
        assert!(repl.is_empty());
    }

    #[test]
    fn test_declaration_text_round_trips_byte_for_byte() {
        let src = "package foo

type Odd struct {
	// a comment the generator must not touch
	A   string // trailing
}
";
        let repl = suggest_at(src, src.find("Odd").unwrap());

        let decl_start = src.find("type Odd").unwrap();
        let decl_stop = src.rfind('}').unwrap() + 1;
        let original = &src[decl_start..decl_stop];
        assert_eq!(repl.lines[..4].join("\n"), original);
    }
}
