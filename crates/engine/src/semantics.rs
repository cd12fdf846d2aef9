//! Selective type analysis for the package enclosing the target file.
//!
//! Full analysis of a large package is the dominant cost of an invocation,
//! and the suggestors only ever need the signatures of other declarations
//! plus full information for the one function containing the cursor. So the
//! load enumerates every file in the package, but skips the bodies of all
//! function-like declarations whose span does not contain the cursor.
//! Stripping removes bodies only, never signatures, so every type visible
//! from the cursor's scope resolves the same as it would under full
//! analysis.

use std::collections::{BTreeSet, HashMap};
use std::fs;

use tree_sitter::Node;

use crate::error::{EngineError, Result};
use crate::loader::{parse_go, Loader};
use crate::tree::{descendants_of_kinds, named_children, span_contains, text_of};

/// The resolved shape of a Go type, carrying exactly what the suggestors
/// need: error detection and zero-value rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRepr {
    /// The built-in `error` interface, not a user type that embeds it.
    Error,
    Bool,
    Numeric,
    Str,
    /// A type declared in the target's own package.
    Named(String),
    /// A type from another package, as `pkg.Name`.
    Qualified { pkg: String, name: String },
    Pointer,
    Slice,
    Map,
    Interface,
    /// Arrays keep their literal spelling for zero-value rendering.
    Array { literal: String },
    Chan,
    Func,
    Unknown,
}

/// One resolved record field: its name (embedded fields contribute their
/// type's base name) and the literal type spelling as written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: String,
    pub type_text: String,
}

#[derive(Debug, Clone, Default)]
struct FuncSig {
    results: Vec<TypeRepr>,
}

/// Type information for the compilation unit containing the target file.
///
/// Built once per invocation and only when a suggestor asks for it.
#[derive(Debug, Default)]
pub struct Semantics {
    package: String,
    /// Named non-struct types, mapped to their underlying shape.
    named: HashMap<String, TypeRepr>,
    /// Named struct types with their ordered, resolved field lists.
    records: HashMap<String, Vec<FieldInfo>>,
    funcs: HashMap<String, FuncSig>,
    methods: HashMap<(String, String), FuncSig>,
    /// Identifier bindings visible at the cursor: package-scope variables
    /// plus everything declared inside the cursor's function.
    locals: HashMap<String, TypeRepr>,
}

impl Semantics {
    /// The package the target file belongs to.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The resolved type bound to an identifier at the cursor's scope.
    pub fn local_type(&self, name: &str) -> Option<&TypeRepr> {
        self.locals.get(name)
    }

    /// Whether an identifier's resolved type is exactly the built-in error
    /// interface.
    pub fn is_error_local(&self, name: &str) -> bool {
        matches!(self.local_type(name), Some(TypeRepr::Error))
    }

    /// Whether a declared shape resolves to the built-in error interface,
    /// following named aliases to their underlying type.
    pub fn resolves_to_error(&self, repr: &TypeRepr) -> bool {
        let mut repr = repr;
        for _ in 0..32 {
            match repr {
                TypeRepr::Error => return true,
                TypeRepr::Named(name) => match self.named.get(name) {
                    Some(underlying) => repr = underlying,
                    None => return false,
                },
                _ => return false,
            }
        }
        false
    }

    /// The ordered field list of a record type declared in this package.
    pub fn record_fields(&self, type_name: &str) -> Option<&[FieldInfo]> {
        self.records.get(type_name).map(Vec::as_slice)
    }

    /// Render the zero-value expression for a type, as it would be written
    /// in the target package.
    pub fn zero_value(&self, repr: &TypeRepr) -> Result<String> {
        self.zero_value_inner(repr, 0)
    }

    fn zero_value_inner(&self, repr: &TypeRepr, depth: usize) -> Result<String> {
        if depth > 32 {
            return Err(EngineError::semantic_load(
                "named type aliases recurse too deeply",
            ));
        }

        match repr {
            TypeRepr::Bool => Ok("false".to_string()),
            TypeRepr::Numeric => Ok("0".to_string()),
            TypeRepr::Str => Ok(r#""""#.to_string()),
            TypeRepr::Error
            | TypeRepr::Pointer
            | TypeRepr::Slice
            | TypeRepr::Map
            | TypeRepr::Interface => Ok("nil".to_string()),
            TypeRepr::Array { literal } => Ok(format!("{literal}{{}}")),
            TypeRepr::Named(name) => {
                if self.records.contains_key(name) {
                    return Ok(format!("{name}{{}}"));
                }
                match self.named.get(name) {
                    Some(underlying) => self.zero_value_inner(underlying, depth + 1),
                    None => Err(EngineError::unsupported_shape(format!(
                        "no declaration found for named type {name}"
                    ))),
                }
            }
            // Types from other packages are rendered as empty literal
            // constructions; see DESIGN.md for the resolver's scope.
            TypeRepr::Qualified { pkg, name } => Ok(format!("{pkg}.{name}{{}}")),
            TypeRepr::Chan | TypeRepr::Func | TypeRepr::Unknown => Err(
                EngineError::unsupported_shape(format!("no zero value policy for {repr:?}")),
            ),
        }
    }

    fn bind(&mut self, name: &str, repr: TypeRepr, declares: bool) {
        if name == "_" {
            return;
        }
        if self.locals.contains_key(name) && (!declares || repr == TypeRepr::Unknown) {
            // Assignments never change a declared type, and a failed
            // inference never clobbers a known one.
            return;
        }
        self.locals.insert(name.to_string(), repr);
    }
}

struct LoadStats {
    files_parsed: usize,
    functions_seen: usize,
    functions_stripped: usize,
}

/// Load semantics for the package containing the loader's target file.
pub(crate) fn load(loader: &Loader) -> Result<Semantics> {
    let contents = loader.contents();
    let target_root = loader.target_tree()?.root_node();

    let package = package_name_of(target_root, &contents.text).ok_or_else(|| {
        EngineError::semantic_load("target file has no package clause")
    })?;

    let mut sem = Semantics {
        package: package.clone(),
        ..Semantics::default()
    };
    let mut stats = LoadStats {
        files_parsed: 1,
        functions_seen: 0,
        functions_stripped: 0,
    };
    let mut units = BTreeSet::new();
    units.insert(package.clone());

    // Pass one: declarations and signatures from every file in the unit. The
    // target file's tree is reused and its text comes from memory; only
    // siblings are read from disk.
    collect_file(&mut sem, target_root, &contents.text, &mut stats);

    let target_name = contents.abs_path.file_name();
    if let Some(dir) = contents.abs_path.parent() {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if !name.ends_with(".go")
                || name.ends_with("_test.go")
                || Some(entry.file_name().as_os_str()) == target_name
            {
                continue;
            }

            let text = fs::read_to_string(entry.path())?;
            let tree = parse_go(&text)?;
            stats.files_parsed += 1;

            let root = tree.root_node();
            match package_name_of(root, &text) {
                Some(pkg) if pkg == sem.package => {
                    units.insert(pkg);
                    collect_file(&mut sem, root, &text, &mut stats);
                }
                _ => {}
            }
        }
    }

    if units.len() != 1 {
        panic!("should be unreachable; exactly one package is selected per invocation");
    }

    // Pass two: walk the one function body containing the cursor, after every
    // signature in the unit is visible, so call results resolve no matter
    // which file declares the callee.
    let mut walked = 0usize;
    for decl in named_children(target_root) {
        if matches!(decl.kind(), "function_declaration" | "method_declaration")
            && span_contains(decl, loader.offset())
        {
            collect_function_scope(&mut sem, decl, &contents.text);
            walked += 1;
        }
    }
    stats.functions_stripped = stats.functions_seen - walked;

    tracing::debug!(
        files_parsed = stats.files_parsed,
        functions_seen = stats.functions_seen,
        functions_stripped = stats.functions_stripped,
        "package load stats"
    );

    Ok(sem)
}

fn package_name_of(root: Node, src: &str) -> Option<String> {
    let clause = named_children(root)
        .into_iter()
        .find(|n| n.kind() == "package_clause")?;
    let ident = named_children(clause)
        .into_iter()
        .find(|n| n.kind() == "package_identifier")?;
    Some(text_of(ident, src).to_string())
}

/// Collect declarations and signatures from one file. No function body is
/// walked here; that happens in a later pass, only for the function
/// containing the cursor, once every signature in the unit is recorded.
fn collect_file(sem: &mut Semantics, root: Node, src: &str, stats: &mut LoadStats) {
    for decl in named_children(root) {
        match decl.kind() {
            "function_declaration" => {
                stats.functions_seen += 1;
                if let Some(name) = decl.child_by_field_name("name") {
                    sem.funcs
                        .insert(text_of(name, src).to_string(), signature_of(decl, src));
                }
            }
            "method_declaration" => {
                stats.functions_seen += 1;
                let recv = decl
                    .child_by_field_name("receiver")
                    .and_then(|r| receiver_base_name(r, src));
                if let (Some(recv), Some(name)) = (recv, decl.child_by_field_name("name")) {
                    sem.methods.insert(
                        (recv, text_of(name, src).to_string()),
                        signature_of(decl, src),
                    );
                }
            }
            "type_declaration" => {
                for spec in descendants_of_kinds(decl, &["type_spec", "type_alias"]) {
                    collect_type_spec(sem, spec, src);
                }
            }
            "var_declaration" | "const_declaration" => {
                for spec in descendants_of_kinds(decl, &["var_spec", "const_spec"]) {
                    collect_value_spec(sem, spec, src);
                }
            }
            _ => {}
        }
    }
}

fn collect_type_spec(sem: &mut Semantics, spec: Node, src: &str) {
    let (Some(name), Some(ty)) = (
        spec.child_by_field_name("name"),
        spec.child_by_field_name("type"),
    ) else {
        return;
    };
    let name = text_of(name, src).to_string();

    if ty.kind() == "struct_type" {
        sem.records.insert(name, struct_fields(ty, src));
    } else {
        sem.named.insert(name, resolve_type_expr(ty, src));
    }
}

/// Resolve a struct type's ordered field list. Anonymous (embedded) fields
/// get the base name of their type, which the syntax alone does not spell
/// out as a field name.
fn struct_fields(struct_type: Node, src: &str) -> Vec<FieldInfo> {
    let mut fields = Vec::new();
    let Some(list) = named_children(struct_type)
        .into_iter()
        .find(|n| n.kind() == "field_declaration_list")
    else {
        return fields;
    };

    for field in named_children(list) {
        if field.kind() != "field_declaration" {
            continue;
        }
        let Some(ty) = field.child_by_field_name("type") else {
            continue;
        };

        let mut cursor = field.walk();
        let names: Vec<Node> = field.children_by_field_name("name", &mut cursor).collect();
        if names.is_empty() {
            // An embedded pointer's `*` sits outside the type field node, so
            // the spelling starts at the field; it still ends at the type so
            // a struct tag never leaks in.
            let type_text = src[field.start_byte()..ty.end_byte()].to_string();
            let name = base_type_name(ty, src).unwrap_or_else(|| type_text.clone());
            fields.push(FieldInfo { name, type_text });
        } else {
            let type_text = text_of(ty, src).to_string();
            for name in names {
                fields.push(FieldInfo {
                    name: text_of(name, src).to_string(),
                    type_text: type_text.clone(),
                });
            }
        }
    }

    fields
}

/// Package-scope `var`/`const` specs with an explicit type become bindings
/// visible from any function.
fn collect_value_spec(sem: &mut Semantics, spec: Node, src: &str) {
    let ty = spec.child_by_field_name("type");
    let mut cursor = spec.walk();
    let names: Vec<Node> = spec.children_by_field_name("name", &mut cursor).collect();

    if let Some(ty) = ty {
        let repr = resolve_type_expr(ty, src);
        for name in names {
            sem.bind(text_of(name, src), repr.clone(), true);
        }
    }
}

/// Record every binding inside the one function-like declaration that keeps
/// its body: parameters, named results, receiver, and statement-level
/// declarations, recursing into nested blocks and function literals.
fn collect_function_scope(sem: &mut Semantics, func: Node, src: &str) {
    for field in ["receiver", "parameters", "result"] {
        if let Some(list) = func.child_by_field_name(field) {
            bind_parameter_list(sem, list, src);
        }
    }
    if let Some(body) = func.child_by_field_name("body") {
        walk_bindings(sem, body, src);
    }
}

fn bind_parameter_list(sem: &mut Semantics, list: Node, src: &str) {
    if list.kind() != "parameter_list" {
        return;
    }
    for param in named_children(list) {
        let Some(ty) = param.child_by_field_name("type") else {
            continue;
        };
        let repr = match param.kind() {
            "variadic_parameter_declaration" => TypeRepr::Slice,
            _ => resolve_type_expr(ty, src),
        };
        let mut cursor = param.walk();
        for name in param.children_by_field_name("name", &mut cursor) {
            sem.bind(text_of(name, src), repr.clone(), true);
        }
    }
}

fn walk_bindings(sem: &mut Semantics, node: Node, src: &str) {
    match node.kind() {
        "var_declaration" | "const_declaration" => {
            for spec in descendants_of_kinds(node, &["var_spec", "const_spec"]) {
                bind_spec(sem, spec, src);
            }
        }
        "short_var_declaration" => bind_assignment(sem, node, src, true),
        "assignment_statement" => bind_assignment(sem, node, src, false),
        "func_literal" => {
            for field in ["parameters", "result"] {
                if let Some(list) = node.child_by_field_name(field) {
                    bind_parameter_list(sem, list, src);
                }
            }
        }
        _ => {}
    }

    for child in named_children(node) {
        walk_bindings(sem, child, src);
    }
}

fn bind_spec(sem: &mut Semantics, spec: Node, src: &str) {
    let mut cursor = spec.walk();
    let names: Vec<Node> = spec.children_by_field_name("name", &mut cursor).collect();

    if let Some(ty) = spec.child_by_field_name("type") {
        let repr = resolve_type_expr(ty, src);
        for name in names {
            sem.bind(text_of(name, src), repr.clone(), true);
        }
    } else if let Some(values) = spec.child_by_field_name("value") {
        let exprs = named_children(values);
        bind_positional(sem, &names, &exprs, src, true);
    }
}

fn bind_assignment(sem: &mut Semantics, stmt: Node, src: &str, declares: bool) {
    let (Some(left), Some(right)) = (
        stmt.child_by_field_name("left"),
        stmt.child_by_field_name("right"),
    ) else {
        return;
    };
    let lefts = named_children(left);
    let rights = named_children(right);
    bind_positional(sem, &lefts, &rights, src, declares);
}

/// Distribute right-hand-side types onto left-hand identifiers, either 1:1
/// or from the result list of a single multi-value call.
fn bind_positional(sem: &mut Semantics, lefts: &[Node], rights: &[Node], src: &str, declares: bool) {
    if rights.len() == 1 && lefts.len() > 1 {
        let results = infer_call_results(sem, rights[0], src).unwrap_or_default();
        for (i, lhs) in lefts.iter().enumerate() {
            if lhs.kind() == "identifier" {
                let repr = results.get(i).cloned().unwrap_or(TypeRepr::Unknown);
                sem.bind(text_of(*lhs, src), repr, declares);
            }
        }
        return;
    }

    for (lhs, rhs) in lefts.iter().zip(rights.iter()) {
        if lhs.kind() == "identifier" {
            let repr = infer_expr_type(sem, *rhs, src);
            sem.bind(text_of(*lhs, src), repr, declares);
        }
    }
}

fn infer_expr_type(sem: &Semantics, expr: Node, src: &str) -> TypeRepr {
    match expr.kind() {
        "int_literal" | "float_literal" | "imaginary_literal" | "rune_literal" => TypeRepr::Numeric,
        "interpreted_string_literal" | "raw_string_literal" => TypeRepr::Str,
        "true" | "false" => TypeRepr::Bool,
        "composite_literal" => expr
            .child_by_field_name("type")
            .map(|ty| resolve_type_expr(ty, src))
            .unwrap_or(TypeRepr::Unknown),
        "unary_expression" => {
            let op = expr
                .child_by_field_name("operator")
                .map(|o| text_of(o, src))
                .unwrap_or_default();
            match op {
                "&" => TypeRepr::Pointer,
                "!" => TypeRepr::Bool,
                _ => TypeRepr::Unknown,
            }
        }
        "func_literal" => TypeRepr::Func,
        "identifier" => sem
            .local_type(text_of(expr, src))
            .cloned()
            .unwrap_or(TypeRepr::Unknown),
        "call_expression" => match infer_call_results(sem, expr, src) {
            Some(results) if results.len() == 1 => results[0].clone(),
            _ => TypeRepr::Unknown,
        },
        "parenthesized_expression" => named_children(expr)
            .first()
            .map(|inner| infer_expr_type(sem, *inner, src))
            .unwrap_or(TypeRepr::Unknown),
        _ => TypeRepr::Unknown,
    }
}

/// Result types of a call, when the callee is resolvable: an in-package
/// function, a method on a local of known named type, a conversion to a
/// basic type, or one of the universe error constructors.
fn infer_call_results(sem: &Semantics, call: Node, src: &str) -> Option<Vec<TypeRepr>> {
    if call.kind() != "call_expression" {
        return None;
    }
    let callee = call.child_by_field_name("function")?;

    match callee.kind() {
        "identifier" | "type_identifier" => {
            let name = text_of(callee, src);
            match classify_type_name(name) {
                TypeRepr::Named(_) => sem.funcs.get(name).map(|sig| sig.results.clone()),
                basic => Some(vec![basic]),
            }
        }
        "selector_expression" => {
            let operand = callee.child_by_field_name("operand")?;
            let member = callee.child_by_field_name("field")?;
            if operand.kind() != "identifier" {
                return None;
            }
            let operand = text_of(operand, src);
            let member = text_of(member, src);

            if matches!((operand, member), ("errors", "New") | ("fmt", "Errorf")) {
                return Some(vec![TypeRepr::Error]);
            }

            match sem.local_type(operand) {
                Some(TypeRepr::Named(type_name)) => sem
                    .methods
                    .get(&(type_name.clone(), member.to_string()))
                    .map(|sig| sig.results.clone()),
                _ => None,
            }
        }
        _ => None,
    }
}

fn signature_of(func: Node, src: &str) -> FuncSig {
    FuncSig {
        results: result_types(func, src),
    }
}

/// The declared result types of a function-like node, in order, expanding
/// grouped named results.
pub(crate) fn result_types(func: Node, src: &str) -> Vec<TypeRepr> {
    let Some(result) = func.child_by_field_name("result") else {
        return Vec::new();
    };

    if result.kind() != "parameter_list" {
        return vec![resolve_type_expr(result, src)];
    }

    let mut results = Vec::new();
    for param in named_children(result) {
        let Some(ty) = param.child_by_field_name("type") else {
            continue;
        };
        let repr = resolve_type_expr(ty, src);
        let mut cursor = param.walk();
        let name_count = param.children_by_field_name("name", &mut cursor).count();
        for _ in 0..name_count.max(1) {
            results.push(repr.clone());
        }
    }
    results
}

/// Map a type expression node to its resolved shape.
pub(crate) fn resolve_type_expr(node: Node, src: &str) -> TypeRepr {
    match node.kind() {
        "type_identifier" | "identifier" => classify_type_name(text_of(node, src)),
        "qualified_type" => {
            let pkg = node
                .child_by_field_name("package")
                .map(|n| text_of(n, src).to_string());
            let name = node
                .child_by_field_name("name")
                .map(|n| text_of(n, src).to_string());
            match (pkg, name) {
                (Some(pkg), Some(name)) => TypeRepr::Qualified { pkg, name },
                _ => TypeRepr::Unknown,
            }
        }
        "pointer_type" => TypeRepr::Pointer,
        "slice_type" => TypeRepr::Slice,
        "map_type" => TypeRepr::Map,
        "interface_type" => TypeRepr::Interface,
        "array_type" => TypeRepr::Array {
            literal: text_of(node, src).to_string(),
        },
        "channel_type" => TypeRepr::Chan,
        "function_type" => TypeRepr::Func,
        "parenthesized_type" => named_children(node)
            .first()
            .map(|inner| resolve_type_expr(*inner, src))
            .unwrap_or(TypeRepr::Unknown),
        _ => TypeRepr::Unknown,
    }
}

fn classify_type_name(name: &str) -> TypeRepr {
    match name {
        "error" => TypeRepr::Error,
        "bool" => TypeRepr::Bool,
        "string" => TypeRepr::Str,
        "int" | "int8" | "int16" | "int32" | "int64" | "uint" | "uint8" | "uint16" | "uint32"
        | "uint64" | "uintptr" | "byte" | "rune" | "float32" | "float64" | "complex64"
        | "complex128" => TypeRepr::Numeric,
        "any" => TypeRepr::Interface,
        other => TypeRepr::Named(other.to_string()),
    }
}

/// The identifier a type contributes when embedded as an anonymous field:
/// the base name with pointers, parens, qualifiers, and type arguments
/// stripped.
fn base_type_name(node: Node, src: &str) -> Option<String> {
    match node.kind() {
        "type_identifier" => Some(text_of(node, src).to_string()),
        "pointer_type" | "parenthesized_type" => named_children(node)
            .first()
            .and_then(|inner| base_type_name(*inner, src)),
        "qualified_type" => node
            .child_by_field_name("name")
            .map(|n| text_of(n, src).to_string()),
        "generic_type" => node
            .child_by_field_name("type")
            .and_then(|inner| base_type_name(inner, src)),
        _ => None,
    }
}

fn receiver_base_name(receiver: Node, src: &str) -> Option<String> {
    let param = named_children(receiver)
        .into_iter()
        .find(|n| n.kind() == "parameter_declaration")?;
    base_type_name(param.child_by_field_name("type")?, src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{Contents, Loader};
    use pretty_assertions::assert_eq;

    fn load_at(dir: &tempfile::TempDir, file: &str, src: &str, offset: usize) -> Semantics {
        let path = dir.path().join(file);
        std::fs::write(&path, src).unwrap();
        let loader = Loader::new(Contents::new(path, src), offset);
        super::load(&loader).unwrap()
    }

    #[test]
    fn test_error_binding_from_package_function() {
        let dir = tempfile::tempdir().unwrap();
        let src = "package foo

func fallible() (int, error) {
	return 0, nil
}

func caller() {
	n, err := fallible()
	_ = n
	_ = err
}
";
        let sem = load_at(&dir, "main.go", src, src.find("err :=").unwrap());

        assert!(sem.is_error_local("err"));
        assert_eq!(sem.local_type("n"), Some(&TypeRepr::Numeric));
        assert_eq!(sem.package(), "foo");
    }

    #[test]
    fn test_var_declaration_binding() {
        let dir = tempfile::tempdir().unwrap();
        let src = "package foo

func caller() {
	var err error
	err = doThing()
	_ = err
}
";
        let sem = load_at(&dir, "main.go", src, src.find("err =").unwrap());

        // doThing is unresolvable, but an assignment never changes the
        // declared type.
        assert!(sem.is_error_local("err"));
    }

    #[test]
    fn test_errors_new_is_universe_known() {
        let dir = tempfile::tempdir().unwrap();
        let src = "package foo

func caller() {
	err := errors.New(\"boom\")
	_ = err
}
";
        let sem = load_at(&dir, "main.go", src, src.find("err").unwrap());
        assert!(sem.is_error_local("err"));
    }

    #[test]
    fn test_signatures_come_from_sibling_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("other.go"),
            "package foo

func helper() (string, error) {
	return \"\", nil
}
",
        )
        .unwrap();

        let src = "package foo

func caller() {
	s, err := helper()
	_, _ = s, err
}
";
        let sem = load_at(&dir, "main.go", src, src.find("err").unwrap());

        assert!(sem.is_error_local("err"));
        assert_eq!(sem.local_type("s"), Some(&TypeRepr::Str));
    }

    #[test]
    fn test_sibling_with_other_package_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("other.go"),
            "package bar\n\nfunc helper() error { return nil }\n",
        )
        .unwrap();

        let src = "package foo

func caller() {
	err := helper()
	_ = err
}
";
        let sem = load_at(&dir, "main.go", src, src.find("err").unwrap());
        assert!(!sem.is_error_local("err"));
    }

    #[test]
    fn test_record_fields_resolve_embedded_names() {
        let dir = tempfile::tempdir().unwrap();
        let src = "package foo

type Inner struct{}

type Outer struct {
	Inner `json:\"inner\"`
	*Other
	pkg.Thing
	Count int
}
";
        let sem = load_at(&dir, "main.go", src, 0);

        let fields = sem.record_fields("Outer").unwrap();
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Inner", "Other", "Thing", "Count"]);
        // The tag is not part of the type spelling.
        assert_eq!(fields[0].type_text, "Inner");
        assert_eq!(fields[1].type_text, "*Other");
        assert_eq!(fields[2].type_text, "pkg.Thing");
    }

    #[test]
    fn test_zero_values() {
        let dir = tempfile::tempdir().unwrap();
        let src = "package foo

type Record struct{}

type Count int

type Alias Count

func caller() {
	x := 1
	_ = x
}
";
        let sem = load_at(&dir, "main.go", src, src.find("x :=").unwrap());

        let cases = [
            (TypeRepr::Bool, "false"),
            (TypeRepr::Numeric, "0"),
            (TypeRepr::Str, r#""""#),
            (TypeRepr::Error, "nil"),
            (TypeRepr::Pointer, "nil"),
            (TypeRepr::Slice, "nil"),
            (TypeRepr::Map, "nil"),
            (TypeRepr::Interface, "nil"),
            (
                TypeRepr::Array {
                    literal: "[3]int".to_string(),
                },
                "[3]int{}",
            ),
            (TypeRepr::Named("Record".to_string()), "Record{}"),
            (TypeRepr::Named("Count".to_string()), "0"),
            // Defined-type aliases recurse to their underlying shape.
            (TypeRepr::Named("Alias".to_string()), "0"),
            (
                TypeRepr::Qualified {
                    pkg: "bytes".to_string(),
                    name: "Buffer".to_string(),
                },
                "bytes.Buffer{}",
            ),
        ];
        for (repr, expected) in cases {
            assert_eq!(sem.zero_value(&repr).unwrap(), expected, "{repr:?}");
        }

        assert!(sem.zero_value(&TypeRepr::Chan).is_err());
        assert!(sem.zero_value(&TypeRepr::Func).is_err());
        assert!(sem.zero_value(&TypeRepr::Unknown).is_err());
    }

    #[test]
    fn test_method_results_resolve_through_local_binding() {
        let dir = tempfile::tempdir().unwrap();
        let src = "package foo

type Client struct{}

func (c Client) Do() (int, error) {
	return 0, nil
}

func newClient() Client {
	return Client{}
}

func caller() {
	c := newClient()
	n, err := c.Do()
	_, _ = n, err
}
";
        let sem = load_at(&dir, "main.go", src, src.find("n, err").unwrap());

        assert!(sem.is_error_local("err"));
        assert_eq!(sem.local_type("n"), Some(&TypeRepr::Numeric));
        assert_eq!(sem.local_type("c"), Some(&TypeRepr::Named("Client".to_string())));
    }

    #[test]
    fn test_missing_package_clause_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.go");
        std::fs::write(&path, "func nope() {}\n").unwrap();
        let loader = Loader::new(Contents::new(path, "func nope() {}\n"), 0);
        assert!(super::load(&loader).is_err());
    }
}
