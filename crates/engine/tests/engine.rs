//! End-to-end tests of the suggestion pipeline through the public API.

use gosuggest_engine::{generate_replacement, Contents, Replacement};
use pretty_assertions::assert_eq;

fn run(src: &str, offset: usize) -> Replacement {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.go");
    std::fs::write(&path, src).unwrap();
    generate_replacement(Contents::new(path, src), offset).unwrap()
}

#[test]
fn constructor_applies_on_type_declaration() {
    let src = "package foo

type Exported struct {
	A string
}
";
    let repl = run(src, src.find("Exported").unwrap());

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
}

#[test]
fn error_guard_applies_on_error_assignment() {
    let src = "package foo

func fallible() (int, error) {
	return 0, nil
}

func caller() (int, error) {
	n, err := fallible()
	return n, err
}
";
    let repl = run(src, src.find("err :=").unwrap());

    assert_eq!(
        repl.lines,
        vec![
            "n, err := fallible()",
            "\tif err != nil {",
            "\t\treturn 0, err",
            "\t}",
        ]
    );
}

#[test]
fn chain_reformat_applies_inside_call_chain() {
    let src = "package foo

func caller() {
	svc.Fetch().Filter(x).Collect()
}
";
    let repl = run(src, src.find("Filter").unwrap());

    assert_eq!(
        repl.lines,
        vec!["svc.", "\t\tFetch().", "\t\tFilter(x).", "\t\tCollect()"]
    );
}

#[test]
fn priority_prefers_error_guard_over_chain() {
    // The cursor sits inside a call chain whose assignment binds an error;
    // the guard outranks the reformat.
    let src = "package foo

type Client struct{}

func (c Client) Do() error {
	return nil
}

func newClient() Client {
	return Client{}
}

func caller() error {
	c := newClient()
	err := c.Do()
	return err
}
";
    let repl = run(src, src.find("c.Do()").unwrap() + 2);

    assert_eq!(
        repl.lines,
        vec![
            "err := c.Do()",
            "\tif err != nil {",
            "\t\treturn err",
            "\t}",
        ]
    );
}

#[test]
fn nothing_applies_is_a_clean_empty_replacement() {
    let src = "package foo

func caller() {
	x := 5
	_ = x
}
";
    let repl = run(src, src.find('5').unwrap());

    assert!(repl.is_empty());
    assert_eq!(repl, Replacement::default());
}

#[test]
fn offset_past_end_of_file_is_clean_no_edit() {
    let src = "package foo\n";
    let repl = run(src, src.len() + 100);
    assert!(repl.is_empty());
}

#[test]
fn replacement_serializes_to_the_wire_protocol() {
    let src = "package foo

type Empty struct{}
";
    let repl = run(src, src.find("Empty").unwrap());

    let json = serde_json::to_string(&repl).unwrap();
    assert!(json.starts_with(r#"{"rng":{"start":{"ln":3,"col":1}"#));
    assert!(json.contains(r#""lns":["#));
}
