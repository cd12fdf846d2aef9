use std::path::PathBuf;

use once_cell::sync::OnceCell;
use tree_sitter::{Node, Parser, Tree};

use crate::error::{EngineError, Result};
use crate::semantics::{self, Semantics};

/// Raw file input for one invocation.
///
/// The path is only a semantic-analysis scope key; the text may be an
/// unsaved editor buffer that differs from what is on disk.
#[derive(Debug, Clone)]
pub struct Contents {
    pub abs_path: PathBuf,
    pub text: String,
}

impl Contents {
    pub fn new(abs_path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            abs_path: abs_path.into(),
            text: text.into(),
        }
    }

    /// The source text between two byte offsets. Swapped bounds are
    /// reordered, out-of-range bounds clamp to the end of the text, and
    /// bounds inside a multi-byte character back up to the previous
    /// character boundary.
    pub fn text_in_range(&self, start: usize, stop: usize) -> &str {
        let (start, stop) = if start > stop {
            (stop, start)
        } else {
            (start, stop)
        };

        let mut start = start.min(self.text.len());
        let mut stop = stop.min(self.text.len());
        while !self.text.is_char_boundary(start) {
            start -= 1;
        }
        while !self.text.is_char_boundary(stop) {
            stop -= 1;
        }

        &self.text[start..stop]
    }

    /// The verbatim source text of a syntax node.
    pub fn node_text(&self, node: Node) -> &str {
        self.text_in_range(node.start_byte(), node.end_byte())
    }
}

/// Parsed state shared by all suggestors within one invocation.
///
/// Both the syntax parse and the semantic load run at most once no matter
/// how many suggestors ask for them; the cells are thread-safe so redundant
/// concurrent requests never redo work.
pub struct Loader {
    contents: Contents,
    offset: usize,
    file_state: OnceCell<FileState>,
    semantics: OnceCell<Semantics>,
}

/// Memoized parse result: the tree plus the named-child index steps that
/// lead from the root to the innermost node containing the cursor.
struct FileState {
    tree: Tree,
    steps: Option<Vec<usize>>,
}

/// A view of the parsed target file.
pub struct FileView<'a> {
    /// Enclosing nodes from the file root down to the most specific node
    /// whose span contains the cursor. Empty when the cursor is outside the
    /// file's span.
    pub path: Vec<Node<'a>>,
    /// The cursor byte offset.
    pub offset: usize,
}

impl<'a> FileView<'a> {
    /// The most specific node containing the cursor.
    pub fn innermost(&self) -> Option<Node<'a>> {
        self.path.last().copied()
    }

    /// Number of lexical block scopes enclosing the cursor; this is the tab
    /// depth suggestors indent generated statements to.
    pub fn indent_level(&self) -> usize {
        self.path.iter().filter(|n| n.kind() == "block").count()
    }
}

impl Loader {
    pub fn new(contents: Contents, offset: usize) -> Self {
        Self {
            contents,
            offset,
            file_state: OnceCell::new(),
            semantics: OnceCell::new(),
        }
    }

    pub fn contents(&self) -> &Contents {
        &self.contents
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    fn state(&self) -> Result<&FileState> {
        self.file_state.get_or_try_init(|| {
            let tree = parse_go(&self.contents.text)?;
            let steps = resolve_steps(tree.root_node(), self.offset);
            Ok::<_, EngineError>(FileState { tree, steps })
        })
    }

    /// The memoized parse of the target file, reused by the semantic load so
    /// the target is never parsed twice.
    pub(crate) fn target_tree(&self) -> Result<&Tree> {
        Ok(&self.state()?.tree)
    }

    /// Parse the target file and resolve the cursor's enclosing path.
    ///
    /// The parse and the path search are a single memoized computation; the
    /// returned view just rematerializes nodes from the cached index steps.
    pub fn file(&self) -> Result<FileView<'_>> {
        let state = self.state()?;

        let mut path = Vec::new();
        if let Some(steps) = &state.steps {
            let mut node = state.tree.root_node();
            path.push(node);
            for &idx in steps {
                match node.named_child(idx) {
                    Some(child) => {
                        node = child;
                        path.push(node);
                    }
                    None => break,
                }
            }
        }

        Ok(FileView {
            path,
            offset: self.offset,
        })
    }

    /// Load type information for the package containing the target file.
    ///
    /// Lazy and memoized: only suggestors that need type information pay for
    /// it, and only the first of them pays at all.
    pub fn semantics(&self) -> Result<&Semantics> {
        self.semantics.get_or_try_init(|| semantics::load(self))
    }
}

/// Parse Go source text into a syntax tree. The parse is error-tolerant;
/// a tree with error nodes is still usable.
pub(crate) fn parse_go(text: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| EngineError::parse(format!("failed to load Go grammar: {e}")))?;

    parser
        .parse(text, None)
        .ok_or_else(|| EngineError::parse("tree-sitter produced no syntax tree"))
}

/// Top-down descent collecting the named-child index at each level of the
/// node whose span contains `offset`. Returns `None` when the offset lies
/// outside the file's span entirely.
fn resolve_steps(root: Node, offset: usize) -> Option<Vec<usize>> {
    if offset > root.end_byte() {
        return None;
    }

    let mut steps = Vec::new();
    let mut node = root;
    loop {
        match child_containing(node, offset) {
            Some((idx, child)) => {
                steps.push(idx);
                node = child;
            }
            None => return Some(steps),
        }
    }
}

/// Find the named child whose span contains `offset`. Children strictly
/// containing the offset win over children merely touching it at their end
/// boundary, so a cursor sitting right after an identifier still resolves
/// into that identifier when nothing else claims the position.
fn child_containing(node: Node, offset: usize) -> Option<(usize, Node)> {
    let mut touching = None;
    for idx in 0..node.named_child_count() {
        let Some(child) = node.named_child(idx) else {
            continue;
        };
        if child.start_byte() <= offset && offset < child.end_byte() {
            return Some((idx, child));
        }
        if touching.is_none() && child.start_byte() <= offset && offset <= child.end_byte() {
            touching = Some((idx, child));
        }
    }
    touching
}
