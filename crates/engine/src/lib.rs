//! # gosuggest engine
//!
//! Cursor-position-driven code transforms for Go source files: point the
//! engine at a byte offset in a file and it answers with a single textual
//! replacement, or with nothing when no transform applies.
//!
//! ## Architecture
//!
//! ```text
//! file text + byte offset
//!     │
//!     ├──> Syntax Loader (tree-sitter parse, once per invocation)
//!     │    └─> enclosing-node path, root → innermost
//!     │
//!     ├──> Selective Semantic Analyzer (lazy, once per invocation)
//!     │    └─> package symbols; bodies of functions away from the
//!     │        cursor are skipped, signatures always kept
//!     │
//!     └──> Suggestor pipeline, fixed priority order
//!          ├─> Constructor   (record declaration → builder function)
//!          ├─> IfErr         (error assignment → guard block)
//!          └─> SelectorChain (call chain → one line per member)
//!               │
//!               └──> Replacement { range, lines } — first non-empty wins
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use gosuggest_engine::{generate_replacement, Contents};
//!
//! let src = "package foo\n\ntype Point struct {\n\tX int\n\tY int\n}\n";
//! let offset = src.find("Point").unwrap();
//!
//! let replacement =
//!     generate_replacement(Contents::new("/abs/path/point.go", src), offset).unwrap();
//! for line in &replacement.lines {
//!     println!("{line}");
//! }
//! ```

mod chain;
mod constructor;
mod error;
mod iferr;
mod line_writer;
mod loader;
mod pipeline;
mod semantics;
mod tree;
mod types;

pub use chain::SelectorChain;
pub use constructor::Constructor;
pub use error::{EngineError, Result};
pub use iferr::IfErr;
pub use line_writer::LineWriter;
pub use loader::{Contents, FileView, Loader};
pub use pipeline::{generate_replacement, Suggestor};
pub use semantics::{FieldInfo, Semantics, TypeRepr};
pub use types::{offset_at, position_at, Position, Range, Replacement};
