use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can abort a suggestion run
#[derive(Error, Debug)]
pub enum EngineError {
    /// Source text could not be parsed into a syntax tree at all
    #[error("parse error: {0}")]
    ParseError(String),

    /// Loading type information for the enclosing package failed
    #[error("semantic load error: {0}")]
    SemanticLoadError(String),

    /// A suggestor recognized the general shape but has no policy for a
    /// sub-case
    #[error("unsupported shape: {0}")]
    UnsupportedShape(String),

    /// IO error occurred while reading sibling package files
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

impl EngineError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a semantic load error
    pub fn semantic_load(msg: impl Into<String>) -> Self {
        Self::SemanticLoadError(msg.into())
    }

    /// Create an unsupported shape error
    pub fn unsupported_shape(msg: impl Into<String>) -> Self {
        Self::UnsupportedShape(msg.into())
    }
}
