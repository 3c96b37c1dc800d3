//! Error types for the retrieval engine

use thiserror::Error;

/// Result type alias for retrieval operations
pub type Result<T> = std::result::Result<T, RagError>;

/// Error types that can occur while building or querying an index
#[derive(Error, Debug)]
pub enum RagError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Index has not been built or holds no vectors")]
    NotBuilt,

    #[error("Cannot build a non-empty index from zero vectors")]
    EmptyInput,

    #[error("k must be at least 1")]
    InvalidK,

    #[error("Unit not found: {unit_id}")]
    UnitNotFound { unit_id: usize },

    #[error("Embedder fault: {0}")]
    EmbedderFault(String),

    #[error("Corpus unavailable ({source_id}): {reason}")]
    CorpusUnavailable { source_id: String, reason: String },

    #[error("Invalid vector: {reason}")]
    InvalidVector { reason: String },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
