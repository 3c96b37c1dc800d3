//! # knowledge_rag
//!
//! A small retrieval engine for curated knowledge files.
//!
//! This library provides:
//! - Paragraph chunking of a text corpus
//! - An embedder boundary with a deterministic built-in implementation
//! - An exact brute-force vector index (squared Euclidean by default)
//! - A retrieval engine that never fails a query: with no knowledge it answers
//!   with a fixed sentinel
//! - A name-keyed capability table for agent tool calls
//!
//! ## Example
//!
//! ```rust
//! use knowledge_rag::{HashingEmbedder, RetrievalEngine};
//!
//! let embedder = HashingEmbedder::default();
//! let engine = RetrievalEngine::build_from_corpus(
//!     "Paris is the capital of France.\n\nThe Eiffel Tower is in Paris.",
//!     &embedder,
//! );
//!
//! let answer = engine.search("What is the capital of France?", 1, &embedder);
//! assert_eq!(answer, "Paris is the capital of France.");
//! ```

pub mod chunker;
pub mod config;
pub mod corpus;
pub mod distance;
pub mod embedder;
pub mod engine;
pub mod error;
pub mod flat_index;
pub mod index;
pub mod logging;
pub mod metrics;
pub mod tools;
pub mod vector;

pub use chunker::{chunk, TextUnit};
pub use config::RagConfig;
pub use corpus::CorpusSource;
pub use distance::DistanceMetric;
pub use embedder::{Embedder, HashingEmbedder};
pub use engine::{
    BuildReport, EmptyReason, Hit, RetrievalEngine, DEFAULT_TOP_K, NO_KNOWLEDGE_SENTINEL,
};
pub use error::{RagError, Result};
pub use flat_index::FlatIndex;
pub use index::{Index, SearchResult};
pub use metrics::MetricsCollector;
pub use tools::{knowledge_tools, ToolTable};
pub use vector::Vector;
