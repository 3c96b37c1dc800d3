//! Retrieval engine: corpus → units → embeddings → index, and back to text
//!
//! Building never fails. A missing corpus, an embedder fault or inconsistent
//! vectors leave the engine in its degenerate-empty state, which answers every
//! query with [`NO_KNOWLEDGE_SENTINEL`]. The reason is kept in a
//! [`BuildReport`] and logged for the operator.

use std::fmt;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::chunker::{chunk, TextUnit};
use crate::corpus::CorpusSource;
use crate::distance::DistanceMetric;
use crate::embedder::Embedder;
use crate::error::{RagError, Result};
use crate::flat_index::FlatIndex;
use crate::index::Index;

/// Answer returned when there is nothing to search.
pub const NO_KNOWLEDGE_SENTINEL: &str = "No knowledge base available.";

/// Number of units returned when the caller does not ask for a specific k.
pub const DEFAULT_TOP_K: usize = 3;

/// Why an engine ended up with no searchable units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    /// The corpus held no non-blank paragraph.
    NoUnits,
    CorpusUnavailable { source_id: String, reason: String },
    EmbedderFault(String),
    /// The index backend rejected the vectors for a reason other than width.
    IndexBuild(String),
    /// The embedder returned a different number of vectors than units.
    VectorCountMismatch { units: usize, vectors: usize },
    DimensionMismatch { expected: usize, actual: usize },
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyReason::NoUnits => write!(f, "corpus contains no paragraphs"),
            EmptyReason::CorpusUnavailable { source_id, reason } => {
                write!(f, "corpus {} unavailable: {}", source_id, reason)
            }
            EmptyReason::EmbedderFault(reason) => write!(f, "embedder fault: {}", reason),
            EmptyReason::IndexBuild(reason) => write!(f, "index build failed: {}", reason),
            EmptyReason::VectorCountMismatch { units, vectors } => write!(
                f,
                "embedder returned {} vectors for {} units",
                vectors, units
            ),
            EmptyReason::DimensionMismatch { expected, actual } => write!(
                f,
                "embedding dimension mismatch: expected {}, got {}",
                expected, actual
            ),
        }
    }
}

impl From<RagError> for EmptyReason {
    fn from(err: RagError) -> Self {
        match err {
            RagError::CorpusUnavailable { source_id, reason } => {
                EmptyReason::CorpusUnavailable { source_id, reason }
            }
            RagError::DimensionMismatch { expected, actual } => {
                EmptyReason::DimensionMismatch { expected, actual }
            }
            RagError::EmptyInput | RagError::NotBuilt => EmptyReason::NoUnits,
            RagError::EmbedderFault(reason) => EmptyReason::EmbedderFault(reason),
            other => EmptyReason::IndexBuild(other.to_string()),
        }
    }
}

/// Outcome of building an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildReport {
    Ready { units: usize, dimension: usize },
    Empty(EmptyReason),
}

impl BuildReport {
    pub fn is_ready(&self) -> bool {
        matches!(self, BuildReport::Ready { .. })
    }
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildReport::Ready { units, dimension } => {
                write!(f, "ready: {} units (dimension {})", units, dimension)
            }
            BuildReport::Empty(reason) => write!(f, "empty: {}", reason),
        }
    }
}

/// A ranked unit with its content and distance to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hit {
    pub unit_id: usize,
    pub content: String,
    pub distance: f32,
}

/// An immutable, built retrieval engine.
///
/// Unit ids are positions in `units` and in the index; the two are built
/// together and never change afterwards.
#[derive(Debug)]
pub struct RetrievalEngine<I: Index = FlatIndex> {
    units: Vec<TextUnit>,
    index: Option<I>,
    report: BuildReport,
}

impl RetrievalEngine<FlatIndex> {
    /// Build from raw corpus text with a flat squared-Euclidean index.
    pub fn build_from_corpus<E: Embedder + ?Sized>(raw: &str, embedder: &E) -> Self {
        Self::build_with_metric(DistanceMetric::default(), raw, embedder)
    }

    /// Load the corpus from `source`, then build as [`Self::build_from_corpus`].
    pub fn build_from_source<E: Embedder + ?Sized>(source: &CorpusSource, embedder: &E) -> Self {
        Self::build_from_source_with_metric(DistanceMetric::default(), source, embedder)
    }
}

impl<I: Index> RetrievalEngine<I> {
    /// An engine with nothing to search.
    pub fn empty(reason: EmptyReason) -> Self {
        warn!("knowledge base is empty: {}", reason);
        Self {
            units: Vec::new(),
            index: None,
            report: BuildReport::Empty(reason),
        }
    }

    pub fn build_with_metric<E: Embedder + ?Sized>(
        metric: DistanceMetric,
        raw: &str,
        embedder: &E,
    ) -> Self {
        let units = chunk(raw);
        if units.is_empty() {
            return Self::empty(EmptyReason::NoUnits);
        }

        match Self::index_units(metric, &units, embedder) {
            Ok(index) => {
                let dimension = index.dimension().unwrap_or(0);
                info!(
                    "knowledge base ready: indexed {} units (dimension {})",
                    units.len(),
                    dimension
                );
                let report = BuildReport::Ready {
                    units: units.len(),
                    dimension,
                };
                Self {
                    units,
                    index: Some(index),
                    report,
                }
            }
            Err(reason) => Self::empty(reason),
        }
    }

    pub fn build_from_source_with_metric<E: Embedder + ?Sized>(
        metric: DistanceMetric,
        source: &CorpusSource,
        embedder: &E,
    ) -> Self {
        match source.load() {
            Ok(raw) => Self::build_with_metric(metric, &raw, embedder),
            Err(err) => Self::empty(err.into()),
        }
    }

    fn index_units<E: Embedder + ?Sized>(
        metric: DistanceMetric,
        units: &[TextUnit],
        embedder: &E,
    ) -> std::result::Result<I, EmptyReason> {
        let texts: Vec<String> = units.iter().map(|u| u.content.clone()).collect();
        let vectors = embedder
            .embed(&texts)
            .map_err(|e| EmptyReason::EmbedderFault(format!("{:#}", e)))?;

        if vectors.len() != units.len() {
            return Err(EmptyReason::VectorCountMismatch {
                units: units.len(),
                vectors: vectors.len(),
            });
        }

        Ok(I::build(metric, vectors)?)
    }

    /// Search and return ranked units with their distances.
    ///
    /// Unlike [`Self::search`], faults surface as errors: `NotBuilt` for an
    /// empty engine (the embedder is not called), `EmbedderFault` when the
    /// query cannot be embedded, `DimensionMismatch` when the query vector
    /// does not fit the index, `UnitNotFound` when the index returns an id
    /// with no unit behind it.
    pub fn search_hits<E: Embedder + ?Sized>(
        &self,
        query: &str,
        k: usize,
        embedder: &E,
    ) -> Result<Vec<Hit>> {
        let index = self.index.as_ref().ok_or(RagError::NotBuilt)?;
        if k == 0 {
            return Err(RagError::InvalidK);
        }

        let query_vector = embedder
            .embed_one(query)
            .map_err(|e| RagError::EmbedderFault(format!("{:#}", e)))?;
        let results = index.search(&query_vector, k)?;
        debug!("query {:?} matched {} of {} units", query, results.len(), self.units.len());

        results
            .into_iter()
            .map(|result| -> Result<Hit> {
                let unit = self.units.get(result.unit_id).ok_or(RagError::UnitNotFound {
                    unit_id: result.unit_id,
                })?;
                Ok(Hit {
                    unit_id: unit.id,
                    content: unit.content.clone(),
                    distance: result.distance,
                })
            })
            .collect()
    }

    /// Search and return the matching units joined by newlines, nearest first.
    ///
    /// Never fails: an empty engine answers with [`NO_KNOWLEDGE_SENTINEL`]
    /// without calling the embedder, and query-time faults are logged and
    /// answered the same way.
    pub fn search<E: Embedder + ?Sized>(&self, query: &str, k: usize, embedder: &E) -> String {
        if self.index.is_none() {
            return NO_KNOWLEDGE_SENTINEL.to_string();
        }

        match self.search_hits(query, k, embedder) {
            Ok(hits) => hits
                .into_iter()
                .map(|hit| hit.content)
                .collect::<Vec<_>>()
                .join("\n"),
            Err(err) => {
                error!("knowledge search failed for {:?}: {}", query, err);
                NO_KNOWLEDGE_SENTINEL.to_string()
            }
        }
    }

    /// The units in id order.
    pub fn units(&self) -> &[TextUnit] {
        &self.units
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// The built index, if the engine is not empty.
    pub fn index(&self) -> Option<&I> {
        self.index.as_ref()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_none()
    }
}
