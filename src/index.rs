//! Index trait for pluggable search backends

use crate::distance::DistanceMetric;
use crate::error::Result;
use crate::vector::Vector;
use serde::Serialize;

/// One ranked neighbor: the unit id and its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchResult {
    pub unit_id: usize,
    pub distance: f32,
}

/// A nearest-neighbor index that is bulk-built once and then only read.
///
/// Position `i` of the build input becomes unit id `i`. Implementations
/// must be `Send + Sync` so a built index can be shared across threads
/// without locking.
pub trait Index: Send + Sync {
    /// Build an index from an ordered set of vectors.
    fn build(metric: DistanceMetric, vectors: Vec<Vector>) -> Result<Self>
    where
        Self: Sized;

    /// Search for the `k` nearest neighbors of `query`.
    /// Results are sorted by distance ascending, ties by unit id ascending.
    fn search(&self, query: &Vector, k: usize) -> Result<Vec<SearchResult>>;

    /// Retrieve a vector by its unit id.
    fn get_vector(&self, id: usize) -> Option<&Vector>;

    /// The distance metric used by this index.
    fn metric(&self) -> DistanceMetric;

    /// The fixed dimension of every stored vector, if any were stored.
    fn dimension(&self) -> Option<usize>;

    /// The number of vectors in this index.
    fn len(&self) -> usize;

    /// Whether the index is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
