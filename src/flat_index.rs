//! Brute-force flat index: exact O(n·d) k-NN search

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::distance::DistanceMetric;
use crate::error::{RagError, Result};
use crate::index::{Index, SearchResult};
use crate::vector::Vector;

/// Below this many vectors the scan stays on the calling thread.
pub const PARALLEL_SCAN_THRESHOLD: usize = 4096;

/// A flat (brute-force) index that computes distance to every stored vector.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    vectors: Vec<Vector>,
    dimension: Option<usize>,
    metric: DistanceMetric,
}

impl FlatIndex {
    /// Build an index that must hold at least one vector.
    pub fn build_non_empty(metric: DistanceMetric, vectors: Vec<Vector>) -> Result<Self> {
        if vectors.is_empty() {
            return Err(RagError::EmptyInput);
        }
        Self::build(metric, vectors)
    }

    fn score(&self, query: &Vector) -> Result<Vec<SearchResult>> {
        let score_one = |(unit_id, vector): (usize, &Vector)| -> Result<SearchResult> {
            let distance = self.metric.distance(query, vector)?;
            Ok(SearchResult { unit_id, distance })
        };

        if self.vectors.len() >= PARALLEL_SCAN_THRESHOLD {
            self.vectors.par_iter().enumerate().map(score_one).collect()
        } else {
            self.vectors.iter().enumerate().map(score_one).collect()
        }
    }
}

/// Total order on results: distance ascending, NaN last, then unit id.
fn rank(a: &SearchResult, b: &SearchResult) -> Ordering {
    let by_distance = match (a.distance.is_nan(), b.distance.is_nan()) {
        (false, false) => a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal),
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => Ordering::Equal,
    };
    by_distance.then_with(|| a.unit_id.cmp(&b.unit_id))
}

impl Index for FlatIndex {
    fn build(metric: DistanceMetric, vectors: Vec<Vector>) -> Result<Self> {
        let dimension = vectors.first().map(Vector::dimension);
        if let Some(expected) = dimension {
            for vector in &vectors {
                vector.ensure_dimension(expected)?;
            }
        }

        Ok(Self {
            vectors,
            dimension,
            metric,
        })
    }

    fn search(&self, query: &Vector, k: usize) -> Result<Vec<SearchResult>> {
        if k == 0 {
            return Err(RagError::InvalidK);
        }
        let expected = self.dimension.ok_or(RagError::NotBuilt)?;
        query.ensure_dimension(expected)?;

        let mut results = self.score(query)?;

        if k < results.len() {
            results.select_nth_unstable_by(k - 1, rank);
            results.truncate(k);
        }
        results.sort_by(rank);
        Ok(results)
    }

    fn get_vector(&self, id: usize) -> Option<&Vector> {
        self.vectors.get(id)
    }

    fn metric(&self) -> DistanceMetric {
        self.metric
    }

    fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }
}
