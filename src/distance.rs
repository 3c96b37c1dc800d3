//! Distance metrics for nearest-neighbor ranking
//!
//! Every metric returns a value where smaller means nearer, so the index can
//! rank candidates the same way regardless of which one is configured.

use crate::error::{RagError, Result};
use crate::vector::Vector;
use serde::{Deserialize, Serialize};

/// Distance metrics for measuring vector similarity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Squared Euclidean (L2²) distance
    #[default]
    SquaredEuclidean,
    /// Cosine similarity (converted to distance: 1 - similarity)
    Cosine,
    /// Dot product (negated for minimum distance)
    DotProduct,
}

impl DistanceMetric {
    /// Compute the distance between two vectors using this metric
    pub fn distance(&self, v1: &Vector, v2: &Vector) -> Result<f32> {
        if !v1.has_same_dimension(v2) {
            return Err(RagError::DimensionMismatch {
                expected: v1.dimension(),
                actual: v2.dimension(),
            });
        }

        match self {
            DistanceMetric::SquaredEuclidean => Ok(squared_euclidean_distance(v1, v2)),
            DistanceMetric::Cosine => Ok(cosine_distance(v1, v2)),
            DistanceMetric::DotProduct => Ok(-dot_product(v1, v2)),
        }
    }
}

/// Compute squared Euclidean distance. No square root: only ordering matters.
pub fn squared_euclidean_distance(v1: &Vector, v2: &Vector) -> f32 {
    v1.as_slice()
        .iter()
        .zip(v2.as_slice().iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f32>()
}

/// Compute cosine distance between two vectors (1 - cosine similarity)
///
/// A zero vector has no direction; it is treated as orthogonal to
/// everything, so the distance is 1.0.
pub fn cosine_distance(v1: &Vector, v2: &Vector) -> f32 {
    let norm1 = v1.norm();
    let norm2 = v2.norm();

    if norm1 == 0.0 || norm2 == 0.0 {
        return 1.0;
    }

    let similarity = (dot_product(v1, v2) / (norm1 * norm2)).clamp(-1.0, 1.0);
    1.0 - similarity
}

/// Compute dot product of two vectors
pub fn dot_product(v1: &Vector, v2: &Vector) -> f32 {
    v1.as_slice()
        .iter()
        .zip(v2.as_slice().iter())
        .map(|(a, b)| a * b)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_squared_euclidean_distance() {
        let v1 = Vector::new(vec![1.0, 2.0, 3.0]);
        let v2 = Vector::new(vec![4.0, 5.0, 6.0]);
        assert_relative_eq!(squared_euclidean_distance(&v1, &v2), 27.0, epsilon = 1e-5);
    }

    #[test]
    fn test_squared_euclidean_same_vector() {
        let v = Vector::new(vec![1.0, 2.0, 3.0]);
        assert_relative_eq!(squared_euclidean_distance(&v, &v), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_dot_product() {
        let v1 = Vector::new(vec![1.0, 2.0, 3.0]);
        let v2 = Vector::new(vec![4.0, 5.0, 6.0]);
        assert_relative_eq!(dot_product(&v1, &v2), 32.0, epsilon = 1e-6);
        assert_relative_eq!(
            DistanceMetric::DotProduct.distance(&v1, &v2).unwrap(),
            -32.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_cosine_orthogonal_and_opposite() {
        let x = Vector::new(vec![1.0, 0.0, 0.0]);
        let y = Vector::new(vec![0.0, 1.0, 0.0]);
        let neg_x = Vector::new(vec![-1.0, 0.0, 0.0]);
        assert_relative_eq!(cosine_distance(&x, &x), 0.0, epsilon = 1e-6);
        assert_relative_eq!(cosine_distance(&x, &y), 1.0, epsilon = 1e-6);
        assert_relative_eq!(cosine_distance(&x, &neg_x), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_cosine_zero_vector_is_orthogonal() {
        let zero = Vector::new(vec![0.0, 0.0]);
        let v = Vector::new(vec![1.0, 0.0]);
        assert_relative_eq!(
            DistanceMetric::Cosine.distance(&zero, &v).unwrap(),
            1.0,
            epsilon = 1e-6
        );
        assert_relative_eq!(cosine_distance(&v, &zero), 1.0, epsilon = 1e-6);
        assert_relative_eq!(cosine_distance(&zero, &zero), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_default_metric_is_squared_euclidean() {
        assert_eq!(DistanceMetric::default(), DistanceMetric::SquaredEuclidean);
    }

    #[test]
    fn test_dimension_mismatch() {
        let v1 = Vector::new(vec![1.0, 2.0]);
        let v2 = Vector::new(vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            DistanceMetric::SquaredEuclidean.distance(&v1, &v2),
            Err(RagError::DimensionMismatch { .. })
        ));
    }
}
