//! Embedder boundary: text in, fixed-dimension vectors out
//!
//! The engine treats the embedding model as an opaque, synchronous capability.
//! Anything that can turn an ordered batch of strings into the same number of
//! vectors, in the same order, can drive it. Closures qualify directly, so a
//! caller wrapping a remote model does not need a named type.
//!
//! [`HashingEmbedder`] is a deterministic bag-of-words embedder with no model
//! weights and no I/O. It is what the CLI uses out of the box and what the
//! tests use to get reproducible rankings.

use anyhow::{ensure, Context};

use crate::error::{RagError, Result};
use crate::vector::Vector;

/// Output width of the default embedder, matching small sentence encoders.
pub const DEFAULT_DIMENSION: usize = 384;

/// Maps an ordered batch of texts to one vector per text, order-preserving.
pub trait Embedder: Send + Sync {
    fn embed(&self, texts: &[String]) -> anyhow::Result<Vec<Vector>>;

    /// Embed a single text, checking the embedder returned exactly one vector.
    fn embed_one(&self, text: &str) -> anyhow::Result<Vector> {
        let mut vectors = self.embed(&[text.to_string()])?;
        ensure!(
            vectors.len() == 1,
            "embedder returned {} vectors for 1 input",
            vectors.len()
        );
        vectors.pop().context("embedder returned no vector")
    }
}

impl<F> Embedder for F
where
    F: Fn(&[String]) -> anyhow::Result<Vec<Vector>> + Send + Sync,
{
    fn embed(&self, texts: &[String]) -> anyhow::Result<Vec<Vector>> {
        self(texts)
    }
}

/// Feature-hashing embedder over lower-cased alphanumeric tokens.
///
/// Token counts are hashed with FNV-1a into `dimension` buckets and the
/// result is L2-normalised, so squared Euclidean distance between two
/// outputs is `2 - 2·cos`. Text with no tokens maps to the zero vector.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(RagError::InvalidConfig(
                "embedding dimension must be at least 1".to_string(),
            ));
        }
        Ok(Self { dimension })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed_text(&self, text: &str) -> Vector {
        let mut counts = vec![0.0f32; self.dimension];
        for token in tokens(text) {
            let bucket = (fnv1a(token.as_bytes()) % self.dimension as u64) as usize;
            counts[bucket] += 1.0;
        }

        let mut vector = Vector::new(counts);
        // Only the zero vector fails to normalise; it stays as is.
        let _ = vector.normalize();
        vector
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
        }
    }
}

impl Embedder for HashingEmbedder {
    fn embed(&self, texts: &[String]) -> anyhow::Result<Vec<Vector>> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    bytes.iter().fold(OFFSET_BASIS, |hash, &byte| {
        (hash ^ u64::from(byte)).wrapping_mul(PRIME)
    })
}
