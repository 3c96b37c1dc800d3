//! Engine configuration, loaded from JSON and overridden by CLI flags

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMetric;
use crate::embedder::DEFAULT_DIMENSION;
use crate::engine::DEFAULT_TOP_K;
use crate::error::{RagError, Result};

/// Settings for building and querying a knowledge base.
///
/// Every field has a default, so a config file only needs the keys it changes:
///
/// ```json
/// { "knowledge_file": "docs/faq.txt", "top_k": 5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RagConfig {
    /// Corpus file; paragraphs are separated by blank lines.
    pub knowledge_file: PathBuf,
    /// Units returned per query when the caller gives no k.
    pub top_k: usize,
    /// Output width of the built-in hashing embedder.
    pub dimension: usize,
    pub metric: DistanceMetric,
    /// Default tracing filter, e.g. `"warn"` or `"info,knowledge_rag=debug"`.
    pub log_level: String,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            knowledge_file: PathBuf::from("knowledge.txt"),
            top_k: DEFAULT_TOP_K,
            dimension: DEFAULT_DIMENSION,
            metric: DistanceMetric::default(),
            log_level: "warn".to_string(),
        }
    }
}

impl RagConfig {
    /// Load and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        let config: RagConfig = serde_json::from_slice(&bytes).map_err(|e| {
            RagError::InvalidConfig(format!("{}: {}", path.as_ref().display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(RagError::InvalidConfig("top_k must be at least 1".to_string()));
        }
        if self.dimension == 0 {
            return Err(RagError::InvalidConfig(
                "dimension must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
