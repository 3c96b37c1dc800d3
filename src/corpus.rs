//! Corpus sources: where the knowledge text comes from

use std::fmt;
use std::path::PathBuf;

use crate::error::{RagError, Result};

/// A readable text blob, addressed by a path or supplied inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusSource {
    Path(PathBuf),
    Text(String),
}

impl CorpusSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        CorpusSource::Path(path.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        CorpusSource::Text(text.into())
    }

    /// Read the whole corpus. Missing files, read errors and invalid UTF-8
    /// all map to `CorpusUnavailable`.
    pub fn load(&self) -> Result<String> {
        match self {
            CorpusSource::Text(text) => Ok(text.clone()),
            CorpusSource::Path(path) => {
                std::fs::read_to_string(path).map_err(|e| RagError::CorpusUnavailable {
                    source_id: self.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }
}

impl fmt::Display for CorpusSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorpusSource::Path(path) => write!(f, "{}", path.display()),
            CorpusSource::Text(text) => write!(f, "<inline text, {} bytes>", text.len()),
        }
    }
}
