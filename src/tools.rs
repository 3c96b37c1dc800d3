//! Capability table: named, typed functions invoked with JSON arguments
//!
//! A model-driven agent asks for a capability by name and hands over a JSON
//! object. Arguments are decoded into a typed struct and validated before the
//! function runs, so a capability only ever sees well-formed input.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::embedder::Embedder;
use crate::engine::{RetrievalEngine, DEFAULT_TOP_K};
use crate::error::{RagError, Result};
use crate::index::Index;

/// Name of the knowledge search capability.
pub const SEARCH_KNOWLEDGE: &str = "search_knowledge";

type ToolFn<'a> = Box<dyn Fn(Value) -> Result<String> + Send + Sync + 'a>;

struct Tool<'a> {
    description: &'static str,
    call: ToolFn<'a>,
}

/// Name and description of a registered capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolDescription {
    pub name: &'static str,
    pub description: &'static str,
}

/// Arguments accepted by [`SEARCH_KNOWLEDGE`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchKnowledgeArgs {
    pub query: String,
    #[serde(default = "default_top_k")]
    pub k: usize,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

/// Capabilities keyed by name.
#[derive(Default)]
pub struct ToolTable<'a> {
    tools: BTreeMap<&'static str, Tool<'a>>,
}

impl<'a> ToolTable<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `f` under `name`; a later registration with the same name replaces it.
    pub fn register<A, F>(&mut self, name: &'static str, description: &'static str, f: F)
    where
        A: DeserializeOwned + 'a,
        F: Fn(A) -> Result<String> + Send + Sync + 'a,
    {
        let call = move |args: Value| -> Result<String> {
            let args: A = serde_json::from_value(args).map_err(|e| RagError::InvalidArguments {
                tool: name.to_string(),
                reason: e.to_string(),
            })?;
            f(args)
        };
        self.tools.insert(
            name,
            Tool {
                description,
                call: Box::new(call),
            },
        );
    }

    /// Invoke the capability registered under `name`.
    pub fn call(&self, name: &str, args: Value) -> Result<String> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| RagError::UnknownTool(name.to_string()))?;
        (tool.call)(args)
    }

    /// Registered capabilities in name order.
    pub fn describe(&self) -> Vec<ToolDescription> {
        self.tools
            .iter()
            .map(|(&name, tool)| ToolDescription {
                name,
                description: tool.description,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// A table exposing `engine` as the [`SEARCH_KNOWLEDGE`] capability.
pub fn knowledge_tools<'a, I, E>(engine: &'a RetrievalEngine<I>, embedder: &'a E) -> ToolTable<'a>
where
    I: Index + 'a,
    E: Embedder + ?Sized + 'a,
{
    let mut table = ToolTable::new();
    table.register(
        SEARCH_KNOWLEDGE,
        "Search the knowledge base for specific company information, policies, or FAQs.",
        move |args: SearchKnowledgeArgs| {
            if args.query.trim().is_empty() {
                return Err(RagError::InvalidArguments {
                    tool: SEARCH_KNOWLEDGE.to_string(),
                    reason: "query must not be empty".to_string(),
                });
            }
            if args.k == 0 {
                return Err(RagError::InvalidArguments {
                    tool: SEARCH_KNOWLEDGE.to_string(),
                    reason: "k must be at least 1".to_string(),
                });
            }
            Ok(engine.search(&args.query, args.k, embedder))
        },
    );
    table
}
