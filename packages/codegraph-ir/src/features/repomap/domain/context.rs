//! Context Provider Domain - Pure business logic for context sources
//!
//! Defines the abstraction for context providers that feed into Personalized PageRank.
//! Context sources include: IDE selection, query terms, git changes, and history.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Context type - where the context comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContextType {
    /// IDE context (cursor position, open files, selected text)
    Ide,
    /// User query (search terms, semantic search results)
    Query,
    /// Git changes (staged, unstaged, recent commits)
    GitChanges,
    /// History (recently viewed/edited files)
    History,
}

/// Context item with source metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextItem {
    /// Node ID in the RepoMap
    pub node_id: String,

    /// Context type
    pub context_type: ContextType,

    /// Relevance weight [0.0, 1.0]
    /// Higher = more relevant to current context
    pub weight: f64,

    /// Source metadata (file path, line number, etc.)
    pub metadata: HashMap<String, String>,
}

impl ContextItem {
    /// Create a new context item
    pub fn new(node_id: String, context_type: ContextType, weight: f64) -> Self {
        Self {
            node_id,
            context_type,
            weight: weight.clamp(0.0, 1.0),
            metadata: HashMap::new(),
        }
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: String, value: String) -> Self {
        self.metadata.insert(key, value);
        self
    }
}

/// Context set - aggregated from multiple providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextSet {
    /// All context items
    pub items: Vec<ContextItem>,

    /// Weights for each context type (for fusion)
    pub type_weights: HashMap<ContextType, f64>,
}

impl ContextSet {
    /// Create empty context set
    pub fn new() -> Self {
        let mut type_weights = HashMap::new();
        type_weights.insert(ContextType::Ide, 0.4);
        type_weights.insert(ContextType::Query, 0.3);
        type_weights.insert(ContextType::GitChanges, 0.2);
        type_weights.insert(ContextType::History, 0.1);

        Self {
            items: Vec::new(),
            type_weights,
        }
    }

    /// Add context item
    pub fn add_item(&mut self, item: ContextItem) {
        self.items.push(item);
    }

    /// Set weight for context type
    pub fn set_type_weight(&mut self, context_type: ContextType, weight: f64) {
        self.type_weights
            .insert(context_type, weight.clamp(0.0, 1.0));
    }

    /// Get combined weight for a node (across all context types)
    ///
    /// Returns weighted sum of all context items for this node.
    /// Uses type_weights for fusion.
    pub fn get_combined_weight(&self, node_id: &str) -> f64 {
        let mut total_weight = 0.0;

        for item in &self.items {
            if item.node_id == node_id {
                let type_weight = self
                    .type_weights
                    .get(&item.context_type)
                    .copied()
                    .unwrap_or(1.0);
                total_weight += item.weight * type_weight;
            }
        }

        total_weight.clamp(0.0, 1.0)
    }

    /// Get all unique node IDs in context
    pub fn get_context_nodes(&self) -> Vec<String> {
        let mut nodes: Vec<String> = self.items.iter().map(|item| item.node_id.clone()).collect();
        nodes.sort();
        nodes.dedup();
        nodes
    }

    /// Normalize weights to sum to 1.0
    pub fn normalize(&mut self) {
        let total: f64 = self.items.iter().map(|item| item.weight).sum();
        if total > 0.0 {
            for item in &mut self.items {
                item.weight /= total;
            }
        }
    }
}

impl Default for ContextSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Port (interface) for context providers
///
/// Implementations provide context from different sources:
/// - IDE: cursor position, open files, selected text
/// - Query: search results, semantic similarity
/// - Git: staged/unstaged changes, recent commits
/// - History: recently viewed/edited files
pub trait ContextProvider: Send + Sync {
    /// Get context items from this provider
    fn get_context(&self) -> Result<Vec<ContextItem>, String>;

    /// Get context type
    fn context_type(&self) -> ContextType;

    /// Provider name (for debugging)
    fn name(&self) -> &str;
}
