//! Index adapter contract and the multi-adapter indexing service.
//!
//! Every concrete index (lexical, vector, symbol, fuzzy, documentation)
//! implements [`IndexAdapter`] the same way: reindex a whole repo, reindex a
//! subset of paths, delete paths, and answer a text query with scored hits.
//! [`IndexingService`] dispatches across all five in parallel and fuses their
//! hits by chunk_id using weighted-sum normalisation.

pub mod fusion;
pub mod service;
pub mod symbol;
pub mod fuzzy;
pub mod vector;
pub mod documentation;

pub use crate::features::lexical::FileToIndex;
pub use fusion::{fuse_hits, FusedHit, FusionWeights};
pub use service::IndexingService;
pub use symbol::SymbolIndexAdapter;
pub use fuzzy::FuzzyIndexAdapter;
pub use vector::VectorIndexAdapter;
pub use documentation::DocumentationIndexAdapter;

/// The five index kinds the multi-index stage fans out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum IndexKind {
    Lexical,
    Vector,
    Symbol,
    Fuzzy,
    Documentation,
}

impl IndexKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKind::Lexical => "lexical",
            IndexKind::Vector => "vector",
            IndexKind::Symbol => "symbol",
            IndexKind::Fuzzy => "fuzzy",
            IndexKind::Documentation => "documentation",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IndexAdapterError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("backend error: {0}")]
    Backend(String),
}

/// One scored hit from a single adapter, keyed for fusion by chunk_id.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AdapterHit {
    pub chunk_id: String,
    pub file_path: String,
    pub snippet: String,
    pub score: f64,
}

/// Common contract every index adapter implements.
///
/// `reindex_repo` replaces everything the adapter holds for a repository.
/// `reindex_paths` updates only the given files (incremental path). `delete`
/// removes documents for paths that no longer exist. `search` is read-only.
pub trait IndexAdapter: Send + Sync {
    fn kind(&self) -> IndexKind;
    fn reindex_repo(&self, files: &[FileToIndex]) -> Result<usize, IndexAdapterError>;
    fn reindex_paths(&self, files: &[FileToIndex]) -> Result<usize, IndexAdapterError>;
    fn delete(&self, file_paths: &[String]) -> Result<(), IndexAdapterError>;
    fn search(&self, query: &str, limit: usize) -> Result<Vec<AdapterHit>, IndexAdapterError>;
}
