//! The indexing service: the public `index_repo_full` / `index_repo_incremental`
//! / `search` contract dispatching across all five adapters in parallel.

use super::{fuse_hits, AdapterHit, FileToIndex, FusedHit, FusionWeights, IndexAdapter, IndexAdapterError, IndexKind};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of a full or incremental reindex across all adapters.
#[derive(Debug, Clone)]
pub struct ReindexReport {
    pub per_adapter_counts: Vec<(IndexKind, usize)>,
    pub failed_adapters: Vec<(IndexKind, String)>,
}

impl ReindexReport {
    pub fn is_fully_healthy(&self) -> bool {
        self.failed_adapters.is_empty()
    }
}

/// Owns one instance of each of the five index adapters and fans work out
/// to them in parallel, isolating failures per adapter (one broken adapter
/// never blocks the others, matching the multi-index pipeline stage's
/// per-adapter error isolation).
pub struct IndexingService {
    adapters: Vec<Arc<dyn IndexAdapter>>,
    weights: FusionWeights,
}

impl IndexingService {
    pub fn new(adapters: Vec<Arc<dyn IndexAdapter>>) -> Self {
        Self {
            adapters,
            weights: FusionWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: FusionWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Full reindex: every adapter rebuilds its view of `files` from scratch.
    pub fn index_repo_full(&self, files: &[FileToIndex]) -> ReindexReport {
        self.dispatch(|adapter| adapter.reindex_repo(files))
    }

    /// Incremental reindex: only the given files are touched; any adapter
    /// whose backing store tracks deletions separately should be given
    /// `deleted_paths` too.
    pub fn index_repo_incremental(
        &self,
        changed_files: &[FileToIndex],
        deleted_paths: &[String],
    ) -> ReindexReport {
        if !deleted_paths.is_empty() {
            for adapter in &self.adapters {
                if let Err(e) = adapter.delete(deleted_paths) {
                    warn!(adapter = adapter.kind().as_str(), error = %e, "delete failed during incremental reindex");
                }
            }
        }
        self.dispatch(|adapter| adapter.reindex_paths(changed_files))
    }

    fn dispatch(&self, op: impl Fn(&Arc<dyn IndexAdapter>) -> Result<usize, IndexAdapterError> + Sync) -> ReindexReport {
        let results: Vec<(IndexKind, Result<usize, IndexAdapterError>)> = self
            .adapters
            .par_iter()
            .map(|adapter| (adapter.kind(), op(adapter)))
            .collect();

        let mut per_adapter_counts = Vec::new();
        let mut failed_adapters = Vec::new();
        for (kind, result) in results {
            match result {
                Ok(count) => {
                    debug!(adapter = kind.as_str(), count, "adapter reindex complete");
                    per_adapter_counts.push((kind, count));
                }
                Err(e) => {
                    warn!(adapter = kind.as_str(), error = %e, "adapter reindex failed");
                    failed_adapters.push((kind, e.to_string()));
                }
            }
        }
        ReindexReport {
            per_adapter_counts,
            failed_adapters,
        }
    }

    /// Search across every adapter in parallel and fuse the results. An
    /// adapter that errors contributes no hits rather than failing the
    /// whole query.
    pub fn search(&self, query: &str, limit: usize) -> Vec<FusedHit> {
        let per_adapter: Vec<(IndexKind, Vec<AdapterHit>)> = self
            .adapters
            .par_iter()
            .map(|adapter| {
                let hits = adapter.search(query, limit).unwrap_or_else(|e| {
                    warn!(adapter = adapter.kind().as_str(), error = %e, "adapter search failed");
                    Vec::new()
                });
                (adapter.kind(), hits)
            })
            .collect();

        let mut fused = fuse_hits(&per_adapter, &self.weights);
        fused.truncate(limit);
        fused
    }
}
