use crate::checkpoint::Checkpoint;
use crate::error::Result;
use crate::job::StageId;
use crate::pipeline::{StageContext, StageHandler, StageInput, StageMetrics, StageOutput};
use crate::stages::chunk_stage::ChunkResult;
use crate::stages::lexical_stage::LexicalAdapter;
use crate::stages::vector_stage::VectorAdapter;
use async_trait::async_trait;
use codegraph_ir::features::cross_file::SymbolDependencyGraph;
use codegraph_ir::features::indexing::{
    DocumentationIndexAdapter, FileToIndex, FuzzyIndexAdapter, IndexAdapter, SymbolIndexAdapter,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Reads every changed/discovered file into a [`FileToIndex`] batch, skipping
/// (and warning on) any file that can no longer be read from disk.
fn load_files_to_index(repo_id: &str, files: &[&std::path::Path]) -> Vec<FileToIndex> {
    files
        .iter()
        .filter_map(|path| match std::fs::read_to_string(path) {
            Ok(content) => Some(FileToIndex {
                repo_id: repo_id.to_string(),
                file_path: path.display().to_string(),
                content,
            }),
            Err(e) => {
                warn!("MultiIndexStage: failed to read {} for indexing: {}", path.display(), e);
                None
            }
        })
        .collect()
}

/// Wraps [`SymbolIndexAdapter`] to fit the stage's reindex/checkpoint shape.
/// The call graph backing callers/callees/shortest-path queries is rebuilt
/// by the graph stage; this adapter only owns the substring-searchable
/// symbol table, which is this stage's responsibility to populate.
struct SymbolAdapter {
    inner: SymbolIndexAdapter,
}

impl SymbolAdapter {
    fn new() -> Self {
        Self {
            inner: SymbolIndexAdapter::new(Arc::new(SymbolDependencyGraph::new())),
        }
    }

    fn index(&self, files: &[FileToIndex]) -> Result<(Vec<u8>, StageMetrics)> {
        let start = Instant::now();
        let count = self
            .inner
            .reindex_repo(files)
            .map_err(|e| crate::error::OrchestratorError::StageExecutionFailed(e.to_string()))?;
        Ok((
            bincode::serialize(&count)?,
            StageMetrics {
                files_processed: files.len(),
                nodes_created: count,
                chunks_created: 0,
                duration_ms: start.elapsed().as_millis() as u64,
                errors: vec![],
            },
        ))
    }
}

/// Wraps [`FuzzyIndexAdapter`] (edit-distance identifier search).
struct FuzzyAdapter {
    inner: FuzzyIndexAdapter,
}

impl FuzzyAdapter {
    fn new() -> Self {
        Self {
            inner: FuzzyIndexAdapter::new(),
        }
    }

    fn index(&self, files: &[FileToIndex]) -> Result<(Vec<u8>, StageMetrics)> {
        let start = Instant::now();
        let count = self
            .inner
            .reindex_repo(files)
            .map_err(|e| crate::error::OrchestratorError::StageExecutionFailed(e.to_string()))?;
        Ok((
            bincode::serialize(&count)?,
            StageMetrics {
                files_processed: files.len(),
                nodes_created: count,
                chunks_created: 0,
                duration_ms: start.elapsed().as_millis() as u64,
                errors: vec![],
            },
        ))
    }
}

/// Wraps [`DocumentationIndexAdapter`] (docstring/comment-only search).
struct DocumentationAdapter {
    inner: DocumentationIndexAdapter,
}

impl DocumentationAdapter {
    fn new() -> Self {
        Self {
            inner: DocumentationIndexAdapter::new(),
        }
    }

    fn index(&self, files: &[FileToIndex]) -> Result<(Vec<u8>, StageMetrics)> {
        let start = Instant::now();
        let count = self
            .inner
            .reindex_repo(files)
            .map_err(|e| crate::error::OrchestratorError::StageExecutionFailed(e.to_string()))?;
        Ok((
            bincode::serialize(&count)?,
            StageMetrics {
                files_processed: files.len(),
                nodes_created: count,
                chunks_created: 0,
                duration_ms: start.elapsed().as_millis() as u64,
                errors: vec![],
            },
        ))
    }
}

/// Multi-index dispatch stage.
///
/// Fans out to five adapters (lexical, vector, symbol, fuzzy, documentation)
/// in parallel. A single adapter's failure is recorded as a warning in the
/// combined metrics; it never aborts the others.
pub struct MultiIndexStage {
    repo_id: String,
}

impl MultiIndexStage {
    pub fn new(repo_id: String) -> Self {
        Self { repo_id }
    }
}

impl Default for MultiIndexStage {
    fn default() -> Self {
        Self::new("default-repo".to_string())
    }
}

#[async_trait]
impl StageHandler for MultiIndexStage {
    fn stage_id(&self) -> StageId {
        StageId::MultiIndex
    }

    async fn execute(&self, input: StageInput, ctx: &mut StageContext) -> Result<StageOutput> {
        let start = Instant::now();

        if input.incremental {
            info!(
                "MultiIndexStage: INCREMENTAL mode, deleting stale ids for {} changed files up front",
                input.changed_files.as_ref().map(|c| c.len()).unwrap_or(0)
            );
        }

        let chunk_cache_key = ctx.cache_keys.chunk_key();
        let chunk_data = ctx
            .checkpoint_mgr
            .load_checkpoint(&chunk_cache_key)
            .await?
            .ok_or_else(|| {
                crate::error::OrchestratorError::MissingDependency(format!(
                    "Missing chunk cache: {}",
                    chunk_cache_key
                ))
            })?;
        let chunk_results: Vec<ChunkResult> = bincode::deserialize(&chunk_data).map_err(|e| {
            crate::error::OrchestratorError::DeserializationError(format!(
                "Failed to deserialize chunk data: {}",
                e
            ))
        })?;

        let files: Vec<&std::path::Path> = input.files.iter().map(|p| p.as_path()).collect();
        let files_to_index = load_files_to_index(&self.repo_id, &files);

        let lexical = LexicalAdapter::new();
        let vector = VectorAdapter::new(self.repo_id.clone());
        let symbol = SymbolAdapter::new();
        let fuzzy = FuzzyAdapter::new();
        let documentation = DocumentationAdapter::new();

        let (lexical_res, vector_res, symbol_res, fuzzy_res, documentation_res) = tokio::join!(
            async { lexical.index(&files) },
            vector.embed(ctx, chunk_results.clone(), input.incremental, input.changed_files.as_ref()),
            async { symbol.index(&files_to_index) },
            async { fuzzy.index(&files_to_index) },
            async { documentation.index(&files_to_index) },
        );

        let mut combined = StageMetrics::default();
        let mut record = |name: &str, result: Result<(Vec<u8>, StageMetrics)>, key: String| {
            match result {
                Ok((data, metrics)) => {
                    combined.files_processed = combined.files_processed.max(metrics.files_processed);
                    combined.nodes_created += metrics.nodes_created;
                    combined.chunks_created += metrics.chunks_created;
                    combined.errors.extend(metrics.errors);
                    Some((key, data))
                }
                Err(e) => {
                    warn!("MultiIndexStage: {} adapter failed: {}", name, e);
                    combined.errors.push(format!("{}: {}", name, e));
                    None
                }
            }
        };

        let saved = [
            record("lexical", lexical_res, ctx.cache_keys.lexical_key()),
            record("vector", vector_res, ctx.cache_keys.vector_key()),
            record("symbol", symbol_res, ctx.cache_keys.symbol_key()),
            record("fuzzy", fuzzy_res, ctx.cache_keys.fuzzy_key()),
            record(
                "documentation",
                documentation_res,
                ctx.cache_keys.documentation_key(),
            ),
        ];

        for entry in saved.into_iter().flatten() {
            let (key, data) = entry;
            ctx.checkpoint_mgr
                .save_checkpoint(Checkpoint::new(ctx.job_id, StageId::MultiIndex, key, data))
                .await?;
        }

        combined.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "MultiIndexStage: dispatched 5 adapters in {}ms ({} errors)",
            combined.duration_ms,
            combined.errors.len()
        );

        let cache_data = bincode::serialize(&combined)?;
        Ok(StageOutput {
            cache_data,
            metrics: combined,
        })
    }

    fn required_cache_keys(&self, ctx: &StageContext) -> Vec<String> {
        vec![ctx.cache_keys.chunk_key(), ctx.cache_keys.repomap_key()]
    }

    fn output_cache_key(&self, ctx: &StageContext) -> String {
        ctx.cache_keys.multi_index_key()
    }
}
