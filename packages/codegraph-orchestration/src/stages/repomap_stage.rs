use crate::error::Result;
use crate::job::StageId;
use crate::pipeline::{StageContext, StageHandler, StageInput, StageMetrics, StageOutput};
use crate::stages::chunk_stage::ChunkResult;
use async_trait::async_trait;
use codegraph_ir::features::repomap::{
    NodeKind, RepoMapInput, RepoMapNode, RepoMapUseCase, RepoMapUseCaseImpl,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

/// Serializable repomap result: directory tree nodes plus PageRank
/// importance, with an optional LLM-generated summary per file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoMapResult {
    pub nodes: Vec<RepoMapNode>,
    pub total_nodes: usize,
    pub pagerank_iterations: usize,
}

/// Optional summarizer for file/directory nodes (e.g. an LLM call).
/// When absent, nodes carry no summary text.
pub trait RepoMapSummarizer: Send + Sync {
    fn summarize(&self, file_path: &str) -> Option<String>;
}

/// RepoMap stage - directory tree + PageRank importance, with an optional
/// LLM-summary pass over file nodes.
pub struct RepoMapStage {
    repo_id: String,
    summarizer: Option<Box<dyn RepoMapSummarizer>>,
    repomap: RepoMapUseCaseImpl,
}

impl RepoMapStage {
    pub fn new(repo_id: String) -> Self {
        Self {
            repo_id,
            summarizer: None,
            repomap: RepoMapUseCaseImpl::new(),
        }
    }
}

impl Default for RepoMapStage {
    fn default() -> Self {
        Self::new("default-repo".to_string())
    }
}

#[async_trait]
impl StageHandler for RepoMapStage {
    fn stage_id(&self) -> StageId {
        StageId::RepoMap
    }

    async fn execute(&self, _input: StageInput, ctx: &mut StageContext) -> Result<StageOutput> {
        let start = Instant::now();

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

        let file_nodes: Vec<RepoMapNode> = chunk_results
            .iter()
            .map(|chunk| {
                let id = format!("{}:{}:file", self.repo_id, chunk.file_path);
                let mut node = RepoMapNode::new(
                    id,
                    NodeKind::File,
                    chunk.file_path.clone(),
                    chunk.file_path.clone(),
                    self.repo_id.clone(),
                    ctx.snapshot_id.clone(),
                );
                node.file_path = Some(chunk.file_path.clone());
                node
            })
            .collect();

        let output = self.repomap.generate_repomap(RepoMapInput {
            nodes: &file_nodes,
            settings: None,
        });

        if let Some(summarizer) = &self.summarizer {
            for node in &output.ranked_nodes {
                if let Some(path) = &node.file_path {
                    let _ = summarizer.summarize(path);
                }
            }
        } else {
            info!("RepoMapStage: no summarizer configured, skipping file summaries");
        }

        let result = RepoMapResult {
            total_nodes: output.stats.total_nodes,
            pagerank_iterations: output.stats.pagerank_iterations,
            nodes: output.ranked_nodes,
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "RepoMapStage: ranked {} nodes in {}ms",
            result.total_nodes, duration_ms
        );

        let cache_data = bincode::serialize(&result)?;
        Ok(StageOutput {
            cache_data,
            metrics: StageMetrics {
                files_processed: result.total_nodes,
                nodes_created: result.total_nodes,
                chunks_created: 0,
                duration_ms,
                errors: vec![],
            },
        })
    }

    fn required_cache_keys(&self, ctx: &StageContext) -> Vec<String> {
        vec![ctx.cache_keys.chunk_key()]
    }

    fn output_cache_key(&self, ctx: &StageContext) -> String {
        ctx.cache_keys.repomap_key()
    }
}
