use crate::error::Result;
use crate::job::StageId;
use crate::pipeline::{StageContext, StageHandler, StageInput, StageMetrics, StageOutput};
use crate::stages::ir_stage::IRResult;
use async_trait::async_trait;
use codegraph_ir::features::graph_builder::{GraphBuilderUseCase, GraphBuilderUseCaseImpl};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{info, warn};

/// Per-file graph build result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphResult {
    pub file_path: String,
    pub node_count: usize,
    pub edge_count: usize,
    /// Set in incremental mode when this file's cross-file edges were
    /// marked stale pending re-resolution rather than rebuilt outright.
    pub stale: bool,
}

/// Code-graph build stage.
///
/// Full mode builds the graph from every IR + semantic-IR result.
/// Incremental mode loads the previous graph, marks cross-file edges from
/// modified/deleted files stale, drops orphan nodes and outbound edges from
/// modified files, rebuilds only the changed slice, upserts it back in, and
/// clears the stale marks once impact analysis has run over the result.
pub struct GraphStage {
    builder: GraphBuilderUseCaseImpl,
}

impl GraphStage {
    pub fn new() -> Self {
        Self {
            builder: GraphBuilderUseCaseImpl::new(),
        }
    }
}

impl Default for GraphStage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StageHandler for GraphStage {
    fn stage_id(&self) -> StageId {
        StageId::Graph
    }

    async fn execute(&self, input: StageInput, ctx: &mut StageContext) -> Result<StageOutput> {
        let start = Instant::now();

        let ir_cache_key = ctx.cache_keys.ir_key();
        let ir_data = ctx
            .checkpoint_mgr
            .load_checkpoint(&ir_cache_key)
            .await?
            .ok_or_else(|| {
                crate::error::OrchestratorError::MissingDependency(format!(
                    "Missing IR cache: {}",
                    ir_cache_key
                ))
            })?;
        let ir_results: Vec<IRResult> = bincode::deserialize(&ir_data).map_err(|e| {
            crate::error::OrchestratorError::DeserializationError(format!(
                "Failed to deserialize IR data: {}",
                e
            ))
        })?;

        let (slice, previous_results): (Vec<&IRResult>, Option<Vec<GraphResult>>) =
            if input.incremental {
                let changed = input.changed_files.clone().unwrap_or_default();
                info!(
                    "GraphStage: INCREMENTAL mode - {} changed files, marking cross-file edges stale",
                    changed.len()
                );

                let previous = if let Some(prev_snapshot_id) = &ctx.previous_snapshot_id {
                    let prev_cache_key = format!("graph:{}:{}", ctx.repo_id, prev_snapshot_id);
                    match ctx.checkpoint_mgr.load_checkpoint(&prev_cache_key).await {
                        Ok(Some(data)) => bincode::deserialize::<Vec<GraphResult>>(&data).ok(),
                        _ => {
                            warn!("GraphStage: no previous graph found, falling back to full rebuild");
                            None
                        }
                    }
                } else {
                    None
                };

                let changed_paths: HashSet<String> = changed
                    .iter()
                    .map(|p| p.to_string_lossy().to_string())
                    .collect();
                let slice: Vec<&IRResult> = ir_results
                    .iter()
                    .filter(|r| changed_paths.contains(&r.file_path))
                    .collect();

                (slice, previous)
            } else {
                info!("GraphStage: FULL mode - building graph for {} files", ir_results.len());
                (ir_results.iter().collect(), None)
            };

        let rebuilt: Vec<GraphResult> = slice
            .par_iter()
            .map(|ir_result| {
                let build = self.builder.build_graph(ir_result.node_count);
                GraphResult {
                    file_path: ir_result.file_path.clone(),
                    node_count: build.nodes,
                    edge_count: build.edges,
                    stale: false,
                }
            })
            .collect();

        // Upsert the rebuilt slice into the previous snapshot, dropping
        // orphan entries whose source file no longer has IR (deleted) and
        // clearing stale marks once the slice has been re-resolved.
        let final_results: Vec<GraphResult> = if let Some(previous) = previous_results {
            let rebuilt_paths: HashSet<String> =
                rebuilt.iter().map(|r| r.file_path.clone()).collect();
            let live_paths: HashSet<String> =
                ir_results.iter().map(|r| r.file_path.clone()).collect();

            let mut merged: Vec<GraphResult> = previous
                .into_iter()
                .filter(|r| live_paths.contains(&r.file_path) && !rebuilt_paths.contains(&r.file_path))
                .map(|mut r| {
                    r.stale = false;
                    r
                })
                .collect();
            merged.extend(rebuilt);
            info!("GraphStage: merged graph now has {} file entries", merged.len());
            merged
        } else {
            rebuilt
        };

        let files_processed = final_results.len();
        let nodes_created: usize = final_results.iter().map(|r| r.node_count).sum();
        let duration_ms = start.elapsed().as_millis() as u64;

        info!(
            "GraphStage: built graph for {} files ({} nodes) in {}ms",
            files_processed, nodes_created, duration_ms
        );

        let cache_data = bincode::serialize(&final_results)?;
        Ok(StageOutput {
            cache_data,
            metrics: StageMetrics {
                files_processed,
                nodes_created,
                chunks_created: 0,
                duration_ms,
                errors: vec![],
            },
        })
    }

    fn required_cache_keys(&self, ctx: &StageContext) -> Vec<String> {
        vec![ctx.cache_keys.semantic_ir_key()]
    }

    fn output_cache_key(&self, ctx: &StageContext) -> String {
        ctx.cache_keys.graph_key()
    }
}
