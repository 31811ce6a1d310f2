use crate::dependency_graph::{compute_affected_files, ReverseDependencyIndex};
use crate::error::Result;
use crate::pipeline::{StageContext, StageMetrics};
use crate::stages::chunk_stage::ChunkResult;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{info, warn};

/// Serializable vector embedding result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorResult {
    pub chunk_id: String,
    pub file_path: String,
    pub embedding_dim: usize,
    pub errors: Vec<String>,
}

/// Vector index adapter - embedded vector store for semantic search.
///
/// One of the five adapters the multi-index stage dispatches in parallel;
/// needs the chunk stage's output as input.
pub struct VectorAdapter {
    #[allow(dead_code)]
    repo_id: String,
}

impl VectorAdapter {
    pub fn new(repo_id: String) -> Self {
        Self { repo_id }
    }

    pub async fn embed(
        &self,
        ctx: &StageContext,
        chunk_results: Vec<ChunkResult>,
        incremental: bool,
        changed_files: Option<&HashSet<PathBuf>>,
    ) -> Result<(Vec<u8>, StageMetrics)> {
        let start = std::time::Instant::now();

        // Incremental mode detection
        let (chunks_to_embed, previous_vectors): (Vec<ChunkResult>, Option<Vec<VectorResult>>) =
            if incremental {
                info!(
                    "VectorAdapter: INCREMENTAL mode - {} changed files",
                    changed_files.map(|c| c.len()).unwrap_or(0)
                );

                let prev_vectors = if let Some(prev_snapshot_id) = &ctx.previous_snapshot_id {
                    let prev_cache_key = format!("vector:{}:{}", ctx.repo_id, prev_snapshot_id);
                    match ctx.checkpoint_mgr.load_checkpoint(&prev_cache_key).await {
                        Ok(Some(data)) => match bincode::deserialize::<Vec<VectorResult>>(&data) {
                            Ok(results) => {
                                info!(
                                    "VectorAdapter: loaded {} previous vector results",
                                    results.len()
                                );
                                Some(results)
                            }
                            Err(e) => {
                                warn!("VectorAdapter: failed to deserialize previous vectors: {}", e);
                                None
                            }
                        },
                        _ => {
                            warn!("VectorAdapter: no previous vectors found, falling back to full rebuild");
                            None
                        }
                    }
                } else {
                    None
                };

                let changed = changed_files.cloned().unwrap_or_default();
                let reverse_deps = ReverseDependencyIndex::new();
                let affected = compute_affected_files(&changed, &reverse_deps);

                info!(
                    "VectorAdapter: changed {} files -> affects {} files",
                    changed.len(),
                    affected.len()
                );

                let affected_chunks: Vec<ChunkResult> = chunk_results
                    .into_iter()
                    .filter(|chunk| {
                        let path = PathBuf::from(&chunk.file_path);
                        affected.contains(&path)
                    })
                    .collect();

                (affected_chunks, prev_vectors)
            } else {
                info!("VectorAdapter: FULL mode - embedding {} files", chunk_results.len());
                (chunk_results, None)
            };

        let new_vectors: Vec<VectorResult> = chunks_to_embed
            .par_iter()
            .flat_map(|chunk_result| {
                chunk_result
                    .chunks
                    .iter()
                    .map(|chunk| {
                        // TODO: use a real embedding model; placeholder 768-dim vector for now
                        VectorResult {
                            chunk_id: chunk.id.clone(),
                            file_path: chunk_result.file_path.clone(),
                            embedding_dim: 768,
                            errors: vec![],
                        }
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        let final_vectors: Vec<VectorResult> = if incremental && previous_vectors.is_some() {
            let prev_vectors = previous_vectors.unwrap();
            let affected_paths: HashSet<String> = chunks_to_embed
                .iter()
                .map(|c| c.file_path.clone())
                .collect();

            let mut merged = Vec::new();
            for prev in prev_vectors {
                if !affected_paths.contains(&prev.file_path) {
                    merged.push(prev);
                }
            }
            merged.extend(new_vectors);
            merged
        } else {
            new_vectors
        };

        let mut errors = Vec::new();
        let files_processed = chunks_to_embed.len();
        let chunks_embedded = final_vectors.len();

        for result in &final_vectors {
            if !result.errors.is_empty() {
                errors.extend(result.errors.clone());
            }
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "VectorAdapter: embedded {} files ({} chunks) in {}ms ({} errors)",
            files_processed,
            chunks_embedded,
            duration_ms,
            errors.len()
        );

        let cache_data = bincode::serialize(&final_vectors)?;
        Ok((
            cache_data,
            StageMetrics {
                files_processed,
                nodes_created: chunks_embedded,
                chunks_created: chunks_embedded,
                duration_ms,
                errors,
            },
        ))
    }
}
