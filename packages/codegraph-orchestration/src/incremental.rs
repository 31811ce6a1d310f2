//! Incremental Update Support for Pipeline Orchestration
//!
//! SOTA-level incremental update using:
//! - Reverse dependency index (O(1) affected file lookup)
//! - BFS transitive propagation
//! - Partial chunk rebuild (O(n_affected) instead of O(n_files))
//!
//! Performance Target: 10-20x speedup for small changes

use crate::checkpoint::CheckpointManager;
use crate::error::{OrchestratorError, Result};
use crate::job::StageId;
use codegraph_ir::features::chunking::{BuildChunksInput, ChunkingUseCase, ChunkingUseCaseImpl};
use codegraph_ir::features::cross_file::{build_global_context, update_global_context, IRDocument};
use codegraph_ir::features::ir_generation::{GenerateIRUseCase, TreeWalkingIRGenerator};
use codegraph_ir::features::parsing::{ParseFileUseCase, TreeSitterParser};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

// Re-export types from codegraph-ir
type GlobalContextResult = codegraph_ir::features::cross_file::GlobalContextResult;

/// Incremental update result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncrementalResult {
    /// Files that were changed (input)
    pub changed_files: Vec<String>,

    /// Files affected by the changes (detected by BFS)
    pub affected_files: Vec<String>,

    /// Total files in repository
    pub total_files: usize,

    /// Metrics
    pub files_reprocessed: usize,
    pub nodes_created: usize,
    pub chunks_created: usize,

    /// Performance breakdown
    pub l1_ir_duration_ms: u64,
    pub l3_cross_file_duration_ms: u64,
    pub l2_chunk_duration_ms: u64,
    pub total_duration_ms: u64,

    /// Speedup vs full rebuild
    pub speedup_factor: f64,
}

/// Incremental update orchestrator
///
/// Drives the per-file parse -> IR -> cross-file resolution chain used by
/// both the full build and the incremental path, so the two only differ in
/// which files they touch.
pub struct IncrementalOrchestrator {
    checkpoint_mgr: Arc<CheckpointManager>,
}

impl IncrementalOrchestrator {
    /// Create new incremental orchestrator
    pub fn new(checkpoint_mgr: Arc<CheckpointManager>) -> Self {
        Self { checkpoint_mgr }
    }

    /// Perform incremental update
    ///
    /// # Arguments
    /// * `job_id` - Job ID for checkpoint management
    /// * `repo_id` - Repository ID
    /// * `snapshot_id` - New snapshot ID
    /// * `changed_files` - Vec<(file_path, source_code)> for changed files
    /// * `all_files` - Vec<(file_path, source_code)> for all files in repo
    /// * `existing_cache` - Previous global context from cache (optional)
    ///
    /// # Returns
    /// * IncrementalResult with affected files and performance metrics
    pub async fn incremental_update(
        &mut self,
        job_id: Uuid,
        repo_id: &str,
        snapshot_id: &str,
        changed_files: Vec<(String, String)>,
        all_files: Vec<(String, String)>,
        existing_cache: Option<Vec<u8>>,
    ) -> Result<IncrementalResult> {
        let total_start = Instant::now();

        info!(
            "Incremental update: {} changed files out of {} total files",
            changed_files.len(),
            all_files.len()
        );

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // Load existing global context from cache
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        let existing_global_context = if let Some(cache_data) = existing_cache {
            match bincode::deserialize::<GlobalContextResult>(&cache_data) {
                Ok(ctx) => Some(ctx),
                Err(e) => {
                    warn!("Failed to deserialize existing global context: {}", e);
                    None
                }
            }
        } else {
            None
        };

        // If no existing context, fall back to full build
        if existing_global_context.is_none() {
            warn!("No existing global context found, falling back to full build");
            return self
                .full_build(job_id, repo_id, snapshot_id, all_files)
                .await;
        }

        let existing_ctx = existing_global_context.unwrap();

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // L1: Process changed files only (O(n_changed))
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        let l1_start = Instant::now();
        let mut changed_ir_docs = Vec::new();
        let mut nodes_created = 0;

        for (file_path, source) in &changed_files {
            let ir_doc = build_ir_document(repo_id, file_path, source)?;
            nodes_created += ir_doc.nodes.len();
            changed_ir_docs.push(ir_doc);
        }

        let l1_duration = l1_start.elapsed();
        info!(
            "L1 (IR Build): Processed {} changed files, {} nodes in {} ms",
            changed_files.len(),
            nodes_created,
            l1_duration.as_millis()
        );

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // L3: Cross-file resolution with BFS affected file detection
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        let l3_start = Instant::now();

        // Process all files for global context
        let mut all_ir_docs = Vec::new();
        for (file_path, source) in &all_files {
            all_ir_docs.push(build_ir_document(repo_id, file_path, source)?);
        }

        // Incremental update with BFS transitive dependency detection
        let (new_global_context, affected_files) =
            update_global_context(&existing_ctx, changed_ir_docs, all_ir_docs.clone());

        let l3_duration = l3_start.elapsed();
        info!(
            "L3 (Cross-File): Detected {} affected files (BFS) in {} ms",
            affected_files.len(),
            l3_duration.as_millis()
        );
        info!("Affected files: {:?}", affected_files);

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // L2: Partial chunk rebuild (only affected files)
        // SOTA Optimization: O(n_affected) instead of O(n_files)
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        let l2_start = Instant::now();

        let source_by_path: HashMap<&str, &str> = all_files
            .iter()
            .map(|(p, s)| (p.as_str(), s.as_str()))
            .collect();
        let ir_doc_by_path: HashMap<&str, &IRDocument> = all_ir_docs
            .iter()
            .map(|doc| (doc.file_path.as_str(), doc))
            .collect();
        let chunking = ChunkingUseCaseImpl::new();
        let mut chunks_created = 0;
        for affected in &affected_files {
            let (Some(source), Some(ir_doc)) = (
                source_by_path.get(affected.as_str()),
                ir_doc_by_path.get(affected.as_str()),
            ) else {
                continue;
            };
            let file_text: Vec<String> = source.lines().map(String::from).collect();
            let output = chunking.build_chunks(BuildChunksInput {
                repo_id,
                file_path: affected,
                language: "python",
                ir_nodes: &ir_doc.nodes,
                file_text: &file_text,
                snapshot_id: Some(snapshot_id),
            });
            chunks_created += output.chunks.len();
        }

        let l2_duration = l2_start.elapsed();
        info!(
            "L2 (Chunking): Rebuilt chunks for {} affected files in {} ms",
            affected_files.len(),
            l2_duration.as_millis()
        );

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // Save updated global context to cache
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        let cache_key = format!("global_context:{}:{}", repo_id, snapshot_id);
        let cache_data = bincode::serialize(&new_global_context)
            .map_err(|e| OrchestratorError::Serialization(e.to_string()))?;

        self.checkpoint_mgr
            .save_checkpoint(crate::checkpoint::Checkpoint::new(
                job_id,
                StageId::Graph, // Using Graph as proxy for global context checkpointing
                cache_key.clone(),
                cache_data,
            ))
            .await?;

        info!("Saved global context to cache: {}", cache_key);

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // Calculate performance metrics
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        let total_duration = total_start.elapsed();

        // Estimate full rebuild time (based on affected file ratio)
        let estimated_full_rebuild_ms = if affected_files.len() > 0 {
            (total_duration.as_millis() as f64 * all_files.len() as f64
                / affected_files.len() as f64) as u64
        } else {
            total_duration.as_millis() as u64
        };

        let speedup_factor = if total_duration.as_millis() > 0 {
            estimated_full_rebuild_ms as f64 / total_duration.as_millis() as f64
        } else {
            1.0
        };

        let result = IncrementalResult {
            changed_files: changed_files.iter().map(|(p, _)| p.clone()).collect(),
            affected_files: affected_files.clone(),
            total_files: all_files.len(),
            files_reprocessed: affected_files.len(),
            nodes_created,
            chunks_created,
            l1_ir_duration_ms: l1_duration.as_millis() as u64,
            l3_cross_file_duration_ms: l3_duration.as_millis() as u64,
            l2_chunk_duration_ms: l2_duration.as_millis() as u64,
            total_duration_ms: total_duration.as_millis() as u64,
            speedup_factor,
        };

        info!(
            "Incremental update completed: {:.1}x speedup ({} ms vs estimated {} ms full rebuild)",
            speedup_factor,
            total_duration.as_millis(),
            estimated_full_rebuild_ms
        );

        Ok(result)
    }

    /// Fallback to full build when incremental update is not possible
    async fn full_build(
        &mut self,
        job_id: Uuid,
        repo_id: &str,
        snapshot_id: &str,
        all_files: Vec<(String, String)>,
    ) -> Result<IncrementalResult> {
        info!("Performing full build (no existing cache)");

        let total_start = Instant::now();

        let l1_start = Instant::now();
        let mut all_ir_docs = Vec::with_capacity(all_files.len());
        let mut nodes_created = 0;
        for (file_path, source) in &all_files {
            let ir_doc = build_ir_document(repo_id, file_path, source)?;
            nodes_created += ir_doc.nodes.len();
            all_ir_docs.push(ir_doc);
        }
        let l1_duration = l1_start.elapsed();

        let l3_start = Instant::now();
        let global_context = build_global_context(all_ir_docs.clone());
        let l3_duration = l3_start.elapsed();

        let l2_start = Instant::now();
        let chunking = ChunkingUseCaseImpl::new();
        let mut chunks_created = 0;
        for (ir_doc, (file_path, source)) in all_ir_docs.iter().zip(all_files.iter()) {
            let file_text: Vec<String> = source.lines().map(String::from).collect();
            let output = chunking.build_chunks(BuildChunksInput {
                repo_id,
                file_path,
                language: "python",
                ir_nodes: &ir_doc.nodes,
                file_text: &file_text,
                snapshot_id: Some(snapshot_id),
            });
            chunks_created += output.chunks.len();
        }
        let l2_duration = l2_start.elapsed();

        let total_duration = total_start.elapsed();

        // Save global context to cache
        let cache_key = format!("global_context:{}:{}", repo_id, snapshot_id);
        let cache_data = bincode::serialize(&global_context)
            .map_err(|e| OrchestratorError::Serialization(e.to_string()))?;

        self.checkpoint_mgr
            .save_checkpoint(crate::checkpoint::Checkpoint::new(
                job_id,
                StageId::Graph,
                cache_key,
                cache_data,
            ))
            .await?;

        Ok(IncrementalResult {
            changed_files: all_files.iter().map(|(p, _)| p.clone()).collect(),
            affected_files: all_files.iter().map(|(p, _)| p.clone()).collect(),
            total_files: all_files.len(),
            files_reprocessed: all_files.len(),
            nodes_created,
            chunks_created,
            l1_ir_duration_ms: l1_duration.as_millis() as u64,
            l3_cross_file_duration_ms: l3_duration.as_millis() as u64,
            l2_chunk_duration_ms: l2_duration.as_millis() as u64,
            total_duration_ms: total_duration.as_millis() as u64,
            speedup_factor: 1.0, // No speedup for full build
        })
    }
}

/// Parse one file and lower it straight to a cross-file `IRDocument`.
///
/// Shared by both the incremental path and the full-build fallback so they
/// stay on the same parse/IR pipeline as the rest of the orchestrator.
fn build_ir_document(repo_id: &str, file_path: &str, source: &str) -> Result<IRDocument> {
    let parse_use_case = ParseFileUseCase::new(TreeSitterParser::python());
    let tree = parse_use_case
        .execute(source, file_path)
        .map_err(|e| OrchestratorError::StageExecutionFailed(format!("parse failed: {}", e)))?;

    let ir_use_case = GenerateIRUseCase::new(TreeWalkingIRGenerator::new());
    let ir_doc = ir_use_case.execute(&tree, repo_id).map_err(|e| {
        OrchestratorError::StageExecutionFailed(format!("IR generation failed: {}", e))
    })?;

    Ok(IRDocument::new(
        file_path.to_string(),
        ir_doc.nodes,
        ir_doc.edges,
    ))
}
