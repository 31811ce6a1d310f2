use crate::dependency_graph::{compute_affected_files, ReverseDependencyIndex};
use crate::error::Result;
use crate::job::StageId;
use crate::pipeline::{StageContext, StageHandler, StageInput, StageMetrics, StageOutput};
use async_trait::async_trait;
use codegraph_ir::features::flow_graph::{FlowAnalyzer, TreeSitterFlowAnalyzer};
use codegraph_ir::features::ir_generation::{GenerateIRUseCase, TreeWalkingIRGenerator};
use codegraph_ir::features::parsing::ports::{LanguageId, Parser};
use codegraph_ir::features::parsing::{create_registry, ParseFileUseCase, TreeSitterParser};
use codegraph_ir::shared::models::EdgeKind;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Serializable import information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportInfo {
    pub source_file: String,
    pub target_file: String,
    pub import_type: String, // "wildcard", "specific", "module"
}

/// Serializable IR result from codegraph-ir's structural IR + flow graph build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IRResult {
    pub file_path: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub bfg_count: usize,
    pub cfg_edges: usize,
    pub errors: Vec<String>,
    // NEW: Store import edges for incremental dependency tracking
    pub imports: Vec<ImportInfo>,
}

/// IR Generation Stage (L1) - real codegraph-ir integration
///
/// Parses each file with `TreeSitterParser`, lowers it to structural IR with
/// `TreeWalkingIRGenerator`, then derives its basic flow graph with
/// `TreeSitterFlowAnalyzer`.
pub struct IRStage {
    repo_id: String,
    flow_analyzer: Arc<TreeSitterFlowAnalyzer>,
}

impl IRStage {
    pub fn new(repo_id: String) -> Self {
        let registry = create_registry(&[LanguageId::Python]);
        Self {
            repo_id,
            flow_analyzer: Arc::new(TreeSitterFlowAnalyzer::new(registry, 1024)),
        }
    }
}

impl Default for IRStage {
    fn default() -> Self {
        Self::new("default".to_string())
    }
}

#[async_trait]
impl StageHandler for IRStage {
    fn stage_id(&self) -> StageId {
        StageId::Ir
    }

    async fn execute(&self, input: StageInput, ctx: &mut StageContext) -> Result<StageOutput> {
        let start = Instant::now();

        // Incremental mode detection
        let (files_to_process, previous_results, reverse_deps_arc): (
            Vec<PathBuf>,
            Option<Vec<IRResult>>,
            Arc<ReverseDependencyIndex>,
        ) = if input.incremental {
            info!(
                "IRStage: INCREMENTAL mode - {} changed files, {} total files",
                input.changed_files.as_ref().map(|c| c.len()).unwrap_or(0),
                input.files.len()
            );

            // 1. Build reverse dependency index from previous IR results
            info!("IRStage: Building reverse dependency index");
            let reverse_deps = Arc::new(ReverseDependencyIndex::new());

            // 2. Load previous IR results
            let prev_ir_results = if let Some(prev_snapshot_id) = &ctx.previous_snapshot_id {
                let prev_cache_key = format!("ir:{}:{}", ctx.repo_id, prev_snapshot_id);
                match ctx.checkpoint_mgr.load_checkpoint(&prev_cache_key).await {
                    Ok(Some(data)) => {
                        match bincode::deserialize::<Vec<IRResult>>(&data) {
                            Ok(results) => {
                                info!("IRStage: Loaded {} previous IR results", results.len());

                                // Extract imports from previous IR results to build reverse dependency index
                                let import_extract_start = Instant::now();
                                let mut import_count = 0;

                                for ir_result in &results {
                                    let source_file = PathBuf::from(&ir_result.file_path);

                                    // Extract imports from stored import info
                                    for import in &ir_result.imports {
                                        let target_path = PathBuf::from(&import.target_file);
                                        reverse_deps
                                            .add_wildcard_import(source_file.clone(), target_path);
                                        import_count += 1;
                                    }
                                }

                                let import_duration = import_extract_start.elapsed();
                                info!(
                                    "IRStage: Extracted {} imports from {} previous IR files in {:?}",
                                    import_count, results.len(), import_duration
                                );

                                Some(results)
                            }
                            Err(e) => {
                                warn!("IRStage: Failed to deserialize previous IR: {}", e);
                                None
                            }
                        }
                    }
                    _ => {
                        warn!("IRStage: No previous IR found, falling back to full rebuild");
                        None
                    }
                }
            } else {
                None
            };

            // 3. Compute affected files using BFS
            let changed_files = input.changed_files.as_ref().unwrap();
            let affected = compute_affected_files(changed_files, &reverse_deps);

            info!(
                "IRStage: Changed {} files → affects {} files ({}x amplification)",
                changed_files.len(),
                affected.len(),
                if changed_files.is_empty() {
                    0
                } else {
                    affected.len() / changed_files.len()
                }
            );

            // 4. Filter files to process (only affected)
            let affected_files: Vec<PathBuf> = input
                .files
                .iter()
                .filter(|f| affected.contains(*f))
                .cloned()
                .collect();

            info!(
                "IRStage: Will process {} affected files (skipping {} unchanged)",
                affected_files.len(),
                input.files.len() - affected_files.len()
            );

            (affected_files, prev_ir_results, reverse_deps)
        } else {
            info!(
                "IRStage: FULL mode - processing {} files with {} workers (real codegraph-ir)",
                input.files.len(),
                input.config.parallel_workers
            );
            (
                input.files.clone(),
                None,
                Arc::new(ReverseDependencyIndex::new()),
            )
        };

        // Process files in parallel using Rayon + codegraph-ir
        let new_results: Vec<IRResult> = files_to_process
            .par_iter()
            .map(|file_path| {
                // Read file content
                let content = match std::fs::read_to_string(file_path) {
                    Ok(c) => c,
                    Err(e) => {
                        warn!("Failed to read {}: {}", file_path.display(), e);
                        return IRResult {
                            file_path: file_path.to_string_lossy().to_string(),
                            node_count: 0,
                            edge_count: 0,
                            bfg_count: 0,
                            cfg_edges: 0,
                            errors: vec![format!("Failed to read file: {}", e)],
                            imports: Vec::new(), // Empty imports on error
                        };
                    }
                };

                let file_path_str = file_path.to_string_lossy().to_string();
                let parser = TreeSitterParser::python();
                let parse_use_case = ParseFileUseCase::new(parser);

                let mut errors = Vec::new();
                let mut node_count = 0;
                let mut edge_count = 0;
                let mut bfg_count = 0;
                let mut cfg_edges = 0;
                let mut imports = Vec::new();

                match parse_use_case.execute(&content, &file_path_str) {
                    Ok(tree) => {
                        let ir_use_case = GenerateIRUseCase::new(TreeWalkingIRGenerator::new());
                        match ir_use_case.execute(&tree, &self.repo_id) {
                            Ok(ir_doc) => {
                                node_count = ir_doc.nodes.len();
                                edge_count = ir_doc.edges.len();

                                for edge in &ir_doc.edges {
                                    if edge.kind == EdgeKind::Imports {
                                        imports.push(ImportInfo {
                                            source_file: file_path_str.clone(),
                                            target_file: edge.target_id.clone(),
                                            import_type: "module".to_string(),
                                        });
                                    }
                                }

                                match self.flow_analyzer.build_bfg(&ir_doc) {
                                    Ok(bfg) => {
                                        bfg_count = bfg.len();
                                        match self.flow_analyzer.build_cfg(&bfg) {
                                            Ok(cfg) => cfg_edges = cfg.len(),
                                            Err(e) => {
                                                errors.push(format!("cfg build failed: {}", e))
                                            }
                                        }
                                    }
                                    Err(e) => errors.push(format!("bfg build failed: {}", e)),
                                }
                            }
                            Err(e) => errors.push(format!("IR generation failed: {}", e)),
                        }
                    }
                    Err(e) => errors.push(format!("parse failed: {}", e)),
                }

                // In parallel processing, populate reverse_deps for incremental mode
                if input.incremental {
                    for import in &imports {
                        // Convert target to PathBuf (might need normalization)
                        let target_path = PathBuf::from(&import.target_file);
                        reverse_deps_arc.add_wildcard_import(file_path.clone(), target_path);
                    }
                }

                IRResult {
                    file_path: file_path_str,
                    node_count,
                    edge_count,
                    bfg_count,
                    cfg_edges,
                    errors,
                    imports,
                }
            })
            .collect();

        // 5. Merge with previous results (if incremental)
        let final_results: Vec<IRResult> = if input.incremental && previous_results.is_some() {
            let prev_results = previous_results.unwrap();
            let affected_paths: HashSet<String> = files_to_process
                .iter()
                .map(|p| p.to_string_lossy().to_string())
                .collect();

            info!(
                "IRStage: Merging {} new results with {} previous results",
                new_results.len(),
                prev_results.len()
            );

            // Keep previous results for unchanged files, use new results for affected files
            let mut merged = Vec::new();
            for prev in prev_results {
                if !affected_paths.contains(&prev.file_path) {
                    merged.push(prev);
                }
            }
            merged.extend(new_results);

            info!("IRStage: Final merged results: {} files", merged.len());
            merged
        } else {
            new_results
        };

        // Collect results and count metrics
        let mut all_errors = Vec::new();
        let mut files_processed = 0;
        let mut nodes_created = 0;
        let mut chunks_created = 0;

        for result in &final_results {
            if result.errors.is_empty() {
                files_processed += 1;
            } else {
                all_errors.extend(result.errors.clone());
            }
            nodes_created += result.node_count;
            chunks_created += result.bfg_count;
        }

        let duration_ms = start.elapsed().as_millis() as u64;

        if input.incremental {
            info!(
                "IRStage: INCREMENTAL - Processed {} affected files, merged {} total files, {} nodes in {}ms ({} errors)",
                files_to_process.len(),
                final_results.len(),
                nodes_created,
                duration_ms,
                all_errors.len()
            );
        } else {
            info!(
                "IRStage: FULL - Completed {} files, {} nodes, {} bfg graphs in {}ms ({} errors)",
                files_processed,
                nodes_created,
                chunks_created,
                duration_ms,
                all_errors.len()
            );
        }

        // Serialize IR results
        let cache_data = bincode::serialize(&final_results)?;

        Ok(StageOutput {
            cache_data,
            metrics: StageMetrics {
                files_processed,
                nodes_created,
                chunks_created,
                duration_ms,
                errors: all_errors,
            },
        })
    }

    fn output_cache_key(&self, ctx: &StageContext) -> String {
        ctx.cache_keys.ir_key()
    }
}
