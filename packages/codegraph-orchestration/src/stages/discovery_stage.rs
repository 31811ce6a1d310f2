use crate::change_detector::ChangeDetector;
use crate::error::Result;
use crate::job::StageId;
use crate::pipeline::{StageContext, StageHandler, StageInput, StageMetrics, StageOutput};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use walkdir::WalkDir;

/// File discovery result.
///
/// `files` is the full set of files a downstream stage should process;
/// `tombstones` lists files the previous snapshot knew about but that no
/// longer exist on disk, so later stages can drop their derived state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryResult {
    pub files: Vec<String>,
    pub tombstones: Vec<String>,
}

/// File discovery stage.
///
/// Full mode walks the repo root by the configured extensions. Incremental
/// mode trusts the job's changed-file set for added/modified files and
/// diffs the previous snapshot's file list against what's still on disk to
/// produce tombstones for deleted files.
pub struct DiscoveryStage {
    repo_root: PathBuf,
    extensions: Vec<String>,
}

impl DiscoveryStage {
    pub fn new(repo_root: PathBuf) -> Self {
        Self {
            repo_root,
            extensions: vec!["py".to_string()],
        }
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    fn change_detector(&self) -> ChangeDetector {
        ChangeDetector::new(self.repo_root.clone()).with_extensions(self.extensions.clone())
    }

    /// Every tracked file currently on disk, honoring the same
    /// extension/ignored-directory rules the change detector applies.
    fn walk(&self) -> Vec<PathBuf> {
        let detector = self.change_detector();
        WalkDir::new(&self.repo_root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| detector.is_tracked(entry.path()))
            .map(|entry| entry.into_path())
            .collect()
    }
}

#[async_trait]
impl StageHandler for DiscoveryStage {
    fn stage_id(&self) -> StageId {
        StageId::Discovery
    }

    async fn execute(&self, input: StageInput, ctx: &mut StageContext) -> Result<StageOutput> {
        let start = Instant::now();

        let result = if input.incremental {
            let changed: HashSet<PathBuf> = input.changed_files.clone().unwrap_or_default();
            info!(
                "DiscoveryStage: INCREMENTAL mode - {} changed files reported",
                changed.len()
            );

            let on_disk: HashSet<String> = self
                .walk()
                .into_iter()
                .map(|p| p.to_string_lossy().to_string())
                .collect();

            let tombstones = if let Some(prev_snapshot_id) = &ctx.previous_snapshot_id {
                let prev_cache_key = format!("discovery:{}:{}", ctx.repo_id, prev_snapshot_id);
                match ctx.checkpoint_mgr.load_checkpoint(&prev_cache_key).await {
                    Ok(Some(data)) => match bincode::deserialize::<DiscoveryResult>(&data) {
                        Ok(prev) => prev
                            .files
                            .into_iter()
                            .filter(|f| !on_disk.contains(f))
                            .collect(),
                        Err(e) => {
                            warn!("DiscoveryStage: failed to deserialize previous discovery: {}", e);
                            Vec::new()
                        }
                    },
                    _ => Vec::new(),
                }
            } else {
                Vec::new()
            };

            info!(
                "DiscoveryStage: {} files on disk, {} tombstones",
                on_disk.len(),
                tombstones.len()
            );

            DiscoveryResult {
                files: changed
                    .into_iter()
                    .map(|p| p.to_string_lossy().to_string())
                    .collect(),
                tombstones,
            }
        } else {
            let files = self.walk();
            info!("DiscoveryStage: FULL mode - discovered {} files", files.len());
            DiscoveryResult {
                files: files
                    .into_iter()
                    .map(|p| p.to_string_lossy().to_string())
                    .collect(),
                tombstones: Vec::new(),
            }
        };

        let files_processed = result.files.len();
        let duration_ms = start.elapsed().as_millis() as u64;
        let cache_data = bincode::serialize(&result)?;

        Ok(StageOutput {
            cache_data,
            metrics: StageMetrics {
                files_processed,
                nodes_created: 0,
                chunks_created: 0,
                duration_ms,
                errors: vec![],
            },
        })
    }

    fn output_cache_key(&self, ctx: &StageContext) -> String {
        ctx.cache_keys.discovery_key()
    }
}
