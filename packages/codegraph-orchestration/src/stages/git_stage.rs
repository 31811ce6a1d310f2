use crate::error::Result;
use crate::job::StageId;
use crate::pipeline::{StageContext, StageHandler, StageInput, StageMetrics, StageOutput};
use async_trait::async_trait;
use codegraph_ir::features::git_history::GitExecutor;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, warn};

/// Git metadata snapshot (HEAD commit + branch name).
///
/// Missing when the repo root isn't a git checkout; that's a non-fatal
/// condition, not a stage failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitResult {
    pub head_commit: Option<String>,
    pub branch: Option<String>,
}

/// Git metadata stage - reads HEAD and the current branch name.
///
/// First stage in the pipeline; has no dependencies. Optional, so a
/// non-git working tree doesn't abort the run.
pub struct GitStage {
    repo_path: std::path::PathBuf,
}

impl GitStage {
    pub fn new(repo_path: std::path::PathBuf) -> Self {
        Self { repo_path }
    }
}

impl Default for GitStage {
    fn default() -> Self {
        Self::new(std::path::PathBuf::from("."))
    }
}

#[async_trait]
impl StageHandler for GitStage {
    fn stage_id(&self) -> StageId {
        StageId::Git
    }

    async fn execute(&self, _input: StageInput, _ctx: &mut StageContext) -> Result<StageOutput> {
        let start = Instant::now();

        let result = match GitExecutor::new(&self.repo_path) {
            Ok(git) => {
                let head = git
                    .run_command(&["rev-parse", "HEAD"])
                    .map(|s| s.trim().to_string())
                    .ok();
                let branch = git
                    .run_command(&["rev-parse", "--abbrev-ref", "HEAD"])
                    .map(|s| s.trim().to_string())
                    .ok();
                info!(
                    "GitStage: HEAD={:?} branch={:?}",
                    head.as_deref().unwrap_or("?"),
                    branch.as_deref().unwrap_or("?")
                );
                GitResult {
                    head_commit: head,
                    branch,
                }
            }
            Err(e) => {
                warn!(
                    "GitStage: {} is not a git checkout ({}), skipping git metadata",
                    self.repo_path.display(),
                    e
                );
                GitResult::default()
            }
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        let cache_data = bincode::serialize(&result)?;

        Ok(StageOutput {
            cache_data,
            metrics: StageMetrics {
                files_processed: 0,
                nodes_created: 0,
                chunks_created: 0,
                duration_ms,
                errors: vec![],
            },
        })
    }

    fn output_cache_key(&self, ctx: &StageContext) -> String {
        ctx.cache_keys.git_key()
    }
}
