//! Patch proposal queue: agent-produced unified-diff patches awaiting
//! review/apply, one FIFO queue per (repo_id, file_path).
//!
//! Grounded on the same `PatchProposal`/`PatchQueue` shape as the original
//! implementation's automation queue, re-expressed as an async_trait port
//! matching [`crate::domain::CodeSnapshotStore`]'s style.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;

mod in_memory;
pub use in_memory::InMemoryPatchQueue;

/// Lifecycle state of a proposed patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchStatus {
    Pending,
    Applied,
    Failed,
    Conflict,
    Superseded,
}

/// One proposed change to a single file, expressed as a unified diff against
/// a known base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchProposal {
    pub patch_id: String,
    pub repo_id: String,
    pub file_path: String,
    pub patch_content: String,
    pub base_content: String,
    pub base_version_id: String,
    pub index_version_id: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: PatchStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub applied_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub agent_mode: Option<String>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl PatchProposal {
    pub fn new(
        patch_id: impl Into<String>,
        repo_id: impl Into<String>,
        file_path: impl Into<String>,
        patch_content: impl Into<String>,
        base_content: impl Into<String>,
        base_version_id: impl Into<String>,
        index_version_id: impl Into<String>,
    ) -> Self {
        Self {
            patch_id: patch_id.into(),
            repo_id: repo_id.into(),
            file_path: file_path.into(),
            patch_content: patch_content.into(),
            base_content: base_content.into(),
            base_version_id: base_version_id.into(),
            index_version_id: index_version_id.into(),
            description: None,
            status: PatchStatus::Pending,
            created_at: Utc::now(),
            applied_at: None,
            agent_mode: None,
            metadata: serde_json::Value::Null,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == PatchStatus::Pending
    }
}

/// A detected reason a patch cannot be applied cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatchConflict {
    /// The file's current content no longer matches the patch's recorded base.
    ContentMismatch,
    /// Another still-pending patch was created earlier against the same file.
    ConcurrentPatches { blocking_patch_id: String },
}

/// FIFO-per-(repo_id, file_path) patch proposal queue.
#[async_trait]
pub trait PatchQueue: Send + Sync {
    /// Enqueue a new pending patch.
    async fn enqueue(&self, patch: PatchProposal) -> Result<()>;

    /// Remove and return the oldest pending patch for `(repo_id, file_path)`.
    async fn dequeue(&self, repo_id: &str, file_path: &str) -> Result<Option<PatchProposal>>;

    /// Non-removing look at the oldest `count` pending patches for
    /// `(repo_id, file_path)`.
    async fn peek(&self, repo_id: &str, file_path: &str, count: usize) -> Result<Vec<PatchProposal>>;

    /// List all pending patches for a repo, optionally capped.
    async fn list_pending(&self, repo_id: &str, limit: Option<usize>) -> Result<Vec<PatchProposal>>;

    /// Check `patch` against `current_content` and other pending patches on
    /// the same file; empty if there's no conflict.
    async fn detect_conflicts(&self, patch: &PatchProposal, current_content: &str) -> Result<Vec<PatchConflict>>;

    async fn mark_applied(&self, patch_id: &str) -> Result<()>;
    async fn mark_failed(&self, patch_id: &str, reason: &str) -> Result<()>;
    async fn mark_conflict(&self, patch_id: &str, details: &str) -> Result<()>;

    /// Mark every other pending patch on `(repo_id, file_path)` created
    /// strictly before `superseding_patch_id` as superseded.
    async fn supersede_patches(&self, repo_id: &str, file_path: &str, superseding_patch_id: &str) -> Result<usize>;

    async fn get_queue_size(&self, repo_id: &str, file_path: &str) -> Result<usize>;
    async fn clear_queue(&self, repo_id: &str, file_path: &str) -> Result<usize>;
}
