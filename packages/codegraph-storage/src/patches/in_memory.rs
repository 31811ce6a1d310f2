//! In-memory [`PatchQueue`] reference adapter, keyed by `(repo_id, file_path)`.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;

use super::{PatchConflict, PatchProposal, PatchQueue, PatchStatus};
use crate::{Result, StorageError};

type QueueKey = (String, String);

#[derive(Default)]
pub struct InMemoryPatchQueue {
    patches: RwLock<HashMap<String, PatchProposal>>,
    /// Insertion order per (repo_id, file_path), oldest first — the FIFO spine.
    order: RwLock<HashMap<QueueKey, Vec<String>>>,
}

impl InMemoryPatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn key_of(patch: &PatchProposal) -> QueueKey {
        (patch.repo_id.clone(), patch.file_path.clone())
    }

    fn pending_ids_ordered(&self, repo_id: &str, file_path: &str) -> Vec<String> {
        let order = self.order.read().unwrap();
        let patches = self.patches.read().unwrap();
        order
            .get(&(repo_id.to_string(), file_path.to_string()))
            .map(|ids| {
                ids.iter()
                    .filter(|id| patches.get(*id).map(|p| p.is_pending()).unwrap_or(false))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl PatchQueue for InMemoryPatchQueue {
    async fn enqueue(&self, patch: PatchProposal) -> Result<()> {
        let key = Self::key_of(&patch);
        self.order.write().unwrap().entry(key).or_default().push(patch.patch_id.clone());
        self.patches.write().unwrap().insert(patch.patch_id.clone(), patch);
        Ok(())
    }

    async fn dequeue(&self, repo_id: &str, file_path: &str) -> Result<Option<PatchProposal>> {
        let ids = self.pending_ids_ordered(repo_id, file_path);
        let Some(first_id) = ids.into_iter().next() else {
            return Ok(None);
        };
        let mut patches = self.patches.write().unwrap();
        let patch = patches.remove(&first_id);
        Ok(patch)
    }

    async fn peek(&self, repo_id: &str, file_path: &str, count: usize) -> Result<Vec<PatchProposal>> {
        let ids = self.pending_ids_ordered(repo_id, file_path);
        let patches = self.patches.read().unwrap();
        Ok(ids
            .into_iter()
            .take(count)
            .filter_map(|id| patches.get(&id).cloned())
            .collect())
    }

    async fn list_pending(&self, repo_id: &str, limit: Option<usize>) -> Result<Vec<PatchProposal>> {
        let patches = self.patches.read().unwrap();
        let mut pending: Vec<PatchProposal> = patches
            .values()
            .filter(|p| p.repo_id == repo_id && p.is_pending())
            .cloned()
            .collect();
        pending.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        if let Some(limit) = limit {
            pending.truncate(limit);
        }
        Ok(pending)
    }

    async fn detect_conflicts(&self, patch: &PatchProposal, current_content: &str) -> Result<Vec<PatchConflict>> {
        let mut conflicts = Vec::new();
        if patch.base_content != current_content {
            conflicts.push(PatchConflict::ContentMismatch);
        }

        let patches = self.patches.read().unwrap();
        if let Some(blocking) = patches.values().find(|p| {
            p.repo_id == patch.repo_id
                && p.file_path == patch.file_path
                && p.patch_id != patch.patch_id
                && p.is_pending()
                && p.created_at < patch.created_at
        }) {
            conflicts.push(PatchConflict::ConcurrentPatches {
                blocking_patch_id: blocking.patch_id.clone(),
            });
        }

        Ok(conflicts)
    }

    async fn mark_applied(&self, patch_id: &str) -> Result<()> {
        let mut patches = self.patches.write().unwrap();
        let patch = patches.get_mut(patch_id).ok_or_else(|| StorageError::patch_not_found(patch_id))?;
        patch.status = PatchStatus::Applied;
        patch.applied_at = Some(Utc::now());
        Ok(())
    }

    async fn mark_failed(&self, patch_id: &str, reason: &str) -> Result<()> {
        let mut patches = self.patches.write().unwrap();
        let patch = patches.get_mut(patch_id).ok_or_else(|| StorageError::patch_not_found(patch_id))?;
        patch.status = PatchStatus::Failed;
        merge_metadata(patch, "failure_reason", reason);
        Ok(())
    }

    async fn mark_conflict(&self, patch_id: &str, details: &str) -> Result<()> {
        let mut patches = self.patches.write().unwrap();
        let patch = patches.get_mut(patch_id).ok_or_else(|| StorageError::patch_not_found(patch_id))?;
        patch.status = PatchStatus::Conflict;
        merge_metadata(patch, "conflict_details", details);
        Ok(())
    }

    async fn supersede_patches(&self, repo_id: &str, file_path: &str, superseding_patch_id: &str) -> Result<usize> {
        let superseding_created_at = {
            let patches = self.patches.read().unwrap();
            patches
                .get(superseding_patch_id)
                .map(|p| p.created_at)
                .ok_or_else(|| StorageError::patch_not_found(superseding_patch_id))?
        };

        let mut patches = self.patches.write().unwrap();
        let mut count = 0;
        for patch in patches.values_mut() {
            if patch.repo_id == repo_id
                && patch.file_path == file_path
                && patch.patch_id != superseding_patch_id
                && patch.is_pending()
                && patch.created_at < superseding_created_at
            {
                patch.status = PatchStatus::Superseded;
                count += 1;
            }
        }
        Ok(count)
    }

    async fn get_queue_size(&self, repo_id: &str, file_path: &str) -> Result<usize> {
        Ok(self.pending_ids_ordered(repo_id, file_path).len())
    }

    async fn clear_queue(&self, repo_id: &str, file_path: &str) -> Result<usize> {
        let key = (repo_id.to_string(), file_path.to_string());
        let ids = self.order.write().unwrap().remove(&key).unwrap_or_default();
        let mut patches = self.patches.write().unwrap();
        let mut removed = 0;
        for id in ids {
            if patches.remove(&id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

fn merge_metadata(patch: &mut PatchProposal, key: &str, value: &str) {
    if !patch.metadata.is_object() {
        patch.metadata = serde_json::json!({});
    }
    patch.metadata[key] = serde_json::Value::String(value.to_string());
}
