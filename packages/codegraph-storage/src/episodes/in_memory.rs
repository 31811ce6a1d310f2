//! In-memory episode store: the reference adapter for [`super::EpisodeStore`].
//!
//! A single `RwLock` guards the backing map and its project/file/error
//! secondary indices together, matching the original's global storage lock;
//! per-episode feedback mutations lock only that episode's entry via
//! `DashMap`'s per-shard locking, so concurrent `record_feedback` calls on
//! different episodes don't contend.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::RwLock;

use super::search::{cosine_similarity, fuzzy_similarity, keyword_overlap};
use super::{Episode, EpisodeStore, HybridSearchWeights, RetrievalFilter};
use crate::{Result, StorageError};

const FEEDBACK_ALPHA: f64 = 0.3;

#[derive(Default)]
struct Indices {
    by_project: std::collections::HashMap<String, Vec<String>>,
    by_file: std::collections::HashMap<String, Vec<String>>,
    by_error_type: std::collections::HashMap<String, Vec<String>>,
}

/// Reference [`EpisodeStore`] backed by in-process maps. Not persisted;
/// intended for tests and as the default port implementation until a
/// durable adapter is needed.
pub struct InMemoryEpisodeStore {
    episodes: DashMap<String, Episode>,
    indices: RwLock<Indices>,
}

impl InMemoryEpisodeStore {
    pub fn new() -> Self {
        Self {
            episodes: DashMap::new(),
            indices: RwLock::new(Indices::default()),
        }
    }

    fn index_episode(&self, episode: &Episode) {
        let mut indices = self.indices.write().unwrap();
        indices
            .by_project
            .entry(episode.project_id.clone())
            .or_default()
            .push(episode.id.clone());
        for file in &episode.files_involved {
            indices.by_file.entry(file.clone()).or_default().push(episode.id.clone());
        }
        for error_type in &episode.error_types {
            indices
                .by_error_type
                .entry(error_type.clone())
                .or_default()
                .push(episode.id.clone());
        }
    }

    fn deindex_episode(&self, episode: &Episode) {
        let mut indices = self.indices.write().unwrap();
        if let Some(ids) = indices.by_project.get_mut(&episode.project_id) {
            ids.retain(|id| id != &episode.id);
        }
        for file in &episode.files_involved {
            if let Some(ids) = indices.by_file.get_mut(file) {
                ids.retain(|id| id != &episode.id);
            }
        }
        for error_type in &episode.error_types {
            if let Some(ids) = indices.by_error_type.get_mut(error_type) {
                ids.retain(|id| id != &episode.id);
            }
        }
    }

    fn collect_by_ids(&self, ids: &[String], limit: Option<usize>) -> Vec<Episode> {
        let mut out: Vec<Episode> = ids
            .iter()
            .rev() // insertion order within a bucket is oldest-first; reverse for most-recent-first
            .filter_map(|id| self.episodes.get(id).map(|e| e.value().clone()))
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = limit {
            out.truncate(limit);
        }
        out
    }
}

impl Default for InMemoryEpisodeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EpisodeStore for InMemoryEpisodeStore {
    async fn store(&self, episode: Episode) -> Result<()> {
        self.index_episode(&episode);
        self.episodes.insert(episode.id.clone(), episode);
        Ok(())
    }

    async fn get(&self, episode_id: &str) -> Result<Episode> {
        let mut entry = self
            .episodes
            .get_mut(episode_id)
            .ok_or_else(|| StorageError::episode_not_found(episode_id))?;
        entry.retrieval_count += 1;
        Ok(entry.value().clone())
    }

    async fn delete(&self, episode_id: &str) -> Result<()> {
        let (_, episode) = self
            .episodes
            .remove(episode_id)
            .ok_or_else(|| StorageError::episode_not_found(episode_id))?;
        self.deindex_episode(&episode);
        Ok(())
    }

    async fn by_project(&self, project_id: &str, limit: Option<usize>) -> Result<Vec<Episode>> {
        let ids = self
            .indices
            .read()
            .unwrap()
            .by_project
            .get(project_id)
            .cloned()
            .unwrap_or_default();
        Ok(self.collect_by_ids(&ids, limit))
    }

    async fn by_file(&self, file_path: &str, limit: Option<usize>) -> Result<Vec<Episode>> {
        let ids = self
            .indices
            .read()
            .unwrap()
            .by_file
            .get(file_path)
            .cloned()
            .unwrap_or_default();
        Ok(self.collect_by_ids(&ids, limit))
    }

    async fn by_error_type(&self, error_type: &str, limit: Option<usize>) -> Result<Vec<Episode>> {
        let ids = self
            .indices
            .read()
            .unwrap()
            .by_error_type
            .get(error_type)
            .cloned()
            .unwrap_or_default();
        Ok(self.collect_by_ids(&ids, limit))
    }

    async fn hybrid_search(
        &self,
        query: &str,
        query_embedding: Option<&[f32]>,
        filter: Option<RetrievalFilter>,
        weights: HybridSearchWeights,
        top_k: usize,
    ) -> Result<Vec<(Episode, f64)>> {
        let weights = weights.normalized();
        let filter = filter.unwrap_or_default();

        let mut scored: Vec<(Episode, f64)> = self
            .episodes
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| {
                let episode = entry.value();
                let semantic = query_embedding
                    .map(|q| cosine_similarity(q, &episode.task_embedding))
                    .unwrap_or(0.0);
                let target_text = episode
                    .stack_trace_signature
                    .as_deref()
                    .unwrap_or(&episode.task_description);
                let fuzzy = fuzzy_similarity(query, target_text);
                let keyword = keyword_overlap(query, &episode.task_description);
                let score = weights.semantic * semantic + weights.fuzzy * fuzzy + weights.keyword * keyword;
                (episode.clone(), score)
            })
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        Ok(scored)
    }

    async fn record_feedback(&self, episode_id: &str, helpful: bool) -> Result<()> {
        let mut entry = self
            .episodes
            .get_mut(episode_id)
            .ok_or_else(|| StorageError::episode_not_found(episode_id))?;
        let signal = if helpful { 1.0 } else { 0.0 };
        entry.usefulness_score = FEEDBACK_ALPHA * signal + (1.0 - FEEDBACK_ALPHA) * entry.usefulness_score;
        Ok(())
    }

    async fn cleanup_old_episodes(
        &self,
        max_age_days: i64,
        min_usefulness: f64,
        min_retrievals: u32,
    ) -> Result<usize> {
        let cutoff = Utc::now() - chrono::Duration::days(max_age_days);
        let to_remove: Vec<Episode> = self
            .episodes
            .iter()
            .filter(|entry| {
                let e = entry.value();
                e.created_at < cutoff && e.usefulness_score < min_usefulness && e.retrieval_count < min_retrievals
            })
            .map(|entry| entry.value().clone())
            .collect();

        for episode in &to_remove {
            self.episodes.remove(&episode.id);
            self.deindex_episode(episode);
        }
        Ok(to_remove.len())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.episodes.len())
    }
}
