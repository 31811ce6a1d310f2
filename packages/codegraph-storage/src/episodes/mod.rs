//! Episodic memory store (RFC-106-equivalent: not numbered upstream, grounded
//! on the same async_trait port convention as [`crate::domain::CodeSnapshotStore`]).
//!
//! An `Episode` is a record of one completed task: what was attempted, how,
//! and whether it worked. Episodes are retrieved later via a hybrid
//! (semantic + fuzzy + keyword) search so an agent can recall similar past
//! work before repeating it. Low-value episodes are pruned by age and
//! usefulness rather than kept forever.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;

mod search;
pub use search::{HybridSearchWeights, RetrievalFilter};

/// How a completed task turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    PartialSuccess,
    Failure,
    Abandoned,
}

/// One recorded episode of task execution.
///
/// Field set matches the richer Postgres schema in the original
/// implementation rather than spec.md's minimal essential-attribute table —
/// the minimal fields (`task_description`, `files_involved`, `error_types`,
/// `outcome_status`, `usefulness_score`, `retrieval_count`) are all present;
/// the rest are additive detail an agent finds useful on recall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    pub project_id: String,
    pub session_id: String,
    pub task_type: String,
    pub task_description: String,
    #[serde(default)]
    pub task_embedding: Vec<f32>,
    #[serde(default)]
    pub task_complexity: Option<String>,
    #[serde(default)]
    pub files_involved: Vec<String>,
    #[serde(default)]
    pub symbols_involved: Vec<String>,
    #[serde(default)]
    pub error_types: Vec<String>,
    #[serde(default)]
    pub stack_trace_signature: Option<String>,
    #[serde(default)]
    pub plan_summary: Option<String>,
    #[serde(default)]
    pub steps_count: u32,
    #[serde(default)]
    pub tools_used: Vec<String>,
    #[serde(default)]
    pub key_decisions: Vec<String>,
    #[serde(default)]
    pub pivots: Vec<String>,
    pub outcome_status: OutcomeStatus,
    #[serde(default)]
    pub patches: Vec<String>,
    #[serde(default)]
    pub tests_passed: Option<bool>,
    #[serde(default)]
    pub user_feedback: Option<String>,
    #[serde(default)]
    pub problem_pattern: Option<String>,
    #[serde(default)]
    pub solution_pattern: Option<String>,
    #[serde(default)]
    pub gotchas: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub tokens_used: u64,
    #[serde(default)]
    pub retrieval_count: u32,
    pub usefulness_score: f64,
    pub created_at: DateTime<Utc>,
}

impl Episode {
    /// Construct a freshly-completed episode. `usefulness_score` starts at
    /// the neutral midpoint and is adjusted later via [`EpisodeStore::record_feedback`].
    pub fn new(
        id: impl Into<String>,
        project_id: impl Into<String>,
        session_id: impl Into<String>,
        task_type: impl Into<String>,
        task_description: impl Into<String>,
        outcome_status: OutcomeStatus,
    ) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            session_id: session_id.into(),
            task_type: task_type.into(),
            task_description: task_description.into(),
            task_embedding: Vec::new(),
            task_complexity: None,
            files_involved: Vec::new(),
            symbols_involved: Vec::new(),
            error_types: Vec::new(),
            stack_trace_signature: None,
            plan_summary: None,
            steps_count: 0,
            tools_used: Vec::new(),
            key_decisions: Vec::new(),
            pivots: Vec::new(),
            outcome_status,
            patches: Vec::new(),
            tests_passed: None,
            user_feedback: None,
            problem_pattern: None,
            solution_pattern: None,
            gotchas: Vec::new(),
            tips: Vec::new(),
            duration_ms: 0,
            tokens_used: 0,
            retrieval_count: 0,
            usefulness_score: 0.5,
            created_at: Utc::now(),
        }
    }
}

/// Episodic memory storage abstraction.
///
/// Concurrency discipline (matching the Python `_storage_lock` /
/// `_episode_locks` split): implementations must serialize insertion and
/// deletion against the index structures with a single store-wide lock,
/// while per-episode metadata mutations (`record_feedback`, retrieval-count
/// bumps) only need to lock the touched episode.
#[async_trait]
pub trait EpisodeStore: Send + Sync {
    /// Store a new episode.
    async fn store(&self, episode: Episode) -> Result<()>;

    /// Fetch a single episode by id, bumping its retrieval count.
    async fn get(&self, episode_id: &str) -> Result<Episode>;

    /// Delete an episode by id.
    async fn delete(&self, episode_id: &str) -> Result<()>;

    /// Episodes for a project, most recent first.
    async fn by_project(&self, project_id: &str, limit: Option<usize>) -> Result<Vec<Episode>>;

    /// Episodes touching the given file path, most recent first.
    async fn by_file(&self, file_path: &str, limit: Option<usize>) -> Result<Vec<Episode>>;

    /// Episodes whose `error_types` contains the given error type.
    async fn by_error_type(&self, error_type: &str, limit: Option<usize>) -> Result<Vec<Episode>>;

    /// Hybrid semantic + fuzzy + keyword retrieval over `query`, optionally
    /// narrowed by [`RetrievalFilter`], ranked by weighted combined score.
    async fn hybrid_search(
        &self,
        query: &str,
        query_embedding: Option<&[f32]>,
        filter: Option<RetrievalFilter>,
        weights: HybridSearchWeights,
        top_k: usize,
    ) -> Result<Vec<(Episode, f64)>>;

    /// Exponential-moving-average update of `usefulness_score` from a
    /// thumbs-up/down signal, alpha = 0.3 (matches the original's
    /// `record_feedback`).
    async fn record_feedback(&self, episode_id: &str, helpful: bool) -> Result<()>;

    /// Remove episodes satisfying all three of: older than `max_age_days`,
    /// usefulness below `min_usefulness`, and retrieval count below
    /// `min_retrievals`. Returns the number removed.
    async fn cleanup_old_episodes(
        &self,
        max_age_days: i64,
        min_usefulness: f64,
        min_retrievals: u32,
    ) -> Result<usize>;

    /// Total stored episode count.
    async fn len(&self) -> Result<usize>;
}

mod in_memory;
pub use in_memory::InMemoryEpisodeStore;
