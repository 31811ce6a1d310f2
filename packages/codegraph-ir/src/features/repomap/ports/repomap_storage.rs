//! RepoMap storage port (JSON / in-memory / future PostgreSQL backends).

use crate::features::repomap::domain::RepoMapSnapshot;
use crate::shared::models::Result;

/// Persists and retrieves versioned repomap snapshots.
pub trait RepoMapStorage: Send + Sync {
    fn save(&self, snapshot: &RepoMapSnapshot) -> Result<()>;
    fn load(&self, repo_id: &str, snapshot_id: &str) -> Result<Option<RepoMapSnapshot>>;
    fn latest(&self, repo_id: &str) -> Result<Option<RepoMapSnapshot>>;
}
