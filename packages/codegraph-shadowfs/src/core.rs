//! ShadowFS core: a copy-on-write overlay over a workspace directory with
//! optimistic-concurrency transactions.

use crate::error::{Conflict, ShadowFsError};
use crate::events::{Event, EventBus, EventKind};
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Directories symlinked wholesale during materialisation rather than
/// walked file by file — these are the large, rarely-touched dependency
/// trees a workspace carries alongside its source.
const SYMLINK_WHOLESALE_DIRS: &[&str] = &["node_modules", ".venv", "vendor", ".git"];

struct TxnState {
    overlay: HashMap<String, String>,
    tombstones: HashSet<String>,
    base_revision: HashMap<String, String>,
    created_at: Instant,
}

/// A copy-on-write transactional view over `root`. All mutating operations
/// serialize on a single process-wide lock; reads never take it.
pub struct ShadowFs {
    root: PathBuf,
    txns: DashMap<String, TxnState>,
    global_lock: Mutex<()>,
    bus: Arc<EventBus>,
    ttl: Duration,
}

impl ShadowFs {
    pub fn new(root: impl Into<PathBuf>, bus: Arc<EventBus>, ttl: Duration) -> Self {
        Self {
            root: root.into(),
            txns: DashMap::new(),
            global_lock: Mutex::new(()),
            bus,
            ttl,
        }
    }

    fn disk_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    fn hash_of(content: &str) -> String {
        blake3::hash(content.as_bytes()).to_hex().to_string()
    }

    fn read_disk(&self, path: &str) -> Option<String> {
        std::fs::read_to_string(self.disk_path(path)).ok()
    }

    /// Source file extensions eligible for base-revision hashing. Anything
    /// else (binary assets, build output) is outside ShadowFS's purview.
    fn is_eligible(path: &Path) -> bool {
        matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("py" | "ts" | "tsx" | "js" | "jsx" | "java" | "kt" | "rs" | "go" | "md" | "toml" | "json" | "yaml" | "yml")
        )
    }

    fn snapshot_base_revision(&self) -> HashMap<String, String> {
        let mut base = HashMap::new();
        if !self.root.exists() {
            return base;
        }
        for entry in walkdir_eligible(&self.root) {
            if let Ok(content) = std::fs::read_to_string(&entry) {
                if let Ok(rel) = entry.strip_prefix(&self.root) {
                    base.insert(rel.to_string_lossy().replace('\\', "/"), Self::hash_of(&content));
                }
            }
        }
        base
    }

    /// Begin a transaction. Generates a fresh uuid4 id if `txn_id` is `None`.
    pub fn begin(&self, txn_id: Option<String>) -> Result<String, ShadowFsError> {
        let _guard = self.global_lock.lock();
        let id = txn_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        if self.txns.contains_key(&id) {
            return Err(ShadowFsError::TransactionAlreadyExists(id));
        }
        let base_revision = self.snapshot_base_revision();
        self.txns.insert(
            id.clone(),
            TxnState {
                overlay: HashMap::new(),
                tombstones: HashSet::new(),
                base_revision,
                created_at: Instant::now(),
            },
        );
        debug!(txn_id = %id, "transaction begun");
        Ok(id)
    }

    /// Write `content` to `path` within `txn_id`. Returns the event that
    /// should be emitted by the caller's async context (core methods here
    /// are sync; `write`/`delete`/`commit`/`rollback` return the event so
    /// callers in async contexts can await `EventBus::emit` themselves,
    /// matching the "emit outside the lock" ordering rule).
    pub fn write(&self, path: &str, content: &str, txn_id: &str) -> Result<Event, ShadowFsError> {
        let _guard = self.global_lock.lock();
        let mut txn = self
            .txns
            .get_mut(txn_id)
            .ok_or_else(|| ShadowFsError::TransactionNotFound(txn_id.to_string()))?;

        let old_content = txn
            .overlay
            .get(path)
            .cloned()
            .or_else(|| self.read_disk(path));

        txn.overlay.insert(path.to_string(), content.to_string());
        txn.tombstones.remove(path);

        Event::new(
            EventKind::Write,
            path,
            txn_id,
            old_content,
            Some(content.to_string()),
            Utc::now(),
        )
        .map_err(|e| ShadowFsError::InvalidPath(e.to_string()))
    }

    /// Read `path` as seen by `txn_id`, or straight from disk if `txn_id` is
    /// `None`. Priority: tombstone -> not found; overlay -> overlay content;
    /// disk -> disk content; else not found.
    pub fn read(&self, path: &str, txn_id: Option<&str>) -> Result<String, ShadowFsError> {
        if let Some(txn_id) = txn_id {
            let txn = self
                .txns
                .get(txn_id)
                .ok_or_else(|| ShadowFsError::TransactionNotFound(txn_id.to_string()))?;
            if txn.tombstones.contains(path) {
                return Err(ShadowFsError::FileNotFound(path.to_string()));
            }
            if let Some(content) = txn.overlay.get(path) {
                return Ok(content.clone());
            }
        }
        self.read_disk(path)
            .ok_or_else(|| ShadowFsError::FileNotFound(path.to_string()))
    }

    pub fn delete(&self, path: &str, txn_id: &str) -> Result<Event, ShadowFsError> {
        let _guard = self.global_lock.lock();
        let mut txn = self
            .txns
            .get_mut(txn_id)
            .ok_or_else(|| ShadowFsError::TransactionNotFound(txn_id.to_string()))?;

        let old_content = txn
            .overlay
            .remove(path)
            .or_else(|| self.read_disk(path));
        txn.tombstones.insert(path.to_string());

        Event::new(EventKind::Delete, path, txn_id, old_content, None, Utc::now())
            .map_err(|e| ShadowFsError::InvalidPath(e.to_string()))
    }

    /// Detect conflicts, write atomically, clean up transaction state. The
    /// caller must separately `bus.emit(event)` the returned commit event
    /// *after* this returns, outside the lock — this function only builds
    /// the event and performs the in-lock work.
    pub fn commit(&self, txn_id: &str) -> Result<Event, ShadowFsError> {
        let _guard = self.global_lock.lock();
        let (_, txn) = self
            .txns
            .remove(txn_id)
            .ok_or_else(|| ShadowFsError::TransactionNotFound(txn_id.to_string()))?;

        let mut conflicts = Vec::new();
        for path in txn.overlay.keys() {
            let expected = txn.base_revision.get(path).cloned().unwrap_or_default();
            let actual = self
                .read_disk(path)
                .map(|c| Self::hash_of(&c))
                .unwrap_or_default();
            if expected != actual {
                conflicts.push(Conflict {
                    path: path.clone(),
                    expected_hash: expected,
                    actual_hash: actual,
                });
            }
        }
        if !conflicts.is_empty() {
            // Put the transaction back: commit failure must not modify it.
            self.txns.insert(txn_id.to_string(), txn);
            return Err(ShadowFsError::Conflict(conflicts));
        }

        for (path, content) in &txn.overlay {
            let disk_path = self.disk_path(path);
            if let Some(parent) = disk_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| ShadowFsError::Commit {
                    recoverable: false,
                    message: format!("failed to create parent dirs for {}: {}", path, e),
                })?;
            }
            std::fs::write(&disk_path, content).map_err(|e| ShadowFsError::Commit {
                recoverable: e.kind() != std::io::ErrorKind::Other,
                message: format!("failed to write {}: {}", path, e),
            })?;
        }
        for path in &txn.tombstones {
            let disk_path = self.disk_path(path);
            if disk_path.exists() {
                std::fs::remove_file(&disk_path).map_err(|e| ShadowFsError::Commit {
                    recoverable: true,
                    message: format!("failed to delete {}: {}", path, e),
                })?;
            }
        }

        info!(txn_id = %txn_id, files = txn.overlay.len(), deletes = txn.tombstones.len(), "transaction committed");

        Event::new(EventKind::Commit, "", txn_id, None, None, Utc::now())
            .map_err(|e| ShadowFsError::InvalidPath(e.to_string()))
    }

    pub fn rollback(&self, txn_id: &str) -> Result<Event, ShadowFsError> {
        let _guard = self.global_lock.lock();
        self.txns
            .remove(txn_id)
            .ok_or_else(|| ShadowFsError::TransactionNotFound(txn_id.to_string()))?;

        Event::new(EventKind::Rollback, "", txn_id, None, None, Utc::now())
            .map_err(|e| ShadowFsError::InvalidPath(e.to_string()))
    }

    /// Produce a materialised view of the transaction for tools that need a
    /// real directory (test runners, external linters). Returns a lease
    /// that removes the temp directory on drop.
    pub fn materialize(&self, txn_id: &str) -> Result<MaterializedLease, ShadowFsError> {
        let txn = self
            .txns
            .get(txn_id)
            .ok_or_else(|| ShadowFsError::TransactionNotFound(txn_id.to_string()))?;

        let temp_dir = std::env::temp_dir().join(format!("shadowfs-{}", txn_id));
        std::fs::create_dir_all(&temp_dir).map_err(|e| ShadowFsError::Commit {
            recoverable: false,
            message: format!("failed to create materialize dir: {}", e),
        })?;

        // Symlink large dependency directories wholesale.
        for dir_name in SYMLINK_WHOLESALE_DIRS {
            let src = self.root.join(dir_name);
            if src.exists() {
                let dst = temp_dir.join(dir_name);
                symlink_dir(&src, &dst).ok();
            }
        }

        // For each file the workspace already has on disk, symlink it
        // unless the overlay changed it (copy instead). Overlay-only files
        // are materialised by writing their content directly.
        for entry in walkdir_eligible(&self.root) {
            let rel = match entry.strip_prefix(&self.root) {
                Ok(r) => r.to_string_lossy().replace('\\', "/"),
                Err(_) => continue,
            };
            if txn.tombstones.contains(&rel) {
                continue;
            }
            let dst = temp_dir.join(&rel);
            if let Some(parent) = dst.parent() {
                std::fs::create_dir_all(parent).ok();
            }
            if let Some(content) = txn.overlay.get(&rel) {
                std::fs::write(&dst, content).ok();
            } else {
                symlink_file(&entry, &dst).ok();
            }
        }
        for (rel, content) in txn.overlay.iter() {
            let dst = temp_dir.join(rel);
            if !dst.exists() {
                if let Some(parent) = dst.parent() {
                    std::fs::create_dir_all(parent).ok();
                }
                std::fs::write(&dst, content).ok();
            }
        }

        Ok(MaterializedLease { path: temp_dir })
    }

    /// Remove all transactions older than the configured TTL, freeing
    /// memory for abandoned sessions.
    pub fn sweep_expired(&self) -> Vec<String> {
        let now = Instant::now();
        let expired: Vec<String> = self
            .txns
            .iter()
            .filter(|e| now.duration_since(e.value().created_at) > self.ttl)
            .map(|e| e.key().clone())
            .collect();
        for id in &expired {
            self.txns.remove(id);
            warn!(txn_id = %id, "transaction expired via TTL sweep");
        }
        expired
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }
}

/// Scoped handle over a materialised directory. Removes the directory when
/// dropped, on every exit path (panic unwinding included).
pub struct MaterializedLease {
    path: PathBuf,
}

impl MaterializedLease {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for MaterializedLease {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

fn walkdir_eligible(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if SYMLINK_WHOLESALE_DIRS.contains(&name.as_ref()) {
                continue;
            }
            if path.is_dir() {
                stack.push(path);
            } else if ShadowFs::is_eligible(&path) {
                out.push(path);
            }
        }
    }
    out
}

#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}
#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}
#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}
#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}
