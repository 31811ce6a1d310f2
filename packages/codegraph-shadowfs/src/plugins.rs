//! Incremental-update plugin: the headline consumer of ShadowFS events.
//!
//! Reacts to write/delete by staging paths for later processing, and on
//! commit builds per-language IR deltas and invokes the multi-index
//! incremental indexer, with both phases timed and isolated from the file
//! commit that already succeeded.

use crate::events::{Event, EventKind, EventPlugin, PluginError};
use codegraph_ir::features::parsing::LanguageId;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

/// A file staged for commit-time processing by a single transaction.
#[derive(Debug, Clone)]
struct PendingFile {
    path: String,
    deleted: bool,
}

#[derive(Default)]
struct TxnPending {
    files: Vec<PendingFile>,
    created_at: Option<Instant>,
}

/// Invoked with a batch of same-language files to build an IR delta. In
/// production this wraps the parsing + IR-generation features; tests
/// substitute a stub.
#[async_trait::async_trait]
pub trait IrDeltaBuilder: Send + Sync {
    async fn build_delta(&self, language: LanguageId, paths: &[String]) -> Result<usize, String>;
}

/// Invoked once per commit with the full list of changed/deleted paths to
/// refresh the five index adapters incrementally.
#[async_trait::async_trait]
pub trait IncrementalIndexer: Send + Sync {
    async fn reindex_incremental(&self, changed: &[String], deleted: &[String]) -> Result<(), String>;
}

pub struct IncrementalUpdatePlugin {
    pending: DashMap<String, TxnPending>,
    ir_builder: Arc<dyn IrDeltaBuilder>,
    indexer: Arc<dyn IncrementalIndexer>,
    semaphore: Arc<Semaphore>,
    ttl: Duration,
    sweeper_started: AtomicBool,
}

impl IncrementalUpdatePlugin {
    pub fn new(
        ir_builder: Arc<dyn IrDeltaBuilder>,
        indexer: Arc<dyn IncrementalIndexer>,
        max_concurrent_language_batches: usize,
        ttl: Duration,
    ) -> Self {
        Self {
            pending: DashMap::new(),
            ir_builder,
            indexer,
            semaphore: Arc::new(Semaphore::new(max_concurrent_language_batches.max(1))),
            ttl,
            sweeper_started: AtomicBool::new(false),
        }
    }

    fn validate_path(path: &str) -> Result<(), PluginError> {
        let p = std::path::Path::new(path);
        if p.is_absolute() {
            return Err(PluginError::Validation(format!(
                "path must be relative: {}",
                path
            )));
        }
        if p.components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(PluginError::Validation(format!(
                "path must not contain '..': {}",
                path
            )));
        }
        Ok(())
    }

    fn stage(&self, txn_id: &str, path: &str, deleted: bool) {
        let mut entry = self.pending.entry(txn_id.to_string()).or_default();
        if entry.created_at.is_none() {
            entry.created_at = Some(Instant::now());
        }
        entry.files.push(PendingFile {
            path: path.to_string(),
            deleted,
        });
    }

    fn group_by_language(files: &[PendingFile]) -> HashMap<LanguageId, Vec<String>> {
        let mut groups: HashMap<LanguageId, Vec<String>> = HashMap::new();
        for file in files {
            if file.deleted {
                continue;
            }
            let ext = std::path::Path::new(&file.path)
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("");
            if let Some(lang) = LanguageId::from_extension(ext) {
                groups.entry(lang).or_default().push(file.path.clone());
            }
        }
        groups
    }

    async fn run_ir_delta_phase(&self, files: &[PendingFile]) -> (Duration, usize, usize) {
        let groups = Self::group_by_language(files);
        let start = Instant::now();
        let mut handles = Vec::new();
        for (lang, paths) in groups {
            let semaphore = Arc::clone(&self.semaphore);
            let builder = Arc::clone(&self.ir_builder);
            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                builder.build_delta(lang, &paths).await
            }));
        }
        let mut ok = 0usize;
        let mut failed = 0usize;
        for handle in handles {
            match handle.await {
                Ok(Ok(n)) => ok += n,
                Ok(Err(e)) => {
                    failed += 1;
                    warn!(error = %e, "ir-delta batch failed");
                }
                Err(e) => {
                    failed += 1;
                    warn!(error = %e, "ir-delta task panicked");
                }
            }
        }
        (start.elapsed(), ok, failed)
    }

    async fn run_index_phase(&self, files: &[PendingFile]) -> (Duration, Result<(), String>) {
        let changed: Vec<String> = files
            .iter()
            .filter(|f| !f.deleted)
            .map(|f| f.path.clone())
            .collect();
        let deleted: Vec<String> = files
            .iter()
            .filter(|f| f.deleted)
            .map(|f| f.path.clone())
            .collect();
        let start = Instant::now();
        let result = self.indexer.reindex_incremental(&changed, &deleted).await;
        (start.elapsed(), result)
    }

    fn maybe_start_sweeper(self: &Arc<Self>) {
        if self
            .sweeper_started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            let plugin = Arc::clone(self);
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(Duration::from_secs(60));
                loop {
                    interval.tick().await;
                    plugin.sweep_expired();
                }
            });
        }
    }

    fn sweep_expired(&self) {
        let now = Instant::now();
        let ttl = self.ttl;
        let expired: Vec<String> = self
            .pending
            .iter()
            .filter(|e| {
                e.value()
                    .created_at
                    .map(|t| now.duration_since(t) > ttl)
                    .unwrap_or(false)
            })
            .map(|e| e.key().clone())
            .collect();
        for txn_id in expired {
            self.pending.remove(&txn_id);
            debug!(txn_id = %txn_id, "dropped stale pending set via TTL sweep");
        }
    }
}

#[async_trait::async_trait]
impl EventPlugin for IncrementalUpdatePlugin {
    async fn on_event(&self, event: &Event) -> Result<(), PluginError> {
        match event.kind {
            EventKind::Write => {
                Self::validate_path(&event.path)?;
                self.stage(&event.txn_id, &event.path, false);
            }
            EventKind::Delete => {
                Self::validate_path(&event.path)?;
                self.stage(&event.txn_id, &event.path, true);
            }
            EventKind::Commit => {
                let Some((_, pending)) = self.pending.remove(&event.txn_id) else {
                    return Ok(());
                };
                let (ir_elapsed, ir_ok, ir_failed) = self.run_ir_delta_phase(&pending.files).await;
                info!(
                    txn_id = %event.txn_id,
                    elapsed_ms = ir_elapsed.as_millis() as u64,
                    ok = ir_ok,
                    failed = ir_failed,
                    "ir-delta phase complete"
                );

                let (index_elapsed, index_result) = self.run_index_phase(&pending.files).await;
                match index_result {
                    Ok(()) => info!(
                        txn_id = %event.txn_id,
                        elapsed_ms = index_elapsed.as_millis() as u64,
                        "incremental index phase complete"
                    ),
                    Err(e) => error!(
                        txn_id = %event.txn_id,
                        elapsed_ms = index_elapsed.as_millis() as u64,
                        error = %e,
                        "incremental index phase failed; file commit already succeeded"
                    ),
                }
            }
            EventKind::Rollback => {
                self.pending.remove(&event.txn_id);
            }
        }
        Ok(())
    }
}
