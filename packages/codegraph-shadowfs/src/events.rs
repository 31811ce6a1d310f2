//! Event schema and the fan-out bus that drives incremental re-indexing
//! plugins off ShadowFS transaction activity.

use crate::error::EventValidationError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Write,
    Delete,
    Commit,
    Rollback,
}

/// A single ShadowFS activity event. Invariants are enforced in
/// [`Event::new`], not by the caller, so a bad event can never reach a
/// plugin.
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    pub path: String,
    pub txn_id: String,
    pub old_content: Option<String>,
    pub new_content: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Event {
    pub fn new(
        kind: EventKind,
        path: impl Into<String>,
        txn_id: impl Into<String>,
        old_content: Option<String>,
        new_content: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, EventValidationError> {
        let txn_id = txn_id.into();
        if txn_id.is_empty() {
            return Err(EventValidationError::EmptyTxnId);
        }
        if timestamp.timestamp() <= 0 {
            return Err(EventValidationError::NonPositiveTimestamp);
        }
        match kind {
            EventKind::Write if new_content.is_none() => {
                return Err(EventValidationError::WriteMissingContent)
            }
            EventKind::Delete if new_content.is_some() => {
                return Err(EventValidationError::DeleteHasContent)
            }
            _ => {}
        }
        Ok(Self {
            kind,
            path: path.into(),
            txn_id,
            old_content,
            new_content,
            timestamp,
        })
    }
}

/// A plugin reacting to ShadowFS events. Implementations that want to block
/// a commit on invalid input should return a validation-shaped error from
/// [`PluginError::Validation`]; anything else is logged and suppressed so
/// one broken plugin never stalls the others.
#[async_trait]
pub trait EventPlugin: Send + Sync {
    async fn on_event(&self, event: &Event) -> Result<(), PluginError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Propagated to the caller of `emit` — can block a commit.
    #[error("validation failed: {0}")]
    Validation(String),
    /// Logged and suppressed.
    #[error("plugin error: {0}")]
    Internal(String),
}

/// Fan-out bus. `register` is called during setup only and is not
/// thread-safe by design (mirrors the reference system's single-writer
/// setup phase); `emit` fans concurrently to every registered plugin.
#[derive(Default)]
pub struct EventBus {
    plugins: Vec<Arc<dyn EventPlugin>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { plugins: Vec::new() }
    }

    pub fn register(&mut self, plugin: Arc<dyn EventPlugin>) {
        self.plugins.push(plugin);
    }

    /// Fan the event out to every plugin concurrently. A plugin raising a
    /// validation error aborts the whole emit with that error (and, per the
    /// ordering guarantee, before any later event for this transaction is
    /// emitted since commit/rollback await this call). Any other plugin
    /// error is logged and swallowed.
    pub async fn emit(&self, event: Event) -> Result<(), PluginError> {
        let futures = self.plugins.iter().map(|plugin| {
            let plugin = Arc::clone(plugin);
            let event = event.clone();
            async move { plugin.on_event(&event).await }
        });

        let results = futures::future::join_all(futures).await;
        for result in results {
            match result {
                Ok(()) => {}
                Err(PluginError::Validation(msg)) => {
                    warn!(path = %event.path, txn_id = %event.txn_id, "plugin validation error blocked event");
                    return Err(PluginError::Validation(msg));
                }
                Err(PluginError::Internal(msg)) => {
                    error!(path = %event.path, txn_id = %event.txn_id, error = %msg, "plugin error suppressed");
                }
            }
        }
        Ok(())
    }
}
