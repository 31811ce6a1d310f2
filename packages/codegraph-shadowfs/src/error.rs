//! ShadowFS error taxonomy.

use std::collections::HashMap;
use thiserror::Error;

/// A single path whose on-disk hash no longer matches the transaction's
/// `base_revision` snapshot, detected at commit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub path: String,
    pub expected_hash: String,
    pub actual_hash: String,
}

#[derive(Debug, Error)]
pub enum ShadowFsError {
    #[error("transaction already exists: {0}")]
    TransactionAlreadyExists(String),

    #[error("transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("not found: {0}")]
    FileNotFound(String),

    #[error("commit conflict on {} path(s)", .0.len())]
    Conflict(Vec<Conflict>),

    #[error("commit failed (recoverable={recoverable}): {message}")]
    Commit { recoverable: bool, message: String },

    #[error("invalid path: {0}")]
    InvalidPath(String),
}

impl ShadowFsError {
    pub fn conflicts(&self) -> Option<&[Conflict]> {
        match self {
            ShadowFsError::Conflict(c) => Some(c),
            _ => None,
        }
    }
}

/// Event-construction validation errors. These are the "validation-shaped"
/// errors the event bus propagates instead of swallowing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventValidationError {
    #[error("txn_id must be non-empty")]
    EmptyTxnId,
    #[error("timestamp must be > 0")]
    NonPositiveTimestamp,
    #[error("write event requires new_content")]
    WriteMissingContent,
    #[error("delete event must not carry new_content")]
    DeleteHasContent,
}

pub type HashMapConflicts = HashMap<String, (String, String)>;
