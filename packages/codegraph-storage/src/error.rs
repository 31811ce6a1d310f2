//! Error types for codegraph-storage

use std::fmt;
use thiserror::Error;

/// Storage error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Database errors (SQLite, PostgreSQL)
    Database,
    /// Serialization/deserialization errors
    Serialization,
    /// Snapshot not found
    SnapshotNotFound,
    /// Repository not found
    RepositoryNotFound,
    /// Chunk not found
    ChunkNotFound,
    /// Transaction errors
    Transaction,
    /// Configuration errors
    Config,
    /// I/O errors
    IO,
    /// Episode not found
    EpisodeNotFound,
    /// Patch proposal not found
    PatchNotFound,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Database => "database",
            ErrorKind::Serialization => "serialization",
            ErrorKind::SnapshotNotFound => "snapshot_not_found",
            ErrorKind::RepositoryNotFound => "repository_not_found",
            ErrorKind::ChunkNotFound => "chunk_not_found",
            ErrorKind::Transaction => "transaction",
            ErrorKind::Config => "config",
            ErrorKind::IO => "io",
            ErrorKind::EpisodeNotFound => "episode_not_found",
            ErrorKind::PatchNotFound => "patch_not_found",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Storage error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct StorageError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl StorageError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }

    pub fn snapshot_not_found(snapshot_id: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::SnapshotNotFound,
            format!("Snapshot not found: {}", snapshot_id.into()),
        )
    }

    pub fn repository_not_found(repo_id: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::RepositoryNotFound,
            format!("Repository not found: {}", repo_id.into()),
        )
    }

    pub fn transaction(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transaction, message)
    }

    pub fn chunk_not_found(chunk_id: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::ChunkNotFound,
            format!("Chunk not found: {}", chunk_id.into()),
        )
    }

    pub fn episode_not_found(episode_id: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::EpisodeNotFound,
            format!("Episode not found: {}", episode_id.into()),
        )
    }

    pub fn patch_not_found(patch_id: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::PatchNotFound,
            format!("Patch proposal not found: {}", patch_id.into()),
        )
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IO, message)
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::io(format!("I/O error: {}", err)).with_source(err)
    }
}

// SQLite error conversions
#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::database(format!("SQLite error: {}", err)).with_source(err)
    }
}

// JSON error conversions
impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::serialization(format!("JSON error: {}", err)).with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StorageError>;
