//! SQLite adapter for CodeSnapshotStore (RFC-102)
//!
//! Schema mirrors the RFC-100 core contract: snapshots and chunks are
//! immutable once written, `replace_file` copies the unaffected chunks of a
//! snapshot forward and swaps in new ones for the touched file. Semantic
//! snapshots are stored gzip-compressed; a nullable legacy JSON column lets
//! old, uncompressed rows keep reading.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::io::{Read, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::domain::{Chunk, CodeSnapshotStore, Dependency, Repository, SemanticSnapshot, Snapshot, TypeHint};
use crate::{Result, StorageError};

/// SQLite-backed [`CodeSnapshotStore`].
#[derive(Clone)]
pub struct SqliteSnapshotStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSnapshotStore {
    /// Open (or create) a SQLite database at `db_path`.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let store = Self { conn: Arc::new(Mutex::new(conn)) };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory database, for tests and ephemeral runs.
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn: Arc::new(Mutex::new(conn)) };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS repositories (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                url TEXT,
                created_at INTEGER NOT NULL,
                metadata TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS snapshots (
                id TEXT PRIMARY KEY,
                repo_id TEXT NOT NULL,
                timestamp INTEGER NOT NULL,
                metadata TEXT NOT NULL
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_snapshots_repo ON snapshots(repo_id, timestamp)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS chunks (
                snapshot_id TEXT NOT NULL,
                id TEXT NOT NULL,
                file_path TEXT NOT NULL,
                start_line INTEGER NOT NULL,
                end_line INTEGER NOT NULL,
                content TEXT NOT NULL,
                metadata TEXT NOT NULL,
                PRIMARY KEY (snapshot_id, id)
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_chunks_file ON chunks(snapshot_id, file_path, start_line)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS dependencies (
                snapshot_id TEXT NOT NULL,
                from_chunk_id TEXT NOT NULL,
                to_chunk_id TEXT NOT NULL,
                dep_type TEXT NOT NULL,
                metadata TEXT NOT NULL
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_deps_from ON dependencies(snapshot_id, from_chunk_id)",
            [],
        )?;

        // `mapping_gzip` holds every new write; `mapping_json` is read-only
        // legacy fallback for rows written before compression landed.
        conn.execute(
            "CREATE TABLE IF NOT EXISTS semantic_snapshots (
                snapshot_id TEXT PRIMARY KEY,
                project_id TEXT NOT NULL,
                files TEXT NOT NULL,
                mapping_gzip BLOB,
                mapping_json TEXT,
                created_at INTEGER NOT NULL
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_semantic_snapshots_project
             ON semantic_snapshots(project_id, created_at)",
            [],
        )?;

        Ok(())
    }

    fn row_to_chunk(row: &rusqlite::Row) -> rusqlite::Result<Chunk> {
        let metadata_str: String = row.get(4)?;
        let metadata = serde_json::from_str(&metadata_str).unwrap_or(serde_json::Value::Null);
        Ok(Chunk {
            id: row.get(0)?,
            file_path: row.get(1)?,
            start_line: row.get::<_, i64>(2)? as usize,
            end_line: row.get::<_, i64>(3)? as usize,
            content: row.get(5)?,
            metadata,
        })
    }
}

#[async_trait]
impl CodeSnapshotStore for SqliteSnapshotStore {
    async fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO snapshots (id, repo_id, timestamp, metadata) VALUES (?1, ?2, ?3, ?4)",
            params![
                &snapshot.id,
                &snapshot.repo_id,
                snapshot.timestamp.timestamp(),
                serde_json::to_string(&snapshot.metadata)?
            ],
        )?;
        Ok(())
    }

    async fn get_snapshot(&self, snapshot_id: &str) -> Result<Snapshot> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT id, repo_id, timestamp, metadata FROM snapshots WHERE id = ?1",
            params![snapshot_id],
            |row| {
                let metadata_str: String = row.get(3)?;
                Ok(Snapshot {
                    id: row.get(0)?,
                    repo_id: row.get(1)?,
                    timestamp: DateTime::from_timestamp(row.get(2)?, 0).unwrap_or_default(),
                    metadata: serde_json::from_str(&metadata_str).unwrap_or(serde_json::Value::Null),
                })
            },
        )
        .optional()?
        .ok_or_else(|| StorageError::snapshot_not_found(snapshot_id))
    }

    async fn list_snapshots(&self, repo_id: &str, limit: Option<usize>) -> Result<Vec<Snapshot>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, repo_id, timestamp, metadata FROM snapshots
             WHERE repo_id = ?1 ORDER BY timestamp DESC LIMIT ?2",
        )?;
        let limit = limit.unwrap_or(i64::MAX as usize) as i64;
        let snapshots = stmt
            .query_map(params![repo_id, limit], |row| {
                let metadata_str: String = row.get(3)?;
                Ok(Snapshot {
                    id: row.get(0)?,
                    repo_id: row.get(1)?,
                    timestamp: DateTime::from_timestamp(row.get(2)?, 0).unwrap_or_default(),
                    metadata: serde_json::from_str(&metadata_str).unwrap_or(serde_json::Value::Null),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(snapshots)
    }

    async fn save_chunk(&self, snapshot_id: &str, chunk: &Chunk) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO chunks
             (snapshot_id, id, file_path, start_line, end_line, content, metadata)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                snapshot_id,
                &chunk.id,
                &chunk.file_path,
                chunk.start_line as i64,
                chunk.end_line as i64,
                &chunk.content,
                serde_json::to_string(&chunk.metadata)?
            ],
        )?;
        Ok(())
    }

    async fn save_chunks(&self, snapshot_id: &str, chunks: &[Chunk]) -> Result<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        for chunk in chunks {
            tx.execute(
                "INSERT OR REPLACE INTO chunks
                 (snapshot_id, id, file_path, start_line, end_line, content, metadata)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    snapshot_id,
                    &chunk.id,
                    &chunk.file_path,
                    chunk.start_line as i64,
                    chunk.end_line as i64,
                    &chunk.content,
                    serde_json::to_string(&chunk.metadata)?
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    async fn get_chunks(&self, snapshot_id: &str, file_path: &str) -> Result<Vec<Chunk>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, file_path, start_line, end_line, metadata, content FROM chunks
             WHERE snapshot_id = ?1 AND file_path = ?2 ORDER BY start_line",
        )?;
        let chunks = stmt
            .query_map(params![snapshot_id, file_path], Self::row_to_chunk)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(chunks)
    }

    async fn get_chunk(&self, snapshot_id: &str, chunk_id: &str) -> Result<Chunk> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT id, file_path, start_line, end_line, metadata, content FROM chunks
             WHERE snapshot_id = ?1 AND id = ?2",
            params![snapshot_id, chunk_id],
            Self::row_to_chunk,
        )
        .optional()?
        .ok_or_else(|| StorageError::chunk_not_found(chunk_id))
    }

    async fn replace_file(
        &self,
        repo_id: &str,
        old_commit: &str,
        new_commit: &str,
        file_path: &str,
        chunks: Vec<Chunk>,
    ) -> Result<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT OR REPLACE INTO snapshots (id, repo_id, timestamp, metadata)
             VALUES (?1, ?2, ?3, ?4)",
            params![new_commit, repo_id, Utc::now().timestamp(), "null"],
        )?;

        {
            let mut stmt = tx.prepare(
                "SELECT id, file_path, start_line, end_line, metadata, content FROM chunks
                 WHERE snapshot_id = ?1 AND file_path != ?2",
            )?;
            let carried = stmt
                .query_map(params![old_commit, file_path], Self::row_to_chunk)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            for chunk in carried {
                tx.execute(
                    "INSERT OR REPLACE INTO chunks
                     (snapshot_id, id, file_path, start_line, end_line, content, metadata)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        new_commit,
                        &chunk.id,
                        &chunk.file_path,
                        chunk.start_line as i64,
                        chunk.end_line as i64,
                        &chunk.content,
                        serde_json::to_string(&chunk.metadata)?
                    ],
                )?;
            }
        }

        for chunk in &chunks {
            tx.execute(
                "INSERT OR REPLACE INTO chunks
                 (snapshot_id, id, file_path, start_line, end_line, content, metadata)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    new_commit,
                    &chunk.id,
                    &chunk.file_path,
                    chunk.start_line as i64,
                    chunk.end_line as i64,
                    &chunk.content,
                    serde_json::to_string(&chunk.metadata)?
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    async fn save_dependencies(&self, snapshot_id: &str, dependencies: &[Dependency]) -> Result<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        for dep in dependencies {
            tx.execute(
                "INSERT INTO dependencies (snapshot_id, from_chunk_id, to_chunk_id, dep_type, metadata)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    snapshot_id,
                    &dep.from_chunk_id,
                    &dep.to_chunk_id,
                    &dep.dep_type,
                    serde_json::to_string(&dep.metadata)?
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    async fn get_dependencies(&self, snapshot_id: &str, chunk_id: &str) -> Result<Vec<Dependency>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT from_chunk_id, to_chunk_id, dep_type, metadata FROM dependencies
             WHERE snapshot_id = ?1 AND from_chunk_id = ?2",
        )?;
        let deps = stmt
            .query_map(params![snapshot_id, chunk_id], |row| {
                let metadata_str: String = row.get(3)?;
                Ok(Dependency {
                    from_chunk_id: row.get(0)?,
                    to_chunk_id: row.get(1)?,
                    dep_type: row.get(2)?,
                    metadata: serde_json::from_str(&metadata_str).unwrap_or(serde_json::Value::Null),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(deps)
    }

    async fn save_semantic_snapshot(&self, snapshot: &SemanticSnapshot) -> Result<()> {
        let files_json = serde_json::to_string(&snapshot.files)?;
        let mapping_json = serde_json::to_string(&snapshot.hints)?;

        let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(mapping_json.as_bytes())?;
        let compressed = encoder.finish()?;

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO semantic_snapshots
             (snapshot_id, project_id, files, mapping_gzip, mapping_json, created_at)
             VALUES (?1, ?2, ?3, ?4, NULL, ?5)",
            params![
                &snapshot.snapshot_id,
                &snapshot.project_id,
                files_json,
                compressed,
                snapshot.created_at.timestamp()
            ],
        )?;
        Ok(())
    }

    async fn load_latest_semantic_snapshot(&self, project_id: &str) -> Result<SemanticSnapshot> {
        let conn = self.conn.lock().unwrap();
        let row: Option<(String, String, String, Option<Vec<u8>>, Option<String>, i64)> = conn
            .query_row(
                "SELECT snapshot_id, project_id, files, mapping_gzip, mapping_json, created_at
                 FROM semantic_snapshots WHERE project_id = ?1 ORDER BY created_at DESC LIMIT 1",
                params![project_id],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                    ))
                },
            )
            .optional()?;

        let (snapshot_id, project_id, files_json, mapping_gzip, mapping_json, created_at) =
            row.ok_or_else(|| StorageError::snapshot_not_found(format!("semantic snapshot for project {project_id}")))?;

        let hints_json = if let Some(compressed) = mapping_gzip {
            let mut decoder = flate2::read::GzDecoder::new(compressed.as_slice());
            let mut decompressed = String::new();
            decoder.read_to_string(&mut decompressed)?;
            decompressed
        } else if let Some(legacy) = mapping_json {
            legacy
        } else {
            return Err(StorageError::serialization(
                "semantic snapshot row has neither mapping_gzip nor mapping_json",
            ));
        };

        let files: Vec<String> = serde_json::from_str(&files_json)?;
        let hints: Vec<TypeHint> = serde_json::from_str(&hints_json)?;

        Ok(SemanticSnapshot {
            snapshot_id,
            project_id,
            files,
            hints,
            created_at: DateTime::from_timestamp(created_at, 0).unwrap_or_default(),
        })
    }
}
