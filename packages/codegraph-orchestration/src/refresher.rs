//! Incremental chunk refresher: recomputes only the chunks touching changed
//! symbols or files, classifying the result into five disjoint sets instead
//! of re-emitting a full chunk list.
//!
//! The comparison key is `(symbol_id, content_hash)`: two chunks with the
//! same `symbol_id` and the same `content_hash` are the same chunk
//! unchanged (modulo a possible span drift); a `symbol_id` match with a
//! different `content_hash` is an update; a `content_hash` match under a
//! different `symbol_id`/`file_path` with no `symbol_id` match is a rename;
//! anything left over is either newly added or deleted.

use std::collections::HashMap;

use codegraph_ir::features::chunking::Chunk;
use serde::{Deserialize, Serialize};

use crate::change_detector::ChangeSet;

/// One symbol moving from `old_chunk_id`/`old_fqn` to `new_chunk_id`/`new_fqn`
/// while its content hash stayed the same.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenamedChunk {
    pub old_chunk_id: String,
    pub new_chunk_id: String,
    pub old_fqn: String,
    pub new_fqn: String,
}

/// Output of [`ChunkRefresher::diff`]: five disjoint sets over the chunks
/// touched by a revision.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshReport {
    pub added_chunks: Vec<Chunk>,
    pub updated_chunks: Vec<Chunk>,
    pub deleted_chunk_ids: Vec<String>,
    pub renamed_chunks: Vec<RenamedChunk>,
    /// Chunks whose content is unchanged but whose line span moved (e.g. an
    /// edit earlier in the file shifted everything below it).
    pub drifted_chunks: Vec<Chunk>,
}

impl RefreshReport {
    pub fn total_touched(&self) -> usize {
        self.added_chunks.len()
            + self.updated_chunks.len()
            + self.deleted_chunk_ids.len()
            + self.renamed_chunks.len()
            + self.drifted_chunks.len()
    }
}

#[derive(Default)]
pub struct ChunkRefresher;

impl ChunkRefresher {
    pub fn new() -> Self {
        Self
    }

    /// Classify `current` against `previous`. Chunks without a `symbol_id`
    /// are compared by `chunk_id` instead, since file-structural chunks
    /// (module/file-level) have no symbol to key on.
    pub fn diff(&self, previous: &[Chunk], current: &[Chunk]) -> RefreshReport {
        let mut report = RefreshReport::default();

        let previous_by_key: HashMap<&str, &Chunk> =
            previous.iter().map(|c| (Self::key(c), c)).collect();
        let mut matched_previous: std::collections::HashSet<&str> = std::collections::HashSet::new();

        // content_hash -> previous chunks not yet matched by key, for rename detection.
        let mut previous_by_hash: HashMap<&str, Vec<&Chunk>> = HashMap::new();
        for c in previous {
            if let Some(hash) = c.content_hash.as_deref() {
                previous_by_hash.entry(hash).or_default().push(c);
            }
        }

        for chunk in current {
            let key = Self::key(chunk);
            if let Some(prev) = previous_by_key.get(key) {
                matched_previous.insert(key);
                if prev.content_hash == chunk.content_hash {
                    if Self::span_drifted(prev, chunk) {
                        report.drifted_chunks.push(chunk.clone());
                    }
                    // else: fully unchanged, not reported.
                } else {
                    report.updated_chunks.push(chunk.clone());
                }
                continue;
            }

            // No direct key match: look for a rename (same content hash,
            // different symbol/location) among not-yet-matched previous chunks.
            let rename_source = chunk
                .content_hash
                .as_deref()
                .and_then(|hash| previous_by_hash.get(hash))
                .and_then(|candidates| {
                    candidates
                        .iter()
                        .find(|c| !matched_previous.contains(Self::key(c)) && Self::key(c) != key)
                });

            if let Some(prev) = rename_source {
                matched_previous.insert(Self::key(prev));
                report.renamed_chunks.push(RenamedChunk {
                    old_chunk_id: prev.chunk_id.clone(),
                    new_chunk_id: chunk.chunk_id.clone(),
                    old_fqn: prev.fqn.clone(),
                    new_fqn: chunk.fqn.clone(),
                });
            } else {
                report.added_chunks.push(chunk.clone());
            }
        }

        for chunk in previous {
            if !matched_previous.contains(Self::key(chunk)) {
                report.deleted_chunk_ids.push(chunk.chunk_id.clone());
            }
        }

        report
    }

    /// Fold file-level deletions from a [`ChangeSet`] into a diff: chunks
    /// belonging to a deleted file are always deleted, regardless of
    /// whether their symbol/content-hash key still matches something.
    pub fn diff_with_change_set(&self, previous: &[Chunk], current: &[Chunk], changes: &ChangeSet) -> RefreshReport {
        let mut report = self.diff(previous, current);

        let deleted_files: std::collections::HashSet<&str> =
            changes.deleted.iter().map(|s| s.as_str()).collect();
        if deleted_files.is_empty() {
            return report;
        }

        for chunk in previous {
            let in_deleted_file = chunk
                .file_path
                .as_deref()
                .map(|f| deleted_files.contains(f))
                .unwrap_or(false);
            if in_deleted_file && !report.deleted_chunk_ids.contains(&chunk.chunk_id) {
                report.deleted_chunk_ids.push(chunk.chunk_id.clone());
            }
        }

        // A chunk from a deleted file can't also be a rename target/source;
        // drop any that slipped in via the hash-based rename search.
        report
            .renamed_chunks
            .retain(|r| !report.deleted_chunk_ids.contains(&r.old_chunk_id));

        report
    }

    fn key(chunk: &Chunk) -> &str {
        chunk.symbol_id.as_deref().unwrap_or(chunk.chunk_id.as_str())
    }

    fn span_drifted(previous: &Chunk, current: &Chunk) -> bool {
        previous.start_line != current.start_line || previous.end_line != current.end_line
    }
}
