//! Tantivy Lexical Index Implementation
//!
//! # Architecture
//!
//! ```text
//! FileToIndex → Extractor → TantivyDocument → IndexWriter → Tantivy Index
//!                              ↓
//!                         ChunkStore (SQLite)
//! ```
//!
//! # Performance Targets
//!
//! - Indexing: 500+ files/s
//! - Search: < 5ms p95
//! - Incremental: < 100ms for 10 files
//!
//! Implements the [`crate::features::indexing::IndexAdapter`] contract.

use crate::features::indexing::{IndexAdapter, IndexAdapterError, IndexKind};
use crate::features::lexical::{
    extractor::{FieldExtractor, RegexExtractor},
    schema::SchemaFields,
    FileToIndex, IndexingResult,
};
use crate::features::storage::ChunkStore;

use rayon::prelude::*;
use std::path::Path;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};
use std::time::{Instant, SystemTime};
use tantivy::{
    collector::TopDocs,
    doc,
    query::QueryParser,
    DateTime, Index, IndexWriter, Term,
};

/// Indexing mode: how aggressively to accept ambiguous spans as indexable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexingMode {
    /// Only index clearly identifiable code.
    Conservative,
    /// Default mode.
    Balanced,
    /// Index everything including tests, generated code.
    Aggressive,
}

impl Default for IndexingMode {
    fn default() -> Self {
        IndexingMode::Balanced
    }
}

/// Tantivy-based lexical search index.
pub struct TantivyLexicalIndex {
    index: Index,
    writer: Arc<Mutex<IndexWriter>>,
    schema_fields: SchemaFields,
    chunk_store: Arc<dyn ChunkStore>,
    mode: IndexingMode,
    repo_id: String,

    total_files_indexed: AtomicU64,
    total_updates: AtomicU64,
    last_rebuild_ms: AtomicU64,
}

impl TantivyLexicalIndex {
    pub fn get_repo_id(&self) -> &str {
        &self.repo_id
    }

    /// Create a new Tantivy lexical index, opening an existing one on disk if present.
    pub fn new(
        index_dir: &Path,
        chunk_store: Arc<dyn ChunkStore>,
        repo_id: String,
        mode: IndexingMode,
    ) -> Result<Self, IndexAdapterError> {
        let schema_fields = SchemaFields::new();

        let index = if index_dir.exists() {
            Index::open_in_dir(index_dir).map_err(|e| {
                IndexAdapterError::Backend(format!("failed to open index: {}", e))
            })?
        } else {
            std::fs::create_dir_all(index_dir)
                .map_err(|e| IndexAdapterError::Backend(format!("failed to create index dir: {}", e)))?;
            Index::create_in_dir(index_dir, schema_fields.schema.clone())
                .map_err(|e| IndexAdapterError::Backend(format!("failed to create index: {}", e)))?
        };

        let writer = index
            .writer(50_000_000)
            .map_err(|e| IndexAdapterError::Backend(format!("failed to create writer: {}", e)))?;

        Ok(Self {
            index,
            writer: Arc::new(Mutex::new(writer)),
            schema_fields,
            chunk_store,
            mode,
            repo_id,
            total_files_indexed: AtomicU64::new(0),
            total_updates: AtomicU64::new(0),
            last_rebuild_ms: AtomicU64::new(0),
        })
    }

    /// Index files in batch (parallel field extraction, single-writer commit).
    pub fn index_files_batch(
        &self,
        files: &[FileToIndex],
        fail_fast: bool,
    ) -> Result<IndexingResult, IndexAdapterError> {
        let start = Instant::now();

        let doc_results: Vec<_> = files.par_iter().map(|file| self.build_document(file)).collect();

        let mut success_count = 0;
        let mut failed_files = Vec::new();
        let mut documents: Vec<tantivy::TantivyDocument> = Vec::new();

        for (file, result) in files.iter().zip(doc_results) {
            match result {
                Ok(doc) => {
                    documents.push(doc);
                    success_count += 1;
                }
                Err(e) => {
                    failed_files.push((file.file_path.clone(), e.to_string()));
                    if fail_fast {
                        return Err(IndexAdapterError::Backend(format!(
                            "failed to index {}: {}",
                            file.file_path, e
                        )));
                    }
                }
            }
        }

        // Atomic upsert (delete-by-term then re-add) keeps the index consistent
        // under re-indexing of unchanged files.
        let mut writer = self.writer.lock().unwrap();

        for (file, doc) in files.iter().zip(&documents) {
            let file_term = Term::from_field_text(self.schema_fields.file_path, &file.file_path);
            writer.delete_term(file_term);
            writer
                .add_document(doc.clone())
                .map_err(|e| IndexAdapterError::Backend(format!("failed to add document: {}", e)))?;
        }

        writer
            .commit()
            .map_err(|e| IndexAdapterError::Backend(format!("failed to commit: {}", e)))?;

        drop(writer);

        self.total_files_indexed
            .fetch_add(success_count as u64, Ordering::Relaxed);
        self.total_updates.fetch_add(1, Ordering::Relaxed);

        Ok(IndexingResult {
            total_files: files.len(),
            success_count,
            failed_files,
            duration_seconds: start.elapsed().as_secs_f64(),
        })
    }

    /// Delete all documents belonging to the given files.
    pub fn delete_files(&self, file_paths: &[String]) -> Result<(), IndexAdapterError> {
        let mut writer = self.writer.lock().unwrap();
        for path in file_paths {
            let term = Term::from_field_text(self.schema_fields.file_path, path);
            writer.delete_term(term);
        }
        writer
            .commit()
            .map_err(|e| IndexAdapterError::Backend(format!("failed to commit deletion: {}", e)))?;
        Ok(())
    }

    fn build_document(&self, file: &FileToIndex) -> Result<tantivy::TantivyDocument, IndexAdapterError> {
        let fields = RegexExtractor::extract(&file.content);

        let timestamp = DateTime::from_timestamp_secs(
            SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .unwrap()
                .as_secs() as i64,
        );

        let mut doc = doc!(
            self.schema_fields.content => file.content.clone(),
            self.schema_fields.file_path => file.file_path.clone(),
            self.schema_fields.repo_id => file.repo_id.clone(),
            self.schema_fields.indexed_at => timestamp,
        );

        if !fields.string_literals.is_empty() {
            doc.add_text(self.schema_fields.string_literals, &fields.string_literals);
        }
        if !fields.comments.is_empty() {
            doc.add_text(self.schema_fields.comments, &fields.comments);
        }
        if !fields.docstrings.is_empty() {
            doc.add_text(self.schema_fields.docstring, &fields.docstrings);
        }

        Ok(doc)
    }

    /// BM25 search across content/comments/docstring/string-literal fields.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, IndexAdapterError> {
        let reader = self
            .index
            .reader()
            .map_err(|e| IndexAdapterError::Backend(format!("failed to create reader: {}", e)))?;
        let searcher = reader.searcher();

        let query_parser = QueryParser::for_index(
            &self.index,
            vec![
                self.schema_fields.content,
                self.schema_fields.comments,
                self.schema_fields.docstring,
                self.schema_fields.string_literals,
            ],
        );

        let parsed_query = query_parser
            .parse_query(query)
            .map_err(|e| IndexAdapterError::InvalidInput(format!("invalid query: {}", e)))?;

        let top_docs = searcher
            .search(&parsed_query, &TopDocs::with_limit(limit))
            .map_err(|e| IndexAdapterError::Backend(format!("search failed: {}", e)))?;

        let mut hits = Vec::new();
        for (score, doc_address) in top_docs {
            let doc: tantivy::TantivyDocument = searcher
                .doc(doc_address)
                .map_err(|e| IndexAdapterError::Backend(format!("failed to retrieve doc: {}", e)))?;

            let file_path = doc
                .get_first(self.schema_fields.file_path)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            let content = doc
                .get_first(self.schema_fields.content)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();

            // Tantivy documents are file-granular, not chunk-granular, so the
            // chunk store (which is chunk-granular) cannot resolve a real
            // chunk_id synchronously here. Fall back to a virtual, file-scoped
            // id so fusion scoring still has a stable grouping key; callers
            // that need the real chunk_id re-resolve it against chunk_store.
            let chunk_id = format!("virtual:{}:{}", self.repo_id, file_path);

            hits.push(SearchHit {
                file_path,
                content,
                score: score as f64,
                chunk_id,
            });
        }

        Ok(hits)
    }
}

/// Search result hit.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchHit {
    pub file_path: String,
    pub content: String,
    pub score: f64,
    pub chunk_id: String,
}

impl IndexAdapter for TantivyLexicalIndex {
    fn kind(&self) -> IndexKind {
        IndexKind::Lexical
    }

    fn reindex_repo(&self, files: &[FileToIndex]) -> Result<usize, IndexAdapterError> {
        self.delete_files(
            &files
                .iter()
                .map(|f| f.file_path.clone())
                .collect::<Vec<_>>(),
        )
        .ok(); // best effort; index_files_batch re-upserts anyway
        let result = self.index_files_batch(files, false)?;
        self.last_rebuild_ms
            .store(0, Ordering::Relaxed);
        Ok(result.success_count)
    }

    fn reindex_paths(&self, files: &[FileToIndex]) -> Result<usize, IndexAdapterError> {
        let result = self.index_files_batch(files, false)?;
        Ok(result.success_count)
    }

    fn delete(&self, file_paths: &[String]) -> Result<(), IndexAdapterError> {
        self.delete_files(file_paths)
    }

    fn search(&self, query: &str, limit: usize) -> Result<Vec<crate::features::indexing::AdapterHit>, IndexAdapterError> {
        Ok(self
            .search(query, limit)?
            .into_iter()
            .map(|hit| crate::features::indexing::AdapterHit {
                chunk_id: hit.chunk_id,
                file_path: hit.file_path,
                snippet: hit.content,
                score: hit.score,
            })
            .collect())
    }
}
