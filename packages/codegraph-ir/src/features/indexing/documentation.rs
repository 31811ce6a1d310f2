//! Documentation index adapter: routes docstring-bearing chunks and answers
//! queries against docstrings/comments only, separate from code-body search.

use super::{AdapterHit, FileToIndex, IndexAdapter, IndexAdapterError, IndexKind};
use crate::features::lexical::extractor::{FieldExtractor, RegexExtractor};
use dashmap::DashMap;

struct Entry {
    file_path: String,
    docstring: String,
}

/// Classifies a file's extracted docstring/comment text as documentation and
/// makes it searchable independently of the lexical (code-body) index. A
/// file with no docstring content is not indexed here at all.
pub struct DocumentationIndexAdapter {
    entries: DashMap<String, Entry>,
}

impl DocumentationIndexAdapter {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl Default for DocumentationIndexAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexAdapter for DocumentationIndexAdapter {
    fn kind(&self) -> IndexKind {
        IndexKind::Documentation
    }

    fn reindex_repo(&self, files: &[FileToIndex]) -> Result<usize, IndexAdapterError> {
        self.entries.clear();
        self.reindex_paths(files)
    }

    fn reindex_paths(&self, files: &[FileToIndex]) -> Result<usize, IndexAdapterError> {
        let mut count = 0;
        for file in files {
            let fields = RegexExtractor::extract(&file.content);
            let doc_text = if fields.docstrings.is_empty() {
                fields.comments
            } else {
                fields.docstrings
            };
            if doc_text.trim().is_empty() {
                self.entries.remove(&file.file_path);
                continue;
            }
            self.entries.insert(
                file.file_path.clone(),
                Entry {
                    file_path: file.file_path.clone(),
                    docstring: doc_text,
                },
            );
            count += 1;
        }
        Ok(count)
    }

    fn delete(&self, file_paths: &[String]) -> Result<(), IndexAdapterError> {
        for path in file_paths {
            self.entries.remove(path);
        }
        Ok(())
    }

    fn search(&self, query: &str, limit: usize) -> Result<Vec<AdapterHit>, IndexAdapterError> {
        let query_lower = query.to_lowercase();
        let mut hits: Vec<AdapterHit> = self
            .entries
            .iter()
            .filter(|e| e.value().docstring.to_lowercase().contains(&query_lower))
            .map(|e| AdapterHit {
                chunk_id: format!("doc:{}", e.key()),
                file_path: e.value().file_path.clone(),
                snippet: e.value().docstring.clone(),
                score: e
                    .value()
                    .docstring
                    .to_lowercase()
                    .matches(&query_lower)
                    .count() as f64,
            })
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
        hits.truncate(limit);
        Ok(hits)
    }
}
