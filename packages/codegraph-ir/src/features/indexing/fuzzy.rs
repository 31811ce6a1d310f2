//! Fuzzy index adapter: typo-tolerant identifier search using edit distance.

use super::symbol::crude_top_level_identifiers;
use super::{AdapterHit, FileToIndex, IndexAdapter, IndexAdapterError, IndexKind};
use dashmap::DashMap;

struct Entry {
    file_path: String,
    snippet: String,
}

/// In-memory fuzzy adapter scoring candidates by normalized Levenshtein
/// distance against the query; anything over `MAX_DISTANCE_RATIO` of the
/// query length is dropped rather than ranked last, so a three-character
/// query doesn't drag in arbitrary long identifiers.
pub struct FuzzyIndexAdapter {
    entries: DashMap<String, Entry>,
}

const MAX_DISTANCE_RATIO: f64 = 0.5;

impl FuzzyIndexAdapter {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl Default for FuzzyIndexAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexAdapter for FuzzyIndexAdapter {
    fn kind(&self) -> IndexKind {
        IndexKind::Fuzzy
    }

    fn reindex_repo(&self, files: &[FileToIndex]) -> Result<usize, IndexAdapterError> {
        self.entries.clear();
        self.reindex_paths(files)
    }

    fn reindex_paths(&self, files: &[FileToIndex]) -> Result<usize, IndexAdapterError> {
        let mut count = 0;
        for file in files {
            for (name, snippet) in crude_top_level_identifiers(&file.content) {
                self.entries.insert(
                    format!("{}::{}", file.file_path, name),
                    Entry {
                        file_path: file.file_path.clone(),
                        snippet,
                    },
                );
                count += 1;
            }
        }
        Ok(count)
    }

    fn delete(&self, file_paths: &[String]) -> Result<(), IndexAdapterError> {
        let to_delete: Vec<String> = self
            .entries
            .iter()
            .filter(|e| file_paths.contains(&e.value().file_path))
            .map(|e| e.key().clone())
            .collect();
        for key in to_delete {
            self.entries.remove(&key);
        }
        Ok(())
    }

    fn search(&self, query: &str, limit: usize) -> Result<Vec<AdapterHit>, IndexAdapterError> {
        if query.is_empty() {
            return Err(IndexAdapterError::InvalidInput("query cannot be empty".into()));
        }
        let mut hits: Vec<AdapterHit> = self
            .entries
            .iter()
            .filter_map(|e| {
                let name = e.key().rsplit("::").next().unwrap_or(e.key());
                let dist = levenshtein(query, name);
                let max_len = query.len().max(name.len()).max(1);
                let ratio = dist as f64 / max_len as f64;
                if ratio > MAX_DISTANCE_RATIO {
                    return None;
                }
                Some(AdapterHit {
                    chunk_id: format!("fuzzy:{}", e.key()),
                    file_path: e.value().file_path.clone(),
                    snippet: e.value().snippet.clone(),
                    score: 1.0 - ratio,
                })
            })
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
        hits.truncate(limit);
        Ok(hits)
    }
}

/// Classic iterative Levenshtein edit distance.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for i in 1..=a.len() {
        let mut prev = row[0];
        row[0] = i;
        for j in 1..=b.len() {
            let tmp = row[j];
            row[j] = if a[i - 1] == b[j - 1] {
                prev
            } else {
                1 + prev.min(row[j]).min(row[j - 1])
            };
            prev = tmp;
        }
    }
    row[b.len()]
}
