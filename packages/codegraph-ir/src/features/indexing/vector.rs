//! Vector index adapter port.
//!
//! The real embedding model and vector store are external collaborators
//! (Non-goal: no bespoke vector database ships here). This in-memory
//! reference implementation hashes each document into a small deterministic
//! bag-of-trigrams vector and ranks by cosine similarity, so the adapter
//! contract and fusion pipeline are exercisable end to end without a real
//! embedding service behind the port.

use super::{AdapterHit, FileToIndex, IndexAdapter, IndexAdapterError, IndexKind};
use dashmap::DashMap;

const DIMS: usize = 64;

struct Entry {
    file_path: String,
    snippet: String,
    vector: [f32; DIMS],
}

pub struct VectorIndexAdapter {
    entries: DashMap<String, Entry>,
}

impl VectorIndexAdapter {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    fn embed(text: &str) -> [f32; DIMS] {
        let mut v = [0f32; DIMS];
        let bytes = text.as_bytes();
        if bytes.len() < 3 {
            return v;
        }
        for window in bytes.windows(3) {
            let mut h: u32 = 2166136261;
            for b in window {
                h ^= *b as u32;
                h = h.wrapping_mul(16777619);
            }
            v[(h as usize) % DIMS] += 1.0;
        }
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in v.iter_mut() {
                *x /= norm;
            }
        }
        v
    }

    fn cosine(a: &[f32; DIMS], b: &[f32; DIMS]) -> f64 {
        let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        dot as f64
    }
}

impl Default for VectorIndexAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexAdapter for VectorIndexAdapter {
    fn kind(&self) -> IndexKind {
        IndexKind::Vector
    }

    fn reindex_repo(&self, files: &[FileToIndex]) -> Result<usize, IndexAdapterError> {
        self.entries.clear();
        self.reindex_paths(files)
    }

    fn reindex_paths(&self, files: &[FileToIndex]) -> Result<usize, IndexAdapterError> {
        for file in files {
            self.entries.insert(
                file.file_path.clone(),
                Entry {
                    file_path: file.file_path.clone(),
                    snippet: file.content.chars().take(200).collect(),
                    vector: Self::embed(&file.content),
                },
            );
        }
        Ok(files.len())
    }

    fn delete(&self, file_paths: &[String]) -> Result<(), IndexAdapterError> {
        for path in file_paths {
            self.entries.remove(path);
        }
        Ok(())
    }

    fn search(&self, query: &str, limit: usize) -> Result<Vec<AdapterHit>, IndexAdapterError> {
        let query_vec = Self::embed(query);
        let mut hits: Vec<AdapterHit> = self
            .entries
            .iter()
            .map(|e| AdapterHit {
                chunk_id: format!("vector:{}", e.key()),
                file_path: e.value().file_path.clone(),
                snippet: e.value().snippet.clone(),
                score: Self::cosine(&query_vec, &e.value().vector),
            })
            .filter(|h| h.score > 0.0)
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
        hits.truncate(limit);
        Ok(hits)
    }
}
