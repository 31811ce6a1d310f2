use crate::error::Result;
use crate::pipeline::StageMetrics;
use rayon::prelude::*;
use std::path::Path;
use tracing::{info, warn};

/// Lexical index adapter - Tantivy-based full-text search.
///
/// One of the five adapters the multi-index stage dispatches in parallel;
/// has no dependencies of its own beyond the file list.
pub struct LexicalAdapter {
    // Will be initialized with a real Tantivy index when available.
    _phantom: std::marker::PhantomData<()>,
}

impl LexicalAdapter {
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }

    pub fn index(&self, files: &[&Path]) -> Result<(Vec<u8>, StageMetrics)> {
        let start = std::time::Instant::now();
        info!("LexicalAdapter: indexing {} files", files.len());

        let results: Vec<Result<Vec<u8>>> = files
            .par_iter()
            .map(|file_path| {
                let content = std::fs::read_to_string(file_path).map_err(|e| {
                    warn!("Failed to read {} for indexing: {}", file_path.display(), e);
                    e
                })?;

                // TODO: Use Tantivy to index the file
                let token_count = content.split_whitespace().count();
                let placeholder_index = format!(
                    "INDEX:{}:{}:{}",
                    file_path.display(),
                    content.len(),
                    token_count
                );
                Ok(placeholder_index.into_bytes())
            })
            .collect();

        let mut all_index_data = Vec::new();
        let mut errors = Vec::new();
        let mut files_processed = 0;
        let mut nodes_created = 0;

        for (idx, result) in results.into_iter().enumerate() {
            match result {
                Ok(index_data) => {
                    nodes_created += 100; // Placeholder: ~100 tokens per file
                    all_index_data.extend(index_data);
                    files_processed += 1;
                }
                Err(e) => {
                    errors.push(format!("File {}: {}", files[idx].display(), e));
                }
            }
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "LexicalAdapter: indexed {} files ({} tokens) in {}ms ({} errors)",
            files_processed,
            nodes_created,
            duration_ms,
            errors.len()
        );

        let cache_data = bincode::serialize(&all_index_data)?;
        Ok((
            cache_data,
            StageMetrics {
                files_processed,
                nodes_created,
                chunks_created: 0,
                duration_ms,
                errors,
            },
        ))
    }
}

impl Default for LexicalAdapter {
    fn default() -> Self {
        Self::new()
    }
}
