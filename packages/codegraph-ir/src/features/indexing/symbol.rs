//! Symbol index adapter: substring search plus callers/callees/shortest-path
//! queries over the cross-file symbol graph.

use super::{AdapterHit, FileToIndex, IndexAdapter, IndexAdapterError, IndexKind};
use crate::features::cross_file::SymbolDependencyGraph;
use dashmap::DashMap;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

/// A single named symbol indexed for substring lookup.
#[derive(Debug, Clone)]
struct SymbolEntry {
    file_path: String,
    snippet: String,
}

/// In-memory symbol adapter. Reindexing extracts one entry per exported
/// top-level identifier found via a cheap heuristic scan (the full parser
/// pipeline populates this adapter's backing data via `index_symbols`);
/// `search` is a case-insensitive substring match over symbol names.
pub struct SymbolIndexAdapter {
    symbols: DashMap<String, SymbolEntry>,
    graph: Arc<SymbolDependencyGraph>,
}

impl SymbolIndexAdapter {
    pub fn new(graph: Arc<SymbolDependencyGraph>) -> Self {
        Self {
            symbols: DashMap::new(),
            graph,
        }
    }

    /// Record a resolved symbol so it becomes searchable. Called by the
    /// cross-file stage once a file's symbols are resolved.
    pub fn index_symbol(&self, name: &str, file_path: &str, snippet: &str) {
        self.symbols.insert(
            name.to_string(),
            SymbolEntry {
                file_path: file_path.to_string(),
                snippet: snippet.to_string(),
            },
        );
    }

    pub fn callers(&self, symbol_id: &str) -> Vec<String> {
        self.graph
            .call_graph()
            .map(|cg| cg.get_callers(symbol_id))
            .unwrap_or_default()
    }

    pub fn callees(&self, symbol_id: &str) -> Vec<String> {
        self.graph
            .call_graph()
            .map(|cg| cg.get_callees(symbol_id))
            .unwrap_or_default()
    }

    /// BFS shortest path over the call graph's callee edges. Cycle-safe via
    /// a visited set; returns `None` if `to` is unreachable from `from`, or if
    /// the graph has no call-graph slice at all.
    pub fn shortest_path(&self, from: &str, to: &str) -> Option<Vec<String>> {
        if from == to {
            return Some(vec![from.to_string()]);
        }
        let call_graph = self.graph.call_graph()?;
        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<Vec<String>> = VecDeque::new();
        queue.push_back(vec![from.to_string()]);
        visited.insert(from.to_string());

        while let Some(path) = queue.pop_front() {
            let current = path.last().unwrap().clone();
            for next in call_graph.get_callees(&current) {
                if next == to {
                    let mut full = path.clone();
                    full.push(next);
                    return Some(full);
                }
                if visited.insert(next.clone()) {
                    let mut extended = path.clone();
                    extended.push(next);
                    queue.push_back(extended);
                }
            }
        }
        None
    }
}

impl IndexAdapter for SymbolIndexAdapter {
    fn kind(&self) -> IndexKind {
        IndexKind::Symbol
    }

    fn reindex_repo(&self, files: &[FileToIndex]) -> Result<usize, IndexAdapterError> {
        self.symbols.clear();
        self.reindex_paths(files)
    }

    fn reindex_paths(&self, files: &[FileToIndex]) -> Result<usize, IndexAdapterError> {
        let mut count = 0;
        for file in files {
            for (name, snippet) in crude_top_level_identifiers(&file.content) {
                self.index_symbol(&name, &file.file_path, &snippet);
                count += 1;
            }
        }
        Ok(count)
    }

    fn delete(&self, file_paths: &[String]) -> Result<(), IndexAdapterError> {
        let to_delete: Vec<String> = self
            .symbols
            .iter()
            .filter(|e| file_paths.contains(&e.value().file_path))
            .map(|e| e.key().clone())
            .collect();
        for key in to_delete {
            self.symbols.remove(&key);
        }
        Ok(())
    }

    fn search(&self, query: &str, limit: usize) -> Result<Vec<AdapterHit>, IndexAdapterError> {
        let query_lower = query.to_lowercase();
        let mut hits: Vec<AdapterHit> = self
            .symbols
            .iter()
            .filter(|e| e.key().to_lowercase().contains(&query_lower))
            .map(|e| AdapterHit {
                chunk_id: format!("symbol:{}:{}", e.value().file_path, e.key()),
                file_path: e.value().file_path.clone(),
                snippet: e.value().snippet.clone(),
                score: if e.key().to_lowercase() == query_lower {
                    1.0
                } else {
                    0.5
                },
            })
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
        hits.truncate(limit);
        Ok(hits)
    }
}

/// Cheap heuristic identifier scan shared by the symbol and fuzzy adapters:
/// not a parser, just enough to make search over un-parsed fixtures work.
pub(crate) fn crude_top_level_identifiers(content: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim_start();
        for prefix in ["fn ", "def ", "function ", "class ", "struct ", "pub fn "] {
            if let Some(rest) = trimmed.strip_prefix(prefix) {
                if let Some(name) = rest
                    .split(|c: char| !c.is_alphanumeric() && c != '_')
                    .next()
                {
                    if !name.is_empty() {
                        out.push((name.to_string(), line.trim().to_string()));
                    }
                }
            }
        }
    }
    out
}
