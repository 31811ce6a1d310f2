//! LRU cache for parsed tree-sitter ASTs.
//!
//! The BFG builder re-parses function bodies out of raw source rather than
//! threading the tree-sitter tree through the IR pipeline, so repeated BFG
//! builds for functions in the same file would otherwise re-parse the whole
//! file every time. Capacity scales with repo size so small repos don't pay
//! for an oversized cache and large repos don't thrash.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use tree_sitter::Tree;

/// Small/medium/large repo capacity tiers (entries, not bytes).
const SMALL_REPO_CAPACITY: usize = 30;
const MEDIUM_REPO_CAPACITY: usize = 100;
const LARGE_REPO_CAPACITY: usize = 300;

const MEDIUM_REPO_FILE_THRESHOLD: usize = 200;
const LARGE_REPO_FILE_THRESHOLD: usize = 2000;

/// Pick an AST cache capacity from a repo's file count.
pub fn capacity_for_repo_size(file_count: usize) -> usize {
    if file_count >= LARGE_REPO_FILE_THRESHOLD {
        LARGE_REPO_CAPACITY
    } else if file_count >= MEDIUM_REPO_FILE_THRESHOLD {
        MEDIUM_REPO_CAPACITY
    } else {
        SMALL_REPO_CAPACITY
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
    pub capacity: usize,
}

struct Inner {
    cache: LruCache<String, Arc<Tree>>,
    hits: u64,
    misses: u64,
}

/// Thread-safe LRU cache of parsed trees keyed by a caller-supplied key
/// (typically `blake3(source)` or `file_path:content_hash`).
pub struct AstCache {
    inner: Mutex<Inner>,
    capacity: usize,
}

impl AstCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Mutex::new(Inner {
                cache: LruCache::new(NonZeroUsize::new(capacity).unwrap()),
                hits: 0,
                misses: 0,
            }),
            capacity,
        }
    }

    pub fn for_repo_size(file_count: usize) -> Self {
        Self::new(capacity_for_repo_size(file_count))
    }

    /// Return the cached tree for `key`, or parse `source` with `parse` and cache it.
    pub fn get_or_parse<F>(&self, key: &str, parse: F) -> Option<Arc<Tree>>
    where
        F: FnOnce() -> Option<Tree>,
    {
        {
            let mut inner = self.inner.lock();
            if let Some(tree) = inner.cache.get(key) {
                inner.hits += 1;
                return Some(Arc::clone(tree));
            }
        }

        let tree = parse()?;
        let arc = Arc::new(tree);
        let mut inner = self.inner.lock();
        inner.misses += 1;
        inner.cache.put(key.to_string(), Arc::clone(&arc));
        Some(arc)
    }

    pub fn get_cache_stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            len: inner.cache.len(),
            capacity: self.capacity,
        }
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.cache.clear();
    }
}
