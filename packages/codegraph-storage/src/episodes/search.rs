//! Scoring helpers for [`super::EpisodeStore::hybrid_search`]: cosine
//! similarity over embeddings, token-set + edit-distance fuzzy matching, and
//! stopword-filtered keyword overlap — combined by weighted sum, matching
//! the original `hybrid_search`'s three signals.

use std::collections::HashSet;

use super::Episode;

/// Per-signal weights for hybrid retrieval. Normalized to sum to 1.0 before
/// use so callers can pass arbitrary positive ratios.
#[derive(Debug, Clone, Copy)]
pub struct HybridSearchWeights {
    pub semantic: f64,
    pub fuzzy: f64,
    pub keyword: f64,
}

impl Default for HybridSearchWeights {
    fn default() -> Self {
        Self {
            semantic: 0.4,
            fuzzy: 0.3,
            keyword: 0.3,
        }
    }
}

impl HybridSearchWeights {
    pub fn normalized(self) -> Self {
        let total = self.semantic + self.fuzzy + self.keyword;
        if total <= 0.0 {
            return Self::default();
        }
        Self {
            semantic: self.semantic / total,
            fuzzy: self.fuzzy / total,
            keyword: self.keyword / total,
        }
    }
}

/// Narrows candidate episodes before scoring.
#[derive(Debug, Clone, Default)]
pub struct RetrievalFilter {
    pub project_id: Option<String>,
    pub task_type: Option<String>,
    pub error_type: Option<String>,
}

impl RetrievalFilter {
    pub fn matches(&self, episode: &Episode) -> bool {
        if let Some(project_id) = &self.project_id {
            if &episode.project_id != project_id {
                return false;
            }
        }
        if let Some(task_type) = &self.task_type {
            if &episode.task_type != task_type {
                return false;
            }
        }
        if let Some(error_type) = &self.error_type {
            if !episode.error_types.iter().any(|e| e == error_type) {
                return false;
            }
        }
        true
    }
}

/// Cosine similarity between two equal-length embeddings; 0.0 if either is
/// empty or the lengths disagree (callers should guard against this, but a
/// mismatched embedding should never panic a retrieval query).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.is_empty() || b.is_empty() || a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)) as f64
}

/// Fuzzy text similarity: 50/50 blend of token-set overlap ratio and
/// normalized Levenshtein distance, matching the original's
/// `token_set_ratio` + edit-distance combination.
pub fn fuzzy_similarity(query: &str, candidate: &str) -> f64 {
    if query.is_empty() || candidate.is_empty() {
        return 0.0;
    }
    let token_set = token_set_ratio(query, candidate);
    let edit = 1.0 - normalized_levenshtein(query, candidate);
    0.5 * token_set + 0.5 * edit
}

fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: HashSet<String> = a.to_lowercase().split_whitespace().map(String::from).collect();
    let tokens_b: HashSet<String> = b.to_lowercase().split_whitespace().map(String::from).collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }
    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

fn normalized_levenshtein(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let max_len = a.len().max(b.len()).max(1);

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
    row[b.len()] as f64 / max_len as f64
}

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "from", "into", "have", "has", "was", "were",
    "are", "but", "not", "can", "all", "out", "use", "used",
];

/// Overlap of significant (3+ char, non-stopword) words, divided by the
/// smaller word-set size — matching the original's keyword scorer.
pub fn keyword_overlap(query: &str, candidate: &str) -> f64 {
    let words = |s: &str| -> HashSet<String> {
        s.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.len() >= 3 && !STOPWORDS.contains(w))
            .map(String::from)
            .collect()
    };
    let q = words(query);
    let c = words(candidate);
    if q.is_empty() || c.is_empty() {
        return 0.0;
    }
    let intersection = q.intersection(&c).count();
    let min_size = q.len().min(c.len());
    if min_size == 0 {
        0.0
    } else {
        intersection as f64 / min_size as f64
    }
}
