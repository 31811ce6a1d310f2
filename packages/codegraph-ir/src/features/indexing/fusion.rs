//! Weighted fusion of per-adapter search hits into a single ranked list.

use super::{AdapterHit, IndexKind};
use std::collections::HashMap;

/// Per-index-kind weight used when fusing hits. Missing kinds default to 1.0.
#[derive(Debug, Clone)]
pub struct FusionWeights(HashMap<IndexKind, f64>);

impl Default for FusionWeights {
    fn default() -> Self {
        let mut w = HashMap::new();
        w.insert(IndexKind::Lexical, 1.0);
        w.insert(IndexKind::Vector, 1.2);
        w.insert(IndexKind::Symbol, 1.1);
        w.insert(IndexKind::Fuzzy, 0.6);
        w.insert(IndexKind::Documentation, 0.8);
        FusionWeights(w)
    }
}

impl FusionWeights {
    pub fn weight_of(&self, kind: IndexKind) -> f64 {
        *self.0.get(&kind).unwrap_or(&1.0)
    }

    pub fn set(&mut self, kind: IndexKind, weight: f64) {
        self.0.insert(kind, weight);
    }
}

/// A fused search hit, carrying the per-kind scores it was built from.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FusedHit {
    pub chunk_id: String,
    pub file_path: String,
    pub snippet: String,
    pub score: f64,
    pub contributing_kinds: Vec<IndexKind>,
}

/// Fuse per-adapter hits into one ranked list.
///
/// Hits are grouped by `chunk_id`. Each group's score is the weighted sum of
/// its contributing adapters' scores, divided by the sum of the weights that
/// actually contributed — so a chunk found by every adapter and one found by
/// only the best-weighted adapter are compared on the same 0..max-score
/// scale rather than the sparse one being penalised for absent adapters.
pub fn fuse_hits(per_adapter: &[(IndexKind, Vec<AdapterHit>)], weights: &FusionWeights) -> Vec<FusedHit> {
    struct Group {
        file_path: String,
        snippet: String,
        weighted_sum: f64,
        weight_total: f64,
        kinds: Vec<IndexKind>,
    }

    let mut groups: HashMap<String, Group> = HashMap::new();

    for (kind, hits) in per_adapter {
        let w = weights.weight_of(*kind);
        for hit in hits {
            let entry = groups.entry(hit.chunk_id.clone()).or_insert_with(|| Group {
                file_path: hit.file_path.clone(),
                snippet: hit.snippet.clone(),
                weighted_sum: 0.0,
                weight_total: 0.0,
                kinds: Vec::new(),
            });
            entry.weighted_sum += hit.score * w;
            entry.weight_total += w;
            entry.kinds.push(*kind);
        }
    }

    let mut fused: Vec<FusedHit> = groups
        .into_iter()
        .map(|(chunk_id, g)| FusedHit {
            chunk_id,
            file_path: g.file_path,
            snippet: g.snippet,
            score: if g.weight_total > 0.0 {
                g.weighted_sum / g.weight_total
            } else {
                0.0
            },
            contributing_kinds: g.kinds,
        })
        .collect();

    fused.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    fused
}
