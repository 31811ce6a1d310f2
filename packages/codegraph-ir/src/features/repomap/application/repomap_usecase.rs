//! RepoMap UseCase Implementation

use crate::features::repomap::domain::RepoMapNode;
use crate::features::repomap::infrastructure::PageRankSettings;

/// Input for RepoMap generation
pub struct RepoMapInput<'a> {
    pub nodes: &'a [RepoMapNode],
    pub settings: Option<PageRankSettings>,
}

/// Output from RepoMap generation
#[derive(Debug, Clone)]
pub struct RepoMapOutput {
    pub ranked_nodes: Vec<RepoMapNode>,
    pub stats: RepoMapStats,
}

/// RepoMap statistics
#[derive(Debug, Clone, Default)]
pub struct RepoMapStats {
    pub total_nodes: usize,
    pub pagerank_iterations: usize,
}

/// RepoMap UseCase Trait
pub trait RepoMapUseCase: Send + Sync {
    fn generate_repomap(&self, input: RepoMapInput) -> RepoMapOutput;
}

/// RepoMap UseCase Implementation
#[derive(Debug, Default)]
pub struct RepoMapUseCaseImpl;

impl RepoMapUseCaseImpl {
    pub fn new() -> Self {
        Self
    }
}

impl RepoMapUseCase for RepoMapUseCaseImpl {
    fn generate_repomap(&self, input: RepoMapInput) -> RepoMapOutput {
        // PageRank would be applied here via PageRankEngine
        let ranked_nodes = input.nodes.to_vec();

        RepoMapOutput {
            stats: RepoMapStats {
                total_nodes: ranked_nodes.len(),
                pagerank_iterations: 0,
            },
            ranked_nodes,
        }
    }
}
