use crate::error::{OrchestratorError, Result};
use crate::job::StageId;
use std::collections::{HashMap, HashSet};

/// Cache key manager (from semantica-task-engine pattern)
#[derive(Debug, Clone)]
pub struct CacheKeyManager {
    repo_id: String,
    snapshot_id: String,
}

impl CacheKeyManager {
    pub fn new(repo_id: String, snapshot_id: String) -> Self {
        Self {
            repo_id,
            snapshot_id,
        }
    }

    pub fn git_key(&self) -> String {
        format!("git:{}:{}", self.repo_id, self.snapshot_id)
    }

    pub fn discovery_key(&self) -> String {
        format!("discovery:{}:{}", self.repo_id, self.snapshot_id)
    }

    pub fn parsing_key(&self) -> String {
        format!("parsing:{}:{}", self.repo_id, self.snapshot_id)
    }

    pub fn ir_key(&self) -> String {
        format!("ir:{}:{}", self.repo_id, self.snapshot_id)
    }

    pub fn semantic_ir_key(&self) -> String {
        format!("semantic_ir:{}:{}", self.repo_id, self.snapshot_id)
    }

    pub fn graph_key(&self) -> String {
        format!("graph:{}:{}", self.repo_id, self.snapshot_id)
    }

    pub fn chunk_key(&self) -> String {
        format!("chunks:{}:{}", self.repo_id, self.snapshot_id)
    }

    pub fn repomap_key(&self) -> String {
        format!("repomap:{}:{}", self.repo_id, self.snapshot_id)
    }

    pub fn multi_index_key(&self) -> String {
        format!("multi_index:{}:{}", self.repo_id, self.snapshot_id)
    }

    // Kept for the multi-index stage's internal adapter cache entries
    // (lexical/vector are two of its five adapters, not stages of their own).
    pub fn lexical_key(&self) -> String {
        format!("lexical:{}:{}", self.repo_id, self.snapshot_id)
    }

    pub fn vector_key(&self) -> String {
        format!("vector:{}:{}", self.repo_id, self.snapshot_id)
    }

    pub fn symbol_key(&self) -> String {
        format!("symbol:{}:{}", self.repo_id, self.snapshot_id)
    }

    pub fn fuzzy_key(&self) -> String {
        format!("fuzzy:{}:{}", self.repo_id, self.snapshot_id)
    }

    pub fn documentation_key(&self) -> String {
        format!("documentation:{}:{}", self.repo_id, self.snapshot_id)
    }

    /// Get cache key for a stage
    pub fn key_for_stage(&self, stage: StageId) -> String {
        match stage {
            StageId::Git => self.git_key(),
            StageId::Discovery => self.discovery_key(),
            StageId::Parsing => self.parsing_key(),
            StageId::Ir => self.ir_key(),
            StageId::SemanticIr => self.semantic_ir_key(),
            StageId::Graph => self.graph_key(),
            StageId::Chunk => self.chunk_key(),
            StageId::RepoMap => self.repomap_key(),
            StageId::MultiIndex => self.multi_index_key(),
        }
    }
}

/// Stage node in DAG
#[derive(Debug, Clone)]
pub struct StageNode {
    pub id: StageId,
    pub name: &'static str,
    pub dependencies: Vec<StageId>,
    pub optional: bool,
    pub timeout_ms: u64,
}

// Make StageNode cloneable for orchestrator
impl StageNode {
    pub fn clone_node(&self) -> Self {
        self.clone()
    }
}

impl StageNode {
    pub fn new(
        id: StageId,
        name: &'static str,
        dependencies: Vec<StageId>,
        optional: bool,
        timeout_ms: u64,
    ) -> Self {
        Self {
            id,
            name,
            dependencies,
            optional,
            timeout_ms,
        }
    }
}

/// Pipeline DAG with topological sort
#[derive(Debug, Clone)]
pub struct PipelineDAG {
    stages: HashMap<StageId, StageNode>,
    execution_order: Vec<Vec<StageId>>, // Vec of parallel groups
}

impl PipelineDAG {
    /// Create a new DAG from stage definitions
    pub fn new(stages: Vec<StageNode>) -> Result<Self> {
        let mut stage_map = HashMap::new();
        for stage in stages {
            stage_map.insert(stage.id, stage);
        }

        // Validate dependencies exist
        for stage in stage_map.values() {
            for dep in &stage.dependencies {
                if !stage_map.contains_key(dep) {
                    return Err(OrchestratorError::MissingDependency(format!(
                        "Stage {:?} depends on non-existent stage {:?}",
                        stage.id, dep
                    )));
                }
            }
        }

        // Compute execution order via topological sort
        let execution_order = Self::topological_sort(&stage_map)?;

        Ok(Self {
            stages: stage_map,
            execution_order,
        })
    }

    /// Create the default nine-stage pipeline: git -> discovery -> parsing ->
    /// ir -> semantic ir -> graph -> chunk -> repomap -> multi-index.
    ///
    /// Each stage depends only on its immediate predecessor; the multi-index
    /// stage's internal fan-out across five adapters happens inside that
    /// stage, not in this DAG.
    pub fn default_pipeline() -> Result<Self> {
        let stages = vec![
            StageNode::new(
                StageId::Git,
                "Git Metadata",
                vec![],
                true, // non-fatal if not a git checkout
                30_000,
            ),
            StageNode::new(
                StageId::Discovery,
                "File Discovery",
                vec![StageId::Git],
                false,
                60_000,
            ),
            StageNode::new(
                StageId::Parsing,
                "Parsing",
                vec![StageId::Discovery],
                false,
                300_000, // 5 minutes
            ),
            StageNode::new(
                StageId::Ir,
                "IR Generation",
                vec![StageId::Parsing],
                false,
                300_000, // 5 minutes
            ),
            StageNode::new(
                StageId::SemanticIr,
                "Semantic IR",
                vec![StageId::Ir],
                true, // falls back to internal type inference
                300_000,
            ),
            StageNode::new(
                StageId::Graph,
                "Graph Build",
                vec![StageId::SemanticIr],
                false,
                300_000,
            ),
            StageNode::new(
                StageId::Chunk,
                "Chunk Building",
                vec![StageId::Ir],
                false,
                180_000, // 3 minutes
            ),
            StageNode::new(
                StageId::RepoMap,
                "RepoMap",
                vec![StageId::Chunk],
                true, // optional LLM summaries
                300_000,
            ),
            StageNode::new(
                StageId::MultiIndex,
                "Multi-Index Dispatch",
                vec![StageId::Chunk, StageId::RepoMap],
                false,
                600_000, // 10 minutes
            ),
        ];

        Self::new(stages)
    }

    /// Topological sort with parallel group detection
    fn topological_sort(stages: &HashMap<StageId, StageNode>) -> Result<Vec<Vec<StageId>>> {
        let mut in_degree: HashMap<StageId, usize> = stages.keys().map(|&id| (id, 0)).collect();

        // Calculate in-degrees
        for stage in stages.values() {
            for &dep in &stage.dependencies {
                *in_degree.get_mut(&stage.id).unwrap() += 1;
            }
        }

        let mut result = Vec::new();
        let mut processed = HashSet::new();

        while processed.len() < stages.len() {
            // Find all stages with in-degree 0 (can run in parallel)
            let ready: Vec<StageId> = in_degree
                .iter()
                .filter(|(id, &degree)| degree == 0 && !processed.contains(*id))
                .map(|(&id, _)| id)
                .collect();

            if ready.is_empty() {
                return Err(OrchestratorError::DagCycleDetected);
            }

            result.push(ready.clone());

            // Mark as processed and decrement dependents
            for &stage_id in &ready {
                processed.insert(stage_id);
                in_degree.remove(&stage_id);

                // Decrement dependents
                for dependent in stages.values() {
                    if dependent.dependencies.contains(&stage_id) {
                        *in_degree.get_mut(&dependent.id).unwrap() -= 1;
                    }
                }
            }
        }

        Ok(result)
    }

    /// Get execution order
    pub fn execution_order(&self) -> &[Vec<StageId>] {
        &self.execution_order
    }

    /// Get stage node
    pub fn get_stage(&self, id: StageId) -> Option<&StageNode> {
        self.stages.get(&id)
    }

    /// Get execution plan as string (for logging)
    pub fn execution_plan(&self) -> String {
        self.execution_order
            .iter()
            .enumerate()
            .map(|(i, group)| {
                let stage_names: Vec<_> = group.iter().map(|id| self.stages[id].name).collect();

                if group.len() > 1 {
                    format!("Phase {}: {} (parallel)", i + 1, stage_names.join(" ∥ "))
                } else {
                    format!("Phase {}: {}", i + 1, stage_names[0])
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Get required cache keys for a stage
    pub fn required_cache_keys(
        &self,
        stage_id: StageId,
        cache_mgr: &CacheKeyManager,
    ) -> Vec<String> {
        let stage = match self.stages.get(&stage_id) {
            Some(s) => s,
            None => return vec![],
        };

        stage
            .dependencies
            .iter()
            .map(|dep_id| cache_mgr.key_for_stage(*dep_id))
            .collect()
    }
}
