/*
 * Codegraph Orchestration - SOTA Job Orchestration System
 *
 * High-performance, distributed pipeline orchestration for code analysis.
 *
 * Architecture:
 * - Job State Machine (PostgreSQL)
 * - Distributed Locking (Redis)
 * - Checkpoint/Resume System
 * - Pipeline Stages (pluggable)
 * - Observability (metrics, logging)
 *
 * Performance Target: 5-10x faster than Python
 */

// Public modules
pub mod change_detector;
pub mod checkpoint;
pub mod dag;
pub mod dependency_graph;
pub mod error;
pub mod incremental;
pub mod job;
pub mod orchestrator;
pub mod pipeline;
pub mod refresher;
pub mod stages;

// Re-exports
pub use change_detector::{ChangeDetector, ChangeSet};
pub use checkpoint::{Checkpoint, CheckpointManager};
pub use dag::{CacheKeyManager, PipelineDAG, StageNode};
pub use dependency_graph::{compute_affected_files, FileId, ImportKey, ReverseDependencyIndex};
pub use error::{ErrorCategory, OrchestratorError, Result};
pub use incremental::{IncrementalOrchestrator, IncrementalResult};
pub use refresher::{ChunkRefresher, RefreshReport};
pub use job::{Job, JobState, JobStateMachine, StageId};
pub use orchestrator::{PipelineOrchestrator, PipelineResult};
pub use pipeline::{
    StageConfig, StageContext, StageHandler, StageInput, StageMetrics, StageOutput,
};
pub use stages::{
    ChunkResult, ChunkStage, DiscoveryStage, GitStage, GraphStage, IRResult, IRStage, ImportInfo,
    LexicalAdapter, MultiIndexStage, RepoMapStage, SemanticIrStage, VectorAdapter, VectorResult,
};
