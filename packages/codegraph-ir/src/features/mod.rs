//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/     - Pure business logic (no external dependencies)
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - External dependency implementations

// L1: tree-sitter parsing, thread-local parser pool, language plugin dispatch
pub mod parsing;

// L1: AST -> IR document (nodes, edges, spans)
pub mod ir_generation;

// Expression-level IR extraction (reads/defines, heap access)
pub mod expression_builder;

// Progressive lowering: Expression IR -> Node IR, generator state-machine lowering
pub mod lowering;

// Basic Flow Graph builder (per-function block graphs, suspend/resume, generators)
pub mod flow_graph;

// Hierarchical chunking for semantic search
pub mod chunking;

// Cross-file symbol resolution, dependency graph, impact analysis
pub mod cross_file;

// IR document -> queryable graph conversion
pub mod graph_builder;

// Git blame / churn / co-change enrichment for chunks
pub mod git_history;

// Repository structure mapping with PageRank importance scoring
pub mod repomap;

// Lexical (full-text) search index adapter backed by tantivy
pub mod lexical;

// Index adapter contract + unified indexing service
pub mod indexing;

// Commit-based snapshot types shared with codegraph-storage
pub mod storage;
