//! Codegraph IR - code intelligence indexing engine
//!
//! Feature-First Hexagonal Architecture:
//! - `shared/`   : Common models (Node, Edge, Span)
//! - `features/` : Vertical slices (parsing, ir_generation, flow_graph, chunking,
//!   cross_file, graph_builder, git_history, repomap, lexical, indexing, storage)
//! - `config/`   : Tiered configuration (preset / stage override / YAML)

#![allow(dead_code)]
#![allow(unused_variables)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::type_complexity)]
#![allow(clippy::module_inception)]
#![allow(clippy::new_without_default)]

/// Shared models and utilities
pub mod shared;

/// Feature modules (pipeline stages + supporting subsystems)
pub mod features;

/// Tiered configuration system
pub mod config;

/// Error types
pub mod errors;

pub use errors::CodegraphError;
