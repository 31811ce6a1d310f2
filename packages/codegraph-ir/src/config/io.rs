//! Configuration I/O (YAML/Env loading)
//!
//! Defines YAML schema types. Implementation methods are in pipeline_config.rs
//! to avoid field visibility issues.

use super::{pipeline_config::StageControl, stage_configs::*, CacheConfig, PageRankConfig};
use serde::{Deserialize, Serialize};

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    pub version: u32,

    /// Base preset
    pub preset: String,

    /// Stage on/off switches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stages: Option<StageControl>,

    /// Fine-grained overrides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ConfigOverrides>,
}

/// Configuration overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taint: Option<TaintConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pta: Option<PTAConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone: Option<CloneConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagerank: Option<PageRankConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunking: Option<ChunkingConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexical: Option<LexicalConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<ParallelConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub heap: Option<HeapConfig>,
}
