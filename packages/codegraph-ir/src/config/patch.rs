//! FFI-friendly Patch types
//!
//! Patch types with all-optional fields for Python/C bindings

use super::{pipeline_config::PipelineConfig, provenance::ConfigSource, stage_configs::*};
use serde::{Deserialize, Serialize};

/// Patch type for TaintConfig (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaintConfigPatch {
    pub max_depth: Option<usize>,
    pub max_paths: Option<usize>,
    pub use_points_to: Option<bool>,
    pub field_sensitive: Option<bool>,
    pub use_ssa: Option<bool>,
    pub detect_sanitizers: Option<bool>,
    pub enable_interprocedural: Option<bool>,
    pub worklist_max_iterations: Option<usize>,
}

impl PipelineConfig {
    /// Apply taint patch (FFI-friendly alternative to closure)
    pub fn taint_patch(mut self, patch: TaintConfigPatch) -> Self {
        let mut base = TaintConfig::from_preset(self.preset);

        if let Some(v) = patch.max_depth {
            base.max_depth = v;
        }
        if let Some(v) = patch.max_paths {
            base.max_paths = v;
        }
        if let Some(v) = patch.use_points_to {
            base.use_points_to = v;
        }
        if let Some(v) = patch.field_sensitive {
            base.field_sensitive = v;
        }
        if let Some(v) = patch.use_ssa {
            base.use_ssa = v;
        }
        if let Some(v) = patch.detect_sanitizers {
            base.detect_sanitizers = v;
        }
        if let Some(v) = patch.enable_interprocedural {
            base.enable_interprocedural = v;
        }
        if let Some(v) = patch.worklist_max_iterations {
            base.worklist_max_iterations = v;
        }

        self.taint = Some(base);
        self.provenance
            .track_field("taint.*", ConfigSource::Builder);
        self
    }
}

/// Patch type for PTAConfig
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PTAConfigPatch {
    pub mode: Option<PTAMode>,
    pub field_sensitive: Option<bool>,
    pub max_iterations: Option<Option<usize>>,
    pub auto_threshold: Option<usize>,
    pub enable_scc: Option<bool>,
    pub enable_wave: Option<bool>,
    pub enable_parallel: Option<bool>,
}

impl PipelineConfig {
    /// Apply PTA patch
    pub fn pta_patch(mut self, patch: PTAConfigPatch) -> Self {
        let mut base = PTAConfig::from_preset(self.preset);

        if let Some(v) = patch.mode {
            base.mode = v;
        }
        if let Some(v) = patch.field_sensitive {
            base.field_sensitive = v;
        }
        if let Some(v) = patch.max_iterations {
            base.max_iterations = v;
        }
        if let Some(v) = patch.auto_threshold {
            base.auto_threshold = v;
        }
        if let Some(v) = patch.enable_scc {
            base.enable_scc = v;
        }
        if let Some(v) = patch.enable_wave {
            base.enable_wave = v;
        }
        if let Some(v) = patch.enable_parallel {
            base.enable_parallel = v;
        }

        self.pta = Some(base);
        self.provenance.track_field("pta.*", ConfigSource::Builder);
        self
    }
}

/// Patch type for CloneConfig
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CloneConfigPatch {
    pub types_enabled: Option<Vec<CloneType>>,
    pub type1_min_tokens: Option<usize>,
    pub type1_min_loc: Option<usize>,
    pub type2_min_tokens: Option<usize>,
    pub type2_min_loc: Option<usize>,
    pub type2_rename_similarity: Option<f64>,
    pub type3_min_tokens: Option<usize>,
    pub type3_min_loc: Option<usize>,
    pub type3_gap_threshold: Option<f64>,
    pub type3_similarity: Option<f64>,
    pub type4_min_tokens: Option<usize>,
    pub type4_min_loc: Option<usize>,
    pub type4_semantic_threshold: Option<f64>,
}

impl PipelineConfig {
    /// Apply clone patch
    pub fn clone_patch(mut self, patch: CloneConfigPatch) -> Self {
        let mut base = CloneConfig::from_preset(self.preset);

        if let Some(v) = patch.types_enabled {
            base.types_enabled = v;
        }
        if let Some(v) = patch.type1_min_tokens {
            base.type1.min_tokens = v;
        }
        if let Some(v) = patch.type1_min_loc {
            base.type1.min_loc = v;
        }
        if let Some(v) = patch.type2_min_tokens {
            base.type2.min_tokens = v;
        }
        if let Some(v) = patch.type2_min_loc {
            base.type2.min_loc = v;
        }
        if let Some(v) = patch.type2_rename_similarity {
            base.type2.rename_similarity = v;
        }
        if let Some(v) = patch.type3_min_tokens {
            base.type3.min_tokens = v;
        }
        if let Some(v) = patch.type3_min_loc {
            base.type3.min_loc = v;
        }
        if let Some(v) = patch.type3_gap_threshold {
            base.type3.gap_threshold = v;
        }
        if let Some(v) = patch.type3_similarity {
            base.type3.similarity = v;
        }
        if let Some(v) = patch.type4_min_tokens {
            base.type4.min_tokens = v;
        }
        if let Some(v) = patch.type4_min_loc {
            base.type4.min_loc = v;
        }
        if let Some(v) = patch.type4_semantic_threshold {
            base.type4.semantic_threshold = v;
        }

        self.clone = Some(base);
        self.provenance
            .track_field("clone.*", ConfigSource::Builder);
        self
    }
}

/// Patch type for ChunkingConfig
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkingConfigPatch {
    pub max_chunk_size: Option<usize>,
    pub min_chunk_size: Option<usize>,
    pub overlap_lines: Option<usize>,
    pub enable_semantic: Option<bool>,
    pub respect_scope: Option<bool>,
}

impl PipelineConfig {
    /// Apply chunking patch
    pub fn chunking_patch(mut self, patch: ChunkingConfigPatch) -> Self {
        let mut base = ChunkingConfig::from_preset(self.preset);

        if let Some(v) = patch.max_chunk_size {
            base.max_chunk_size = v;
        }
        if let Some(v) = patch.min_chunk_size {
            base.min_chunk_size = v;
        }
        if let Some(v) = patch.overlap_lines {
            base.overlap_lines = v;
        }
        if let Some(v) = patch.enable_semantic {
            base.enable_semantic = v;
        }
        if let Some(v) = patch.respect_scope {
            base.respect_scope = v;
        }

        self.chunking = Some(base);
        self.provenance
            .track_field("chunking.*", ConfigSource::Builder);
        self
    }
}

/// Patch type for LexicalConfig
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexicalConfigPatch {
    pub enable_fuzzy: Option<bool>,
    pub fuzzy_distance: Option<usize>,
    pub max_results: Option<usize>,
    pub enable_ngram: Option<bool>,
    pub ngram_size: Option<usize>,
    pub enable_stemming: Option<bool>,
}

impl PipelineConfig {
    /// Apply lexical patch
    pub fn lexical_patch(mut self, patch: LexicalConfigPatch) -> Self {
        let mut base = LexicalConfig::from_preset(self.preset);

        if let Some(v) = patch.enable_fuzzy {
            base.enable_fuzzy = v;
        }
        if let Some(v) = patch.fuzzy_distance {
            base.fuzzy_distance = v;
        }
        if let Some(v) = patch.max_results {
            base.max_results = v;
        }
        if let Some(v) = patch.enable_ngram {
            base.enable_ngram = v;
        }
        if let Some(v) = patch.ngram_size {
            base.ngram_size = v;
        }
        if let Some(v) = patch.enable_stemming {
            base.enable_stemming = v;
        }

        self.lexical = Some(base);
        self.provenance
            .track_field("lexical.*", ConfigSource::Builder);
        self
    }
}

/// Patch type for ParallelConfig
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParallelConfigPatch {
    pub num_workers: Option<usize>,
    pub batch_size: Option<usize>,
    pub enable_rayon: Option<bool>,
    pub stack_size_mb: Option<usize>,
}

impl PipelineConfig {
    /// Apply parallel patch
    pub fn parallel_patch(mut self, patch: ParallelConfigPatch) -> Self {
        let mut base = ParallelConfig::from_preset(self.preset);

        if let Some(v) = patch.num_workers {
            base.num_workers = v;
        }
        if let Some(v) = patch.batch_size {
            base.batch_size = v;
        }
        if let Some(v) = patch.enable_rayon {
            base.enable_rayon = v;
        }
        if let Some(v) = patch.stack_size_mb {
            base.stack_size_mb = v;
        }

        self.parallel = Some(base);
        self.provenance
            .track_field("parallel.*", ConfigSource::Builder);
        self
    }
}

/// Patch type for PDGConfig (L17)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PDGConfigPatch {
    pub enabled: Option<bool>,
    pub include_control: Option<bool>,
    pub include_data: Option<bool>,
    pub max_nodes: Option<usize>,
}

impl PipelineConfig {
    /// Apply PDG patch (FFI-friendly alternative to closure)
    pub fn pdg_patch(mut self, patch: PDGConfigPatch) -> Self {
        let mut base = PDGConfig::from_preset(self.preset);

        if let Some(v) = patch.enabled {
            base.enabled = v;
        }
        if let Some(v) = patch.include_control {
            base.include_control = v;
        }
        if let Some(v) = patch.include_data {
            base.include_data = v;
        }
        if let Some(v) = patch.max_nodes {
            base.max_nodes = v;
        }

        self.pdg = Some(base);
        self.provenance.track_field("pdg.*", ConfigSource::Builder);
        self
    }
}

/// Patch type for SlicingConfig (L18)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlicingConfigPatch {
    pub enabled: Option<bool>,
    pub max_depth: Option<usize>,
    pub max_function_depth: Option<usize>,
    pub include_control: Option<bool>,
    pub include_data: Option<bool>,
    pub interprocedural: Option<bool>,
    pub strict_mode: Option<bool>,
    pub cache_capacity: Option<usize>,
}

impl PipelineConfig {
    /// Apply slicing patch (FFI-friendly alternative to closure)
    pub fn slicing_patch(mut self, patch: SlicingConfigPatch) -> Self {
        let mut base = SlicingConfig::from_preset(self.preset);

        if let Some(v) = patch.enabled {
            base.enabled = v;
        }
        if let Some(v) = patch.max_depth {
            base.max_depth = v;
        }
        if let Some(v) = patch.max_function_depth {
            base.max_function_depth = v;
        }
        if let Some(v) = patch.include_control {
            base.include_control = v;
        }
        if let Some(v) = patch.include_data {
            base.include_data = v;
        }
        if let Some(v) = patch.interprocedural {
            base.interprocedural = v;
        }
        if let Some(v) = patch.strict_mode {
            base.strict_mode = v;
        }
        if let Some(v) = patch.cache_capacity {
            base.cache_capacity = v;
        }

        self.slicing = Some(base);
        self.provenance
            .track_field("slicing.*", ConfigSource::Builder);
        self
    }
}

/// Patch type for HeapConfig (L7)
///
/// FFI-friendly configuration patch for heap analysis settings.
/// All fields are optional - only specified fields will be applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeapConfigPatch {
    pub enabled: Option<bool>,
    pub enable_memory_safety: Option<bool>,
    pub enable_ownership: Option<bool>,
    pub enable_escape: Option<bool>,
    pub enable_security: Option<bool>,
    pub enable_context_sensitive: Option<bool>,
    pub context_sensitivity: Option<usize>,
    pub ownership_strict_mode: Option<bool>,
    pub max_heap_objects: Option<usize>,
    /// Types treated as Copy semantics (replaces existing list)
    pub copy_types: Option<Vec<String>>,
    /// Types treated as Move semantics (replaces existing list)
    pub move_types: Option<Vec<String>>,
}

impl PipelineConfig {
    /// Apply heap patch (FFI-friendly alternative to closure)
    ///
    /// # Example (Python via PyO3)
    /// ```python
    /// config = (PipelineConfig.preset(Preset.BALANCED)
    ///     .heap_patch(HeapConfigPatch(
    ///         enable_ownership=True,
    ///         ownership_strict_mode=True,
    ///         copy_types=["int", "float", "MyPrimitive"],
    ///         move_types=["Vec", "String", "MyResource"]
    ///     ))
    ///     .build())
    /// ```
    pub fn heap_patch(mut self, patch: HeapConfigPatch) -> Self {
        let mut base = HeapConfig::from_preset(self.preset);

        if let Some(v) = patch.enabled {
            base.enabled = v;
        }
        if let Some(v) = patch.enable_memory_safety {
            base.enable_memory_safety = v;
        }
        if let Some(v) = patch.enable_ownership {
            base.enable_ownership = v;
        }
        if let Some(v) = patch.enable_escape {
            base.enable_escape = v;
        }
        if let Some(v) = patch.enable_security {
            base.enable_security = v;
        }
        if let Some(v) = patch.enable_context_sensitive {
            base.enable_context_sensitive = v;
        }
        if let Some(v) = patch.context_sensitivity {
            base.context_sensitivity = v;
        }
        if let Some(v) = patch.ownership_strict_mode {
            base.ownership_strict_mode = v;
        }
        if let Some(v) = patch.max_heap_objects {
            base.max_heap_objects = v;
        }
        if let Some(v) = patch.copy_types {
            base.copy_types = v;
        }
        if let Some(v) = patch.move_types {
            base.move_types = v;
        }

        self.heap = Some(base);
        self.provenance.track_field("heap.*", ConfigSource::Builder);
        self
    }
}
