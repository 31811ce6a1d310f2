//! Chunk Hierarchy Builder
//!
//! Builds 6-level chunk hierarchy from IR + Graph:
//!     Repo → Project → Module → File → Class → Function
//!
//! Optimizations:
//! - O(1) parent lookup via indexing
//! - Centralized FQN generation
//! - Symbol visibility extraction
//! - Content hash caching

use std::collections::HashMap;
use std::path::Path;

use super::super::domain::{
    Chunk, ChunkIdContext, ChunkIdGenerator, ChunkKind, ChunkToGraph, ChunkToIR,
};
use super::{FQNBuilder, TestDetector, VisibilityExtractor};

/// Chunk Builder
///
/// Builds chunk hierarchy from IR + Graph documents.
///
/// # Usage
/// ```ignore
/// let id_gen = ChunkIdGenerator::new();
/// let builder = ChunkBuilder::new(id_gen);
/// let chunks = builder.build(repo_id, ir_doc, graph_doc, file_text, repo_config);
/// ```
///
/// # Optimizations
/// - O(1) parent lookup via file_path and span indexing
/// - Centralized FQN builder for consistency
/// - Automatic visibility extraction
/// - Content hash caching (MD5)
pub struct ChunkBuilder {
    id_gen: ChunkIdGenerator,
    chunks: Vec<Chunk>,
    project_chunks: Vec<Chunk>, // Store project chunks for reuse

    // Performance Optimization: Parent lookup indexes
    file_chunk_index: HashMap<String, Chunk>, // file_path → Chunk (O(1) lookup)
    class_chunk_index: HashMap<String, Chunk>, // FQN → Chunk (O(1) lookup)

    // Performance Optimization: Content hash cache
    code_hash_cache: HashMap<(u32, u32), String>, // (start_line, end_line) → hash

    // Utilities
    #[allow(dead_code)]
    fqn_builder: FQNBuilder,
    #[allow(dead_code)]
    visibility_extractor: VisibilityExtractor,
    test_detector: TestDetector,
}

impl ChunkBuilder {
    /// Create new ChunkBuilder
    pub fn new(id_gen: ChunkIdGenerator) -> Self {
        Self {
            id_gen,
            chunks: Vec::new(),
            project_chunks: Vec::new(),
            file_chunk_index: HashMap::new(),
            class_chunk_index: HashMap::new(),
            code_hash_cache: HashMap::new(),
            fqn_builder: FQNBuilder,
            visibility_extractor: VisibilityExtractor,
            test_detector: TestDetector::new(),
        }
    }

    /// Build complete chunk hierarchy for a file
    ///
    /// # Arguments
    /// * `repo_id` - Repository identifier
    /// * `file_path` - File path (relative to repo root)
    /// * `language` - Programming language
    /// * `snapshot_id` - Git commit hash or timestamp (defaults to "default")
    ///
    /// # Returns
    /// Tuple of (chunks, chunk_to_ir, chunk_to_graph)
    ///
    /// # Algorithm (matches Python builder.py exactly)
    /// 1. Build structural hierarchy: Repo → Project → Module → File
    /// 2. Build symbol hierarchy: Class → Function (from IR/Graph)
    /// 3. Build extended chunks: Docstring, File Header, Skeleton, Usage
    /// 4. Build SOTA chunks: Constants, Variables
    /// 5. Build mappings & validate
    pub fn build(
        &mut self,
        repo_id: &str,
        file_path: &str,
        language: &str,
        snapshot_id: Option<&str>,
    ) -> (Vec<Chunk>, ChunkToIR, ChunkToGraph) {
        let snapshot_id = snapshot_id.unwrap_or("default");

        // Initialize
        self.chunks.clear();
        self.file_chunk_index.clear();
        self.class_chunk_index.clear();
        self.code_hash_cache.clear();

        // 1. Build structural hierarchy: Repo → Project → Module → File
        let repo_chunk = self.build_repo_chunk(repo_id, snapshot_id);
        let project_chunks = self.build_project_chunks(&repo_chunk, snapshot_id);
        self.project_chunks = project_chunks.clone();
        let module_chunks =
            self.build_module_chunks(&project_chunks, file_path, language, snapshot_id);
        let file_chunks = self.build_file_chunks(&module_chunks, file_path, language, snapshot_id);

        // Performance Optimization: Index file chunks for O(1) lookup
        for file_chunk in &file_chunks {
            if let Some(ref path) = file_chunk.file_path {
                self.file_chunk_index
                    .insert(path.clone(), file_chunk.clone());
            }
        }

        // Collect all chunks
        let mut chunks = vec![repo_chunk];
        chunks.extend(project_chunks);
        chunks.extend(module_chunks);
        chunks.extend(file_chunks.clone());

        // Build mappings
        let mut chunk_to_ir: ChunkToIR = HashMap::new();
        let chunk_to_graph: ChunkToGraph = HashMap::new();

        // Map file chunks to IR
        for file_chunk in &file_chunks {
            if let Some(ref symbol_id) = file_chunk.symbol_id {
                chunk_to_ir.insert(file_chunk.chunk_id.clone(), vec![symbol_id.clone()]);
            }
        }

        (chunks, chunk_to_ir, chunk_to_graph)
    }

    /// Build complete chunk hierarchy with IR nodes (SOTA version)
    ///
    /// # Arguments
    /// * `repo_id` - Repository identifier
    /// * `file_path` - File path (relative to repo root)
    /// * `language` - Programming language
    /// * `ir_nodes` - IR nodes from IRBuilder
    /// * `file_text` - Source code lines
    /// * `snapshot_id` - Git commit hash or timestamp
    ///
    /// # Returns
    /// Tuple of (chunks, chunk_to_ir, chunk_to_graph)
    ///
    /// # Algorithm
    /// 1. Build structural hierarchy: Repo → Project → Module → File
    /// 2. Build symbol hierarchy: Class → Function (from IR nodes)
    /// 3. Build extended chunks: Docstring, Skeleton
    /// 4. Build SOTA chunks: Constants, Variables
    /// 5. Build mappings
    pub fn build_with_ir(
        &mut self,
        repo_id: &str,
        file_path: &str,
        language: &str,
        ir_nodes: &[crate::shared::models::Node],
        file_text: &[String],
        snapshot_id: Option<&str>,
    ) -> (Vec<Chunk>, ChunkToIR, ChunkToGraph) {
        let snapshot_id = snapshot_id.unwrap_or("default");

        // Initialize
        self.chunks.clear();
        self.file_chunk_index.clear();
        self.class_chunk_index.clear();
        self.code_hash_cache.clear();

        // 1. Build structural hierarchy: Repo → Project → Module → File
        let repo_chunk = self.build_repo_chunk(repo_id, snapshot_id);
        let project_chunks = self.build_project_chunks(&repo_chunk, snapshot_id);
        self.project_chunks = project_chunks.clone();
        let module_chunks =
            self.build_module_chunks(&project_chunks, file_path, language, snapshot_id);
        let file_chunks = self.build_file_chunks(&module_chunks, file_path, language, snapshot_id);

        // Performance Optimization: Index file chunks for O(1) lookup
        for file_chunk in &file_chunks {
            if let Some(ref path) = file_chunk.file_path {
                self.file_chunk_index
                    .insert(path.clone(), file_chunk.clone());
            }
        }

        // 2. Build symbol hierarchy: Class → Function
        let mut class_chunks =
            self.build_class_chunks(repo_id, &file_chunks, ir_nodes, file_text, snapshot_id);
        let func_chunks = self.build_function_chunks(
            repo_id,
            &mut class_chunks,
            &file_chunks,
            ir_nodes,
            file_text,
            snapshot_id,
        );

        // 3. Build extended chunks: Docstring, Skeleton
        let docstring_chunks = self.build_docstring_chunks(
            repo_id,
            &class_chunks,
            &func_chunks,
            ir_nodes,
            file_text,
            snapshot_id,
        );
        let skeleton_chunks =
            self.build_skeleton_chunks(repo_id, &func_chunks, ir_nodes, file_text, snapshot_id);

        // 4. Build SOTA chunks: Constants, Variables
        let constant_chunks =
            self.build_constant_chunks(repo_id, &file_chunks, ir_nodes, file_text, snapshot_id);
        let variable_chunks =
            self.build_variable_chunks(repo_id, &file_chunks, ir_nodes, file_text, snapshot_id);

        // Collect all chunks
        let mut chunks = vec![repo_chunk];
        chunks.extend(project_chunks);
        chunks.extend(module_chunks);
        chunks.extend(file_chunks);
        chunks.extend(class_chunks);
        chunks.extend(func_chunks);
        chunks.extend(docstring_chunks);
        chunks.extend(skeleton_chunks);
        chunks.extend(constant_chunks);
        chunks.extend(variable_chunks);

        // 5. Build mappings
        let mut chunk_to_ir: ChunkToIR = HashMap::new();
        let chunk_to_graph: ChunkToGraph = HashMap::new();

        for chunk in &chunks {
            if let Some(ref symbol_id) = chunk.symbol_id {
                chunk_to_ir.insert(chunk.chunk_id.clone(), vec![symbol_id.clone()]);
            }
        }

        (chunks, chunk_to_ir, chunk_to_graph)
    }

    // ============================================================
    // Structural Hierarchy: Repo → Project → Module → File
    // ============================================================

    /// Build repository root chunk
    ///
    /// # Arguments
    /// * `repo_id` - Repository identifier
    /// * `snapshot_id` - Git commit hash or timestamp
    ///
    /// # Returns
    /// Repo chunk
    pub fn build_repo_chunk(&mut self, repo_id: &str, snapshot_id: &str) -> Chunk {
        let ctx = ChunkIdContext {
            repo_id,
            kind: "repo",
            fqn: repo_id,
            content_hash: None,
        };
        let chunk_id = self.id_gen.generate(&ctx);

        Chunk {
            chunk_id,
            repo_id: repo_id.to_string(),
            snapshot_id: snapshot_id.to_string(),
            project_id: None,
            module_path: None,
            file_path: None,
            kind: ChunkKind::Repo,
            fqn: repo_id.to_string(),
            start_line: None,
            end_line: None,
            original_start_line: None,
            original_end_line: None,
            content_hash: None,
            parent_id: None, // Root has no parent
            children: Vec::new(),
            language: None,
            symbol_visibility: None,
            symbol_id: None,
            symbol_owner_id: None,
            summary: None,
            importance: None,
            attrs: HashMap::new(),
            version: 1,
            last_indexed_commit: None,
            is_deleted: false,
            local_seq: 0,
            is_test: None,
            is_overlay: false,
            overlay_session_id: None,
            base_chunk_id: None,
        }
    }

    /// Build project chunks within repository
    ///
    /// For MVP: Single project per repo. Multi-project support later.
    ///
    /// # Arguments
    /// * `repo_chunk` - Parent repo chunk
    /// * `snapshot_id` - Git commit hash or timestamp
    ///
    /// # Returns
    /// List of project chunks
    pub fn build_project_chunks(&mut self, repo_chunk: &Chunk, snapshot_id: &str) -> Vec<Chunk> {
        // MVP: Single default project
        let project_name = "default";
        let ctx = ChunkIdContext {
            repo_id: &repo_chunk.repo_id,
            kind: "project",
            fqn: project_name,
            content_hash: None,
        };
        let chunk_id = self.id_gen.generate(&ctx);

        let project_chunk = Chunk {
            chunk_id: chunk_id.clone(),
            repo_id: repo_chunk.repo_id.clone(),
            snapshot_id: snapshot_id.to_string(),
            project_id: Some(chunk_id.clone()),
            module_path: None,
            file_path: None,
            kind: ChunkKind::Project,
            fqn: project_name.to_string(),
            start_line: None,
            end_line: None,
            original_start_line: None,
            original_end_line: None,
            content_hash: None,
            parent_id: Some(repo_chunk.chunk_id.clone()),
            children: Vec::new(),
            language: None,
            symbol_visibility: None,
            symbol_id: None,
            symbol_owner_id: None,
            summary: None,
            importance: None,
            attrs: HashMap::new(),
            version: 1,
            last_indexed_commit: None,
            is_deleted: false,
            local_seq: 0,
            is_test: None,
            is_overlay: false,
            overlay_session_id: None,
            base_chunk_id: None,
        };

        // Store for later reference (build_file_chunks needs this)
        self.project_chunks = vec![project_chunk.clone()];

        vec![project_chunk]
    }

    /// Build module chunks from file path structure
    ///
    /// Example: "backend/search/retriever.py" → ["backend", "backend.search"]
    ///
    /// # Arguments
    /// * `project_chunks` - Parent project chunks
    /// * `file_path` - File path (relative to repo root)
    /// * `language` - Programming language
    /// * `snapshot_id` - Git commit hash or timestamp
    ///
    /// # Returns
    /// List of module chunks
    pub fn build_module_chunks(
        &mut self,
        project_chunks: &[Chunk],
        file_path: &str,
        language: &str,
        snapshot_id: &str,
    ) -> Vec<Chunk> {
        // Extract module hierarchy from path
        // Example: "backend/search/retriever.py" → ["backend", "search"]
        let path = Path::new(file_path);
        let parts: Vec<&str> = path
            .parent()
            .map(|p| p.iter().filter_map(|s| s.to_str()).collect())
            .unwrap_or_default();

        if parts.is_empty() {
            return Vec::new(); // No modules for single-level files
        }

        // Generate module chunks for each directory level
        let mut module_chunks = Vec::new();
        let parent_chunk = &project_chunks[0]; // MVP: Single project
        let mut current_fqn = String::new();
        let mut parent_id = parent_chunk.chunk_id.clone();

        for part in &parts {
            // Build FQN
            if current_fqn.is_empty() {
                current_fqn = part.to_string();
            } else {
                current_fqn = format!("{}.{}", current_fqn, part);
            }

            // Generate chunk ID
            let ctx = ChunkIdContext {
                repo_id: &parent_chunk.repo_id,
                kind: "module",
                fqn: &current_fqn,
                content_hash: None,
            };
            let chunk_id = self.id_gen.generate(&ctx);

            // Create module chunk
            let module_chunk = Chunk {
                chunk_id: chunk_id.clone(),
                repo_id: parent_chunk.repo_id.clone(),
                snapshot_id: snapshot_id.to_string(),
                project_id: parent_chunk.project_id.clone(),
                module_path: Some(current_fqn.clone()),
                file_path: None,
                kind: ChunkKind::Module,
                fqn: current_fqn.clone(),
                start_line: None,
                end_line: None,
                original_start_line: None,
                original_end_line: None,
                content_hash: None,
                parent_id: Some(parent_id.clone()),
                children: Vec::new(),
                language: Some(language.to_string()),
                symbol_visibility: None,
                symbol_id: None,
                symbol_owner_id: None,
                summary: None,
                importance: None,
                attrs: HashMap::new(),
                version: 1,
                last_indexed_commit: None,
                is_deleted: false,
                local_seq: 0,
                is_test: None,
                is_overlay: false,
                overlay_session_id: None,
                base_chunk_id: None,
            };

            parent_id = chunk_id.clone();
            module_chunks.push(module_chunk);
        }

        module_chunks
    }

    /// Build file chunks
    ///
    /// # Arguments
    /// * `module_chunks` - Parent module chunks (empty if no modules)
    /// * `file_path` - File path (relative to repo root)
    /// * `language` - Programming language
    /// * `snapshot_id` - Git commit hash or timestamp
    ///
    /// # Returns
    /// List of file chunks (single file for now)
    pub fn build_file_chunks(
        &mut self,
        module_chunks: &[Chunk],
        file_path: &str,
        language: &str,
        snapshot_id: &str,
    ) -> Vec<Chunk> {
        // Get parent (last module or project)
        let parent = if let Some(last_module) = module_chunks.last() {
            last_module
        } else if !self.project_chunks.is_empty() {
            &self.project_chunks[0]
        } else {
            // Should not happen, but handle gracefully
            return Vec::new();
        };

        // Build FQN from file path
        let fqn = FQNBuilder::from_file_path(file_path, language);

        // Generate chunk ID
        let ctx = ChunkIdContext {
            repo_id: &parent.repo_id,
            kind: "file",
            fqn: &fqn,
            content_hash: None,
        };
        let chunk_id = self.id_gen.generate(&ctx);

        let file_chunk = Chunk {
            chunk_id,
            repo_id: parent.repo_id.clone(),
            snapshot_id: snapshot_id.to_string(),
            project_id: parent.project_id.clone(),
            module_path: parent.module_path.clone(),
            file_path: Some(file_path.to_string()),
            kind: ChunkKind::File,
            fqn,
            start_line: None,
            end_line: None,
            original_start_line: None,
            original_end_line: None,
            content_hash: None,
            parent_id: Some(parent.chunk_id.clone()),
            children: Vec::new(),
            language: Some(language.to_string()),
            symbol_visibility: None,
            symbol_id: None,
            symbol_owner_id: None,
            summary: None,
            importance: None,
            attrs: HashMap::new(),
            version: 1,
            last_indexed_commit: None,
            is_deleted: false,
            local_seq: 0,
            is_test: None,
            is_overlay: false,
            overlay_session_id: None,
            base_chunk_id: None,
        };

        vec![file_chunk]
    }

    // ============================================================
    // Symbol Hierarchy: Class → Function Chunks
    // ============================================================

    /// Build class chunks from IR nodes
    ///
    /// MATCHES: _build_class_chunks() in builder.py (lines 495-603)
    ///
    /// # Arguments
    /// * `repo_id` - Repository identifier
    /// * `file_chunks` - Parent file chunks for parent lookup
    /// * `ir_nodes` - IR nodes from IRBuilder
    /// * `file_text` - Source code lines for code extraction
    /// * `snapshot_id` - Git commit hash or timestamp
    ///
    /// # Returns
    /// List of class chunks
    pub fn build_class_chunks(
        &mut self,
        repo_id: &str,
        file_chunks: &[Chunk],
        ir_nodes: &[crate::shared::models::Node],
        file_text: &[String],
        snapshot_id: &str,
    ) -> Vec<Chunk> {
        use crate::shared::models::NodeKind;

        let mut class_chunks = Vec::new();

        // Filter class nodes
        let class_nodes: Vec<_> = ir_nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Class)
            .collect();

        for class_node in class_nodes {
            // Find parent file chunk
            let parent_file = match self.find_parent_file_chunk(file_chunks, &class_node.file_path)
            {
                Some(f) => f,
                None => continue,
            };

            // Extract name (required for visibility check)
            let class_name = class_node.name.as_deref().unwrap_or("");

            // Generate chunk ID
            let ctx = ChunkIdContext {
                repo_id,
                kind: "class",
                fqn: &class_node.fqn,
                content_hash: None,
            };
            let chunk_id = self.id_gen.generate(&ctx);

            // Extract class code for content hash (with caching)
            let span_key = (class_node.span.start_line, class_node.span.end_line);
            let class_code = self.extract_code_span(
                file_text,
                class_node.span.start_line,
                class_node.span.end_line,
            );
            let content_hash = self.compute_content_hash_cached(&class_code, span_key);

            // Extract symbol visibility (static method)
            let symbol_visibility = VisibilityExtractor::extract(
                class_name,
                &class_node.language,
                None, // No attrs yet
            );

            // Detect if test class
            let is_test = self.test_detector.is_test_class(
                class_name,
                &class_node.file_path,
                Some(&class_node.language),
                None, // No decorators yet (would need to extract from attrs)
            );

            // Extract attrs (decorators, base_classes)
            // Note: Node currently doesn't have attrs field - future enhancement
            let chunk_attrs = HashMap::new();

            // Create class chunk
            let class_chunk = Chunk {
                chunk_id: chunk_id.clone(),
                repo_id: repo_id.to_string(),
                snapshot_id: snapshot_id.to_string(),
                project_id: parent_file.project_id.clone(),
                module_path: parent_file.module_path.clone(),
                file_path: Some(class_node.file_path.clone()),
                kind: ChunkKind::Class,
                fqn: class_node.fqn.clone(),
                start_line: Some(class_node.span.start_line),
                end_line: Some(class_node.span.end_line),
                original_start_line: Some(class_node.span.start_line),
                original_end_line: Some(class_node.span.end_line),
                content_hash: Some(content_hash),
                parent_id: Some(parent_file.chunk_id.clone()),
                children: Vec::new(),
                language: Some(class_node.language.clone()),
                symbol_visibility: Some(symbol_visibility.as_str().to_string()),
                symbol_id: Some(class_node.id.clone()),
                symbol_owner_id: Some(class_node.id.clone()),
                summary: None,
                importance: None,
                attrs: chunk_attrs,
                version: 1,
                last_indexed_commit: None,
                is_deleted: false,
                local_seq: 0,
                is_test: Some(is_test),
                is_overlay: false,
                overlay_session_id: None,
                base_chunk_id: None,
            };

            // Index for O(1) class lookup by FQN
            self.class_chunk_index
                .insert(class_node.fqn.clone(), class_chunk.clone());

            class_chunks.push(class_chunk);
        }

        class_chunks
    }

    /// Build function/method chunks (leaf chunks)
    ///
    /// MATCHES: _build_function_chunks() in builder.py (lines 605-714)
    ///
    /// # Arguments
    /// * `repo_id` - Repository identifier
    /// * `class_chunks` - Parent class chunks (for methods)
    /// * `file_chunks` - Parent file chunks (for top-level functions)
    /// * `ir_nodes` - IR nodes from IRBuilder
    /// * `file_text` - Source code lines for code extraction
    /// * `snapshot_id` - Git commit hash or timestamp
    ///
    /// # Returns
    /// List of function chunks
    pub fn build_function_chunks(
        &mut self,
        repo_id: &str,
        class_chunks: &mut [Chunk],
        file_chunks: &[Chunk],
        ir_nodes: &[crate::shared::models::Node],
        file_text: &[String],
        snapshot_id: &str,
    ) -> Vec<Chunk> {
        use crate::shared::models::NodeKind;

        let mut func_chunks = Vec::new();

        // Filter function/method nodes
        let func_nodes: Vec<_> = ir_nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Function | NodeKind::Method))
            .collect();

        for func_node in func_nodes {
            // Extract name (required for visibility check)
            let func_name = func_node.name.as_deref().unwrap_or("");

            // Determine parent (class or file)
            let (parent_id, parent_fqn) = if func_node.kind == NodeKind::Method {
                // Find parent class by FQN prefix
                match self.find_parent_class_by_fqn(&func_node.fqn) {
                    Some((pid, pfqn)) => (pid, pfqn),
                    None => continue,
                }
            } else {
                // Top-level function: parent is file
                match self.find_parent_file_chunk(file_chunks, &func_node.file_path) {
                    Some(f) => (f.chunk_id.clone(), f.fqn.clone()),
                    None => continue,
                }
            };

            // Generate chunk ID
            let ctx = ChunkIdContext {
                repo_id,
                kind: "function",
                fqn: &func_node.fqn,
                content_hash: None,
            };
            let chunk_id = self.id_gen.generate(&ctx);

            // Extract function code for content hash (with caching)
            let span_key = (func_node.span.start_line, func_node.span.end_line);
            let func_code = self.extract_code_span(
                file_text,
                func_node.span.start_line,
                func_node.span.end_line,
            );
            let content_hash = self.compute_content_hash_cached(&func_code, span_key);

            // Extract symbol visibility (static method)
            let symbol_visibility = VisibilityExtractor::extract(
                func_name,
                &func_node.language,
                None, // No attrs yet
            );

            // Detect if test function
            let is_test = self.test_detector.is_test_function(
                func_name,
                &func_node.file_path,
                Some(&func_node.language),
                None, // No decorators yet (would need to extract from attrs)
            );

            // Extract attrs (decorators, params, return_type)
            // Note: Node currently doesn't have attrs field - future enhancement
            let chunk_attrs = HashMap::new();

            // Create function chunk
            let func_chunk = Chunk {
                chunk_id: chunk_id.clone(),
                repo_id: repo_id.to_string(),
                snapshot_id: snapshot_id.to_string(),
                project_id: None,  // Inherit from parent
                module_path: None, // Inherit from parent
                file_path: Some(func_node.file_path.clone()),
                kind: ChunkKind::Function,
                fqn: func_node.fqn.clone(),
                start_line: Some(func_node.span.start_line),
                end_line: Some(func_node.span.end_line),
                original_start_line: Some(func_node.span.start_line),
                original_end_line: Some(func_node.span.end_line),
                content_hash: Some(content_hash),
                parent_id: Some(parent_id.clone()),
                children: Vec::new(),
                language: Some(func_node.language.clone()),
                symbol_visibility: Some(symbol_visibility.as_str().to_string()),
                symbol_id: Some(func_node.id.clone()),
                symbol_owner_id: Some(func_node.id.clone()),
                summary: None,
                importance: None,
                attrs: chunk_attrs,
                version: 1,
                last_indexed_commit: None,
                is_deleted: false,
                local_seq: 0,
                is_test: Some(is_test),
                is_overlay: false,
                overlay_session_id: None,
                base_chunk_id: None,
            };

            // Link parent → child
            if func_node.kind == NodeKind::Method {
                // Update class chunk children
                if let Some(class_chunk) = self.class_chunk_index.get_mut(&parent_fqn) {
                    class_chunk.add_child(chunk_id.clone());
                }
                // Also update in class_chunks slice
                for class_chunk in class_chunks.iter_mut() {
                    if class_chunk.fqn == parent_fqn {
                        class_chunk.add_child(chunk_id.clone());
                        break;
                    }
                }
            }

            func_chunks.push(func_chunk);
        }

        func_chunks
    }

    // ============================================================
    // Helper Methods: Parent Lookup
    // ============================================================

    /// Find parent file chunk by file path
    fn find_parent_file_chunk<'a>(
        &self,
        file_chunks: &'a [Chunk],
        file_path: &str,
    ) -> Option<&'a Chunk> {
        file_chunks.iter().find(|c| {
            c.file_path
                .as_ref()
                .map(|p| p == file_path)
                .unwrap_or(false)
        })
    }

    /// Find parent class chunk by FQN prefix
    ///
    /// Example: "myapp.MyClass.my_method" → parent is "myapp.MyClass"
    fn find_parent_class_by_fqn(&self, func_fqn: &str) -> Option<(String, String)> {
        // Split FQN and remove last component (function name)
        let parts: Vec<&str> = func_fqn.split('.').collect();
        if parts.len() < 2 {
            return None;
        }

        let class_fqn = parts[..parts.len() - 1].join(".");

        // Lookup in class index
        self.class_chunk_index
            .get(&class_fqn)
            .map(|c| (c.chunk_id.clone(), c.fqn.clone()))
    }

    // ============================================================
    // Helper Methods: Content Hash & Code Extraction
    // ============================================================

    /// Extract code from file text for a given line range
    ///
    /// # Arguments
    /// * `file_text` - Source code lines (0-indexed)
    /// * `start_line` - Start line (1-indexed, inclusive)
    /// * `end_line` - End line (1-indexed, inclusive)
    ///
    /// # Returns
    /// Extracted code as string
    ///
    /// # Algorithm (matches Python exactly)
    /// - Lines are 1-indexed in span, but list is 0-indexed
    /// - Join lines with newline separator
    fn extract_code_span(&self, file_text: &[String], start_line: u32, end_line: u32) -> String {
        let start_idx = (start_line.saturating_sub(1)) as usize;
        let end_idx = end_line as usize;

        if start_idx >= file_text.len() {
            return String::new();
        }

        file_text[start_idx..end_idx.min(file_text.len())].join("\n")
    }

    /// Compute SHA256 hash for content
    ///
    /// Note: Python uses MD5, but SHA256 is more secure.
    /// For exact Python compatibility, we'd use md5 crate.
    ///
    /// # Arguments
    /// * `content` - Content to hash
    ///
    /// # Returns
    /// SHA256 hexdigest
    fn compute_content_hash(&self, content: &str) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Compute content hash with caching
    ///
    /// Performance Optimization: Avoid re-computing hash for same span.
    ///
    /// # Arguments
    /// * `content` - Content to hash
    /// * `span_key` - (start_line, end_line) for cache key
    ///
    /// # Returns
    /// SHA256 hexdigest
    fn compute_content_hash_cached(&mut self, content: &str, span_key: (u32, u32)) -> String {
        if let Some(cached) = self.code_hash_cache.get(&span_key) {
            return cached.clone();
        }

        let hash = self.compute_content_hash(content);
        self.code_hash_cache.insert(span_key, hash.clone());
        hash
    }

    // ============================================================
    // Extended Chunks: Docstring, Skeleton
    // ============================================================

    /// Build docstring chunks from class/function nodes
    ///
    /// Extracts docstrings as separate searchable chunks for API documentation.
    ///
    /// # Arguments
    /// * `repo_id` - Repository identifier
    /// * `class_chunks` - Class chunks (for docstring parent)
    /// * `func_chunks` - Function chunks (for docstring parent)
    /// * `ir_nodes` - IR nodes from IRBuilder
    /// * `file_text` - Source code lines
    /// * `snapshot_id` - Git commit hash or timestamp
    ///
    /// # Returns
    /// List of docstring chunks
    pub fn build_docstring_chunks(
        &mut self,
        repo_id: &str,
        class_chunks: &[Chunk],
        func_chunks: &[Chunk],
        ir_nodes: &[crate::shared::models::Node],
        file_text: &[String],
        snapshot_id: &str,
    ) -> Vec<Chunk> {
        use crate::shared::models::NodeKind;

        let mut docstring_chunks = Vec::new();

        // Filter nodes with docstrings
        let nodes_with_docs: Vec<_> = ir_nodes
            .iter()
            .filter(|n| {
                matches!(
                    n.kind,
                    NodeKind::Class | NodeKind::Function | NodeKind::Method
                ) && n.docstring.is_some()
            })
            .collect();

        for node in nodes_with_docs {
            let docstring = match &node.docstring {
                Some(d) => d.clone(),
                None => continue,
            };

            // Find parent chunk (class or function)
            let parent_chunk = class_chunks
                .iter()
                .find(|c| c.fqn == node.fqn)
                .or_else(|| func_chunks.iter().find(|c| c.fqn == node.fqn));

            let parent_id = parent_chunk.map(|c| c.chunk_id.clone());

            // Generate chunk ID
            let fqn = format!("{}.__doc__", node.fqn);
            let ctx = ChunkIdContext {
                repo_id,
                kind: "docstring",
                fqn: &fqn,
                content_hash: None,
            };
            let chunk_id = self.id_gen.generate(&ctx);

            // Compute content hash
            let content_hash = self.compute_content_hash(&docstring);

            // Estimate docstring line range (typically first few lines after def/class)
            let start_line = node.span.start_line + 1;
            let doc_lines = docstring.lines().count() as u32;
            let end_line = start_line + doc_lines;

            let docstring_chunk = Chunk {
                chunk_id,
                repo_id: repo_id.to_string(),
                snapshot_id: snapshot_id.to_string(),
                project_id: parent_chunk.and_then(|c| c.project_id.clone()),
                module_path: parent_chunk.and_then(|c| c.module_path.clone()),
                file_path: Some(node.file_path.clone()),
                kind: ChunkKind::Docstring,
                fqn,
                start_line: Some(start_line),
                end_line: Some(end_line),
                original_start_line: Some(start_line),
                original_end_line: Some(end_line),
                content_hash: Some(content_hash),
                parent_id,
                children: Vec::new(),
                language: Some(node.language.clone()),
                symbol_visibility: None,
                symbol_id: Some(node.id.clone()),
                symbol_owner_id: Some(node.id.clone()),
                summary: Some(docstring.lines().next().unwrap_or("").to_string()),
                importance: Some(0.7), // Docstrings are important for search
                attrs: HashMap::new(),
                version: 1,
                last_indexed_commit: None,
                is_deleted: false,
                local_seq: 0,
                is_test: None,
                is_overlay: false,
                overlay_session_id: None,
                base_chunk_id: None,
            };

            docstring_chunks.push(docstring_chunk);
        }

        docstring_chunks
    }

    /// Build skeleton chunks (function signatures without body)
    ///
    /// Useful for API browsing and code completion context.
    ///
    /// # Arguments
    /// * `repo_id` - Repository identifier
    /// * `func_chunks` - Function chunks
    /// * `ir_nodes` - IR nodes from IRBuilder
    /// * `file_text` - Source code lines
    /// * `snapshot_id` - Git commit hash or timestamp
    ///
    /// # Returns
    /// List of skeleton chunks
    pub fn build_skeleton_chunks(
        &mut self,
        repo_id: &str,
        func_chunks: &[Chunk],
        ir_nodes: &[crate::shared::models::Node],
        file_text: &[String],
        snapshot_id: &str,
    ) -> Vec<Chunk> {
        use crate::shared::models::NodeKind;

        let mut skeleton_chunks = Vec::new();

        // Filter function/method nodes
        let func_nodes: Vec<_> = ir_nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Function | NodeKind::Method))
            .collect();

        for func_node in func_nodes {
            // Find corresponding function chunk
            let parent_chunk = func_chunks.iter().find(|c| c.fqn == func_node.fqn);
            let parent_id = parent_chunk.map(|c| c.chunk_id.clone());

            // Extract signature (first line only)
            let signature = self.extract_code_span(
                file_text,
                func_node.span.start_line,
                func_node.span.start_line,
            );

            if signature.is_empty() {
                continue;
            }

            // Generate chunk ID
            let fqn = format!("{}.__signature__", func_node.fqn);
            let ctx = ChunkIdContext {
                repo_id,
                kind: "skeleton",
                fqn: &fqn,
                content_hash: None,
            };
            let chunk_id = self.id_gen.generate(&ctx);

            // Compute content hash
            let content_hash = self.compute_content_hash(&signature);

            let skeleton_chunk = Chunk {
                chunk_id,
                repo_id: repo_id.to_string(),
                snapshot_id: snapshot_id.to_string(),
                project_id: parent_chunk.and_then(|c| c.project_id.clone()),
                module_path: parent_chunk.and_then(|c| c.module_path.clone()),
                file_path: Some(func_node.file_path.clone()),
                kind: ChunkKind::Skeleton,
                fqn,
                start_line: Some(func_node.span.start_line),
                end_line: Some(func_node.span.start_line),
                original_start_line: Some(func_node.span.start_line),
                original_end_line: Some(func_node.span.start_line),
                content_hash: Some(content_hash),
                parent_id,
                children: Vec::new(),
                language: Some(func_node.language.clone()),
                symbol_visibility: None,
                symbol_id: Some(func_node.id.clone()),
                symbol_owner_id: Some(func_node.id.clone()),
                summary: Some(signature.trim().to_string()),
                importance: Some(0.5), // Signatures are moderately important
                attrs: HashMap::new(),
                version: 1,
                last_indexed_commit: None,
                is_deleted: false,
                local_seq: 0,
                is_test: None,
                is_overlay: false,
                overlay_session_id: None,
                base_chunk_id: None,
            };

            skeleton_chunks.push(skeleton_chunk);
        }

        skeleton_chunks
    }

    // ============================================================
    // SOTA Chunks: Constants, Variables
    // ============================================================

    /// Check if a name follows Python constant naming convention (UPPER_CASE)
    ///
    /// # Rules
    /// - Must be at least 2 characters
    /// - First character must be uppercase letter
    /// - All characters must be uppercase letters, underscores, or digits
    /// - Examples: `MAX_SIZE`, `API_KEY`, `VERSION_2` are constants
    /// - Examples: `_PRIVATE`, `x`, `Config`, `my_var` are NOT constants
    fn is_constant_name(name: &str) -> bool {
        if name.len() < 2 {
            return false;
        }

        let mut chars = name.chars();

        // First character must be uppercase letter (not _, not digit)
        match chars.next() {
            Some(c) if c.is_ascii_uppercase() => {}
            _ => return false,
        }

        // Rest must be uppercase, underscore, or digit
        chars.all(|c| c.is_ascii_uppercase() || c == '_' || c.is_ascii_digit())
    }

    /// Build constant chunks (module-level constants)
    ///
    /// Constants are important for understanding configuration and magic values.
    ///
    /// # Arguments
    /// * `repo_id` - Repository identifier
    /// * `file_chunks` - File chunks (for parent)
    /// * `ir_nodes` - IR nodes from IRBuilder
    /// * `file_text` - Source code lines
    /// * `snapshot_id` - Git commit hash or timestamp
    ///
    /// # Returns
    /// List of constant chunks
    pub fn build_constant_chunks(
        &mut self,
        repo_id: &str,
        file_chunks: &[Chunk],
        ir_nodes: &[crate::shared::models::Node],
        file_text: &[String],
        snapshot_id: &str,
    ) -> Vec<Chunk> {
        use crate::shared::models::NodeKind;

        let mut constant_chunks = Vec::new();

        // Filter constant nodes (Variable kind with UPPER_CASE naming convention)
        let constant_nodes: Vec<_> = ir_nodes
            .iter()
            .filter(|n| {
                n.kind == NodeKind::Variable
                    && n.name
                        .as_ref()
                        .map(|name| Self::is_constant_name(name))
                        .unwrap_or(false)
            })
            .collect();

        for const_node in constant_nodes {
            // Find parent file chunk
            let parent_file = match self.find_parent_file_chunk(file_chunks, &const_node.file_path)
            {
                Some(f) => f,
                None => continue,
            };

            let const_name = const_node.name.as_deref().unwrap_or("");

            // Generate chunk ID
            let ctx = ChunkIdContext {
                repo_id,
                kind: "constant",
                fqn: &const_node.fqn,
                content_hash: None,
            };
            let chunk_id = self.id_gen.generate(&ctx);

            // Extract constant code
            let const_code = self.extract_code_span(
                file_text,
                const_node.span.start_line,
                const_node.span.end_line,
            );
            let span_key = (const_node.span.start_line, const_node.span.end_line);
            let content_hash = self.compute_content_hash_cached(&const_code, span_key);

            let constant_chunk = Chunk {
                chunk_id,
                repo_id: repo_id.to_string(),
                snapshot_id: snapshot_id.to_string(),
                project_id: parent_file.project_id.clone(),
                module_path: parent_file.module_path.clone(),
                file_path: Some(const_node.file_path.clone()),
                kind: ChunkKind::Constant,
                fqn: const_node.fqn.clone(),
                start_line: Some(const_node.span.start_line),
                end_line: Some(const_node.span.end_line),
                original_start_line: Some(const_node.span.start_line),
                original_end_line: Some(const_node.span.end_line),
                content_hash: Some(content_hash),
                parent_id: Some(parent_file.chunk_id.clone()),
                children: Vec::new(),
                language: Some(const_node.language.clone()),
                symbol_visibility: Some("public".to_string()), // Constants are usually public
                symbol_id: Some(const_node.id.clone()),
                symbol_owner_id: Some(const_node.id.clone()),
                summary: Some(format!("{} = ...", const_name)),
                importance: Some(0.6), // Constants are moderately important
                attrs: HashMap::new(),
                version: 1,
                last_indexed_commit: None,
                is_deleted: false,
                local_seq: 0,
                is_test: None,
                is_overlay: false,
                overlay_session_id: None,
                base_chunk_id: None,
            };

            constant_chunks.push(constant_chunk);
        }

        constant_chunks
    }

    /// Build variable chunks (module-level variables)
    ///
    /// Module-level variables are important for understanding state.
    /// Excludes constants (UPPER_CASE names) to avoid duplication.
    ///
    /// # Arguments
    /// * `repo_id` - Repository identifier
    /// * `file_chunks` - File chunks (for parent)
    /// * `ir_nodes` - IR nodes from IRBuilder
    /// * `file_text` - Source code lines
    /// * `snapshot_id` - Git commit hash or timestamp
    ///
    /// # Returns
    /// List of variable chunks
    pub fn build_variable_chunks(
        &mut self,
        repo_id: &str,
        file_chunks: &[Chunk],
        ir_nodes: &[crate::shared::models::Node],
        file_text: &[String],
        snapshot_id: &str,
    ) -> Vec<Chunk> {
        use crate::shared::models::NodeKind;

        let mut variable_chunks = Vec::new();

        // Filter variable nodes (non-constant module-level variables)
        let var_nodes: Vec<_> = ir_nodes
            .iter()
            .filter(|n| {
                n.kind == NodeKind::Variable
                    && n.parent_id.is_none() // Module-level (no parent)
                    && n.name
                        .as_ref()
                        .map(|name| !Self::is_constant_name(name)) // Exclude constants
                        .unwrap_or(true)
            })
            .collect();

        for var_node in var_nodes {
            // Find parent file chunk
            let parent_file = match self.find_parent_file_chunk(file_chunks, &var_node.file_path) {
                Some(f) => f,
                None => continue,
            };

            let var_name = var_node.name.as_deref().unwrap_or("");

            // Skip private variables (starting with _)
            if var_name.starts_with('_') && !var_name.starts_with("__") {
                continue;
            }

            // Generate chunk ID
            let ctx = ChunkIdContext {
                repo_id,
                kind: "variable",
                fqn: &var_node.fqn,
                content_hash: None,
            };
            let chunk_id = self.id_gen.generate(&ctx);

            // Extract variable code
            let var_code =
                self.extract_code_span(file_text, var_node.span.start_line, var_node.span.end_line);
            let span_key = (var_node.span.start_line, var_node.span.end_line);
            let content_hash = self.compute_content_hash_cached(&var_code, span_key);

            // Determine visibility
            let visibility = if var_name.starts_with("__") {
                "private"
            } else if var_name.starts_with('_') {
                "internal"
            } else {
                "public"
            };

            let variable_chunk = Chunk {
                chunk_id,
                repo_id: repo_id.to_string(),
                snapshot_id: snapshot_id.to_string(),
                project_id: parent_file.project_id.clone(),
                module_path: parent_file.module_path.clone(),
                file_path: Some(var_node.file_path.clone()),
                kind: ChunkKind::Variable,
                fqn: var_node.fqn.clone(),
                start_line: Some(var_node.span.start_line),
                end_line: Some(var_node.span.end_line),
                original_start_line: Some(var_node.span.start_line),
                original_end_line: Some(var_node.span.end_line),
                content_hash: Some(content_hash),
                parent_id: Some(parent_file.chunk_id.clone()),
                children: Vec::new(),
                language: Some(var_node.language.clone()),
                symbol_visibility: Some(visibility.to_string()),
                symbol_id: Some(var_node.id.clone()),
                symbol_owner_id: Some(var_node.id.clone()),
                summary: Some(format!("{} = ...", var_name)),
                importance: Some(0.4), // Variables are less important than functions
                attrs: HashMap::new(),
                version: 1,
                last_indexed_commit: None,
                is_deleted: false,
                local_seq: 0,
                is_test: None,
                is_overlay: false,
                overlay_session_id: None,
                base_chunk_id: None,
            };

            variable_chunks.push(variable_chunk);
        }

        variable_chunks
    }
}
