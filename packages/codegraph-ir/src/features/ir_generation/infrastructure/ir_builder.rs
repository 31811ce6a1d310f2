//! IR Builder - converts a parsed syntax tree into `Node`/`Edge` pairs.
//!
//! Keeps a scope stack (module -> class -> function) for FQN construction
//! and stable, content-addressed node IDs, the same shape the original
//! per-function IR construction used.

use sha2::{Digest, Sha256};

use crate::shared::models::{Edge, EdgeKind, EdgeMetadata, Node, NodeKind, Span};

#[derive(Debug, Clone)]
struct ScopeFrame {
    name: String,
    node_id: Option<String>,
}

pub struct IRBuilder {
    repo_id: String,
    file_path: String,
    language: String,
    scope_stack: Vec<ScopeFrame>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl IRBuilder {
    pub fn new(repo_id: String, file_path: String, language: String, module_path: String) -> Self {
        let mut builder = Self {
            repo_id,
            file_path,
            language,
            scope_stack: Vec::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
        };
        builder.push_scope(module_path);
        builder
    }

    fn push_scope(&mut self, name: String) {
        self.scope_stack.push(ScopeFrame { name, node_id: None });
    }

    pub fn finish_scope(&mut self) {
        self.scope_stack.pop();
    }

    fn set_current_scope_node_id(&mut self, node_id: String) {
        if let Some(frame) = self.scope_stack.last_mut() {
            frame.node_id = Some(node_id);
        }
    }

    fn current_parent_id(&self) -> Option<String> {
        self.scope_stack.last()?.node_id.clone()
    }

    fn build_fqn(&self, name: &str) -> String {
        let mut parts: Vec<&str> = self.scope_stack.iter().map(|f| f.name.as_str()).collect();
        parts.push(name);
        parts.join(".")
    }

    fn module_path(&self) -> String {
        self.scope_stack
            .first()
            .map(|f| f.name.clone())
            .unwrap_or_default()
    }

    /// Stable node id: `{kind}:{repo_id}:{file_path}:{fqn}`, sha256-hashed.
    fn generate_node_id(&self, kind: NodeKind, fqn: &str) -> String {
        let key = format!("{:?}:{}:{}:{}", kind, self.repo_id, self.file_path, fqn);
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        let hash = hasher.finalize();
        format!("{:x}", hash)[..32].to_string()
    }

    fn generate_content_hash(&self, content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn add_contains_edge(&mut self, parent_id: String, child_id: String, span: Span) {
        self.edges.push(Edge::new(parent_id, child_id, EdgeKind::Contains).with_span(span));
    }

    pub fn add_calls_edge(&mut self, caller_id: String, callee_name: String, span: Span) {
        self.edges.push(Edge::new(caller_id, callee_name, EdgeKind::Calls).with_span(span));
    }

    pub fn add_reads_edge(&mut self, reader_id: String, variable_name: String, span: Span) {
        self.edges.push(Edge::new(reader_id, variable_name, EdgeKind::Reads).with_span(span));
    }

    pub fn add_writes_edge(&mut self, writer_id: String, variable_name: String, span: Span) {
        self.edges.push(Edge::new(writer_id, variable_name, EdgeKind::Writes).with_span(span));
    }

    pub fn add_inherits_edge(&mut self, child_id: String, parent_fqn: String, span: Span) {
        self.edges.push(Edge::new(child_id, parent_fqn, EdgeKind::Inherits).with_span(span));
    }

    pub fn add_imports_edge(
        &mut self,
        importer_id: String,
        imported_fqn: String,
        span: Span,
        alias: Option<String>,
    ) {
        let edge = Edge::new(importer_id, imported_fqn, EdgeKind::Imports)
            .with_span(span)
            .with_metadata(EdgeMetadata { alias });
        self.edges.push(edge);
    }

    pub fn create_import_node(
        &mut self,
        module_name: String,
        span: Span,
        alias: Option<String>,
    ) -> String {
        let fqn = module_name.clone();
        let node_id = self.generate_node_id(NodeKind::Import, &fqn);
        let parent_id = self.current_parent_id().or_else(|| Some(self.module_path()));

        let mut node = Node::new(node_id.clone(), NodeKind::Import, fqn.clone(), self.file_path.clone(), span)
            .with_language(self.language.clone())
            .with_name(alias.clone().unwrap_or_else(|| module_name.clone()));
        node.module_path = Some(self.module_path());
        node.parent_id = parent_id.clone();
        self.nodes.push(node);

        if let Some(p_id) = parent_id {
            self.add_imports_edge(p_id, fqn, span, alias);
        }

        node_id
    }

    pub fn create_function_node(
        &mut self,
        name: String,
        span: Span,
        is_method: bool,
        is_async: bool,
        source_text: &str,
    ) -> String {
        let fqn = self.build_fqn(&name);
        let kind = if is_async && !is_method {
            NodeKind::Function
        } else if is_method {
            NodeKind::Method
        } else {
            NodeKind::Function
        };
        let node_id = self.generate_node_id(kind, &fqn);
        let parent_id = self.current_parent_id();

        let mut node = Node::new(node_id.clone(), kind, fqn, self.file_path.clone(), span)
            .with_language(self.language.clone())
            .with_name(name.clone());
        node.module_path = Some(self.module_path());
        node.content_hash = Some(self.generate_content_hash(source_text));
        node.parent_id = parent_id.clone();
        node.is_async = Some(is_async);
        self.nodes.push(node);

        if let Some(parent) = parent_id {
            self.add_contains_edge(parent, node_id.clone(), span);
        }

        self.push_scope(name);
        self.set_current_scope_node_id(node_id.clone());
        node_id
    }

    pub fn create_class_node(
        &mut self,
        name: String,
        span: Span,
        base_classes: Vec<String>,
        source_text: &str,
    ) -> String {
        let fqn = self.build_fqn(&name);
        let node_id = self.generate_node_id(NodeKind::Class, &fqn);
        let parent_id = self.current_parent_id();

        let mut node = Node::new(node_id.clone(), NodeKind::Class, fqn, self.file_path.clone(), span)
            .with_language(self.language.clone())
            .with_name(name.clone());
        node.module_path = Some(self.module_path());
        node.content_hash = Some(self.generate_content_hash(source_text));
        node.parent_id = parent_id.clone();
        node.base_classes = if base_classes.is_empty() { None } else { Some(base_classes.clone()) };
        self.nodes.push(node);

        if let Some(parent) = parent_id {
            self.add_contains_edge(parent, node_id.clone(), span);
        }

        for base in base_classes {
            let base_fqn = if base.contains('.') {
                base
            } else {
                format!("{}.{}", self.module_path(), base)
            };
            self.add_inherits_edge(node_id.clone(), base_fqn, span);
        }

        self.push_scope(name);
        self.set_current_scope_node_id(node_id.clone());
        node_id
    }

    /// Root module node; the file itself. Becomes the parent of all
    /// top-level definitions.
    pub fn create_module_node(&mut self, span: Span, source_text: &str) -> String {
        let fqn = self.module_path();
        let node_id = self.generate_node_id(NodeKind::Module, &fqn);

        let mut node = Node::new(node_id.clone(), NodeKind::Module, fqn, self.file_path.clone(), span)
            .with_language(self.language.clone())
            .with_name(self.module_path());
        node.module_path = Some(self.module_path());
        node.content_hash = Some(self.generate_content_hash(source_text));
        self.nodes.push(node);

        self.set_current_scope_node_id(node_id.clone());
        node_id
    }

    pub fn create_parameter_node(&mut self, function_id: &str, name: String, span: Span) -> String {
        let fqn = self.build_fqn(&name);
        let node_id = self.generate_node_id(NodeKind::Parameter, &fqn);

        let mut node = Node::new(node_id.clone(), NodeKind::Parameter, fqn, self.file_path.clone(), span)
            .with_language(self.language.clone())
            .with_name(name);
        node.module_path = Some(self.module_path());
        node.parent_id = Some(function_id.to_string());
        self.nodes.push(node);

        self.add_contains_edge(function_id.to_string(), node_id.clone(), span);
        node_id
    }

    pub fn create_variable_node(&mut self, name: String, span: Span) -> String {
        let parent_id = self.current_parent_id();
        let fqn = self.build_fqn(&name);
        let node_id = self.generate_node_id(NodeKind::Variable, &fqn);

        let mut node = Node::new(node_id.clone(), NodeKind::Variable, fqn, self.file_path.clone(), span)
            .with_language(self.language.clone())
            .with_name(name);
        node.module_path = Some(self.module_path());
        node.parent_id = parent_id.clone();
        self.nodes.push(node);

        if let Some(parent) = parent_id {
            self.add_contains_edge(parent, node_id.clone(), span);
        }

        node_id
    }

    /// Flip `is_generator` on a previously created function/method node.
    pub fn mark_generator(&mut self, node_id: &str) {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == node_id) {
            node.is_generator = Some(true);
        }
    }

    pub fn current_scope_id(&self) -> Option<String> {
        self.current_parent_id()
    }

    pub fn build(self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes, self.edges)
    }
}
