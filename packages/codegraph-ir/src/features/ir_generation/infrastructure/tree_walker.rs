//! `IRGenerator` implementation that walks the language-neutral `SyntaxNode`
//! tree produced by parsing, rather than a raw tree-sitter tree.
//!
//! Grounded on the original per-function IR construction (scope-stack +
//! stable content-addressed ids), adapted to the `SyntaxNode`/`SyntaxKind`
//! abstraction so it works for any `Parser` implementor, not just Python.

use crate::features::ir_generation::domain::IRDocument;
use crate::features::ir_generation::infrastructure::ir_builder::IRBuilder;
use crate::features::ir_generation::ports::IRGenerator;
use crate::features::parsing::domain::{ParsedTree, SyntaxKind, SyntaxNode};
use crate::shared::models::{Result, Span, SpanRef};

/// Walks a parsed syntax tree and emits structural nodes/edges.
pub struct TreeWalkingIRGenerator;

impl TreeWalkingIRGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TreeWalkingIRGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IRGenerator for TreeWalkingIRGenerator {
    fn generate(&self, tree: &ParsedTree, repo_id: &str) -> Result<IRDocument> {
        let module_path = module_path_from_file(&tree.file_path);
        let mut builder = IRBuilder::new(
            repo_id.to_string(),
            tree.file_path.clone(),
            tree.language.clone(),
            module_path,
        );

        builder.create_module_node(tree.root.span, &tree.source);
        walk_children(&tree.root.children, &mut builder, &tree.source, false);

        let (nodes, edges) = builder.build();
        let mut doc = IRDocument::new(tree.file_path.clone());
        doc.nodes = nodes;
        doc.edges = edges;
        Ok(doc)
    }
}

fn module_path_from_file(file_path: &str) -> String {
    let without_ext = file_path.trim_end_matches(".py").trim_end_matches(".pyi");
    without_ext
        .trim_start_matches("./")
        .replace(['/', '\\'], ".")
        .trim_matches('.')
        .to_string()
}

fn span_text(source: &str, span: Span) -> String {
    SpanRef::new(span).extract_text(source).to_string()
}

/// First `NameExpr` descendant's text, not crossing into a nested `Block`
/// (so a function's own name is found without picking up names from its
/// body).
fn first_name(node: &SyntaxNode) -> Option<String> {
    if node.kind == SyntaxKind::NameExpr {
        return Some(node.text().to_string());
    }
    if node.kind == SyntaxKind::Block {
        return None;
    }
    node.children.iter().find_map(first_name)
}

/// Reconstruct a dotted name (`pkg.mod.Name`) from a `NameExpr` or
/// `AttributeExpr` subtree, or an unmapped `dotted_name` wrapper.
fn flatten_name(node: &SyntaxNode) -> Option<String> {
    match &node.kind {
        SyntaxKind::NameExpr => Some(node.text().to_string()),
        SyntaxKind::AttributeExpr => {
            let object = node.children.first().and_then(flatten_name);
            let attr = node
                .children
                .iter()
                .rev()
                .find(|c| c.kind == SyntaxKind::NameExpr)
                .map(|c| c.text().to_string());
            match (object, attr) {
                (Some(o), Some(a)) => Some(format!("{}.{}", o, a)),
                (None, Some(a)) => Some(a),
                _ => None,
            }
        }
        SyntaxKind::Other(raw) if raw == "dotted_name" => {
            let parts: Vec<String> = node
                .children
                .iter()
                .filter(|c| c.kind == SyntaxKind::NameExpr)
                .map(|c| c.text().to_string())
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("."))
            }
        }
        _ => node.children.first().and_then(flatten_name),
    }
}

/// Collect `ParameterDecl` nodes belonging directly to this definition,
/// stopping at a nested `Block` so inner functions' parameters aren't
/// attributed to the outer scope.
fn collect_own_parameters<'a>(node: &'a SyntaxNode, out: &mut Vec<&'a SyntaxNode>) {
    for child in &node.children {
        if child.kind == SyntaxKind::Block {
            continue;
        }
        if child.kind == SyntaxKind::ParameterDecl {
            out.push(child);
        }
        collect_own_parameters(child, out);
    }
}

fn is_async_def(node: &SyntaxNode) -> bool {
    node.children
        .iter()
        .any(|c| matches!(&c.kind, SyntaxKind::Other(raw) if raw == "async"))
}

fn contains_yield(node: &SyntaxNode) -> bool {
    if node.kind == SyntaxKind::YieldExpr {
        return true;
    }
    if node.kind == SyntaxKind::FunctionDef || node.kind == SyntaxKind::LambdaDef {
        return false;
    }
    node.children.iter().any(contains_yield)
}

fn walk_children(children: &[SyntaxNode], builder: &mut IRBuilder, source: &str, in_class: bool) {
    for child in children {
        walk_node(child, builder, source, in_class);
    }
}

fn walk_node(node: &SyntaxNode, builder: &mut IRBuilder, source: &str, in_class: bool) {
    match &node.kind {
        SyntaxKind::Other(raw) if raw == "decorated_definition" => {
            for inner in &node.children {
                if matches!(inner.kind, SyntaxKind::FunctionDef | SyntaxKind::ClassDef) {
                    walk_node(inner, builder, source, in_class);
                }
            }
        }
        SyntaxKind::FunctionDef | SyntaxKind::MethodDef | SyntaxKind::LambdaDef => {
            handle_function(node, builder, source, in_class);
        }
        SyntaxKind::ClassDef => {
            handle_class(node, builder, source);
        }
        SyntaxKind::ImportDecl => {
            handle_import(node, builder);
        }
        SyntaxKind::AssignmentStmt => {
            handle_assignment(node, builder);
            walk_children(&node.children, builder, source, in_class);
        }
        SyntaxKind::CallExpr => {
            handle_call(node, builder);
            walk_children(&node.children, builder, source, in_class);
        }
        _ => walk_children(&node.children, builder, source, in_class),
    }
}

fn handle_function(node: &SyntaxNode, builder: &mut IRBuilder, source: &str, in_class: bool) {
    let name = first_name(node).unwrap_or_else(|| "<anonymous>".to_string());
    let is_async = is_async_def(node);
    let source_text = span_text(source, node.span);

    let function_id =
        builder.create_function_node(name, node.span, in_class, is_async, &source_text);

    if contains_yield(node) {
        builder.mark_generator(&function_id);
    }

    let mut params = Vec::new();
    collect_own_parameters(node, &mut params);
    for param in params {
        if let Some(pname) = first_name(param) {
            builder.create_parameter_node(&function_id, pname, param.span);
        }
    }

    if let Some(body) = node.find_child(&SyntaxKind::Block) {
        walk_children(&body.children, builder, source, false);
    }

    builder.finish_scope();
}

fn handle_class(node: &SyntaxNode, builder: &mut IRBuilder, source: &str) {
    let name = first_name(node).unwrap_or_else(|| "<anonymous>".to_string());
    let source_text = span_text(source, node.span);

    let base_classes: Vec<String> = node
        .children
        .iter()
        .filter(|c| matches!(&c.kind, SyntaxKind::Other(raw) if raw == "argument_list"))
        .flat_map(|args| args.children.iter().filter_map(flatten_name))
        .collect();

    builder.create_class_node(name, node.span, base_classes, &source_text);

    if let Some(body) = node.find_child(&SyntaxKind::Block) {
        walk_children(&body.children, builder, source, true);
    }

    builder.finish_scope();
}

fn handle_import(node: &SyntaxNode, builder: &mut IRBuilder) {
    let is_from = matches!(&node.raw_kind, Some(k) if k == "import_from_statement");

    if is_from {
        let module = node.children.first().and_then(flatten_name).unwrap_or_default();
        let imported: Vec<&SyntaxNode> = node
            .children
            .iter()
            .skip(1)
            .filter(|c| matches!(&c.kind, SyntaxKind::Other(raw) if raw == "aliased_import") || c.kind == SyntaxKind::NameExpr)
            .collect();

        if imported.is_empty() {
            builder.create_import_node(module, node.span, None);
            return;
        }

        for item in imported {
            let (imported_name, alias) = match &item.kind {
                SyntaxKind::Other(raw) if raw == "aliased_import" => {
                    let base = item.children.first().and_then(flatten_name).unwrap_or_default();
                    let alias = item
                        .children
                        .iter()
                        .rev()
                        .find(|c| c.kind == SyntaxKind::NameExpr)
                        .map(|c| c.text().to_string());
                    (base, alias)
                }
                _ => (item.text().to_string(), None),
            };
            let full = if module.is_empty() {
                imported_name
            } else {
                format!("{}.{}", module, imported_name)
            };
            builder.create_import_node(full, node.span, alias);
        }
    } else {
        for child in &node.children {
            match &child.kind {
                SyntaxKind::Other(raw) if raw == "aliased_import" => {
                    let base = child.children.first().and_then(flatten_name).unwrap_or_default();
                    let alias = child
                        .children
                        .iter()
                        .rev()
                        .find(|c| c.kind == SyntaxKind::NameExpr)
                        .map(|c| c.text().to_string());
                    builder.create_import_node(base, node.span, alias);
                }
                SyntaxKind::NameExpr | SyntaxKind::AttributeExpr => {
                    if let Some(dotted) = flatten_name(child) {
                        builder.create_import_node(dotted, node.span, None);
                    }
                }
                _ => {}
            }
        }
    }
}

fn handle_assignment(node: &SyntaxNode, builder: &mut IRBuilder) {
    let Some(target) = node.children.first() else {
        return;
    };
    if let SyntaxKind::NameExpr = target.kind {
        let name = target.text().to_string();
        if let Some(scope_id) = builder.current_scope_id() {
            builder.create_variable_node(name.clone(), node.span);
            builder.add_writes_edge(scope_id, name, node.span);
        } else {
            builder.create_variable_node(name, node.span);
        }
    }
}

fn handle_call(node: &SyntaxNode, builder: &mut IRBuilder) {
    let Some(callee) = node.children.first() else {
        return;
    };
    let Some(target) = flatten_name(callee) else {
        return;
    };
    if let Some(scope_id) = builder.current_scope_id() {
        builder.add_calls_edge(scope_id, target, node.span);
    }
}
