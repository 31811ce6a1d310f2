//! Tree-sitter-backed `FlowAnalyzer` implementation.
//!
//! `IRDocument` only carries nodes/edges, not the tree-sitter tree they were
//! extracted from, so building a BFG re-parses each file (through the AST
//! cache) and locates the tree-sitter node matching each function's span via
//! `descendant_for_point_range`.

use std::collections::HashMap;
use std::sync::Arc;
use tree_sitter::{Point, Tree};

use crate::features::flow_graph::domain::{
    BasicFlowBlock, BasicFlowGraph, BlockKind, CFGEdge, CFGEdgeKind,
};
use crate::features::flow_graph::infrastructure::ast_cache::AstCache;
use crate::features::flow_graph::infrastructure::bfg::{
    build_function_bfg, build_module_scope_bfg,
};
use crate::features::flow_graph::ports::FlowAnalyzer;
use crate::features::ir_generation::domain::IRDocument;
use crate::features::parsing::ports::{LanguageId, LanguagePlugin, LanguageRegistry};
use crate::shared::models::{Node as IrNode, NodeKind, Result, Span};

pub struct TreeSitterFlowAnalyzer {
    registry: LanguageRegistry,
    cache: AstCache,
}

impl TreeSitterFlowAnalyzer {
    pub fn new(registry: LanguageRegistry, repo_file_count: usize) -> Self {
        Self {
            registry,
            cache: AstCache::for_repo_size(repo_file_count),
        }
    }

    pub fn cache_stats(&self) -> crate::features::flow_graph::infrastructure::ast_cache::CacheStats {
        self.cache.get_cache_stats()
    }

    fn plugin_for(&self, node: &IrNode) -> Option<&dyn LanguagePlugin> {
        let lang = match node.language.to_lowercase().as_str() {
            "python" => LanguageId::Python,
            "java" => LanguageId::Java,
            "typescript" => LanguageId::TypeScript,
            "javascript" => LanguageId::JavaScript,
            "kotlin" => LanguageId::Kotlin,
            "rust" => LanguageId::Rust,
            "go" => LanguageId::Go,
            _ => return None,
        };
        self.registry.get(lang)
    }

    fn parse_file(&self, file_path: &str, source: &str, plugin: &dyn LanguagePlugin) -> Option<Arc<Tree>> {
        let key = format!("{}:{}", file_path, blake3::hash(source.as_bytes()).to_hex());
        self.cache.get_or_parse(&key, || {
            let mut parser = tree_sitter::Parser::new();
            parser.set_language(&plugin.tree_sitter_language()).ok()?;
            parser.parse(source, None)
        })
    }

    fn is_function_like(kind: NodeKind) -> bool {
        matches!(
            kind,
            NodeKind::Function | NodeKind::Method | NodeKind::SuspendFunction
        )
    }
}

impl FlowAnalyzer for TreeSitterFlowAnalyzer {
    fn build_bfg(&self, ir: &IRDocument) -> Result<Vec<BasicFlowGraph>> {
        let mut by_file: HashMap<&str, Vec<&IrNode>> = HashMap::new();
        for node in &ir.nodes {
            if Self::is_function_like(node.kind) || node.kind == NodeKind::Module {
                by_file.entry(node.file_path.as_str()).or_default().push(node);
            }
        }

        let mut graphs = Vec::new();

        for (file_path, nodes) in by_file {
            let source = match std::fs::read_to_string(file_path) {
                Ok(s) => s,
                Err(_) => {
                    // File unreadable at analysis time: emit single-block fallbacks.
                    for node in nodes {
                        graphs.push(build_module_scope_bfg(&node.id, node.span, 1));
                    }
                    continue;
                }
            };

            let plugin = nodes.first().and_then(|n| self.plugin_for(*n));
            let plugin = match plugin {
                Some(p) => p,
                None => {
                    for node in nodes {
                        graphs.push(build_module_scope_bfg(&node.id, node.span, 1));
                    }
                    continue;
                }
            };

            let tree = self.parse_file(file_path, &source, plugin);
            let Some(tree) = tree else {
                for node in nodes {
                    graphs.push(build_module_scope_bfg(&node.id, node.span, 1));
                }
                continue;
            };

            for node in nodes {
                if node.kind == NodeKind::Module {
                    let stmt_count = tree.root_node().named_child_count();
                    graphs.push(build_module_scope_bfg(&node.id, node.span, stmt_count));
                    continue;
                }

                let start = Point::new(
                    (node.span.start_line.saturating_sub(1)) as usize,
                    node.span.start_col as usize,
                );
                let end = Point::new(
                    (node.span.end_line.saturating_sub(1)) as usize,
                    node.span.end_col as usize,
                );

                let matched = tree.root_node().descendant_for_point_range(start, end);
                let body = matched.and_then(|m| plugin.get_control_flow_body(&m));

                match body {
                    Some(body_node) => {
                        let is_generator = node.is_generator.unwrap_or(false);
                        graphs.push(build_function_bfg(
                            &node.id,
                            &body_node,
                            &source,
                            plugin,
                            is_generator,
                        ));
                    }
                    None => {
                        graphs.push(build_module_scope_bfg(&node.id, node.span, 1));
                    }
                }
            }
        }

        Ok(graphs)
    }

    fn build_cfg(&self, bfg: &[BasicFlowGraph]) -> Result<Vec<CFGEdge>> {
        let mut edges = Vec::new();
        for graph in bfg {
            edges.extend(build_cfg_edges_for_graph(graph));
        }
        Ok(edges)
    }
}

/// Derive sequential/branch/loop CFG edges from a single function's blocks.
///
/// Mirrors the successor rules of the original BFG-to-CFG lowering: Condition
/// blocks fan out to both branches, LoopHeader blocks gain a back-edge from
/// the last block in their body, and Suspend/Resume pairs are linked
/// explicitly rather than purely by position.
fn build_cfg_edges_for_graph(graph: &BasicFlowGraph) -> Vec<CFGEdge> {
    let blocks = &graph.blocks;
    let mut edges = Vec::new();

    if blocks.len() < 2 {
        return edges;
    }

    for i in 0..blocks.len() - 1 {
        let current = &blocks[i];
        let next = &blocks[i + 1];

        match current.kind {
            BlockKind::Entry | BlockKind::Statement | BlockKind::Try | BlockKind::Catch
            | BlockKind::Finally | BlockKind::Yield | BlockKind::Suspend => {
                edges.push(CFGEdge {
                    source_block_id: current.id.clone(),
                    target_block_id: next.id.clone(),
                    kind: CFGEdgeKind::Sequential,
                });
            }
            BlockKind::Resume => {
                edges.push(CFGEdge {
                    source_block_id: current.id.clone(),
                    target_block_id: next.id.clone(),
                    kind: CFGEdgeKind::Sequential,
                });
            }
            BlockKind::Condition => {
                edges.push(CFGEdge {
                    source_block_id: current.id.clone(),
                    target_block_id: next.id.clone(),
                    kind: CFGEdgeKind::TrueBranch,
                });
                if i + 2 < blocks.len() {
                    edges.push(CFGEdge {
                        source_block_id: current.id.clone(),
                        target_block_id: blocks[i + 2].id.clone(),
                        kind: CFGEdgeKind::FalseBranch,
                    });
                }
            }
            BlockKind::LoopHeader => {
                edges.push(CFGEdge {
                    source_block_id: current.id.clone(),
                    target_block_id: next.id.clone(),
                    kind: CFGEdgeKind::Sequential,
                });
                if let Some(last_body) = find_loop_body_end(blocks, i) {
                    edges.push(CFGEdge {
                        source_block_id: last_body.id.clone(),
                        target_block_id: current.id.clone(),
                        kind: CFGEdgeKind::LoopBack,
                    });
                }
            }
            BlockKind::Dispatcher | BlockKind::ResumeYield => {
                edges.push(CFGEdge {
                    source_block_id: current.id.clone(),
                    target_block_id: next.id.clone(),
                    kind: CFGEdgeKind::Sequential,
                });
            }
            BlockKind::Exit => {}
        }
    }

    for block in blocks {
        if let Some(suspend_id) = &block.resume_from_suspend_id {
            edges.push(CFGEdge {
                source_block_id: suspend_id.clone(),
                target_block_id: block.id.clone(),
                kind: CFGEdgeKind::Sequential,
            });
        }
    }

    edges
}

fn find_loop_body_end<'a>(blocks: &'a [BasicFlowBlock], loop_idx: usize) -> Option<&'a BasicFlowBlock> {
    for i in (loop_idx + 1)..blocks.len() {
        if matches!(
            blocks[i].kind,
            BlockKind::LoopHeader | BlockKind::Condition | BlockKind::Exit
        ) {
            if i > loop_idx + 1 {
                return Some(&blocks[i - 1]);
            }
            break;
        }
    }
    if blocks.len() > loop_idx + 1 {
        for i in (loop_idx + 1..blocks.len()).rev() {
            if blocks[i].kind == BlockKind::Statement {
                return Some(&blocks[i]);
            }
        }
    }
    None
}
