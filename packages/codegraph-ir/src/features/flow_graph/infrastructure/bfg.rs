/*
 * BFG (Basic Flow Graph) Module
 *
 * Extracts control flow blocks from function bodies.
 *
 * SOTA Features:
 * - Visitor pattern integration
 * - Language-agnostic via LanguagePlugin delegation
 * - Await suspend/resume splitting and generator yield tracking
 */

use crate::features::flow_graph::domain::bfg::{BasicFlowBlock, BasicFlowGraph, BlockKind};
use crate::features::ir_generation::infrastructure::visitor::AstVisitor;
use crate::features::parsing::ports::{ControlFlowType, LanguagePlugin};
use crate::shared::models::Span;
use std::collections::BTreeSet;
use tree_sitter::Node;

/// BFG Visitor - extracts control flow blocks
///
/// Implements AstVisitor to integrate with unified traversal.
/// Language-specific node-kind detection is delegated to `LanguagePlugin`
/// so the same visitor drives Python, TypeScript, Java, Kotlin and Go alike.
pub struct BfgVisitor<'a> {
    function_id: String,
    blocks: Vec<BasicFlowBlock>,
    block_counter: usize,
    current_block_statements: Vec<Span>,
    current_block_can_throw: bool,
    try_depth: usize,
    loop_stack: Vec<String>,
    yield_count: usize,
    locals: BTreeSet<String>,
    language_plugin: &'a dyn LanguagePlugin,
}

impl<'a> BfgVisitor<'a> {
    pub fn new(function_id: String, language_plugin: &'a dyn LanguagePlugin) -> Self {
        Self {
            function_id,
            blocks: Vec::new(),
            block_counter: 0,
            current_block_statements: Vec::new(),
            current_block_can_throw: false,
            try_depth: 0,
            loop_stack: Vec::new(),
            yield_count: 0,
            locals: BTreeSet::new(),
            language_plugin,
        }
    }

    pub fn get_blocks(&self) -> &[BasicFlowBlock] {
        &self.blocks
    }

    pub fn yield_count(&self) -> usize {
        self.yield_count
    }

    pub fn locals(&self) -> Vec<String> {
        self.locals.iter().cloned().collect()
    }

    pub fn finalize(&mut self) {
        self.flush_current_block(BlockKind::Statement);
    }

    /// Process a function body's top-level statements (entry point for building a BFG).
    pub fn process_body(&mut self, body: &Node, source: &str) {
        self.visit_block_statements(body, source);
    }

    fn next_block_id(&mut self) -> String {
        let id = format!("bfg:{}:block:{}", self.function_id, self.block_counter);
        self.block_counter += 1;
        id
    }

    fn flush_current_block(&mut self, kind: BlockKind) -> Option<String> {
        if self.current_block_statements.is_empty() {
            return None;
        }

        let first = self.current_block_statements.first().unwrap();
        let last = self.current_block_statements.last().unwrap();
        let span = Span::new(
            first.start_line,
            first.start_col,
            last.end_line,
            last.end_col,
        );

        let block_id = self.next_block_id();
        let mut block =
            BasicFlowBlock::new(block_id.clone(), kind, self.function_id.clone(), span);
        block.statement_count = self.current_block_statements.len();
        block.can_throw = self.current_block_can_throw;
        if matches!(
            kind,
            BlockKind::Statement | BlockKind::LoopHeader | BlockKind::Condition
        ) {
            block.loop_header_block_id = self.loop_stack.last().cloned();
        }

        self.blocks.push(block);
        self.current_block_statements.clear();
        self.current_block_can_throw = false;
        Some(block_id)
    }

    /// Flush a synthetic zero-statement block (used for Suspend/Resume markers).
    fn push_marker_block(&mut self, kind: BlockKind, span: Span) -> String {
        let block_id = self.next_block_id();
        let mut block =
            BasicFlowBlock::new(block_id.clone(), kind, self.function_id.clone(), span);
        block.loop_header_block_id = self.loop_stack.last().cloned();
        self.blocks.push(block);
        block_id
    }

    fn is_control_flow(&self, node: &Node) -> bool {
        self.language_plugin.is_control_flow_node(node)
    }

    fn is_statement(&self, node: &Node) -> bool {
        self.language_plugin.is_statement_node(node)
    }

    /// Record a statement, splitting into Suspend/Resume blocks if it contains an await,
    /// and recording the yield count and any assignment target as a local.
    fn push_statement(&mut self, node: &Node, source: &str) {
        if let Some(target) = self.language_plugin.assignment_target(node) {
            if let Some(name) = source.get(target.byte_range()) {
                self.locals.insert(name.to_string());
            }
        }

        if self.language_plugin.is_yield_node(node) {
            self.yield_count += 1;
        }

        if let Some(await_node) = self.language_plugin.find_await(node) {
            // Flush whatever preceded this statement as a plain block.
            self.flush_current_block(BlockKind::Statement);

            let awaited_expr = source.get(await_node.byte_range()).map(|s| s.to_string());
            let result_variable = self
                .language_plugin
                .assignment_target(node)
                .and_then(|t| source.get(t.byte_range()))
                .map(|s| s.to_string());

            let stmt_span = node_to_span(node);
            let suspend_id = self.next_block_id();
            let mut suspend = BasicFlowBlock::new(
                suspend_id.clone(),
                BlockKind::Suspend,
                self.function_id.clone(),
                stmt_span,
            );
            suspend.statement_count = 1;
            suspend.is_async_call = true;
            suspend.can_throw = true;
            suspend.awaited_expr = awaited_expr;
            self.blocks.push(suspend);

            let mut resume = BasicFlowBlock::new(
                self.next_block_id(),
                BlockKind::Resume,
                self.function_id.clone(),
                stmt_span,
            );
            resume.resume_from_suspend_id = Some(suspend_id);
            resume.result_variable = result_variable;
            self.blocks.push(resume);
            return;
        }

        let span = node_to_span(node);
        self.current_block_statements.push(span);
        if self.try_depth > 0 {
            self.current_block_can_throw = true;
        }
    }

    /// Visit statements within a block (used for if/else/loop bodies)
    fn visit_block_statements(&mut self, block_node: &Node, source: &str) {
        let mut cursor = block_node.walk();
        for child in block_node.children(&mut cursor) {
            if self.is_control_flow(&child) {
                self.visit_node(&child, source, 0);
            } else if self.is_statement(&child) {
                self.push_statement(&child, source);
            }
        }
    }

    fn process_if(&mut self, node: &Node, source: &str) {
        if let Some(condition) = self.language_plugin.get_control_flow_condition(node) {
            let span = node_to_span(&condition);
            self.current_block_statements.push(span);
            self.flush_current_block(BlockKind::Condition);
        }

        if let Some(consequence) = self.language_plugin.get_control_flow_body(node) {
            self.visit_block_statements(&consequence, source);
            self.flush_current_block(BlockKind::Statement);
        }

        if let Some(alternative) = self.language_plugin.get_control_flow_alternative(node) {
            if self.language_plugin.is_chained_condition(&alternative) {
                self.visit_node(&alternative, source, 0);
            } else {
                if let Some(else_body) = self.language_plugin.get_control_flow_body(&alternative) {
                    self.visit_block_statements(&else_body, source);
                } else {
                    self.visit_block_statements(&alternative, source);
                }
                self.flush_current_block(BlockKind::Statement);
            }
        }
    }

    fn process_loop(&mut self, node: &Node, source: &str) {
        let header_span;
        let iterators = self.language_plugin.get_loop_iterator(node);
        if !iterators.is_empty() {
            for iter_node in &iterators {
                let span = node_to_span(iter_node);
                self.current_block_statements.push(span);
            }
            header_span = node_to_span(&iterators[0]);
        } else if let Some(condition) = self.language_plugin.get_control_flow_condition(node) {
            let span = node_to_span(&condition);
            self.current_block_statements.push(span);
            header_span = span;
        } else {
            header_span = node_to_span(node);
        }

        let header_id = self
            .flush_current_block(BlockKind::LoopHeader)
            .unwrap_or_else(|| self.push_marker_block(BlockKind::LoopHeader, header_span));

        self.loop_stack.push(header_id);
        if let Some(body) = self.language_plugin.get_control_flow_body(node) {
            self.visit_block_statements(&body, source);
            self.flush_current_block(BlockKind::Statement);
        }
        self.loop_stack.pop();
    }

    fn process_match(&mut self, node: &Node, source: &str) {
        let arms = self.language_plugin.get_match_arms(node);
        for arm in arms {
            self.visit_block_statements(&arm, source);
            self.flush_current_block(BlockKind::Statement);
        }
    }

    fn process_try(&mut self, node: &Node, source: &str) {
        self.try_depth += 1;
        if let Some(body) = self.language_plugin.get_control_flow_body(node) {
            self.visit_block_statements(&body, source);
            self.flush_current_block(BlockKind::Try);
        }
        self.try_depth -= 1;

        let handlers = self.language_plugin.get_exception_handlers(node);

        for catch_block in handlers.catch_blocks {
            if let Some(catch_body) = self.language_plugin.get_control_flow_body(&catch_block) {
                self.visit_block_statements(&catch_body, source);
                self.flush_current_block(BlockKind::Catch);
            }
        }

        if let Some(finally_block) = handlers.finally_block {
            if let Some(finally_body) = self.language_plugin.get_control_flow_body(&finally_block)
            {
                self.visit_block_statements(&finally_body, source);
                self.flush_current_block(BlockKind::Finally);
            }
        }
    }
}

impl<'a> AstVisitor for BfgVisitor<'a> {
    fn visit_node(&mut self, node: &Node, source: &str, _depth: usize) {
        if self.is_control_flow(node) {
            self.flush_current_block(BlockKind::Statement);

            if let Some(cf_type) = self.language_plugin.get_control_flow_type(node) {
                match cf_type {
                    ControlFlowType::If => self.process_if(node, source),
                    ControlFlowType::Loop => self.process_loop(node, source),
                    ControlFlowType::Match => self.process_match(node, source),
                    ControlFlowType::Try => self.process_try(node, source),
                    ControlFlowType::Yield => {
                        self.yield_count += 1;
                        let span = node_to_span(node);
                        self.current_block_statements.push(span);
                        self.flush_current_block(BlockKind::Yield);
                    }
                    ControlFlowType::Await => {
                        self.push_statement(node, source);
                    }
                    ControlFlowType::Return
                    | ControlFlowType::Break
                    | ControlFlowType::Continue
                    | ControlFlowType::Raise => {
                        let span = node_to_span(node);
                        self.current_block_statements.push(span);
                        if self.try_depth > 0 {
                            self.current_block_can_throw = true;
                        }
                        self.flush_current_block(BlockKind::Statement);
                    }
                }
            } else {
                let span = node_to_span(node);
                self.current_block_statements.push(span);
                self.flush_current_block(BlockKind::Statement);
            }
        } else if self.is_statement(node) {
            self.push_statement(node, source);
        }
    }

    fn enter_node(&mut self, _node: &Node, _source: &str, _depth: usize) {}

    fn exit_node(&mut self, _node: &Node, _source: &str, _depth: usize) {}
}

fn node_to_span(node: &Node) -> Span {
    let start_pos = node.start_position();
    let end_pos = node.end_position();

    Span::new(
        start_pos.row as u32 + 1,
        start_pos.column as u32,
        end_pos.row as u32 + 1,
        end_pos.column as u32,
    )
}

/// Build a full `BasicFlowGraph` for a function body, wrapping the visitor's
/// blocks with synthetic Entry/Exit blocks and attaching generator/local
/// metadata to the entry block.
///
/// Falls back to a single Statement block spanning the whole body if the
/// visitor produces no blocks at all (e.g. an empty function).
pub fn build_function_bfg(
    function_id: &str,
    body: &Node,
    source: &str,
    language_plugin: &dyn LanguagePlugin,
    is_generator: bool,
) -> BasicFlowGraph {
    let mut visitor = BfgVisitor::new(function_id.to_string(), language_plugin);
    visitor.process_body(body, source);
    visitor.finalize();

    let body_span = node_to_span(body);
    let entry_id = format!("bfg:{}:entry", function_id);
    let exit_id = format!("bfg:{}:exit", function_id);

    let mut entry = BasicFlowBlock::new(
        entry_id.clone(),
        BlockKind::Entry,
        function_id.to_string(),
        Span::new(
            body_span.start_line,
            body_span.start_col,
            body_span.start_line,
            body_span.start_col,
        ),
    );
    if is_generator {
        entry.all_locals = Some(visitor.locals());
    }

    let mut blocks = vec![entry];
    let mut total_statements = 0usize;
    let visited = visitor.get_blocks().to_vec();
    if visited.is_empty() {
        // Fallback: a single statement block spanning the whole body.
        let mut fallback = BasicFlowBlock::new(
            format!("bfg:{}:block:0", function_id),
            BlockKind::Statement,
            function_id.to_string(),
            body_span,
        );
        fallback.statement_count = 1;
        total_statements += 1;
        blocks.push(fallback);
    } else {
        for block in visited {
            total_statements += block.statement_count;
            blocks.push(block);
        }
    }

    blocks.push(BasicFlowBlock::new(
        exit_id.clone(),
        BlockKind::Exit,
        function_id.to_string(),
        Span::new(
            body_span.end_line,
            body_span.end_col,
            body_span.end_line,
            body_span.end_col,
        ),
    ));

    BasicFlowGraph {
        id: format!("bfg:{}", function_id),
        function_id: function_id.to_string(),
        entry_block_id: entry_id,
        exit_block_id: exit_id,
        blocks,
        total_statements,
        is_generator,
        yield_count: visitor.yield_count(),
    }
}

/// Build a synthetic single-block BFG for module-level (top-level) code,
/// which has no enclosing function node to attach blocks to.
pub fn build_module_scope_bfg(
    module_id: &str,
    module_span: Span,
    statement_count: usize,
) -> BasicFlowGraph {
    let entry_id = format!("bfg:{}:entry", module_id);
    let exit_id = format!("bfg:{}:exit", module_id);
    let body_id = format!("bfg:{}:block:0", module_id);

    let entry = BasicFlowBlock::new(
        entry_id.clone(),
        BlockKind::Entry,
        module_id.to_string(),
        Span::new(
            module_span.start_line,
            module_span.start_col,
            module_span.start_line,
            module_span.start_col,
        ),
    );
    let mut body = BasicFlowBlock::new(
        body_id,
        BlockKind::Statement,
        module_id.to_string(),
        module_span,
    );
    body.statement_count = statement_count;
    let exit = BasicFlowBlock::new(
        exit_id.clone(),
        BlockKind::Exit,
        module_id.to_string(),
        Span::new(
            module_span.end_line,
            module_span.end_col,
            module_span.end_line,
            module_span.end_col,
        ),
    );

    BasicFlowGraph {
        id: format!("bfg:{}", module_id),
        function_id: module_id.to_string(),
        entry_block_id: entry_id,
        exit_block_id: exit_id,
        blocks: vec![entry, body, exit],
        total_statements: statement_count,
        is_generator: false,
        yield_count: 0,
    }
}
