//! Basic Flow Graph domain model
use crate::shared::models::Span;

/// Block kind (matches Python BFGBlockKind exactly)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Entry,
    Exit,
    Statement,
    Condition,
    LoopHeader,
    Try,
    Catch,
    Finally,
    Suspend,
    Resume,
    Dispatcher,
    Yield,
    ResumeYield,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Entry => "Entry",
            BlockKind::Exit => "Exit",
            BlockKind::Statement => "Statement",
            BlockKind::Condition => "Condition",
            BlockKind::LoopHeader => "LoopHeader",
            BlockKind::Try => "Try",
            BlockKind::Catch => "Catch",
            BlockKind::Finally => "Finally",
            BlockKind::Suspend => "Suspend",
            BlockKind::Resume => "Resume",
            BlockKind::Dispatcher => "Dispatcher",
            BlockKind::Yield => "Yield",
            BlockKind::ResumeYield => "ResumeYield",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BasicFlowBlock {
    pub id: String,
    pub kind: BlockKind,
    pub function_node_id: String,
    pub span: Span,
    pub statement_count: usize,
    /// True when this block's terminal statement is an awaited call (Suspend blocks only).
    pub is_async_call: bool,
    /// True when this block can raise (feeds exceptional CFG linking).
    pub can_throw: bool,
    /// Source text of the awaited expression, set on Suspend blocks.
    pub awaited_expr: Option<String>,
    /// For a Resume block, the id of the Suspend block it resumes from.
    pub resume_from_suspend_id: Option<String>,
    /// Variable the awaited/yielded value is bound to, if any.
    pub result_variable: Option<String>,
    /// For break/continue/loop-body blocks, the id of the enclosing loop's header block.
    pub loop_header_block_id: Option<String>,
    /// Local variable names assigned anywhere in the function; populated on the Entry block only.
    pub all_locals: Option<Vec<String>>,
}

impl BasicFlowBlock {
    pub fn new(id: String, kind: BlockKind, function_node_id: String, span: Span) -> Self {
        Self {
            id,
            kind,
            function_node_id,
            span,
            statement_count: 0,
            is_async_call: false,
            can_throw: false,
            awaited_expr: None,
            resume_from_suspend_id: None,
            result_variable: None,
            loop_header_block_id: None,
            all_locals: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BasicFlowGraph {
    pub id: String,
    pub function_id: String,
    pub entry_block_id: String,
    pub exit_block_id: String,
    pub blocks: Vec<BasicFlowBlock>,
    pub total_statements: usize,
    /// True when the source function contains one or more yield expressions.
    pub is_generator: bool,
    /// Number of distinct yield points found while building the graph.
    pub yield_count: usize,
}
