//! L2 edge model: directed relationships between [`Node`](super::Node)s.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::span::Span;

/// Relationship kind connecting two nodes.
///
/// Mixes structural relationships (`Contains`, `Defines`, `Calls`, `Extends`,
/// `Implements`, ...), control-flow edges used by the flow-graph builder
/// (`CfgNext`, `CfgBranch`, `TrueBranch`, `FalseBranch`, `LoopBack`, ...),
/// data-flow edges from expression lowering (`Reads`/`READS`, `Writes`,
/// `DefUse`), and exception edges (`Throws`, `Catches`, `Finally`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    AnnotatedWith,
    BorrowsFrom,
    BoundedBy,
    Calls,
    Captures,
    Catch,
    Catches,
    CfgBranch,
    CfgHandler,
    CfgLoop,
    CfgNext,
    ChannelReceive,
    ChannelSend,
    Contains,
    ControlFlow,
    DataFlow,
    DecoratedWith,
    Decorates,
    DefUse,
    Defines,
    DelegatesTo,
    Exception,
    Extends,
    FalseBranch,
    Finally,
    HandlesRequest,
    Implements,
    ImplementsTrait,
    Imports,
    Inherits,
    Instantiates,
    Invokes,
    LifetimeOf,
    LoopBack,
    LoopExit,
    MacroExpands,
    Normal,
    Overrides,
    #[allow(non_camel_case_types)]
    READS,
    Reads,
    References,
    ReferencesSymbol,
    ReferencesType,
    RouteHandler,
    Sequential,
    Shadows,
    SpawnsGoroutine,
    SuspendsTo,
    Throw,
    Throws,
    TrueBranch,
    TypeAnnotation,
    TypeArgumentOf,
    UsesRepository,
    Writes,
}

/// Free-form metadata attached to an edge; grows as edge kinds need more
/// structured context (e.g. an import alias).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeMetadata {
    pub alias: Option<String>,
}

/// Directed relationship between two nodes, identified by id rather than
/// borrowed reference so edge lists can be built independently of node
/// storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub source_id: String,
    pub target_id: String,
    pub kind: EdgeKind,
    pub span: Option<Span>,
    pub metadata: Option<EdgeMetadata>,
    pub attrs: Option<HashMap<String, serde_json::Value>>,
}

impl Edge {
    pub fn new(source_id: String, target_id: String, kind: EdgeKind) -> Self {
        Self {
            source_id,
            target_id,
            kind,
            span: None,
            metadata: None,
            attrs: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_metadata(mut self, metadata: EdgeMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_attrs(mut self, attrs: HashMap<String, serde_json::Value>) -> Self {
        self.attrs = Some(attrs);
        self
    }
}
