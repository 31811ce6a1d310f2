//! L2 node model: the language-agnostic unit of the structural IR.
//!
//! A `Node` is produced by expression lowering and by the per-language
//! `ir_generation` visitors; chunking, cross-file resolution, and
//! graph-building all walk `Vec<Node>` rather than any AST-specific type.

use serde::{Deserialize, Serialize};

use super::span::Span;

/// Structural category of a `Node`.
///
/// Spans declaration-level constructs (class/function/field/...), expression
/// nodes reused from lowering (binary ops, calls, literals...), and a handful
/// of framework-flavored kinds (`Route`, `Service`, `Repository`, ...) used by
/// repomap and cross-file role inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    AnnotationDecl,
    Assert,
    Assignment,
    AssociatedType,
    BinaryOp,
    BooleanOp,
    Break,
    Call,
    Catch,
    CfgBlock,
    Channel,
    Class,
    Collection,
    CompanionObject,
    Comparison,
    Comprehension,
    ConditionalExpression,
    Config,
    Continue,
    DataClass,
    Directory,
    Enum,
    EnumMember,
    ExtensionFunction,
    ExternalFunction,
    ExternalModule,
    ExternalType,
    Field,
    FieldAccess,
    File,
    Finally,
    Function,
    FunctionCall,
    Import,
    Index,
    Interface,
    Job,
    Lambda,
    LambdaDefinition,
    Lifetime,
    Literal,
    Macro,
    Method,
    Middleware,
    Module,
    ObjectInstantiation,
    Parameter,
    Raise,
    Record,
    Repository,
    Return,
    Route,
    SealedClass,
    Service,
    Signature,
    Struct,
    Subscript,
    SuspendFunction,
    Throw,
    Trait,
    TraitImpl,
    Try,
    Type,
    TypeAlias,
    TypeParameter,
    UnaryOp,
    Variable,
    VariableRead,
}

/// Language-agnostic IR node.
///
/// `id`/`kind`/`fqn`/`file_path`/`span`/`language` are always known at
/// construction time; everything else is filled in incrementally by the
/// lowering/ir_generation visitors as they learn more about the construct
/// (docstrings, decorators, async-ness, inferred types, ...), so it stays
/// `Option`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub fqn: String,
    pub file_path: String,
    pub span: Span,
    pub language: String,

    pub stable_id: Option<String>,
    pub content_hash: Option<String>,
    pub name: Option<String>,
    pub module_path: Option<String>,
    pub parent_id: Option<String>,
    pub body_span: Option<Span>,
    pub docstring: Option<String>,
    pub decorators: Option<Vec<String>>,
    pub annotations: Option<Vec<String>>,
    pub modifiers: Option<Vec<String>>,
    pub is_async: Option<bool>,
    pub is_generator: Option<bool>,
    pub is_static: Option<bool>,
    pub is_abstract: Option<bool>,
    pub parameters: Option<Vec<String>>,
    pub return_type: Option<String>,
    pub base_classes: Option<Vec<String>>,
    pub metaclass: Option<String>,
    pub type_annotation: Option<String>,
    pub initial_value: Option<String>,
    /// JSON-encoded bag of extraction-specific metadata (kept as a string,
    /// not a map, for cheap FFI round-tripping); parsed on demand by callers
    /// such as exception-type lookups.
    pub metadata: Option<String>,
    pub role: Option<String>,
    pub is_test_file: Option<bool>,
    pub signature_id: Option<String>,
    pub declared_type_id: Option<String>,
    /// Same JSON-string convention as `metadata`.
    pub attrs: Option<String>,
    pub raw: Option<String>,
    pub flavor: Option<String>,
    pub is_nullable: Option<bool>,
    pub owner_node_id: Option<String>,
    pub condition_expr_id: Option<String>,
    pub condition_text: Option<String>,

    /// Resolved symbol this node's expression reads or writes. Set post-hoc
    /// by expression lowering once the symbol table pass has run.
    pub symbol_id: Option<String>,
    /// Type inferred for this node's expression, when available.
    pub inferred_type: Option<String>,
}

impl Node {
    /// Construct a node with its always-known fields; everything else
    /// defaults to `None` and is filled in via the `with_*` chain methods as
    /// the extractor learns more about the construct.
    pub fn new(id: String, kind: NodeKind, fqn: String, file_path: String, span: Span) -> Self {
        Self {
            id,
            kind,
            fqn,
            file_path,
            span,
            language: String::new(),
            stable_id: None,
            content_hash: None,
            name: None,
            module_path: None,
            parent_id: None,
            body_span: None,
            docstring: None,
            decorators: None,
            annotations: None,
            modifiers: None,
            is_async: None,
            is_generator: None,
            is_static: None,
            is_abstract: None,
            parameters: None,
            return_type: None,
            base_classes: None,
            metaclass: None,
            type_annotation: None,
            initial_value: None,
            metadata: None,
            role: None,
            is_test_file: None,
            signature_id: None,
            declared_type_id: None,
            attrs: None,
            raw: None,
            flavor: None,
            is_nullable: None,
            owner_node_id: None,
            condition_expr_id: None,
            condition_text: None,
            symbol_id: None,
            inferred_type: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = file_path.into();
        self
    }

    pub fn with_fqn(mut self, fqn: impl Into<String>) -> Self {
        self.fqn = fqn.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_symbol_id(mut self, symbol_id: impl Into<String>) -> Self {
        self.symbol_id = Some(symbol_id.into());
        self
    }

    pub fn with_docstring(mut self, docstring: impl Into<String>) -> Self {
        self.docstring = Some(docstring.into());
        self
    }

    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}

/// Alternate construction style used by the expression-lowering visitors:
/// start from just `(id, kind)` and set location/path afterward. Forwards to
/// the same `with_*` chain [`Node`] itself exposes.
pub struct NodeBuilder {
    node: Node,
}

impl NodeBuilder {
    pub fn new(id: String, kind: NodeKind) -> Self {
        Self {
            node: Node::new(id, kind, String::new(), String::new(), Span::zero()),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.node = self.node.with_span(span);
        self
    }

    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.node = self.node.with_file_path(file_path);
        self
    }

    pub fn with_fqn(mut self, fqn: impl Into<String>) -> Self {
        self.node = self.node.with_fqn(fqn);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.node = self.node.with_language(language);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.node = self.node.with_name(name);
        self
    }

    pub fn with_symbol_id(mut self, symbol_id: impl Into<String>) -> Self {
        self.node = self.node.with_symbol_id(symbol_id);
        self
    }

    pub fn with_docstring(mut self, docstring: impl Into<String>) -> Self {
        self.node = self.node.with_docstring(docstring);
        self
    }

    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.node = self.node.with_parent_id(parent_id);
        self
    }

    pub fn build(self) -> Node {
        self.node
    }
}
