//! Flow Graph infrastructure

pub mod ast_cache;
pub mod bfg;
pub mod cfg;
pub mod exceptional_cfg_builder;
pub mod flow_analyzer;
pub mod finally_support;

pub use ast_cache::AstCache;
pub use bfg::*;
pub use cfg::*;
pub use exceptional_cfg_builder::ExceptionalCFGBuilder;
pub use flow_analyzer::TreeSitterFlowAnalyzer;
