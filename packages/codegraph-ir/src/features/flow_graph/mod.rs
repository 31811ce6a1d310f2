//! Flow Graph Feature
//!
//! Builds per-function basic flow graphs (BFG) and control flow graphs (CFG)
//! from the structural IR, including generator lowering and async
//! suspend/resume splitting.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::build_flow_graphs::{BuildFlowGraphsUseCase, FlowGraphResult};
pub use infrastructure::flow_analyzer::TreeSitterFlowAnalyzer;
pub use ports::flow_analyzer::FlowAnalyzer;
