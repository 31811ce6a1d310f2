//! IR Generation Feature (L2)
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-export for query_engine
pub use application::GenerateIRUseCase;
pub use domain::ir_document;
pub use infrastructure::TreeWalkingIRGenerator;
pub use ports::IRGenerator;
