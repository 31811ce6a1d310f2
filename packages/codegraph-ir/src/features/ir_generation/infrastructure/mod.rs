pub mod ir_builder;
pub mod tree_walker;
pub mod visitor;

pub use ir_builder::IRBuilder;
pub use tree_walker::TreeWalkingIRGenerator;
pub use visitor::{traverse_with_visitor, AstVisitor};
