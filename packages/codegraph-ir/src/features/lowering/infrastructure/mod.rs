// DEPRECATED: Old expression lowering (not used in current pipeline)
pub mod python_lowering;
