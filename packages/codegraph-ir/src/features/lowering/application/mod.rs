pub mod lowering_usecase;

pub use lowering_usecase::{LoweringResult, LoweringUseCase, LoweringUseCaseImpl};
