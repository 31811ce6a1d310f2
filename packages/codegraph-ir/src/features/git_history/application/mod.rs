pub mod git_usecase;

pub use git_usecase::{GitHistoryUseCase, GitHistoryUseCaseImpl};
