pub mod repomap_storage;

pub use repomap_storage::RepoMapStorage;
