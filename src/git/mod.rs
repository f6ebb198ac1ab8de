pub mod diff;
pub mod history;
pub mod repository;
pub mod tree;

pub use repository::{RepoSession, Resolved};
