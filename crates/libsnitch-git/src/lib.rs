//! Git backend for snitch
//!
//! Lists the files the index tracks, stages rewritten files and commits
//! them, all through libgit2.

pub mod error;
pub mod repo;

pub use error::GitError;
pub use repo::GitRepo;
