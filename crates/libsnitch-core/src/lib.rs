//! Core library for snitch.
//!
//! Finds `TODO:` markers in the files a repository tracks, rewrites single
//! lines in place, and drives the report and purge workflows against the
//! version-control, issue-tracker and prompt collaborators.

pub mod config;
pub mod error;
pub mod prompt;
pub mod report;
pub mod rewrite;
pub mod todo;
pub mod tracker;
pub mod vcs;
pub mod walk;

pub use error::SnitchError;
pub use todo::{parse_line, ReportedTodo, Status, Todo};
