//! Version-control collaborator

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::SnitchError;
use crate::todo::ReportedTodo;

/// The version-control operations snitch relies on
pub trait VersionControl {
    /// Files tracked under `root`, in index order, as paths usable from the
    /// current directory
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>, SnitchError>;

    /// Stage the current contents of `path`
    fn stage(&self, path: &Path) -> Result<(), SnitchError>;

    /// Commit the staged changes
    fn commit(&self, message: &str) -> Result<(), SnitchError>;
}

/// Stage the TODO's file and commit it as `"{verb} TODO(<id>)"`
pub fn commit_todo(
    vcs: &dyn VersionControl,
    todo: &ReportedTodo,
    verb: &str,
) -> Result<(), SnitchError> {
    let message = todo.commit_message(verb);
    info!(file = %todo.todo().filename().display(), %message, "committing");
    vcs.stage(todo.todo().filename())?;
    vcs.commit(&message)
}
