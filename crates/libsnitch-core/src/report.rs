//! Report and purge workflows.
//!
//! Both run in two phases. The first walks the tree and asks the operator
//! about each candidate; nothing is changed yet. The second acts on the
//! accepted candidates one at a time (issue tracker, rewrite, commit) and
//! stops at the first failure. Work committed before a failure stays
//! committed.

use std::io::Write;
use std::path::Path;

use tracing::{info, warn};

use crate::config::ProjectConfig;
use crate::error::SnitchError;
use crate::prompt::Prompt;
use crate::rewrite::{remove_todo, update_todo};
use crate::todo::{ReportedTodo, Todo};
use crate::tracker::{IssueState, IssueTracker};
use crate::vcs::{commit_todo, VersionControl};
use crate::walk::TodoWalker;

/// Print the log form of every TODO under `root`
pub fn list_todos(
    vcs: &dyn VersionControl,
    root: &Path,
    out: &mut dyn Write,
) -> Result<usize, SnitchError> {
    let mut count = 0;
    for todo in TodoWalker::for_dir(vcs, root)? {
        writeln!(out, "{}", todo?.log_line())?;
        count += 1;
    }
    Ok(count)
}

/// Collaborators shared by the report and purge workflows
pub struct Workflow<'a> {
    pub vcs: &'a dyn VersionControl,
    pub tracker: &'a dyn IssueTracker,
    pub prompt: &'a mut dyn Prompt,
    pub out: &'a mut dyn Write,
    pub project: &'a ProjectConfig,
}

impl Workflow<'_> {
    /// File an issue for every unreported TODO the operator accepts, embed the
    /// issue id in the source line and commit each change separately.
    ///
    /// `body` is the issue body; when `None` the body points back at the
    /// TODO's location.
    pub fn report(&mut self, root: &Path, body: Option<&str>) -> Result<Vec<ReportedTodo>, SnitchError> {
        let mut accepted: Vec<Todo> = Vec::new();
        for todo in TodoWalker::for_dir(self.vcs, root)? {
            let todo = todo?;
            if todo.is_reported() {
                continue;
            }
            writeln!(self.out, "{}", todo.log_line())?;
            if self.prompt.confirm("Do you want to report this?")? {
                accepted.push(todo);
            }
        }

        let mut committed = Vec::with_capacity(accepted.len());
        for todo in accepted {
            let title = self.project.title_of(&todo);
            let body = match body {
                Some(b) => b.to_string(),
                None => format!("{}:{}", todo.filename().display(), todo.line()),
            };

            let id = self.tracker.create_issue(&title, &body)?;
            info!(%id, %title, "issue created");
            let reported = todo.report(id);
            writeln!(self.out, "[REPORTED] {}", reported.todo().log_line())?;

            update_todo(reported.todo())?;
            commit_todo(self.vcs, &reported, "Add")?;
            committed.push(reported);
        }

        Ok(committed)
    }

    /// Delete every reported TODO whose issue is closed, after confirmation,
    /// committing each removal separately.
    pub fn purge(&mut self, root: &Path) -> Result<Vec<ReportedTodo>, SnitchError> {
        let mut accepted: Vec<ReportedTodo> = Vec::new();
        for todo in TodoWalker::for_dir(self.vcs, root)? {
            let todo = todo?;
            if !todo.is_reported() {
                continue;
            }
            let todo = todo.into_reported()?;

            match self.tracker.issue_state(todo.id()) {
                Ok(IssueState::Closed) => {}
                Ok(IssueState::Open) => continue,
                Ok(IssueState::Other(state)) => {
                    warn!(id = todo.id(), %state, "unknown issue state, keeping TODO");
                    continue;
                }
                Err(SnitchError::InvalidArgs(reason)) => {
                    warn!(location = %todo.todo().log_line(), %reason, "not an issue id, keeping TODO");
                    continue;
                }
                Err(e) => return Err(e),
            }

            writeln!(self.out, "{}", todo.todo().log_line())?;
            if self.prompt.confirm("The issue is closed. Remove this TODO?")? {
                accepted.push(todo);
            }
        }

        // Bottom-up, so a removal never shifts a line that is still pending.
        let mut committed = Vec::with_capacity(accepted.len());
        for todo in accepted.into_iter().rev() {
            remove_todo(todo.todo())?;
            writeln!(self.out, "[PURGED] {}", todo.todo().log_line())?;
            commit_todo(self.vcs, &todo, "Remove")?;
            committed.push(todo);
        }

        Ok(committed)
    }
}
