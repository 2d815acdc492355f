//! TODO marker grammar and the `Todo` entity.
//!
//! A line carries at most one recognized marker, in one of two shapes:
//!
//! - reported: `<prefix>TODO(<id>): <suffix>`
//! - unreported: `<prefix>TODO: <suffix>`
//!
//! The reported shape is tried first. Both patterns capture the prefix
//! greedily, so with several markers on a line the last one wins. The id
//! stops at the first `): `, so a suffix may itself contain `): `.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::SnitchError;

fn reported_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.*)TODO\((.*?)\): (.*)$").expect("reported TODO pattern"))
}

fn unreported_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.*)TODO: (.*)$").expect("unreported TODO pattern"))
}

/// Whether a TODO is linked to an issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Unreported,
    Reported { id: String },
}

/// A TODO found on one line of a tracked file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    prefix: String,
    suffix: String,
    status: Status,
    filename: PathBuf,
    line: usize,
}

/// Classify a single line of text.
///
/// Returns `None` when the line holds no marker. Location fields of the
/// returned `Todo` are empty until the walker assigns them.
pub fn parse_line(line: &str) -> Option<Todo> {
    if let Some(caps) = reported_re().captures(line) {
        return Some(Todo::new(
            &caps[1],
            &caps[3],
            Status::Reported {
                id: caps[2].to_string(),
            },
        ));
    }

    unreported_re()
        .captures(line)
        .map(|caps| Todo::new(&caps[1], &caps[2], Status::Unreported))
}

impl Todo {
    fn new(prefix: &str, suffix: &str, status: Status) -> Self {
        Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            status,
            filename: PathBuf::new(),
            line: 0,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Issue identifier, if reported
    pub fn id(&self) -> Option<&str> {
        match &self.status {
            Status::Reported { id } => Some(id),
            Status::Unreported => None,
        }
    }

    pub fn is_reported(&self) -> bool {
        matches!(self.status, Status::Reported { .. })
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// 1-based line number, 0 if never located
    pub fn line(&self) -> usize {
        self.line
    }

    pub(crate) fn located(mut self, filename: &Path, line: usize) -> Self {
        self.filename = filename.to_path_buf();
        self.line = line;
        self
    }

    /// `file:line: <canonical form>`, the format editors jump to
    pub fn log_line(&self) -> String {
        format!("{}:{}: {}", self.filename.display(), self.line, self)
    }

    /// Attach the identifier the issue tracker assigned.
    ///
    /// Consumes the todo; an already reported todo keeps its original id.
    pub fn report(self, new_id: impl Into<String>) -> ReportedTodo {
        let id = match &self.status {
            Status::Reported { id } => id.clone(),
            Status::Unreported => new_id.into(),
        };
        ReportedTodo {
            todo: Todo {
                status: Status::Reported { id: id.clone() },
                ..self
            },
            id,
        }
    }

    /// Narrow to a `ReportedTodo`, failing for unreported todos
    pub fn into_reported(self) -> Result<ReportedTodo, SnitchError> {
        match &self.status {
            Status::Reported { id } => {
                let id = id.clone();
                Ok(ReportedTodo { todo: self, id })
            }
            Status::Unreported => Err(SnitchError::Unreported(self.log_line())),
        }
    }
}

/// Canonical form: the exact text written back into the source file
impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            Status::Unreported => write!(f, "{}TODO: {}", self.prefix, self.suffix),
            Status::Reported { id } => write!(f, "{}TODO({}): {}", self.prefix, id, self.suffix),
        }
    }
}

/// A TODO that is known to carry an issue identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedTodo {
    todo: Todo,
    id: String,
}

impl ReportedTodo {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn todo(&self) -> &Todo {
        &self.todo
    }

    /// Commit message for a change touching this TODO, e.g. `Add TODO(#12)`
    pub fn commit_message(&self, verb: &str) -> String {
        format!("{} TODO({})", verb, self.id)
    }
}

impl fmt::Display for ReportedTodo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.todo, f)
    }
}
