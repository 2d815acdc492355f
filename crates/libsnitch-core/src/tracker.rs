//! Issue-tracker collaborator

use std::fmt;

use crate::error::SnitchError;

/// State of an issue as reported by the tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueState {
    Open,
    Closed,
    Other(String),
}

impl IssueState {
    pub fn parse(s: &str) -> Self {
        match s {
            "open" => IssueState::Open,
            "closed" => IssueState::Closed,
            other => IssueState::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
            IssueState::Other(s) => s,
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote issue tracker bound to one repository
pub trait IssueTracker {
    /// Open a new issue; returns its identifier in marker form, e.g. `#12`
    fn create_issue(&self, title: &str, body: &str) -> Result<String, SnitchError>;

    /// Look up the state of the issue behind `id`.
    ///
    /// Fails with `SnitchError::InvalidArgs`, before any remote call, when
    /// `id` is not an identifier this tracker hands out.
    fn issue_state(&self, id: &str) -> Result<IssueState, SnitchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_state_parse() {
        assert_eq!(IssueState::parse("open"), IssueState::Open);
        assert_eq!(IssueState::parse("closed"), IssueState::Closed);
        assert_eq!(
            IssueState::parse("locked"),
            IssueState::Other("locked".to_string())
        );
        assert_eq!(IssueState::Closed.to_string(), "closed");
    }
}
