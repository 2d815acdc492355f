use libsnitch_core::SnitchError;
use thiserror::Error;

/// Errors talking to the GitHub API
#[derive(Debug, Error)]
pub enum GithubError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid repository '{0}', expected <owner>/<repo>")]
    InvalidRepo(String),

    #[error("invalid issue id '{0}', expected #<number>")]
    InvalidIssueId(String),

    #[error("personal_token contains characters not allowed in an HTTP header")]
    InvalidToken,
}

impl From<GithubError> for SnitchError {
    fn from(err: GithubError) -> Self {
        match err {
            GithubError::InvalidRepo(_)
            | GithubError::InvalidIssueId(_)
            | GithubError::InvalidToken => {
                SnitchError::InvalidArgs(err.to_string())
            }
            other => SnitchError::Http(other.to_string()),
        }
    }
}
