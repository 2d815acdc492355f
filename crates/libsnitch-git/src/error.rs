use libsnitch_core::SnitchError;
use thiserror::Error;

/// Errors that can occur during Git operations
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a git repository")]
    NotARepo,

    #[error("Repository has no working tree")]
    BareRepo,

    #[error("'{0}' is outside the repository working tree")]
    OutsideWorkTree(String),
}

impl From<GitError> for SnitchError {
    fn from(err: GitError) -> Self {
        match err {
            GitError::Io(e) => SnitchError::Io(e),
            GitError::OutsideWorkTree(path) => SnitchError::InvalidArgs(format!(
                "'{}' is outside the repository working tree",
                path
            )),
            other => SnitchError::Git(other.to_string()),
        }
    }
}
