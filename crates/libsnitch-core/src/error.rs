use std::path::PathBuf;

use thiserror::Error;

/// Main error type for snitch operations
#[derive(Debug, Error)]
pub enum SnitchError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("invalid regex: {0}")]
    Regex(#[from] regex::Error),

    #[error("git error: {0}")]
    Git(String),

    #[error("issue tracker error: {0}")]
    Http(String),

    /// A caller tried to commit or purge a TODO that has no issue identifier.
    #[error("TODO is not reported: {0}")]
    Unreported(String),

    #[error("{path}: line {line} is out of range")]
    LineOutOfRange { path: PathBuf, line: usize },

    #[error("internal error: {0}")]
    Internal(String),
}

impl SnitchError {
    /// Process exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            SnitchError::InvalidArgs(_) => 2,
            SnitchError::NotFound(_) => 3,
            SnitchError::TomlParse(_) | SnitchError::Regex(_) => 2,
            SnitchError::Io(_) | SnitchError::LineOutOfRange { .. } => 5,
            SnitchError::Git(_) => 6,
            SnitchError::Http(_) => 7,
            // EX_SOFTWARE: a caller broke a contract, not the environment
            SnitchError::Unreported(_) => 70,
            SnitchError::Internal(_) => 1,
        }
    }

    /// Get actionable suggestions for fixing the error
    pub fn suggestions(&self) -> Vec<&'static str> {
        match self {
            SnitchError::NotFound(msg) if msg.contains("credentials") => vec![
                "Create ~/.snitch/github.toml containing: personal_token = \"<token>\"",
                "Or pass --credentials <PATH>",
            ],
            SnitchError::Http(msg) if msg.contains("401") => vec![
                "Check that personal_token in the credentials file is valid",
            ],
            SnitchError::Git(_) => vec![
                "Run snitch from inside a git working tree",
            ],
            SnitchError::LineOutOfRange { .. } => vec![
                "The file changed since it was scanned; run 'snitch list' and retry",
            ],
            _ => vec![],
        }
    }

    /// Create a NotFound error for a missing credentials file
    pub fn credentials_not_found(path: &std::path::Path) -> Self {
        SnitchError::NotFound(format!(
            "credentials file '{}' does not exist",
            path.display()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreported_is_distinct_from_io() {
        let unreported = SnitchError::Unreported("src/main.rs:3".to_string());
        let io = SnitchError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));

        assert_ne!(unreported.exit_code(), io.exit_code());
    }

    #[test]
    fn test_credentials_suggestions() {
        let err = SnitchError::credentials_not_found(std::path::Path::new("/nope/github.toml"));
        assert_eq!(err.exit_code(), 3);
        assert!(!err.suggestions().is_empty());
        assert!(err.to_string().contains("/nope/github.toml"));
    }
}
