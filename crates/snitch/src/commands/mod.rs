pub mod list;
pub mod purge;
pub mod report;

use libsnitch_core::config::{default_credentials_path, load_credentials};
use libsnitch_core::SnitchError;
use libsnitch_git::GitRepo;
use libsnitch_github::GithubTracker;
use tracing::debug;

use crate::cli::Cli;

/// Open the git repository containing the scan directory
pub fn open_repo(cli: &Cli) -> Result<GitRepo, SnitchError> {
    Ok(GitRepo::discover(&cli.dir)?)
}

/// Load credentials and bind a tracker to `repo`
pub fn open_tracker(cli: &Cli, repo: &str) -> Result<GithubTracker, SnitchError> {
    let path = match &cli.credentials {
        Some(path) => path.clone(),
        None => default_credentials_path()?,
    };
    debug!(path = %path.display(), "loading credentials");
    let creds = load_credentials(&path)?;
    Ok(GithubTracker::new(&creds, repo)?)
}
