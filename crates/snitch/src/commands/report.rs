use libsnitch_core::config::load_project_config;
use libsnitch_core::prompt::LinePrompt;
use libsnitch_core::report::Workflow;
use libsnitch_core::SnitchError;
use tracing::info;

use crate::cli::Cli;
use crate::commands::{open_repo, open_tracker};

pub fn run(cli: &Cli, repo: &str, body: Option<&str>) -> Result<(), SnitchError> {
    let git = open_repo(cli)?;
    let tracker = open_tracker(cli, repo)?;
    let project = load_project_config(&cli.dir)?;

    let mut prompt = LinePrompt::new(std::io::stdin().lock(), std::io::stdout());
    let mut out = std::io::stdout();

    let reported = Workflow {
        vcs: &git,
        tracker: &tracker,
        prompt: &mut prompt,
        out: &mut out,
        project: &project,
    }
    .report(&cli.dir, body)?;

    info!(repo = tracker.repo(), count = reported.len(), "report finished");
    Ok(())
}
