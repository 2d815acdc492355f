use libsnitch_core::report::list_todos;
use libsnitch_core::SnitchError;
use tracing::debug;

use crate::cli::Cli;
use crate::commands::open_repo;

pub fn run(cli: &Cli) -> Result<(), SnitchError> {
    let git = open_repo(cli)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let count = list_todos(&git, &cli.dir, &mut out)?;
    debug!(count, "listed TODOs");
    Ok(())
}
