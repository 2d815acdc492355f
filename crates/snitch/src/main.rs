mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::{Cli, Command};
use libsnitch_core::SnitchError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(e) = run_command(&cli) {
        output::output_error(&e);
        std::process::exit(e.exit_code());
    }
}

/// Log to stderr; stdout carries the TODO listing and prompts
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_command(cli: &Cli) -> Result<(), SnitchError> {
    match &cli.command {
        Command::List => commands::list::run(cli),
        Command::Report { repo, body } => commands::report::run(cli, repo, body.as_deref()),
        Command::Purge { repo } => commands::purge::run(cli, repo),
    }
}
