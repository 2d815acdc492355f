use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "snitch",
    about = "Find TODOs in a git repository and report them as GitHub issues",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Directory to scan (only files tracked by git are read)
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Credentials file [default: ~/.snitch/github.toml]
    #[arg(long, global = true)]
    pub credentials: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List all TODOs of the directory recursively
    List,

    /// Report unreported TODOs as issues of <owner/repo>
    Report {
        /// GitHub repository, e.g. tsoding/snitch
        repo: String,

        /// Issue body (defaults to the TODO's file:line)
        #[arg(long)]
        body: Option<String>,
    },

    /// Remove TODOs whose issues in <owner/repo> are closed
    Purge {
        /// GitHub repository, e.g. tsoding/snitch
        repo: String,
    },
}
