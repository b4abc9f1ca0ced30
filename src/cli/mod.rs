use clap::Parser;
use error_stack::{Result, ResultExt};
use thiserror::Error;

mod server;

/// Command line options for the user service.
#[derive(Debug, Parser)]
#[command(about = "HTTP service for creating and reading users", version, author, long_about)]
pub struct Cli {
    #[clap(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(Debug, Error)]
#[error("Failed to run command")]
pub struct CommandError;

impl Cli {
    pub fn run(self) -> Result<(), CommandError> {
        match self.subcommand {
            Subcommand::Server(args) => self::server::run(args).change_context(CommandError),
        }
    }
}

#[derive(Debug, Parser)]
pub enum Subcommand {
    Server(self::server::ServerCommand),
}
