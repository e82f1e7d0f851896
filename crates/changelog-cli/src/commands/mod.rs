pub mod generate;

use anyhow::Result;
use clap::Subcommand;

use crate::Cli;

#[derive(Subcommand)]
pub enum Commands {
    /// Generates a changelog from merged pull requests found between commit references
    Generate(generate::GenerateArgs),
}

pub fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Generate(args) => generate::run(args),
    }
}
