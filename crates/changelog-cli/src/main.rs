mod commands;
mod logging;
mod remote;
mod template;

use std::process;

use anyhow::Result;
use clap::{error::ErrorKind, Parser};

use commands::Commands;
use logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "github-changelog",
    about = "Generates changelogs from pull requests merged on GitHub",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Plaintext, global = true)]
    log_format: LogFormat,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(1),
            }
        }
    };

    logging::init(cli.verbose, cli.log_format);

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("An error occurred: {e}");
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    commands::run(cli)
}
