//! Tracing subscriber setup.

use clap::ValueEnum;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Plaintext,
    Json,
}

/// Filter directives for a `-v` count, used when `RUST_LOG` is unset.
pub fn directives(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "warn,changelog_range=info,changelog_github=info,changelog_cli=info",
        2 => "info,changelog_range=debug,changelog_github=debug,changelog_cli=debug",
        _ => "debug,changelog_range=trace,changelog_github=trace,changelog_cli=trace",
    }
}

/// Install the global subscriber. Logs always go to stderr so stdout carries
/// only the changelog.
pub fn init(verbose: u8, format: LogFormat) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(from_env) => EnvFilter::try_new(from_env),
        Err(_) => EnvFilter::try_new(directives(verbose)),
    }
    .unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Plaintext => registry
            .with(
                fmt::layer()
                    .with_target(verbose >= 2)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };
    if let Err(e) = installed {
        eprintln!("warning: could not install log subscriber: {e}");
    }
}
