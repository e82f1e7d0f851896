use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use changelog_github::{GitHubClient, GitHubConfig};
use changelog_range::{
    collect_pull_requests, CommitRangeResolver, MergeCommitMatcher, ResolveOptions,
};
use changelog_resource::{Range, Reference, Repository};
use clap::Args;
use tracing::info;

use crate::remote;
use crate::template::{self, DEFAULT_TEMPLATE};

#[derive(Args)]
pub struct GenerateArgs {
    /// The start reference, e.g. "1.0.0"
    #[arg(value_name = "start-reference")]
    start_reference: String,

    /// The end reference, e.g. "1.1.0"
    #[arg(value_name = "end-reference")]
    end_reference: Option<String>,

    /// The GitHub token
    #[arg(short = 'a', long, env = "GITHUB_TOKEN", hide_env_values = true)]
    auth_token: Option<String>,

    /// The repository, e.g. "localheinz/github-changelog"
    #[arg(short = 'r', long)]
    repository: Option<String>,

    /// The template to use for rendering a pull request
    #[arg(short = 't', long, default_value = DEFAULT_TEMPLATE)]
    template: String,

    /// Root of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = GitHubConfig::DEFAULT_API_URL)]
    api_url: String,

    /// Commits requested per page
    #[arg(long, default_value_t = GitHubConfig::MAX_PER_PAGE, value_parser = clap::value_parser!(u8).range(1..=100))]
    per_page: u8,

    /// Give up after this many pages of history (0 for no limit)
    #[arg(long, default_value_t = ResolveOptions::DEFAULT_MAX_PAGES)]
    max_pages: usize,

    /// Give up walking history after this many seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,
}

pub fn run(args: &GenerateArgs) -> Result<i32> {
    let repository = match &args.repository {
        Some(value) => match Repository::parse(value) {
            Ok(repository) => repository,
            Err(e) => {
                eprintln!("{e}");
                return Ok(1);
            }
        },
        None => match remote::resolve_repository(Path::new("."), &remote::REMOTES) {
            Some(repository) => repository,
            None => {
                eprintln!("Unable to resolve repository, please specify using --repository option.");
                return Ok(1);
            }
        },
    };

    let start = Reference::new(args.start_reference.as_str())?;
    let end = args
        .end_reference
        .as_deref()
        .map(Reference::new)
        .transpose()?;

    let mut config = GitHubConfig::default()
        .with_api_url(args.api_url.as_str())
        .with_per_page(args.per_page);
    config.token = args.auth_token.clone();
    let client = GitHubClient::new(repository, &config)?;

    let options = ResolveOptions {
        max_pages: (args.max_pages > 0).then_some(args.max_pages),
        deadline: args.timeout.map(Duration::from_secs),
    };
    let resolver = CommitRangeResolver::with_options(&client, options);
    let matcher = MergeCommitMatcher::new()?;

    info!(
        start = %start,
        end = end.as_ref().map(Reference::as_str).unwrap_or("(none)"),
        "generating changelog"
    );
    let range = collect_pull_requests(&resolver, &client, &matcher, &start, end.as_ref())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_changelog(&mut out, &range, &args.template)?;
    Ok(0)
}

/// Print the header and one rendered line per pull request.
fn write_changelog(out: &mut impl Write, range: &Range, template: &str) -> io::Result<()> {
    let pull_requests = range.pull_requests();
    if pull_requests.is_empty() {
        return writeln!(out, "Could not find any pull requests");
    }

    let count = pull_requests.len();
    writeln!(
        out,
        "Found {} pull request{}",
        count,
        if count == 1 { "" } else { "s" }
    )?;
    writeln!(out)?;
    for pull_request in pull_requests {
        writeln!(out, "{}", template::render(template, pull_request))?;
    }
    Ok(())
}
