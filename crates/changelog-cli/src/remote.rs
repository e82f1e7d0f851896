//! Repository detection from the local git remotes.

use std::path::Path;
use std::process::Command;

use changelog_github::RemoteUrl;
use changelog_resource::Repository;
use tracing::debug;

/// Remotes consulted, in order, when no repository is given.
pub const REMOTES: [&str; 2] = ["upstream", "origin"];

/// The GitHub repository behind the first of `remotes` configured in the git
/// repository at `dir`.
///
/// Remotes that are missing or do not point at GitHub are skipped.
pub fn resolve_repository(dir: &Path, remotes: &[&str]) -> Option<Repository> {
    remotes.iter().find_map(|remote| {
        let url = remote_url(dir, remote)?;
        match RemoteUrl::parse(&url) {
            Ok(url) => {
                debug!(remote, url = %url, "resolved repository from remote");
                Some(url.into_repository())
            }
            Err(e) => {
                debug!(remote, error = %e, "remote does not name a GitHub repository");
                None
            }
        }
    })
}

/// `git config --get remote.<name>.url`, or `None` if git fails or the
/// remote is not configured.
fn remote_url(dir: &Path, remote: &str) -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--get", &format!("remote.{}.url", remote)])
        .current_dir(dir)
        .output()
        .map_err(|e| debug!(error = %e, "could not run git"))
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!url.is_empty()).then_some(url)
}
