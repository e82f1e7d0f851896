//! Shared harness for github-changelog integration tests.
//!
//! Runs the compiled binary with a pinned environment so tests never pick up
//! the developer's token, API URL, or git configuration.

#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Captured output from running a command.
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

fn pin_env(cmd: &mut Command, home: &Path) {
    cmd.env_remove("GITHUB_TOKEN")
        .env_remove("GITHUB_API_URL")
        .env_remove("RUST_LOG")
        .env("HOME", home)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("LC_ALL", "C");
}

/// Run `github-changelog` in `dir`.
pub fn changelog(dir: &Path, args: &[&str]) -> CommandResult {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_github-changelog"));
    cmd.args(args).current_dir(dir);
    pin_env(&mut cmd, dir);
    let output = cmd.output().expect("failed to run github-changelog");
    CommandResult {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(128),
    }
}

/// Run `github-changelog` off the async runtime.
pub async fn changelog_async(dir: &Path, args: &[&str]) -> CommandResult {
    let dir = dir.to_path_buf();
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        changelog(&dir, &args)
    })
    .await
    .unwrap()
}

/// Run C git in `dir`, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) {
    let mut cmd = Command::new("git");
    cmd.args(args).current_dir(dir);
    pin_env(&mut cmd, dir);
    let output = cmd.output().expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// An empty git repository with the given remotes.
pub fn repo_with_remotes(remotes: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    git(dir.path(), &["init", "-q"]);
    for (name, url) in remotes {
        git(dir.path(), &["remote", "add", name, url]);
    }
    dir
}

pub fn sha(n: u32) -> String {
    format!("{:040x}", n)
}

fn commit_json(n: u32, message: &str) -> Value {
    json!({ "sha": sha(n), "commit": { "message": message } })
}

/// Serve a commits page for `anchor` in `owner/repo`.
pub async fn mount_page(server: &MockServer, repo: &str, anchor: &str, commits: &[(u32, &str)]) {
    let body: Vec<Value> = commits.iter().map(|(n, m)| commit_json(*n, m)).collect();
    Mock::given(method("GET"))
        .and(path(format!("/repos/{repo}/commits")))
        .and(query_param("sha", anchor))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serve pull request `number` in `owner/repo`.
pub async fn mount_pull(server: &MockServer, repo: &str, number: u64, title: &str, login: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/{repo}/pulls/{number}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": number,
            "title": title,
            "user": { "login": login, "html_url": format!("https://github.com/{login}") },
        })))
        .mount(server)
        .await;
}
