//! Rendering pull requests through a placeholder template.

use changelog_resource::PullRequest;

pub const DEFAULT_TEMPLATE: &str =
    "- %pullrequest.title% (#%pullrequest.number%), by @%pullrequest.author.login%";

/// Substitute the `%pullrequest.*%` placeholders in `template`.
///
/// Replacement is a single left-to-right pass, so placeholder-like text
/// inside a title is left alone. Anything else is copied verbatim.
pub fn render(template: &str, pull_request: &PullRequest) -> String {
    let mut out = String::with_capacity(template.len() + pull_request.title().len());
    let mut rest = template;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        match placeholder(tail, pull_request) {
            Some((value, consumed)) => {
                out.push_str(&value);
                rest = &tail[consumed..];
            }
            None => {
                out.push('%');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Match a placeholder at the start of `text`, returning its value and length.
fn placeholder(text: &str, pull_request: &PullRequest) -> Option<(String, usize)> {
    let author = pull_request.author();
    let candidates = [
        ("%pullrequest.number%", pull_request.number().to_string()),
        ("%pullrequest.title%", pull_request.title().to_string()),
        ("%pullrequest.author.login%", author.login().to_string()),
        ("%pullrequest.author.htmlUrl%", author.html_url().to_string()),
    ];
    candidates
        .into_iter()
        .find(|(name, _)| text.starts_with(name))
        .map(|(name, value)| (value, name.len()))
}
