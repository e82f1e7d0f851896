use crate::InvalidArgument;

/// The author of a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    login: String,
    html_url: String,
}

impl User {
    /// Create a user whose profile lives at the default GitHub location.
    pub fn new(login: impl Into<String>) -> Result<Self, InvalidArgument> {
        let login = login.into();
        let html_url = format!("https://github.com/{login}");
        Self::with_html_url(login, html_url)
    }

    pub fn with_html_url(
        login: impl Into<String>,
        html_url: impl Into<String>,
    ) -> Result<Self, InvalidArgument> {
        let login = login.into();
        if login.trim().is_empty() {
            return Err(InvalidArgument::EmptyLogin);
        }
        Ok(Self {
            login,
            html_url: html_url.into(),
        })
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn html_url(&self) -> &str {
        &self.html_url
    }
}

/// A merged pull request, as rendered into the changelog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    number: u64,
    title: String,
    author: User,
}

impl PullRequest {
    pub fn new(
        number: u64,
        title: impl Into<String>,
        author: User,
    ) -> Result<Self, InvalidArgument> {
        if number < 1 {
            return Err(InvalidArgument::PullRequestNumber(number));
        }
        Ok(Self {
            number,
            title: title.into(),
            author,
        })
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &User {
        &self.author
    }
}
