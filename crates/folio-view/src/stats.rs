//! Repository statistics shown in the hero counters.

use folio_types::{GitHubRepo, GitHubUser};

pub const GITHUB_API: &str = "https://api.github.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortfolioStats {
    pub repos: u64,
    pub followers: u64,
    pub stars: u64,
    pub is_placeholder: bool,
}

impl PortfolioStats {
    /// Shown before (and instead of) a successful fetch.
    pub fn placeholder() -> Self {
        Self {
            repos: 20,
            followers: 50,
            stars: 100,
            is_placeholder: true,
        }
    }

    pub fn from_github(user: &GitHubUser, repos: &[GitHubRepo]) -> Self {
        Self {
            repos: user.public_repos,
            followers: user.followers,
            stars: repos.iter().map(|r| r.stargazers_count).sum(),
            is_placeholder: false,
        }
    }

    /// Value for a counter element tagged `data-stat="<key>"`.
    pub fn get(&self, key: &str) -> Option<u64> {
        match key {
            "repos" => Some(self.repos),
            "followers" => Some(self.followers),
            "stars" => Some(self.stars),
            _ => None,
        }
    }
}

pub fn user_url(user: &str) -> String {
    format!("{GITHUB_API}/users/{user}")
}

pub fn repos_url(user: &str) -> String {
    format!("{GITHUB_API}/users/{user}/repos?per_page=100")
}
