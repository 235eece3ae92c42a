//! Remote release feed.
//!
//! The feed is a GitHub-style `releases/latest` endpoint returning a single
//! release descriptor. It is read-only and queried once per check.

mod types;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use log::debug;
use std::str::FromStr;

use crate::http::HttpClient;

pub use types::{ReleaseAsset, ReleaseDescriptor};

/// Default API root of the release feed.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Repository whose releases carry the extension packages.
pub const DEFAULT_FEED_REPO: &str = "izzxtikamal/dco-quicklaunch-extension";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReleaseFeed: Send + Sync {
    /// Fetch the most recently published release.
    async fn latest_release(&self) -> Result<ReleaseDescriptor>;

    /// The address queried by [`ReleaseFeed::latest_release`].
    fn url(&self) -> String;
}

/// `owner/repo` pair naming the project whose releases are polled.
#[derive(Debug, PartialEq, Clone)]
pub struct FeedRepo {
    pub owner: String,
    pub repo: String,
}

impl std::fmt::Display for FeedRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for FeedRepo {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            Err(anyhow!("Invalid repository format. Expected 'owner/repo'."))
        } else {
            Ok(FeedRepo {
                owner: parts[0].to_string(),
                repo: parts[1].to_string(),
            })
        }
    }
}

pub struct GitHubFeed {
    http: HttpClient,
    api_url: String,
    repo: FeedRepo,
}

impl GitHubFeed {
    pub fn new(http: HttpClient, repo: FeedRepo, api_url: Option<String>) -> Self {
        let api_url = api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            repo,
        }
    }

    pub fn repo(&self) -> &FeedRepo {
        &self.repo
    }
}

#[async_trait]
impl ReleaseFeed for GitHubFeed {
    #[tracing::instrument(skip(self))]
    async fn latest_release(&self) -> Result<ReleaseDescriptor> {
        let url = self.url();
        debug!("Fetching latest release of {} from {}...", self.repo, url);
        self.http.get_json::<ReleaseDescriptor>(&url).await
    }

    fn url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_url, self.repo.owner, self.repo.repo
        )
    }
}
