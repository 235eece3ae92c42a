use anyhow::{Context, Result};
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use std::env;
use std::time::Duration;

use crate::feed::{DEFAULT_FEED_REPO, FeedRepo, GitHubFeed};
use crate::http::HttpClient;

const USER_AGENT: &str = "quicklaunch-updater";

/// Upper bound for a single feed request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Config {
    pub client: Client,
    pub feed: GitHubFeed,
}

impl Config {
    pub fn new(repo: Option<String>, api_url: Option<String>) -> Result<Self> {
        let repo: FeedRepo = repo
            .as_deref()
            .unwrap_or(DEFAULT_FEED_REPO)
            .parse()
            .context("Invalid feed repository")?;

        let mut headers = HeaderMap::new();
        if let Ok(token) = env::var("GITHUB_TOKEN") {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
            debug!("Using GITHUB_TOKEN for authentication: {}", mask(&token));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let feed = GitHubFeed::new(HttpClient::new(client.clone()), repo, api_url);

        Ok(Self { client, feed })
    }
}

fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*********".to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}
