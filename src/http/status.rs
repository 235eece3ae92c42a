//! Classification of feed request failures.
//!
//! Failures are never retried; the classification only exists so the
//! diagnostic log says something more useful than a raw reqwest error.

use reqwest::StatusCode;

/// Why a feed request failed.
#[derive(Debug)]
pub enum FeedError {
    /// Rate limit exceeded (HTTP 403 with rate limit message or 429)
    RateLimitExceeded(String),
    /// Authentication failed (HTTP 401)
    AuthenticationFailed(String),
    /// Feed or release not found (HTTP 404)
    NotFound(String),
    /// Any other non-2xx status
    Status(u16),
    /// Connection refused, DNS failure, timeout and the like
    Transport(String),
    /// The body was not a release descriptor
    Malformed(String),
}

impl FeedError {
    /// Malformed payloads are a fault in the data, everything else is the
    /// feed being unavailable.
    pub fn is_malformed(&self) -> bool {
        matches!(self, FeedError::Malformed(_))
    }
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::RateLimitExceeded(msg) => {
                write!(
                    f,
                    "Rate limit exceeded: {}. Try again later or set GITHUB_TOKEN environment variable.",
                    msg
                )
            }
            FeedError::AuthenticationFailed(msg) => {
                write!(
                    f,
                    "Authentication failed: {}. Check your GITHUB_TOKEN.",
                    msg
                )
            }
            FeedError::NotFound(msg) => write!(f, "Not found: {}", msg),
            FeedError::Status(code) => write!(f, "Feed returned HTTP {}", code),
            FeedError::Transport(msg) => write!(f, "Feed unreachable: {}", msg),
            FeedError::Malformed(msg) => write!(f, "Malformed release payload: {}", msg),
        }
    }
}

impl std::error::Error for FeedError {}

/// Map a reqwest error into a [`FeedError`].
pub fn classify_error(error: &reqwest::Error) -> FeedError {
    if let Some(status) = error.status() {
        return classify_status(status, &error.to_string());
    }

    if error.is_decode() {
        return FeedError::Malformed(error.to_string());
    }

    FeedError::Transport(error.to_string())
}

fn classify_status(status: StatusCode, message: &str) -> FeedError {
    match status {
        StatusCode::UNAUTHORIZED => FeedError::AuthenticationFailed(
            "Invalid or missing authentication token".to_string(),
        ),
        StatusCode::FORBIDDEN if message.contains("rate limit") => {
            FeedError::RateLimitExceeded("GitHub API rate limit exceeded".to_string())
        }
        StatusCode::TOO_MANY_REQUESTS => {
            FeedError::RateLimitExceeded("Too many requests".to_string())
        }
        StatusCode::NOT_FOUND => {
            FeedError::NotFound("The release feed has no published release".to_string())
        }
        s => FeedError::Status(s.as_u16()),
    }
}

/// Converts a reqwest error into an `anyhow::Error` carrying a [`FeedError`].
pub fn check_status(error: reqwest::Error) -> anyhow::Error {
    anyhow::Error::from(classify_error(&error))
}
