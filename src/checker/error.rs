use crate::http::FeedError;
use crate::version::VersionError;

/// Why a check ended without a decision.
///
/// None of these reach the user; they are logged and reported in
/// [`super::CheckOutcome::Failed`].
#[derive(Debug)]
pub enum CheckError {
    /// Network failure, timeout or non-2xx response from the feed
    FeedUnavailable(String),
    /// Payload with missing fields or non-numeric version segments
    MalformedRelease(String),
    /// Neither runtime namespace is present
    UnknownHost,
    /// The installed version could not be read
    ManifestUnavailable(String),
}

impl CheckError {
    /// Classify a feed failure, keeping malformed payloads apart from an
    /// unreachable feed.
    pub fn from_feed(error: anyhow::Error) -> Self {
        match error.downcast_ref::<FeedError>() {
            Some(feed_error) if feed_error.is_malformed() => {
                CheckError::MalformedRelease(feed_error.to_string())
            }
            Some(feed_error) => CheckError::FeedUnavailable(feed_error.to_string()),
            None => CheckError::FeedUnavailable(format!("{:#}", error)),
        }
    }
}

impl From<VersionError> for CheckError {
    fn from(error: VersionError) -> Self {
        CheckError::MalformedRelease(error.to_string())
    }
}

impl std::fmt::Display for CheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckError::FeedUnavailable(msg) => {
                write!(f, "No updates available or API limit reached: {}", msg)
            }
            CheckError::MalformedRelease(msg) => write!(f, "Malformed release data: {}", msg),
            CheckError::UnknownHost => write!(f, "Unable to determine browser environment"),
            CheckError::ManifestUnavailable(msg) => {
                write!(f, "Unable to read installed version: {}", msg)
            }
        }
    }
}

impl std::error::Error for CheckError {}
