//! Thin JSON-over-HTTP client used by the release feed.

use anyhow::Result;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::status::{FeedError, check_status, classify_error};

/// HTTP client for single-shot JSON requests.
///
/// Every failure is reported as an `anyhow::Error` wrapping a
/// [`FeedError`], so callers can recover the failure class with
/// `downcast_ref`.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Performs a GET request and deserializes the JSON response.
    #[tracing::instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET JSON from {}...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow::Error::from(classify_error(&e)))?;

        let response = response.error_for_status().map_err(check_status)?;

        let body = response
            .bytes()
            .await
            .map_err(|e| anyhow::Error::from(classify_error(&e)))?;

        serde_json::from_slice::<T>(&body)
            .map_err(|e| anyhow::Error::from(FeedError::Malformed(e.to_string())))
    }
}
