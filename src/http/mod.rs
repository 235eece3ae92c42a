//! HTTP client module and feed error classification.

mod client;
mod status;

pub use client::HttpClient;
pub use status::{FeedError, check_status, classify_error};
