pub mod asset;
pub mod checker;
pub mod config;
pub mod document;
pub mod feed;
pub mod host;
pub mod http;
pub mod lifecycle;
pub mod notify;
pub mod version;
