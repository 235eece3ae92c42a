//! Asset selection module
//!
//! Picks which downloadable release asset to offer for the host
//! environment the extension runs under.

mod picker;

pub use picker::{AssetPicker, ExtensionAssetPicker};
