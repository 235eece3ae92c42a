//! Host environment abstraction.
//!
//! The extension runs under one of two browser runtimes. Each exposes its
//! extension API through a differently named namespace (`browser` on
//! Firefox, `chrome` on Chromium browsers) and each gets its own release
//! asset. The environment is resolved once into a [`HostProfile`] and the
//! rest of the workflow is written against that record.
//!
//! # Structure
//!
//! - `manifest` - [`HostRuntime`] backed by an extension's `manifest.json`

mod manifest;

use anyhow::Result;
use std::fmt;

pub use manifest::ManifestRuntime;

/// Runtime namespace exposing the extension API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// `browser.*` (Firefox)
    Browser,
    /// `chrome.*` (Chrome, Edge and other Chromium browsers)
    Chrome,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Browser => write!(f, "browser"),
            Namespace::Chrome => write!(f, "chrome"),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait HostRuntime: Send + Sync {
    /// Whether the given runtime namespace is available.
    fn has_namespace(&self, namespace: Namespace) -> bool;

    /// The installed extension's version as read from the manifest
    /// exposed through `namespace`.
    fn manifest_version(&self, namespace: Namespace) -> Result<String>;
}

/// Which runtime variant the extension is executing under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEnvironment {
    Firefox,
    Chrome,
    Unknown,
}

impl HostEnvironment {
    /// Detect the environment from the namespaces the runtime exposes.
    ///
    /// Firefox also provides `chrome.*` for compatibility, so `browser` is
    /// probed first.
    pub fn detect(runtime: &dyn HostRuntime) -> Self {
        if runtime.has_namespace(Namespace::Browser) {
            HostEnvironment::Firefox
        } else if runtime.has_namespace(Namespace::Chrome) {
            HostEnvironment::Chrome
        } else {
            HostEnvironment::Unknown
        }
    }

    /// The capability record for this environment, `None` when unknown.
    pub fn profile(self) -> Option<HostProfile> {
        match self {
            HostEnvironment::Firefox => Some(HostProfile {
                environment: self,
                namespace: Namespace::Browser,
                asset_token: "firefox",
                label: "Firefox",
            }),
            HostEnvironment::Chrome => Some(HostProfile {
                environment: self,
                namespace: Namespace::Chrome,
                asset_token: "chrome",
                label: "Chrome/Edge",
            }),
            HostEnvironment::Unknown => None,
        }
    }
}

impl fmt::Display for HostEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostEnvironment::Firefox => write!(f, "firefox"),
            HostEnvironment::Chrome => write!(f, "chrome"),
            HostEnvironment::Unknown => write!(f, "unknown"),
        }
    }
}

/// What the update workflow needs to know about a resolved environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostProfile {
    pub environment: HostEnvironment,
    /// Namespace holding the installed version
    pub namespace: Namespace,
    /// Lowercase substring identifying this environment's release asset
    pub asset_token: &'static str,
    /// Human readable name shown in the banner
    pub label: &'static str,
}

impl HostProfile {
    pub fn current_version(&self, runtime: &dyn HostRuntime) -> Result<String> {
        runtime.manifest_version(self.namespace)
    }
}
