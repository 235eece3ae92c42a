//! Update check workflow.
//!
//! One check fetches the latest release, resolves the host environment,
//! compares versions and, when a strictly newer release ships an asset for
//! this environment, hands an [`UpdateNotice`] to the notifier. Every
//! failure degrades to "nothing happened" plus a log line.

mod error;

use log::{debug, info, warn};

use crate::asset::{AssetPicker, ExtensionAssetPicker};
use crate::feed::{ReleaseAsset, ReleaseFeed};
use crate::host::{HostEnvironment, HostProfile, HostRuntime};
use crate::notify::{Notifier, UpdateNotice};
use crate::version::is_newer_version;

pub use error::CheckError;

/// Result of comparing the latest release with the installed extension.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateDecision {
    pub is_newer: bool,
    pub latest_version: String,
    pub current_version: String,
    pub host: HostProfile,
    /// Only looked up when `is_newer` is true
    pub matched_asset: Option<ReleaseAsset>,
    pub release_page_url: String,
}

impl UpdateDecision {
    /// The notice to present, if this decision warrants one.
    pub fn notice(&self) -> Option<UpdateNotice> {
        if !self.is_newer {
            return None;
        }
        self.matched_asset.as_ref().map(|asset| UpdateNotice {
            version: self.latest_version.clone(),
            download_url: asset.download_url.clone(),
            release_page_url: self.release_page_url.clone(),
            host_label: self.host.label.to_string(),
        })
    }
}

/// What a call to [`UpdateChecker::check_for_updates`] did.
#[derive(Debug)]
pub enum CheckOutcome {
    /// A banner was requested
    Notified(UpdateNotice),
    /// The installed version is current (or newer)
    UpToDate { current: String, latest: String },
    /// A newer release exists but ships nothing for this environment
    NoMatchingAsset { latest: String },
    Failed(CheckError),
}

impl std::fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckOutcome::Notified(notice) => write!(
                f,
                "Update available: {} for {} ({})",
                notice.version, notice.host_label, notice.download_url
            ),
            CheckOutcome::UpToDate { current, latest } => {
                write!(f, "Up to date: {} (latest {})", current, latest)
            }
            CheckOutcome::NoMatchingAsset { latest } => {
                write!(f, "Version {} has no package for this browser", latest)
            }
            CheckOutcome::Failed(e) => write!(f, "Update check failed: {}", e),
        }
    }
}

pub struct UpdateChecker<F: ReleaseFeed, R: HostRuntime, N: Notifier> {
    feed: F,
    runtime: R,
    notifier: N,
}

impl<F: ReleaseFeed, R: HostRuntime, N: Notifier> UpdateChecker<F, R, N> {
    pub fn new(feed: F, runtime: R, notifier: N) -> Self {
        Self {
            feed,
            runtime,
            notifier,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Run one check and notify when an update is available.
    ///
    /// Never fails; failures are logged and returned as
    /// [`CheckOutcome::Failed`].
    #[tracing::instrument(skip(self))]
    pub async fn check_for_updates(&self) -> CheckOutcome {
        let decision = match self.evaluate().await {
            Ok(decision) => decision,
            Err(e) => {
                warn!("Failed to check for updates: {}", e);
                return CheckOutcome::Failed(e);
            }
        };

        if !decision.is_newer {
            debug!(
                "No update: installed {} is not older than {}",
                decision.current_version, decision.latest_version
            );
            return CheckOutcome::UpToDate {
                current: decision.current_version,
                latest: decision.latest_version,
            };
        }

        match decision.notice() {
            Some(notice) => {
                self.notifier.notify(&notice);
                CheckOutcome::Notified(notice)
            }
            None => {
                info!(
                    "Version {} is available but has no {} package",
                    decision.latest_version, decision.host.environment
                );
                CheckOutcome::NoMatchingAsset {
                    latest: decision.latest_version,
                }
            }
        }
    }

    /// Compute the update decision without notifying.
    #[tracing::instrument(skip(self))]
    pub async fn evaluate(&self) -> Result<UpdateDecision, CheckError> {
        let release = self
            .feed
            .latest_release()
            .await
            .map_err(CheckError::from_feed)?;
        let latest_version = release.latest_version().to_string();

        let host = HostEnvironment::detect(&self.runtime)
            .profile()
            .ok_or(CheckError::UnknownHost)?;

        let current_version = host
            .current_version(&self.runtime)
            .map_err(|e| CheckError::ManifestUnavailable(format!("{:#}", e)))?;

        info!(
            "Current version: {}, Latest version: {}",
            current_version, latest_version
        );

        let is_newer = is_newer_version(&latest_version, &current_version)?;
        let matched_asset = if is_newer {
            ExtensionAssetPicker::for_profile(&host)
                .pick(&release.assets)
                .cloned()
        } else {
            None
        };

        Ok(UpdateDecision {
            is_newer,
            latest_version,
            current_version,
            host,
            matched_asset,
            release_page_url: release.html_url,
        })
    }
}
