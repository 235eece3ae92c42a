//! Host lifecycle triggers for update checks.
//!
//! A check runs a short while after the page finishes loading and right
//! away when the extension is installed or updated. Both may fire in the
//! same page lifetime; checks are independent and the presenter's
//! replace-on-show keeps a single banner.

use futures_util::future::join_all;
use log::debug;
use std::sync::Arc;
use std::time::Duration;

use crate::checker::{CheckOutcome, UpdateChecker};
use crate::feed::ReleaseFeed;
use crate::host::HostRuntime;
use crate::notify::Notifier;

/// Delay between "document ready" and the check it triggers.
pub const DEFAULT_READY_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    DocumentReady,
    ExtensionInstalled,
}

impl std::str::FromStr for LifecycleEvent {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ready" | "load" => Ok(LifecycleEvent::DocumentReady),
            "installed" | "install" => Ok(LifecycleEvent::ExtensionInstalled),
            other => Err(anyhow::anyhow!(
                "Unknown lifecycle event '{}'. Expected 'ready' or 'installed'.",
                other
            )),
        }
    }
}

pub struct Lifecycle<F: ReleaseFeed, R: HostRuntime, N: Notifier> {
    checker: Arc<UpdateChecker<F, R, N>>,
    ready_delay: Duration,
}

impl<F: ReleaseFeed, R: HostRuntime, N: Notifier> Lifecycle<F, R, N> {
    pub fn new(checker: Arc<UpdateChecker<F, R, N>>) -> Self {
        Self {
            checker,
            ready_delay: DEFAULT_READY_DELAY,
        }
    }

    pub fn with_ready_delay(mut self, delay: Duration) -> Self {
        self.ready_delay = delay;
        self
    }

    pub fn checker(&self) -> &Arc<UpdateChecker<F, R, N>> {
        &self.checker
    }

    /// Run the check triggered by a single event.
    #[tracing::instrument(skip(self))]
    pub async fn handle(&self, event: LifecycleEvent) -> CheckOutcome {
        if event == LifecycleEvent::DocumentReady {
            debug!("Document ready, checking for updates in {:?}", self.ready_delay);
            tokio::time::sleep(self.ready_delay).await;
        } else {
            debug!("Extension installed, checking for updates");
        }
        self.checker.check_for_updates().await
    }

    /// Dispatch several events at once; their checks run interleaved on the
    /// current task. Outcomes are returned in event order.
    pub async fn dispatch(&self, events: &[LifecycleEvent]) -> Vec<CheckOutcome> {
        join_all(events.iter().map(|event| self.handle(*event))).await
    }
}
