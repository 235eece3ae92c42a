//! Update banner presentation.
//!
//! [`NotificationPresenter`] owns the single update banner of a hosted
//! document. Showing a new banner replaces the previous one, a banner
//! retires on its own after the auto-dismiss delay plus an exit animation,
//! and the close control removes it immediately. Every removal path checks
//! attachment first, so racing timers and manual dismissal never remove
//! twice.

mod banner;
mod timer;

use log::{debug, info};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use crate::document::{Document, NodeId, Region};

pub use banner::{BANNER_ID, DISMISS_ACTION, STYLES_ID};
pub use timer::ScheduledTask;

/// What the banner announces.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateNotice {
    pub version: String,
    pub download_url: String,
    pub release_page_url: String,
    /// Human readable host environment ("Firefox", "Chrome/Edge")
    pub host_label: String,
}

/// Receives positive update decisions.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &UpdateNotice);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notice: &UpdateNotice) {
        (**self).notify(notice)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresenterConfig {
    /// How long an untouched banner stays up
    pub auto_dismiss: Duration,
    /// Length of the entrance and exit animations
    pub animation: Duration,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            auto_dismiss: Duration::from_secs(15),
            animation: Duration::from_millis(500),
        }
    }
}

struct ActiveBanner {
    node: NodeId,
    timer: ScheduledTask,
}

pub struct NotificationPresenter<D: Document> {
    document: Arc<Mutex<D>>,
    config: PresenterConfig,
    active: Mutex<Option<ActiveBanner>>,
}

impl<D: Document> NotificationPresenter<D> {
    pub fn new(document: Arc<Mutex<D>>) -> Self {
        Self::with_config(document, PresenterConfig::default())
    }

    pub fn with_config(document: Arc<Mutex<D>>, config: PresenterConfig) -> Self {
        Self {
            document,
            config,
            active: Mutex::new(None),
        }
    }

    pub fn document(&self) -> &Arc<Mutex<D>> {
        &self.document
    }

    pub fn config(&self) -> PresenterConfig {
        self.config
    }

    /// Display the banner for `notice`, replacing any banner already in
    /// the document, and schedule its automatic retirement.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&self, notice: &UpdateNotice) -> NodeId {
        let mut active = self.active.lock();
        if let Some(previous) = active.take() {
            previous.timer.cancel();
        }

        let node = {
            let mut doc = self.document.lock();
            // Also catches a banner inserted by another presenter
            while let Some(stale) = doc.find_by_id(BANNER_ID) {
                doc.remove(stale);
                debug!("Removed previous update banner");
            }
            if doc.find_by_id(STYLES_ID).is_none() {
                doc.append(Region::Head, banner::stylesheet());
            }
            doc.append(Region::Body, banner::build(notice, self.config.animation))
        };

        let timer = ScheduledTask::after(
            self.config.auto_dismiss,
            retire(Arc::clone(&self.document), node, self.config.animation),
        );
        *active = Some(ActiveBanner { node, timer });

        info!(
            "Update notification displayed for version {} ({})",
            notice.version, notice.host_label
        );
        node
    }

    /// Close control handler: remove the banner immediately.
    ///
    /// Returns false when no banner was attached.
    pub fn dismiss(&self) -> bool {
        let Some(banner) = self.active.lock().take() else {
            return false;
        };
        banner.timer.cancel();
        let removed = self.document.lock().remove(banner.node);
        if removed {
            debug!("Update banner dismissed");
        }
        removed
    }

    pub fn is_showing(&self) -> bool {
        let active = self.active.lock();
        match active.as_ref() {
            Some(banner) => self.document.lock().is_attached(banner.node),
            None => false,
        }
    }
}

impl<D: Document> Notifier for NotificationPresenter<D> {
    fn notify(&self, notice: &UpdateNotice) {
        self.show(notice);
    }
}

/// Auto-dismiss: play the exit animation, then remove the banner once it
/// has finished. Both steps are skipped if the banner is already gone.
async fn retire<D: Document>(document: Arc<Mutex<D>>, node: NodeId, animation: Duration) {
    {
        let mut doc = document.lock();
        if !doc.is_attached(node) {
            return;
        }
        doc.set_style(node, "animation", &banner::exit_animation(animation));
    }

    tokio::time::sleep(animation).await;

    let mut doc = document.lock();
    if doc.remove(node) {
        debug!("Update banner auto-dismissed");
    }
}
