//! Desktop notification port.
//!
//! Notifications are fire-and-forget: the monitor logs a failure and moves
//! on, it never lets a broken notification daemon affect state handling.

use async_trait::async_trait;
use notify_rust::{Notification, Timeout};

use soopwatch_common::models::NOTIFICATION_TIMEOUT_MS;
use crate::Error;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, summary: &str, body: &str) -> Result<(), Error>;
}

/// Native desktop notifications via the platform notification service.
pub struct DesktopNotifier {
    timeout_ms: u32,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self {
            timeout_ms: NOTIFICATION_TIMEOUT_MS,
        }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn notify(&self, summary: &str, body: &str) -> Result<(), Error> {
        let summary = summary.to_string();
        let body = body.to_string();
        let timeout_ms = self.timeout_ms;

        // notify-rust blocks on the session bus, so keep it off the runtime.
        tokio::task::spawn_blocking(move || {
            Notification::new()
                .summary(&summary)
                .body(&body)
                .timeout(Timeout::Milliseconds(timeout_ms))
                .show()
                .map(|_| ())
                .map_err(|e| Error::Notification(e.to_string()))
        })
        .await
        .map_err(|e| Error::Notification(format!("notification task failed: {e}")))?
    }
}
