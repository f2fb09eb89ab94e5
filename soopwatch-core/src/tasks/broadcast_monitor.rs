use std::sync::Arc;
use chrono::Utc;
use tracing::{debug, error, info, warn};

use soopwatch_common::models::{LiveStatus, StreamState};
use soopwatch_common::traits::repository_traits::{
    BotConfigRepository, StatusLogRepository, StreamStatusRepository, StreamerRepository,
};
use crate::eventbus::{AlertEvent, EventBus};
use crate::notifier::Notifier;
use crate::platforms::LivePlatform;
use crate::Error;

/// Polls live status for every tracked streamer and acts on transitions.
///
/// One cycle fans out one task per streamer; fetches run concurrently and
/// unordered, and a failure for one streamer never aborts the others. On
/// offline→online the monitor persists the new state, appends an "online"
/// log entry, publishes an event, and (if enabled) raises a desktop
/// notification. On online→offline it persists, logs, and publishes, but
/// never notifies. No-change observations touch nothing.
#[derive(Clone)]
pub struct BroadcastMonitor {
    platform: Arc<dyn LivePlatform>,
    streamer_repo: Arc<dyn StreamerRepository>,
    status_repo: Arc<dyn StreamStatusRepository>,
    log_repo: Arc<dyn StatusLogRepository>,
    config_repo: Arc<dyn BotConfigRepository>,
    notifier: Arc<dyn Notifier>,
    event_bus: Arc<EventBus>,
}

impl BroadcastMonitor {
    pub fn new(
        platform: Arc<dyn LivePlatform>,
        streamer_repo: Arc<dyn StreamerRepository>,
        status_repo: Arc<dyn StreamStatusRepository>,
        log_repo: Arc<dyn StatusLogRepository>,
        config_repo: Arc<dyn BotConfigRepository>,
        notifier: Arc<dyn Notifier>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            platform,
            streamer_repo,
            status_repo,
            log_repo,
            config_repo,
            notifier,
            event_bus,
        }
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    /// Run one poll cycle over the full tracked list. The list and the
    /// notifications flag are read fresh on every cycle.
    pub async fn check_all_broadcasts(&self) -> Result<(), Error> {
        self.event_bus.publish(AlertEvent::Tick).await;

        let streamers = self.streamer_repo.list_streamers().await?;
        if streamers.is_empty() {
            debug!("No streamers registered; skipping poll cycle");
            return Ok(());
        }

        let notifications_enabled = self.config_repo.notifications_enabled().await?;

        let mut handles = Vec::with_capacity(streamers.len());
        for streamer in streamers {
            let monitor = self.clone();
            handles.push(tokio::spawn(async move {
                monitor
                    .check_one(&streamer.streamer_id, notifications_enabled)
                    .await;
            }));
        }

        // Join every fetch; a panicked sibling is logged, not propagated.
        for handle in handles {
            if let Err(e) = handle.await {
                error!("Poll task panicked: {e:?}");
            }
        }

        Ok(())
    }

    async fn check_one(&self, streamer_id: &str, notifications_enabled: bool) {
        let status = match self.platform.fetch_live_status(streamer_id).await {
            Ok(s) => s,
            Err(e) => {
                // No retry until the next cycle, no state change.
                warn!("Failed to fetch live status for '{}': {}", streamer_id, e);
                return;
            }
        };

        let was_live = match self.status_repo.get_status(streamer_id).await {
            Ok(v) => v,
            Err(e) => {
                error!("Failed to read stored status for '{}': {}", streamer_id, e);
                return;
            }
        };

        if status.online && !was_live {
            self.handle_went_online(streamer_id, &status, notifications_enabled)
                .await;
        } else if !status.online && was_live {
            self.handle_went_offline(streamer_id).await;
        } else {
            debug!(
                "No change for '{}' (online={})",
                streamer_id, status.online
            );
        }
    }

    async fn handle_went_online(
        &self,
        streamer_id: &str,
        status: &LiveStatus,
        notifications_enabled: bool,
    ) {
        let now = Utc::now();
        info!("'{}' went live: {}", streamer_id, status.title);

        if let Err(e) = self.status_repo.set_status(streamer_id, true).await {
            error!("Failed to persist online status for '{}': {}", streamer_id, e);
            return;
        }
        if let Err(e) = self
            .log_repo
            .append_entry(streamer_id, StreamState::Online, now)
            .await
        {
            error!("Failed to append online log for '{}': {}", streamer_id, e);
        }

        self.event_bus
            .publish(AlertEvent::StreamOnline {
                streamer_id: streamer_id.to_string(),
                nickname: status.nickname.clone(),
                title: status.title.clone(),
                timestamp: now,
            })
            .await;

        if notifications_enabled {
            let summary = format!("Stream alert: {} ({})", streamer_id, status.nickname);
            let body = format!("{} is now live!\nTitle: {}", status.nickname, status.title);
            if let Err(e) = self.notifier.notify(&summary, &body).await {
                warn!("Failed to show notification for '{}': {}", streamer_id, e);
            }
        }
    }

    async fn handle_went_offline(&self, streamer_id: &str) {
        let now = Utc::now();
        info!("'{}' went offline", streamer_id);

        if let Err(e) = self.status_repo.set_status(streamer_id, false).await {
            error!("Failed to persist offline status for '{}': {}", streamer_id, e);
            return;
        }
        if let Err(e) = self
            .log_repo
            .append_entry(streamer_id, StreamState::Offline, now)
            .await
        {
            error!("Failed to append offline log for '{}': {}", streamer_id, e);
        }

        self.event_bus
            .publish(AlertEvent::StreamOffline {
                streamer_id: streamer_id.to_string(),
                timestamp: now,
            })
            .await;
    }
}
