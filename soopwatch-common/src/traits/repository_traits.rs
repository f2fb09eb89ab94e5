use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::error::Error;
use crate::models::{StatusLogEntry, StreamState, TrackedStreamer};

/// The user-maintained list of streamer IDs. Listing preserves insertion
/// order; the order has no other meaning.
#[async_trait]
pub trait StreamerRepository: Send + Sync {
    async fn add_streamer(&self, streamer_id: &str) -> Result<(), Error>;
    async fn list_streamers(&self) -> Result<Vec<TrackedStreamer>, Error>;

    /// Returns true if a row was actually deleted.
    async fn remove_streamer(&self, streamer_id: &str) -> Result<bool, Error>;

    async fn is_tracked(&self, streamer_id: &str) -> Result<bool, Error>;
}

/// Last-known live flag per streamer. A streamer with no stored row
/// reads as offline.
#[async_trait]
pub trait StreamStatusRepository: Send + Sync {
    async fn get_status(&self, streamer_id: &str) -> Result<bool, Error>;
    async fn set_status(&self, streamer_id: &str, is_live: bool) -> Result<(), Error>;
    async fn delete_status(&self, streamer_id: &str) -> Result<(), Error>;
    async fn all_statuses(&self) -> Result<Vec<(String, bool)>, Error>;
}

/// Append-only transition log, one sequence per streamer.
#[async_trait]
pub trait StatusLogRepository: Send + Sync {
    async fn append_entry(
        &self,
        streamer_id: &str,
        status: StreamState,
        logged_at: DateTime<Utc>,
    ) -> Result<(), Error>;

    async fn list_entries(&self, streamer_id: &str) -> Result<Vec<StatusLogEntry>, Error>;
    async fn delete_entries(&self, streamer_id: &str) -> Result<(), Error>;
}

/// Flat config key/value storage plus typed accessors for the two
/// soopwatch settings. Typed getters fall back to the documented default
/// when the key is absent or unparseable.
#[async_trait]
pub trait BotConfigRepository: Send + Sync {
    async fn get_value(&self, config_key: &str) -> Result<Option<String>, Error>;
    async fn set_value(&self, config_key: &str, config_value: &str) -> Result<(), Error>;
    async fn delete_value(&self, config_key: &str) -> Result<(), Error>;
    async fn list_all(&self) -> Result<Vec<(String, String)>, Error>;

    async fn poll_interval_ms(&self) -> Result<u64, Error>;
    async fn set_poll_interval_ms(&self, interval_ms: u64) -> Result<(), Error>;

    async fn notifications_enabled(&self) -> Result<bool, Error>;
    async fn set_notifications_enabled(&self, enabled: bool) -> Result<(), Error>;
}
