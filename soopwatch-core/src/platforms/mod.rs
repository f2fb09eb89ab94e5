// File: src/platforms/mod.rs

use async_trait::async_trait;
use soopwatch_common::models::LiveStatus;
use crate::Error;

/// Seam between the broadcast monitor and whatever platform answers
/// "is this streamer live right now".
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LivePlatform: Send + Sync {
    /// Fetch the current liveness, title, and nickname for one streamer.
    /// A streamer the platform does not know about is an error, not an
    /// offline observation.
    async fn fetch_live_status(&self, streamer_id: &str) -> Result<LiveStatus, Error>;
}

pub mod soop;
